//! # yandex-money - Yandex.Money API client
//!
//! An async client for the Yandex.Money wallet and external payment HTTP API.
//! Every call is a single form-encoded POST; responses are classified by status code
//! into a JSON payload or one of a small set of errors. There are no retries and no
//! caching.
//!
//! ```rust,no_run
//! # async fn run() -> yandex_money::Result<()> {
//! use yandex_money::{PaymentOptions, Wallet};
//!
//! let wallet = Wallet::new("access-token")?;
//! let info = wallet.account_info().await?;
//! println!("{}", info.payload);
//!
//! let request = wallet
//!     .request_payment(&PaymentOptions::p2p("410011161616877", "0.02".parse().unwrap()))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod external_payment;
pub mod oauth;
pub mod transport;
pub mod types;
pub mod wallet;

// Re-exports for convenience
pub use config::ClientConfig;
pub use error::{Result, YandexMoneyError};
pub use external_payment::ExternalPayment;
pub use oauth::build_obtain_token_url;
pub use transport::{ApiRequest, ApiResponse, Transport};
pub use types::*;
pub use wallet::Wallet;

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
