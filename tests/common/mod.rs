//! Shared helpers for integration tests

#![allow(dead_code)]

use mockito::ServerGuard;
use yandex_money::{ClientConfig, Transport, Wallet};

pub const TEST_TOKEN: &str = "410011161616877.0123456789ABCDEF";
pub const TEST_USER_AGENT: &str = "yandex-money-tests";

pub fn test_config(server: &ServerGuard) -> ClientConfig {
    ClientConfig::new(server.url())
        .with_user_agent(TEST_USER_AGENT)
        .with_accept_invalid_certs(false)
}

pub fn test_transport(server: &ServerGuard) -> Transport {
    Transport::with_config(test_config(server)).unwrap()
}

pub fn test_wallet(server: &ServerGuard) -> Wallet {
    Wallet::with_config(Some(TEST_TOKEN.to_string()), test_config(server)).unwrap()
}

pub fn anonymous_wallet(server: &ServerGuard) -> Wallet {
    Wallet::with_config(None, test_config(server)).unwrap()
}

pub fn bearer() -> String {
    format!("Bearer {}", TEST_TOKEN)
}
