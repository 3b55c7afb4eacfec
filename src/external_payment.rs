//! External (bank card) payments bound to one registered application instance

use crate::config::ClientConfig;
use crate::transport::{ApiResponse, Transport};
use crate::types::{PaymentOptions, STATUS_SUCCESS};
use crate::wallet::Wallet;
use crate::{Result, YandexMoneyError};
use tracing::info;

/// Client for external payments made on behalf of an application instance
#[derive(Debug, Clone)]
pub struct ExternalPayment {
    instance_id: String,
    wallet: Wallet,
}

impl ExternalPayment {
    /// Bind an already registered instance id
    pub fn new(instance_id: impl Into<String>, config: ClientConfig) -> Result<Self> {
        Ok(Self::with_transport(
            instance_id,
            Transport::with_config(config)?,
        ))
    }

    /// Bind an already registered instance id over an existing transport
    pub fn with_transport(instance_id: impl Into<String>, transport: Transport) -> Self {
        Self {
            instance_id: instance_id.into(),
            wallet: Wallet::with_transport(None, transport),
        }
    }

    /// Register a new instance for `client_id` and bind the returned id.
    ///
    /// Fails with [`YandexMoneyError::Refused`] when the provider declines the registration.
    pub async fn register(client_id: &str, transport: Transport) -> Result<Self> {
        let wallet = Wallet::with_transport(None, transport);
        let response = wallet.get_instance_id(client_id).await?;

        let instance_id = response
            .payload
            .get("instance_id")
            .and_then(|v| v.as_str())
            .map(str::to_string);

        match (response.api_status(), instance_id) {
            (Some(STATUS_SUCCESS), Some(instance_id)) => {
                info!("registered external payment instance");
                Ok(Self {
                    instance_id,
                    wallet,
                })
            }
            (status, _) => {
                let error = response
                    .payload
                    .get("error")
                    .and_then(|v| v.as_str())
                    .or(status)
                    .unwrap_or("empty instance-id response");
                Err(YandexMoneyError::refused(error))
            }
        }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    pub async fn request(&self, options: &PaymentOptions) -> Result<ApiResponse> {
        self.wallet
            .request_external_payment(&self.instance_id, options)
            .await
    }

    pub async fn process(&self, options: &PaymentOptions) -> Result<ApiResponse> {
        self.wallet
            .process_external_payment(&self.instance_id, options)
            .await
    }
}
