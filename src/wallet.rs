//! Wallet API facade
//!
//! One async method per remote endpoint. Each method maps its arguments to a form body,
//! attaches the bearer token when the endpoint needs one and hands the request to the
//! [`Transport`]. Errors pass through unchanged.

use crate::config::ClientConfig;
use crate::oauth;
use crate::transport::{ApiRequest, ApiResponse, Transport};
use crate::types::{Endpoint, FormData, OperationHistoryOptions, PaymentOptions};
use crate::Result;
use tracing::debug;

/// Client for a single wallet, optionally bound to an access token
#[derive(Clone)]
pub struct Wallet {
    access_token: Option<String>,
    transport: Transport,
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "<redacted>"),
            )
            .field("transport", &self.transport)
            .finish()
    }
}

impl Wallet {
    /// Create a wallet client for `access_token` with the default configuration
    pub fn new(access_token: impl Into<String>) -> Result<Self> {
        Self::with_config(Some(access_token.into()), ClientConfig::default())
    }

    /// Create a client without a token, for token exchange and external payments
    pub fn anonymous() -> Result<Self> {
        Self::with_config(None, ClientConfig::default())
    }

    /// Create a client with a custom configuration
    pub fn with_config(access_token: Option<String>, config: ClientConfig) -> Result<Self> {
        Ok(Self::with_transport(access_token, Transport::with_config(config)?))
    }

    /// Create a client over an existing transport.
    ///
    /// Transports are cheap to clone and may be shared between wallets for different tokens.
    pub fn with_transport(access_token: Option<String>, transport: Transport) -> Self {
        Self {
            access_token,
            transport,
        }
    }

    pub fn has_access_token(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    async fn send(&self, endpoint: Endpoint, form: FormData) -> Result<ApiResponse> {
        let mut request = ApiRequest::new(endpoint.path()).form(form);

        if endpoint.requires_auth() {
            match &self.access_token {
                Some(token) => request = request.bearer(token)?,
                None => debug!(?endpoint, "no access token, sending without Authorization"),
            }
        }

        self.transport.post(request).await
    }

    /// Account status and balance
    pub async fn account_info(&self) -> Result<ApiResponse> {
        self.send(Endpoint::AccountInfo, FormData::new()).await
    }

    /// Page through the operation history
    pub async fn operation_history(&self, options: &OperationHistoryOptions) -> Result<ApiResponse> {
        self.send(Endpoint::OperationHistory, options.to_form()).await
    }

    /// Details of a single operation
    pub async fn operation_details(&self, operation_id: &str) -> Result<ApiResponse> {
        let form = FormData::new().with("operation_id", operation_id);
        self.send(Endpoint::OperationDetails, form).await
    }

    /// First step of a payment: validate parameters and reserve a `request_id`
    pub async fn request_payment(&self, options: &PaymentOptions) -> Result<ApiResponse> {
        self.send(Endpoint::RequestPayment, options.to_form()).await
    }

    /// Second step of a payment: confirm a `request_id`
    pub async fn process_payment(&self, options: &PaymentOptions) -> Result<ApiResponse> {
        self.send(Endpoint::ProcessPayment, options.to_form()).await
    }

    /// Accept a protected incoming transfer
    pub async fn incoming_transfer_accept(
        &self,
        operation_id: &str,
        protection_code: Option<&str>,
    ) -> Result<ApiResponse> {
        let mut form = FormData::new();
        form.insert("operation_id", operation_id)
            .insert_opt("protection_code", protection_code);
        self.send(Endpoint::IncomingTransferAccept, form).await
    }

    /// Reject a protected incoming transfer, returning the money to the sender
    pub async fn incoming_transfer_reject(&self, operation_id: &str) -> Result<ApiResponse> {
        let form = FormData::new().with("operation_id", operation_id);
        self.send(Endpoint::IncomingTransferReject, form).await
    }

    /// Revoke this wallet's token, or every token issued to the application when `revoke_all`
    pub async fn revoke_token(&self, revoke_all: bool) -> Result<ApiResponse> {
        let mut form = FormData::new();
        if revoke_all {
            form.insert("revoke_all", true);
        }
        self.send(Endpoint::RevokeToken, form).await
    }

    /// Exchange an authorization code for an access token
    pub async fn get_access_token(
        &self,
        code: &str,
        client_id: &str,
        redirect_uri: &str,
        client_secret: Option<&str>,
    ) -> Result<ApiResponse> {
        let mut form = FormData::new();
        form.insert("code", code)
            .insert("client_id", client_id)
            .insert("redirect_uri", redirect_uri)
            .insert_opt("client_secret", client_secret)
            .insert("grant_type", "authorization_code");
        self.send(Endpoint::AccessToken, form).await
    }

    /// Register an application instance for external payments
    pub async fn get_instance_id(&self, client_id: &str) -> Result<ApiResponse> {
        let form = FormData::new().with("client_id", client_id);
        self.send(Endpoint::InstanceId, form).await
    }

    /// First step of a payment from a bank card, on behalf of an application instance
    pub async fn request_external_payment(
        &self,
        instance_id: &str,
        options: &PaymentOptions,
    ) -> Result<ApiResponse> {
        let form = options.to_form().with("instance_id", instance_id);
        self.send(Endpoint::RequestExternalPayment, form).await
    }

    /// Second step of a payment from a bank card, on behalf of an application instance
    pub async fn process_external_payment(
        &self,
        instance_id: &str,
        options: &PaymentOptions,
    ) -> Result<ApiResponse> {
        let form = options.to_form().with("instance_id", instance_id);
        self.send(Endpoint::ProcessExternalPayment, form).await
    }

    /// [`build_obtain_token_url`](crate::oauth::build_obtain_token_url) against this
    /// client's configured base URL
    pub fn obtain_token_url<S: AsRef<str>>(
        &self,
        client_id: &str,
        redirect_uri: &str,
        scopes: &[S],
    ) -> String {
        oauth::authorize_url(
            &self.transport.config().base_url,
            client_id,
            redirect_uri,
            scopes,
        )
    }
}
