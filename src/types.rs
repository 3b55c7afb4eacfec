//! Core types for the Yandex.Money API: endpoints, form payloads and response views

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Remote API endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    AccountInfo,
    OperationHistory,
    OperationDetails,
    RequestPayment,
    ProcessPayment,
    IncomingTransferAccept,
    IncomingTransferReject,
    RevokeToken,
    AccessToken,
    InstanceId,
    RequestExternalPayment,
    ProcessExternalPayment,
}

impl Endpoint {
    /// Path relative to the configured base URL
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::AccountInfo => "/api/account-info",
            Endpoint::OperationHistory => "/api/operation-history",
            Endpoint::OperationDetails => "/api/operation-details",
            Endpoint::RequestPayment => "/api/request-payment",
            Endpoint::ProcessPayment => "/api/process-payment",
            Endpoint::IncomingTransferAccept => "/api/incoming-transfer-accept",
            Endpoint::IncomingTransferReject => "/api/incoming-transfer-reject",
            Endpoint::RevokeToken => "/api/revoke",
            Endpoint::AccessToken => "/oauth/token",
            Endpoint::InstanceId => "/api/instance-id",
            Endpoint::RequestExternalPayment => "/api/request-external-payment",
            Endpoint::ProcessExternalPayment => "/api/process-external-payment",
        }
    }

    /// Whether the call carries the wallet's bearer token.
    ///
    /// Token exchange, instance registration and external payments act on behalf of an
    /// application instance rather than a user.
    pub fn requires_auth(&self) -> bool {
        !matches!(
            self,
            Endpoint::AccessToken
                | Endpoint::InstanceId
                | Endpoint::RequestExternalPayment
                | Endpoint::ProcessExternalPayment
        )
    }
}

/// `application/x-www-form-urlencoded` request body.
///
/// Absent optional fields are simply never inserted, so they never reach the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormData(BTreeMap<String, String>);

impl FormData {
    /// Create an empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        self.0.insert(key.into(), value.to_string());
        self
    }

    /// Set a field only when a value is present
    pub fn insert_opt<V: ToString>(&mut self, key: impl Into<String>, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Merge pass-through fields without overwriting named ones
    fn merge_extra(&mut self, extra: &BTreeMap<String, String>) {
        for (key, value) in extra {
            self.0.entry(key.clone()).or_insert_with(|| value.clone());
        }
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = FormData::new();
        for (key, value) in iter {
            form.insert(key, value);
        }
        form
    }
}

fn rfc3339(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Operation kinds accepted by the `type` filter of the history endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationType {
    Deposition,
    Payment,
    IncomingTransfersUnaccepted,
}

impl OperationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Deposition => "deposition",
            OperationType::Payment => "payment",
            OperationType::IncomingTransfersUnaccepted => "incoming-transfers-unaccepted",
        }
    }
}

/// Filters for the operation history endpoint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationHistoryOptions {
    /// Operation kinds, sent space-separated; empty means all
    pub types: Vec<OperationType>,
    /// Only operations with this payment label
    pub label: Option<String>,
    /// Operations at or after this instant
    pub from: Option<DateTime<Utc>>,
    /// Operations strictly before this instant
    pub till: Option<DateTime<Utc>>,
    /// Paging cursor returned as `next_record` by a previous call
    pub start_record: Option<String>,
    /// Page size
    pub records: Option<u32>,
    /// Return full operation details
    pub details: Option<bool>,
    /// Provider-specific fields not modelled above
    pub extra: BTreeMap<String, String>,
}

impl OperationHistoryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, operation_type: OperationType) -> Self {
        self.types.push(operation_type);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_range(mut self, from: DateTime<Utc>, till: DateTime<Utc>) -> Self {
        self.from = Some(from);
        self.till = Some(till);
        self
    }

    pub fn with_start_record(mut self, start_record: impl Into<String>) -> Self {
        self.start_record = Some(start_record.into());
        self
    }

    pub fn with_records(mut self, records: u32) -> Self {
        self.records = Some(records);
        self
    }

    pub fn with_details(mut self, details: bool) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.extra.insert(key.into(), value.to_string());
        self
    }

    /// Render as a form body
    pub fn to_form(&self) -> FormData {
        let mut form = FormData::new();
        if !self.types.is_empty() {
            let types: Vec<&str> = self.types.iter().map(OperationType::as_str).collect();
            form.insert("type", types.join(" "));
        }
        form.insert_opt("label", self.label.as_ref())
            .insert_opt("from", self.from.as_ref().map(rfc3339))
            .insert_opt("till", self.till.as_ref().map(rfc3339))
            .insert_opt("start_record", self.start_record.as_ref())
            .insert_opt("records", self.records)
            .insert_opt("details", self.details);
        form.merge_extra(&self.extra);
        form
    }
}

/// Parameters shared by the request/process payment endpoints, wallet and external.
///
/// Which fields are meaningful depends on the call: `request_*` takes the payee and amount,
/// `process_*` takes the `request_id` returned by the request step plus the money source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentOptions {
    /// `p2p` for wallet transfers or a shop pattern id
    pub pattern_id: Option<String>,
    /// Payee account, phone or email
    pub to: Option<String>,
    /// Amount charged to the payer
    pub amount: Option<Decimal>,
    /// Amount credited to the payee
    pub amount_due: Option<Decimal>,
    pub comment: Option<String>,
    pub message: Option<String>,
    pub label: Option<String>,
    /// Id returned by a request step
    pub request_id: Option<String>,
    /// `wallet`, `cards` or a saved card id
    pub money_source: Option<String>,
    /// Card security code for card money sources
    pub csc: Option<String>,
    /// Redirect target after a successful 3-D Secure check
    pub ext_auth_success_uri: Option<String>,
    /// Redirect target after a failed 3-D Secure check
    pub ext_auth_fail_uri: Option<String>,
    /// Run against the provider's sandbox
    pub test_payment: Option<bool>,
    pub test_card: Option<String>,
    /// Forced sandbox outcome, e.g. `success`
    pub test_result: Option<String>,
    /// Provider-specific fields not modelled above, e.g. shop pattern parameters
    pub extra: BTreeMap<String, String>,
}

impl PaymentOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Person-to-person transfer of `amount_due` to `to`
    pub fn p2p(to: impl Into<String>, amount_due: Decimal) -> Self {
        Self {
            pattern_id: Some("p2p".to_string()),
            to: Some(to.into()),
            amount_due: Some(amount_due),
            ..Self::default()
        }
    }

    /// Process step for a previously requested payment
    pub fn process(request_id: impl Into<String>) -> Self {
        Self {
            request_id: Some(request_id.into()),
            ..Self::default()
        }
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_money_source(mut self, money_source: impl Into<String>) -> Self {
        self.money_source = Some(money_source.into());
        self
    }

    pub fn with_csc(mut self, csc: impl Into<String>) -> Self {
        self.csc = Some(csc.into());
        self
    }

    pub fn with_ext_auth_uris(
        mut self,
        success_uri: impl Into<String>,
        fail_uri: impl Into<String>,
    ) -> Self {
        self.ext_auth_success_uri = Some(success_uri.into());
        self.ext_auth_fail_uri = Some(fail_uri.into());
        self
    }

    /// Mark as a sandbox payment with a forced outcome
    pub fn with_test_result(mut self, test_result: impl Into<String>) -> Self {
        self.test_payment = Some(true);
        self.test_result = Some(test_result.into());
        self
    }

    pub fn with_test_card(mut self, test_card: impl Into<String>) -> Self {
        self.test_card = Some(test_card.into());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.extra.insert(key.into(), value.to_string());
        self
    }

    /// Render as a form body
    pub fn to_form(&self) -> FormData {
        let mut form = FormData::new();
        form.insert_opt("pattern_id", self.pattern_id.as_ref())
            .insert_opt("to", self.to.as_ref())
            .insert_opt("amount", self.amount)
            .insert_opt("amount_due", self.amount_due)
            .insert_opt("comment", self.comment.as_ref())
            .insert_opt("message", self.message.as_ref())
            .insert_opt("label", self.label.as_ref())
            .insert_opt("request_id", self.request_id.as_ref())
            .insert_opt("money_source", self.money_source.as_ref())
            .insert_opt("csc", self.csc.as_ref())
            .insert_opt("ext_auth_success_uri", self.ext_auth_success_uri.as_ref())
            .insert_opt("ext_auth_fail_uri", self.ext_auth_fail_uri.as_ref())
            .insert_opt("test_payment", self.test_payment)
            .insert_opt("test_card", self.test_card.as_ref())
            .insert_opt("test_result", self.test_result.as_ref());
        form.merge_extra(&self.extra);
        form
    }
}

/// `status` value the provider uses for a completed call
pub const STATUS_SUCCESS: &str = "success";

/// `status` value asking the payer to pass 3-D Secure at `acs_uri`
pub const STATUS_EXT_AUTH_REQUIRED: &str = "ext_auth_required";

/// Response of the instance-id endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceIdResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response of the OAuth token exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response of the request-payment endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestPaymentResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
}

/// Response of the process-payment endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessPaymentResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<Decimal>,
    /// 3-D Secure page when `status` is `ext_auth_required`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acs_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acs_params: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response of the account-info endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountInfo {
    pub account: String,
    pub balance: Decimal,
    pub currency: String,
    pub account_status: String,
    pub account_type: String,
}

/// Permission scopes requested through the authorization URL
pub mod scopes {
    pub const ACCOUNT_INFO: &str = "account-info";
    pub const OPERATION_HISTORY: &str = "operation-history";
    pub const OPERATION_DETAILS: &str = "operation-details";
    pub const INCOMING_TRANSFERS: &str = "incoming-transfers";
    pub const PAYMENT_P2P: &str = "payment-p2p";
    pub const PAYMENT_SHOP: &str = "payment-shop";
}
