use serde::{Deserialize, Serialize};

use crate::errors::GatewayError;

/// The fundamental unit of the provider's flattened protocol: a named, grouped
/// string value inside a service's parameter list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "GroupType", default)]
    pub group_type: String,
    #[serde(rename = "GroupID", default)]
    pub group_id: String,
    #[serde(rename = "Value")]
    pub value: Option<String>,
}

/// A name/value pair outside the service parameter lists (the provider's
/// `CustomParameters` block).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomParameter {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Value")]
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomParameters {
    #[serde(rename = "List")]
    pub list: Vec<CustomParameter>,
}

/// One provider-side operation: a service name, an action, and its parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceList {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Action")]
    pub action: Option<String>,
    #[serde(rename = "Parameters")]
    pub parameters: Option<Vec<Parameter>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Services {
    #[serde(rename = "ServiceList")]
    pub service_list: Vec<ServiceList>,
}

/// Request envelope for the read-only data-request endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct DebtorInfoRequest {
    #[serde(rename = "Services")]
    pub services: Services,
}

/// Request envelope for the transaction endpoint.
///
/// The scalar fields ride alongside the service list; their wire names and
/// literal defaults are fixed by the provider's schema.
#[derive(Debug, Clone, Serialize)]
pub struct CombinedSubscriptionRequest {
    #[serde(rename = "Currency")]
    pub currency: String,
    #[serde(rename = "StartRecurrent")]
    pub start_recurrent: String,
    #[serde(rename = "ContinueOnIncomplete")]
    pub continue_on_incomplete: String,
    #[serde(rename = "AmountDebit")]
    pub amount_debit: rust_decimal::Decimal,
    #[serde(rename = "AmountCredit")]
    pub amount_credit: rust_decimal::Decimal,
    #[serde(rename = "Invoice")]
    pub invoice: String,
    #[serde(rename = "Description")]
    pub description: Option<String>,
    #[serde(rename = "CustomParameters")]
    pub custom_parameters: Option<CustomParameters>,
    #[serde(rename = "Services")]
    pub services: Services,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusCode {
    /// Numeric for the primary status, alphanumeric (e.g. "S990") for sub-statuses.
    #[serde(rename = "Code", default)]
    pub code: Option<serde_json::Value>,
    #[serde(rename = "Description", default)]
    pub description: String,
}

/// Primary status plus sub-status; the authoritative business outcome of a
/// response, independent of the HTTP status.
#[derive(Debug, Clone, Deserialize)]
pub struct Status {
    #[serde(rename = "Code")]
    pub code: StatusCode,
    #[serde(rename = "SubCode", default)]
    pub sub_code: Option<StatusCode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RequiredAction {
    #[serde(rename = "RedirectURL", default)]
    pub redirect_url: String,
}

/// Response envelope shared by both endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayResponse {
    #[serde(rename = "Key", default)]
    pub key: Option<String>,
    #[serde(rename = "Status")]
    pub status: Status,
    #[serde(rename = "RequiredAction", default)]
    pub required_action: Option<RequiredAction>,
    #[serde(rename = "Services", default)]
    pub services: Option<Vec<ServiceList>>,
    #[serde(rename = "ServiceCode", default)]
    pub service_code: Option<String>,
    #[serde(rename = "IsTest", default)]
    pub is_test: Option<bool>,
}

impl GatewayResponse {
    /// Parameters of the response's first service.
    ///
    /// A response without a service parameter list cannot be decoded further;
    /// that is a protocol violation, not an empty result.
    pub fn service_parameters(&self) -> Result<&[Parameter], GatewayError> {
        self.services
            .as_deref()
            .and_then(|s| s.first())
            .and_then(|s| s.parameters.as_deref())
            .ok_or_else(|| {
                GatewayError::Transport("Failed to get response Parameters".to_string())
            })
    }
}
