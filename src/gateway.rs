use uuid::Uuid;

use crate::codec;
use crate::errors::{GatewayError, ResultExt};
use crate::models::{CreateCombinedSubscriptionRequest, Debtor, GetDebtorRequest, Subscription};
use crate::psp_client::PspClient;
use crate::wire::{GatewayResponse, Status};

/// Business outcome of a provider response, derived from its status block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOutcome {
    /// The operation completed; response parameters are decodable.
    Success,
    /// The end user must complete a step via the redirect URL.
    PendingInput,
    /// Lookup target does not exist at the provider; defined absence.
    DebtorNotFound,
    /// Anything else the provider reports.
    Other,
}

/// Classifies a response status by the provider's human-readable descriptions.
///
/// The provider's contract is substring matching on these descriptions, not
/// the numeric codes; every such literal lives here and nowhere else.
pub fn classify_status(status: &Status) -> StatusOutcome {
    if status.code.description.contains("Success") {
        return StatusOutcome::Success;
    }
    if status.code.description.contains("Pending input") {
        return StatusOutcome::PendingInput;
    }
    let not_found = status
        .sub_code
        .as_ref()
        .map(|sub| sub.description.contains("The debtor is not found"))
        .unwrap_or(false);
    if not_found {
        StatusOutcome::DebtorNotFound
    } else {
        StatusOutcome::Other
    }
}

/// Subscription gateway to the payment provider.
///
/// Orchestrates the codec, signer and transport for each business operation;
/// holds no mutable state, so one instance is safe to share across tasks.
#[derive(Clone)]
pub struct BuckarooGateway {
    client: PspClient,
}

impl BuckarooGateway {
    pub fn new(client: PspClient) -> Self {
        Self { client }
    }

    /// Looks up a debtor by id.
    ///
    /// Returns `None` both for the provider's explicit "debtor not found"
    /// sub-status and for any other non-success status; lookups stay resilient
    /// to provider-side quirks. Transport and decoding errors propagate.
    pub async fn get_debtor(&self, debtor_id: Uuid) -> Result<Option<Debtor>, GatewayError> {
        match self.get_debtor_inner(debtor_id).await {
            Ok(debtor) => Ok(debtor),
            Err(e) => {
                tracing::error!("GetDebtor {} failed: {}", debtor_id, e);
                Err(e)
            }
        }
    }

    async fn get_debtor_inner(&self, debtor_id: Uuid) -> Result<Option<Debtor>, GatewayError> {
        let request = codec::debtor_info_request(&GetDebtorRequest { debtor_id });
        let response: GatewayResponse = self.client.post_data_request(&request).await?;

        match classify_status(&response.status) {
            StatusOutcome::Success => {
                tracing::info!("Successfully found debtor {}", debtor_id);
                codec::decode_debtor(&response).map(Some)
            }
            StatusOutcome::DebtorNotFound => {
                tracing::info!("Failed to find debtor {}", debtor_id);
                Ok(None)
            }
            _ => {
                tracing::warn!(
                    "Failed to find debtor {}: {}",
                    debtor_id,
                    response.status.code.description
                );
                Ok(None)
            }
        }
    }

    /// Registers a debtor and creates a recurring subscription in one
    /// combined transaction.
    ///
    /// Returns the provider's redirect URL for user completion. Any status
    /// other than pending-input is a business failure carrying the provider's
    /// status description.
    pub async fn create_combined_subscription(
        &self,
        debtor: &Debtor,
        subscription: &Subscription,
    ) -> Result<String, GatewayError> {
        match self.create_combined_inner(debtor, subscription).await {
            Ok(redirect_url) => Ok(redirect_url),
            Err(e) => {
                tracing::error!("CreateCombinedSubscription failed: {}", e);
                Err(e)
            }
        }
    }

    async fn create_combined_inner(
        &self,
        debtor: &Debtor,
        subscription: &Subscription,
    ) -> Result<String, GatewayError> {
        let request = codec::combined_subscription_request(&CreateCombinedSubscriptionRequest {
            debtor: debtor.clone(),
            subscription: subscription.clone(),
        });
        let response: GatewayResponse = self
            .client
            .post_transaction(&request)
            .await
            .context("CreateCombinedSubscription")?;

        if classify_status(&response.status) == StatusOutcome::PendingInput {
            return response
                .required_action
                .map(|action| action.redirect_url)
                .ok_or_else(|| {
                    GatewayError::Transport(
                        "Pending input response missing RequiredAction".to_string(),
                    )
                });
        }

        Err(GatewayError::Business(
            response.status.code.description.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::StatusCode;

    fn status(description: &str, sub_description: Option<&str>) -> Status {
        Status {
            code: StatusCode {
                code: None,
                description: description.to_string(),
            },
            sub_code: sub_description.map(|d| StatusCode {
                code: None,
                description: d.to_string(),
            }),
        }
    }

    #[test]
    fn success_description_classifies_as_success() {
        let outcome = classify_status(&status("Success", Some("Successful")));
        assert_eq!(outcome, StatusOutcome::Success);
    }

    #[test]
    fn pending_input_description_classifies_as_pending() {
        let outcome = classify_status(&status("Pending input", None));
        assert_eq!(outcome, StatusOutcome::PendingInput);
    }

    #[test]
    fn not_found_sub_description_classifies_as_absence() {
        let outcome = classify_status(&status(
            "Failed",
            Some("The debtor is not found in the system"),
        ));
        assert_eq!(outcome, StatusOutcome::DebtorNotFound);
    }

    #[test]
    fn anything_else_classifies_as_other() {
        let outcome = classify_status(&status("Failed", Some("Validation failure")));
        assert_eq!(outcome, StatusOutcome::Other);
        let outcome = classify_status(&status("Failed", None));
        assert_eq!(outcome, StatusOutcome::Other);
    }
}
