use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

// ============ Domain Entities ============

/// A postal address, embedded in debtors and subscription requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Street name.
    pub street: String,
    /// House number.
    pub house_number: i32,
    /// Optional house number suffix (e.g., "A", "bis").
    pub house_number_suffix: String,
    /// Postal code.
    pub postal_code: String,
    /// City name.
    pub city: String,
}

/// A customer known to the payment provider.
///
/// Returned by debtor lookups; owned by the caller once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debtor {
    /// Unique identifier of the debtor at the provider.
    pub id: Uuid,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address.
    pub email_address: String,
    /// Mobile phone number.
    pub phone_number: String,
    /// Postal address.
    pub address: Address,
    /// Identifiers of the debtor's subscriptions, in provider order.
    pub subscription_ids: Option<Vec<String>>,
    /// Identifiers of the debtor's invoices, in provider order.
    pub invoice_ids: Option<Vec<String>>,
}

/// The billable terms of a subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Charge {
    /// Provider-side rate plan code.
    pub rate_plan_code: String,
    /// Provider-side rate plan charge code.
    pub rate_plan_charge_code: String,
    /// Price per unit, excluding VAT.
    pub price_per_unit: Decimal,
    /// VAT percentage applied to the charge.
    pub vat_percentage: Decimal,
    /// First billing date.
    pub start_date: NaiveDate,
    /// Optional last billing date; open-ended when absent.
    pub end_date: Option<NaiveDate>,
}

/// A recurring billing subscription to be created at the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    /// Product name, used as the transaction description.
    pub name: Option<String>,
    /// Longer product description.
    pub description: Option<String>,
    /// Text printed on the invoice.
    pub invoice_description: Option<String>,
    /// The subscription's billable terms.
    pub charge: Charge,
    /// Provider-side product template this subscription instantiates.
    pub configuration_code: String,
    /// Optional invoice address when it differs from the debtor's.
    pub invoice_address: Option<Address>,
}

/// Gender vocabulary of the provider's custom parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            "Other" => Ok(Gender::Other),
            other => Err(format!("unknown gender: {}", other)),
        }
    }
}

// ============ Gateway Requests ============

/// Lookup request for a single debtor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetDebtorRequest {
    /// Identifier of the debtor to fetch.
    pub debtor_id: Uuid,
}

/// Request to register a debtor and create a recurring subscription in one
/// combined transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCombinedSubscriptionRequest {
    /// The debtor to register.
    pub debtor: Debtor,
    /// The subscription to create for the debtor.
    pub subscription: Subscription,
}
