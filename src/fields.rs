//! The provider's protocol vocabulary.
//!
//! Field names, group types and group ids are schema constants fixed by the
//! remote provider; the encode path must reproduce them byte-for-byte. They
//! live in one table so no literal is repeated at a call site.

use crate::wire::Parameter;

/// Provider service names.
pub mod service {
    pub const CREDIT_MANAGEMENT_3: &str = "CreditManagement3";
    pub const SUBSCRIPTIONS: &str = "Subscriptions";
}

/// Provider action names.
pub mod action {
    pub const DEBTOR_INFO: &str = "DebtorInfo";
    pub const CREATE_COMBINED_SUBSCRIPTION: &str = "CreateCombinedSubscription";
}

/// Every wire parameter the gateway reads or writes, with its fixed
/// group-type/group-id pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    // Debtor lookup and identity
    DebtorCode,
    Code,
    SubscriptionIds,
    InvoiceIds,
    // Person
    FirstName,
    LastName,
    Culture,
    // Address
    Street,
    HouseNumber,
    HouseNumberSuffix,
    ZipCode,
    City,
    Country,
    // Contact
    Email,
    Mobile,
    // Subscription service
    IncludeTransaction,
    ConfigurationCode,
    // Rate plan / charge
    RatePlanCode,
    RatePlanChargeCode,
    PricePerUnit,
    VatPercentage,
    TransactionVatPercentage,
    StartDate,
    EndDate,
    // Custom parameters
    Gender,
}

impl Field {
    /// Wire name of the parameter.
    pub fn name(self) -> &'static str {
        match self {
            Field::DebtorCode => "DebtorCode",
            Field::Code => "Code",
            Field::SubscriptionIds => "SubscriptionGuids",
            Field::InvoiceIds => "InvoiceNumbers",
            Field::FirstName => "FirstName",
            Field::LastName => "LastName",
            Field::Culture => "Culture",
            Field::Street => "Street",
            Field::HouseNumber => "HouseNumber",
            Field::HouseNumberSuffix => "HouseNumberSuffix",
            Field::ZipCode => "ZipCode",
            Field::City => "City",
            Field::Country => "Country",
            Field::Email => "Email",
            Field::Mobile => "Mobile",
            Field::IncludeTransaction => "IncludeTransaction",
            Field::ConfigurationCode => "ConfigurationCode",
            Field::RatePlanCode => "RatePlanCode",
            Field::RatePlanChargeCode => "RatePlanChargeCode",
            Field::PricePerUnit => "PricePerUnit",
            Field::VatPercentage => "VatPercentage",
            Field::TransactionVatPercentage => "TransactionVatPercentage",
            Field::StartDate => "StartDate",
            Field::EndDate => "EndDate",
            Field::Gender => "Gender",
        }
    }

    /// Wire group type of the parameter. Empty for ungrouped fields.
    pub fn group_type(self) -> &'static str {
        match self {
            Field::DebtorCode | Field::Code => "Debtor",
            Field::FirstName | Field::LastName | Field::Culture => "Person",
            Field::Street
            | Field::HouseNumber
            | Field::HouseNumberSuffix
            | Field::ZipCode
            | Field::City
            | Field::Country => "Address",
            Field::Email => "Email",
            Field::Mobile => "Phone",
            Field::RatePlanCode | Field::StartDate | Field::EndDate => "AddRatePlan",
            Field::RatePlanChargeCode | Field::PricePerUnit | Field::VatPercentage => {
                "AddRatePlanCharge"
            }
            Field::SubscriptionIds
            | Field::InvoiceIds
            | Field::IncludeTransaction
            | Field::ConfigurationCode
            | Field::TransactionVatPercentage
            | Field::Gender => "",
        }
    }

    /// Wire group id of the parameter. "subscription" for the rate-plan
    /// cluster, empty otherwise.
    pub fn group_id(self) -> &'static str {
        match self {
            Field::RatePlanCode
            | Field::RatePlanChargeCode
            | Field::PricePerUnit
            | Field::VatPercentage
            | Field::TransactionVatPercentage
            | Field::StartDate
            | Field::EndDate => "subscription",
            _ => "",
        }
    }

    /// Builds a wire parameter carrying `value` under this field's fixed
    /// name/group-type/group-id triple.
    pub fn parameter(self, value: impl Into<String>) -> Parameter {
        Parameter {
            name: self.name().to_string(),
            group_type: self.group_type().to_string(),
            group_id: self.group_id().to_string(),
            value: Some(value.into()),
        }
    }
}
