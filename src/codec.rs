//! Bidirectional mapping between typed domain requests/entities and the
//! provider's flattened parameter lists.
//!
//! Encoding is pure and deterministic; every literal it emits comes from the
//! vocabulary table in [`crate::fields`]. Decoding goes through [`ParameterSet`],
//! whose typed accessors enforce the exactly-one-match rule and classify every
//! parse failure instead of defaulting.

use std::num::IntErrorKind;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::errors::{Accessor, GatewayError, ParseFailure};
use crate::fields::{action, service, Field};
use crate::models::{
    CreateCombinedSubscriptionRequest, Debtor, Gender, GetDebtorRequest,
};
use crate::wire::{
    CombinedSubscriptionRequest, CustomParameter, CustomParameters, DebtorInfoRequest,
    GatewayResponse, Parameter, ServiceList, Services,
};

/// Provider date format (dd-MM-yyyy).
const DATE_FORMAT: &str = "%d-%m-%Y";

// ============ Encoding ============

/// Builds the DebtorInfo lookup envelope for one debtor id.
pub fn debtor_info_request(request: &GetDebtorRequest) -> DebtorInfoRequest {
    DebtorInfoRequest {
        services: Services {
            service_list: vec![ServiceList {
                name: service::CREDIT_MANAGEMENT_3.to_string(),
                action: Some(action::DEBTOR_INFO.to_string()),
                parameters: Some(vec![Field::DebtorCode.parameter(request.debtor_id.to_string())]),
            }],
        },
    }
}

/// Builds the CreateCombinedSubscription transaction envelope: debtor
/// registration, subscription creation and rate-plan parameters in one
/// service list.
///
/// Envelope literals (currency, recurrence flags, amounts, culture, country,
/// transaction VAT) are fixed by the provider contract.
pub fn combined_subscription_request(
    request: &CreateCombinedSubscriptionRequest,
) -> CombinedSubscriptionRequest {
    let debtor = &request.debtor;
    let subscription = &request.subscription;
    let charge = &subscription.charge;

    let mut parameters = vec![
        Field::IncludeTransaction.parameter("true"),
        Field::ConfigurationCode.parameter(subscription.configuration_code.clone()),
    ];

    parameters.extend([
        Field::Code.parameter(debtor.id.to_string()),
        Field::FirstName.parameter(debtor.first_name.clone()),
        Field::LastName.parameter(debtor.last_name.clone()),
        Field::Culture.parameter("nl-NL"),
        Field::Street.parameter(debtor.address.street.clone()),
        Field::HouseNumber.parameter(debtor.address.house_number.to_string()),
        Field::HouseNumberSuffix.parameter(debtor.address.house_number_suffix.clone()),
        Field::ZipCode.parameter(debtor.address.postal_code.clone()),
        Field::City.parameter(debtor.address.city.clone()),
        Field::Country.parameter("NL"),
        Field::Email.parameter(debtor.email_address.clone()),
        Field::Mobile.parameter(debtor.phone_number.clone()),
    ]);

    parameters.extend([
        Field::RatePlanCode.parameter(charge.rate_plan_code.clone()),
        Field::RatePlanChargeCode.parameter(charge.rate_plan_charge_code.clone()),
        Field::PricePerUnit.parameter(charge.price_per_unit.to_string()),
        Field::VatPercentage.parameter(charge.vat_percentage.to_string()),
        Field::TransactionVatPercentage.parameter("21"),
        Field::StartDate.parameter(charge.start_date.format(DATE_FORMAT).to_string()),
        Field::EndDate.parameter(
            charge
                .end_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
        ),
    ]);

    CombinedSubscriptionRequest {
        currency: "EUR".to_string(),
        start_recurrent: "true".to_string(),
        continue_on_incomplete: "1".to_string(),
        amount_debit: Decimal::new(1000, 2),
        amount_credit: Decimal::ZERO,
        invoice: subscription.invoice_description.clone().unwrap_or_default(),
        description: subscription.name.clone(),
        custom_parameters: Some(CustomParameters {
            list: vec![CustomParameter {
                name: Field::Gender.name().to_string(),
                value: Gender::Other.as_str().to_string(),
            }],
        }),
        services: Services {
            service_list: vec![ServiceList {
                name: service::SUBSCRIPTIONS.to_string(),
                action: Some(action::CREATE_COMBINED_SUBSCRIPTION.to_string()),
                parameters: Some(parameters),
            }],
        },
    }
}

// ============ Decoding ============

/// Typed read access over the flattened parameter list of one response service.
#[derive(Debug, Clone, Copy)]
pub struct ParameterSet<'a> {
    parameters: &'a [Parameter],
}

impl<'a> ParameterSet<'a> {
    pub fn new(parameters: &'a [Parameter]) -> Self {
        Self { parameters }
    }

    /// Parameters of the response's first service.
    pub fn from_response(response: &'a GatewayResponse) -> Result<Self, GatewayError> {
        response.service_parameters().map(Self::new)
    }

    fn single(&self, name: &str, accessor: Accessor) -> Result<&'a Parameter, GatewayError> {
        let mut matches = self.parameters.iter().filter(|p| p.name == name);
        let first = matches.next().ok_or(GatewayError::Protocol {
            accessor,
            parameter: name.to_string(),
            failure: ParseFailure::Missing,
        })?;
        if matches.next().is_some() {
            return Err(GatewayError::Protocol {
                accessor,
                parameter: name.to_string(),
                failure: ParseFailure::NotSingle,
            });
        }
        Ok(first)
    }

    /// Value of the single parameter named `name`; a null value reads as "".
    pub fn get_string(&self, name: &str) -> Result<String, GatewayError> {
        let parameter = self.single(name, Accessor::GetString)?;
        Ok(parameter.value.clone().unwrap_or_default())
    }

    pub fn get_bool(&self, name: &str) -> Result<bool, GatewayError> {
        let value = self.get_string(name)?;
        value.parse().map_err(|_| GatewayError::Protocol {
            accessor: Accessor::GetBoolean,
            parameter: name.to_string(),
            failure: ParseFailure::InvalidFormat,
        })
    }

    pub fn get_guid(&self, name: &str) -> Result<Uuid, GatewayError> {
        let value = self.get_string(name)?;
        Uuid::parse_str(&value).map_err(|_| GatewayError::Protocol {
            accessor: Accessor::GetGuid,
            parameter: name.to_string(),
            failure: ParseFailure::InvalidFormat,
        })
    }

    pub fn get_enum<T: FromStr>(&self, name: &str) -> Result<T, GatewayError> {
        let value = self.get_string(name)?;
        value.parse().map_err(|_| GatewayError::Protocol {
            accessor: Accessor::GetEnum,
            parameter: name.to_string(),
            failure: ParseFailure::InvalidFormat,
        })
    }

    pub fn get_int(&self, name: &str) -> Result<i32, GatewayError> {
        let value = self.get_string(name)?;
        value.parse::<i32>().map_err(|e| {
            let failure = match e.kind() {
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ParseFailure::Overflow,
                _ => ParseFailure::InvalidFormat,
            };
            GatewayError::Protocol {
                accessor: Accessor::GetInt,
                parameter: name.to_string(),
                failure,
            }
        })
    }

    /// Decimal under the provider's en-US style notation (`.` as decimal
    /// separator, no thousands grouping).
    pub fn get_decimal(&self, name: &str) -> Result<Decimal, GatewayError> {
        let value = self.get_string(name)?;
        Decimal::from_str(&value).map_err(|e| {
            let failure = match &e {
                rust_decimal::Error::ExceedsMaximumPossibleValue
                | rust_decimal::Error::LessThanMinimumPossibleValue => ParseFailure::Overflow,
                other if other.to_string().contains("overflow") => ParseFailure::Overflow,
                _ => ParseFailure::InvalidFormat,
            };
            GatewayError::Protocol {
                accessor: Accessor::GetDecimal,
                parameter: name.to_string(),
                failure,
            }
        })
    }

    /// Splits a quoted, comma-separated value (`"a","b","c"`) into an ordered
    /// list. An empty value reads as an empty list.
    pub fn get_string_collection(&self, name: &str) -> Result<Vec<String>, GatewayError> {
        let value = self.get_string(name)?;
        let stripped = value.replace('"', "");
        if stripped.is_empty() {
            return Ok(Vec::new());
        }
        Ok(stripped.split(',').map(str::to_string).collect())
    }

    /// Deserializes the value of `name` as embedded JSON.
    ///
    /// Asymmetric by contract: malformed JSON is a protocol error, but a
    /// missing or duplicated parameter (or a null value) reads as `None`.
    /// Callers depend on this fallback; do not tighten it.
    pub fn get_object<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, GatewayError> {
        let value = match self.single(name, Accessor::GetObject) {
            Ok(parameter) => match &parameter.value {
                Some(value) => value.clone(),
                None => return Ok(None),
            },
            Err(_) => return Ok(None),
        };
        serde_json::from_str(&value)
            .map(Some)
            .map_err(|_| GatewayError::Protocol {
                accessor: Accessor::GetObject,
                parameter: name.to_string(),
                failure: ParseFailure::InvalidJson,
            })
    }
}

/// Decodes a DebtorInfo response into a [`Debtor`].
pub fn decode_debtor(response: &GatewayResponse) -> Result<Debtor, GatewayError> {
    let parameters = ParameterSet::from_response(response)?;

    Ok(Debtor {
        id: parameters.get_guid(Field::Code.name())?,
        first_name: parameters.get_string(Field::FirstName.name())?,
        last_name: parameters.get_string(Field::LastName.name())?,
        email_address: parameters.get_string(Field::Email.name())?,
        phone_number: parameters.get_string(Field::Mobile.name())?,
        address: crate::models::Address {
            street: parameters.get_string(Field::Street.name())?,
            house_number: parameters.get_int(Field::HouseNumber.name())?,
            house_number_suffix: parameters.get_string(Field::HouseNumberSuffix.name())?,
            postal_code: parameters.get_string(Field::ZipCode.name())?,
            city: parameters.get_string(Field::City.name())?,
        },
        subscription_ids: Some(parameters.get_string_collection(Field::SubscriptionIds.name())?),
        invoice_ids: Some(parameters.get_string_collection(Field::InvoiceIds.name())?),
    })
}
