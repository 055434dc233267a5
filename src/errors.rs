use std::fmt;

/// Which typed accessor was reading the parameter when decoding failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessor {
    GetString,
    GetBoolean,
    GetGuid,
    GetEnum,
    GetInt,
    GetDecimal,
    GetStringCollection,
    GetObject,
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Accessor::GetString => "GetStringByName",
            Accessor::GetBoolean => "GetBooleanByName",
            Accessor::GetGuid => "GetGuidByName",
            Accessor::GetEnum => "GetEnumByName",
            Accessor::GetInt => "GetIntByName",
            Accessor::GetDecimal => "GetDecimalByName",
            Accessor::GetStringCollection => "GetStringCollectionByName",
            Accessor::GetObject => "GetObjectByName",
        };
        write!(f, "{}", name)
    }
}

/// How a wire parameter failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFailure {
    /// No parameter in the list carries the requested name.
    Missing,
    /// More than one parameter carries the requested name.
    NotSingle,
    /// The value does not parse as the requested type.
    InvalidFormat,
    /// The value parses but does not fit the target type's range.
    Overflow,
    /// The value is not well-formed JSON.
    InvalidJson,
}

/// Gateway-specific error types.
#[derive(Debug, Clone)]
pub enum GatewayError {
    /// Required credential or URL missing/invalid at startup.
    Configuration(String),
    /// Non-2xx HTTP status, connection failure, or undeserializable response body.
    Transport(String),
    /// A wire parameter was missing, duplicated, or malformed.
    Protocol {
        /// The accessor that was decoding the parameter.
        accessor: Accessor,
        /// The wire name of the offending parameter.
        parameter: String,
        /// What went wrong.
        failure: ParseFailure,
    },
    /// The provider reported a failing status for a mutating operation.
    ///
    /// The message is the provider's status description, verbatim.
    Business(String),
    /// Error with context chain for better debugging.
    WithContext {
        /// The underlying source of the error.
        source: Box<GatewayError>,
        /// Additional context message.
        context: String,
    },
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            GatewayError::Transport(msg) => write!(f, "Transport error: {}", msg),
            GatewayError::Protocol {
                accessor,
                parameter,
                failure,
            } => match failure {
                ParseFailure::Missing | ParseFailure::NotSingle => write!(
                    f,
                    "{}: failed to locate the single item for {}",
                    accessor, parameter
                ),
                ParseFailure::InvalidFormat => {
                    write!(f, "{}: failed to parse {}", accessor, parameter)
                }
                ParseFailure::Overflow => write!(
                    f,
                    "{}: {} is bigger/smaller than the target type allows",
                    accessor, parameter
                ),
                ParseFailure::InvalidJson => write!(
                    f,
                    "{}: failed to deserialize {} because of invalid Json",
                    accessor, parameter
                ),
            },
            // Verbatim provider description; callers match on it.
            GatewayError::Business(msg) => write!(f, "{}", msg),
            GatewayError::WithContext { source, context } => {
                write!(f, "{}: {}", context, source)
            }
        }
    }
}

impl std::error::Error for GatewayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GatewayError::WithContext { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    /// Converts a `reqwest::Error` into a `GatewayError`.
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Transport(err.to_string())
    }
}

/// Extension trait for adding context to errors.
/// Similar to `anyhow::Context` but for our `GatewayError` type.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T, GatewayError>;

    /// Add context lazily (only evaluated on error).
    fn with_context<F>(self, f: F) -> Result<T, GatewayError>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T, GatewayError> {
    fn context(self, context: impl Into<String>) -> Result<T, GatewayError> {
        self.map_err(|e| GatewayError::WithContext {
            source: Box::new(e),
            context: context.into(),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T, GatewayError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| GatewayError::WithContext {
            source: Box::new(e),
            context: f(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_error_displays_provider_description_verbatim() {
        let err = GatewayError::Business("Failed".to_string());
        assert_eq!(err.to_string(), "Failed");
    }

    #[test]
    fn protocol_error_names_parameter_and_accessor() {
        let err = GatewayError::Protocol {
            accessor: Accessor::GetDecimal,
            parameter: "PricePerUnit".to_string(),
            failure: ParseFailure::InvalidFormat,
        };
        let msg = err.to_string();
        assert!(msg.contains("GetDecimalByName"));
        assert!(msg.contains("PricePerUnit"));
    }

    #[test]
    fn context_wraps_and_displays_chain() {
        let base: Result<(), GatewayError> =
            Err(GatewayError::Transport("connection refused".to_string()));
        let err = base.context("posting DebtorInfo").unwrap_err();
        assert_eq!(
            err.to_string(),
            "posting DebtorInfo: Transport error: connection refused"
        );
    }
}
