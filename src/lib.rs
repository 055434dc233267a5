//! Buckaroo PSP Gateway Client
//!
//! This library implements a signed gateway client for the Buckaroo payment
//! and subscription provider: per-request HMAC authentication, the provider's
//! flattened parameter wire protocol, and typed domain entities decoupled from
//! the wire format.
//!
//! # Modules
//!
//! - `config`: Configuration loading and validation.
//! - `errors`: Error taxonomy and context helpers.
//! - `models`: Domain entities and gateway request types.
//! - `fields`: The provider's protocol vocabulary (names, group types, group ids).
//! - `wire`: Request and response envelope types.
//! - `codec`: Flattened-parameter encoding and typed decoding accessors.
//! - `signature`: Per-request HMAC request signing.
//! - `psp_client`: Signed HTTP transport.
//! - `gateway`: Business operations and status classification.

pub mod codec;
pub mod config;
pub mod errors;
pub mod fields;
pub mod gateway;
pub mod models;
pub mod psp_client;
pub mod signature;
pub mod wire;

pub use config::BuckarooConfig;
pub use errors::GatewayError;
pub use gateway::BuckarooGateway;
pub use models::{Address, Charge, Debtor, Subscription};
pub use psp_client::PspClient;
