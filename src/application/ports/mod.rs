//! Ports to the external systems of record.
//!
//! Every adapter normalizes its provider's way of signalling failure (HTTP
//! status codes, GraphQL error lists, named SDK exceptions, XML result codes)
//! into [`UpstreamError`] before the use cases ever see it.

pub mod core_graph;
pub mod identity_provider;
pub mod mailing_list;
pub mod payment_processor;

use thiserror::Error;

/// Normalized failure of a call to an external system.
///
/// Display is the raw upstream text, since that is what ends up in the
/// `message` shown to staff.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    /// The entity does not exist upstream. `code` carries a numeric status
    /// when the upstream reported one (e.g. 404).
    #[error("{message}")]
    NotFound { message: String, code: Option<u16> },

    /// The request never produced a usable response (network failure,
    /// non-success HTTP status).
    #[error("{0}")]
    Transport(String),

    /// The upstream answered and refused the request.
    #[error("{0}")]
    Rejected(String),
}

impl UpstreamError {
    pub fn not_found(message: impl Into<String>) -> Self {
        UpstreamError::NotFound {
            message: message.into(),
            code: None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, UpstreamError::NotFound { .. })
    }
}

pub type UpstreamResult<T> = Result<T, UpstreamError>;

pub use core_graph::CoreGraphPort;
pub use identity_provider::IdentityProviderPort;
pub use mailing_list::MailingListPort;
pub use payment_processor::PaymentProcessorPort;
