//! Failure classification for the create request
//!
//! Turns a [`CreateFailure`] into the error map the form displays. The
//! response case wins over the no-response case, which wins over request
//! setup; the variants are exclusive so precedence is fixed by the transport.

use std::fmt;

use crate::api::{CreateFailure, ResponseBody};
use crate::types::ErrorMap;

pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your internet connection.";
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// Error taxonomy recovered at the form boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Draft failed the local gate, nothing was sent
    LocalValidation,
    /// Server returned field-keyed errors
    ServerField,
    /// Server returned a status without a structured body
    ServerGeneric,
    /// Request sent, no response received
    Network,
    /// Request never sent
    RequestSetup,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::LocalValidation => "local_validation",
            Self::ServerField => "server_field",
            Self::ServerGeneric => "server_generic",
            Self::Network => "network",
            Self::RequestSetup => "request_setup",
        };
        f.write_str(s)
    }
}

/// Classified failure: what kind, and what to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub kind: FailureKind,
    pub errors: ErrorMap,
}

impl Rejection {
    pub fn local(errors: ErrorMap) -> Self {
        Self {
            kind: FailureKind::LocalValidation,
            errors,
        }
    }
}

pub fn classify(failure: CreateFailure) -> Rejection {
    match failure {
        CreateFailure::Response {
            body: ResponseBody::Structured(errors),
            ..
        } => Rejection {
            kind: FailureKind::ServerField,
            errors,
        },
        CreateFailure::Response {
            body: ResponseBody::Text(text),
            ..
        } => Rejection {
            kind: FailureKind::ServerGeneric,
            errors: ErrorMap::non_field(text),
        },
        CreateFailure::Response {
            status,
            body: ResponseBody::Empty,
        } => Rejection {
            kind: FailureKind::ServerGeneric,
            errors: ErrorMap::non_field(format!("Server responded with status {}.", status)),
        },
        CreateFailure::NoResponse(_) => Rejection {
            kind: FailureKind::Network,
            errors: ErrorMap::non_field(NETWORK_ERROR_MESSAGE),
        },
        CreateFailure::RequestSetup(_) => Rejection {
            kind: FailureKind::RequestSetup,
            errors: ErrorMap::non_field(UNEXPECTED_ERROR_MESSAGE),
        },
    }
}
