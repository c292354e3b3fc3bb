use super::CepcError;
use std::fmt;

/// Everything a procedure handler can fail with.
///
/// `Typed` failures are surfaced to the caller as they are (provided they
/// carry a code). `Opaque` failures never leave the process: the caller only
/// learns that an internal error happened, while `detail` is logged locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcedureFailure {
    Typed(CepcError),
    Opaque { detail: String },
}

impl ProcedureFailure {
    /// Wraps any displayable failure as opaque.
    pub fn opaque(detail: impl fmt::Display) -> Self {
        ProcedureFailure::Opaque {
            detail: detail.to_string(),
        }
    }
}

impl fmt::Display for ProcedureFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcedureFailure::Typed(err) => write!(f, "{err}"),
            ProcedureFailure::Opaque { detail } => write!(f, "{detail}"),
        }
    }
}

impl std::error::Error for ProcedureFailure {}

impl From<CepcError> for ProcedureFailure {
    fn from(err: CepcError) -> Self {
        ProcedureFailure::Typed(err)
    }
}

impl From<serde_json::Error> for ProcedureFailure {
    fn from(err: serde_json::Error) -> Self {
        ProcedureFailure::opaque(err)
    }
}

impl From<std::io::Error> for ProcedureFailure {
    fn from(err: std::io::Error) -> Self {
        ProcedureFailure::opaque(err)
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for ProcedureFailure {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        ProcedureFailure::opaque(err)
    }
}

impl From<String> for ProcedureFailure {
    fn from(detail: String) -> Self {
        ProcedureFailure::Opaque { detail }
    }
}

impl From<&str> for ProcedureFailure {
    fn from(detail: &str) -> Self {
        ProcedureFailure::opaque(detail)
    }
}
