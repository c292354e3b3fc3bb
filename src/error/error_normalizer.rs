use super::{CepcError, ProcedureFailure};
use crate::constants::{CEPC_ERROR_CODE_INTERNAL, CEPC_LOG_NAME};

/// Wire-safe form of a failure: the `code`/`message` pair of an error packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireError {
    pub code: String,
    pub message: Option<String>,
}

/// Converts a handler failure of `procedure` into its wire form.
///
/// Only a typed failure with an explicit code is visible to the caller; its
/// code and message are passed through verbatim. Anything else is reduced to
/// the internal code with no message, and the original detail is logged here
/// so it is not lost.
pub fn to_wire_error(procedure: &str, failure: ProcedureFailure) -> WireError {
    match failure {
        ProcedureFailure::Typed(err) if err.has_code() => {
            tracing::debug!(
                procedure,
                code = %err.code,
                "[{CEPC_LOG_NAME}] procedure `{procedure}` failed with a visible error: {err}"
            );
            WireError {
                code: err.code,
                message: Some(err.message),
            }
        }
        ProcedureFailure::Typed(err) => {
            tracing::error!(
                procedure,
                "[{CEPC_LOG_NAME}] procedure `{procedure}` failed with an error without a code: {:?}",
                err.message
            );
            scrubbed()
        }
        ProcedureFailure::Opaque { detail } => {
            tracing::error!(
                procedure,
                "[{CEPC_LOG_NAME}] procedure `{procedure}` failed with an internal error: {detail}"
            );
            scrubbed()
        }
    }
}

/// Rebuilds the typed failure a caller receives from an error packet.
pub fn from_wire_error(wire: WireError) -> CepcError {
    CepcError {
        code: wire.code,
        message: wire.message.unwrap_or_default(),
    }
}

fn scrubbed() -> WireError {
    WireError {
        code: CEPC_ERROR_CODE_INTERNAL.to_string(),
        message: None,
    }
}
