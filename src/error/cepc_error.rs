use crate::constants::{
    CEPC_ERROR_CODE_INTERNAL, CEPC_ERROR_CODE_SEND_FAILURE, CEPC_ERROR_CODE_TIMEOUT,
    CEPC_ERROR_CODE_UNDEFINED, CEPC_ERROR_CODE_UNINITIALIZED,
};
use thiserror::Error;

/// A typed failure that can cross the wire as `(code, message)`.
///
/// Handlers raise it (through [`ProcedureFailure::Typed`]) to surface a
/// failure to the caller on purpose; callers receive it for every failed
/// call and branch on [`CepcError::kind`] or [`CepcError::code`].
///
/// [`ProcedureFailure::Typed`]: crate::error::ProcedureFailure::Typed
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("[{code}] {message}")]
pub struct CepcError {
    pub code: String,
    pub message: String,
}

/// Classification of the well-known error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CepcErrorKind {
    Uninitialized,
    Timeout,
    Undefined,
    Internal,
    SendFailure,
    /// A caller-defined code, passed through unchanged.
    Custom,
}

impl CepcError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// An error with a code and an empty message.
    pub fn with_code(code: impl Into<String>) -> Self {
        Self::new(code, String::new())
    }

    pub fn uninitialized() -> Self {
        Self::with_code(CEPC_ERROR_CODE_UNINITIALIZED)
    }

    pub fn timeout() -> Self {
        Self::with_code(CEPC_ERROR_CODE_TIMEOUT)
    }

    pub fn undefined() -> Self {
        Self::with_code(CEPC_ERROR_CODE_UNDEFINED)
    }

    pub fn internal() -> Self {
        Self::with_code(CEPC_ERROR_CODE_INTERNAL)
    }

    pub fn send_failure(message: impl Into<String>) -> Self {
        Self::new(CEPC_ERROR_CODE_SEND_FAILURE, message)
    }

    pub fn kind(&self) -> CepcErrorKind {
        match self.code.as_str() {
            CEPC_ERROR_CODE_UNINITIALIZED => CepcErrorKind::Uninitialized,
            CEPC_ERROR_CODE_TIMEOUT => CepcErrorKind::Timeout,
            CEPC_ERROR_CODE_UNDEFINED => CepcErrorKind::Undefined,
            CEPC_ERROR_CODE_INTERNAL => CepcErrorKind::Internal,
            CEPC_ERROR_CODE_SEND_FAILURE => CepcErrorKind::SendFailure,
            _ => CepcErrorKind::Custom,
        }
    }

    /// Whether the code was explicitly assigned.
    pub fn has_code(&self) -> bool {
        !self.code.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_classifies_known_codes() {
        assert_eq!(CepcError::timeout().kind(), CepcErrorKind::Timeout);
        assert_eq!(CepcError::undefined().kind(), CepcErrorKind::Undefined);
        assert_eq!(CepcError::uninitialized().kind(), CepcErrorKind::Uninitialized);
        assert_eq!(CepcError::internal().kind(), CepcErrorKind::Internal);
        assert_eq!(CepcError::send_failure("x").kind(), CepcErrorKind::SendFailure);
        assert_eq!(CepcError::new("1234", "m").kind(), CepcErrorKind::Custom);
    }

    #[test]
    fn display_contains_code_and_message() {
        let err = CepcError::new("1234", "Visible Message");
        assert_eq!(err.to_string(), "[1234] Visible Message");
    }
}
