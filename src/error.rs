mod cepc_error;
mod error_normalizer;
mod procedure_failure;

pub use cepc_error::{CepcError, CepcErrorKind};
pub use error_normalizer::{WireError, from_wire_error, to_wire_error};
pub use procedure_failure::ProcedureFailure;
