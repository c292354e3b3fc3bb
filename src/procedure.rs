mod cepc_procedure;
mod procedure_handler;
mod procedure_registry;

pub use cepc_procedure::CepcProcedure;
pub use procedure_handler::{ProcedureFuture, ProcedureHandler, ProcedureResult};
pub use procedure_registry::{ProcedureRegistry, ProcedureRegistryError};
