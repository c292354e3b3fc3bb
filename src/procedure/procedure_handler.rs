use crate::error::ProcedureFailure;
use serde_json::Value;
use std::{future::Future, pin::Pin, sync::Arc};

pub type ProcedureResult = Result<Value, ProcedureFailure>;

pub type ProcedureFuture = Pin<Box<dyn Future<Output = ProcedureResult> + Send>>;

/// A registered procedure: decoded request data in, response data out.
pub type ProcedureHandler = Arc<dyn Fn(Value) -> ProcedureFuture + Send + Sync>;
