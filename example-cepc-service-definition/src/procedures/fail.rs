use cepc::CepcProcedure;
use serde::{Deserialize, Serialize};

/// What the `Fail` handler should fail with. An empty `code` asks for a
/// failure that is not meant to be visible to the caller.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct FailRequest {
    pub code: String,
    pub message: String,
}

/// Always fails; used to show how failures cross the channel.
pub struct Fail;

impl CepcProcedure for Fail {
    const NAME: &'static str = "debug.fail";

    type Request = FailRequest;
    type Response = ();
}
