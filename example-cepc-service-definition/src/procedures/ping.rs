use cepc::CepcProcedure;

/// Answers `"ping"` with `"pong"`.
pub struct Ping;

impl CepcProcedure for Ping {
    const NAME: &'static str = "ping";

    type Request = String;
    type Response = String;
}
