use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

/// Couples a procedure name with its request and response types.
///
/// These definitions are optional: the channel itself only moves JSON
/// values. Sharing one definition between both sides keeps the name and the
/// (de)serialization in a single place.
///
/// ```rust
/// use cepc::procedure::CepcProcedure;
///
/// pub struct Ping;
///
/// impl CepcProcedure for Ping {
///     const NAME: &'static str = "ping";
///     type Request = String;
///     type Response = String;
/// }
/// ```
pub trait CepcProcedure {
    /// The name the procedure is registered and called under.
    const NAME: &'static str;

    type Request: Serialize + DeserializeOwned + Send + 'static;

    type Response: Serialize + DeserializeOwned + Send + 'static;

    fn encode_request(request: &Self::Request) -> Result<Value, serde_json::Error> {
        serde_json::to_value(request)
    }

    fn decode_request(request_data: Value) -> Result<Self::Request, serde_json::Error> {
        serde_json::from_value(request_data)
    }

    fn encode_response(response: &Self::Response) -> Result<Value, serde_json::Error> {
        serde_json::to_value(response)
    }

    fn decode_response(response_data: Value) -> Result<Self::Response, serde_json::Error> {
        serde_json::from_value(response_data)
    }
}
