use cepc::CepcProcedure;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize, Deserialize, PartialEq, Debug)]
struct AddRequestParams {
    pub numbers: Vec<f64>,
}

#[derive(Serialize, Deserialize, PartialEq, Debug)]
struct AddResponseParams {
    pub result: f64,
}

/// Sums a list of numbers.
///
/// On the wire the request is `{"numbers": [..]}` and the response is
/// `{"result": ..}`.
pub struct Add;

impl CepcProcedure for Add {
    const NAME: &'static str = "math.add";

    type Request = Vec<f64>;
    type Response = f64;

    fn encode_request(numbers: &Self::Request) -> Result<Value, serde_json::Error> {
        serde_json::to_value(AddRequestParams {
            numbers: numbers.clone(),
        })
    }

    fn decode_request(request_data: Value) -> Result<Self::Request, serde_json::Error> {
        let raw: AddRequestParams = serde_json::from_value(request_data)?;
        Ok(raw.numbers)
    }

    fn encode_response(result: &Self::Response) -> Result<Value, serde_json::Error> {
        serde_json::to_value(AddResponseParams { result: *result })
    }

    fn decode_response(response_data: Value) -> Result<Self::Response, serde_json::Error> {
        let raw: AddResponseParams = serde_json::from_value(response_data)?;
        Ok(raw.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_is_wrapped() {
        let value = Add::encode_request(&vec![1.0, 2.5]).unwrap();
        assert_eq!(value, json!({ "numbers": [1.0, 2.5] }));
        assert_eq!(Add::decode_request(value).unwrap(), vec![1.0, 2.5]);
    }

    #[test]
    fn bare_array_is_rejected() {
        assert!(Add::decode_request(json!([1.0, 2.0])).is_err());
    }
}
