use super::{Packet, PacketBody, PacketDecodeError, PacketEncodeError, PacketKind};
use crate::constants::{CEPC_PACKET_PREFIX, CEPC_PROTOCOL_TAG, CEPC_PROTOCOL_VERSION};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field layout of the JSON body, used for encoding.
///
/// Field order is fixed by declaration order, which keeps encoding
/// deterministic.
#[derive(Serialize)]
struct WirePacketRef<'a> {
    p: &'a str,
    v: u32,
    t: PacketKind,
    name: &'a str,
    key: &'a str,
    index: u64,
    timestamp: i64,
    #[serde(rename = "requestData", skip_serializing_if = "Option::is_none")]
    request_data: Option<&'a Value>,
    #[serde(rename = "responseData", skip_serializing_if = "Option::is_none")]
    response_data: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
}

/// Field layout of the JSON body, used for decoding.
///
/// A JSON `null` and an absent `requestData`/`responseData` both decode to
/// `Value::Null`.
#[derive(Deserialize)]
struct WirePacket {
    p: String,
    v: u32,
    t: PacketKind,
    name: String,
    key: String,
    index: u64,
    timestamp: i64,
    #[serde(rename = "requestData", default)]
    request_data: Option<Value>,
    #[serde(rename = "responseData", default)]
    response_data: Option<Value>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Stateless encoder/decoder for the `cepc::{json}` text framing.
pub struct PacketCodec;

impl PacketCodec {
    /// Encodes a packet into its framed text form.
    pub fn encode(packet: &Packet) -> Result<String, PacketEncodeError> {
        let mut wire = WirePacketRef {
            p: CEPC_PROTOCOL_TAG,
            v: CEPC_PROTOCOL_VERSION,
            t: packet.kind(),
            name: &packet.name,
            key: &packet.key,
            index: packet.index,
            timestamp: packet.timestamp,
            request_data: None,
            response_data: None,
            code: None,
            message: None,
        };

        match &packet.body {
            PacketBody::Call { request_data } => wire.request_data = Some(request_data),
            PacketBody::Result { response_data } => wire.response_data = Some(response_data),
            PacketBody::Error { code, message } => {
                wire.code = Some(code.as_str());
                wire.message = message.as_deref();
            }
        }

        let json = serde_json::to_string(&wire)?;

        let mut text = String::with_capacity(CEPC_PACKET_PREFIX.len() + json.len());
        text.push_str(CEPC_PACKET_PREFIX);
        text.push_str(&json);
        Ok(text)
    }

    /// Decodes framed text into a packet.
    ///
    /// Text without the protocol marker yields [`PacketDecodeError::Foreign`]
    /// without any parsing. Everything else that cannot be used yields
    /// [`PacketDecodeError::Malformed`].
    pub fn decode(text: &str) -> Result<Packet, PacketDecodeError> {
        let json = text
            .strip_prefix(CEPC_PACKET_PREFIX)
            .ok_or(PacketDecodeError::Foreign)?;

        let wire: WirePacket = serde_json::from_str(json)
            .map_err(|err| PacketDecodeError::Malformed(err.to_string()))?;

        if wire.p != CEPC_PROTOCOL_TAG {
            return Err(PacketDecodeError::Malformed(format!(
                "unexpected protocol tag `{}`",
                wire.p
            )));
        }

        if wire.v != CEPC_PROTOCOL_VERSION {
            return Err(PacketDecodeError::Malformed(format!(
                "unsupported protocol version {}",
                wire.v
            )));
        }

        let body = match wire.t {
            PacketKind::Call => PacketBody::Call {
                request_data: wire.request_data.unwrap_or(Value::Null),
            },
            PacketKind::Result => PacketBody::Result {
                response_data: wire.response_data.unwrap_or(Value::Null),
            },
            PacketKind::Error => PacketBody::Error {
                code: wire.code.ok_or_else(|| {
                    PacketDecodeError::Malformed("error packet without `code`".to_string())
                })?,
                message: wire.message,
            },
        };

        Ok(Packet {
            name: wire.name,
            key: wire.key,
            index: wire.index,
            timestamp: wire.timestamp,
            body,
        })
    }
}
