use super::PacketKind;
use serde_json::Value;

/// One message exchanged on the wire.
///
/// The protocol tag and version are implied: they are written by
/// [`PacketCodec::encode`](super::PacketCodec::encode) and verified by
/// [`PacketCodec::decode`](super::PacketCodec::decode).
#[derive(Debug, Clone, PartialEq)]
pub struct Packet {
    /// Procedure identifier.
    pub name: String,

    /// Caller-generated correlation key. Together with `name` it identifies
    /// one in-flight call.
    pub key: String,

    /// Caller-assigned sequence number; only used for diagnostics.
    pub index: u64,

    /// Call creation time in milliseconds since the UNIX epoch.
    pub timestamp: i64,

    pub body: PacketBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PacketBody {
    Call { request_data: Value },
    Result { response_data: Value },
    Error { code: String, message: Option<String> },
}

impl Packet {
    pub fn kind(&self) -> PacketKind {
        match self.body {
            PacketBody::Call { .. } => PacketKind::Call,
            PacketBody::Result { .. } => PacketKind::Result,
            PacketBody::Error { .. } => PacketKind::Error,
        }
    }

    /// Builds the result packet answering this call.
    ///
    /// Correlation fields (`name`, `key`, `index`, `timestamp`) are echoed
    /// back unchanged.
    pub fn to_result(&self, response_data: Value) -> Packet {
        Packet {
            name: self.name.clone(),
            key: self.key.clone(),
            index: self.index,
            timestamp: self.timestamp,
            body: PacketBody::Result { response_data },
        }
    }

    /// Builds the error packet answering this call.
    pub fn to_error(&self, code: String, message: Option<String>) -> Packet {
        Packet {
            name: self.name.clone(),
            key: self.key.clone(),
            index: self.index,
            timestamp: self.timestamp,
            body: PacketBody::Error { code, message },
        }
    }
}
