use serde::{Deserialize, Serialize};

/// Discriminates the three packet variants on the wire (`t` field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PacketKind {
    #[serde(rename = "req")]
    Call,
    #[serde(rename = "res")]
    Result,
    #[serde(rename = "err")]
    Error,
}
