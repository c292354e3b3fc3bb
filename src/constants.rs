// Wire protocol constants

/// Protocol tag carried in every packet's `p` field.
pub const CEPC_PROTOCOL_TAG: &str = "cepc";

/// Protocol version carried in every packet's `v` field.
///
/// Packets with any other version are rejected as malformed.
pub const CEPC_PROTOCOL_VERSION: u32 = 0;

/// Literal marker every encoded payload starts with.
///
/// Decoding checks this before touching the JSON body so that foreign
/// traffic on a shared channel is rejected without parsing.
pub const CEPC_PACKET_PREFIX: &str = "cepc::";

/// Prefix used in diagnostic log lines.
pub const CEPC_LOG_NAME: &str = "CEPC";

// Error codes

/// The transport (target object, host bridge) is not ready.
pub const CEPC_ERROR_CODE_UNINITIALIZED: &str = "CEPC_UNINITIALIZED";

/// No response arrived within the configured window.
pub const CEPC_ERROR_CODE_TIMEOUT: &str = "CEPC_TIMEOUT";

/// The target procedure is not registered on the receiving side.
pub const CEPC_ERROR_CODE_UNDEFINED: &str = "CEPC_UNDEFINED";

/// Default code for any failure that lacks an explicit one.
pub const CEPC_ERROR_CODE_INTERNAL: &str = "CEPC_INTERNAL";

/// The outbound send function failed. Never transmitted over the wire.
pub const CEPC_ERROR_CODE_SEND_FAILURE: &str = "CEPC_SEND_FAILURE";
