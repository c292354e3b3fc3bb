mod packet_codec;
mod packet_error;
mod packet_kind;
mod packet_struct;

pub use packet_codec::PacketCodec;
pub use packet_error::{PacketDecodeError, PacketEncodeError};
pub use packet_kind::PacketKind;
pub use packet_struct::{Packet, PacketBody};
