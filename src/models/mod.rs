pub mod afi;
pub mod peer;
pub mod prefix;
pub mod record;

pub use afi::Afi;
pub use peer::{PeerDirectory, PeerEntry};
pub use prefix::PrefixCodec;
pub use record::{BgpType, MrtRecord, Origin};
