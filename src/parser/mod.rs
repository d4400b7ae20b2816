pub mod attributes;
pub mod framer;
pub mod header;
pub mod message;
pub mod rib;
pub mod wire;

pub use attributes::AttributeDecoder;
pub use framer::MrtFramer;
pub use header::MrtHeader;
pub use message::MessageDecoder;
pub use rib::RibDecoder;
