/*!
bgpgill is a streaming parser for MRT archive files carrying BGP routing
information (RouteViews/RIPE RIS style dumps): BGP4MP / BGP4MP_ET update
streams and TABLE_DUMP_V2 RIB snapshots.

The core surface is [`stream::RecordStream`], a pull iterator over
[`models::MrtRecord`] values built from a `std::io::Read` byte source.
The `cli` feature adds the `bgpgill` binary, which renders records as
pipe-separated lines via [`formats::psv::PsvFormatter`].
*/
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod cursor;
pub mod error;
pub mod formats;
#[cfg(feature = "io")]
pub mod io;
pub mod models;
pub mod parser;
pub mod stream;

pub use error::ParserError;
pub use models::MrtRecord;
pub use stream::RecordStream;
