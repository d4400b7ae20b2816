/*!
Local compressed-or-plain byte source opening, detected by file extension.

Grounded on the teacher's `src/io.rs` (`get_reader`), trimmed to the local
file case: the remote-fetch (`http`/`reqwest`) path isn't part of this
crate's external-interface contract, so only the extension-switched
`flate2`/`bzip2` decoder selection is carried over.
*/
use crate::error::ParserError;
use bzip2::read::BzDecoder;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Open `path` for reading, transparently decompressing `.gz` / `.bz2`
/// extensions and falling back to a plain file for anything else.
pub fn open_reader(path: impl AsRef<Path>) -> Result<Box<dyn Read>, ParserError> {
    let path = path.as_ref();
    let raw_reader: Box<dyn Read> = Box::new(File::open(path)?);

    let file_type = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
    match file_type {
        "gz" => Ok(Box::new(BufReader::new(GzDecoder::new(raw_reader)))),
        "bz2" => Ok(Box::new(BufReader::new(BzDecoder::new(raw_reader)))),
        _ => {
            log::info!("unknown file type for {}; reading as uncompressed", path.display());
            Ok(Box::new(BufReader::new(raw_reader)))
        }
    }
}
