/*!
Reads one MRT header + body off a byte stream and dispatches to
[`MessageDecoder`] or [`RibDecoder`]. Owns the per-file [`PeerDirectory`]
and the parsed/parsed_ok counters.

Grounded on `Read_next_mrt_entry()` in the C reference implementation:
same parsed/parsed_ok counting, same "any decode failure sets EOF"
propagation policy.
*/
use crate::error::ParserError;
use crate::models::{Afi, MrtRecord, PeerDirectory};
use crate::parser::header::MrtHeader;
use crate::parser::message::MessageDecoder;
use crate::parser::rib::RibDecoder;
use crate::parser::wire::{EntryType, TableDumpV2Subtype};
use bytes::Bytes;
use std::io::Read;

pub struct MrtFramer<R> {
    reader: R,
    directory: PeerDirectory,
    eof: bool,
    parsed: u64,
    parsed_ok: u64,
}

impl<R: Read> MrtFramer<R> {
    pub fn new(reader: R) -> Self {
        MrtFramer {
            reader,
            directory: PeerDirectory::new(),
            eof: false,
            parsed: 0,
            parsed_ok: 0,
        }
    }

    pub fn parsed(&self) -> u64 {
        self.parsed
    }

    pub fn parsed_ok(&self) -> u64 {
        self.parsed_ok
    }

    pub fn is_eof(&self) -> bool {
        self.eof
    }

    /// Read and decode the next MRT record. Returns `Ok(None)` at clean
    /// end-of-stream; records that decode cleanly but produce no output
    /// (a PEER_INDEX_TABLE, or a skipped unsupported type/subtype) are
    /// consumed internally and do not end the loop.
    pub fn next_record(&mut self) -> Result<Option<MrtRecord>, ParserError> {
        loop {
            if self.eof {
                return Ok(None);
            }

            let mut head = [0u8; 12];
            let n = Self::fill(&mut self.reader, &mut head)?;
            if n == 0 {
                self.close_eof();
                return Ok(None);
            }
            if n < 12 {
                log::warn!("incomplete MRT header at end of stream ({n} of 12 bytes)");
                self.close_eof();
                return Ok(None);
            }

            let entry_type_peek = MrtHeader::peek_entry_type(&head[0..6].try_into().unwrap());
            let header = if entry_type_peek == EntryType::Bgp4MpEt as u16 {
                let mut extended = [0u8; 16];
                extended[..12].copy_from_slice(&head);
                let extra_n = Self::fill(&mut self.reader, &mut extended[12..])?;
                if extra_n < 4 {
                    log::warn!("truncated BGP4MP_ET timestamp field at end of stream");
                    self.close_eof();
                    return Ok(None);
                }
                MrtHeader::parse(&extended)?.0
            } else {
                MrtHeader::parse(&head)?.0
            };

            self.parsed += 1;

            let mut body = vec![0u8; header.body_len as usize];
            let body_n = Self::fill(&mut self.reader, &mut body)?;
            if body_n < body.len() {
                log::warn!(
                    "truncated MRT record body ({body_n} of {} declared bytes)",
                    body.len()
                );
                self.close_eof();
                return Ok(None);
            }
            let body = Bytes::from(body);

            match self.decode_body(&header, &body) {
                Ok(Some(record)) => {
                    self.parsed_ok += 1;
                    return Ok(Some(record));
                }
                Ok(None) => {
                    self.parsed_ok += 1;
                    continue;
                }
                Err(e) => {
                    log::warn!("dropping MRT record: {e}");
                    self.close_eof();
                    return Err(e);
                }
            }
        }
    }

    /// Mark the stream as ended and emit the per-file parsed/parsed_ok
    /// summary once, at the point of transition.
    fn close_eof(&mut self) {
        self.eof = true;
        log::debug!("stream closed: parsed={}, parsed_ok={}", self.parsed, self.parsed_ok);
    }

    fn decode_body(&mut self, header: &MrtHeader, body: &Bytes) -> Result<Option<MrtRecord>, ParserError> {
        let decoded = match EntryType::try_from(header.entry_type) {
            Ok(EntryType::Bgp4Mp) | Ok(EntryType::Bgp4MpEt) => {
                Some(MessageDecoder::decode(body, header.entry_subtype, header.timestamp)?)
            }
            Ok(EntryType::TableDumpV2) => match TableDumpV2Subtype::try_from(header.entry_subtype) {
                Ok(TableDumpV2Subtype::PeerIndexTable) => {
                    RibDecoder::decode_peer_index_table(body, &mut self.directory)?;
                    None
                }
                Ok(TableDumpV2Subtype::RibIpv4Unicast) => {
                    Some(RibDecoder::decode_rib(body, Afi::Ipv4, header.timestamp, &self.directory)?)
                }
                Ok(TableDumpV2Subtype::RibIpv6Unicast) => {
                    Some(RibDecoder::decode_rib(body, Afi::Ipv6, header.timestamp, &self.directory)?)
                }
                Err(_) => {
                    log::warn!("skipping unsupported TABLE_DUMP_V2 subtype {}", header.entry_subtype);
                    None
                }
            },
            Err(_) => {
                log::warn!("skipping unsupported MRT type {}", header.entry_type);
                None
            }
        };

        Ok(decoded.map(|mut record| {
            Self::stamp_header_meta(&mut record, header);
            record
        }))
    }

    /// Stamp the raw header fields onto `record` and, recursively, every
    /// sibling in its RIB fan-out chain.
    fn stamp_header_meta(record: &mut MrtRecord, header: &MrtHeader) {
        record.entry_type = header.entry_type;
        record.entry_sub_type = header.entry_subtype;
        record.timestamp_us = header.microseconds;
        for sibling in &mut record.siblings {
            Self::stamp_header_meta(sibling, header);
        }
    }

    fn fill(reader: &mut R, buf: &mut [u8]) -> Result<usize, ParserError> {
        let mut total = 0;
        while total < buf.len() {
            match reader.read(&mut buf[total..])? {
                0 => break,
                n => total += n,
            }
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keepalive_entry() -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(&65001u32.to_be_bytes());
        body.extend_from_slice(&65002u32.to_be_bytes());
        body.extend_from_slice(&0u16.to_be_bytes());
        body.extend_from_slice(&1u16.to_be_bytes());
        body.extend_from_slice(&[192, 0, 2, 1]);
        body.extend_from_slice(&[192, 0, 2, 2]);
        body.extend_from_slice(&[0xFF; 16]);
        body.extend_from_slice(&19u16.to_be_bytes());
        body.push(4);

        let mut entry = Vec::new();
        entry.extend_from_slice(&1_700_000_000u32.to_be_bytes());
        entry.extend_from_slice(&16u16.to_be_bytes()); // BGP4MP
        entry.extend_from_slice(&4u16.to_be_bytes()); // MESSAGE_AS4
        entry.extend_from_slice(&(body.len() as u32).to_be_bytes());
        entry.extend_from_slice(&body);
        entry
    }

    #[test]
    fn test_framer_reads_single_record() {
        let data = keepalive_entry();
        let mut framer = MrtFramer::new(std::io::Cursor::new(data));
        let record = framer.next_record().unwrap().unwrap();
        assert_eq!(record.peer_asn, Some(65001));
        assert_eq!(record.entry_type, EntryType::Bgp4Mp as u16);
        assert_eq!(record.entry_sub_type, 4);
        assert_eq!(record.timestamp_us, 0);
        assert_eq!(framer.parsed(), 1);
        assert_eq!(framer.parsed_ok(), 1);

        assert!(framer.next_record().unwrap().is_none());
        assert!(framer.is_eof());
    }

    #[test]
    fn test_framer_clean_eof_on_empty_stream() {
        let mut framer = MrtFramer::new(std::io::Cursor::new(Vec::<u8>::new()));
        assert!(framer.next_record().unwrap().is_none());
    }

    #[test]
    fn test_framer_sets_eof_on_truncated_trailing_bytes() {
        let mut data = keepalive_entry();
        data.extend_from_slice(&[1, 2, 3]); // trailing partial header
        let mut framer = MrtFramer::new(std::io::Cursor::new(data));
        assert!(framer.next_record().unwrap().is_some());
        assert!(framer.next_record().unwrap().is_none());
        assert!(framer.is_eof());
    }
}
