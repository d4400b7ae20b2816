/*!
Raw MRT common header layout (RFC 6396 §2).

```text
 0                   1                   2                   3
 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
|                           Timestamp                          |
+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
|             Type              |            Subtype           |
+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
|                             Length                            |
+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
```

`BGP4MP_ET` records insert a 4-byte microseconds field directly after this
header and before the body; `length` then describes only the body that
follows the microseconds field (RFC 6396 §2 note), so the caller subtracts
4 from the declared length before allocating the body buffer.
*/
use crate::error::ParserError;
use crate::parser::wire::EntryType;
use zerocopy::byteorder::big_endian::{U16, U32};
use zerocopy::{FromBytes, Immutable, KnownLayout, Unaligned};

pub const COMMON_HEADER_LEN: usize = 12;
pub const MICROSECONDS_FIELD_LEN: usize = 4;

#[derive(FromBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
struct RawMrtCommonHeader {
    timestamp: U32,
    entry_type: U16,
    entry_subtype: U16,
    length: U32,
}

#[derive(FromBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
struct RawMrtEtExtra {
    microseconds: U32,
}

#[derive(Debug, Clone, Copy)]
pub struct MrtHeader {
    pub timestamp: u32,
    pub microseconds: u32,
    pub entry_type: u16,
    pub entry_subtype: u16,
    /// Length of the body to follow, with the BGP4MP_ET adjustment already
    /// applied.
    pub body_len: u32,
}

impl MrtHeader {
    /// Parse the 12-byte common header from `bytes`, plus the extra 4-byte
    /// microseconds field when `entry_type == BGP4MP_ET`. `bytes` must hold
    /// 16 bytes when the caller already knows (from a prior peek) that the
    /// record is BGP4MP_ET; 12 bytes otherwise.
    pub fn parse(bytes: &[u8]) -> Result<(Self, usize), ParserError> {
        let (raw, rest) = RawMrtCommonHeader::ref_from_prefix(bytes)
            .map_err(|_| ParserError::Truncated("MRT common header"))?;

        let entry_type = raw.entry_type.get();
        let mut length = raw.length.get();
        let mut microseconds = 0u32;
        let mut consumed = COMMON_HEADER_LEN;

        if entry_type == EntryType::Bgp4MpEt as u16 {
            let (extra, _) = RawMrtEtExtra::ref_from_prefix(rest)
                .map_err(|_| ParserError::Truncated("MRT extended-timestamp field"))?;
            microseconds = extra.microseconds.get();
            consumed += MICROSECONDS_FIELD_LEN;
            length = length.saturating_sub(MICROSECONDS_FIELD_LEN as u32);
        }

        Ok((
            MrtHeader {
                timestamp: raw.timestamp.get(),
                microseconds,
                entry_type,
                entry_subtype: raw.entry_subtype.get(),
                body_len: length,
            },
            consumed,
        ))
    }

    /// Peek the entry-type field out of the first 6 bytes of a common
    /// header, without validating the rest. Used by the framer to decide
    /// whether to read 12 or 16 header bytes off the stream before calling
    /// [`MrtHeader::parse`].
    pub fn peek_entry_type(bytes: &[u8; 6]) -> u16 {
        u16::from_be_bytes([bytes[4], bytes[5]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_header() {
        let mut data = Vec::new();
        data.extend_from_slice(&1_600_000_000u32.to_be_bytes());
        data.extend_from_slice(&16u16.to_be_bytes()); // BGP4MP
        data.extend_from_slice(&1u16.to_be_bytes()); // MESSAGE
        data.extend_from_slice(&42u32.to_be_bytes());

        let (header, consumed) = MrtHeader::parse(&data).unwrap();
        assert_eq!(consumed, 12);
        assert_eq!(header.body_len, 42);
        assert_eq!(header.microseconds, 0);
    }

    #[test]
    fn test_parse_et_header_adjusts_length() {
        let mut data = Vec::new();
        data.extend_from_slice(&1_600_000_000u32.to_be_bytes());
        data.extend_from_slice(&17u16.to_be_bytes()); // BGP4MP_ET
        data.extend_from_slice(&1u16.to_be_bytes());
        data.extend_from_slice(&46u32.to_be_bytes()); // includes the 4-byte us field
        data.extend_from_slice(&500_000u32.to_be_bytes());

        let (header, consumed) = MrtHeader::parse(&data).unwrap();
        assert_eq!(consumed, 16);
        assert_eq!(header.body_len, 42);
        assert_eq!(header.microseconds, 500_000);
    }

    #[test]
    fn test_truncated_header() {
        let data = [0u8; 8];
        assert!(MrtHeader::parse(&data).is_err());
    }

    #[test]
    fn test_peek_entry_type() {
        let mut data = [0u8; 6];
        data[4..6].copy_from_slice(&17u16.to_be_bytes());
        assert_eq!(MrtHeader::peek_entry_type(&data), 17);
    }
}
