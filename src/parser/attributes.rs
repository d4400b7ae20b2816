/*!
Decodes a BGP path-attribute TLV stream into an [`MrtRecord`](crate::models::MrtRecord).

Grounded in the classic `bgpdump`/`pygillstream` attribute loop: every
attribute is `(flags, type, length, body)` with the length width switched
by the extended-length flag bit, and the decoder bails out the instant
any sub-length is inconsistent with its enclosing budget.
*/
use crate::cursor::ByteCursor;
use crate::error::ParserError;
use crate::models::{Afi, MrtRecord, Origin, PrefixCodec};
use bitflags::bitflags;
use std::net::{Ipv4Addr, Ipv6Addr};

const ATTR_ORIGIN: u8 = 1;
const ATTR_AS_PATH: u8 = 2;
const ATTR_NEXT_HOP: u8 = 3;
const ATTR_COMMUNITIES: u8 = 8;
const ATTR_MP_REACH_NLRI: u8 = 14;
const ATTR_MP_UNREACH_NLRI: u8 = 15;

const AS_PATH_SEGMENT_SET: u8 = 1;
const AS_PATH_SEGMENT_SEQ: u8 = 2;

const MAX_RENDERED_LEN: usize = 4096;
const MAX_PREFIXES: usize = 2048;

bitflags! {
    /// The flags octet that precedes every path attribute's type byte.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct AttrFlags: u8 {
        const OPTIONAL = 0b1000_0000;
        const TRANSITIVE = 0b0100_0000;
        const PARTIAL = 0b0010_0000;
        const EXTENDED_LENGTH = 0b0001_0000;
    }
}

pub struct AttributeDecoder;

impl AttributeDecoder {
    /// Decode exactly `data.len()` bytes of attribute TLVs into `record`.
    pub fn decode(data: &[u8], asn_width: usize, record: &mut MrtRecord) -> Result<(), ParserError> {
        let mut cursor = ByteCursor::new(data);

        while cursor.remaining() > 0 {
            let flags = AttrFlags::from_bits_truncate(cursor.read_u8()?);
            let attr_type = cursor.read_u8()?;
            let length = if flags.contains(AttrFlags::EXTENDED_LENGTH) {
                cursor.read_u16()? as usize
            } else {
                cursor.read_u8()? as usize
            };
            if length > MAX_RENDERED_LEN {
                return Err(ParserError::BadAttr(format!("attribute length {length} exceeds cap")));
            }
            let body = cursor.read_n(length)?;

            match attr_type {
                ATTR_ORIGIN => Self::decode_origin(body, record)?,
                ATTR_AS_PATH => Self::decode_as_path(body, asn_width, record)?,
                ATTR_NEXT_HOP => Self::decode_next_hop(body, record)?,
                ATTR_COMMUNITIES => Self::decode_communities(body, record)?,
                ATTR_MP_REACH_NLRI => Self::decode_mp_reach(body, record)?,
                ATTR_MP_UNREACH_NLRI => Self::decode_mp_unreach(body, record)?,
                other => {
                    log::debug!("skipping unsupported path attribute type {other}");
                }
            }
        }

        Ok(())
    }

    fn decode_origin(body: &[u8], record: &mut MrtRecord) -> Result<(), ParserError> {
        if body.len() != 1 {
            return Err(ParserError::BadAttr(format!(
                "ORIGIN attribute must be 1 byte, got {}",
                body.len()
            )));
        }
        record.origin = Origin::try_from(body[0]).unwrap_or(Origin::Unknown);
        Ok(())
    }

    fn decode_as_path(body: &[u8], asn_width: usize, record: &mut MrtRecord) -> Result<(), ParserError> {
        let mut cursor = ByteCursor::new(body);
        let mut rendered = String::new();

        while cursor.remaining() > 0 {
            let seg_type = cursor.read_u8()?;
            let seg_len = cursor.read_u8()? as usize;

            let mut asns = Vec::with_capacity(seg_len);
            for _ in 0..seg_len {
                let asn = if asn_width == 2 {
                    cursor.read_u16()? as u32
                } else {
                    cursor.read_u32()?
                };
                asns.push(asn);
            }

            match seg_type {
                AS_PATH_SEGMENT_SEQ => {
                    for asn in &asns {
                        if !rendered.is_empty() {
                            rendered.push(' ');
                        }
                        rendered.push_str(&asn.to_string());
                    }
                }
                AS_PATH_SEGMENT_SET => {
                    if !rendered.is_empty() {
                        rendered.push(' ');
                    }
                    rendered.push('{');
                    for (i, asn) in asns.iter().enumerate() {
                        if i > 0 {
                            rendered.push(',');
                        }
                        rendered.push_str(&asn.to_string());
                    }
                    rendered.push('}');
                }
                other => {
                    log::debug!("skipping unknown AS_PATH segment type {other}");
                }
            }

            if rendered.len() > MAX_RENDERED_LEN {
                return Err(ParserError::AttrTooLarge);
            }
        }

        record.as_path = Some(rendered);
        Ok(())
    }

    fn decode_next_hop(body: &[u8], record: &mut MrtRecord) -> Result<(), ParserError> {
        if body.len() != 4 {
            return Err(ParserError::BadAttr(format!(
                "NEXT_HOP attribute must be 4 bytes, got {}",
                body.len()
            )));
        }
        let addr = Ipv4Addr::new(body[0], body[1], body[2], body[3]);
        record.next_hop = Some(addr.to_string());
        Ok(())
    }

    fn decode_communities(body: &[u8], record: &mut MrtRecord) -> Result<(), ParserError> {
        let mut cursor = ByteCursor::new(body);
        let mut rendered = String::new();

        while cursor.remaining() > 0 {
            let asn = cursor.read_u16()?;
            let value = cursor.read_u16()?;
            if !rendered.is_empty() {
                rendered.push(' ');
            }
            rendered.push_str(&format!("{asn}:{value}"));
            if rendered.len() > MAX_RENDERED_LEN {
                return Err(ParserError::AttrTooLarge);
            }
        }

        record.communities = Some(rendered);
        Ok(())
    }

    /// Render `raw` (of any length) as an IPv6 address, zero-padded at the
    /// tail. This is the deliberate bit-compatibility quirk described in
    /// §4.3: MP_REACH next-hops are always rendered as IPv6 text, even for
    /// a 4-byte (v4-mapped) declared length.
    fn render_next_hop_as_ipv6(raw: &[u8]) -> String {
        let mut buf = [0u8; 16];
        let n = raw.len().min(16);
        buf[..n].copy_from_slice(&raw[..n]);
        Ipv6Addr::from(buf).to_string()
    }

    fn decode_mp_reach(body: &[u8], record: &mut MrtRecord) -> Result<(), ParserError> {
        if body.is_empty() {
            return Err(ParserError::Truncated("MP_REACH_NLRI body"));
        }
        let mut cursor = ByteCursor::new(body);

        let shortened = body[0] != 0;
        if !shortened {
            // standard form: 2-byte AFI, 1-byte SAFI, then next-hop length
            cursor.skip(2)?;
            cursor.skip(1)?;
        }

        let nh_len = cursor.read_u8()? as usize;
        let nh_bytes = cursor.read_n(nh_len)?;
        record.next_hop = Some(Self::render_next_hop_as_ipv6(nh_bytes));

        if !shortened {
            cursor.skip(1)?; // reserved byte
        }

        while cursor.remaining() > 0 {
            let (text, _) = PrefixCodec::decode_prefix(&mut cursor, Afi::Ipv6)?;
            if record.announced.len() < MAX_PREFIXES {
                record.announced.push(text);
            }
        }

        Ok(())
    }

    fn decode_mp_unreach(body: &[u8], record: &mut MrtRecord) -> Result<(), ParserError> {
        let mut cursor = ByteCursor::new(body);
        cursor.skip(2)?; // AFI
        cursor.skip(1)?; // SAFI

        while cursor.remaining() > 0 {
            let (text, _) = PrefixCodec::decode_prefix(&mut cursor, Afi::Ipv6)?;
            if record.withdrawn.len() < MAX_PREFIXES {
                record.withdrawn.push(text);
            }
        }

        Ok(())
    }
}
