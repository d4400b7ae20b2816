/*!
Decodes a BGP4MP / BGP4MP_ET envelope: peer/AFI/address fields, the
state-change shortcut, and (for UPDATE) the withdrawn/attribute/announced
triple.

Grounded literally on `process_classic_message()` / `process_bgp_update()`
in the C reference implementation: same field order, same marker and
length-consistency checks, same AS16-vs-AS32 width switch by subtype.
*/
use crate::cursor::ByteCursor;
use crate::error::ParserError;
use crate::models::{Afi, BgpType, MrtRecord, PrefixCodec};
use crate::parser::attributes::AttributeDecoder;
use crate::parser::wire::{Bgp4MpSubtype, BgpMessageType};
use std::net::{Ipv4Addr, Ipv6Addr};

const BGP_MARKER_LEN: usize = 16;
const BGP_HEADER_LEN: usize = 19; // marker(16) + length(2) + type(1)
const MAX_PREFIXES: usize = 2048;

pub struct MessageDecoder;

impl MessageDecoder {
    pub fn decode(body: &[u8], entry_subtype: u16, timestamp: u32) -> Result<MrtRecord, ParserError> {
        let subtype = Bgp4MpSubtype::try_from(entry_subtype)
            .map_err(|_| ParserError::UnknownSubtype { entry_type: 16, entry_subtype })?;
        let asn_width = subtype.asn_width();

        let mut cursor = ByteCursor::new(body);
        let peer_asn = Self::read_asn(&mut cursor, asn_width)?;
        let _local_asn = Self::read_asn(&mut cursor, asn_width)?;
        cursor.skip(2)?; // interface id

        let afi = Afi::try_from(cursor.read_u16()?)
            .map_err(|_| ParserError::BadAttr("unsupported AFI in BGP4MP envelope".to_string()))?;
        let peer_address = Self::read_address(&mut cursor, afi)?;
        let _dest_address = Self::read_address(&mut cursor, afi)?;

        let mut record = MrtRecord::new(timestamp);
        record.peer_asn = Some(peer_asn);
        record.peer_address = Some(peer_address);
        record.peer_afi = Some(afi);

        if subtype.is_state_change() {
            cursor.skip(2)?; // old state
            cursor.skip(2)?; // new state
            record.bgp_type = Some(BgpType::StateChange);
            return Ok(record);
        }

        let offset_before_marker = cursor.offset();
        let marker = cursor.read_n(BGP_MARKER_LEN)?;
        if marker.iter().any(|&b| b != 0xFF) {
            return Err(ParserError::BadMarker);
        }
        let bgp_len = cursor.read_u16()? as usize;

        let expected = body.len() - offset_before_marker;
        if bgp_len != expected {
            return Err(ParserError::LenMismatch { declared: bgp_len, actual: expected });
        }

        let bgp_type_code = cursor.read_u8()?;
        let bgp_type = BgpMessageType::try_from(bgp_type_code)
            .map_err(|_| ParserError::BadAttr(format!("unsupported BGP message type {bgp_type_code}")))?;

        match bgp_type {
            BgpMessageType::Update => {
                record.bgp_type = Some(BgpType::Update);
                let update_len = bgp_len - BGP_HEADER_LEN;
                let update_body = cursor.read_n(update_len)?;
                Self::decode_update(update_body, asn_width, &mut record)?;
            }
            BgpMessageType::Open => record.bgp_type = Some(BgpType::Open),
            BgpMessageType::Notification => record.bgp_type = Some(BgpType::Notification),
            BgpMessageType::Keepalive => record.bgp_type = Some(BgpType::Keepalive),
        }

        Ok(record)
    }

    fn read_asn(cursor: &mut ByteCursor, width: usize) -> Result<u32, ParserError> {
        if width == 2 {
            Ok(cursor.read_u16()? as u32)
        } else {
            cursor.read_u32()
        }
    }

    fn read_address(cursor: &mut ByteCursor, afi: Afi) -> Result<String, ParserError> {
        match afi {
            Afi::Ipv4 => {
                let raw = cursor.read_n(4)?;
                Ok(Ipv4Addr::new(raw[0], raw[1], raw[2], raw[3]).to_string())
            }
            Afi::Ipv6 => {
                let raw = cursor.read_n(16)?;
                let buf: [u8; 16] = raw.try_into().unwrap();
                Ok(Ipv6Addr::from(buf).to_string())
            }
        }
    }

    fn decode_update(body: &[u8], asn_width: usize, record: &mut MrtRecord) -> Result<(), ParserError> {
        let mut cursor = ByteCursor::new(body);

        let withdraw_len = cursor.read_u16()? as usize;
        let withdraw_bytes = cursor.read_n(withdraw_len)?;
        Self::decode_prefix_list(withdraw_bytes, &mut record.withdrawn)?;

        let attr_len = cursor.read_u16()? as usize;
        let attr_bytes = cursor.read_n(attr_len)?;
        AttributeDecoder::decode(attr_bytes, asn_width, record)?;

        let nlri_bytes = cursor.read_n(cursor.remaining())?;
        Self::decode_prefix_list(nlri_bytes, &mut record.announced)?;

        Ok(())
    }

    fn decode_prefix_list(bytes: &[u8], out: &mut Vec<String>) -> Result<(), ParserError> {
        let mut cursor = ByteCursor::new(bytes);
        while cursor.remaining() > 0 {
            let (text, _) = PrefixCodec::decode_prefix(&mut cursor, Afi::Ipv4)?;
            if out.len() < MAX_PREFIXES {
                out.push(text);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keepalive_envelope(subtype_width: usize) -> Vec<u8> {
        let mut body = Vec::new();
        if subtype_width == 2 {
            body.extend_from_slice(&65001u16.to_be_bytes());
            body.extend_from_slice(&65002u16.to_be_bytes());
        } else {
            body.extend_from_slice(&65001u32.to_be_bytes());
            body.extend_from_slice(&65002u32.to_be_bytes());
        }
        body.extend_from_slice(&0u16.to_be_bytes()); // interface id
        body.extend_from_slice(&1u16.to_be_bytes()); // AFI = v4
        body.extend_from_slice(&[192, 0, 2, 1]); // peer addr
        body.extend_from_slice(&[192, 0, 2, 2]); // dest addr
        body.extend_from_slice(&[0xFF; 16]); // marker
        body.extend_from_slice(&19u16.to_be_bytes()); // bgp_len = header only
        body.push(4); // KEEPALIVE
        body
    }

    #[test]
    fn test_keepalive_as4() {
        let body = keepalive_envelope(4);
        let record = MessageDecoder::decode(&body, Bgp4MpSubtype::MessageAs4 as u16, 100).unwrap();
        assert_eq!(record.bgp_type, Some(BgpType::Keepalive));
        assert_eq!(record.peer_asn, Some(65001));
        assert_eq!(record.peer_address, Some("192.0.2.1".to_string()));
        assert_eq!(record.peer_afi, Some(Afi::Ipv4));
    }

    #[test]
    fn test_keepalive_as16() {
        let body = keepalive_envelope(2);
        let record = MessageDecoder::decode(&body, Bgp4MpSubtype::Message as u16, 100).unwrap();
        assert_eq!(record.bgp_type, Some(BgpType::Keepalive));
        assert_eq!(record.peer_asn, Some(65001));
    }

    #[test]
    fn test_state_change() {
        let mut body = Vec::new();
        body.extend_from_slice(&65001u32.to_be_bytes());
        body.extend_from_slice(&65002u32.to_be_bytes());
        body.extend_from_slice(&0u16.to_be_bytes());
        body.extend_from_slice(&1u16.to_be_bytes());
        body.extend_from_slice(&[192, 0, 2, 1]);
        body.extend_from_slice(&[192, 0, 2, 2]);
        body.extend_from_slice(&1u16.to_be_bytes()); // old state
        body.extend_from_slice(&3u16.to_be_bytes()); // new state

        let record = MessageDecoder::decode(&body, Bgp4MpSubtype::StateChangeAs4 as u16, 100).unwrap();
        assert_eq!(record.bgp_type, Some(BgpType::StateChange));
    }

    #[test]
    fn test_bad_marker_rejected() {
        let mut body = keepalive_envelope(4);
        let marker_start = body.len() - 19;
        body[marker_start] = 0x00;
        assert!(MessageDecoder::decode(&body, Bgp4MpSubtype::MessageAs4 as u16, 100).is_err());
    }

    #[test]
    fn test_update_with_withdrawn_and_announced() {
        let mut body = Vec::new();
        body.extend_from_slice(&65001u32.to_be_bytes());
        body.extend_from_slice(&65002u32.to_be_bytes());
        body.extend_from_slice(&0u16.to_be_bytes());
        body.extend_from_slice(&1u16.to_be_bytes());
        body.extend_from_slice(&[192, 0, 2, 1]);
        body.extend_from_slice(&[192, 0, 2, 2]);

        // UPDATE body: withdraw_len=0, attr_len=0, NLRI = 10.0.0.0/24
        let mut update_body = Vec::new();
        update_body.extend_from_slice(&0u16.to_be_bytes());
        update_body.extend_from_slice(&0u16.to_be_bytes());
        update_body.extend_from_slice(&[24, 10, 0, 0]);

        let bgp_len = BGP_HEADER_LEN + update_body.len();
        body.extend_from_slice(&[0xFF; 16]);
        body.extend_from_slice(&(bgp_len as u16).to_be_bytes());
        body.push(2); // UPDATE
        body.extend_from_slice(&update_body);

        let record = MessageDecoder::decode(&body, Bgp4MpSubtype::MessageAs4 as u16, 100).unwrap();
        assert_eq!(record.bgp_type, Some(BgpType::Update));
        assert_eq!(record.announced, vec!["10.0.0.0/24".to_string()]);
        assert!(record.withdrawn.is_empty());
    }
}
