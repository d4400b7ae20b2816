/*!
Decodes TABLE_DUMP_V2 records: the PEER_INDEX_TABLE (populates the peer
directory) and RIB_IPV4_UNICAST / RIB_IPV6_UNICAST entries (one prefix,
fanned out across the peers that carry it).

Grounded literally on `process_bgp_rib_index()` / `process_bgp_rib_entry()`
in the C reference implementation.
*/
use crate::cursor::ByteCursor;
use crate::error::ParserError;
use crate::models::{Afi, BgpType, MrtRecord, PeerDirectory, PrefixCodec};
use crate::parser::attributes::AttributeDecoder;

const PEER_FLAG_IPV6: u8 = 0x01;
const PEER_FLAG_AS32: u8 = 0x02;
const RIB_ASN_WIDTH: usize = 4;
const PEER_INDEX_CAP: usize = 256;

pub struct RibDecoder;

impl RibDecoder {
    pub fn decode_peer_index_table(body: &[u8], directory: &mut PeerDirectory) -> Result<(), ParserError> {
        let mut cursor = ByteCursor::new(body);
        cursor.skip(4)?; // collector BGP ID

        let view_len = cursor.read_u16()? as usize;
        cursor.skip(view_len)?;

        let peer_count = cursor.read_u16()?;

        for index in 0..peer_count {
            let flags = cursor.read_u8()?;
            cursor.skip(4)?; // peer BGP ID

            let afi = if flags & PEER_FLAG_IPV6 != 0 { Afi::Ipv6 } else { Afi::Ipv4 };
            let addr_len = if afi == Afi::Ipv6 { 16 } else { 4 };
            let addr_bytes = cursor.read_n(addr_len)?;
            let address = render_address(addr_bytes, afi);

            let asn = if flags & PEER_FLAG_AS32 != 0 {
                cursor.read_u32()?
            } else {
                cursor.read_u16()? as u32
            };

            directory.insert(index, afi, address, asn);
        }

        Ok(())
    }

    pub fn decode_rib(
        body: &[u8],
        afi: Afi,
        timestamp: u32,
        directory: &PeerDirectory,
    ) -> Result<MrtRecord, ParserError> {
        let mut cursor = ByteCursor::new(body);
        cursor.skip(4)?; // sequence number
        let (prefix, _) = PrefixCodec::decode_prefix(&mut cursor, afi)?;

        let entry_count = cursor.read_u16()?;

        let mut parent = Self::decode_rib_entry(&mut cursor, &prefix, timestamp, directory)?;
        for _ in 1..entry_count {
            let sibling = Self::decode_rib_entry(&mut cursor, &prefix, timestamp, directory)?;
            parent.siblings.push(sibling);
        }

        Ok(parent)
    }

    fn decode_rib_entry(
        cursor: &mut ByteCursor,
        prefix: &str,
        timestamp: u32,
        directory: &PeerDirectory,
    ) -> Result<MrtRecord, ParserError> {
        let peer_index = cursor.read_u16()?;
        if peer_index as usize >= PEER_INDEX_CAP {
            return Err(ParserError::BadAttr(format!("peer index {peer_index} out of range")));
        }
        cursor.skip(4)?; // originated timestamp; the MRT record timestamp wins

        let attr_len = cursor.read_u16()? as usize;
        let attr_bytes = cursor.read_n(attr_len)?;

        let mut record = MrtRecord::new(timestamp);
        record.bgp_type = Some(BgpType::Rib);
        record.announced.push(prefix.to_string());

        if let Some(peer) = directory.get(peer_index) {
            record.peer_asn = Some(peer.asn);
            record.peer_address = Some(peer.address.clone());
            record.peer_afi = Some(peer.afi);
        }

        AttributeDecoder::decode(attr_bytes, RIB_ASN_WIDTH, &mut record)?;

        Ok(record)
    }
}

fn render_address(raw: &[u8], afi: Afi) -> String {
    match afi {
        Afi::Ipv4 => {
            let buf: [u8; 4] = raw.try_into().unwrap();
            std::net::Ipv4Addr::from(buf).to_string()
        }
        Afi::Ipv6 => {
            let buf: [u8; 16] = raw.try_into().unwrap();
            std::net::Ipv6Addr::from(buf).to_string()
        }
    }
}
