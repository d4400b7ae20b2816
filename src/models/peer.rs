/*!
The per-file peer directory populated by a TABLE_DUMP_V2 PEER_INDEX_TABLE
record and consulted by subsequent RIB_IPV4_UNICAST / RIB_IPV6_UNICAST
entries.
*/
use crate::models::Afi;

/// Maximum number of peers retained in a [PeerDirectory]. Indices beyond
/// this are still length-consumed while decoding the PEER_INDEX_TABLE, but
/// are not stored: a later RIB entry referencing one of them is dropped.
pub const MAX_PEERS: usize = 256;

#[derive(Debug, Clone)]
pub struct PeerEntry {
    pub index: u16,
    pub afi: Afi,
    pub address: String,
    pub asn: u32,
}

/// Ordered `index -> PeerEntry` directory, filled once per file by a
/// PEER_INDEX_TABLE record. Entries are immutable once set.
#[derive(Debug, Default)]
pub struct PeerDirectory {
    peers: Vec<Option<PeerEntry>>,
}

impl PeerDirectory {
    pub fn new() -> Self {
        PeerDirectory { peers: Vec::new() }
    }

    /// Insert the peer at `index`, if `index` is within [MAX_PEERS].
    /// Indices at or above the cap are silently ignored.
    pub fn insert(&mut self, index: u16, afi: Afi, address: String, asn: u32) {
        if index as usize >= MAX_PEERS {
            return;
        }
        if self.peers.len() <= index as usize {
            self.peers.resize_with(index as usize + 1, || None);
        }
        self.peers[index as usize] = Some(PeerEntry {
            index,
            afi,
            address,
            asn,
        });
    }

    pub fn get(&self, index: u16) -> Option<&PeerEntry> {
        self.peers.get(index as usize).and_then(|e| e.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut dir = PeerDirectory::new();
        dir.insert(0, Afi::Ipv6, "::1".to_string(), 65000);
        dir.insert(1, Afi::Ipv4, "10.0.0.2".to_string(), 65001);

        let p0 = dir.get(0).unwrap();
        assert_eq!(p0.address, "::1");
        assert_eq!(p0.asn, 65000);

        let p1 = dir.get(1).unwrap();
        assert_eq!(p1.address, "10.0.0.2");
        assert_eq!(p1.asn, 65001);
    }

    #[test]
    fn test_index_at_or_above_cap_is_dropped() {
        let mut dir = PeerDirectory::new();
        dir.insert(256, Afi::Ipv4, "10.0.0.1".to_string(), 1);
        assert!(dir.get(256).is_none());
    }

    #[test]
    fn test_unknown_index_is_none() {
        let dir = PeerDirectory::new();
        assert!(dir.get(5).is_none());
    }
}
