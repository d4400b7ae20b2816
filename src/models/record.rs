/*!
The decoded, renderable form of one logical BGP/MRT record -- what a
consumer of [`crate::stream::RecordStream`] actually sees.

A single MRT entry on the wire can fan out into several [MrtRecord]
values: a TABLE_DUMP_V2 RIB entry with N peers produces one parent record
plus N-1 siblings, each independently decoded and sharing only the NLRI
prefix (see [`crate::parser::rib::RibDecoder`]).
*/
use crate::models::Afi;
use num_enum::TryFromPrimitive;

/// The letter emitted as the leading column of the pipe-separated format.
#[derive(Debug, PartialEq, Eq, Clone, Copy, TryFromPrimitive)]
#[repr(u8)]
pub enum BgpType {
    Open = 1,
    Update = 2,
    Notification = 3,
    Keepalive = 4,
    StateChange = 5,
    /// Not a real BGP message type; synthesized for TABLE_DUMP_V2 RIB
    /// entries, which have no underlying BGP message at all.
    Rib = 255,
}

impl BgpType {
    /// The single-character tag used in the rendered output, matching the
    /// classic `bgpdump` convention.
    pub fn tag(&self) -> char {
        match self {
            BgpType::Open => 'O',
            BgpType::Update => 'U',
            BgpType::Notification => 'N',
            BgpType::Keepalive => 'K',
            BgpType::StateChange => 'S',
            BgpType::Rib => 'R',
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, TryFromPrimitive, Default)]
#[repr(u8)]
pub enum Origin {
    Igp = 0,
    Egp = 1,
    Incomplete = 2,
    #[default]
    Unknown = 255,
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Origin::Igp => "IGP",
            Origin::Egp => "EGP",
            Origin::Incomplete => "INCOMPLETE",
            Origin::Unknown => "UNKNOWN",
        };
        write!(f, "{s}")
    }
}

/// One decoded, renderable BGP/MRT record.
#[derive(Debug, Clone, Default)]
pub struct MrtRecord {
    pub timestamp: u32,
    /// Microseconds component of the header timestamp; 0 unless the entry
    /// came from a BGP4MP_ET record.
    pub timestamp_us: u32,
    /// Raw MRT `entry_type` the record was framed from (13/16/17).
    pub entry_type: u16,
    /// Raw MRT `entry_subtype` the record was framed from.
    pub entry_sub_type: u16,
    pub bgp_type: Option<BgpType>,
    /// Announced NLRI prefixes, rendered as CIDR strings.
    pub announced: Vec<String>,
    /// Withdrawn NLRI prefixes, rendered as CIDR strings.
    pub withdrawn: Vec<String>,
    /// Defaults to `Origin::Unknown` (rendered `"UNKNOWN"`) when no ORIGIN
    /// attribute was present, rather than an empty field.
    pub origin: Origin,
    pub next_hop: Option<String>,
    /// Rendered AS path, e.g. `"65001 65002 {65003,65004}"`.
    pub as_path: Option<String>,
    /// Rendered communities, e.g. `"65001:100 65001:200"`.
    pub communities: Option<String>,
    pub peer_asn: Option<u32>,
    pub peer_address: Option<String>,
    pub peer_afi: Option<Afi>,
    /// Additional per-peer sub-entries sharing this record's prefix, from
    /// a TABLE_DUMP_V2 RIB entry with more than one peer. Never populated
    /// recursively -- a sibling's own `siblings` is always empty.
    pub siblings: Vec<MrtRecord>,
}

impl MrtRecord {
    pub fn new(timestamp: u32) -> Self {
        MrtRecord {
            timestamp,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bgp_type_tag() {
        assert_eq!(BgpType::Open.tag(), 'O');
        assert_eq!(BgpType::Update.tag(), 'U');
        assert_eq!(BgpType::Notification.tag(), 'N');
        assert_eq!(BgpType::Keepalive.tag(), 'K');
        assert_eq!(BgpType::StateChange.tag(), 'S');
        assert_eq!(BgpType::Rib.tag(), 'R');
    }

    #[test]
    fn test_origin_display() {
        assert_eq!(Origin::Igp.to_string(), "IGP");
        assert_eq!(Origin::Egp.to_string(), "EGP");
        assert_eq!(Origin::Incomplete.to_string(), "INCOMPLETE");
        assert_eq!(Origin::Unknown.to_string(), "UNKNOWN");
    }

    #[test]
    fn test_mrt_record_default() {
        let r = MrtRecord::new(1234);
        assert_eq!(r.timestamp, 1234);
        assert_eq!(r.timestamp_us, 0);
        assert_eq!(r.entry_type, 0);
        assert_eq!(r.entry_sub_type, 0);
        assert!(r.peer_afi.is_none());
        assert!(r.bgp_type.is_none());
        assert!(r.announced.is_empty());
    }
}
