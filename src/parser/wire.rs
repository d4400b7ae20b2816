/*!
Wire-level tag enums for MRT/BGP4MP/TABLE_DUMP_V2 framing.

<https://datatracker.ietf.org/doc/html/rfc6396>
*/
use num_enum::TryFromPrimitive;

#[derive(Debug, PartialEq, Eq, Clone, Copy, TryFromPrimitive)]
#[repr(u16)]
pub enum EntryType {
    TableDumpV2 = 13,
    Bgp4Mp = 16,
    Bgp4MpEt = 17,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, TryFromPrimitive)]
#[repr(u16)]
pub enum Bgp4MpSubtype {
    StateChange = 0,
    Message = 1,
    MessageAs4 = 4,
    StateChangeAs4 = 5,
    MessageLocal = 6,
    MessageAs4Local = 7,
}

impl Bgp4MpSubtype {
    /// Width, in bytes, of the peer/local ASN fields for this subtype.
    pub fn asn_width(&self) -> usize {
        match self {
            Bgp4MpSubtype::Message | Bgp4MpSubtype::MessageLocal | Bgp4MpSubtype::StateChange => 2,
            Bgp4MpSubtype::MessageAs4
            | Bgp4MpSubtype::MessageAs4Local
            | Bgp4MpSubtype::StateChangeAs4 => 4,
        }
    }

    pub fn is_state_change(&self) -> bool {
        matches!(self, Bgp4MpSubtype::StateChange | Bgp4MpSubtype::StateChangeAs4)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, TryFromPrimitive)]
#[repr(u16)]
pub enum TableDumpV2Subtype {
    PeerIndexTable = 1,
    RibIpv4Unicast = 2,
    RibIpv6Unicast = 4,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, TryFromPrimitive)]
#[repr(u8)]
pub enum BgpMessageType {
    Open = 1,
    Update = 2,
    Notification = 3,
    Keepalive = 4,
}
