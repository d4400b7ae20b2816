/*!
Decodes length-prefixed IP prefixes ("compressed prefix" form) into
canonical CIDR strings.

Byte layout, per RFC 6396 / the classic `bgpdump` prefix encoding:
one length-in-bits byte, followed by `ceil(mask_len / 8)` address bytes,
zero-padded on decode to the full 4- or 16-byte address.
*/
use crate::cursor::ByteCursor;
use crate::error::ParserError;
use crate::models::Afi;
use std::net::{Ipv4Addr, Ipv6Addr};

pub struct PrefixCodec;

impl PrefixCodec {
    /// Decode one length-prefixed prefix, returning its canonical text form
    /// and the number of bytes consumed from `cursor`.
    pub fn decode_prefix(cursor: &mut ByteCursor, afi: Afi) -> Result<(String, usize), ParserError> {
        let mask_len = cursor.read_u8()?;
        if mask_len > 128 || (afi == Afi::Ipv4 && mask_len > 32) {
            return Err(ParserError::BadPrefix(format!(
                "mask length {mask_len} invalid for {afi:?}"
            )));
        }
        let byte_len = mask_len.div_ceil(8) as usize;
        let raw = cursor.read_n(byte_len)?;

        let text = match afi {
            Afi::Ipv4 => {
                let mut buf = [0u8; 4];
                buf[..byte_len].copy_from_slice(raw);
                format!("{}/{}", Ipv4Addr::from(buf), mask_len)
            }
            Afi::Ipv6 => {
                let mut buf = [0u8; 16];
                buf[..byte_len].copy_from_slice(raw);
                format!("{}/{}", Ipv6Addr::from(buf), mask_len)
            }
        };

        Ok((text, 1 + byte_len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_v4_prefix() {
        // 192.0.2.0/24
        let data = [24, 192, 0, 2];
        let mut c = ByteCursor::new(&data);
        let (text, consumed) = PrefixCodec::decode_prefix(&mut c, Afi::Ipv4).unwrap();
        assert_eq!(text, "192.0.2.0/24");
        assert_eq!(consumed, 4);
    }

    #[test]
    fn test_decode_v4_prefix_partial_byte() {
        // 10.0.0.0/10 -> ceil(10/8) = 2 bytes
        let data = [10, 10, 0];
        let mut c = ByteCursor::new(&data);
        let (text, consumed) = PrefixCodec::decode_prefix(&mut c, Afi::Ipv4).unwrap();
        assert_eq!(text, "10.0.0.0/10");
        assert_eq!(consumed, 3);
    }

    #[test]
    fn test_decode_v6_prefix() {
        // 2001:db8::/32
        let data = [32, 0x20, 0x01, 0x0d, 0xb8];
        let mut c = ByteCursor::new(&data);
        let (text, consumed) = PrefixCodec::decode_prefix(&mut c, Afi::Ipv6).unwrap();
        assert_eq!(text, "2001:db8::/32");
        assert_eq!(consumed, 5);
    }

    #[test]
    fn test_mask_too_large_for_v4() {
        let data = [33, 0, 0, 0, 0];
        let mut c = ByteCursor::new(&data);
        assert!(PrefixCodec::decode_prefix(&mut c, Afi::Ipv4).is_err());
    }

    #[test]
    fn test_mask_too_large_for_v6() {
        let data = [129];
        let mut c = ByteCursor::new(&data);
        assert!(PrefixCodec::decode_prefix(&mut c, Afi::Ipv6).is_err());
    }

    #[test]
    fn test_truncated_prefix_body() {
        let data = [24, 192, 0]; // declares 24 bits (3 bytes) but only 2 remain
        let mut c = ByteCursor::new(&data);
        assert!(PrefixCodec::decode_prefix(&mut c, Afi::Ipv4).is_err());
    }
}
