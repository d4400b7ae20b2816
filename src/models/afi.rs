/*!
AFI -- Address Family Identifier.

<https://www.iana.org/assignments/address-family-numbers/address-family-numbers.xhtml>
*/
use num_enum::TryFromPrimitive;

#[derive(Debug, PartialEq, Eq, Clone, Copy, TryFromPrimitive)]
#[repr(u16)]
pub enum Afi {
    Ipv4 = 1,
    Ipv6 = 2,
}
