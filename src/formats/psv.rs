/*!
Renders an [`MrtRecord`] as one or more pipe-separated lines:

`TAG|timestamp|announced_csv|withdrawn_csv|origin|next_hop|as_path|communities|peer_asn|peer_address`

Grounded literally on `MRTentry_print()` in the C reference implementation
for field order and the `O/U/N/K/S/R` tag letters.
*/
use crate::models::MrtRecord;

pub struct PsvFormatter;

impl PsvFormatter {
    /// Render `record` and, recursively, every entry in its sibling chain
    /// (one line each). Most callers consume records through
    /// [`crate::stream::RecordStream`], which already flattens siblings, so
    /// in practice `record.siblings` is empty and this returns one line.
    pub fn format_chain(record: &MrtRecord) -> Vec<String> {
        let mut lines = vec![Self::format_one(record)];
        for sibling in &record.siblings {
            lines.extend(Self::format_chain(sibling));
        }
        lines
    }

    /// Render a single record, ignoring any attached siblings.
    pub fn format_one(record: &MrtRecord) -> String {
        let tag = record.bgp_type.map(|t| t.tag()).unwrap_or('?');
        let announced = record.announced.join(",");
        let withdrawn = record.withdrawn.join(",");
        let origin = record.origin.to_string();
        let next_hop = record.next_hop.clone().unwrap_or_default();
        let as_path = record.as_path.clone().unwrap_or_default();
        let communities = record.communities.clone().unwrap_or_default();
        let peer_asn = record.peer_asn.map(|a| a.to_string()).unwrap_or_default();
        let peer_address = record.peer_address.clone().unwrap_or_default();

        format!(
            "{tag}|{}|{announced}|{withdrawn}|{origin}|{next_hop}|{as_path}|{communities}|{peer_asn}|{peer_address}",
            record.timestamp,
        )
    }
}
