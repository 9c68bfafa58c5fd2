use crate::core_parser::decode_windows1252;
use crate::models::ConfigStrings;

/// Prefix of every configstring broadcast in the decompressed body: a `cs `
/// command framed by two control bytes, which keeps ordinary text
/// containing "cs " from matching.
const CS_MARKER: [u8; 5] = [0x00, 0x0B, b'c', b's', b' '];

/// Configstring slot conventionally holding the first client's name
pub const PLAYER1_SLOT: u32 = 20;

/// Configstring slot conventionally holding the second client's name
pub const PLAYER2_SLOT: u32 = 21;

/// Scans a decompressed demo body for configstring broadcasts.
///
/// A record runs from just past its marker to the start of the next marker;
/// the final record is instead bounded by the next NUL byte, or by the end
/// of the payload when there is none. Each record body splits at its first
/// space into a decimal slot and a value. A record that fails to parse is
/// logged and skipped on its own; later broadcasts for a slot overwrite
/// earlier ones.
pub fn extract_configstrings(payload: &[u8]) -> ConfigStrings {
    let mut out = ConfigStrings::default();
    let mut pos = 0;

    while let Some(found) = find(&payload[pos..], &CS_MARKER) {
        let start = pos + found;
        let body_start = start + CS_MARKER.len();

        let (end, is_last) = match find(&payload[start + 1..], &CS_MARKER) {
            Some(next) => (start + 1 + next, false),
            None => match payload[start + 1..].iter().position(|&b| b == 0) {
                Some(nul) => (start + 1 + nul, true),
                None => (payload.len(), true),
            },
        };

        let body = payload.get(body_start..end).unwrap_or_default();
        if let Some((slot, value)) = parse_record(body) {
            out.insert(slot, value);
        }

        if is_last {
            break;
        }

        // resume past the record just consumed, not past its marker, so the
        // same record is never scanned twice
        pos = end;
    }

    out
}

/// Splits one record body into its slot and value. `None` means the record
/// is malformed and the scan moves on without it.
fn parse_record(body: &[u8]) -> Option<(u32, String)> {
    let sep = match body.iter().position(|&b| b == b' ') {
        Some(sep) => sep,
        None => {
            tracing::warn!(
                record = %decode_windows1252(body),
                "configstring record has no separator, skipping record"
            );
            return None;
        }
    };

    let raw_slot = decode_windows1252(&body[..sep]);
    let slot = match raw_slot.parse::<u32>() {
        Ok(slot) => slot,
        Err(error) => {
            tracing::warn!(slot = %raw_slot, %error, "configstring slot is not a number, skipping record");
            return None;
        }
    };

    Some((slot, trim_quotes(decode_windows1252(&body[sep + 1..]))))
}

/// Values usually arrive quoted; strip one balanced pair when present.
fn trim_quotes(value: String) -> String {
    match value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        Some(inner) => inner.to_owned(),
        None => value,
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}
