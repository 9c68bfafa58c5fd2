use crate::core_parser::CoreParser;
use crate::errors::ParseError;
use crate::models::RawHeader;

/// Offset of the gzip compressed match body. Everything before it is the
/// fixed size descriptive header.
pub const GZIP_START: usize = 0x4043;

/// Offset of the single length byte declaring the key/value region
const HEADER_LEN_OFFSET: usize = 0x30;

/// Offset of the NUL delimited key/value region
const HEADER_DATA_OFFSET: usize = 0x38;

/// Parses the descriptive key/value pairs out of a demo file's header prefix.
///
/// The layout is fixed: a length byte at `0x30` declares how many bytes of
/// NUL delimited pairs start at `0x38`. Keys are NUL terminated; a value
/// ends at the next NUL or at the end of the declared region. Duplicate keys
/// keep the last occurrence.
///
/// The declared length is clamped to the bytes actually present, so a lying
/// length byte cannot push a read out of bounds.
pub fn parse_raw_header(prefix: &[u8]) -> Result<RawHeader, ParseError> {
    let mut parser = CoreParser::new(prefix);
    parser.skip(HEADER_LEN_OFFSET)?;
    let declared = usize::from(parser.take_u8()?);
    parser.skip(HEADER_DATA_OFFSET - HEADER_LEN_OFFSET - 1)?;

    let region = parser.take_data(declared.min(parser.remaining()))?;
    Ok(parse_pairs(region))
}

/// Walks a region as alternating NUL terminated keys and values, stopping
/// once no further NUL terminated key remains.
fn parse_pairs(region: &[u8]) -> RawHeader {
    let mut header = RawHeader::new();
    let mut pairs = CoreParser::new(region);
    while let Some(key) = pairs.take_cstr() {
        let value = match pairs.take_cstr() {
            Some(value) => value,
            // the last value may run to the end of the region unterminated
            None => pairs.take_rest(),
        };
        header.insert(key, value);
    }
    header
}
