// VFST binary header: magic cookies and the weighted flag.

use crate::DictionaryError;

/// VFST header magic constants (little-endian).
const COOKIE1: u32 = 0x0001_3A6E;
const COOKIE2: u32 = 0x0003_51FA;

/// Size of the VFST binary header in bytes.
pub const HEADER_SIZE: usize = 16;

/// Parsed VFST file header.
///
/// Layout of the first 16 bytes:
/// - bytes 0..4: cookie1
/// - bytes 4..8: cookie2
/// - byte 8: transition layout (0x00 = unweighted, 0x01 = weighted)
/// - bytes 9..16: reserved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VfstHeader {
    /// Whether the transition table uses the weighted layout.
    pub weighted: bool,
}

/// Parse and validate the 16-byte VFST header.
///
/// Cookies that only match after byte swapping come from a big-endian build
/// of the format, which is reported as an unsupported variant rather than as
/// corruption. The same goes for a layout byte other than 0 or 1.
pub fn parse_header(data: &[u8]) -> Result<VfstHeader, DictionaryError> {
    if data.len() < HEADER_SIZE {
        return Err(DictionaryError::TooShort {
            expected: HEADER_SIZE,
            actual: data.len(),
        });
    }

    let cookie1 = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
    let cookie2 = u32::from_le_bytes([data[4], data[5], data[6], data[7]]);

    if cookie1 != COOKIE1 || cookie2 != COOKIE2 {
        if cookie1.swap_bytes() == COOKIE1 && cookie2.swap_bytes() == COOKIE2 {
            return Err(DictionaryError::UnsupportedVersion(
                "big-endian VFST image".to_string(),
            ));
        }
        return Err(DictionaryError::InvalidMagic);
    }

    let weighted = match data[8] {
        0x00 => false,
        0x01 => true,
        other => {
            return Err(DictionaryError::UnsupportedVersion(format!(
                "unknown transition layout {other:#04x}"
            )));
        }
    };

    Ok(VfstHeader { weighted })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::build_header;

    #[test]
    fn parse_unweighted_header() {
        let header = parse_header(&build_header(false)).unwrap();
        assert!(!header.weighted);
    }

    #[test]
    fn parse_weighted_header() {
        let header = parse_header(&build_header(true)).unwrap();
        assert!(header.weighted);
    }

    #[test]
    fn reject_too_short() {
        let err = parse_header(&[0u8; 8]).unwrap_err();
        assert!(matches!(
            err,
            DictionaryError::TooShort {
                expected: 16,
                actual: 8
            }
        ));
        assert!(err.is_malformed());
    }

    #[test]
    fn reject_invalid_magic() {
        let mut data = build_header(false);
        data[0] = 0xFF;
        let err = parse_header(&data).unwrap_err();
        assert!(matches!(err, DictionaryError::InvalidMagic));
    }

    #[test]
    fn byte_swapped_cookies_are_unsupported() {
        let mut data = vec![0u8; HEADER_SIZE];
        data[..4].copy_from_slice(&COOKIE1.to_be_bytes());
        data[4..8].copy_from_slice(&COOKIE2.to_be_bytes());
        let err = parse_header(&data).unwrap_err();
        assert!(matches!(err, DictionaryError::UnsupportedVersion(_)));
        assert!(!err.is_malformed());
    }

    #[test]
    fn unknown_layout_byte_is_unsupported() {
        let mut data = build_header(false);
        data[8] = 0x07;
        let err = parse_header(&data).unwrap_err();
        assert!(matches!(err, DictionaryError::UnsupportedVersion(_)));
    }

    #[test]
    fn header_with_trailing_data() {
        let mut data = build_header(false);
        data.extend_from_slice(&[0u8; 100]);
        assert!(!parse_header(&data).unwrap().weighted);
    }
}
