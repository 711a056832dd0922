//! Encoded polyline codec.
//!
//! Implements the standard Google polyline algorithm at precision 1e5:
//! each coordinate is delta-encoded against the previous one, each delta
//! zig-zag encoded into 5-bit groups offset by 63. The journey-planning
//! backend ships one encoded string per leg in `legGeometry.points`.
//!
//! Decoding a malformed string is an error here; the caller (path
//! extraction) isolates the failure to the one leg that carried it.

use crate::domain::Coordinate;

/// Fixed encoding precision: 5 decimal digits.
const PRECISION: f64 = 1e5;

/// Error while decoding an encoded polyline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    /// The string ended in the middle of a varint group.
    #[error("truncated polyline at byte {0}")]
    Truncated(usize),

    /// A character outside the encoding alphabet.
    #[error("invalid polyline character {char:?} at byte {at}")]
    InvalidChar { char: char, at: usize },

    /// A decoded value fell outside valid degree ranges, which means
    /// the string was not a polyline at all.
    #[error("decoded coordinate out of range at point {0}")]
    OutOfRange(usize),
}

/// Decode an encoded polyline into an ordered coordinate sequence.
///
/// # Examples
///
/// ```
/// use trip_server::geometry::decode;
///
/// let coords = decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@").unwrap();
/// assert_eq!(coords.len(), 3);
/// assert!((coords[0].lat() - 38.5).abs() < 1e-9);
/// assert!((coords[0].lon() + 120.2).abs() < 1e-9);
/// ```
pub fn decode(encoded: &str) -> Result<Vec<Coordinate>, GeometryError> {
    let bytes = encoded.as_bytes();
    let mut coords = Vec::new();
    let mut i = 0;
    let mut lat: i64 = 0;
    let mut lon: i64 = 0;

    while i < bytes.len() {
        lat += decode_value(bytes, &mut i)?;
        lon += decode_value(bytes, &mut i)?;

        let point = Coordinate::new(lat as f64 / PRECISION, lon as f64 / PRECISION)
            .map_err(|_| GeometryError::OutOfRange(coords.len()))?;
        coords.push(point);
    }

    Ok(coords)
}

/// Encode a coordinate sequence into a polyline string.
///
/// Inverse of [`decode`] up to the 1e-5 degree precision of the format.
pub fn encode(coords: &[Coordinate]) -> String {
    let mut out = String::new();
    let mut prev_lat: i64 = 0;
    let mut prev_lon: i64 = 0;

    for c in coords {
        let lat = (c.lat() * PRECISION).round() as i64;
        let lon = (c.lon() * PRECISION).round() as i64;
        encode_value(lat - prev_lat, &mut out);
        encode_value(lon - prev_lon, &mut out);
        prev_lat = lat;
        prev_lon = lon;
    }

    out
}

/// Read one zig-zag varint starting at `*i`, advancing it.
fn decode_value(bytes: &[u8], i: &mut usize) -> Result<i64, GeometryError> {
    let mut result: i64 = 0;
    let mut shift = 0u32;

    loop {
        let Some(&b) = bytes.get(*i) else {
            return Err(GeometryError::Truncated(*i));
        };
        if !(63..=126).contains(&b) {
            return Err(GeometryError::InvalidChar {
                char: b as char,
                at: *i,
            });
        }
        *i += 1;

        let chunk = (b - 63) as i64;
        result |= (chunk & 0x1f) << shift;
        shift += 5;

        if chunk < 0x20 {
            break;
        }
        // 12 groups of 5 bits is already beyond any sane delta
        if shift > 60 {
            return Err(GeometryError::Truncated(*i));
        }
    }

    // Undo zig-zag
    if result & 1 != 0 {
        Ok(!(result >> 1))
    } else {
        Ok(result >> 1)
    }
}

/// Append one zig-zag varint to `out`.
fn encode_value(value: i64, out: &mut String) {
    let mut v = if value < 0 { !(value << 1) } else { value << 1 };

    while v >= 0x20 {
        out.push((((v & 0x1f) | 0x20) as u8 + 63) as char);
        v >>= 5;
    }
    out.push((v as u8 + 63) as char);
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The worked example from the polyline format documentation.
    const REFERENCE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn decode_reference_string() {
        let coords = decode(REFERENCE).unwrap();
        assert_eq!(coords.len(), 3);
        assert!(close(coords[0].lat(), 38.5));
        assert!(close(coords[0].lon(), -120.2));
        assert!(close(coords[1].lat(), 40.7));
        assert!(close(coords[1].lon(), -120.95));
        assert!(close(coords[2].lat(), 43.252));
        assert!(close(coords[2].lon(), -126.453));
    }

    #[test]
    fn encode_reference_coords() {
        let coords = vec![
            Coordinate::new(38.5, -120.2).unwrap(),
            Coordinate::new(40.7, -120.95).unwrap(),
            Coordinate::new(43.252, -126.453).unwrap(),
        ];
        assert_eq!(encode(&coords), REFERENCE);
    }

    #[test]
    fn decode_is_deterministic() {
        let a = decode(REFERENCE).unwrap();
        let b = decode(REFERENCE).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_string_decodes_to_empty() {
        assert_eq!(decode("").unwrap(), vec![]);
    }

    #[test]
    fn single_point() {
        let coords = vec![Coordinate::new(45.18855, 5.72459).unwrap()];
        let decoded = decode(&encode(&coords)).unwrap();
        assert_eq!(decoded.len(), 1);
        assert!(close(decoded[0].lat(), 45.18855));
        assert!(close(decoded[0].lon(), 5.72459));
    }

    #[test]
    fn truncated_string_is_an_error() {
        // Chop the reference string mid-varint.
        let truncated = &REFERENCE[..REFERENCE.len() - 2];
        assert!(matches!(
            decode(truncated),
            Err(GeometryError::Truncated(_))
        ));
    }

    #[test]
    fn invalid_character_is_an_error() {
        assert!(matches!(
            decode("_p~iF\t~ps|U"),
            Err(GeometryError::InvalidChar { .. })
        ));
    }

    #[test]
    fn garbage_never_panics() {
        // Not valid polylines, but decode must fail cleanly or produce
        // in-range points, never panic.
        for s in ["!!!", "abcdef", "????????", "zzzzzzzzzzzz"] {
            let _ = decode(s);
        }
    }
}
