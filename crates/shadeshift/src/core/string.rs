#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

use crate::error::HexFormatError;
use crate::{Float, Rgb};

/// Strip surrounding white space and the optional leading `#`, then check
/// that the remaining digits are all hexadecimal.
fn digits(s: &str) -> Result<&str, HexFormatError> {
    let s = s.trim();
    let digits = s.strip_prefix('#').unwrap_or(s);

    if digits.is_empty() {
        return Err(HexFormatError::Empty);
    } else if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(HexFormatError::MalformedDigits);
    }

    Ok(digits)
}

/// Parse the pairs of hexadecimal digits into bytes. The caller must have
/// validated the digits already.
fn parse_bytes<const N: usize>(digits: &str) -> Result<[u8; N], HexFormatError> {
    let mut bytes = [0; N];
    for (index, byte) in bytes.iter_mut().enumerate() {
        let t = digits
            .get(2 * index..2 * index + 2)
            .ok_or(HexFormatError::MalformedDigits)?;
        *byte = u8::from_str_radix(t, 16).map_err(|_| HexFormatError::MalformedDigits)?;
    }
    Ok(bytes)
}

#[inline]
fn to_unit(byte: u8) -> Float {
    byte as Float / 255.0
}

#[inline]
fn to_byte(value: Float) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

// --------------------------------------------------------------------------------------------------------------------

/// Determine whether the string is a 6-digit hexadecimal color with optional
/// leading `#`.
///
/// ```
/// # use shadeshift::is_valid_hex;
/// assert!(is_valid_hex("#3B82F6"));
/// assert!(is_valid_hex("3b82f6"));
/// assert!(!is_valid_hex("#3B82F"));
/// assert!(!is_valid_hex("#3B82F6FF"));
/// ```
#[cfg_attr(feature = "pyffi", pyfunction)]
pub fn is_valid_hex(s: &str) -> bool {
    let digits = s.strip_prefix('#').unwrap_or(s);
    digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// Normalize the 6-digit hexadecimal color to its canonical form, i.e.,
/// uppercase with leading `#`. Surrounding white space is ignored.
#[cfg_attr(feature = "pyffi", pyfunction)]
pub fn normalize_hex(s: &str) -> Result<String, HexFormatError> {
    hex_to_rgb(s).map(rgb_to_hex)
}

/// Parse a 6-digit hexadecimal color with optional leading `#`.
///
/// An 8-digit color with alpha channel results in
/// [`HexFormatError::UnexpectedAlpha`]; use [`hex_to_rgba`] for such colors.
#[cfg_attr(feature = "pyffi", pyfunction)]
pub fn hex_to_rgb(s: &str) -> Result<Rgb, HexFormatError> {
    let digits = digits(s)?;
    match digits.len() {
        6 => {
            let [r, g, b] = parse_bytes::<3>(digits)?;
            Ok(Rgb::new(to_unit(r), to_unit(g), to_unit(b)))
        }
        8 => Err(HexFormatError::UnexpectedAlpha),
        n => Err(HexFormatError::UnexpectedLength(n)),
    }
}

/// Parse a 6- or 8-digit hexadecimal color with optional leading `#`. Colors
/// without alpha channel are fully opaque.
pub fn hex_to_rgba(s: &str) -> Result<(Rgb, Float), HexFormatError> {
    let digits = digits(s)?;
    match digits.len() {
        6 => Ok((hex_to_rgb(digits)?, 1.0)),
        8 => {
            let [r, g, b, a] = parse_bytes::<4>(digits)?;
            Ok((Rgb::new(to_unit(r), to_unit(g), to_unit(b)), to_unit(a)))
        }
        n => Err(HexFormatError::UnexpectedLength(n)),
    }
}

/// Format the color as 6-digit uppercase hexadecimal with leading `#`.
///
/// Components are clamped to `0..=1` and rounded to the nearest 1/255.
///
/// ```
/// # use shadeshift::{rgb_to_hex, Rgb};
/// assert_eq!(rgb_to_hex(Rgb::new(1.0, 0.5, 0.0)), "#FF8000");
/// ```
#[cfg_attr(feature = "pyffi", pyfunction)]
pub fn rgb_to_hex(color: Rgb) -> String {
    format!(
        "#{:02X}{:02X}{:02X}",
        to_byte(color.r),
        to_byte(color.g),
        to_byte(color.b)
    )
}

/// Format the color and alpha as 8-digit uppercase hexadecimal with leading
/// `#`.
pub fn rgba_to_hex(color: Rgb, alpha: Float) -> String {
    format!("{}{:02X}", rgb_to_hex(color), to_byte(alpha))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::assert_within;

    #[test]
    fn test_validation() {
        assert!(is_valid_hex("#000000"), "black");
        assert!(is_valid_hex("abcdef"), "no hash");
        assert!(!is_valid_hex("#abc"), "short form not accepted");
        assert!(!is_valid_hex("#abcdeg"), "bad digit");
        assert!(!is_valid_hex("##abcdef"), "double hash");
        assert!(!is_valid_hex(""), "empty");
    }

    #[test]
    fn test_parse() -> Result<(), HexFormatError> {
        let color = hex_to_rgb("#3B82F6")?;
        assert_eq!(color, Rgb::new(59.0 / 255.0, 130.0 / 255.0, 246.0 / 255.0), "blue");
        assert_eq!(hex_to_rgb(" 3b82f6 ")?, color, "lowercase, no hash");

        assert_eq!(hex_to_rgb("#12345"), Err(HexFormatError::UnexpectedLength(5)), "odd");
        assert_eq!(hex_to_rgb("#12345G"), Err(HexFormatError::MalformedDigits), "digit");
        assert_eq!(hex_to_rgb("#"), Err(HexFormatError::Empty), "empty");
        assert_eq!(hex_to_rgb("#11223344"), Err(HexFormatError::UnexpectedAlpha), "alpha");
        assert_eq!(hex_to_rgb("#ÄÄÄ"), Err(HexFormatError::MalformedDigits), "unicode");
        Ok(())
    }

    #[test]
    fn test_alpha() -> Result<(), HexFormatError> {
        let (color, alpha) = hex_to_rgba("#FF000080")?;
        assert_eq!(color, Rgb::new(1.0, 0.0, 0.0), "red");
        assert_within!(alpha, 128.0 / 255.0, 1e-12);
        assert_eq!(rgba_to_hex(color, alpha), "#FF000080", "round trip");

        let (_, alpha) = hex_to_rgba("#FF0000")?;
        assert_eq!(alpha, 1.0, "opaque");
        Ok(())
    }

    #[test]
    fn test_format() -> Result<(), HexFormatError> {
        assert_eq!(normalize_hex("3b82f6")?, "#3B82F6", "normalized");
        assert_eq!(rgb_to_hex(Rgb::new(-0.5, 2.0, 0.5)), "#00FF80", "clamped");

        // Exact to 1/255 for every byte
        for byte in 0..=255_u8 {
            let hex = format!("#{:02X}{:02X}{:02X}", byte, 255 - byte, byte / 2);
            assert_eq!(rgb_to_hex(hex_to_rgb(&hex)?), hex, "byte {}", byte);
        }
        Ok(())
    }
}
