//! Utility module with shadeshift's errors.
//!
//! Only malformed input is modeled as an error. The numeric functions assume
//! well-formed inputs and all searches run for a fixed number of iterations,
//! so there is no failure to converge.

#[cfg(feature = "pyffi")]
use pyo3::{exceptions::PyValueError, prelude::*};

/// An erroneous hexadecimal color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HexFormatError {
    /// A color without any digits, e.g., the empty string or a lone `#`.
    Empty,

    /// A color with the wrong number of digits. Only six digits, or eight
    /// digits for colors with alpha channel, are valid. The variant carries
    /// the actual number of digits.
    UnexpectedLength(usize),

    /// A color with characters other than hexadecimal digits. For example,
    /// `#12345G` has the correct length but contains an unsuitable character.
    MalformedDigits,

    /// An eight-digit color with alpha channel where only six digits are
    /// accepted.
    UnexpectedAlpha,
}

impl core::fmt::Display for HexFormatError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use HexFormatError::*;

        match *self {
            Empty => f.write_str("hex color should have digits but has none"),
            UnexpectedLength(n) => f.write_fmt(format_args!(
                "hex color should have 6 or 8 digits but has {}",
                n
            )),
            MalformedDigits => {
                f.write_str("hex color should contain only hexadecimal digits but does not")
            }
            UnexpectedAlpha => {
                f.write_str("hex color should have 6 digits but has 8 digits with alpha")
            }
        }
    }
}

impl std::error::Error for HexFormatError {}

#[cfg(feature = "pyffi")]
impl From<HexFormatError> for PyErr {
    fn from(value: HexFormatError) -> Self {
        PyValueError::new_err(value.to_string())
    }
}

// ====================================================================================================================

/// An unknown shade level.
///
/// Valid levels are 50, 100, 200, 300, 400, and 500.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShadeLevelError {
    pub value: u16,
}

impl core::fmt::Display for ShadeLevelError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_fmt(format_args!(
            "{} is not a shade level, which are 50, 100, 200, 300, 400, and 500",
            self.value
        ))
    }
}

impl std::error::Error for ShadeLevelError {}

#[cfg(feature = "pyffi")]
impl From<ShadeLevelError> for PyErr {
    fn from(value: ShadeLevelError) -> Self {
        pyo3::exceptions::PyIndexError::new_err(value.to_string())
    }
}
