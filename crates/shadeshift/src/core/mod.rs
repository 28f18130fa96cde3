mod cam16;
mod contrast;
mod conversion;
mod equality;
mod gamut;
mod hue;
mod math;
mod string;

// cam16
pub use cam16::{
    cam16_hue, corrected_hue, corrected_hue_with, ViewingConditions, D65_WHITE, MAX_HUE_DRIFT,
};

// contrast
pub use contrast::{
    apca_contrast, composite, solve_lightness_for_apca, wcag_contrast, wcag_luminance,
    FillDirection,
};

// conversion
pub use conversion::{linear_to_srgb, oklch_to_rgb, oklch_to_rgb_raw, rgb_to_oklch, srgb_to_linear};

// equality
pub use equality::{to_eq_bits, ACHROMATIC_THRESHOLD};
pub(crate) use equality::is_achromatic_chroma;

// gamut
pub(crate) use gamut::gamut_headroom;
pub use gamut::{
    clamp_chroma_to_gamut, cusp_lightness, in_gamut, max_chroma_at, GAMUT_EPSILON, MAX_CHROMA,
};

// hue
pub use hue::{clockwise_distance, hue_delta, normalize_hue, signed_hue_delta};

// math
pub(crate) use math::{bisect, mean, median, std_dev, Accumulator, FloatExt};

// string
pub use string::{hex_to_rgb, hex_to_rgba, is_valid_hex, normalize_hex, rgb_to_hex, rgba_to_hex};
