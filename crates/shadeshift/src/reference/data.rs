#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

use crate::core::{oklch_to_rgb, rgb_to_hex};
use crate::{Float, Oklch};

/// A published design system with a palette of named hue families.
#[cfg_attr(
    feature = "pyffi",
    pyclass(eq, eq_int, frozen, hash, module = "shadeshift")
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ReferenceSystem {
    /// [Tailwind CSS](https://tailwindcss.com/docs/colors), version 4, at
    /// shade 500.
    Tailwind,
    /// [Radix Colors](https://www.radix-ui.com/colors) at step 9.
    Radix,
    /// Adobe's [Spectrum](https://spectrum.adobe.com/page/color-palette/)
    /// at shade 900.
    Spectrum,
}

impl ReferenceSystem {
    /// All reference systems, in the order they break ties.
    pub const ALL: [ReferenceSystem; 3] = [Self::Tailwind, Self::Radix, Self::Spectrum];

    /// Get this system's palette.
    pub const fn entries(&self) -> &'static [ReferenceEntry] {
        match *self {
            Self::Tailwind => TAILWIND,
            Self::Radix => RADIX,
            Self::Spectrum => SPECTRUM,
        }
    }
}

#[cfg_attr(feature = "pyffi", pymethods)]
impl ReferenceSystem {
    /// Get this system's name.
    pub const fn name(&self) -> &'static str {
        match *self {
            Self::Tailwind => "Tailwind",
            Self::Radix => "Radix",
            Self::Spectrum => "Spectrum",
        }
    }
}

impl core::fmt::Display for ReferenceSystem {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// A hue family of a reference system.
///
/// Coordinates are in Oklch and describe the family's representative shade.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReferenceEntry {
    pub name: &'static str,
    pub hue: Float,
    pub chroma: Float,
    pub lightness: Float,
}

impl ReferenceEntry {
    const fn new(name: &'static str, hue: Float, chroma: Float, lightness: Float) -> Self {
        Self {
            name,
            hue,
            chroma,
            lightness,
        }
    }

    /// Get this entry's Oklch color.
    pub const fn oklch(&self) -> Oklch {
        Oklch::new(self.lightness, self.chroma, self.hue)
    }

    /// Get this entry's color in hexadecimal, after clipping it to sRGB.
    pub fn hex(&self) -> String {
        rgb_to_hex(oklch_to_rgb(self.oklch()))
    }
}

// --------------------------------------------------------------------------------------------------------------------

#[rustfmt::skip]
const TAILWIND: &[ReferenceEntry] = &[
    ReferenceEntry::new("Red",      25.331, 0.237, 0.637),
    ReferenceEntry::new("Orange",   47.604, 0.213, 0.705),
    ReferenceEntry::new("Amber",    70.080, 0.188, 0.769),
    ReferenceEntry::new("Yellow",   86.047, 0.184, 0.795),
    ReferenceEntry::new("Lime",    130.850, 0.233, 0.768),
    ReferenceEntry::new("Green",   149.579, 0.219, 0.723),
    ReferenceEntry::new("Emerald", 162.480, 0.170, 0.696),
    ReferenceEntry::new("Teal",    182.503, 0.140, 0.704),
    ReferenceEntry::new("Cyan",    215.221, 0.143, 0.715),
    ReferenceEntry::new("Sky",     237.323, 0.169, 0.685),
    ReferenceEntry::new("Blue",    259.815, 0.214, 0.623),
    ReferenceEntry::new("Indigo",  277.117, 0.233, 0.585),
    ReferenceEntry::new("Violet",  292.717, 0.250, 0.606),
    ReferenceEntry::new("Purple",  303.900, 0.265, 0.627),
    ReferenceEntry::new("Fuchsia", 322.150, 0.295, 0.667),
    ReferenceEntry::new("Pink",    354.308, 0.241, 0.656),
    ReferenceEntry::new("Rose",     16.439, 0.246, 0.645),
];

#[rustfmt::skip]
const RADIX: &[ReferenceEntry] = &[
    ReferenceEntry::new("Tomato",   33.339, 0.194, 0.627),
    ReferenceEntry::new("Red",      23.026, 0.193, 0.626),
    ReferenceEntry::new("Ruby",     13.150, 0.195, 0.628),
    ReferenceEntry::new("Crimson",   1.276, 0.213, 0.634),
    ReferenceEntry::new("Pink",    346.003, 0.208, 0.617),
    ReferenceEntry::new("Plum",    322.107, 0.188, 0.579),
    ReferenceEntry::new("Purple",  305.860, 0.183, 0.556),
    ReferenceEntry::new("Violet",  288.033, 0.179, 0.542),
    ReferenceEntry::new("Iris",    278.285, 0.184, 0.540),
    ReferenceEntry::new("Indigo",  267.005, 0.191, 0.544),
    ReferenceEntry::new("Blue",    251.780, 0.193, 0.649),
    ReferenceEntry::new("Cyan",    221.744, 0.122, 0.660),
    ReferenceEntry::new("Teal",    181.963, 0.114, 0.649),
    ReferenceEntry::new("Jade",    170.730, 0.115, 0.642),
    ReferenceEntry::new("Green",   157.680, 0.133, 0.641),
    ReferenceEntry::new("Grass",   147.392, 0.147, 0.651),
    ReferenceEntry::new("Brown",    60.984, 0.078, 0.633),
    ReferenceEntry::new("Orange",   45.015, 0.191, 0.691),
    ReferenceEntry::new("Amber",    84.130, 0.157, 0.854),
    ReferenceEntry::new("Yellow",  100.936, 0.184, 0.918),
    ReferenceEntry::new("Lime",    126.089, 0.175, 0.887),
    ReferenceEntry::new("Mint",    177.978, 0.100, 0.870),
    ReferenceEntry::new("Sky",     217.804, 0.103, 0.861),
];

#[rustfmt::skip]
const SPECTRUM: &[ReferenceEntry] = &[
    ReferenceEntry::new("Red",         23.309, 0.196, 0.584),
    ReferenceEntry::new("Orange",      59.464, 0.155, 0.674),
    ReferenceEntry::new("Yellow",      96.895, 0.167, 0.808),
    ReferenceEntry::new("Chartreuse", 133.366, 0.187, 0.781),
    ReferenceEntry::new("Celery",     146.350, 0.169, 0.687),
    ReferenceEntry::new("Green",      166.457, 0.107, 0.580),
    ReferenceEntry::new("Seafoam",    199.298, 0.099, 0.611),
    ReferenceEntry::new("Cyan",       239.209, 0.130, 0.600),
    ReferenceEntry::new("Blue",       257.107, 0.193, 0.571),
    ReferenceEntry::new("Indigo",     278.508, 0.195, 0.586),
    ReferenceEntry::new("Purple",     298.519, 0.238, 0.553),
    ReferenceEntry::new("Fuchsia",    324.419, 0.236, 0.600),
    ReferenceEntry::new("Magenta",    351.593, 0.211, 0.606),
];

#[cfg(test)]
mod test {
    use super::{ReferenceSystem, RADIX, SPECTRUM, TAILWIND};

    #[test]
    fn test_tables() {
        assert_eq!(TAILWIND.len(), 17, "Tailwind families");
        assert_eq!(RADIX.len(), 23, "Radix families");
        assert_eq!(SPECTRUM.len(), 13, "Spectrum families");

        for system in ReferenceSystem::ALL {
            for entry in system.entries() {
                assert!((0.0..360.0).contains(&entry.hue), "{} {} hue", system, entry.name);
                assert!(entry.chroma > 0.05, "{} {} chroma", system, entry.name);
                assert!(
                    (0.0..=1.0).contains(&entry.lightness),
                    "{} {} lightness",
                    system,
                    entry.name
                );
            }
        }
    }

    #[test]
    fn test_hex() {
        let blue = TAILWIND
            .iter()
            .find(|entry| entry.name == "Blue")
            .map(|entry| entry.hex());
        assert_eq!(blue.as_deref(), Some("#2B7FFF"), "Tailwind Blue 500");
    }
}
