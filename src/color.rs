use palette::{Hsl, IntoColor, Srgb};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Gradient applied along the curve parameter (0.0 at t = 0, 1.0 at the
/// final sample).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Spectrum,
    Rainbow,
    Fire,
    Ocean,
    Monochrome,
}

impl FromStr for ColorScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "spectrum" => Ok(Self::Spectrum),
            "rainbow" => Ok(Self::Rainbow),
            "fire" => Ok(Self::Fire),
            "ocean" => Ok(Self::Ocean),
            "mono" | "monochrome" => Ok(Self::Monochrome),
            _ => Err(format!("Unknown color scheme: {}", s)),
        }
    }
}

impl ColorScheme {
    /// Color for a position along the curve (0.0 to 1.0).
    pub fn curve_color(&self, position: f32) -> (u8, u8, u8) {
        let position = position.clamp(0.0, 1.0);
        let (h, s, l) = match self {
            ColorScheme::Spectrum => {
                // Purple -> blue -> cyan -> green -> yellow -> red
                (270.0 - position * 270.0, 0.9, 0.55)
            }
            ColorScheme::Rainbow => (position * 360.0, 0.85, 0.55),
            ColorScheme::Fire => {
                // Red -> orange -> yellow
                (position * 60.0, 0.95, 0.5)
            }
            ColorScheme::Ocean => {
                // Deep blue -> cyan -> teal
                (180.0 + position * 60.0, 0.8, 0.5)
            }
            ColorScheme::Monochrome => (0.0, 0.0, 0.8),
        };

        let hsl = Hsl::new(h, s, l);
        let rgb: Srgb = hsl.into_color();
        (
            (rgb.red * 255.0) as u8,
            (rgb.green * 255.0) as u8,
            (rgb.blue * 255.0) as u8,
        )
    }

    /// High-contrast color for the animated marker.
    pub fn marker_color(&self) -> (u8, u8, u8) {
        match self {
            ColorScheme::Fire => (255, 255, 160),
            ColorScheme::Monochrome => (255, 255, 255),
            _ => (255, 80, 80),
        }
    }

    pub fn all() -> &'static [ColorScheme] {
        &[
            ColorScheme::Spectrum,
            ColorScheme::Rainbow,
            ColorScheme::Fire,
            ColorScheme::Ocean,
            ColorScheme::Monochrome,
        ]
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        let current = all.iter().position(|c| c == self).unwrap_or(0);
        all[(current + 1) % all.len()]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColorScheme::Spectrum => "spectrum",
            ColorScheme::Rainbow => "rainbow",
            ColorScheme::Fire => "fire",
            ColorScheme::Ocean => "ocean",
            ColorScheme::Monochrome => "monochrome",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_schemes() {
        assert_eq!("rainbow".parse::<ColorScheme>(), Ok(ColorScheme::Rainbow));
        assert_eq!("MONO".parse::<ColorScheme>(), Ok(ColorScheme::Monochrome));
        assert!("plasma".parse::<ColorScheme>().is_err());
    }

    #[test]
    fn next_cycles_through_all_schemes() {
        let mut scheme = ColorScheme::Spectrum;
        for _ in 0..ColorScheme::all().len() {
            scheme = scheme.next();
        }
        assert_eq!(scheme, ColorScheme::Spectrum);
    }

    #[test]
    fn curve_color_clamps_position() {
        let scheme = ColorScheme::Rainbow;
        assert_eq!(scheme.curve_color(-1.0), scheme.curve_color(0.0));
        assert_eq!(scheme.curve_color(2.0), scheme.curve_color(1.0));
    }
}
