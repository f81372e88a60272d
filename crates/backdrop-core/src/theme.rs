//! Colour palettes for the dark and light site themes.

use std::fmt;
use std::str::FromStr;

use crate::error::BackdropError;

/// 8-bit RGB colour with a floating point alpha, matching CSS `rgba()`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Same colour with alpha replaced; alpha is clamped to \[0, 1\].
    #[inline]
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// `#rrggbb` form used for DOM background colours.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {:.3})", self.r, self.g, self.b, self.a)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl FromStr for Theme {
    type Err = BackdropError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            _ => Err(BackdropError::invalid("theme", s, "expected `dark` or `light`")),
        }
    }
}

// #80808018
const GRID_LINE: Rgba = Rgba::new(0x80, 0x80, 0x80, 0.094);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub node: Rgba,
    /// Edge colour; alpha is replaced per edge.
    pub edge: Rgba,
    pub orbs: [Rgba; 3],
    /// Line colour of the static 32 px grid under everything else.
    pub grid_line: Rgba,
    pub grid_opacity: f32,
    /// Outer colour of the radial vignette drawn over the field.
    pub vignette: Rgba,
}

impl Theme {
    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                node: Rgba::new(100, 200, 255, 0.8),
                edge: Rgba::rgb(100, 200, 255),
                orbs: [
                    Rgba::rgb(0x08, 0x91, 0xb2), // cyan-600
                    Rgba::rgb(0x25, 0x63, 0xeb), // blue-600
                    Rgba::rgb(0x93, 0x33, 0xea), // purple-600
                ],
                grid_line: GRID_LINE,
                grid_opacity: 1.0,
                vignette: Rgba::new(10, 10, 10, 0.5),
            },
            Theme::Light => Palette {
                node: Rgba::new(30, 30, 30, 0.6),
                edge: Rgba::rgb(0, 50, 200),
                orbs: [
                    Rgba::rgb(0x22, 0xd3, 0xee), // cyan-400
                    Rgba::rgb(0x60, 0xa5, 0xfa), // blue-400
                    Rgba::rgb(0xc0, 0x84, 0xfc), // purple-400
                ],
                grid_line: GRID_LINE,
                grid_opacity: 0.4,
                vignette: Rgba::new(255, 255, 255, 0.3),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_formatting() {
        assert_eq!(
            Rgba::new(100, 200, 255, 0.8).to_string(),
            "rgba(100, 200, 255, 0.800)"
        );
        assert_eq!(Rgba::rgb(0x25, 0x63, 0xeb).hex(), "#2563eb");
    }

    #[test]
    fn with_alpha_clamps() {
        let c = Rgba::rgb(1, 2, 3);
        assert_eq!(c.with_alpha(1.7).a, 1.0);
        assert_eq!(c.with_alpha(-0.2).a, 0.0);
    }

    #[test]
    fn theme_parses_case_insensitively() {
        assert_eq!("Light".parse::<Theme>(), Ok(Theme::Light));
        assert_eq!(" dark ".parse::<Theme>(), Ok(Theme::Dark));
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn light_theme_fades_the_grid() {
        let dark = Theme::Dark.palette();
        let light = Theme::Light.palette();
        assert_eq!(dark.grid_line, light.grid_line);
        assert!(light.grid_opacity < dark.grid_opacity);
        assert_eq!(dark.vignette.to_string(), "rgba(10, 10, 10, 0.500)");
        assert_eq!(light.vignette.to_string(), "rgba(255, 255, 255, 0.300)");
    }
}
