//! Color representation and conversion.
//!
//! Provides the color machinery the gradient builder is made of:
//! - RGB color representation with hex parsing/formatting
//! - Color space conversions (RGB, HSL, HEX)
//! - CSS color string formatting (rgb/rgba/hsl/hsla)
//! - Random color generation
//! - Integration with ratatui for preview rendering

use rand::Rng;
use ratatui::style::Color as RatatuiColor;
use std::fmt::{self, Display};

/// An RGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Color {
    /// Create a new RGB color
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from unclamped channel values.
    ///
    /// Each channel is rounded to the nearest integer and clamped to
    /// [0, 255] before use.
    pub fn from_channels(r: f64, g: f64, b: f64) -> Self {
        Self::rgb(clamp_channel(r), clamp_channel(g), clamp_channel(b))
    }

    /// Parse a hexadecimal color string.
    ///
    /// Accepts exactly six hex digits with an optional leading `#`,
    /// case-insensitive. Returns `None` for anything else — 3-digit
    /// shorthand and 8-digit RGBA forms are rejected.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self::rgb(r, g, b))
    }

    /// Format as `#` followed by six lowercase, zero-padded hex digits.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Convert to HSL.
    ///
    /// Components are rounded to whole numbers: hue in 0–360, saturation
    /// and lightness in 0–100. Achromatic input (r = g = b) yields
    /// hue 0 and saturation 0.
    pub fn to_hsl(&self) -> Hsl {
        let r = self.r as f64 / 255.0;
        let g = self.g as f64 / 255.0;
        let b = self.b as f64 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);

        let l = (max + min) / 2.0;
        let mut h = 0.0;
        let mut s = 0.0;

        if max != min {
            let d = max - min;
            s = if l > 0.5 {
                d / (2.0 - max - min)
            } else {
                d / (max + min)
            };

            h = if max == r {
                (g - b) / d + if g < b { 6.0 } else { 0.0 }
            } else if max == g {
                (b - r) / d + 2.0
            } else {
                (r - g) / d + 4.0
            };

            h /= 6.0;
        }

        Hsl {
            h: (h * 360.0).round(),
            s: (s * 100.0).round(),
            l: (l * 100.0).round(),
        }
    }

    /// Create a color from HSL values, each channel rounded to the
    /// nearest integer in [0, 255].
    pub fn from_hsl(hsl: Hsl) -> Self {
        let h = hsl.h / 360.0;
        let s = hsl.s / 100.0;
        let l = hsl.l / 100.0;

        if s == 0.0 {
            // achromatic
            let v = l * 255.0;
            return Self::from_channels(v, v, v);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Self::from_channels(
            hue_to_rgb(p, q, h + 1.0 / 3.0) * 255.0,
            hue_to_rgb(p, q, h) * 255.0,
            hue_to_rgb(p, q, h - 1.0 / 3.0) * 255.0,
        )
    }

    /// Generate a uniformly random color, one random byte per channel.
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        Self::rgb(rng.gen(), rng.gen(), rng.gen())
    }

    /// Format as a CSS `rgba(...)` string with the given alpha.
    pub fn rgba_string(&self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }

    /// Rotates the hue by the given number of degrees, wrapping at 360
    pub fn rotate_hue(&self, degrees: f64) -> Self {
        let hsl = self.to_hsl();
        Self::from_hsl(Hsl {
            h: (hsl.h + degrees).rem_euclid(360.0),
            ..hsl
        })
    }

    /// Lightens the color by a percentage (0-100)
    pub fn lighten(&self, amount: f64) -> Self {
        let hsl = self.to_hsl();
        Self::from_hsl(Hsl {
            l: (hsl.l + amount).min(100.0),
            ..hsl
        })
    }

    /// Darkens the color by a percentage (0-100)
    pub fn darken(&self, amount: f64) -> Self {
        let hsl = self.to_hsl();
        Self::from_hsl(Hsl {
            l: (hsl.l - amount).max(0.0),
            ..hsl
        })
    }

    /// Adjusts the saturation by a percentage (-100 to 100)
    pub fn saturate(&self, amount: f64) -> Self {
        let hsl = self.to_hsl();
        Self::from_hsl(Hsl {
            s: (hsl.s + amount).clamp(0.0, 100.0),
            ..hsl
        })
    }

    /// Mix with another color by a specified amount (0.0-1.0)
    pub fn mix(&self, other: &Color, amount: f64) -> Self {
        let amount = amount.clamp(0.0, 1.0);
        Self::from_channels(
            self.r as f64 * (1.0 - amount) + other.r as f64 * amount,
            self.g as f64 * (1.0 - amount) + other.g as f64 * amount,
            self.b as f64 * (1.0 - amount) + other.b as f64 * amount,
        )
    }

    /// Convert to ratatui Color
    pub fn to_ratatui(&self) -> RatatuiColor {
        RatatuiColor::Rgb(self.r, self.g, self.b)
    }

    /// Get the RGB components
    pub fn rgb_components(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

impl From<Color> for RatatuiColor {
    fn from(color: Color) -> Self {
        color.to_ratatui()
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

fn clamp_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

/// A color in HSL space: hue in degrees (0–360), saturation and
/// lightness as percentages (0–100).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    /// Format as a CSS `hsla(...)` string with the given alpha.
    pub fn hsla_string(&self, alpha: f64) -> String {
        format!("hsla({}, {}%, {}%, {})", self.h, self.s, self.l, alpha)
    }
}

impl Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.h, self.s, self.l)
    }
}

/// The textual representation used when emitting CSS color values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorFormat {
    Hex,
    Rgb,
    Rgba,
    Hsl,
    Hsla,
}

impl ColorFormat {
    /// All formats in cycling order.
    pub const ALL: [ColorFormat; 5] = [
        ColorFormat::Hex,
        ColorFormat::Rgb,
        ColorFormat::Rgba,
        ColorFormat::Hsl,
        ColorFormat::Hsla,
    ];

    /// Short lowercase label for display.
    pub fn label(&self) -> &'static str {
        match self {
            ColorFormat::Hex => "hex",
            ColorFormat::Rgb => "rgb",
            ColorFormat::Rgba => "rgba",
            ColorFormat::Hsl => "hsl",
            ColorFormat::Hsla => "hsla",
        }
    }

    /// The next format in cycling order.
    pub fn cycle(&self) -> Self {
        match self {
            ColorFormat::Hex => ColorFormat::Rgb,
            ColorFormat::Rgb => ColorFormat::Rgba,
            ColorFormat::Rgba => ColorFormat::Hsl,
            ColorFormat::Hsl => ColorFormat::Hsla,
            ColorFormat::Hsla => ColorFormat::Hex,
        }
    }

    /// Convert a hex color string into this format.
    ///
    /// `Hex` echoes the input unchanged. The decomposing formats parse
    /// the hex first and return an empty string when it is malformed.
    pub fn convert(&self, hex: &str) -> String {
        match self {
            ColorFormat::Hex => hex.to_string(),
            ColorFormat::Rgb => match Color::from_hex(hex) {
                Some(color) => color.to_string(),
                None => String::new(),
            },
            ColorFormat::Rgba => match Color::from_hex(hex) {
                Some(color) => color.rgba_string(1.0),
                None => String::new(),
            },
            ColorFormat::Hsl => match Color::from_hex(hex) {
                Some(color) => color.to_hsl().to_string(),
                None => String::new(),
            },
            ColorFormat::Hsla => match Color::from_hex(hex) {
                Some(color) => color.to_hsl().hsla_string(1.0),
                None => String::new(),
            },
        }
    }
}

impl Display for ColorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// UI chrome color constants
pub mod theme {
    use super::Color;

    /// Background surfaces
    pub mod background {
        use super::Color;

        pub const BASE: Color = Color::rgb(15, 18, 20); // #0F1214
        pub const PANEL: Color = Color::rgb(22, 27, 30); // #161B1E
    }

    /// Text hierarchy
    pub mod text {
        use super::Color;

        pub const PRIMARY: Color = Color::rgb(230, 237, 243); // #E6EDF3
        pub const SECONDARY: Color = Color::rgb(139, 148, 158); // #8B949E
        pub const DISABLED: Color = Color::rgb(106, 115, 125); // #6A737D
    }

    /// Accent colors
    pub mod accent {
        use super::Color;

        pub const GREEN: Color = Color::rgb(0, 228, 154); // #00E49A
        pub const PURPLE: Color = Color::rgb(184, 110, 255); // #B86EFF
    }

    /// Status colors
    pub mod status {
        use super::Color;

        pub const SUCCESS: Color = Color::rgb(35, 209, 139); // #23D18B
        pub const ERROR: Color = Color::rgb(255, 46, 95); // #FF2E5F
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_hex_roundtrip() {
        for hex in ["#ff8000", "#000000", "#ffffff", "#00e49a", "#b86eff"] {
            let color = Color::from_hex(hex).unwrap();
            assert_eq!(color.to_hex(), hex);
        }
    }

    #[test]
    fn test_hex_normalization() {
        // case-insensitive, optional '#', output always lowercase with '#'
        assert_eq!(Color::from_hex("FF8000").unwrap().to_hex(), "#ff8000");
        assert_eq!(Color::from_hex("#AbCdEf").unwrap().to_hex(), "#abcdef");
    }

    #[test]
    fn test_hex_rejects_malformed() {
        assert_eq!(Color::from_hex("zzzzzz"), None);
        assert_eq!(Color::from_hex("#fff"), None);
        assert_eq!(Color::from_hex("#ff8000aa"), None);
        assert_eq!(Color::from_hex(""), None);
        assert_eq!(Color::from_hex("#ff80g0"), None);
        assert_eq!(Color::from_hex("##ff8000"), None);
    }

    #[test]
    fn test_channel_clamping() {
        let color = Color::from_channels(-20.0, 128.4, 300.0);
        assert_eq!(color.rgb_components(), (0, 128, 255));
    }

    #[test]
    fn test_hsl_known_values() {
        assert_eq!(
            Color::rgb(255, 0, 0).to_hsl(),
            Hsl {
                h: 0.0,
                s: 100.0,
                l: 50.0
            }
        );
        assert_eq!(
            Color::rgb(0, 0, 255).to_hsl(),
            Hsl {
                h: 240.0,
                s: 100.0,
                l: 50.0
            }
        );
    }

    #[test]
    fn test_hsl_achromatic() {
        let hsl = Color::rgb(128, 128, 128).to_hsl();
        assert_eq!(hsl.h, 0.0);
        assert_eq!(hsl.s, 0.0);
    }

    #[test]
    fn test_hsl_roundtrip_tolerance() {
        let samples = [
            Color::rgb(255, 128, 0),
            Color::rgb(12, 200, 97),
            Color::rgb(3, 3, 3),
            Color::rgb(240, 10, 220),
            Color::rgb(90, 90, 91),
        ];

        for color in samples {
            let back = Color::from_hsl(color.to_hsl());
            let (r1, g1, b1) = color.rgb_components();
            let (r2, g2, b2) = back.rgb_components();
            assert!(
                (r1 as i16 - r2 as i16).abs() <= 1
                    && (g1 as i16 - g2 as i16).abs() <= 1
                    && (b1 as i16 - b2 as i16).abs() <= 1,
                "roundtrip of {} drifted to {}",
                color.to_hex(),
                back.to_hex()
            );
        }
    }

    #[test]
    fn test_css_strings() {
        let color = Color::rgb(255, 0, 0);
        assert_eq!(color.to_string(), "rgb(255, 0, 0)");
        assert_eq!(color.rgba_string(1.0), "rgba(255, 0, 0, 1)");
        assert_eq!(color.rgba_string(0.5), "rgba(255, 0, 0, 0.5)");

        let hsl = color.to_hsl();
        assert_eq!(hsl.to_string(), "hsl(0, 100%, 50%)");
        assert_eq!(hsl.hsla_string(1.0), "hsla(0, 100%, 50%, 1)");
    }

    #[test]
    fn test_format_conversion() {
        assert_eq!(ColorFormat::Hex.convert("#ff0000"), "#ff0000");
        assert_eq!(ColorFormat::Rgb.convert("#ff0000"), "rgb(255, 0, 0)");
        assert_eq!(ColorFormat::Rgba.convert("#ff0000"), "rgba(255, 0, 0, 1)");
        assert_eq!(ColorFormat::Hsl.convert("#ff0000"), "hsl(0, 100%, 50%)");
        assert_eq!(
            ColorFormat::Hsla.convert("#ff0000"),
            "hsla(0, 100%, 50%, 1)"
        );
    }

    #[test]
    fn test_format_conversion_malformed() {
        // hex passes malformed input through unchanged; the decomposing
        // formats return an empty string
        assert_eq!(ColorFormat::Hex.convert("zzzzzz"), "zzzzzz");
        assert_eq!(ColorFormat::Rgb.convert("zzzzzz"), "");
        assert_eq!(ColorFormat::Rgba.convert("zzzzzz"), "");
        assert_eq!(ColorFormat::Hsl.convert("zzzzzz"), "");
        assert_eq!(ColorFormat::Hsla.convert("zzzzzz"), "");
    }

    #[test]
    fn test_format_cycle_covers_all() {
        let mut format = ColorFormat::Hex;
        for expected in ColorFormat::ALL.iter().cycle().skip(1).take(5) {
            format = format.cycle();
            assert_eq!(format, *expected);
        }
        assert_eq!(format, ColorFormat::Hex);
    }

    #[test]
    fn test_mix() {
        let black = Color::rgb(0, 0, 0);
        let white = Color::rgb(255, 255, 255);
        assert_eq!(black.mix(&white, 0.0), black);
        assert_eq!(black.mix(&white, 1.0), white);
        assert_eq!(black.mix(&white, 0.5).rgb_components(), (128, 128, 128));
    }

    #[test]
    fn test_hue_rotation_wraps() {
        let color = Color::rgb(255, 0, 0);
        let rotated = color.rotate_hue(360.0);
        let (r, g, b) = rotated.rgb_components();
        assert!((r as i16 - 255).abs() <= 1 && g <= 1 && b <= 1);
    }

    #[test]
    fn test_lighten_darken() {
        let color = Color::rgb(120, 40, 200);
        assert!(color.lighten(20.0).to_hsl().l > color.to_hsl().l);
        assert!(color.darken(20.0).to_hsl().l < color.to_hsl().l);
        // clamped at the extremes
        assert_eq!(color.lighten(200.0).to_hsl().l, 100.0);
        assert_eq!(color.darken(200.0).to_hsl().l, 0.0);
    }

    #[test]
    fn test_random_is_well_formed() {
        for _ in 0..16 {
            let hex = Color::random().to_hex();
            assert_eq!(hex.len(), 7);
            assert!(hex.starts_with('#'));
            assert!(Color::from_hex(&hex).is_some());
        }
    }
}
