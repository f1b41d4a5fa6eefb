//! CSS gradient string generation.
//!
//! Pure functions that turn a [`GradientConfig`] into CSS text: the raw
//! gradient expression and a minimal `.gradient { ... }` rule around it.
//! Every function is total and always yields a usable CSS string — an
//! empty stop list falls back to a black-to-white gradient.

use std::fmt::{self, Display};

use crate::color::ColorFormat;
use crate::stops::ColorStop;

/// The CSS gradient function to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientType {
    Linear,
    Radial,
    Conic,
}

impl GradientType {
    /// Short lowercase label for display.
    pub fn label(&self) -> &'static str {
        match self {
            GradientType::Linear => "linear",
            GradientType::Radial => "radial",
            GradientType::Conic => "conic",
        }
    }

    /// The next type in cycling order.
    pub fn cycle(&self) -> Self {
        match self {
            GradientType::Linear => GradientType::Radial,
            GradientType::Radial => GradientType::Conic,
            GradientType::Conic => GradientType::Linear,
        }
    }
}

impl Display for GradientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Axis direction for linear gradients, one of the eight compass
/// directions. Radial and conic gradients ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    TopLeft,
    Top,
    TopRight,
}

impl Direction {
    /// All directions in clockwise cycling order.
    pub const ALL: [Direction; 8] = [
        Direction::Right,
        Direction::BottomRight,
        Direction::Bottom,
        Direction::BottomLeft,
        Direction::Left,
        Direction::TopLeft,
        Direction::Top,
        Direction::TopRight,
    ];

    /// CSS keyword for this direction.
    pub fn css(&self) -> &'static str {
        match self {
            Direction::Right => "to right",
            Direction::BottomRight => "to bottom right",
            Direction::Bottom => "to bottom",
            Direction::BottomLeft => "to bottom left",
            Direction::Left => "to left",
            Direction::TopLeft => "to top left",
            Direction::Top => "to top",
            Direction::TopRight => "to top right",
        }
    }

    /// The next direction clockwise.
    pub fn cycle(&self) -> Self {
        match self {
            Direction::Right => Direction::BottomRight,
            Direction::BottomRight => Direction::Bottom,
            Direction::Bottom => Direction::BottomLeft,
            Direction::BottomLeft => Direction::Left,
            Direction::Left => Direction::TopLeft,
            Direction::TopLeft => Direction::Top,
            Direction::Top => Direction::TopRight,
            Direction::TopRight => Direction::Right,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css())
    }
}

/// Everything needed to emit a gradient: type, direction, and the color
/// stops.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientConfig {
    pub kind: GradientType,
    pub direction: Direction,
    pub colors: Vec<ColorStop>,
}

const FALLBACK_STOPS: &str = "#000000 0%, #ffffff 100%";

fn fallback(kind: GradientType) -> String {
    log::warn!("empty color stop list, emitting fallback {} gradient", kind);
    match kind {
        GradientType::Linear => format!("linear-gradient(to right, {})", FALLBACK_STOPS),
        GradientType::Radial => format!("radial-gradient(circle, {})", FALLBACK_STOPS),
        GradientType::Conic => format!("conic-gradient(from 0deg, {})", FALLBACK_STOPS),
    }
}

/// Stops sorted ascending by position, each formatted as
/// `<color> <position>%`, joined with `, `.
fn stop_list(colors: &[ColorStop], format: ColorFormat) -> String {
    let mut sorted = colors.to_vec();
    sorted.sort_by(|a, b| a.position.total_cmp(&b.position));

    sorted
        .iter()
        .map(|stop| format!("{} {}%", format.convert(&stop.color), stop.position))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `linear-gradient(<direction>, <stops>)`
pub fn linear_css(config: &GradientConfig, format: ColorFormat) -> String {
    if config.colors.is_empty() {
        return fallback(GradientType::Linear);
    }

    format!(
        "linear-gradient({}, {})",
        config.direction,
        stop_list(&config.colors, format)
    )
}

/// `radial-gradient(circle, <stops>)`
pub fn radial_css(config: &GradientConfig, format: ColorFormat) -> String {
    if config.colors.is_empty() {
        return fallback(GradientType::Radial);
    }

    format!(
        "radial-gradient(circle, {})",
        stop_list(&config.colors, format)
    )
}

/// `conic-gradient(from 0deg, <stops>)`
pub fn conic_css(config: &GradientConfig, format: ColorFormat) -> String {
    if config.colors.is_empty() {
        return fallback(GradientType::Conic);
    }

    format!(
        "conic-gradient(from 0deg, {})",
        stop_list(&config.colors, format)
    )
}

/// The gradient expression for the configured type.
///
/// An empty stop list yields the canonical linear black-to-white
/// fallback regardless of type.
pub fn css(config: &GradientConfig, format: ColorFormat) -> String {
    if config.colors.is_empty() {
        return fallback(GradientType::Linear);
    }

    match config.kind {
        GradientType::Linear => linear_css(config, format),
        GradientType::Radial => radial_css(config, format),
        GradientType::Conic => conic_css(config, format),
    }
}

/// The gradient wrapped in a minimal CSS rule.
pub fn full_css(config: &GradientConfig, format: ColorFormat) -> String {
    format!(
        ".gradient {{\n  background-image: {};\n}}",
        css(config, format)
    )
}
