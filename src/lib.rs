#![forbid(unsafe_code)]

//! # Tintty
//!
//! A terminal UI for visually building CSS gradients.
//!
//! ## Overview
//!
//! Pick two to five colors, slide them along the gradient axis, choose
//! a gradient type and direction, and copy the resulting CSS straight
//! to the clipboard. The crate is built around a few main concepts:
//!
//! - **Snapshot State Management**: every mutation replaces the stop
//!   collection, every frame renders one immutable snapshot
//! - **Event-Driven Architecture**: non-blocking event processing with
//!   application-scheduled timer events
//! - **Pure Gradient Core**: color conversion and CSS generation are
//!   total functions with no shared state
//! - **Async-First Design**: built on `smol` for the event pump and the
//!   copy-feedback timer
//!
//! ## Core Components
//!
//! - [`App`]: Main application orchestrator coordinating state, events,
//!   and rendering
//! - [`Tui`]: Terminal interface manager handling setup, cleanup, and
//!   rendering
//! - [`EventHandler`]: Async event processing system
//! - [`BuilderState`]: The gradient builder's session state
//! - [`StopSet`]: Ordered color-stop collection with count bounds
//! - [`Color`]: RGB/HSL/hex color conversion and formatting
//! - [`gradient`]: CSS gradient string generation
//!
//! ## Library Usage
//!
//! The gradient core works without a terminal:
//!
//! ```rust
//! use tintty::{gradient, ColorFormat, Direction, GradientConfig, GradientType, StopSet};
//!
//! let stops = StopSet::new(3);
//! let config = GradientConfig {
//!     kind: GradientType::Linear,
//!     direction: Direction::Right,
//!     colors: stops.sorted(),
//! };
//!
//! let css = gradient::css(&config, ColorFormat::Hex);
//! assert!(css.starts_with("linear-gradient(to right, "));
//! ```
//!
//! ## Running the Builder
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use tintty::{App, BuilderState, TinttyResult};
//!
//! fn main() -> TinttyResult<()> {
//!     smol::block_on(async {
//!         let mut app = App::new(BuilderState::new(3), Duration::from_millis(50))?;
//!         app.run().await
//!     })
//! }
//! ```
//!
//! ## Error Handling
//!
//! Platform boundaries (terminal, clipboard, channels) use
//! [`TinttyResult`] and [`TinttyError`] with detailed diagnostics via
//! `miette`. The color and gradient core never errors: malformed color
//! input degrades to `None` or an empty string, and CSS generation
//! always yields a renderable fallback.

/// Re-exports of core components
pub use app::App;
pub use color::{Color, ColorFormat, Hsl};
pub use error::{TinttyError, TinttyResult};
pub use event::{Event, EventHandler};
pub use gradient::{Direction, GradientConfig, GradientType};
pub use state::{AtomicState, BuilderSnapshot, BuilderState, StateSnapshot};
pub use stops::{ColorStop, StopSet, MAX_STOPS, MIN_STOPS};
pub use tui::Tui;

/// Application orchestration and the key map
pub mod app;
/// System clipboard bridge
pub mod clipboard;
/// Color representation, conversion, and formatting
pub mod color;
/// Error types and handling
pub mod error;
/// Event processing system
pub mod event;
/// CSS gradient string generation
pub mod gradient;
/// Logger initialization
pub mod logging;
/// Builder session state and snapshots
pub mod state;
/// Color-stop collection management
pub mod stops;
/// Terminal interface management
pub mod tui;
/// Builder screen rendering
pub mod ui;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_flow() {
        let state = BuilderState::new(3);
        state.cycle_kind(); // radial
        state.cycle_format(); // rgb

        let snapshot = state.snapshot();
        let css = snapshot.gradient_css();
        assert!(css.starts_with("radial-gradient(circle, "));
        assert!(css.contains("rgb("));
        assert!(css.ends_with("100%)"));

        let rule = snapshot.full_css();
        assert!(rule.starts_with(".gradient {\n  background-image: "));
        assert!(rule.ends_with(";\n}"));
    }

    #[test]
    fn test_snapshots_are_detached_values() {
        let state = BuilderState::new(2);
        let original = state.snapshot().stops.stops()[0].color.clone();

        // editing a snapshot's stop collection never reaches the live
        // session
        let mut cloned = state.snapshot().stops;
        let id = cloned.stops()[0].id.clone();
        cloned.update_color(&id, "#123456");

        assert_eq!(cloned.stops()[0].color, "#123456");
        assert_eq!(state.snapshot().stops.stops()[0].color, original);
    }
}
