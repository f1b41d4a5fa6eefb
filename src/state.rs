//! State management: snapshot traits and the builder session state.
//!
//! Mutations go through [`BuilderState`] methods that lock the session,
//! delegate to the stop collection or gradient settings, and store the
//! replaced value. Renderers only ever see an immutable
//! [`BuilderSnapshot`], so a frame is always drawn from one consistent
//! state.

use std::fmt::Debug;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex, MutexGuard,
};

use crate::color::{Color, ColorFormat};
use crate::gradient::{self, Direction, GradientConfig, GradientType};
use crate::stops::StopSet;

/// Represents an immutable snapshot of application state
pub trait StateSnapshot: Clone + Send + Debug + 'static {
    /// Returns whether the application should quit
    fn should_quit(&self) -> bool;
}

/// Represents a thread-safe atomic application state
pub trait AtomicState: Send + Sync + Debug + 'static {
    /// The type of snapshot this state produces
    type Snapshot: StateSnapshot;

    /// Take a consistent snapshot of the current state
    fn snapshot(&self) -> Self::Snapshot;

    /// Signal the application to quit
    fn quit(&self);

    /// Check if the application is still running
    fn is_running(&self) -> bool;
}

/// Everything the builder session tracks between renders.
#[derive(Debug)]
struct Session {
    stops: StopSet,
    kind: GradientType,
    direction: Direction,
    format: ColorFormat,
    selected: usize,
    copied: bool,
    copy_epoch: u64,
}

/// The gradient builder's application state.
#[derive(Debug)]
pub struct BuilderState {
    running: AtomicBool,
    session: Mutex<Session>,
}

impl BuilderState {
    /// Create a session with `initial_count` stops (clamped to [2, 5]),
    /// a linear to-right gradient, and hex output.
    pub fn new(initial_count: usize) -> Self {
        Self {
            running: AtomicBool::new(true),
            session: Mutex::new(Session {
                stops: StopSet::new(initial_count),
                kind: GradientType::Linear,
                direction: Direction::Right,
                format: ColorFormat::Hex,
                selected: 0,
                copied: false,
                copy_epoch: 0,
            }),
        }
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        match self.session.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Select the next stop, wrapping past the end.
    pub fn select_next(&self) {
        let mut session = self.session();
        session.selected = (session.selected + 1) % session.stops.len();
    }

    /// Select the previous stop, wrapping past the start.
    pub fn select_prev(&self) {
        let mut session = self.session();
        let len = session.stops.len();
        session.selected = (session.selected + len - 1) % len;
    }

    /// Add a stop, saturating at the maximum count.
    pub fn increase_count(&self) {
        let mut session = self.session();
        let target = session.stops.len() + 1;
        session.stops.set_count(target);
        session.selected = session.selected.min(session.stops.len() - 1);
    }

    /// Remove a stop, saturating at the minimum count.
    pub fn decrease_count(&self) {
        let mut session = self.session();
        let target = session.stops.len().saturating_sub(1);
        session.stops.set_count(target);
        session.selected = session.selected.min(session.stops.len() - 1);
    }

    /// Space all stops evenly along the axis.
    pub fn redistribute(&self) {
        self.session().stops.redistribute();
    }

    /// Flip the fixed flag on the selected stop.
    pub fn toggle_fixed_selected(&self) {
        let mut session = self.session();
        let Some(id) = session.stops.stops().get(session.selected).map(|s| s.id.clone())
        else {
            return;
        };
        session.stops.toggle_fixed(&id);
    }

    /// Regenerate the color of every unfixed stop.
    pub fn randomize_unfixed(&self) {
        self.session().stops.randomize_unfixed();
    }

    /// Cycle the gradient type.
    pub fn cycle_kind(&self) {
        let mut session = self.session();
        session.kind = session.kind.cycle();
    }

    /// Cycle the linear direction.
    pub fn cycle_direction(&self) {
        let mut session = self.session();
        session.direction = session.direction.cycle();
    }

    /// Cycle the output color format.
    pub fn cycle_format(&self) {
        let mut session = self.session();
        session.format = session.format.cycle();
    }

    /// Move the selected stop along the axis. The stop collection clamps
    /// the result to [0, 100].
    pub fn nudge_selected_position(&self, delta: f64) {
        let mut session = self.session();
        let Some(stop) = session.stops.stops().get(session.selected) else {
            return;
        };
        let id = stop.id.clone();
        let target = stop.position + delta;
        session.stops.update_position(&id, target);
    }

    /// Rotate the selected stop's hue by `degrees`.
    pub fn rotate_selected_hue(&self, degrees: f64) {
        self.adjust_selected_color(|color| color.rotate_hue(degrees));
    }

    /// Shift the selected stop's saturation by `amount` percent.
    pub fn saturate_selected(&self, amount: f64) {
        self.adjust_selected_color(|color| color.saturate(amount));
    }

    /// Shift the selected stop's lightness by `amount` percent.
    pub fn lighten_selected(&self, amount: f64) {
        self.adjust_selected_color(|color| {
            if amount < 0.0 {
                color.darken(-amount)
            } else {
                color.lighten(amount)
            }
        });
    }

    fn adjust_selected_color(&self, adjust: impl Fn(Color) -> Color) {
        let mut session = self.session();
        let Some(stop) = session.stops.stops().get(session.selected) else {
            return;
        };
        let id = stop.id.clone();
        let Some(color) = Color::from_hex(&stop.color) else {
            return;
        };
        session.stops.update_color(&id, adjust(color).to_hex());
    }

    /// Record a successful copy and return the epoch that identifies it.
    ///
    /// Each copy gets a fresh epoch; a feedback reset scheduled for an
    /// older epoch no longer matches and leaves the flag alone.
    pub fn mark_copied(&self) -> u64 {
        let mut session = self.session();
        session.copied = true;
        session.copy_epoch += 1;
        session.copy_epoch
    }

    /// Clear the copied flag, but only when `epoch` is still the latest
    /// copy. Stale resets are no-ops.
    pub fn clear_copied(&self, epoch: u64) {
        let mut session = self.session();
        if session.copy_epoch == epoch {
            session.copied = false;
        }
    }
}

impl AtomicState for BuilderState {
    type Snapshot = BuilderSnapshot;

    fn snapshot(&self) -> Self::Snapshot {
        let session = self.session();
        BuilderSnapshot {
            running: self.running.load(Ordering::Acquire),
            stops: session.stops.clone(),
            kind: session.kind,
            direction: session.direction,
            format: session.format,
            selected: session.selected,
            copied: session.copied,
        }
    }

    fn quit(&self) {
        self.running.store(false, Ordering::Release);
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

/// An immutable view of the builder session, consumed by the renderer
/// and the exit summary.
#[derive(Debug, Clone)]
pub struct BuilderSnapshot {
    pub running: bool,
    pub stops: StopSet,
    pub kind: GradientType,
    pub direction: Direction,
    pub format: ColorFormat,
    pub selected: usize,
    pub copied: bool,
}

impl BuilderSnapshot {
    /// The gradient configuration this snapshot describes.
    pub fn config(&self) -> GradientConfig {
        GradientConfig {
            kind: self.kind,
            direction: self.direction,
            colors: self.stops.stops().to_vec(),
        }
    }

    /// The gradient expression in the snapshot's color format.
    pub fn gradient_css(&self) -> String {
        gradient::css(&self.config(), self.format)
    }

    /// The full CSS rule in the snapshot's color format.
    pub fn full_css(&self) -> String {
        gradient::full_css(&self.config(), self.format)
    }
}

impl StateSnapshot for BuilderSnapshot {
    fn should_quit(&self) -> bool {
        !self.running
    }
}
