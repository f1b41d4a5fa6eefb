//! Color-stop collection management.
//!
//! A [`StopSet`] owns between [`MIN_STOPS`] and [`MAX_STOPS`] color
//! stops and keeps that bound through every operation. Mutations rebuild
//! the underlying vector rather than editing elements in place, so a
//! snapshot taken before a mutation never observes a half-applied
//! update.

use rand::{distributions::Alphanumeric, Rng};

use crate::color::Color;

/// Minimum number of stops in a collection.
pub const MIN_STOPS: usize = 2;
/// Maximum number of stops in a collection.
pub const MAX_STOPS: usize = 5;

/// A single color stop along the gradient axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorStop {
    /// Opaque unique token identifying this stop.
    pub id: String,
    /// Hex color, `#rrggbb`. Stored as text so that hex-format output
    /// echoes exactly what the stop holds.
    pub color: String,
    /// Position along the gradient axis, 0–100 percent.
    pub position: f64,
    /// Fixed stops are excluded from random regeneration.
    pub fixed: bool,
}

impl ColorStop {
    fn new(position: f64) -> Self {
        Self {
            id: generate_id(),
            color: Color::random().to_hex(),
            position,
            fixed: false,
        }
    }
}

/// An ordered collection of color stops.
#[derive(Debug, Clone)]
pub struct StopSet {
    stops: Vec<ColorStop>,
}

impl StopSet {
    /// Create a collection of `count` evenly spaced random stops.
    ///
    /// `count` is clamped to [2, 5].
    pub fn new(count: usize) -> Self {
        let count = count.clamp(MIN_STOPS, MAX_STOPS);
        let spacing = 100.0 / (count - 1) as f64;

        let stops = (0..count)
            .map(|i| ColorStop::new(i as f64 * spacing))
            .collect();

        Self { stops }
    }

    /// Number of stops in the collection.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// The stop count bound makes an empty collection unrepresentable.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The stops in insertion order.
    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// The stops ordered ascending by position. The sort is stable, so
    /// stops sharing a position keep their relative order.
    pub fn sorted(&self) -> Vec<ColorStop> {
        let mut sorted = self.stops.clone();
        sorted.sort_by(|a, b| a.position.total_cmp(&b.position));
        sorted
    }

    /// Grow or shrink the collection to `count` stops (clamped to
    /// [2, 5]), then redistribute positions evenly.
    ///
    /// Growing appends unfixed stops with interpolated positions and
    /// random colors. Shrinking removes unfixed stops first, lowest
    /// index first; when fewer unfixed stops exist than must go, the
    /// collection is rebuilt as fixed-then-unfixed and truncated, so
    /// trailing fixed stops can be dropped.
    pub fn set_count(&mut self, count: usize) {
        let count = count.clamp(MIN_STOPS, MAX_STOPS);
        let spacing = 100.0 / (count - 1) as f64;

        let mut next = self.stops.clone();

        while next.len() < count {
            next.push(ColorStop::new(next.len() as f64 * spacing));
        }

        if next.len() > count {
            let unfixed = next.iter().filter(|s| !s.fixed).count();

            if unfixed >= next.len() - count {
                while next.len() > count {
                    match next.iter().position(|s| !s.fixed) {
                        Some(index) => {
                            next.remove(index);
                        }
                        None => break,
                    }
                }
            } else {
                let (fixed, unfixed): (Vec<_>, Vec<_>) =
                    next.into_iter().partition(|s| s.fixed);
                next = fixed;
                next.extend(unfixed);
                next.truncate(count);
            }
        }

        self.stops = next;
        self.redistribute();
    }

    /// Sort by position and reassign `index * 100 / (count - 1)` to each
    /// stop. The fixed flag does not protect a stop's position here.
    pub fn redistribute(&mut self) {
        let spacing = 100.0 / (self.stops.len() - 1) as f64;

        let mut next = self.sorted();
        for (index, stop) in next.iter_mut().enumerate() {
            stop.position = index as f64 * spacing;
        }

        self.stops = next;
    }

    /// Replace the color of the stop with the given id. Unknown ids are
    /// ignored.
    pub fn update_color(&mut self, id: &str, color: impl Into<String>) {
        let Some(index) = self.stops.iter().position(|s| s.id == id) else {
            return;
        };

        let mut next = self.stops.clone();
        next[index].color = color.into();
        self.stops = next;
    }

    /// Move the stop with the given id, clamping the position to
    /// [0, 100]. Unknown ids are ignored.
    pub fn update_position(&mut self, id: &str, position: f64) {
        let Some(index) = self.stops.iter().position(|s| s.id == id) else {
            return;
        };

        let mut next = self.stops.clone();
        next[index].position = position.clamp(0.0, 100.0);
        self.stops = next;
    }

    /// Flip the fixed flag of the stop with the given id. Unknown ids
    /// are ignored.
    pub fn toggle_fixed(&mut self, id: &str) {
        let Some(index) = self.stops.iter().position(|s| s.id == id) else {
            return;
        };

        let mut next = self.stops.clone();
        next[index].fixed = !next[index].fixed;
        self.stops = next;
    }

    /// Regenerate the color of every unfixed stop. Fixed stops keep
    /// their colors.
    pub fn randomize_unfixed(&mut self) {
        self.stops = self
            .stops
            .iter()
            .map(|stop| {
                if stop.fixed {
                    stop.clone()
                } else {
                    ColorStop {
                        color: Color::random().to_hex(),
                        ..stop.clone()
                    }
                }
            })
            .collect();
    }
}

impl Default for StopSet {
    fn default() -> Self {
        Self::new(3)
    }
}

fn generate_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(13)
        .map(|byte| (byte as char).to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn positions(set: &StopSet) -> Vec<f64> {
        set.stops().iter().map(|s| s.position).collect()
    }

    #[test]
    fn test_new_clamps_count() {
        assert_eq!(StopSet::new(0).len(), 2);
        assert_eq!(StopSet::new(1).len(), 2);
        assert_eq!(StopSet::new(3).len(), 3);
        assert_eq!(StopSet::new(99).len(), 5);
    }

    #[test]
    fn test_new_spaces_evenly() {
        assert_eq!(positions(&StopSet::new(2)), vec![0.0, 100.0]);
        assert_eq!(positions(&StopSet::new(3)), vec![0.0, 50.0, 100.0]);

        let spacing = 100.0 / 4.0;
        let expected: Vec<f64> = (0..5).map(|i| i as f64 * spacing).collect();
        assert_eq!(positions(&StopSet::new(5)), expected);
    }

    #[test]
    fn test_ids_are_unique() {
        let set = StopSet::new(5);
        for (i, a) in set.stops().iter().enumerate() {
            for b in &set.stops()[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn test_set_count_bounds() {
        let mut set = StopSet::new(3);

        set.set_count(0);
        assert_eq!(set.len(), 2);

        set.set_count(99);
        assert_eq!(set.len(), 5);
    }

    #[test]
    fn test_set_count_grow_keeps_existing() {
        let mut set = StopSet::new(2);
        let kept: Vec<String> = set.stops().iter().map(|s| s.id.clone()).collect();

        set.set_count(4);

        assert_eq!(set.len(), 4);
        for id in &kept {
            assert!(set.stops().iter().any(|s| &s.id == id));
        }
        // appended stops start unfixed
        assert!(set.stops().iter().skip(2).all(|s| !s.fixed));
    }

    #[test]
    fn test_set_count_shrink_removes_unfixed_first() {
        let mut set = StopSet::new(4);
        let fixed_id = set.stops()[1].id.clone();
        set.toggle_fixed(&fixed_id);

        set.set_count(2);

        assert_eq!(set.len(), 2);
        assert!(set.stops().iter().any(|s| s.id == fixed_id));
    }

    #[test]
    fn test_set_count_shrink_can_drop_fixed() {
        // with every stop fixed there is nothing unfixed to remove, so
        // the collection is truncated and trailing fixed stops are lost
        let mut set = StopSet::new(4);
        let ids: Vec<String> = set.stops().iter().map(|s| s.id.clone()).collect();
        for id in &ids {
            set.toggle_fixed(id);
        }

        set.set_count(2);

        assert_eq!(set.len(), 2);
        assert!(set.stops().iter().any(|s| s.id == ids[0]));
        assert!(set.stops().iter().any(|s| s.id == ids[1]));
        assert!(!set.stops().iter().any(|s| s.id == ids[3]));
    }

    #[test]
    fn test_set_count_redistributes() {
        let mut set = StopSet::new(3);
        let id = set.stops()[0].id.clone();
        set.update_position(&id, 42.0);

        set.set_count(3);

        assert_eq!(positions(&set), vec![0.0, 50.0, 100.0]);
    }

    #[test]
    fn test_redistribute_sorts_then_spaces() {
        let mut set = StopSet::new(3);
        let first = set.stops()[0].id.clone();
        let last = set.stops()[2].id.clone();
        set.update_position(&first, 90.0);
        set.update_position(&last, 10.0);

        set.redistribute();

        assert_eq!(positions(&set), vec![0.0, 50.0, 100.0]);
        // the stop moved to 10 now leads, the one moved to 90 trails
        assert_eq!(set.stops()[0].id, last);
        assert_eq!(set.stops()[2].id, first);
    }

    #[test]
    fn test_redistribute_ignores_fixed() {
        let mut set = StopSet::new(3);
        let id = set.stops()[1].id.clone();
        set.toggle_fixed(&id);
        set.update_position(&id, 7.0);

        set.redistribute();

        // fixed stops are not position-protected
        let moved = set.stops().iter().find(|s| s.id == id).unwrap();
        assert_eq!(moved.position, 0.0);
    }

    #[test]
    fn test_update_color() {
        let mut set = StopSet::new(2);
        let id = set.stops()[0].id.clone();

        set.update_color(&id, "#123abc");
        assert_eq!(set.stops()[0].color, "#123abc");

        let before: Vec<ColorStop> = set.stops().to_vec();
        set.update_color("no-such-id", "#ffffff");
        assert_eq!(set.stops(), &before[..]);
    }

    #[test]
    fn test_update_position_clamps() {
        let mut set = StopSet::new(2);
        let id = set.stops()[0].id.clone();

        set.update_position(&id, 250.0);
        assert_eq!(set.stops()[0].position, 100.0);

        set.update_position(&id, -10.0);
        assert_eq!(set.stops()[0].position, 0.0);

        let before: Vec<ColorStop> = set.stops().to_vec();
        set.update_position("no-such-id", 50.0);
        assert_eq!(set.stops(), &before[..]);
    }

    #[test]
    fn test_toggle_fixed() {
        let mut set = StopSet::new(2);
        let id = set.stops()[0].id.clone();

        set.toggle_fixed(&id);
        assert!(set.stops()[0].fixed);
        set.toggle_fixed(&id);
        assert!(!set.stops()[0].fixed);

        let before: Vec<ColorStop> = set.stops().to_vec();
        set.toggle_fixed("no-such-id");
        assert_eq!(set.stops(), &before[..]);
    }

    #[test]
    fn test_randomize_skips_fixed() {
        let mut set = StopSet::new(3);
        let fixed_id = set.stops()[1].id.clone();
        set.toggle_fixed(&fixed_id);
        set.update_color(&fixed_id, "#ff0000");

        set.randomize_unfixed();

        let fixed = set.stops().iter().find(|s| s.id == fixed_id).unwrap();
        assert_eq!(fixed.color, "#ff0000");
        for stop in set.stops().iter().filter(|s| !s.fixed) {
            assert!(Color::from_hex(&stop.color).is_some());
        }
    }

    #[test]
    fn test_sorted_is_stable() {
        let mut set = StopSet::new(3);
        let ids: Vec<String> = set.stops().iter().map(|s| s.id.clone()).collect();
        for id in &ids {
            set.update_position(id, 50.0);
        }

        let sorted: Vec<String> = set.sorted().into_iter().map(|s| s.id).collect();
        assert_eq!(sorted, ids);
    }

    #[test]
    fn test_sorted_orders_by_position() {
        let mut set = StopSet::new(3);
        let first = set.stops()[0].id.clone();
        set.update_position(&first, 75.0);

        let sorted = set.sorted();
        assert!(sorted.windows(2).all(|w| w[0].position <= w[1].position));
        // insertion order is untouched
        assert_eq!(set.stops()[0].id, first);
    }
}
