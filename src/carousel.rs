//! Testimonial carousel state machine.
//!
//! The carousel owns its item list and a current position, and rotates through
//! the items one at a time. All mutation funnels through three guarded
//! operations:
//!
//! - [`Carousel::advance`] — move one step forward or backward, wrapping
//! - [`Carousel::jump_to`] — jump directly to an index (dot buttons)
//! - [`Carousel::transition_settled`] — the presentation layer reports that
//!   the visual transition finished
//!
//! While a transition is in flight, `advance` and `jump_to` are no-ops. The
//! guard is advisory — nothing enforces it beyond these entry points — which
//! is why the fields are private and there is no other way to move the index.
//!
//! ## Invariants
//!
//! - `current` is always a valid index while the list is non-empty
//! - at most one transition is in flight at a time
//! - `direction` is only meaningful during a transition (it is a rendering
//!   hint for which way the slide animates, never used for correctness)

use crate::types::Testimonial;

/// Which way the current slide entered. A rendering hint only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    /// Wire value for the `data-direction` attribute on the rendered section.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
        }
    }
}

/// Rotation state over an ordered list of testimonials.
#[derive(Debug, Clone, Default)]
pub struct Carousel {
    items: Vec<Testimonial>,
    current: usize,
    direction: Direction,
    in_flight: bool,
}

impl Carousel {
    pub fn new(items: Vec<Testimonial>) -> Self {
        Self {
            items,
            current: 0,
            direction: Direction::Forward,
            in_flight: false,
        }
    }

    pub fn items(&self) -> &[Testimonial] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the item currently shown. Always `< len()` for a non-empty
    /// list; 0 for an empty one (nothing to show).
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The item currently shown, if any.
    pub fn current_item(&self) -> Option<&Testimonial> {
        self.items.get(self.current)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether a visual transition is still running. While true, navigation
    /// requests are ignored.
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Move one step in either direction, wrapping at both ends.
    ///
    /// `step` is +1 (next) or -1 (previous); any positive value means next
    /// and any negative value previous. No-op while a transition is in
    /// flight, when the list is empty, or for `step == 0`.
    ///
    /// A length-1 list wraps to itself: the index stays put but the in-flight
    /// flag still cycles, so the settle signal keeps the guard consistent.
    pub fn advance(&mut self, step: i8) {
        if self.in_flight || self.items.is_empty() || step == 0 {
            return;
        }
        let len = self.items.len();
        self.direction = if step > 0 {
            Direction::Forward
        } else {
            Direction::Backward
        };
        self.in_flight = true;
        // (current + step + len) mod len, kept in usize so a backward step
        // from 0 never goes negative.
        self.current = if step > 0 {
            (self.current + 1) % len
        } else {
            (self.current + len - 1) % len
        };
    }

    /// Jump directly to `index` (the dot buttons under the carousel).
    ///
    /// Same in-flight and empty guards as [`advance`](Self::advance). An
    /// out-of-range index is a no-op rather than a panic, so the index
    /// invariant holds no matter what the caller passes. Direction is
    /// forward when the target is after the current index, backward
    /// otherwise — including a jump to the current index, which still starts
    /// a transition.
    pub fn jump_to(&mut self, index: usize) {
        if self.in_flight || self.items.is_empty() || index >= self.items.len() {
            return;
        }
        self.direction = if index > self.current {
            Direction::Forward
        } else {
            Direction::Backward
        };
        self.in_flight = true;
        self.current = index;
    }

    /// The presentation layer calls this once per transition, when the slide
    /// animation completes. Clears the in-flight flag so the next navigation
    /// request takes effect. Idempotent.
    pub fn transition_settled(&mut self) {
        self.in_flight = false;
    }

    /// Full replace on refetch. Resets the position to the first item and
    /// cancels any in-flight transition, since the slide it referred to is
    /// gone.
    pub fn replace_items(&mut self, items: Vec<Testimonial>) {
        self.items = items;
        self.current = 0;
        self.direction = Direction::Forward;
        self.in_flight = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> Testimonial {
        Testimonial {
            id: id.to_string(),
            name: format!("Person {id}"),
            position: None,
            body: format!("Quote {id}"),
        }
    }

    fn carousel(n: usize) -> Carousel {
        Carousel::new((0..n).map(|i| item(&i.to_string())).collect())
    }

    #[test]
    fn advance_forward_wraps_after_full_cycle() {
        let mut c = carousel(3);
        for _ in 0..3 {
            c.advance(1);
            c.transition_settled();
        }
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn advance_backward_from_zero_wraps_to_last() {
        let mut c = carousel(3);
        c.advance(-1);
        assert_eq!(c.current_index(), 2);
        assert_eq!(c.direction(), Direction::Backward);
    }

    #[test]
    fn full_backward_cycle_returns_to_start() {
        let mut c = carousel(4);
        for _ in 0..4 {
            c.advance(-1);
            c.transition_settled();
        }
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn advance_is_noop_while_in_flight() {
        let mut c = carousel(3);
        c.advance(1);
        assert_eq!(c.current_index(), 1);
        assert!(c.in_flight());

        // Second request before settle: ignored entirely.
        c.advance(1);
        assert_eq!(c.current_index(), 1);
        assert_eq!(c.direction(), Direction::Forward);
    }

    #[test]
    fn jump_is_noop_while_in_flight() {
        let mut c = carousel(3);
        c.advance(1);
        c.jump_to(2);
        assert_eq!(c.current_index(), 1);
    }

    #[test]
    fn settle_permits_next_navigation() {
        let mut c = carousel(3);
        c.advance(1);
        c.transition_settled();
        assert!(!c.in_flight());
        c.advance(1);
        assert_eq!(c.current_index(), 2);
    }

    #[test]
    fn single_item_wraps_to_itself_both_ways() {
        let mut c = carousel(1);
        c.advance(1);
        assert_eq!(c.current_index(), 0);
        assert!(c.in_flight());
        c.transition_settled();
        c.advance(-1);
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn empty_list_navigation_never_moves_or_arms_the_guard() {
        let mut c = carousel(0);
        c.advance(1);
        c.advance(-1);
        c.jump_to(0);
        assert_eq!(c.current_index(), 0);
        assert!(!c.in_flight());
        assert!(c.current_item().is_none());
    }

    #[test]
    fn jump_sets_direction_from_target_ordering() {
        let mut c = carousel(5);
        c.jump_to(3);
        assert_eq!(c.direction(), Direction::Forward);
        c.transition_settled();
        c.jump_to(1);
        assert_eq!(c.current_index(), 1);
        assert_eq!(c.direction(), Direction::Backward);
    }

    #[test]
    fn jump_to_current_index_still_transitions() {
        let mut c = carousel(3);
        c.jump_to(0);
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.direction(), Direction::Backward);
        assert!(c.in_flight());
    }

    #[test]
    fn jump_out_of_range_is_noop() {
        let mut c = carousel(3);
        c.jump_to(3);
        assert_eq!(c.current_index(), 0);
        assert!(!c.in_flight());
    }

    #[test]
    fn zero_step_is_noop() {
        let mut c = carousel(3);
        c.advance(0);
        assert_eq!(c.current_index(), 0);
        assert!(!c.in_flight());
    }

    #[test]
    fn settle_is_idempotent() {
        let mut c = carousel(2);
        c.advance(1);
        c.transition_settled();
        c.transition_settled();
        assert!(!c.in_flight());
        c.advance(1);
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn replace_items_resets_position_and_guard() {
        let mut c = carousel(3);
        c.advance(1);
        assert!(c.in_flight());
        c.replace_items(vec![item("x")]);
        assert_eq!(c.current_index(), 0);
        assert!(!c.in_flight());
        assert_eq!(c.len(), 1);
    }

    // The scenario from the navigation contract: next, blocked repeat,
    // settle, then previous.
    #[test]
    fn navigation_scenario_next_blocked_settle_prev() {
        let mut c = carousel(3);

        c.advance(1);
        assert_eq!(c.current_index(), 1);
        assert_eq!(c.direction(), Direction::Forward);
        assert!(c.in_flight());

        c.advance(1);
        assert_eq!(c.current_index(), 1);

        c.transition_settled();
        assert!(!c.in_flight());

        c.advance(-1);
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.direction(), Direction::Backward);
    }
}
