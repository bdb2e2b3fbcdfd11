//! Keyboard state → per-tick input
//!
//! Arrow up/down are held state sampled once per tick. Arrow left/right
//! queue one lane change on key release. `a` toggles the autopilot.

use std::collections::VecDeque;

use crate::sim::{LaneDirection, TickInput};

/// Keyboard state between ticks
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    accelerate: bool,
    decelerate: bool,
    lane_changes: VecDeque<LaneDirection>,
    toggle_autopilot: bool,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key-down event (`KeyboardEvent.key` values). Returns true if consumed.
    pub fn key_down(&mut self, key: &str) -> bool {
        match key {
            "ArrowUp" => self.accelerate = true,
            "ArrowDown" => self.decelerate = true,
            "ArrowLeft" | "ArrowRight" => {}
            _ => return false,
        }
        true
    }

    /// Handle a key-up event. Returns true if consumed.
    pub fn key_up(&mut self, key: &str) -> bool {
        match key {
            "ArrowUp" => self.accelerate = false,
            "ArrowDown" => self.decelerate = false,
            "ArrowLeft" => self.lane_changes.push_back(LaneDirection::Left),
            "ArrowRight" => self.lane_changes.push_back(LaneDirection::Right),
            "a" | "A" => self.toggle_autopilot = true,
            _ => return false,
        }
        true
    }

    /// Input for the next tick; consumes at most one queued lane change
    pub fn sample(&mut self) -> TickInput {
        TickInput {
            accelerate: self.accelerate,
            decelerate: self.decelerate,
            lane_change: self.lane_changes.pop_front(),
            toggle_autopilot: std::mem::take(&mut self.toggle_autopilot),
        }
    }

    /// Drop held keys and queued events (focus lost)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_keys_persist_across_samples() {
        let mut keys = KeyState::new();
        assert!(keys.key_down("ArrowUp"));
        assert!(keys.sample().accelerate);
        assert!(keys.sample().accelerate);
        keys.key_up("ArrowUp");
        assert!(!keys.sample().accelerate);
    }

    #[test]
    fn test_lane_change_fires_once_per_release() {
        let mut keys = KeyState::new();
        keys.key_down("ArrowLeft");
        assert_eq!(keys.sample().lane_change, None);

        keys.key_up("ArrowLeft");
        keys.key_up("ArrowRight");
        assert_eq!(keys.sample().lane_change, Some(LaneDirection::Left));
        assert_eq!(keys.sample().lane_change, Some(LaneDirection::Right));
        assert_eq!(keys.sample().lane_change, None);
    }

    #[test]
    fn test_autopilot_toggle_is_one_shot() {
        let mut keys = KeyState::new();
        keys.key_up("a");
        assert!(keys.sample().toggle_autopilot);
        assert!(!keys.sample().toggle_autopilot);
    }

    #[test]
    fn test_unknown_keys_not_consumed() {
        let mut keys = KeyState::new();
        assert!(!keys.key_down("Space"));
        assert!(!keys.key_up("x"));
        assert_eq!(keys.sample(), TickInput::default());
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut keys = KeyState::new();
        keys.key_down("ArrowDown");
        keys.key_up("ArrowRight");
        keys.clear();
        assert_eq!(keys.sample(), TickInput::default());
    }
}
