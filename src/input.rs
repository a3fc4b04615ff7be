//! Per-tick input sample and the host capability that produces it.

use std::time::Duration;

/// Directional controls, sampled as levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    Left,
    Right,
}

/// Discrete triggers, consumed as edges (once per physical press).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Trigger {
    Fire,
    Start,
}

/// What the host knows about its input devices.
pub trait InputSource {
    fn is_held(&self, control: Control) -> bool;
    /// True at most once per physical press; consuming clears it.
    fn take_edge(&mut self, trigger: Trigger) -> bool;
}

/// Everything one tick needs from the outside world.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickInput {
    pub left_held: bool,
    pub right_held: bool,
    pub fire: bool,
    pub start: bool,
    /// Game time elapsed since the previous tick.
    pub dt: Duration,
}

impl TickInput {
    pub fn sample(source: &mut impl InputSource, dt: Duration) -> Self {
        Self {
            left_held: source.is_held(Control::Left),
            right_held: source.is_held(Control::Right),
            fire: source.take_edge(Trigger::Fire),
            start: source.take_edge(Trigger::Start),
            dt,
        }
    }

    /// An idle tick: nothing held, nothing pressed.
    pub fn idle(dt: Duration) -> Self {
        Self {
            dt,
            ..Default::default()
        }
    }

    /// Horizontal direction: -1, 0 or +1. Left wins when both are held.
    pub fn direction(&self) -> f32 {
        if self.left_held {
            -1.0
        } else if self.right_held {
            1.0
        } else {
            0.0
        }
    }
}

/// Rising-edge detector for hosts that can only report "is down".
#[derive(Clone, Copy, Debug, Default)]
pub struct EdgeDetector {
    was_down: bool,
}

impl EdgeDetector {
    /// Feed the current level; true only on the up→down transition.
    pub fn update(&mut self, down: bool) -> bool {
        let edge = down && !self.was_down;
        self.was_down = down;
        edge
    }
}
