//! Position tracking for stepper motors.
//!
//! Tracks the current and target positions in whole steps.

use crate::motion::Direction;

/// Current and target position of the axis.
///
/// Positive distances run [`Direction::Forward`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    /// Steps from origin, moved only when a pulse fires.
    current: i64,
    /// Requested position.
    target: i64,
}

impl Position {
    /// Create a position tracker at the origin.
    #[inline]
    pub const fn new() -> Self {
        Self {
            current: 0,
            target: 0,
        }
    }

    /// Create a position tracker resting at `steps`.
    #[inline]
    pub const fn at(steps: i64) -> Self {
        Self {
            current: steps,
            target: steps,
        }
    }

    /// Get current position in steps.
    #[inline]
    pub fn current(&self) -> i64 {
        self.current
    }

    /// Get target position in steps.
    #[inline]
    pub fn target(&self) -> i64 {
        self.target
    }

    /// Set the target position.
    #[inline]
    pub fn set_target(&mut self, target: i64) {
        self.target = target;
    }

    /// Steps from the current to the target position.
    #[inline]
    pub fn distance_to_go(&self) -> i64 {
        self.target - self.current
    }

    /// Record one step in `direction`.
    #[inline]
    pub fn advance(&mut self, direction: Direction) {
        self.current += direction.sign();
    }

    /// Redefine the current position, which also becomes the target.
    #[inline]
    pub fn reset_to(&mut self, steps: i64) {
        self.current = steps;
        self.target = steps;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_tracking() {
        let mut pos = Position::new();
        pos.set_target(3);
        assert_eq!(pos.distance_to_go(), 3);

        pos.advance(Direction::Forward);
        pos.advance(Direction::Forward);
        assert_eq!(pos.current(), 2);
        assert_eq!(pos.distance_to_go(), 1);

        pos.advance(Direction::Backward);
        assert_eq!(pos.distance_to_go(), 2);
    }

    #[test]
    fn test_reset_to() {
        let mut pos = Position::at(-40);
        pos.set_target(100);
        pos.reset_to(7);
        assert_eq!(pos.current(), 7);
        assert_eq!(pos.target(), 7);
        assert_eq!(pos.distance_to_go(), 0);
    }
}
