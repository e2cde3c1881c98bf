//! Gesture mapping - pointer and wheel input to flip requests
//!
//! A [`GestureTracker`] follows one press/drag/release interaction on a tile
//! and turns it into [`GestureAction`]s. It is pure: it never touches the tile
//! itself, the tile applies whatever action comes back.
//!
//! Displacements are measured as `start - current`, so dragging upwards
//! (towards smaller y) rotates the drum forward.

use crate::types::{
    Direction, DRAG_STEP_RATIO, FLICK_VELOCITY_GAIN, MAX_FLICK_STEPS, MAX_WHEEL_STEPS,
    TAP_THRESHOLD, WHEEL_UNIT,
};

/// What a gesture asks the tile to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureAction {
    Flick { direction: Direction, count: u32 },
    ToggleInvert,
}

/// Transient per-interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Gesture {
    pub active: bool,
    /// Reference for drag steps and the release flick; moves on every step.
    pub start_offset: f32,
    pub start_ms: u64,
    /// Where the pointer went down.
    pub press_offset: f32,
    /// A drag step already flipped the tile during this interaction.
    pub stepped: bool,
}

#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    gesture: Gesture,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn is_active(&self) -> bool {
        self.gesture.active
    }

    pub fn start(&mut self, offset: f32, t_ms: u64) {
        self.gesture = Gesture {
            active: true,
            start_offset: offset,
            start_ms: t_ms,
            press_offset: offset,
            stepped: false,
        };
    }

    /// Live "thumbing": one step per quarter tile height while the tile is idle.
    pub fn drag(
        &mut self,
        offset: f32,
        t_ms: u64,
        tile_height: f32,
        locked: bool,
    ) -> Option<GestureAction> {
        if !self.gesture.active || locked {
            return None;
        }
        let d = self.gesture.start_offset - offset;
        if d.abs() <= tile_height * DRAG_STEP_RATIO {
            return None;
        }
        let direction = Direction::from_sign(d)?;
        self.gesture.start_offset = offset;
        self.gesture.start_ms = t_ms;
        self.gesture.stepped = true;
        Some(GestureAction::Flick {
            direction,
            count: 1,
        })
    }

    /// Release: a tap toggles polarity, anything longer becomes a flick.
    ///
    /// Only an interaction that never stepped and stayed within
    /// `TAP_THRESHOLD` of the press is a tap. A release that lands near the
    /// last drag step produces nothing.
    pub fn end(&mut self, offset: f32, t_ms: u64) -> Option<GestureAction> {
        if !self.gesture.active {
            return None;
        }
        self.gesture.active = false;

        let from_press = (self.gesture.press_offset - offset).abs();
        if !self.gesture.stepped && from_press <= TAP_THRESHOLD {
            return Some(GestureAction::ToggleInvert);
        }
        let d = self.gesture.start_offset - offset;
        if d.abs() <= TAP_THRESHOLD {
            return None;
        }
        let elapsed = t_ms.saturating_sub(self.gesture.start_ms);
        let direction = Direction::from_sign(d)?;
        Some(GestureAction::Flick {
            direction,
            count: flick_steps(d.abs(), elapsed),
        })
    }

    /// Abandon the interaction without producing anything.
    pub fn cancel(&mut self) {
        self.gesture.active = false;
    }
}

/// Steps produced by a release covering `distance` in `elapsed_ms`.
///
/// # Examples
///
/// ```
/// use solari_core::gesture::flick_steps;
///
/// assert_eq!(flick_steps(20.0, 1000), 1);
/// assert_eq!(flick_steps(100.0, 200), 3);
/// assert_eq!(flick_steps(600.0, 10), 15);
/// ```
pub fn flick_steps(distance: f32, elapsed_ms: u64) -> u32 {
    let velocity = distance.abs() / elapsed_ms.max(1) as f32;
    let steps = (velocity * FLICK_VELOCITY_GAIN).round();
    (steps as u32).clamp(1, MAX_FLICK_STEPS)
}

/// Direction and step count of a wheel event; `None` for a zero delta.
pub fn wheel_steps(delta: f32) -> Option<(Direction, u32)> {
    let direction = Direction::from_sign(delta)?;
    let steps = (delta.abs() / WHEEL_UNIT).round() as u32;
    Some((direction, steps.clamp(1, MAX_WHEEL_STEPS)))
}
