//! Movement domain: named countdown timers shared by the controller.

/// Remaining time at or below this counts as elapsed. Absorbs the drift left
/// over from subtracting fixed steps like 1/60 from tuned durations.
pub const TIMER_EPSILON: f32 = 1e-5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerId {
    /// Grace window after leaving the ground
    Coyote,
    /// Remembered jump press
    JumpBuffer,
    StrikeCooldown,
    /// Blocks wall grabs right after a wall jump
    WallJumpLock,
    /// Gameplay freeze-frame
    Hitstop,
}

impl TimerId {
    pub const ALL: [TimerId; 5] = [
        TimerId::Coyote,
        TimerId::JumpBuffer,
        TimerId::StrikeCooldown,
        TimerId::WallJumpLock,
        TimerId::Hitstop,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Countdown scalars advanced once per tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimerBank {
    remaining: [f32; TimerId::ALL.len()],
}

impl TimerBank {
    /// Decrement every active timer by `dt`, flooring at zero.
    pub fn tick(&mut self, dt: f32) {
        for slot in &mut self.remaining {
            if *slot > 0.0 {
                *slot = (*slot - dt).max(0.0);
            }
        }
    }

    /// Decrement a single timer. Used while the rest of the bank is frozen.
    pub fn tick_one(&mut self, id: TimerId, dt: f32) {
        let slot = &mut self.remaining[id.index()];
        if *slot > 0.0 {
            *slot = (*slot - dt).max(0.0);
        }
    }

    /// Restart a timer. Negative values are stored as zero.
    pub fn reset(&mut self, id: TimerId, value: f32) {
        self.remaining[id.index()] = value.max(0.0);
    }

    pub fn clear(&mut self, id: TimerId) {
        self.remaining[id.index()] = 0.0;
    }

    pub fn remaining(&self, id: TimerId) -> f32 {
        self.remaining[id.index()]
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.remaining(id) > TIMER_EPSILON
    }
}

/// Count a phase timer down and report whether it has run out.
pub(crate) fn count_down(remaining: &mut f32, dt: f32) -> bool {
    *remaining -= dt;
    *remaining <= TIMER_EPSILON
}
