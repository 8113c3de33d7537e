// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Manual/roam mode arbitration.
//!
//! Manual input always wins: any accepted key other than roam drops back to manual. While
//! roaming, a steering decision is applied only when it differs from the one applied last.

use crate::control::roam::SteeringCommand;
use crate::protocol::Key;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    Manual,
    Roam,
}

pub struct ModeArbiter {
    mode: Mode,
    applied: Option<SteeringCommand>,
}

impl ModeArbiter {
    pub fn new() -> Self {
        Self {
            mode: Mode::Manual,
            applied: None,
        }
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Last steering command applied while roaming.
    #[inline]
    pub fn applied(&self) -> Option<SteeringCommand> {
        self.applied
    }

    /// Transition on an accepted key and return the new mode.
    pub fn on_key(&mut self, key: Key) -> Mode {
        match (self.mode, key) {
            (Mode::Manual, Key::Roam) => {
                // Manual keys may have moved the drivetrain since the last roam decision.
                self.applied = None;
                self.mode = Mode::Roam;
            }
            (Mode::Roam, Key::Roam) => {}
            (_, _) => self.mode = Mode::Manual,
        }
        self.mode
    }

    /// Offer a roam decision. Returns the command to apply, if any.
    pub fn steer(&mut self, decision: SteeringCommand) -> Option<SteeringCommand> {
        if self.mode != Mode::Roam || self.applied == Some(decision) {
            return None;
        }
        self.applied = Some(decision);
        Some(decision)
    }
}

impl Default for ModeArbiter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_manual_key_cancels_roam() {
        for key in [
            Key::Backward,
            Key::Forward,
            Key::TurnLeft,
            Key::TurnRight,
            Key::Fire,
            Key::Stop,
            Key::Other(b'x'),
        ] {
            let mut arb = ModeArbiter::new();
            assert_eq!(arb.on_key(Key::Roam), Mode::Roam);
            assert_eq!(arb.on_key(key), Mode::Manual);
        }
    }

    #[test]
    fn steering_ignored_in_manual() {
        let mut arb = ModeArbiter::new();
        assert_eq!(arb.steer(SteeringCommand::Forward), None);
        assert_eq!(arb.applied(), None);
    }

    #[test]
    fn steering_applied_only_on_change() {
        let mut arb = ModeArbiter::new();
        arb.on_key(Key::Roam);

        assert_eq!(arb.steer(SteeringCommand::Forward), Some(SteeringCommand::Forward));
        assert_eq!(arb.steer(SteeringCommand::Forward), None);
        assert_eq!(arb.steer(SteeringCommand::Right), Some(SteeringCommand::Right));
        assert_eq!(arb.steer(SteeringCommand::Right), None);
    }

    #[test]
    fn reentering_roam_reapplies_decision() {
        let mut arb = ModeArbiter::new();
        arb.on_key(Key::Roam);
        assert!(arb.steer(SteeringCommand::Forward).is_some());

        arb.on_key(Key::Stop);
        arb.on_key(Key::Roam);
        assert_eq!(arb.steer(SteeringCommand::Forward), Some(SteeringCommand::Forward));
    }
}
