//! Per-entity behavior state
//!
//! Each variant is read and rewritten only by the update routine for its own
//! entity kind (see `sim::tick`).

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Wandering crab
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrabState {
    /// Distance per reference frame
    pub speed: f32,
    /// Walking direction in the XZ plane (radians)
    pub heading: f32,
    /// Timestamp of the next random turn (ms)
    pub next_turn_ms: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FishPhase {
    Submerged,
    Jumping,
}

/// Jumping fish
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FishState {
    pub phase: FishPhase,
    /// Start of the next (or current) jump (ms)
    pub jump_time_ms: f64,
    pub jump_duration_ms: f64,
    /// Pose the fish returns to after landing
    pub rest: Vec3,
}

impl FishState {
    /// Jump progress in [0, 1] at `now_ms`
    pub fn progress(&self, now_ms: f64) -> f32 {
        if self.jump_duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.jump_time_ms) / self.jump_duration_ms).clamp(0.0, 1.0) as f32
    }
}

/// Rotation about local Z oscillating around a stored base angle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwayState {
    pub base_rotation: f32,
    pub amplitude: f32,
    /// Angular frequency per millisecond
    pub frequency: f32,
    pub phase: f32,
}

impl SwayState {
    pub const fn grass(base_rotation: f32, phase: f32) -> Self {
        Self {
            base_rotation,
            amplitude: 0.1,
            frequency: 0.001,
            phase,
        }
    }

    pub const fn seaweed(phase: f32) -> Self {
        Self {
            base_rotation: 0.0,
            amplitude: 0.15,
            frequency: 0.0008,
            phase,
        }
    }
}

/// Shoreline foam line sliding in and out
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoamState {
    pub base_z: f32,
    pub base_opacity: f32,
    pub phase: f32,
}

/// Breaking wave crest bobbing on its base height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrestState {
    pub base_y: f32,
    pub phase: f32,
}

/// Pulsing opacity with an optional slow spin about local Y
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShimmerState {
    pub base_opacity: f32,
    pub amplitude: f32,
    pub frequency: f32,
    /// Radians per reference frame
    pub spin: f32,
}

/// Bird circling the island
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BirdState {
    pub angle: f32,
    pub radius: f32,
    pub height: f32,
    /// Radians per reference frame
    pub angular_speed: f32,
}

/// Flapping wing; `side` is -1 for the left wing and 1 for the right
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WingState {
    pub side: f32,
}

/// Gentle yaw oscillation (mermaid hair and tail)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftState {
    pub amplitude: f32,
    pub frequency: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationState {
    Crab(CrabState),
    Fish(FishState),
    Sway(SwayState),
    Foam(FoamState),
    Crest(CrestState),
    Shimmer(ShimmerState),
    Bird(BirdState),
    Wing(WingState),
    Drift(DriftState),
}

impl AnimationState {
    /// True for variants whose output depends on time alone
    pub fn is_stateless(&self) -> bool {
        matches!(
            self,
            Self::Sway(_) | Self::Foam(_) | Self::Crest(_) | Self::Wing(_) | Self::Drift(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fish_progress_clamps() {
        let fish = FishState {
            phase: FishPhase::Jumping,
            jump_time_ms: 1000.0,
            jump_duration_ms: 2000.0,
            rest: Vec3::new(0.0, -3.0, 0.0),
        };
        assert_eq!(fish.progress(500.0), 0.0);
        assert_eq!(fish.progress(2000.0), 0.5);
        assert_eq!(fish.progress(9000.0), 1.0);
    }

    #[test]
    fn test_stateless_variants() {
        assert!(AnimationState::Sway(SwayState::grass(0.1, 0.0)).is_stateless());
        assert!(!AnimationState::Bird(BirdState {
            angle: 0.0,
            radius: 30.0,
            height: 15.0,
            angular_speed: 0.001,
        })
        .is_stateless());
    }
}
