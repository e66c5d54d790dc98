//! Dashboard overlay: tweens, gauges and the ticker that drives them

pub mod dashboard;
pub mod gauge;
pub mod tween;

pub use dashboard::{Dashboard, DashboardEvent, DiamondParticle, Sparkle};
pub use gauge::{FaceLayout, FacePattern, Gauge, GaugeReading, rotation_to_value, value_to_rotation};
pub use tween::{Breathing, Ease, Modulation, Step, Target, Timeline, TimelineSample, Tween};
