//! Property tweens with GSAP-style easings
//!
//! A [`Tween`] interpolates one value between two points in time; a
//! [`Timeline`] chains several steps and can finish with an endless yoyo
//! ("breathing") around its final value. Nothing here runs on its own: the
//! owner samples the value at the current time each frame.

use std::f32::consts::{PI, TAU};

/// Easing curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ease {
    Linear,
    /// `powerN.in`, exponent N+1
    PowerIn(u8),
    PowerOut(u8),
    PowerInOut(u8),
    SineInOut,
    ElasticOut { amplitude: f32, period: f32 },
    BackOut { overshoot: f32 },
}

impl Ease {
    /// Map linear progress in [0, 1] to eased progress
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Ease::Linear => t,
            Ease::PowerIn(n) => t.powi(n as i32 + 1),
            Ease::PowerOut(n) => 1.0 - (1.0 - t).powi(n as i32 + 1),
            Ease::PowerInOut(n) => {
                let e = n as i32 + 1;
                if t < 0.5 {
                    (2.0 * t).powi(e) / 2.0
                } else {
                    1.0 - (2.0 * (1.0 - t)).powi(e) / 2.0
                }
            }
            Ease::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
            Ease::ElasticOut { amplitude, period } => {
                if t >= 1.0 {
                    return 1.0;
                }
                let a = amplitude.max(1.0);
                let p = period.max(f32::EPSILON) / amplitude.clamp(f32::EPSILON, 1.0);
                let shift = p / TAU * (1.0 / a).asin();
                a * 2f32.powf(-10.0 * t) * ((t - shift) * TAU / p).sin() + 1.0
            }
            Ease::BackOut { overshoot } => {
                let u = t - 1.0;
                u * u * ((overshoot + 1.0) * u + overshoot) + 1.0
            }
        }
    }
}

/// Single interpolation of one value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub start_ms: f64,
    pub duration_ms: f64,
    pub ease: Ease,
}

impl Tween {
    pub fn new(from: f32, to: f32, start_ms: f64, duration_ms: f64, ease: Ease) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms,
            ease,
        }
    }

    /// Linear progress in [0, 1]
    pub fn progress(&self, now_ms: f64) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0) as f32
    }

    pub fn value(&self, now_ms: f64) -> f32 {
        let eased = self.ease.apply(self.progress(now_ms));
        self.from + (self.to - self.from) * eased
    }

    pub fn is_finished(&self, now_ms: f64) -> bool {
        now_ms >= self.start_ms + self.duration_ms
    }
}

/// Where a timeline step goes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target {
    Absolute(f32),
    /// Offset from the value the step starts at (GSAP `"+=450"`)
    Relative(f32),
}

/// Extra motion layered on top of a step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Modulation {
    #[default]
    None,
    /// Wobble that fades out over the step: `sin(p·π·cycles)·amplitude·(1−p)`
    Wobble { cycles: f32, amplitude: f32 },
    /// Late push in the direction of travel once progress passes `after`
    Momentum { after: f32, amplitude: f32 },
}

impl Modulation {
    fn offset(&self, p: f32) -> f32 {
        match *self {
            Modulation::None => 0.0,
            Modulation::Wobble { cycles, amplitude } => (p * PI * cycles).sin() * amplitude * (1.0 - p),
            Modulation::Momentum { after, amplitude } => {
                if p > after {
                    (p * PI).sin() * amplitude * (1.0 - p)
                } else {
                    0.0
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub target: Target,
    pub duration_ms: f64,
    pub ease: Ease,
    pub modulation: Modulation,
}

impl Step {
    pub fn to(target: Target, duration_ms: f64, ease: Ease) -> Self {
        Self {
            target,
            duration_ms,
            ease,
            modulation: Modulation::None,
        }
    }

    pub fn with_modulation(mut self, modulation: Modulation) -> Self {
        self.modulation = modulation;
        self
    }
}

/// Endless yoyo between the final value and `final + amplitude`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breathing {
    pub amplitude: f32,
    /// One direction of the yoyo
    pub half_period_ms: f64,
    pub ease: Ease,
}

impl Default for Breathing {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            half_period_ms: 2000.0,
            ease: Ease::SineInOut,
        }
    }
}

/// Result of sampling a timeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineSample {
    pub value: f32,
    /// Index of the active step; `None` before the first step and once the
    /// steps are done
    pub step: Option<usize>,
    pub finished: bool,
}

/// Sequence of steps starting from a set value
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    initial: f32,
    start_ms: f64,
    /// (step, start value, end value, start time)
    resolved: Vec<(Step, f32, f32, f64)>,
    breathing: Option<Breathing>,
}

impl Timeline {
    /// Empty timeline holding `initial` from `start_ms` on
    pub fn new(initial: f32, start_ms: f64) -> Self {
        Self {
            initial,
            start_ms,
            resolved: Vec::new(),
            breathing: None,
        }
    }

    pub fn then(mut self, step: Step) -> Self {
        let (from, at) = match self.resolved.last() {
            Some(&(prev, _, end, start)) => (end, start + prev.duration_ms),
            None => (self.initial, self.start_ms),
        };
        let to = match step.target {
            Target::Absolute(v) => v,
            Target::Relative(dv) => from + dv,
        };
        self.resolved.push((step, from, to, at));
        self
    }

    pub fn breathe(mut self, breathing: Breathing) -> Self {
        self.breathing = Some(breathing);
        self
    }

    /// When the last step completes
    pub fn end_ms(&self) -> f64 {
        self.resolved
            .last()
            .map_or(self.start_ms, |&(step, _, _, start)| start + step.duration_ms)
    }

    pub fn final_value(&self) -> f32 {
        self.resolved.last().map_or(self.initial, |&(_, _, end, _)| end)
    }

    pub fn sample(&self, now_ms: f64) -> TimelineSample {
        if now_ms < self.start_ms {
            return TimelineSample {
                value: self.initial,
                step: None,
                finished: false,
            };
        }

        for (index, &(step, from, to, start)) in self.resolved.iter().enumerate() {
            let end = start + step.duration_ms;
            if now_ms < end {
                let tween = Tween::new(from, to, start, step.duration_ms, step.ease);
                let p = tween.progress(now_ms);
                return TimelineSample {
                    value: tween.value(now_ms) + step.modulation.offset(p),
                    step: Some(index),
                    finished: false,
                };
            }
        }

        let base = self.final_value();
        let value = match self.breathing {
            Some(b) if b.half_period_ms > 0.0 => {
                let phase = (now_ms - self.end_ms()) / b.half_period_ms;
                let frac = phase.fract() as f32;
                // Even half-cycles go out, odd ones come back
                let p = if (phase as u64) % 2 == 0 { frac } else { 1.0 - frac };
                base + b.amplitude * b.ease.apply(p)
            }
            _ => base,
        };
        TimelineSample {
            value,
            step: None,
            finished: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ALL: [Ease; 7] = [
        Ease::Linear,
        Ease::PowerIn(2),
        Ease::PowerOut(4),
        Ease::PowerInOut(2),
        Ease::SineInOut,
        Ease::ElasticOut {
            amplitude: 1.0,
            period: 0.3,
        },
        Ease::BackOut { overshoot: 1.7 },
    ];

    #[test]
    fn test_easing_endpoints() {
        for ease in ALL {
            assert!(ease.apply(0.0).abs() < 1e-4, "{:?} at 0", ease);
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-4, "{:?} at 1", ease);
        }
    }

    #[test]
    fn test_in_out_is_symmetric() {
        let ease = Ease::PowerInOut(2);
        assert!((ease.apply(0.5) - 0.5).abs() < 1e-6);
        assert!((ease.apply(0.25) + ease.apply(0.75) - 1.0).abs() < 1e-6);
    }

    fn exceeds_one(f: impl Fn(f32) -> f32) -> bool {
        (0..100).any(|i| f(i as f32 / 100.0) > 1.0)
    }

    #[test]
    fn test_overshooting_eases() {
        let back = Ease::BackOut { overshoot: 1.7 };
        assert!(exceeds_one(|t| back.apply(t)));
        let elastic = Ease::ElasticOut {
            amplitude: 1.0,
            period: 0.3,
        };
        assert!(exceeds_one(|t| elastic.apply(t)));
        assert!(!exceeds_one(|t| Ease::PowerOut(2).apply(t)));
    }

    #[test]
    fn test_elastic_degenerate_parameters_stay_finite() {
        for (amplitude, period) in [(0.0, 0.3), (-1.0, 0.3), (1.0, 0.0)] {
            let ease = Ease::ElasticOut { amplitude, period };
            for i in 0..=20 {
                let t = i as f32 / 20.0;
                assert!(ease.apply(t).is_finite(), "{:?} at {}", ease, t);
            }
            assert_eq!(ease.apply(1.0), 1.0);
        }
    }

    #[test]
    fn test_tween_clamps() {
        let tween = Tween::new(-90.0, 45.0, 1000.0, 1500.0, Ease::PowerInOut(2));
        assert_eq!(tween.value(0.0), -90.0);
        assert_eq!(tween.value(5000.0), 45.0);
        assert!(!tween.is_finished(2000.0));
        assert!(tween.is_finished(2500.0));
    }

    #[test]
    fn test_timeline_sequencing() {
        let timeline = Timeline::new(-90.0, 200.0)
            .then(Step::to(Target::Absolute(630.0), 2500.0, Ease::PowerIn(2)))
            .then(Step::to(Target::Relative(-585.0), 3000.0, Ease::PowerOut(4)))
            .then(Step::to(Target::Absolute(45.0), 1200.0, Ease::BackOut { overshoot: 1.7 }));

        assert_eq!(timeline.sample(0.0).value, -90.0);
        assert_eq!(timeline.sample(100.0).step, None);
        assert_eq!(timeline.sample(300.0).step, Some(0));
        assert_eq!(timeline.sample(2700.0).step, Some(1));
        assert!((timeline.sample(2700.0).value - 630.0).abs() < 1e-3);
        assert_eq!(timeline.sample(5800.0).step, Some(2));
        assert_eq!(timeline.end_ms(), 6900.0);

        let done = timeline.sample(7000.0);
        assert!(done.finished);
        assert_eq!(done.value, 45.0);
    }

    #[test]
    fn test_breathing_yoyo() {
        let timeline = Timeline::new(10.0, 0.0)
            .then(Step::to(Target::Absolute(20.0), 100.0, Ease::Linear))
            .breathe(Breathing::default());
        assert!((timeline.sample(100.0).value - 20.0).abs() < 1e-5);
        assert!((timeline.sample(2100.0).value - 21.0).abs() < 1e-4);
        assert!((timeline.sample(4100.0).value - 20.0).abs() < 1e-4);
        assert!((timeline.sample(1100.0).value - 20.5).abs() < 1e-4);
    }

    #[test]
    fn test_wobble_fades_out() {
        let wobble = Modulation::Wobble {
            cycles: 8.0,
            amplitude: 2.0,
        };
        assert_eq!(wobble.offset(0.0), 0.0);
        assert!(wobble.offset(1.0).abs() < 1e-5);
        let momentum = Modulation::Momentum {
            after: 0.7,
            amplitude: 3.0,
        };
        assert_eq!(momentum.offset(0.5), 0.0);
        assert!(momentum.offset(0.8) > 0.0);
    }

    proptest! {
        #[test]
        fn prop_power_eases_are_monotonic(n in 1u8..=4, a in 0.0f32..1.0, b in 0.0f32..1.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            for ease in [Ease::PowerIn(n), Ease::PowerOut(n), Ease::PowerInOut(n)] {
                prop_assert!(ease.apply(lo) <= ease.apply(hi) + 1e-6);
            }
        }
    }
}
