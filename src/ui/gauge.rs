//! Watch-style gauges
//!
//! A gauge maps a 0–100 value onto a needle sweeping from −90° to +90°. The
//! needle is always driven by a [`Timeline`]; interactions replace it.

use rand::Rng;

use super::tween::{Breathing, Ease, Modulation, Step, Target, Timeline};

/// Delay between the intro spins of neighboring gauges
pub const INTRO_STAGGER_MS: f64 = 200.0;
/// How long a gauge glows after a ticker update
pub const GLOW_MS: f64 = 1000.0;

/// Needle rotation (degrees) for a value
#[inline]
pub fn value_to_rotation(value: f32) -> f32 {
    value * 1.8 - 90.0
}

/// Value shown for a needle rotation (degrees)
#[inline]
pub fn rotation_to_value(rotation: f32) -> i32 {
    ((rotation + 90.0) / 1.8).round() as i32
}

/// Guilloché texture on the gauge face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacePattern {
    Tapisserie,
    Sunburst,
    Meteorite,
}

impl FacePattern {
    pub fn for_label(label: &str) -> Self {
        match label {
            "Revenue" => FacePattern::Tapisserie,
            "Deals" => FacePattern::Sunburst,
            _ => FacePattern::Meteorite,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FacePattern::Tapisserie => "tapisserie",
            FacePattern::Sunburst => "sunburst",
            FacePattern::Meteorite => "meteorite",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub angle_deg: f32,
    pub major: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Numeral {
    pub angle_deg: f32,
    pub value: u32,
}

/// Static dial furniture
#[derive(Debug, Clone, PartialEq)]
pub struct FaceLayout {
    pub ticks: Vec<Tick>,
    pub numerals: Vec<Numeral>,
    /// Angles of the diamonds set into the bezel
    pub bezel_diamonds: Vec<f32>,
}

impl FaceLayout {
    pub fn standard() -> Self {
        let ticks = (0..=10)
            .map(|i| Tick {
                angle_deg: i as f32 * 18.0 - 90.0,
                major: i % 2 == 0,
            })
            .collect();
        let numerals = (0..=10)
            .step_by(2)
            .map(|i| Numeral {
                angle_deg: i as f32 * 18.0 - 90.0,
                value: i * 10,
            })
            .collect();
        // One diamond every five minute marks
        let bezel_diamonds = (0..60).step_by(5).map(|i| i as f32 * 6.0 - 90.0).collect();
        Self {
            ticks,
            numerals,
            bezel_diamonds,
        }
    }
}

/// When the numeric readout follows the needle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Readout {
    Frozen,
    /// Only during this timeline step, and only while in 0..=100
    DuringStep(usize),
    Live,
}

/// What the host draws this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeReading {
    pub rotation: f32,
    pub display: i32,
    pub glowing: bool,
}

#[derive(Debug, Clone)]
pub struct Gauge {
    pub label: String,
    /// Logical value, 0..=100
    pub value: u32,
    pub pattern: FacePattern,
    pub hovering: bool,
    needle: Timeline,
    readout: Readout,
    display: i32,
    glow_until_ms: f64,
}

impl Gauge {
    pub fn new(label: &str, value: u32, now_ms: f64) -> Self {
        let value = value.min(100);
        Self {
            label: label.to_owned(),
            value,
            pattern: FacePattern::for_label(label),
            hovering: false,
            needle: Timeline::new(value_to_rotation(value as f32), now_ms),
            readout: Readout::Frozen,
            display: value as i32,
            glow_until_ms: f64::NEG_INFINITY,
        }
    }

    fn target_rotation(&self) -> f32 {
        value_to_rotation(self.value as f32)
    }

    /// Current needle rotation without touching the readout
    pub fn rotation(&self, now_ms: f64) -> f32 {
        self.needle.sample(now_ms).value
    }

    /// Theatrical load-in: wind up 1.75 turns, decelerate onto the value,
    /// settle with a small overshoot, then breathe
    pub fn start_intro(&mut self, index: usize, now_ms: f64) {
        let target = self.target_rotation();
        self.needle = Timeline::new(-90.0, now_ms + index as f64 * INTRO_STAGGER_MS)
            .then(
                Step::to(Target::Absolute(630.0), 2500.0, Ease::PowerIn(2)).with_modulation(Modulation::Wobble {
                    cycles: 8.0,
                    amplitude: 2.0,
                }),
            )
            .then(Step::to(Target::Absolute(target), 3000.0, Ease::PowerOut(4)))
            .then(Step::to(Target::Absolute(target), 1200.0, Ease::BackOut { overshoot: 1.7 }))
            .breathe(Breathing::default());
        self.readout = Readout::DuringStep(1);
    }

    /// Pointer entered: anticipation, a weighted 1.25-turn spin, elastic settle
    pub fn hover(&mut self, now_ms: f64) {
        self.hovering = true;
        let target = self.target_rotation();
        self.needle = Timeline::new(self.rotation(now_ms), now_ms)
            .then(Step::to(Target::Absolute(target - 15.0), 300.0, Ease::PowerOut(2)))
            .then(
                Step::to(Target::Relative(450.0), 1800.0, Ease::PowerInOut(3)).with_modulation(Modulation::Momentum {
                    after: 0.7,
                    amplitude: 3.0,
                }),
            )
            .then(Step::to(
                Target::Absolute(target),
                1500.0,
                Ease::ElasticOut {
                    amplitude: 1.0,
                    period: 0.8,
                },
            ))
            .breathe(Breathing::default());
        self.readout = Readout::Frozen;
    }

    pub fn leave(&mut self) {
        self.hovering = false;
    }

    /// Clicked: jump to a random value in 0..100 with an elastic swing.
    /// Returns the new value.
    pub fn click<R: Rng + ?Sized>(&mut self, now_ms: f64, rng: &mut R) -> u32 {
        self.value = rng.random_range(0..100);
        self.move_needle(
            now_ms,
            1500.0,
            Ease::ElasticOut {
                amplitude: 1.0,
                period: 0.3,
            },
        );
        log::debug!("{} gauge set to {}", self.label, self.value);
        self.value
    }

    /// Ticker update: shift by `delta`, clamped to 0..=100, and glow briefly
    pub fn nudge(&mut self, delta: f32, now_ms: f64) -> u32 {
        self.value = (self.value as f32 + delta).clamp(0.0, 100.0).round() as u32;
        self.move_needle(now_ms, 1500.0, Ease::PowerInOut(2));
        self.glow_until_ms = now_ms + GLOW_MS;
        self.value
    }

    fn move_needle(&mut self, now_ms: f64, duration_ms: f64, ease: Ease) {
        let target = self.target_rotation();
        self.needle = Timeline::new(self.rotation(now_ms), now_ms).then(Step::to(Target::Absolute(target), duration_ms, ease));
        self.readout = Readout::Live;
    }

    pub fn sample(&mut self, now_ms: f64) -> GaugeReading {
        let sample = self.needle.sample(now_ms);
        let shown = rotation_to_value(sample.value);
        match self.readout {
            Readout::Live => self.display = shown,
            Readout::DuringStep(step) if sample.step == Some(step) && (0..=100).contains(&shown) => {
                self.display = shown;
            }
            Readout::DuringStep(_) | Readout::Frozen => {}
        }
        GaugeReading {
            rotation: sample.value,
            display: self.display,
            glowing: now_ms < self.glow_until_ms,
        }
    }

    /// Dial markup for the host page
    pub fn markup(&self, layout: &FaceLayout) -> String {
        let mut html = format!(
            r#"<div class="gauge-face" data-pattern="{}"><div class="gauge-ticks">"#,
            self.pattern.as_str()
        );
        for tick in &layout.ticks {
            html.push_str(&format!(
                r#"<div class="gauge-tick{}" style="transform: translateX(-50%) rotate({}deg)"></div>"#,
                if tick.major { " major" } else { "" },
                tick.angle_deg
            ));
        }
        html.push_str(r#"</div><div class="gauge-numbers">"#);
        for numeral in &layout.numerals {
            html.push_str(&format!(
                r#"<div class="gauge-number" style="transform: translateX(-50%) rotate({a}deg)"><span style="transform: rotate({b}deg); display: inline-block;">{v}</span></div>"#,
                a = numeral.angle_deg,
                b = -numeral.angle_deg,
                v = numeral.value
            ));
        }
        html.push_str(&format!(
            r#"</div><div class="gauge-needle" data-value="{v}"></div><div class="gauge-center"></div><div class="gauge-value">{v}%</div><div class="gauge-bezel">"#,
            v = self.value
        ));
        for angle in &layout.bezel_diamonds {
            html.push_str(&format!(
                r#"<div class="bezel-diamond" style="transform: rotate({}deg) translateY(-95px)"><div class="diamond-sparkle"></div></div>"#,
                angle
            ));
        }
        html.push_str(&format!(r#"</div></div><div class="gauge-label">{}</div>"#, self.label));
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_rotation_mapping() {
        assert_eq!(value_to_rotation(0.0), -90.0);
        assert_eq!(value_to_rotation(50.0), 0.0);
        assert_eq!(value_to_rotation(100.0), 90.0);
        assert_eq!(rotation_to_value(45.0), 75);
    }

    #[test]
    fn test_face_layout() {
        let layout = FaceLayout::standard();
        assert_eq!(layout.ticks.len(), 11);
        assert_eq!(layout.ticks.iter().filter(|t| t.major).count(), 6);
        let values: Vec<u32> = layout.numerals.iter().map(|n| n.value).collect();
        assert_eq!(values, vec![0, 20, 40, 60, 80, 100]);
        assert_eq!(layout.bezel_diamonds.len(), 12);
        assert_eq!(layout.ticks.last().unwrap().angle_deg, 90.0);
    }

    #[test]
    fn test_patterns_by_label() {
        assert_eq!(FacePattern::for_label("Revenue"), FacePattern::Tapisserie);
        assert_eq!(FacePattern::for_label("Deals"), FacePattern::Sunburst);
        assert_eq!(FacePattern::for_label("Clients"), FacePattern::Meteorite);
    }

    #[test]
    fn test_intro_is_staggered_and_lands() {
        let mut first = Gauge::new("Revenue", 75, 0.0);
        let mut third = Gauge::new("Clients", 85, 0.0);
        first.start_intro(0, 0.0);
        third.start_intro(2, 0.0);

        assert_eq!(third.sample(300.0).rotation, -90.0);
        assert!(first.sample(300.0).rotation > -90.0);

        // Spin (2.5 s) + decelerate (3 s) + settle (1.2 s)
        let done = first.sample(6700.0);
        assert!((done.rotation - 45.0).abs() < 1e-3);
        assert_eq!(done.display, 75);
    }

    #[test]
    fn test_intro_readout_only_while_decelerating() {
        let mut gauge = Gauge::new("Deals", 60, 0.0);
        gauge.start_intro(0, 0.0);
        // Winding up past 630°: readout untouched
        assert_eq!(gauge.sample(2000.0).display, 60);
        let reading = gauge.sample(5000.0);
        assert!((0..=100).contains(&reading.display));
    }

    #[test]
    fn test_click_moves_to_random_value() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut gauge = Gauge::new("Revenue", 75, 0.0);
        let value = gauge.click(1000.0, &mut rng);
        assert!(value < 100);
        let reading = gauge.sample(2500.0);
        assert!((reading.rotation - value_to_rotation(value as f32)).abs() < 1e-3);
        assert_eq!(reading.display, value as i32);
    }

    #[test]
    fn test_nudge_clamps_and_glows() {
        let mut gauge = Gauge::new("Clients", 95, 0.0);
        assert_eq!(gauge.nudge(10.0, 100.0), 100);
        assert!(gauge.sample(600.0).glowing);
        assert!(!gauge.sample(1200.0).glowing);
        assert_eq!(gauge.nudge(-150.0, 2000.0), 0);
    }

    #[test]
    fn test_hover_spins_and_returns() {
        let mut gauge = Gauge::new("Revenue", 75, 0.0);
        gauge.hover(0.0);
        assert!(gauge.hovering);
        // Anticipation pulls back 15°
        assert!((gauge.sample(300.0).rotation - 30.0).abs() < 1e-3);
        // Mid-spin the needle is well past its resting angle
        assert!(gauge.sample(1500.0).rotation > 45.0);
        assert!((gauge.sample(3600.0).rotation - 45.0).abs() < 1e-3);
        gauge.leave();
        assert!(!gauge.hovering);
    }

    #[test]
    fn test_markup_lists_dial_parts() {
        let gauge = Gauge::new("Deals", 60, 0.0);
        let html = gauge.markup(&FaceLayout::standard());
        assert_eq!(html.matches("gauge-tick").count(), 12);
        assert_eq!(html.matches("bezel-diamond").count(), 12);
        assert!(html.contains(r#"data-pattern="sunburst""#));
        assert!(html.contains("60%"));
    }

    proptest! {
        #[test]
        fn prop_value_rotation_round_trip(v in 0u32..=100) {
            prop_assert_eq!(rotation_to_value(value_to_rotation(v as f32)), v as i32);
        }
    }
}
