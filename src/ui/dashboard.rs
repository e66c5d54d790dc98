//! Gauge dashboard
//!
//! Three gauges and an achievement stat that drift on a slow ticker, plus the
//! decorative diamond particles and click sparkles around them. The dashboard
//! shares nothing with the 3D scene apart from the color theme.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::gauge::{FaceLayout, Gauge, GaugeReading};
use super::tween::{Ease, Tween};
use crate::theme::{ColorTheme, Palette};

/// Delay before the ticker starts
pub const TICKER_DELAY_MS: f64 = 2000.0;
pub const TICKER_PERIOD_MS: f64 = 3000.0;
pub const PARTICLE_PERIOD_MS: f64 = 2000.0;
pub const PARTICLE_LIFETIME_MS: f64 = 20_000.0;
pub const SPARKLE_MS: f64 = 1000.0;

const GAUGE_CHANCE: f64 = 0.2;
const PARTICLE_CHANCE: f64 = 0.3;

/// Floating diamond in the overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiamondParticle {
    /// Horizontal position, percent of the overlay width
    pub left_pct: f32,
    pub delay_s: f32,
    pub duration_s: f32,
    pub born_ms: f64,
}

/// Burst drawn over a clicked gauge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sparkle {
    pub gauge: usize,
    pub born_ms: f64,
}

impl Sparkle {
    /// Scale and opacity at `now_ms`
    pub fn appearance(&self, now_ms: f64) -> (f32, f32) {
        let t = Tween::new(0.0, 1.0, self.born_ms, SPARKLE_MS, Ease::PowerOut(2)).value(now_ms);
        (1.0 + 19.0 * t, 1.0 - t)
    }

    pub fn is_done(&self, now_ms: f64) -> bool {
        now_ms >= self.born_ms + SPARKLE_MS
    }
}

/// Something the ticker changed, for the host to mirror
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DashboardEvent {
    Achievement { target: f32 },
    GaugeMoved { gauge: usize, value: u32 },
    ParticleSpawned,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub gauges: Vec<Gauge>,
    pub layout: FaceLayout,
    pub theme: ColorTheme,
    pub particles: Vec<DiamondParticle>,
    pub sparkles: Vec<Sparkle>,
    achievement: Tween,
    next_tick_ms: f64,
    next_particle_ms: f64,
    rng: Pcg32,
}

impl Dashboard {
    pub const GAUGES: [(&'static str, u32); 3] = [("Revenue", 75), ("Deals", 60), ("Clients", 85)];
    pub const INITIAL_ACHIEVEMENT: f32 = 87.0;

    /// Dashboard whose clock starts at `now_ms`; gauges begin their intro
    pub fn new(now_ms: f64, theme: ColorTheme, seed: u64) -> Self {
        let gauges = Self::GAUGES
            .iter()
            .enumerate()
            .map(|(index, &(label, value))| {
                let mut gauge = Gauge::new(label, value, now_ms);
                gauge.start_intro(index, now_ms);
                gauge
            })
            .collect();
        let achievement = Self::INITIAL_ACHIEVEMENT;
        Self {
            gauges,
            layout: FaceLayout::standard(),
            theme,
            particles: Vec::new(),
            sparkles: Vec::new(),
            achievement: Tween::new(achievement, achievement, now_ms, 0.0, Ease::Linear),
            next_tick_ms: now_ms + TICKER_DELAY_MS + TICKER_PERIOD_MS,
            next_particle_ms: now_ms + PARTICLE_PERIOD_MS,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn palette(&self) -> Palette {
        self.theme.palette()
    }

    /// Achievement percentage as displayed (snapped to whole numbers)
    pub fn achievement(&self, now_ms: f64) -> u32 {
        self.achievement.value(now_ms).round() as u32
    }

    /// Run one ticker beat: drift the achievement stat and sometimes move a gauge
    pub fn ticker(&mut self, now_ms: f64) -> Vec<DashboardEvent> {
        let mut events = Vec::new();

        let current = self.achievement(now_ms) as f32;
        let target = (current + (self.rng.random::<f32>() - 0.5) * 5.0).clamp(0.0, 100.0);
        self.achievement = Tween::new(current, target, now_ms, 1000.0, Ease::PowerInOut(2));
        events.push(DashboardEvent::Achievement { target });

        if self.rng.random_bool(GAUGE_CHANCE) && !self.gauges.is_empty() {
            let index = self.rng.random_range(0..self.gauges.len());
            let delta = (self.rng.random::<f32>() - 0.5) * 20.0;
            let value = self.gauges[index].nudge(delta, now_ms);
            log::debug!("Ticker moved {} to {}", self.gauges[index].label, value);
            events.push(DashboardEvent::GaugeMoved { gauge: index, value });
        }
        events
    }

    /// Roll for a new floating diamond and retire expired ones
    pub fn particle_beat(&mut self, now_ms: f64) -> Option<DiamondParticle> {
        self.particles.retain(|p| now_ms - p.born_ms < PARTICLE_LIFETIME_MS);
        if !self.rng.random_bool(PARTICLE_CHANCE) {
            return None;
        }
        let particle = DiamondParticle {
            left_pct: self.rng.random::<f32>() * 100.0,
            delay_s: self.rng.random::<f32>() * 5.0,
            duration_s: 15.0 + self.rng.random::<f32>() * 10.0,
            born_ms: now_ms,
        };
        self.particles.push(particle);
        Some(particle)
    }

    /// Run every ticker and particle beat that is due by `now_ms`
    pub fn poll(&mut self, now_ms: f64) -> Vec<DashboardEvent> {
        let mut events = Vec::new();
        while self.next_tick_ms <= now_ms {
            let at = self.next_tick_ms;
            events.extend(self.ticker(at));
            self.next_tick_ms += TICKER_PERIOD_MS;
        }
        while self.next_particle_ms <= now_ms {
            let at = self.next_particle_ms;
            if self.particle_beat(at).is_some() {
                events.push(DashboardEvent::ParticleSpawned);
            }
            self.next_particle_ms += PARTICLE_PERIOD_MS;
        }
        self.sparkles.retain(|s| !s.is_done(now_ms));
        events
    }

    /// Click on gauge `index`: random value plus a sparkle. Returns the new value.
    pub fn click(&mut self, index: usize, now_ms: f64) -> Option<u32> {
        let gauge = self.gauges.get_mut(index)?;
        let value = gauge.click(now_ms, &mut self.rng);
        self.sparkles.push(Sparkle { gauge: index, born_ms: now_ms });
        Some(value)
    }

    pub fn hover(&mut self, index: usize, now_ms: f64) {
        if let Some(gauge) = self.gauges.get_mut(index) {
            gauge.hover(now_ms);
        }
    }

    pub fn leave(&mut self, index: usize) {
        if let Some(gauge) = self.gauges.get_mut(index) {
            gauge.leave();
        }
    }

    pub fn readings(&mut self, now_ms: f64) -> Vec<GaugeReading> {
        self.gauges.iter_mut().map(|g| g.sample(now_ms)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_gauges() {
        let dash = Dashboard::new(0.0, ColorTheme::Diamond, 1);
        let labels: Vec<_> = dash.gauges.iter().map(|g| (g.label.as_str(), g.value)).collect();
        assert_eq!(labels, vec![("Revenue", 75), ("Deals", 60), ("Clients", 85)]);
        assert_eq!(dash.achievement(0.0), 87);
    }

    #[test]
    fn test_ticker_cadence() {
        let mut dash = Dashboard::new(0.0, ColorTheme::Diamond, 2);
        let achievements = |events: &[DashboardEvent]| {
            events
                .iter()
                .filter(|e| matches!(e, DashboardEvent::Achievement { .. }))
                .count()
        };
        assert_eq!(achievements(&dash.poll(4999.0)), 0);
        assert_eq!(achievements(&dash.poll(5000.0)), 1);
        assert_eq!(achievements(&dash.poll(7999.0)), 0);
        // A stalled host catches up on every missed beat
        assert_eq!(achievements(&dash.poll(17_000.0)), 4);
    }

    #[test]
    fn test_achievement_drift_is_bounded() {
        let mut dash = Dashboard::new(0.0, ColorTheme::Diamond, 3);
        let mut last = dash.achievement(0.0) as f32;
        for beat in 0..200 {
            let now = 5000.0 + beat as f64 * TICKER_PERIOD_MS;
            for event in dash.ticker(now) {
                if let DashboardEvent::Achievement { target } = event {
                    assert!((target - last).abs() <= 2.5 + 1e-4);
                    assert!((0.0..=100.0).contains(&target));
                }
            }
            last = dash.achievement(now + 1000.0) as f32;
        }
    }

    #[test]
    fn test_some_ticks_move_gauges() {
        let mut dash = Dashboard::new(0.0, ColorTheme::Diamond, 4);
        let events = dash.poll(5000.0 + 100.0 * TICKER_PERIOD_MS);
        let moves: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                DashboardEvent::GaugeMoved { gauge, value } => Some((*gauge, *value)),
                _ => None,
            })
            .collect();
        // One in five beats on average
        assert!(!moves.is_empty() && moves.len() < 50);
        assert!(moves.iter().all(|&(g, v)| g < 3 && v <= 100));
    }

    #[test]
    fn test_particles_expire() {
        let mut dash = Dashboard::new(0.0, ColorTheme::Diamond, 5);
        dash.poll(60_000.0);
        assert!(!dash.particles.is_empty());
        assert!(dash.particles.iter().all(|p| (15.0..25.0).contains(&p.duration_s)));
        dash.poll(60_000.0 + PARTICLE_LIFETIME_MS + PARTICLE_PERIOD_MS);
        assert!(dash.particles.iter().all(|p| p.born_ms > 60_000.0));
    }

    #[test]
    fn test_click_sparkles() {
        let mut dash = Dashboard::new(0.0, ColorTheme::Ruby, 6);
        let value = dash.click(1, 10_000.0).unwrap();
        assert!(value < 100);
        assert_eq!(dash.sparkles.len(), 1);
        let (scale, opacity) = dash.sparkles[0].appearance(11_000.0);
        assert!((scale - 20.0).abs() < 1e-4 && opacity.abs() < 1e-4);
        dash.poll(11_000.0);
        assert!(dash.sparkles.is_empty());
        assert!(dash.click(7, 0.0).is_none());
    }
}
