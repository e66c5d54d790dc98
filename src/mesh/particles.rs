//! Drifting sand/wind particle field

use glam::Vec3;
use rand::Rng;

use crate::consts::{PARTICLE_X_MAX, PARTICLE_X_MIN, PARTICLE_Y_MAX, PARTICLE_Y_MIN};

/// Wrap box for the drift. Particles leaving one side reappear on the other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleBounds {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

impl Default for ParticleBounds {
    fn default() -> Self {
        Self {
            x_min: PARTICLE_X_MIN,
            x_max: PARTICLE_X_MAX,
            y_min: PARTICLE_Y_MIN,
            y_max: PARTICLE_Y_MAX,
        }
    }
}

impl ParticleBounds {
    /// Toroidal wrap of one coordinate
    #[inline]
    fn wrap(value: f32, min: f32, max: f32) -> f32 {
        if value > max {
            min
        } else if value < min {
            max
        } else {
            value
        }
    }
}

/// Point cloud whose flat position buffer is rewritten every frame
#[derive(Debug, Clone)]
pub struct ParticleField {
    pub positions: Vec<f32>,
    pub bounds: ParticleBounds,
    pub color: u32,
    pub size: f32,
    pub opacity: f32,
    /// Set whenever positions changed since the renderer last uploaded them
    pub dirty: bool,
}

impl ParticleField {
    /// Scatter `count` particles uniformly over `min..max`
    pub fn scatter<R: Rng + ?Sized>(count: usize, min: Vec3, max: Vec3, rng: &mut R) -> Self {
        let mut positions = Vec::with_capacity(count * 3);
        for _ in 0..count {
            positions.push(rng.random_range(min.x..=max.x));
            positions.push(rng.random_range(min.y..=max.y));
            positions.push(rng.random_range(min.z..=max.z));
        }
        Self::from_positions(positions)
    }

    /// Wrap an existing buffer (3 floats per particle)
    pub fn from_positions(positions: Vec<f32>) -> Self {
        Self {
            positions,
            bounds: ParticleBounds::default(),
            color: 0xf4e4c1,
            size: 0.05,
            opacity: 0.6,
            dirty: true,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::from_slice(&self.positions[i * 3..i * 3 + 3])
    }

    /// Advance the drift by one frame.
    ///
    /// Drift is keyed by the buffer index `i` (not the particle number) and
    /// scaled by `frame_scale`, the frame length in reference frames.
    pub fn update(&mut self, now_ms: f64, frame_scale: f32) {
        let bounds = self.bounds;
        for (i, p) in self.positions.chunks_exact_mut(3).enumerate() {
            let key = (i * 3) as f64;
            p[0] += (now_ms * 0.001 + key).sin() as f32 * 0.02 * frame_scale;
            p[1] += (now_ms * 0.002 + key).sin() as f32 * 0.01 * frame_scale;

            p[0] = ParticleBounds::wrap(p[0], bounds.x_min, bounds.x_max);
            p[1] = ParticleBounds::wrap(p[1], bounds.y_min, bounds.y_max);
        }
        self.dirty = true;
    }

    /// Take the dirty flag, returning whether an upload is needed
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_particle_past_upper_x_wraps_to_lower_bound() {
        let mut field = ParticleField::from_positions(vec![150.0, 5.0, 0.0]);
        field.update(0.0, 1.0);
        assert_eq!(field.len(), 1);
        assert_eq!(field.position(0).x, PARTICLE_X_MIN);
    }

    #[test]
    fn test_particle_below_floor_wraps_to_ceiling() {
        let mut field = ParticleField::from_positions(vec![0.0, -5.0, 0.0]);
        field.update(0.0, 1.0);
        assert_eq!(field.position(0).y, PARTICLE_Y_MAX);
    }

    #[test]
    fn test_update_marks_dirty() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut field = ParticleField::scatter(
            50,
            Vec3::new(-100.0, -2.0, -10.0),
            Vec3::new(100.0, 8.0, 90.0),
            &mut rng,
        );
        assert!(field.take_dirty());
        assert!(!field.dirty);
        field.update(1000.0, 1.0);
        assert!(field.take_dirty());
    }

    #[test]
    fn test_drift_is_keyed_by_buffer_index() {
        let mut field = ParticleField::from_positions(vec![0.0; 6]);
        field.update(0.0, 1.0);
        // Second particle starts at buffer index 3
        assert!((field.position(1).x - 3.0f32.sin() * 0.02).abs() < 1e-6);
        assert_eq!(field.position(0).x, 0.0);
    }

    proptest! {
        #[test]
        fn prop_wrap_keeps_every_particle_in_bounds(
            coords in prop::collection::vec((-300.0f32..300.0, -20.0f32..30.0, -10.0f32..90.0), 1..64),
            now in 0.0f64..1.0e7,
            scale in 0.0f32..6.0,
        ) {
            let flat: Vec<f32> = coords.iter().flat_map(|&(x, y, z)| [x, y, z]).collect();
            let mut field = ParticleField::from_positions(flat);
            let count = field.len();
            field.update(now, scale);
            prop_assert_eq!(field.len(), count);
            for i in 0..field.len() {
                let p = field.position(i);
                prop_assert!(p.x >= PARTICLE_X_MIN && p.x <= PARTICLE_X_MAX);
                prop_assert!(p.y >= PARTICLE_Y_MIN && p.y <= PARTICLE_Y_MAX);
            }
        }
    }
}
