//! Muzzle flash: короткий таймер + flicker + трассер

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::RevolverConfig;

/// Muzzle flash (light + mesh + tracer streak)
///
/// Жизненный цикл:
/// - `trigger()` → time_remaining = duration (перезапуск, без stacking)
/// - `tick()` → уменьшает таймер, рандомит flicker пока активна
/// - time_remaining ≤ 0 → flash и tracer скрыты целиком (без промежуточных состояний)
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[reflect(Component)]
pub struct MuzzleFlash {
    /// Остаток времени (0 = неактивна)
    pub time_remaining: f32,

    /// Полная длительность (для линейного fade яркости)
    pub duration: f32,

    /// Flicker scale этого кадра (x = y, z = по оси выстрела)
    pub flicker_scale: Vec3,

    /// Flicker поворот вокруг оси ствола этого кадра
    pub flicker_roll: f32,
}

impl Default for MuzzleFlash {
    fn default() -> Self {
        Self::new(RevolverConfig::default().flash_duration)
    }
}

impl MuzzleFlash {
    pub fn new(duration: f32) -> Self {
        Self {
            time_remaining: 0.0,
            duration,
            flicker_scale: Vec3::ONE,
            flicker_roll: 0.0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.time_remaining > 0.0
    }

    /// Трассер виден ровно в окне вспышки
    pub fn tracer_visible(&self) -> bool {
        self.is_active()
    }

    /// Яркость point light: линейный fade от пика до нуля к истечению
    pub fn intensity(&self, peak: f32) -> f32 {
        if !self.is_active() || self.duration <= 0.0 {
            return 0.0;
        }
        peak * (self.time_remaining / self.duration).clamp(0.0, 1.0)
    }

    /// Запустить вспышку заново (предыдущий остаток отбрасывается)
    pub fn trigger(&mut self, config: &RevolverConfig, rng: &mut impl Rng) {
        self.duration = config.flash_duration;
        self.time_remaining = config.flash_duration;
        self.roll_flicker(config, rng);
    }

    /// Tick таймера; flicker рандомится каждый активный кадр
    pub fn tick(&mut self, delta: f32, config: &RevolverConfig, rng: &mut impl Rng) {
        if !self.is_active() {
            return;
        }

        self.time_remaining = (self.time_remaining - delta).max(0.0);

        if self.is_active() {
            self.roll_flicker(config, rng);
        } else {
            self.flicker_scale = Vec3::ONE;
            self.flicker_roll = 0.0;
        }
    }

    fn roll_flicker(&mut self, config: &RevolverConfig, rng: &mut impl Rng) {
        let (scale_min, scale_max) = config.flash_scale_range;
        let (depth_min, depth_max) = config.flash_depth_range;

        let scale = rng.gen_range(scale_min..scale_max);
        self.flicker_scale = Vec3::new(scale, scale, rng.gen_range(depth_min..depth_max));
        self.flicker_roll = rng.gen_range(0.0..std::f32::consts::TAU);
    }
}
