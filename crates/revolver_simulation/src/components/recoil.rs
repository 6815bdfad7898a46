//! Recoil: damped spring (muzzle climb)
//!
//! Модель: a = -k·angle - c·velocity, semi-implicit Euler на кадр.
//! Пол у нуля: отдача не уходит "вперёд" положения покоя.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::RevolverConfig;

/// Предел подшагов на один кадр (остаток длинного кадра отбрасывается)
pub const MAX_SPRING_SUBSTEPS: u32 = 16;

/// Состояние пружины отдачи
///
/// Инвариант: angle ≥ 0. Сверху angle НЕ ограничен — потолок 1.2 rad
/// применяется только к выходному повороту (см. `muzzle_climb`), иначе
/// изменилась бы динамика затухания.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, Reflect)]
#[reflect(Component)]
pub struct RecoilSpring {
    pub angle: f32,
    pub velocity: f32,
}

impl RecoilSpring {
    /// Проинтегрировать пружину на `delta` секунд
    ///
    /// Кадр длиннее `spring_max_step` режется на равные подшаги
    /// (не больше MAX_SPRING_SUBSTEPS), обычный кадр = один шаг Euler.
    pub fn integrate(&mut self, delta: f32, config: &RevolverConfig) {
        if delta <= 0.0 {
            return;
        }

        let max_step = config.spring_max_step;
        let substeps = (delta / max_step).ceil().clamp(1.0, MAX_SPRING_SUBSTEPS as f32) as u32;
        let step = (delta / substeps as f32).min(max_step);

        for _ in 0..substeps {
            self.step(step, config);
        }
    }

    fn step(&mut self, dt: f32, config: &RevolverConfig) {
        let accel = -config.spring_stiffness * self.angle - config.spring_damping * self.velocity;
        self.velocity += accel * dt;
        self.angle += self.velocity * dt;

        if self.angle < 0.0 {
            self.angle = 0.0;
            // Deadband: гасим вечную micro-осцилляцию в покое
            if self.velocity.abs() < config.rest_velocity_deadband {
                self.velocity = 0.0;
            }
        }
    }

    /// Импульс скорости (выстрел)
    pub fn kick(&mut self, impulse: f32) {
        self.velocity += impulse;
    }

    /// Поворот muzzle climb с потолком (spring state не трогаем)
    pub fn muzzle_climb(&self, ceiling: f32) -> f32 {
        self.angle.min(ceiling)
    }

    pub fn is_at_rest(&self) -> bool {
        self.angle == 0.0 && self.velocity == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_stays_at_rest() {
        let config = RevolverConfig::default();
        let mut spring = RecoilSpring::default();

        for _ in 0..100 {
            spring.integrate(0.016, &config);
        }

        assert!(spring.is_at_rest());
    }

    #[test]
    fn test_kick_adds_velocity() {
        let mut spring = RecoilSpring::default();
        spring.kick(18.0);
        assert_eq!(spring.velocity, 18.0);

        spring.kick(0.5);
        assert_eq!(spring.velocity, 18.5);
    }

    #[test]
    fn test_live_kick_settles() {
        let config = RevolverConfig::default();
        let mut spring = RecoilSpring::default();
        spring.kick(config.live_impulse);

        let mut peak: f32 = 0.0;
        for _ in 0..300 {
            spring.integrate(1.0 / 60.0, &config);
            assert!(spring.angle >= 0.0);
            peak = peak.max(spring.angle);
        }

        assert!(peak > 0.5, "live shot should climb noticeably, peak = {}", peak);
        assert!(spring.is_at_rest(), "spring = {:?}", spring);
    }

    #[test]
    fn test_huge_delta_does_not_explode() {
        let config = RevolverConfig::default();
        let mut spring = RecoilSpring::default();
        spring.kick(config.live_impulse);

        // Пауза рендера на 10 секунд
        spring.integrate(10.0, &config);
        assert!(spring.angle.is_finite() && spring.velocity.is_finite());
        assert!(spring.angle < 2.0, "spring = {:?}", spring);

        for _ in 0..10 {
            spring.integrate(10.0, &config);
        }
        assert!(spring.is_at_rest(), "spring = {:?}", spring);
    }

    #[test]
    fn test_zero_delta_is_noop() {
        let config = RevolverConfig::default();
        let mut spring = RecoilSpring { angle: 0.3, velocity: 2.0 };
        spring.integrate(0.0, &config);
        assert_eq!(spring, RecoilSpring { angle: 0.3, velocity: 2.0 });
    }

    #[test]
    fn test_muzzle_climb_ceiling() {
        let spring = RecoilSpring { angle: 3.0, velocity: 0.0 };
        assert_eq!(spring.muzzle_climb(1.2), 1.2);
        // Внутреннее состояние не обрезано
        assert_eq!(spring.angle, 3.0);

        let spring = RecoilSpring { angle: 0.4, velocity: 0.0 };
        assert_eq!(spring.muzzle_climb(1.2), 0.4);
    }
}
