//! Tuning ядра анимации (все "reference" константы в одном Resource)
//!
//! Default = значения, на которых настроен визуал .357 Magnum.
//! Рендер-хост может подгрузить свой tuning из JSON через `from_json`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RevolverError};

/// Количество камор в барабане (шаг поворота = 60°)
pub const CHAMBER_COUNT: usize = 6;

/// Угол поворота барабана на один `rotation_step`
pub const CHAMBER_STEP_ANGLE: f32 = std::f32::consts::PI / 3.0;

/// Параметры анимации револьвера
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevolverConfig {
    // === Recoil spring ===
    /// Жёсткость пружины (k)
    pub spring_stiffness: f32,
    /// Демпфирование (c)
    pub spring_damping: f32,
    /// Максимальный шаг интегрирования (секунды); длинный кадр режется на подшаги
    pub spring_max_step: f32,
    /// Deadband скорости у нуля (гасит micro-jitter в покое)
    pub rest_velocity_deadband: f32,
    /// Импульс скорости при живом выстреле
    pub live_impulse: f32,
    /// Импульс скорости при осечке (dry click)
    pub dry_impulse: f32,
    /// Откат корпуса назад (X) на единицу recoil angle
    pub recoil_pull_back: f32,
    /// Подъём корпуса (Y) на единицу recoil angle
    pub recoil_lift: f32,
    /// Потолок muzzle climb (радианы)
    pub max_muzzle_climb: f32,

    // === Muzzle flash ===
    /// Длительность вспышки (секунды)
    pub flash_duration: f32,
    /// Пиковая яркость point light
    pub flash_peak_intensity: f32,
    /// Диапазон uniform scale вспышки (flicker)
    pub flash_scale_range: (f32, f32),
    /// Диапазон scale по оси выстрела (flicker)
    pub flash_depth_range: (f32, f32),

    // === Smoke ===
    /// Размер pool (слоты никогда не пере-аллоцируются)
    pub smoke_pool_size: usize,
    /// Сколько клубов дыма спавнить на один выстрел
    pub smoke_per_shot: usize,
    /// Точка вылета (срез ствола, пространство ствола)
    pub smoke_spawn_origin: Vec3,
    /// Начальный scale клуба
    pub smoke_scale_range: (f32, f32),
    /// Время жизни клуба (секунды)
    pub smoke_life_range: (f32, f32),
    /// Скорость вперёд (X)
    pub smoke_forward_speed_range: (f32, f32),
    /// Амплитуда бокового/вертикального jitter (полная ширина)
    pub smoke_jitter: f32,
    /// Начальная непрозрачность
    pub smoke_initial_opacity: f32,
    /// Всплытие (добавка к velocity.y в секунду)
    pub smoke_buoyancy: f32,
    /// Затухание скорости (множитель за кадр)
    pub smoke_damping: f32,
    /// Рост scale в секунду (scale *= 1 + growth * delta)
    pub smoke_growth: f32,
    /// Скорость вращения клуба (рад/с)
    pub smoke_spin: f32,
    /// opacity = life * fade
    pub smoke_fade_per_life: f32,

    // === Pose targets/rates ===
    /// Rate доводки барабана к целевой каморе
    pub cylinder_rate: f32,
    /// Скорость прокрутки барабана при перезарядке (рад/с)
    pub reload_spin_speed: f32,
    /// Дрейф открытого барабана без перезарядки (рад/с)
    pub open_drift_speed: f32,
    /// Взведённый курок (радианы)
    pub hammer_cocked: f32,
    /// Rate возврата курка
    pub hammer_rate: f32,
    /// Recoil angle, ниже которого курок возвращается
    pub hammer_release_threshold: f32,
    /// Нажатый спуск (радианы)
    pub trigger_pulled: f32,
    /// Rate спуска
    pub trigger_rate: f32,
    /// Recoil angle, выше которого спуск нажат
    pub trigger_pull_threshold: f32,
    /// Откинутый crane (радианы)
    pub crane_open: f32,
    /// Rate crane
    pub crane_rate: f32,
    /// Наклон корпуса при открытом барабане (радианы)
    pub open_tilt: f32,
    /// Rate наклона
    pub tilt_rate: f32,
}

impl Default for RevolverConfig {
    fn default() -> Self {
        Self {
            spring_stiffness: 200.0,
            spring_damping: 14.0,
            spring_max_step: 1.0 / 30.0,
            rest_velocity_deadband: 0.1,
            live_impulse: 18.0,
            dry_impulse: 0.5,
            recoil_pull_back: 1.5,
            recoil_lift: 0.5,
            max_muzzle_climb: 1.2,

            flash_duration: 0.08,
            flash_peak_intensity: 200.0,
            flash_scale_range: (0.8, 1.4),
            flash_depth_range: (0.9, 1.2),

            smoke_pool_size: 12,
            smoke_per_shot: 4,
            // 2.3 по стволу, 0.42 = ось верхней каморы (BARREL_Y)
            smoke_spawn_origin: Vec3::new(2.3, 0.42, 0.0),
            smoke_scale_range: (0.2, 0.4),
            smoke_life_range: (1.0, 2.0),
            smoke_forward_speed_range: (2.0, 4.0),
            smoke_jitter: 0.5,
            smoke_initial_opacity: 0.5,
            smoke_buoyancy: 0.8,
            smoke_damping: 0.96,
            smoke_growth: 1.2,
            smoke_spin: 0.5,
            smoke_fade_per_life: 0.4,

            cylinder_rate: 15.0,
            reload_spin_speed: 12.0,
            open_drift_speed: 0.8,
            hammer_cocked: -0.95,
            hammer_rate: 6.0,
            hammer_release_threshold: 0.2,
            trigger_pulled: -0.55,
            trigger_rate: 18.0,
            trigger_pull_threshold: 0.1,
            crane_open: 0.75,
            crane_rate: 20.0,
            open_tilt: -0.35,
            tilt_rate: 12.0,
        }
    }
}

impl RevolverConfig {
    /// Загрузить tuning из JSON (недостающие поля берутся из Default)
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Проверка инвариантов tuning'а
    ///
    /// Пружина должна затухать (k > 0, c ≥ 0), все rates неотрицательны,
    /// диапазоны упорядочены, pool не пустой.
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("spring_damping", self.spring_damping),
            ("rest_velocity_deadband", self.rest_velocity_deadband),
            ("live_impulse", self.live_impulse),
            ("dry_impulse", self.dry_impulse),
            ("max_muzzle_climb", self.max_muzzle_climb),
            ("flash_peak_intensity", self.flash_peak_intensity),
            ("smoke_jitter", self.smoke_jitter),
            ("smoke_initial_opacity", self.smoke_initial_opacity),
            ("smoke_damping", self.smoke_damping),
            ("smoke_growth", self.smoke_growth),
            ("smoke_fade_per_life", self.smoke_fade_per_life),
            ("cylinder_rate", self.cylinder_rate),
            ("hammer_rate", self.hammer_rate),
            ("trigger_rate", self.trigger_rate),
            ("crane_rate", self.crane_rate),
            ("tilt_rate", self.tilt_rate),
        ];

        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(RevolverError::InvalidConfig(format!(
                    "{name} must be finite and >= 0 (got {value})"
                )));
            }
        }

        let positive = [
            ("spring_stiffness", self.spring_stiffness),
            ("spring_max_step", self.spring_max_step),
            ("flash_duration", self.flash_duration),
        ];

        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(RevolverError::InvalidConfig(format!(
                    "{name} must be finite and > 0 (got {value})"
                )));
            }
        }

        let ranges = [
            ("flash_scale_range", self.flash_scale_range),
            ("flash_depth_range", self.flash_depth_range),
            ("smoke_scale_range", self.smoke_scale_range),
            ("smoke_life_range", self.smoke_life_range),
            ("smoke_forward_speed_range", self.smoke_forward_speed_range),
        ];

        for (name, (low, high)) in ranges {
            // gen_range паникует на пустом диапазоне
            if !(low.is_finite() && high.is_finite() && low < high) {
                return Err(RevolverError::InvalidConfig(format!(
                    "{name} must be a non-empty range (got {low}..{high})"
                )));
            }
        }

        if self.smoke_pool_size == 0 {
            return Err(RevolverError::InvalidConfig(
                "smoke_pool_size must be > 0".to_string(),
            ));
        }

        if self.smoke_damping > 1.0 {
            return Err(RevolverError::InvalidConfig(format!(
                "smoke_damping must be <= 1 (got {})",
                self.smoke_damping
            )));
        }

        Ok(())
    }
}

/// Exponential approach: `current += (target - current) * min(1, rate * delta)`
///
/// Фактор зажат в [0, 1] — большой delta (пауза рендера) не даёт overshoot.
pub fn approach(current: f32, target: f32, rate: f32, delta: f32) -> f32 {
    let factor = (rate * delta).clamp(0.0, 1.0);
    current + (target - current) * factor
}

/// Нормализация frame delta: NaN/отрицательное → 0 (tick не идёт назад)
pub fn sanitize_delta(delta: f32) -> f32 {
    if delta.is_finite() && delta > 0.0 {
        delta
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = RevolverConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.smoke_pool_size, 12);
        assert_eq!(config.flash_duration, 0.08);
        assert_eq!(config.live_impulse, 18.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = RevolverConfig {
            spring_stiffness: 0.0,
            ..default()
        };
        assert!(matches!(
            config.validate(),
            Err(RevolverError::InvalidConfig(_))
        ));

        let config = RevolverConfig {
            crane_rate: f32::NAN,
            ..default()
        };
        assert!(config.validate().is_err());

        let config = RevolverConfig {
            smoke_pool_size: 0,
            ..default()
        };
        assert!(config.validate().is_err());

        let config = RevolverConfig {
            smoke_life_range: (2.0, 1.0),
            ..default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json_partial_override() {
        let config = RevolverConfig::from_json(r#"{ "live_impulse": 24.0, "smoke_pool_size": 6 }"#)
            .expect("partial config should parse");

        assert_eq!(config.live_impulse, 24.0);
        assert_eq!(config.smoke_pool_size, 6);
        // Остальное из Default
        assert_eq!(config.dry_impulse, 0.5);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            RevolverConfig::from_json("{ not json"),
            Err(RevolverError::Json(_))
        ));
        assert!(matches!(
            RevolverConfig::from_json(r#"{ "flash_duration": 0.0 }"#),
            Err(RevolverError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_approach_clamps_large_delta() {
        // rate * delta = 15 → без clamp был бы overshoot
        assert_eq!(approach(0.0, 1.0, 15.0, 1.0), 1.0);
        assert_eq!(approach(0.5, 1.0, 15.0, 0.0), 0.5);

        let half = approach(0.0, 1.0, 10.0, 0.05);
        assert!((half - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_sanitize_delta() {
        assert_eq!(sanitize_delta(0.016), 0.016);
        assert_eq!(sanitize_delta(-1.0), 0.0);
        assert_eq!(sanitize_delta(f32::NAN), 0.0);
        assert_eq!(sanitize_delta(f32::INFINITY), 0.0);
    }
}
