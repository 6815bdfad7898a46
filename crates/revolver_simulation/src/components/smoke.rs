//! Smoke: фиксированный pool переиспользуемых слотов
//!
//! Pool никогда не растёт и не сжимается. Spawn — best effort:
//! если свободных слотов нет, клуб просто не появляется.

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::RevolverConfig;

/// Один клуб дыма (слот pool'а)
///
/// Состояния: idle (`active = false`, невидим, доступен для spawn)
/// или aging-out (`active = true`, живёт до life_remaining ≤ 0).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Reflect)]
pub struct SmokeSlot {
    pub active: bool,
    pub position: Vec3,
    pub velocity: Vec3,
    pub scale: f32,
    pub rotation_z: f32,
    pub life_remaining: f32,
    pub opacity: f32,
}

impl SmokeSlot {
    /// Инициализировать слот у среза ствола
    fn ignite(&mut self, config: &RevolverConfig, rng: &mut impl Rng) {
        let (scale_min, scale_max) = config.smoke_scale_range;
        let (life_min, life_max) = config.smoke_life_range;
        let (speed_min, speed_max) = config.smoke_forward_speed_range;
        let half_jitter = config.smoke_jitter * 0.5;

        self.active = true;
        self.position = config.smoke_spawn_origin;
        self.scale = rng.gen_range(scale_min..scale_max);
        self.rotation_z = rng.gen_range(0.0..std::f32::consts::PI);
        self.life_remaining = rng.gen_range(life_min..life_max);
        self.velocity = Vec3::new(
            rng.gen_range(speed_min..speed_max),
            jitter(rng, half_jitter),
            jitter(rng, half_jitter),
        );
        self.opacity = config.smoke_initial_opacity;
    }

    /// Один кадр жизни клуба. Возвращает true если слот только что погас.
    fn age(&mut self, delta: f32, config: &RevolverConfig) -> bool {
        self.life_remaining -= delta;

        self.position += self.velocity * delta;
        self.velocity.y += config.smoke_buoyancy * delta;
        // Damping за кадр (framerate-dependent, для косметики допустимо)
        self.velocity *= config.smoke_damping;
        self.scale *= 1.0 + config.smoke_growth * delta;
        self.rotation_z += config.smoke_spin * delta;
        self.opacity = (self.life_remaining * config.smoke_fade_per_life).max(0.0);

        if self.life_remaining <= 0.0 {
            self.active = false;
            return true;
        }
        false
    }
}

fn jitter(rng: &mut impl Rng, half_width: f32) -> f32 {
    if half_width <= 0.0 {
        return 0.0;
    }
    rng.gen_range(-half_width..=half_width)
}

/// Pool клубов дыма
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[reflect(Component)]
pub struct SmokePool {
    slots: Vec<SmokeSlot>,
}

impl Default for SmokePool {
    fn default() -> Self {
        Self::new(RevolverConfig::default().smoke_pool_size)
    }
}

impl SmokePool {
    /// Pool фиксированного размера (все слоты idle)
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![SmokeSlot::default(); capacity],
        }
    }

    pub fn slots(&self) -> &[SmokeSlot] {
        &self.slots
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.active).count()
    }

    pub fn idle_count(&self) -> usize {
        self.capacity() - self.active_count()
    }

    /// Активировать до `count` idle слотов (по порядку). Возвращает сколько реально заспавнено.
    pub fn spawn(&mut self, count: usize, config: &RevolverConfig, rng: &mut impl Rng) -> usize {
        let mut spawned = 0;

        for slot in self.slots.iter_mut().filter(|slot| !slot.active) {
            if spawned >= count {
                break;
            }
            slot.ignite(config, rng);
            spawned += 1;
        }

        spawned
    }

    /// Прожить кадр для всех активных слотов. Возвращает сколько слотов погасло.
    pub fn update(&mut self, delta: f32, config: &RevolverConfig) -> usize {
        self.slots
            .iter_mut()
            .filter(|slot| slot.active)
            .map(|slot| slot.age(delta, config))
            .filter(|expired| *expired)
            .count()
    }
}
