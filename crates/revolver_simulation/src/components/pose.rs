//! Позы частей револьвера: текущие интерполированные углы + финальный output

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::input::FireEvent;
use crate::components::recoil::RecoilSpring;
use crate::components::shot::ShotClassification;
use crate::config::{approach, RevolverConfig, CHAMBER_COUNT};

/// Текущие (сглаженные) углы частей
///
/// Targets пересчитываются из FireEvent каждый кадр и нигде не кэшируются;
/// текущие значения эволюционируют непрерывно, чтобы не было snapping.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, Reflect)]
#[reflect(Component)]
pub struct PartPose {
    /// Поворот барабана вокруг своей оси
    pub cylinder: f32,
    /// Откидывание crane
    pub crane: f32,
    /// Курок
    pub hammer: f32,
    /// Спусковой крючок
    pub trigger: f32,
    /// Наклон корпуса (складывается с muzzle climb, не перетирает его)
    pub body_tilt: f32,
}

impl PartPose {
    /// Один кадр смешивания всех углов
    ///
    /// `recoil` — состояние пружины ПОСЛЕ интегрирования и импульса этого кадра.
    pub fn blend(
        &mut self,
        input: &FireEvent,
        shot: ShotClassification,
        recoil: &RecoilSpring,
        delta: f32,
        config: &RevolverConfig,
    ) {
        self.blend_cylinder(input, delta, config);
        self.blend_hammer(shot, recoil, delta, config);

        let trigger_target = if recoil.angle > config.trigger_pull_threshold {
            config.trigger_pulled
        } else {
            0.0
        };
        self.trigger = approach(self.trigger, trigger_target, config.trigger_rate, delta);

        let (crane_target, tilt_target) = if input.is_cylinder_open {
            (config.crane_open, config.open_tilt)
        } else {
            (0.0, 0.0)
        };
        self.crane = approach(self.crane, crane_target, config.crane_rate, delta);
        self.body_tilt = approach(self.body_tilt, tilt_target, config.tilt_rate, delta);
    }

    fn blend_cylinder(&mut self, input: &FireEvent, delta: f32, config: &RevolverConfig) {
        if !input.is_cylinder_open {
            self.cylinder = approach(self.cylinder, input.cylinder_target(), config.cylinder_rate, delta);
        } else if input.is_reloading {
            // Визуальный cue "крутим барабан при зарядке" — target игнорируется
            self.cylinder += config.reload_spin_speed * delta;
        } else {
            // Открыт без перезарядки: медленный дрейф, чтобы не выглядел замороженным
            self.cylinder += config.open_drift_speed * delta;
        }
    }

    fn blend_hammer(
        &mut self,
        shot: ShotClassification,
        recoil: &RecoilSpring,
        delta: f32,
        config: &RevolverConfig,
    ) {
        if shot.is_fired() {
            // Удар курка читается мгновенно — без сглаживания в кадре выстрела
            self.hammer = config.hammer_cocked;
        } else if recoil.angle < config.hammer_release_threshold {
            self.hammer = approach(self.hammer, 0.0, config.hammer_rate, delta);
        }
        // Иначе курок держит позицию пока отдача высокая
    }
}

/// Финальная поза сборки (пишется TransformComposer'ом раз в кадр)
///
/// Потребитель — рендер: маппит значения на свои scene-graph ноды.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, Reflect)]
#[reflect(Component)]
pub struct RevolverPose {
    /// Смещение всей сборки: назад (-X) и вверх (+Y) от отдачи
    pub assembly_translation: Vec3,
    /// Поворот сборки вокруг forward оси: muzzle climb + наклон
    pub assembly_roll: f32,
    pub cylinder_roll: f32,
    pub crane_roll: f32,
    pub hammer_roll: f32,
    pub trigger_roll: f32,
}

impl RevolverPose {
    /// Сложить вклад отдачи и смешанные углы частей (чистое сложение/присваивание)
    pub fn compose(recoil: &RecoilSpring, parts: &PartPose, config: &RevolverConfig) -> Self {
        Self {
            assembly_translation: Vec3::new(
                -recoil.angle * config.recoil_pull_back,
                recoil.angle * config.recoil_lift,
                0.0,
            ),
            assembly_roll: recoil.muzzle_climb(config.max_muzzle_climb) + parts.body_tilt,
            cylinder_roll: parts.cylinder,
            crane_roll: parts.crane,
            hammer_roll: parts.hammer,
            trigger_roll: parts.trigger,
        }
    }
}

/// Какие патроны рисовать в барабане
///
/// Стреляная камора рисуется пустой (чтобы патроны можно было пересчитать глазами).
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
#[reflect(Component)]
pub struct CartridgeView {
    pub visible: [bool; CHAMBER_COUNT],
    /// Камора напротив ствола
    pub under_hammer: usize,
}

impl Default for CartridgeView {
    fn default() -> Self {
        Self::from_input(&FireEvent::default())
    }
}

impl CartridgeView {
    pub fn from_input(input: &FireEvent) -> Self {
        Self {
            visible: input.chambers,
            under_hammer: input.chamber_under_hammer(),
        }
    }
}
