//! Revolver Animation Core
//!
//! Per-frame контроллер анимации шестизарядного револьвера на Bevy 0.16 ECS.
//!
//! Разделение ответственности:
//! - Game-state owner (внешний) = ammo, input debounce → пишет FireEvent
//! - Ядро (этот crate) = edge detection, отдача, вспышка, дым, позы частей
//! - Рендер (внешний) = меши/материалы, читает RevolverPose / MuzzleFlash / SmokePool
//! - Audio (внешний) = слушает RevolverSound
//!
//! Однопоточно и кооперативно: всё состояние мутируется только внутри цепочки
//! систем одного кадра. Случайность только через seeded DeterministicRng.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::time::Duration;
use bevy::time::TimeUpdateStrategy;

// Публичные модули
pub mod components;
pub mod config;
pub mod error;
pub mod events;
pub mod logger;
pub mod systems;

// Re-export базовых типов для удобства
pub use components::*;
pub use config::{RevolverConfig, CHAMBER_COUNT, CHAMBER_STEP_ANGLE};
pub use error::{Result, RevolverError};
pub use events::{RevolverSound, ShotResolved, SoundCue};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel,
    LogPrinter,
};

/// SystemSet кадра анимации (рендер-коллаборатор ставит свои системы `.after(...)`)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct RevolverAnimationSet;

/// Главный plugin ядра анимации
///
/// Регистрирует системы в Update (frame-driven, delta = Time<Virtual>).
/// Невалидный RevolverConfig (вставленный до или после плагина) заменяется defaults.
/// Порядок выполнения — см. `systems`.
pub struct RevolverAnimationPlugin;

impl Plugin for RevolverAnimationPlugin {
    fn build(&self, app: &mut App) {
        // Хост мог вставить свой tuning/seed до плагина — не перетираем
        if !app.world().contains_resource::<RevolverConfig>() {
            app.init_resource::<RevolverConfig>();
        }
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app.add_event::<ShotResolved>()
            .add_event::<RevolverSound>()
            .register_type::<Revolver>()
            .register_type::<ShotTracker>()
            .register_type::<RecoilSpring>()
            .register_type::<MuzzleFlash>()
            .register_type::<SmokePool>()
            .register_type::<PartPose>()
            .register_type::<RevolverPose>()
            .register_type::<CartridgeView>();

        app.add_systems(
            Update,
            (
                // Tuning проверяется до первого tick'а и после каждой замены
                systems::enforce_valid_config.run_if(resource_changed::<RevolverConfig>),
                systems::detect_shots,
                systems::integrate_recoil,
                systems::tick_muzzle_flash,
                systems::tick_smoke,
                systems::blend_part_poses,
                systems::compose_revolver_pose,
            )
                .chain() // Последовательное выполнение (порядок = контракт кадра)
                .in_set(RevolverAnimationSet),
        );
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless анимации (тесты, demo)
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .add_plugins(RevolverAnimationPlugin);

    app
}

/// Headless app с фиксированной длиной кадра (delta не зависит от wall clock)
///
/// Первый update имеет delta = 0 (так стартует Time<Real>), дальше каждый кадр = `frame`.
pub fn create_fixed_step_app(seed: u64, frame: Duration) -> App {
    let mut app = create_headless_app(seed);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(frame));
    app
}

/// Полный output кадра для рендер-коллаборатора
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevolverFrame {
    pub pose: RevolverPose,
    pub cartridges: CartridgeView,
    pub flash_active: bool,
    pub flash_intensity: f32,
    pub flash_scale: Vec3,
    pub flash_roll: f32,
    pub tracer_visible: bool,
    pub smoke_slots: Vec<SmokeSlot>,
}

impl RevolverFrame {
    pub fn capture(
        pose: &RevolverPose,
        cartridges: &CartridgeView,
        flash: &MuzzleFlash,
        smoke: &SmokePool,
        config: &RevolverConfig,
    ) -> Self {
        Self {
            pose: *pose,
            cartridges: *cartridges,
            flash_active: flash.is_active(),
            flash_intensity: flash.intensity(config.flash_peak_intensity),
            flash_scale: flash.flicker_scale,
            flash_roll: flash.flicker_roll,
            tracer_visible: flash.tracer_visible(),
            smoke_slots: smoke.slots().to_vec(),
        }
    }

    /// Снять кадр с сущности револьвера (None если это не револьвер)
    pub fn of(world: &World, revolver: Entity) -> Option<Self> {
        let entity = world.get_entity(revolver).ok()?;
        let config = world.get_resource::<RevolverConfig>()?;

        Some(Self::capture(
            entity.get::<RevolverPose>()?,
            entity.get::<CartridgeView>()?,
            entity.get::<MuzzleFlash>()?,
            entity.get::<SmokePool>()?,
            config,
        ))
    }
}

/// Snapshot всех револьверов для сравнения детерминизма
///
/// Сортировка по Entity index, сериализация в JSON bytes.
/// Ошибка сериализации пробрасывается (пустой snapshot сравнился бы "успешно").
pub fn pose_snapshot(world: &mut World) -> Result<Vec<u8>> {
    let mut query = world.query_filtered::<Entity, With<Revolver>>();
    let mut entities: Vec<Entity> = query.iter(world).collect();
    entities.sort_by_key(|entity| entity.index());

    let frames: Vec<RevolverFrame> = entities
        .into_iter()
        .filter_map(|entity| RevolverFrame::of(world, entity))
        .collect();

    Ok(serde_json::to_vec(&frames)?)
}
