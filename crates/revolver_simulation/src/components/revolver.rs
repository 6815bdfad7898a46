//! Revolver entity: marker + сборка всех компонентов ядра

use bevy::ecs::component::HookContext;
use bevy::ecs::world::DeferredWorld;
use bevy::prelude::*;

use crate::components::{
    CartridgeView, FireEvent, MuzzleFlash, PartPose, RecoilSpring, RevolverPose, ShotTracker,
    SmokePool,
};
use crate::config::RevolverConfig;

/// Револьвер — одна сущность = одна анимируемая модель
///
/// Автоматически добавляет всё состояние ядра через Required Components.
/// Для tuning'а из RevolverConfig (размер pool, длительность flash)
/// используйте `revolver_bundle`.
///
/// `on_add` синхронизирует edge detector с начальным FireEvent: спавн с
/// `rotation_step != 0` не считается выстрелом, даже без `revolver_bundle`.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[component(on_add = sync_with_initial_input)]
#[require(
    FireEvent,
    ShotTracker,
    RecoilSpring,
    MuzzleFlash,
    SmokePool,
    PartPose,
    RevolverPose,
    CartridgeView
)]
pub struct Revolver;

/// Hook: ShotTracker и CartridgeView стартуют с того input, с которым заспавнили
fn sync_with_initial_input(mut world: DeferredWorld, context: HookContext) {
    let Some(input) = world.get::<FireEvent>(context.entity).cloned() else {
        return;
    };

    if let Some(mut tracker) = world.get_mut::<ShotTracker>(context.entity) {
        *tracker = ShotTracker::new(input.rotation_step);
    }
    if let Some(mut cartridges) = world.get_mut::<CartridgeView>(context.entity) {
        *cartridges = CartridgeView::from_input(&input);
    }
}

/// Bundle для спавна револьвера, синхронизированного с начальным input
///
/// Edge detector стартует с `input.rotation_step` — спавн не считается выстрелом.
pub fn revolver_bundle(config: &RevolverConfig, input: FireEvent) -> impl Bundle {
    (
        Revolver,
        ShotTracker::new(input.rotation_step),
        SmokePool::new(config.smoke_pool_size),
        MuzzleFlash::new(config.flash_duration),
        CartridgeView::from_input(&input),
        input,
    )
}
