//! FlashController + ParticlePool systems

use bevy::prelude::*;

use crate::components::{MuzzleFlash, ShotTracker, SmokePool};
use crate::config::{sanitize_delta, RevolverConfig};
use crate::DeterministicRng;

/// System: tick вспышки, затем перезапуск на живом выстреле
///
/// Порядок tick → trigger: сразу после кадра выстрела time_remaining == duration.
pub fn tick_muzzle_flash(
    mut revolvers: Query<(&ShotTracker, &mut MuzzleFlash)>,
    mut rng: ResMut<DeterministicRng>,
    config: Res<RevolverConfig>,
    time: Res<Time>,
) {
    let delta = sanitize_delta(time.delta_secs());
    let rng = &mut rng.rng;

    for (tracker, mut flash) in revolvers.iter_mut() {
        flash.tick(delta, &config, rng);

        if tracker.this_frame.is_live_shot() {
            flash.trigger(&config, rng);
        }
    }
}

/// System: прожить кадр дыма, затем spawn пачки на живом выстреле
///
/// Осечка дыма не даёт. Spawn best effort: при полном pool лишние клубы пропускаются.
pub fn tick_smoke(
    mut revolvers: Query<(Entity, &ShotTracker, &mut SmokePool)>,
    mut rng: ResMut<DeterministicRng>,
    config: Res<RevolverConfig>,
    time: Res<Time>,
) {
    let delta = sanitize_delta(time.delta_secs());
    let rng = &mut rng.rng;

    for (entity, tracker, mut pool) in revolvers.iter_mut() {
        pool.update(delta, &config);

        if !tracker.this_frame.is_live_shot() {
            continue;
        }

        let spawned = pool.spawn(config.smoke_per_shot, &config, rng);
        if spawned < config.smoke_per_shot {
            crate::log_warning(&format!(
                "Revolver {:?}: smoke pool saturated, spawned {}/{}",
                entity, spawned, config.smoke_per_shot
            ));
        }
    }
}
