//! RecoilOscillator system

use bevy::prelude::*;

use crate::components::{RecoilSpring, ShotClassification, ShotTracker};
use crate::config::{sanitize_delta, RevolverConfig};

/// System: интегрировать пружину, затем добавить импульс выстрела этого кадра
///
/// Live → большой импульс, dry click → маленький. Это единственный визуальный
/// канал, отличающий "bang" от "click" на самой модели.
pub fn integrate_recoil(
    mut revolvers: Query<(&ShotTracker, &mut RecoilSpring)>,
    config: Res<RevolverConfig>,
    time: Res<Time>,
) {
    let delta = sanitize_delta(time.delta_secs());

    for (tracker, mut spring) in revolvers.iter_mut() {
        spring.integrate(delta, &config);

        if let ShotClassification::Fired { live } = tracker.this_frame {
            let impulse = if live {
                config.live_impulse
            } else {
                config.dry_impulse
            };
            spring.kick(impulse);
        }
    }
}
