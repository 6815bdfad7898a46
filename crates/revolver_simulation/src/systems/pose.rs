//! PoseBlender + TransformComposer systems

use bevy::prelude::*;

use crate::components::{
    CartridgeView, FireEvent, PartPose, RecoilSpring, RevolverPose, ShotTracker,
};
use crate::config::{sanitize_delta, RevolverConfig};

/// System: пересчитать targets из FireEvent и подтянуть текущие углы
pub fn blend_part_poses(
    mut revolvers: Query<(&FireEvent, &ShotTracker, &RecoilSpring, &mut PartPose)>,
    config: Res<RevolverConfig>,
    time: Res<Time>,
) {
    let delta = sanitize_delta(time.delta_secs());

    for (input, tracker, spring, mut parts) in revolvers.iter_mut() {
        parts.blend(input, tracker.this_frame, spring, delta, &config);
    }
}

/// System: финальная поза сборки (последняя в цепочке, после всех апдейтов)
pub fn compose_revolver_pose(
    mut revolvers: Query<(
        &FireEvent,
        &RecoilSpring,
        &PartPose,
        &mut RevolverPose,
        &mut CartridgeView,
    )>,
    config: Res<RevolverConfig>,
) {
    for (input, spring, parts, mut pose, mut cartridges) in revolvers.iter_mut() {
        *pose = RevolverPose::compose(spring, parts, &config);

        let view = CartridgeView::from_input(input);
        // set_if_neq: рендер может реагировать на Changed<CartridgeView>
        cartridges.set_if_neq(view);
    }
}
