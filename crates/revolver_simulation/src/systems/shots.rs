//! EventEdgeDetector system

use bevy::prelude::*;

use crate::components::{FireEvent, ShotClassification, ShotTracker};
use crate::events::{RevolverSound, ShotResolved, SoundCue};

/// System: rotation_step → Fired/Resynced/NoChange
///
/// Выполняется первым в цепочке; `ShotTracker::this_frame` читают остальные
/// системы этого кадра. На каждый Fired публикуется ровно один RevolverSound.
pub fn detect_shots(
    mut revolvers: Query<(Entity, &FireEvent, &mut ShotTracker)>,
    mut shot_events: EventWriter<ShotResolved>,
    mut sound_events: EventWriter<RevolverSound>,
) {
    for (entity, input, mut tracker) in revolvers.iter_mut() {
        let previous = tracker.last_observed_step;
        let classification = tracker.observe(input.rotation_step, input.last_shot_live);

        match classification {
            ShotClassification::NoChange => continue,
            ShotClassification::Fired { live } => {
                let cue = if live { SoundCue::Bang } else { SoundCue::Click };
                sound_events.write(RevolverSound { revolver: entity, cue });

                crate::log(&format!(
                    "Revolver {:?} fired: step {} → {} ({:?})",
                    entity, previous, input.rotation_step, cue
                ));
            }
            ShotClassification::Resynced => {
                crate::log_info(&format!(
                    "Revolver {:?} resynced: step {} → {} (no effects)",
                    entity, previous, input.rotation_step
                ));
            }
        }

        shot_events.write(ShotResolved {
            revolver: entity,
            classification,
            rotation_step: input.rotation_step,
        });
    }
}
