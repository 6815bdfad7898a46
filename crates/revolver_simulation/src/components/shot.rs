//! Edge detector: rotation_step (level) → "выстрел только что случился" (pulse)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Классификация кадра по изменению rotation_step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Reflect)]
pub enum ShotClassification {
    /// Step не изменился (в т.ч. при reload/open — флаги не влияют)
    #[default]
    NoChange,

    /// Step вырос — выстрел разрешился
    Fired {
        /// Живой патрон (bang) или пустая камора (click)
        live: bool,
    },

    /// Step упал — внешний reset/reload, тихий re-sync без эффектов
    Resynced,
}

impl ShotClassification {
    pub fn is_fired(&self) -> bool {
        matches!(self, ShotClassification::Fired { .. })
    }

    pub fn is_live_shot(&self) -> bool {
        matches!(self, ShotClassification::Fired { live: true })
    }
}

/// Состояние edge detector'а
///
/// Инвариант: `last_observed_step` обновляется ровно один раз за tick
/// (независимо от классификации) → не больше одной реакции на значение step,
/// сколько бы раз ни перерисовывался кадр.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct ShotTracker {
    /// Последний увиденный rotation_step
    pub last_observed_step: i64,

    /// Результат текущего кадра (читают downstream системы в той же цепочке)
    pub this_frame: ShotClassification,
}

impl ShotTracker {
    /// Tracker, синхронизированный с начальным step (спавн не считается выстрелом)
    pub fn new(initial_step: i64) -> Self {
        Self {
            last_observed_step: initial_step,
            this_frame: ShotClassification::NoChange,
        }
    }

    /// Классифицировать кадр и запомнить step
    pub fn observe(&mut self, rotation_step: i64, last_shot_live: bool) -> ShotClassification {
        let classification = if rotation_step > self.last_observed_step {
            ShotClassification::Fired {
                live: last_shot_live,
            }
        } else if rotation_step < self.last_observed_step {
            ShotClassification::Resynced
        } else {
            ShotClassification::NoChange
        };

        self.last_observed_step = rotation_step;
        self.this_frame = classification;
        classification
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_increase_fires() {
        let mut tracker = ShotTracker::new(0);

        assert_eq!(
            tracker.observe(1, true),
            ShotClassification::Fired { live: true }
        );
        assert_eq!(tracker.last_observed_step, 1);
        assert!(tracker.this_frame.is_live_shot());
    }

    #[test]
    fn test_same_step_is_idempotent() {
        let mut tracker = ShotTracker::new(0);

        assert!(tracker.observe(1, false).is_fired());
        // Повторный рендер с тем же step — никакой реакции
        assert_eq!(tracker.observe(1, false), ShotClassification::NoChange);
        assert_eq!(tracker.observe(1, true), ShotClassification::NoChange);
    }

    #[test]
    fn test_step_decrease_resyncs() {
        let mut tracker = ShotTracker::new(5);

        assert_eq!(tracker.observe(0, true), ShotClassification::Resynced);
        assert_eq!(tracker.last_observed_step, 0);

        // После re-sync следующий рост — снова выстрел
        assert!(tracker.observe(1, true).is_fired());
    }

    #[test]
    fn test_multi_step_jump_is_single_shot() {
        let mut tracker = ShotTracker::new(0);

        // Пропущенные кадры: step прыгнул на 3 — одна реакция
        assert!(tracker.observe(3, true).is_fired());
        assert_eq!(tracker.observe(3, true), ShotClassification::NoChange);
    }
}
