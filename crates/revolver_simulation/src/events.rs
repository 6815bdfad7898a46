//! События ядра анимации (outbound, fire-and-forget)

use bevy::prelude::*;

use crate::components::ShotClassification;

/// Event: edge detector классифицировал кадр как Fired или Resynced
///
/// NoChange кадры не публикуются.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ShotResolved {
    pub revolver: Entity,
    pub classification: ShotClassification,
    /// rotation_step, на котором случился переход
    pub rotation_step: i64,
}

/// Звук для audio коллаборатора
///
/// Ровно один cue на каждый Fired. Open/reload звуки шлёт game-state owner сам,
/// ядро их не дублирует и не глушит.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Живой патрон
    Bang,
    /// Пустая камора
    Click,
}

/// Event: проиграть звук (ядро → audio, обратной связи нет)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevolverSound {
    pub revolver: Entity,
    pub cue: SoundCue,
}
