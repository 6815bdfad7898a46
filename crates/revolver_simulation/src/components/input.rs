//! Input от внешнего game-state owner'а (level-triggered)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{CHAMBER_COUNT, CHAMBER_STEP_ANGLE};
use crate::error::{Result, RevolverError};

/// Снимок состояния револьвера, который game-state owner пишет каждый кадр
///
/// Архитектура:
/// - Владелец (input/ammo логика) пишет FireEvent целиком
/// - Ядро анимации только ЧИТАЕТ (никогда не мутирует)
/// - FireEvent определяет targets, но не текущие интерполированные значения
///
/// Несмотря на имя, это level-сигнал: выстрел выводится из роста `rotation_step`.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireEvent {
    /// Монотонный счётчик поворотов барабана (падает только при reset)
    pub rotation_step: i64,

    /// Заряжена ли камора (false = стреляная/пустая); длину держит сам тип
    pub chambers: [bool; CHAMBER_COUNT],

    /// Идёт перезарядка (барабан крутится)
    pub is_reloading: bool,

    /// Барабан откинут
    pub is_cylinder_open: bool,

    /// Последний выстрел был живым (bang), иначе осечка (click)
    pub last_shot_live: bool,
}

impl Default for FireEvent {
    fn default() -> Self {
        Self {
            rotation_step: 0,
            chambers: [true; CHAMBER_COUNT],
            is_reloading: false,
            is_cylinder_open: false,
            last_shot_live: false,
        }
    }
}

impl FireEvent {
    /// Собрать input из произвольного slice (например, из JSON/скриптов хоста)
    ///
    /// `chambers.len() != 6` — programmer error, fail fast вместо truncate.
    pub fn new(
        rotation_step: i64,
        chambers: &[bool],
        is_reloading: bool,
        is_cylinder_open: bool,
        last_shot_live: bool,
    ) -> Result<Self> {
        let chambers: [bool; CHAMBER_COUNT] =
            chambers
                .try_into()
                .map_err(|_| RevolverError::ChamberCount {
                    expected: CHAMBER_COUNT,
                    actual: chambers.len(),
                })?;

        Ok(Self {
            rotation_step,
            chambers,
            is_reloading,
            is_cylinder_open,
            last_shot_live,
        })
    }

    /// Полный барабан на шаге 0, закрыт
    pub fn fully_loaded() -> Self {
        Self::default()
    }

    /// Заменить содержимое барабана (та же валидация длины что и в `new`)
    pub fn set_chambers(&mut self, chambers: &[bool]) -> Result<()> {
        self.chambers = chambers
            .try_into()
            .map_err(|_| RevolverError::ChamberCount {
                expected: CHAMBER_COUNT,
                actual: chambers.len(),
            })?;
        Ok(())
    }

    /// Количество заряженных камор
    pub fn loaded_count(&self) -> usize {
        self.chambers.iter().filter(|loaded| **loaded).count()
    }

    /// Камора напротив ствола (`rotation_step mod 6`, всегда неотрицательный)
    pub fn chamber_under_hammer(&self) -> usize {
        self.rotation_step.rem_euclid(CHAMBER_COUNT as i64) as usize
    }

    /// Целевой угол барабана: -step × 60°
    pub fn cylinder_target(&self) -> f32 {
        -(self.rotation_step as f32) * CHAMBER_STEP_ANGLE
    }
}
