//! Ошибки ядра анимации
//!
//! Ядро не делает I/O, поэтому ошибки только "programmer error":
//! кривой input от game-state owner'а или невалидный tuning.
//! Tick никогда не возвращает ошибку — всё отсекается на конструкции.

use thiserror::Error;

/// Ошибки конструкции input/config
#[derive(Debug, Error)]
pub enum RevolverError {
    /// `chambers` не из 6 элементов — отказываемся строить FireEvent
    #[error("expected {expected} chambers, got {actual}")]
    ChamberCount { expected: usize, actual: usize },

    /// Tuning не проходит валидацию (NaN, отрицательные rates, пустой pool)
    #[error("invalid revolver config: {0}")]
    InvalidConfig(String),

    /// Config из JSON не распарсился
    #[error("failed to parse revolver config: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RevolverError>;
