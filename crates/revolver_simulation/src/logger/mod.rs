use once_cell::sync::Lazy;
use std::sync::{Mutex, PoisonError};

// Глобальный printer (рендер-хост подменяет своим через set_logger)
static LOGGER: Lazy<Mutex<Option<Box<dyn LogPrinter>>>> = Lazy::new(|| Mutex::new(None));

static LOGGER_LEVEL: Lazy<Mutex<LogLevel>> = Lazy::new(|| Mutex::new(LogLevel::Debug));

/// Уровни по возрастанию важности (порядок вариантов = порядок фильтрации)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

pub trait LogPrinter: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);
}

pub fn set_logger(logger: Box<dyn LogPrinter>) {
    *LOGGER.lock().unwrap_or_else(PoisonError::into_inner) = Some(logger);
}

pub fn set_logger_if_needed(logger: Box<dyn LogPrinter>) {
    let mut slot = LOGGER.lock().unwrap_or_else(PoisonError::into_inner);
    if slot.is_none() {
        *slot = Some(logger);
    }
}

/// Минимальный уровень, который доходит до printer'а
pub fn set_log_level(level: LogLevel) {
    *LOGGER_LEVEL.lock().unwrap_or_else(PoisonError::into_inner) = level;
}

pub fn log_level() -> LogLevel {
    *LOGGER_LEVEL.lock().unwrap_or_else(PoisonError::into_inner)
}

pub fn log(message: &str) {
    log_with_level(LogLevel::Debug, message);
}

pub fn log_info(message: &str) {
    log_with_level(LogLevel::Info, message);
}

pub fn log_warning(message: &str) {
    log_with_level(LogLevel::Warning, message);
}

pub fn log_error(message: &str) {
    log_with_level(LogLevel::Error, message);
}

pub fn log_with_level(level: LogLevel, message: &str) {
    if level < log_level() {
        return;
    }

    // Timestamp добавляем здесь, printer'ы получают готовую строку
    if let Some(logger) = LOGGER.lock().unwrap_or_else(PoisonError::into_inner).as_ref() {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        logger.log(level, &format!("[{}] {}", timestamp, message));
    }
}

/// stdout printer (warnings/errors → stderr)
pub struct ConsoleLogger;

impl LogPrinter for ConsoleLogger {
    fn log(&self, level: LogLevel, message: &str) {
        if level >= LogLevel::Warning {
            eprintln!("[{}] {}", level.as_str(), message);
        } else {
            println!("[{}] {}", level.as_str(), message);
        }
    }
}

pub fn init_logger() {
    set_logger_if_needed(Box::new(ConsoleLogger));
}
