//! Guard tuning'а: невалидный RevolverConfig не доживает до первой системы кадра

use bevy::prelude::*;

use crate::config::RevolverConfig;

/// System: проверить config после каждой вставки/изменения
///
/// Стоит первой в цепочке (run_if resource_changed), так что хост может
/// вставлять tuning когда угодно. Невалидный → log_error + defaults
/// (иначе пустой диапазон уронит gen_range на первом живом выстреле).
pub fn enforce_valid_config(mut config: ResMut<RevolverConfig>) {
    if let Err(err) = config.validate() {
        crate::log_error(&format!(
            "RevolverConfig rejected, falling back to defaults: {}",
            err
        ));
        *config = RevolverConfig::default();
    }
}
