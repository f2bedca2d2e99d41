//! Logger симуляции → bevy_log (tracing)

use bevy::log::{debug, error, info, warn};
use lost_in_space_simulation::logger::{set_logger, LogLevel, LogPrinter};

struct BevyLogPrinter;

impl LogPrinter for BevyLogPrinter {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Debug => debug!("{}", message),
            LogLevel::Info => info!("{}", message),
            LogLevel::Warning => warn!("{}", message),
            LogLevel::Error => error!("{}", message),
        }
    }
}

pub fn install_bevy_logger() {
    set_logger(Box::new(BevyLogPrinter));
}
