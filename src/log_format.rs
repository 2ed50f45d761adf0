use anyhow::Result;
use colog::format::CologStyle;
use colored::Colorize;
use log::{Level, LevelFilter};

/// Environment variable that overrides the log filter, `RUST_LOG` style.
pub const LOG_ENV: &str = "RIDE_COMPARE_LOG";

pub struct LogTimePrefix;

impl CologStyle for LogTimePrefix {
    fn prefix_token(&self, level: &Level) -> String {
        format!(
            "[{}] {}",
            chrono::Local::now()
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
                .blue()
                .bold(),
            self.level_color(level, self.level_token(level))
        )
    }
}

pub fn init() -> Result<()> {
    let mut builder = colog::basic_builder();
    builder
        .format(colog::formatter(LogTimePrefix))
        .filter_level(LevelFilter::Info)
        .parse_env(env_logger::Env::new().filter(LOG_ENV));
    builder.try_init()?;

    Ok(())
}
