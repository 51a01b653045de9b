use anyhow::{Context, Result};
use log::LevelFilter;
use simplelog::{format_description, Config, ConfigBuilder, SimpleLogger};
use time::format_description::FormatItem;
use time::UtcOffset;

pub fn init(debug: bool) -> Result<()> {
    SimpleLogger::init(
        if debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        },
        get_config(),
    )
    .context("Failed to initialize logger")?;

    Ok(())
}

fn get_config() -> Config {
    let mut builder = ConfigBuilder::new();

    // sudo can strip TZ and make the offset lookup fail; fall back to UTC.
    if let Ok(offset) = UtcOffset::current_local_offset() {
        builder.set_time_offset(offset);
    }

    builder
        .set_time_format_custom(get_time_format())
        .set_level_padding(simplelog::LevelPadding::Right) // Right-align log levels.
        .set_thread_level(LevelFilter::Off) // Single-threaded, no thread ids.
        .set_target_level(LevelFilter::Debug)
        .set_write_log_enable_colors(true)
        .build()
}

fn get_time_format() -> &'static [FormatItem<'static>] {
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]")
}
