use crate::config::Config;

fn format_line(out: fern::FormatCallback, message: &std::fmt::Arguments, record: &log::Record) {
    out.finish(format_args! {
        "[{}] {}:{} {} {}",
        record.level(),
        record.file().unwrap_or("?"),
        record.line().unwrap_or(0),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        message
    })
}

pub fn init_logger(config: &Config) -> Result<(), fern::InitError> {
    let application_config = fern::Dispatch::new()
        .level(config.log_level)
        // dependency internals only above warn
        .level_for("serenity", log::LevelFilter::Warn)
        .level_for("reqwest", log::LevelFilter::Warn)
        .format(format_line)
        .chain(std::io::stdout());

    let emergency_config = fern::Dispatch::new()
        .level(log::LevelFilter::Error)
        .format(format_line)
        .chain(fern::log_file(&config.error_log_file)?);

    fern::Dispatch::new().chain(application_config).chain(emergency_config).apply()?;
    Ok(())
}
