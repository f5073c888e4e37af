use crate::config::LogSettings;
use anyhow::{Context, Result};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger};
use std::fs::OpenOptions;

/// Parse a level name such as `off`, `warn` or `debug` (case-insensitive).
pub fn parse_level(name: &str) -> Result<LevelFilter> {
    name.parse()
        .with_context(|| format!("unknown log level {name:?}"))
}

/// Install the global logger.
///
/// `level` overrides the configured level when given. Nothing is installed at `off`, so
/// stderr carries only the shell's own error reports. Records go to the configured file
/// (appended) or else to stderr.
pub fn init(settings: &LogSettings, level: Option<LevelFilter>) -> Result<()> {
    let level = match level {
        Some(level) => level,
        None => parse_level(&settings.level)?,
    };
    if level == LevelFilter::Off {
        return Ok(());
    }
    match &settings.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            WriteLogger::init(level, Config::default(), file)?;
        }
        None => TermLogger::init(
            level,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        )?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_are_case_insensitive() {
        assert_eq!(parse_level("off").unwrap(), LevelFilter::Off);
        assert_eq!(parse_level("DEBUG").unwrap(), LevelFilter::Debug);
    }

    #[test]
    fn unknown_level_is_rejected() {
        assert!(parse_level("chatty").is_err());
    }

    #[test]
    fn off_installs_nothing() {
        assert!(init(&LogSettings::default(), None).is_ok());
    }
}
