use std::{path::PathBuf, str::FromStr};

use tracing::level_filters::LevelFilter;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "plain" => Ok(LogFormat::Plain),
            _ => Err(anyhow::anyhow!("Unknown log format")),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum LogOutput {
    StdOut,
    // The shell talks on stdout
    #[default]
    StdErr,
    File(PathBuf),
}

impl FromStr for LogOutput {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stdout" => Ok(Self::StdOut),
            "stderr" => Ok(Self::StdErr),
            _ => Ok(Self::File(PathBuf::from(s.trim()))),
        }
    }
}

/// Installs the global subscriber. `RUST_LOG` directives, when set, take
/// precedence over `level`.
///
/// The returned guard flushes pending log lines when dropped.
pub fn config_tracing(
    fmt: LogFormat,
    log_to: &LogOutput,
    level: LevelFilter,
) -> anyhow::Result<WorkerGuard> {
    let (writer, guard) = match log_to {
        LogOutput::StdOut => tracing_appender::non_blocking(std::io::stdout()),
        LogOutput::StdErr => tracing_appender::non_blocking(std::io::stderr()),
        LogOutput::File(path) => {
            let file_name = path
                .file_name()
                .ok_or_else(|| anyhow::anyhow!("Not a log file path: {}", path.display()))?
                .to_string_lossy()
                .into_owned();
            let directory = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_owned(),
                _ => PathBuf::from("."),
            };
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::NEVER)
                .filename_prefix(file_name)
                .build(directory)?;
            tracing_appender::non_blocking(appender)
        }
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer);
    let init = match fmt {
        LogFormat::Plain => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    init.map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    Ok(guard)
}
