//! Logging setup: stdout (pretty or JSON), optional rolling file, optional OTLP

use crate::config::{DaemonConfig, LogFormat};
use crate::telemetry::{self, BoxedLayer, TelemetryStatus};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_FILTER: &str = "petadoption=info";
const LOG_FILE_PREFIX: &str = "petadoption.log";

/// Keep alive for the lifetime of the process; dropping it flushes the file writer
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
}

/// Install the global subscriber
pub fn init(config: &DaemonConfig) -> Result<(LoggingGuard, TelemetryStatus)> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .context("Failed to create env filter")?;

    let (file_layer, file_guard) = match &config.log_dir {
        Some(dir) => {
            let (layer, guard) = file_layer(dir);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let (otel_layer, telemetry_status) = telemetry::otel_layer()?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer(config.log_format))
        .with(otel_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok((LoggingGuard { _file: file_guard }, telemetry_status))
}

/// Daily-rolling file under `dir`. Always JSON, whatever the stdout format.
fn file_layer<S>(dir: &Path) -> (BoxedLayer<S>, WorkerGuard)
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let layer = fmt::layer()
        .json()
        .with_ansi(false)
        .with_writer(writer)
        .boxed();
    (layer, guard)
}

fn stdout_layer<S>(format: LogFormat) -> BoxedLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    match format {
        LogFormat::Json => fmt::layer().json().boxed(),
        LogFormat::Pretty => fmt::layer().pretty().boxed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn read_json_lines(dir: &Path) -> Vec<serde_json::Value> {
        let mut lines = Vec::new();
        for entry in std::fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            let name = path.file_name().unwrap().to_string_lossy().to_string();
            if !name.starts_with(LOG_FILE_PREFIX) {
                continue;
            }
            let content = std::fs::read_to_string(&path).unwrap();
            for line in content.lines().filter(|l| !l.trim().is_empty()) {
                lines.push(serde_json::from_str(line).expect("file log line is not JSON"));
            }
        }
        lines
    }

    #[test]
    fn test_file_layer_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let (layer, guard) = file_layer(dir.path());
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(target: "petadoption::events", method = "CleanupAdoptions", "cleanup");
        });
        drop(guard);

        let lines = read_json_lines(dir.path());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["level"], "INFO");
        assert_eq!(lines[0]["fields"]["method"], "CleanupAdoptions");
        assert_eq!(lines[0]["fields"]["message"], "cleanup");
    }

    #[test]
    fn test_init_with_log_dir_keeps_file_json_under_pretty_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let env: HashMap<&str, String> = HashMap::from([
            ("PETADOPTION_LOG_DIR", dir.path().display().to_string()),
            ("PETADOPTION_LOG_FORMAT", "pretty".to_string()),
        ]);
        let config = DaemonConfig::from_lookup(|key| env.get(key).cloned()).unwrap();
        assert_eq!(config.log_format, LogFormat::Pretty);

        let (guard, _status) = init(&config).unwrap();
        tracing::warn!(target: "petadoption::daemon", port = 9528, "startup check");
        drop(guard);

        let lines = read_json_lines(dir.path());
        let line = lines
            .iter()
            .find(|l| l["fields"]["message"] == "startup check")
            .expect("event missing from log file");
        assert_eq!(line["level"], "WARN");
        assert_eq!(line["fields"]["port"], 9528);
    }
}
