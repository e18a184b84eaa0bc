// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use color_eyre::eyre::{eyre, Result, WrapErr};
use std::path::PathBuf;
use tracing::{Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Overrides the default logging targets, e.g. `DEPLOY_LOG=evm_deploy=trace,alloy=debug`.
pub(crate) const LOG_ENV: &str = "DEPLOY_LOG";

pub(crate) const LOG_FILE_NAME: &str = "nft-deploy.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LogOutputDest {
    Stderr,
    Stdout,
    Path(PathBuf),
}

impl LogOutputDest {
    pub(crate) fn parse_from_str(val: &str) -> Result<Self, String> {
        match val {
            "stderr" => Ok(LogOutputDest::Stderr),
            "stdout" => Ok(LogOutputDest::Stdout),
            "data-dir" => {
                let timestamp = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S").to_string();
                let dir = dirs_next::data_dir()
                    .ok_or_else(|| "could not obtain data directory path".to_string())?
                    .join("nft-deploy")
                    .join("logs")
                    .join(format!("log_{timestamp}"));
                Ok(LogOutputDest::Path(dir))
            }
            // The directory doesn't need to exist yet, it is created on initialisation.
            value => Ok(LogOutputDest::Path(PathBuf::from(value))),
        }
    }
}

impl std::fmt::Display for LogOutputDest {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            LogOutputDest::Stderr => write!(f, "stderr"),
            LogOutputDest::Stdout => write!(f, "stdout"),
            LogOutputDest::Path(p) => write!(f, "{}", p.to_string_lossy()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LogFormat {
    Default,
    Json,
}

impl LogFormat {
    pub(crate) fn parse_from_str(val: &str) -> Result<Self, String> {
        match val {
            "default" => Ok(LogFormat::Default),
            "json" => Ok(LogFormat::Json),
            _ => Err(
                "The only valid values for this argument are \"default\" or \"json\"".to_string(),
            ),
        }
    }
}

pub(crate) struct LogBuilder {
    default_logging_targets: Vec<(String, Level)>,
    output_dest: LogOutputDest,
    format: LogFormat,
}

impl LogBuilder {
    /// The default targets are used unless [`LOG_ENV`] is set.
    ///
    /// Logs go to stderr by default, so stdout only carries the deployment result.
    pub(crate) fn new(default_logging_targets: Vec<(String, Level)>) -> Self {
        Self {
            default_logging_targets,
            output_dest: LogOutputDest::Stderr,
            format: LogFormat::Default,
        }
    }

    pub(crate) fn output_dest(&mut self, output_dest: LogOutputDest) {
        self.output_dest = output_dest;
    }

    pub(crate) fn format(&mut self, format: LogFormat) {
        self.format = format
    }

    fn filter(&self) -> Result<EnvFilter> {
        let directives = match std::env::var(LOG_ENV) {
            Ok(directives) => directives,
            Err(_) => self
                .default_logging_targets
                .iter()
                .map(|(target, level)| format!("{target}={level}"))
                .collect::<Vec<_>>()
                .join(","),
        };
        EnvFilter::try_new(&directives)
            .wrap_err_with(|| format!("Invalid logging directives: {directives}"))
    }

    /// Install the global subscriber. The returned guard flushes buffered logs when dropped and
    /// has to be held until the program exits.
    pub(crate) fn initialize(self) -> Result<WorkerGuard> {
        let (subscriber, guard) = self.build()?;
        subscriber
            .try_init()
            .map_err(|err| eyre!("Failed to initialise logging: {err}"))?;
        Ok(guard)
    }

    pub(crate) fn build(self) -> Result<(Box<dyn Subscriber + Send + Sync>, WorkerGuard)> {
        let filter = self.filter()?;

        let (writer, guard) = match &self.output_dest {
            LogOutputDest::Stderr => tracing_appender::non_blocking(std::io::stderr()),
            LogOutputDest::Stdout => tracing_appender::non_blocking(std::io::stdout()),
            LogOutputDest::Path(dir) => {
                std::fs::create_dir_all(dir)
                    .wrap_err_with(|| format!("Could not create log directory {dir:?}"))?;
                eprintln!("Logging to directory: {dir:?}");
                tracing_appender::non_blocking(tracing_appender::rolling::never(
                    dir,
                    LOG_FILE_NAME,
                ))
            }
        };

        let with_ansi = self.output_dest == LogOutputDest::Stderr;
        let layer = fmt::layer().with_writer(writer).with_ansi(with_ansi);
        let registry = tracing_subscriber::registry().with(filter);
        let subscriber: Box<dyn Subscriber + Send + Sync> = match self.format {
            LogFormat::Default => Box::new(registry.with(layer)),
            LogFormat::Json => Box::new(registry.with(layer.json())),
        };

        Ok((subscriber, guard))
    }
}
