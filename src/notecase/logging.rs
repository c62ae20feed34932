//! Logger bootstrap for the binary.
//!
//! The library only talks to the `log` facade. Binaries call [`init_logging`] once and
//! keep the returned handle alive for the life of the process.

use flexi_logger::{Logger, LoggerHandle};

/// Environment variable holding a log spec (`debug`, `notecase::commands=trace`, ...).
pub const LOG_ENV: &str = "NOTECASE_LOG";

const DEFAULT_LEVEL: &str = "warn";
const VERBOSE_LEVEL: &str = "debug";

/// Picks the log spec: the environment override wins, then `--verbose`.
pub fn log_spec(verbose: bool, env_spec: Option<&str>) -> String {
    match env_spec.map(str::trim).filter(|s| !s.is_empty()) {
        Some(spec) => spec.to_string(),
        None if verbose => VERBOSE_LEVEL.to_string(),
        None => DEFAULT_LEVEL.to_string(),
    }
}

/// Starts logging to stderr.
///
/// Returns a human-readable error when the log spec is invalid or a logger is already installed.
pub fn init_logging(verbose: bool) -> Result<LoggerHandle, String> {
    let env_spec = std::env::var(LOG_ENV).ok();
    let spec = log_spec(verbose, env_spec.as_deref());

    let handle = Logger::try_with_str(&spec)
        .map_err(|err| format!("invalid log spec `{spec}`: {err}"))?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    log::debug!("logging started with spec `{}`", spec);
    Ok(handle)
}
