//! The command runner seam between the tool layer and the memory command.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use super::error::BridgeResult;
use super::in_process::InProcessRunner;
use super::process::ProcessRunner;
use crate::core::config::{BridgeMode, Config, LOG_LEVEL_ENV, MEMORY_ROOT_ENV};
use crate::domains::memory::{Arguments, Dispatcher, MemoryPaths, Mode};

/// Runs one memory command and returns its confirmation text.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Run `mode` with `args`.
    async fn run(&self, mode: Mode, args: &Arguments) -> BridgeResult<String>;
}

/// Log level passed to spawned commands so their stderr carries only failures.
const CHILD_LOG_LEVEL: &str = "error";

/// Build the runner selected by the bridge configuration.
pub fn build_runner(config: &Config) -> BridgeResult<Arc<dyn CommandRunner>> {
    let runner: Arc<dyn CommandRunner> = match config.bridge.mode {
        BridgeMode::InProcess => Arc::new(InProcessRunner::new(Dispatcher::new(
            MemoryPaths::new(config.memory.root.clone()),
        ))),
        BridgeMode::Process => Arc::new(process_runner(config)?),
    };

    info!("Command runner: {}", runner.name());
    Ok(runner)
}

/// The child-process runner for `config`.
///
/// The child writes to the same memory root as the server.
pub fn process_runner(config: &Config) -> BridgeResult<ProcessRunner> {
    let program = match &config.bridge.command {
        Some(command) => command.clone(),
        None => ProcessRunner::default_program()?,
    };
    let mut runner = ProcessRunner::new(program)
        .env(MEMORY_ROOT_ENV, config.memory.root.as_os_str())
        .env(LOG_LEVEL_ENV, CHILD_LOG_LEVEL)
        .max_output_bytes(config.bridge.max_output_bytes);
    if let Some(secs) = config.bridge.timeout_secs {
        runner = runner.timeout(Duration::from_secs(secs));
    }
    Ok(runner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_build_in_process_runner() {
        let mut config = Config::default();
        config.bridge.mode = BridgeMode::InProcess;

        let runner = build_runner(&config).unwrap();
        assert_eq!(runner.name(), "in-process");
    }

    #[test]
    fn test_build_process_runner_with_command() {
        let mut config = Config::default();
        config.bridge.mode = BridgeMode::Process;
        config.bridge.command = Some(PathBuf::from("/usr/local/bin/prompt-memory"));

        let runner = build_runner(&config).unwrap();
        assert_eq!(runner.name(), "/usr/local/bin/prompt-memory");
    }

    #[test]
    fn test_process_runner_environment() {
        let mut config = Config::default();
        config.memory.root = PathBuf::from("/srv/memory");
        config.bridge.command = Some(PathBuf::from("prompt-memory"));

        let runner = process_runner(&config).unwrap();
        let cmd = runner.command(Mode::UpdateContext, &Arguments::default());
        let envs: Vec<_> = cmd
            .as_std()
            .get_envs()
            .map(|(k, v)| {
                (
                    k.to_string_lossy().into_owned(),
                    v.map(|v| v.to_string_lossy().into_owned()),
                )
            })
            .collect();

        assert!(envs.contains(&("MCP_MEMORY_ROOT".to_string(), Some("/srv/memory".to_string()))));
        assert!(envs.contains(&("MCP_LOG_LEVEL".to_string(), Some("error".to_string()))));
    }
}
