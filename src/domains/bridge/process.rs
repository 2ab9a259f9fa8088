//! Child-process command runner.
//!
//! Runs the `prompt-memory` command as a separate process per call. The mode
//! and `key=value` pairs are passed as positional arguments; standard output
//! and standard error are read concurrently into bounded buffers while the
//! child runs.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::{debug, instrument, warn};

use super::error::{BridgeError, BridgeResult};
use super::runner::CommandRunner;
use crate::domains::memory::{Arguments, Mode};

/// Text returned when the command succeeds without printing anything.
pub const EMPTY_OUTPUT: &str = "ok";

/// Default bound for each captured stream.
pub const DEFAULT_MAX_OUTPUT_BYTES: usize = 1024 * 1024;

const CHUNK_SIZE: usize = 8 * 1024;

/// Runs memory commands as child processes.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    program: PathBuf,
    name: String,
    prefix_args: Vec<OsString>,
    working_dir: Option<PathBuf>,
    envs: Vec<(OsString, OsString)>,
    max_output_bytes: usize,
    timeout: Option<Duration>,
}

impl ProcessRunner {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        let program = program.into();
        Self {
            name: program.to_string_lossy().into_owned(),
            program,
            prefix_args: Vec::new(),
            working_dir: None,
            envs: Vec::new(),
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
            timeout: None,
        }
    }

    /// The `prompt-memory` binary installed next to the current executable.
    pub fn default_program() -> BridgeResult<PathBuf> {
        let exe = std::env::current_exe()?;
        Ok(exe.with_file_name(format!(
            "prompt-memory{}",
            std::env::consts::EXE_SUFFIX
        )))
    }

    /// Arguments placed before the mode.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.prefix_args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.working_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn env(mut self, key: impl AsRef<OsStr>, value: impl AsRef<OsStr>) -> Self {
        self.envs
            .push((key.as_ref().to_os_string(), value.as_ref().to_os_string()));
        self
    }

    pub fn max_output_bytes(mut self, limit: usize) -> Self {
        self.max_output_bytes = limit;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Name used in exit-status messages.
    fn label(&self) -> String {
        self.program
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.name.clone())
    }

    /// Build the command line for one invocation.
    pub fn command(&self, mode: Mode, args: &Arguments) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.prefix_args)
            .arg(mode.as_str())
            .args(args.to_tokens())
            .envs(self.envs.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }
        cmd
    }
}

/// Read `reader` to the end, failing once more than `limit` bytes arrive.
async fn read_bounded<R>(mut reader: R, stream: &'static str, limit: usize) -> BridgeResult<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    let mut chunk = vec![0u8; CHUNK_SIZE];
    loop {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            return Ok(buf);
        }
        if buf.len() + n > limit {
            return Err(BridgeError::OutputLimit { stream, limit });
        }
        buf.extend_from_slice(&chunk[..n]);
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip(self, args), fields(program = %self.name, mode = %mode))]
    async fn run(&self, mode: Mode, args: &Arguments) -> BridgeResult<String> {
        let mut child = self
            .command(mode, args)
            .spawn()
            .map_err(|e| BridgeError::spawn(self.name.clone(), e))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| BridgeError::internal("failed to capture stdout"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| BridgeError::internal("failed to capture stderr"))?;

        let limit = self.max_output_bytes;
        // The first failing stream ends the call; kill_on_drop reaps the child.
        let collect = async {
            tokio::try_join!(
                read_bounded(stdout, "stdout", limit),
                read_bounded(stderr, "stderr", limit),
                async { child.wait().await.map_err(BridgeError::from) }
            )
        };

        let collected = match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, collect).await,
            None => Ok(collect.await),
        };

        let (stdout, stderr, status) = match collected {
            Ok(result) => result?,
            Err(_) => {
                let timeout = self.timeout.unwrap_or_default();
                warn!("{} timed out after {:?}, killing it", self.name, timeout);
                let _ = child.kill().await;
                return Err(BridgeError::Timeout(timeout));
            }
        };

        debug!(
            "{} exited with {:?} ({} bytes stdout, {} bytes stderr)",
            self.name,
            status.code(),
            stdout.len(),
            stderr.len()
        );

        if status.success() {
            let text = String::from_utf8_lossy(&stdout).into_owned();
            return Ok(if text.is_empty() {
                EMPTY_OUTPUT.to_string()
            } else {
                text
            });
        }

        let stderr = String::from_utf8_lossy(&stderr).into_owned();
        let message = if !stderr.is_empty() {
            stderr
        } else {
            match status.code() {
                Some(code) => format!("{} exited with code {}", self.label(), code),
                None => format!("{} terminated by signal", self.label()),
            }
        };
        warn!("{} failed: {}", self.name, message.trim_end());
        Err(BridgeError::failed(message))
    }
}
