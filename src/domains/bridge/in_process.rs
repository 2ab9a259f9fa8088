//! In-process command runner.
//!
//! Calls the dispatcher directly on the blocking thread pool instead of
//! spawning a child process.

use async_trait::async_trait;
use tracing::instrument;

use super::error::BridgeResult;
use super::runner::CommandRunner;
use crate::domains::memory::{Arguments, Dispatcher, Mode};

pub struct InProcessRunner {
    dispatcher: Dispatcher,
}

impl InProcessRunner {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl CommandRunner for InProcessRunner {
    fn name(&self) -> &str {
        "in-process"
    }

    #[instrument(skip(self, args), fields(mode = %mode))]
    async fn run(&self, mode: Mode, args: &Arguments) -> BridgeResult<String> {
        let dispatcher = self.dispatcher.clone();
        let args = args.clone();

        let outcome =
            tokio::task::spawn_blocking(move || dispatcher.dispatch(mode, &args)).await??;

        Ok(format!("{}\n", outcome.message()))
    }
}
