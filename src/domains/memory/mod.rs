//! Memory domain module.
//!
//! Maintains the markdown "memory" documents an agent uses to carry its task
//! context, development status and decision log across sessions.
//!
//! ## Architecture
//!
//! - `store.rs` - Seeding and atomic whole-file writes
//! - `section.rs` - Block scanner and section upsert
//! - `log.rs` - Append-only log regions
//! - `snapshot.rs` - Rendering of snapshots and decision entries
//! - `documents.rs` - The three managed documents and their paths
//! - `dispatcher.rs` - Mode/argument dispatch used by the CLI and the bridge

pub mod dispatcher;
pub mod documents;
mod error;
pub mod log;
pub mod section;
pub mod snapshot;
pub mod store;

pub use dispatcher::{Arguments, DispatchOutcome, Dispatcher, Mode, UPDATED_MESSAGE, usage};
pub use documents::{MemoryDocument, MemoryPaths};
pub use error::{MemoryError, MemoryResult};
pub use log::{AppendOutcome, append_line};
pub use section::{BlockScan, BlockSpan, Sentinels, UpsertOutcome, scan, upsert};
