//! Resource service implementation.
//!
//! Lists the memory documents and reads their current text from disk. Nothing
//! is cached: every read sees the latest write.

use rmcp::model::{ReadResourceResult, Resource, ResourceContents};
use std::io::ErrorKind;
use tracing::{debug, info};

use super::error::ResourceError;
use super::registry::get_all_resources;
use crate::domains::memory::{MemoryDocument, MemoryPaths};

/// Service for listing and reading memory document resources.
pub struct ResourceService {
    paths: MemoryPaths,
}

impl ResourceService {
    /// Create a new ResourceService over the documents under `paths`.
    pub fn new(paths: MemoryPaths) -> Self {
        info!(
            "Initializing ResourceService for {}",
            paths.root().display()
        );
        Self { paths }
    }

    /// List all available resources.
    pub async fn list_resources(&self) -> Vec<Resource> {
        get_all_resources()
    }

    /// Read a resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let doc = MemoryDocument::from_uri(uri).ok_or_else(|| ResourceError::not_found(uri))?;
        let path = self.paths.path(doc);

        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{} has not been created yet", path.display());
                return Err(ResourceError::not_found(uri));
            }
            Err(e) => return Err(e.into()),
        };

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(text, uri)],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::memory::{Arguments, Dispatcher, Mode};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_list_resources() {
        let temp_dir = TempDir::new().unwrap();
        let service = ResourceService::new(MemoryPaths::new(temp_dir.path()));

        let resources = service.list_resources().await;
        assert_eq!(resources.len(), 3);
    }

    #[tokio::test]
    async fn test_read_existing_document() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MemoryPaths::new(temp_dir.path());
        Dispatcher::new(paths.clone())
            .dispatch(Mode::UpdateContext, &Arguments::parse(["summary=Read me"]))
            .unwrap();
        let service = ResourceService::new(paths);

        let result = service.read_resource("memory://current-task").await.unwrap();

        let ResourceContents::TextResourceContents { text, uri, .. } = &result.contents[0] else {
            panic!("Expected text contents");
        };
        assert_eq!(uri, "memory://current-task");
        assert!(text.contains("Summary: Read me"));
    }

    #[tokio::test]
    async fn test_read_document_not_created_yet() {
        let temp_dir = TempDir::new().unwrap();
        let service = ResourceService::new(MemoryPaths::new(temp_dir.path()));

        let result = service.read_resource("memory://dev-status").await;
        assert!(matches!(result, Err(ResourceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_read_unknown_uri() {
        let temp_dir = TempDir::new().unwrap();
        let service = ResourceService::new(MemoryPaths::new(temp_dir.path()));

        let result = service.read_resource("memory://nonexistent").await;
        assert!(result.is_err());
    }
}
