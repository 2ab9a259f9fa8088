//! Resource Registry - the memory documents as MCP resources.

use rmcp::model::{AnnotateAble, RawResource, Resource};

use crate::domains::memory::MemoryDocument;

/// MIME type of every memory document.
pub const MARKDOWN_MIME_TYPE: &str = "text/markdown";

fn build_resource(doc: MemoryDocument) -> Resource {
    let mut raw = RawResource::new(doc.uri(), doc.title());
    raw.description = Some(doc.description().to_string());
    raw.mime_type = Some(MARKDOWN_MIME_TYPE.to_string());
    raw.no_annotation()
}

/// Get all registered resources.
pub fn get_all_resources() -> Vec<Resource> {
    MemoryDocument::ALL.into_iter().map(build_resource).collect()
}
