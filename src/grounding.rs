//! Tool output records and grounding-metadata conversion

use serde::{Deserialize, Serialize};

use crate::gemini::GroundingMetadata;

/// A web source backing a citation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub uri: String,
}

/// A span of generated text and the sources that support it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationEntry {
    pub text: String,
    pub start_index: usize,
    pub end_index: usize,
    pub sources: Vec<Source>,
}

/// Result of `web_search` with citations requested
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSearchOutput {
    pub text: String,
    pub web_search_queries: Vec<String>,
    pub citations: Vec<CitationEntry>,
}

/// Plain text tool result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextOutput {
    pub text: String,
}

/// Turn grounding supports into citation entries
///
/// Missing offsets become 0. Chunk indices that point past the chunk list, or
/// at chunks without web info, are skipped.
pub fn structured_citations(metadata: Option<&GroundingMetadata>) -> Vec<CitationEntry> {
    let Some(metadata) = metadata else {
        return Vec::new();
    };

    metadata
        .grounding_supports
        .iter()
        .map(|support| {
            let segment = support.segment.as_ref();
            let sources = support
                .grounding_chunk_indices
                .iter()
                .filter_map(|idx| metadata.grounding_chunks.get(*idx))
                .filter_map(|chunk| chunk.web.as_ref())
                .map(|web| Source {
                    title: web.title.clone().unwrap_or_default(),
                    uri: web.uri.clone().unwrap_or_default(),
                })
                .collect();

            CitationEntry {
                text: segment.and_then(|s| s.text.clone()).unwrap_or_default(),
                start_index: segment.and_then(|s| s.start_index).unwrap_or(0),
                end_index: segment.and_then(|s| s.end_index).unwrap_or(0),
                sources,
            }
        })
        .collect()
}
