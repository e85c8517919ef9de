//! # Block Schema Model
//!
//! The persisted representation of an article body: a versioned envelope
//! wrapping an ordered sequence of tagged blocks.
//!
//! Decoding is structural and permissive. An unrecognized `kind` is kept as
//! [`Block::Unknown`] rather than rejected, so documents written by older or
//! newer editors never hard-fail the whole page, and one malformed block
//! never aborts decoding of the rest.

mod decode;

pub use decode::{decode_block, decode_document};

use thiserror::Error;

/// Failure to decode a document envelope.
///
/// Only the envelope itself is fatal; individual blocks degrade to
/// [`Block::Unknown`] instead of raising. Callers map these to a generic
/// "content unavailable" state and never show the raw error to readers.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("document is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("document envelope is not a JSON object")]
    InvalidEnvelope,
    #[error("document has no blocks array")]
    MissingBlocks,
    #[error("block at index {0} does not match any known shape")]
    MalformedBlock(usize),
}

/// Envelope version, written as either a number or a tag string upstream.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaVersion {
    Number(i64),
    Tag(String),
}

impl std::fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaVersion::Number(n) => write!(f, "{n}"),
            SchemaVersion::Tag(s) => write!(f, "{s}"),
        }
    }
}

/// A decoded article body. Immutable once handed to the pipeline;
/// `blocks` order is render order and is never reordered downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub schema_version: SchemaVersion,
    /// Creation timestamp (epoch milliseconds) when the producer recorded one.
    pub created_at: Option<i64>,
    pub blocks: Vec<Block>,
}

/// Third-party embed provider named by an embed block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedService {
    Youtube,
    Twitter,
    Instagram,
    Vimeo,
    Other,
}

impl EmbedService {
    /// Maps a raw service string; anything unrecognized is `Other`.
    pub fn from_label(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "youtube" => EmbedService::Youtube,
            "twitter" | "x" => EmbedService::Twitter,
            "instagram" => EmbedService::Instagram,
            "vimeo" => EmbedService::Vimeo,
            _ => EmbedService::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EmbedService::Youtube => "youtube",
            EmbedService::Twitter => "twitter",
            EmbedService::Instagram => "instagram",
            EmbedService::Vimeo => "vimeo",
            EmbedService::Other => "other",
        }
    }
}

/// One unit of a structured document, keyed by `kind`.
///
/// Closed union with an explicit `Unknown` catch-all; adding a new kind means
/// one variant here plus one render rule, with exhaustiveness checked at
/// compile time in the renderer's match.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph {
        text: String,
        caption: Option<String>,
    },
    Header {
        text: String,
        /// Raw level as written; clamped to 1..=6 at render time.
        level: Option<i64>,
        caption: Option<String>,
    },
    Quote {
        text: String,
        caption: Option<String>,
    },
    Warning {
        text: String,
        caption: Option<String>,
    },
    List {
        items: Vec<String>,
        ordered: bool,
    },
    Table {
        rows: Vec<Vec<String>>,
        has_header: bool,
    },
    Image {
        src: String,
        alt: Option<String>,
        caption: Option<String>,
    },
    Embed {
        service: EmbedService,
        source_url: String,
        embed_url: Option<String>,
        caption: Option<String>,
    },
    Delimiter,
    /// Untrusted markup; passes through the sanitization gate like everything
    /// else, never special-cased to bypass it.
    Raw {
        html: String,
    },
    /// Forward-compatibility catch-all. Renders as its caption only, or
    /// nothing at all.
    Unknown {
        caption: Option<String>,
    },
}
