pub mod hydrate;
pub mod inline;
pub mod pipeline;
pub mod render;
pub mod sanitize;
pub mod schema;

// Re-export key types for easier usage
pub use hydrate::{EmbedHost, EmbedRequest, HydrationReport, HydrationState, hydrate};
pub use pipeline::{RenderOutcome, render_article, render_document};
pub use schema::{Block, DecodeError, Document, EmbedService, SchemaVersion};
