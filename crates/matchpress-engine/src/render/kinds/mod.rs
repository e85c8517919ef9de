//! Per-kind render rules. Each module owns one family of block kinds and
//! emits a single fragment; inline text goes through the reference resolver
//! on the way in.

pub mod list;
pub mod media;
pub mod table;
pub mod text;
