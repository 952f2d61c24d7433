//! Tag extraction (C2): tree-sitter-tags wiring and per-language queries.

pub mod extractor;
mod languages;

pub use extractor::TagExtractor;
