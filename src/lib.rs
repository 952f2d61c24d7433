//! repomap: a static code-intelligence engine.
//!
//! Discovers source files, extracts tags via tree-sitter, builds a
//! dependency graph from resolved imports, and ranks files by centrality
//! and change-impact. [`facade::Facade`] is the single entry point; every
//! other module is a component it composes.

pub mod cache;
pub mod centrality;
pub mod config;
pub mod discovery;
pub mod error;
pub mod facade;
pub mod graph;
pub mod impact;
pub mod imports;
pub mod matchers;
pub mod orchestrator;
pub mod tags;
pub mod terms;
pub mod types;

pub use config::Config;
pub use error::RepoMapError;
pub use error::Result;
pub use facade::Facade;
pub use facade::FacadeStats;
