//! Ruscorpora Harvester - Download usage examples from the Russian National Corpus.
//!
//! This crate walks the result pages of a corpus search query and turns every
//! example ("case") into a tab-separated record with the matched words split
//! out from the surrounding text.
//!
//! # Example
//!
//! ```
//! use ruscorpora_harvester::config;
//!
//! assert!(config::validate_query_url("https://processing.ruscorpora.ru/search.xml?req=dom").is_ok());
//! assert!(config::validate_query_url("https://example.com/search.xml").is_err());
//! ```
//!
//! # Architecture
//!
//! The harvester is organized into several modules:
//!
//! - [`config`]: Configuration constants and query validation
//! - [`types`]: Core data types (Document, Case, Segment, Window)
//! - [`error`]: Error types and Result alias
//! - [`http`]: HTTP page download with retries
//! - [`sequencer`]: Result page URL generation
//! - [`stats`]: Result totals from the first page
//! - [`page`]: Splitting pages into documents and cases
//! - [`case`]: Splitting cases into plain and highlighted segments
//! - [`text`]: Whitespace normalization
//! - [`stream`]: Lazy document stream across pages
//! - [`output`]: Tab-separated record output
//! - [`cli`]: Command-line interface
//! - [`harvester`]: Main harvester service

pub mod case;
pub mod cli;
pub mod config;
pub mod error;
pub mod harvester;
pub mod http;
pub mod output;
pub mod page;
pub mod sequencer;
pub mod stats;
pub mod stream;
pub mod text;
pub mod types;

// Re-export main functions
pub use harvester::{download_examples, harvest, HarvestSummary};

// Re-export commonly used items
pub use config::validate_query_url;
pub use error::{HarvesterError, ParseError, Result};
pub use types::{Case, Document, PageStats, Segment, Window};
