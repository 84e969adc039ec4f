//! `resumeforge` - Turn structured resume fields into a styled document
//!
//! This library holds the resume record and its editing operations, renders
//! it with one of three HTML templates, persists it in a local key/value
//! store and exports print-ready documents.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod builder;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod form;
pub mod logging;
pub mod model;
pub mod render;
pub mod storage;

pub use builder::ResumeBuilder;
pub use config::Config;
pub use error::{Error, Result};
pub use export::{DocumentExporter, ExportOptions, Exporter, HtmlPrintExporter};
pub use logging::init_logging;
pub use model::{Resume, Section};
pub use render::{Template, Theme};
pub use storage::{ResumeStore, Storage, StorageStats};
