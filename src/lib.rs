//! Document text extraction server
//!
//! Extracts plain text from uploaded DOCX, PPTX and PDF files (plus link
//! anchors for PDFs) and normalizes phone numbers to `+<cc><national>`.
//!
//! # Modules
//!
//! - `document`: format enum, hyperlink record and document errors
//! - `formats`: per-format extractors (OOXML via quick-xml, PDF via MuPDF)
//! - `phone`: phone number normalization
//! - `routes`: axum handlers and the application router

pub mod config;
pub mod document;
pub mod error;
pub mod formats;
pub mod phone;
pub mod routes;
pub mod state;

pub use config::Config;
pub use routes::app;
pub use state::AppState;
