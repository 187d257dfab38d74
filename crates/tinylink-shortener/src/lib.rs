//! URL shortener service implementation.
//!
//! This crate glues a [`Repository`][tinylink_core::Repository] and a
//! [`Generator`][tinylink_generator::Generator] together behind the
//! [`Shortener`][tinylink_core::Shortener] trait. Core types are re-exported
//! from `tinylink_core`.

pub mod service;

pub use service::{validate_url, ShortenerService, ShortenerSettings};
pub use tinylink_core::{ShortenParams, ShortenedUrl, Shortener, ShortenerError};
