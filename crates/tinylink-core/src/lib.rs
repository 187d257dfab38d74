//! Core types and traits for the tinylink URL shortener.
//!
//! This crate provides the shared vocabulary used by the storage backends,
//! the shortener service and the HTTP gateway.

pub mod alias;
pub mod error;
pub mod repository;
pub mod shortener;

pub use alias::Alias;
pub use error::{ShortenerError, StorageError};
pub use repository::{ReadRepository, Repository, UrlMapping};
pub use shortener::{ShortenParams, ShortenedUrl, Shortener};
