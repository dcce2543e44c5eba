//! Shared utilities, configuration, and error handling for TaskHub
//!
//! This crate provides common functionality used across the TaskHub
//! application:
//! - Configuration management following 12-factor principles
//! - Error types and handling
//! - Pagination and validated-JSON extractors
//! - The tenant-scoped query core shared by every domain repository

pub mod config;
pub mod error;
pub mod extractors;
pub mod scoped;

pub use error::{Error, Result};
pub use extractors::{Pagination, ValidatedJson};
pub use scoped::{fetch_page, fetch_scoped, EntityQuery, FilterField, MatchKind, Page, TenantScope};
