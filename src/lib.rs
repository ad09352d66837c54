//! Web browser for a single S3 bucket.
//!
//! Objects live in a flat key namespace; `/` in a key is treated as a folder
//! delimiter. The [`vfs`] module maps a listing plus the current prefix to the
//! entries visible at that level, and computes drill-down / drill-up moves.
//! [`web`] serves that over HTTP against any [`s3::ObjectStore`].

pub mod config;
pub mod error;
pub mod providers;
pub mod s3;
pub mod vfs;
pub mod web;

pub use error::BrowseError;
