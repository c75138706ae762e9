//! Static course site builder.
//!
//! A course is a directory of Markdown sources. Every directory that takes part
//! in the site carries a small manifest file listing its entries in order:
//!
//! ```text
//! - intro.md: Introduction
//! - ch1: Chapter 1
//! ```
//!
//! # Core Concepts
//!
//! - [`tree::ContentNode`]: a directory resolved through its manifest into an
//!   ordered set of children, built eagerly and read-only afterwards.
//! - [`tree::ContentFile`]: a leaf source file with lazily loaded content.
//! - [`build::Transform`]: the injected conversion applied to every leaf file.
//! - [`build::OrderIndex`]: the per-section reading order written once per build.

pub mod build;
pub mod config;
pub mod error;
pub mod notebook;
pub mod tree;

pub use build::{build, BuildReport, OrderIndex, Transform};
pub use config::BuildConfig;
pub use error::{BuildError, Result};
