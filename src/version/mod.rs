//! Script module version resolution
//!
//! Turns the raw version list a registry publishes for a `@minecraft/*`
//! script module into range tables, and answers selection and update
//! questions over them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Registry   │────▶│ Descriptor  │────▶│ RangeTable  │────▶│  Selector   │
//! │  (fetch)    │     │  (parse)    │     │  (build)    │     │ (candidates)│
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                                                ▼
//!                                         ┌─────────────┐
//!                                         │   Update    │
//!                                         │ (diff/plan) │
//!                                         └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`descriptor`]: Composite version string parser and release channels
//! - [`platform`]: Minecraft platform versions and their ordering
//! - [`range`]: Stable and beta range tables built from raw versions
//! - [`selector`]: Candidate lists and default picks for choosers
//! - [`diff`]: Unchanged / changed / removed / added classification
//! - [`update`]: Update plan and its state machine
//! - [`registry`]: Registry trait for fetching raw versions
//! - [`registries`]: npm registry implementation
//! - [`fetch`]: Concurrent fetch and build for several modules
//! - [`error`]: Error types for registry, platform parsing and updates

pub mod descriptor;
pub mod diff;
pub mod error;
pub mod fetch;
pub mod platform;
pub mod range;
pub mod registries;
pub mod registry;
pub mod selector;
pub mod update;
