//! # TaskFlow Shared Library
//!
//! This crate contains the domain core shared by the TaskFlow API server:
//! data models with tenancy-scoped queries, authentication primitives, the
//! access policy engine, and the task status workflow.
//!
//! ## Module Organization
//!
//! - `models`: Database models and tenancy-scoped CRUD operations
//! - `auth`: Password hashing, token codec, and the access policy engine
//! - `workflow`: Task status transition validation
//! - `cache`: In-memory cache of task list queries, keyed by organization
//! - `db`: Connection pool and migration runner

pub mod auth;
pub mod cache;
pub mod db;
pub mod models;
pub mod workflow;

/// Current version of the TaskFlow shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
