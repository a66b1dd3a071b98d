//! Subscriber List Consolidation API Library
//!
//! This library provides the core functionality for the subscriber
//! list consolidation service: the client registry, the uploaded-list
//! filter, the Iterable list fetcher, the consolidation engine, and
//! the HTTP handlers in front of them.
//!
//! # Modules
//!
//! - `config`: Configuration management.
//! - `engine`: The consolidation pipeline.
//! - `errors`: Error handling types.
//! - `fetcher`: Iterable list-export client.
//! - `handlers`: HTTP request handlers.
//! - `models`: Core data models.
//! - `registry`: Client and project configuration.
//! - `upload`: Uploaded CSV filtering.

// Re-export primary modules for shared use in tests and other binaries
pub mod config;
pub mod engine;
pub mod errors;
pub mod fetcher;
pub mod handlers;
pub mod models;
pub mod registry;
pub mod upload;
