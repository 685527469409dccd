//! Todos - a todo store and an interactive todo loop
//!
//! This crate provides the core functionality for the `todos` binary.
//!
//! # Architecture
//!
//! - [`model`] - Data types (Todo, TodoStatus)
//! - [`validate`] - Field validation for every write path
//! - [`storage`] - SQLite database layer with embedded migrations
//! - [`server`] - HTTP API over the store (actix-web)
//! - [`repl`] - In-memory interactive loop, independent of the store
//! - [`cli`] - Command-line interface using clap
//! - [`config`] - Database path and bind address resolution
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod repl;
pub mod server;
pub mod storage;
pub mod validate;

pub use error::{Error, Result};
