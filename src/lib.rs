//! # Taskboard
//!
//! A minimal task-tracking CRUD service over HTTP.
//!
//! This library provides:
//! - An HTTP API for creating, listing, fetching, updating, and deleting tasks
//! - SQLite-backed persistence with a connection scoped to each request
//!
//! ## Request Flow
//! 1. Router deserializes and validates the request body/query
//! 2. Handler opens a storage session and hands it to [`service::TaskService`]
//! 3. The service reads/writes the `tasks` table
//! 4. The handler serializes the result (or a 404 when the id is unknown)
//!
//! ## Modules
//! - `config`: startup configuration read from environment variables
//! - `db`: session factory and row-level storage operations
//! - `task`: the persisted task record and its status enumeration
//! - `service`: create/list/get/update/delete semantics
//! - `api`: axum router and transfer schemas

pub mod api;
pub mod config;
pub mod db;
pub mod service;
pub mod task;

pub use config::Config;
