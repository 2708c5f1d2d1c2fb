//! Shared types for the Ampere power-control platform.
//!
//! This crate contains:
//! - **Auth primitives** — JWT creation/validation, Argon2id password hashing
//! - **Data models** — status, command, and configuration types shared
//!   between the control server and its clients

pub mod auth;
pub mod models;
