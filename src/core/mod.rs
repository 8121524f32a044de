//! Core library components.
//!
//! This module contains the reusable business logic: the envelope cipher,
//! the credential store and its persistence, export rendering, and
//! configuration handling.

pub mod cipher;
pub mod config;
pub mod constants;
pub mod export;
pub mod store;
pub mod types;
pub mod validation;
