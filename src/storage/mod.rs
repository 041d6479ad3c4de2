//! Storage layer for artwork-table
//!
//! Only user configuration is persisted (TOML). Records and selections live
//! in memory for the duration of a session.

use crate::error::StorageError;

pub mod config;

type Result<T> = std::result::Result<T, StorageError>;
