// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Haven chat service.
//!
//! This crate provides the error type, the shared request/response types, and
//! the adapter traits implemented by the language-model client and the
//! interaction loggers.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::HavenError;
pub use types::{
    AdapterType, ChatRole, ChatTurn, HealthStatus, InteractionRecord, ProviderRequest,
    ProviderResponse, ResponseType, TokenUsage, UserPreferences,
};

pub use traits::{
    select_session_history, select_user_history, InteractionLogAdapter, PluginAdapter,
    ProviderAdapter,
};
