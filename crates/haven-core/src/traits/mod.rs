// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for Haven's external collaborators.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod interaction_log;
pub mod provider;

pub use adapter::PluginAdapter;
pub use interaction_log::{select_session_history, select_user_history, InteractionLogAdapter};
pub use provider::ProviderAdapter;
