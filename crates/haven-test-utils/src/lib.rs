// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Haven integration tests.
//!
//! Provides mock adapters and test harness infrastructure for fast,
//! deterministic, CI-runnable tests without external services.
//!
//! # Components
//!
//! - [`MockProvider`] - Mock language-model provider with pre-configured responses
//! - [`MemoryLog`] - In-memory interaction log with append capture
//! - [`TestHarness`] - The full gateway router wired to both mocks

pub mod harness;
pub mod memory_log;
pub mod mock_provider;

pub use harness::{TestHarness, TestHarnessBuilder, TEST_ADMIN_TOKEN};
pub use memory_log::MemoryLog;
pub use mock_provider::{MockProvider, MOCK_USAGE};
