// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cost accounting for the Haven chat service.
//!
//! This crate provides:
//! - **Pricing**: per-model cost calculation for OpenAI chat models
//! - **Cost records**: one priced entry per completion call
//! - **Usage tracker**: in-process analytics with canned-reply savings

pub mod pricing;
pub mod record;
pub mod tracker;

pub use pricing::{calculate_cost, get_pricing, ModelPricing};
pub use record::CostRecord;
pub use tracker::{UsageSnapshot, UsageSummary, UsageTracker};
