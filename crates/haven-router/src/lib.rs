// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message classification and routing for Haven.
//!
//! This crate provides:
//! - [`detect_crisis`], [`detect_exercise`], [`detect_business`]: keyword
//!   detectors over static tables, each returning a [`Detection`]
//! - [`MessageRouter`]: runs the detectors in priority order and decides
//!   between a canned reply and a language-model pass-through
//!
//! Classification is pure string matching. It never fails, never performs
//! I/O, and gives the same answer for the same message every time.

pub mod business;
pub mod crisis;
pub mod detection;
pub mod exercise;
pub mod responses;
pub mod router;

pub use business::detect_business;
pub use crisis::{detect_crisis, CrisisResources, CRISIS_RESOURCES};
pub use detection::{
    BusinessTopic, Category, CrisisTier, Detection, ExerciseKind, Priority, ResponsePolicy,
    Subtype,
};
pub use exercise::detect_exercise;
pub use router::{ClassificationRequest, MessageRouter, PassThrough, RouteDecision};
