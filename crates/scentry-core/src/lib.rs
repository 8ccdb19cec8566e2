// SPDX-FileCopyrightText: 2026 Scentry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Scentry triage pipeline.
//!
//! This crate provides the shared domain types (tiers, signatures,
//! buckets, diagnoses, routed packets), the workspace error type, and the
//! vector math used for signature scoring.

pub mod error;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::ScentryError;
pub use types::{
    AlertTier, CategoryBucket, ConfidenceBand, Diagnosis, RecipientRegistry, RoutedSignal,
    Signature, dot_shared_prefix, l2_norm, normalize,
};
