// SPDX-FileCopyrightText: 2026 Scentry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Signature classification and signal routing for the Scentry triage
//! pipeline.
//!
//! This crate provides:
//! - [`SignatureClassifier`]: cosine-similarity matching against reference
//!   signatures with an ordered bucket fallback (zero-cost, no I/O)
//! - [`SignalRouter`]: recipient resolution over a tier registry, wrapping
//!   each diagnosis in a routed packet with a content-derived id
//!
//! Both are pure functions of their input plus immutable configuration;
//! there is no shared mutable state and no suspension point.

pub mod classifier;
pub mod router;

pub use classifier::SignatureClassifier;
pub use router::{SignalRouter, UNKNOWN_RECIPIENT};
