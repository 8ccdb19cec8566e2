// SPDX-FileCopyrightText: 2026 Scentry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Scentry triage pipeline.

use thiserror::Error;

/// The primary error type used across the Scentry workspace.
///
/// The decision core itself never fails: zero vectors, short vectors, and
/// unregistered tiers all map to well-formed result values. These variants
/// cover the surrounding machinery (configuration, packet serialization).
#[derive(Debug, Error)]
pub enum ScentryError {
    /// Configuration errors (invalid TOML, missing required fields, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Packet serialization failed while deriving a packet id.
    #[error("serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
