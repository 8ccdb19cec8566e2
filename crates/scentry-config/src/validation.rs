// SPDX-FileCopyrightText: 2026 Scentry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as threshold ranges, unit-norm signature vectors, and
//! bucket table ordering.

use std::collections::HashSet;

use scentry_core::l2_norm;

use crate::diagnostic::ConfigError;
use crate::model::ScentryConfig;

/// Tolerance for the unit-norm convention on signature vectors.
const UNIT_NORM_TOLERANCE: f64 = 0.01;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &ScentryConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.agent.name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "agent.name must not be empty".to_string(),
        });
    }

    let threshold = config.classifier.match_threshold;
    if !(threshold > 0.0 && threshold <= 1.0) {
        errors.push(ConfigError::Validation {
            message: format!(
                "classifier.match_threshold must be in (0, 1], got {threshold}"
            ),
        });
    }

    if config.classifier.signatures.is_empty() {
        errors.push(ConfigError::Validation {
            message: "classifier.signatures must contain at least one signature".to_string(),
        });
    }

    let mut seen_labels = HashSet::new();
    for (i, signature) in config.classifier.signatures.iter().enumerate() {
        if signature.label.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("classifier.signatures[{i}].label must not be empty"),
            });
        }

        if signature.vector.is_empty() {
            errors.push(ConfigError::Validation {
                message: format!(
                    "classifier.signatures[{i}] (`{}`) has an empty vector",
                    signature.label
                ),
            });
        } else {
            let norm = l2_norm(&signature.vector);
            if (norm - 1.0).abs() > UNIT_NORM_TOLERANCE {
                errors.push(ConfigError::Validation {
                    message: format!(
                        "classifier.signatures[{i}] (`{}`) must be unit-norm, got norm {norm:.4}",
                        signature.label
                    ),
                });
            }
        }

        if !seen_labels.insert(&signature.label) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "duplicate signature label `{}` in classifier.signatures",
                    signature.label
                ),
            });
        }
    }

    validate_buckets(config, &mut errors);

    if config.routing.default_tier.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "routing.default_tier must not be empty".to_string(),
        });
    }

    for (tier, recipient) in &config.routing.registry {
        if recipient.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("routing.registry.{tier} must not map to an empty recipient"),
            });
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Bucket table constraints: non-empty, floors strictly descending, and
/// exactly the final bucket floorless (the catch-all).
fn validate_buckets(config: &ScentryConfig, errors: &mut Vec<ConfigError>) {
    let buckets = &config.classifier.buckets;

    if buckets.is_empty() {
        errors.push(ConfigError::Validation {
            message: "classifier.buckets must contain at least one bucket".to_string(),
        });
        return;
    }

    let last = buckets.len() - 1;
    let mut previous_floor: Option<f64> = None;

    for (i, bucket) in buckets.iter().enumerate() {
        if bucket.name.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("classifier.buckets[{i}].name must not be empty"),
            });
        }

        match (i == last, bucket.primary_floor) {
            (false, None) => {
                errors.push(ConfigError::Validation {
                    message: format!(
                        "classifier.buckets[{i}] (`{}`) needs a primary_floor; only the final bucket is the catch-all",
                        bucket.name
                    ),
                });
            }
            (true, Some(floor)) => {
                errors.push(ConfigError::Validation {
                    message: format!(
                        "classifier.buckets[{i}] (`{}`) is the final bucket and must omit primary_floor, got {floor}",
                        bucket.name
                    ),
                });
            }
            (_, floor) => {
                if let (Some(prev), Some(current)) = (previous_floor, floor)
                    && current >= prev
                {
                    errors.push(ConfigError::Validation {
                        message: format!(
                            "classifier.buckets[{i}] (`{}`) floor {current} must be below the previous floor {prev}",
                            bucket.name
                        ),
                    });
                }
                previous_floor = floor.or(previous_floor);
            }
        }
    }
}
