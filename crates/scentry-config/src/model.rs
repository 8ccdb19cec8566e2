// SPDX-FileCopyrightText: 2026 Scentry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Scentry triage pipeline.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup. The compiled defaults reproduce the reference
//! deployment: one CRITICAL signature, four monitoring buckets, and the
//! SIERRA / DEREK C / VIRTUS recipient registry.

use scentry_core::{AlertTier, CategoryBucket, RecipientRegistry, Signature};
use serde::{Deserialize, Serialize};

/// Top-level Scentry configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to the
/// reference deployment values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ScentryConfig {
    /// Process identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Signature and bucket tables for the classifier.
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Tier-to-recipient routing settings.
    #[serde(default)]
    pub routing: RoutingConfig,
}

/// Process identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of this triage instance.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "scentry".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Classifier configuration: reference signatures, bucket table, and the
/// detection threshold.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClassifierConfig {
    /// Cosine-similarity score a signature must strictly exceed to raise
    /// a positive detection. The 0.95 default is a deliberate
    /// high-precision bar that fires only on near-exact matches.
    #[serde(default = "default_match_threshold")]
    pub match_threshold: f64,

    /// Registered reference signatures, in registration order. Ties on
    /// score resolve to the earliest entry.
    #[serde(default = "default_signatures")]
    pub signatures: Vec<Signature>,

    /// Ordered fallback bucket table. Walked top to bottom; the final
    /// bucket must be the floorless catch-all.
    #[serde(default = "default_buckets")]
    pub buckets: Vec<CategoryBucket>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            match_threshold: default_match_threshold(),
            signatures: default_signatures(),
            buckets: default_buckets(),
        }
    }
}

fn default_match_threshold() -> f64 {
    0.95
}

fn default_signatures() -> Vec<Signature> {
    vec![Signature {
        label: "Merkel Cell Carcinoma".to_string(),
        vector: vec![0.88, 0.45, 0.12, 0.09],
        descriptor: "Musty-Sweet / Stale Air".to_string(),
        tier: AlertTier::Critical,
    }]
}

fn default_buckets() -> Vec<CategoryBucket> {
    vec![
        CategoryBucket {
            name: "Musty-Sweet".to_string(),
            conditions: vec!["Merkel Cell Carcinoma".to_string()],
            descriptor: "Aliphatic acids".to_string(),
            primary_floor: Some(0.7),
        },
        CategoryBucket {
            name: "Sour / Metallic".to_string(),
            conditions: vec!["Tuberculosis".to_string()],
            descriptor: "Alkanes".to_string(),
            primary_floor: Some(0.5),
        },
        CategoryBucket {
            name: "Acrid / Ammonia".to_string(),
            conditions: vec!["Renal Failure".to_string()],
            descriptor: "Volatile amines".to_string(),
            primary_floor: Some(0.3),
        },
        CategoryBucket {
            name: "Fruity / Acetone".to_string(),
            conditions: vec!["Diabetes".to_string(), "Ketoacidosis".to_string()],
            descriptor: "Ketones".to_string(),
            primary_floor: None,
        },
    ]
}

/// Routing configuration: the tier-to-recipient registry and the default
/// tier label used for non-detection outcomes.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Registry lookup key used for `Monitoring` and `NoSignal` outcomes.
    #[serde(default = "default_tier")]
    pub default_tier: String,

    /// Mapping from tier label to downstream recipient identifier.
    /// Lookups that miss resolve to the literal `"UNKNOWN"`.
    #[serde(default = "default_registry")]
    pub registry: RecipientRegistry,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            default_tier: default_tier(),
            registry: default_registry(),
        }
    }
}

fn default_tier() -> String {
    "GENERAL".to_string()
}

fn default_registry() -> RecipientRegistry {
    RecipientRegistry::from([
        ("CRITICAL".to_string(), "SIERRA".to_string()),
        ("MONITORING".to_string(), "DEREK C".to_string()),
        ("GENERAL".to_string(), "VIRTUS".to_string()),
    ])
}
