// SPDX-FileCopyrightText: 2026 Scentry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types for VOC sample triage, plus the vector math the
//! classifier scores with.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Severity of a positive detection.
///
/// The uppercase string forms (`"CRITICAL"`, ...) are the routing keys
/// looked up in the recipient registry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertTier {
    Critical,
    Elevated,
    Advisory,
}

impl AlertTier {
    /// Fixed action text attached to a positive detection at this tier.
    pub fn recommended_action(&self) -> &'static str {
        match self {
            AlertTier::Critical => "SEEK IMMEDIATE MEDICAL ATTENTION",
            AlertTier::Elevated => "SCHEDULE A CLINICAL FOLLOW-UP",
            AlertTier::Advisory => "CONTINUE ROUTINE MONITORING",
        }
    }
}

/// Qualitative confidence attached to bucketed fallback classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum ConfidenceBand {
    #[strum(serialize = "LOW")]
    #[serde(rename = "LOW")]
    Low,
    #[strum(serialize = "LOW-MEDIUM")]
    #[serde(rename = "LOW-MEDIUM")]
    LowMedium,
    #[strum(serialize = "MEDIUM")]
    #[serde(rename = "MEDIUM")]
    Medium,
    #[strum(serialize = "HIGH")]
    #[serde(rename = "HIGH")]
    High,
}

/// A named reference pattern for a known condition's sensor response shape.
///
/// The vector is unit-norm by convention (enforced within tolerance at
/// config validation). Immutable after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Signature {
    /// Condition name reported on a positive detection.
    pub label: String,
    /// Reference response shape across sensor channels.
    pub vector: Vec<f64>,
    /// Free-text scent description.
    pub descriptor: String,
    /// Severity raised when this signature matches.
    pub tier: AlertTier,
}

/// A coarse fallback category used when no signature matches.
///
/// Buckets form an ordered table walked top to bottom; `primary_floor` is
/// the exclusive lower bound on the normalized first channel that selects
/// the bucket. The final bucket carries no floor and catches everything
/// else, including zero and negative values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryBucket {
    /// Category name reported while monitoring.
    pub name: String,
    /// Conditions associated with this category, in reporting order.
    pub conditions: Vec<String>,
    /// Free-text scent description.
    pub descriptor: String,
    /// Exclusive lower bound on the normalized first channel. `None`
    /// marks the catch-all bucket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_floor: Option<f64>,
}

/// The classification outcome for one input vector.
///
/// Exactly one case per call; derived deterministically from the input
/// and the immutable signature/bucket tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Diagnosis {
    /// Zero-norm reading: absent or dead sensor, not an error.
    NoSignal,
    /// A signature matched above the detection threshold.
    PositiveDetection {
        condition: String,
        /// Cosine similarity against the matched signature, in [0, 1]
        /// for realistic readings.
        confidence: f64,
        tier: AlertTier,
        descriptor: String,
        recommended_action: String,
    },
    /// No signature matched; bucketed for lower-urgency monitoring.
    Monitoring {
        category: String,
        possible_conditions: Vec<String>,
        descriptor: String,
        confidence: ConfidenceBand,
    },
}

impl Diagnosis {
    /// The alert tier, present only for positive detections.
    pub fn tier(&self) -> Option<AlertTier> {
        match self {
            Diagnosis::PositiveDetection { tier, .. } => Some(*tier),
            _ => None,
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, Diagnosis::PositiveDetection { .. })
    }
}

/// A diagnosis wrapped with delivery metadata, ready for a downstream
/// recipient. Created once per routing call and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutedSignal {
    /// UTC time the packet was assembled.
    pub timestamp: DateTime<Utc>,
    /// Resolved recipient identifier, `"UNKNOWN"` when the registry has
    /// no entry for the outcome's tier.
    pub recipient: String,
    pub diagnosis: Diagnosis,
    /// Caller-supplied context, echoed verbatim.
    pub context: serde_json::Map<String, serde_json::Value>,
    /// Content-derived identifier for log correlation. Stable for
    /// identical (recipient, diagnosis, context); no uniqueness or
    /// security guarantee.
    pub packet_id: String,
}

/// Static mapping from tier label to downstream recipient identifier.
pub type RecipientRegistry = BTreeMap<String, String>;

/// Euclidean norm of a reading.
pub fn l2_norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Scale a reading to unit norm. Returns `None` for a zero-norm reading
/// (including the empty one) so callers never divide by zero.
pub fn normalize(v: &[f64]) -> Option<Vec<f64>> {
    let norm = l2_norm(v);
    if norm == 0.0 {
        return None;
    }
    Some(v.iter().map(|x| x / norm).collect())
}

/// Dot product over the shared prefix of two vectors.
///
/// For unit-norm inputs of equal length this is cosine similarity.
/// Lengths may differ; the comparison is defined over the channels both
/// sides have, so a short reading scores without panicking.
pub fn dot_shared_prefix(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_tier_display_is_uppercase() {
        assert_eq!(AlertTier::Critical.to_string(), "CRITICAL");
        assert_eq!(AlertTier::Elevated.to_string(), "ELEVATED");
        assert_eq!(AlertTier::Advisory.to_string(), "ADVISORY");
    }

    #[test]
    fn alert_tier_parses_from_registry_key() {
        use std::str::FromStr;
        assert_eq!(AlertTier::from_str("CRITICAL").unwrap(), AlertTier::Critical);
        assert!(AlertTier::from_str("critical").is_err());
    }

    #[test]
    fn confidence_band_display() {
        assert_eq!(ConfidenceBand::LowMedium.to_string(), "LOW-MEDIUM");
        assert_eq!(ConfidenceBand::High.to_string(), "HIGH");
    }

    #[test]
    fn diagnosis_serializes_with_status_tag() {
        let json = serde_json::to_value(&Diagnosis::NoSignal).unwrap();
        assert_eq!(json["status"], "NO_SIGNAL");

        let detection = Diagnosis::PositiveDetection {
            condition: "Merkel Cell Carcinoma".to_string(),
            confidence: 0.998,
            tier: AlertTier::Critical,
            descriptor: "Musty-Sweet / Stale Air".to_string(),
            recommended_action: AlertTier::Critical.recommended_action().to_string(),
        };
        let json = serde_json::to_value(&detection).unwrap();
        assert_eq!(json["status"], "POSITIVE_DETECTION");
        assert_eq!(json["tier"], "CRITICAL");
        assert_eq!(json["recommended_action"], "SEEK IMMEDIATE MEDICAL ATTENTION");
    }

    #[test]
    fn diagnosis_tier_only_on_detection() {
        assert_eq!(Diagnosis::NoSignal.tier(), None);
        let monitoring = Diagnosis::Monitoring {
            category: "Fruity / Acetone".to_string(),
            possible_conditions: vec!["Diabetes".to_string()],
            descriptor: "Ketones".to_string(),
            confidence: ConfidenceBand::LowMedium,
        };
        assert_eq!(monitoring.tier(), None);
        assert!(!monitoring.is_positive());
    }

    #[test]
    fn l2_norm_of_reference_signature() {
        let norm = l2_norm(&[0.88, 0.45, 0.12, 0.09]);
        assert!((norm - 1.0).abs() < 0.01, "reference signature should be near unit, got {norm}");
    }

    #[test]
    fn normalize_zero_vector_is_none() {
        assert!(normalize(&[0.0, 0.0, 0.0]).is_none());
        assert!(normalize(&[]).is_none());
    }

    #[test]
    fn normalize_produces_unit_vector() {
        let unit = normalize(&[3.0, 4.0]).unwrap();
        assert!((l2_norm(&unit) - 1.0).abs() < 1e-12);
        assert!((unit[0] - 0.6).abs() < 1e-12);
        assert!((unit[1] - 0.8).abs() < 1e-12);
    }

    #[test]
    fn dot_truncates_to_shared_prefix() {
        let short = vec![1.0];
        let long = vec![0.88, 0.45, 0.12, 0.09];
        assert!((dot_shared_prefix(&short, &long) - 0.88).abs() < 1e-12);
        assert!((dot_shared_prefix(&long, &short) - 0.88).abs() < 1e-12);
        assert_eq!(dot_shared_prefix(&[], &long), 0.0);
    }

    #[test]
    fn routed_signal_round_trips_through_json() {
        let mut context = serde_json::Map::new();
        context.insert("trust_score".to_string(), serde_json::json!(0.99));
        let signal = RoutedSignal {
            timestamp: Utc::now(),
            recipient: "SIERRA".to_string(),
            diagnosis: Diagnosis::NoSignal,
            context,
            packet_id: "deadbeefdeadbeef".to_string(),
        };
        let json = serde_json::to_string(&signal).unwrap();
        let parsed: RoutedSignal = serde_json::from_str(&json).unwrap();
        assert_eq!(signal, parsed);
    }
}
