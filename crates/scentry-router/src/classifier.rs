// SPDX-FileCopyrightText: 2026 Scentry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Two-tier VOC sample classification.
//!
//! Scores a reading against registered reference signatures by cosine
//! similarity; a near-exact match raises a positive detection, anything
//! else falls back to the ordered monitoring bucket table. Pure and
//! synchronous: one call, one reading, no state between calls.

use scentry_config::ClassifierConfig;
use scentry_core::{
    CategoryBucket, ConfidenceBand, Diagnosis, Signature, dot_shared_prefix, normalize,
};

/// Classifies one reading into a [`Diagnosis`] using immutable signature
/// and bucket tables fixed at construction.
pub struct SignatureClassifier {
    signatures: Vec<Signature>,
    buckets: Vec<CategoryBucket>,
    match_threshold: f64,
}

impl SignatureClassifier {
    /// Create a classifier from the classifier section of the config.
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            signatures: config.signatures,
            buckets: config.buckets,
            match_threshold: config.match_threshold,
        }
    }

    /// Classify a raw sensor reading.
    ///
    /// A zero-norm reading (including the empty one) is an absent or dead
    /// sensor and returns [`Diagnosis::NoSignal`]. Otherwise the reading
    /// is scaled to unit norm, so only the relative shape across channels
    /// matters, and scored against every registered signature. The best
    /// score must strictly exceed the match threshold to raise a
    /// detection; ties between signatures resolve to the one registered
    /// first. Anything below threshold is bucketed by the first channel
    /// of the unit reading.
    pub fn classify(&self, reading: &[f64]) -> Diagnosis {
        let Some(unit) = normalize(reading) else {
            return Diagnosis::NoSignal;
        };

        if let Some((signature, score)) = self.best_signature_match(&unit)
            && score > self.match_threshold
        {
            return Diagnosis::PositiveDetection {
                condition: signature.label.clone(),
                confidence: score,
                tier: signature.tier,
                descriptor: signature.descriptor.clone(),
                recommended_action: signature.tier.recommended_action().to_string(),
            };
        }

        let primary = unit.first().copied().unwrap_or(0.0);
        match self.bucket_for(primary) {
            Some(bucket) => Diagnosis::Monitoring {
                category: bucket.name.clone(),
                possible_conditions: bucket.conditions.clone(),
                descriptor: bucket.descriptor.clone(),
                confidence: ConfidenceBand::LowMedium,
            },
            // Unreachable with a validated config; a bucket table without
            // a catch-all degrades to NoSignal rather than panicking.
            None => Diagnosis::NoSignal,
        }
    }

    /// Highest-scoring signature for a unit reading.
    ///
    /// Strict comparison while scanning in registration order, so the
    /// earliest-registered signature wins exact ties.
    fn best_signature_match(&self, unit: &[f64]) -> Option<(&Signature, f64)> {
        let mut best: Option<(&Signature, f64)> = None;
        for signature in &self.signatures {
            let score = dot_shared_prefix(unit, &signature.vector);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((signature, score)),
            }
        }
        best
    }

    /// First bucket whose floor the primary channel strictly exceeds;
    /// the floorless final bucket catches everything else.
    fn bucket_for(&self, primary: f64) -> Option<&CategoryBucket> {
        self.buckets
            .iter()
            .find(|bucket| match bucket.primary_floor {
                Some(floor) => primary > floor,
                None => true,
            })
    }
}
