// SPDX-FileCopyrightText: 2026 Scentry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Signal routing: attach delivery context to a diagnosis and resolve a
//! downstream recipient.
//!
//! The router is stateless beyond its immutable registry and the wrapped
//! classifier; each `route` call is independent.

use chrono::Utc;
use scentry_config::{ClassifierConfig, RoutingConfig};
use scentry_core::{AlertTier, Diagnosis, RecipientRegistry, RoutedSignal, ScentryError};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::classifier::SignatureClassifier;

/// Recipient reported when the registry has no entry for an outcome's tier.
/// Absence is a normal, representable outcome, never an error.
pub const UNKNOWN_RECIPIENT: &str = "UNKNOWN";

/// Digest prefix kept for packet ids (16 hex chars).
const PACKET_ID_BYTES: usize = 8;

/// Routes classified readings to named downstream recipients.
pub struct SignalRouter {
    classifier: SignatureClassifier,
    default_tier: String,
    registry: RecipientRegistry,
}

impl SignalRouter {
    /// Create a router over a classifier built from the given config sections.
    pub fn new(classifier_config: ClassifierConfig, routing_config: RoutingConfig) -> Self {
        Self {
            classifier: SignatureClassifier::new(classifier_config),
            default_tier: routing_config.default_tier,
            registry: routing_config.registry,
        }
    }

    /// Classify a reading and wrap the diagnosis in a routed packet.
    ///
    /// The recipient is resolved from the diagnosis tier (positive
    /// detections) or the configured default tier (monitoring, no
    /// signal); a registry miss resolves to [`UNKNOWN_RECIPIENT`]. The
    /// caller context is echoed into the packet verbatim.
    pub fn route(
        &self,
        reading: &[f64],
        context: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<RoutedSignal, ScentryError> {
        let diagnosis = self.classifier.classify(reading);
        let recipient = self.resolve_recipient(&diagnosis);
        let packet_id = derive_packet_id(&recipient, &diagnosis, context)?;

        match diagnosis.tier() {
            Some(tier @ AlertTier::Critical) => {
                info!(
                    recipient = recipient.as_str(),
                    %tier,
                    packet_id = packet_id.as_str(),
                    "critical detection routed"
                );
            }
            _ => {
                debug!(
                    recipient = recipient.as_str(),
                    packet_id = packet_id.as_str(),
                    "signal routed"
                );
            }
        }

        Ok(RoutedSignal {
            timestamp: Utc::now(),
            recipient,
            diagnosis,
            context: context.clone(),
            packet_id,
        })
    }

    /// Registry lookup keyed by the diagnosis tier label, falling back to
    /// the default tier for non-detection outcomes.
    fn resolve_recipient(&self, diagnosis: &Diagnosis) -> String {
        let key = diagnosis
            .tier()
            .map(|tier| tier.to_string())
            .unwrap_or_else(|| self.default_tier.clone());
        self.registry
            .get(&key)
            .cloned()
            .unwrap_or_else(|| UNKNOWN_RECIPIENT.to_string())
    }
}

/// Content-derived packet id: SHA-256 over the canonical JSON form of
/// (recipient, diagnosis, context), truncated to 16 hex chars.
///
/// The timestamp is excluded so the id is a pure function of packet
/// content. Used for log correlation only; no uniqueness or security
/// guarantee.
fn derive_packet_id(
    recipient: &str,
    diagnosis: &Diagnosis,
    context: &serde_json::Map<String, serde_json::Value>,
) -> Result<String, ScentryError> {
    let payload = serde_json::to_vec(&(recipient, diagnosis, context))?;
    let digest = Sha256::digest(&payload);
    Ok(hex::encode(&digest[..PACKET_ID_BYTES]))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn reference_router() -> SignalRouter {
        SignalRouter::new(ClassifierConfig::default(), RoutingConfig::default())
    }

    fn context_of(pairs: &[(&str, serde_json::Value)]) -> serde_json::Map<String, serde_json::Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn critical_detection_routes_to_sierra() {
        let router = reference_router();
        let signal = router.route(&[0.88, 0.45, 0.12, 0.09], &Default::default()).unwrap();
        assert_eq!(signal.recipient, "SIERRA");
        assert!(signal.diagnosis.is_positive());
    }

    #[test]
    fn monitoring_routes_via_default_tier() {
        let router = reference_router();
        let signal = router.route(&[0.1, 0.2, 0.3, 0.4], &Default::default()).unwrap();
        // GENERAL -> VIRTUS in the reference registry.
        assert_eq!(signal.recipient, "VIRTUS");
    }

    #[test]
    fn no_signal_routes_via_default_tier() {
        let router = reference_router();
        let signal = router.route(&[0.0, 0.0], &Default::default()).unwrap();
        assert_eq!(signal.diagnosis, Diagnosis::NoSignal);
        assert_eq!(signal.recipient, "VIRTUS");
    }

    #[test]
    fn unregistered_tier_resolves_to_unknown() {
        let mut routing = RoutingConfig::default();
        routing.registry.remove("GENERAL");
        let router = SignalRouter::new(ClassifierConfig::default(), routing);

        let signal = router.route(&[0.1, 0.2, 0.3, 0.4], &Default::default()).unwrap();
        assert_eq!(signal.recipient, UNKNOWN_RECIPIENT);
    }

    #[test]
    fn empty_registry_never_fails() {
        let mut routing = RoutingConfig::default();
        routing.registry.clear();
        let router = SignalRouter::new(ClassifierConfig::default(), routing);

        for reading in [&[0.88, 0.45, 0.12, 0.09][..], &[0.1, 0.2, 0.3, 0.4][..], &[0.0][..]] {
            let signal = router.route(reading, &Default::default()).unwrap();
            assert_eq!(signal.recipient, UNKNOWN_RECIPIENT);
        }
    }

    #[test]
    fn context_is_echoed_verbatim() {
        let router = reference_router();
        let context = context_of(&[
            ("trust_score", json!(0.99)),
            ("id", json!("ohio_user_01")),
            ("nested", json!({"a": [1, 2, 3]})),
        ]);

        let signal = router.route(&[0.1, 0.2, 0.3, 0.4], &context).unwrap();
        assert_eq!(signal.context, context);
    }

    #[test]
    fn packet_id_is_stable_for_identical_content() {
        let router = reference_router();
        let context = context_of(&[("trust_score", json!(0.99))]);

        let first = router.route(&[0.1, 0.2, 0.3, 0.4], &context).unwrap();
        let second = router.route(&[0.1, 0.2, 0.3, 0.4], &context).unwrap();
        assert_eq!(first.packet_id, second.packet_id);
        assert_eq!(first.packet_id.len(), 16);
    }

    #[test]
    fn packet_id_varies_with_content() {
        let router = reference_router();
        let monitoring = router.route(&[0.1, 0.2, 0.3, 0.4], &Default::default()).unwrap();
        let detection = router.route(&[0.88, 0.45, 0.12, 0.09], &Default::default()).unwrap();
        assert_ne!(monitoring.packet_id, detection.packet_id);

        let with_context = router
            .route(&[0.1, 0.2, 0.3, 0.4], &context_of(&[("id", json!("x"))]))
            .unwrap();
        assert_ne!(monitoring.packet_id, with_context.packet_id);
    }

    #[test]
    fn alternate_registry_routes_by_configuration() {
        let routing = RoutingConfig {
            default_tier: "RESTORATION".to_string(),
            registry: RecipientRegistry::from([
                ("CRITICAL".to_string(), "SIERRA".to_string()),
                ("RESTORATION".to_string(), "ALPHAVOX".to_string()),
                ("STABILITY".to_string(), "ERUPTOR".to_string()),
            ]),
        };
        let router = SignalRouter::new(ClassifierConfig::default(), routing);

        let monitoring = router.route(&[0.1, 0.2, 0.3, 0.4], &Default::default()).unwrap();
        assert_eq!(monitoring.recipient, "ALPHAVOX");

        let detection = router.route(&[0.88, 0.45, 0.12, 0.09], &Default::default()).unwrap();
        assert_eq!(detection.recipient, "SIERRA");
    }

    #[test]
    fn routed_signal_carries_utc_timestamp() {
        let router = reference_router();
        let before = Utc::now();
        let signal = router.route(&[0.1, 0.2, 0.3, 0.4], &Default::default()).unwrap();
        let after = Utc::now();
        assert!(signal.timestamp >= before && signal.timestamp <= after);
    }
}
