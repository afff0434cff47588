// bucketwarden-core/src/application/remediation.rs

use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::domain::compliance::{subject_for, RemediationPlan, ViolationEvent, WarningCategory};
use crate::error::WardenError;
use crate::ports::remediation::{AclMutator, Notifier, PolicyContext, PolicyLookup};

/// What one invocation actually did. Consumed for logging and CLI output
/// only; no caller across a network boundary ever sees it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RemediationOutcome {
    pub acl_reverted: bool,
    pub notified: bool,
    pub delivered: bool,
}

/// The Remediation Decision Engine.
///
/// Stateless between invocations: no dedup, no caching of policies or
/// classifications. Collaborators are injected so the engine is testable
/// without a live control plane.
pub struct RemediationEngine {
    policy_lookup: Arc<dyn PolicyLookup>,
    acl_mutator: Arc<dyn AclMutator>,
    notifier: Arc<dyn Notifier>,
}

impl RemediationEngine {
    pub fn new(
        policy_lookup: Arc<dyn PolicyLookup>,
        acl_mutator: Arc<dyn AclMutator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            policy_lookup,
            acl_mutator,
            notifier,
        }
    }

    /// Handles one compliance-violation event end to end.
    ///
    /// Error contract:
    /// - malformed / partial event: info log, `Ok` with no external calls
    ///   (re-delivery of an already-remediated event must never crash us);
    /// - policy lookup failure: sentinel substituted, processing continues;
    /// - publish failure: swallowed, recorded as `delivered = false`;
    /// - ACL mutation failure: PROPAGATED, so the invoking transport's
    ///   retry policy sees a failed remediation instead of a silent one.
    #[instrument(skip(self, event))]
    pub async fn handle(&self, event: &Value) -> Result<RemediationOutcome, WardenError> {
        info!(%event, "Incoming compliance event");

        let violation = match ViolationEvent::from_json(event) {
            Ok(violation) => violation,
            Err(reason) => {
                info!(%reason, "Event already remediated or malformed duplicate; nothing to do");
                return Ok(RemediationOutcome::default());
            }
        };
        info!(bucket = %violation.resource_id, "Bucket flagged non-compliant");

        // Best-effort policy context, fetched up front: review messages
        // embed it whatever the classification turns out to be.
        let policy = match self.policy_lookup.get_policy(&violation.resource_id).await {
            Ok(context) => context,
            Err(reason) => {
                error!(%reason, "Policy lookup failed; substituting sentinel");
                PolicyContext::NotFound
            }
        };
        if policy == PolicyContext::NotFound {
            error!(bucket = %violation.resource_id, "No bucket policy found");
        }

        let plan = RemediationPlan::decide(WarningCategory::classify(&violation.annotation));

        let mut outcome = RemediationOutcome::default();

        if plan.revert_acl {
            self.acl_mutator.set_private(&violation.resource_id).await?;
            outcome.acl_reverted = true;
            info!(bucket = %violation.resource_id, "ACL reverted to private");
        }

        if let Some(notice) = plan.notice {
            let subject = subject_for(&violation.resource_id);
            let message = notice.compose(&violation.resource_id, policy.for_review());

            outcome.notified = true;
            outcome.delivered = match self.notifier.publish(&subject, &message).await {
                Ok(acked) => acked,
                Err(reason) => {
                    error!(%reason, "Notification publish failed; alert not sent");
                    false
                }
            };
            info!(%message, delivered = outcome.delivered, "Notification composed");
        }

        info!(?outcome, "Remediation finished");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::compliance::warning::{
        ACL_RD_WARNING, ACL_WRT_WARNING, PLCY_RD_WARNING, PLCY_WRT_WARNING, RD_COMBO_WARNING,
        WRT_COMBO_WARNING,
    };
    use crate::infrastructure::adapters::memory::{
        PublishBehavior, RecordingAclMutator, RecordingNotifier, StaticPolicyLookup,
    };
    use serde_json::json;

    fn event(bucket: &str, annotation: &str) -> Value {
        json!({
            "detail": {
                "resourceId": bucket,
                "newEvaluationResult": { "annotation": annotation }
            }
        })
    }

    struct Harness {
        acl: Arc<RecordingAclMutator>,
        notifier: Arc<RecordingNotifier>,
        engine: RemediationEngine,
    }

    impl Harness {
        fn new(policy: StaticPolicyLookup, acl: RecordingAclMutator, behavior: PublishBehavior) -> Self {
            let acl = Arc::new(acl);
            let notifier = Arc::new(RecordingNotifier::new(behavior));
            let engine = RemediationEngine::new(Arc::new(policy), acl.clone(), notifier.clone());
            Self {
                acl,
                notifier,
                engine,
            }
        }

        fn default() -> Self {
            Self::new(
                StaticPolicyLookup::empty(),
                RecordingAclMutator::new(),
                PublishBehavior::Ack,
            )
        }
    }

    #[tokio::test]
    async fn test_public_readable_acl_reverts_and_notifies() {
        let h = Harness::default();

        let outcome = h.engine.handle(&event("bucket-a", ACL_RD_WARNING)).await.unwrap();

        assert_eq!(h.acl.reverted(), vec!["bucket-a"]);
        let sent = h.notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "Compliance Failure: bucket-a");
        assert!(sent[0].1.contains("Public Readable Bucket Found: bucket-a"));
        assert_eq!(
            outcome,
            RemediationOutcome {
                acl_reverted: true,
                notified: true,
                delivered: true
            }
        );
    }

    #[tokio::test]
    async fn test_action_pairs_for_all_known_annotations() {
        // (annotation, acl mutated?, notified?)
        let table = [
            (ACL_RD_WARNING, true, true),
            (PLCY_RD_WARNING, true, true),
            (ACL_WRT_WARNING, false, false),
            (PLCY_WRT_WARNING, false, true),
            (RD_COMBO_WARNING, true, true),
            (WRT_COMBO_WARNING, true, true),
        ];

        for (annotation, mutated, notified) in table {
            let h = Harness::default();
            let outcome = h.engine.handle(&event("b", annotation)).await.unwrap();
            assert_eq!(outcome.acl_reverted, mutated, "annotation: {annotation}");
            assert_eq!(outcome.notified, notified, "annotation: {annotation}");
            assert_eq!(h.acl.reverted().len(), usize::from(mutated));
            assert_eq!(h.notifier.sent().len(), usize::from(notified));
        }
    }

    #[tokio::test]
    async fn test_unknown_annotation_does_nothing() {
        let h = Harness::default();

        let outcome = h
            .engine
            .handle(&event("bucket-x", "Bucket versioning is disabled."))
            .await
            .unwrap();

        assert_eq!(outcome, RemediationOutcome::default());
        assert!(h.acl.reverted().is_empty());
        assert!(h.notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn test_missing_fields_are_a_quiet_noop() {
        for payload in [
            json!({}),
            json!({ "detail": { "resourceId": "bucket-a" } }),
            json!({ "detail": { "newEvaluationResult": { "annotation": ACL_RD_WARNING } } }),
            json!(null),
        ] {
            let h = Harness::default();
            let outcome = h.engine.handle(&payload).await.unwrap();
            assert_eq!(outcome, RemediationOutcome::default());
            assert!(h.acl.reverted().is_empty());
            assert!(h.notifier.sent().is_empty());
        }
    }

    #[tokio::test]
    async fn test_sentinel_appears_verbatim_when_no_policy() {
        let h = Harness::default();

        h.engine.handle(&event("bucket-b", PLCY_WRT_WARNING)).await.unwrap();

        let sent = h.notifier.sent();
        assert_eq!(
            sent[0].1,
            "Non Compliant Bucket Policy: bucket-b. Review Policy: No Bucket Policy Found."
        );
        assert!(h.acl.reverted().is_empty());
    }

    #[tokio::test]
    async fn test_policy_document_embedded_when_found() {
        let h = Harness::new(
            StaticPolicyLookup::empty().with_policy("bucket-c", r#"{"Statement":[]}"#),
            RecordingAclMutator::new(),
            PublishBehavior::Ack,
        );

        h.engine.handle(&event("bucket-c", PLCY_WRT_WARNING)).await.unwrap();

        let sent = h.notifier.sent();
        assert!(sent[0].1.ends_with(r#"Review Policy: {"Statement":[]}"#));
    }

    #[tokio::test]
    async fn test_lookup_failure_never_blocks_notification() {
        let h = Harness::new(
            StaticPolicyLookup::failing(),
            RecordingAclMutator::new(),
            PublishBehavior::Ack,
        );

        let outcome = h.engine.handle(&event("bucket-d", ACL_RD_WARNING)).await.unwrap();

        assert!(outcome.notified);
        let sent = h.notifier.sent();
        assert!(sent[0].1.contains("No Bucket Policy Found."));
    }

    #[tokio::test]
    async fn test_publish_failure_is_swallowed_after_acl_revert() {
        let h = Harness::new(
            StaticPolicyLookup::empty(),
            RecordingAclMutator::new(),
            PublishBehavior::Fail,
        );

        let outcome = h.engine.handle(&event("bucket-e", ACL_RD_WARNING)).await.unwrap();

        // The revert already happened and the failure stays inside handle.
        assert_eq!(h.acl.reverted(), vec!["bucket-e"]);
        assert!(outcome.acl_reverted);
        assert!(outcome.notified);
        assert!(!outcome.delivered);
    }

    #[tokio::test]
    async fn test_missing_ack_reported_as_not_delivered() {
        let h = Harness::new(
            StaticPolicyLookup::empty(),
            RecordingAclMutator::new(),
            PublishBehavior::NoAck,
        );

        let outcome = h.engine.handle(&event("bucket-f", PLCY_WRT_WARNING)).await.unwrap();

        assert!(outcome.notified);
        assert!(!outcome.delivered);
    }

    #[tokio::test]
    async fn test_acl_failure_propagates() {
        let h = Harness::new(
            StaticPolicyLookup::empty(),
            RecordingAclMutator::failing(),
            PublishBehavior::Ack,
        );

        let result = h.engine.handle(&event("bucket-g", ACL_RD_WARNING)).await;

        assert!(result.is_err());
        // No alert for a failed remediation; the transport retries instead.
        assert!(h.notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn test_no_dedup_across_invocations() {
        let h = Harness::default();
        let payload = event("bucket-h", ACL_RD_WARNING);

        h.engine.handle(&payload).await.unwrap();
        h.engine.handle(&payload).await.unwrap();

        assert_eq!(h.acl.reverted(), vec!["bucket-h", "bucket-h"]);
        assert_eq!(h.notifier.sent().len(), 2);
    }

    #[tokio::test]
    async fn test_combined_write_annotation_end_to_end() {
        let h = Harness::default();

        let combo = format!("{ACL_WRT_WARNING}{PLCY_WRT_WARNING}");
        let outcome = h.engine.handle(&event("bucket-i", &combo)).await.unwrap();

        assert!(outcome.acl_reverted);
        let sent = h.notifier.sent();
        assert!(sent[0].1.contains("Public ACL & Non Compliant Bucket Policy"));
    }
}
