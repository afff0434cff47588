// bucketwarden-core/src/domain/compliance/decision.rs

use serde::{Deserialize, Serialize};

use crate::domain::compliance::warning::WarningCategory;

/// The kind of notification sent to the review topic.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    PublicReadable,
    NonCompliantPolicy,
    PublicAclAndPolicy,
}

impl NoticeKind {
    /// Composes the message body sent to the review topic. The policy text
    /// is either the bucket's policy document or the not-found sentinel.
    pub fn compose(&self, bucket: &str, policy: &str) -> String {
        match self {
            // The double space after "ACL Reverted." is part of the wire text.
            Self::PublicReadable => format!(
                "Public Readable Bucket Found: {bucket}. ACL Reverted.  Review Policy: {policy}"
            ),
            Self::NonCompliantPolicy => {
                format!("Non Compliant Bucket Policy: {bucket}. Review Policy: {policy}")
            }
            Self::PublicAclAndPolicy => format!(
                "Public ACL & Non Compliant Bucket Policy: {bucket}. Review Policy: {policy}"
            ),
        }
    }
}

/// Subject line for every notification, regardless of the notice kind.
pub fn subject_for(bucket: &str) -> String {
    format!("Compliance Failure: {bucket}")
}

/// What the engine must do for one classified violation: at most one ACL
/// mutation and at most one notification.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct RemediationPlan {
    pub revert_acl: bool,
    pub notice: Option<NoticeKind>,
}

impl RemediationPlan {
    pub const NOOP: Self = Self {
        revert_acl: false,
        notice: None,
    };

    /// Decision table, first match wins. The original rule order matters:
    /// a policy-public-read annotation is intercepted by the first branch,
    /// so the notify-only branch only ever fires for policy-public-write.
    pub fn decide(category: Option<WarningCategory>) -> Self {
        use WarningCategory::*;

        match category {
            Some(AclPublicRead | PolicyPublicRead) => Self {
                revert_acl: true,
                notice: Some(NoticeKind::PublicReadable),
            },
            Some(PolicyPublicWrite) => Self {
                revert_acl: false,
                notice: Some(NoticeKind::NonCompliantPolicy),
            },
            Some(CombinedRead | CombinedWrite) => Self {
                revert_acl: true,
                notice: Some(NoticeKind::PublicAclAndPolicy),
            },
            // ACL-public-write alone never matched any branch upstream.
            Some(AclPublicWrite) | None => Self::NOOP,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_table_pairs() {
        // (category, revert_acl, notice)
        let table = [
            (
                WarningCategory::AclPublicRead,
                true,
                Some(NoticeKind::PublicReadable),
            ),
            (
                WarningCategory::PolicyPublicRead,
                true,
                Some(NoticeKind::PublicReadable),
            ),
            (WarningCategory::AclPublicWrite, false, None),
            (
                WarningCategory::PolicyPublicWrite,
                false,
                Some(NoticeKind::NonCompliantPolicy),
            ),
            (
                WarningCategory::CombinedRead,
                true,
                Some(NoticeKind::PublicAclAndPolicy),
            ),
            (
                WarningCategory::CombinedWrite,
                true,
                Some(NoticeKind::PublicAclAndPolicy),
            ),
        ];

        for (category, revert_acl, notice) in table {
            let plan = RemediationPlan::decide(Some(category));
            assert_eq!(plan.revert_acl, revert_acl, "category {category:?}");
            assert_eq!(plan.notice, notice, "category {category:?}");
        }
    }

    #[test]
    fn test_policy_read_goes_to_first_branch() {
        // Branch order: policy-public-read must land on the ACL-reverting
        // branch, never on the notify-only one.
        let plan = RemediationPlan::decide(Some(WarningCategory::PolicyPublicRead));
        assert!(plan.revert_acl);
        assert_eq!(plan.notice, Some(NoticeKind::PublicReadable));
    }

    #[test]
    fn test_unknown_annotation_is_noop() {
        assert_eq!(RemediationPlan::decide(None), RemediationPlan::NOOP);
    }

    #[test]
    fn test_message_composition() {
        assert_eq!(
            NoticeKind::PublicReadable.compose("bucket-a", "{}"),
            "Public Readable Bucket Found: bucket-a. ACL Reverted.  Review Policy: {}"
        );
        assert_eq!(
            NoticeKind::NonCompliantPolicy.compose("bucket-b", "No Bucket Policy Found."),
            "Non Compliant Bucket Policy: bucket-b. Review Policy: No Bucket Policy Found."
        );
        assert_eq!(subject_for("bucket-a"), "Compliance Failure: bucket-a");
    }
}
