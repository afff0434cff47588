// bucketwarden-core/src/domain/compliance/warning.rs

use serde::{Deserialize, Serialize};

// Annotation texts emitted by the compliance rule evaluator.
// Classification is exact string match against this closed set; anything
// else is ignored by the engine.
pub const ACL_RD_WARNING: &str = "The S3 bucket ACL allows public read access.";
pub const PLCY_RD_WARNING: &str = "The S3 bucket policy allows public read access.";
pub const ACL_WRT_WARNING: &str = "The S3 bucket ACL allows public write access.";
pub const PLCY_WRT_WARNING: &str = "The S3 bucket policy allows public write access.";

// Combined annotations are the plain concatenation of the ACL and policy
// texts (no separator), exactly as the rule evaluator emits them.
pub const RD_COMBO_WARNING: &str = "The S3 bucket ACL allows public read access.\
The S3 bucket policy allows public read access.";
pub const WRT_COMBO_WARNING: &str = "The S3 bucket ACL allows public write access.\
The S3 bucket policy allows public write access.";

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum WarningCategory {
    AclPublicRead,
    PolicyPublicRead,
    AclPublicWrite,
    PolicyPublicWrite,
    CombinedRead,
    CombinedWrite,
}

impl WarningCategory {
    /// Matches an incoming annotation against the known warning texts.
    /// Returns `None` for anything outside the closed set.
    pub fn classify(annotation: &str) -> Option<Self> {
        match annotation {
            ACL_RD_WARNING => Some(Self::AclPublicRead),
            PLCY_RD_WARNING => Some(Self::PolicyPublicRead),
            ACL_WRT_WARNING => Some(Self::AclPublicWrite),
            PLCY_WRT_WARNING => Some(Self::PolicyPublicWrite),
            RD_COMBO_WARNING => Some(Self::CombinedRead),
            WRT_COMBO_WARNING => Some(Self::CombinedWrite),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combo_texts_are_exact_concatenations() {
        assert_eq!(
            RD_COMBO_WARNING,
            format!("{ACL_RD_WARNING}{PLCY_RD_WARNING}")
        );
        assert_eq!(
            WRT_COMBO_WARNING,
            format!("{ACL_WRT_WARNING}{PLCY_WRT_WARNING}")
        );
    }

    #[test]
    fn test_classify_known_annotations() {
        assert_eq!(
            WarningCategory::classify(ACL_RD_WARNING),
            Some(WarningCategory::AclPublicRead)
        );
        assert_eq!(
            WarningCategory::classify(PLCY_RD_WARNING),
            Some(WarningCategory::PolicyPublicRead)
        );
        assert_eq!(
            WarningCategory::classify(ACL_WRT_WARNING),
            Some(WarningCategory::AclPublicWrite)
        );
        assert_eq!(
            WarningCategory::classify(PLCY_WRT_WARNING),
            Some(WarningCategory::PolicyPublicWrite)
        );
        assert_eq!(
            WarningCategory::classify(RD_COMBO_WARNING),
            Some(WarningCategory::CombinedRead)
        );
        assert_eq!(
            WarningCategory::classify(WRT_COMBO_WARNING),
            Some(WarningCategory::CombinedWrite)
        );
    }

    #[test]
    fn test_classify_rejects_near_misses() {
        // Exact match only: no trimming, no case folding, no substring match.
        assert_eq!(WarningCategory::classify(""), None);
        assert_eq!(
            WarningCategory::classify("The S3 bucket ACL allows public read access"),
            None
        );
        assert_eq!(
            WarningCategory::classify("the s3 bucket acl allows public read access."),
            None
        );
        assert_eq!(
            WarningCategory::classify(&format!(" {ACL_RD_WARNING}")),
            None
        );
    }
}
