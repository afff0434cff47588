// bucketwarden-core/src/ports/remediation.rs

// These traits define what the engine needs from the outside world, without
// knowing how it's done. The storage control plane and the messaging topic
// are external collaborators; only their shape is owned here.

use crate::infrastructure::error::InfrastructureError;
use async_trait::async_trait;

/// Fixed placeholder used in review messages when a bucket has no policy
/// document configured.
pub const NO_POLICY_SENTINEL: &str = "No Bucket Policy Found.";

/// A bucket's current access-policy document, or the explicit absence of one.
/// "Not configured" is an expected, common case and must never surface as an
/// adapter error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyContext {
    Found(String),
    NotFound,
}

impl PolicyContext {
    /// Text embedded in review messages: the document itself, or the sentinel.
    pub fn for_review(&self) -> &str {
        match self {
            Self::Found(document) => document,
            Self::NotFound => NO_POLICY_SENTINEL,
        }
    }
}

/// Read-side collaborator: fetches a bucket's current policy document.
#[async_trait]
pub trait PolicyLookup: Send + Sync {
    async fn get_policy(&self, bucket: &str) -> Result<PolicyContext, InfrastructureError>;
}

/// Write-side collaborator: asserts a private ACL on the bucket.
/// Unconditional overwrite, idempotent; never reads the current ACL first.
#[async_trait]
pub trait AclMutator: Send + Sync {
    async fn set_private(&self, bucket: &str) -> Result<(), InfrastructureError>;
}

/// Messaging collaborator: publishes to the pre-configured review topic.
/// The returned bool is the delivery acknowledgment (a message id came back).
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn publish(&self, subject: &str, message: &str) -> Result<bool, InfrastructureError>;
}
