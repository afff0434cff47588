// bucketwarden-core/src/infrastructure/adapters/memory.rs

// In-memory stand-ins for the three collaborators. They record every call
// so unit tests and `handle --dry-run` can inspect what the engine would
// have done against the live control plane.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::infrastructure::error::InfrastructureError;
use crate::ports::remediation::{AclMutator, Notifier, PolicyContext, PolicyLookup};

fn unavailable(what: &str) -> InfrastructureError {
    InfrastructureError::Io(std::io::Error::other(format!("{what} unavailable")))
}

// --- POLICY LOOKUP ---

#[derive(Default)]
pub struct StaticPolicyLookup {
    policies: HashMap<String, String>,
    fail: bool,
}

impl StaticPolicyLookup {
    /// No bucket has a policy document: every lookup yields `NotFound`.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, bucket: &str, document: &str) -> Self {
        self.policies.insert(bucket.to_string(), document.to_string());
        self
    }

    /// Every lookup errors, simulating an unreachable control plane.
    pub fn failing() -> Self {
        Self {
            policies: HashMap::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl PolicyLookup for StaticPolicyLookup {
    async fn get_policy(&self, bucket: &str) -> Result<PolicyContext, InfrastructureError> {
        if self.fail {
            return Err(unavailable("policy lookup"));
        }
        Ok(match self.policies.get(bucket) {
            Some(document) => PolicyContext::Found(document.clone()),
            None => PolicyContext::NotFound,
        })
    }
}

// --- ACL MUTATOR ---

#[derive(Default)]
pub struct RecordingAclMutator {
    calls: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingAclMutator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every mutation errors, simulating a denied `put_bucket_acl`.
    pub fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Buckets the engine asked to revert, in call order.
    pub fn reverted(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl AclMutator for RecordingAclMutator {
    async fn set_private(&self, bucket: &str) -> Result<(), InfrastructureError> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(bucket.to_string());
        if self.fail {
            return Err(unavailable("acl mutation"));
        }
        Ok(())
    }
}

// --- NOTIFIER ---

/// How the fake topic responds to a publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishBehavior {
    /// Accept and acknowledge (a message id comes back).
    Ack,
    /// Accept but never acknowledge.
    NoAck,
    /// Error out, like a topic the caller cannot reach.
    Fail,
}

pub struct RecordingNotifier {
    sent: Mutex<Vec<(String, String)>>,
    behavior: PublishBehavior,
}

impl RecordingNotifier {
    pub fn new(behavior: PublishBehavior) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            behavior,
        }
    }

    /// (subject, message) pairs handed to the topic, in call order.
    /// `Fail` publishes are recorded too: the engine did reach out.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn publish(&self, subject: &str, message: &str) -> Result<bool, InfrastructureError> {
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((subject.to_string(), message.to_string()));
        match self.behavior {
            PublishBehavior::Ack => Ok(true),
            PublishBehavior::NoAck => Ok(false),
            PublishBehavior::Fail => Err(unavailable("topic publish")),
        }
    }
}
