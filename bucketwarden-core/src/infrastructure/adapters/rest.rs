// bucketwarden-core/src/infrastructure/adapters/rest.rs

// Thin HTTP clients against an S3-compatible control endpoint. These own
// nothing but the wire shape; timeouts and retries stay with reqwest.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::infrastructure::error::InfrastructureError;
use crate::ports::remediation::{AclMutator, Notifier, PolicyContext, PolicyLookup};

/// Storage control-plane client: policy lookups and ACL mutations.
pub struct RestBucketClient {
    http: reqwest::Client,
    base: String,
}

impl RestBucketClient {
    pub fn new(base: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: base.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl PolicyLookup for RestBucketClient {
    async fn get_policy(&self, bucket: &str) -> Result<PolicyContext, InfrastructureError> {
        let url = format!("{}/buckets/{}/policy", self.base, bucket);
        debug!(%url, "Fetching bucket policy");

        let response = self.http.get(&url).send().await?;
        match response.status() {
            // No policy configured: expected case, never an error.
            StatusCode::NOT_FOUND => Ok(PolicyContext::NotFound),
            status if status.is_success() => Ok(PolicyContext::Found(response.text().await?)),
            status => Err(InfrastructureError::UnexpectedStatus {
                url,
                status: status.as_u16(),
            }),
        }
    }
}

#[derive(Serialize)]
struct AclBody<'a> {
    acl: &'a str,
}

#[async_trait]
impl AclMutator for RestBucketClient {
    async fn set_private(&self, bucket: &str) -> Result<(), InfrastructureError> {
        let url = format!("{}/buckets/{}/acl", self.base, bucket);
        debug!(%url, "Reverting bucket ACL to private");

        let response = self
            .http
            .put(&url)
            .json(&AclBody { acl: "private" })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(InfrastructureError::UnexpectedStatus {
                url,
                status: status.as_u16(),
            })
        }
    }
}

/// Review-topic client. The topic identifier is fixed at construction,
/// read once from process configuration.
pub struct RestTopicNotifier {
    http: reqwest::Client,
    base: String,
    topic: String,
}

impl RestTopicNotifier {
    pub fn new(base: &str, topic: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: base.trim_end_matches('/').to_string(),
            topic: topic.to_string(),
        }
    }
}

#[derive(Serialize)]
struct PublishBody<'a> {
    subject: &'a str,
    message: &'a str,
}

#[derive(Deserialize)]
struct PublishReceipt {
    message_id: Option<String>,
}

#[async_trait]
impl Notifier for RestTopicNotifier {
    async fn publish(&self, subject: &str, message: &str) -> Result<bool, InfrastructureError> {
        let url = format!("{}/topics/{}/publish", self.base, self.topic);

        let response = self
            .http
            .post(&url)
            .json(&PublishBody { subject, message })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(InfrastructureError::UnexpectedStatus {
                url,
                status: status.as_u16(),
            });
        }

        // Delivery acknowledgment = the topic handed back a message id.
        let receipt: PublishReceipt = response.json().await?;
        Ok(receipt.message_id.is_some())
    }
}
