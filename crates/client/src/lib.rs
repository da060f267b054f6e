//! Submission path to the persistence collaborator.
//!
//! This crate provides:
//! - `SchedulePersistence` trait for pluggable persistence backends
//! - `HttpPersistence`: POSTs the wire payload to the scheduler endpoint
//! - Response normalization of the `{success, message}` contract into the
//!   transport/application/malformed error taxonomy
//!
//! Nothing here retries: every failure returns control to the editing
//! draft, which stays mutable and resubmittable.

pub mod error;

pub use error::ClientError;

use async_trait::async_trait;
use serde_json::Value;

use freight_core::config::SchedulerApiConfig;
use freight_schedule::WirePayload;

/// Acknowledgement of a persisted schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitAck {
    /// Optional human-readable message from the scheduler.
    pub message: Option<String>,
}

/// Trait for schedule persistence backends.
#[async_trait]
pub trait SchedulePersistence: Send + Sync {
    /// Persist a schedule definition. Create vs. update is decided by the
    /// presence of `task_id` in the payload.
    async fn submit(&self, payload: &WirePayload) -> Result<SubmitAck, ClientError>;
}

/// Persists schedules by POSTing to the scheduler's HTTP endpoint.
#[derive(Debug)]
pub struct HttpPersistence {
    endpoint: String,
    /// Shared HTTP client (connection pooling).
    client: reqwest::Client,
}

impl HttpPersistence {
    pub fn new(config: &SchedulerApiConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            endpoint: config.endpoint.clone(),
            client,
        })
    }
}

#[async_trait]
impl SchedulePersistence for HttpPersistence {
    async fn submit(&self, payload: &WirePayload) -> Result<SubmitAck, ClientError> {
        let response = self
            .client
            .post(&self.endpoint)
            .form(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(
                endpoint = %self.endpoint,
                %status,
                body = %body,
                "scheduler endpoint returned non-2xx status"
            );
            return Err(ClientError::Transport {
                status: status.as_u16(),
                message: body,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|_| ClientError::MalformedResponse)?;

        let ack = interpret_response(&body)?;
        tracing::debug!(
            endpoint = %self.endpoint,
            task = %payload.task_name,
            "schedule persisted"
        );
        Ok(ack)
    }
}

/// Normalize a `{success, message}` response body.
///
/// A body without a boolean `success` key is malformed and reported
/// generically rather than parsed further.
fn interpret_response(body: &Value) -> Result<SubmitAck, ClientError> {
    let Some(success) = body.get("success").and_then(Value::as_bool) else {
        return Err(ClientError::MalformedResponse);
    };

    let message = body
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string);

    if success {
        Ok(SubmitAck { message })
    } else {
        Err(ClientError::Application(
            message.unwrap_or_else(|| "the schedule could not be saved".to_string()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_with_message() {
        let ack = interpret_response(&json!({"success": true, "message": "saved"})).unwrap();
        assert_eq!(ack.message.as_deref(), Some("saved"));
    }

    #[test]
    fn success_without_message() {
        let ack = interpret_response(&json!({"success": true})).unwrap();
        assert_eq!(ack.message, None);
    }

    #[test]
    fn failure_surfaces_message() {
        let err = interpret_response(&json!({"success": false, "message": "template missing"}))
            .unwrap_err();
        match err {
            ClientError::Application(message) => assert_eq!(message, "template missing"),
            other => panic!("expected Application, got {other:?}"),
        }
    }

    #[test]
    fn failure_without_message_uses_fallback() {
        let err = interpret_response(&json!({"success": false})).unwrap_err();
        match err {
            ClientError::Application(message) => assert!(message.contains("could not be saved")),
            other => panic!("expected Application, got {other:?}"),
        }
    }

    #[test]
    fn missing_success_key_is_malformed() {
        for body in [json!({}), json!({"message": "hi"}), json!({"success": "yes"})] {
            let err = interpret_response(&body).unwrap_err();
            assert!(matches!(err, ClientError::MalformedResponse), "{body:?}");
        }
    }
}
