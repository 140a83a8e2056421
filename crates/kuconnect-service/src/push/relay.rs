//! Push relay client.
//!
//! The relay receives the browser subscription and a plaintext payload,
//! encrypts it per RFC 8291 with the deployment's VAPID keys and forwards
//! it to the push service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::debug;

use kuconnect_core::config::PushConfig;
use kuconnect_core::error::{AppError, ErrorKind};
use kuconnect_core::result::AppResult;
use kuconnect_entity::push::{PushKeys, PushSubscription};

use super::{PushMessage, PushOutcome, PushSender};

/// Posts push requests to a configured relay URL.
#[derive(Debug, Clone)]
pub struct HttpPushRelay {
    client: Client,
    relay_url: String,
    vapid_public_key: String,
    vapid_subject: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RelayRequest<'a> {
    subscription: RelaySubscription<'a>,
    payload: &'a PushMessage,
    vapid: RelayVapid<'a>,
}

#[derive(Debug, Serialize)]
struct RelaySubscription<'a> {
    endpoint: &'a str,
    keys: PushKeys,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RelayVapid<'a> {
    public_key: &'a str,
    subject: &'a str,
}

impl HttpPushRelay {
    /// Build a client from configuration.
    pub fn new(config: &PushConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    "Failed to build push relay HTTP client",
                    e,
                )
            })?;
        Ok(Self {
            client,
            relay_url: config.relay_url.clone(),
            vapid_public_key: config.vapid_public_key.clone(),
            vapid_subject: config.vapid_subject.clone(),
        })
    }

    fn request<'a>(
        &'a self,
        subscription: &'a PushSubscription,
        message: &'a PushMessage,
    ) -> RelayRequest<'a> {
        RelayRequest {
            subscription: RelaySubscription {
                endpoint: &subscription.endpoint,
                keys: PushKeys {
                    p256dh: subscription.p256dh.clone(),
                    auth: subscription.auth.clone(),
                },
            },
            payload: message,
            vapid: RelayVapid {
                public_key: &self.vapid_public_key,
                subject: &self.vapid_subject,
            },
        }
    }
}

#[async_trait]
impl PushSender for HttpPushRelay {
    async fn send(
        &self,
        subscription: &PushSubscription,
        message: &PushMessage,
    ) -> AppResult<PushOutcome> {
        let response = self
            .client
            .post(&self.relay_url)
            .json(&self.request(subscription, message))
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::ExternalService, "Push relay request failed", e)
            })?;

        match response.status() {
            StatusCode::NOT_FOUND | StatusCode::GONE => Ok(PushOutcome::Gone),
            status if status.is_success() => {
                debug!(endpoint = %subscription.endpoint, "Push accepted by relay");
                Ok(PushOutcome::Delivered)
            }
            status => Err(AppError::external(format!(
                "Push relay responded with {status}"
            ))),
        }
    }
}
