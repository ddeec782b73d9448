use std::{sync::Arc, time::Duration};

use futures::{FutureExt, future::BoxFuture};
use reqwest::Client;
use tracing::debug;

use super::{PublishError, PublishResult, RelayPublisher};
use crate::{config::PublisherConfig, state::relay::RelayMessage};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Publishes relay messages through a broker's HTTP data-plane endpoint
/// (`POST <base>/topics/<topic>?qos=<qos>` with the raw payload as body).
#[derive(Clone)]
pub struct HttpPublisher {
    client: Client,
    base_url: Arc<str>,
    token: Option<Arc<str>>,
}

impl HttpPublisher {
    /// Build the HTTP client for the configured endpoint.
    pub fn new(config: PublisherConfig) -> PublishResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| {
                PublishError::transport("*", "failed to build HTTP client", source)
            })?;

        Ok(Self {
            client,
            base_url: Arc::<str>::from(config.base_url.trim_end_matches('/')),
            token: config.token.map(Arc::<str>::from),
        })
    }

    fn topic_url(&self, topic: &str) -> String {
        format!("{}/topics/{}", self.base_url, topic)
    }
}

impl RelayPublisher for HttpPublisher {
    fn publish(&self, message: RelayMessage) -> BoxFuture<'static, PublishResult<()>> {
        let mut builder = self
            .client
            .post(self.topic_url(&message.topic))
            .query(&[("qos", message.qos)])
            .body(message.payload.clone());
        if let Some(ref token) = self.token {
            builder = builder.bearer_auth(token.as_ref());
        }

        async move {
            let response = builder.send().await.map_err(|source| {
                PublishError::transport(message.topic.clone(), "request failed", source)
            })?;

            let status = response.status();
            if !status.is_success() {
                return Err(PublishError::Rejected {
                    topic: message.topic,
                    status: status.as_u16(),
                });
            }

            debug!(topic = %message.topic, payload = %message.payload, "relay message accepted");
            Ok(())
        }
        .boxed()
    }

    fn kind(&self) -> &'static str {
        "http"
    }
}
