use checkin_scheduler_domain::ID;
use serde_json::json;
use tracing::{debug, warn};

/// The transport that delivers a reminder to the user. Fire-and-forget:
/// the scheduler logs a failed dispatch and never retries it.
#[async_trait::async_trait]
pub trait INotificationDispatcher: Send + Sync {
    async fn dispatch(&self, user_id: &ID, message: &str) -> bool;
}

/// Delivers reminders by POSTing them to a configured webhook, authenticated
/// with a shared key header.
pub struct WebhookDispatcher {
    client: reqwest::Client,
    url: Option<String>,
    key: String,
}

impl WebhookDispatcher {
    pub fn new(url: Option<String>, key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
            key,
        }
    }
}

#[async_trait::async_trait]
impl INotificationDispatcher for WebhookDispatcher {
    async fn dispatch(&self, user_id: &ID, message: &str) -> bool {
        let url = match &self.url {
            Some(url) => url,
            None => {
                debug!(
                    "No reminder webhook configured, dropping notification for user: {}",
                    user_id
                );
                return false;
            }
        };

        let res = self
            .client
            .post(url)
            .header("checkin-webhook-key", &self.key)
            .json(&json!({
                "userId": user_id.as_string(),
                "message": message,
            }))
            .send()
            .await;

        match res {
            Ok(res) if res.status().is_success() => true,
            Ok(res) => {
                warn!(
                    "Reminder webhook for user: {} responded with status: {}",
                    user_id,
                    res.status()
                );
                false
            }
            Err(e) => {
                warn!("Reminder webhook for user: {} failed: {:?}", user_id, e);
                false
            }
        }
    }
}
