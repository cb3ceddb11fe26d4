use chrono::Duration;
use rand::{distributions::Alphanumeric, thread_rng, Rng};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Where reminder notifications are POSTed at fire-time. When unset,
    /// dispatch attempts are logged as failures but everything else works.
    pub webhook_url: Option<String>,
    /// Shared key sent along with every reminder webhook so that the
    /// receiver can verify the sender
    pub webhook_key: String,
    /// How long after its due time an `upcoming` check-in is allowed to
    /// linger before the sweep reclassifies it as `missed`
    pub missed_grace_period: Duration,
    /// Seconds between runs of the missed check-in sweep
    pub missed_sweep_interval_secs: u64,
}

impl Config {
    pub fn new() -> Self {
        let webhook_url = std::env::var("CHECKIN_WEBHOOK_URL").ok();
        let webhook_key = match std::env::var("CHECKIN_WEBHOOK_KEY") {
            Ok(key) => key,
            Err(_) => {
                info!("Did not find CHECKIN_WEBHOOK_KEY environment variable. Going to create one.");
                let key = create_random_secret(16);
                info!(
                    "Webhook key for reminder notifications was generated and set to: {}",
                    key
                );
                key
            }
        };
        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or(default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };
        Self {
            port,
            webhook_url,
            webhook_key,
            missed_grace_period: Duration::minutes(10),
            missed_sweep_interval_secs: 60,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn create_random_secret(secret_len: usize) -> String {
    let mut rng = thread_rng();
    std::iter::repeat(())
        .map(|()| rng.sample(Alphanumeric))
        .map(char::from)
        .take(secret_len)
        .collect()
}
