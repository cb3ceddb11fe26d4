mod config;
mod repos;
mod scheduler;
mod services;
mod system;

pub use config::Config;
pub use repos::{ICheckInRepo, Repos};
pub use scheduler::ReminderScheduler;
pub use services::{INotificationDispatcher, WebhookDispatcher};
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;

#[derive(Clone)]
pub struct CheckInContext {
    pub repos: Repos,
    pub config: Config,
    pub scheduler: Arc<ReminderScheduler>,
    pub sys: Arc<dyn ISys>,
}

impl CheckInContext {
    pub fn create(config: Config) -> Self {
        let sys: Arc<dyn ISys> = Arc::new(RealSys {});
        let dispatcher: Arc<dyn INotificationDispatcher> = Arc::new(WebhookDispatcher::new(
            config.webhook_url.clone(),
            config.webhook_key.clone(),
        ));
        Self {
            repos: Repos::create_inmemory(),
            scheduler: ReminderScheduler::new(dispatcher, sys.clone()),
            config,
            sys,
        }
    }
}

/// Will setup the infrastructure context given the environment
pub fn setup_context() -> CheckInContext {
    CheckInContext::create(Config::new())
}
