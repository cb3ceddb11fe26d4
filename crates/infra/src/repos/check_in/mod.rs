mod inmemory;

use checkin_scheduler_domain::{CheckIn, ID};
use chrono::{DateTime, FixedOffset, Utc};
pub use inmemory::InMemoryCheckInRepo;

#[async_trait::async_trait]
pub trait ICheckInRepo: Send + Sync {
    async fn insert(&self, check_in: &CheckIn) -> anyhow::Result<()>;
    async fn save(&self, check_in: &CheckIn) -> anyhow::Result<()>;
    async fn find(&self, check_in_id: &ID) -> Option<CheckIn>;
    async fn find_by_user(&self, user_id: &ID) -> Vec<CheckIn>;
    /// All check-ins for `user_id` with `start <= check_in_time < end`
    async fn find_by_user_in_range(
        &self,
        user_id: &ID,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> Vec<CheckIn>;
    async fn delete(&self, check_in_id: &ID) -> Option<CheckIn>;
    /// Flips every `upcoming` check-in due strictly before `cutoff` to
    /// `missed` and returns the newly missed records. `user_id: None` spans
    /// all users. Read and write happen under one lock hold, so a second
    /// sweep with no intervening writes returns nothing.
    async fn mark_missed_before(&self, user_id: Option<&ID>, cutoff: DateTime<Utc>)
        -> Vec<CheckIn>;
}
