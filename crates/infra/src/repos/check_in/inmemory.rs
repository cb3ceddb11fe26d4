use super::ICheckInRepo;
use crate::repos::shared::inmemory_repo::*;
use checkin_scheduler_domain::{CheckIn, CheckInStatus, ID};
use chrono::{DateTime, FixedOffset, Utc};

pub struct InMemoryCheckInRepo {
    check_ins: std::sync::Mutex<Vec<CheckIn>>,
}

impl InMemoryCheckInRepo {
    pub fn new() -> Self {
        Self {
            check_ins: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ICheckInRepo for InMemoryCheckInRepo {
    async fn insert(&self, check_in: &CheckIn) -> anyhow::Result<()> {
        insert(check_in, &self.check_ins);
        Ok(())
    }

    async fn save(&self, check_in: &CheckIn) -> anyhow::Result<()> {
        save(check_in, &self.check_ins);
        Ok(())
    }

    async fn find(&self, check_in_id: &ID) -> Option<CheckIn> {
        find(check_in_id, &self.check_ins)
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<CheckIn> {
        find_by(&self.check_ins, |check_in| check_in.user_id == *user_id)
    }

    async fn find_by_user_in_range(
        &self,
        user_id: &ID,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> Vec<CheckIn> {
        find_by(&self.check_ins, |check_in| {
            check_in.user_id == *user_id
                && check_in.check_in_time >= start
                && check_in.check_in_time < end
        })
    }

    async fn delete(&self, check_in_id: &ID) -> Option<CheckIn> {
        delete(check_in_id, &self.check_ins)
    }

    async fn mark_missed_before(
        &self,
        user_id: Option<&ID>,
        cutoff: DateTime<Utc>,
    ) -> Vec<CheckIn> {
        find_and_update_by(
            &self.check_ins,
            |check_in| {
                user_id.map_or(true, |id| check_in.user_id == *id)
                    && check_in.status == CheckInStatus::Upcoming
                    && check_in.check_in_time.with_timezone(&Utc) < cutoff
            },
            |check_in| {
                check_in.status = CheckInStatus::Missed;
            },
        )
    }
}
