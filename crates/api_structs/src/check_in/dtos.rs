use checkin_scheduler_domain::{CheckIn, CheckInStatus, Frequency, ID};
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CheckInDTO {
    pub id: ID,
    pub user_id: ID,
    pub check_in_time: DateTime<FixedOffset>,
    pub frequency: Frequency,
    pub status: CheckInStatus,
    pub last_conversation: String,
    pub notify: bool,
    /// Reminder offsets in whole seconds before the check-in time
    pub reminder_times: Vec<i64>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl CheckInDTO {
    pub fn new(check_in: CheckIn) -> Self {
        Self {
            id: check_in.id.clone(),
            user_id: check_in.user_id.clone(),
            check_in_time: check_in.check_in_time,
            frequency: check_in.frequency,
            status: check_in.status,
            last_conversation: check_in.last_conversation,
            notify: check_in.notify,
            reminder_times: check_in
                .reminder_times
                .iter()
                .map(|offset| offset.as_secs())
                .collect(),
            created: check_in.created,
            updated: check_in.updated,
        }
    }
}
