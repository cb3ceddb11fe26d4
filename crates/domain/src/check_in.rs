use crate::shared::entity::{Entity, ID};
use chrono::{DateTime, Duration, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// How often the user intends to perform a check-in. This is informational
/// metadata for the client, check-ins are not auto-repeated from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

#[derive(Error, Debug, PartialEq)]
#[error("Frequency: {0} is not one of daily, weekly or monthly")]
pub struct InvalidFrequencyError(pub String);

impl FromStr for Frequency {
    type Err = InvalidFrequencyError;

    // Case sensitive, only the exact lowercase labels are recognized
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            _ => Err(InvalidFrequencyError(s.to_string())),
        }
    }
}

impl Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckInStatus {
    Upcoming,
    Completed,
    Missed,
}

#[derive(Error, Debug, PartialEq)]
#[error("Status: {0} is not one of upcoming, completed or missed")]
pub struct InvalidStatusError(pub String);

impl FromStr for CheckInStatus {
    type Err = InvalidStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upcoming" => Ok(Self::Upcoming),
            "completed" => Ok(Self::Completed),
            "missed" => Ok(Self::Missed),
            _ => Err(InvalidStatusError(s.to_string())),
        }
    }
}

impl Display for CheckInStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Upcoming => "upcoming",
            Self::Completed => "completed",
            Self::Missed => "missed",
        };
        write!(f, "{}", label)
    }
}

impl CheckInStatus {
    /// `Completed` and `Missed` are terminal. A no-op transition to the
    /// current status is always allowed.
    pub fn can_transition_to(self, next: CheckInStatus) -> bool {
        self == next || self == Self::Upcoming
    }
}

/// A fixed duration before a check-in's due time at which a reminder
/// notification should fire. Only these three offsets are supported, any
/// other duration is rejected at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderOffset {
    OneHour,
    OneDay,
    OneWeek,
}

#[derive(Error, Debug, PartialEq)]
#[error("Reminder offset of {0} seconds is not supported, must be 1 hour, 1 day or 1 week")]
pub struct InvalidReminderOffsetError(pub i64);

impl ReminderOffset {
    pub fn from_secs(secs: i64) -> Result<Self, InvalidReminderOffsetError> {
        match secs {
            3600 => Ok(Self::OneHour),
            86_400 => Ok(Self::OneDay),
            604_800 => Ok(Self::OneWeek),
            _ => Err(InvalidReminderOffsetError(secs)),
        }
    }

    pub fn as_secs(self) -> i64 {
        match self {
            Self::OneHour => 3600,
            Self::OneDay => 86_400,
            Self::OneWeek => 604_800,
        }
    }

    pub fn to_duration(self) -> Duration {
        Duration::seconds(self.as_secs())
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::OneHour => "1 hour",
            Self::OneDay => "1 day",
            Self::OneWeek => "1 week",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckIn {
    pub id: ID,
    pub user_id: ID,
    /// Timezone aware due time. Calendar day boundaries for the capacity
    /// rule are computed in this value's own offset.
    pub check_in_time: DateTime<FixedOffset>,
    pub frequency: Frequency,
    pub status: CheckInStatus,
    pub last_conversation: String,
    pub notify: bool,
    /// Set semantics, deduplicated on every write.
    pub reminder_times: Vec<ReminderOffset>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl Entity for CheckIn {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl CheckIn {
    pub fn new(
        user_id: ID,
        check_in_time: DateTime<FixedOffset>,
        frequency: Frequency,
        notify: bool,
        reminder_times: Vec<ReminderOffset>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Default::default(),
            user_id,
            check_in_time,
            frequency,
            status: CheckInStatus::Upcoming,
            last_conversation: String::new(),
            notify,
            reminder_times: dedup_offsets(reminder_times),
            created: now,
            updated: now,
        }
    }

    pub fn set_reminder_times(&mut self, reminder_times: Vec<ReminderOffset>) {
        self.reminder_times = dedup_offsets(reminder_times);
    }

    /// The absolute instants at which each reminder for this check-in is due
    /// to fire, independent of whether those instants are still in the future.
    pub fn reminder_fire_times(&self) -> Vec<(ReminderOffset, DateTime<Utc>)> {
        self.reminder_times
            .iter()
            .map(|offset| {
                (
                    *offset,
                    self.check_in_time.with_timezone(&Utc) - offset.to_duration(),
                )
            })
            .collect()
    }
}

fn dedup_offsets(mut offsets: Vec<ReminderOffset>) -> Vec<ReminderOffset> {
    offsets.sort();
    offsets.dedup();
    offsets
}
