use crate::dtos::CheckInDTO;
use checkin_scheduler_domain::{CheckIn, ID};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInResponse {
    pub check_in: CheckInDTO,
}

impl CheckInResponse {
    pub fn new(check_in: CheckIn) -> Self {
        Self {
            check_in: CheckInDTO::new(check_in),
        }
    }
}

pub mod schedule_check_in {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub user_id: ID,
        pub check_in_time: DateTime<FixedOffset>,
        pub frequency: String,
        pub notify: Option<bool>,
        /// Offsets in whole seconds before `check_in_time`
        pub reminder_times: Option<Vec<i64>>,
    }

    pub type APIResponse = CheckInResponse;
}

pub mod update_check_in {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub check_in_id: ID,
    }

    #[derive(Serialize, Deserialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub check_in_time: Option<DateTime<FixedOffset>>,
        pub frequency: Option<String>,
        pub notify: Option<bool>,
        pub reminder_times: Option<Vec<i64>>,
        pub last_conversation: Option<String>,
        pub status: Option<String>,
    }

    pub type APIResponse = CheckInResponse;
}

pub mod get_check_in {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub check_in_id: ID,
    }

    pub type APIResponse = CheckInResponse;
}

pub mod delete_check_in {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub check_in_id: ID,
    }

    pub type APIResponse = CheckInResponse;
}

pub mod list_check_ins {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub check_ins: Vec<CheckInDTO>,
    }

    impl APIResponse {
        pub fn new(check_ins: Vec<CheckIn>) -> Self {
            Self {
                check_ins: check_ins.into_iter().map(CheckInDTO::new).collect(),
            }
        }
    }
}

pub mod reclassify_missed {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub missed: Vec<CheckInDTO>,
    }

    impl APIResponse {
        pub fn new(missed: Vec<CheckIn>) -> Self {
            Self {
                missed: missed.into_iter().map(CheckInDTO::new).collect(),
            }
        }
    }
}
