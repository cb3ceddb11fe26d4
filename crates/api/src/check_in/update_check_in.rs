use crate::error::ApiError;
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpResponse};
use checkin_scheduler_api_structs::update_check_in::*;
use checkin_scheduler_domain::{
    day_bounds, find_conflict, CheckIn, CheckInStatus, Frequency, ReminderOffset, ID,
};
use checkin_scheduler_infra::CheckInContext;
use chrono::{DateTime, FixedOffset};

pub async fn update_check_in_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<CheckInContext>,
) -> Result<HttpResponse, ApiError> {
    let body = body.0;
    let usecase = UpdateCheckInUseCase {
        check_in_id: path_params.check_in_id.clone(),
        check_in_time: body.check_in_time,
        frequency: body.frequency,
        notify: body.notify,
        reminder_times: body.reminder_times,
        last_conversation: body.last_conversation,
        status: body.status,
    };

    execute(usecase, &ctx)
        .await
        .map(|check_in| HttpResponse::Ok().json(APIResponse::new(check_in)))
        .map_err(ApiError::from)
}

/// Patch-style update: only fields that are present are touched.
#[derive(Debug)]
pub struct UpdateCheckInUseCase {
    pub check_in_id: ID,
    pub check_in_time: Option<DateTime<FixedOffset>>,
    pub frequency: Option<String>,
    pub notify: Option<bool>,
    pub reminder_times: Option<Vec<i64>>,
    pub last_conversation: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidFrequency(String),
    InvalidReminderTime(i64),
    InvalidStatus(String),
    InvalidStatusTransition(CheckInStatus, CheckInStatus),
    TimeConflict(DateTime<FixedOffset>),
    StorageError,
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(check_in_id) => Self::NotFound(format!(
                "The check-in with id: {}, was not found.",
                check_in_id
            )),
            UseCaseError::InvalidFrequency(frequency) => Self::BadClientData(format!(
                "Invalid frequency: {}, must be one of daily, weekly or monthly",
                frequency
            )),
            UseCaseError::InvalidReminderTime(secs) => Self::BadClientData(format!(
                "Invalid reminder time of {} seconds, must be 1 hour, 1 day or 1 week",
                secs
            )),
            UseCaseError::InvalidStatus(status) => Self::BadClientData(format!(
                "Invalid status: {}, must be one of upcoming, completed or missed",
                status
            )),
            UseCaseError::InvalidStatusTransition(from, to) => Self::BadClientData(format!(
                "A {} check-in cannot become {}",
                from, to
            )),
            UseCaseError::TimeConflict(existing) => Self::Conflict(format!(
                "Check-in time conflicts with an existing check-in at: {}",
                existing.to_rfc3339()
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateCheckInUseCase {
    type Response = CheckIn;

    type Error = UseCaseError;

    async fn execute(&mut self, ctx: &CheckInContext) -> Result<Self::Response, Self::Error> {
        let mut check_in = ctx
            .repos
            .check_ins
            .find(&self.check_in_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.check_in_id.clone()))?;

        if let Some(frequency) = &self.frequency {
            check_in.frequency = frequency
                .parse::<Frequency>()
                .map_err(|_| UseCaseError::InvalidFrequency(frequency.clone()))?;
        }

        if let Some(reminder_times) = &self.reminder_times {
            let mut offsets = Vec::with_capacity(reminder_times.len());
            for secs in reminder_times {
                let offset = ReminderOffset::from_secs(*secs)
                    .map_err(|_| UseCaseError::InvalidReminderTime(*secs))?;
                offsets.push(offset);
            }
            check_in.set_reminder_times(offsets);
        }

        if let Some(last_conversation) = &self.last_conversation {
            check_in.last_conversation = last_conversation.clone();
        }

        if let Some(notify) = self.notify {
            check_in.notify = notify;
        }

        if let Some(status) = &self.status {
            let next = status
                .parse::<CheckInStatus>()
                .map_err(|_| UseCaseError::InvalidStatus(status.clone()))?;
            if !check_in.status.can_transition_to(next) {
                return Err(UseCaseError::InvalidStatusTransition(check_in.status, next));
            }
            check_in.status = next;
        }

        if let Some(new_time) = self.check_in_time {
            if check_in.check_in_time != new_time {
                let (start_of_day, end_of_day) = day_bounds(&new_time);
                let existing = ctx
                    .repos
                    .check_ins
                    .find_by_user_in_range(&check_in.user_id, start_of_day, end_of_day)
                    .await;
                // The record being updated must not conflict with itself
                if let Some(conflict) =
                    find_conflict(&existing, &new_time, Some(&check_in.id))
                {
                    return Err(UseCaseError::TimeConflict(conflict.check_in_time));
                }
                check_in.check_in_time = new_time;
            }
        }

        check_in.updated = ctx.sys.now();

        ctx.repos
            .check_ins
            .save(&check_in)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(check_in)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(SyncRemindersOnCheckInUpdated)]
    }
}

/// The scheduler does not diff old and new reminders, any update clears and
/// recreates the jobs from the refreshed record.
pub struct SyncRemindersOnCheckInUpdated;

#[async_trait::async_trait(?Send)]
impl Subscriber<UpdateCheckInUseCase> for SyncRemindersOnCheckInUpdated {
    async fn notify(&self, check_in: &CheckIn, ctx: &CheckInContext) {
        ctx.scheduler.reschedule_notifications(check_in);
    }
}
