use crate::error::ApiError;
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpResponse};
use checkin_scheduler_api_structs::schedule_check_in::*;
use checkin_scheduler_domain::{
    day_bounds, find_conflict, CheckIn, Frequency, ReminderOffset, ID, MAX_CHECK_INS_PER_DAY,
};
use checkin_scheduler_infra::CheckInContext;
use chrono::{DateTime, FixedOffset};

pub async fn schedule_check_in_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<CheckInContext>,
) -> Result<HttpResponse, ApiError> {
    let body = body.0;
    let usecase = ScheduleCheckInUseCase {
        user_id: body.user_id,
        check_in_time: body.check_in_time,
        frequency: body.frequency,
        notify: body.notify.unwrap_or(false),
        reminder_times: body.reminder_times.unwrap_or_default(),
    };

    execute(usecase, &ctx)
        .await
        .map(|check_in| HttpResponse::Created().json(APIResponse::new(check_in)))
        .map_err(ApiError::from)
}

#[derive(Debug)]
pub struct ScheduleCheckInUseCase {
    pub user_id: ID,
    pub check_in_time: DateTime<FixedOffset>,
    pub frequency: String,
    pub notify: bool,
    /// Raw offsets in seconds, validated against the whitelist on execute
    pub reminder_times: Vec<i64>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidFrequency(String),
    InvalidReminderTime(i64),
    CapacityExceeded,
    TimeConflict(DateTime<FixedOffset>),
    StorageError,
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidFrequency(frequency) => Self::BadClientData(format!(
                "Invalid frequency: {}, must be one of daily, weekly or monthly",
                frequency
            )),
            UseCaseError::InvalidReminderTime(secs) => Self::BadClientData(format!(
                "Invalid reminder time of {} seconds, must be 1 hour, 1 day or 1 week",
                secs
            )),
            UseCaseError::CapacityExceeded => Self::Forbidden(format!(
                "Limit of {} check-ins per day exceeded",
                MAX_CHECK_INS_PER_DAY
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
impl UseCase for ScheduleCheckInUseCase {
    type Response = CheckIn;

    type Error = UseCaseError;

    async fn execute(&mut self, ctx: &CheckInContext) -> Result<Self::Response, Self::Error> {
        let frequency: Frequency = self
            .frequency
            .parse()
            .map_err(|_| UseCaseError::InvalidFrequency(self.frequency.clone()))?;

        let mut reminder_times = Vec::with_capacity(self.reminder_times.len());
        for secs in &self.reminder_times {
            let offset = ReminderOffset::from_secs(*secs)
                .map_err(|_| UseCaseError::InvalidReminderTime(*secs))?;
            reminder_times.push(offset);
        }

        let (start_of_day, end_of_day) = day_bounds(&self.check_in_time);
        let existing = ctx
            .repos
            .check_ins
            .find_by_user_in_range(&self.user_id, start_of_day, end_of_day)
            .await;

        if existing.len() >= MAX_CHECK_INS_PER_DAY {
            return Err(UseCaseError::CapacityExceeded);
        }
        if let Some(conflict) = find_conflict(&existing, &self.check_in_time, None) {
            return Err(UseCaseError::TimeConflict(conflict.check_in_time));
        }

        let check_in = CheckIn::new(
            self.user_id.clone(),
            self.check_in_time,
            frequency,
            self.notify,
            reminder_times,
            ctx.sys.now(),
        );

        ctx.repos
            .check_ins
            .insert(&check_in)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(check_in)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(ScheduleRemindersOnCheckInCreated)]
    }
}

pub struct ScheduleRemindersOnCheckInCreated;

#[async_trait::async_trait(?Send)]
impl Subscriber<ScheduleCheckInUseCase> for ScheduleRemindersOnCheckInCreated {
    async fn notify(&self, check_in: &CheckIn, ctx: &CheckInContext) {
        ctx.scheduler.schedule_notifications(check_in);
    }
}
