use crate::error::ApiError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use checkin_scheduler_api_structs::reclassify_missed::*;
use checkin_scheduler_domain::{CheckIn, ID};
use checkin_scheduler_infra::CheckInContext;
use tracing::info;

pub async fn reclassify_missed_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<CheckInContext>,
) -> Result<HttpResponse, ApiError> {
    let usecase = ReclassifyMissedUseCase {
        user_id: Some(path_params.user_id.clone()),
    };

    execute(usecase, &ctx)
        .await
        .map(|missed| HttpResponse::Ok().json(APIResponse::new(missed)))
        .map_err(ApiError::from)
}

/// Flips overdue `upcoming` check-ins to `missed`. `user_id: None` is the
/// periodic sweep over every user, `Some` is the per-user endpoint.
#[derive(Debug)]
pub struct ReclassifyMissedUseCase {
    pub user_id: Option<ID>,
}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ReclassifyMissedUseCase {
    type Response = Vec<CheckIn>;

    type Error = UseCaseError;

    async fn execute(&mut self, ctx: &CheckInContext) -> Result<Self::Response, Self::Error> {
        let cutoff = ctx.sys.now() - ctx.config.missed_grace_period;
        let missed = ctx
            .repos
            .check_ins
            .mark_missed_before(self.user_id.as_ref(), cutoff)
            .await;

        if !missed.is_empty() {
            info!("Reclassified {} check-in(s) as missed", missed.len());
        }
        for check_in in &missed {
            ctx.scheduler.clear_notifications(&check_in.id);
        }

        Ok(missed)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use checkin_scheduler_domain::{CheckInStatus, Frequency};
    use checkin_scheduler_infra::{
        Config, INotificationDispatcher, ISys, ReminderScheduler, Repos, WebhookDispatcher,
    };
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use std::sync::Arc;

    struct FakeSys(DateTime<Utc>);
    impl ISys for FakeSys {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn setup_at(now: DateTime<Utc>) -> CheckInContext {
        let sys: Arc<dyn ISys> = Arc::new(FakeSys(now));
        let dispatcher: Arc<dyn INotificationDispatcher> =
            Arc::new(WebhookDispatcher::new(None, "webhook-key".into()));
        CheckInContext {
            repos: Repos::create_inmemory(),
            config: Config::default(),
            scheduler: ReminderScheduler::new(dispatcher, sys.clone()),
            sys,
        }
    }

    async fn insert_upcoming(ctx: &CheckInContext, due: DateTime<Utc>) -> CheckIn {
        let check_in = CheckIn::new(
            ID::new(),
            due.into(),
            Frequency::Daily,
            false,
            Vec::new(),
            ctx.sys.now(),
        );
        ctx.repos.check_ins.insert(&check_in).await.unwrap();
        check_in
    }

    #[actix_web::test]
    async fn reclassifies_check_ins_past_the_grace_period() {
        let now = Utc.with_ymd_and_hms(2030, 6, 10, 12, 0, 0).unwrap();
        let ctx = setup_at(now);

        let overdue = insert_upcoming(&ctx, now - Duration::minutes(15)).await;
        let inside_grace = insert_upcoming(&ctx, now - Duration::minutes(5)).await;
        let future = insert_upcoming(&ctx, now + Duration::hours(2)).await;

        let mut usecase = ReclassifyMissedUseCase { user_id: None };
        let missed = usecase.execute(&ctx).await.unwrap();
        assert_eq!(missed.len(), 1);
        assert_eq!(missed[0].id, overdue.id);
        assert_eq!(missed[0].status, CheckInStatus::Missed);

        let stored = ctx.repos.check_ins.find(&inside_grace.id).await.unwrap();
        assert_eq!(stored.status, CheckInStatus::Upcoming);
        let stored = ctx.repos.check_ins.find(&future.id).await.unwrap();
        assert_eq!(stored.status, CheckInStatus::Upcoming);
    }

    #[actix_web::test]
    async fn second_sweep_finds_nothing_new() {
        let now = Utc.with_ymd_and_hms(2030, 6, 10, 12, 0, 0).unwrap();
        let ctx = setup_at(now);
        insert_upcoming(&ctx, now - Duration::hours(1)).await;

        let mut usecase = ReclassifyMissedUseCase { user_id: None };
        assert_eq!(usecase.execute(&ctx).await.unwrap().len(), 1);

        let mut usecase = ReclassifyMissedUseCase { user_id: None };
        assert!(usecase.execute(&ctx).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn per_user_sweep_leaves_other_users_untouched() {
        let now = Utc.with_ymd_and_hms(2030, 6, 10, 12, 0, 0).unwrap();
        let ctx = setup_at(now);

        let mine = insert_upcoming(&ctx, now - Duration::hours(1)).await;
        let theirs = insert_upcoming(&ctx, now - Duration::hours(1)).await;

        let mut usecase = ReclassifyMissedUseCase {
            user_id: Some(mine.user_id.clone()),
        };
        let missed = usecase.execute(&ctx).await.unwrap();
        assert_eq!(missed.len(), 1);
        assert_eq!(missed[0].id, mine.id);

        let stored = ctx.repos.check_ins.find(&theirs.id).await.unwrap();
        assert_eq!(stored.status, CheckInStatus::Upcoming);
    }

    #[actix_web::test]
    async fn missed_check_ins_lose_their_reminder_jobs() {
        let now = Utc.with_ymd_and_hms(2030, 6, 10, 12, 0, 0).unwrap();
        let ctx = setup_at(now);

        let mut check_in = CheckIn::new(
            ID::new(),
            (now - Duration::hours(1)).into(),
            Frequency::Daily,
            true,
            vec![checkin_scheduler_domain::ReminderOffset::OneHour],
            now - Duration::days(2),
        );
        // Job registered while the check-in was still in the future
        check_in.check_in_time = (now + Duration::hours(2)).into();
        ctx.scheduler.schedule_notifications(&check_in);
        assert_eq!(ctx.scheduler.live_job_count(&check_in.id), 1);
        check_in.check_in_time = (now - Duration::hours(1)).into();
        ctx.repos.check_ins.insert(&check_in).await.unwrap();

        let mut usecase = ReclassifyMissedUseCase { user_id: None };
        let missed = usecase.execute(&ctx).await.unwrap();
        assert_eq!(missed.len(), 1);
        assert_eq!(ctx.scheduler.live_job_count(&check_in.id), 0);
    }
}
