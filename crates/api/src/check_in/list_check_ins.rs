use crate::error::ApiError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use checkin_scheduler_api_structs::list_check_ins::*;
use checkin_scheduler_domain::{CheckIn, ID};
use checkin_scheduler_infra::CheckInContext;

pub async fn list_check_ins_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<CheckInContext>,
) -> Result<HttpResponse, ApiError> {
    let usecase = ListCheckInsUseCase {
        user_id: path_params.user_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|check_ins| HttpResponse::Ok().json(APIResponse::new(check_ins)))
        .map_err(ApiError::from)
}

#[derive(Debug)]
pub struct ListCheckInsUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ListCheckInsUseCase {
    type Response = Vec<CheckIn>;

    type Error = UseCaseError;

    async fn execute(&mut self, ctx: &CheckInContext) -> Result<Self::Response, Self::Error> {
        Ok(ctx.repos.check_ins.find_by_user(&self.user_id).await)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::check_in::schedule_check_in::ScheduleCheckInUseCase;
    use checkin_scheduler_infra::Config;
    use chrono::DateTime;

    async fn create_check_in(ctx: &CheckInContext, user_id: &ID, s: &str) {
        let mut usecase = ScheduleCheckInUseCase {
            user_id: user_id.clone(),
            check_in_time: DateTime::parse_from_rfc3339(s).unwrap(),
            frequency: "daily".into(),
            notify: false,
            reminder_times: Vec::new(),
        };
        usecase.execute(ctx).await.expect("To create check-in");
    }

    #[actix_web::test]
    async fn lists_only_the_users_check_ins() {
        let ctx = CheckInContext::create(Config::default());
        let user_id = ID::new();
        let other_user_id = ID::new();

        create_check_in(&ctx, &user_id, "2030-06-10T09:00:00Z").await;
        create_check_in(&ctx, &user_id, "2030-06-11T09:00:00Z").await;
        create_check_in(&ctx, &other_user_id, "2030-06-10T09:00:00Z").await;

        let mut usecase = ListCheckInsUseCase {
            user_id: user_id.clone(),
        };
        let check_ins = usecase.execute(&ctx).await.unwrap();
        assert_eq!(check_ins.len(), 2);
        assert!(check_ins.iter().all(|c| c.user_id == user_id));
    }

    #[actix_web::test]
    async fn unknown_user_gets_an_empty_list() {
        let ctx = CheckInContext::create(Config::default());

        let mut usecase = ListCheckInsUseCase { user_id: ID::new() };
        let check_ins = usecase.execute(&ctx).await.unwrap();
        assert!(check_ins.is_empty());
    }
}
