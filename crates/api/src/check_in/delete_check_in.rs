use crate::error::ApiError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use checkin_scheduler_api_structs::delete_check_in::*;
use checkin_scheduler_domain::{CheckIn, ID};
use checkin_scheduler_infra::CheckInContext;

pub async fn delete_check_in_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<CheckInContext>,
) -> Result<HttpResponse, ApiError> {
    let usecase = DeleteCheckInUseCase {
        check_in_id: path_params.check_in_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|check_in| HttpResponse::Ok().json(APIResponse::new(check_in)))
        .map_err(ApiError::from)
}

#[derive(Debug)]
pub struct DeleteCheckInUseCase {
    pub check_in_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(check_in_id) => Self::NotFound(format!(
                "The check-in with id: {}, was not found.",
                check_in_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteCheckInUseCase {
    type Response = CheckIn;

    type Error = UseCaseError;

    async fn execute(&mut self, ctx: &CheckInContext) -> Result<Self::Response, Self::Error> {
        let check_in = ctx
            .repos
            .check_ins
            .delete(&self.check_in_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.check_in_id.clone()))?;

        ctx.scheduler.clear_notifications(&check_in.id);

        Ok(check_in)
    }
}
