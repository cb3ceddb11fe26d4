use actix_web::web;

pub mod delete_check_in;
pub mod get_check_in;
pub mod list_check_ins;
pub mod reclassify_missed;
pub mod schedule_check_in;
pub mod update_check_in;

use delete_check_in::delete_check_in_controller;
use get_check_in::get_check_in_controller;
use list_check_ins::list_check_ins_controller;
use reclassify_missed::reclassify_missed_controller;
use schedule_check_in::schedule_check_in_controller;
use update_check_in::update_check_in_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/check-ins", web::post().to(schedule_check_in_controller));
    cfg.route(
        "/check-ins/{check_in_id}",
        web::get().to(get_check_in_controller),
    );
    cfg.route(
        "/check-ins/{check_in_id}",
        web::put().to(update_check_in_controller),
    );
    cfg.route(
        "/check-ins/{check_in_id}",
        web::delete().to(delete_check_in_controller),
    );
    cfg.route(
        "/user/{user_id}/check-ins",
        web::get().to(list_check_ins_controller),
    );
    cfg.route(
        "/user/{user_id}/check-ins/reclassify-missed",
        web::post().to(reclassify_missed_controller),
    );
}
