use crate::check_in::reclassify_missed::ReclassifyMissedUseCase;
use crate::shared::usecase::execute;
use actix_web::rt::time::{interval, sleep_until, Instant};
use checkin_scheduler_infra::CheckInContext;
use chrono::{DateTime, Timelike, Utc};
use std::time::Duration;
use tracing::debug;

/// Seconds until the next whole minute, in the range `1..=60`
pub fn secs_until_next_minute(now: DateTime<Utc>) -> u64 {
    60 - u64::from(now.second()) % 60
}

/// Spawns the periodic sweep that reclassifies overdue check-ins as missed.
/// The first run is aligned to a minute boundary, later runs follow the
/// configured interval.
pub fn start_missed_check_in_sweep(ctx: CheckInContext) {
    actix_web::rt::spawn(async move {
        let start_delay = secs_until_next_minute(ctx.sys.now());
        sleep_until(Instant::now() + Duration::from_secs(start_delay)).await;

        let mut sweep_interval = interval(Duration::from_secs(ctx.config.missed_sweep_interval_secs));
        loop {
            sweep_interval.tick().await;
            debug!("Running missed check-in sweep");
            let usecase = ReclassifyMissedUseCase { user_id: None };
            // The usecase error type is uninhabited, this cannot fail
            let _ = execute(usecase, &ctx).await;
        }
    });
}
