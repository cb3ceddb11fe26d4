use crate::services::INotificationDispatcher;
use crate::system::ISys;
use checkin_scheduler_domain::{CheckIn, CheckInStatus, ReminderOffset, ID};
use chrono::Duration;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, error};

/// A live timer for one `(check_in_id, offset)` pair.
struct ReminderJob {
    offset: ReminderOffset,
    handle: tokio::task::JoinHandle<()>,
}

/// Owns the set of live reminder timers. Constructed once per process with an
/// injected clock and dispatcher; the persisted check-in is always the source
/// of truth for recomputing jobs, never this registry.
///
/// Fire-times are computed once, at scheduling time, from absolute
/// timestamps. A job either fires (dispatch attempted exactly once) or is
/// cancelled; a cancellation that lands before the fire claims its registry
/// entry wins, and a fire that has claimed its entry completes regardless of
/// a concurrent cancel.
pub struct ReminderScheduler {
    jobs: Mutex<HashMap<ID, Vec<ReminderJob>>>,
    dispatcher: Arc<dyn INotificationDispatcher>,
    sys: Arc<dyn ISys>,
}

impl ReminderScheduler {
    pub fn new(dispatcher: Arc<dyn INotificationDispatcher>, sys: Arc<dyn ISys>) -> Arc<Self> {
        Arc::new(Self {
            jobs: Mutex::new(HashMap::new()),
            dispatcher,
            sys,
        })
    }

    /// Registers a timer for every reminder offset of `check_in` whose
    /// fire-time is still in the future. Fire-times already in the past are
    /// skipped silently, no backfill. Does nothing unless the check-in wants
    /// notifications and is still upcoming.
    pub fn schedule_notifications(self: &Arc<Self>, check_in: &CheckIn) {
        let mut jobs = self.jobs.lock().unwrap();
        self.schedule_locked(&mut jobs, check_in);
    }

    /// Cancels every live job for `check_in_id`. Idempotent.
    pub fn clear_notifications(&self, check_in_id: &ID) {
        let mut jobs = self.jobs.lock().unwrap();
        Self::clear_locked(&mut jobs, check_in_id);
    }

    /// Clear-then-schedule under a single registry lock, so that two
    /// concurrent reschedules for the same check-in cannot interleave.
    pub fn reschedule_notifications(self: &Arc<Self>, check_in: &CheckIn) {
        let mut jobs = self.jobs.lock().unwrap();
        Self::clear_locked(&mut jobs, &check_in.id);
        self.schedule_locked(&mut jobs, check_in);
    }

    fn schedule_locked(
        self: &Arc<Self>,
        jobs: &mut HashMap<ID, Vec<ReminderJob>>,
        check_in: &CheckIn,
    ) {
        // Scheduling twice without a clear must not leak the old timers
        Self::clear_locked(jobs, &check_in.id);

        if !check_in.notify || check_in.status != CheckInStatus::Upcoming {
            return;
        }

        let now = self.sys.now();
        let mut new_jobs = Vec::new();
        for (offset, fire_at) in check_in.reminder_fire_times() {
            let delay = fire_at.signed_duration_since(now);
            if delay <= Duration::zero() {
                debug!(
                    "Skipping reminder {:?} for check-in: {}, fire-time {} is in the past",
                    offset, check_in.id, fire_at
                );
                continue;
            }
            let delay = match delay.to_std() {
                Ok(delay) => delay,
                Err(_) => continue,
            };

            let scheduler = Arc::clone(self);
            let check_in_id = check_in.id.clone();
            let user_id = check_in.user_id.clone();
            let message = format!(
                "Your check-in scheduled for {} is {} away",
                check_in.check_in_time.to_rfc3339(),
                offset.label()
            );
            let handle = tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                // Claim the registry entry before dispatching. If a cancel
                // got there first this job is gone and must not fire.
                if !scheduler.claim_fire(&check_in_id, offset) {
                    return;
                }
                if !scheduler.dispatcher.dispatch(&user_id, &message).await {
                    error!(
                        "Unable to dispatch reminder {:?} for check-in: {}",
                        offset, check_in_id
                    );
                }
            });
            new_jobs.push(ReminderJob { offset, handle });
        }

        if !new_jobs.is_empty() {
            jobs.insert(check_in.id.clone(), new_jobs);
        }
    }

    fn clear_locked(jobs: &mut HashMap<ID, Vec<ReminderJob>>, check_in_id: &ID) {
        if let Some(old_jobs) = jobs.remove(check_in_id) {
            for job in old_jobs {
                job.handle.abort();
            }
        }
    }

    /// Removes the `(check_in_id, offset)` entry and reports whether it was
    /// still live. Returning false means the job was cancelled in the window
    /// between its timer elapsing and this call.
    fn claim_fire(&self, check_in_id: &ID, offset: ReminderOffset) -> bool {
        let mut jobs = self.jobs.lock().unwrap();
        match jobs.get_mut(check_in_id) {
            Some(check_in_jobs) => {
                let len_before = check_in_jobs.len();
                check_in_jobs.retain(|job| job.offset != offset);
                let claimed = check_in_jobs.len() < len_before;
                if check_in_jobs.is_empty() {
                    jobs.remove(check_in_id);
                }
                claimed
            }
            None => false,
        }
    }

    /// Number of live jobs for a check-in, used by tests.
    pub fn live_job_count(&self, check_in_id: &ID) -> usize {
        self.jobs
            .lock()
            .unwrap()
            .get(check_in_id)
            .map_or(0, |jobs| jobs.len())
    }
}
