mod check_in;
mod scheduling_rules;
mod shared;

pub use check_in::{
    CheckIn, CheckInStatus, Frequency, InvalidFrequencyError, InvalidReminderOffsetError,
    InvalidStatusError, ReminderOffset,
};
pub use scheduling_rules::{conflict_window, day_bounds, find_conflict, MAX_CHECK_INS_PER_DAY};
pub use shared::entity::{Entity, InvalidIDError, ID};
