mod check_in;
mod shared;

use check_in::InMemoryCheckInRepo;
pub use check_in::ICheckInRepo;
use std::sync::Arc;

#[derive(Clone)]
pub struct Repos {
    pub check_ins: Arc<dyn ICheckInRepo>,
}

impl Repos {
    pub fn create_inmemory() -> Self {
        Self {
            check_ins: Arc::new(InMemoryCheckInRepo::new()),
        }
    }
}
