mod check_in;
mod status;

pub mod dtos {
    pub use crate::check_in::dtos::*;
}

pub use crate::check_in::api::*;
pub use crate::status::api::*;
