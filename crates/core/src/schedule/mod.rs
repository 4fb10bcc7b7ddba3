//! Schedule module - compiles the full (aircraft x fee rule) display matrix.

mod schedule_compiler;
mod schedule_model;
mod schedule_service;
mod schedule_traits;


pub use schedule_compiler::compile;
pub use schedule_model::{
    FeeCell, PrimaryFeePolicy, ScheduleEntry, ScheduleMatrix, ScheduleRequest, ScheduleRow,
};
pub use schedule_service::ScheduleService;
pub use schedule_traits::ScheduleServiceTrait;
