//! Waiver tiers module - fuel-uplift waiver evaluation, priority reordering,
//! services, and traits.

mod waivers_evaluator;
mod waivers_model;
mod waivers_reorder;
mod waivers_service;
mod waivers_traits;

#[cfg(test)]
mod waivers_evaluator_tests;

pub use waivers_evaluator::{evaluate, fee_is_waived};
pub use waivers_model::{
    NewWaiverTier, PriorityAssignment, WaivedFeeSet, WaiverError, WaiverTier,
};
pub use waivers_reorder::reorder;
pub use waivers_service::WaiverTierService;
pub use waivers_traits::{WaiverTierRepositoryTrait, WaiverTierServiceTrait};
