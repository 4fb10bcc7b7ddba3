//! Fee rules module - domain models, override resolution, services, and traits.

mod fees_model;
mod fees_resolver;
mod fees_service;
mod fees_traits;

#[cfg(test)]
mod fees_service_tests;

pub use fees_model::{
    CalculationBasis, FeeError, FeeRule, FeeRuleOverride, FeeRuleOverrideUpsert, FeeSourceScope,
    NewFeeRule, OverrideIndex, OverrideScope, OverrideValue, PricingTier, ResolvedFee,
};
pub use fees_resolver::{resolution_chain, resolve, ResolutionChain};
pub use fees_service::FeeRuleService;
pub use fees_traits::{FeeRuleRepositoryTrait, FeeRuleServiceTrait};
