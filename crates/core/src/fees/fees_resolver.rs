//! Fee resolution: walks the override-inheritance chain for one rule and one
//! aircraft, independently for standard and CAA pricing.
//!
//! Resolution order, most-specific wins:
//! 1. aircraft-type override, 2. classification override, 3. the rule's own
//! default. A CAA request on a rule without a CAA override falls back to the
//! full standard chain - a CAA override amount is never mixed into a standard
//! computation, and vice versa.

use rust_decimal::Decimal;

use crate::aircraft::AircraftContext;
use crate::errors::Result;

use super::fees_model::{
    FeeError, FeeRule, FeeSourceScope, OverrideIndex, PricingTier, ResolvedFee,
};

/// The materialized inheritance chain for one (rule, aircraft, pricing)
/// triple. `aircraft` and `classification` are the override values at those
/// scopes when set; `global` is the rule's own default and always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionChain {
    pub aircraft: Option<Decimal>,
    pub classification: Option<Decimal>,
    pub global: Decimal,
}

impl ResolutionChain {
    /// Collapses the chain into a resolved fee. `revert_to_amount` is the
    /// chain re-run without the aircraft level, computed unconditionally so
    /// callers always have a stable "what happens if I delete this" preview.
    pub fn resolved(&self) -> ResolvedFee {
        let revert_to_amount = self.classification.unwrap_or(self.global);
        match self.aircraft {
            Some(amount) => ResolvedFee {
                final_amount: amount,
                is_override: true,
                source_scope: FeeSourceScope::Aircraft,
                revert_to_amount,
            },
            None => match self.classification {
                Some(amount) => ResolvedFee {
                    final_amount: amount,
                    is_override: true,
                    source_scope: FeeSourceScope::Classification,
                    revert_to_amount,
                },
                None => ResolvedFee {
                    final_amount: self.global,
                    is_override: false,
                    source_scope: FeeSourceScope::Global,
                    revert_to_amount,
                },
            },
        }
    }

    /// The value the classification level contributes to the display chain:
    /// the classification override when set, otherwise the global default.
    pub fn classification_default(&self) -> Decimal {
        self.classification.unwrap_or(self.global)
    }

    pub fn global_default(&self) -> Decimal {
        self.global
    }
}

fn check_rule_applies(rule: &FeeRule, aircraft: &AircraftContext) -> Result<()> {
    if let Some(expected) = &rule.applies_to_classification_id {
        if expected != &aircraft.classification_id {
            // Callers are expected to filter rules by classification before
            // resolving; reaching this point is a contract violation and is
            // surfaced as an error rather than silently resolved.
            return Err(FeeError::ClassificationMismatch {
                rule_id: rule.id.clone(),
                aircraft_type_id: aircraft.aircraft_type_id.clone(),
                expected: expected.clone(),
                actual: aircraft.classification_id.clone(),
            }
            .into());
        }
    }
    Ok(())
}

/// Builds the inheritance chain for one rule and aircraft under the given
/// pricing tier.
pub fn resolution_chain(
    rule: &FeeRule,
    aircraft: &AircraftContext,
    index: &OverrideIndex,
    pricing: PricingTier,
) -> Result<ResolutionChain> {
    check_rule_applies(rule, aircraft)?;

    // A rule without a CAA override prices CAA customers off the standard
    // chain entirely (original standard override fields and default).
    let effective = match pricing {
        PricingTier::Caa if rule.has_caa_override => PricingTier::Caa,
        _ => PricingTier::Standard,
    };

    let aircraft_override = index.aircraft_override(&aircraft.aircraft_type_id, &rule.id);
    let classification_override =
        index.classification_override(&aircraft.classification_id, &rule.id);

    let chain = match effective {
        PricingTier::Standard => ResolutionChain {
            aircraft: aircraft_override.and_then(|ov| ov.amount.as_option()),
            classification: classification_override.and_then(|ov| ov.amount.as_option()),
            global: rule.amount,
        },
        PricingTier::Caa => ResolutionChain {
            aircraft: aircraft_override.and_then(|ov| ov.caa_amount.as_option()),
            classification: classification_override.and_then(|ov| ov.caa_amount.as_option()),
            // has_caa_override with no amount configured falls back to the
            // standard default rather than producing a missing value.
            global: rule.caa_override_amount.unwrap_or(rule.amount),
        },
    };
    Ok(chain)
}

/// Resolves the chargeable amount for one fee rule against one aircraft.
pub fn resolve(
    rule: &FeeRule,
    aircraft: &AircraftContext,
    index: &OverrideIndex,
    pricing: PricingTier,
) -> Result<ResolvedFee> {
    Ok(resolution_chain(rule, aircraft, index, pricing)?.resolved())
}
