//! The shared pricing unit: a purchasable study.

use serde::{Deserialize, Serialize};

/// Pricing for one purchasable study: a base cost plus the factor by which
/// every later purchase in the same branch grows.
///
/// Costs in real mastery datasets reach ~1e77, so the model is `f64`
/// throughout; fixed-point arithmetic cannot represent the range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Study {
    /// Base cost of one unit before any compounding.
    pub cost: f64,

    /// Compounding factor applied to the running multiplier after each unit
    /// bought. `1.0` means the price never escalates.
    pub cost_multiplier: f64,
}

impl Study {
    /// Running cost and multiplier after buying one unit at the given state.
    ///
    /// Compounds per unit: callers buying `q` units apply this `q` times in
    /// sequence, never as a closed-form power, so the multiplier carried into
    /// later purchases matches unit-by-unit accumulation.
    pub fn buy_one(&self, cost: f64, multiplier: f64) -> (f64, f64) {
        (cost + self.cost * multiplier, multiplier * self.cost_multiplier)
    }

    /// Whether the base cost is a usable price (finite, non-negative).
    pub fn has_valid_cost(&self) -> bool {
        self.cost.is_finite() && self.cost >= 0.0
    }

    /// Whether the multiplier is usable (finite, strictly positive).
    pub fn has_valid_multiplier(&self) -> bool {
        self.cost_multiplier.is_finite() && self.cost_multiplier > 0.0
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buy_one_compounds_per_unit() {
        let study = Study {
            cost: 10.0,
            cost_multiplier: 2.0,
        };

        let (cost, mult) = study.buy_one(0.0, 1.0);
        assert_eq!(cost, 10.0);
        assert_eq!(mult, 2.0);

        let (cost, mult) = study.buy_one(cost, mult);
        assert_eq!(cost, 30.0);
        assert_eq!(mult, 4.0);

        let (cost, mult) = study.buy_one(cost, mult);
        assert_eq!(cost, 70.0);
        assert_eq!(mult, 8.0);
    }

    #[test]
    fn validity_predicates() {
        let ok = Study {
            cost: 1e71,
            cost_multiplier: 2.5,
        };
        assert!(ok.has_valid_cost());
        assert!(ok.has_valid_multiplier());

        let negative = Study {
            cost: -1.0,
            cost_multiplier: 1.0,
        };
        assert!(!negative.has_valid_cost());

        let zero_mult = Study {
            cost: 1.0,
            cost_multiplier: 0.0,
        };
        assert!(!zero_mult.has_valid_multiplier());

        let nan = Study {
            cost: f64::NAN,
            cost_multiplier: f64::INFINITY,
        };
        assert!(!nan.has_valid_cost());
        assert!(!nan.has_valid_multiplier());
    }
}
