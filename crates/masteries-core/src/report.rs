//! Sorting, near-duplicate filtering, and text rendering of enumeration
//! results.
//!
//! Combinatorially many paths land on near-identical totals; the report
//! keeps only the distinct cost tiers. Records are sorted ascending by cost,
//! then a record is kept only when it is more than 1% above the last kept
//! one, starting from a sentinel of 1.

use crate::layer::Combination;
use crate::walk::PathCost;

/// Minimum relative increase between consecutive emitted tiers.
const TIER_RATIO: f64 = 1.01;

/// A record that can be ranked by cost and printed as one report line.
pub trait CostRecord {
    /// Cumulative cost of this record.
    fn cost(&self) -> f64;

    /// The line body printed after the cost.
    fn describe(&self) -> String;
}

impl CostRecord for PathCost {
    fn cost(&self) -> f64 {
        self.cost
    }

    fn describe(&self) -> String {
        format!("{}|0", self.path_string())
    }
}

impl CostRecord for Combination {
    fn cost(&self) -> f64 {
        self.cost
    }

    fn describe(&self) -> String {
        self.purchase_string()
    }
}

/// Sorted, deduplicated cost tiers plus the size of the unfiltered input.
#[derive(Debug, Clone)]
pub struct Report<T> {
    /// The emitted tiers, ascending by cost.
    pub tiers: Vec<T>,

    /// How many records were enumerated before filtering.
    pub total: usize,
}

impl<T: CostRecord> Report<T> {
    /// Sort records ascending by cost and keep the distinct tiers.
    pub fn new(mut records: Vec<T>) -> Self {
        let total = records.len();
        records.sort_by(|a, b| a.cost().total_cmp(&b.cost()));

        let mut tiers = Vec::new();
        let mut last_cost = 1.0;
        for record in records {
            if record.cost() / last_cost > TIER_RATIO {
                last_cost = record.cost();
                tiers.push(record);
            }
        }

        Self { tiers, total }
    }

    /// Number of emitted tiers.
    pub fn emitted(&self) -> usize {
        self.tiers.len()
    }

    /// One line per tier: `<cost> : <description>`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for tier in &self.tiers {
            out.push_str(&sci(tier.cost()));
            out.push_str(" : ");
            out.push_str(&tier.describe());
            out.push('\n');
        }
        out
    }

    /// [`Report::render`] plus the trailing `<emitted> out of <total> shown`
    /// summary line.
    pub fn render_with_summary(&self) -> String {
        let mut out = self.render();
        out.push_str(&format!("{} out of {} shown\n", self.emitted(), self.total));
        out
    }
}

/// Format a cost the way C's `%.2e` does: two fractional digits, explicit
/// exponent sign, at least two exponent digits (`2.74e+76`, `0.00e+00`).
pub fn sci(cost: f64) -> String {
    let formatted = format!("{cost:.2e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => formatted,
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Bare record for exercising the filter without an engine.
    #[derive(Debug, Clone, PartialEq)]
    struct Priced(f64);

    impl CostRecord for Priced {
        fn cost(&self) -> f64 {
            self.0
        }

        fn describe(&self) -> String {
            format!("#{}", self.0)
        }
    }

    fn costs(report: &Report<Priced>) -> Vec<f64> {
        report.tiers.iter().map(|t| t.0).collect()
    }

    // -----------------------------------------------------------------------
    // Filtering
    // -----------------------------------------------------------------------
    #[test]
    fn near_duplicates_collapse_to_one_tier() {
        let report = Report::new(vec![
            Priced(100.0),
            Priced(100.5),
            Priced(100.9),
            Priced(102.0),
        ]);
        assert_eq!(costs(&report), vec![100.0, 102.0]);
        assert_eq!(report.total, 4);
        assert_eq!(report.emitted(), 2);
    }

    #[test]
    fn filter_compares_against_last_emitted_not_last_seen() {
        // 100 -> 100.9 (skipped) -> 101.5: above 100.9 by <1% but above the
        // last *emitted* 100 by more than 1%, so it is kept.
        let report = Report::new(vec![Priced(100.0), Priced(100.9), Priced(101.5)]);
        assert_eq!(costs(&report), vec![100.0, 101.5]);
    }

    #[test]
    fn input_order_is_irrelevant() {
        let report = Report::new(vec![Priced(300.0), Priced(100.0), Priced(200.0)]);
        assert_eq!(costs(&report), vec![100.0, 200.0, 300.0]);
    }

    #[test]
    fn sentinel_filters_tiers_at_or_below_one() {
        // The running comparison starts at 1, so anything not above 1.01
        // never appears.
        let report = Report::new(vec![Priced(0.0), Priced(1.0), Priced(1.005), Priced(5.0)]);
        assert_eq!(costs(&report), vec![5.0]);
    }

    #[test]
    fn emitted_tiers_strictly_increase_by_over_one_percent() {
        let records: Vec<Priced> = (0..200).map(|i| Priced(1.0 + (i as f64) * 0.1)).collect();
        let report = Report::new(records);
        for pair in report.tiers.windows(2) {
            assert!(pair[1].0 / pair[0].0 > TIER_RATIO);
        }
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------
    #[test]
    fn sci_matches_c_style() {
        assert_eq!(sci(1e71), "1.00e+71");
        assert_eq!(sci(2.74e76), "2.74e+76");
        assert_eq!(sci(0.0), "0.00e+00");
        assert_eq!(sci(35.0), "3.50e+01");
        assert_eq!(sci(0.00123), "1.23e-03");
        assert_eq!(sci(9.999e99), "1.00e+100");
    }

    #[test]
    fn render_emits_one_line_per_tier() {
        let report = Report::new(vec![Priced(100.0), Priced(200.0)]);
        assert_eq!(report.render(), "1.00e+02 : #100\n2.00e+02 : #200\n");
    }

    #[test]
    fn render_with_summary_appends_counts() {
        let report = Report::new(vec![Priced(100.0), Priced(100.5), Priced(200.0)]);
        let rendered = report.render_with_summary();
        assert!(rendered.ends_with("2 out of 3 shown\n"));
    }
}
