// src/analyses/mod.rs

// The decision tree: one module per analysis, each mapping the requested
// variables through their measurement levels to the appropriate statistics,
// report fragments, and charts. Chart fragments are only produced when a
// chart root is supplied; text and table fragments keep a fixed order that
// the regression tests pin.

pub mod compare_groups;
pub mod compare_variables;
pub mod explore_variable;
pub mod explore_variable_pair;

use crate::measurement::MeasurementLevel;

/// Output filename for one chart of an analysis run.
pub fn chart_path(chart_root: &str, suffix: &str) -> String {
    format!("{}_{}.png", chart_root, suffix)
}

/// The joint measurement level of several variables: the least informative
/// one wins (nominal < ordinal < unknown < interval).
pub fn effective_level(levels: &[MeasurementLevel]) -> MeasurementLevel {
    if levels.contains(&MeasurementLevel::Nominal) {
        MeasurementLevel::Nominal
    } else if levels.contains(&MeasurementLevel::Ordinal) {
        MeasurementLevel::Ordinal
    } else if levels.contains(&MeasurementLevel::Unknown) {
        MeasurementLevel::Unknown
    } else {
        MeasurementLevel::Interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_level() {
        use MeasurementLevel::*;
        assert_eq!(effective_level(&[Interval, Interval]), Interval);
        assert_eq!(effective_level(&[Interval, Ordinal]), Ordinal);
        assert_eq!(effective_level(&[Ordinal, Nominal]), Nominal);
        assert_eq!(effective_level(&[Interval, Unknown]), Unknown);
    }

    #[test]
    fn test_chart_path() {
        assert_eq!(chart_path("out/run1", "raw_data"), "out/run1_raw_data.png");
    }
}

// src/analyses/mod.rs
