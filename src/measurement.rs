// src/measurement.rs

/// Centralized measurement-level vocabulary
///
/// Provides the nominal/ordinal/interval/unknown classification used by every
/// analysis and plot function to select statistics and chart variants.
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementLevel {
    Nominal,
    Ordinal,
    Interval,
    Unknown,
}

impl MeasurementLevel {
    /// Parse a single level token as written in a level specification string.
    ///
    /// Accepted tokens: "nom", "ord", "int", "unk".
    pub fn parse(token: &str) -> Option<MeasurementLevel> {
        match token {
            "nom" => Some(MeasurementLevel::Nominal),
            "ord" => Some(MeasurementLevel::Ordinal),
            "int" => Some(MeasurementLevel::Interval),
            "unk" => Some(MeasurementLevel::Unknown),
            _ => None,
        }
    }

}

impl fmt::Display for MeasurementLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MeasurementLevel::Nominal => "nominal",
            MeasurementLevel::Ordinal => "ordinal",
            MeasurementLevel::Interval => "interval",
            MeasurementLevel::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// Parse a whitespace-separated level specification, one token per column.
pub fn parse_level_spec(spec: &str) -> Result<Vec<MeasurementLevel>, String> {
    spec.split_whitespace()
        .map(|token| {
            MeasurementLevel::parse(token)
                .ok_or_else(|| format!("Unknown measurement level token '{}'", token))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tokens() {
        assert_eq!(
            MeasurementLevel::parse("nom"),
            Some(MeasurementLevel::Nominal)
        );
        assert_eq!(
            MeasurementLevel::parse("ord"),
            Some(MeasurementLevel::Ordinal)
        );
        assert_eq!(
            MeasurementLevel::parse("int"),
            Some(MeasurementLevel::Interval)
        );
        assert_eq!(
            MeasurementLevel::parse("unk"),
            Some(MeasurementLevel::Unknown)
        );
        assert_eq!(MeasurementLevel::parse("ratio"), None);
    }

    #[test]
    fn test_parse_level_spec() {
        let levels = parse_level_spec("int int nom ord").unwrap();
        assert_eq!(
            levels,
            vec![
                MeasurementLevel::Interval,
                MeasurementLevel::Interval,
                MeasurementLevel::Nominal,
                MeasurementLevel::Ordinal
            ]
        );
        assert!(parse_level_spec("int bogus").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(MeasurementLevel::Interval.to_string(), "interval");
        assert_eq!(MeasurementLevel::Nominal.to_string(), "nominal");
    }
}

// src/measurement.rs
