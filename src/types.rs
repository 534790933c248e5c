// src/types.rs
// Type aliases shared by the analysis entry points and the CLI.

use std::error::Error;

use crate::report::Fragment;

/// Ordered report output of one analysis run.
pub type Fragments = Vec<Fragment>;

/// Result type of every analysis entry point.
pub type AnalysisResult = Result<Fragments, Box<dyn Error>>;

// src/types.rs
