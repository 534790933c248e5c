// src/data_analysis/mod.rs

pub mod categorical;
pub mod correlation;
pub mod descriptives;
pub mod nonparametric;
pub mod normality;
pub mod parametric;

// src/data_analysis/mod.rs
