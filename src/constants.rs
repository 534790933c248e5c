// src/constants.rs

// Import specific colors needed
use plotters::style::colors::full_palette::{BLUEGREY, GREY, LIGHTBLUE, ORANGE};
use plotters::style::RGBColor;

// Plot dimensions.
pub const PLOT_WIDTH: u32 = 800;
pub const PLOT_HEIGHT: u32 = 600;

// Height fractions for the reduced-height figure variants.
pub const RAW_CHART_HEIGHT_FRACTION: f64 = 0.25;
pub const POPULATION_CHART_HEIGHT_FRACTION: f64 = 0.35;

// Significance threshold driving the assumption branches of the decision
// tree (normality, sphericity, homogeneity of variance).
pub const ALPHA_LEVEL: f64 = 0.05;

// Confidence level of every interval estimate.
pub const CONFIDENCE_LEVEL: f64 = 0.95;

// --- Collision scaling ---
// When more than COLLISION_SCALE_THRESHOLD cases share one location, marker
// sizes are rescaled so the largest is MAX_POINT_SCALE times the unit size.
pub const COLLISION_SCALE_THRESHOLD: f64 = 10.0;
pub const MAX_POINT_SCALE: f64 = 10.0;
pub const POINT_RADIUS_UNIT: f64 = 3.0;

// Histograms use one bin per distinct value below this count, 10 bins above.
pub const HISTOGRAM_DISTINCT_LIMIT: usize = 10;
pub const HISTOGRAM_DEFAULT_BINS: usize = 10;

// Individual-case tick marks under the histogram are scaled to a twentieth
// of the tallest bin.
pub const CASE_TICK_FRACTION: f64 = 20.0;

// Label layout: a 55-character row budget shared across the tick labels.
pub const MAX_CHARS_PER_LABEL_ROW: usize = 55;
pub const MIN_LABEL_WIDTH: usize = 5;

// Mosaic plots cannot lay out zero-frequency cells; they are nudged by a
// negligible additive constant instead.
pub const ZERO_CELL_NUDGE: f64 = 1e-9;
pub const MOSAIC_CELL_GAP: f64 = 0.01;

// Seed for the raw-data jitter so repeated runs render identical figures.
pub const JITTER_SEED: u64 = 555;

// --- Plot Color Assignments ---
pub const COLOR_PRIMARY: &RGBColor = &LIGHTBLUE;
pub const COLOR_SECONDARY: &RGBColor = &ORANGE;
pub const COLOR_INDIVIDUAL: &RGBColor = &GREY;
pub const COLOR_SPINE: &RGBColor = &BLUEGREY;

// Stroke widths for lines
pub const LINE_WIDTH_PLOT: u32 = 1;
pub const LINE_WIDTH_FIT: u32 = 2;
pub const LINE_WIDTH_OVERLAY: u32 = 3;

// --- Font sizes ---
pub const FONT_SIZE_CHART_TITLE: i32 = 20;
pub const FONT_SIZE_AXIS_LABEL: i32 = 12;
pub const FONT_SIZE_NOTE: i32 = 12;
pub const FONT_SIZE_MOSAIC_LABEL: i32 = 13;

// Footnote placement.
pub const NOTE_MARGIN_PX: i32 = 8;

// src/constants.rs
