// tests/decision_tree_test.rs

// End-to-end regression tests for the explore branches of the decision
// tree. One literal dataset per scenario, with the expected report strings
// derived by hand so every pinned value is exact. Charts are disabled
// (no chart root), so fragment indices cover text and tables only.

use tabstat::analyses::explore_variable::explore_variable;
use tabstat::analyses::explore_variable_pair::explore_variable_pair;
use tabstat::data_input::table_parser::parse_table_str;
use tabstat::measurement::MeasurementLevel;

#[test]
fn test_explore_interval_variable() {
    // Symmetric sample: mean 3, population SD sqrt(10.5/8), zero skewness.
    let table = parse_table_str(
        "a\n1\n2\n2.5\n3\n3\n3.5\n4\n5\n",
        "int",
    )
    .unwrap();
    let result = explore_variable(&table, "a", false, 2.0, None).unwrap();

    assert!(result[0].html().contains("Explore variable: a (interval)"));
    assert!(result[1].html().contains("N of valid cases: 8"));
    assert!(result[1].html().contains("N of missing cases: 0"));

    let descriptives = result[2].html();
    assert!(descriptives.contains("<td>Mean</td>      <td>3.0000</td>"));
    assert!(descriptives.contains("<td>Standard deviation</td>      <td>1.1456</td>"));
    assert!(descriptives.contains("<td>Skewness</td>      <td>0.0000</td>"));
    assert!(descriptives.contains("<td>Kurtosis</td>      <td>-0.5238</td>"));
    assert!(descriptives.contains("<td>Range</td>      <td>4.0000</td>"));
    assert!(descriptives.contains("<td>Maximum</td>      <td>5.0000</td>"));
    assert!(descriptives.contains("<td>Upper quartile</td>      <td>3.6250</td>"));
    assert!(descriptives.contains("<td>Median</td>      <td>3.0000</td>"));
    assert!(descriptives.contains("<td>Lower quartile</td>      <td>2.3750</td>"));
    assert!(descriptives.contains("<td>Minimum</td>      <td>1.0000</td>"));

    // Shapiro-Wilk on this symmetric sample must not reject.
    assert!(result[3].html().contains("Normality test of a: <i>W</i> = "));

    // Population estimation: CI from the t distribution, sample SD.
    assert!(result[4]
        .html()
        .contains("Mean: 3.0000, 95% confidence interval [1.9761, 4.0239], standard deviation: 1.2247"));

    // Normal sample, so the one-sample t-test is selected.
    let test_line = result[5].html();
    assert!(test_line.contains("One-sample t-test against 2: <i>t</i>(7) = 2.31"));
    assert!(test_line.contains("<i>p</i> = 0.05"));

    // Without a chart root no chart fragments are produced.
    assert!(result.iter().all(|f| !f.is_chart()));
}

#[test]
fn test_explore_interval_variable_with_frequencies() {
    let table = parse_table_str("a\n1\n2\n2\n3\n", "int").unwrap();
    let result = explore_variable(&table, "a", true, 0.0, None).unwrap();
    // The frequency table slots in ahead of the descriptives.
    let frequencies = result[2].html();
    assert!(frequencies.contains("<td>Value</td>      <td>Freq</td>"));
    assert!(frequencies.contains("<td>2</td>      <td>2</td>"));
}

#[test]
fn test_explore_ordinal_variable() {
    // Same values reclassified as ordinal re-route the whole branch.
    let mut table = parse_table_str(
        "a\n1\n2\n2.5\n3\n3\n3.5\n4\n5\n",
        "int",
    )
    .unwrap();
    table.set_level("a", MeasurementLevel::Ordinal).unwrap();
    let result = explore_variable(&table, "a", false, 2.0, None).unwrap();

    assert!(result[0].html().contains("Explore variable: a (ordinal)"));
    let descriptives = result[2].html();
    // Only the order statistics are reported for ordinal variables.
    assert!(!descriptives.contains("Mean"));
    assert!(descriptives.contains("<td>Maximum</td>      <td>5.0000</td>"));
    assert!(descriptives.contains("<td>Median</td>      <td>3.0000</td>"));
    assert!(descriptives.contains("<td>Minimum</td>      <td>1.0000</td>"));

    assert!(result[3].html().contains("Median: 3.0000"));

    // T is the smaller signed-rank sum: one negative difference of rank 3.
    let test_line = result[4].html();
    assert!(test_line.contains("Wilcoxon signed-rank test against 2: <i>T</i> = 3"));
    assert!(test_line.contains("<i>p</i> = 0.06"));
}

#[test]
fn test_explore_unknown_level_variable() {
    // Unknown levels run the interval branch behind a caution note.
    let table = parse_table_str("a\n1\n2\n2.5\n3\n3\n3.5\n4\n5\n", "unk").unwrap();
    let result = explore_variable(&table, "a", false, 2.0, None).unwrap();
    assert!(result[0].html().contains("Explore variable: a (unknown)"));
    assert!(result[1]
        .html()
        .contains("Measurement level of a is unknown; treating it as interval."));
    assert!(result[3].html().contains("<td>Mean</td>      <td>3.0000</td>"));
}

#[test]
fn test_explore_nominal_variable() {
    let table = parse_table_str("g\nx\nx\ny\n", "nom").unwrap();
    let result = explore_variable(&table, "g", false, 0.0, None).unwrap();

    assert!(result[0].html().contains("Explore variable: g (nominal)"));
    assert!(result[1].html().contains("N of valid cases: 3"));
    let frequencies = result[2].html();
    assert!(frequencies.contains("<td>Value</td>      <td>Freq</td>"));
    assert!(frequencies.contains("<td>x</td>      <td>2</td>"));
    assert!(frequencies.contains("<td>y</td>      <td>1</td>"));
}

#[test]
fn test_explore_interval_pair() {
    // A perfect line: slope 2, intercept 0, both correlations 1.
    let table = parse_table_str(
        "x,y\n1,2\n2,4\n3,6\n4,8\n5,10\n",
        "int int",
    )
    .unwrap();
    let result = explore_variable_pair(&table, "x", "y", None).unwrap();

    assert!(result[0].html().contains("Explore variable pair: x, y"));
    assert!(result[1].html().contains("N of valid pairs: 5"));
    assert!(result[1].html().contains("N of missing pairs: 0"));
    assert!(result[2].html().contains("Linear regression: y = 2.000x + 0.000"));
    let pearson_line = result[3].html();
    assert!(pearson_line.contains("Pearson's correlation: <i>r</i>(3) = 1.000"));
    assert!(pearson_line.contains("<i>p</i> &lt; 0.001"));
    let spearman_line = result[4].html();
    assert!(spearman_line.contains("<i>r<sub>s</sub></i>(3) = 1.000"));
}

#[test]
fn test_explore_ordinal_pair() {
    // Flipping the levels to ordinal drops regression and Pearson.
    let mut table = parse_table_str(
        "x,y\n1,1\n2,8\n3,27\n4,64\n5,125\n",
        "int int",
    )
    .unwrap();
    table.set_level("x", MeasurementLevel::Ordinal).unwrap();
    table.set_level("y", MeasurementLevel::Ordinal).unwrap();
    let result = explore_variable_pair(&table, "x", "y", None).unwrap();

    assert!(result[1].html().contains("N of valid pairs: 5"));
    let spearman_line = result[2].html();
    assert!(spearman_line.contains("<i>r<sub>s</sub></i>(3) = 1.000"));
    assert!(!result
        .iter()
        .any(|f| f.html().contains("Linear regression")));
}

#[test]
fn test_explore_nominal_pair() {
    // A uniform 2x2 table: no association at all.
    let table = parse_table_str(
        "c,d\nx,p\nx,p\nx,q\nx,q\ny,p\ny,p\ny,q\ny,q\n",
        "nom nom",
    )
    .unwrap();
    let result = explore_variable_pair(&table, "c", "d", None).unwrap();

    assert!(result[1].html().contains("N of valid pairs: 8"));
    let contingency = result[2].html();
    assert!(contingency.contains("<td>p</td>      <td>2</td>      <td>2</td>"));
    assert!(contingency.contains("<td>q</td>      <td>2</td>      <td>2</td>"));
    assert!(result[3]
        .html()
        .contains("Cramer's V measure of association: &phi;<i><sub>c</sub></i> = 0.000"));
    assert!(result[4]
        .html()
        .contains("Chi-squared test of independence: &chi;<sup>2</sup>(1, <i>N</i> = 8) = 0, <i>p</i> = 1.000"));
}

#[test]
fn test_missing_cells_are_dropped_pairwise() {
    let table = parse_table_str(
        "x,y\n1,2\n2,\n3,6\n4,8\n5,10\n,12\n6,11\n",
        "int int",
    )
    .unwrap();
    let result = explore_variable_pair(&table, "x", "y", None).unwrap();
    assert!(result[1].html().contains("N of valid pairs: 5"));
    assert!(result[1].html().contains("N of missing pairs: 2"));
}

#[test]
fn test_unknown_variable_is_rejected() {
    let table = parse_table_str("a\n1\n2\n3\n", "int").unwrap();
    let error = explore_variable(&table, "b", false, 0.0, None).unwrap_err();
    assert!(error.to_string().contains("'b'"));
}

// tests/decision_tree_test.rs
