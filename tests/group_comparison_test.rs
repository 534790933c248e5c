// tests/group_comparison_test.rs

// End-to-end regression tests for the repeated-measures and independent-
// groups branches of the decision tree, on literal datasets with
// hand-derived expected statistics.

use tabstat::analyses::compare_groups::compare_groups;
use tabstat::analyses::compare_variables::compare_variables;
use tabstat::data_input::table_parser::parse_table_str;
use tabstat::measurement::MeasurementLevel;

const REPEATED_CSV: &str = "a,e,g2,f\n\
    1,1.5,0.9,0\n\
    2,2.2,2.1,0\n\
    3,3.9,2.8,0\n\
    4,4.4,4.2,0\n\
    5,5.1,4.9,10\n\
    6,6.8,6.1,10\n\
    7,7.3,6.9,10\n\
    8,8.6,8.1,10\n";

#[test]
fn test_compare_two_interval_variables() {
    let table = parse_table_str(REPEATED_CSV, "int int int int").unwrap();
    let result = compare_variables(&table, &["a", "e"], None).unwrap();

    assert!(result[0]
        .html()
        .contains("Compare repeated measures variables: a, e"));
    assert!(result[1].html().contains("N of valid cases: 8"));
    assert!(result[2].html().contains("<td>4.5000</td>      <td>4.9750</td>"));
    assert!(result[3]
        .html()
        .contains("Normality test of the difference: <i>W</i> = "));
    let test_line = result[4].html();
    assert!(test_line.contains("Paired samples t-test: <i>t</i>(7) = -4.77"));
    assert!(test_line.contains("<i>p</i> = 0.002"));
}

#[test]
fn test_compare_three_interval_variables_with_anova() {
    // a, e, g2 are all close to uniform spreads, so normality holds, and
    // the contrast covariance gives Mauchly W = 0.438 (p = 0.084), keeping
    // the uncorrected repeated-measures ANOVA: F(2, 14) = 17.4.
    let table = parse_table_str(REPEATED_CSV, "int int int int").unwrap();
    let result = compare_variables(&table, &["a", "e", "g2"], None).unwrap();

    assert!(result[2]
        .html()
        .contains("<td>4.5000</td>      <td>4.9750</td>      <td>4.5000</td>"));
    let normality = result[3].html();
    assert!(normality.contains("a: <i>W</i> = "));
    assert!(normality.contains("e: <i>W</i> = "));
    assert!(normality.contains("g2: <i>W</i> = "));
    assert!(result[4]
        .html()
        .contains("Mauchly's test of sphericity: <i>W</i> = 0.438, <i>p</i> = 0.084"));
    assert!(result[5]
        .html()
        .contains("Repeated measures ANOVA: <i>F</i>(2, 14) = 17.4, <i>p</i> &lt; 0.001"));
    let posthoc = result[6].html();
    assert!(posthoc.contains("a - e: <i>t</i>(7) = -4.77"));
    assert!(posthoc.contains("a - g2: <i>t</i>(7) = 0, <i>p</i> = 1.000"));
    assert!(posthoc.contains("e - g2: <i>t</i>(7) = 4.09"));
}

#[test]
fn test_compare_three_variables_nonnormal_goes_friedman() {
    // f is an extreme two-point variable, so normality fails and the
    // Friedman test takes over; ranks are untied within every row.
    let table = parse_table_str(REPEATED_CSV, "int int int int").unwrap();
    let result = compare_variables(&table, &["a", "e", "f"], None).unwrap();

    let normality = result[3].html();
    assert!(normality.contains("f: <i>W</i> = "));
    assert!(result[4]
        .html()
        .contains("Friedman test: &chi;<sup>2</sup>(2, <i>N</i> = 8) = 4, <i>p</i> = 0.135"));
}

#[test]
fn test_compare_two_ordinal_variables() {
    let mut table = parse_table_str(REPEATED_CSV, "int int int int").unwrap();
    table.set_level("a", MeasurementLevel::Ordinal).unwrap();
    table.set_level("e", MeasurementLevel::Ordinal).unwrap();
    let result = compare_variables(&table, &["a", "e"], None).unwrap();

    // Medians instead of means.
    assert!(result[2].html().contains("<td>4.5000</td>      <td>4.7500</td>"));
    // Every difference is negative, so the smaller rank sum is zero.
    let test_line = result[3].html();
    assert!(test_line.contains("Wilcoxon signed-rank test: <i>T</i> = 0"));
    assert!(test_line.contains("<i>p</i> = 0.012"));
}

#[test]
fn test_compare_two_nominal_variables_mcnemar() {
    // Discordant cells are balanced (2 vs 2): the continuity-corrected
    // McNemar statistic collapses to zero.
    let table = parse_table_str(
        "i,j\n0,0\n0,1\n1,0\n1,1\n0,1\n1,1\n0,0\n1,0\n",
        "nom nom",
    )
    .unwrap();
    let result = compare_variables(&table, &["i", "j"], None).unwrap();

    assert!(result[2].html().contains("<td>0</td>"));
    assert!(result[3]
        .html()
        .contains("McNemar test: &chi;<sup>2</sup>(1, <i>N</i> = 8) = 0, <i>p</i> = 1.000"));
}

#[test]
fn test_compare_three_nominal_variables_cochran() {
    // Column sums 8, 2, 2 over 8 cases give Q = 9 on 2 df.
    let table = parse_table_str(
        "x1,x2,x3\n1,0,0\n1,0,0\n1,1,0\n1,0,1\n1,0,0\n1,0,0\n1,1,0\n1,0,1\n",
        "nom nom nom",
    )
    .unwrap();
    let result = compare_variables(&table, &["x1", "x2", "x3"], None).unwrap();
    assert!(result[2]
        .html()
        .contains("Cochran's Q test: <i>Q</i>(2, <i>N</i> = 8) = 9, <i>p</i> = 0.011"));
}

#[test]
fn test_compare_two_interval_groups() {
    // Two evenly spaced groups: identical spreads (Levene W = 0), mean
    // difference -5 with a pooled standard error of exactly 1.
    let table = parse_table_str(
        "l,m\n1,1\n2,1\n3,1\n4,1\n5,1\n6,2\n7,2\n8,2\n9,2\n10,2\n",
        "int nom",
    )
    .unwrap();
    let result = compare_groups(&table, "l", &["m"], None).unwrap();

    assert!(result[0].html().contains("Compare groups: l by m"));
    assert!(result[1].html().contains("N of valid cases: 10"));
    assert!(result[2].html().contains("<td>Mean</td>      <td>3.0000</td>      <td>8.0000</td>"));
    let normality = result[3].html();
    assert!(normality.contains("(m: 1): <i>W</i> = "));
    assert!(normality.contains("(m: 2): <i>W</i> = "));
    assert!(result[4]
        .html()
        .contains("Levene test for homogeneity of variance: <i>W</i> = 0.000, <i>p</i> = 1.000"));
    assert!(result[5]
        .html()
        .contains("Difference between the two groups: -5.0000, 95% confidence interval [-7.3060, -2.6940]"));
    let test_line = result[6].html();
    assert!(test_line.contains("Independent samples t-test: <i>t</i>(8) = -5"));
    assert!(test_line.contains("<i>p</i> = 0.001"));
}

#[test]
fn test_nonnormal_group_goes_mann_whitney() {
    // The second group is an extreme two-point distribution; ranks place
    // the first group exactly in the middle, so U sits at its mean.
    let table = parse_table_str(
        "o,m\n1,1\n2,1\n3,1\n4,1\n5,1\n0,2\n0,2\n0,2\n0,2\n10,2\n10,2\n10,2\n10,2\n",
        "int nom",
    )
    .unwrap();
    let result = compare_groups(&table, "o", &["m"], None).unwrap();
    let test_line = result[6].html();
    assert!(test_line.contains("Mann-Whitney U test: <i>U</i> = 20"));
    assert!(test_line.contains("<i>p</i> = 1.000"));
}

#[test]
fn test_heteroscedastic_groups_go_welch() {
    // Variances 2.5 vs 62.5: Levene rejects, Welch df drops to 4.32.
    let table = parse_table_str(
        "p,m\n1,1\n2,1\n3,1\n4,1\n5,1\n-10,2\n-5,2\n0,2\n5,2\n10,2\n",
        "int nom",
    )
    .unwrap();
    let result = compare_groups(&table, "p", &["m"], None).unwrap();
    let test_line = result[6].html();
    assert!(test_line.contains("Welch's t-test: <i>t</i>(4.32) = 0.832"));
}

#[test]
fn test_three_interval_groups_anova() {
    // Three evenly spaced groups shifted by one unit each: F(2, 6) = 3
    // exactly, p = (1 + 2F/df2)^(-df2/2) = 0.125, omega squared = 4/13.
    let table = parse_table_str(
        "r,q\n1,1\n2,1\n3,1\n2,2\n3,2\n4,2\n3,3\n4,3\n5,3\n",
        "int nom",
    )
    .unwrap();
    let result = compare_groups(&table, "r", &["q"], None).unwrap();

    assert!(result[5]
        .html()
        .contains("One-way ANOVA: <i>F</i>(2, 6) = 3, <i>p</i> = 0.125"));
    assert!(result[6]
        .html()
        .contains("Effect size: &omega;<sup>2</sup> = 0.308"));
}

#[test]
fn test_ordinal_groups_kruskal_wallis() {
    // Fully separated groups of 3: H = 7.2 without ties.
    let mut table = parse_table_str(
        "s,t\n1,1\n2,1\n3,1\n4,2\n5,2\n6,2\n7,3\n8,3\n9,3\n",
        "int nom",
    )
    .unwrap();
    table.set_level("s", MeasurementLevel::Ordinal).unwrap();
    let result = compare_groups(&table, "s", &["t"], None).unwrap();

    // Ordinal dependents only report order statistics per group.
    assert!(result[2]
        .html()
        .contains("<td>Median</td>      <td>2.0000</td>      <td>5.0000</td>      <td>8.0000</td>"));
    assert!(!result[2].html().contains("Mean"));
    assert!(result[3]
        .html()
        .contains("Kruskal-Wallis test: &chi;<sup>2</sup>(2, <i>N</i> = 9) = 7.2, <i>p</i> = 0.027"));
}

#[test]
fn test_single_case_modified_t() {
    let table = parse_table_str(
        "slope,group\n0.247,Patient\n0.492,Control\n0.559,Control\n0.63,Control\n\
         0.627,Control\n0.674,Control\n0.538,Control\n",
        "int nom",
    )
    .unwrap();
    let result = compare_groups(&table, "slope", &["group"], None).unwrap();
    let test_line = result[3].html();
    assert!(test_line.contains("Modified t-test: <i>t</i>(5) = -4.61"));
    assert!(test_line.contains("<i>p</i> = 0.006"));
}

#[test]
fn test_two_way_anova_groups() {
    // Balanced 2x2 with additive effects only: F_A = 64, F_B = 16, and a
    // vanishing interaction on (1, 4) degrees of freedom.
    let table = parse_table_str(
        "a2,c2,d2\n1,A,p\n2,A,p\n3,A,q\n4,A,q\n5,B,p\n6,B,p\n7,B,q\n8,B,q\n",
        "int nom nom",
    )
    .unwrap();
    let result = compare_groups(&table, "a2", &["c2", "d2"], None).unwrap();

    // Cell labels join the factor levels.
    assert!(result[2].html().contains("<td>A : p</td>"));
    let anova = result[3].html();
    assert!(anova.contains("Two-way ANOVA, main effect of c2: <i>F</i>(1, 4) = 64, <i>p</i> = 0.001"));
    assert!(anova.contains("Main effect of d2: <i>F</i>(1, 4) = 16, <i>p</i> = 0.016"));
    assert!(anova.contains("c2 x d2 interaction: <i>F</i>(1, 4) = 0, <i>p</i> = 1.000"));
}

#[test]
fn test_nominal_dependent_groups() {
    // Uniform 2x2: no association between the dependent and the group.
    let table = parse_table_str(
        "i,j\n0,0\n0,1\n1,0\n1,1\n0,0\n0,1\n1,0\n1,1\n",
        "nom nom",
    )
    .unwrap();
    let result = compare_groups(&table, "i", &["j"], None).unwrap();

    assert!(result[3]
        .html()
        .contains("Cramer's V measure of association: &phi;<i><sub>c</sub></i> = 0.000"));
    assert!(result[4]
        .html()
        .contains("Chi-squared test of independence: &chi;<sup>2</sup>(1, <i>N</i> = 8) = 0, <i>p</i> = 1.000"));
}

// tests/group_comparison_test.rs
