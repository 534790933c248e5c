// src/report.rs

use std::path::PathBuf;

/// One element of an analysis report. Analyses return an ordered sequence of
/// these; callers (the CLI, the regression tests, a GUI shell) consume them
/// positionally.
#[derive(Debug, Clone)]
pub enum Fragment {
    /// HTML-formatted prose: headings, test lines, notes.
    Text(String),
    /// HTML table.
    Table(String),
    /// Path of a rendered figure.
    Chart(PathBuf),
}

impl Fragment {
    /// The HTML content of a text or table fragment; empty for charts.
    pub fn html(&self) -> &str {
        match self {
            Fragment::Text(s) | Fragment::Table(s) => s,
            Fragment::Chart(_) => "",
        }
    }

    pub fn is_chart(&self) -> bool {
        matches!(self, Fragment::Chart(_))
    }
}

/// Format a test statistic to 3 significant digits, trailing zeros trimmed.
pub fn fmt_stat(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    // Values at numeric-noise scale print as a plain zero, never "-0".
    if value.abs() < 1e-9 {
        return "0".to_string();
    }
    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (2 - magnitude).clamp(0, 9) as usize;
    let fixed = format!("{:.*}", decimals, value);
    trim_trailing_zeros(fixed)
}

/// Format an effect size or correlation to 3 decimals.
pub fn fmt_effect(value: f64) -> String {
    format!("{:.3}", value)
}

/// Format a descriptive value to 4 decimals (table cells, means, CI bounds).
pub fn fmt_cell(value: f64) -> String {
    format!("{:.4}", value)
}

/// Degrees of freedom: integers shown bare, fractional values to at most
/// 2 decimals with trailing zeros trimmed (Welch and Greenhouse-Geisser dfs).
pub fn fmt_df(df: f64) -> String {
    let rounded = (df * 100.0).round() / 100.0;
    if (rounded - rounded.round()).abs() < 1e-9 {
        format!("{:.0}", rounded)
    } else {
        trim_trailing_zeros(format!("{:.2}", rounded))
    }
}

/// p-values render as "= 0.065", or "&lt; 0.001" below the printable range.
pub fn fmt_p(p: f64) -> String {
    if p < 0.001 {
        "&lt; 0.001".to_string()
    } else {
        format!("= {:.3}", p)
    }
}

fn trim_trailing_zeros(fixed: String) -> String {
    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        fixed
    }
}

/// `[low, high]` confidence-interval bracket at the given cell precision.
pub fn ci_bracket(low: f64, high: f64, decimals: usize) -> String {
    format!("[{:.*}, {:.*}]", decimals, low, decimals, high)
}

/// A t-family test line: `<i>t</i>(29) = 1.92, <i>p</i> = 0.065`.
pub fn t_line(t: f64, df: f64, p: f64) -> String {
    format!(
        "<i>t</i>({}) = {}, <i>p</i> {}",
        fmt_df(df),
        fmt_stat(t),
        fmt_p(p)
    )
}

/// An F test line: `<i>F</i>(2, 58) = 6.17, <i>p</i> = 0.004`.
pub fn f_line(f: f64, df1: f64, df2: f64, p: f64) -> String {
    format!(
        "<i>F</i>({}, {}) = {}, <i>p</i> {}",
        fmt_df(df1),
        fmt_df(df2),
        fmt_stat(f),
        fmt_p(p)
    )
}

/// A chi-square line with the case count:
/// `&chi;<sup>2</sup>(2, <i>N</i> = 30) = 6.47, <i>p</i> = 0.039`.
pub fn chi2_line(chi2: f64, df: f64, n: usize, p: f64) -> String {
    format!(
        "&chi;<sup>2</sup>({}, <i>N</i> = {}) = {}, <i>p</i> {}",
        fmt_df(df),
        n,
        fmt_stat(chi2),
        fmt_p(p)
    )
}

/// A W line (Shapiro-Wilk, Mauchly, Levene): `<i>W</i> = 0.959, <i>p</i> = 0.287`.
pub fn w_line(w: f64, p: f64) -> String {
    format!("<i>W</i> = {}, <i>p</i> {}", fmt_effect(w), fmt_p(p))
}

/// A rank-statistic line: `<i>T</i> = 110, <i>p</i> = 0.012`.
pub fn rank_line(symbol: &str, statistic: f64, p: f64) -> String {
    format!(
        "<i>{}</i> = {}, <i>p</i> {}",
        symbol,
        fmt_stat(statistic),
        fmt_p(p)
    )
}

/// Plain number for prose (test values, group labels): up to 3 decimals,
/// trailing zeros trimmed.
pub fn fmt_number(value: f64) -> String {
    trim_trailing_zeros(format!("{:.3}", value))
}

/// Cochran's Q line: `<i>Q</i>(2, <i>N</i> = 30) = 0.783, <i>p</i> = 0.676`.
pub fn q_line(q: f64, df: f64, n: usize, p: f64) -> String {
    format!(
        "<i>Q</i>({}, <i>N</i> = {}) = {}, <i>p</i> {}",
        fmt_df(df),
        n,
        fmt_stat(q),
        fmt_p(p)
    )
}

/// Build an HTML table from rows of cells. Cells are separated by six
/// spaces and rows by four, the spacing the report consumers expect.
pub fn html_table(rows: &[Vec<String>]) -> String {
    let body = rows
        .iter()
        .map(|row| {
            let cells = row
                .iter()
                .map(|cell| format!("<td>{}</td>", cell))
                .collect::<Vec<_>>()
                .join("      ");
            format!("<tr>      {}    </tr>", cells)
        })
        .collect::<Vec<_>>()
        .join("    ");
    format!("<table>    {}    </table>", body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_stat() {
        assert_eq!(fmt_stat(1.9234), "1.92");
        assert_eq!(fmt_stat(203.0), "203");
        assert_eq!(fmt_stat(0.05561), "0.0556");
        assert_eq!(fmt_stat(-3.6742), "-3.67");
        assert_eq!(fmt_stat(0.0), "0");
        assert_eq!(fmt_stat(6.4702), "6.47");
    }

    #[test]
    fn test_fmt_df() {
        assert_eq!(fmt_df(29.0), "29");
        assert_eq!(fmt_df(25.3003), "25.3");
        assert_eq!(fmt_df(1.6601), "1.66");
    }

    #[test]
    fn test_fmt_p() {
        assert_eq!(fmt_p(0.0649), "= 0.065");
        assert_eq!(fmt_p(0.0004), "&lt; 0.001");
    }

    #[test]
    fn test_test_lines() {
        assert_eq!(t_line(1.9234, 29.0, 0.0649), "<i>t</i>(29) = 1.92, <i>p</i> = 0.065");
        assert_eq!(
            chi2_line(6.4702, 2.0, 30, 0.0393),
            "&chi;<sup>2</sup>(2, <i>N</i> = 30) = 6.47, <i>p</i> = 0.039"
        );
        assert_eq!(rank_line("U", 51.0, 0.011), "<i>U</i> = 51, <i>p</i> = 0.011");
    }

    #[test]
    fn test_html_table_spacing() {
        let table = html_table(&[
            vec!["Mean".to_string(), "3.1438".to_string()],
            vec!["Median".to_string(), "2.8545".to_string()],
        ]);
        assert!(table.contains("<td>Mean</td>      <td>3.1438</td>"));
        assert!(table.contains("</tr>    <tr>"));
    }
}

// src/report.rs
