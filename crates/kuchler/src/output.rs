//! Output formatting helpers for the `kuchler` CLI.
//!
//! JSON output, aligned tables, and human-readable plot views.

use std::io::{self, Write};

use serde::Serialize;

use kuchler_core::plot::Plot;
use kuchler_ui::styles::{render_formula, render_muted};

/// JSON view of a plot: its 1-based number plus the stored record.
#[derive(Serialize)]
pub struct PlotView<'a> {
    pub number: usize,
    #[serde(flatten)]
    pub plot: &'a Plot,
}

/// Print a value as pretty-printed JSON to stdout.
///
/// Terminates the process with exit code 1 if serialization fails.
pub fn output_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            // Ignore broken pipe errors (e.g., piped to `head`)
            let _ = writeln!(handle, "{}", json);
        }
        Err(e) => {
            eprintln!("Error: failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print a simple table with headers and rows.
///
/// Column widths are computed in characters so accented text aligns.
pub fn output_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        return;
    }
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let _ = handle.write_all(format_table(headers, rows).as_bytes());
}

fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let mut out = String::new();
    push_row(&mut out, &widths, headers.iter().copied());
    let rules: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &widths, rules.iter().map(String::as_str));
    for row in rows {
        push_row(&mut out, &widths, row.iter().map(String::as_str));
    }
    out
}

fn push_row<'a>(out: &mut String, widths: &[usize], cells: impl Iterator<Item = &'a str>) {
    let mut line = String::new();
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        let width = widths.get(i).copied().unwrap_or(0);
        line.push_str(&format!("{:<width$}", cell));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// One table row per plot: number, date, coordinates, formula.
pub fn plot_rows(plots: &[Plot]) -> Vec<Vec<String>> {
    plots
        .iter()
        .enumerate()
        .map(|(i, p)| {
            vec![
                (i + 1).to_string(),
                format!("{} {}", p.recorded_date, p.recorded_time),
                format!("{:.6}, {:.6}", p.latitude, p.longitude),
                format!("{}", p.altitude),
                p.formula.clone(),
            ]
        })
        .collect()
}

/// Headers matching [`plot_rows`].
pub const PLOT_HEADERS: [&str; 5] = ["#", "RECORDED", "LAT, LON", "ALT", "FORMULA"];

/// Format a plot in detailed multi-line view.
pub fn format_plot_detail(number: usize, plot: &Plot) -> String {
    let mut lines = Vec::new();

    let formula = if plot.formula.is_empty() {
        render_muted("(no formula)")
    } else {
        render_formula(&plot.formula)
    };
    lines.push(format!("Plot #{}  {}", number, formula));
    lines.push(format!(
        "Recorded: {} {}",
        plot.recorded_date, plot.recorded_time
    ));
    lines.push(format!(
        "Position: {}, {} (alt {} m)",
        plot.latitude, plot.longitude, plot.altitude
    ));

    let cells: Vec<String> = plot
        .matrix
        .iter()
        .map(|(key, value)| format!("{}={}", key, value.as_char()))
        .collect();
    lines.push(format!("Matrix: {}", cells.join(" ")));

    let leaves: Vec<String> = plot
        .matrix
        .leaf_cells()
        .map(|(height, leaf)| format!("{} {}", height, leaf.label()))
        .collect();
    if !leaves.is_empty() {
        lines.push(format!("Leaf traits: {}", leaves.join(", ")));
    }

    lines.push(String::new());
    lines.push(plot.description.clone());

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use kuchler_core::matrix::PhysiognomicMatrix;
    use kuchler_core::plot::Coordinates;
    use pretty_assertions::assert_eq;

    fn sample_plot() -> Plot {
        let matrix =
            PhysiognomicMatrix::from_pairs([("D3", "i"), ("D4", "p"), ("F3", "h")]).unwrap();
        let output = kuchler_formula::build(&matrix);
        Plot::new(
            Coordinates { latitude: -15.5, longitude: -47.25, altitude: 1100.0 },
            matrix,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(8, 5, 0).unwrap(),
            output.formula,
            output.description,
        )
    }

    #[test]
    fn table_aligns_by_characters() {
        let rows = vec![
            vec!["1".to_string(), "Cerrado".to_string()],
            vec!["2".to_string(), "Várzea".to_string()],
        ];
        insta::assert_snapshot!(format_table(&["#", "NAME"], &rows), @r"
        #  NAME
        -  -------
        1  Cerrado
        2  Várzea
        ");
    }

    #[test]
    fn plot_rows_are_numbered_from_one() {
        let rows = plot_rows(&[sample_plot()]);
        assert_eq!(rows[0][0], "1");
        assert_eq!(rows[0][1], "01/03/2024 08:05:00");
        assert_eq!(rows[0][4], "D4p3i");
        assert_eq!(rows[0].len(), PLOT_HEADERS.len());
    }

    #[test]
    fn plot_view_flattens_record() {
        let plot = sample_plot();
        let json = serde_json::to_value(PlotView { number: 2, plot: &plot }).unwrap();
        assert_eq!(json["number"], 2);
        assert_eq!(json["formula_kuchler"], "D4p3i");
        assert_eq!(json["matriz_fisionomica"]["F3"], "h");
    }

    #[test]
    fn detail_lists_cells_in_canonical_order() {
        let detail = format_plot_detail(1, &sample_plot());
        assert!(detail.contains("Matrix: D4=p D3=i F3=h"), "{detail}");
        assert!(detail.contains("Recorded: 01/03/2024 08:05:00"));
        assert!(detail.contains("Vegetação em 2 estratos."), "{detail}");
    }

    #[test]
    fn detail_names_leaf_traits() {
        let detail = format_plot_detail(1, &sample_plot());
        assert!(detail.contains("Leaf traits: 3 rígida (esclerófila)\n"), "{detail}");

        let mut plot = sample_plot();
        plot.matrix = PhysiognomicMatrix::from_pairs([("D4", "p")]).unwrap();
        assert!(!format_plot_detail(1, &plot).contains("Leaf traits"));
    }
}
