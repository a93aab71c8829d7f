//! CSV export of plot records.
//!
//! One row per plot. Columns are the plot's field names in lexicographic
//! order, except `descricao_fisionomia`, which is always last so the long
//! free-text column does not split the numeric ones. Fields are quoted
//! RFC 4180 style only when needed.

use std::io::{self, Write};

use crate::plot::Plot;

/// Export columns, in output order.
pub const PLOT_COLUMNS: [&str; 8] = [
    "altitude",
    "data_registro",
    "formula_kuchler",
    "horario_registro",
    "latitude",
    "longitude",
    "matriz_fisionomica",
    "descricao_fisionomia",
];

/// Writes a header line followed by one line per plot.
pub fn write_plots<W: Write>(writer: &mut W, plots: &[Plot]) -> io::Result<()> {
    write_record(writer, PLOT_COLUMNS.iter().copied())?;
    for plot in plots {
        let fields = plot_fields(plot)?;
        write_record(writer, fields.iter().map(String::as_str))?;
    }
    writer.flush()
}

/// The export fields of one plot, in [`PLOT_COLUMNS`] order.
pub fn plot_fields(plot: &Plot) -> io::Result<[String; 8]> {
    let matrix = serde_json::to_string(&plot.matrix)?;
    Ok([
        format_float(plot.altitude),
        plot.recorded_date.clone(),
        plot.formula.clone(),
        plot.recorded_time.clone(),
        format_float(plot.latitude),
        format_float(plot.longitude),
        matrix,
        plot.description.clone(),
    ])
}

/// Formats a number the way the field app's exports did: whole values keep
/// one decimal (`250.0`), others use the shortest round-trip form.
fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

fn write_record<'a, W: Write>(
    writer: &mut W,
    fields: impl Iterator<Item = &'a str>,
) -> io::Result<()> {
    for (i, field) in fields.enumerate() {
        if i > 0 {
            writer.write_all(b",")?;
        }
        writer.write_all(escape_field(field).as_bytes())?;
    }
    writer.write_all(b"\r\n")
}

/// Quotes a field if it contains a delimiter, quote, or line break.
pub fn escape_field(field: &str) -> std::borrow::Cow<'_, str> {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\"")).into()
    } else {
        field.into()
    }
}
