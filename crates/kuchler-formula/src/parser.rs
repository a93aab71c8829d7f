//! Read physiognomic matrices from command-line cells and JSON/TOML files.

use std::collections::BTreeMap;
use std::path::Path;

use kuchler_core::matrix::PhysiognomicMatrix;

use crate::types::FormulaError;

/// Parse inline `KEY=CODE` cells (e.g. `D4=p`).
///
/// Each argument may hold several comma-separated cells (`D4=p,D3=i`).
/// Repeating a key is an error.
pub fn parse_cells<S: AsRef<str>>(args: &[S]) -> Result<PhysiognomicMatrix, FormulaError> {
    let mut pairs = Vec::new();
    for arg in args {
        for cell in arg.as_ref().split(',').map(str::trim).filter(|c| !c.is_empty()) {
            let (key, code) = cell.split_once('=').ok_or_else(|| {
                FormulaError::Parse(format!("invalid cell '{}': expected KEY=CODE", cell))
            })?;
            pairs.push((key, code));
        }
    }
    Ok(PhysiognomicMatrix::from_pairs(pairs)?)
}

/// Parse a matrix from a JSON object of cell → code.
pub fn parse_json(content: &str) -> Result<PhysiognomicMatrix, FormulaError> {
    let raw: BTreeMap<String, String> =
        serde_json::from_str(content).map_err(|e| FormulaError::Parse(e.to_string()))?;
    Ok(PhysiognomicMatrix::try_from(raw)?)
}

/// Parse a matrix from a TOML table of cell → code.
pub fn parse_toml(content: &str) -> Result<PhysiognomicMatrix, FormulaError> {
    let raw: BTreeMap<String, String> =
        toml::from_str(content).map_err(|e| FormulaError::Parse(e.to_string()))?;
    Ok(PhysiognomicMatrix::try_from(raw)?)
}

/// Load a matrix from a file (auto-detect TOML vs JSON by extension).
pub fn load_matrix(path: &Path) -> Result<PhysiognomicMatrix, FormulaError> {
    let content = std::fs::read_to_string(path)?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => parse_toml(&content),
        Some("json") => parse_json(&content),
        // Try JSON first, then TOML
        _ => parse_json(&content).or_else(|_| parse_toml(&content)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kuchler_core::matrix::MatrixError;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_inline_cells() {
        let m = parse_cells(&["D4=p", " D3 = i ", "K3=p,F3=h"]).unwrap();
        assert_eq!(m.len(), 4);
        assert_eq!(crate::build_formula(&m), "D4p3iK3p");
    }

    #[test]
    fn parse_cells_rejects_missing_separator() {
        let err = parse_cells(&["D4p"]).unwrap_err();
        assert!(err.to_string().contains("expected KEY=CODE"), "{err}");
    }

    #[test]
    fn parse_cells_reports_offending_cell() {
        let err = parse_cells(&["D4=p", "D3=q"]).unwrap_err();
        match err {
            FormulaError::Matrix(MatrixError::InvalidCoverage { key, code }) => {
                assert_eq!(key, "D3");
                assert_eq!(code, "q");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn parse_cells_rejects_short_key() {
        let err = parse_cells(&["D=p"]).unwrap_err();
        assert!(matches!(err, FormulaError::Matrix(MatrixError::InvalidKey { .. })));
    }

    #[test]
    fn parse_cells_rejects_repeated_key() {
        let err = parse_cells(&["D4=p", "D4=c"]).unwrap_err();
        assert!(matches!(err, FormulaError::Matrix(MatrixError::DuplicateCell { .. })));
    }

    #[test]
    fn parse_json_matrix() {
        let m = parse_json(r#"{"D4": "c", "D3": "i"}"#).unwrap();
        assert_eq!(crate::build_formula(&m), "D43i");
        assert!(matches!(parse_json("[1, 2]"), Err(FormulaError::Parse(_))));
    }

    #[test]
    fn parse_toml_matrix() {
        let m = parse_toml("D4 = \"p\"\nD3 = \"i\"\nD2 = \"i\"\n").unwrap();
        assert_eq!(crate::build_formula(&m), "D4p32i");
    }

    #[test]
    fn load_matrix_by_extension_and_fallback() {
        let dir = tempfile::tempdir().unwrap();

        let json = dir.path().join("plot.json");
        std::fs::write(&json, r#"{"B8": "c"}"#).unwrap();
        assert_eq!(crate::build_formula(&load_matrix(&json).unwrap()), "B8");

        let other = dir.path().join("plot.matrix");
        std::fs::write(&other, "G1 = \"r\"\n").unwrap();
        assert_eq!(crate::build_formula(&load_matrix(&other).unwrap()), "G1r");

        let missing = dir.path().join("nope.json");
        assert!(matches!(load_matrix(&missing), Err(FormulaError::Io(_))));
    }
}
