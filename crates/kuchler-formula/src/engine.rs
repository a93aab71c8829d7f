//! Build the Küchler formula and the narrative description of a matrix.

use std::collections::BTreeSet;

use kuchler_core::codes::HeightClass;
use kuchler_core::matrix::PhysiognomicMatrix;

use crate::types::{CoverageGroup, FormGroups, FormulaOutput};

/// Description of a matrix with no cells at all.
pub const NO_DATA: &str = "Sem dados fisionômicos";

/// Groups the coverage cells by form, then by coverage class.
///
/// Relies on the matrix's canonical iteration order (form precedence, then
/// tallest height first): forms come out in precedence order, heights inside
/// a group come out tallest first, and groups are created in the order of
/// their tallest height. A height holds a single coverage per form, so two
/// groups never tie.
pub fn group_by_form(matrix: &PhysiognomicMatrix) -> Vec<FormGroups> {
    let mut forms: Vec<FormGroups> = Vec::new();
    for (key, coverage) in matrix.coverage_cells() {
        if forms.last().map(|fg| fg.form) != Some(key.form) {
            forms.push(FormGroups {
                form: key.form,
                groups: Vec::new(),
            });
        }
        let Some(current) = forms.last_mut() else {
            continue;
        };
        match current.groups.iter_mut().find(|g| g.coverage == coverage) {
            Some(group) => group.heights.push(key.height),
            None => current.groups.push(CoverageGroup {
                coverage,
                heights: vec![key.height],
            }),
        }
    }
    forms
}

/// Builds the compact symbolic formula, e.g. `D4p32iK3p`.
///
/// Per form: the letter, then each coverage group as its heights followed by
/// the coverage letter. The first group omits a continuous (`c`) coverage
/// letter; later groups always write it. The `F` row never contributes.
pub fn build_formula(matrix: &PhysiognomicMatrix) -> String {
    let mut formula = String::new();
    for fg in group_by_form(matrix) {
        formula.push(fg.form.as_char());
        for (i, group) in fg.groups.iter().enumerate() {
            formula.extend(group.heights.iter().map(|h| h.as_char()));
            if i > 0 || !group.coverage.is_implicit() {
                formula.push(group.coverage.as_char());
            }
        }
    }
    formula
}

/// Builds the narrative description of the vegetation.
///
/// An empty matrix yields [`NO_DATA`]; a matrix holding only `F` cells
/// yields the same text with a trailing period.
pub fn build_description(matrix: &PhysiognomicMatrix) -> String {
    if matrix.is_empty() {
        return NO_DATA.to_string();
    }

    let forms = group_by_form(matrix);
    if forms.is_empty() {
        return format!("{NO_DATA}.");
    }

    let strata: BTreeSet<HeightClass> = matrix.coverage_cells().map(|(k, _)| k.height).collect();
    let count = strata.len();
    let noun = if count == 1 { "estrato" } else { "estratos" };

    let phrases: Vec<String> = forms.iter().map(describe_form).collect();
    format!("Vegetação em {count} {noun}. {}.", phrases.join("; "))
}

/// Runs both builders.
pub fn build(matrix: &PhysiognomicMatrix) -> FormulaOutput {
    FormulaOutput {
        formula: build_formula(matrix),
        description: build_description(matrix),
    }
}

fn describe_form(fg: &FormGroups) -> String {
    let parts: Vec<String> = fg
        .groups
        .iter()
        .map(|group| {
            let heights: Vec<&str> = group.heights.iter().map(|h| h.label()).collect();
            format!("{} com cobertura {}", heights.join(", "), group.coverage.name())
        })
        .collect();
    format!("{} {}", fg.form.capitalized_label(), parts.join(" e "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kuchler_core::codes::{CoverageClass, GrowthForm};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn matrix(pairs: &[(&str, &str)]) -> PhysiognomicMatrix {
        PhysiognomicMatrix::from_pairs(pairs.iter().copied()).unwrap()
    }

    // -- build_formula -------------------------------------------------------

    #[test]
    fn formula_empty_matrix() {
        assert_eq!(build_formula(&PhysiognomicMatrix::new()), "");
    }

    #[test]
    fn formula_leaf_row_only() {
        let m = matrix(&[("F3", "h"), ("F5", "l"), ("F8", "s")]);
        assert_eq!(build_formula(&m), "");
    }

    #[test]
    fn formula_elides_sole_continuous_coverage() {
        assert_eq!(build_formula(&matrix(&[("D4", "c")])), "D4");
    }

    #[test]
    fn formula_writes_c_on_later_groups() {
        assert_eq!(build_formula(&matrix(&[("D4", "c"), ("D3", "i")])), "D43i");
        // The continuous group comes second here, so its letter is written.
        assert_eq!(build_formula(&matrix(&[("D4", "i"), ("D3", "c")])), "D4i3c");
    }

    #[test]
    fn formula_orders_groups_by_tallest_height() {
        let m = matrix(&[("D4", "p"), ("D3", "i"), ("D2", "i")]);
        assert_eq!(build_formula(&m), "D4p32i");
    }

    #[test]
    fn formula_docstring_example() {
        let m = matrix(&[("D4", "p"), ("D3", "i"), ("D2", "i"), ("K3", "p")]);
        assert_eq!(build_formula(&m), "D4p32iK3p");
    }

    #[test]
    fn formula_single_group_spans_heights() {
        let m = matrix(&[("B6", "r"), ("B8", "r"), ("B7", "r")]);
        assert_eq!(build_formula(&m), "B876r");
    }

    #[test]
    fn formula_interleaved_groups() {
        // Group p = {7, 3}, group c = {5}: p's tallest (7) leads.
        let m = matrix(&[("E3", "p"), ("E5", "c"), ("E7", "p")]);
        assert_eq!(build_formula(&m), "E73p5c");
    }

    #[test]
    fn formula_forms_follow_precedence_not_input() {
        let m = matrix(&[("X1", "b"), ("G2", "c"), ("B8", "a")]);
        assert_eq!(build_formula(&m), "B8aG2X1b");
    }

    #[test]
    fn formula_ignores_leaf_row() {
        let with_leaves = matrix(&[("D4", "p"), ("F4", "h"), ("F2", "k")]);
        assert_eq!(build_formula(&with_leaves), "D4p");
    }

    // -- build_description ---------------------------------------------------

    #[test]
    fn description_empty_matrix_has_no_period() {
        assert_eq!(build_description(&PhysiognomicMatrix::new()), "Sem dados fisionômicos");
    }

    #[test]
    fn description_leaf_only_matrix_has_period() {
        let m = matrix(&[("F1", "w")]);
        assert_eq!(build_description(&m), "Sem dados fisionômicos.");
    }

    #[test]
    fn description_single_stratum() {
        let m = matrix(&[("D4", "c")]);
        insta::assert_snapshot!(
            build_description(&m),
            @"Vegetação em 1 estrato. Folhas decíduas entre 2-5m com cobertura contínua."
        );
    }

    #[test]
    fn description_docstring_example() {
        let m = matrix(&[("D4", "p"), ("D3", "i"), ("D2", "i"), ("K3", "p")]);
        insta::assert_snapshot!(
            build_description(&m),
            @"Vegetação em 3 estratos. Folhas decíduas entre 2-5m com cobertura porosa e entre 0,5-2m, entre 0,1-0,5m com cobertura interrompida; Caule suculento entre 0,5-2m com cobertura porosa."
        );
    }

    #[test]
    fn description_counts_distinct_heights_across_forms() {
        let m = matrix(&[("B4", "c"), ("G4", "i"), ("H4", "r")]);
        let desc = build_description(&m);
        assert!(desc.starts_with("Vegetação em 1 estrato. "), "{desc}");

        let m = matrix(&[("B4", "c"), ("G3", "i"), ("H2", "r")]);
        assert!(build_description(&m).starts_with("Vegetação em 3 estratos. "));
    }

    #[test]
    fn description_capitalizes_accented_label() {
        let m = matrix(&[("O5", "a")]);
        assert_eq!(
            build_description(&m),
            "Vegetação em 1 estrato. Áfilas entre 5-10m com cobertura ausente."
        );
    }

    #[test]
    fn description_ignores_leaf_row_for_strata() {
        let m = matrix(&[("D4", "p"), ("F7", "h"), ("F1", "s")]);
        let desc = build_description(&m);
        assert!(desc.starts_with("Vegetação em 1 estrato."));
        assert!(!desc.contains("especiais"));
    }

    // -- properties ----------------------------------------------------------

    #[test]
    fn outputs_do_not_depend_on_input_order() {
        let pairs = [
            ("K3", "p"),
            ("D2", "i"),
            ("F3", "h"),
            ("D4", "p"),
            ("B8", "c"),
            ("D3", "i"),
        ];
        let reference = build(&matrix(&pairs));

        for shift in 0..pairs.len() {
            let mut rotated = pairs.to_vec();
            rotated.rotate_left(shift);
            assert_eq!(build(&matrix(&rotated)), reference);
            rotated.reverse();
            assert_eq!(build(&matrix(&rotated)), reference);
        }

        let hashed: HashMap<&str, &str> = pairs.iter().copied().collect();
        let from_hash = PhysiognomicMatrix::try_from(hashed).unwrap();
        assert_eq!(build(&from_hash), reference);
        assert_eq!(reference.formula, "B8D4p32iK3p");
    }

    #[test]
    fn builders_are_idempotent() {
        let m = matrix(&[("M6", "r"), ("M2", "c"), ("C5", "b")]);
        assert_eq!(build_formula(&m), build_formula(&m));
        assert_eq!(build_description(&m), build_description(&m));
    }

    #[test]
    fn group_by_form_shapes() {
        let m = matrix(&[("D4", "p"), ("D3", "i"), ("D2", "i"), ("K3", "p"), ("F2", "h")]);
        let groups = group_by_form(&m);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].form, GrowthForm::D);
        assert_eq!(groups[0].groups.len(), 2);
        assert_eq!(groups[0].groups[0].coverage, CoverageClass::Porous);
        assert_eq!(groups[0].groups[1].coverage, CoverageClass::Interrupted);
        assert_eq!(
            groups[0].groups[1].heights,
            vec![HeightClass::H3, HeightClass::H2]
        );
        assert_eq!(groups[0].groups[1].tallest(), Some(HeightClass::H3));
        assert_eq!(groups[1].form, GrowthForm::K);
    }
}
