//! `kuchler classes` -- print the code tables of the notation.

use anyhow::Result;

use kuchler_core::codes::{CoverageClass, GrowthForm, HeightClass, LeafTrait};
use kuchler_ui::styles::{render_accent, render_category, render_coverage};

use crate::cli::{ClassTable, ClassesArgs};
use crate::context::RuntimeContext;
use crate::output::output_json;

/// One entry of a code table. Only height classes carry a metric range.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ClassRow {
    code: char,
    label: &'static str,
    range: Option<&'static str>,
}

impl ClassRow {
    fn new(code: char, label: &'static str) -> Self {
        Self { code, label, range: None }
    }
}

/// Rows of one table. Heights are listed tallest first, as on the field
/// sheet; the other tables keep their canonical order.
fn table(which: ClassTable) -> Vec<ClassRow> {
    match which {
        ClassTable::Forms => {
            GrowthForm::ALL.iter().map(|f| ClassRow::new(f.as_char(), f.label())).collect()
        }
        ClassTable::Heights => HeightClass::tallest_first()
            .map(|h| ClassRow { range: Some(h.range()), ..ClassRow::new(h.as_char(), h.label()) })
            .collect(),
        ClassTable::Coverage => {
            CoverageClass::ALL.iter().map(|c| ClassRow::new(c.as_char(), c.label())).collect()
        }
        ClassTable::Leaf => {
            LeafTrait::ALL.iter().map(|l| ClassRow::new(l.as_char(), l.label())).collect()
        }
    }
}

fn title(which: ClassTable) -> &'static str {
    match which {
        ClassTable::Forms => "growth forms",
        ClassTable::Heights => "height classes",
        ClassTable::Coverage => "coverage classes",
        ClassTable::Leaf => "leaf traits (F row)",
    }
}

fn key(which: ClassTable) -> &'static str {
    match which {
        ClassTable::Forms => "forms",
        ClassTable::Heights => "heights",
        ClassTable::Coverage => "coverage",
        ClassTable::Leaf => "leaf",
    }
}

const ALL_TABLES: [ClassTable; 4] = [
    ClassTable::Forms,
    ClassTable::Heights,
    ClassTable::Coverage,
    ClassTable::Leaf,
];

/// Execute the `kuchler classes` command.
pub fn run(ctx: &RuntimeContext, args: &ClassesArgs) -> Result<()> {
    let tables: Vec<ClassTable> = match args.table {
        Some(t) => vec![t],
        None => ALL_TABLES.to_vec(),
    };

    if ctx.json {
        let map: serde_json::Map<String, serde_json::Value> = tables
            .iter()
            .map(|t| {
                let rows: Vec<_> = table(*t)
                    .into_iter()
                    .map(|row| {
                        let mut value = serde_json::json!({
                            "code": row.code.to_string(),
                            "label": row.label,
                        });
                        if let Some(range) = row.range {
                            value["range"] = range.into();
                        }
                        value
                    })
                    .collect();
                (key(*t).to_string(), serde_json::Value::Array(rows))
            })
            .collect();
        output_json(&map);
        return Ok(());
    }

    for (i, t) in tables.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", render_category(title(*t)));
        for row in table(*t) {
            let code = match CoverageClass::from_char(row.code) {
                Some(c) if *t == ClassTable::Coverage => render_coverage(c),
                _ => render_accent(&row.code.to_string()),
            };
            match row.range {
                Some(range) => println!("  {}  {:<8}  {}", code, range, row.label),
                None => println!("  {}  {}", code, row.label),
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tables_follow_canonical_order() {
        let forms: String = table(ClassTable::Forms).iter().map(|r| r.code).collect();
        assert_eq!(forms, "BDENOSMGHLCKTVXF");
        assert_eq!(table(ClassTable::Coverage)[0], ClassRow::new('c', "contínua (>75%)"));
        assert_eq!(table(ClassTable::Leaf).len(), 5);
        assert!(table(ClassTable::Forms).iter().all(|r| r.range.is_none()));
    }

    #[test]
    fn heights_are_tallest_first_with_ranges() {
        let heights = table(ClassTable::Heights);
        let codes: String = heights.iter().map(|r| r.code).collect();
        assert_eq!(codes, "87654321");
        assert_eq!(
            heights[0],
            ClassRow { code: '8', label: "acima de 35m", range: Some(">35m") }
        );
        assert_eq!(heights[7].range, Some("<0.1m"));
    }
}
