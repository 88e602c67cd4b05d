use clap::Args;
use heart_risk::error::AppError;
use heart_risk::prediction::encoding::{category_tables, CategoryTable};
use heart_risk::prediction::{
    FeatureColumn, NumericRange, AGE_RANGE, CHOLESTEROL_RANGE, MAX_HR_RANGE, OLDPEAK_RANGE,
    RESTING_BP_RANGE,
};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Args, Debug, Default)]
pub(crate) struct SchemaArgs {
    /// Print the schema as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
struct SchemaView {
    columns: Vec<ColumnView>,
    categories: Vec<CategoryTable>,
}

#[derive(Debug, Serialize)]
struct ColumnView {
    index: usize,
    name: &'static str,
    caption: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    range: Option<NumericRange>,
}

fn numeric_range(column: FeatureColumn) -> Option<NumericRange> {
    match column {
        FeatureColumn::Age => Some(AGE_RANGE),
        FeatureColumn::RestingBp => Some(RESTING_BP_RANGE),
        FeatureColumn::Cholesterol => Some(CHOLESTEROL_RANGE),
        FeatureColumn::MaxHr => Some(MAX_HR_RANGE),
        FeatureColumn::Oldpeak => Some(OLDPEAK_RANGE),
        _ => None,
    }
}

fn schema_view() -> SchemaView {
    SchemaView {
        columns: FeatureColumn::ordered()
            .into_iter()
            .map(|column| ColumnView {
                index: column.index(),
                name: column.name(),
                caption: column.caption(),
                range: numeric_range(column),
            })
            .collect(),
        categories: category_tables(),
    }
}

pub(crate) fn run_schema(args: SchemaArgs) -> Result<(), AppError> {
    let view = schema_view();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.json {
        serde_json::to_writer_pretty(&mut out, &view)?;
        writeln!(out)?;
    } else {
        render_text(&view, &mut out)?;
    }

    Ok(())
}

fn render_text<W: Write>(view: &SchemaView, out: &mut W) -> io::Result<()> {
    writeln!(out, "Feature order")?;
    for column in &view.columns {
        match column.range {
            Some(range) => writeln!(
                out,
                "  {:>2}. {:<15} {} [{} to {}]",
                column.index, column.name, column.caption, range.min, range.max
            )?,
            None => writeln!(
                out,
                "  {:>2}. {:<15} {}",
                column.index, column.name, column.caption
            )?,
        }
    }

    for table in &view.categories {
        writeln!(out, "\n{} ({})", table.caption, table.column)?;
        for option in &table.options {
            writeln!(out, "  {} = {}", option.code, option.label)?;
        }
    }

    Ok(())
}
