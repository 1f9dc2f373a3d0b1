use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tabclean_model::Category;
use tabclean_transform::{ColumnQuality, TableReport};

use crate::commands::CleanResult;

pub fn print_summary(result: &CleanResult) {
    println!("Input: {}", result.input.display());
    println!("Output: {}", result.output.display());
    if let Some(path) = &result.report_path {
        println!("Quality report: {}", path.display());
    }
    println!("{}", report_table(&result.report));
}

/// Build the per-column quality table with a totals row.
pub fn report_table(report: &TableReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Category"),
        header_cell("Rows"),
        header_cell("Missing"),
        header_cell("Missing %"),
        header_cell("Failures"),
        header_cell("Unique"),
        header_cell("Min"),
        header_cell("Max"),
        header_cell("Sample"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..=6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for quality in &report.columns {
        table.add_row(quality_row(quality));
    }
    let total_cells = report.rows * report.columns.len();
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(report.rows).add_attribute(Attribute::Bold),
        count_cell(report.total_missing(), Color::Yellow).add_attribute(Attribute::Bold),
        Cell::new(percent(report.total_missing(), total_cells)),
        count_cell(report.total_parse_failures(), Color::Red).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    table
}

fn quality_row(quality: &ColumnQuality) -> Vec<Cell> {
    vec![
        Cell::new(&quality.column),
        category_cell(quality.category),
        Cell::new(quality.rows),
        count_cell(quality.missing, Color::Yellow),
        Cell::new(percent(quality.missing, quality.rows)),
        count_cell(quality.parse_failures, Color::Red),
        Cell::new(quality.unique),
        optional_cell(quality.min.as_deref()),
        optional_cell(quality.max.as_deref()),
        optional_cell(quality.sample.as_deref()),
    ]
}

/// Print the category of each classified name.
pub fn print_classification(plan: &[(String, Category)]) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Column"), header_cell("Category")]);
    apply_table_style(&mut table);
    for (name, category) in plan {
        table.add_row(vec![Cell::new(name), category_cell(*category)]);
    }
    println!("{table}");
}

fn percent(part: usize, whole: usize) -> String {
    if whole == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", part as f64 * 100.0 / whole as f64)
}

fn category_cell(category: Category) -> Cell {
    let color = match category {
        Category::Numeric => Color::Blue,
        Category::Date => Color::Magenta,
        Category::Text => Color::Reset,
    };
    Cell::new(category).fg(color)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).add_attribute(Attribute::Dim)
}
