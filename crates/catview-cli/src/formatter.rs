//! Output formatters for catalog views.

use catview_core::{Class, DomainRepr, LoadReport, Object, ObjectDetail, Selection, Subclass};
use clap::ValueEnum;
use comfy_table::Table;

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format
    Table,
    /// JSON format
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Trait for formatting output.
pub trait Formatter: Send + Sync {
    fn format_classes(&self, classes: &[Class]) -> String;

    fn format_subclasses(&self, subclasses: &[Subclass]) -> String;

    fn format_objects(&self, objects: &[Object]) -> String;

    /// Format an object's attribute sheet.
    fn format_detail(&self, detail: &ObjectDetail) -> String;

    fn format_selection(&self, selection: &Selection) -> String;

    /// Format the load summary.
    fn format_report(&self, report: &LoadReport) -> String;

    fn format_error(&self, error: &str) -> String;

    fn format_message(&self, message: &str) -> String;
}

/// Create a formatter for the given output format.
pub fn create_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Table => Box::new(TableFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}

/// Table formatter using comfy-table.
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_classes(&self, classes: &[Class]) -> String {
        list_table(
            &["id", "class"],
            classes.iter().map(|c| vec![c.id.clone(), c.name.clone()]),
        )
    }

    fn format_subclasses(&self, subclasses: &[Subclass]) -> String {
        list_table(
            &["id", "subclass", "class"],
            subclasses
                .iter()
                .map(|s| vec![s.id.clone(), s.name.clone(), s.class_id.clone()]),
        )
    }

    fn format_objects(&self, objects: &[Object]) -> String {
        list_table(
            &["id", "object", "geometry"],
            objects
                .iter()
                .map(|o| vec![o.id.clone(), o.name.clone(), o.geometry.clone()]),
        )
    }

    fn format_detail(&self, detail: &ObjectDetail) -> String {
        let mut table = Table::new();
        table.set_header(vec!["attribute", "definition", "type", "domain", "notes"]);

        for row in &detail.attributes {
            table.add_row(vec![
                format!("{} ({})", row.name, row.id),
                row.definition.clone(),
                row.type_label.clone().unwrap_or_default(),
                format_domain(&row.domain),
                row.notes.clone().unwrap_or_default(),
            ]);
        }

        format!(
            "{} ({})\nDefinition: {}\nGeometry: {}\n{}\n{} attribute(s)",
            detail.name,
            detail.id,
            detail.definition,
            detail.geometry,
            table,
            detail.attributes.len()
        )
    }

    fn format_selection(&self, selection: &Selection) -> String {
        let show = |id: &Option<String>| id.clone().unwrap_or_else(|| "-".to_string());
        format!(
            "class: {}\nsubclass: {}\nobject: {}",
            show(&selection.class),
            show(&selection.subclass),
            show(&selection.object)
        )
    }

    fn format_report(&self, report: &LoadReport) -> String {
        let mut table = Table::new();
        table.set_header(vec!["table", "rows", "ignored"]);
        for entry in &report.tables {
            table.add_row(vec![
                entry.table.to_string(),
                entry.accepted.to_string(),
                entry.ignored.to_string(),
            ]);
        }
        table.to_string()
    }

    fn format_error(&self, error: &str) -> String {
        format!("Error: {}", error)
    }

    fn format_message(&self, message: &str) -> String {
        message.to_string()
    }
}

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_classes(&self, classes: &[Class]) -> String {
        to_json(classes)
    }

    fn format_subclasses(&self, subclasses: &[Subclass]) -> String {
        to_json(subclasses)
    }

    fn format_objects(&self, objects: &[Object]) -> String {
        to_json(objects)
    }

    fn format_detail(&self, detail: &ObjectDetail) -> String {
        to_json(detail)
    }

    fn format_selection(&self, selection: &Selection) -> String {
        to_json(selection)
    }

    fn format_report(&self, report: &LoadReport) -> String {
        to_json(report)
    }

    fn format_error(&self, error: &str) -> String {
        serde_json::json!({
            "error": error
        })
        .to_string()
    }

    fn format_message(&self, message: &str) -> String {
        serde_json::json!({
            "message": message
        })
        .to_string()
    }
}

fn list_table(headers: &[&str], rows: impl Iterator<Item = Vec<String>>) -> String {
    let mut table = Table::new();
    table.set_header(headers.to_vec());

    let mut count = 0;
    for row in rows {
        table.add_row(row);
        count += 1;
    }

    if count == 0 {
        return "No results".to_string();
    }
    format!("{}\n{} row(s)", table, count)
}

/// Render a domain as `code: label` lines, or the scalar tag in angle brackets.
fn format_domain(domain: &DomainRepr) -> String {
    match domain {
        DomainRepr::Enumerated(entries) => entries
            .iter()
            .map(|e| format!("{}: {}", e.code, e.label))
            .collect::<Vec<_>>()
            .join("\n"),
        DomainRepr::Scalar(tag) => format!("<{}>", tag),
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
}
