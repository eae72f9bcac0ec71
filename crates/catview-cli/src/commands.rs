//! Shell dot-command handling.

use catview_core::Navigator;

use crate::formatter::{Formatter, OutputFormat};

/// Result of executing a command.
pub enum CommandResult {
    /// Exit the shell.
    Exit,
    /// Output to display.
    Output(String),
    /// Change the output format.
    SetFormat(OutputFormat),
    /// Show history.
    ShowHistory,
    /// Clear screen.
    Clear,
}

/// Check if a line is a dot-command.
pub fn is_command(line: &str) -> bool {
    line.trim().starts_with('.')
}

/// Parse and execute a dot-command.
pub fn handle_command(
    line: &str,
    navigator: &mut Navigator,
    formatter: &dyn Formatter,
    format: OutputFormat,
) -> CommandResult {
    let line = line.trim();
    let parts: Vec<&str> = line.splitn(2, ' ').collect();
    let command = parts[0].to_lowercase();
    let arg = parts.get(1).map(|s| s.trim()).filter(|s| !s.is_empty());

    match command.as_str() {
        ".exit" | ".quit" | ".q" => CommandResult::Exit,

        ".help" | ".h" | ".?" => CommandResult::Output(get_help()),

        ".clear" | ".cls" => CommandResult::Clear,

        ".history" => CommandResult::ShowHistory,

        ".classes" => CommandResult::Output(formatter.format_classes(navigator.classes())),

        ".class" => match arg {
            Some(id) => CommandResult::Output(select_class(navigator, formatter, id)),
            None => CommandResult::Output("Usage: .class <id>".to_string()),
        },

        ".subclass" => match arg {
            Some(id) => CommandResult::Output(select_subclass(navigator, formatter, id)),
            None => CommandResult::Output("Usage: .subclass <id>".to_string()),
        },

        ".object" | ".show" => match arg {
            Some(id) => CommandResult::Output(open_object(navigator, formatter, id)),
            None => CommandResult::Output("Usage: .object <id>".to_string()),
        },

        ".selection" | ".status" => {
            CommandResult::Output(formatter.format_selection(navigator.current_selection()))
        }

        ".reset" => {
            navigator.reset();
            CommandResult::Output(formatter.format_message("Selection cleared"))
        }

        ".stats" => CommandResult::Output(formatter.format_report(navigator.store().report())),

        ".format" => {
            if let Some(fmt) = arg {
                match fmt.to_lowercase().as_str() {
                    "table" => CommandResult::SetFormat(OutputFormat::Table),
                    "json" => CommandResult::SetFormat(OutputFormat::Json),
                    _ => CommandResult::Output(format!(
                        "Unknown format '{}'. Use: table, json",
                        fmt
                    )),
                }
            } else {
                CommandResult::Output(format!("Current format: {}", format))
            }
        }

        _ => CommandResult::Output(format!(
            "Unknown command '{}'. Type .help for available commands.",
            command
        )),
    }
}

/// Select `id` at the first level that has no selection yet.
///
/// Mirrors picking an entry from the list the shell showed last: a class when
/// nothing is selected, then a subclass, then an object.
pub fn select_next(navigator: &mut Navigator, formatter: &dyn Formatter, id: &str) -> String {
    let selection = navigator.current_selection();
    let (has_class, has_subclass) = (selection.class.is_some(), selection.subclass.is_some());

    if !has_class {
        select_class(navigator, formatter, id)
    } else if !has_subclass {
        select_subclass(navigator, formatter, id)
    } else {
        open_object(navigator, formatter, id)
    }
}

fn select_class(navigator: &mut Navigator, formatter: &dyn Formatter, id: &str) -> String {
    if navigator.store().class(id).is_none() {
        return formatter.format_error(&format!("unknown class '{}'", id));
    }
    let subclasses = navigator.select_class(id);
    formatter.format_subclasses(&subclasses)
}

fn select_subclass(navigator: &mut Navigator, formatter: &dyn Formatter, id: &str) -> String {
    if navigator.store().subclass(id).is_none() {
        return formatter.format_error(&format!("unknown subclass '{}'", id));
    }
    let objects = navigator.select_subclass(id);
    formatter.format_objects(&objects)
}

fn open_object(navigator: &mut Navigator, formatter: &dyn Formatter, id: &str) -> String {
    match navigator.open_object(id) {
        Ok(detail) => formatter.format_detail(&detail),
        Err(e) => formatter.format_error(&e.to_string()),
    }
}

/// Get help text.
fn get_help() -> String {
    r#"Shell Commands
==============

.classes              List every class
.class <id>           Select a class and list its subclasses
.subclass <id>        Select a subclass and list its objects
.object <id>          Select an object and show its attribute sheet
.selection            Show the current selection
.reset                Clear the selection
.stats                Show rows loaded and ignored per table
.format [type]        Get or set output format (table, json)
.history              Show command history
.clear                Clear the screen
.help                 Show this help message
.exit / .quit         Exit the shell

Typing a bare id selects it at the next level down:
  C01      -> subclasses of class C01
  S0101    -> objects of subclass S0101
  O010101  -> attribute sheet of object O010101
"#
    .to_string()
}
