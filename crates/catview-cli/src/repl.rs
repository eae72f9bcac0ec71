//! Interactive shell implementation.

use crate::commands::{self, CommandResult};
use crate::formatter::{self, OutputFormat};
use catview_core::Navigator;
use rustyline::error::ReadlineError;
use rustyline::history::{DefaultHistory, History};
use rustyline::{Config, Editor};
use std::path::PathBuf;

/// Get the history file path.
fn history_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".catview_history")
}

/// Build the prompt from the current selection, e.g. `catview C1/S1> `.
fn prompt(navigator: &Navigator) -> String {
    let selection = navigator.current_selection();
    let path: Vec<&str> = [&selection.class, &selection.subclass, &selection.object]
        .into_iter()
        .filter_map(|id| id.as_deref())
        .collect();

    if path.is_empty() {
        "catview> ".to_string()
    } else {
        format!("catview {}> ", path.join("/"))
    }
}

/// Run the interactive shell.
pub fn run(mut navigator: Navigator, initial_format: OutputFormat) -> anyhow::Result<()> {
    let mut format = initial_format;

    let rl_config = Config::builder()
        .history_ignore_space(true)
        .auto_add_history(true)
        .build();
    let mut rl: Editor<(), DefaultHistory> = Editor::with_config(rl_config)?;

    let hist_path = history_path();
    if hist_path.exists() {
        let _ = rl.load_history(&hist_path);
    }

    println!("catview - Type .help for commands, .exit to quit\n");
    println!(
        "{}",
        formatter::create_formatter(format).format_classes(navigator.classes())
    );

    loop {
        match rl.readline(&prompt(&navigator)) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                let formatter = formatter::create_formatter(format);

                if !commands::is_command(line) {
                    println!("{}", commands::select_next(&mut navigator, &*formatter, line));
                    continue;
                }

                match commands::handle_command(line, &mut navigator, &*formatter, format) {
                    CommandResult::Exit => {
                        println!("Goodbye!");
                        break;
                    }
                    CommandResult::Output(msg) => {
                        println!("{}", msg);
                    }
                    CommandResult::SetFormat(fmt) => {
                        format = fmt;
                        println!("Output format set to {}", format);
                    }
                    CommandResult::ShowHistory => {
                        let history = rl.history();
                        let len = history.len();
                        let start = len.saturating_sub(20);
                        for (i, entry) in history.iter().skip(start).enumerate() {
                            println!("{:4}  {}", start + i + 1, entry);
                        }
                    }
                    CommandResult::Clear => {
                        // ANSI clear screen
                        print!("\x1B[2J\x1B[1;1H");
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    let _ = rl.save_history(&hist_path);

    Ok(())
}
