//! Line-oriented interactive session over a running table controller.
//!
//! Every command is sent to the controller and the session waits for it to
//! settle before printing, so the screen always shows a consistent snapshot.
//! While the picker is open, input lines are row counts. An empty line
//! closes it, and any other command closes it and runs.

use crate::core::controller::{TableHandle, TableSnapshot};
use crate::core::selection::parse_count;
use crate::core::source::PAGE_SIZE;
use crate::display::{PaginationInfo, TableDisplay};
use crate::error::{AppError, CliError};
use crate::utils::error_helpers::convert_io_to_display_error;
use crate::utils::validation::page_number_to_index;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

pub const HELP_TEXT: &str = "\
Commands:
  n            next page
  p            previous page
  g <page>     go to page
  s <count>    select the first <count> rows from this page onward
  t <row>      toggle one row of this page
  a            toggle every row of this page
  c            clear the selection
  v            view the selection
  o            open the row picker
  h            show this help
  q            quit";

#[derive(Debug, Clone, PartialEq)]
pub enum BrowseCommand {
    Next,
    Previous,
    /// Zero-based page index
    Goto(usize),
    /// Raw count, parsed by the controller
    Select(String),
    /// One-based row number
    Toggle(usize),
    TogglePage,
    Clear,
    ShowSelection,
    OpenPicker,
    Help,
    Quit,
}

impl BrowseCommand {
    pub fn parse(line: &str) -> Result<Self, CliError> {
        let line = line.trim();
        let (word, arg) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match (word, arg) {
            ("n", "") => BrowseCommand::Next,
            ("p", "") => BrowseCommand::Previous,
            ("g", page) if !page.is_empty() => {
                let number = page.parse::<usize>().map_err(|_| {
                    CliError::Input(format!("'{}' is not a page number", page))
                })?;
                let index = page_number_to_index(number)
                    .map_err(|_| CliError::Input("Page numbers start at 1".to_string()))?;
                BrowseCommand::Goto(index)
            }
            ("s", count) if !count.is_empty() => BrowseCommand::Select(count.to_string()),
            ("t", row) if !row.is_empty() => {
                let row = row
                    .parse::<usize>()
                    .map_err(|_| CliError::Input(format!("'{}' is not a row number", row)))?;
                BrowseCommand::Toggle(row)
            }
            ("a", "") => BrowseCommand::TogglePage,
            ("c", "") => BrowseCommand::Clear,
            ("v", "") => BrowseCommand::ShowSelection,
            ("o", "") => BrowseCommand::OpenPicker,
            ("h", "") | ("?", "") => BrowseCommand::Help,
            ("q", "") => BrowseCommand::Quit,
            _ => {
                return Err(CliError::Input(format!(
                    "Unknown command '{}', type h for help",
                    line
                )));
            }
        };
        Ok(command)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Continue(String),
    Quit,
}

pub struct BrowseSession {
    handle: TableHandle,
    display: TableDisplay,
}

impl BrowseSession {
    pub fn new(handle: TableHandle, display: TableDisplay) -> Self {
        Self { handle, display }
    }

    /// Read commands from stdin until `q` or end of input
    pub async fn run(&self) -> Result<(), AppError> {
        let first = self.handle.settle().await?;
        println!("{}", self.render(&first)?);
        println!("Type h for help.");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            let snapshot = self.handle.snapshot().await?;
            print!("{}", prompt(&snapshot));
            std::io::stdout()
                .flush()
                .map_err(|e| convert_io_to_display_error(e, "prompt"))?;

            let Some(line) = lines
                .next_line()
                .await
                .map_err(|e| CliError::Input(e.to_string()))?
            else {
                break;
            };

            match self.handle_line(&line).await? {
                Step::Continue(output) if output.is_empty() => {}
                Step::Continue(output) => println!("{}", output),
                Step::Quit => break,
            }
        }
        Ok(())
    }

    /// Apply one input line; bad commands produce a message, not an error
    pub async fn handle_line(&self, line: &str) -> Result<Step, AppError> {
        let snapshot = self.handle.snapshot().await?;

        if snapshot.picker_open {
            if line.trim().is_empty() {
                self.handle.close_picker()?;
                return Ok(Step::Continue("Picker closed".to_string()));
            }
            if parse_count(line).is_some() {
                return self.execute(BrowseCommand::Select(line.to_string())).await;
            }
            return match BrowseCommand::parse(line) {
                Ok(command) => {
                    self.handle.close_picker()?;
                    self.execute(command).await
                }
                Err(_) => Ok(Step::Continue(not_a_count(line))),
            };
        }

        if line.trim().is_empty() {
            return Ok(Step::Continue(String::new()));
        }

        match BrowseCommand::parse(line) {
            Ok(command) => self.execute(command).await,
            Err(e) => Ok(Step::Continue(e.to_string())),
        }
    }

    pub async fn execute(&self, command: BrowseCommand) -> Result<Step, AppError> {
        let current = self.handle.settle().await?;

        match command {
            BrowseCommand::Next => {
                let info = pagination(&current)?;
                if info.total_records > 0 && info.is_last_page() {
                    return Ok(Step::Continue("Already on the last page".to_string()));
                }
                self.handle.change_page(info.page_index + 1)?;
            }
            BrowseCommand::Previous => {
                let position = position(&current);
                if position == 0 {
                    return Ok(Step::Continue("Already on the first page".to_string()));
                }
                self.handle.change_page(position - 1)?;
            }
            BrowseCommand::Goto(page_index) => self.handle.change_page(page_index)?,
            BrowseCommand::Select(count) => {
                let valid = parse_count(&count).is_some();
                self.handle.open_picker()?;
                self.handle.select_count(count.clone())?;
                if !valid {
                    self.handle.settle().await?;
                    return Ok(Step::Continue(not_a_count(&count)));
                }
            }
            BrowseCommand::Toggle(row) => self.handle.toggle_row(row)?,
            BrowseCommand::TogglePage => self.handle.toggle_page()?,
            BrowseCommand::Clear => self.handle.clear_selection()?,
            BrowseCommand::ShowSelection => {
                return Ok(Step::Continue(format!(
                    "{}\n{} rows selected",
                    self.display.render_selection(&current.selection)?,
                    current.selection.len()
                )));
            }
            BrowseCommand::OpenPicker => {
                self.handle.open_picker()?;
                return Ok(Step::Continue(
                    "Enter the number of rows to select (empty line to cancel)".to_string(),
                ));
            }
            BrowseCommand::Help => return Ok(Step::Continue(HELP_TEXT.to_string())),
            BrowseCommand::Quit => return Ok(Step::Quit),
        }

        let snapshot = self.handle.settle().await?;
        Ok(Step::Continue(self.render(&snapshot)?))
    }

    pub fn render(&self, snapshot: &TableSnapshot) -> Result<String, AppError> {
        let mut out = self
            .display
            .render_page(&snapshot.page.records, &snapshot.selection)?;
        out.push('\n');
        out.push_str(&pagination(snapshot)?.summary());
        out.push_str(&format!("\nSelected: {}", snapshot.selection.len()));
        if !snapshot.status.is_empty() {
            out.push_str(&format!(" | {}", snapshot.status));
        }
        Ok(out)
    }
}

/// Page the user is on: the loaded page, or the requested one while nothing
/// has loaded yet
fn position(snapshot: &TableSnapshot) -> usize {
    if snapshot.page.is_empty() && snapshot.page.total_records == 0 {
        snapshot.requested_page
    } else {
        snapshot.page.page_index
    }
}

fn pagination(snapshot: &TableSnapshot) -> Result<PaginationInfo, AppError> {
    PaginationInfo::new(
        position(snapshot),
        PAGE_SIZE,
        snapshot.page.total_records,
        snapshot.page.len(),
    )
}

fn not_a_count(input: &str) -> String {
    format!(
        "'{}' is not a positive count; enter a number, a command, or an empty line to cancel",
        input.trim()
    )
}

fn prompt(snapshot: &TableSnapshot) -> &'static str {
    if snapshot.picker_open {
        "rows> "
    } else {
        "> "
    }
}
