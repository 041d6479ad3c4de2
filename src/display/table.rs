use crate::api::models::Artwork;
use crate::core::selection::Selection;
use crate::error::AppError;
use crate::utils::text::{single_line, truncate_text_unicode};
use comfy_table::{Attribute, Cell, Color, Table, presets};
use crossterm::terminal;

const PAGE_HEADERS: [&str; 7] = [
    "",
    "Title",
    "Place of Origin",
    "Artist Display",
    "Inscriptions",
    "Start Date",
    "End Date",
];

/// Column widths for the four free-text columns of the artwork table
#[derive(Debug, Clone, Copy, PartialEq)]
struct TextWidths {
    title: usize,
    origin: usize,
    artist: usize,
    inscriptions: usize,
}

/// Formatter and utilities for table display
pub struct TableDisplay {
    max_width: Option<usize>,
    use_colors: bool,
}

impl Default for TableDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl TableDisplay {
    /// Create a new TableDisplay instance
    pub fn new() -> Self {
        Self {
            max_width: Self::detect_terminal_width(),
            use_colors: true,
        }
    }

    /// Detect terminal width
    fn detect_terminal_width() -> Option<usize> {
        match terminal::size() {
            Ok((cols, _rows)) => Some((cols as usize).clamp(40, 200)),
            Err(_) => Some(80),
        }
    }

    /// Create a TableDisplay instance with maximum width setting
    pub fn with_max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }

    /// Set color usage
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Render one page of artworks with a selection marker per row.
    ///
    /// Rows are numbered from 1, the numbers `t <row>` refers to. The header
    /// of the marker column shows `[x]` when every row of the page is
    /// selected.
    pub fn render_page(
        &self,
        records: &[Artwork],
        selection: &Selection,
    ) -> Result<String, AppError> {
        if records.is_empty() {
            return Ok("No artworks on this page.".to_string());
        }

        let mut table = self.new_table();

        let all_selected = selection.count_on(records) == records.len();
        let mut headers = PAGE_HEADERS;
        headers[0] = if all_selected { "[x]" } else { "[ ]" };
        table.set_header(headers.iter().map(|h| self.header_cell(h)));

        let widths = self.text_column_widths();
        for (row, record) in records.iter().enumerate() {
            let selected = selection.contains(record.id);
            let marker = format!("{} {}", if selected { "[x]" } else { "[ ]" }, row + 1);
            let marker_cell = if self.use_colors && selected {
                Cell::new(marker).fg(Color::Green)
            } else {
                Cell::new(marker)
            };

            table.add_row(vec![
                marker_cell,
                Cell::new(self.truncate(&record.title, widths.title)),
                Cell::new(self.truncate(&record.place_of_origin, widths.origin)),
                Cell::new(self.truncate(&record.artist_display, widths.artist)),
                self.dim_cell(self.truncate(&record.inscriptions, widths.inscriptions)),
                Cell::new(format_year(record.date_start)),
                Cell::new(format_year(record.date_end)),
            ]);
        }

        Ok(table.to_string())
    }

    /// Render the selected artworks in selection order
    pub fn render_selection(&self, selection: &Selection) -> Result<String, AppError> {
        if selection.is_empty() {
            return Ok("No artworks selected.".to_string());
        }

        let mut table = self.new_table();
        table.set_header(
            ["#", "ID", "Title", "Artist Display"]
                .iter()
                .map(|h| self.header_cell(h)),
        );

        let widths = self.text_column_widths();
        for (position, record) in selection.records().iter().enumerate() {
            let id_cell = if self.use_colors {
                Cell::new(record.id.to_string()).fg(Color::Cyan)
            } else {
                Cell::new(record.id.to_string())
            };
            table.add_row(vec![
                Cell::new((position + 1).to_string()),
                id_cell,
                Cell::new(self.truncate(&record.title, widths.title + widths.origin)),
                Cell::new(self.truncate(&record.artist_display, widths.artist)),
            ]);
        }

        Ok(table.to_string())
    }

    fn new_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);
        table.set_content_arrangement(comfy_table::ContentArrangement::Dynamic);
        self.configure_table_width(&mut table);
        table
    }

    fn header_cell(&self, text: &str) -> Cell {
        if self.use_colors {
            Cell::new(text)
                .add_attribute(Attribute::Bold)
                .fg(Color::Cyan)
        } else {
            Cell::new(text).add_attribute(Attribute::Bold)
        }
    }

    fn dim_cell(&self, text: String) -> Cell {
        if self.use_colors {
            Cell::new(text).fg(Color::DarkGrey)
        } else {
            Cell::new(text)
        }
    }

    /// Set table width according to terminal width
    fn configure_table_width(&self, table: &mut Table) {
        let terminal_width = self.max_width.unwrap_or(80);
        // borders and padding
        let available_width = if terminal_width > 20 {
            terminal_width - 6
        } else {
            terminal_width.max(40)
        };
        table.set_width(available_width as u16);
    }

    /// Calculate responsive column widths
    fn text_column_widths(&self) -> TextWidths {
        let terminal_width = self.max_width.unwrap_or(80);

        let (title, origin, artist, inscriptions) = if terminal_width < 80 {
            (14, 8, 12, 8)
        } else if terminal_width < 120 {
            (20, 10, 18, 12)
        } else {
            (32, 16, 30, 24)
        };

        TextWidths {
            title,
            origin,
            artist,
            inscriptions,
        }
    }

    fn truncate(&self, text: &str, max_width: usize) -> String {
        truncate_text_unicode(&single_line(text), max_width)
    }
}

/// Years are rendered as-is; an unknown year renders as an empty cell
pub fn format_year(year: Option<i64>) -> String {
    year.map(|y| y.to_string()).unwrap_or_default()
}
