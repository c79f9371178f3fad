//! Table formatting utilities for CLI list commands
//!
//! Parts and products share one formatter; each command supplies its own
//! column definitions and rows of typed cells.

use console::style;

use crate::cli::helpers::{escape_csv, format_price, truncate_str};
use crate::cli::OutputFormat;
use crate::entities::SourceKind;

/// A typed cell value with semantic meaning for formatting
#[derive(Debug, Clone)]
pub enum CellValue {
    /// Entity id (cyan)
    Id(u32),
    /// Plain text, truncated to the column width
    Text(String),
    /// Part source with color coding
    Source(SourceKind),
    /// Price with two decimals
    Price(f64),
    /// Integer value, right aligned
    Number(i64),
    /// Inventory level, red when outside min/max
    Stock { level: u32, min: u32, max: u32 },
}

impl CellValue {
    /// Format for TSV output (with colors if terminal)
    pub fn format_tsv(&self, width: usize) -> String {
        match self {
            CellValue::Id(id) => format!("{:<width$}", style(id).cyan(), width = width),
            CellValue::Text(s) => {
                let truncated = truncate_str(s, width.saturating_sub(2));
                format!("{:<width$}", truncated, width = width)
            }
            CellValue::Source(kind) => {
                let s = kind.to_string();
                let styled = match kind {
                    SourceKind::InHouse => style(s).green(),
                    SourceKind::Outsourced => style(s).yellow(),
                };
                format!("{:<width$}", styled, width = width)
            }
            CellValue::Price(p) => format!("{:>width$}", format_price(*p), width = width),
            CellValue::Number(n) => format!("{:>width$}", n, width = width),
            CellValue::Stock { level, min, max } => {
                let s = level.to_string();
                let styled = if level < min || level > max {
                    style(s).red().bold()
                } else if level == min {
                    style(s).yellow()
                } else {
                    style(s).white()
                };
                format!("{:>width$}", styled, width = width)
            }
        }
    }

    /// Format for CSV output (RFC 4180, no colors)
    pub fn format_csv(&self) -> String {
        match self {
            CellValue::Text(s) => escape_csv(s),
            other => other.raw(),
        }
    }

    /// Format for Markdown output (no colors, escaped pipes)
    pub fn format_md(&self) -> String {
        self.raw().replace('|', "\\|")
    }

    /// Get raw string value (no formatting)
    pub fn raw(&self) -> String {
        match self {
            CellValue::Id(id) => id.to_string(),
            CellValue::Text(s) => s.clone(),
            CellValue::Source(kind) => kind.to_string(),
            CellValue::Price(p) => format_price(*p),
            CellValue::Number(n) => n.to_string(),
            CellValue::Stock { level, .. } => level.to_string(),
        }
    }

    /// Get the display width of this cell's content (for dynamic column sizing)
    pub fn display_width(&self) -> usize {
        self.raw().chars().count()
    }
}

/// Column definition with header label and width
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub key: &'static str,
    pub header: &'static str,
    pub width: usize,
}

impl ColumnDef {
    pub const fn new(key: &'static str, header: &'static str, width: usize) -> Self {
        Self { key, header, width }
    }
}

/// A row of cell values for table output
pub struct TableRow {
    pub id: u32,
    pub cells: Vec<(&'static str, CellValue)>,
}

impl TableRow {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            cells: Vec::new(),
        }
    }

    pub fn cell(mut self, key: &'static str, value: CellValue) -> Self {
        self.cells.push((key, value));
        self
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}

/// Table formatter that renders rows in the text formats
pub struct TableFormatter<'a> {
    columns: &'a [ColumnDef],
    entity_name: &'static str,
}

impl<'a> TableFormatter<'a> {
    pub fn new(columns: &'a [ColumnDef], entity_name: &'static str) -> Self {
        Self {
            columns,
            entity_name,
        }
    }

    /// Render rows in the specified format
    pub fn render(&self, rows: &[TableRow], format: OutputFormat, visible_columns: &[&str]) -> String {
        match format {
            OutputFormat::Csv => self.render_csv(rows, visible_columns),
            OutputFormat::Md => self.render_md(rows, visible_columns),
            OutputFormat::Id => rows.iter().map(|r| format!("{}\n", r.id)).collect(),
            _ => self.render_tsv(rows, visible_columns),
        }
    }

    /// Print rows in the specified format
    pub fn output(&self, rows: &[TableRow], format: OutputFormat, visible_columns: &[&str]) {
        print!("{}", self.render(rows, format, visible_columns));
    }

    fn visible(&self, visible_columns: &[&str]) -> Vec<&ColumnDef> {
        self.columns
            .iter()
            .filter(|c| visible_columns.contains(&c.key))
            .collect()
    }

    /// Calculate dynamic column widths based on actual content
    fn calculate_widths(&self, rows: &[TableRow], columns: &[&ColumnDef]) -> Vec<usize> {
        columns
            .iter()
            .map(|col| {
                let max_content = rows
                    .iter()
                    .filter_map(|r| r.get(col.key))
                    .map(|v| v.display_width())
                    .max()
                    .unwrap_or(0);
                // +2 for the truncation buffer, capped at the column's width
                col.header
                    .len()
                    .max(max_content.saturating_add(2))
                    .min(col.width.max(col.header.len()))
            })
            .collect()
    }

    fn render_tsv(&self, rows: &[TableRow], visible_columns: &[&str]) -> String {
        let columns = self.visible(visible_columns);
        let widths = self.calculate_widths(rows, &columns);
        let mut out = String::new();

        let header: Vec<String> = columns
            .iter()
            .zip(&widths)
            .map(|(col, w)| format!("{:<width$}", style(col.header).bold(), width = *w))
            .collect();
        out.push_str(header.join(" ").trim_end());
        out.push('\n');

        let total_width: usize = widths.iter().sum::<usize>() + widths.len().saturating_sub(1);
        out.push_str(&"-".repeat(total_width));
        out.push('\n');

        for row in rows {
            let cells: Vec<String> = columns
                .iter()
                .zip(&widths)
                .map(|(col, w)| match row.get(col.key) {
                    Some(value) => value.format_tsv(*w),
                    None => format!("{:<width$}", "-", width = *w),
                })
                .collect();
            out.push_str(cells.join(" ").trim_end());
            out.push('\n');
        }

        out.push('\n');
        out.push_str(&format!(
            "{} {}(s) found.\n",
            style(rows.len()).cyan(),
            self.entity_name
        ));
        out
    }

    fn render_csv(&self, rows: &[TableRow], visible_columns: &[&str]) -> String {
        let columns = self.visible(visible_columns);
        let mut out = String::new();
        let header: Vec<&str> = columns.iter().map(|c| c.key).collect();
        out.push_str(&header.join(","));
        out.push('\n');
        for row in rows {
            let cells: Vec<String> = columns
                .iter()
                .map(|c| row.get(c.key).map(|v| v.format_csv()).unwrap_or_default())
                .collect();
            out.push_str(&cells.join(","));
            out.push('\n');
        }
        out
    }

    fn render_md(&self, rows: &[TableRow], visible_columns: &[&str]) -> String {
        let columns = self.visible(visible_columns);
        let mut out = String::new();
        let header: Vec<&str> = columns.iter().map(|c| c.header).collect();
        out.push_str(&format!("| {} |\n", header.join(" | ")));
        out.push_str(&format!(
            "|{}|\n",
            columns.iter().map(|_| "---").collect::<Vec<_>>().join("|")
        ));
        for row in rows {
            let cells: Vec<String> = columns
                .iter()
                .map(|c| {
                    row.get(c.key)
                        .map(|v| v.format_md())
                        .unwrap_or_else(|| "-".to_string())
                })
                .collect();
            out.push_str(&format!("| {} |\n", cells.join(" | ")));
        }
        out
    }
}
