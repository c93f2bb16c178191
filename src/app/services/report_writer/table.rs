//! GitHub-style pipe tables for console output
//!
//! ```text
//! | Nodes   |   Q (CFS) |   TC (min) |
//! |---------|-----------|------------|
//! | 101-102 |      4.26 |      17.00 |
//! ```
//!
//! Text columns are left-aligned and numeric columns right-aligned, headers
//! included. Cells are padded by one space on each side.

use super::{format_number, node_label};
use crate::app::models::{RationalMethodRecord, UnitHydrographRecord};
use crate::constants::{RATIONAL_METHOD_HEADERS, UNIT_HYDROGRAPH_HEADERS};

/// Column alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// A console table with a fixed set of columns
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    aligns: Vec<Align>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: &[(&str, Align)]) -> Self {
        Self {
            headers: columns.iter().map(|(h, _)| h.to_string()).collect(),
            aligns: columns.iter().map(|(_, a)| *a).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; missing cells render empty and extra cells are dropped
    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table, one line per row, without a trailing newline
    pub fn render(&self) -> String {
        let widths: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .map(|(col, header)| {
                self.rows
                    .iter()
                    .map(|row| row[col].chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(self.render_row(&self.headers, &widths));
        let separator: Vec<String> = widths.iter().map(|w| "-".repeat(w + 2)).collect();
        lines.push(format!("|{}|", separator.join("|")));
        for row in &self.rows {
            lines.push(self.render_row(row, &widths));
        }
        lines.join("\n")
    }

    fn render_row(&self, cells: &[String], widths: &[usize]) -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .zip(&self.aligns)
            .map(|((cell, width), align)| match align {
                Align::Left => format!(" {:<width$} ", cell, width = width),
                Align::Right => format!(" {:>width$} ", cell, width = width),
            })
            .collect();
        format!("|{}|", padded.join("|"))
    }
}

/// Console table of rational method records
pub fn rational_method_table(records: &[RationalMethodRecord], digits: usize) -> Table {
    let [nodes, flow, tc] = RATIONAL_METHOD_HEADERS;
    let mut table = Table::new(&[(nodes, Align::Left), (flow, Align::Right), (tc, Align::Right)]);
    for record in records {
        table.push_row(vec![
            node_label(record),
            format_number(record.flow_rate_cfs, digits),
            format_number(record.time_of_concentration_min, digits),
        ]);
    }
    table
}

/// Console table of unit hydrograph records
pub fn unit_hydrograph_table(records: &[UnitHydrographRecord], digits: usize) -> Table {
    let [file, flow, volume] = UNIT_HYDROGRAPH_HEADERS;
    let mut table = Table::new(&[
        (file, Align::Left),
        (flow, Align::Right),
        (volume, Align::Right),
    ]);
    for record in records {
        table.push_row(vec![
            record.source_file_name.clone(),
            format_number(record.peak_flow_cfs, digits),
            format_number(record.peak_volume_acre_ft, digits),
        ]);
    }
    table
}
