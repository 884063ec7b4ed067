//! Fixed-width report tables

use std::fmt::Display;
use std::io::{self, Write};

/// Left-aligned columns separated by one space
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<(&'static str, usize)>,
}

impl Table {
    pub fn new(columns: &[(&'static str, usize)]) -> Self {
        Self {
            columns: columns.to_vec(),
        }
    }

    /// Header row followed by a row of dashes under each title
    pub fn write_header<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let titles: Vec<&dyn Display> = self.columns.iter().map(|(t, _)| t as &dyn Display).collect();
        self.write_row(out, &titles)?;
        let dashes: Vec<String> = self.columns.iter().map(|(t, _)| "-".repeat(t.len())).collect();
        let dashes: Vec<&dyn Display> = dashes.iter().map(|d| d as &dyn Display).collect();
        self.write_row(out, &dashes)
    }

    /// Missing trailing cells print empty
    pub fn write_row<W: Write>(&self, out: &mut W, cells: &[&dyn Display]) -> io::Result<()> {
        let mut line = String::new();
        for (i, (_, width)) in self.columns.iter().enumerate() {
            if i > 0 {
                line.push(' ');
            }
            let cell = cells.get(i).map(|c| c.to_string()).unwrap_or_default();
            line.push_str(&format!("{:<width$}", cell, width = *width));
        }
        writeln!(out, "{}", line.trim_end())
    }
}

/// Text for an optional cell
pub fn cell<T: Display>(value: &Option<T>) -> String {
    value.as_ref().map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}
