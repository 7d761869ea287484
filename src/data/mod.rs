//! Data sources feeding plots.
//!
//! A [`DataSource`] is a column-structured stream of numeric samples: a
//! fixed set of coordinate columns followed by value columns, growing row
//! by row as an acquisition runs. Sources are shared between plots (and
//! with the producing acquisition loop) via [`SharedSource`].

mod table;

pub use table::TableSource;

use std::rc::Rc;

/// Name and optional unit of one source column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLabel {
    /// Column name, e.g. `"voltage"`.
    pub name: String,
    /// Physical unit, e.g. `"mV"`.
    pub unit: Option<String>,
}

impl ColumnLabel {
    /// Create a label with a name only.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit: None,
        }
    }

    /// Create a label with a name and a unit.
    pub fn with_unit(name: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit: Some(unit.into()),
        }
    }

    /// Render the label as axis text, `"name (unit)"` when a unit is set.
    pub fn format(&self) -> String {
        match &self.unit {
            Some(unit) => format!("{} ({})", self.name, unit),
            None => self.name.clone(),
        }
    }
}

/// A column-structured stream of numeric samples.
///
/// Columns are indexed globally: coordinates first, then values. A source
/// with 2 coordinate and 3 value columns has columns `0..5`, the first
/// value column being index 2.
pub trait DataSource {
    /// Name of the source, used in log messages and errors.
    fn name(&self) -> &str;

    /// Number of coordinate columns.
    fn coordinate_count(&self) -> usize;

    /// Number of value columns.
    fn value_count(&self) -> usize;

    /// Total number of columns.
    fn column_count(&self) -> usize {
        self.coordinate_count() + self.value_count()
    }

    /// Axis-label text for a column. Out-of-range columns fall back to a
    /// generic `col<n>` label; sources do not re-validate indices after
    /// binding time.
    fn format_label(&self, column: usize) -> String;
}

/// A data source shared between its producer and any number of plots.
pub type SharedSource = Rc<dyn DataSource>;
