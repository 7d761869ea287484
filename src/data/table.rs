//! In-memory columnar sample store.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

use ndarray::{Array2, ArrayView1};

use crate::data::{ColumnLabel, DataSource};
use crate::error::{PlotError, Result};

/// A growable table of numeric samples.
///
/// Rows are samples; columns are the source's coordinate columns followed
/// by its value columns. Appends go through a `RefCell` so a producer can
/// keep pushing rows while plots hold shared references to the source
/// (single-threaded event-loop model, no locking).
#[derive(Debug)]
pub struct TableSource {
    name: String,
    coordinate_count: usize,
    labels: Vec<ColumnLabel>,
    rows: RefCell<Array2<f64>>,
}

impl TableSource {
    /// Create an empty source with default column labels.
    pub fn new(name: impl Into<String>, coordinate_count: usize, value_count: usize) -> Self {
        let columns = coordinate_count + value_count;
        Self {
            name: name.into(),
            coordinate_count,
            labels: (0..columns).map(default_label).collect(),
            rows: RefCell::new(Array2::zeros((0, columns))),
        }
    }

    /// Replace the column labels. Extra labels are ignored; missing ones
    /// keep their defaults.
    pub fn with_labels(mut self, labels: Vec<ColumnLabel>) -> Self {
        for (slot, label) in self.labels.iter_mut().zip(labels) {
            *slot = label;
        }
        self
    }

    /// Set the label of a single column. Out-of-range indices are ignored.
    pub fn set_column_label(&mut self, column: usize, label: ColumnLabel) {
        if let Some(slot) = self.labels.get_mut(column) {
            *slot = label;
        }
    }

    /// Load a source from a whitespace-separated column text file.
    ///
    /// Lines starting with `#` are comments; two directive forms are
    /// recognized:
    ///
    /// ```text
    /// # coordinates: 2
    /// # column 0: frequency (Hz)
    /// ```
    ///
    /// The column count is taken from the first data row (or from the
    /// highest column directive when the file holds no data yet); the
    /// coordinate count defaults to 1.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|err| PlotError::file_open(path.to_path_buf(), err))?;

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "data".to_string());

        let mut coordinate_count: Option<usize> = None;
        let mut directives: HashMap<usize, ColumnLabel> = HashMap::new();
        let mut flat: Vec<f64> = Vec::new();
        let mut columns: Option<usize> = None;
        let mut nrows = 0usize;

        for (index, line) in text.lines().enumerate() {
            let lineno = index + 1;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(comment) = line.strip_prefix('#') {
                parse_directive(comment, &mut coordinate_count, &mut directives);
                continue;
            }

            let mut row: Vec<f64> = Vec::new();
            for field in line.split_whitespace() {
                let value: f64 = field.parse().map_err(|_| {
                    PlotError::parse(
                        path.to_path_buf(),
                        lineno,
                        format!("not a number: '{}'", field),
                    )
                })?;
                row.push(value);
            }

            match columns {
                None => columns = Some(row.len()),
                Some(width) if width != row.len() => {
                    return Err(PlotError::parse(
                        path.to_path_buf(),
                        lineno,
                        format!("expected {} fields, found {}", width, row.len()),
                    ));
                }
                Some(_) => {}
            }
            flat.extend(row);
            nrows += 1;
        }

        let columns = match columns {
            Some(width) => width,
            // Header-only files still describe their schema.
            None => match directives.keys().max() {
                Some(&max) => max + 1,
                None => {
                    return Err(PlotError::parse(
                        path.to_path_buf(),
                        0,
                        "no data rows and no column directives",
                    ));
                }
            },
        };

        let coordinate_count = coordinate_count.unwrap_or(1).min(columns);
        let rows = Array2::from_shape_vec((nrows, columns), flat).map_err(|err| {
            PlotError::parse(path.to_path_buf(), 0, format!("bad table shape: {}", err))
        })?;

        tracing::debug!(
            "Loaded {} rows x {} columns from {}",
            nrows,
            columns,
            path.display()
        );

        let mut source = Self {
            name,
            coordinate_count,
            labels: (0..columns).map(default_label).collect(),
            rows: RefCell::new(rows),
        };
        for (column, label) in directives {
            source.set_column_label(column, label);
        }
        Ok(source)
    }

    /// Append one sample row. The row must have exactly one field per
    /// column.
    pub fn push_row(&self, row: &[f64]) -> Result<()> {
        let expected = self.column_count();
        if row.len() != expected {
            return Err(PlotError::Shape {
                source_name: self.name.clone(),
                expected,
                got: row.len(),
            });
        }
        self.rows
            .borrow_mut()
            .push_row(ArrayView1::from(row))
            .map_err(|_| PlotError::Shape {
                source_name: self.name.clone(),
                expected,
                got: row.len(),
            })
    }

    /// Append a block of sample rows.
    pub fn push_rows(&self, rows: &[Vec<f64>]) -> Result<()> {
        for row in rows {
            self.push_row(row)?;
        }
        Ok(())
    }

    /// Number of sample rows currently stored.
    pub fn row_count(&self) -> usize {
        self.rows.borrow().nrows()
    }

    /// Snapshot of one column, or `None` when out of range.
    pub fn column(&self, column: usize) -> Option<Vec<f64>> {
        if column >= self.column_count() {
            return None;
        }
        Some(self.rows.borrow().column(column).to_vec())
    }
}

impl DataSource for TableSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn coordinate_count(&self) -> usize {
        self.coordinate_count
    }

    fn value_count(&self) -> usize {
        self.labels.len() - self.coordinate_count
    }

    fn format_label(&self, column: usize) -> String {
        match self.labels.get(column) {
            Some(label) => label.format(),
            None => default_label(column).format(),
        }
    }
}

fn default_label(column: usize) -> ColumnLabel {
    ColumnLabel::new(format!("col{}", column))
}

/// Parse one `#` comment line, updating the coordinate count or the column
/// label directives when the line matches a known form.
fn parse_directive(
    comment: &str,
    coordinate_count: &mut Option<usize>,
    directives: &mut HashMap<usize, ColumnLabel>,
) {
    let comment = comment.trim();
    if let Some(rest) = comment.strip_prefix("coordinates:") {
        if let Ok(count) = rest.trim().parse() {
            *coordinate_count = Some(count);
        }
        return;
    }
    if let Some(rest) = comment.strip_prefix("column ") {
        let mut parts = rest.splitn(2, ':');
        let index: usize = match parts.next().and_then(|s| s.trim().parse().ok()) {
            Some(index) => index,
            None => return,
        };
        let text = match parts.next() {
            Some(text) => text.trim(),
            None => return,
        };
        if text.is_empty() {
            return;
        }
        let label = match text.rfind('(') {
            Some(open) if text.ends_with(')') => {
                let name = text[..open].trim();
                let unit = &text[open + 1..text.len() - 1];
                if name.is_empty() {
                    ColumnLabel::new(text)
                } else {
                    ColumnLabel::with_unit(name, unit)
                }
            }
            _ => ColumnLabel::new(text),
        };
        directives.insert(index, label);
    }
}
