//! Rectangular grid of string cells with stable row identities.
//!
//! Rows carry a creation-order `RowId` that never changes once
//! assigned. Growing the grid (one row, one column, or a declarative
//! resize) never disturbs existing cell addresses or row ids.

use std::collections::BTreeMap;

use crate::addr::{col_name, CellAddress, Range};

/// Stable identity of a row: its zero-based creation-order position.
///
/// This is a creation-order key, not a display position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(u32);

impl RowId {
    #[inline]
    pub const fn from_raw(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn raw(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row of cells, addressed at the row's own 1-based number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    id: RowId,
    number: u32,
    cells: BTreeMap<CellAddress, String>,
}

impl Row {
    fn blank(id: RowId, number: u32, cols: u32) -> Self {
        let cells = (0..cols)
            .map(|col| (CellAddress::new(number - 1, col), String::new()))
            .collect();
        Self { id, number, cells }
    }

    #[inline]
    pub fn id(&self) -> RowId {
        self.id
    }

    /// The 1-based row number this row's cells are addressed at.
    #[inline]
    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn get(&self, addr: CellAddress) -> Option<&str> {
        self.cells.get(&addr).map(String::as_str)
    }

    /// Cells in address order.
    pub fn cells(&self) -> impl Iterator<Item = (&CellAddress, &str)> {
        self.cells.iter().map(|(a, v)| (a, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// An owned rectangular grid: ordered rows plus a column count.
///
/// Invariant: after any mutation settles, every row holds exactly one
/// value for each column `0..cols()` at its own row number.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Row>,
    cols: u32,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    /// A grid of the given shape with every cell blank.
    pub fn blank(rows: u32, cols: u32) -> Self {
        let rows = (0..rows)
            .map(|r| Row::blank(RowId::from_raw(r), r + 1, cols))
            .collect();
        Self { rows, cols }
    }

    /// Build a grid from fetched row data, one `Row` per data row and
    /// one column entry per element. Ragged input is normalized: the
    /// column count is the longest row's length and shorter rows are
    /// padded with blanks.
    pub fn from_values(values: Vec<Vec<String>>) -> Self {
        let cols = values.iter().map(Vec::len).max().unwrap_or(0) as u32;
        let rows = values
            .into_iter()
            .enumerate()
            .map(|(r, data)| {
                let r = r as u32;
                let mut cells: BTreeMap<CellAddress, String> = data
                    .into_iter()
                    .enumerate()
                    .map(|(c, value)| (CellAddress::new(r, c as u32), value))
                    .collect();
                for c in cells.len() as u32..cols {
                    cells.insert(CellAddress::new(r, c), String::new());
                }
                Row { id: RowId::from_raw(r), number: r + 1, cells }
            })
            .collect();
        Self { rows, cols }
    }

    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows.len() as u32
    }

    #[inline]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, id: RowId) -> Option<&Row> {
        self.rows.iter().find(|r| r.id == id)
    }

    /// Rows in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// Append one row with a blank value at every existing column,
    /// addressed at the new row's own number. Returns the new row's id,
    /// which equals the row count before the append.
    pub fn add_row(&mut self) -> RowId {
        let id = RowId::from_raw(self.rows());
        self.rows.push(Row::blank(id, id.raw() + 1, self.cols));
        id
    }

    /// Add one column: every existing row gains a blank value at the
    /// new column and that row's own row number. Returns the new
    /// column's name.
    pub fn add_column(&mut self) -> String {
        let col = self.cols;
        self.cols += 1;
        for row in &mut self.rows {
            row.cells
                .insert(CellAddress::new(row.number - 1, col), String::new());
        }
        col_name(col)
    }

    /// Grow to at least the target shape, as repeated `add_row` /
    /// `add_column`. Targets at or below the current counts are left
    /// alone; shrinking is never performed here. Returns whether the
    /// shape changed.
    pub fn resize(&mut self, target_rows: u32, target_cols: u32) -> bool {
        let mut changed = false;
        while self.rows() < target_rows {
            self.add_row();
            changed = true;
        }
        while self.cols < target_cols {
            self.add_column();
            changed = true;
        }
        changed
    }

    /// Set the value at `addr` in the row identified by `id`. Returns
    /// whether the edit was applied: an unknown id, or an address not
    /// owned by that row (wrong row number, column beyond the grid),
    /// leaves the grid unchanged.
    pub fn apply_edit(&mut self, id: RowId, addr: CellAddress, value: &str) -> bool {
        if addr.col >= self.cols {
            return false;
        }
        match self.rows.iter_mut().find(|r| r.id == id) {
            Some(row) if addr.row + 1 == row.number => {
                row.cells.insert(addr, value.to_string());
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, addr: CellAddress) -> Option<&str> {
        self.rows
            .iter()
            .find(|r| r.number == addr.row + 1)
            .and_then(|r| r.get(addr))
    }

    /// Rectangular row-major snapshot of all values.
    pub fn to_values(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                (0..self.cols)
                    .map(|c| {
                        row.get(CellAddress::new(row.number - 1, c))
                            .unwrap_or_default()
                            .to_string()
                    })
                    .collect()
            })
            .collect()
    }

    /// The range covering the whole grid, `None` when either dimension
    /// is zero.
    pub fn range(&self) -> Option<Range> {
        if self.rows.is_empty() || self.cols == 0 {
            return None;
        }
        Some(Range::new(
            CellAddress::new(0, 0),
            CellAddress::new(self.rows() - 1, self.cols - 1),
        ))
    }
}
