pub mod addr;
pub mod grid;

pub use addr::{col_index, col_name, AddressParseError, CellAddress, Range, RangeParseError};
pub use grid::{Grid, Row, RowId};
