//! Spreadsheet-style cell addressing.
//!
//! Columns are named in bijective base-26: there is no zero digit, so
//! 0 = "A", 25 = "Z", 26 = "AA" and there is never an "A0" artifact.
//! Rows are 1-based in the textual form ("A1") and 0-based in the
//! structured types.

use std::fmt;
use std::str::FromStr;

/// Convert a 0-based column index to its letter name.
///
/// 0 = "A", 1 = "B", ..., 25 = "Z", 26 = "AA", 701 = "ZZ", 702 = "AAA".
pub fn col_name(index: u32) -> String {
    let mut name = String::new();
    let mut n = index as u64 + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        name.insert(0, (b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    name
}

/// Convert a column letter name back to its 0-based index.
///
/// Accepts upper or lower case. Inverse of [`col_name`] for every
/// valid name.
pub fn col_index(name: &str) -> Result<u32, AddressParseError> {
    if name.is_empty() {
        return Err(AddressParseError::MissingColumn);
    }
    let mut acc: u32 = 0;
    for b in name.bytes() {
        if !b.is_ascii_alphabetic() {
            return Err(AddressParseError::InvalidColumn);
        }
        let digit = (b.to_ascii_uppercase() - b'A') as u32 + 1;
        acc = acc
            .checked_mul(26)
            .and_then(|a| a.checked_add(digit))
            .ok_or(AddressParseError::InvalidColumn)?;
    }
    Ok(acc - 1)
}

/// A single cell position.
///
/// `row` and `col` are both 0-based; `(0, 0)` renders as "A1".
/// Ordering is row-major: all of row 1 sorts before any of row 2.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    /// 0-based row.
    pub row: u32,
    /// 0-based column.
    pub col: u32,
}

impl CellAddress {
    #[inline]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// The letter part of the address ("A" for column 0).
    pub fn col_name(&self) -> String {
        col_name(self.col)
    }

    /// The 1-based row number used in the textual form.
    #[inline]
    pub const fn row_number(&self) -> u32 {
        self.row + 1
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", col_name(self.col), self.row + 1)
    }
}

impl FromStr for CellAddress {
    type Err = AddressParseError;

    /// Parse "B3"-style text. The column letters and row digits must
    /// account for the whole string, so "A10" can never be read as
    /// "A1" with trailing junk.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AddressParseError::Empty);
        }

        let bytes = s.as_bytes();
        let mut idx = 0;
        while idx < bytes.len() && bytes[idx].is_ascii_alphabetic() {
            idx += 1;
        }
        if idx == 0 {
            return Err(AddressParseError::MissingColumn);
        }
        let col = col_index(&s[..idx])?;

        let row_start = idx;
        while idx < bytes.len() && bytes[idx].is_ascii_digit() {
            idx += 1;
        }
        if idx == row_start {
            return Err(AddressParseError::MissingRow);
        }
        if idx != bytes.len() {
            return Err(AddressParseError::TrailingCharacters);
        }

        let row_number: u32 = s[row_start..idx]
            .parse()
            .map_err(|_| AddressParseError::InvalidRow)?;
        if row_number == 0 {
            return Err(AddressParseError::InvalidRow);
        }

        Ok(Self { row: row_number - 1, col })
    }
}

/// A rectangular, inclusive span of cells.
///
/// Always normalized: `start` is the top-left corner, `end` the
/// bottom-right. A single cell renders without the colon ("B3", not
/// "B3:B3"), matching the range grammar of spreadsheet value APIs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Range {
    pub start: CellAddress,
    pub end: CellAddress,
}

impl Range {
    /// Construct a range from two corners, normalizing if needed.
    pub const fn new(a: CellAddress, b: CellAddress) -> Self {
        let (start_row, end_row) = if a.row <= b.row { (a.row, b.row) } else { (b.row, a.row) };
        let (start_col, end_col) = if a.col <= b.col { (a.col, b.col) } else { (b.col, a.col) };
        Self {
            start: CellAddress::new(start_row, start_col),
            end: CellAddress::new(end_row, end_col),
        }
    }

    /// The range covering exactly one cell.
    pub const fn single(addr: CellAddress) -> Self {
        Self { start: addr, end: addr }
    }

    #[inline]
    pub const fn width(&self) -> u32 {
        self.end.col - self.start.col + 1
    }

    #[inline]
    pub const fn height(&self) -> u32 {
        self.end.row - self.start.row + 1
    }

    #[inline]
    pub const fn is_single_cell(&self) -> bool {
        self.start.row == self.end.row && self.start.col == self.end.col
    }

    #[inline]
    pub const fn contains(&self, addr: CellAddress) -> bool {
        addr.row >= self.start.row
            && addr.row <= self.end.row
            && addr.col >= self.start.col
            && addr.col <= self.end.col
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_cell() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}:{}", self.start, self.end)
        }
    }
}

impl FromStr for Range {
    type Err = RangeParseError;

    /// Parse "A1:C10" or a bare single cell like "B3".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(RangeParseError::Empty);
        }
        match s.split_once(':') {
            None => {
                let addr = s.parse().map_err(RangeParseError::Cell)?;
                Ok(Range::single(addr))
            }
            Some((a, b)) => {
                let start = a.parse().map_err(RangeParseError::Cell)?;
                let end = b.parse().map_err(RangeParseError::Cell)?;
                Ok(Range::new(start, end))
            }
        }
    }
}

/// Why a cell address failed to parse.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AddressParseError {
    Empty,
    MissingColumn,
    InvalidColumn,
    MissingRow,
    InvalidRow,
    TrailingCharacters,
}

impl fmt::Display for AddressParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            AddressParseError::Empty => "empty cell address",
            AddressParseError::MissingColumn => "missing column letters in cell address",
            AddressParseError::InvalidColumn => "invalid column letters in cell address",
            AddressParseError::MissingRow => "missing row number in cell address",
            AddressParseError::InvalidRow => "invalid row number in cell address",
            AddressParseError::TrailingCharacters => "trailing characters after cell address",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for AddressParseError {}

/// Why a range failed to parse.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RangeParseError {
    Empty,
    Cell(AddressParseError),
}

impl fmt::Display for RangeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeParseError::Empty => f.write_str("empty range"),
            RangeParseError::Cell(e) => write!(f, "invalid cell address in range: {e}"),
        }
    }
}

impl std::error::Error for RangeParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RangeParseError::Empty => None,
            RangeParseError::Cell(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_col_name_anchors() {
        assert_eq!(col_name(0), "A");
        assert_eq!(col_name(1), "B");
        assert_eq!(col_name(25), "Z");
        assert_eq!(col_name(26), "AA");
        assert_eq!(col_name(27), "AB");
        assert_eq!(col_name(51), "AZ");
        assert_eq!(col_name(52), "BA");
        assert_eq!(col_name(701), "ZZ");
        assert_eq!(col_name(702), "AAA");
    }

    #[test]
    fn test_col_index_inverse() {
        assert_eq!(col_index("A"), Ok(0));
        assert_eq!(col_index("Z"), Ok(25));
        assert_eq!(col_index("AA"), Ok(26));
        assert_eq!(col_index("ZZ"), Ok(701));
        assert_eq!(col_index("AAA"), Ok(702));
        assert_eq!(col_index("b"), Ok(1));
    }

    #[test]
    fn test_col_index_rejects_garbage() {
        assert_eq!(col_index(""), Err(AddressParseError::MissingColumn));
        assert_eq!(col_index("A1"), Err(AddressParseError::InvalidColumn));
        assert_eq!(col_index("Ä"), Err(AddressParseError::InvalidColumn));
        // Long enough to overflow u32.
        assert_eq!(col_index("AAAAAAAA"), Err(AddressParseError::InvalidColumn));
    }

    #[test]
    fn test_address_display() {
        assert_eq!(CellAddress::new(0, 0).to_string(), "A1");
        assert_eq!(CellAddress::new(9, 26).to_string(), "AA10");
        assert_eq!(CellAddress::new(2, 1).to_string(), "B3");
    }

    #[test]
    fn test_address_parse() {
        assert_eq!("A1".parse(), Ok(CellAddress::new(0, 0)));
        assert_eq!("b3".parse(), Ok(CellAddress::new(2, 1)));
        assert_eq!("AA10".parse(), Ok(CellAddress::new(9, 26)));
        assert_eq!(" C2 ".parse(), Ok(CellAddress::new(1, 2)));
    }

    #[test]
    fn test_address_parse_errors() {
        assert_eq!("".parse::<CellAddress>(), Err(AddressParseError::Empty));
        assert_eq!("12".parse::<CellAddress>(), Err(AddressParseError::MissingColumn));
        assert_eq!("A".parse::<CellAddress>(), Err(AddressParseError::MissingRow));
        assert_eq!("A0".parse::<CellAddress>(), Err(AddressParseError::InvalidRow));
        assert_eq!("A1x".parse::<CellAddress>(), Err(AddressParseError::TrailingCharacters));
        assert_eq!("A1:B2".parse::<CellAddress>(), Err(AddressParseError::TrailingCharacters));
    }

    #[test]
    fn test_address_ordering_is_row_major() {
        let a1 = CellAddress::new(0, 0);
        let z1 = CellAddress::new(0, 25);
        let a2 = CellAddress::new(1, 0);
        assert!(a1 < z1);
        assert!(z1 < a2);
    }

    // "A10" must never compare equal to an address assembled from "A1"
    // plus a stray character, which is exactly what string-keyed cell
    // maps get wrong.
    #[test]
    fn test_address_distinguishes_a1_from_a10() {
        let a10: CellAddress = "A10".parse().expect("valid");
        let a1: CellAddress = "A1".parse().expect("valid");
        assert_ne!(a10, a1);
        assert_eq!(a10.row_number(), 10);
    }

    #[test]
    fn test_range_display_and_parse() {
        let r: Range = "A1:C10".parse().expect("valid");
        assert_eq!(r.start, CellAddress::new(0, 0));
        assert_eq!(r.end, CellAddress::new(9, 2));
        assert_eq!(r.to_string(), "A1:C10");
        assert_eq!(r.width(), 3);
        assert_eq!(r.height(), 10);
        assert!(!r.is_single_cell());
    }

    #[test]
    fn test_range_single_cell_collapses() {
        let r: Range = "B3".parse().expect("valid");
        assert!(r.is_single_cell());
        assert_eq!(r.to_string(), "B3");
        assert_eq!(Range::single(CellAddress::new(2, 1)), r);
    }

    #[test]
    fn test_range_normalizes_corners() {
        let r: Range = "C10:A1".parse().expect("valid");
        assert_eq!(r.to_string(), "A1:C10");
    }

    #[test]
    fn test_range_contains() {
        let r: Range = "B2:D4".parse().expect("valid");
        assert!(r.contains(CellAddress::new(1, 1)));
        assert!(r.contains(CellAddress::new(3, 3)));
        assert!(!r.contains(CellAddress::new(0, 1)));
        assert!(!r.contains(CellAddress::new(1, 4)));
    }

    #[test]
    fn test_range_parse_errors() {
        assert_eq!("".parse::<Range>(), Err(RangeParseError::Empty));
        assert!(matches!(
            "A1:".parse::<Range>(),
            Err(RangeParseError::Cell(AddressParseError::Empty))
        ));
        assert!(matches!(
            ":B2".parse::<Range>(),
            Err(RangeParseError::Cell(AddressParseError::Empty))
        ));
    }
}
