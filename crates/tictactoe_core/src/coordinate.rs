//! Board coordinates and parsing of typed moves.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::num::IntErrorKind;
use std::str::FromStr;
use tracing::{debug, instrument};

/// Side length of the board.
pub const SIZE: usize = 3;

/// A zero-based (row, column) pair.
///
/// Components are not range-checked on construction; the board rejects
/// coordinates that fall outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    row: usize,
    col: usize,
}

impl Coordinate {
    /// All nine on-board coordinates in row-major order.
    pub const ALL: [Coordinate; 9] = [
        Coordinate::new(0, 0),
        Coordinate::new(0, 1),
        Coordinate::new(0, 2),
        Coordinate::new(1, 0),
        Coordinate::new(1, 1),
        Coordinate::new(1, 2),
        Coordinate::new(2, 0),
        Coordinate::new(2, 1),
        Coordinate::new(2, 2),
    ];

    /// Creates a coordinate from zero-based components.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Zero-based row.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Zero-based column.
    pub fn col(&self) -> usize {
        self.col
    }

    /// Returns true if both components are in `[0, 2]`.
    pub fn is_on_board(&self) -> bool {
        self.row < SIZE && self.col < SIZE
    }

    /// Row-major index (0-8), `None` when off the board.
    pub fn index(&self) -> Option<usize> {
        self.is_on_board().then(|| self.row * SIZE + self.col)
    }

    /// Creates a coordinate from a row-major index.
    pub fn from_index(index: usize) -> Option<Self> {
        (index < SIZE * SIZE).then(|| Self::new(index / SIZE, index % SIZE))
    }

    /// Steps by the given deltas, `None` if the result leaves the board.
    pub fn offset(&self, d_row: isize, d_col: isize) -> Option<Self> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        let next = Self::new(row, col);
        next.is_on_board().then_some(next)
    }
}

/// Shown one-based, the way players type it.
impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.row + 1, self.col + 1)
    }
}

/// Error turning a line of player input into a coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum InputError {
    /// A token was not an integer.
    #[display("'{}' is not a number; enter a row and a column like \"2 3\"", _0)]
    NonDigitCoordinate(String),

    /// Both tokens were integers but at least one is outside 1-3.
    #[display("Coordinate ({row}, {col}) is off the board; rows and columns run 1-3")]
    CoordinateOutOfRange {
        /// Row as typed.
        row: i64,
        /// Column as typed.
        col: i64,
    },

    /// The line did not hold exactly two tokens.
    #[display("Expected a row and a column, got {} value(s)", _0)]
    MalformedMove(usize),
}

impl std::error::Error for InputError {}

/// Parses a one-based `"<row> <col>"` move into a zero-based coordinate.
///
/// Tokens may be separated by whitespace or a comma.
#[instrument]
pub fn parse_move(line: &str) -> Result<Coordinate, InputError> {
    let tokens: Vec<&str> = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .collect();

    let [row, col] = tokens.as_slice() else {
        return Err(InputError::MalformedMove(tokens.len()));
    };

    let row = parse_component(row)?;
    let col = parse_component(col)?;

    let in_range = |v: i64| (1..=SIZE as i64).contains(&v);
    if !in_range(row) || !in_range(col) {
        debug!(row, col, "Coordinate outside the board");
        return Err(InputError::CoordinateOutOfRange { row, col });
    }

    Ok(Coordinate::new((row - 1) as usize, (col - 1) as usize))
}

/// Integers too large for `i64` saturate, so they still land out of range.
fn parse_component(token: &str) -> Result<i64, InputError> {
    token.parse::<i64>().or_else(|e| match e.kind() {
        IntErrorKind::PosOverflow => Ok(i64::MAX),
        IntErrorKind::NegOverflow => Ok(i64::MIN),
        _ => Err(InputError::NonDigitCoordinate(token.to_string())),
    })
}

impl FromStr for Coordinate {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_move(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_converts_to_zero_based() {
        assert_eq!(parse_move("2 2"), Ok(Coordinate::new(1, 1)));
        assert_eq!(parse_move("  1   3 "), Ok(Coordinate::new(0, 2)));
        assert_eq!(parse_move("3,1"), Ok(Coordinate::new(2, 0)));
    }

    #[test]
    fn test_parse_non_digit() {
        assert_eq!(
            parse_move("a b"),
            Err(InputError::NonDigitCoordinate("a".to_string()))
        );
        assert_eq!(
            parse_move("1 x"),
            Err(InputError::NonDigitCoordinate("x".to_string()))
        );
    }

    #[test]
    fn test_parse_out_of_range() {
        assert_eq!(
            parse_move("4 1"),
            Err(InputError::CoordinateOutOfRange { row: 4, col: 1 })
        );
        assert_eq!(
            parse_move("0 2"),
            Err(InputError::CoordinateOutOfRange { row: 0, col: 2 })
        );
        assert_eq!(
            parse_move("-1 2"),
            Err(InputError::CoordinateOutOfRange { row: -1, col: 2 })
        );
    }

    #[test]
    fn test_parse_overflowing_integer_is_out_of_range() {
        assert_eq!(
            parse_move("99999999999999999999 1"),
            Err(InputError::CoordinateOutOfRange { row: i64::MAX, col: 1 })
        );
        assert_eq!(
            parse_move("2 -99999999999999999999"),
            Err(InputError::CoordinateOutOfRange { row: 2, col: i64::MIN })
        );
    }

    #[test]
    fn test_parse_wrong_token_count() {
        assert_eq!(parse_move(""), Err(InputError::MalformedMove(0)));
        assert_eq!(parse_move("2"), Err(InputError::MalformedMove(1)));
        assert_eq!(parse_move("1 2 3"), Err(InputError::MalformedMove(3)));
    }

    #[test]
    fn test_offset_stops_at_edge() {
        let corner = Coordinate::new(0, 2);
        assert_eq!(corner.offset(1, -1), Some(Coordinate::new(1, 1)));
        assert_eq!(corner.offset(0, 1), None);
        assert_eq!(corner.offset(-1, 0), None);
    }

    #[test]
    fn test_index_round_trip() {
        for (i, c) in Coordinate::ALL.iter().enumerate() {
            assert_eq!(c.index(), Some(i));
            assert_eq!(Coordinate::from_index(i), Some(*c));
        }
        assert_eq!(Coordinate::new(1, 3).index(), None);
        assert_eq!(Coordinate::from_index(9), None);
    }

    #[test]
    fn test_display_is_one_based() {
        assert_eq!(Coordinate::new(0, 2).to_string(), "1 3");
    }
}
