//! Core domain types for tic-tac-toe.

use super::action::PlaceError;
use super::coordinate::Coordinate;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{EnumIter, EnumString};
use tracing::{debug, instrument};

/// Player in the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    strum::Display,
)]
#[strum(ascii_case_insensitive)]
pub enum Player {
    /// Player X (goes first unless configured otherwise).
    #[serde(alias = "x")]
    X,
    /// Player O.
    #[serde(alias = "o")]
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    /// Character used in the compact board text.
    pub fn symbol(self) -> char {
        match self {
            Square::Empty => '.',
            Square::Occupied(Player::X) => 'X',
            Square::Occupied(Player::O) => 'O',
        }
    }

    fn from_symbol(c: char) -> Option<Self> {
        match c {
            '.' => Some(Square::Empty),
            'x' | 'X' => Some(Square::Occupied(Player::X)),
            'o' | 'O' => Some(Square::Occupied(Player::O)),
            _ => None,
        }
    }
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Builds a board from squares in row-major order.
    ///
    /// No reachability check is made; the evaluator classifies whatever
    /// it is handed.
    pub fn from_squares(squares: [Square; 9]) -> Self {
        Self { squares }
    }

    /// Gets the square at the given coordinate, `None` when off the board.
    pub fn get(&self, coordinate: Coordinate) -> Option<Square> {
        coordinate.index().map(|i| self.squares[i])
    }

    /// Places a player's mark.
    ///
    /// The board is left untouched when the coordinate is off the board or
    /// the target square already holds a mark.
    #[instrument(skip(self))]
    pub fn place(&mut self, coordinate: Coordinate, player: Player) -> Result<(), PlaceError> {
        let index = coordinate
            .index()
            .ok_or(PlaceError::OutOfRange(coordinate))?;
        if self.squares[index] != Square::Empty {
            debug!(%coordinate, "Target square already occupied");
            return Err(PlaceError::CellOccupied(coordinate));
        }
        self.squares[index] = Square::Occupied(player);
        Ok(())
    }

    /// Checks if a square is empty. Off-board coordinates are never empty.
    pub fn is_empty_at(&self, coordinate: Coordinate) -> bool {
        matches!(self.get(coordinate), Some(Square::Empty))
    }

    /// Counts the squares equal to `square`.
    pub fn count_marks(&self, square: Square) -> usize {
        self.squares.iter().filter(|s| **s == square).count()
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Empty coordinates in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        Coordinate::ALL
            .into_iter()
            .filter(|c| self.is_empty_at(*c))
    }

    /// Returns true when every square holds a mark.
    pub fn is_full(&self) -> bool {
        crate::rules::is_full(self)
    }

    /// Infers whose turn it is from the mark counts.
    ///
    /// The player with fewer marks moves; on equal counts `first` moves.
    pub fn next_player(&self, first: Player) -> Player {
        let x = self.count_marks(Square::Occupied(Player::X));
        let o = self.count_marks(Square::Occupied(Player::O));
        match x.cmp(&o) {
            std::cmp::Ordering::Greater => Player::O,
            std::cmp::Ordering::Less => Player::X,
            std::cmp::Ordering::Equal => first,
        }
    }

    /// Rows for display, empty squares left blank.
    pub fn render(&self) -> [String; 3] {
        self.render_rows(false)
    }

    /// Rows for display, empty squares labelled with their cell number (1-9).
    pub fn render_hinted(&self) -> [String; 3] {
        self.render_rows(true)
    }

    fn render_rows(&self, hints: bool) -> [String; 3] {
        std::array::from_fn(|row| {
            let mut line = String::from("|");
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty if hints => char::from_digit((pos + 1) as u32, 10).unwrap_or(' '),
                    Square::Empty => ' ',
                    Square::Occupied(Player::X) => 'X',
                    Square::Occupied(Player::O) => 'O',
                };
                line.push(' ');
                line.push(symbol);
                line.push_str(" |");
            }
            line
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Compact row-major text, rows separated by `/` (e.g. `XO./.X./..O`).
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, square) in self.squares.iter().enumerate() {
            if i > 0 && i % 3 == 0 {
                write!(f, "/")?;
            }
            write!(f, "{}", square.symbol())?;
        }
        Ok(())
    }
}

/// Error parsing the compact board text.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum BoardParseError {
    /// A character other than a mark, an empty marker or a separator.
    #[display("Unexpected board symbol {:?}", _0)]
    InvalidSymbol(char),

    /// The text did not describe exactly nine squares.
    #[display("Expected 9 squares, found {}", _0)]
    WrongLength(usize),
}

impl std::error::Error for BoardParseError {}

/// Parses nine row-major squares: `X`, `O` (either case) or `.` for empty.
/// Whitespace, `/` and `|` are skipped.
impl FromStr for Board {
    type Err = BoardParseError;

    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let squares = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/' && *c != '|')
            .map(|c| Square::from_symbol(c).ok_or(BoardParseError::InvalidSymbol(c)))
            .collect::<Result<Vec<_>, _>>()?;

        let squares: [Square; 9] = squares
            .try_into()
            .map_err(|v: Vec<Square>| BoardParseError::WrongLength(v.len()))?;
        Ok(Self { squares })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_on_empty_square() {
        let mut board = Board::new();
        board.place(Coordinate::new(1, 1), Player::X).unwrap();
        assert_eq!(board.get(Coordinate::new(1, 1)), Some(Square::Occupied(Player::X)));
        assert_eq!(board.count_marks(Square::Occupied(Player::X)), 1);
        assert_eq!(board.count_marks(Square::Empty), 8);
    }

    #[test]
    fn test_place_out_of_range_leaves_board() {
        let mut board = Board::new();
        let result = board.place(Coordinate::new(3, 0), Player::X);
        assert_eq!(result, Err(PlaceError::OutOfRange(Coordinate::new(3, 0))));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_place_occupied_leaves_board() {
        let mut board = Board::new();
        board.place(Coordinate::new(0, 0), Player::X).unwrap();
        let before = board.clone();

        let result = board.place(Coordinate::new(0, 0), Player::O);
        assert_eq!(result, Err(PlaceError::CellOccupied(Coordinate::new(0, 0))));
        assert_eq!(board, before);
    }

    #[test]
    fn test_is_empty_at_off_board() {
        let board = Board::new();
        assert!(board.is_empty_at(Coordinate::new(2, 2)));
        assert!(!board.is_empty_at(Coordinate::new(0, 3)));
        assert!(!board.is_empty_at(Coordinate::new(7, 7)));
    }

    #[test]
    fn test_render_rows() {
        let board: Board = "X../.O./...".parse().unwrap();
        assert_eq!(
            board.render(),
            [
                "| X |   |   |".to_string(),
                "|   | O |   |".to_string(),
                "|   |   |   |".to_string(),
            ]
        );
        assert_eq!(board.render_hinted()[2], "| 7 | 8 | 9 |");
    }

    #[test]
    fn test_board_text_round_trip() {
        let board: Board = "xo. | .x. | ..o".parse().unwrap();
        assert_eq!(board.to_string(), "XO./.X./..O");
    }

    #[test]
    fn test_board_text_errors() {
        assert_eq!("XO".parse::<Board>(), Err(BoardParseError::WrongLength(2)));
        assert_eq!(
            "XOZ......".parse::<Board>(),
            Err(BoardParseError::InvalidSymbol('Z'))
        );
    }

    #[test]
    fn test_only_dot_marks_empty() {
        assert_eq!(
            "X-O......".parse::<Board>(),
            Err(BoardParseError::InvalidSymbol('-'))
        );
        assert_eq!(
            "X_O......".parse::<Board>(),
            Err(BoardParseError::InvalidSymbol('_'))
        );
    }

    #[test]
    fn test_next_player() {
        let board: Board = "X........".parse().unwrap();
        assert_eq!(board.next_player(Player::X), Player::O);
        assert_eq!(Board::new().next_player(Player::O), Player::O);
        let board: Board = "O........".parse().unwrap();
        assert_eq!(board.next_player(Player::O), Player::X);
    }

    #[test]
    fn test_player_parses_case_insensitively() {
        assert_eq!("x".parse::<Player>().unwrap(), Player::X);
        assert_eq!("O".parse::<Player>().unwrap(), Player::O);
        assert!("z".parse::<Player>().is_err());
    }
}
