//! Board state representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '_' | '-' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    /// Base-3 digit used for state encoding (Empty=0, X=1, O=2).
    pub fn digit(self) -> usize {
        match self {
            Cell::Empty => 0,
            Cell::X => 1,
            Cell::O => 2,
        }
    }

    pub fn from_digit(digit: usize) -> Option<Cell> {
        match digit {
            0 => Some(Cell::Empty),
            1 => Some(Cell::X),
            2 => Some(Cell::O),
            _ => None,
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// Immutable snapshot of a square board.
///
/// Positions are row-major: position `p` lives at row `p / size`, column
/// `p % size`. Two snapshots are equal iff their sizes and all cells match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState {
    size: usize,
    cells: Vec<Cell>,
}

impl BoardState {
    /// Create an empty `size × size` board.
    pub fn new(size: usize) -> Self {
        BoardState {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    /// Create a board from a row-major cell vector.
    ///
    /// # Errors
    ///
    /// Returns error if the cell count is not `size²`.
    pub fn from_cells(size: usize, cells: Vec<Cell>) -> crate::Result<Self> {
        if cells.len() != size * size || size == 0 {
            return Err(crate::Error::InvalidBoardLength {
                got: cells.len(),
                context: format!("{size}x{size} board"),
            });
        }
        Ok(BoardState { size, cells })
    }

    /// Create a board from a string representation.
    ///
    /// Whitespace and the separators `|` and `/` are ignored; the remaining
    /// characters must form a perfect square. `.`, `_` and `-` mark empty
    /// cells.
    ///
    /// # Examples
    ///
    /// ```
    /// use brainiac::tictactoe::{BoardState, Cell};
    ///
    /// let board = BoardState::from_string("X.O/.X./..O").unwrap();
    /// assert_eq!(board.size(), 3);
    /// assert_eq!(board.cell(2), Some(Cell::O));
    /// ```
    pub fn from_string(s: &str) -> crate::Result<Self> {
        let chars: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|' && *c != '/')
            .collect();

        let size = (chars.len() as f64).sqrt().round() as usize;
        if size == 0 || size * size != chars.len() {
            return Err(crate::Error::InvalidBoardLength {
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let cells = chars
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                    character: c,
                    position: i,
                    context: s.to_string(),
                })
            })
            .collect::<crate::Result<Vec<_>>>()?;

        Ok(BoardState { size, cells })
    }

    /// Side length of the board
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells (`size²`)
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Get cell at position
    pub fn cell(&self, position: usize) -> Option<Cell> {
        self.cells.get(position).copied()
    }

    /// Count cells holding the given value
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Positions of all empty cells, ascending.
    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn is_empty_cell(&self, position: usize) -> bool {
        self.cell(position) == Some(Cell::Empty)
    }

    /// Player whose turn it is, assuming X opens.
    pub fn current_turn(&self) -> Player {
        if self.count(Cell::X) == self.count(Cell::O) {
            Player::X
        } else {
            Player::O
        }
    }

    /// Turn-alternation invariant: piece counts differ by at most one.
    pub fn has_valid_counts(&self) -> bool {
        self.count(Cell::X).abs_diff(self.count(Cell::O)) <= 1
    }

    /// All winning lines (rows, columns, both diagonals) as position lists.
    pub fn lines(&self) -> Vec<Vec<usize>> {
        let n = self.size;
        let mut lines = Vec::with_capacity(2 * n + 2);
        for r in 0..n {
            lines.push((0..n).map(|c| r * n + c).collect());
        }
        for c in 0..n {
            lines.push((0..n).map(|r| r * n + c).collect());
        }
        lines.push((0..n).map(|i| i * n + i).collect());
        lines.push((0..n).map(|i| i * n + (n - 1 - i)).collect());
        lines
    }

    /// Check whether the player owns a complete line
    pub fn has_won(&self, player: Player) -> bool {
        let target = player.to_cell();
        self.lines()
            .iter()
            .any(|line| line.iter().all(|&p| self.cells[p] == target))
    }

    /// The winner, if any. X is checked first.
    pub fn winner(&self) -> Option<Player> {
        [Player::X, Player::O]
            .into_iter()
            .find(|&player| self.has_won(player))
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&c| c != Cell::Empty)
    }

    /// A board is terminal once someone has won or no cell is left.
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// Return a new board with `player` placed at `position`.
    ///
    /// # Errors
    ///
    /// Returns error if the position is off the board or already occupied.
    pub fn with_move(&self, position: usize, player: Player) -> crate::Result<Self> {
        match self.cell(position) {
            None => Err(crate::Error::InvalidPosition {
                position,
                cells: self.cell_count(),
            }),
            Some(Cell::Empty) => {
                let mut next = self.clone();
                next.cells[position] = player.to_cell();
                Ok(next)
            }
            Some(_) => Err(crate::Error::CellOccupied { position }),
        }
    }

    /// Base-3 code of the board, cell 0 being the least significant digit.
    pub fn ternary_code(&self) -> usize {
        self.cells
            .iter()
            .rev()
            .fold(0, |code, cell| code * 3 + cell.digit())
    }

    /// Compact single-line encoding (`X.O.X....`)
    pub fn encode(&self) -> String {
        self.cells.iter().map(|c| c.to_char()).collect()
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.cells.chunks(self.size).enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            let rendered: Vec<String> = row.iter().map(|c| c.to_char().to_string()).collect();
            write!(f, "{}", rendered.join(" | "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_board_has_every_cell_free() {
        let board = BoardState::new(3);
        assert_eq!(board.empty_cells(), (0..9).collect::<Vec<_>>());
        assert_eq!(board.current_turn(), Player::X);
        assert!(!board.is_terminal());
    }

    #[test]
    fn detects_rows_columns_and_diagonals() {
        for s in ["XXX/OO./...", "XO./XO./X..", "XO./.XO/..X", "..X/.X./XOO"] {
            let board = BoardState::from_string(s).unwrap();
            assert_eq!(board.winner(), Some(Player::X), "expected X to win {s}");
        }
        let board = BoardState::from_string("XXO/OOX/XOX").unwrap();
        assert_eq!(board.winner(), None);
        assert!(board.is_full());
        assert!(board.is_terminal());
    }

    #[test]
    fn with_move_rejects_occupied_and_out_of_bounds() {
        let board = BoardState::new(3).with_move(4, Player::X).unwrap();
        assert!(matches!(
            board.with_move(4, Player::O),
            Err(crate::Error::CellOccupied { position: 4 })
        ));
        assert!(matches!(
            board.with_move(9, Player::O),
            Err(crate::Error::InvalidPosition { position: 9, .. })
        ));
        assert_eq!(board.current_turn(), Player::O);
    }

    #[test]
    fn ternary_code_uses_cell_zero_as_lowest_digit() {
        let board = BoardState::from_string("X........").unwrap();
        assert_eq!(board.ternary_code(), 1);
        let board = BoardState::from_string(".O.......").unwrap();
        assert_eq!(board.ternary_code(), 6);
    }

    #[test]
    fn from_string_rejects_non_square_input() {
        assert!(matches!(
            BoardState::from_string("XO.X"),
            Ok(board) if board.size() == 2
        ));
        assert!(matches!(
            BoardState::from_string("XO.X."),
            Err(crate::Error::InvalidBoardLength { got: 5, .. })
        ));
        assert!(matches!(
            BoardState::from_string("XO.X.?..."),
            Err(crate::Error::InvalidCellCharacter { character: '?', .. })
        ));
    }
}
