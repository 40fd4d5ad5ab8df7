//! Enumeration and indexing of every valid board configuration

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tictactoe::{BoardState, Cell};

/// Largest board the dense enumeration supports.
///
/// The raw space grows as 3^(size²); a 4×4 board already has 43 million raw
/// codes, so bigger boards need a different state representation.
pub const MAX_BOARD_SIZE: usize = 3;

/// Stable identifier of one valid board within a [`StateSpace`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StateIndex(usize);

impl StateIndex {
    pub fn new(value: usize) -> Self {
        StateIndex(value)
    }

    pub fn value(self) -> usize {
        self.0
    }
}

impl fmt::Display for StateIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Every board of one size whose X and O counts differ by at most one.
///
/// States are ordered by ascending base-3 code (cell 0 is the least
/// significant digit, Empty=0, X=1, O=2), so indices are identical across
/// runs. Lookup goes through a dense table keyed by that code.
#[derive(Debug, Clone)]
pub struct StateSpace {
    board_size: usize,
    states: Vec<BoardState>,
    lookup: Vec<Option<StateIndex>>,
}

impl StateSpace {
    /// Enumerate all valid boards of the given size.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedBoardSize` for sizes outside `1..=MAX_BOARD_SIZE`.
    ///
    /// # Examples
    ///
    /// ```
    /// use brainiac::menace::StateSpace;
    ///
    /// let space = StateSpace::enumerate(3).unwrap();
    /// assert_eq!(space.len(), 8953);
    /// ```
    pub fn enumerate(board_size: usize) -> crate::Result<Self> {
        if board_size == 0 || board_size > MAX_BOARD_SIZE {
            return Err(crate::Error::UnsupportedBoardSize {
                size: board_size,
                max: MAX_BOARD_SIZE,
            });
        }

        let cell_count = board_size * board_size;
        let raw_count = 3usize.pow(cell_count as u32);
        let mut states = Vec::new();
        let mut lookup = vec![None; raw_count];

        for code in 0..raw_count {
            let cells = decode(code, cell_count);
            let x = cells.iter().filter(|&&c| c == Cell::X).count();
            let o = cells.iter().filter(|&&c| c == Cell::O).count();
            if x.abs_diff(o) > 1 {
                continue;
            }
            lookup[code] = Some(StateIndex(states.len()));
            states.push(BoardState::from_cells(board_size, cells)?);
        }

        Ok(StateSpace {
            board_size,
            states,
            lookup,
        })
    }

    pub fn board_size(&self) -> usize {
        self.board_size
    }

    /// Number of valid states
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// All valid states in index order
    pub fn states(&self) -> &[BoardState] {
        &self.states
    }

    pub fn state(&self, index: StateIndex) -> Option<&BoardState> {
        self.states.get(index.0)
    }

    /// Resolve a board to its index.
    ///
    /// # Errors
    ///
    /// Returns `StateNotFound` if the board has a different size or violates
    /// the turn-alternation invariant.
    pub fn index_of(&self, board: &BoardState) -> crate::Result<StateIndex> {
        let not_found = || crate::Error::StateNotFound {
            board: board.encode(),
        };
        if board.size() != self.board_size {
            return Err(not_found());
        }
        self.lookup
            .get(board.ternary_code())
            .copied()
            .flatten()
            .ok_or_else(not_found)
    }
}

fn decode(mut code: usize, cell_count: usize) -> Vec<Cell> {
    (0..cell_count)
        .map(|_| {
            let digit = code % 3;
            code /= 3;
            Cell::from_digit(digit).unwrap_or(Cell::Empty)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_boards_have_expected_counts() {
        assert_eq!(StateSpace::enumerate(1).unwrap().len(), 3);
        assert_eq!(StateSpace::enumerate(2).unwrap().len(), 51);
    }

    #[test]
    fn unsupported_sizes_are_rejected() {
        for size in [0, 4, 5] {
            assert!(matches!(
                StateSpace::enumerate(size),
                Err(crate::Error::UnsupportedBoardSize { .. })
            ));
        }
    }

    #[test]
    fn first_state_is_the_empty_board() {
        let space = StateSpace::enumerate(3).unwrap();
        assert_eq!(space.states()[0], BoardState::new(3));
        assert_eq!(
            space.index_of(&BoardState::new(3)).unwrap(),
            StateIndex::new(0)
        );
    }

    #[test]
    fn index_of_rejects_invalid_boards() {
        let space = StateSpace::enumerate(3).unwrap();
        let lopsided = BoardState::from_string("XXX......").unwrap();
        assert!(matches!(
            space.index_of(&lopsided),
            Err(crate::Error::StateNotFound { .. })
        ));
        assert!(matches!(
            space.index_of(&BoardState::new(2)),
            Err(crate::Error::StateNotFound { .. })
        ));
    }
}
