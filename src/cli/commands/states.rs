//! States command - Report the size of the enumerated state space

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    cli::output::{format_number, print_kv, print_section},
    menace::StateSpace,
    tictactoe::Player,
};

#[derive(Parser, Debug)]
#[command(about = "Count the valid board states")]
pub struct StatesArgs {
    /// Board side length
    #[arg(long, default_value_t = 3)]
    pub board_size: usize,
}

/// Breakdown of a state space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateCounts {
    pub total: usize,
    pub terminal: usize,
    pub x_to_move: usize,
    pub o_to_move: usize,
}

impl StateCounts {
    pub fn of(space: &StateSpace) -> Self {
        let mut counts = StateCounts {
            total: space.len(),
            terminal: 0,
            x_to_move: 0,
            o_to_move: 0,
        };
        for board in space.states() {
            if board.is_terminal() {
                counts.terminal += 1;
            } else {
                match board.current_turn() {
                    Player::X => counts.x_to_move += 1,
                    Player::O => counts.o_to_move += 1,
                }
            }
        }
        counts
    }
}

pub fn execute(args: StatesArgs) -> Result<()> {
    let space = StateSpace::enumerate(args.board_size)
        .with_context(|| format!("Failed to enumerate a {0}x{0} board", args.board_size))?;
    let counts = StateCounts::of(&space);

    print_section(&format!("State space ({0}x{0})", args.board_size));
    print_kv("Matchboxes", &format_number(counts.total));
    print_kv("Terminal", &format_number(counts.terminal));
    print_kv("X to move", &format_number(counts.x_to_move));
    print_kv("O to move", &format_number(counts.o_to_move));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_cell_board() {
        let space = StateSpace::enumerate(1).unwrap();
        let counts = StateCounts::of(&space);
        // ".", "X" and "O"; both filled boards are wins
        assert_eq!(counts.total, 3);
        assert_eq!(counts.x_to_move, 1);
        assert_eq!(counts.terminal, 2);
    }
}
