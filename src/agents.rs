//! Agent implementations besides MENACE, and the closed set of agent kinds
//!
//! - [`RandomAgent`]: uniform over empty cells (baseline)
//! - [`HumanAgent`]: reads positions from a text stream
//! - [`PlayerAgent`]: one of the above or a [`MenaceAgent`]

use std::{
    fmt,
    io::{self, BufRead, BufReader, Write},
    str::FromStr,
};

use rand::{SeedableRng, prelude::IndexedRandom, random, rngs::StdRng};

use crate::{
    Error, Result,
    menace::MenaceAgent,
    ports::Agent,
    tictactoe::{BoardState, GameOutcome, Player},
};

/// Random policy agent (baseline)
pub struct RandomAgent {
    name: String,
    player: Player,
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(player: Player) -> Self {
        Self::with_seed(player, random())
    }

    /// Create a random agent with a deterministic seed
    pub fn with_seed(player: Player, seed: u64) -> Self {
        Self {
            name: format!("Random-{player}"),
            player,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn get_move(&mut self, board: &BoardState) -> Result<usize> {
        board
            .empty_cells()
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| Error::NoLegalMoves {
                board: board.encode(),
            })
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn player(&self) -> Player {
        self.player
    }
}

/// Agent driven by a person typing cell indices.
///
/// Invalid input (not a number, off the board, occupied) is reported on the
/// output stream and the prompt repeats until a legal cell is entered.
pub struct HumanAgent {
    name: String,
    player: Player,
    input: Box<dyn BufRead + Send>,
    output: Box<dyn Write + Send>,
}

impl HumanAgent {
    /// Read from stdin and prompt on stdout
    pub fn stdin(player: Player) -> Self {
        Self::with_io(
            player,
            Box::new(BufReader::new(io::stdin())),
            Box::new(io::stdout()),
        )
    }

    pub fn with_io(
        player: Player,
        input: Box<dyn BufRead + Send>,
        output: Box<dyn Write + Send>,
    ) -> Self {
        Self {
            name: format!("Human-{player}"),
            player,
            input,
            output,
        }
    }
}

impl Agent for HumanAgent {
    fn get_move(&mut self, board: &BoardState) -> Result<usize> {
        let legal = board.empty_cells();
        if legal.is_empty() {
            return Err(Error::NoLegalMoves {
                board: board.encode(),
            });
        }

        loop {
            write!(self.output, "Enter move for {}: ", self.player)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(Error::InputClosed {
                    player: self.name.clone(),
                });
            }

            match line.trim().parse::<usize>() {
                Ok(position) if legal.contains(&position) => return Ok(position),
                _ => writeln!(self.output, "Invalid move. Try again.")?,
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn player(&self) -> Player {
        self.player
    }
}

/// Kinds of agent selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentKind {
    Human,
    Random,
    Menace,
}

impl AgentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentKind::Human => "human",
            AgentKind::Random => "random",
            AgentKind::Menace => "ai",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "human" => Ok(AgentKind::Human),
            "random" => Ok(AgentKind::Random),
            "ai" | "menace" => Ok(AgentKind::Menace),
            _ => Err(Error::ParseAgentKind {
                input: s.to_string(),
                expected: "human, random, ai".to_string(),
            }),
        }
    }
}

/// One of the supported agent kinds.
///
/// Dispatch is a plain `match`; the set of kinds is closed.
pub enum PlayerAgent {
    Human(HumanAgent),
    Random(RandomAgent),
    Menace(Box<MenaceAgent>),
}

impl PlayerAgent {
    pub fn kind(&self) -> AgentKind {
        match self {
            Self::Human(_) => AgentKind::Human,
            Self::Random(_) => AgentKind::Random,
            Self::Menace(_) => AgentKind::Menace,
        }
    }

    /// The MENACE agent, if this is one
    pub fn as_menace(&self) -> Option<&MenaceAgent> {
        match self {
            Self::Menace(agent) => Some(agent.as_ref()),
            _ => None,
        }
    }
}

impl Agent for PlayerAgent {
    fn get_move(&mut self, board: &BoardState) -> Result<usize> {
        match self {
            Self::Human(agent) => agent.get_move(board),
            Self::Random(agent) => agent.get_move(board),
            Self::Menace(agent) => agent.get_move(board),
        }
    }

    fn update_strategy(&mut self, outcome: GameOutcome) -> Result<()> {
        match self {
            Self::Human(agent) => agent.update_strategy(outcome),
            Self::Random(agent) => agent.update_strategy(outcome),
            Self::Menace(agent) => agent.update_strategy(outcome),
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::Human(agent) => agent.name(),
            Self::Random(agent) => agent.name(),
            Self::Menace(agent) => agent.name(),
        }
    }

    fn player(&self) -> Player {
        match self {
            Self::Human(agent) => agent.player(),
            Self::Random(agent) => agent.player(),
            Self::Menace(agent) => agent.player(),
        }
    }
}
