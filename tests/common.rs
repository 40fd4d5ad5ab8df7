//! Common test utilities for the brainiac test suite.
//!
//! Scripted agents, board helpers and sampling tolerances shared by the
//! integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;

use brainiac::{
    Result,
    menace::{MenaceAgent, StateIndex},
    ports::Agent,
    tictactoe::{BoardState, GameOutcome, Player},
};
use statrs::function::erf::erf_inv;

/// Agent that plays a fixed list of cells and records the outcomes it is
/// told about.
pub struct ScriptedAgent {
    name: String,
    player: Player,
    moves: VecDeque<usize>,
    pub outcomes: Vec<GameOutcome>,
}

impl ScriptedAgent {
    pub fn new(player: Player, moves: &[usize]) -> Self {
        Self {
            name: format!("Scripted-{player}"),
            player,
            moves: moves.iter().copied().collect(),
            outcomes: Vec::new(),
        }
    }
}

impl Agent for ScriptedAgent {
    fn get_move(&mut self, board: &BoardState) -> Result<usize> {
        self.moves
            .pop_front()
            .ok_or_else(|| brainiac::Error::NoLegalMoves {
                board: board.encode(),
            })
    }

    fn update_strategy(&mut self, outcome: GameOutcome) -> Result<()> {
        self.outcomes.push(outcome);
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn player(&self) -> Player {
        self.player
    }
}

/// Parse a board literal such as `"XO./.X./..."`.
pub fn board(s: &str) -> BoardState {
    BoardState::from_string(s).expect("valid board literal")
}

/// Seeded 3×3 MENACE agent with default configuration
pub fn menace(player: Player, seed: u64) -> MenaceAgent {
    MenaceAgent::builder()
        .player(player)
        .seed(seed)
        .build()
        .expect("default agent builds")
}

/// Index of a board in the agent's state space
pub fn index_of(agent: &MenaceAgent, s: &str) -> StateIndex {
    agent
        .state_space()
        .index_of(&board(s))
        .expect("board is a valid state")
}

/// Leave only `action` in the box for `s`: it keeps the start weight and
/// every other action drops to zero.
pub fn force_action(agent: &mut MenaceAgent, s: &str, action: usize) {
    let index = index_of(agent, s);
    let start_weight = agent.config().start_weight;
    let pool = agent
        .policy_mut()
        .for_state_mut(index)
        .expect("pool exists for state");
    for cell in 0..pool.len() {
        let weight = if cell == action { start_weight } else { 0 };
        pool.set_weight(cell, weight).expect("cell in catalogue");
    }
}

/// Two-sided normal-approximation tolerance for a proportion `p` estimated
/// from `n` draws, at the given `confidence`.
pub fn proportion_tolerance(p: f64, n: usize, confidence: f64) -> f64 {
    let z = std::f64::consts::SQRT_2 * erf_inv(confidence);
    z * (p * (1.0 - p) / n as f64).sqrt()
}

pub fn approx_eq_tol(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() < tol
}
