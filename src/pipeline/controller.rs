//! Game loop running a session of games between two agents

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    Error, Result,
    ports::{Agent, GameObserver},
    tictactoe::{GameOutcome, Player, TicTacToe},
};

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Number of games to play
    pub games: usize,

    /// Board side length
    pub board_size: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            games: 2,
            board_size: 3,
        }
    }
}

/// A finished game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub outcome: GameOutcome,
    pub moves: Vec<usize>,
}

/// Result of a session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub games: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub ties: usize,
    pub total_moves: usize,
}

impl SessionSummary {
    /// Count one finished game
    pub fn record(&mut self, record: &GameRecord) {
        self.games += 1;
        self.total_moves += record.moves.len();
        match record.outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Tie => self.ties += 1,
        }
    }

    pub fn wins(&self, player: Player) -> usize {
        match player {
            Player::X => self.x_wins,
            Player::O => self.o_wins,
        }
    }

    pub fn win_rate(&self, player: Player) -> f64 {
        rate(self.wins(player), self.games)
    }

    pub fn tie_rate(&self) -> f64 {
        rate(self.ties, self.games)
    }

    pub fn mean_game_length(&self) -> f64 {
        rate(self.total_moves, self.games)
    }

    /// Save summary to a JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

fn rate(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// Runs games between an X agent and an O agent and publishes every move
/// and outcome to the registered observers.
pub struct GameController<'a> {
    config: SessionConfig,
    game: TicTacToe,
    observers: Vec<&'a mut dyn GameObserver>,
}

impl<'a> GameController<'a> {
    pub fn new(config: SessionConfig) -> Self {
        let game = TicTacToe::new(config.board_size);
        Self {
            config,
            game,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the controller
    pub fn with_observer(mut self, observer: &'a mut dyn GameObserver) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn add_observer(&mut self, observer: &'a mut dyn GameObserver) {
        self.observers.push(observer);
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Play the configured number of games.
    ///
    /// Any agent or observer error aborts the session.
    pub fn play_games(&mut self, x: &mut dyn Agent, o: &mut dyn Agent) -> Result<SessionSummary> {
        check_seat(x, Player::X)?;
        check_seat(o, Player::O)?;

        info!(
            games = self.config.games,
            board_size = self.config.board_size,
            x = x.name(),
            o = o.name(),
            "session started"
        );
        for observer in &mut self.observers {
            observer.on_session_start(self.config.games)?;
        }

        let mut summary = SessionSummary::default();
        for game_num in 0..self.config.games {
            let record = self.play_game(game_num, x, o)?;
            summary.record(&record);
        }

        for observer in &mut self.observers {
            observer.on_session_end()?;
        }
        info!(
            games = summary.games,
            x_wins = summary.x_wins,
            o_wins = summary.o_wins,
            ties = summary.ties,
            "session finished"
        );

        Ok(summary)
    }

    /// Play one game on a fresh board, then let both agents learn from it.
    pub fn play_game(
        &mut self,
        game_num: usize,
        x: &mut dyn Agent,
        o: &mut dyn Agent,
    ) -> Result<GameRecord> {
        self.game.reset();

        let outcome = loop {
            if let Some(outcome) = self.game.outcome() {
                break outcome;
            }

            let player = self.game.current_turn();
            let agent: &mut dyn Agent = match player {
                Player::X => &mut *x,
                Player::O => &mut *o,
            };

            let position = agent.get_move(self.game.board())?;
            self.game.place_symbol(position, player)?;

            for observer in &mut self.observers {
                observer.on_move(game_num, self.game.board(), position, player)?;
            }
        };

        x.update_strategy(outcome)?;
        o.update_strategy(outcome)?;

        for observer in &mut self.observers {
            observer.on_game_end(game_num, outcome, self.game.board())?;
        }

        debug!(game = game_num, ?outcome, moves = self.game.move_count(), "game finished");

        Ok(GameRecord {
            outcome,
            moves: self.game.moves().to_vec(),
        })
    }
}

fn check_seat(agent: &dyn Agent, seat: Player) -> Result<()> {
    if agent.player() == seat {
        Ok(())
    } else {
        Err(Error::InvalidConfiguration {
            message: format!(
                "agent '{}' plays {} but was seated as {seat}",
                agent.name(),
                agent.player()
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::RandomAgent;

    #[test]
    fn test_random_session() {
        let config = SessionConfig {
            games: 10,
            board_size: 3,
        };

        let mut controller = GameController::new(config);
        let mut x = RandomAgent::with_seed(Player::X, 1);
        let mut o = RandomAgent::with_seed(Player::O, 2);

        let summary = controller.play_games(&mut x, &mut o).unwrap();

        assert_eq!(summary.games, 10);
        assert_eq!(summary.x_wins + summary.o_wins + summary.ties, 10);
        assert!(summary.mean_game_length() >= 5.0 && summary.mean_game_length() <= 9.0);
    }

    #[test]
    fn rejects_swapped_seats() {
        let mut controller = GameController::new(SessionConfig::default());
        let mut x = RandomAgent::with_seed(Player::O, 1);
        let mut o = RandomAgent::with_seed(Player::X, 2);
        assert!(matches!(
            controller.play_games(&mut x, &mut o),
            Err(Error::InvalidConfiguration { .. })
        ));
    }
}
