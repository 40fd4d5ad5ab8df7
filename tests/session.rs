use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use brainiac::{
    Result,
    agents::RandomAgent,
    pipeline::{GameController, SessionConfig, SessionSummary},
    ports::{Agent, GameObserver},
    statistics::{
        BatchWinTracker, ExportConfig, GameLengthTracker, RollingWinRateTracker,
        StatisticsTracker, WinRateTracker, WinStreakTracker, WinTracker,
    },
    tictactoe::{BoardState, GameOutcome, Player},
};

mod common;

/// Records every event it sees as a short string.
#[derive(Default)]
struct EventLog {
    events: Vec<String>,
}

impl GameObserver for EventLog {
    fn on_session_start(&mut self, total_games: usize) -> Result<()> {
        self.events.push(format!("start {total_games}"));
        Ok(())
    }

    fn on_move(
        &mut self,
        game_num: usize,
        _board: &BoardState,
        position: usize,
        player: Player,
    ) -> Result<()> {
        self.events.push(format!("move {game_num} {player} {position}"));
        Ok(())
    }

    fn on_game_end(
        &mut self,
        game_num: usize,
        outcome: GameOutcome,
        _board: &BoardState,
    ) -> Result<()> {
        self.events.push(format!("end {game_num} {outcome:?}"));
        Ok(())
    }

    fn on_session_end(&mut self) -> Result<()> {
        self.events.push("finish".to_string());
        Ok(())
    }
}

/// Random agent that counts the outcomes it has learned from.
struct CountingAgent {
    inner: RandomAgent,
    updates: Arc<AtomicUsize>,
}

impl Agent for CountingAgent {
    fn get_move(&mut self, board: &BoardState) -> Result<usize> {
        self.inner.get_move(board)
    }

    fn update_strategy(&mut self, _outcome: GameOutcome) -> Result<()> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn player(&self) -> Player {
        self.inner.player()
    }
}

/// Checks that both agents have already learned when a game ends.
struct UpdateWatcher {
    updates: Arc<AtomicUsize>,
    seen: Vec<usize>,
}

impl GameObserver for UpdateWatcher {
    fn on_game_end(
        &mut self,
        _game_num: usize,
        _outcome: GameOutcome,
        _board: &BoardState,
    ) -> Result<()> {
        self.seen.push(self.updates.load(Ordering::SeqCst));
        Ok(())
    }
}

#[test]
fn observers_see_every_event_in_order() {
    let mut log = EventLog::default();
    let mut x = common::ScriptedAgent::new(Player::X, &[0, 1, 2]);
    let mut o = common::ScriptedAgent::new(Player::O, &[3, 4]);

    let summary = GameController::new(SessionConfig {
        games: 1,
        board_size: 3,
    })
    .with_observer(&mut log)
    .play_games(&mut x, &mut o)
    .expect("session completes");

    assert_eq!(summary.x_wins, 1);
    assert_eq!(
        log.events,
        vec![
            "start 1",
            "move 0 X 0",
            "move 0 O 3",
            "move 0 X 1",
            "move 0 O 4",
            "move 0 X 2",
            "end 0 Win(X)",
            "finish",
        ]
    );
}

#[test]
fn agents_learn_before_observers_hear_of_the_outcome() {
    let updates = Arc::new(AtomicUsize::new(0));
    let mut x = CountingAgent {
        inner: RandomAgent::with_seed(Player::X, 1),
        updates: Arc::clone(&updates),
    };
    let mut o = CountingAgent {
        inner: RandomAgent::with_seed(Player::O, 2),
        updates: Arc::clone(&updates),
    };
    let mut watcher = UpdateWatcher {
        updates: Arc::clone(&updates),
        seen: Vec::new(),
    };

    GameController::new(SessionConfig {
        games: 3,
        board_size: 3,
    })
    .with_observer(&mut watcher)
    .play_games(&mut x, &mut o)
    .expect("session completes");

    assert_eq!(watcher.seen, vec![2, 4, 6]);
}

#[test]
fn trackers_agree_with_the_summary() {
    let mut x = common::menace(Player::X, 31);
    let mut o = RandomAgent::with_seed(Player::O, 32);

    let mut wins = WinTracker::new();
    let mut rates = WinRateTracker::new();
    let mut batches = BatchWinTracker::new(50).expect("positive batch");
    let mut rolling = RollingWinRateTracker::new(50).expect("positive window");
    let mut lengths = GameLengthTracker::new(50).expect("positive window");
    let mut streaks = WinStreakTracker::new();

    let summary = GameController::new(SessionConfig {
        games: 200,
        board_size: 3,
    })
    .with_observer(&mut wins)
    .with_observer(&mut rates)
    .with_observer(&mut batches)
    .with_observer(&mut rolling)
    .with_observer(&mut lengths)
    .with_observer(&mut streaks)
    .play_games(&mut x, &mut o)
    .expect("session completes");

    let counts = wins.counts();
    assert_eq!(counts.x_wins, summary.x_wins);
    assert_eq!(counts.o_wins, summary.o_wins);
    assert_eq!(counts.ties, summary.ties);

    assert_eq!(rates.history().len(), 200);
    assert!(common::approx_eq_tol(
        rates.win_rate(Player::X),
        summary.win_rate(Player::X),
        1e-12
    ));

    assert_eq!(batches.batches().len(), 4);
    let batch_x: usize = batches.batches().iter().map(|b| b.x_wins).sum();
    assert_eq!(batch_x, summary.x_wins);

    assert_eq!(rolling.window_counts().total(), 50);
    assert_eq!(lengths.lengths().iter().sum::<usize>(), summary.total_moves);
    assert!(streaks.longest_streak(Player::X) <= summary.x_wins);

    let dir = tempfile::tempdir().expect("temp dir");
    let export = ExportConfig::new(dir.path().join("artifacts"));
    let trackers: [&dyn StatisticsTracker; 6] =
        [&wins, &rates, &batches, &rolling, &lengths, &streaks];
    for tracker in trackers {
        assert_eq!(tracker.total_games(), 200);
        let path = tracker.write_csv(&export).expect("csv written");
        assert!(path.starts_with(&export.directory));
        assert!(path.is_file());
    }
}

#[test]
fn summary_round_trips_through_json() {
    let mut x = RandomAgent::with_seed(Player::X, 5);
    let mut o = RandomAgent::with_seed(Player::O, 6);
    let summary = GameController::new(SessionConfig {
        games: 20,
        board_size: 2,
    })
    .play_games(&mut x, &mut o)
    .expect("session completes");

    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("summary.json");
    summary.save(&path).expect("summary saved");

    let loaded: SessionSummary =
        serde_json::from_str(&std::fs::read_to_string(&path).expect("readable"))
            .expect("valid JSON");
    assert_eq!(loaded, summary);
    assert_eq!(loaded.games, 20);
}

#[test]
fn agent_errors_abort_the_session() {
    let mut x = common::ScriptedAgent::new(Player::X, &[0, 0]);
    let mut o = common::ScriptedAgent::new(Player::O, &[4]);

    let result = GameController::new(SessionConfig {
        games: 1,
        board_size: 3,
    })
    .play_games(&mut x, &mut o);

    assert!(matches!(result, Err(brainiac::Error::CellOccupied { position: 0 })));
}
