//! Play command - Run a session of games between two agents

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use crate::{
    agents::{AgentKind, HumanAgent, PlayerAgent, RandomAgent},
    cli::output::{format_number, format_rate, print_kv, print_section, print_subsection},
    menace::{LearningConfig, MAX_BOARD_SIZE, MenaceAgent, StateSpace},
    pipeline::{ConsoleView, GameController, ProgressObserver, SessionConfig, SessionSummary},
    ports::Agent,
    statistics::{
        BatchWinTracker, ExportConfig, GameLengthTracker, RollingWinRateTracker,
        StatisticsTracker, WinRateTracker, WinStreakTracker, WinTracker,
    },
    tictactoe::Player,
};

#[derive(Parser, Debug)]
#[command(about = "Play a session of games")]
pub struct PlayArgs {
    /// Number of games to play
    #[arg(long, short = 'g', default_value_t = 2)]
    pub games: usize,

    /// Agent playing X (human, random, ai)
    #[arg(long, default_value = "random")]
    pub player1: AgentKind,

    /// Agent playing O (human, random, ai)
    #[arg(long, default_value = "ai")]
    pub player2: AgentKind,

    /// Board side length
    #[arg(long, default_value_t = 3)]
    pub board_size: usize,

    /// Random seed for reproducibility (O uses seed + 1)
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON learning configuration for MENACE agents
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory to write statistics CSV files into
    #[arg(long)]
    pub artifacts: Option<PathBuf>,

    /// Save the session summary as JSON
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Games per batch for batch statistics
    #[arg(long, default_value_t = 100)]
    pub batch_size: usize,

    /// Window for rolling statistics
    #[arg(long, default_value_t = 100)]
    pub window: usize,

    /// Do not draw the boards of each game
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Show a progress bar
    #[arg(long)]
    pub progress: bool,
}

/// Creates agents for one session, sharing a single state space between
/// MENACE agents.
pub struct AgentFactory {
    board_size: usize,
    learning: LearningConfig,
    state_space: Option<Arc<StateSpace>>,
}

impl AgentFactory {
    pub fn new(board_size: usize, learning: LearningConfig) -> Self {
        Self {
            board_size,
            learning,
            state_space: None,
        }
    }

    pub fn create(
        &mut self,
        kind: AgentKind,
        player: Player,
        seed: Option<u64>,
    ) -> crate::Result<PlayerAgent> {
        Ok(match kind {
            AgentKind::Human => PlayerAgent::Human(HumanAgent::stdin(player)),
            AgentKind::Random => PlayerAgent::Random(match seed {
                Some(seed) => RandomAgent::with_seed(player, seed),
                None => RandomAgent::new(player),
            }),
            AgentKind::Menace => {
                let space = match &self.state_space {
                    Some(space) => Arc::clone(space),
                    None => {
                        let space = Arc::new(StateSpace::enumerate(self.board_size)?);
                        info!(
                            board_size = self.board_size,
                            states = space.len(),
                            "state space enumerated"
                        );
                        self.state_space = Some(Arc::clone(&space));
                        space
                    }
                };

                let mut builder = MenaceAgent::builder()
                    .player(player)
                    .state_space(space)
                    .config(self.learning);
                if let Some(seed) = seed {
                    builder = builder.seed(seed);
                }
                PlayerAgent::Menace(Box::new(builder.build()?))
            }
        })
    }
}

pub fn execute(args: PlayArgs) -> Result<()> {
    if args.board_size == 0 || args.board_size > MAX_BOARD_SIZE {
        return Err(crate::Error::UnsupportedBoardSize {
            size: args.board_size,
            max: MAX_BOARD_SIZE,
        }
        .into());
    }

    let learning = match &args.config {
        Some(path) => LearningConfig::load(path, args.board_size)
            .with_context(|| format!("Failed to load learning config {}", path.display()))?,
        None => LearningConfig::for_board_size(args.board_size),
    };

    let mut factory = AgentFactory::new(args.board_size, learning);
    let mut x = factory
        .create(args.player1, Player::X, args.seed)
        .context("Failed to create agent for X")?;
    let mut o = factory
        .create(args.player2, Player::O, args.seed.map(|s| s.wrapping_add(1)))
        .context("Failed to create agent for O")?;

    let mut wins = WinTracker::new();
    let mut rates = WinRateTracker::new();
    let mut batches = BatchWinTracker::new(args.batch_size)?;
    let mut rolling = RollingWinRateTracker::new(args.window)?;
    let mut lengths = GameLengthTracker::new(args.window)?;
    let mut streaks = WinStreakTracker::new();
    let mut view = ConsoleView::stdout();
    let mut progress = ProgressObserver::new();

    let summary = {
        let mut controller = GameController::new(SessionConfig {
            games: args.games,
            board_size: args.board_size,
        })
        .with_observer(&mut wins)
        .with_observer(&mut rates)
        .with_observer(&mut batches)
        .with_observer(&mut rolling)
        .with_observer(&mut lengths)
        .with_observer(&mut streaks);

        if !args.quiet {
            controller.add_observer(&mut view);
        }
        if args.progress {
            controller.add_observer(&mut progress);
        }

        controller.play_games(&mut x, &mut o)?
    };

    print_summary(&summary, &x, &o);

    print_subsection("Statistics");
    let (low, high) = rates.win_rate_interval(Player::X);
    print_kv(
        "X win rate (95% CI)",
        &format!("{} - {}", format_rate(low), format_rate(high)),
    );
    let (low, high) = rates.win_rate_interval(Player::O);
    print_kv(
        "O win rate (95% CI)",
        &format!("{} - {}", format_rate(low), format_rate(high)),
    );
    print_kv(
        "Longest streaks",
        &format!(
            "X {} / O {}",
            streaks.longest_streak(Player::X),
            streaks.longest_streak(Player::O)
        ),
    );
    print_kv(
        &format!("Rolling mean length ({})", args.window),
        &format!("{:.2}", lengths.rolling_mean()),
    );

    if let Some(directory) = &args.artifacts {
        let export = ExportConfig::new(directory);
        let trackers: [&dyn StatisticsTracker; 6] =
            [&wins, &rates, &batches, &rolling, &lengths, &streaks];

        print_subsection("Artifacts");
        for tracker in trackers {
            let path = tracker
                .write_csv(&export)
                .with_context(|| format!("Failed to export {} statistics", tracker.name()))?;
            print_kv(tracker.name(), &path.display().to_string());
        }
    }

    if let Some(path) = &args.summary {
        summary
            .save(path)
            .with_context(|| format!("Failed to save summary to {}", path.display()))?;
        println!("\nSummary saved to {}", path.display());
    }

    Ok(())
}

fn print_summary(summary: &SessionSummary, x: &PlayerAgent, o: &PlayerAgent) {
    print_section("Session Summary");
    print_kv("Games", &format_number(summary.games));
    print_kv(
        &format!("X wins ({})", x.name()),
        &format!(
            "{} ({})",
            format_number(summary.x_wins),
            format_rate(summary.win_rate(Player::X))
        ),
    );
    print_kv(
        &format!("O wins ({})", o.name()),
        &format!(
            "{} ({})",
            format_number(summary.o_wins),
            format_rate(summary.win_rate(Player::O))
        ),
    );
    print_kv(
        "Ties",
        &format!(
            "{} ({})",
            format_number(summary.ties),
            format_rate(summary.tie_rate())
        ),
    );
    print_kv("Mean game length", &format!("{:.2}", summary.mean_game_length()));

    for agent in [x, o] {
        if let Some(menace) = agent.as_menace() {
            let stats = menace.stats();
            print_subsection(menace.name());
            print_kv("Matchboxes", &format_number(stats.total_matchboxes));
            print_kv("Depleted", &format_number(stats.depleted_matchboxes));
            print_kv("Average entropy", &format!("{:.3}", stats.avg_entropy));
            print_kv("Illegal samples", &format_number(stats.illegal_samples));
        }
    }
}
