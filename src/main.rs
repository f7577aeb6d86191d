#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use battleship_sim::{init_logging, FleetConfig, Match, MatchConfig, MatchReport, MatchStatus};

#[cfg(feature = "std")]
use clap::{Args, Parser, Subcommand, ValueEnum};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[cfg(feature = "std")]
enum FleetPreset {
    Standard,
    Classic,
}

#[derive(Args, Clone, Debug)]
#[cfg(feature = "std")]
struct MatchArgs {
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, default_value_t = battleship_sim::DEFAULT_WIDTH)]
    width: usize,
    #[arg(long, default_value_t = battleship_sim::DEFAULT_HEIGHT)]
    height: usize,
    #[arg(long, value_enum, default_value_t = FleetPreset::Standard)]
    fleet: FleetPreset,
    #[arg(long, help = "Custom fleet as Name:length[:quantity],... (overrides --fleet)")]
    ships: Option<FleetConfig>,
    #[arg(long, help = "Stop after this many turns (default: 2 * width * height)")]
    turn_limit: Option<usize>,
    #[arg(long, help = "Print the report as JSON")]
    json: bool,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Play one CPU-vs-CPU match and report the result.
    Selfplay(MatchArgs),
    /// Play many CPU-vs-CPU matches and report aggregate statistics.
    Bench {
        #[arg(long, default_value_t = 100)]
        games: usize,
        #[command(flatten)]
        args: MatchArgs,
    },
}

#[cfg(feature = "std")]
impl MatchArgs {
    fn config(&self) -> anyhow::Result<MatchConfig> {
        let fleet = match (&self.ships, self.fleet) {
            (Some(custom), _) => custom.clone(),
            (None, FleetPreset::Standard) => FleetConfig::standard(),
            (None, FleetPreset::Classic) => FleetConfig::classic(),
        };
        if !fleet.fits(self.width, self.height) {
            anyhow::bail!(
                "fleet needs {} cells but the {}x{} grid has {}",
                fleet.total_cells(),
                self.width,
                self.height,
                self.width * self.height
            );
        }
        Ok(MatchConfig {
            width: self.width,
            height: self.height,
            fleet,
            turn_limit: self.turn_limit,
        })
    }

    fn rng(&self) -> SmallRng {
        if let Some(s) = self.seed {
            SmallRng::seed_from_u64(s)
        } else {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

#[cfg(feature = "std")]
fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Selfplay(args) => {
            let config = args.config()?;
            let mut rng = args.rng();
            if let Some(s) = args.seed {
                log::info!("using fixed seed {} (game will be reproducible)", s);
            }
            let mut game = Match::new(&config, &mut rng)?;
            let report = game.run(&mut rng)?;
            if args.json {
                println!("{}", serde_json::to_string(&report)?);
            } else {
                print_report(&report);
            }
        }
        Commands::Bench { games, args } => {
            let config = args.config()?;
            let mut rng = args.rng();
            let mut wins = [0usize; 2];
            let mut unfinished = 0usize;
            let mut shots_to_win = 0usize;
            for _ in 0..games {
                let mut game = Match::new(&config, &mut rng)?;
                let report = game.run(&mut rng)?;
                match report.status {
                    MatchStatus::Won { winner } => {
                        wins[winner] += 1;
                        shots_to_win += report.stats[winner].shots;
                    }
                    _ => unfinished += 1,
                }
            }
            let decided = wins[0] + wins[1];
            let average = if decided == 0 {
                0.0
            } else {
                shots_to_win as f64 / decided as f64
            };
            if args.json {
                let summary = serde_json::json!({
                    "games": games,
                    "wins": wins,
                    "unfinished": unfinished,
                    "average_shots_to_win": average,
                });
                println!("{}", serde_json::to_string(&summary)?);
            } else {
                println!("games played:        {}", games);
                println!("player 1 wins:       {}", wins[0]);
                println!("player 2 wins:       {}", wins[1]);
                println!("unfinished:          {}", unfinished);
                println!("average shots to win {:.1}", average);
            }
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
fn print_report(report: &MatchReport) {
    match report.status {
        MatchStatus::Won { winner } => println!(
            "Player {} sank the enemy fleet after {} turns.",
            winner + 1,
            report.turns
        ),
        MatchStatus::TurnLimitReached => {
            println!("Turn limit reached after {} turns.", report.turns)
        }
        MatchStatus::InProgress => println!("Match still in progress."),
    }
    for (i, stats) in report.stats.iter().enumerate() {
        println!(
            "  player {}: {} shots, {} hits, {} ships sunk",
            i + 1,
            stats.shots,
            stats.hits,
            stats.sunk
        );
    }
}
