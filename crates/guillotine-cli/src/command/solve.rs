use std::path::PathBuf;

use anyhow::{Context as _, bail};
use chrono::Utc;
use guillotine_engine::{Board, CutSpec, LayoutTree};
use guillotine_training::{
    config::SolverConfig, crossover::Crossover, fitness::BoundingArea, genetic::GeneticAlgorithm,
    mutation::MutationParams,
};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use tracing::info;

use crate::{
    model::solution::Solution,
    util::{self, Output},
};

const DEFAULT_MAX_WIDTH: u32 = 500;

const DEFAULT_BOARDS: [Board; 8] = [
    Board::new(200, 100),
    Board::new(150, 100),
    Board::new(50, 50),
    Board::new(50, 70),
    Board::new(150, 100),
    Board::new(50, 50),
    Board::new(50, 70),
    Board::new(123, 231),
];

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SolveArg {
    /// JSON file with the demand list (`max_width` and `boards`)
    #[arg(long, conflicts_with = "board")]
    spec: Option<PathBuf>,
    /// Demand board as `WIDTHxHEIGHT`; repeat for more boards
    #[arg(long, value_name = "WxH")]
    board: Vec<Board>,
    /// Use only the first N demand boards
    #[arg(long, value_name = "N")]
    board_count: Option<usize>,
    /// Stock width limit, 0 for unconstrained [default: 500, or the spec file's value]
    #[arg(long)]
    max_width: Option<u32>,
    /// Number of individuals per generation
    #[arg(long, default_value_t = SolverConfig::default().population_size)]
    population: usize,
    /// Individuals sampled per tournament
    #[arg(long, default_value_t = SolverConfig::default().tournament_size)]
    tournament_size: usize,
    /// Individuals copied unchanged into each new generation
    #[arg(long, default_value_t = SolverConfig::default().elite_size)]
    elite_size: usize,
    /// Probability of picking the best remaining tournament candidate
    #[arg(long, default_value_t = SolverConfig::default().selection_probability)]
    selection_probability: f64,
    /// Sample tournament candidates without replacement
    #[arg(long)]
    without_replacement: bool,
    /// Crossover strategy: uniform, onepoint or twopoint
    #[arg(long, default_value_t = Crossover::default())]
    crossover: Crossover,
    /// Mean number of gene weights mutated per child
    #[arg(long, default_value_t = SolverConfig::default().weight_mutation.mean)]
    weight_mutate_mean: f64,
    /// Mean number of pick configs mutated per child
    #[arg(long, default_value_t = SolverConfig::default().config_mutation.mean)]
    config_mutate_mean: f64,
    /// Number of generations
    #[arg(long, default_value_t = SolverConfig::default().generations)]
    generations: usize,
    /// Random seed for repeatable runs [default: random]
    #[arg(long)]
    seed: Option<u64>,
    /// Log progress every N generations
    #[arg(long, default_value_t = 100)]
    report_interval: usize,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

impl SolveArg {
    fn cut_spec(&self) -> anyhow::Result<CutSpec> {
        let mut spec = if let Some(path) = &self.spec {
            util::read_cut_spec_file(path)?
        } else {
            let boards = if self.board.is_empty() {
                &DEFAULT_BOARDS[..]
            } else {
                &self.board[..]
            };
            let mut spec = CutSpec::with_capacity(boards.len(), DEFAULT_MAX_WIDTH);
            for board in boards {
                spec.try_add(board.width, board.height)?;
            }
            spec
        };

        if let Some(max_width) = self.max_width {
            spec = spec.with_max_width(max_width);
        }

        if let Some(count) = self.board_count {
            let available = spec.len();
            let Some(truncated) = spec.truncated(count) else {
                bail!("--board-count {count} exceeds the {available} available demand boards");
            };
            spec = truncated;
        }
        Ok(spec)
    }

    fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            population_size: self.population,
            elite_size: self.elite_size,
            tournament_size: self.tournament_size,
            selection_probability: self.selection_probability,
            tournament_replacement: !self.without_replacement,
            crossover: self.crossover,
            weight_mutation: MutationParams::from_mean(self.weight_mutate_mean),
            config_mutation: MutationParams::from_mean(self.config_mutate_mean),
            generations: self.generations,
        }
    }
}

pub(crate) fn run(arg: &SolveArg) -> anyhow::Result<()> {
    let spec = arg.cut_spec()?;
    let config = arg.solver_config();
    let ga = GeneticAlgorithm::from_config(&spec, &config, BoundingArea)
        .context("Invalid solver configuration")?;

    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    info!(
        seed,
        boards = spec.len(),
        max_width = spec.max_width(),
        total_area = spec.total_area(),
        "demand list loaded"
    );

    let mut rng = Pcg32::seed_from_u64(seed);
    let population = ga.random_population(config.population_size, &mut rng);
    let interval = arg.report_interval.max(1);
    let ranked = ga.run(population, config.generations, &mut rng, |stats, _| {
        if stats.generation % interval == 0 {
            info!(
                generation = stats.generation,
                best = stats.best,
                mean = stats.mean,
                "progress"
            );
        }
    });

    let best = ranked
        .best()
        .context("Population is empty after evaluation")?;
    let drawing = LayoutTree::decode(&spec, best.genotype()).draw();
    let waste_percent = spec.waste_percent(drawing.sheet);

    let solution = Solution {
        seed,
        solved_at: Utc::now(),
        config,
        max_width: spec.max_width(),
        demands: spec.boards().to_vec(),
        total_area: spec.total_area(),
        sheet: drawing.sheet,
        sheet_area: drawing.sheet.area(),
        waste_percent,
        boxes: drawing.boxes,
    };
    Output::save_json(&solution, arg.output.clone())?;

    if let Some(waste) = waste_percent {
        info!(sheet = %solution.sheet, "waste: {waste:.2}%");
    } else {
        info!("no demand boards, nothing to cut");
    }
    if let Some(path) = &arg.output {
        info!(path = %path.display(), "solution saved");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::iter;

    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct TestCommand {
        #[clap(flatten)]
        arg: SolveArg,
    }

    fn parse(args: &[&str]) -> Result<SolveArg, clap::Error> {
        TestCommand::try_parse_from(iter::once("guillotine").chain(args.iter().copied()))
            .map(|command| command.arg)
    }

    #[test]
    fn test_defaults() {
        let arg = parse(&[]).unwrap();
        let spec = arg.cut_spec().unwrap();
        assert_eq!(spec.boards(), DEFAULT_BOARDS);
        assert_eq!(spec.max_width(), DEFAULT_MAX_WIDTH);
        assert_eq!(arg.solver_config(), SolverConfig::default());
    }

    #[test]
    fn test_boards_and_limits() {
        let arg = parse(&[
            "--board",
            "10x20",
            "--board",
            "5x5",
            "--board",
            "7x3",
            "--board-count",
            "2",
            "--max-width",
            "0",
        ])
        .unwrap();
        let spec = arg.cut_spec().unwrap();
        assert_eq!(spec.boards(), [Board::new(10, 20), Board::new(5, 5)]);
        assert_eq!(spec.max_width(), 0);
        assert_eq!(spec.total_area(), 225);
    }

    #[test]
    fn test_board_count_too_large() {
        let arg = parse(&["--board", "1x1", "--board-count", "2"]).unwrap();
        assert!(arg.cut_spec().is_err());
    }

    #[test]
    fn test_oversized_boards_rejected() {
        let arg = parse(&["--board", "4294967295x1", "--board", "1x4294967295"]).unwrap();
        let err = arg.cut_spec().unwrap_err();
        assert!(err.to_string().contains("summed board extent"), "{err}");
    }

    #[test]
    fn test_solver_flags() {
        let arg = parse(&[
            "--population",
            "50",
            "--elite-size",
            "4",
            "--crossover",
            "twopoint",
            "--weight-mutate-mean",
            "5",
            "--without-replacement",
            "--seed",
            "42",
        ])
        .unwrap();
        let config = arg.solver_config();
        assert_eq!(config.population_size, 50);
        assert_eq!(config.elite_size, 4);
        assert_eq!(config.crossover, Crossover::TwoPoint);
        assert!((config.weight_mutation.std_dev - 1.0).abs() < f64::EPSILON);
        assert!(!config.tournament_replacement);
        assert_eq!(arg.seed, Some(42));
    }

    #[test]
    fn test_unknown_crossover_lists_choices() {
        let err = parse(&["--crossover", "threepoint"]).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("onepoint"), "{message}");
        assert!(message.contains("twopoint"), "{message}");
    }

    #[test]
    fn test_invalid_board() {
        assert!(parse(&["--board", "10by20"]).is_err());
    }
}
