//! Evolutionary search for low-waste guillotine layouts.
//!
//! This crate evolves [`Genotype`](guillotine_engine::Genotype)s whose decoded
//! [`LayoutTree`](guillotine_engine::LayoutTree)s enclose the demand boards in
//! as small a sheet as possible.
//!
//! # How a Run Works
//!
//! 1. **Population** - Create random genotypes, one gene per demand board
//! 2. **Evaluation** - Decode each genotype and score its bounding area
//! 3. **Ranking** - Sort ascending by fitness (smaller sheet is better)
//! 4. **Elitism** - Copy the best individuals unchanged
//! 5. **Reproduction** - Fill the rest by tournament selection, crossover and mutation
//! 6. **Repeat** - For a fixed number of generations
//!
//! # Architecture
//!
//! ```text
//! SolverConfig
//!     ↓ builds
//! GeneticAlgorithm ── TournamentSelector, Crossover, CompoundMutator
//!     ↓ evaluates with
//! FitnessEvaluator (BoundingArea)
//!     ↓ ranks into
//! RankedPopulation
//!     ↓ breeds
//! Population
//! ```
//!
//! # Example
//!
//! ```
//! use guillotine_engine::CutSpec;
//! use guillotine_training::{
//!     config::SolverConfig, fitness::BoundingArea, genetic::GeneticAlgorithm,
//! };
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg32;
//!
//! let mut spec = CutSpec::new(500);
//! spec.add(200, 100).add(150, 100).add(50, 50);
//!
//! let config = SolverConfig {
//!     population_size: 20,
//!     elite_size: 2,
//!     generations: 10,
//!     ..SolverConfig::default()
//! };
//! let ga = GeneticAlgorithm::from_config(&spec, &config, BoundingArea).unwrap();
//! let mut rng = Pcg32::seed_from_u64(42);
//! let population = ga.random_population(config.population_size, &mut rng);
//! let ranked = ga.run(population, config.generations, &mut rng, |_, _| {});
//!
//! assert!(ranked.best_fitness().unwrap() >= spec.total_area());
//! ```
//!
//! # Reproducibility
//!
//! Every stochastic operation takes the random generator as an argument.
//! Fitness evaluation draws no random numbers and ranks with a stable sort,
//! so a fixed seed gives the same run on any number of threads.
//!
//! # Current Limitations
//!
//! - **Heuristic**: no guarantee of an optimal packing
//! - **Single sheet**: all demand boards go into one bounding rectangle
//! - **No kerf or grain**: saw width and material grain are ignored
//! - **Fixed length runs**: there is no convergence detection or early stop

pub mod config;
pub mod crossover;
pub mod fitness;
pub mod genetic;
pub mod mutation;
pub mod population;
pub mod selection;
