use std::{
    thread::JoinHandle,
    time::{Duration, Instant},
};

use tracing::{info, warn};

use super::{
    annealing::spawn_annealer,
    options::SearchOptions,
    population::{Population, SearchOutcome},
    shutdown::spawn_deadline,
};
use crate::{board::Board, error::Result, rng::RandomNumberGenerator};

/// Represents the result of a search, containing its outcome and some figures
/// about the run that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// The accepted board, or `NoSolution` if the deadline came first.
    pub outcome: SearchOutcome,
    /// Number of complete rounds before the search stopped.
    pub generations: usize,
    /// Wall-clock time from building the population to stopping the timers.
    pub elapsed: Duration,
    /// The fitness threshold when the search stopped.
    pub final_threshold: usize,
}

impl SearchResult {
    pub fn solution(&self) -> Option<&Board> {
        self.outcome.solution()
    }

    pub fn is_solved(&self) -> bool {
        self.solution().is_some()
    }
}

/// Runs a complete search: builds the population, starts the deadline and
/// annealing timers, evolves until solved or out of time, and stops the timers
/// again before returning.
#[derive(Debug, Clone)]
pub struct SearchLauncher {
    options: SearchOptions,
}

impl SearchLauncher {
    /// Creates a new `SearchLauncher` from validated options.
    ///
    /// # Errors
    ///
    /// Returns [`QueensError::Configuration`](crate::error::QueensError::Configuration)
    /// if the options are invalid.
    pub fn new(options: SearchOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Runs the search with a generator seeded from the options, or from system
    /// entropy if no seed was given.
    pub fn launch(&self) -> Result<SearchResult> {
        let mut rng = match self.options.get_seed() {
            Some(seed) => RandomNumberGenerator::from_seed(seed),
            None => RandomNumberGenerator::new(),
        };
        self.launch_with_rng(&mut rng)
    }

    /// Runs the search with the given generator.
    ///
    /// The deadline and annealing timers run on their own threads. Whatever
    /// way the evolution loop ends, both are signalled and joined before this
    /// returns.
    ///
    /// # Errors
    ///
    /// This method will return an error if:
    /// - A timer thread cannot be spawned
    /// - Breeding hits a malformed board
    pub fn launch_with_rng(&self, rng: &mut RandomNumberGenerator) -> Result<SearchResult> {
        let started = Instant::now();
        let mut population = Population::random(&self.options, rng)?;
        let threshold = population.threshold();
        let shutdown = population.shutdown();

        let deadline = spawn_deadline(shutdown.clone(), self.options.get_deadline())?;
        let annealer = match spawn_annealer(
            threshold.clone(),
            shutdown.clone(),
            self.options.get_anneal_interval(),
        ) {
            Ok(annealer) => annealer,
            Err(e) => {
                shutdown.trigger();
                join_timer("deadline", deadline);
                return Err(e);
            }
        };

        info!(
            board_size = self.options.get_board_size(),
            population_size = self.options.get_population_size(),
            "Starting search"
        );
        let outcome = population.evolve(rng);

        shutdown.trigger();
        join_timer("deadline", deadline);
        join_timer("annealer", annealer);

        let result = SearchResult {
            outcome: outcome?,
            generations: population.generation(),
            elapsed: started.elapsed(),
            final_threshold: threshold.get(),
        };

        info!(
            solved = result.is_solved(),
            generations = result.generations,
            elapsed = ?result.elapsed,
            "Search finished"
        );

        Ok(result)
    }
}

fn join_timer(name: &str, handle: JoinHandle<()>) {
    if handle.join().is_err() {
        warn!(timer = name, "Timer thread panicked");
    }
}
