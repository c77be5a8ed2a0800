//! # SearchOptions
//!
//! The `SearchOptions` struct holds the configuration of one search: the board
//! size, the population size, the RNG seed, the two timer durations, the
//! annealing thresholds and the logging level.
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use genqueens::evolution::options::{LogLevel, SearchOptions};
//!
//! // Create a new SearchOptions instance with custom parameters
//! let custom_options = SearchOptions::builder()
//!     .board_size(8)
//!     .population_size(50)
//!     .seed(42)
//!     .deadline(Duration::from_secs(4))
//!     .log_level(LogLevel::Minimal)
//!     .build();
//!
//! assert!(custom_options.validate().is_ok());
//!
//! // Create a new SearchOptions instance with default parameters
//! let default_options = SearchOptions::default();
//! assert_eq!(default_options.get_board_size(), 8);
//! ```
//!
//! ## Defaults
//!
//! | option                    | default |
//! |---------------------------|---------|
//! | board size                | 8       |
//! | population size           | 100     |
//! | seed                      | entropy |
//! | deadline                  | 8 s     |
//! | annealing interval        | 1 s     |
//! | initial fitness threshold | 64      |
//! | acceptance threshold      | 1       |
//! | parallel threshold        | 1000    |
//! | log level                 | None    |

use std::time::Duration;

use crate::error::{QueensError, Result};

const DEFAULT_BOARD_SIZE: usize = 8;
const DEFAULT_POPULATION_SIZE: usize = 100;
const DEFAULT_DEADLINE: Duration = Duration::from_secs(8);
const DEFAULT_ANNEAL_INTERVAL: Duration = Duration::from_secs(1);
const DEFAULT_INITIAL_FITNESS_THRESHOLD: usize = 64;
const DEFAULT_ACCEPTANCE_THRESHOLD: usize = 1;
const DEFAULT_PARALLEL_THRESHOLD: usize = 1000;

/// Controls the per-generation progress events emitted through `tracing`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Generation index, best fitness and current threshold.
    Verbose,
    /// Generation index only.
    Minimal,
    /// No per-generation events.
    None,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    board_size: usize,
    population_size: usize,
    seed: Option<u64>,
    deadline: Duration,
    anneal_interval: Duration,
    initial_fitness_threshold: usize,
    /// Boards with fitness at or below this count as solved. Attacks are
    /// counted from both sides so fitness is always even, and the default of 1
    /// accepts exactly the boards with no attacks.
    acceptance_threshold: usize,
    /// Minimum population size at which the initial boards are built in parallel
    parallel_threshold: usize,
    log_level: LogLevel,
}

impl SearchOptions {
    pub fn new(board_size: usize, population_size: usize, deadline: Duration) -> Self {
        Self {
            board_size,
            population_size,
            deadline,
            ..Self::default()
        }
    }

    /// Checks that the options describe a search that can run.
    ///
    /// # Errors
    ///
    /// Returns [`QueensError::Configuration`] if:
    /// - the board size is zero or odd
    /// - the population size is zero
    /// - the annealing interval is zero
    ///
    /// A zero deadline is valid: the search stops at the first round boundary
    /// after it fires. Any acceptance threshold is valid.
    pub fn validate(&self) -> Result<()> {
        if self.board_size == 0 {
            return Err(QueensError::Configuration(
                "Board size cannot be zero".to_string(),
            ));
        }

        if self.board_size % 2 != 0 {
            return Err(QueensError::Configuration(format!(
                "Board size must be even, got {}",
                self.board_size
            )));
        }

        if self.population_size == 0 {
            return Err(QueensError::Configuration(
                "Population size cannot be zero".to_string(),
            ));
        }

        if self.anneal_interval.is_zero() {
            return Err(QueensError::Configuration(
                "Annealing interval cannot be zero".to_string(),
            ));
        }

        Ok(())
    }

    pub fn get_board_size(&self) -> usize {
        self.board_size
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn get_deadline(&self) -> Duration {
        self.deadline
    }

    pub fn get_anneal_interval(&self) -> Duration {
        self.anneal_interval
    }

    pub fn get_initial_fitness_threshold(&self) -> usize {
        self.initial_fitness_threshold
    }

    pub fn get_acceptance_threshold(&self) -> usize {
        self.acceptance_threshold
    }

    /// Returns the minimum population size built in parallel.
    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    pub fn get_log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn set_board_size(&mut self, board_size: usize) {
        self.board_size = board_size;
    }

    pub fn set_population_size(&mut self, population_size: usize) {
        self.population_size = population_size;
    }

    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
    }

    pub fn set_deadline(&mut self, deadline: Duration) {
        self.deadline = deadline;
    }

    pub fn set_anneal_interval(&mut self, anneal_interval: Duration) {
        self.anneal_interval = anneal_interval;
    }

    pub fn set_initial_fitness_threshold(&mut self, threshold: usize) {
        self.initial_fitness_threshold = threshold;
    }

    pub fn set_acceptance_threshold(&mut self, threshold: usize) {
        self.acceptance_threshold = threshold;
    }

    pub fn set_parallel_threshold(&mut self, threshold: usize) {
        self.parallel_threshold = threshold;
    }

    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    /// Returns a builder for creating a `SearchOptions` instance.
    ///
    /// Options left unset keep their default values.
    pub fn builder() -> SearchOptionsBuilder {
        SearchOptionsBuilder::default()
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            population_size: DEFAULT_POPULATION_SIZE,
            seed: None,
            deadline: DEFAULT_DEADLINE,
            anneal_interval: DEFAULT_ANNEAL_INTERVAL,
            initial_fitness_threshold: DEFAULT_INITIAL_FITNESS_THRESHOLD,
            acceptance_threshold: DEFAULT_ACCEPTANCE_THRESHOLD,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            log_level: LogLevel::None,
        }
    }
}

/// Builder for `SearchOptions`.
///
/// Provides a fluent interface for constructing `SearchOptions` instances.
#[derive(Debug, Clone, Default)]
pub struct SearchOptionsBuilder {
    board_size: Option<usize>,
    population_size: Option<usize>,
    seed: Option<u64>,
    deadline: Option<Duration>,
    anneal_interval: Option<Duration>,
    initial_fitness_threshold: Option<usize>,
    acceptance_threshold: Option<usize>,
    parallel_threshold: Option<usize>,
    log_level: Option<LogLevel>,
}

impl SearchOptionsBuilder {
    pub fn board_size(mut self, value: usize) -> Self {
        self.board_size = Some(value);
        self
    }

    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    pub fn seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    pub fn deadline(mut self, value: Duration) -> Self {
        self.deadline = Some(value);
        self
    }

    pub fn anneal_interval(mut self, value: Duration) -> Self {
        self.anneal_interval = Some(value);
        self
    }

    pub fn initial_fitness_threshold(mut self, value: usize) -> Self {
        self.initial_fitness_threshold = Some(value);
        self
    }

    pub fn acceptance_threshold(mut self, value: usize) -> Self {
        self.acceptance_threshold = Some(value);
        self
    }

    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    /// Builds the `SearchOptions` instance. Call
    /// [`SearchOptions::validate`] before running a search with it.
    pub fn build(self) -> SearchOptions {
        let default = SearchOptions::default();
        SearchOptions {
            board_size: self.board_size.unwrap_or(default.board_size),
            population_size: self.population_size.unwrap_or(default.population_size),
            seed: self.seed,
            deadline: self.deadline.unwrap_or(default.deadline),
            anneal_interval: self.anneal_interval.unwrap_or(default.anneal_interval),
            initial_fitness_threshold: self
                .initial_fitness_threshold
                .unwrap_or(default.initial_fitness_threshold),
            acceptance_threshold: self
                .acceptance_threshold
                .unwrap_or(default.acceptance_threshold),
            parallel_threshold: self
                .parallel_threshold
                .unwrap_or(default.parallel_threshold),
            log_level: self.log_level.unwrap_or(default.log_level),
        }
    }
}
