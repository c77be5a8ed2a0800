//! # Population
//!
//! The `Population` struct owns the current generation of boards and runs the
//! evolution loop over it.
//!
//! Each round breeds a complete new generation from the current one and then
//! replaces it wholesale; no board of an earlier generation is ever changed.
//! Selection pressure and mutation rate are both driven by the shared
//! [`FitnessThreshold`], which the annealing timer lowers over time, and the
//! loop stops as soon as it sees the [`Shutdown`] signal.

use rayon::prelude::*;
use tracing::{debug, info, trace};

use super::{
    annealing::FitnessThreshold,
    options::{LogLevel, SearchOptions},
    shutdown::Shutdown,
};
use crate::{
    board::Board,
    breeding::{mutate, reproduce},
    error::{QueensError, Result},
    rng::RandomNumberGenerator,
};

/// Upper bound, inclusive, of the roll compared against the threshold in
/// [`Population::should_mutate`].
pub const MUTATION_ROLL_CEILING: usize = 64;

/// What the evolution loop ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A board whose fitness met the acceptance threshold.
    Solved(Board),
    /// The shutdown signal arrived before any board was accepted.
    NoSolution,
}

impl SearchOutcome {
    pub fn solution(&self) -> Option<&Board> {
        match self {
            SearchOutcome::Solved(board) => Some(board),
            SearchOutcome::NoSolution => None,
        }
    }

    pub fn into_solution(self) -> Option<Board> {
        match self {
            SearchOutcome::Solved(board) => Some(board),
            SearchOutcome::NoSolution => None,
        }
    }
}

#[derive(Debug)]
pub struct Population {
    members: Vec<Board>,
    threshold: FitnessThreshold,
    shutdown: Shutdown,
    acceptance_threshold: usize,
    log_level: LogLevel,
    generation: usize,
}

impl Population {
    /// Creates a population of `options.get_population_size()` random boards.
    ///
    /// Populations at or above the parallel threshold are built with rayon.
    /// Each board then gets its own generator seeded from `rng`, so a seeded
    /// run produces the same boards either way it is built.
    ///
    /// # Errors
    ///
    /// Returns [`QueensError::Configuration`] if the options are invalid.
    pub fn random(options: &SearchOptions, rng: &mut RandomNumberGenerator) -> Result<Self> {
        options.validate()?;

        let size = options.get_population_size();
        let board_size = options.get_board_size();

        let members = if size >= options.get_parallel_threshold() {
            let seeds: Vec<u64> = (0..size).map(|_| rng.next_seed()).collect();
            seeds
                .into_par_iter()
                .map(|seed| Board::random(board_size, &mut RandomNumberGenerator::from_seed(seed)))
                .collect::<Result<Vec<_>>>()?
        } else {
            (0..size)
                .map(|_| Board::random(board_size, rng))
                .collect::<Result<Vec<_>>>()?
        };

        Self::from_members(members, options)
    }

    /// Creates a population from existing boards.
    ///
    /// # Errors
    ///
    /// - [`QueensError::EmptyPopulation`] if `members` is empty.
    /// - [`QueensError::Configuration`] if a member's size differs from
    ///   `options.get_board_size()`.
    pub fn from_members(members: Vec<Board>, options: &SearchOptions) -> Result<Self> {
        if members.is_empty() {
            return Err(QueensError::EmptyPopulation);
        }

        let board_size = options.get_board_size();
        if let Some(stray) = members.iter().find(|board| board.size() != board_size) {
            return Err(QueensError::Configuration(format!(
                "Population member has size {}, expected {}",
                stray.size(),
                board_size
            )));
        }

        Ok(Self {
            members,
            threshold: FitnessThreshold::new(options.get_initial_fitness_threshold()),
            shutdown: Shutdown::new(),
            acceptance_threshold: options.get_acceptance_threshold(),
            log_level: options.get_log_level(),
            generation: 0,
        })
    }

    pub fn members(&self) -> &[Board] {
        &self.members
    }

    /// Number of completed rounds.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// A handle to the threshold shared with the annealing timer.
    pub fn threshold(&self) -> FitnessThreshold {
        self.threshold.clone()
    }

    /// A handle to the signal that stops [`Population::evolve`].
    pub fn shutdown(&self) -> Shutdown {
        self.shutdown.clone()
    }

    /// Picks a parent uniformly from the members whose fitness is at or below
    /// the threshold.
    ///
    /// While fewer than two members qualify, the whole population is eligible
    /// instead, so a strict threshold early on never stalls breeding.
    pub fn select_parent(&self, rng: &mut RandomNumberGenerator) -> &Board {
        let threshold = self.threshold.get();
        let candidates: Vec<&Board> = self
            .members
            .iter()
            .filter(|board| board.fitness() <= threshold)
            .collect();

        if candidates.len() < 2 {
            &self.members[rng.gen_index(self.members.len())]
        } else {
            candidates[rng.gen_index(candidates.len())]
        }
    }

    /// Returns `true` with probability `(threshold + 1) / 65`, capped at 1.
    pub fn should_mutate(&self, rng: &mut RandomNumberGenerator) -> bool {
        self.threshold.admits(rng.gen_roll(MUTATION_ROLL_CEILING))
    }

    /// Runs rounds until a board is accepted or the shutdown signal is seen.
    ///
    /// The signal is checked at the top of every round, so a round already in
    /// progress when it fires still runs to completion. Each round performs
    /// `ceil(size / 2)` breedings, and a child is returned as soon as its
    /// fitness meets the acceptance threshold, both straight out of crossover
    /// and again after an optional mutation.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`reproduce`] or [`mutate`]. Those mean a board
    /// in the population is malformed, so the search stops rather than retry.
    pub fn evolve(&mut self, rng: &mut RandomNumberGenerator) -> Result<SearchOutcome> {
        let size = self.members.len();
        let breedings = size.div_ceil(2);

        loop {
            if self.shutdown.is_triggered() {
                debug!(generation = self.generation, "Shutdown observed");
                return Ok(SearchOutcome::NoSolution);
            }

            let mut next_generation = Vec::with_capacity(breedings * 2);

            for _ in 0..breedings {
                let mother = self.select_parent(rng);
                let father = self.select_parent(rng);
                let (mut first, mut second) = reproduce(mother, father)?;

                for child in [&first, &second] {
                    if self.is_solution(child) {
                        return Ok(self.solved(child.clone()));
                    }
                }

                for child in [&mut first, &mut second] {
                    if self.should_mutate(rng) {
                        mutate(child, rng)?;
                        if self.is_solution(child) {
                            return Ok(self.solved(child.clone()));
                        }
                    }
                }

                next_generation.push(first);
                next_generation.push(second);
            }

            next_generation.truncate(size);
            self.members = next_generation;
            self.generation += 1;
            self.log_generation();
        }
    }

    fn is_solution(&self, board: &Board) -> bool {
        board.fitness() <= self.acceptance_threshold
    }

    fn solved(&self, board: Board) -> SearchOutcome {
        info!(
            generation = self.generation,
            fitness = board.fitness(),
            "Found a solution"
        );
        SearchOutcome::Solved(board)
    }

    fn log_generation(&self) {
        match self.log_level {
            LogLevel::Minimal => info!(generation = self.generation, "Generation complete"),
            LogLevel::Verbose => {
                let best = self.members.iter().map(Board::fitness).min().unwrap_or(0);
                info!(
                    generation = self.generation,
                    best_fitness = best,
                    threshold = self.threshold.get(),
                    "Generation complete"
                );
                for board in &self.members {
                    trace!(fitness = board.fitness(), pieces = ?board.pieces());
                }
            }
            LogLevel::None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Piece;

    fn options(population_size: usize) -> SearchOptions {
        SearchOptions::builder()
            .population_size(population_size)
            .build()
    }

    fn solution() -> Board {
        Board::from_pieces(
            8,
            [1, 5, 8, 6, 3, 7, 2, 4]
                .iter()
                .enumerate()
                .map(|(i, &y)| Piece::new(i + 1, y)),
        )
        .unwrap()
    }

    fn crowded() -> Board {
        crowded_of(8)
    }

    fn crowded_of(size: usize) -> Board {
        // All queens on one row: every queen attacks its neighbours.
        Board::from_pieces(size, (1..=size).map(|x| Piece::new(x, 1))).unwrap()
    }

    #[test]
    fn test_random_population_has_requested_size() {
        let mut rng = RandomNumberGenerator::from_seed(1);
        let population = Population::random(&options(30), &mut rng).unwrap();

        assert_eq!(population.members().len(), 30);
        assert_eq!(population.generation(), 0);
        assert_eq!(population.threshold().get(), 64);
    }

    #[test]
    fn test_parallel_build_is_deterministic() {
        let options = SearchOptions::builder()
            .population_size(40)
            .parallel_threshold(10)
            .build();

        let first =
            Population::random(&options, &mut RandomNumberGenerator::from_seed(9)).unwrap();
        let second =
            Population::random(&options, &mut RandomNumberGenerator::from_seed(9)).unwrap();

        assert_eq!(first.members(), second.members());
    }

    #[test]
    fn test_from_members_rejects_empty() {
        assert!(matches!(
            Population::from_members(Vec::new(), &options(10)),
            Err(QueensError::EmptyPopulation)
        ));
    }

    #[test]
    fn test_from_members_rejects_mismatched_sizes() {
        let members = vec![crowded(), crowded_of(6)];
        match Population::from_members(members, &options(2)) {
            Err(QueensError::Configuration(msg)) => assert!(msg.contains("size 6")),
            other => panic!("Expected Configuration error, got {:?}", other),
        }

        let resized = SearchOptions::builder().board_size(10).build();
        assert!(matches!(
            Population::from_members(vec![crowded()], &resized),
            Err(QueensError::Configuration(_))
        ));
    }

    #[test]
    fn test_select_parent_prefers_fit_members() {
        let options = SearchOptions::builder().initial_fitness_threshold(0).build();
        let members = vec![crowded(), solution(), crowded(), solution()];
        let population = Population::from_members(members, &options).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(2);

        for _ in 0..100 {
            assert_eq!(population.select_parent(&mut rng).fitness(), 0);
        }
    }

    #[test]
    fn test_select_parent_falls_back_to_everyone() {
        let options = SearchOptions::builder().initial_fitness_threshold(0).build();
        let members = vec![crowded(), solution(), crowded()];
        let population = Population::from_members(members, &options).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(2);

        let mut saw_crowded = false;
        for _ in 0..100 {
            let parent = population.select_parent(&mut rng);
            assert!(population
                .members()
                .iter()
                .any(|member| std::ptr::eq(member, parent)));
            saw_crowded |= parent.fitness() > 0;
        }
        assert!(saw_crowded);
    }

    #[test]
    fn test_should_mutate_follows_threshold() {
        let mut rng = RandomNumberGenerator::from_seed(6);

        let always = Population::from_members(vec![crowded()], &options(1)).unwrap();
        assert!((0..500).all(|_| always.should_mutate(&mut rng)));

        let rare = SearchOptions::builder().initial_fitness_threshold(0).build();
        let rare = Population::from_members(vec![crowded()], &rare).unwrap();
        let hits = (0..6500).filter(|_| rare.should_mutate(&mut rng)).count();
        // Expected 100 hits at probability 1/65.
        assert!((40..200).contains(&hits), "{} hits", hits);
    }

    #[test]
    fn test_should_mutate_tracks_annealing() {
        let mut rng = RandomNumberGenerator::from_seed(6);
        let population = Population::from_members(vec![crowded()], &options(1)).unwrap();

        let threshold = population.threshold();
        for _ in 0..7 {
            threshold.halve();
        }
        assert_eq!(threshold.get(), 0);

        let hits = (0..6500).filter(|_| population.should_mutate(&mut rng)).count();
        assert!(hits < 200, "{} hits", hits);
    }

    #[test]
    fn test_evolve_stops_on_shutdown() {
        let mut rng = RandomNumberGenerator::from_seed(3);
        let mut population = Population::random(&options(20), &mut rng).unwrap();

        population.shutdown().trigger();

        assert_eq!(population.evolve(&mut rng), Ok(SearchOutcome::NoSolution));
        assert_eq!(population.generation(), 0);
    }

    #[test]
    fn test_evolve_returns_a_solution_among_parents() {
        let mut rng = RandomNumberGenerator::from_seed(3);
        let mut population =
            Population::from_members(vec![solution(), solution()], &options(2)).unwrap();

        let outcome = population.evolve(&mut rng).unwrap();
        assert_eq!(outcome.solution(), Some(&solution()));
    }

    #[test]
    fn test_generation_size_stays_constant() {
        let options = SearchOptions::builder()
            .board_size(20)
            .population_size(7)
            .acceptance_threshold(0)
            .build();
        let mut rng = RandomNumberGenerator::from_seed(12);
        let mut population = Population::from_members(
            (0..7).map(|_| crowded_of(20)).collect(),
            &options,
        )
        .unwrap();

        let shutdown = population.shutdown();
        let stopper = std::thread::spawn(move || {
            std::thread::sleep(std::time::Duration::from_millis(50));
            shutdown.trigger();
        });

        population.evolve(&mut rng).unwrap();
        stopper.join().unwrap();

        assert!(population.generation() > 0);
        assert_eq!(population.members().len(), 7);
    }
}
