pub mod annealing;
pub mod launcher;
pub mod options;
pub mod population;
pub mod shutdown;

pub use annealing::FitnessThreshold;
pub use launcher::{SearchLauncher, SearchResult};
pub use options::{LogLevel, SearchOptions};
pub use population::{Population, SearchOutcome};
pub use shutdown::Shutdown;
