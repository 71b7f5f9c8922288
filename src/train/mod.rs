pub mod epoch_stats;
pub mod loop_fn;
pub mod session;
pub mod train_config;

pub use epoch_stats::EpochStats;
pub use loop_fn::{train, train_with_progress};
pub use session::{StepOutcome, TrainedNetwork, TrainingSession};
pub use train_config::TrainConfig;
