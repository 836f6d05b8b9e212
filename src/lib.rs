pub mod checkpoint;
pub mod io_utils;
pub mod power;
pub mod results;
pub mod search;

pub use checkpoint::{CheckpointStore, FileCheckpointStore, MemoryCheckpointStore};
pub use power::{evaluate_exponent, power_of_two, qualifies, ExponentResult, FORBIDDEN_DIGITS};
pub use results::{summarize, FileResultSink, MemoryResultSink, ResultSink, ResultsSummary};
pub use search::{run_search, SearchConfig, SearchEvent, SearchOutcome};
