use crate::checkpoint::CheckpointStore;
use crate::power::evaluate_exponent;
use crate::results::ResultSink;
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub checkpoint_file: String,
    pub results_file: String,
    /// Emit a progress event whenever the exponent is a multiple of this
    /// interval. 0 disables progress reporting.
    pub progress_interval: u64,
    /// Stop after testing this many exponents in the current run. `None`
    /// runs until cancelled or killed.
    pub limit: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            checkpoint_file: "checkpoint.txt".to_string(),
            results_file: "results.txt".to_string(),
            progress_interval: 1000,
            limit: None,
        }
    }
}

impl SearchConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> std::io::Result<Self> {
        crate::io_utils::load_from_file(path)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file(&self, path: &Path) -> std::io::Result<()> {
        crate::io_utils::save_to_file(self, path)
    }
}

#[derive(Debug, Clone)]
pub enum SearchEvent<'a> {
    Progress { exponent: u64 },
    Found { exponent: u64, value: &'a BigUint },
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub exponents_tested: u64,
    pub qualifying_found: u64,
    pub next_exponent: BigUint,
}

/// Enumerate powers of two until cancelled, appending qualifying values
///
/// Each iteration reads the next exponent from the checkpoint store, tests
/// 2^exponent against the forbidden digit set, appends the value to the
/// result sink when it qualifies, then advances the checkpoint. The
/// checkpoint is written after the append, so a crash mid-iteration
/// re-tests that exponent on the next run rather than skipping it.
///
/// The loop has no terminal state of its own; it stops when `cancel` is
/// set, when `config.limit` exponents have been tested this run, or on the
/// first I/O error (a missing or malformed checkpoint file is fatal).
///
/// # Arguments
///
/// * `config` - Progress interval and optional per-run limit
/// * `checkpoint` - Store holding the next exponent to test
/// * `results` - Sink receiving qualifying values
/// * `cancel` - Cooperative stop flag, checked before each exponent
/// * `on_event` - Callback receiving progress and find events
///
/// # Examples
///
/// ```
/// use pow2_finder::{run_search, MemoryCheckpointStore, MemoryResultSink, SearchConfig};
/// use num_bigint::BigUint;
/// use std::sync::atomic::AtomicBool;
///
/// let config = SearchConfig {
///     limit: Some(20),
///     ..SearchConfig::default()
/// };
/// let mut checkpoint = MemoryCheckpointStore::new(BigUint::from(0u32));
/// let mut results = MemoryResultSink::new();
/// let cancel = AtomicBool::new(false);
///
/// let outcome = run_search(&config, &mut checkpoint, &mut results, &cancel, |_| {}).unwrap();
/// assert_eq!(outcome.exponents_tested, 20);
/// assert_eq!(results.values, vec![BigUint::from(65536u32)]);
/// ```
pub fn run_search<C, R, F>(
    config: &SearchConfig,
    checkpoint: &mut C,
    results: &mut R,
    cancel: &AtomicBool,
    mut on_event: F,
) -> std::io::Result<SearchOutcome>
where
    C: CheckpointStore,
    R: ResultSink,
    F: FnMut(SearchEvent),
{
    let mut tested = 0u64;
    let mut found = 0u64;

    loop {
        if cancel.load(Ordering::Relaxed) {
            break;
        }
        if let Some(limit) = config.limit {
            if tested >= limit {
                break;
            }
        }

        let next = checkpoint.load()?;
        let exponent = next.to_u64().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("checkpoint exponent {} exceeds the supported range", next),
            )
        })?;

        if config.progress_interval > 0 && exponent % config.progress_interval == 0 {
            on_event(SearchEvent::Progress { exponent });
        }

        let result = evaluate_exponent(exponent);
        if result.qualifies {
            results.append(&result.value)?;
            found += 1;
            on_event(SearchEvent::Found {
                exponent,
                value: &result.value,
            });
        }

        checkpoint.store(&(next + 1u32))?;
        tested += 1;
    }

    Ok(SearchOutcome {
        exponents_tested: tested,
        qualifying_found: found,
        next_exponent: checkpoint.load()?,
    })
}
