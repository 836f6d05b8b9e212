use num_bigint::BigUint;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Append-only sink for qualifying powers of two.
///
/// Entries are written in the order the driver finds them, which is
/// increasing exponent order. Nothing is ever deduplicated, mutated, or
/// deleted.
pub trait ResultSink {
    fn append(&mut self, value: &BigUint) -> std::io::Result<()>;
}

/// File-backed sink: one decimal integer per line, created on first append.
#[derive(Debug, Clone)]
pub struct FileResultSink {
    path: PathBuf,
}

impl FileResultSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        FileResultSink {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultSink for FileResultSink {
    fn append(&mut self, value: &BigUint) -> std::io::Result<()> {
        crate::io_utils::append_decimal_line(&self.path, value)
    }
}

/// In-memory sink for tests and embedders.
#[derive(Debug, Clone, Default)]
pub struct MemoryResultSink {
    pub values: Vec<BigUint>,
}

impl MemoryResultSink {
    pub fn new() -> Self {
        MemoryResultSink { values: Vec::new() }
    }
}

impl ResultSink for MemoryResultSink {
    fn append(&mut self, value: &BigUint) -> std::io::Result<()> {
        self.values.push(value.clone());
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ResultsSummary {
    pub count: u64,
    pub last: Option<BigUint>,
}

/// Stream a results file and report how many entries it holds and the most
/// recent one. A missing file summarizes as empty (append creates it on
/// the first find).
pub fn summarize(path: &Path) -> std::io::Result<ResultsSummary> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(ResultsSummary {
                count: 0,
                last: None,
            });
        }
        Err(e) => return Err(e),
    };

    let reader = BufReader::new(file);
    let mut count = 0u64;
    let mut last = None;

    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let value: BigUint = trimmed.parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("invalid result entry in {}: {}", path.display(), e),
            )
        })?;
        count += 1;
        last = Some(value);
    }

    Ok(ResultsSummary { count, last })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_sink_appends_one_value_per_line() {
        let temp_file = "test_results_append.txt";
        std::fs::remove_file(temp_file).ok();

        let mut sink = FileResultSink::new(temp_file);
        sink.append(&BigUint::from(65536u32)).unwrap();
        sink.append(&BigUint::from(77777u32)).unwrap();

        assert_eq!(
            std::fs::read_to_string(temp_file).unwrap(),
            "65536\n77777\n"
        );

        std::fs::remove_file(temp_file).ok();
    }

    #[test]
    fn test_file_sink_creates_missing_file() {
        let temp_file = "test_results_create.txt";
        std::fs::remove_file(temp_file).ok();

        let mut sink = FileResultSink::new(temp_file);
        sink.append(&BigUint::from(3u32)).unwrap();
        assert!(std::path::Path::new(temp_file).exists());

        std::fs::remove_file(temp_file).ok();
    }

    #[test]
    fn test_file_sink_preserves_entries_across_instances() {
        // Results survive process restarts; a fresh sink keeps appending
        let temp_file = "test_results_across_runs.txt";
        std::fs::remove_file(temp_file).ok();

        let mut first = FileResultSink::new(temp_file);
        first.append(&BigUint::from(65536u32)).unwrap();
        drop(first);

        let mut second = FileResultSink::new(temp_file);
        second.append(&BigUint::from(99999u32)).unwrap();

        assert_eq!(
            std::fs::read_to_string(temp_file).unwrap(),
            "65536\n99999\n"
        );

        std::fs::remove_file(temp_file).ok();
    }

    #[test]
    fn test_memory_sink_keeps_append_order() {
        let mut sink = MemoryResultSink::new();
        sink.append(&BigUint::from(1u32)).unwrap();
        sink.append(&BigUint::from(2u32)).unwrap();
        assert_eq!(
            sink.values,
            vec![BigUint::from(1u32), BigUint::from(2u32)]
        );
    }

    #[test]
    fn test_summarize_counts_and_reports_last() {
        let temp_file = "test_results_summarize.txt";
        std::fs::write(temp_file, "65536\n77777\n99999\n").unwrap();

        let summary = summarize(Path::new(temp_file)).unwrap();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.last, Some(BigUint::from(99999u32)));

        std::fs::remove_file(temp_file).ok();
    }

    #[test]
    fn test_summarize_missing_file_is_empty() {
        let summary = summarize(Path::new("test_results_does_not_exist.txt")).unwrap();
        assert_eq!(summary.count, 0);
        assert_eq!(summary.last, None);
    }
}
