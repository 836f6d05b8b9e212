use num_bigint::BigUint;
use std::path::{Path, PathBuf};

/// Persistent store for the next exponent to test.
///
/// The invariant across implementations: every exponent strictly below the
/// stored value has already been tested, and its qualifying value (if any)
/// already sits in the result sink. There is no atomicity between testing
/// an exponent and advancing the store, so a crash in between re-tests the
/// same exponent on the next run.
pub trait CheckpointStore {
    fn load(&self) -> std::io::Result<BigUint>;
    fn store(&mut self, next_exponent: &BigUint) -> std::io::Result<()>;
}

/// File-backed checkpoint: one decimal integer, no newline, no metadata.
///
/// `load` never creates the file; a missing or unparseable checkpoint is an
/// error for the caller to handle. `store` fully replaces the previous
/// contents (truncate-and-rewrite, not append).
///
/// # Examples
///
/// ```
/// use pow2_finder::{CheckpointStore, FileCheckpointStore};
/// use num_bigint::BigUint;
///
/// let path = std::env::temp_dir().join("pow2_finder_doc_checkpoint.txt");
/// let mut store = FileCheckpointStore::new(&path);
/// store.store(&BigUint::from(42u32)).unwrap();
/// assert_eq!(store.load().unwrap(), BigUint::from(42u32));
/// std::fs::remove_file(&path).ok();
/// ```
#[derive(Debug, Clone)]
pub struct FileCheckpointStore {
    path: PathBuf,
}

impl FileCheckpointStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        FileCheckpointStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CheckpointStore for FileCheckpointStore {
    fn load(&self) -> std::io::Result<BigUint> {
        crate::io_utils::read_decimal_file(&self.path)
    }

    fn store(&mut self, next_exponent: &BigUint) -> std::io::Result<()> {
        crate::io_utils::write_decimal_file(&self.path, next_exponent)
    }
}

/// In-memory checkpoint for tests and embedders; same contract, no I/O.
#[derive(Debug, Clone)]
pub struct MemoryCheckpointStore {
    next: BigUint,
}

impl MemoryCheckpointStore {
    pub fn new(next_exponent: BigUint) -> Self {
        MemoryCheckpointStore {
            next: next_exponent,
        }
    }

    pub fn next_exponent(&self) -> &BigUint {
        &self.next
    }
}

impl CheckpointStore for MemoryCheckpointStore {
    fn load(&self) -> std::io::Result<BigUint> {
        Ok(self.next.clone())
    }

    fn store(&mut self, next_exponent: &BigUint) -> std::io::Result<()> {
        self.next = next_exponent.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::ErrorKind;

    #[test]
    fn test_file_checkpoint_round_trip() {
        let temp_file = "test_checkpoint_round_trip.txt";
        std::fs::remove_file(temp_file).ok();

        let mut store = FileCheckpointStore::new(temp_file);
        store.store(&BigUint::from(12345u32)).unwrap();
        assert_eq!(store.load().unwrap(), BigUint::from(12345u32));

        std::fs::remove_file(temp_file).ok();
    }

    #[test]
    fn test_file_checkpoint_round_trip_beyond_64_bits() {
        let temp_file = "test_checkpoint_large.txt";
        std::fs::remove_file(temp_file).ok();

        let value: BigUint = "340282366920938463463374607431768211456"
            .parse()
            .unwrap();
        let mut store = FileCheckpointStore::new(temp_file);
        store.store(&value).unwrap();
        assert_eq!(store.load().unwrap(), value);

        std::fs::remove_file(temp_file).ok();
    }

    #[test]
    fn test_file_checkpoint_has_no_trailing_newline() {
        let temp_file = "test_checkpoint_no_newline.txt";
        std::fs::remove_file(temp_file).ok();

        let mut store = FileCheckpointStore::new(temp_file);
        store.store(&BigUint::from(42u32)).unwrap();
        assert_eq!(std::fs::read_to_string(temp_file).unwrap(), "42");

        std::fs::remove_file(temp_file).ok();
    }

    #[test]
    fn test_file_checkpoint_overwrites_previous_value() {
        let temp_file = "test_checkpoint_overwrite.txt";
        std::fs::remove_file(temp_file).ok();

        let mut store = FileCheckpointStore::new(temp_file);
        store.store(&BigUint::from(999999u32)).unwrap();
        store.store(&BigUint::from(7u32)).unwrap();
        assert_eq!(std::fs::read_to_string(temp_file).unwrap(), "7");

        std::fs::remove_file(temp_file).ok();
    }

    #[test]
    fn test_load_tolerates_trailing_newline() {
        // Hand-initialized checkpoint files often end with a newline
        let temp_file = "test_checkpoint_newline_ok.txt";
        std::fs::write(temp_file, "1000\n").unwrap();

        let store = FileCheckpointStore::new(temp_file);
        assert_eq!(store.load().unwrap(), BigUint::from(1000u32));

        std::fs::remove_file(temp_file).ok();
    }

    #[test]
    fn test_missing_checkpoint_is_not_found() {
        let store = FileCheckpointStore::new("test_checkpoint_does_not_exist.txt");
        let err = store.load().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_malformed_checkpoint_is_invalid_data() {
        let temp_file = "test_checkpoint_malformed.txt";
        std::fs::write(temp_file, "not a number").unwrap();

        let store = FileCheckpointStore::new(temp_file);
        let err = store.load().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);

        std::fs::remove_file(temp_file).ok();
    }

    #[test]
    fn test_empty_checkpoint_is_invalid_data() {
        let temp_file = "test_checkpoint_empty.txt";
        std::fs::write(temp_file, "").unwrap();

        let store = FileCheckpointStore::new(temp_file);
        let err = store.load().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);

        std::fs::remove_file(temp_file).ok();
    }

    #[test]
    fn test_memory_checkpoint_round_trip() {
        let mut store = MemoryCheckpointStore::new(BigUint::from(0u32));
        store.store(&BigUint::from(17u32)).unwrap();
        assert_eq!(store.load().unwrap(), BigUint::from(17u32));
        assert_eq!(store.next_exponent(), &BigUint::from(17u32));
    }
}
