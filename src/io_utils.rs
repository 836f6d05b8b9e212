use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Save data to a file using JSON serialization
pub fn save_to_file<T: Serialize>(data: &T, path: &Path) -> std::io::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, data)?;
    Ok(())
}

/// Load data from a file using JSON deserialization
pub fn load_from_file<T: for<'a> Deserialize<'a>>(path: &Path) -> std::io::Result<T> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let data = serde_json::from_reader(reader)?;
    Ok(data)
}

/// Write a single decimal integer to a file, replacing prior contents.
///
/// The value is written as its plain base-10 string with no trailing
/// newline; this is the checkpoint wire format.
pub fn write_decimal_file(path: &Path, value: &BigUint) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(value.to_string().as_bytes())?;
    Ok(())
}

/// Read a file containing a single decimal integer.
///
/// Surrounding ASCII whitespace is tolerated; anything else is an
/// `InvalidData` error. A missing file surfaces as `NotFound`.
pub fn read_decimal_file(path: &Path) -> std::io::Result<BigUint> {
    let contents = std::fs::read_to_string(path)?;
    contents.trim().parse().map_err(|e| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("invalid decimal integer in {}: {}", path.display(), e),
        )
    })
}

/// Append a decimal integer plus newline to a file, creating it if absent.
pub fn append_decimal_line(path: &Path, value: &BigUint) -> std::io::Result<()> {
    let mut file = OpenOptions::new().append(true).create(true).open(path)?;
    writeln!(file, "{}", value)?;
    Ok(())
}
