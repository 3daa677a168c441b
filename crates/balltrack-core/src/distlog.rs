use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

// Append-only distance log: one fixed-precision line per computed z
// distance, capped at a sample count.
pub struct DistanceLog {
    writer: BufWriter<File>,
    written: u64,
    capacity: u64,
}

impl DistanceLog {
    pub fn create<P: AsRef<Path>>(path: P, capacity: u64) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(DistanceLog {
            writer: BufWriter::new(file),
            written: 0,
            capacity,
        })
    }

    // Samples past the cap are dropped silently.
    pub fn record(&mut self, distance_cm: f64) -> io::Result<()> {
        if self.is_full() {
            return Ok(());
        }
        writeln!(self.writer, "{distance_cm:.4}")?;
        self.written += 1;
        if self.is_full() {
            self.writer.flush()?;
        }
        Ok(())
    }

    pub fn is_full(&self) -> bool {
        self.written >= self.capacity
    }

    pub fn written(&self) -> u64 {
        self.written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn records_fixed_precision_lines_up_to_the_cap() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("distances.txt");

        let mut log = DistanceLog::create(&path, 2).unwrap();
        log.record(59.6331).unwrap();
        log.record(60.0).unwrap();
        log.record(61.5).unwrap();
        assert!(log.is_full());
        assert_eq!(log.written(), 2);
        drop(log);

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "59.6331\n60.0000\n");
    }
}
