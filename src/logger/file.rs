/// File mirror for console logs
///
/// The log file is truncated when logging starts, so each run begins with a
/// fresh file. Until `init_file_logging` succeeds, writes are dropped.
use once_cell::sync::Lazy;
use std::fs::{self, File};
use std::io::{self, LineWriter, Write};
use std::path::Path;
use std::sync::Mutex;

static LOG_FILE: Lazy<Mutex<Option<LineWriter<File>>>> = Lazy::new(|| Mutex::new(None));

/// Open (and truncate) the log file at `path`
pub fn init_file_logging(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;

    if let Ok(mut guard) = LOG_FILE.lock() {
        *guard = Some(LineWriter::new(file));
    }
    Ok(())
}

/// Append a single line to the log file, if one is open
pub fn write_to_file(line: &str) {
    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(writer) = guard.as_mut() {
            if writeln!(writer, "{}", line).is_err() {
                // Disk full or file removed: stop mirroring instead of failing every line
                *guard = None;
            }
        }
    }
}

pub fn flush_file_logging() {
    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(writer) = guard.as_mut() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_is_overwritten_and_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("bot.log");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "stale line from a previous run\n").unwrap();

        init_file_logging(&path).unwrap();
        write_to_file("fresh line");
        flush_file_logging();

        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains("stale line"));
        assert!(content.contains("fresh line"));
    }
}
