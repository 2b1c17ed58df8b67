use chrono::Local;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

pub trait Logger: Send + Sync {
    fn log(&self, message: &str);
    fn debug_log(&self, message: &str);
}

fn format_line(message: &str) -> String {
    format!("{}: {}", Local::now().format("%Y-%m-%d %H:%M:%S"), message)
}

#[derive(Debug)]
pub struct FileLogger {
    log_file: PathBuf,
    debug: bool,
}

impl FileLogger {
    pub fn new(log_file: impl AsRef<Path>, debug: bool) -> std::io::Result<Self> {
        let log_file = log_file.as_ref().to_path_buf();
        // Create log directory if it doesn't exist
        if let Some(parent) = log_file.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(FileLogger { log_file, debug })
    }

    fn write_to_file(&self, message: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_file)?;

        writeln!(file, "{}", format_line(message))
    }
}

impl Logger for FileLogger {
    fn log(&self, message: &str) {
        if let Err(e) = self.write_to_file(message) {
            eprintln!("Failed to write to log file: {}", e);
        }
    }

    fn debug_log(&self, message: &str) {
        if self.debug {
            if let Err(e) = self.write_to_file(&format!("[DEBUG] {}", message)) {
                eprintln!("Failed to write debug log: {}", e);
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct StderrLogger {
    debug: bool,
}

impl StderrLogger {
    pub fn new(debug: bool) -> Self {
        Self { debug }
    }
}

impl Logger for StderrLogger {
    fn log(&self, message: &str) {
        eprintln!("{}", format_line(message));
    }

    fn debug_log(&self, message: &str) {
        if self.debug {
            eprintln!("{}", format_line(&format!("[DEBUG] {}", message)));
        }
    }
}

#[derive(Debug, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn log(&self, _message: &str) {}
    fn debug_log(&self, _message: &str) {}
}

// MultiLogger allows logging to multiple destinations
#[derive(Default)]
pub struct MultiLogger {
    loggers: Vec<Box<dyn Logger>>,
}

impl MultiLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, logger: Box<dyn Logger>) -> Self {
        self.loggers.push(logger);
        self
    }
}

impl Logger for MultiLogger {
    fn log(&self, message: &str) {
        for logger in &self.loggers {
            logger.log(message);
        }
    }

    fn debug_log(&self, message: &str) {
        for logger in &self.loggers {
            logger.debug_log(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_logger_respects_debug_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("resolver.log");

        let quiet = FileLogger::new(&path, false).unwrap();
        quiet.log("resolved connection");
        quiet.debug_log("hidden");

        let verbose = FileLogger::new(&path, true).unwrap();
        verbose.debug_log("shown");

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(": resolved connection"));
        assert!(lines[1].ends_with(": [DEBUG] shown"));
        assert!(!contents.contains("hidden"));
    }

    #[test]
    fn multi_logger_fans_out() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.log");
        let b = dir.path().join("b.log");

        let logger = MultiLogger::new()
            .with(Box::new(FileLogger::new(&a, false).unwrap()))
            .with(Box::new(FileLogger::new(&b, true).unwrap()))
            .with(Box::new(NoopLogger));
        logger.log("hello");
        logger.debug_log("details");

        assert_eq!(fs::read_to_string(&a).unwrap().lines().count(), 1);
        assert_eq!(fs::read_to_string(&b).unwrap().lines().count(), 2);
    }
}
