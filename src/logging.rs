// Logging
// `log` backend writing timestamped lines to stderr and an optional file

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Local};
use log::{LevelFilter, Log, Metadata, Record};

pub const LOG_FILE_NAME: &str = "theme-switcher.log";

pub struct ThemeLogger {
    file: Option<Mutex<std::fs::File>>,
    level: LevelFilter,
}

impl ThemeLogger {
    pub fn new(log_dir: Option<&Path>, level: LevelFilter) -> std::io::Result<Self> {
        let file = match log_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)?;
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(dir.join(LOG_FILE_NAME))?;
                Some(Mutex::new(file))
            }
            None => None,
        };

        Ok(Self { file, level })
    }
}

pub fn format_line(timestamp: DateTime<Local>, target: &str, level: log::Level, message: &str) -> String {
    let date = timestamp.format("%Y-%m-%d");
    let time = timestamp.format("%H:%M:%S");
    format!("[{date}][{time}][{target}][{level}] {message}")
}

impl Log for ThemeLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format_line(
            Local::now(),
            record.target(),
            record.level(),
            &record.args().to_string(),
        );

        eprintln!("{line}");

        if let Some(file) = &self.file {
            if let Ok(mut file) = file.try_lock() {
                let _ = writeln!(file, "{line}");
            }
        }
    }

    fn flush(&self) {
        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                let _ = file.flush();
            }
        }
    }
}

pub fn init_logger(
    log_dir: Option<&Path>,
    level: LevelFilter,
) -> Result<(), Box<dyn std::error::Error>> {
    let logger = ThemeLogger::new(log_dir, level)?;
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(level);
    Ok(())
}
