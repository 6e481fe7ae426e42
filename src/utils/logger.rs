use crate::error::Result;
use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

/// `log` 後端：帶時間戳，寫入檔案或 stderr
#[derive(Debug)]
pub struct Logger {
    level: LevelFilter,
    file: Option<Mutex<File>>,
}

impl Logger {
    pub fn new(level: LevelFilter, log_file: Option<&Path>) -> Result<Self> {
        let file = match log_file {
            Some(path) => {
                if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                    fs::create_dir_all(dir)?;
                }
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                Some(Mutex::new(file))
            }
            None => None,
        };
        Ok(Logger { level, file })
    }

    /// Installs the logger as the global `log` backend.
    pub fn init(level: LevelFilter, log_file: Option<&Path>) -> Result<()> {
        let logger = Logger::new(level, log_file)?;
        log::set_boxed_logger(Box::new(logger))?;
        log::set_max_level(level);
        Ok(())
    }

    pub fn format_record(record: &Record) -> String {
        format!(
            "[{}] [{}] [{}] {}",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = Self::format_record(record);
        // Log::log 無法回報錯誤，寫入失敗時丟棄該行
        match &self.file {
            Some(file) => {
                if let Ok(mut file) = file.lock() {
                    let _ = writeln!(file, "{}", line);
                }
            }
            None => {
                let _ = writeln!(io::stderr(), "{}", line);
            }
        }
    }

    fn flush(&self) {
        match &self.file {
            Some(file) => {
                if let Ok(mut file) = file.lock() {
                    let _ = file.flush();
                }
            }
            None => {
                let _ = io::stderr().flush();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn respects_level_filter() {
        let logger = Logger::new(LevelFilter::Info, None).unwrap();
        let info = Metadata::builder().level(Level::Info).build();
        let debug = Metadata::builder().level(Level::Debug).build();
        assert!(logger.enabled(&info));
        assert!(!logger.enabled(&debug));
    }

    #[test]
    fn record_line_carries_level_target_and_message() {
        let line = Logger::format_record(
            &Record::builder()
                .args(format_args!("LY={}", 144))
                .level(Level::Warn)
                .target("dmg_core::ppu")
                .build(),
        );
        assert!(line.ends_with("[WARN] [dmg_core::ppu] LY=144"));
        assert!(line.starts_with('['));
    }

    #[test]
    fn writes_to_file() {
        let dir = std::env::temp_dir().join(format!("dmg_logger_{}", std::process::id()));
        let path = dir.join("run.log");
        let logger = Logger::new(LevelFilter::Trace, Some(&path)).unwrap();
        logger.log(
            &Record::builder()
                .args(format_args!("frame done"))
                .level(Level::Debug)
                .target("t")
                .build(),
        );
        logger.flush();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("[DEBUG] [t] frame done"));
        let _ = fs::remove_dir_all(&dir);
    }
}
