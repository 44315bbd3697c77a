//! Logging setup for the conversion binary.
//!
//! Library code only talks to the `log` facade. The entry point builds a
//! [`LoggingConfig`] and calls [`init`] once; nothing is configured at load
//! time.

use std::{
    fs::{self, File, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use log::{LevelFilter, Record};

use crate::error::BatchError;

/// Size at which the log file is rotated.
pub const DEFAULT_MAX_LOG_SIZE: u64 = 20 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub log_file: PathBuf,
    pub max_file_size: u64,
    pub level: LevelFilter,
    /// Also echo every line to stdout.
    pub stdout: bool,
}

impl LoggingConfig {
    pub fn new<P: Into<PathBuf>>(log_file: P) -> Self {
        Self {
            log_file: log_file.into(),
            max_file_size: DEFAULT_MAX_LOG_SIZE,
            level: LevelFilter::Info,
            stdout: true,
        }
    }

    pub fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    pub fn max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    pub fn stdout(mut self, yes: bool) -> Self {
        self.stdout = yes;
        self
    }
}

/// Builds the logger described by `config` without installing it.
///
/// `RUST_LOG` overrides `config.level`.
pub fn build_logger(config: &LoggingConfig) -> Result<env_logger::Logger, BatchError> {
    let file = RotatingFileWriter::open(&config.log_file, config.max_file_size).map_err(|error| {
        BatchError::Configuration(format!(
            "cannot open log file {}: {}",
            config.log_file.display(),
            error
        ))
    })?;

    let target = TeeWriter {
        file,
        stdout: config.stdout,
    };

    Ok(env_logger::Builder::new()
        .filter_level(config.level)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "{}", format_line(Utc::now(), record)))
        .target(env_logger::Target::Pipe(Box::new(target)))
        .build())
}

/// Installs the logger described by `config` as the global logger.
pub fn init(config: &LoggingConfig) -> Result<(), BatchError> {
    let logger = build_logger(config)?;
    let max_level = logger.filter();

    log::set_boxed_logger(Box::new(logger))
        .map_err(|error| BatchError::Configuration(error.to_string()))?;
    log::set_max_level(max_level);

    Ok(())
}

/// `MM:DD:HH:mm:ss | LEVEL    | module        | message`, time in UTC.
pub fn format_line(time: DateTime<Utc>, record: &Record) -> String {
    let module = record
        .module_path()
        .map(|path| path.rsplit("::").next().unwrap_or(path))
        .unwrap_or_default();

    format!(
        "{} | {:<8} | {:<13} | {}",
        time.format("%m:%d:%H:%M:%S"),
        record.level(),
        module,
        record.args()
    )
}

struct TeeWriter {
    file: RotatingFileWriter,
    stdout: bool,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write_all(buf)?;
        if self.stdout {
            io::stdout().lock().write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()?;
        if self.stdout {
            io::stdout().flush()?;
        }
        Ok(())
    }
}

/// Append-only file that is moved aside once it would grow past `max_size`.
///
/// The rotated file keeps the original name with a UTC timestamp inserted
/// before the extension, e.g. `va_scc.2026-10-19_08-05-03_000000.log`.
pub struct RotatingFileWriter {
    path: PathBuf,
    max_size: u64,
    file: File,
    written: u64,
}

impl RotatingFileWriter {
    pub fn open<P: AsRef<Path>>(path: P, max_size: u64) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = open_append(&path)?;
        let written = file.metadata()?.len();

        Ok(Self {
            path,
            max_size,
            file,
            written,
        })
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        fs::rename(&self.path, rotated_path(&self.path, Utc::now()))?;
        self.file = open_append(&self.path)?;
        self.written = 0;
        Ok(())
    }
}

impl Write for RotatingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // A single oversized line still lands in a fresh file.
        if self.written > 0 && self.written + buf.len() as u64 > self.max_size {
            self.rotate()?;
        }

        let written = self.file.write(buf)?;
        self.written += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

fn rotated_path(path: &Path, time: DateTime<Utc>) -> PathBuf {
    let stamp = time.format("%Y-%m-%d_%H-%M-%S_%6f");
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let name = match path.extension() {
        Some(extension) => format!("{}.{}.{}", stem, stamp, extension.to_string_lossy()),
        None => format!("{}.{}", stem, stamp),
    };

    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use std::{fs, io::Write, path::Path};

    use chrono::{TimeZone, Utc};
    use log::{Level, Log, Record};

    use super::{LoggingConfig, RotatingFileWriter, build_logger, format_line, rotated_path};

    #[test]
    fn line_format_pads_level_and_module() {
        let time = Utc.with_ymd_and_hms(2026, 10, 19, 8, 5, 3).unwrap();

        let line = format_line(
            time,
            &Record::builder()
                .args(format_args!("Skipping unparsable line"))
                .level(Level::Warn)
                .module_path(Some("va_scc_batch::va_scc"))
                .build(),
        );

        assert_eq!(
            line,
            "10:19:08:05:03 | WARN     | va_scc        | Skipping unparsable line"
        );
    }

    #[test]
    fn rotated_name_keeps_the_extension() {
        let time = Utc.with_ymd_and_hms(2026, 10, 19, 8, 5, 3).unwrap();

        let rotated = rotated_path(Path::new("/var/log/va_scc.log"), time);

        assert_eq!(
            rotated.to_str(),
            Some("/var/log/va_scc.2026-10-19_08-05-03_000000.log")
        );
    }

    #[test]
    fn file_is_rotated_once_it_would_exceed_the_limit() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("va_scc.log");

        let mut writer = RotatingFileWriter::open(&path, 64).unwrap();
        writer.write_all(&[b'a'; 40]).unwrap();
        writer.write_all(&[b'b'; 40]).unwrap();
        writer.flush().unwrap();

        assert_eq!(fs::read(&path).unwrap(), vec![b'b'; 40]);

        let rotated: Vec<_> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|entry| entry != &path)
            .collect();
        assert_eq!(rotated.len(), 1);
        assert_eq!(fs::read(&rotated[0]).unwrap(), vec![b'a'; 40]);
    }

    #[test]
    fn existing_file_size_counts_toward_the_limit() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("va_scc.log");
        fs::write(&path, [b'a'; 60]).unwrap();

        let mut writer = RotatingFileWriter::open(&path, 64).unwrap();
        writer.write_all(&[b'b'; 10]).unwrap();

        assert_eq!(fs::read(&path).unwrap(), vec![b'b'; 10]);
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 2);
    }

    #[test]
    fn logger_appends_formatted_lines_to_the_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("va_scc.log");
        let config = LoggingConfig::new(&path).stdout(false);

        let logger = build_logger(&config).unwrap();
        logger.log(
            &Record::builder()
                .args(format_args!("Parsed 2 records"))
                .level(Level::Info)
                .module_path(Some("va_scc_batch::va_scc"))
                .build(),
        );
        logger.flush();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.ends_with(" | INFO     | va_scc        | Parsed 2 records\n"));
    }
}
