//! File appender implementation

use crate::core::{
    Appender, LogLevel, LogRecord, LoggerError, OutputFormat, Result, TransportSettings,
    TransportSpec,
};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub struct FileAppender {
    name: String,
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    settings: TransportSettings,
    output_format: OutputFormat,
}

impl FileAppender {
    /// Open `path` for appending, writing JSON lines at `info` and above
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let settings = TransportSettings {
            json: true,
            ..TransportSettings::default()
        };
        Self::open("file", path.into(), settings)
    }

    /// Build from a `file` entry of the `log` configuration
    ///
    /// `filename` is required; `dirname`, when set, is prepended to it. Lines
    /// are JSON unless `json` is `false`, and the level label is never colored.
    pub fn from_spec(spec: &TransportSpec) -> Result<Self> {
        let filename = spec
            .str_option("filename")
            .ok_or_else(|| LoggerError::config(spec.component(), "missing 'filename'"))?;

        let path = match spec.str_option("dirname") {
            Some(dir) => Path::new(dir).join(filename),
            None => PathBuf::from(filename),
        };

        let mut settings = TransportSettings::from_spec(spec, true)?;
        settings.colorize = false;
        Self::open(spec.name(), path, settings)
    }

    fn open(name: impl Into<String>, path: PathBuf, settings: TransportSettings) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::io_operation(
                    format!("opening '{}'", path.display()),
                    "cannot open log file for append",
                    e,
                )
            })?;

        Ok(Self {
            name: name.into(),
            path,
            writer: Some(BufWriter::new(file)),
            output_format: OutputFormat::from_settings(&settings),
            settings,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.settings.level = level;
        self
    }

    /// Switch between JSON lines and plain text lines
    #[must_use]
    pub fn with_json(mut self, json: bool) -> Self {
        self.settings.json = json;
        self.output_format = OutputFormat::from_settings(&self.settings);
        self
    }
}

impl Appender for FileAppender {
    fn append(&mut self, record: &LogRecord) -> Result<()> {
        let writer = self.writer.as_mut().ok_or_else(|| {
            LoggerError::file_appender(self.path.display().to_string(), "writer not initialized")
        })?;

        let mut output = self.output_format.format(record, &self.settings);
        output.push('\n');

        writer.write_all(output.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn level(&self) -> LogLevel {
        self.settings.level
    }

    fn is_silent(&self) -> bool {
        self.settings.silent
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.flush();
    }
}
