//! Layered configuration loading
//!
//! `defaults/yaml-structure.default.toml` is embedded into the crate so that the documented
//! defaults and runtime behavior stay in sync. The command-line tool layers a
//! `yaml-structure.toml` from the working directory, then any `--config` file, then a
//! `--format` flag on top, via [`Loader`].

use crate::yaml::formats::Format;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../../defaults/yaml-structure.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StructureConfig {
    pub document: DocumentConfig,
    pub inspect: InspectConfig,
}

/// How source text is turned into lines and indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DocumentConfig {
    /// Comment lines get an undefined indentation, exactly like blank lines.
    pub comments_as_blank: bool,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            comments_as_blank: true,
        }
    }
}

/// Controls the `inspect` output of the command-line tool.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InspectConfig {
    pub format: Format,
}

/// Name of the per-project configuration file picked up from the working directory.
pub const PROJECT_CONFIG_FILE: &str = "yaml-structure.toml";

/// Layers configuration sources over the embedded defaults, lowest precedence first:
/// defaults, project file, explicit file, command-line format.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
    files: Vec<PathBuf>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self {
            builder,
            files: Vec::new(),
        }
    }

    /// Layer `dir/yaml-structure.toml` when it exists.
    pub fn with_project_dir(self, dir: impl AsRef<Path>) -> Self {
        let path = dir.as_ref().join(PROJECT_CONFIG_FILE);
        if path.is_file() {
            self.layer(path, false)
        } else {
            self
        }
    }

    /// Layer a file the user asked for. A missing file fails at build time.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref().to_path_buf(), true)
    }

    /// Force the output format, above every file.
    pub fn with_format(mut self, format: Format) -> Result<Self, ConfigError> {
        self.builder = self.builder.set_override("inspect.format", format.name())?;
        Ok(self)
    }

    /// Files layered so far, in precedence order.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn build(self) -> Result<StructureConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }

    fn layer(mut self, path: PathBuf, required: bool) -> Self {
        let source = File::from(path.as_path())
            .format(FileFormat::Toml)
            .required(required);
        self.builder = self.builder.add_source(source);
        self.files.push(path);
        self
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_toml(dir: &TempDir, name: &str, text: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, text).expect("write config");
        path
    }

    #[test]
    fn loads_default_config() {
        let config = Loader::new().build().expect("defaults to deserialize");
        assert!(config.document.comments_as_blank);
        assert_eq!(config.inspect.format, Format::Dump);
        assert_eq!(config.document, DocumentConfig::default());
    }

    #[test]
    fn format_flag_beats_files() {
        let dir = TempDir::new().expect("temp dir");
        let file = write_toml(&dir, "custom.toml", "[inspect]\nformat = \"yaml\"\n");
        let config = Loader::new()
            .with_file(&file)
            .with_format(Format::Json)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.inspect.format, Format::Json);
    }

    #[test]
    fn explicit_file_beats_project_file() {
        let dir = TempDir::new().expect("temp dir");
        write_toml(
            &dir,
            PROJECT_CONFIG_FILE,
            "[inspect]\nformat = \"yaml\"\n[document]\ncomments_as_blank = false\n",
        );
        let explicit = write_toml(&dir, "custom.toml", "[inspect]\nformat = \"json\"\n");

        let loader = Loader::new().with_project_dir(dir.path()).with_file(&explicit);
        assert_eq!(
            loader.files(),
            [dir.path().join(PROJECT_CONFIG_FILE), explicit.clone()]
        );
        let config = loader.build().expect("config to build");
        assert_eq!(config.inspect.format, Format::Json);
        // Keys the explicit file leaves alone come from the project file
        assert!(!config.document.comments_as_blank);
    }

    #[test]
    fn project_dir_without_file_is_skipped() {
        let dir = TempDir::new().expect("temp dir");
        let loader = Loader::new().with_project_dir(dir.path());
        assert!(loader.files().is_empty());
        assert_eq!(
            loader.build().expect("config to build").inspect.format,
            Format::Dump
        );
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = Loader::new()
            .with_file("/definitely/not/here/yaml-structure.toml")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn unknown_format_in_file_is_rejected() {
        let dir = TempDir::new().expect("temp dir");
        let file = write_toml(&dir, "bad.toml", "[inspect]\nformat = \"xml\"\n");
        assert!(Loader::new().with_file(&file).build().is_err());
    }
}
