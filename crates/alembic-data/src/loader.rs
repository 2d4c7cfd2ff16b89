//! Reads laboratory definition files: format detection (RON/TOML/JSON), file
//! discovery and deserialization.

use crate::schema::LabDefinition;
use alembic_core::{LabError, Laboratory};
use std::path::{Path, PathBuf};
use tracing::debug;

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while loading a laboratory definition.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// No definition file with the given base name exists.
    #[error("definition '{base_name}' not found in {dir}")]
    Missing { base_name: String, dir: PathBuf },

    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two files with the same base name but different formats exist.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// The definition parsed but describes an invalid laboratory.
    #[error("invalid laboratory in {file}: {source}")]
    Lab {
        file: PathBuf,
        #[source]
        source: LabError,
    },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported definition file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

impl Format {
    const ALL: [(Format, &'static str); 3] =
        [(Format::Ron, "ron"), (Format::Toml, "toml"), (Format::Json, "json")];
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    let ext = path.extension().and_then(|e| e.to_str());
    Format::ALL
        .iter()
        .find(|(_, known)| Some(*known) == ext)
        .map(|(format, _)| *format)
        .ok_or_else(|| DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        })
}

// ===========================================================================
// File discovery
// ===========================================================================

/// Look for `{base_name}.ron`, `{base_name}.toml` and `{base_name}.json` in
/// `dir`. Returns `Ok(None)` if none exist, or `ConflictingFormats` if more
/// than one does.
pub fn find_data_file(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, DataLoadError> {
    let mut found: Option<PathBuf> = None;

    for (_, ext) in &Format::ALL {
        let candidate = dir.join(format!("{base_name}.{ext}"));
        if candidate.exists() {
            if let Some(existing) = found {
                return Err(DataLoadError::ConflictingFormats {
                    a: existing,
                    b: candidate,
                });
            }
            found = Some(candidate);
        }
    }

    Ok(found)
}

// ===========================================================================
// Deserialization
// ===========================================================================

/// Parse `content` as a definition in the given format. `file` is only used
/// for error context.
pub fn parse_definition(
    content: &str,
    format: Format,
    file: &Path,
) -> Result<LabDefinition, DataLoadError> {
    let parse_err = |detail: String| DataLoadError::Parse {
        file: file.to_path_buf(),
        detail,
    };
    match format {
        Format::Ron => ron::from_str(content).map_err(|e| parse_err(e.to_string())),
        Format::Json => serde_json::from_str(content).map_err(|e| parse_err(e.to_string())),
        Format::Toml => toml::from_str(content).map_err(|e| parse_err(e.to_string())),
    }
}

/// Read and parse a definition file.
pub fn load_definition(path: &Path) -> Result<LabDefinition, DataLoadError> {
    let format = detect_format(path)?;
    debug!(file = %path.display(), ?format, "loading laboratory definition");
    let content = std::fs::read_to_string(path)?;
    parse_definition(&content, format, path)
}

/// Read a definition file and build the laboratory it describes.
pub fn load_laboratory(path: &Path) -> Result<Laboratory, DataLoadError> {
    let definition = load_definition(path)?;
    definition.build().map_err(|source| DataLoadError::Lab {
        file: path.to_path_buf(),
        source,
    })
}

/// Find `{base_name}.{ron,toml,json}` in `dir` and load it.
pub fn load_laboratory_from_dir(dir: &Path, base_name: &str) -> Result<Laboratory, DataLoadError> {
    let path = find_data_file(dir, base_name)?.ok_or_else(|| DataLoadError::Missing {
        base_name: base_name.to_string(),
        dir: dir.to_path_buf(),
    })?;
    load_laboratory(&path)
}

// ===========================================================================
// Tests
// ===========================================================================
