use walkdir::WalkDir;
use std::path::{Path, PathBuf};
use crate::error::{QarankError, Result};

/// Metadata for a discovered input file
#[derive(Debug, Clone)]
pub struct FileMetadata {
    pub relative_path: String,
    pub absolute_path: PathBuf,
    pub extension: String,
}

/// True for extensions an input parser is registered for.
///
/// **Supported extensions** (case-insensitive):
/// - Tagged text: `.txt`, `.tag`, `.pos`
/// - Annotated JSON: `.json`
pub fn is_supported_extension(extension: &str) -> bool {
    matches!(extension, "txt" | "tag" | "pos" | "json")
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Discover all annotated input files below `root`, sorted by path.
///
/// Files with unsupported extensions are skipped.
pub fn discover_files(root: &Path) -> Result<Vec<FileMetadata>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let extension = extension_of(path);
        if !is_supported_extension(&extension) {
            continue;
        }

        let relative_path = path
            .strip_prefix(root)
            .map_err(|_| QarankError::InvalidInput(
                format!("Failed to compute relative path for: {}", path.display())
            ))?
            .to_string_lossy()
            .to_string();

        files.push(FileMetadata {
            relative_path,
            absolute_path: path.to_path_buf(),
            extension,
        });
    }

    log::info!("Discovered {} input files in {}", files.len(), root.display());
    Ok(files)
}

/// Resolve command-line paths into input files.
///
/// Directories are walked; files are taken as given, whatever their extension
/// (the parser registry rejects unknown ones). Missing paths are an error.
pub fn collect_inputs(paths: &[PathBuf]) -> Result<Vec<FileMetadata>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            files.extend(discover_files(path)?);
        } else if path.is_file() {
            files.push(FileMetadata {
                relative_path: path.to_string_lossy().to_string(),
                absolute_path: path.clone(),
                extension: extension_of(path),
            });
        } else {
            return Err(QarankError::InvalidInput(
                format!("Input path does not exist: {}", path.display())
            ));
        }
    }

    Ok(files)
}
