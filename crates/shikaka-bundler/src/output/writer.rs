//! Secure file writing for bundle output.
//!
//! Every artifact path is normalized with `path_clean` and must stay inside
//! the output directory. Files are first written next to their target with a
//! `.tmp` suffix and renamed once all of them are on disk; if any step fails
//! the temporary files are removed again.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use path_clean::PathClean;

use crate::bundler::{Artifact, ArtifactKind, Bundle};
use crate::{Error, Result};

const SOURCE_MAP_COMMENT: &str = "//# sourceMappingURL=";

/// A file written to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    /// Path relative to the output directory, `/` separated
    pub filename: String,
    pub path: PathBuf,
    pub size: u64,
    pub is_entry: bool,
}

/// Insert `banner` and `footer` into every chunk.
///
/// The banner goes on its own line(s) above the code and the chunk's source
/// map is shifted down by the same number of lines. The footer goes below the
/// code but above a trailing `sourceMappingURL` comment.
pub fn apply_addons(bundle: &mut Bundle, banner: Option<&str>, footer: Option<&str>) -> Result<()> {
    if banner.is_none() && footer.is_none() {
        return Ok(());
    }

    let mut shifted_maps = Vec::new();

    for artifact in bundle.artifacts.iter_mut() {
        let ArtifactKind::Chunk { sourcemap, .. } = &artifact.kind else {
            continue;
        };

        let code = String::from_utf8_lossy(&artifact.contents).into_owned();
        artifact.contents = with_addons(&code, banner, footer).into_bytes();

        if let (Some(banner), Some(map)) = (banner, sourcemap) {
            shifted_maps.push((map.clone(), banner_block(banner).matches('\n').count()));
        }
    }

    for (map_name, lines) in shifted_maps {
        let Some(map) = bundle.artifacts.iter_mut().find(|a| a.filename == map_name) else {
            continue;
        };
        map.contents = shift_mappings(&map.contents, lines).map_err(|e| {
            Error::WriteFailure(format!("Failed to update source map '{}': {}", map_name, e))
        })?;
    }

    Ok(())
}

fn with_addons(code: &str, banner: Option<&str>, footer: Option<&str>) -> String {
    let (body, map_comment) = match code.rfind(SOURCE_MAP_COMMENT) {
        Some(idx) if !code[idx..].trim_end().contains('\n') => (&code[..idx], Some(&code[idx..])),
        _ => (code, None),
    };

    let mut out = String::with_capacity(code.len() + 64);
    if let Some(banner) = banner {
        out.push_str(&banner_block(banner));
    }
    out.push_str(body);
    if let Some(footer) = footer {
        if !out.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(footer);
        out.push('\n');
    }
    if let Some(comment) = map_comment {
        out.push_str(comment);
    }
    out
}

/// The text placed above the code: `banner` ending in exactly one added newline.
fn banner_block(banner: &str) -> Cow<'_, str> {
    if banner.ends_with('\n') {
        Cow::Borrowed(banner)
    } else {
        Cow::Owned(format!("{banner}\n"))
    }
}

/// Prefix the `mappings` of a v3 source map with `lines` empty lines.
fn shift_mappings(map: &[u8], lines: usize) -> serde_json::Result<Vec<u8>> {
    let mut value: serde_json::Value = serde_json::from_slice(map)?;
    if let Some(mappings) = value.get_mut("mappings") {
        if let Some(current) = mappings.as_str() {
            *mappings = serde_json::Value::String(format!("{}{}", ";".repeat(lines), current));
        }
    }
    serde_json::to_vec(&value)
}

/// Writes a bundle into `dir`.
///
/// Existing files are replaced. Returns the written files in artifact order.
pub fn write_bundle_to(bundle: &Bundle, dir: &Path) -> Result<Vec<WrittenFile>> {
    let dir = validate_and_normalize_dir(dir)?;

    fs::create_dir_all(&dir).map_err(|e| {
        Error::WriteFailure(format!(
            "Failed to create output directory '{}': {}",
            dir.display(),
            e
        ))
    })?;

    let mut operations = Vec::with_capacity(bundle.artifacts.len());
    for artifact in &bundle.artifacts {
        let target_path = validate_output_path(&dir, &artifact.filename)?;
        operations.push((target_path, artifact));
    }

    write_files_atomic(&operations)?;

    Ok(operations
        .iter()
        .map(|(path, artifact)| WrittenFile {
            filename: artifact.filename.replace('\\', "/"),
            path: path.clone(),
            size: artifact.contents.len() as u64,
            is_entry: matches!(artifact.kind, ArtifactKind::Chunk { is_entry: true, .. }),
        })
        .collect())
}

fn validate_and_normalize_dir(dir: &Path) -> Result<PathBuf> {
    let cleaned = dir.clean();

    if cleaned.is_absolute() {
        return Ok(cleaned);
    }

    Ok(std::env::current_dir()
        .map_err(|e| Error::InvalidOutputPath(format!("Failed to get current directory: {}", e)))?
        .join(&cleaned)
        .clean())
}

/// Resolve `filename` under `base_dir`, rejecting anything that escapes it.
fn validate_output_path(base_dir: &Path, filename: &str) -> Result<PathBuf> {
    if filename.is_empty() {
        return Err(Error::InvalidOutputPath("Empty file name".to_string()));
    }
    if filename.contains('\0') {
        return Err(Error::InvalidOutputPath(
            "Filename contains null byte".to_string(),
        ));
    }

    let full_path = base_dir.join(Path::new(filename).clean()).clean();

    if !full_path.starts_with(base_dir) || full_path == base_dir {
        return Err(Error::InvalidOutputPath(format!(
            "Path '{}' escapes output directory '{}' (resolved to '{}')",
            filename,
            base_dir.display(),
            full_path.display()
        )));
    }

    Ok(full_path)
}

fn temp_path_for(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

fn write_files_atomic(operations: &[(PathBuf, &Artifact)]) -> Result<()> {
    let mut temp_files = Vec::with_capacity(operations.len());

    for (target_path, artifact) in operations {
        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                cleanup_temp_files(&temp_files);
                Error::WriteFailure(format!(
                    "Failed to create directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let temp_path = temp_path_for(target_path);
        fs::write(&temp_path, &artifact.contents).map_err(|e| {
            cleanup_temp_files(&temp_files);
            Error::WriteFailure(format!(
                "Failed to write temporary file '{}': {}",
                temp_path.display(),
                e
            ))
        })?;

        temp_files.push((temp_path, target_path.clone()));
    }

    for (temp_path, target_path) in &temp_files {
        fs::rename(temp_path, target_path).map_err(|e| {
            cleanup_temp_files(&temp_files);
            Error::WriteFailure(format!(
                "Failed to rename '{}' to '{}': {}",
                temp_path.display(),
                target_path.display(),
                e
            ))
        })?;
    }

    Ok(())
}

fn cleanup_temp_files(temp_files: &[(PathBuf, PathBuf)]) {
    for (temp_path, _) in temp_files {
        if !temp_path.exists() {
            continue;
        }
        if let Err(e) = fs::remove_file(temp_path) {
            tracing::warn!(
                path = %temp_path.display(),
                error = %e,
                "failed to clean up temporary file"
            );
        }
    }
}
