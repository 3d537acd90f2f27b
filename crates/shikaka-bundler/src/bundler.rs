//! The bundler seam and its Rolldown implementation.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use path_clean::PathClean;
use rolldown::{
    BundlerBuilder as RolldownBundlerBuilder, BundlerOptions, GlobalsOutputOption, InputItem,
    RawMinifyOptions, ResolveOptions, SourceMapType,
};
use rolldown_common::Output;
use rustc_hash::FxHashMap;

use crate::assemble::{BundlerInputSpec, BundlerOutputSpec};
use crate::format::ModuleFormat;
use crate::plugins::plugins_for;
use crate::tsconfig::PathAliases;
use crate::{Error, Result};

/// What an emitted file is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactKind {
    Chunk {
        is_entry: bool,
        /// File name of this chunk's source map, if one was generated
        sourcemap: Option<String>,
    },
    Asset,
}

/// One file produced by the bundler, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub filename: String,
    pub contents: Vec<u8>,
    pub kind: ArtifactKind,
}

impl Artifact {
    pub fn chunk(filename: impl Into<String>, code: impl Into<String>, is_entry: bool) -> Self {
        Self {
            filename: filename.into(),
            contents: code.into().into_bytes(),
            kind: ArtifactKind::Chunk {
                is_entry,
                sourcemap: None,
            },
        }
    }

    pub fn asset(filename: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            contents: contents.into(),
            kind: ArtifactKind::Asset,
        }
    }
}

/// Everything one format produced, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    pub format: ModuleFormat,
    pub artifacts: Vec<Artifact>,
}

/// Runs analysis and code generation for one format.
///
/// Implementations must not write to disk; emission goes through
/// [`crate::output::writer`].
#[async_trait]
pub trait Bundler: Send + Sync {
    async fn bundle(&self, input: &BundlerInputSpec, output: &BundlerOutputSpec) -> Result<Bundle>;
}

/// [`Bundler`] backed by Rolldown.
///
/// A fresh Rolldown instance and plugin set is created per call, so no
/// plugin state leaks from one format into the next.
#[derive(Debug, Clone, Default)]
pub struct RolldownBundler;

impl RolldownBundler {
    pub fn new() -> Self {
        Self
    }

    /// Rolldown options for one format.
    pub fn options(input: &BundlerInputSpec, output: &BundlerOutputSpec) -> Result<BundlerOptions> {
        let cwd = absolute(&input.cwd)?;

        let items = input
            .inputs
            .iter()
            .map(|(name, path)| {
                Ok(InputItem {
                    name: Some(name.to_string()),
                    import: absolute(path)?.to_string_lossy().into_owned(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let globals: FxHashMap<String, String> = output
            .globals
            .iter()
            .map(|(module, global)| (module.clone(), global.clone()))
            .collect();

        let mut options = BundlerOptions {
            input: Some(items),
            cwd: Some(cwd),
            format: Some(output.format.to_rolldown()),
            entry_filenames: Some(output.entry_file_names.clone().into()),
            chunk_filenames: Some(output.chunk_file_names.clone().into()),
            globals: Some(GlobalsOutputOption::from(globals)),
            ..Default::default()
        };

        if output.sourcemap {
            options.sourcemap = Some(SourceMapType::File);
        }
        if input.pipeline.minify() {
            options.minify = Some(RawMinifyOptions::from(true));
        }
        if !input.path_aliases.is_empty() {
            options.resolve = Some(ResolveOptions {
                alias: Some(resolver_aliases(&input.path_aliases)?),
                ..Default::default()
            });
        }

        Ok(options)
    }
}

/// Aliases in the shape Rolldown's resolver takes, with absolute targets.
fn resolver_aliases(aliases: &PathAliases) -> Result<Vec<(String, Vec<Option<String>>)>> {
    aliases
        .iter()
        .map(|(prefix, targets)| {
            let targets = targets
                .iter()
                .map(|target| Ok(Some(absolute(target)?.to_string_lossy().into_owned())))
                .collect::<Result<Vec<_>>>()?;
            Ok((prefix.clone(), targets))
        })
        .collect()
}

#[async_trait]
impl Bundler for RolldownBundler {
    async fn bundle(&self, input: &BundlerInputSpec, output: &BundlerOutputSpec) -> Result<Bundle> {
        let format = output.format;
        let options = Self::options(input, output)?;

        let mut bundler = RolldownBundlerBuilder::default()
            .with_options(options)
            .with_plugins(plugins_for(input))
            .build()
            .map_err(|e| Error::from_rolldown_batch(format.as_str(), &e))?;

        let generated = bundler
            .generate()
            .await
            .map_err(|e| Error::from_rolldown_batch(format.as_str(), &e))?;

        let mut artifacts = Vec::with_capacity(generated.assets.len());
        let mut maps = Vec::new();

        for item in &generated.assets {
            match item {
                Output::Chunk(chunk) => {
                    let sourcemap = match (&chunk.map, &chunk.sourcemap_filename) {
                        (Some(map), Some(name)) => {
                            maps.push((name.clone(), map.to_json_string()));
                            Some(name.clone())
                        }
                        _ => None,
                    };
                    artifacts.push(Artifact {
                        filename: chunk.filename.to_string(),
                        contents: chunk.code.clone().into_bytes(),
                        kind: ArtifactKind::Chunk {
                            is_entry: chunk.is_entry,
                            sourcemap,
                        },
                    });
                }
                Output::Asset(asset) => {
                    artifacts.push(Artifact::asset(
                        asset.filename.to_string(),
                        asset.source.as_bytes().to_vec(),
                    ));
                }
            }
        }

        // Depending on the Rolldown version the map files are either already
        // in the asset list or only attached to their chunk.
        for (name, json) in maps {
            if !artifacts.iter().any(|a| a.filename == name) {
                artifacts.push(Artifact::asset(name, json.into_bytes()));
            }
        }

        tracing::debug!(format = %format, artifacts = artifacts.len(), "generated bundle");

        Ok(Bundle { format, artifacts })
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path)
        .map(|p| p.clean())
        .map_err(|source| Error::Filesystem {
            path: path.to_path_buf(),
            source,
        })
}
