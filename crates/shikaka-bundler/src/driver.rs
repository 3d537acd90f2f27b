//! The format loop.
//!
//! ```text
//! Init → DiscoverEntries → format[0] → format[1] → … → Done
//!                              ↘ FailedAt(format[i])
//! ```
//!
//! Formats run strictly one after another. The first failure stops the loop;
//! whatever earlier formats wrote stays on disk.

use std::path::Path;
use std::time::{Duration, Instant};

use tracing::Instrument;

use crate::assemble::assemble_config;
use crate::bundler::Bundler;
use crate::discovery::{ComponentEntry, InputMap, discover_entries};
use crate::external::ExternalPredicate;
use crate::format::ModuleFormat;
use crate::manifest::read_manifest;
use crate::output::writer::{WrittenFile, apply_addons, write_bundle_to};
use crate::request::BuildRequest;
use crate::tsconfig::{PathAliases, read_path_aliases};
use crate::{ConfigurationError, Error, Result};

/// Progress sink for a build.
pub trait Reporter: Send + Sync {
    fn start(&self, message: &str);
    fn update(&self, message: &str);
    fn succeed(&self, message: &str);
    fn fail(&self, message: &str);
}

/// Reporter that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn start(&self, _message: &str) {}
    fn update(&self, _message: &str) {}
    fn succeed(&self, _message: &str) {}
    fn fail(&self, _message: &str) {}
}

/// Outcome of one format.
#[derive(Debug, Clone)]
pub struct FormatSummary {
    pub format: ModuleFormat,
    pub files: Vec<WrittenFile>,
    pub elapsed: Duration,
}

impl FormatSummary {
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }
}

/// Outcome of a whole build.
#[derive(Debug, Clone)]
pub struct BuildSummary {
    pub inputs: InputMap,
    pub components: Vec<ComponentEntry>,
    pub external: ExternalPredicate,
    pub formats: Vec<FormatSummary>,
    pub elapsed: Duration,
}

impl BuildSummary {
    pub fn total_size(&self) -> u64 {
        self.formats.iter().map(FormatSummary::total_size).sum()
    }
}

/// Run every requested format.
pub async fn run_build(
    request: &BuildRequest,
    bundler: &dyn Bundler,
    reporter: &dyn Reporter,
) -> Result<BuildSummary> {
    let started = Instant::now();

    match prepare_and_build(request, bundler, reporter, started).await {
        Ok(summary) => {
            reporter.succeed(&format!(
                "Built {} format(s) in {}ms",
                summary.formats.len(),
                summary.elapsed.as_millis()
            ));
            Ok(summary)
        }
        Err(err) => {
            reporter.fail(&err.to_string());
            Err(err)
        }
    }
}

async fn prepare_and_build(
    request: &BuildRequest,
    bundler: &dyn Bundler,
    reporter: &dyn Reporter,
    started: Instant,
) -> Result<BuildSummary> {
    if !is_dir(&request.root_dir).await? {
        return Err(ConfigurationError::RootNotFound(request.root_dir.clone()).into());
    }

    clean_out_dir(&request.out_dir).await?;

    let manifest = read_manifest(&request.root_dir).await?;
    let external = ExternalPredicate::from_manifest(&manifest);
    tracing::debug!(external = ?external.names(), "external dependencies");

    let main_entry = request.root_dir.join(&request.entry_file);
    if !exists(&main_entry).await? {
        return Err(ConfigurationError::EntryNotFound(main_entry).into());
    }
    let path_aliases = match &request.ts_config {
        Some(ts_config) => read_path_aliases(ts_config).await?,
        None => PathAliases::new(),
    };

    let discovery =
        discover_entries(&request.root_dir, &request.entry_file, request.language()).await?;
    tracing::info!(
        entries = discovery.inputs.len(),
        components = discovery.components.len(),
        "discovered entries"
    );

    reporter.start("Bundling");

    let mut formats = Vec::with_capacity(request.formats.len());
    for (index, name) in request.formats.iter().enumerate() {
        let span = tracing::info_span!("format", name = %name);
        let summary = build_format(
            request,
            &discovery.inputs,
            &external,
            &path_aliases,
            name,
            index,
            bundler,
            reporter,
        )
        .instrument(span)
        .await?;
        formats.push(summary);
    }

    Ok(BuildSummary {
        inputs: discovery.inputs,
        components: discovery.components,
        external,
        formats,
        elapsed: started.elapsed(),
    })
}

async fn build_format(
    request: &BuildRequest,
    inputs: &InputMap,
    external: &ExternalPredicate,
    path_aliases: &PathAliases,
    name: &str,
    index: usize,
    bundler: &dyn Bundler,
    reporter: &dyn Reporter,
) -> Result<FormatSummary> {
    let started = Instant::now();
    reporter.update(&format!("Bundle for '{}'", name));

    let (input, output) = assemble_config(request, inputs, external, name, index)?;
    let input = input.with_path_aliases(path_aliases.clone());

    let mut bundle = bundler.bundle(&input, &output).await?;
    apply_addons(&mut bundle, output.banner.as_deref(), output.footer.as_deref())?;
    let files = write_bundle_to(&bundle, &output.dir)?;

    let elapsed = started.elapsed();
    tracing::info!(files = files.len(), elapsed_ms = elapsed.as_millis() as u64, "format written");

    Ok(FormatSummary {
        format: output.format,
        files,
        elapsed,
    })
}

/// Remove `out_dir` recursively; a missing directory is fine.
async fn clean_out_dir(out_dir: &Path) -> Result<()> {
    match tokio::fs::remove_dir_all(out_dir).await {
        Ok(()) => {
            tracing::debug!(path = %out_dir.display(), "removed output directory");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(Error::Filesystem {
            path: out_dir.to_path_buf(),
            source,
        }),
    }
}

async fn exists(path: &Path) -> Result<bool> {
    tokio::fs::try_exists(path)
        .await
        .map_err(|source| Error::Filesystem {
            path: path.to_path_buf(),
            source,
        })
}

async fn is_dir(path: &Path) -> Result<bool> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) => Ok(metadata.is_dir()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(Error::Filesystem {
            path: path.to_path_buf(),
            source,
        }),
    }
}
