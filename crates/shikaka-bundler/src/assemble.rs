//! Per-format bundler configuration.
//!
//! [`assemble_config`] is a pure function of the request, the discovered
//! inputs, the external predicate and the format being built. It touches no
//! filesystem state, so identical arguments always give identical specs.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::discovery::InputMap;
use crate::external::ExternalPredicate;
use crate::format::ModuleFormat;
use crate::pipeline::Pipeline;
use crate::request::BuildRequest;
use crate::tsconfig::PathAliases;
use crate::Result;

/// Placeholder substituted with the canonical format name.
pub const FORMAT_PLACEHOLDER: &str = "[format]";

/// Entry file naming template.
pub const ENTRY_FILE_NAMES: &str = "[name].js";

/// Shared chunk naming template.
pub const CHUNK_FILE_NAMES: &str = "[name]-[hash].js";

/// Global variable names used by the `umd` and `iife` formats.
pub const DEFAULT_GLOBALS: &[(&str, &str)] = &[("react", "React"), ("react-dom", "ReactDOM")];

/// What the bundler reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundlerInputSpec {
    pub inputs: InputMap,
    pub external: ExternalPredicate,
    pub pipeline: Pipeline,
    /// Directory the bundler resolves relative paths from
    pub cwd: PathBuf,
    /// Import prefixes mapped to directories, from the TypeScript `paths`
    pub path_aliases: PathAliases,
}

impl BundlerInputSpec {
    pub fn with_path_aliases(mut self, path_aliases: PathAliases) -> Self {
        self.path_aliases = path_aliases;
        self
    }
}

/// Where and how the bundler writes one format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundlerOutputSpec {
    pub format: ModuleFormat,
    pub dir: PathBuf,
    /// Entry naming template with `[format]` already rendered
    pub entry_file_names: String,
    /// Chunk naming template with `[format]` already rendered
    pub chunk_file_names: String,
    /// Whether file names carry a `<format>/` directory prefix
    pub format_prefix: bool,
    pub globals: BTreeMap<String, String>,
    pub sourcemap: bool,
    pub banner: Option<String>,
    pub footer: Option<String>,
}

/// Naming template for `base`, prefixed with `[format]/` for multi-format builds.
pub fn file_name_template(base: &str, format_prefix: bool) -> String {
    if format_prefix {
        format!("{FORMAT_PLACEHOLDER}/{base}")
    } else {
        base.to_string()
    }
}

/// Substitute `[format]` in `template`.
pub fn render_template(template: &str, format: ModuleFormat) -> String {
    template.replace(FORMAT_PLACEHOLDER, format.as_str())
}

/// Build the input and output description for one format.
///
/// `format_index` is the position of `format_name` in the request; only the
/// first format extracts the stylesheet. An unknown format name fails here,
/// before anything is handed to the bundler.
pub fn assemble_config(
    request: &BuildRequest,
    inputs: &InputMap,
    external: &ExternalPredicate,
    format_name: &str,
    format_index: usize,
) -> Result<(BundlerInputSpec, BundlerOutputSpec)> {
    let format: ModuleFormat = format_name.parse()?;
    let format_prefix = request.is_multi_format();

    let input = BundlerInputSpec {
        inputs: inputs.clone(),
        external: external.clone(),
        pipeline: Pipeline::for_request(request, format_index == 0),
        cwd: request.root_dir.clone(),
        path_aliases: PathAliases::new(),
    };

    let output = BundlerOutputSpec {
        format,
        dir: request.out_dir.clone(),
        entry_file_names: render_template(
            &file_name_template(ENTRY_FILE_NAMES, format_prefix),
            format,
        ),
        chunk_file_names: render_template(
            &file_name_template(CHUNK_FILE_NAMES, format_prefix),
            format,
        ),
        format_prefix,
        globals: DEFAULT_GLOBALS
            .iter()
            .map(|(module, global)| (module.to_string(), global.to_string()))
            .collect(),
        sourcemap: request.sourcemap,
        banner: request.banner.clone(),
        footer: request.footer.clone(),
    };

    tracing::debug!(
        format = %format,
        entries = input.inputs.len(),
        stages = ?input.pipeline.names(),
        entry_file_names = %output.entry_file_names,
        "assembled bundler config"
    );

    Ok((input, output))
}
