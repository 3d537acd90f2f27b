//! Command-line interface definition for Shikaka.
//!
//! Shikaka has a single command: `shikaka <input> [options]`. Everything but
//! `--replace.<KEY>` is declared here with clap's derive API. Replacement
//! flags have a dynamic name, so [`replace`] pulls them out of the raw
//! arguments before clap sees them. [`join_switch_values`] lets
//! `--css-modules true|false` be written with a space.

pub mod replace;
mod tests;

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgAction, Parser};

pub use replace::{REPLACE_PREFIX, Replacements, extract_replacements};

const EXAMPLES: &str = "\
Examples:
  shikaka src/index.js
  shikaka src/index.js --format cjs --format es
  shikaka src/index.js --root-dir packages/ui-library
  shikaka src/index.js --css-modules false
  shikaka src/index.js --css-modules='[name]_[local]_[hash]'
  shikaka src/index.js --replace.__VERSION__ '\"1.2.0\"'";

/// Shikaka - bundle a component library into one or more module formats
#[derive(Parser, Debug)]
#[command(
    name = "shikaka",
    version,
    about = "Bundle a component library into one or more module formats",
    long_about = "Shikaka bundles a library entry file together with every\n\
                  components/<Name>/index.{ts,tsx,js} next to it, producing one output\n\
                  per component for each requested module format.",
    after_help = EXAMPLES
)]
pub struct Cli {
    /// Library entry file, relative to --root-dir
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// The root directory to resolve files from [default: .]
    #[arg(long, value_name = "DIR")]
    pub root_dir: Option<PathBuf>,

    /// Output directory, removed before every build [default: dist]
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Minify CSS and JS output files
    #[arg(long)]
    pub minify: bool,

    /// Print a report about the bundle sizes
    #[arg(long)]
    pub report: bool,

    /// Generate source maps
    #[arg(long)]
    pub sourcemap: bool,

    /// CSS class scoping: `true`, `false` or a naming template
    ///
    /// The default template is `[folder]__[local]`, where `[folder]` is the
    /// directory holding the stylesheet. `true` and `false` may follow the
    /// flag after a space; a template must be attached with `=`, as in
    /// `--css-modules='[name]_[local]'`.
    #[arg(
        long,
        value_name = "TEMPLATE",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub css_modules: Option<String>,

    /// Keep CSS class names as written
    #[arg(long, alias = "no-cssmodules", conflicts_with = "css_modules")]
    pub no_css_modules: bool,

    /// Path to the TypeScript configuration
    #[arg(long, value_name = "PATH")]
    pub ts_config: Option<PathBuf>,

    /// Output format (cjs | umd | es | iife), can be used multiple times [default: es]
    #[arg(short = 'f', long = "format", value_name = "FORMAT", action = ArgAction::Append)]
    pub formats: Vec<String>,

    /// Text placed at the top of every output file
    #[arg(long)]
    pub banner: Option<String>,

    /// Text placed at the bottom of every output file
    #[arg(long)]
    pub footer: Option<String>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Show minimal logs
    ///
    /// A failing format only prints its summary line instead of the full
    /// diagnostic.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

const CSS_MODULES_FLAG: &str = "--css-modules";

/// Rewrite `--css-modules true` and `--css-modules false` to their `=`
/// spelling. Any other following argument is left alone, since a bare
/// `--css-modules` is followed by the input file as often as not.
pub fn join_switch_values(args: Vec<OsString>) -> Vec<OsString> {
    let mut joined = Vec::with_capacity(args.len());
    let mut args = args.into_iter().peekable();

    while let Some(arg) = args.next() {
        if arg.to_str() == Some("--") {
            joined.push(arg);
            joined.extend(args);
            break;
        }

        if arg.to_str() == Some(CSS_MODULES_FLAG) {
            let value = args.next_if(|next| matches!(next.to_str(), Some("true" | "false")));
            if let Some(value) = value {
                let mut flag = OsString::from(CSS_MODULES_FLAG);
                flag.push("=");
                flag.push(value);
                joined.push(flag);
                continue;
            }
        }

        joined.push(arg);
    }

    joined
}
