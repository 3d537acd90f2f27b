//! `--replace.<KEY>` flags.
//!
//! Accepted spellings are `--replace.KEY value` and `--replace.KEY=value`.
//! Matching arguments are removed so clap only sees its own flags. Nothing
//! after a bare `--` is touched.

use std::collections::BTreeMap;
use std::ffi::OsString;

use crate::error::{CliError, Result};

pub const REPLACE_PREFIX: &str = "--replace.";

/// Literal replacements collected from the command line, in key order.
pub type Replacements = BTreeMap<String, String>;

/// Split `args` into the arguments left for clap and the replacements.
///
/// The first element (the program name) is passed through unchanged. A
/// later flag for the same key wins.
pub fn extract_replacements<I, T>(args: I) -> Result<(Vec<OsString>, Replacements)>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut remaining = Vec::new();
    let mut replacements = Replacements::new();
    let mut args = args.into_iter().map(Into::into);
    let mut passthrough = false;

    while let Some(arg) = args.next() {
        if passthrough {
            remaining.push(arg);
            continue;
        }

        let flag = match arg.to_str() {
            Some("--") => {
                passthrough = true;
                remaining.push(arg);
                continue;
            }
            Some(text) => text.strip_prefix(REPLACE_PREFIX).map(str::to_string),
            None => None,
        };

        let Some(flag) = flag else {
            remaining.push(arg);
            continue;
        };

        let (key, value) = match flag.split_once('=') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => {
                let value = args
                    .next()
                    .and_then(|next| next.into_string().ok())
                    .filter(|next| !next.starts_with("--"))
                    .ok_or_else(|| {
                        CliError::InvalidArgument(format!(
                            "{}{} expects a value\n\nHint: Use --replace.{} <value> or --replace.{}=<value>",
                            REPLACE_PREFIX, flag, flag, flag
                        ))
                    })?;
                (flag, value)
            }
        };

        if key.is_empty() {
            return Err(CliError::InvalidArgument(format!(
                "{} needs a key\n\nHint: Write the text to replace after the dot, e.g. --replace.__VERSION__",
                REPLACE_PREFIX
            )));
        }

        tracing::debug!(key = %key, value = %value, "replacement from command line");
        replacements.insert(key, value);
    }

    Ok((remaining, replacements))
}
