//! Output module formats.

use std::fmt;
use std::str::FromStr;

use rolldown::OutputFormat;

use crate::Error;

/// One output module format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleFormat {
    /// ECMAScript modules
    Es,
    /// CommonJS
    Cjs,
    /// Universal Module Definition
    Umd,
    /// Immediately Invoked Function Expression
    Iife,
}

impl ModuleFormat {
    /// Canonical name, also used for the `[format]` placeholder.
    pub fn as_str(self) -> &'static str {
        match self {
            ModuleFormat::Es => "es",
            ModuleFormat::Cjs => "cjs",
            ModuleFormat::Umd => "umd",
            ModuleFormat::Iife => "iife",
        }
    }

    /// Rolldown's format for this output.
    pub fn to_rolldown(self) -> OutputFormat {
        match self {
            ModuleFormat::Es => OutputFormat::Esm,
            ModuleFormat::Cjs => OutputFormat::Cjs,
            ModuleFormat::Umd => OutputFormat::Umd,
            ModuleFormat::Iife => OutputFormat::Iife,
        }
    }
}

impl fmt::Display for ModuleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "es" | "esm" | "module" => Ok(ModuleFormat::Es),
            "cjs" | "commonjs" => Ok(ModuleFormat::Cjs),
            "umd" => Ok(ModuleFormat::Umd),
            "iife" => Ok(ModuleFormat::Iife),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}
