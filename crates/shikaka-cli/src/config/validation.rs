use crate::config::{CssModules, ShikakaConfig};
use crate::error::{BuildError, ConfigError, Result, ResultExt};
use path_clean::PathClean;

impl ShikakaConfig {
    /// Validate configuration for logical consistency.
    ///
    /// Format names are not checked here: an unknown format fails only its
    /// own turn in the build, after the formats before it were written.
    pub fn validate(&self) -> Result<()> {
        if self.format.is_empty() {
            return Err(ConfigError::MissingField {
                field: "format".to_string(),
                hint: "Pass at least one --format (cjs | umd | es | iife)".to_string(),
            }
            .into());
        }

        if let Some(blank) = self.format.iter().find(|f| f.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "format".to_string(),
                value: format!("'{}'", blank),
                hint: "Format names cannot be empty".to_string(),
            }
            .into());
        }

        if self.out_dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "outDir".to_string(),
                hint: "Pass --out-dir, e.g. --out-dir dist".to_string(),
            }
            .into());
        }

        // The output directory is removed before building; it must not
        // contain the project.
        let out_dir = std::path::absolute(&self.out_dir)
            .context("Failed to resolve the output directory")?
            .clean();
        let root_dir = std::path::absolute(&self.root_dir)
            .context("Failed to resolve the root directory")?
            .clean();
        if root_dir.starts_with(&out_dir) {
            return Err(BuildError::UnsafeOutputDir(self.out_dir.clone()).into());
        }

        if self.replace.keys().any(|key| key.is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "replace".to_string(),
                value: "''".to_string(),
                hint: "Replacement keys cannot be empty".to_string(),
            }
            .into());
        }

        if let CssModules::Template(template) = &self.css_modules {
            if template.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "cssModules".to_string(),
                    value: "''".to_string(),
                    hint: "Use true, false or a template such as [folder]__[local]".to_string(),
                }
                .into());
            }
        }

        Ok(())
    }
}
