use crate::cli::{Cli, Replacements};
use crate::config::ShikakaConfig;
use crate::error::{ConfigError, Result};
use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
};
use std::path::{Path, PathBuf};

/// Configuration file looked up in the root directory.
pub const CONFIG_FILE_NAME: &str = "shikaka.config.json";

const ENV_PREFIX: &str = "SHIKAKA_";

impl ShikakaConfig {
    /// Load configuration from every source.
    /// Priority: CLI args > environment variables > config file > defaults
    ///
    /// The config file is looked up in the root directory given by
    /// `--root-dir` or `SHIKAKA_ROOT_DIR`, else the current directory.
    pub fn load(cli: &Cli, replacements: &Replacements) -> Result<Self> {
        let root = cli
            .root_dir
            .clone()
            .or_else(root_dir_from_env)
            .unwrap_or_else(|| PathBuf::from("."));
        let config_file = root.join(CONFIG_FILE_NAME);

        Self::load_from(
            cli,
            replacements,
            config_file.is_file().then_some(config_file.as_path()),
        )
    }

    pub(crate) fn load_from(
        cli: &Cli,
        replacements: &Replacements,
        config_file: Option<&Path>,
    ) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default_config()));

        if let Some(path) = config_file {
            tracing::debug!(path = %path.display(), "loading configuration file");
            figment = figment.merge(Json::file(path));
        }

        figment = figment.merge(env_provider());

        let overrides = Self::overrides_from_cli(cli, replacements);
        figment = figment.merge(Serialized::defaults(overrides));

        figment.extract().map_err(|e| {
            ConfigError::InvalidValue {
                field: "configuration".to_string(),
                value: e.to_string(),
                hint: format!("Check {} syntax and field types", CONFIG_FILE_NAME),
            }
            .into()
        })
    }

    /// Get default configuration values.
    pub(crate) fn default_config() -> Self {
        Self {
            root_dir: PathBuf::from("."),
            out_dir: PathBuf::from("dist"),
            format: vec![shikaka_bundler::request::DEFAULT_FORMAT.to_string()],
            minify: false,
            sourcemap: false,
            report: false,
            css_modules: Default::default(),
            ts_config: None,
            banner: None,
            footer: None,
            replace: Default::default(),
        }
    }
}

/// `SHIKAKA_OUT_DIR` provides `outDir`.
fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX).map(|key| env_key_to_field(key.as_str()).into())
}

fn root_dir_from_env() -> Option<PathBuf> {
    Figment::from(env_provider())
        .extract_inner::<PathBuf>("rootDir")
        .ok()
}

/// `out_dir` becomes `outDir`.
fn env_key_to_field(key: &str) -> String {
    let mut field = String::with_capacity(key.len());
    let mut upper = false;
    for c in key.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            field.extend(c.to_uppercase());
            upper = false;
        } else {
            field.extend(c.to_lowercase());
        }
    }
    field
}
