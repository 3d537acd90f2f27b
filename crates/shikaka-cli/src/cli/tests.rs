#[cfg(test)]
mod tests {
    use crate::cli::{Cli, join_switch_values};
    use clap::{CommandFactory, Parser};
    use std::ffi::OsString;
    use std::path::PathBuf;

    fn parse_joined(args: &[&str]) -> Cli {
        let args: Vec<OsString> = args.iter().map(OsString::from).collect();
        Cli::try_parse_from(join_switch_values(args)).unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_are_left_to_configuration() {
        let cli = Cli::try_parse_from(["shikaka", "src/index.js"]).unwrap();

        assert_eq!(cli.input, PathBuf::from("src/index.js"));
        assert!(cli.root_dir.is_none());
        assert!(cli.out_dir.is_none());
        assert!(cli.formats.is_empty());
        assert!(cli.css_modules.is_none());
        assert!(!cli.no_css_modules);
        assert!(!cli.minify && !cli.report && !cli.sourcemap);
    }

    #[test]
    fn test_repeated_formats_keep_order() {
        let cli = Cli::try_parse_from([
            "shikaka",
            "src/index.js",
            "--format",
            "es",
            "-f",
            "cjs",
            "--format=umd",
        ])
        .unwrap();

        assert_eq!(cli.formats, vec!["es", "cjs", "umd"]);
    }

    #[test]
    fn test_css_modules_forms() {
        let bare = Cli::try_parse_from(["shikaka", "--css-modules", "src/index.js"]).unwrap();
        assert_eq!(bare.css_modules.as_deref(), Some("true"));
        assert_eq!(bare.input, PathBuf::from("src/index.js"));

        let off = Cli::try_parse_from(["shikaka", "src/index.js", "--css-modules=false"]).unwrap();
        assert_eq!(off.css_modules.as_deref(), Some("false"));

        let template =
            Cli::try_parse_from(["shikaka", "src/index.js", "--css-modules=[local]_[hash]"])
                .unwrap();
        assert_eq!(template.css_modules.as_deref(), Some("[local]_[hash]"));
    }

    #[test]
    fn test_css_modules_switch_value_after_space() {
        let off = parse_joined(&["shikaka", "src/index.js", "--css-modules", "false"]);
        assert_eq!(off.css_modules.as_deref(), Some("false"));
        assert_eq!(off.input, PathBuf::from("src/index.js"));

        let on = parse_joined(&["shikaka", "--css-modules", "true", "src/index.js"]);
        assert_eq!(on.css_modules.as_deref(), Some("true"));
        assert_eq!(on.input, PathBuf::from("src/index.js"));

        let bare = parse_joined(&["shikaka", "--css-modules", "src/index.js"]);
        assert_eq!(bare.css_modules.as_deref(), Some("true"));
        assert_eq!(bare.input, PathBuf::from("src/index.js"));
    }

    #[test]
    fn test_join_switch_values_stops_at_double_dash() {
        let args: Vec<OsString> = ["shikaka", "--", "--css-modules", "false"]
            .iter()
            .map(OsString::from)
            .collect();
        assert_eq!(join_switch_values(args.clone()), args);
    }

    #[test]
    fn test_css_modules_template_after_space_is_rejected() {
        let args: Vec<OsString> = ["shikaka", "src/index.js", "--css-modules", "[local]"]
            .iter()
            .map(OsString::from)
            .collect();
        assert!(Cli::try_parse_from(join_switch_values(args)).is_err());
    }

    #[test]
    fn test_no_css_modules_alias() {
        let cli = Cli::try_parse_from(["shikaka", "src/index.js", "--no-cssmodules"]).unwrap();
        assert!(cli.no_css_modules);

        let cli = Cli::try_parse_from(["shikaka", "src/index.js", "--no-css-modules"]).unwrap();
        assert!(cli.no_css_modules);
    }

    #[test]
    fn test_css_modules_conflict() {
        assert!(
            Cli::try_parse_from([
                "shikaka",
                "src/index.js",
                "--css-modules",
                "--no-css-modules"
            ])
            .is_err()
        );
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["shikaka", "src/index.js", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_input_is_required() {
        assert!(Cli::try_parse_from(["shikaka"]).is_err());
    }

    #[test]
    fn test_all_options() {
        let cli = Cli::try_parse_from([
            "shikaka",
            "src/index.tsx",
            "--root-dir",
            "packages/ui",
            "--out-dir",
            "build",
            "--minify",
            "--report",
            "--sourcemap",
            "--ts-config",
            "tsconfig.build.json",
            "--banner",
            "/* ui */",
            "--footer",
            "/* end */",
            "--quiet",
            "--no-color",
        ])
        .unwrap();

        assert_eq!(cli.root_dir, Some(PathBuf::from("packages/ui")));
        assert_eq!(cli.out_dir, Some(PathBuf::from("build")));
        assert!(cli.minify && cli.report && cli.sourcemap);
        assert_eq!(cli.ts_config, Some(PathBuf::from("tsconfig.build.json")));
        assert_eq!(cli.banner.as_deref(), Some("/* ui */"));
        assert_eq!(cli.footer.as_deref(), Some("/* end */"));
        assert!(cli.quiet && cli.no_color);
    }
}
