//! End-to-end builds of small component libraries.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use walkdir::WalkDir;

fn shikaka(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("shikaka").unwrap();
    cmd.current_dir(dir).env("NO_COLOR", "1");
    cmd
}

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Files below `dir`, relative and `/` separated, sorted.
fn output_files(dir: &Path) -> Vec<String> {
    let mut files: Vec<String> = WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(dir)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    files.sort();
    files
}

/// `src/index.js` re-exporting two components, one of them styled.
fn library() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    write(
        &root.join("package.json"),
        r#"{
            "name": "ui-library",
            "dependencies": { "classnames": "^2.3.0" },
            "peerDependencies": { "react": "^18.0.0" }
        }"#,
    );
    write(
        &root.join("src/index.js"),
        "export { Button } from './components/Button';\nexport { Card } from './components/Card';\n",
    );
    write(
        &root.join("src/components/Button/index.js"),
        "import React from 'react';\n\
         import styles from './button.css';\n\
         export function Button() {\n\
           return React.createElement('button', { className: styles.button });\n\
         }\n",
    );
    write(
        &root.join("src/components/Button/button.css"),
        ".button { color: red; }\n",
    );
    write(
        &root.join("src/components/Card/index.js"),
        "import cx from 'classnames';\n\
         export function Card(props) {\n\
           return cx('card', props.className);\n\
         }\n",
    );
    // Not a component: no index file
    write(&root.join("src/components/helpers/util.js"), "export const x = 1;\n");

    temp
}

#[test]
fn test_single_format_writes_to_out_dir_root() {
    let temp = library();

    shikaka(temp.path()).arg("src/index.js").assert().success();

    let files = output_files(&temp.path().join("dist"));
    assert!(files.contains(&"index.js".to_string()), "{files:?}");
    assert!(files.contains(&"Button.js".to_string()), "{files:?}");
    assert!(files.contains(&"Card.js".to_string()), "{files:?}");
    assert!(!files.iter().any(|f| f.starts_with("es/")), "{files:?}");
    assert!(!files.iter().any(|f| f.contains("helpers")), "{files:?}");
}

#[test]
fn test_dependencies_stay_external() {
    let temp = library();

    shikaka(temp.path()).arg("src/index.js").assert().success();

    let card = fs::read_to_string(temp.path().join("dist/Card.js")).unwrap();
    assert!(card.contains("classnames"));
    let button = fs::read_to_string(temp.path().join("dist/Button.js")).unwrap();
    assert!(button.contains("react"));
}

#[test]
fn test_css_classes_are_scoped_by_folder() {
    let temp = library();

    shikaka(temp.path()).arg("src/index.js").assert().success();

    let css = fs::read_to_string(temp.path().join("dist/styles.css")).unwrap();
    assert!(css.contains("Button__button"), "{css}");
    let script = fs::read_to_string(temp.path().join("dist/Button.js")).unwrap();
    assert!(script.contains("Button__button"), "{script}");
}

#[test]
fn test_no_css_modules_keeps_class_names() {
    let temp = library();

    shikaka(temp.path())
        .args(["src/index.js", "--no-css-modules"])
        .assert()
        .success();

    let css = fs::read_to_string(temp.path().join("dist/styles.css")).unwrap();
    assert!(css.contains(".button"), "{css}");
    assert!(!css.contains("Button__button"), "{css}");
}

#[test]
fn test_css_modules_false_with_space() {
    let temp = library();

    shikaka(temp.path())
        .args(["src/index.js", "--css-modules", "false"])
        .assert()
        .success();

    let css = fs::read_to_string(temp.path().join("dist/styles.css")).unwrap();
    assert!(css.contains(".button"), "{css}");
    assert!(!css.contains("Button__button"), "{css}");
}

#[test]
fn test_multiple_formats_use_prefixes() {
    let temp = library();

    shikaka(temp.path())
        .args(["src/index.js", "--format", "es", "--format", "cjs"])
        .assert()
        .success();

    let files = output_files(&temp.path().join("dist"));
    for expected in ["es/index.js", "es/Button.js", "cjs/index.js", "cjs/Card.js"] {
        assert!(files.contains(&expected.to_string()), "{expected} missing: {files:?}");
    }
    // The stylesheet is extracted once
    assert_eq!(files.iter().filter(|f| f.ends_with(".css")).count(), 1, "{files:?}");
}

#[test]
fn test_failing_format_keeps_earlier_output() {
    let temp = library();

    shikaka(temp.path())
        .args(["src/index.js", "--format", "es", "--format", "notarealformat"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("notarealformat"));

    assert!(temp.path().join("dist/es/index.js").exists());
    assert!(!temp.path().join("dist/notarealformat").exists());
}

#[test]
fn test_stale_output_is_removed() {
    let temp = library();
    write(&temp.path().join("dist/Old.js"), "stale");

    shikaka(temp.path()).arg("src/index.js").assert().success();

    assert!(!temp.path().join("dist/Old.js").exists());
    assert!(temp.path().join("dist/index.js").exists());
}

#[test]
fn test_replace_and_banner() {
    let temp = library();
    write(
        &temp.path().join("src/index.js"),
        "export const version = __VERSION__;\nexport const mode = process.env.NODE_ENV;\n",
    );

    shikaka(temp.path())
        .args([
            "src/index.js",
            "--replace.__VERSION__",
            "\"1.2.3\"",
            "--banner",
            "/* ui-library */",
        ])
        .assert()
        .success();

    let index = fs::read_to_string(temp.path().join("dist/index.js")).unwrap();
    assert!(index.starts_with("/* ui-library */"), "{index}");
    assert!(index.contains("1.2.3"), "{index}");
    assert!(index.contains("production"), "{index}");
    assert!(!index.contains("__VERSION__"), "{index}");
}

#[test]
fn test_report_prints_sizes() {
    let temp = library();

    shikaka(temp.path())
        .args(["src/index.js", "--report"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Bundle Report"))
        .stderr(predicate::str::contains("Button.js"));
}

#[test]
fn test_root_dir_resolves_entry_and_manifest() {
    let workspace = TempDir::new().unwrap();
    let lib = library();
    let package = workspace.path().join("packages/ui");
    fs::create_dir_all(workspace.path().join("packages")).unwrap();
    fs::rename(lib.path(), &package).unwrap();

    shikaka(workspace.path())
        .args(["src/index.js", "--root-dir", "packages/ui", "--out-dir", "out"])
        .assert()
        .success();

    assert!(workspace.path().join("out/index.js").exists());
    assert!(workspace.path().join("out/Button.js").exists());
}

#[test]
fn test_scss_component_is_compiled_and_scoped() {
    let temp = library();
    write(
        &temp.path().join("src/components/Card/index.js"),
        "import styles from './index.module.scss';\n\
         export function Card() {\n\
           return styles.card;\n\
         }\n",
    );
    write(
        &temp.path().join("src/components/Card/index.module.scss"),
        "$radius: 2px;\n.card {\n  border-radius: $radius * 2;\n  .title { font-weight: bold; }\n}\n",
    );

    shikaka(temp.path()).arg("src/index.js").assert().success();

    let css = fs::read_to_string(temp.path().join("dist/styles.css")).unwrap();
    assert!(css.contains(".Card__card .Card__title"), "{css}");
    assert!(css.contains("4px"), "{css}");
    assert!(css.contains("Button__button"), "{css}");
    let script = fs::read_to_string(temp.path().join("dist/Card.js")).unwrap();
    assert!(script.contains("Card__card"), "{script}");
}

#[test]
fn test_css_imports_are_inlined_into_extracted_stylesheet() {
    let temp = library();
    write(
        &temp.path().join("src/components/Button/button.css"),
        "@import \"./tokens.css\";\n.button { color: red; }\n",
    );
    write(
        &temp.path().join("src/components/Button/tokens.css"),
        ".accent { color: teal; }\n",
    );

    shikaka(temp.path()).arg("src/index.js").assert().success();

    let css = fs::read_to_string(temp.path().join("dist/styles.css")).unwrap();
    assert!(!css.contains("@import"), "{css}");
    assert!(css.contains(".Button__accent"), "{css}");
    assert!(css.contains(".Button__button"), "{css}");
}

#[test]
fn test_less_stylesheet_fails_with_a_clear_error() {
    let temp = library();
    write(
        &temp.path().join("src/components/Footer/index.js"),
        "import styles from './index.module.less';\nexport const Footer = styles.footer;\n",
    );
    write(
        &temp.path().join("src/components/Footer/index.module.less"),
        "@color: red;\n.footer { color: @color; }\n",
    );

    shikaka(temp.path())
        .arg("src/index.js")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Less is not supported"));
}

#[test]
fn test_ts_config_paths_resolve() {
    let temp = library();
    write(
        &temp.path().join("tsconfig.json"),
        r#"{
            // path mapping only
            "compilerOptions": {
                "baseUrl": ".",
                "paths": { "@ui/*": ["src/components/*"] },
            },
        }"#,
    );
    write(
        &temp.path().join("src/index.js"),
        "export { Button } from '@ui/Button';\nexport { Card } from '@ui/Card';\n",
    );

    shikaka(temp.path())
        .args(["src/index.js", "--ts-config", "tsconfig.json"])
        .assert()
        .success();

    let index = fs::read_to_string(temp.path().join("dist/index.js")).unwrap();
    assert!(!index.contains("@ui/"), "{index}");
    assert!(temp.path().join("dist/Button.js").exists());
}
