use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SESSION: &str = r#"{
    "session_id": "smoke-1",
    "model": {"id": "claude-opus-4-5", "display_name": "Claude Opus 4.5"},
    "cost": {"total_cost_usd": 0.42, "total_duration_ms": 65000,
             "total_lines_added": 142, "total_lines_removed": 27},
    "context_window": {
        "context_window_size": 200000,
        "current_usage": {"input_tokens": 100000, "output_tokens": 6000,
                          "cache_creation_input_tokens": 10000,
                          "cache_read_input_tokens": 10000}
    }
}"#;

/// A `claude-scope` command isolated from the real home directory, config
/// and cache.
fn scope(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("claude-scope").expect("binary exists");
    cmd.env("HOME", dir.path())
        .env("CLAUDE_SCOPE_CONFIG", dir.path().join("config.json"))
        .env("CLAUDE_SCOPE_CACHE", dir.path().join("cache.json"))
        .env_remove("NO_COLOR")
        .env_remove("CLAUDE_SCOPE_LOG")
        .env_remove("COLUMNS");
    cmd
}

fn write_config(dir: &TempDir, json: &str) {
    std::fs::write(dir.path().join("config.json"), json).unwrap();
}

// -----------------------------------------------------------------------
// Basic CLI
// -----------------------------------------------------------------------

#[test]
fn help_shows_description() {
    let dir = TempDir::new().unwrap();
    scope(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("statusline"));
}

#[test]
fn version_shows_semver() {
    let dir = TempDir::new().unwrap();
    scope(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

// -----------------------------------------------------------------------
// Statusline rendering
// -----------------------------------------------------------------------

#[test]
fn renders_configured_line_from_stdin() {
    let dir = TempDir::new().unwrap();
    write_config(
        &dir,
        r#"{"lines": {"0": [{"id": "model"}, {"id": "cost"}, {"id": "lines"}]}}"#,
    );
    scope(&dir)
        .arg("--no-color")
        .write_stdin(SESSION)
        .assert()
        .success()
        .stdout("Claude Opus 4.5 $0.42 +142/-27\n");
}

#[test]
fn default_layout_renders_context_bar() {
    let dir = TempDir::new().unwrap();
    scope(&dir)
        .arg("--no-color")
        .write_stdin(SESSION)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Claude Opus 4.5 █████████████░░░░░░░ 63% $0.42 1m 5s +142/-27",
        ));
}

#[test]
fn multi_line_layout_with_custom_separator() {
    let dir = TempDir::new().unwrap();
    write_config(
        &dir,
        r#"{
            "separator": " | ",
            "lines": {
                "0": [{"id": "model", "style": "compact"}, {"id": "cost"}],
                "1": [{"id": "empty-line"}],
                "2": [{"id": "duration", "style": "labeled"}]
            }
        }"#,
    );
    scope(&dir)
        .arg("--no-color")
        .write_stdin(SESSION)
        .assert()
        .success()
        .stdout("Opus 4.5 | $0.42\n\u{2800}\nTime: 1m 5s\n");
}

#[test]
fn empty_object_exits_zero() {
    let dir = TempDir::new().unwrap();
    scope(&dir).write_stdin("{}").assert().success();
}

#[test]
fn empty_stdin_fails() {
    let dir = TempDir::new().unwrap();
    scope(&dir)
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no session telemetry"));
}

#[test]
fn invalid_json_fails() {
    let dir = TempDir::new().unwrap();
    scope(&dir)
        .write_stdin("not json {")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid session telemetry"));
}

#[test]
fn wrong_typed_field_degrades_one_widget() {
    let dir = TempDir::new().unwrap();
    write_config(
        &dir,
        r#"{"lines": {"0": [{"id": "model"}, {"id": "cost"}, {"id": "duration"}]}}"#,
    );
    scope(&dir)
        .arg("--no-color")
        .write_stdin(
            r#"{"model": {"display_name": "Claude Haiku"},
                "cost": {"total_cost_usd": "oops", "total_duration_ms": 65000}}"#,
        )
        .assert()
        .success()
        .stdout("Claude Haiku 1m 5s\n");
}

#[test]
fn overflowing_usage_still_renders_model() {
    let dir = TempDir::new().unwrap();
    write_config(
        &dir,
        r#"{"lines": {"0": [{"id": "model"}, {"id": "context", "style": "compact"}]}}"#,
    );
    scope(&dir)
        .arg("--no-color")
        .write_stdin(
            r#"{"model": {"display_name": "Claude Haiku"},
                "context_window": {"context_window_size": 200000,
                    "current_usage": {"input_tokens": 18446744073709551615, "output_tokens": 1}}}"#,
        )
        .assert()
        .success()
        .stdout("Claude Haiku 100%\n");
}

#[test]
fn non_ascii_hex_color_is_ignored() {
    let dir = TempDir::new().unwrap();
    write_config(
        &dir,
        r##"{"lines": {"0": [{"id": "model", "colors": {"model": "#aé123"}}]}}"##,
    );
    scope(&dir)
        .write_stdin(SESSION)
        .assert()
        .success()
        .stdout(predicate::str::contains("Claude Opus 4.5"))
        .stderr(predicate::str::contains("ignoring invalid color"));
}

#[test]
fn colors_are_on_by_default() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, r#"{"lines": {"0": [{"id": "model"}]}}"#);
    scope(&dir)
        .write_stdin(SESSION)
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b["));
}

#[test]
fn no_color_flag_strips_ansi() {
    let dir = TempDir::new().unwrap();
    scope(&dir)
        .arg("--no-color")
        .write_stdin(SESSION)
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b").not());
}

#[test]
fn no_color_env_strips_ansi() {
    let dir = TempDir::new().unwrap();
    scope(&dir)
        .env("NO_COLOR", "1")
        .write_stdin(SESSION)
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b").not());
}

#[test]
fn invalid_config_falls_back_with_warning() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "{ this is not json");
    scope(&dir)
        .arg("--no-color")
        .write_stdin(SESSION)
        .assert()
        .success()
        .stdout(predicate::str::contains("Claude Opus 4.5"))
        .stderr(predicate::str::contains("invalid config"));
}

#[test]
fn unknown_style_falls_back_to_balanced() {
    let dir = TempDir::new().unwrap();
    write_config(
        &dir,
        r#"{"lines": {"0": [{"id": "cost", "style": "sparkly"}]}}"#,
    );
    scope(&dir)
        .arg("--no-color")
        .write_stdin(SESSION)
        .assert()
        .success()
        .stdout("$0.42\n");
}

#[test]
fn cached_usage_fills_missing_current_usage() {
    let dir = TempDir::new().unwrap();
    write_config(
        &dir,
        r#"{"lines": {"0": [{"id": "context", "style": "compact"}]}}"#,
    );

    scope(&dir)
        .arg("--no-color")
        .write_stdin(SESSION)
        .assert()
        .success()
        .stdout("63%\n");
    assert!(dir.path().join("cache.json").exists());

    let between_turns = r#"{
        "session_id": "smoke-1",
        "context_window": {"context_window_size": 200000, "current_usage": null}
    }"#;
    scope(&dir)
        .arg("--no-color")
        .write_stdin(between_turns)
        .assert()
        .success()
        .stdout("63%\n");
}

#[test]
fn other_session_does_not_see_cache() {
    let dir = TempDir::new().unwrap();
    write_config(
        &dir,
        r#"{"lines": {"0": [{"id": "context", "style": "compact"}]}}"#,
    );
    scope(&dir)
        .arg("--no-color")
        .write_stdin(SESSION)
        .assert()
        .success();

    let other = r#"{"session_id": "smoke-2",
                    "context_window": {"context_window_size": 200000}}"#;
    scope(&dir)
        .arg("--no-color")
        .write_stdin(other)
        .assert()
        .success()
        .stdout("\n");
}

// -----------------------------------------------------------------------
// quick-config
// -----------------------------------------------------------------------

#[test]
fn quick_config_stdout_prints_json() {
    let dir = TempDir::new().unwrap();
    scope(&dir)
        .args(["quick-config", "--layout", "single", "--style", "compact", "--stdout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"lines\""))
        .stdout(predicate::str::contains("\"compact\""));
    assert!(!dir.path().join("config.json").exists());
}

#[test]
fn quick_config_writes_and_refuses_overwrite() {
    let dir = TempDir::new().unwrap();
    scope(&dir)
        .args(["quick-config", "--theme", "nord"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote"));

    let written = std::fs::read_to_string(dir.path().join("config.json")).unwrap();
    assert!(written.contains("\"nord\""));

    scope(&dir)
        .arg("quick-config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    scope(&dir)
        .args(["quick-config", "--force", "--layout", "triple"])
        .assert()
        .success();
}

#[test]
fn quick_config_rejects_unknown_theme() {
    let dir = TempDir::new().unwrap();
    scope(&dir)
        .args(["quick-config", "--theme", "neon-sunset", "--stdout"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown theme"));
}

#[test]
fn quick_config_rejects_unknown_style() {
    let dir = TempDir::new().unwrap();
    scope(&dir)
        .args(["quick-config", "--style", "sparkly", "--stdout"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown style"));
}

#[test]
fn quick_config_output_drives_render() {
    let dir = TempDir::new().unwrap();
    scope(&dir)
        .args(["quick-config", "--layout", "single", "--style", "compact"])
        .assert()
        .success();
    scope(&dir)
        .arg("--no-color")
        .write_stdin(SESSION)
        .assert()
        .success()
        .stdout("Opus 4.5 63% $0.42 1m +142-27\n");
}

// -----------------------------------------------------------------------
// preview / themes
// -----------------------------------------------------------------------

#[test]
fn preview_renders_sample_data() {
    let dir = TempDir::new().unwrap();
    scope(&dir)
        .args(["--no-color", "preview"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Claude Opus 4.5"))
        .stdout(predicate::str::contains("main [+42 -7]"))
        .stdout(predicate::str::contains("◐ Bash"));
}

#[test]
fn preview_style_override() {
    let dir = TempDir::new().unwrap();
    scope(&dir)
        .args(["--no-color", "preview", "--style", "labeled"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Model: Claude Opus 4.5"))
        .stdout(predicate::str::contains("Tag: v1.2.0"));
}

#[test]
fn themes_lists_default_first() {
    let dir = TempDir::new().unwrap();
    scope(&dir)
        .arg("themes")
        .assert()
        .success()
        .stdout(predicate::str::contains("gray"))
        .stdout(predicate::str::contains("(default)"))
        .stdout(predicate::str::contains("dracula"));
}
