//! CLI smoke tests
//!
//! Drive the `platen` binary against throwaway templates and data in the
//! temp directory. Text falls back to whatever font the host offers, so
//! assertions stick to files and exit codes.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

fn platen() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_platen"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn temp_dir(tag: &str) -> PathBuf {
    let id = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let dir = std::env::temp_dir().join(format!("platen_cli_{tag}_{id}"));
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Template with one text and one image region, plus two data rows
fn write_fixture(dir: &Path) {
    fs::create_dir_all(dir.join("layers")).unwrap();
    image::RgbaImage::from_pixel(60, 40, image::Rgba([0, 0, 255, 255]))
        .save(dir.join("layers/photo.png"))
        .unwrap();
    fs::write(
        dir.join("template.json"),
        r#"{ "width": 200, "height": 100, "regions": [
            { "name": "title", "kind": "text", "bounds": [0, 0, 200, 40],
              "style": { "font": "黑体", "size": 18 } },
            { "name": "photo", "kind": "image", "bounds": [120, 50, 180, 90],
              "artwork": "layers/photo.png" } ] }"#,
    )
    .unwrap();
    fs::write(
        dir.join("rows.jsonl"),
        concat!(
            "{\"Title\": \"First\", \"Photo\": \"none.png\"}\n",
            "{\"Title\": \"Second\", \"Photo\": \"none.png\"}\n",
        ),
    )
    .unwrap();
    fs::write(
        dir.join("mapping.json"),
        r#"{ "text": { "title": "Title" }, "image": { "photo": "Photo" } }"#,
    )
    .unwrap();
}

fn run_in(dir: &Path, extra: &[&str], stdin: &str) -> Output {
    use std::io::Write;

    let mut child = platen()
        .current_dir(dir)
        .args(["run", "--template", "template.json", "--data", "rows.jsonl"])
        .args(["--output", "out", "--font-root", "."])
        .args(extra)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_help() {
    let output = platen().arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["run", "info", "fonts"] {
        assert!(stdout.contains(command), "help should list {command}");
    }
}

#[test]
fn test_run_with_mapping_file() {
    let dir = temp_dir("mapfile");
    write_fixture(&dir);

    let output = run_in(&dir, &["--mapping", "mapping.json", "--debug"], "");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(dir.join("out/1.png").is_file());
    assert!(dir.join("out/2.png").is_file());
    assert!(dir.join("out/debug/debug_0_title.png").is_file());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Done: 2 of 2"));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_run_interactive_mapping() {
    let dir = temp_dir("interactive");
    write_fixture(&dir);

    let output = run_in(&dir, &["--quiet"], "Title\n\n");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(dir.join("out/2.png").is_file());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Done: 2 of 2"), "stdout: {stdout}");
    assert!(!stdout.contains("Rendering 2 row(s)"), "stdout: {stdout}");

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_cancelled_prompt_is_fatal() {
    let dir = temp_dir("cancel");
    write_fixture(&dir);

    let output = run_in(&dir, &[], "");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No regions are mapped"), "stderr: {stderr}");
    assert!(!dir.join("out/1.png").exists());

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_missing_template_is_fatal() {
    let dir = temp_dir("notemplate");
    fs::write(dir.join("rows.jsonl"), "{\"a\": 1}\n").unwrap();

    let output = run_in(&dir, &["--mapping", "mapping.json"], "");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Cannot read template"));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_info_lists_regions_and_columns() {
    let dir = temp_dir("info");
    write_fixture(&dir);

    let output = platen()
        .current_dir(&dir)
        .args(["info", "--template", "template.json", "--data", "rows.jsonl"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("title [text]"));
    assert!(stdout.contains("photo [image]"));
    assert!(stdout.contains("Title"));
    assert!(stdout.contains("Photo"));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_fonts_lists_local_root() {
    let dir = temp_dir("fonts");
    fs::create_dir_all(dir.join("fonts")).unwrap();
    for i in 0..3 {
        fs::write(dir.join(format!("fonts/f{i}.ttf")), b"x").unwrap();
    }

    let output = platen()
        .args(["fonts", "--limit", "2", "--font-root"])
        .arg(&dir)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("f0.ttf"));
    assert!(!stdout.contains("f2.ttf"));
    assert!(stdout.contains("... and 1 more"));

    fs::remove_dir_all(&dir).ok();
}
