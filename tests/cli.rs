use std::path::PathBuf;

use predicates::prelude::*;
use tempfile::TempDir;

const EXPORT: &str = r#"<!DOCTYPE html>
<html>
<head><title>Export</title></head>
<body>
<p>Exported from NovelCrafter</p>
<h2>Chapter One</h2>
<p>It was a dark and stormy night.</p>
<h2>Chapter Two</h2>
<p>The storm passed.</p>
</body>
</html>"#;

fn write_export(content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.html");
    std::fs::write(&path, content).unwrap();
    (dir, path)
}

fn cmd(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("ao3_chapter_upload");
    cmd.current_dir(dir.path())
        .env_remove("AO3_USERNAME")
        .env_remove("AO3_PASSWORD")
        .env_remove("AO3_CONFIG")
        .env_remove("BROWSER_DEBUG_PORT");
    cmd
}

#[test]
fn list_chapters_prints_indices_and_titles() {
    let (dir, path) = write_export(EXPORT);
    cmd(&dir)
        .arg(&path)
        .args(["--work-id", "123", "--list-chapters"])
        .assert()
        .success()
        .stdout(predicate::str::contains("共 2 个章节"))
        .stdout(predicate::str::contains("[0] Chapter One: It was a dark and stormy night."))
        .stdout(predicate::str::contains("[1] Chapter Two: The storm passed."))
        .stdout(predicate::str::contains("NovelCrafter").not());
}

#[test]
fn list_chapters_without_headings_reports_none() {
    let (dir, path) = write_export("<html><body><p>No headings here.</p></body></html>");
    cmd(&dir)
        .arg(&path)
        .args(["--work-id", "123", "--list-chapters"])
        .assert()
        .success()
        .stdout("未找到任何章节\n");
}

#[test]
fn missing_export_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    cmd(&dir)
        .args(["missing.html", "--work-id", "123", "--list-chapters"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("文件不存在"));
}

#[test]
fn missing_credentials_fail_before_browser_starts() {
    let (dir, path) = write_export(EXPORT);
    cmd(&dir)
        .arg(&path)
        .args(["--work-id", "123", "--headless"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("AO3_USERNAME"))
        .stderr(predicate::str::contains("启动浏览器").not());
}

#[test]
fn credentials_from_dotenv_are_picked_up() {
    let (dir, path) = write_export(EXPORT);
    std::fs::write(dir.path().join(".env"), "AO3_USERNAME=writer\n").unwrap();
    cmd(&dir)
        .arg(&path)
        .args(["--work-id", "123", "--headless"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("AO3_PASSWORD"));
}

#[test]
fn start_past_the_end_is_nothing_to_do() {
    let (dir, path) = write_export(EXPORT);
    cmd(&dir)
        .arg(&path)
        .args(["--work-id", "123", "--start", "2"])
        .assert()
        .success()
        .stderr(predicate::str::contains("超出章节范围"));
}

#[test]
fn export_without_headings_uploads_nothing() {
    let (dir, path) = write_export("<p>prose only</p>");
    cmd(&dir)
        .arg(&path)
        .args(["--work-id", "123"])
        .assert()
        .success()
        .stderr(predicate::str::contains("没有可上传的内容"));
}

#[test]
fn work_id_is_required() {
    let (dir, path) = write_export(EXPORT);
    cmd(&dir).arg(&path).assert().failure();
}

#[test]
fn rust_log_debug_shows_parsed_cli() {
    let (dir, path) = write_export(EXPORT);
    cmd(&dir)
        .env("RUST_LOG", "debug")
        .arg(&path)
        .args(["--work-id", "123", "--list-chapters"])
        .assert()
        .success()
        .stderr(predicate::str::contains("parsed cli"));
}
