use predicates::prelude::*;

mod corpus;

#[test]
fn reply_prints_page_with_navigation() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    corpus::write_three_chapters(dir.path())?;

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("risalebot");
    cmd.arg("--data-dir")
        .arg(dir.path())
        .args(["reply", "risale sözler 1 sayfa 2 kapalı"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "📖 *1. Söz - 2. Sayfa (Anlam Kapalı)*",
        ))
        .stdout(predicate::str::contains("Birinci Söz 2. sayfa, kelâm\n"))
        .stdout(predicate::str::contains("• *kelâm:* söz"))
        .stdout(predicate::str::contains("`/risalesozler 2 kapali`"))
        .stdout(predicate::str::contains("`/risalesozlersayfa 3 kapali`"));
    Ok(())
}

#[test]
fn reply_json_carries_buttons_and_navigation() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    corpus::write_three_chapters(dir.path())?;

    let output = assert_cmd::cargo::cargo_bin_cmd!("risalebot")
        .env("RISALE_DATA_DIR", dir.path())
        .args(["reply", "--json", "/risalesozlersayfa 4"])
        .output()?;
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["navigation"]["previous"]["command"]["global_id"], 3);
    assert_eq!(value["navigation"]["next"]["command"]["global_id"], 5);
    assert_eq!(value["buttons"][0]["id"], "/risalesozlersayfa 3");
    assert_eq!(value["buttons"].as_array().map(Vec::len), Some(3));
    Ok(())
}

#[test]
fn reply_with_missing_corpus_still_answers() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("risalebot");
    cmd.args(["--data-dir", "does/not/exist", "reply", "risale içindekiler"])
        .assert()
        .success()
        .stdout("❌ İçindekiler bulunamadı.\n");
}

#[test]
fn parse_prints_command_json_and_canonical_form() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("risalebot");
    cmd.args(["parse", "/risalesozler9sayfa3kapali"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"{"type":"soz","soz_no":9,"page_no":3,"meaning":"closed"}"#,
        ))
        .stdout(predicate::str::contains("/risalesozler 9 sayfa 3 kapali"));
}

#[test]
fn rust_log_debug_emits_debug_line_to_stderr() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("risalebot");
    cmd.env("RUST_LOG", "debug")
        .args(["parse", "risale"])
        .assert()
        .success()
        .stderr(predicate::str::contains("parsed cli"));
}
