use assert_cmd::Command;
use predicates::prelude::*;
use std::error::Error;
use std::fs;
use tempfile::{tempdir, TempDir};

fn script(home: &TempDir, input: &str) -> Result<assert_cmd::assert::Assert, Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("gagyebu_cli")?;
    Ok(cmd
        .env("GAGYEBU_CLI_SCRIPT", "1")
        .env("GAGYEBU_HOME", home.path())
        .env_remove("RUST_LOG")
        .write_stdin(input.to_string())
        .assert())
}

#[test]
fn script_mode_records_and_reports_a_month() -> Result<(), Box<dyn Error>> {
    let home = tempdir()?;
    script(
        &home,
        "add expense 식비 30000 2025-01-05\n\
         add expense 식비 20,000 2025-01-05 점심\n\
         add income \"아빠 월급여\" 500000 2025-01-10\n\
         month 2025-01\n\
         exit\n",
    )?
    .success()
    .stdout(
        predicate::str::contains("2025년 1월")
            .and(predicate::str::contains("수입  500,000원"))
            .and(predicate::str::contains("지출  50,000원"))
            .and(predicate::str::contains("잔액  +450,000원")),
    );

    let ledger = fs::read_to_string(home.path().join("ledgers").join("default.json"))?;
    assert!(ledger.contains("\"type\": \"income\""));
    assert!(ledger.contains("\"createdAt\""));
    Ok(())
}

#[test]
fn entries_persist_between_runs() -> Result<(), Box<dyn Error>> {
    let home = tempdir()?;
    script(&home, "add expense 보험 50000 2025-01-12\nexit\n")?.success();

    script(&home, "chart expense 2025-01\nhistory 2025-01\n")?
        .success()
        .stdout(
            predicate::str::contains("보험  50,000원  (100%)  #ff9800")
                .and(predicate::str::contains("1월 12일 (일)")),
        );
    Ok(())
}

#[test]
fn empty_views_print_no_records_notice() -> Result<(), Box<dyn Error>> {
    let home = tempdir()?;
    script(&home, "history 2030-01\nchart income 2030-01\ntoday 2030-01-01\n")?
        .success()
        .stdout(predicate::str::contains("내역이 없습니다").count(3));
    Ok(())
}

#[test]
fn invalid_commands_report_and_continue() -> Result<(), Box<dyn Error>> {
    let home = tempdir()?;
    script(
        &home,
        "add expense 식비 -100 2025-01-01\n\
         histroy\n\
         month 2025-1\n\
         categories\n",
    )?
    .success()
    .stdout(
        predicate::str::contains("ERROR:")
            .and(predicate::str::contains("Suggestion: `history`?"))
            .and(predicate::str::contains("엄마 월급여  #3f51b5")),
    );

    let ledger_path = home.path().join("ledgers").join("default.json");
    assert!(!ledger_path.exists());
    Ok(())
}

#[test]
fn delete_in_script_mode_skips_confirmation() -> Result<(), Box<dyn Error>> {
    let home = tempdir()?;
    fs::create_dir_all(home.path().join("ledgers"))?;
    fs::write(
        home.path().join("ledgers").join("default.json"),
        r#"[{"id":"legacy1","date":"2025-02-03","type":"expense","category":"이자","amount":7000,"memo":"","createdAt":1738540800000}]"#,
    )?;

    script(&home, "delete legacy1\nhistory 2025-02\n")?
        .success()
        .stdout(
            predicate::str::contains("삭제했습니다")
                .and(predicate::str::contains("내역이 없습니다")),
        );
    Ok(())
}

#[test]
fn memory_backend_leaves_no_ledger_file() -> Result<(), Box<dyn Error>> {
    let home = tempdir()?;
    fs::write(
        home.path().join("config.json"),
        r#"{"backend":"memory"}"#,
    )?;

    script(&home, "add income \"엄마 월급여\" 1000 2025-03-01\nmonth 2025-03\n")?
        .success()
        .stdout(predicate::str::contains("수입  1,000원"));
    assert!(!home.path().join("ledgers").exists());
    Ok(())
}
