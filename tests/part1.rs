use assert_cmd::Command;
use predicates::prelude::{predicate::str, PredicateBooleanExt};

#[test]
fn part1_output_right_answer() {
    let mut cmd = Command::cargo_bin("part1").unwrap();
    cmd.arg("inputs/example.txt");

    cmd.assert()
        .success()
        .stdout(str::contains("31 steps").and(str::contains("(0, 0) to (5, 2)")));
}

#[test]
fn part1_report_no_path() {
    let mut cmd = Command::cargo_bin("part1").unwrap();
    cmd.arg("inputs/cliff.txt");

    cmd.assert().success().stderr(str::contains("no path"));
}

#[test]
fn part1_fail_on_missing_file() {
    let mut cmd = Command::cargo_bin("part1").unwrap();
    cmd.arg("inputs/missing.txt");

    cmd.assert()
        .failure()
        .stderr(str::contains("Failed to read height map"));
}
