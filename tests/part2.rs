use assert_cmd::Command;
use predicates::prelude::predicate::str;

#[test]
fn part2_output_right_answer() {
    let mut cmd = Command::cargo_bin("part2").unwrap();
    cmd.arg("inputs/example.txt");

    cmd.assert().success().stdout(str::contains("29 steps"));
}

#[test]
fn part2_report_no_path() {
    let mut cmd = Command::cargo_bin("part2").unwrap();
    cmd.arg("inputs/cliff.txt");

    cmd.assert().success().stderr(str::contains("no path"));
}
