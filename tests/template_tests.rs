use assert_fs::prelude::*;
use predicates::prelude::*;

#[test]
fn template_writes_a_scenario_that_simulates() {
    let dir = assert_fs::TempDir::new().unwrap();
    let scenario = dir.child("scenario.yaml");
    let result = dir.child("result.yaml");

    let mut cmd = assert_cmd::cargo_bin_cmd!("viability");
    cmd.args(["template", "-o", scenario.path().to_str().unwrap()]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Sample scenario written to"));

    scenario.assert(predicate::str::contains("name: Sample Venue"));
    scenario.assert(predicate::str::contains("services:"));

    let mut cmd = assert_cmd::cargo_bin_cmd!("viability");
    cmd.args([
        "simulate",
        "-i",
        scenario.path().to_str().unwrap(),
        "-o",
        result.path().to_str().unwrap(),
        "-n",
        "50",
        "--seed",
        "1",
        "--no-plots",
    ]);
    cmd.assert().success();

    result.assert(predicate::str::contains("scenario: Sample Venue"));
}
