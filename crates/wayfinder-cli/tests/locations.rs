use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("wayfinder");
    cmd.env("RUST_LOG", "error")
        .env("NO_COLOR", "1")
        .env_remove("WAYFINDER_CATALOG");
    cmd
}

#[test]
fn lists_rooms_by_floor() {
    let mut cmd = cli();
    cmd.arg("locations");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Floor 8\n"))
        .stdout(predicate::str::contains("Floor 10\n"))
        .stdout(predicate::str::contains(" - 809 (Room)"))
        .stdout(predicate::str::contains(" - 8SR (Staff Room)"))
        .stdout(predicate::str::contains("8H1").not())
        .stdout(predicate::str::contains("8E1").not());
}

#[test]
fn all_flag_includes_transports() {
    let mut cmd = cli();
    cmd.args(["locations", "--all", "--floor", "9"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(" - 9E1 (Elevator)"))
        .stdout(predicate::str::contains(" - 9H1 (Hallway Intersection)"))
        .stdout(predicate::str::contains("Floor 8").not());
}

#[test]
fn json_listing_groups_locations() {
    let mut cmd = cli();
    cmd.args(["--format", "json", "locations", "--floor", "10"]);

    let output = cmd.assert().success().get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output).expect("valid json");
    let floors = value.as_array().expect("array of floors");
    assert_eq!(floors.len(), 1);
    assert_eq!(floors[0]["floor"], 10);
    assert!(floors[0]["locations"]
        .as_array()
        .expect("locations")
        .iter()
        .any(|entry| entry["id"] == "1001" && entry["role"] == "Room"));
}
