//! Integration tests for the invm CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd. Every
//! command starts from a freshly seeded inventory, so each test sees the
//! sample parts (Brakes, Wheel, Seat) and products (Giant Bicycle, Tricycle).

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get an invm command isolated from the user's config and env
fn invm(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("invm").unwrap();
    cmd.env("INVM_CONFIG_DIR", config_dir.path())
        .env_remove("INVM_SEED")
        .env_remove("INVM_FORMAT")
        .env_remove("INVM_CONFIRM")
        .env_remove("INVM_LOG");
    cmd
}

fn new_in_house_args<'a>(name: &'a str, machine_id: &'a str) -> Vec<&'a str> {
    vec![
        "part", "new", "--name", name, "--price", "4.50", "--stock", "5", "--min", "1", "--max",
        "20", "--in-house", "--machine-id", machine_id,
    ]
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Manage parts, products"))
        .stdout(predicate::str::contains("part"))
        .stdout(predicate::str::contains("product"));
}

#[test]
fn test_short_help_displays_about() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Inventory Manager"));
}

#[test]
fn test_version_displays() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("invm"));
}

#[test]
fn test_shell_requires_terminal() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .assert()
        .failure()
        .stderr(predicate::str::contains("needs a terminal"));
}

#[test]
fn test_completions_bash() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("invm"));
}

// ============================================================================
// Part Tests
// ============================================================================

#[test]
fn test_part_list_shows_sample_data() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .args(["part", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Brakes"))
        .stdout(predicate::str::contains("Wheel"))
        .stdout(predicate::str::contains("Seat"))
        .stdout(predicate::str::contains("3 part(s) found."));
}

#[test]
fn test_part_list_search_by_name() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .args(["part", "list", "--search", "WHE"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wheel"))
        .stdout(predicate::str::contains("Brakes").not());
}

#[test]
fn test_part_list_search_by_id() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .args(["part", "list", "--search", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Seat"))
        .stdout(predicate::str::contains("Wheel").not());
}

#[test]
fn test_part_list_source_filter_count() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .args(["part", "list", "--source", "outsourced", "--count"])
        .assert()
        .success()
        .stdout("1\n");
}

#[test]
fn test_part_list_empty_inventory() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .args(["--empty", "part", "list", "--count"])
        .assert()
        .success()
        .stdout("0\n");
}

#[test]
fn test_part_list_json() {
    let tmp = TempDir::new().unwrap();
    let output = invm(&tmp)
        .args(["part", "list", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parts: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let parts = parts.as_array().unwrap();
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0]["name"], "Brakes");
    assert_eq!(parts[0]["source"], "in_house");
    assert_eq!(parts[0]["machine_id"], 1001);
    assert_eq!(parts[1]["company_name"], "Spoke & Rim Co");
}

#[test]
fn test_part_list_csv_header() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .args(["part", "list", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("id,name,stock,price,source,detail\n"));
}

#[test]
fn test_part_show() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .args(["part", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wheel"))
        .stdout(predicate::str::contains("Spoke & Rim Co"));
}

#[test]
fn test_part_show_missing() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .args(["part", "show", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No part found with id 42"));
}

#[test]
fn test_part_new_gets_next_id() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .args(new_in_house_args("Chain", "1000"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Created part 3"))
        .stdout(predicate::str::contains("Chain"));
}

#[test]
fn test_part_new_in_empty_inventory_gets_id_zero() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .arg("--empty")
        .args(new_in_house_args("Chain", "1000"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Created part 0"));
}

#[test]
fn test_part_new_outsourced() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .args([
            "part", "new", "--name", "Bell", "--price", "2", "--stock", "3", "--min", "0",
            "--max", "10", "--outsourced", "--company", "Ding Ltd",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created part 3"))
        .stdout(predicate::str::contains("Ding Ltd"));
}

#[test]
fn test_part_new_rejects_low_machine_id() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .args(new_in_house_args("Chain", "999"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Machine ID must be greater"));
}

#[test]
fn test_part_new_rejects_non_numeric_stock() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .args([
            "part", "new", "--name", "Chain", "--price", "1", "--stock", "lots", "--min", "1",
            "--max", "20", "--in-house", "--machine-id", "1000",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("whole number"));
}

#[test]
fn test_part_new_rejects_stock_above_max() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .args([
            "part", "new", "--name", "Chain", "--price", "1", "--stock", "50", "--min", "1",
            "--max", "20", "--in-house", "--machine-id", "1000",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Inventory level 50"));
}

#[test]
fn test_part_new_requires_source() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .args([
            "part", "new", "--name", "Chain", "--price", "1", "--stock", "5", "--min", "1",
            "--max", "20",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("in-house or outsourced"));
}

#[test]
fn test_part_edit_keeps_id_and_unchanged_fields() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .args(["part", "edit", "0", "--name", "Disc Brakes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated part 0"))
        .stdout(predicate::str::contains("Disc Brakes"))
        .stdout(predicate::str::contains("1001"));
}

#[test]
fn test_part_edit_switches_source() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .args(["part", "edit", "2", "--outsourced", "--company", "Saddle Works"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Outsourced"))
        .stdout(predicate::str::contains("Saddle Works"));
}

#[test]
fn test_part_delete_with_yes() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .args(["part", "delete", "1", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted part 1 (Wheel)"))
        .stdout(predicate::str::contains("2 part(s) remaining"));
}

#[test]
fn test_part_delete_declined() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .args(["part", "delete", "1"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Aborted."));
}

#[test]
fn test_part_delete_without_confirmation_configured() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .env("INVM_CONFIRM", "false")
        .args(["part", "delete", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted part 0 (Brakes)"));
}

// ============================================================================
// Product Tests
// ============================================================================

#[test]
fn test_product_list() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .args(["product", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Giant Bicycle"))
        .stdout(predicate::str::contains("Tricycle"))
        .stdout(predicate::str::contains("2 product(s) found."));
}

#[test]
fn test_product_list_without_parts() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .args(["product", "list", "--with-parts", "false"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tricycle"))
        .stdout(predicate::str::contains("Giant Bicycle").not());
}

#[test]
fn test_product_show_lists_associated_parts() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .args(["product", "show", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Giant Bicycle"))
        .stdout(predicate::str::contains("Associated Parts"))
        .stdout(predicate::str::contains("Wheel"));
}

#[test]
fn test_product_show_without_parts() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .args(["product", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No parts associated yet"));
}

#[test]
fn test_product_new_deduplicates_parts() {
    let tmp = TempDir::new().unwrap();
    let output = invm(&tmp)
        .args([
            "-q", "--format", "json", "product", "new", "--name", "Bike", "--price", "150",
            "--stock", "2", "--min", "1", "--max", "5", "--part", "0", "--part", "0", "--part",
            "2",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let product: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(product["id"], 2);
    assert_eq!(product["name"], "Bike");
    let parts = product["associated_parts"].as_array().unwrap();
    let names: Vec<&str> = parts.iter().filter_map(|p| p["name"].as_str()).collect();
    assert_eq!(names, vec!["Brakes", "Seat"]);
}

#[test]
fn test_product_new_allows_zero_max() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .args([
            "product", "new", "--name", "Prototype", "--price", "0", "--stock", "0", "--min",
            "0", "--max", "0",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created product 2"));
}

#[test]
fn test_product_new_unknown_part() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .args([
            "product", "new", "--name", "Bike", "--price", "150", "--stock", "2", "--min", "1",
            "--max", "5", "--part", "42",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No part found with id 42"));
}

#[test]
fn test_product_new_rejects_empty_name() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .args([
            "product", "new", "--name", "   ", "--price", "1", "--stock", "1", "--min", "1",
            "--max", "5",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("valid name"));
}

#[test]
fn test_product_edit_removes_part() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .args(["product", "edit", "0", "--remove-part", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated product 0"))
        .stdout(predicate::str::contains("No parts associated yet"));
}

#[test]
fn test_product_delete_with_parts_fails() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .args(["product", "delete", "0", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot delete"));
}

#[test]
fn test_product_delete_without_parts() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .args(["product", "delete", "1", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted product 1 (Tricycle)"));
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn test_config_keys() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .args(["config", "keys"])
        .assert()
        .success()
        .stdout(predicate::str::contains("seed_sample_data"))
        .stdout(predicate::str::contains("default_format"))
        .stdout(predicate::str::contains("confirm_deletes"));
}

#[test]
fn test_config_path_uses_override_dir() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.yaml"));
}

#[test]
fn test_config_show_reads_env() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .env("INVM_FORMAT", "csv")
        .args(["config", "show", "default_format"])
        .assert()
        .success()
        .stdout("csv\n");
}

#[test]
fn test_config_set_changes_default_format() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .args(["config", "set", "default_format", "id"])
        .assert()
        .success();
    assert!(fs::read_to_string(tmp.path().join("config.yaml"))
        .unwrap()
        .contains("default_format"));

    invm(&tmp)
        .args(["part", "list"])
        .assert()
        .success()
        .stdout("0\n1\n2\n");
}

#[test]
fn test_config_set_disables_seeding() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .args(["config", "set", "seed_sample_data", "false"])
        .assert()
        .success();

    invm(&tmp)
        .args(["product", "list", "--count"])
        .assert()
        .success()
        .stdout("0\n");
}

#[test]
fn test_config_set_unknown_key() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .args(["config", "set", "author", "someone"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[test]
fn test_config_set_rejects_unknown_format() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .args(["config", "set", "default_format", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value"));
    assert!(!tmp.path().join("config.yaml").exists());
}

#[test]
fn test_config_unset() {
    let tmp = TempDir::new().unwrap();
    invm(&tmp)
        .args(["config", "set", "confirm_deletes", "no"])
        .assert()
        .success();
    invm(&tmp)
        .args(["config", "unset", "confirm_deletes"])
        .assert()
        .success();
    invm(&tmp)
        .args(["config", "show", "confirm_deletes"])
        .assert()
        .success()
        .stdout("true\n");
}
