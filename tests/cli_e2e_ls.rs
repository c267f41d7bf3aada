//! End-to-end tests for the `viewtree ls` command.

mod common;
use common::prelude::*;

fn blog() -> TestFixture {
    TestFixture::new()
        .with_settings(settings::MINIMAL)
        .with_view(
            "home",
            r#"<view guid="home-guid"><title>Home</title><types><item>index</item></types></view>"#,
            "<p/>",
        )
        .with_view("blog", &view_config("Blog", &[]), "<p/>")
        .with_view("blog/articles", &view_config("Articles", &[]), "<p/>")
}

#[test]
fn test_ls_help() {
    cargo_bin_cmd!("viewtree")
        .arg("ls")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("List views"));
}

#[test]
fn test_ls_missing_config() {
    TestFixture::new()
        .command()
        .arg("ls")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn test_ls_lists_parents_first() {
    blog()
        .command()
        .arg("ls")
        .assert()
        .success()
        .stdout("blog\nblog/articles\nhome\n");
}

#[test]
fn test_ls_filters_by_type() {
    blog()
        .command()
        .args(["ls", "--type", "index"])
        .assert()
        .success()
        .stdout("home\n");
}

#[test]
fn test_ls_filters_by_pattern() {
    blog()
        .command()
        .args(["ls", "--pattern", "blog/*"])
        .assert()
        .success()
        .stdout("blog/articles\n");
}

#[test]
fn test_ls_invalid_pattern() {
    blog()
        .command()
        .args(["ls", "--pattern", "["])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid glob pattern"));
}

#[test]
fn test_ls_long() {
    blog()
        .command()
        .args(["--color", "never", "ls", "--long", "--type", "index"])
        .assert()
        .success()
        .stdout("home  Home [index]  home-guid\n");
}

#[test]
fn test_ls_empty_tree() {
    TestFixture::new()
        .with_settings(settings::MINIMAL)
        .with_file("views/.keep", "")
        .command()
        .arg("ls")
        .assert()
        .success()
        .stdout(predicate::str::contains("No views found."));
}
