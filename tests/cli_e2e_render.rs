//! End-to-end tests for the `viewtree render` command.

mod common;
use common::prelude::*;

fn site() -> TestFixture {
    TestFixture::new()
        .with_settings(settings::WITH_PRODUCERS)
        .with_view(
            "home",
            &view_config(
                "Home",
                &[
                    ("data-sources", &["latest", "navigation"]),
                    ("events", &["subscribe"]),
                ],
            ),
            "<h1>{$heading}</h1><p>{/data/navigation/item}</p>",
        )
        .with_view(
            "articles",
            &view_config("Articles", &[("url-parameters", &["year"])]),
            "<p>Archive for {$year}</p>",
        )
        .with_view("hello", &view_config("Hello", &[]), "<p>Hello {$name}</p>")
}

#[test]
fn test_render_help() {
    cargo_bin_cmd!("viewtree")
        .arg("render")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Render the view a URL path resolves to"));
}

#[test]
fn test_render_missing_config() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .arg("render")
        .arg("/")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn test_render_invalid_config() {
    let fixture = TestFixture::new().with_settings(settings::INVALID_YAML);

    fixture
        .command()
        .arg("render")
        .arg("/home/")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn test_render_with_dependent_data_sources() {
    site()
        .command()
        .arg("render")
        .arg("/home/")
        .assert()
        .success()
        .stdout("<h1>Latest from Example</h1><p>Home</p>\n");
}

#[test]
fn test_render_binds_url_parameters() {
    site()
        .command()
        .arg("render")
        .arg("/articles/2024/")
        .assert()
        .success()
        .stdout(predicate::str::contains("<p>Archive for 2024</p>"));
}

#[test]
fn test_render_too_many_url_parameters() {
    site()
        .command()
        .arg("render")
        .arg("/articles/2024/05/")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Too many parameters"));
}

#[test]
fn test_render_with_param_flag() {
    site()
        .command()
        .arg("render")
        .arg("/hello/")
        .arg("-p")
        .arg("name=World")
        .assert()
        .success()
        .stdout(predicate::str::contains("<p>Hello World</p>"));
}

#[test]
fn test_render_unresolved_token_fails() {
    site()
        .command()
        .arg("render")
        .arg("/hello/")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Transformation failed"));
}

#[test]
fn test_render_invalid_param_flag() {
    site()
        .command()
        .arg("render")
        .arg("/hello/")
        .arg("-p")
        .arg("name")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid parameter: name"));
}

#[test]
fn test_render_unknown_view() {
    site()
        .command()
        .arg("render")
        .arg("/missing/")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No view found for: /missing/"));
}

#[test]
fn test_render_document_shows_composite() {
    site()
        .command()
        .arg("render")
        .arg("/home/")
        .arg("--document")
        .assert()
        .success()
        .stdout(predicate::str::contains("<item>Home</item><item>About</item>"))
        .stdout(predicate::str::contains("<heading>Latest from Example</heading>"))
        .stdout(predicate::str::contains("<subscribe").not());
}

#[test]
fn test_render_request_triggers_event() {
    site()
        .command()
        .arg("render")
        .arg("/home/")
        .arg("--document")
        .arg("-r")
        .arg("email=reader@example.com")
        .assert()
        .success()
        .stdout(predicate::str::contains("<subscribe/>"))
        .stdout(predicate::str::contains("<subscribed>yes</subscribed>"));
}

#[test]
fn test_render_repeated_param_builds_list() {
    site()
        .command()
        .arg("render")
        .arg("/hello/")
        .arg("--document")
        .arg("-p")
        .arg("tag=rust")
        .arg("-p")
        .arg("tag=xml")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"<tag value="rust, xml"><item>rust</item><item>xml</item></tag>"#,
        ));
}

#[test]
fn test_render_cannot_leave_views_dir() {
    site()
        .with_file("secret/secret.config.xml", "<view><title>Secret</title></view>")
        .with_file("secret/secret.xsl", "<p>secret</p>")
        .command()
        .arg("render")
        .arg("/../secret/")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No view found for: /../secret/"));
}
