//! Integration tests for the verifier
//!
//! These tests use wiremock to serve fake release pages and artifacts and run
//! the full verification pass end-to-end.

use release_check::checks::{md5_hex, CheckGroup, CheckOutcome};
use release_check::config::Config;
use release_check::verifier::{verify, Verifier};
use release_check::{Report, VersionSpec};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TARBALL_PATH: &str = "/ftp/python/3.8.0/Python-3.8.0.tgz";
const INSTALLER_PATH: &str = "/ftp/python/3.8.0/python-3.8.0-amd64.exe";

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.site.base_url = base_url.to_string();
    config
}

fn tarball_bytes() -> Vec<u8> {
    b"fake source tarball contents".repeat(10)
}

fn installer_bytes() -> Vec<u8> {
    vec![0x4d; 1000]
}

/// Renders a files-table row: link, OS, description, md5, size, signature
fn file_row(base_url: &str, file_path: &str, name: &str, md5: &str, size: usize) -> String {
    format!(
        r#"<tr>
            <td><a href="{base_url}{file_path}">{name}</a></td>
            <td>Source release</td>
            <td></td>
            <td>{md5}</td>
            <td>{size}</td>
            <td><a href="{base_url}{file_path}.asc">SIG</a></td>
        </tr>"#
    )
}

fn download_page(title: &str, changelog_href: &str, rows: &[String]) -> String {
    format!(
        r#"<html><head><title>{title} | Python.org</title></head><body>
        <article class="text">
            <header class="article-header"><h1 class="page-title">{title}</h1></header>
            <p>Release Date: Oct. 14, 2019</p>
            <ul><li><a href="{changelog_href}">Full Changelog</a></li></ul>
            <header class="article-header"><h1 class="page-title">Files</h1></header>
            <table>
                <thead><tr>
                    <th>Version</th><th>Operating System</th><th>Description</th>
                    <th>MD5 Sum</th><th>File Size</th><th>GPG</th>
                </tr></thead>
                <tbody>{rows}</tbody>
            </table>
        </article>
        </body></html>"#,
        rows = rows.join("\n")
    )
}

fn good_download_page(base_url: &str) -> String {
    let tarball = tarball_bytes();
    let installer = installer_bytes();
    download_page(
        "Python 3.8.0",
        "https://docs.python.org/3.8/whatsnew/changelog.html#python-380-final",
        &[
            file_row(
                base_url,
                TARBALL_PATH,
                "Gzipped source tarball",
                &md5_hex(&tarball),
                tarball.len(),
            ),
            file_row(
                base_url,
                INSTALLER_PATH,
                "Windows x86-64 executable installer",
                &md5_hex(&installer),
                installer.len(),
            ),
        ],
    )
}

fn pre_release_page(compact: &str) -> String {
    format!(
        r#"<html><body>
        <h1>Python Pre-releases</h1>
        <ul class="simple">
            <li><a class="reference external" href="/downloads/release/python-{compact}/">Python {compact}</a></li>
        </ul>
        </body></html>"#
    )
}

async fn mount_html(server: &MockServer, page_path: &str, status: u16, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

async fn mount_bytes(server: &MockServer, file_path: &str, body: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path(file_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(body)
                .insert_header("content-type", "application/octet-stream"),
        )
        .mount(server)
        .await;
}

fn find<'a>(report: &'a Report, name: &str) -> &'a CheckOutcome {
    &report
        .results
        .iter()
        .find(|r| r.name == name)
        .unwrap_or_else(|| panic!("no result named {}", name))
        .outcome
}

fn find_prefix<'a>(report: &'a Report, prefix: &str) -> &'a CheckOutcome {
    &report
        .results
        .iter()
        .find(|r| r.name.starts_with(prefix))
        .unwrap_or_else(|| panic!("no result starting with {}", prefix))
        .outcome
}

#[tokio::test]
async fn test_full_pass_with_pre_release() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/download/pre-releases/",
        200,
        pre_release_page("380"),
    )
    .await;
    mount_html(
        &mock_server,
        "/downloads/release/python-380/",
        200,
        good_download_page(&base_url),
    )
    .await;
    mount_bytes(&mock_server, TARBALL_PATH, tarball_bytes()).await;
    mount_bytes(&mock_server, INSTALLER_PATH, installer_bytes()).await;

    let report = verify(
        create_test_config(&base_url),
        VersionSpec::parse("3.8.0"),
        true,
    )
    .await
    .expect("verifier setup failed");

    for result in &report.results {
        assert_eq!(result.outcome, CheckOutcome::Passed, "{}", result);
    }
    assert!(report.is_success());

    // 2 pre-release checks, 4 structural checks, 2 artifacts
    assert_eq!(report.total(), 8);

    // Pre-release group runs first
    assert_eq!(report.results[0].group, CheckGroup::PreReleasePage);
    assert_eq!(report.results[1].group, CheckGroup::PreReleasePage);
    assert!(report.results[2..]
        .iter()
        .all(|r| r.group == CheckGroup::DownloadPage));
}

#[tokio::test]
async fn test_pre_release_checks_skipped_without_flag() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/download/pre-releases/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(pre_release_page("380")))
        .expect(0)
        .mount(&mock_server)
        .await;
    mount_html(
        &mock_server,
        "/downloads/release/python-380/",
        200,
        good_download_page(&base_url),
    )
    .await;
    mount_bytes(&mock_server, TARBALL_PATH, tarball_bytes()).await;
    mount_bytes(&mock_server, INSTALLER_PATH, installer_bytes()).await;

    let report = verify(
        create_test_config(&base_url),
        VersionSpec::parse("3.8.0"),
        false,
    )
    .await
    .unwrap();

    assert!(report.is_success());
    assert!(report
        .results
        .iter()
        .all(|r| r.group != CheckGroup::PreReleasePage));
}

#[tokio::test]
async fn test_missing_pre_release_reference() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/download/pre-releases/",
        200,
        pre_release_page("380a2"),
    )
    .await;

    let verifier = Verifier::new(
        create_test_config(&base_url),
        VersionSpec::parse("3.8.0a3"),
    )
    .unwrap();
    let results = verifier.check_pre_release_page().await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].outcome, CheckOutcome::Passed);
    assert!(results[1].outcome.is_failed());
}

#[tokio::test]
async fn test_size_mismatch_fails_only_that_row() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let short_installer = vec![0x4d; 999];
    let tarball = tarball_bytes();
    let page = download_page(
        "Python 3.8.0",
        "https://docs.python.org/3.8/whatsnew/changelog.html#python-380-final",
        &[
            file_row(
                &base_url,
                INSTALLER_PATH,
                "Windows installer",
                &md5_hex(&short_installer),
                1000,
            ),
            file_row(
                &base_url,
                TARBALL_PATH,
                "Gzipped source tarball",
                &md5_hex(&tarball),
                tarball.len(),
            ),
        ],
    );

    mount_html(&mock_server, "/downloads/release/python-380/", 200, page).await;
    mount_bytes(&mock_server, INSTALLER_PATH, short_installer).await;
    mount_bytes(&mock_server, TARBALL_PATH, tarball).await;

    let report = verify(
        create_test_config(&base_url),
        VersionSpec::parse("3.8.0"),
        false,
    )
    .await
    .unwrap();

    assert_eq!(
        find_prefix(&report, "Windows installer"),
        &CheckOutcome::Failed("content-length: expected 1000, found 999".to_string())
    );
    assert_eq!(
        find_prefix(&report, "Gzipped source tarball"),
        &CheckOutcome::Passed
    );
    assert_eq!(report.failures(), 1);
    assert!(!report.is_success());
}

#[tokio::test]
async fn test_checksum_mismatch_fails_only_that_row() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let tarball = tarball_bytes();
    let installer = installer_bytes();
    let page = download_page(
        "Python 3.8.0",
        "https://docs.python.org/3.8/whatsnew/changelog.html#python-380-final",
        &[
            file_row(
                &base_url,
                TARBALL_PATH,
                "Gzipped source tarball",
                "abc123",
                tarball.len(),
            ),
            file_row(
                &base_url,
                INSTALLER_PATH,
                "Windows installer",
                &md5_hex(&installer),
                installer.len(),
            ),
        ],
    );

    mount_html(&mock_server, "/downloads/release/python-380/", 200, page).await;
    mount_bytes(&mock_server, TARBALL_PATH, tarball).await;
    mount_bytes(&mock_server, INSTALLER_PATH, installer).await;

    let report = verify(
        create_test_config(&base_url),
        VersionSpec::parse("3.8.0"),
        false,
    )
    .await
    .unwrap();

    let tarball_outcome = find(
        &report,
        &format!("Gzipped source tarball (md5=abc123, size={})", tarball_bytes().len()),
    );
    assert!(tarball_outcome.is_failed());
    assert!(tarball_outcome.message().unwrap().starts_with("md5"));
    assert_eq!(find_prefix(&report, "Windows installer"), &CheckOutcome::Passed);
}

#[tokio::test]
async fn test_missing_artifact_is_reported() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/downloads/release/python-380/",
        200,
        good_download_page(&base_url),
    )
    .await;
    mount_bytes(&mock_server, INSTALLER_PATH, installer_bytes()).await;
    // No mock for the tarball: wiremock answers 404

    let report = verify(
        create_test_config(&base_url),
        VersionSpec::parse("3.8.0"),
        false,
    )
    .await
    .unwrap();

    let tarball_outcome = find_prefix(&report, "Gzipped source tarball");
    assert!(tarball_outcome.message().unwrap().contains("404"));
    assert_eq!(
        find_prefix(&report, "Windows x86-64 executable installer"),
        &CheckOutcome::Passed
    );
}

#[tokio::test]
async fn test_structural_failures_are_independent() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let page = download_page(
        "Python 3.7.0",
        "https://docs.python.org/3.8/whatsnew/changelog.html#python-380-final",
        &[],
    );
    mount_html(&mock_server, "/downloads/release/python-380/", 200, page).await;

    let report = verify(
        create_test_config(&base_url),
        VersionSpec::parse("3.8.0"),
        false,
    )
    .await
    .unwrap();

    assert_eq!(find(&report, "has_status_200"), &CheckOutcome::Passed);
    assert!(find(&report, "has_right_title").is_failed());
    assert_eq!(find(&report, "has_changelog_link"), &CheckOutcome::Passed);
    assert!(find(&report, "files_section").is_failed());
    assert_eq!(report.total(), 4);
}

#[tokio::test]
async fn test_download_page_not_found() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/downloads/release/python-380/",
        404,
        "<html><body><h1>Page Not Found</h1></body></html>".to_string(),
    )
    .await;

    let report = verify(
        create_test_config(&base_url),
        VersionSpec::parse("3.8.0"),
        false,
    )
    .await
    .unwrap();

    assert!(find(&report, "has_status_200").is_failed());
    assert!(find(&report, "has_right_title").is_failed());
    assert!(find(&report, "has_changelog_link").is_failed());
    assert!(find(&report, "files_section").is_failed());
    assert_eq!(report.failures(), 4);
}

#[tokio::test]
async fn test_unreachable_site_errors_every_check() {
    // Nothing listens on port 1
    let report = verify(
        create_test_config("http://127.0.0.1:1"),
        VersionSpec::parse("3.8.0"),
        true,
    )
    .await
    .unwrap();

    assert_eq!(report.total(), 6);
    assert_eq!(report.errors(), 6);
    assert_eq!(report.failures(), 0);
    assert!(report.render_text().ends_with("FAILED (failures=0, errors=6)\n"));
}

#[tokio::test]
async fn test_malformed_row_errors_without_stopping_others() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let tarball = tarball_bytes();
    let mut rows = vec![file_row(
        &base_url,
        INSTALLER_PATH,
        "Windows installer",
        "abc123",
        0,
    )
    .replace("<td>0</td>", "<td>n/a</td>")];
    rows.push(file_row(
        &base_url,
        TARBALL_PATH,
        "Gzipped source tarball",
        &md5_hex(&tarball),
        tarball.len(),
    ));
    let page = download_page(
        "Python 3.8.0",
        "https://docs.python.org/3.8/whatsnew/changelog.html#python-380-final",
        &rows,
    );

    mount_html(&mock_server, "/downloads/release/python-380/", 200, page).await;
    mount_bytes(&mock_server, TARBALL_PATH, tarball).await;

    let report = verify(
        create_test_config(&base_url),
        VersionSpec::parse("3.8.0"),
        false,
    )
    .await
    .unwrap();

    assert!(find(&report, "files_table_row 0").is_errored());
    assert_eq!(
        find_prefix(&report, "Gzipped source tarball"),
        &CheckOutcome::Passed
    );
}

#[tokio::test]
async fn test_relative_artifact_links_follow_redirected_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let tarball = tarball_bytes();
    let page = download_page(
        "Python 3.8.0",
        "https://docs.python.org/3.8/whatsnew/changelog.html#python-380-final",
        &[file_row(
            "",
            "files/Python-3.8.0.tgz",
            "Gzipped source tarball",
            &md5_hex(&tarball),
            tarball.len(),
        )],
    );

    Mock::given(method("GET"))
        .and(path("/downloads/release/python-380/"))
        .respond_with(
            ResponseTemplate::new(301)
                .insert_header("location", format!("{}/releases/3.8.0/", base_url).as_str()),
        )
        .mount(&mock_server)
        .await;
    mount_html(&mock_server, "/releases/3.8.0/", 200, page).await;
    mount_bytes(&mock_server, "/releases/3.8.0/files/Python-3.8.0.tgz", tarball).await;

    let report = verify(
        create_test_config(&base_url),
        VersionSpec::parse("3.8.0"),
        false,
    )
    .await
    .unwrap();

    assert_eq!(
        find_prefix(&report, "Gzipped source tarball"),
        &CheckOutcome::Passed
    );
    assert!(report.is_success());
}
