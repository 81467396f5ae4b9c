//! HTML parser for the release pages
//!
//! This module turns fetched markup into the small views the checks run against:
//! - Download page: title, "Full Changelog" link, files table rows
//! - Pre-release page: external reference links in the simple lists
//!
//! Parsing never fails as a whole. Missing elements are represented as `None`
//! (or [`FilesSection`] variants) so that every check can report on its own.

use crate::ReleaseCheckError;
use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

/// Text of the node whose parent link points at the changelog
pub const CHANGELOG_TEXT: &str = "Full Changelog";

/// Text of the heading that introduces the files table
pub const FILES_TEXT: &str = "Files";

/// Parsed view of a per-version download page
#[derive(Debug)]
pub struct DownloadPage {
    /// URL the page was fetched from, used to resolve relative links
    pub url: Url,

    /// Text of `h1.page-title`, untrimmed
    pub title: Option<String>,

    /// The element enclosing the "Full Changelog" text
    pub changelog: Option<ChangelogLink>,

    /// The files table, if the page has one
    pub files: FilesSection,
}

/// The element enclosing the "Full Changelog" text node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogLink {
    /// Its `href` attribute, if it has one
    pub href: Option<String>,
}

/// State of the "Files" section of a download page
#[derive(Debug)]
pub enum FilesSection {
    /// No "Files" text node on the page
    MissingHeading,

    /// The heading exists but no table follows it
    MissingTable,

    /// One entry per `tbody > tr`, in page order
    Table(Vec<Result<FileRow, ReleaseCheckError>>),
}

/// One row of the files table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRow {
    /// Text of the first column
    pub name: String,

    /// Absolute URL of the link in the first column
    pub url: String,

    /// Declared MD5 checksum (fourth column, trimmed)
    pub md5: String,

    /// Declared size in bytes (fifth column)
    pub size: u64,
}

impl FileRow {
    /// Label identifying the row in reports
    pub fn label(&self) -> String {
        format!("{} (md5={}, size={})", self.name, self.md5, self.size)
    }
}

/// Parsed view of the pre-release listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreReleasePage {
    /// Raw `href` values of `ul.simple > li > a.reference.external`
    pub links: Vec<String>,
}

/// Parses a download page
///
/// # Arguments
///
/// * `html` - The page markup
/// * `url` - The URL the page was fetched from
///
/// # Example
///
/// ```
/// use release_check::verifier::parse_download_page;
/// use url::Url;
///
/// let html = r#"<h1 class="page-title">Python 3.8.0</h1>"#;
/// let url = Url::parse("https://www.python.org/downloads/release/python-380/").unwrap();
/// let page = parse_download_page(html, &url);
/// assert_eq!(page.title.as_deref(), Some("Python 3.8.0"));
/// ```
pub fn parse_download_page(html: &str, url: &Url) -> DownloadPage {
    let document = Html::parse_document(html);

    DownloadPage {
        url: url.clone(),
        title: extract_title(&document),
        changelog: extract_changelog(&document),
        files: extract_files(&document, url),
    }
}

/// Parses the pre-release listing page
pub fn parse_pre_release_page(html: &str) -> PreReleasePage {
    let document = Html::parse_document(html);

    let links = Selector::parse("ul.simple > li > a.reference.external")
        .map(|selector| {
            document
                .select(&selector)
                .filter_map(|a| a.value().attr("href"))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    PreReleasePage { links }
}

/// Extracts the text of the page title heading
fn extract_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("h1.page-title").ok()?;

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>())
}

/// Returns the element enclosing the first text node that reads exactly `needle`
fn text_parent<'a>(document: &'a Html, needle: &str) -> Option<ElementRef<'a>> {
    document
        .tree
        .root()
        .descendants()
        .find(|node| matches!(node.value(), Node::Text(text) if &**text == needle))
        .and_then(|node| node.parent())
        .and_then(ElementRef::wrap)
}

fn extract_changelog(document: &Html) -> Option<ChangelogLink> {
    let link = text_parent(document, CHANGELOG_TEXT)?;

    Some(ChangelogLink {
        href: link.value().attr("href").map(str::to_string),
    })
}

fn extract_files(document: &Html, base_url: &Url) -> FilesSection {
    let Some(heading) = text_parent(document, FILES_TEXT) else {
        return FilesSection::MissingHeading;
    };

    // heading -> header; the table lives somewhere under the header's parent
    let container = heading
        .parent()
        .and_then(|header| header.parent())
        .and_then(ElementRef::wrap);

    let (Some(container), Ok(table_selector), Ok(row_selector)) = (
        container,
        Selector::parse("table"),
        Selector::parse("tbody > tr"),
    ) else {
        return FilesSection::MissingTable;
    };

    let Some(table) = container.select(&table_selector).next() else {
        return FilesSection::MissingTable;
    };

    let rows = table
        .select(&row_selector)
        .enumerate()
        .map(|(index, row)| parse_file_row(index, row, base_url))
        .collect();

    FilesSection::Table(rows)
}

/// Reads columns 1, 4 and 5 of a files-table row
fn parse_file_row(
    index: usize,
    row: ElementRef<'_>,
    base_url: &Url,
) -> Result<FileRow, ReleaseCheckError> {
    let malformed = |message: String| ReleaseCheckError::MalformedRow { index, message };

    let cell_selector =
        Selector::parse("td").map_err(|e| malformed(format!("bad cell selector: {:?}", e)))?;
    let link_selector =
        Selector::parse("a").map_err(|e| malformed(format!("bad link selector: {:?}", e)))?;

    let cells: Vec<ElementRef<'_>> = row.select(&cell_selector).collect();
    if cells.len() < 5 {
        return Err(malformed(format!(
            "expected at least 5 cells, found {}",
            cells.len()
        )));
    }

    let name = cells[0].text().collect::<String>().trim().to_string();

    let href = cells[0]
        .select(&link_selector)
        .next()
        .and_then(|a| a.value().attr("href"))
        .ok_or_else(|| malformed(format!("no download link for '{}'", name)))?;

    let url = base_url
        .join(href.trim())
        .map_err(|e| malformed(format!("invalid download link '{}': {}", href, e)))?;

    let md5 = cells[3].text().collect::<String>().trim().to_string();

    let size_text = cells[4].text().collect::<String>();
    let size = size_text
        .trim()
        .parse::<u64>()
        .map_err(|e| malformed(format!("invalid file size '{}': {}", size_text.trim(), e)))?;

    Ok(FileRow {
        name,
        url: url.to_string(),
        md5,
        size,
    })
}
