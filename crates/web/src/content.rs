//! Lesson body loading and markdown rendering.
//!
//! Lesson prose lives on disk as `<lessons_dir>/<lesson_id>.md`. Bodies are
//! rendered to sanitized HTML at request time; a missing or unreadable file
//! degrades to a placeholder so the lesson page still renders its metadata.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::warn;

pub const MISSING_BODY_HTML: &str = "<p>Markdownファイルが見つかりませんでした。</p>";

#[must_use]
pub fn markdown_to_html(input: &str) -> String {
    let mut options = pulldown_cmark::Options::empty();
    options.insert(pulldown_cmark::Options::ENABLE_STRIKETHROUGH);
    options.insert(pulldown_cmark::Options::ENABLE_TABLES);
    options.insert(pulldown_cmark::Options::ENABLE_TASKLISTS);

    let parser = pulldown_cmark::Parser::new_ext(input, options);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    sanitize_html(&html)
}

#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&str> = [
        "p", "div", "span", "br", "em", "strong", "b", "i", "code", "pre", "blockquote", "ul",
        "ol", "li", "a", "h1", "h2", "h3", "h4", "h5", "h6", "hr", "table", "thead", "tbody",
        "tr", "th", "td", "input",
    ]
    .into_iter()
    .collect();

    let mut attributes: HashMap<&str, HashSet<&str>> = HashMap::new();
    attributes.insert("a", ["href"].into_iter().collect());
    // Task-list checkboxes.
    attributes.insert("input", ["type", "checked", "disabled"].into_iter().collect());

    ammonia::Builder::new()
        .tags(tags)
        .tag_attributes(attributes)
        .clean(html)
        .to_string()
}

/// Loads a lesson body and renders it to sanitized HTML.
///
/// Lesson ids come from the built-in catalog, never from user input, so the
/// path join cannot escape the lessons directory.
pub async fn load_rendered(lessons_dir: &Path, lesson_id: &str) -> String {
    let path = lessons_dir.join(format!("{lesson_id}.md"));
    match tokio::fs::read_to_string(&path).await {
        Ok(source) => markdown_to_html(&source),
        Err(err) => {
            warn!(lesson_id, path = %path.display(), %err, "lesson body unreadable");
            MISSING_BODY_HTML.to_string()
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
