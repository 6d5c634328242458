//! Page chrome shared by every server-rendered view.
//!
//! Pages are assembled as plain strings: handlers build a body fragment and
//! wrap it with [`layout`]. All dynamic text goes through [`escape_html`];
//! only lesson bodies (already sanitized) are spliced in raw.

use axum::response::Html;

use manabi_core::model::Principal;

/// Escapes text for splicing into HTML body or attribute positions.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Wraps a body fragment in the site chrome.
#[must_use]
pub fn layout(title: &str, principal: Option<&Principal>, body: &str) -> Html<String> {
    let nav_session = match principal {
        Some(p) => format!(
            concat!(
                r#"<a href="/dashboard">ダッシュボード</a>"#,
                r#"<a href="/favorites">お気に入り</a>"#,
                r#"<span class="nav-user">{}</span>"#,
                r#"<a href="/logout">ログアウト</a>"#
            ),
            escape_html(&p.name)
        ),
        None => r#"<a href="/login">ログイン</a>"#.to_string(),
    };

    Html(format!(
        concat!(
            "<!DOCTYPE html>\n",
            r#"<html lang="ja">"#,
            "<head>",
            r#"<meta charset="utf-8">"#,
            r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#,
            "<title>{title} - Manabi</title>",
            "</head>",
            "<body>",
            r#"<nav class="site-nav">"#,
            r#"<a href="/" class="brand">Manabi</a>"#,
            r#"<a href="/roadmap">ロードマップ</a>"#,
            r#"<a href="/lessons">レッスン</a>"#,
            r#"<a href="/projects">プロジェクト</a>"#,
            r#"<a href="/code-examples">コード例</a>"#,
            r#"<a href="/common-mistakes">よくある間違い</a>"#,
            r#"<a href="/faq">FAQ</a>"#,
            "{nav_session}",
            "</nav>",
            r#"<main class="page">"#,
            "{body}",
            "</main>",
            "</body>",
            "</html>"
        ),
        title = escape_html(title),
        nav_session = nav_session,
        body = body,
    ))
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
