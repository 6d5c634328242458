//! Server-rendered page handlers.
//!
//! Every handler assembles a view model, renders a body fragment, and wraps
//! it in the shared chrome. Pages that need a signed-in user redirect
//! anonymous visitors to the credential form with a return path.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

use manabi_core::model::{CodeExample, CommonMistake, Lesson, Principal, Project};
use manabi_core::SearchScope;
use services::{normalize_identifier, ProgressServiceError};

use crate::content;
use crate::extract::AuthSession;
use crate::render::{escape_html, layout};
use crate::state::AppState;
use crate::vm;

/// Failure while rendering a page. Never fatal to the process; the user
/// gets a styled error page and the cause goes to the log.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PageError {
    #[error(transparent)]
    Progress(#[from] ProgressServiceError),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        error!(%self, "page render failed");
        let body = "<h1>エラーが発生しました</h1>\
                    <p>時間をおいて再度お試しください。</p>";
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            layout("エラー", None, body),
        )
            .into_response()
    }
}

fn login_redirect(next: &str) -> Response {
    Redirect::to(&format!("/login?next={next}")).into_response()
}

//
// ─── STATIC PAGES ──────────────────────────────────────────────────────────────
//

pub async fn index(AuthSession(principal): AuthSession) -> Html<String> {
    let body = "<h1>PythonとWebアプリ開発を、順番どおりに学ぶ</h1>\
        <p>基礎文法からFlaskアプリの公開まで、ロードマップに沿って一歩ずつ進める学習プラットフォームです。</p>\
        <ul>\
        <li><a href=\"/roadmap\">学習ロードマップを見る</a></li>\
        <li><a href=\"/lessons\">レッスン一覧へ</a></li>\
        <li><a href=\"/projects\">ミニアプリ課題へ</a></li>\
        </ul>";
    layout("ホーム", principal.as_ref(), body)
}

pub async fn roadmap(
    State(state): State<AppState>,
    AuthSession(principal): AuthSession,
) -> Html<String> {
    let mut body = String::from("<h1>学習ロードマップ</h1>");
    for phase in state.catalog.roadmap() {
        body.push_str(&format!(
            "<section class=\"phase\"><h2>{}</h2><p class=\"duration\">{}</p><p>{}</p><ul>",
            escape_html(phase.name),
            escape_html(phase.duration),
            escape_html(phase.description),
        ));
        for item in phase.items {
            body.push_str(&format!("<li>{}</li>", escape_html(item)));
        }
        body.push_str("</ul></section>");
    }
    layout("ロードマップ", principal.as_ref(), body.as_str())
}

pub async fn portfolio(AuthSession(principal): AuthSession) -> Html<String> {
    let body = "<h1>最終ポートフォリオ課題</h1>\
        <p>学んだHTML/CSS/JavaScript/Flaskを総動員して、自分のWebアプリを企画・実装・公開します。</p>\
        <ul>\
        <li>テーマは自由。日々の課題を解決する小さなアプリを推奨</li>\
        <li>フォーム入力・データ保存・一覧表示を最低限含める</li>\
        <li>READMEに機能一覧とセットアップ手順を書く</li>\
        <li>デプロイして公開URLを提出する</li>\
        </ul>";
    layout("ポートフォリオ", principal.as_ref(), body)
}

pub async fn faq(AuthSession(principal): AuthSession) -> Html<String> {
    let body = "<h1>よくある質問</h1>\
        <dl>\
        <dt>プログラミング未経験でも大丈夫ですか？</dt>\
        <dd>Phase1はPythonの基礎文法から始まるので、未経験を前提にしています。</dd>\
        <dt>1日どのくらい学習すればいいですか？</dt>\
        <dd>目安は1日1〜2時間です。毎日少しずつ続けることを重視してください。</dd>\
        <dt>レッスンの順番は守るべきですか？</dt>\
        <dd>各レッスンは前のレッスンの内容を前提にしているため、順番どおりの学習を推奨します。</dd>\
        <dt>質問はどこでできますか？</dt>\
        <dd>各レッスンのメモ欄に疑問点を書き溜めて、復習時にまとめて調べるのがおすすめです。</dd>\
        </dl>";
    layout("FAQ", principal.as_ref(), body)
}

pub async fn phase2(
    State(state): State<AppState>,
    AuthSession(principal): AuthSession,
) -> Html<String> {
    let phase = state
        .catalog
        .roadmap()
        .iter()
        .find(|phase| phase.name.contains("Phase2"));

    let mut body = String::from("<h1>Phase2：ミニアプリ制作</h1>");
    if let Some(phase) = phase {
        body.push_str(&format!(
            "<p class=\"duration\">{}</p><p>{}</p><ul>",
            escape_html(phase.duration),
            escape_html(phase.description),
        ));
        for item in phase.items {
            body.push_str(&format!("<li>{}</li>", escape_html(item)));
        }
        body.push_str("</ul>");
    }
    body.push_str("<h2>課題一覧</h2><ul>");
    for project in state.catalog.projects() {
        body.push_str(&format!(
            "<li><a href=\"/projects/{}\">{}</a> — {}</li>",
            escape_html(project.id),
            escape_html(project.title),
            escape_html(project.description),
        ));
    }
    body.push_str("</ul>");
    layout("Phase2", principal.as_ref(), body.as_str())
}

//
// ─── LESSONS & PROJECTS ────────────────────────────────────────────────────────
//

fn lesson_list_items(items: &[vm::LessonItem<'_>]) -> String {
    let mut out = String::from("<ul class=\"lesson-list\">");
    for item in items {
        let marks = format!(
            "{}{}",
            if item.completed { " ✅" } else { "" },
            if item.is_favorite { " ★" } else { "" },
        );
        out.push_str(&format!(
            "<li><a href=\"/lessons/{}\">{}</a> <span class=\"level\">{}</span>{}</li>",
            escape_html(item.lesson.id),
            escape_html(item.lesson.title),
            escape_html(item.lesson.level.as_str()),
            marks,
        ));
    }
    out.push_str("</ul>");
    out
}

pub async fn lessons_list(
    State(state): State<AppState>,
    AuthSession(principal): AuthSession,
) -> Html<String> {
    let record = match &principal {
        Some(principal) => Some(state.progress.snapshot(&principal.id).await),
        None => None,
    };
    let view = vm::lessons_view(&state.catalog, record.as_ref());
    let guide = state.catalog.phase3();

    let mut body = String::from("<h1>レッスン一覧</h1>");
    body.push_str("<h2>Phase1：Python基礎</h2>");
    body.push_str(&lesson_list_items(&view.phase1));

    body.push_str("<h2>Phase3：Webアプリ開発</h2>");
    if let Some(progress) = view.phase3_progress {
        body.push_str(&format!(
            "<p class=\"progress\">進捗 {} / {}（{}%）</p>",
            progress.completed, progress.total, progress.percent
        ));
    }
    body.push_str("<h3>このフェーズで身につくこと</h3><ul>");
    for point in guide.overview {
        body.push_str(&format!("<li>{}</li>", escape_html(point)));
    }
    body.push_str("</ul><h3>学習の流れ</h3><ol>");
    for step in guide.timeline {
        body.push_str(&format!(
            "<li><strong>{}</strong> — {}</li>",
            escape_html(step.title),
            escape_html(step.description),
        ));
    }
    body.push_str("</ol>");
    body.push_str(&lesson_list_items(&view.phase3));

    body.push_str("<h3>実践課題チェックリスト</h3><ul class=\"task-list\">");
    for item in &view.tasks {
        body.push_str(&format!(
            "<li>{}{} — {}</li>",
            escape_html(item.task.title),
            if item.completed { " ✅" } else { "" },
            escape_html(item.task.description),
        ));
    }
    body.push_str("</ul>");

    layout("レッスン", principal.as_ref(), body.as_str())
}

fn lesson_nav_link(lesson: Option<&Lesson>, label: &str) -> String {
    match lesson {
        Some(lesson) => format!(
            "<a href=\"/lessons/{}\">{}：{}</a>",
            escape_html(lesson.id),
            label,
            escape_html(lesson.title),
        ),
        None => String::new(),
    }
}

pub async fn lesson_detail(
    State(state): State<AppState>,
    Path(lesson_id): Path<String>,
    AuthSession(principal): AuthSession,
) -> Response {
    let record = match &principal {
        Some(principal) => Some(state.progress.snapshot(&principal.id).await),
        None => None,
    };
    let Some(view) = vm::lesson_detail_view(&state.catalog, &lesson_id, record.as_ref()) else {
        return not_found_page(principal.as_ref());
    };
    let content = content::load_rendered(&state.lessons_dir, view.lesson.id).await;

    let mut body = format!(
        "<h1>{}{}</h1><p class=\"meta\">{} / {}</p>",
        escape_html(view.lesson.title),
        if view.completed { " ✅" } else { "" },
        escape_html(view.lesson.category.as_str()),
        escape_html(view.lesson.level.as_str()),
    );
    // Already sanitized by the markdown pipeline.
    body.push_str(&format!("<article class=\"lesson-body\">{content}</article>"));
    if let Some(note) = &view.note {
        body.push_str(&format!(
            "<section class=\"note\"><h2>メモ</h2><p>{}</p></section>",
            escape_html(note)
        ));
    }
    body.push_str(&format!(
        "<nav class=\"pager\">{} {}</nav>",
        lesson_nav_link(view.prev, "前へ"),
        lesson_nav_link(view.next, "次へ"),
    ));

    layout(view.lesson.title, principal.as_ref(), body.as_str()).into_response()
}

pub async fn projects_list(
    State(state): State<AppState>,
    AuthSession(principal): AuthSession,
) -> Html<String> {
    let mut body = String::from("<h1>ミニアプリ課題</h1><ul>");
    for project in state.catalog.projects() {
        body.push_str(&format!(
            "<li><a href=\"/projects/{}\">{}</a> — {}</li>",
            escape_html(project.id),
            escape_html(project.title),
            escape_html(project.description),
        ));
    }
    body.push_str("</ul>");
    layout("プロジェクト", principal.as_ref(), body.as_str())
}

fn project_nav_link(project: Option<&Project>, label: &str) -> String {
    match project {
        Some(project) => format!(
            "<a href=\"/projects/{}\">{}：{}</a>",
            escape_html(project.id),
            label,
            escape_html(project.title),
        ),
        None => String::new(),
    }
}

pub async fn project_detail(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    AuthSession(principal): AuthSession,
) -> Response {
    let record = match &principal {
        Some(principal) => Some(state.progress.snapshot(&principal.id).await),
        None => None,
    };
    let Some(view) = vm::project_detail_view(&state.catalog, &project_id, record.as_ref()) else {
        return not_found_page(principal.as_ref());
    };
    // Project write-ups live alongside lesson bodies.
    let content = content::load_rendered(&state.lessons_dir, view.project.id).await;

    let mut body = format!(
        "<h1>{}{}</h1><p>{}</p>",
        escape_html(view.project.title),
        if view.completed { " ✅" } else { "" },
        escape_html(view.project.description),
    );
    body.push_str(&format!("<article class=\"lesson-body\">{content}</article>"));
    if let Some(note) = &view.note {
        body.push_str(&format!(
            "<section class=\"note\"><h2>メモ</h2><p>{}</p></section>",
            escape_html(note)
        ));
    }
    body.push_str(&format!(
        "<nav class=\"pager\">{} {}</nav>",
        project_nav_link(view.prev, "前へ"),
        project_nav_link(view.next, "次へ"),
    ));

    layout(view.project.title, principal.as_ref(), body.as_str()).into_response()
}

//
// ─── REFERENCE PAGES ───────────────────────────────────────────────────────────
//

#[derive(Deserialize)]
pub struct MistakesQuery {
    category: Option<String>,
}

fn mistake_section(mistake: &CommonMistake) -> String {
    format!(
        "<section class=\"mistake\"><h2>{}</h2><p class=\"category\">{}</p>\
         <h3>よくない例</h3><pre><code>{}</code></pre>\
         <h3>良い例</h3><pre><code>{}</code></pre>\
         <p>{}</p></section>",
        escape_html(mistake.title),
        escape_html(mistake.category),
        escape_html(mistake.wrong_code),
        escape_html(mistake.correct_code),
        escape_html(mistake.explanation),
    )
}

pub async fn common_mistakes(
    State(state): State<AppState>,
    Query(query): Query<MistakesQuery>,
    AuthSession(principal): AuthSession,
) -> Html<String> {
    let mistakes = state
        .catalog
        .mistakes_by_category(query.category.as_deref());
    let mut body = String::from("<h1>よくある間違い</h1>");
    for mistake in mistakes {
        body.push_str(&mistake_section(mistake));
    }
    layout("よくある間違い", principal.as_ref(), body.as_str())
}

#[derive(Deserialize)]
pub struct ExamplesQuery {
    q: Option<String>,
    category: Option<String>,
}

fn example_section(example: &CodeExample) -> String {
    format!(
        "<section class=\"example\"><h2>{}</h2><p>{}</p><pre><code>{}</code></pre></section>",
        escape_html(example.title),
        escape_html(example.description),
        escape_html(example.code),
    )
}

pub async fn code_examples(
    State(state): State<AppState>,
    Query(query): Query<ExamplesQuery>,
    AuthSession(principal): AuthSession,
) -> Html<String> {
    // A query wins over a category filter; no query at all lists everything.
    let examples = match (query.q.as_deref(), query.category.as_deref()) {
        (Some(q), _) => state.catalog.search_code_examples(q),
        (None, Some(category)) => state.catalog.examples_by_category(category),
        (None, None) => state.catalog.search_code_examples(""),
    };
    let mut body = String::from("<h1>コード例</h1>");
    if examples.is_empty() {
        body.push_str("<p>該当するコード例はありません。</p>");
    }
    for example in examples {
        body.push_str(&example_section(example));
    }
    layout("コード例", principal.as_ref(), body.as_str())
}

#[derive(Deserialize)]
pub struct SearchQuery {
    q: Option<String>,
    scope: Option<String>,
}

pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
    AuthSession(principal): AuthSession,
) -> Html<String> {
    let q = query.q.as_deref().unwrap_or("");
    let scope = SearchScope::from_query(query.scope.as_deref());
    let results = state.catalog.search_content(q, scope);

    let mut body = format!("<h1>検索</h1><p>検索語：{}</p>", escape_html(q));
    if results.is_empty() {
        body.push_str("<p>該当する結果はありません。</p>");
    } else {
        if !results.lessons.is_empty() {
            body.push_str("<h2>レッスン</h2><ul>");
            for lesson in &results.lessons {
                body.push_str(&format!(
                    "<li><a href=\"/lessons/{}\">{}</a></li>",
                    escape_html(lesson.id),
                    escape_html(lesson.title),
                ));
            }
            body.push_str("</ul>");
        }
        if !results.projects.is_empty() {
            body.push_str("<h2>プロジェクト</h2><ul>");
            for project in &results.projects {
                body.push_str(&format!(
                    "<li><a href=\"/projects/{}\">{}</a></li>",
                    escape_html(project.id),
                    escape_html(project.title),
                ));
            }
            body.push_str("</ul>");
        }
    }
    layout("検索", principal.as_ref(), body.as_str())
}

//
// ─── SIGNED-IN PAGES ───────────────────────────────────────────────────────────
//

pub async fn dashboard(
    State(state): State<AppState>,
    AuthSession(principal): AuthSession,
) -> Result<Response, PageError> {
    let Some(principal) = principal else {
        return Ok(login_redirect("/dashboard"));
    };
    // Viewing the dashboard counts as studying today.
    let record = state.progress.record_study_today(&principal.id).await?;
    let streak = record.streak(state.progress.today());
    let view = vm::dashboard_view(&state.catalog, &record, streak);

    let mut body = format!(
        "<h1>ダッシュボード</h1><p class=\"streak\">連続学習 {}日</p>",
        view.streak
    );
    for (label, progress) in [
        ("レッスン", view.lessons),
        ("プロジェクト", view.projects),
        ("実践課題", view.tasks),
    ] {
        body.push_str(&format!(
            "<p>{label}：{} / {}（{}%）</p>",
            progress.completed, progress.total, progress.percent
        ));
    }
    body.push_str("<h2>最近の完了</h2>");
    if view.recent.is_empty() {
        body.push_str("<p>まだ完了した項目はありません。</p>");
    } else {
        body.push_str("<ul>");
        for item in &view.recent {
            body.push_str(&format!(
                "<li><a href=\"{}\">{}</a></li>",
                escape_html(&item.href),
                escape_html(item.title),
            ));
        }
        body.push_str("</ul>");
    }
    Ok(layout("ダッシュボード", Some(&principal), body.as_str()).into_response())
}

pub async fn favorites(
    State(state): State<AppState>,
    AuthSession(principal): AuthSession,
) -> Response {
    let Some(principal) = principal else {
        return login_redirect("/favorites");
    };
    let record = state.progress.snapshot(&principal.id).await;
    let view = vm::favorites_view(&state.catalog, &record);

    let mut body = String::from("<h1>お気に入り</h1>");
    if view.lessons.is_empty() && view.projects.is_empty() {
        body.push_str("<p>お気に入りはまだありません。</p>");
    }
    if !view.lessons.is_empty() {
        body.push_str("<h2>レッスン</h2><ul>");
        for lesson in &view.lessons {
            body.push_str(&format!(
                "<li><a href=\"/lessons/{}\">{}</a></li>",
                escape_html(lesson.id),
                escape_html(lesson.title),
            ));
        }
        body.push_str("</ul>");
    }
    if !view.projects.is_empty() {
        body.push_str("<h2>プロジェクト</h2><ul>");
        for project in &view.projects {
            body.push_str(&format!(
                "<li><a href=\"/projects/{}\">{}</a></li>",
                escape_html(project.id),
                escape_html(project.title),
            ));
        }
        body.push_str("</ul>");
    }
    layout("お気に入り", Some(&principal), body.as_str()).into_response()
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

#[derive(Deserialize)]
pub struct NextQuery {
    next: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginForm {
    email: String,
    password: String,
}

fn login_page(principal: Option<&Principal>, failed: bool) -> Html<String> {
    let mut body = String::from("<h1>ログイン</h1>");
    if failed {
        body.push_str(
            "<p class=\"error\">メールアドレスまたはパスワードが正しくありません。</p>",
        );
    }
    body.push_str(
        "<form method=\"post\">\
         <label>メールアドレス <input type=\"email\" name=\"email\" required></label>\
         <label>パスワード <input type=\"password\" name=\"password\" required></label>\
         <button type=\"submit\">ログイン</button>\
         </form>",
    );
    layout("ログイン", principal, body.as_str())
}

pub async fn login_form(AuthSession(principal): AuthSession) -> Html<String> {
    login_page(principal.as_ref(), false)
}

/// The post-login target must stay on this site.
fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(next) if next.starts_with('/') && !next.starts_with("//") => next,
        _ => "/",
    }
}

pub async fn login_submit(
    State(state): State<AppState>,
    Query(query): Query<NextQuery>,
    Form(form): Form<LoginForm>,
) -> Response {
    let identifier = normalize_identifier(&form.email);
    match state.credentials.verify(&identifier, &form.password) {
        Some(principal) => {
            info!(principal = %principal.id, "signed in");
            let cookie = state
                .sessions
                .login_cookie(&principal, state.progress.clock().now());
            (
                AppendHeaders([(SET_COOKIE, cookie)]),
                Redirect::to(safe_next(query.next.as_deref())),
            )
                .into_response()
        }
        None => {
            // Unknown user and wrong password look identical to the caller.
            (StatusCode::UNAUTHORIZED, login_page(None, true)).into_response()
        }
    }
}

pub async fn logout() -> Response {
    (
        AppendHeaders([(SET_COOKIE, crate::session::SessionSigner::logout_cookie())]),
        Redirect::to("/"),
    )
        .into_response()
}

//
// ─── 404 ───────────────────────────────────────────────────────────────────────
//

fn not_found_page(principal: Option<&Principal>) -> Response {
    let body = "<h1>ページが見つかりません</h1>\
                <p>お探しのページは移動したか、削除された可能性があります。</p>\
                <p><a href=\"/\">トップへ戻る</a></p>";
    (
        StatusCode::NOT_FOUND,
        layout("404", principal, body),
    )
        .into_response()
}

pub async fn not_found(AuthSession(principal): AuthSession) -> Response {
    not_found_page(principal.as_ref())
}

#[cfg(test)]
mod tests {
    use super::safe_next;

    #[test]
    fn next_target_must_be_site_relative() {
        assert_eq!(safe_next(Some("/dashboard")), "/dashboard");
        assert_eq!(safe_next(Some("https://evil.example")), "/");
        assert_eq!(safe_next(Some("//evil.example")), "/");
        assert_eq!(safe_next(None), "/");
    }
}
