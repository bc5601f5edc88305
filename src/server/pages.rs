// HTML rendering for the two-tab web UI
//
// Everything here is a pure function of its inputs. User and model text is
// always passed through escape_html before it reaches the page.

use serde::Serialize;
use std::fmt::Write;

use crate::model::{Interpretation, TaskKind, Vowelization};

pub const APP_TITLE: &str = "מנדי - עוזר אישי לכתיבת פירוש תורני";

const STYLE: &str = r#"
body { direction: rtl; font-family: "David", "Frank Ruehl CLM", "Arial Hebrew", sans-serif; margin: 0; background: #fafaf7; color: #222; }
header { padding: 1.2rem 2rem; background: #1f3b57; color: #fff; }
header h1 { margin: 0; font-size: 1.6rem; }
nav.tabs { display: flex; gap: 0.5rem; padding: 0 2rem; border-bottom: 1px solid #ccc; background: #fff; }
nav.tabs a { padding: 0.8rem 1.2rem; text-decoration: none; color: #1f3b57; border-bottom: 3px solid transparent; }
nav.tabs a.active { border-bottom-color: #c8a24a; font-weight: bold; }
main { display: grid; grid-template-columns: 1fr 1fr; gap: 2rem; padding: 2rem; }
textarea { direction: rtl; width: 100%; min-height: 18rem; font-size: 1.1rem; padding: 0.6rem; box-sizing: border-box; }
button { margin-top: 0.8rem; padding: 0.5rem 1.4rem; font-size: 1rem; background: #1f3b57; color: #fff; border: 0; border-radius: 4px; cursor: pointer; }
.error { background: #fde8e8; color: #8a1c1c; padding: 0.8rem 1rem; border-radius: 4px; margin-bottom: 1rem; }
.block { background: #fff; border: 1px solid #e2e2dc; border-radius: 6px; padding: 1rem 1.2rem; margin-bottom: 1rem; white-space: pre-wrap; line-height: 1.7; }
.block h3 { margin-top: 0; }
dl dt { font-weight: bold; margin-top: 0.6rem; }
dl dd { margin: 0.2rem 1.5rem 0 0; }
.nikud { font-size: 1.4rem; line-height: 2.2; }
"#;

/// Result shown in the right-hand panel
#[derive(Debug, Clone)]
pub enum PanelResult {
    Interpretation(Interpretation),
    Nikud(Vowelization),
}

/// Everything needed to render the page
#[derive(Debug, Clone)]
pub struct PageView {
    pub tab: TaskKind,
    /// Text to put back into the textarea
    pub input: String,
    pub result: Option<PanelResult>,
    pub error: Option<String>,
}

impl PageView {
    pub fn empty(tab: TaskKind) -> Self {
        Self {
            tab,
            input: String::new(),
            result: None,
            error: None,
        }
    }
}

/// Escape text for HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn tab_path(tab: TaskKind) -> &'static str {
    match tab {
        TaskKind::Interpretation => "/?tab=interpretation",
        TaskKind::Nikud => "/?tab=nikud",
    }
}

fn form_action(tab: TaskKind) -> &'static str {
    match tab {
        TaskKind::Interpretation => "/interpret",
        TaskKind::Nikud => "/nikud",
    }
}

fn export_action(tab: TaskKind) -> &'static str {
    match tab {
        TaskKind::Interpretation => "/export/interpretation",
        TaskKind::Nikud => "/export/nikud",
    }
}

fn input_label(tab: TaskKind) -> &'static str {
    match tab {
        TaskKind::Interpretation => "הזינו את הטקסט לפירוש:",
        TaskKind::Nikud => "הזינו טקסט לניקוד:",
    }
}

fn render_tabs(out: &mut String, active: TaskKind) {
    out.push_str("<nav class=\"tabs\">");
    for tab in [TaskKind::Interpretation, TaskKind::Nikud] {
        let class = if tab == active { " class=\"active\"" } else { "" };
        let _ = write!(
            out,
            "<a href=\"{}\"{}>{}</a>",
            tab_path(tab),
            class,
            tab.title()
        );
    }
    out.push_str("</nav>");
}

fn render_form(out: &mut String, view: &PageView) {
    out.push_str("<section class=\"input\">");
    if let Some(error) = &view.error {
        let _ = write!(out, "<div class=\"error\">{}</div>", escape_html(error));
    }
    let _ = write!(
        out,
        "<form method=\"post\" action=\"{}\">\
         <label for=\"text\">{}</label>\
         <textarea id=\"text\" name=\"text\">{}</textarea>\
         <button type=\"submit\">שליחה</button>\
         </form>",
        form_action(view.tab),
        input_label(view.tab),
        escape_html(&view.input)
    );
    out.push_str("</section>");
}

fn render_download(out: &mut String, tab: TaskKind, payload_json: &str) {
    let _ = write!(
        out,
        "<form method=\"post\" action=\"{}\">\
         <input type=\"hidden\" name=\"payload\" value=\"{}\">\
         <button type=\"submit\">הורדת קובץ טקסט</button>\
         </form>",
        export_action(tab),
        escape_html(payload_json)
    );
}

/// Right-hand panel for an interpretation
pub fn render_interpretation(out: &mut String, interp: &Interpretation) {
    let _ = write!(
        out,
        "<div class=\"block\"><h3>הטקסט המקורי</h3>{}</div>",
        escape_html(&interp.original_text)
    );
    let _ = write!(
        out,
        "<div class=\"block\"><h3>מכתב</h3>{}</div>",
        escape_html(&interp.letter)
    );

    if !interp.difficult_words.is_empty() {
        out.push_str("<div class=\"block\"><h3>מילים קשות</h3><dl>");
        for gloss in &interp.difficult_words {
            let _ = write!(
                out,
                "<dt>{}</dt><dd>{}</dd>",
                escape_html(&gloss.word),
                escape_html(&gloss.explanation)
            );
        }
        out.push_str("</dl></div>");
    }

    if !interp.quotes.is_empty() {
        out.push_str("<div class=\"block\"><h3>ציטוטים והסברים</h3><dl>");
        for quote in &interp.quotes {
            let _ = write!(
                out,
                "<dt>\u{201d}{}\u{201c}</dt><dd>{}</dd>",
                escape_html(&quote.quote),
                escape_html(&quote.explanation)
            );
        }
        out.push_str("</dl></div>");
    }
}

/// Right-hand panel for a nikud result
pub fn render_vowelization(out: &mut String, v: &Vowelization) {
    let _ = write!(
        out,
        "<div class=\"block nikud\"><h3>טקסט מנוקד</h3>{}</div>",
        escape_html(&v.vowelized_text)
    );
    let _ = write!(
        out,
        "<div class=\"block\"><h3>הטקסט המקורי</h3>{}</div>",
        escape_html(&v.original_text)
    );
}

/// Download form carrying the result as JSON; skipped if it can't be serialized
fn render_download_for<T: Serialize>(out: &mut String, task: TaskKind, result: &T) {
    match serde_json::to_string(result) {
        Ok(payload) => render_download(out, task, &payload),
        Err(e) => tracing::error!(%task, error = %e, "Could not serialize export payload"),
    }
}

fn render_result(out: &mut String, view: &PageView) {
    out.push_str("<section class=\"result\">");
    match &view.result {
        Some(PanelResult::Interpretation(interp)) => {
            render_interpretation(out, interp);
            render_download_for(out, TaskKind::Interpretation, interp);
        }
        Some(PanelResult::Nikud(v)) => {
            render_vowelization(out, v);
            render_download_for(out, TaskKind::Nikud, v);
        }
        None => {}
    }
    out.push_str("</section>");
}

/// Full page
pub fn render_page(view: &PageView) -> String {
    let mut out = String::with_capacity(8 * 1024);
    let _ = write!(
        out,
        "<!DOCTYPE html><html lang=\"he\" dir=\"rtl\"><head>\
         <meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{title}</title><style>{style}</style></head><body>\
         <header><h1>📚 {title}</h1></header>",
        title = APP_TITLE,
        style = STYLE
    );
    render_tabs(&mut out, view.tab);
    out.push_str("<main>");
    render_form(&mut out, view);
    render_result(&mut out, view);
    out.push_str("</main></body></html>");
    out
}
