//! Page chrome and HTML helpers

use axum::response::{Html, Redirect};
use serde::Deserialize;

use super::UiAssets;
use crate::models::loan::MAX_LOAN_DAYS;

/// Sidebar entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Borrow,
    Return,
    Inventory,
    Logs,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Borrow, Page::Return, Page::Inventory, Page::Logs];

    pub fn path(&self) -> &'static str {
        match self {
            Page::Borrow => "/borrow",
            Page::Return => "/return",
            Page::Inventory => "/inventory",
            Page::Logs => "/logs",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Page::Borrow => "Borrow Equipment",
            Page::Return => "Return Equipment",
            Page::Inventory => "Inventory Management",
            Page::Logs => "Logs & Notifications",
        }
    }
}

/// One-shot banner carried through a redirect's query string
#[derive(Debug, Default, Deserialize)]
pub struct Flash {
    pub notice: Option<String>,
    pub warning: Option<String>,
    pub error: Option<String>,
}

impl Flash {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    fn render(&self) -> String {
        let mut out = String::new();
        for (class, message) in [
            ("notice", &self.notice),
            ("warning", &self.warning),
            ("error", &self.error),
        ] {
            if let Some(message) = message {
                out.push_str(&format!(r#"<div class="banner {}">{}</div>"#, class, escape(message)));
            }
        }
        out
    }
}

/// Redirect to `path` with a banner of the given kind ("notice", "warning" or "error")
pub fn redirect_with(path: &str, kind: &str, message: &str) -> Redirect {
    Redirect::to(&format!("{}?{}={}", path, kind, urlencoding::encode(message)))
}

/// Escape text for HTML element and attribute content
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const BASE_STYLE: &str = r#"
body { margin: 0; font-family: "Helvetica Neue", sans-serif; background: #ffffff; color: #262730; }
.app { display: flex; min-height: 100vh; }
nav { width: 260px; padding: 24px; background: #f0f2f6; box-sizing: border-box; }
nav a { display: block; padding: 8px 10px; margin: 4px 0; color: #262730; text-decoration: none; border-radius: 6px; }
nav a.active { background: #ff4b4b; color: #ffffff; }
main { flex: 1; padding: 32px; }
.card { background: rgba(255, 255, 255, 0.95); padding: 20px; border-radius: 10px; box-shadow: 0 4px 6px rgba(0, 0, 0, 0.1); margin-bottom: 20px; }
.clock { font-size: 24px; font-weight: bold; background: #ffffff; padding: 10px; border-radius: 10px; text-align: center; border: 1px solid #d6d6d6; }
.policy { background: #e8f0fe; padding: 10px; border-radius: 6px; }
.banner { padding: 10px 14px; border-radius: 6px; margin-bottom: 16px; }
.banner.notice { background: #dff5e3; }
.banner.warning { background: #fff4d6; }
.banner.error { background: #fde2e2; }
table { border-collapse: collapse; width: 100%; }
th, td { text-align: left; padding: 6px 10px; border-bottom: 1px solid #e6e6e6; }
tr.overdue td { color: #b00020; font-weight: bold; }
label { display: block; margin: 10px 0 4px; }
input, select { padding: 6px; min-width: 260px; }
button { margin-top: 14px; padding: 8px 16px; background: #ff4b4b; color: #ffffff; border: none; border-radius: 6px; cursor: pointer; }
"#;

const CLOCK_SCRIPT: &str = r#"
function updateTime() {
    var now = new Date();
    document.getElementById('clock').textContent = now.toLocaleTimeString('en-US', { hour12: false });
}
setInterval(updateTime, 1000);
updateTime();
"#;

/// Wrap a page body with the sidebar and shared styles
pub fn layout(assets: &UiAssets, active: Page, flash: &Flash, body: &str) -> Html<String> {
    let background = match &assets.background {
        Some(data_url) => format!(
            r#".app {{ background-image: url("{}"); background-size: 100px; background-repeat: repeat; }}"#,
            data_url
        ),
        None => String::new(),
    };

    let menu: String = Page::ALL
        .iter()
        .map(|page| {
            let class = if *page == active { " class=\"active\"" } else { "" };
            format!(r#"<a href="{}"{}>{}</a>"#, page.path(), class, escape(page.label()))
        })
        .collect();

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} - {page}</title>
<style>{style}{background}</style>
</head>
<body>
<div class="app">
<nav>
<h2>&#127916; {title}</h2>
<div class="clock">&#128338; <span id="clock"></span></div>
<hr>
{menu}
<hr>
<div class="policy"><strong>Policy:</strong> Maximum loan duration is {max_days} days.</div>
</nav>
<main>
<h2>{page}</h2>
{flash}
{body}
</main>
</div>
<script>{script}</script>
</body>
</html>"#,
        title = escape(&assets.title),
        page = escape(active.label()),
        style = BASE_STYLE,
        background = background,
        menu = menu,
        max_days = MAX_LOAN_DAYS,
        flash = flash.render(),
        body = body,
        script = CLOCK_SCRIPT,
    ))
}
