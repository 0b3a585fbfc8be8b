//! Shared HTML components: page shell, stylesheets and the error page.

use maud::{DOCTYPE, Markup, PreEscaped, html};

/// Inline CSS for all pages.
pub const PAGE_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
:root{--bg:#fff;--fg:#111;--fg3:#999;--accent:#bfdbfe;--accent-hover:#60a5fa;--border:#111;--mono:"SF Mono",SFMono-Regular,ui-monospace,Menlo,monospace}
body{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;line-height:1.5;color:var(--fg);background:var(--bg)}
main{max-width:768px;margin:0 auto;padding:1rem}
h1{font-size:2.25rem;line-height:2.5rem;margin:2.5rem 0}
.q-input{width:100%;border:1px solid var(--border);padding:.15rem .25rem;font-size:1rem}
.q-actions{display:flex;justify-content:flex-end;margin:1rem 0}
.q-btn{padding:0 .5rem;background:var(--accent);border:1px solid var(--border);border-radius:.25rem;font-size:1rem;cursor:pointer}
.q-btn:hover{background:var(--accent-hover)}
.result pre{font-family:var(--mono);font-size:.85rem;white-space:pre-wrap;word-break:break-word}
"#;

/// Inline CSS for error pages.
pub const ERROR_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
body{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;display:flex;justify-content:center;align-items:center;min-height:100vh;background:#fafafa;color:#1a1a2e;padding:1rem}
.error-page{text-align:center;max-width:400px}
.error-page h1{font-size:1.5rem;margin-bottom:.75rem}
.error-page p{color:#666;margin-bottom:1rem;line-height:1.5}
.error-page a{color:#2563eb}
"#;

/// Content-Security-Policy header value.
///
/// Inline styles only, no scripts, forms may only submit back to this origin.
pub const CSP_HEADER: &str =
    "default-src 'none'; style-src 'unsafe-inline'; form-action 'self'; frame-ancestors 'none'";

/// Render the full HTML page shell around `body_content`.
pub fn page_shell(title: &str, css: &'static str, body_content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                (body_content)
            }
        }
    }
}

/// Render a standalone error page.
pub fn error_page(title: &str, message: &str) -> Markup {
    let body = html! {
        main class="error-page" {
            h1 { (title) }
            p { (message) }
            a href="/" { "Back to the form" }
        }
    };
    page_shell(&format!("{title} - {}", super::PAGE_TITLE), ERROR_CSS, body)
}
