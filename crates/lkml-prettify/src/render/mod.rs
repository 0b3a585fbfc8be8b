//! HTML rendering for the prettify page.
//!
//! All rendering uses [maud](https://maud.lambda.xyz/). Dynamic values are
//! escaped, except the diff markup itself, which is already HTML and is
//! inserted as-is.

pub mod components;

use maud::{Markup, PreEscaped, html};

use crate::state::Email;

/// Page title and heading.
pub const PAGE_TITLE: &str = "Prettify Kernel Mailing Thread";

/// Example shown in the empty input.
const PLACEHOLDER: &str = "e.g., https://lore.kernel.org/lkml/E17yO3f-0002MM-00@pegasus";

/// Render the form page, with a result panel when `email` is present.
pub fn render_home(email: Option<&Email>) -> Markup {
    let url = email.map(|e| e.url.as_str()).unwrap_or_default();

    let body = html! {
        main {
            h1 { (PAGE_TITLE) }
            form method="get" action="/" {
                input id="q" type="text" class="q-input" name="q" value=(url) placeholder=(PLACEHOLDER);
                div class="q-actions" {
                    button type="submit" class="q-btn" { "Prettify!" }
                }
            }
            @if let Some(email) = email {
                div class="result" { (PreEscaped(&email.content)) }
            }
        }
    };

    components::page_shell(PAGE_TITLE, components::PAGE_CSS, body)
}
