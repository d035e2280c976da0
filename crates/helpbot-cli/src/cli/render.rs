//! Terminal rendering of answer markup.
//!
//! Answers are written for an HTML chat panel. The terminal gets line
//! breaks for `<br>` and bold text for `<strong>`/`<b>`; any other markup is
//! printed as written.

use console::style;

const BREAKS: [&str; 3] = ["<br>", "<br/>", "<br />"];
const BOLD: [(&str, &str); 2] = [("<strong>", "</strong>"), ("<b>", "</b>")];

/// Convert an answer to styled terminal text.
pub fn to_terminal(answer: &str) -> String {
    let mut text = answer.to_string();
    for br in BREAKS {
        text = text.replace(br, "\n");
    }
    for (open, close) in BOLD {
        text = embolden(&text, open, close);
    }
    text
}

fn embolden(text: &str, open: &str, close: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(open) {
        let after_open = &rest[start + open.len()..];
        let Some(end) = after_open.find(close) else {
            break;
        };
        out.push_str(&rest[..start]);
        out.push_str(&style(&after_open[..end]).bold().to_string());
        rest = &after_open[end + close.len()..];
    }
    out.push_str(rest);
    out
}

/// Indent every line after the first so multi-line answers stay aligned
/// under a speaker label.
pub fn indent_continuation(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.lines().collect::<Vec<_>>().join(&format!("\n{pad}"))
}
