//! Markdown rendering adapter.
//!
//! Wraps `pulldown-cmark` with the GitHub-flavored extensions enabled and
//! routes fenced code blocks through syntect so they come out as classed
//! HTML spans. Malformed input is rendered best-effort, never an error.

use once_cell::sync::Lazy;
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);

/// Convert raw Markdown bytes to an HTML fragment.
///
/// Invalid UTF-8 is replaced lossily so that a half-written file (common
/// while an editor is saving) still produces output.
pub fn render(markdown: &[u8]) -> String {
    let text = String::from_utf8_lossy(markdown);

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);

    let parser = Parser::new_ext(&text, options);

    // Buffer code block text and replace the whole block with classed HTML.
    let mut events = Vec::new();
    let mut code_lang: Option<String> = None;
    let mut code_buf = String::new();

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .unwrap_or_default()
                        .to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                code_lang = Some(lang);
                code_buf.clear();
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some(lang) = code_lang.take() {
                    events.push(Event::Html(highlight_block(&code_buf, &lang).into()));
                }
            }
            Event::Text(text) if code_lang.is_some() => {
                code_buf.push_str(&text);
            }
            other => events.push(other),
        }
    }

    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, events.into_iter());
    html
}

/// Highlight one code block as classed HTML wrapped in `<pre><code>`.
///
/// Unknown languages fall back to plain text.
fn highlight_block(code: &str, lang: &str) -> String {
    let syntax = SYNTAX_SET
        .find_syntax_by_token(lang)
        .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text());

    let mut generator =
        ClassedHTMLGenerator::new_with_class_style(syntax, &SYNTAX_SET, ClassStyle::Spaced);
    for line in LinesWithEndings::from(code) {
        if generator
            .parse_html_for_line_which_includes_newline(line)
            .is_err()
        {
            // Highlighting is cosmetic; fall back to escaped plain text
            return format!(
                "<pre class=\"highlight\"><code>{}</code></pre>\n",
                escape_html(code)
            );
        }
    }

    format!(
        "<pre class=\"highlight\"><code>{}</code></pre>\n",
        generator.finalize()
    )
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
