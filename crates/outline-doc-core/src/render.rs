use pulldown_cmark::escape::escape_html;
use pulldown_cmark::{html, Parser};

use crate::document::Document;

/// Renders `document` as a standalone HTML page.
///
/// Pure function of the document contents: the document name becomes the
/// page title and `<h1>`, section names become `<h2>` headings, and each
/// paragraph body is rendered as markdown.
pub fn render_html(document: &Document) -> String {
    let mut out = String::new();

    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>");
    push_escaped(&mut out, document.name());
    out.push_str("</title>\n</head>\n<body>\n<h1>");
    push_escaped(&mut out, document.name());
    out.push_str("</h1>\n");

    for section in document.sections() {
        if !section.name().is_empty() {
            out.push_str("<h2>");
            push_escaped(&mut out, section.name());
            out.push_str("</h2>\n");
        }
        for paragraph in section.paragraphs() {
            html::push_html(&mut out, Parser::new(paragraph.text()));
        }
    }

    out.push_str("</body>\n</html>\n");
    out
}

fn push_escaped(out: &mut String, text: &str) {
    escape_html(out, text).expect("writing to a string never fails");
}
