//! Restricted markdown to HTML
//!
//! Supports `#`/`##`/`###` headings, `- ` and `N. ` list items (both become a
//! single `<ul>`), inline `**bold**`, blank-line paragraphs and single-newline
//! line breaks. Input is escaped before any tag is produced, so the output
//! contains no markup other than the tags listed here.

use std::sync::LazyLock;

use regex::Regex;

use crate::escape::escape_html;

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,3}) (.+)$").expect("heading regex pattern is valid"));

static BULLET_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^- (.+)$").expect("bullet regex pattern is valid"));

static NUMBERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\. (.+)$").expect("numbered item regex pattern is valid"));

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold regex pattern is valid"));

/// A single line after the per-line pass.
enum Line {
    Blank,
    Heading(String),
    Item(String),
    Text(String),
}

fn classify(line: &str) -> Line {
    let line = line.trim_end();
    if line.trim().is_empty() {
        return Line::Blank;
    }

    if let Some(caps) = HEADING.captures(line) {
        let level = caps[1].len();
        return Line::Heading(format!("<h{level}>{}</h{level}>", bold(&caps[2])));
    }

    if let Some(caps) = BULLET_ITEM
        .captures(line)
        .or_else(|| NUMBERED_ITEM.captures(line))
    {
        return Line::Item(format!("<li>{}</li>", bold(&caps[1])));
    }

    Line::Text(bold(line))
}

fn bold(text: &str) -> String {
    BOLD.replace_all(text, "<strong>$1</strong>").into_owned()
}

#[derive(Default)]
struct Blocks {
    out: Vec<String>,
    paragraph: Vec<String>,
    list: Vec<String>,
}

impl Blocks {
    fn flush_paragraph(&mut self) {
        if !self.paragraph.is_empty() {
            self.out.push(format!("<p>{}</p>", self.paragraph.join("<br>")));
            self.paragraph.clear();
        }
    }

    fn flush_list(&mut self) {
        if !self.list.is_empty() {
            self.out.push(format!("<ul>{}</ul>", self.list.concat()));
            self.list.clear();
        }
    }

    fn finish(mut self) -> String {
        self.flush_list();
        self.flush_paragraph();
        self.out.join("\n")
    }
}

/// Convert restricted markdown to HTML.
pub fn format_markdown(text: &str) -> String {
    let escaped = escape_html(text);
    let mut blocks = Blocks::default();

    for line in escaped.lines().map(classify) {
        match line {
            Line::Blank => {
                blocks.flush_list();
                blocks.flush_paragraph();
            }
            Line::Heading(html) => {
                blocks.flush_list();
                blocks.flush_paragraph();
                blocks.out.push(html);
            }
            Line::Item(html) => {
                blocks.flush_paragraph();
                blocks.list.push(html);
            }
            Line::Text(html) => {
                blocks.flush_list();
                blocks.paragraph.push(html);
            }
        }
    }

    blocks.finish()
}
