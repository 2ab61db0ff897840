//! Markdown to HTML conversion used by the formatting helpers.
//!
//! Conversion goes through pulldown-cmark with tables, strikethrough and task
//! lists enabled. Tables are the one construct with non-default output: the
//! start tag of every markdown table carries `class="table"` so the generated
//! page picks up the Bootstrap table styling. Raw HTML tables in the source
//! are passed through untouched.
//!
//! The module also provides the sentence splitting behind the
//! `markdown_first_sentence` / `markdown_rest` helpers. A sentence ends at
//! `.`, `?` or `!` followed by whitespace; trailing text without a
//! terminator counts as one more sentence.

use std::sync::LazyLock;

use pulldown_cmark::{Alignment, Event, Options, Parser, Tag, TagEnd, html};
use regex::Regex;

use crate::constants::TABLE_CSS_CLASS;

static SENTENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s).*?[.?!]\s").expect("sentence pattern is valid")
});

static PARAGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<p>(.*?)</p>").expect("paragraph pattern is valid"));

fn parser_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Convert markdown text to an HTML fragment.
#[must_use]
pub fn to_html(text: &str) -> String {
    let mut tables = TableStyle::default();
    let events = Parser::new_ext(text, parser_options()).map(|event| tables.apply(event));
    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}

/// Rewrites table start events so the `<table>` tag carries the CSS class.
///
/// The HTML writer takes column alignments from the table start event, so
/// once that event is replaced the cell tags are written here as well.
#[derive(Debug, Default)]
struct TableStyle {
    alignments: Vec<Alignment>,
    in_head: bool,
    cell: usize,
}

impl TableStyle {
    fn apply<'a>(&mut self, event: Event<'a>) -> Event<'a> {
        match event {
            Event::Start(Tag::Table(alignments)) => {
                self.alignments = alignments;
                Event::Html(format!("<table class=\"{TABLE_CSS_CLASS}\">").into())
            }
            Event::Start(Tag::TableHead) => {
                self.in_head = true;
                self.cell = 0;
                event
            }
            Event::End(TagEnd::TableHead) => {
                self.in_head = false;
                event
            }
            Event::Start(Tag::TableRow) => {
                self.cell = 0;
                event
            }
            Event::Start(Tag::TableCell) => {
                let element = if self.in_head { "th" } else { "td" };
                let style = match self.alignments.get(self.cell) {
                    Some(Alignment::Left) => " style=\"text-align: left\"",
                    Some(Alignment::Center) => " style=\"text-align: center\"",
                    Some(Alignment::Right) => " style=\"text-align: right\"",
                    _ => "",
                };
                self.cell += 1;
                Event::Html(format!("<{element}{style}>").into())
            }
            other => other,
        }
    }
}

/// Split text into sentences, keeping each sentence's terminator.
///
/// Text without any terminator is a single sentence. Blank input yields no
/// sentences.
#[must_use]
pub fn split_sentences(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    // A terminator at the very end still needs whitespace after it
    let padded = format!("{text} ");
    let mut sentences = Vec::new();
    let mut consumed = 0;
    for found in SENTENCE.find_iter(&padded) {
        sentences.push(found.as_str().to_string());
        consumed = found.end();
    }

    let remainder = &padded[consumed..];
    if !remainder.trim().is_empty() {
        sentences.push(remainder.to_string());
    }
    sentences
}

/// HTML of the first sentence, unwrapped from its paragraph so it can sit inline.
#[must_use]
pub fn first_sentence_html(text: &str) -> String {
    match split_sentences(text).first() {
        Some(first) => strip_paragraphs(to_html(first).trim()),
        None => String::new(),
    }
}

/// HTML of every sentence after the first, or an empty string when there is none.
#[must_use]
pub fn rest_html(text: &str) -> String {
    let sentences = split_sentences(text);
    if sentences.len() < 2 {
        return String::new();
    }
    to_html(&sentences[1..].concat())
}

fn strip_paragraphs(html: &str) -> String {
    PARAGRAPH.replace_all(html, "$1").into_owned()
}
