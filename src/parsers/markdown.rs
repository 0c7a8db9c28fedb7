//! HTML to Markdown conversion on top of html2text.
//!
//! Headings are written ATX style (`# Title`) and bullets use `-`. Link
//! targets are kept inline instead of as footnotes, and runs of blank lines
//! are squeezed to one.

use html2text::config;
use html2text::render::{TaggedLine, TextDecorator};
use scraper::ElementRef;

/// Narrowest wrap width handed to the renderer
const MIN_WIDTH: usize = 80;

/// Decorator emitting Markdown markup around html2text's block layout
#[derive(Debug, Clone, Default)]
pub struct MarkdownDecorator {
    /// Targets of the links currently open, `None` for links rendered as plain text
    links: Vec<Option<String>>,
}

impl TextDecorator for MarkdownDecorator {
    type Annotation = ();

    fn decorate_link_start(&mut self, url: &str) -> (String, Self::Annotation) {
        // In-page anchors mean nothing once the text leaves the page
        if url.is_empty() || url.starts_with('#') {
            self.links.push(None);
            return (String::new(), ());
        }
        self.links.push(Some(url.to_string()));
        ("[".to_string(), ())
    }

    fn decorate_link_end(&mut self) -> String {
        match self.links.pop().flatten() {
            Some(url) => format!("]({})", url),
            None => String::new(),
        }
    }

    fn decorate_em_start(&self) -> (String, Self::Annotation) {
        ("_".to_string(), ())
    }

    fn decorate_em_end(&self) -> String {
        "_".to_string()
    }

    fn decorate_strong_start(&self) -> (String, Self::Annotation) {
        ("**".to_string(), ())
    }

    fn decorate_strong_end(&self) -> String {
        "**".to_string()
    }

    fn decorate_strikeout_start(&self) -> (String, Self::Annotation) {
        ("~~".to_string(), ())
    }

    fn decorate_strikeout_end(&self) -> String {
        "~~".to_string()
    }

    fn decorate_code_start(&self) -> (String, Self::Annotation) {
        ("`".to_string(), ())
    }

    fn decorate_code_end(&self) -> String {
        "`".to_string()
    }

    fn decorate_preformat_first(&self) -> Self::Annotation {}
    fn decorate_preformat_cont(&self) -> Self::Annotation {}

    fn decorate_image(&mut self, _src: &str, _title: &str) -> (String, Self::Annotation) {
        (String::new(), ())
    }

    fn header_prefix(&self, level: usize) -> String {
        "#".repeat(level) + " "
    }

    fn quote_prefix(&self) -> String {
        "> ".to_string()
    }

    fn unordered_item_prefix(&self) -> String {
        "- ".to_string()
    }

    fn ordered_item_prefix(&self, i: i64) -> String {
        format!("{}. ", i)
    }

    fn make_subblock_decorator(&self) -> Self {
        Self::default()
    }

    fn finalise(&mut self, _urls: Vec<String>) -> Vec<TaggedLine<Self::Annotation>> {
        Vec::new()
    }
}

/// Converts an element and everything below it into Markdown
pub fn convert(element: ElementRef) -> String {
    let html = element.html();
    // No output line is longer than its markup, so this width never wraps
    let width = html.len().max(MIN_WIDTH);

    let rendered = config::with_decorator(MarkdownDecorator::default())
        .link_footnotes(false)
        .no_table_borders()
        .allow_width_overflow()
        .string_from_read(html.as_bytes(), width);

    match rendered {
        Ok(text) => tidy(&text),
        Err(e) => {
            ::log::warn!("Failed to convert <{}> to Markdown: {}", element.value().name(), e);
            String::new()
        }
    }
}

/// Strips trailing spaces and squeezes blank lines
fn tidy(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blank_run = false;

    for line in text.lines().map(str::trim_end) {
        if line.is_empty() {
            blank_run = !out.is_empty();
            continue;
        }
        if blank_run {
            out.push_str("\n\n");
        } else if !out.is_empty() {
            out.push('\n');
        }
        blank_run = false;
        out.push_str(line);
    }

    out
}
