use crate::parsers::markdown;
use crate::utils;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;

/// Subtrees that are never part of the main content
const REMOVED_ELEMENTS: &[&str] = &[
    "noscript, script, style, img, g, svg, iframe",
    "header, footer, nav, aside",
    ".sidebar, .advertisement, .promo, .related-content",
];

/// Main content candidates in priority order, falling back to the full body
const MAIN_CONTENT_SELECTORS: &[&str] = &[
    "main",
    "article",
    ".content",
    ".post-content",
    ".entry-content",
    ".main-content",
    "body",
];

static REMOVED: OnceLock<Vec<Selector>> = OnceLock::new();
static MAIN_CONTENT: OnceLock<Vec<Selector>> = OnceLock::new();

fn compile(selectors: &[&str]) -> Vec<Selector> {
    selectors
        .iter()
        .map(|s| Selector::parse(s).expect("built-in selector should parse"))
        .collect()
}

fn removed_selectors() -> &'static [Selector] {
    REMOVED.get_or_init(|| compile(REMOVED_ELEMENTS))
}

fn main_content_selectors() -> &'static [Selector] {
    MAIN_CONTENT.get_or_init(|| compile(MAIN_CONTENT_SELECTORS))
}

/// Extracts the main content of a page as truncated Markdown
pub fn extract_main_content(html: &str, max_chars: usize) -> String {
    let mut doc = Html::parse_document(html);
    strip_elements(&mut doc, removed_selectors());

    let markdown = match first_match(main_content_selectors(), &doc) {
        Some(elements) => elements
            .into_iter()
            .map(markdown::convert)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n"),
        None => String::new(),
    };

    utils::truncate(&markdown, max_chars)
}

/// Detaches every element matching any of the selectors from the document
pub fn strip_elements(doc: &mut Html, selectors: &[Selector]) {
    for selector in selectors {
        let ids = doc.select(selector).map(|e| e.id()).collect::<Vec<_>>();
        for id in ids {
            if let Some(mut node) = doc.tree.get_mut(id) {
                node.detach();
            }
        }
    }
}

/// Returns the elements of the first selector that matches anything still attached to the document
pub fn first_match<'a>(selectors: &[Selector], doc: &'a Html) -> Option<Vec<ElementRef<'a>>> {
    selectors
        .iter()
        .map(|selector| {
            doc.select(selector)
                .filter(|element| is_attached(doc, element))
                .collect::<Vec<_>>()
        })
        .find(|matched| !matched.is_empty())
}

/// `Html::select` walks every node in the arena, including those below a detached subtree
fn is_attached(doc: &Html, element: &ElementRef) -> bool {
    let root = doc.tree.root().id();
    element.ancestors().any(|node| node.id() == root)
}
