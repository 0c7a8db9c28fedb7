use url::Url;

/// Build the results page URL for a query
pub fn build_search_url(
    base: &str,
    query: &str,
    web_results_only: bool,
) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(base)?;
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("q", query);
        if web_results_only {
            pairs.append_pair("udm", "14");
        }
    }
    Ok(url)
}

/// Cap text at `max` characters, marking the cut with an ellipsis
pub fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Collapse runs of whitespace into single spaces
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
