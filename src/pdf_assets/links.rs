use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref LINK_RE: Regex = Regex::new(r#"https?://[^\s)\]>"']+"#).unwrap();
}

/// Every `http(s)://` URL in `text`, in order of appearance.
pub fn text_links(text: &str) -> Vec<String> {
    LINK_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Drops repeats, keeping each link at its first position.
pub fn dedup_links<I>(links: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    links
        .into_iter()
        .filter(|l| seen.insert(l.clone()))
        .collect()
}

/// Text-body links first, then annotation URIs, deduplicated.
pub fn collect_links(text: &str, annotation_uris: &[String]) -> Vec<String> {
    dedup_links(
        text_links(text)
            .into_iter()
            .chain(annotation_uris.iter().cloned()),
    )
}
