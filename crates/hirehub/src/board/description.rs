//! Structured job descriptions.
//!
//! A description is plain text made of sections introduced by `## <Title>`. Anything before
//! the first marker is ignored and every non-blank body line becomes one bullet item.

use serde::Serialize;

const SECTION_MARKER: &str = "## ";
const BULLET_PREFIX: &str = "- ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescriptionSection {
    pub title: String,
    pub items: Vec<String>,
}

pub fn parse_description(text: &str) -> Vec<DescriptionSection> {
    text.split(SECTION_MARKER)
        .skip(1)
        .filter_map(parse_section)
        .collect()
}

fn parse_section(part: &str) -> Option<DescriptionSection> {
    let (title, body) = part.split_once('\n').unwrap_or((part, ""));
    let title = title.trim();
    let body = body.trim();
    if title.is_empty() || body.is_empty() {
        return None;
    }

    let items = body
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && *line != "-")
        .map(|line| line.strip_prefix(BULLET_PREFIX).unwrap_or(line).to_string())
        .collect();

    Some(DescriptionSection {
        title: title.to_string(),
        items,
    })
}
