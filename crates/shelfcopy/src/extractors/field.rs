// ABOUTME: Per-field extraction from one review-table row.
// ABOUTME: Finds the field's cell and value container, then applies the field kind's parsing rule.

//! Field extraction for a single listing row.
//!
//! Every field lives in a `td.field.<id>` cell whose first `div` holds the value.
//! A missing cell or container is an error; everything past that point
//! degrades to an empty or absent value instead.

use ego_tree::NodeRef;
use scraper::{ElementRef, Node};

use crate::date_parse::reformat_date;
use crate::error::ExportError;
use crate::extractors::selectors::listing;
use crate::fields::{map_rating, Field, FieldKind};

/// Normalizes whitespace in a string by collapsing runs of whitespace into single spaces.
pub(crate) fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Concatenated text of an element and its descendants, whitespace-normalized.
pub fn element_text(el: ElementRef<'_>) -> String {
    normalize_whitespace(&el.text().collect::<String>())
}

/// Text of an element with `<br>` kept as line breaks.
///
/// Whitespace inside each line is collapsed and blank lines are dropped.
pub fn multiline_text(el: ElementRef<'_>) -> String {
    let mut raw = String::new();
    for node in el.descendants() {
        match node.value() {
            Node::Text(text) => push_collapsed(&mut raw, text),
            Node::Element(e) if e.name() == "br" => raw.push('\n'),
            _ => {}
        }
    }

    raw.lines()
        .map(normalize_whitespace)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn push_collapsed(out: &mut String, s: &str) {
    let mut last_was_space = out.ends_with(char::is_whitespace);
    for c in s.chars() {
        if c.is_whitespace() {
            if !last_was_space {
                out.push(' ');
                last_was_space = true;
            }
        } else {
            out.push(c);
            last_was_space = false;
        }
    }
}

/// First non-blank text node directly under `node`, trimmed.
fn first_direct_text<'a>(node: NodeRef<'a, Node>) -> Option<&'a str> {
    node.children()
        .filter_map(|child| child.value().as_text())
        .map(|text| text.trim())
        .find(|text| !text.is_empty())
}

/// Locates the value container (`td.field.<id>` then its first `div`) for a field.
pub fn value_container<'a>(row: ElementRef<'a>, id: &str) -> Result<ElementRef<'a>, ExportError> {
    let selectors = listing();
    let cell = row
        .select(&*selectors.cell(id)?)
        .next()
        .ok_or_else(|| ExportError::field_missing(id, "cell"))?;

    cell.select(&selectors.container)
        .next()
        .ok_or_else(|| ExportError::field_missing(id, "value container"))
}

/// Title text of a title container: the link's own text without nested series annotations.
///
/// Returns `None` when the container has no link.
pub fn title_text(container: ElementRef<'_>) -> Option<String> {
    container.select(&listing().link).next().map(|link| {
        first_direct_text(*link)
            .map(str::to_string)
            .unwrap_or_default()
    })
}

/// Review text of a review container.
///
/// The listing renders a truncated preview span followed by the full text span; when
/// more than one span is present the second one wins. With a single span its text is
/// used, and with none the container's own text.
pub fn review_text(container: ElementRef<'_>) -> String {
    let spans: Vec<ElementRef<'_>> = container.select(&listing().span).collect();
    match spans.as_slice() {
        [] => multiline_text(container),
        [only] => multiline_text(*only),
        [_, full, ..] => multiline_text(*full),
    }
}

/// Numeric rating of a rating container. Labels outside the lexicon pass through.
pub fn rating_text(container: ElementRef<'_>) -> String {
    map_rating(&element_text(container))
}

/// Date of a date container, reformatted to `YYYY/MM/DD`.
///
/// With `value_class`, the date comes from a nested `span` of that class and a missing
/// span means no date was recorded. Unparseable dates yield `None`.
pub fn date_text(
    container: ElementRef<'_>,
    value_class: Option<&str>,
) -> Result<Option<String>, ExportError> {
    match value_class {
        Some(class) => Ok(container
            .select(&*listing().value_span(class)?)
            .next()
            .and_then(|span| reformat_date(&element_text(span)))),
        None => Ok(reformat_date(&element_text(container))),
    }
}

/// Extracts one field's value from a listing row.
///
/// `Ok(None)` means the field has no value (no date recorded, or a date that does not
/// parse). `Ok(Some(""))` means the cell is present but empty.
pub fn extract(row: ElementRef<'_>, field: &Field) -> Result<Option<String>, ExportError> {
    let container = value_container(row, field.id)?;

    let value = match field.kind {
        FieldKind::Plain => Some(element_text(container)),
        FieldKind::Date { value_class } => date_text(container, value_class)?,
        FieldKind::Title => Some(
            title_text(container)
                .ok_or_else(|| ExportError::field_missing(field.id, "title link"))?,
        ),
        FieldKind::Review => Some(review_text(container)),
        FieldKind::Rating => Some(rating_text(container)),
    };
    Ok(value)
}
