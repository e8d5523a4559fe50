// ABOUTME: Field specification for the Goodreads review table and the rating lexicon.
// ABOUTME: Maps export column names to table cell ids and the extraction strategy for each.

/// How a field's value is pulled out of its table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Whitespace-normalized text of the value container.
    Plain,
    /// A date reformatted to `YYYY/MM/DD`.
    ///
    /// With `value_class` set, the date is read from a nested `span` of that class
    /// and an absent span yields no value; otherwise the container text is parsed.
    Date { value_class: Option<&'static str> },
    /// First direct text of the title link, excluding nested series annotations.
    Title,
    /// Full review text, skipping the truncated preview when both are present.
    Review,
    /// Textual star label mapped through the rating lexicon.
    Rating,
}

impl FieldKind {
    /// Derives the extraction strategy for a raw cell id.
    pub fn infer(id: &str) -> Self {
        match id {
            "title" => FieldKind::Title,
            "review" => FieldKind::Review,
            "rating" => FieldKind::Rating,
            "date_read" => FieldKind::Date {
                value_class: Some("date_read_value"),
            },
            _ if id.contains("date") => FieldKind::Date { value_class: None },
            _ => FieldKind::Plain,
        }
    }
}

/// One export column: its display name, the table cell id, and how to extract it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub id: &'static str,
    pub kind: FieldKind,
}

impl Field {
    pub const fn new(name: &'static str, id: &'static str, kind: FieldKind) -> Self {
        Self { name, id, kind }
    }
}

const TEXT_DATE: FieldKind = FieldKind::Date { value_class: None };

/// Columns of the official Goodreads export that the review table can supply, in export order.
pub const GOODREADS_FIELDS: &[Field] = &[
    Field::new("Title", "title", FieldKind::Title),
    Field::new("Author", "author", FieldKind::Plain),
    Field::new("My Rating", "rating", FieldKind::Rating),
    Field::new("Average Rating", "avg_rating", FieldKind::Plain),
    Field::new("Num Ratings", "num_ratings", FieldKind::Plain),
    Field::new("Date Started", "date_started", TEXT_DATE),
    Field::new(
        "Date Read",
        "date_read",
        FieldKind::Date {
            value_class: Some("date_read_value"),
        },
    ),
    Field::new("Date Added", "date_added", TEXT_DATE),
    Field::new("Original Publication Year", "date_pub", TEXT_DATE),
    Field::new("Year Published", "date_pub_edition", TEXT_DATE),
    Field::new("Number of Pages", "num_pages", FieldKind::Plain),
    Field::new("ISBN", "isbn", FieldKind::Plain),
    Field::new("ISBN13", "isbn13", FieldKind::Plain),
    Field::new("Asin", "asin", FieldKind::Plain),
    Field::new("Read Count", "read_count", FieldKind::Plain),
    Field::new("Owned Copies", "owned", FieldKind::Plain),
    Field::new("Comments", "comments", FieldKind::Plain),
    Field::new("My Review", "review", FieldKind::Review),
];

/// Star labels shown in the rating column and their numeric export values.
pub const RATING_LEXICON: &[(&str, &str)] = &[
    ("did not like it", "1"),
    ("it was ok", "2"),
    ("liked it", "3"),
    ("really liked it", "4"),
    ("it was amazing", "5"),
];

/// Maps a star label to its numeric rating. Unknown labels pass through unchanged.
pub fn map_rating(label: &str) -> String {
    RATING_LEXICON
        .iter()
        .find(|(phrase, _)| *phrase == label)
        .map(|(_, value)| (*value).to_string())
        .unwrap_or_else(|| label.to_string())
}

/// Display names of `fields`, in order.
pub fn header(fields: &[Field]) -> Vec<&'static str> {
    fields.iter().map(|f| f.name).collect()
}
