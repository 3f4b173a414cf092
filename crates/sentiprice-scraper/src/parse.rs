//! HTML extraction for quote pages and article pages.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::error::RowError;

static NEWS_TABLE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("table.fullview-news-outer").expect("valid news table selector")
});
static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").expect("valid row selector"));
static LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").expect("valid link selector"));
static PARAGRAPH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("valid paragraph selector"));

/// One headline row as it appears on the quote page, before any
/// interpretation of the date text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawNewsRow {
    pub date_text: String,
    pub title: String,
    pub link: String,
}

/// Parses the news table of a quote page.
///
/// Returns `None` when the page has no `table.fullview-news-outer`. Otherwise
/// returns one entry per `<tr>`, in page order, each either a row or the
/// reason it was rejected.
#[must_use]
pub fn parse_news_table(html: &str) -> Option<Vec<Result<RawNewsRow, RowError>>> {
    let document = Html::parse_document(html);
    let table = document.select(&NEWS_TABLE).next()?;
    Some(table.select(&ROW).map(parse_row).collect())
}

fn parse_row(row: ElementRef<'_>) -> Result<RawNewsRow, RowError> {
    let cells: Vec<ElementRef<'_>> = row
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "td")
        .collect();
    if cells.len() < 2 {
        return Err(RowError::TooFewCells { found: cells.len() });
    }

    let anchor = cells[1].select(&LINK).next().ok_or(RowError::MissingLink)?;
    let link = anchor
        .value()
        .attr("href")
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .ok_or(RowError::MissingLink)?;

    Ok(RawNewsRow {
        date_text: element_text(cells[0]),
        title: element_text(anchor),
        link: link.to_owned(),
    })
}

/// Text of every `<p>` element joined by single spaces, trimmed.
///
/// Returns an empty string for pages without paragraph text.
#[must_use]
pub fn extract_paragraph_text(html: &str) -> String {
    let document = Html::parse_document(html);
    document
        .select(&PARAGRAPH)
        .map(|p| p.text().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_owned()
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_owned()
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
