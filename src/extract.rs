//! Vote table extraction.
//!
//! A results page holds one or more result tables. Inside each table a
//! heading row names a vote category and every following data row lists
//! the members who voted that way, until the next heading.

use crate::error::GatewayError;
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;

/// Category label -> names in document order.
pub type VoteResult = BTreeMap<String, Vec<String>>;

/// CSS selectors locating the parts of a results page.
#[derive(Debug, Clone)]
pub struct Markers {
    pub table: String,
    pub title: String,
    pub row: String,
    pub cell: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            table: ".hpo_result_table".to_string(),
            title: ".hpo_result_block_title".to_string(),
            row: "tr".to_string(),
            cell: "td".to_string(),
        }
    }
}

pub struct VoteExtractor {
    table: Selector,
    title: Selector,
    row: Selector,
    cell: Selector,
}

impl VoteExtractor {
    pub fn new(markers: &Markers) -> Result<Self, GatewayError> {
        Ok(Self {
            table: parse_selector(&markers.table)?,
            title: parse_selector(&markers.title)?,
            row: parse_selector(&markers.row)?,
            cell: parse_selector(&markers.cell)?,
        })
    }

    /// Group the names found in every result table by vote category.
    ///
    /// Missing or unexpected markup never fails; it just contributes nothing.
    pub fn extract(&self, document: &Html) -> VoteResult {
        let mut votes = VoteResult::new();

        for table in document.select(&self.table) {
            let mut scan = TableScan::new(&mut votes);
            for row in table.select(&self.row) {
                scan.step(self.classify(row));
            }
        }

        votes
    }

    pub fn extract_html(&self, html: &str) -> VoteResult {
        self.extract(&Html::parse_document(html))
    }

    fn classify(&self, row: ElementRef<'_>) -> Row {
        let mut titles = row.select(&self.title).peekable();
        if titles.peek().is_none() {
            return Row::Data(row.select(&self.cell).map(text_of).collect());
        }
        let label: String = titles.flat_map(|t| t.text()).collect();
        Row::Heading(label.trim().to_string())
    }
}

// A heading row is never also a data row
enum Row {
    Heading(String),
    Data(Vec<String>),
}

// Current category of the table being scanned
enum Category {
    Unset,
    Active(String),
}

/// Per-table accumulator. Starts with no category; a heading row moves it
/// to that category and data rows append under it.
struct TableScan<'v> {
    category: Category,
    votes: &'v mut VoteResult,
}

impl<'v> TableScan<'v> {
    fn new(votes: &'v mut VoteResult) -> Self {
        Self {
            category: Category::Unset,
            votes,
        }
    }

    fn step(&mut self, row: Row) {
        match row {
            Row::Heading(label) if label.is_empty() => self.category = Category::Unset,
            Row::Heading(label) => self.category = Category::Active(label),
            Row::Data(cells) => {
                let Category::Active(label) = &self.category else {
                    return;
                };
                for name in cells.into_iter().filter(|c| !c.is_empty()) {
                    self.votes.entry(label.clone()).or_default().push(name);
                }
            }
        }
    }
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn parse_selector(css: &str) -> Result<Selector, GatewayError> {
    Selector::parse(css)
        .map_err(|e| GatewayError::Internal(format!("invalid selector {css:?}: {e}")))
}
