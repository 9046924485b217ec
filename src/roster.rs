//! Reading participant names from free text or a CSV roster.

use crate::models::{Category, TournamentError};
use std::io::Read;

/// One name per line; surrounding whitespace trimmed, blank lines dropped.
pub fn parse_name_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Names split by category, in roster order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Roster {
    pub category_a: Vec<String>,
    pub category_b: Vec<String>,
}

impl Roster {
    pub fn len(&self) -> usize {
        self.category_a.len() + self.category_b.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn parse_category(raw: &str) -> Option<Category> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "a" => Some(Category::A),
        "b" => Some(Category::B),
        _ => None,
    }
}

/// Read `name,category` rows (category `a` or `b`). A leading `name,category` header is skipped.
pub fn parse_roster_csv<R: Read>(reader: R) -> Result<Roster, TournamentError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut roster = Roster::default();
    for (line, record) in rdr.records().enumerate() {
        let record = record?;
        let name = record.get(0).unwrap_or("");
        let category = record.get(1).unwrap_or("");
        if line == 0 && name.eq_ignore_ascii_case("name") && category.eq_ignore_ascii_case("category")
        {
            continue;
        }
        if name.is_empty() {
            continue;
        }
        match parse_category(category) {
            Some(Category::A) => roster.category_a.push(name.to_owned()),
            Some(Category::B) => roster.category_b.push(name.to_owned()),
            _ => {
                return Err(TournamentError::Roster(format!(
                    "row {}: unknown category {:?} for {}",
                    line + 1,
                    category,
                    name
                )))
            }
        }
    }
    Ok(roster)
}
