// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// A single value of the worksheet.
///
/// Readers are expected to map every spreadsheet value to one of these three
/// states. Booleans, dates and error codes are the loader's business.
#[derive(PartialEq, Debug, Clone)]
pub enum Cell {
    /// No value at all.
    Empty,
    /// A numeric value. A NaN is the "not-a-number" marker.
    Number(f64),
    /// Any textual content, kept as entered.
    Text(String),
}

impl From<&str> for Cell {
    fn from(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Cell {
        Cell::Text(s)
    }
}

impl From<f64> for Cell {
    fn from(x: f64) -> Cell {
        Cell::Number(x)
    }
}

/// The worksheet, row-major. Rows are padded with `Cell::Empty` so that the
/// grid is rectangular.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct RawGrid {
    rows: Vec<Vec<Cell>>,
    num_columns: usize,
}

impl RawGrid {
    pub fn new(rows: Vec<Vec<Cell>>) -> RawGrid {
        let num_columns = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        let rows = rows
            .into_iter()
            .map(|mut r| {
                r.resize(num_columns, Cell::Empty);
                r
            })
            .collect();
        RawGrid { rows, num_columns }
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.num_columns
    }

    /// The cells of a row. Out of range rows are empty.
    pub fn row(&self, idx: usize) -> &[Cell] {
        self.rows.get(idx).map(|r| r.as_slice()).unwrap_or(&[])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(|r| r.as_slice())
    }
}

// ******** Output data structures *********

/// The results of one party in one council.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Record {
    pub party: String,
    pub votes: u64,
    pub seats: u64,
}

impl Record {
    pub fn new(party: &str, votes: u64, seats: u64) -> Record {
        Record {
            party: party.to_string(),
            votes,
            seats,
        }
    }
}

/// A block of the worksheet that starts with a numbered council title.
///
/// `end_row` is exclusive: it is the first row of the next section, or the
/// number of rows in the grid.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct CouncilSection {
    pub title: String,
    pub start_row: usize,
    pub end_row: usize,
}

/// The cleaned results of one council, in worksheet order.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ResultTable {
    pub title: String,
    pub records: Vec<Record>,
}

/// All the council tables, keyed by title.
///
/// Titles keep the position of their first insertion. Inserting a table with
/// an existing title replaces the table in place.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ResultSet {
    tables: Vec<ResultTable>,
}

impl ResultSet {
    pub fn new() -> ResultSet {
        ResultSet { tables: Vec::new() }
    }

    /// Returns the replaced table, if any.
    pub fn insert(&mut self, table: ResultTable) -> Option<ResultTable> {
        match self.tables.iter_mut().find(|t| t.title == table.title) {
            Some(existing) => Some(std::mem::replace(existing, table)),
            None => {
                self.tables.push(table);
                None
            }
        }
    }

    pub fn get(&self, title: &str) -> Option<&ResultTable> {
        self.tables.iter().find(|t| t.title == title)
    }

    pub fn titles(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.title.as_str()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResultTable> {
        self.tables.iter()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a ResultTable;
    type IntoIter = std::slice::Iter<'a, ResultTable>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.iter()
    }
}

/// Why a row after the header did not become a record.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum SkipReason {
    /// Fewer than three usable values (party, votes, seats).
    TooFewValues,
    /// The votes or the seats could not be read as a number.
    NotANumber,
    /// The votes or the seats are negative.
    NegativeCount,
    /// The row is the summary row of the section.
    SummaryRow,
}

/// Number of rows dropped in a section, by reason.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct SkipCounts {
    pub too_few_values: u32,
    pub not_a_number: u32,
    pub negative_count: u32,
    pub summary_rows: u32,
    /// Records removed by the zero-vote filter.
    pub zero_votes: u32,
}

impl SkipCounts {
    pub fn record(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::TooFewValues => self.too_few_values += 1,
            SkipReason::NotANumber => self.not_a_number += 1,
            SkipReason::NegativeCount => self.negative_count += 1,
            SkipReason::SummaryRow => self.summary_rows += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.too_few_values
            + self.not_a_number
            + self.negative_count
            + self.summary_rows
            + self.zero_votes
    }
}

/// What happened to a council section.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum SectionOutcome {
    /// The section produced a table with this number of records.
    Table { records: usize, skipped: SkipCounts },
    /// No header row was found before the end of the section.
    MissingHeader,
    /// A header was found, but no record survived.
    NoRecords { skipped: SkipCounts },
    /// Building the table failed. The other sections are not affected.
    Failed { reason: String },
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SectionReport {
    pub section: CouncilSection,
    pub outcome: SectionOutcome,
}

/// Information about the parse, meant to be shown to the user.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ParseDiagnostics {
    /// One report per detected section, in worksheet order.
    pub sections: Vec<SectionReport>,
    pub warnings: Vec<String>,
}

impl ParseDiagnostics {
    pub fn num_sections(&self) -> usize {
        self.sections.len()
    }

    pub fn section_titles(&self) -> Vec<&str> {
        self.sections
            .iter()
            .map(|s| s.section.title.as_str())
            .collect()
    }

    /// The (title, reason) pairs of all the sections that failed.
    pub fn failures(&self) -> Vec<(&str, &str)> {
        self.sections
            .iter()
            .filter_map(|s| match &s.outcome {
                SectionOutcome::Failed { reason } => {
                    Some((s.section.title.as_str(), reason.as_str()))
                }
                _ => None,
            })
            .collect()
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParsedResults {
    pub results: ResultSet,
    pub diagnostics: ParseDiagnostics,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ParseErrors {
    /// No section produced any record.
    EmptyResultSet { diagnostics: ParseDiagnostics },
}

impl Error for ParseErrors {}

impl Display for ParseErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseErrors::EmptyResultSet { diagnostics } => write!(
                f,
                "could not parse election data: no council results found in {} detected section(s)",
                diagnostics.num_sections()
            ),
        }
    }
}

/// An unexpected failure while building the table of one section.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum SectionError {
    /// A count that cannot be represented as a number of votes or seats.
    CountOverflow { row: usize, value: String },
}

impl Error for SectionError {}

impl Display for SectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionError::CountOverflow { row, value } => write!(
                f,
                "row {}: value {:?} is too large to be a vote or seat count",
                row, value
            ),
        }
    }
}

// ********* Configuration **********

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParseRules {
    /// Lower-case keywords, one of which must appear in a section title.
    pub section_keywords: Vec<String>,
    /// If set, section titles numbered above this value are ignored.
    pub max_section_number: Option<u64>,
    /// Upper-case tokens that must all appear in the header row.
    pub header_tokens: Vec<String>,
    /// Party name of the summary row (compared case-insensitively).
    pub summary_label: String,
    /// Removes the parties with zero votes from the tables.
    ///
    /// This also removes the parties that genuinely received no vote.
    pub drop_zero_votes: bool,
}

impl Default for ParseRules {
    fn default() -> ParseRules {
        ParseRules {
            section_keywords: vec!["council".to_string(), "sabha".to_string()],
            max_section_number: None,
            header_tokens: vec![
                "PARTY".to_string(),
                "VOTES".to_string(),
                "TOTAL".to_string(),
            ],
            summary_label: "TOTAL".to_string(),
            drop_zero_votes: true,
        }
    }
}
