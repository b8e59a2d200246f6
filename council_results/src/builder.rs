pub use crate::config::*;

/// A builder for worksheets held in memory.
///
/// Useful when the cells do not come from a spreadsheet file, and in tests.
///
/// ```
/// use council_results::builder::GridBuilder;
/// use council_results::{parse_council_results, ParseRules};
///
/// let grid = GridBuilder::new()
///     .text_row(&["1 - MANNAR URBAN COUNCIL", "", ""])
///     .text_row(&["Party", "Votes", "Total"])
///     .text_row(&["UNP", "1500", "2"])
///     .build();
///
/// let parsed = parse_council_results(&grid, &ParseRules::default())?;
/// assert_eq!(parsed.results.len(), 1);
///
/// # Ok::<(), council_results::ParseErrors>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct GridBuilder {
    rows: Vec<Vec<Cell>>,
}

impl GridBuilder {
    pub fn new() -> GridBuilder {
        GridBuilder { rows: Vec::new() }
    }

    /// Adds a row of text cells. Empty strings become empty cells.
    pub fn text_row(mut self, values: &[&str]) -> GridBuilder {
        self.add_text_row(values);
        self
    }

    pub fn row(mut self, cells: Vec<Cell>) -> GridBuilder {
        self.rows.push(cells);
        self
    }

    pub fn add_text_row(&mut self, values: &[&str]) {
        let cells = values
            .iter()
            .map(|s| {
                if s.is_empty() {
                    Cell::Empty
                } else {
                    Cell::from(*s)
                }
            })
            .collect();
        self.rows.push(cells);
    }

    pub fn add_row(&mut self, cells: &[Cell]) {
        self.rows.push(cells.to_vec());
    }

    pub fn build(self) -> RawGrid {
        RawGrid::new(self.rows)
    }
}
