use log::debug;

use crate::config::{CouncilSection, ParseRules};
use crate::grid::NormalizedGrid;

/// True if the row names all the header columns.
///
/// The tokens are looked up as substrings of the whole row, so `Total Seats`
/// or `Party Name` also match.
pub fn is_header_row(grid: &NormalizedGrid, row: usize, rules: &ParseRules) -> bool {
    let joined = grid.joined_upper(row);
    rules
        .header_tokens
        .iter()
        .all(|token| joined.contains(token.to_uppercase().as_str()))
}

/// The index of the header row of a section, if any.
///
/// The title row itself is never the header.
pub fn locate_header(
    grid: &NormalizedGrid,
    section: &CouncilSection,
    rules: &ParseRules,
) -> Option<usize> {
    let found =
        ((section.start_row + 1)..section.end_row).find(|row| is_header_row(grid, *row, rules));
    debug!(
        "locate_header: section {:?}: header row {:?}",
        section.title, found
    );
    found
}
