use log::{debug, info};

use crate::config::{CouncilSection, ParseRules};
use crate::grid::NormalizedGrid;

/// Reads the ordinal at the start of a title such as `12 - SOME COUNCIL`.
///
/// The number must be followed by whitespace, then a hyphen. Ranges such as
/// `2024-25` are not ordinals.
fn leading_ordinal(text: &str) -> Option<u64> {
    let digits_end = text
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());
    if digits_end == 0 {
        return None;
    }
    let after = &text[digits_end..];
    let rest = after.trim_start();
    if rest.len() == after.len() || !rest.starts_with('-') {
        return None;
    }
    match text[..digits_end].parse::<u64>() {
        Ok(n) if n >= 1 => Some(n),
        _ => None,
    }
}

/// True if the text of a cell introduces a council section.
pub fn is_section_title(text: &str, rules: &ParseRules) -> bool {
    let trimmed = text.trim();
    let ordinal = match leading_ordinal(trimmed) {
        Some(n) => n,
        None => return false,
    };
    if let Some(max) = rules.max_section_number {
        if ordinal > max {
            return false;
        }
    }
    let lower = trimmed.to_lowercase();
    rules
        .section_keywords
        .iter()
        .any(|k| lower.contains(k.to_lowercase().as_str()))
}

/// Finds the council sections, in the order of the rows.
///
/// Each row is checked cell by cell and the first title found wins.
pub fn detect_sections(grid: &NormalizedGrid, rules: &ParseRules) -> Vec<CouncilSection> {
    let mut starts: Vec<(usize, String)> = Vec::new();
    for row_idx in 0..grid.num_rows() {
        if let Some(title) = grid
            .texts(row_idx)
            .iter()
            .find(|t| is_section_title(t, rules))
        {
            debug!("detect_sections: row {}: title {:?}", row_idx, title.trim());
            starts.push((row_idx, title.trim().to_string()));
        }
    }

    let mut sections: Vec<CouncilSection> = Vec::new();
    for (idx, (start_row, title)) in starts.iter().enumerate() {
        let end_row = starts
            .get(idx + 1)
            .map(|(next_start, _)| *next_start)
            .unwrap_or_else(|| grid.num_rows());
        sections.push(CouncilSection {
            title: title.clone(),
            start_row: *start_row,
            end_row,
        });
    }

    info!(
        "Found {} council sections: {:?}",
        sections.len(),
        sections.iter().map(|s| s.title.as_str()).collect::<Vec<&str>>()
    );
    sections
}
