use log::{debug, info};

use crate::config::{
    CouncilSection, ParseRules, Record, ResultTable, SectionError, SectionOutcome, SkipCounts,
};
use crate::grid::NormalizedGrid;
use crate::header::locate_header;
use crate::records::{extract_record, RowOutcome};

/// The outcome of one section, with its table when it has one.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SectionBuild {
    pub outcome: SectionOutcome,
    pub table: Option<ResultTable>,
}

/// Builds the table of one section.
///
/// Rows before the header are ignored. Rows after it are read until the end
/// of the section. A section without a header has no table.
pub fn aggregate_section(
    grid: &NormalizedGrid,
    section: &CouncilSection,
    rules: &ParseRules,
) -> Result<SectionBuild, SectionError> {
    let header_row = match locate_header(grid, section, rules) {
        Some(row) => row,
        None => {
            info!("No header row in section {:?}", section.title);
            return Ok(SectionBuild {
                outcome: SectionOutcome::MissingHeader,
                table: None,
            });
        }
    };

    let mut records: Vec<Record> = Vec::new();
    let mut skipped = SkipCounts::default();
    for row in (header_row + 1)..section.end_row {
        match extract_record(grid, row, rules)? {
            RowOutcome::Record(r) => records.push(r),
            RowOutcome::Skipped(reason) => skipped.record(reason),
        }
    }

    if rules.drop_zero_votes {
        let before = records.len();
        records.retain(|r| r.votes > 0);
        skipped.zero_votes = (before - records.len()) as u32;
    }
    debug!(
        "aggregate_section: {:?}: {} records, skipped: {:?}",
        section.title,
        records.len(),
        skipped
    );

    if records.is_empty() {
        info!("No records in section {:?}", section.title);
        return Ok(SectionBuild {
            outcome: SectionOutcome::NoRecords { skipped },
            table: None,
        });
    }

    info!(
        "Section {:?}: {} parties",
        section.title,
        records.len()
    );
    Ok(SectionBuild {
        outcome: SectionOutcome::Table {
            records: records.len(),
            skipped,
        },
        table: Some(ResultTable {
            title: section.title.clone(),
            records,
        }),
    })
}
