mod aggregate;
pub mod builder;
mod config;
pub mod grid;
mod header;
pub mod manual;
mod records;
mod sections;
pub mod summary;

use log::{info, warn};

pub use crate::config::*;
pub use crate::sections::is_section_title;

use crate::aggregate::{aggregate_section, SectionBuild};
use crate::grid::NormalizedGrid;

/// Extracts the results of every council section of a worksheet.
///
/// Arguments:
/// * `grid` the cells of the worksheet
/// * `rules` how sections, headers and summary rows are recognized
///
/// A section that cannot be built is reported in the diagnostics and the
/// other sections are still processed. The only error is the absence of any
/// council result.
pub fn parse_council_results(
    grid: &RawGrid,
    rules: &ParseRules,
) -> Result<ParsedResults, ParseErrors> {
    info!(
        "Parsing grid of {} rows and {} columns",
        grid.num_rows(),
        grid.num_columns()
    );
    let view = NormalizedGrid::new(grid);
    let sections = sections::detect_sections(&view, rules);

    let mut results = ResultSet::new();
    let mut diagnostics = ParseDiagnostics::default();

    for section in sections {
        let outcome = match aggregate_section(&view, &section, rules) {
            Ok(SectionBuild { outcome, table }) => {
                if let Some(table) = table {
                    if let Some(previous) = results.insert(table) {
                        let msg = format!(
                            "Section {:?} at row {} replaces an earlier section with the same title ({} parties)",
                            section.title,
                            section.start_row,
                            previous.records.len()
                        );
                        warn!("{}", msg);
                        diagnostics.warnings.push(msg);
                    }
                }
                outcome
            }
            Err(e) => {
                warn!("Error processing {}: {}", section.title, e);
                SectionOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };
        diagnostics.sections.push(SectionReport { section, outcome });
    }

    if results.is_empty() {
        warn!(
            "No council results in {} sections",
            diagnostics.num_sections()
        );
        return Err(ParseErrors::EmptyResultSet { diagnostics });
    }
    info!("Parsed {} councils", results.len());
    Ok(ParsedResults {
        results,
        diagnostics,
    })
}
