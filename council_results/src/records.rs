use log::debug;

use crate::config::{ParseRules, Record, SectionError, SkipReason};
use crate::grid::{coerce_count, CountError, NormalizedGrid, UsableValue};

/// The result of reading one data row.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum RowOutcome {
    Record(Record),
    Skipped(SkipReason),
}

// The outer error aborts the section, the inner one skips the row.
fn read_count(row: usize, value: &UsableValue) -> Result<Result<u64, SkipReason>, SectionError> {
    match coerce_count(value.cell) {
        Ok(n) => Ok(Ok(n)),
        Err(CountError::NotANumber(_)) => Ok(Err(SkipReason::NotANumber)),
        Err(CountError::Negative(_)) => Ok(Err(SkipReason::NegativeCount)),
        Err(CountError::Overflow(value)) => Err(SectionError::CountOverflow { row, value }),
    }
}

/// Reads a data row as (party, votes, seats).
///
/// The first three usable values of the row are taken in this order. Rows
/// with extra leading values (a serial number column, for instance) are
/// misread: the layout is positional.
pub fn extract_record(
    grid: &NormalizedGrid,
    row: usize,
    rules: &ParseRules,
) -> Result<RowOutcome, SectionError> {
    let values = grid.usable_values(row);
    if values.len() < 3 {
        debug!("extract_record: row {}: too few values: {:?}", row, values);
        return Ok(RowOutcome::Skipped(SkipReason::TooFewValues));
    }
    let party = values[0].text.trim();

    let votes = match read_count(row, &values[1])? {
        Ok(n) => n,
        Err(reason) => {
            debug!(
                "extract_record: row {}: votes {:?}: {:?}",
                row, values[1].text, reason
            );
            return Ok(RowOutcome::Skipped(reason));
        }
    };
    let seats = match read_count(row, &values[2])? {
        Ok(n) => n,
        Err(reason) => {
            debug!(
                "extract_record: row {}: seats {:?}: {:?}",
                row, values[2].text, reason
            );
            return Ok(RowOutcome::Skipped(reason));
        }
    };

    if party.to_uppercase() == rules.summary_label.to_uppercase() {
        debug!("extract_record: row {}: summary row", row);
        return Ok(RowOutcome::Skipped(SkipReason::SummaryRow));
    }

    let record = Record::new(party, votes, seats);
    debug!("extract_record: row {}: {:?}", row, record);
    Ok(RowOutcome::Record(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::GridBuilder;
    use crate::config::Cell;

    fn extract(cells: Vec<Cell>) -> Result<RowOutcome, SectionError> {
        let grid = GridBuilder::new().row(cells).build();
        let view = NormalizedGrid::new(&grid);
        extract_record(&view, 0, &ParseRules::default())
    }

    fn extract_text(values: &[&str]) -> Result<RowOutcome, SectionError> {
        let grid = GridBuilder::new().text_row(values).build();
        let view = NormalizedGrid::new(&grid);
        extract_record(&view, 0, &ParseRules::default())
    }

    #[test]
    fn clean_row() {
        assert_eq!(
            extract_text(&["UNP", "1500", "2", ""]),
            Ok(RowOutcome::Record(Record::new("UNP", 1500, 2)))
        );
    }

    #[test]
    fn numeric_cells_and_gaps() {
        assert_eq!(
            extract(vec![
                Cell::Empty,
                Cell::from(" SLPP "),
                Cell::Number(f64::NAN),
                Cell::Number(1000.0),
                Cell::from(""),
                Cell::Number(1.0),
            ]),
            Ok(RowOutcome::Record(Record::new("SLPP", 1000, 1)))
        );
    }

    #[test]
    fn skipped_rows() {
        assert_eq!(
            extract_text(&["UNP", "1500", ""]),
            Ok(RowOutcome::Skipped(SkipReason::TooFewValues))
        );
        assert_eq!(
            extract_text(&["UNP", "abc", "2"]),
            Ok(RowOutcome::Skipped(SkipReason::NotANumber))
        );
        assert_eq!(
            extract_text(&["UNP", "15", "two"]),
            Ok(RowOutcome::Skipped(SkipReason::NotANumber))
        );
        assert_eq!(
            extract_text(&["UNP", "-15", "0"]),
            Ok(RowOutcome::Skipped(SkipReason::NegativeCount))
        );
        assert_eq!(
            extract_text(&["Total", "2500", "3"]),
            Ok(RowOutcome::Skipped(SkipReason::SummaryRow))
        );
    }

    #[test]
    fn positional_layout() {
        // A leading serial number shifts everything.
        assert_eq!(
            extract_text(&["1", "UNP", "1500", "2"]),
            Ok(RowOutcome::Skipped(SkipReason::NotANumber))
        );
        assert_eq!(
            extract_text(&["UNP", "1500", "2", "extra"]),
            Ok(RowOutcome::Record(Record::new("UNP", 1500, 2)))
        );
    }

    #[test]
    fn overflow_is_an_error() {
        assert_eq!(
            extract(vec![
                Cell::from("UNP"),
                Cell::Number(f64::INFINITY),
                Cell::from("1")
            ]),
            Err(SectionError::CountOverflow {
                row: 0,
                value: "inf".to_string()
            })
        );
    }
}
