use log::debug;

use crate::config::{Cell, RawGrid};

/// The textual form of a missing number.
pub const NAN_MARKER: &str = "nan";

/// Errors when reading a vote or seat count out of a cell.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum CountError {
    NotANumber(String),
    Negative(String),
    /// Infinite, or beyond what a count can hold.
    Overflow(String),
}

impl Cell {
    /// The text used when scanning the grid.
    ///
    /// Integral numbers print without a fractional part, so that a title
    /// typed as a number and the same title typed as text look the same.
    pub fn to_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Number(x) if x.is_nan() => NAN_MARKER.to_string(),
            Cell::Number(x) if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e15 => {
                format!("{:.0}", x)
            }
            Cell::Number(x) => format!("{}", x),
            Cell::Text(s) => s.clone(),
        }
    }
}

/// Reads a vote or seat count. Numbers are truncated toward zero.
///
/// Empty cells and the not-a-number marker count as zero.
pub fn coerce_count(cell: &Cell) -> Result<u64, CountError> {
    let x: f64 = match cell {
        Cell::Empty => return Ok(0),
        Cell::Number(x) if x.is_nan() => return Ok(0),
        Cell::Number(x) => *x,
        Cell::Text(s) => {
            let s = s.trim();
            if s == NAN_MARKER {
                return Ok(0);
            }
            match s.parse::<f64>() {
                Ok(x) if !x.is_nan() => x,
                _ => return Err(CountError::NotANumber(s.to_string())),
            }
        }
    };
    let truncated = x.trunc();
    if !truncated.is_finite() || truncated >= u64::MAX as f64 {
        return Err(CountError::Overflow(cell.to_text()));
    }
    if truncated < 0.0 {
        return Err(CountError::Negative(cell.to_text()));
    }
    Ok(truncated as u64)
}

/// A cell that carries some information, with its text.
#[derive(PartialEq, Debug, Clone)]
pub struct UsableValue<'a> {
    pub text: &'a str,
    pub cell: &'a Cell,
}

/// The scanning view of a grid: the text of every cell, next to the
/// original cells.
pub struct NormalizedGrid<'a> {
    raw: &'a RawGrid,
    texts: Vec<Vec<String>>,
}

impl<'a> NormalizedGrid<'a> {
    pub fn new(raw: &'a RawGrid) -> NormalizedGrid<'a> {
        let texts: Vec<Vec<String>> = raw
            .rows()
            .map(|row| row.iter().map(|c| c.to_text()).collect())
            .collect();
        debug!(
            "NormalizedGrid: {} rows, {} columns",
            raw.num_rows(),
            raw.num_columns()
        );
        NormalizedGrid { raw, texts }
    }

    pub fn num_rows(&self) -> usize {
        self.texts.len()
    }

    pub fn texts(&self, row: usize) -> &[String] {
        self.texts.get(row).map(|r| r.as_slice()).unwrap_or(&[])
    }

    pub fn cells(&self, row: usize) -> &'a [Cell] {
        self.raw.row(row)
    }

    /// The texts of a row joined by spaces, in upper case.
    pub fn joined_upper(&self, row: usize) -> String {
        self.texts(row).join(" ").to_uppercase()
    }

    /// The cells of a row without the empty cells, the blank strings and
    /// the not-a-number markers. Column order is preserved.
    pub fn usable_values(&self, row: usize) -> Vec<UsableValue<'_>> {
        self.cells(row)
            .iter()
            .zip(self.texts(row).iter())
            .filter(|(cell, text)| {
                let t = text.trim();
                !matches!(cell, Cell::Empty) && !t.is_empty() && t != NAN_MARKER
            })
            .map(|(cell, text)| UsableValue {
                text: text.as_str(),
                cell,
            })
            .collect()
    }

    /// The first rows, as text. Used to show what the parser saw.
    pub fn preview(&self, num_rows: usize) -> Vec<Vec<String>> {
        self.texts.iter().take(num_rows).cloned().collect()
    }
}
