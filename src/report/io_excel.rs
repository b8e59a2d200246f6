// Reading worksheets with calamine.

use calamine::{open_workbook_auto, DataType, Range, Reader};

use snafu::{OptionExt, ResultExt};

use crate::report::*;

pub fn read_excel_grid(path: &str, worksheet_name: &Option<String>) -> BRResult<RawGrid> {
    let mut workbook = open_workbook_auto(path).context(OpeningExcelSnafu { path })?;
    debug!("read_excel_grid: worksheets: {:?}", workbook.sheet_names());

    let wrange: Range<DataType> = match worksheet_name {
        Some(name) => workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { name, path })?
            .context(OpeningExcelSnafu { path })?,
        None => workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu { path })?
            .context(OpeningExcelSnafu { path })?,
    };

    let grid = range_to_grid(&wrange);
    info!(
        "Read {:?}: {} rows, {} columns",
        path,
        grid.num_rows(),
        grid.num_columns()
    );
    Ok(grid)
}

/// The range only covers the used cells. It is shifted back so that row and
/// column indices match the ones of the worksheet.
pub fn range_to_grid(wrange: &Range<DataType>) -> RawGrid {
    let (row_offset, col_offset) = wrange
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));
    let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); row_offset];
    for row in wrange.rows() {
        let mut cells: Vec<Cell> = vec![Cell::Empty; col_offset];
        cells.extend(row.iter().map(read_cell));
        rows.push(cells);
    }
    RawGrid::new(rows)
}

pub fn read_cell(cell: &DataType) -> Cell {
    match cell {
        DataType::Empty => Cell::Empty,
        DataType::String(s) => Cell::Text(s.clone()),
        DataType::Float(f) => Cell::Number(*f),
        DataType::Int(i) => Cell::Number(*i as f64),
        // Serial date number.
        DataType::DateTime(f) => Cell::Number(*f),
        DataType::Bool(true) => Cell::Text("True".to_string()),
        DataType::Bool(false) => Cell::Text("False".to_string()),
        DataType::Error(e) => Cell::Text(e.to_string()),
    }
}
