// Reading the names of the participants from a spreadsheet.

use std::path::Path;

use calamine::{open_workbook_auto, DataType, Range, Reader};

use crate::lottery::io_common::{cell_text, ensure_names, simplify_file_name};
use crate::lottery::*;

/// Reads the names in the first column of a worksheet. Without a worksheet
/// name, the first worksheet of the workbook is used.
pub fn read_excel_names(path: &Path, worksheet_name: Option<&str>) -> LotteryResult<Vec<String>> {
    let path_s = simplify_file_name(path);
    debug!(
        "read_excel_names: path: {:?} worksheet: {:?}",
        path, worksheet_name
    );
    let mut workbook = open_workbook_auto(path).context(OpeningExcelSnafu {
        path: path_s.clone(),
    })?;

    let wrange = if let Some(name) = worksheet_name {
        workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu {
                path: path_s.clone(),
                name,
            })?
            .context(OpeningExcelSnafu {
                path: path_s.clone(),
            })?
    } else {
        workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu {
                path: path_s.clone(),
            })?
            .context(OpeningExcelSnafu {
                path: path_s.clone(),
            })?
    };
    ensure_names(path, names_from_range(&wrange))
}

/// The non-blank cells of the first column, top to bottom, as text.
///
/// Every kind of cell is turned into text, dates included (as their serial
/// number). Empty cells and cells holding a formula error are skipped.
pub fn names_from_range(wrange: &Range<DataType>) -> Vec<String> {
    wrange
        .rows()
        .filter_map(|row| match row.first() {
            None | Some(DataType::Empty) | Some(DataType::Error(_)) => None,
            Some(DataType::String(s)) => cell_text(s),
            Some(cell) => cell_text(&cell.to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;

    #[test]
    fn first_column_only() {
        let mut r: Range<DataType> = Range::new((0, 0), (4, 1));
        r.set_value((0, 0), DataType::String("Alice".to_string()));
        r.set_value((0, 1), DataType::String("Sales".to_string()));
        r.set_value((1, 0), DataType::String("  Bob ".to_string()));
        // Row 2 is blank.
        r.set_value((3, 0), DataType::Float(1024.0));
        r.set_value((4, 0), DataType::String("   ".to_string()));
        r.set_value((4, 1), DataType::String("Nobody".to_string()));
        assert_eq!(names_from_range(&r), vec!["Alice", "Bob", "1024"]);
    }

    #[test]
    fn every_cell_kind_becomes_text() {
        let mut r: Range<DataType> = Range::new((0, 0), (4, 0));
        r.set_value((0, 0), DataType::Int(42));
        r.set_value((1, 0), DataType::Bool(true));
        r.set_value((2, 0), DataType::DateTime(44927.0));
        r.set_value((3, 0), DataType::Error(CellErrorType::NA));
        r.set_value((4, 0), DataType::Float(2.5));
        assert_eq!(names_from_range(&r), vec!["42", "true", "44927", "2.5"]);
    }

    #[test]
    fn missing_workbook() {
        let err = read_excel_names(Path::new("/nonexistent/staff.xlsx"), None).unwrap_err();
        assert!(matches!(err, LotteryError::OpeningExcel { .. }));
        assert!(err.is_import_error());
    }
}
