//! CSV export of what a table shows.

use std::io;

use crate::error::ViewResult;
use crate::table::DataTable;

/// Which rows [`export_csv`] writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportScope {
    /// Only the page currently on screen.
    #[default]
    CurrentPage,
    /// Every row matching the current search and filter, in the current sort order.
    AllPages,
}

/// Write the table's rendered cells as CSV, with column labels as the header row.
///
/// Returns the number of data rows written. Cells are written exactly as rendered, so
/// custom renderers and the `-` placeholder for empty cells carry over.
pub fn export_csv<W: io::Write>(
    table: &mut DataTable,
    writer: W,
    scope: ExportScope,
) -> ViewResult<usize> {
    let rows = match scope {
        ExportScope::CurrentPage => table.rendered_rows()?,
        ExportScope::AllPages => table.rendered_rows_all_pages()?,
    };

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(table.header_labels())?;
    for row in &rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(rows.len())
}
