//! Column definitions, filter configuration and table options.

use std::fmt;
use std::sync::Arc;

use crate::error::{ViewError, ViewResult};
use crate::processing::{SortType, DEFAULT_PAGE_SIZE};
use crate::types::{Schema, Value};

/// Text shown for a missing or null cell.
pub const EMPTY_CELL: &str = "-";

/// Horizontal alignment of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Borrowed view of one row, handed to cell renderers.
#[derive(Debug, Clone, Copy)]
pub struct RowRef<'a> {
    pub schema: &'a Schema,
    pub values: &'a [Value],
}

impl<'a> RowRef<'a> {
    pub fn get(&self, field: &str) -> Option<&'a Value> {
        self.values.get(self.schema.index_of(field)?)
    }
}

/// Custom cell renderer.
pub type CellRenderer = Arc<dyn Fn(RowRef<'_>) -> String + Send + Sync>;

/// How one field is labelled, sorted and rendered.
#[derive(Clone)]
pub struct ColumnDef {
    pub field: String,
    pub label: String,
    pub sortable: bool,
    pub sort_type: SortType,
    pub width: Option<u16>,
    pub align: Align,
    pub render: Option<CellRenderer>,
}

impl ColumnDef {
    /// A sortable, left-aligned string column.
    pub fn new(field: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
            sortable: true,
            sort_type: SortType::String,
            width: None,
            align: Align::Left,
            render: None,
        }
    }

    pub fn sort_type(mut self, sort_type: SortType) -> Self {
        self.sort_type = sort_type;
        self
    }

    pub fn not_sortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn render<F>(mut self, f: F) -> Self
    where
        F: Fn(RowRef<'_>) -> String + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(f));
        self
    }

    /// Render this column's cell for `row`; null or missing cells become `"-"`.
    pub fn render_cell(&self, row: RowRef<'_>) -> String {
        if let Some(r) = &self.render {
            return r(row);
        }
        match row.get(&self.field) {
            None | Some(Value::Null) => EMPTY_CELL.to_string(),
            Some(v) => v.to_string(),
        }
    }
}

impl fmt::Debug for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("field", &self.field)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("sort_type", &self.sort_type)
            .field("width", &self.width)
            .field("align", &self.align)
            .field("render_set", &self.render.is_some())
            .finish()
    }
}

/// One entry of a filter dropdown.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOption {
    pub label: String,
    pub value: Value,
}

impl FilterOption {
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Dropdown filter over one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterConfig {
    pub field: String,
    pub options: Vec<FilterOption>,
}

impl FilterConfig {
    pub fn new(field: impl Into<String>, options: Vec<FilterOption>) -> Self {
        Self {
            field: field.into(),
            options,
        }
    }

    pub fn allows(&self, value: &Value) -> bool {
        self.options.iter().any(|o| o.value.strict_eq(value))
    }
}

/// Static configuration of a table.
#[derive(Debug, Clone)]
pub struct TableOptions {
    pub columns: Vec<ColumnDef>,
    /// Fields the search box looks in.
    pub search_fields: Vec<String>,
    pub filter: Option<FilterConfig>,
    /// Rows per page.
    pub page_size: usize,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            search_fields: Vec::new(),
            filter: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl TableOptions {
    pub fn column(&self, field: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.field == field)
    }

    /// Check every referenced field against `schema`.
    ///
    /// Filter option values must have a type the filter field can hold, since a mismatched
    /// option would silently filter out every row.
    pub fn validate(&self, schema: &Schema) -> ViewResult<()> {
        if self.page_size == 0 {
            return Err(ViewError::InvalidOption {
                message: "page_size must be > 0".to_string(),
            });
        }
        for c in &self.columns {
            schema.require(&c.field)?;
        }
        for f in &self.search_fields {
            schema.require(f)?;
        }
        if let Some(filter) = &self.filter {
            let idx = schema.require(&filter.field)?;
            let data_type = schema.fields[idx].data_type;
            for opt in &filter.options {
                if !data_type.accepts(&opt.value) {
                    return Err(ViewError::SchemaMismatch {
                        message: format!(
                            "filter option '{}' has value {:?} but field '{}' is {:?}",
                            opt.label, opt.value, filter.field, data_type
                        ),
                    });
                }
            }
        }
        Ok(())
    }
}
