//! Reading the customer spreadsheet once per process.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use calamine::{Data, DataType, Reader, open_workbook_auto};
use once_cell::sync::OnceCell;

use crate::dataset::{Dataset, FieldValue, RawTable};
use crate::error::LoadError;

/// File name of the customer spreadsheet.
pub const WORKBOOK_FILE_NAME: &str = "raio_x_clientes_claro_rev1.xlsx";

/// Something that can produce the raw customer table.
pub trait TableSource {
    fn read_table(&self) -> Result<RawTable, LoadError>;
}

/// Reads the first worksheet of a spreadsheet file (xlsx, xls or ods).
///
/// Candidate paths are tried in order and the first existing file is used.
#[derive(Clone, Debug)]
pub struct WorkbookSource {
    candidates: Vec<PathBuf>,
}

impl WorkbookSource {
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self { candidates }
    }

    /// The working directory first, then its `dataset/` folder.
    pub fn default_locations() -> Self {
        Self::new(vec![
            PathBuf::from(WORKBOOK_FILE_NAME),
            Path::new("dataset").join(WORKBOOK_FILE_NAME),
        ])
    }

    #[inline]
    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// Returns the first candidate that is an existing file.
    pub fn resolve(&self) -> Result<&Path, LoadError> {
        self.candidates
            .iter()
            .map(PathBuf::as_path)
            .find(|path| path.is_file())
            .ok_or_else(|| LoadError::SourceNotFound {
                tried: self.candidates.clone(),
            })
    }
}

impl Default for WorkbookSource {
    #[inline]
    fn default() -> Self {
        Self::default_locations()
    }
}

impl TableSource for WorkbookSource {
    fn read_table(&self) -> Result<RawTable, LoadError> {
        let path = self.resolve()?;
        info!(path = %path.display(), "reading customer spreadsheet");

        let unreadable = |reason: String| LoadError::Unreadable {
            path: path.to_owned(),
            reason,
        };
        let mut workbook =
            open_workbook_auto(path).map_err(|err| unreadable(err.to_string()))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| unreadable("workbook has no worksheets".to_owned()))?
            .map_err(|err| unreadable(err.to_string()))?;

        let mut rows = range.rows();
        let header = rows
            .next()
            .map(|cells| {
                cells
                    .iter()
                    .enumerate()
                    .map(|(idx, cell)| header_name(idx, cell))
                    .collect()
            })
            .unwrap_or_default();
        let rows = rows
            .map(|cells| cells.iter().map(field_value).collect())
            .collect();

        Ok(RawTable { header, rows })
    }
}

fn header_name(idx: usize, cell: &Data) -> String {
    match field_value(cell) {
        FieldValue::Empty => format!("Unnamed: {idx}"),
        value => value.to_string(),
    }
}

fn field_value(cell: &Data) -> FieldValue {
    match cell {
        Data::Empty | Data::Error(_) => FieldValue::Empty,
        Data::Bool(value) => FieldValue::Bool(*value),
        Data::Int(value) => FieldValue::Int(*value),
        Data::Float(value) if value.is_nan() => FieldValue::Empty,
        Data::Float(value) => FieldValue::Float(*value),
        Data::String(text) if text.is_empty() => FieldValue::Empty,
        Data::String(text) => FieldValue::Text(text.clone()),
        Data::DateTime(_) => match cell.as_datetime() {
            Some(dt) => {
                FieldValue::DateTime(dt.format("%Y-%m-%d %H:%M:%S").to_string())
            }
            None => FieldValue::Text(cell.to_string()),
        },
        // ISO date and duration strings are kept verbatim.
        other => FieldValue::Text(other.to_string()),
    }
}

/// Loads the dataset at most once.
///
/// The first successful [`DatasetLoader::load`] caches the dataset; later
/// calls return the same allocation without touching the source again.
/// Failures are not cached.
pub struct DatasetLoader<S> {
    source: S,
    cache: OnceCell<Arc<Dataset>>,
}

impl<S: TableSource> DatasetLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: OnceCell::new(),
        }
    }

    pub fn load(&self) -> Result<Arc<Dataset>, LoadError> {
        self.cache
            .get_or_try_init(|| {
                let dataset = Dataset::from_table(self.source.read_table()?)?;
                info!(records = dataset.len(), "customer dataset loaded");

                let duplicates = dataset.duplicate_identifiers().count();
                if duplicates > 0 {
                    warn!(
                        duplicates,
                        "identifiers appear in more than one row, lookups \
                         return the first one"
                    );
                }
                Ok(Arc::new(dataset))
            })
            .cloned()
    }
}
