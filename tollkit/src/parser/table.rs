//! In-memory table of string cells with typed column access.

use super::CsvError;

/// A loaded CSV: header row plus data rows, each tagged with its source line.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Row>,
}

#[derive(Debug, Clone)]
struct Row {
    line: usize,
    cells: Vec<String>,
}

impl Table {
    /// Create an empty table with the given headers
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Build a table from literal rows. Line numbers start at 2 (after the header).
    pub fn from_rows<H, R, C>(headers: H, rows: R) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let mut table = Self::new(headers.into_iter().map(Into::into).collect());
        for (i, row) in rows.into_iter().enumerate() {
            table.push_row(i + 2, row.into_iter().map(Into::into).collect());
        }
        table
    }

    /// Append a row read from `line`
    pub fn push_row(&mut self, line: usize, cells: Vec<String>) {
        self.rows.push(Row { line, cells });
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Source line of the row at `index`
    pub fn line(&self, index: usize) -> usize {
        self.rows.get(index).map(|r| r.line).unwrap_or(0)
    }

    /// Position of a column by header name
    pub fn column_index(&self, name: &str) -> Result<usize, CsvError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| {
                CsvError::new(1, format!("Missing column (found: {})", self.headers.join(", ")))
                    .with_column(name)
            })
    }

    /// Raw cells of a column. Cells past the end of a short row read as "".
    pub fn text_column(&self, name: &str) -> Result<Vec<&str>, CsvError> {
        let idx = self.column_index(name)?;
        Ok(self
            .rows
            .iter()
            .map(|row| row.cells.get(idx).map(String::as_str).unwrap_or(""))
            .collect())
    }

    /// Numeric column; every cell must hold a finite number.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>, CsvError> {
        self.parse_column(name, |raw| match parse_number(raw) {
            Some(Some(v)) => Ok(v),
            Some(None) => Err("Empty value"),
            None => Err("Invalid number"),
        })
    }

    /// Numeric column where empty cells and `NaN` read as `None`.
    pub fn optional_numeric_column(&self, name: &str) -> Result<Vec<Option<f64>>, CsvError> {
        self.parse_column(name, |raw| parse_number(raw).ok_or("Invalid number"))
    }

    /// Integer id column. Whole floats such as `1001400.0` are accepted.
    pub fn id_column(&self, name: &str) -> Result<Vec<i64>, CsvError> {
        self.parse_column(name, |raw| parse_id(raw).ok_or("Invalid id"))
    }

    fn parse_column<T>(
        &self,
        name: &str,
        parse: impl Fn(&str) -> Result<T, &'static str>,
    ) -> Result<Vec<T>, CsvError> {
        let idx = self.column_index(name)?;
        self.rows
            .iter()
            .map(|row| {
                let raw = row.cells.get(idx).map(String::as_str).unwrap_or("");
                parse(raw).map_err(|message| {
                    CsvError::new(row.line, message)
                        .with_column(name)
                        .with_value(raw)
                })
            })
            .collect()
    }
}

/// `None` for malformed input, `Some(None)` for an empty or NaN cell.
fn parse_number(raw: &str) -> Option<Option<f64>> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("nan") {
        return Some(None);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(Some(v)),
        _ => None,
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(id) = raw.parse::<i64>() {
        return Some(id);
    }
    let value = raw.parse::<f64>().ok()?;
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_rows(
            ["id_start", "id_end", "distance"],
            [
                vec!["1001400", "1001402", "9.7"],
                vec!["1001402.0", "1001404", ""],
                vec!["1001404", "1001406", "NaN"],
            ],
        )
    }

    #[test]
    fn test_missing_column_lists_headers() {
        let err = sample().numeric_column("car").unwrap_err();
        assert_eq!(err.column.as_deref(), Some("car"));
        assert!(err.message.contains("id_start, id_end, distance"));
    }

    #[test]
    fn test_optional_numbers() {
        let distances = sample().optional_numeric_column("distance").unwrap();
        assert_eq!(distances, vec![Some(9.7), None, None]);
    }

    #[test]
    fn test_required_numbers_reject_blanks() {
        let err = sample().numeric_column("distance").unwrap_err();
        assert_eq!(err.line, 3);
        assert_eq!(err.message, "Empty value");
    }

    #[test]
    fn test_ids_accept_whole_floats() {
        assert_eq!(sample().id_column("id_start").unwrap(), vec![1001400, 1001402, 1001404]);

        let bad = Table::from_rows(["id"], [vec!["12.5"]]);
        let err = bad.id_column("id").unwrap_err();
        assert_eq!(err.value.as_deref(), Some("12.5"));
    }
}
