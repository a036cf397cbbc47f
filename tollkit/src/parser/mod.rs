//! CSV loader with encoding and delimiter auto-detection.
//!
//! Produces a [`Table`] of string cells. Typed access to columns lives on
//! [`Table`] so every transformation reports bad input with line context.

mod table;

pub use table::Table;

use std::path::Path;

/// CSV parsing error with context
#[derive(Debug, Clone)]
pub struct CsvError {
    pub line: usize,
    pub column: Option<String>,
    pub value: Option<String>,
    pub message: String,
}

impl std::fmt::Display for CsvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.column, &self.value) {
            (Some(col), Some(val)) => {
                write!(f, "Line {}, column '{}' (value '{}'): {}", self.line, col, val, self.message)
            }
            (Some(col), None) => {
                write!(f, "Line {}, column '{}': {}", self.line, col, self.message)
            }
            _ => {
                write!(f, "Line {}: {}", self.line, self.message)
            }
        }
    }
}

impl std::error::Error for CsvError {}

impl CsvError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            column: None,
            value: None,
            message: message.into(),
        }
    }

    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// Result of parsing with metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed table
    pub table: Table,
    /// Detected or used encoding
    pub encoding: String,
    /// Detected or used delimiter
    pub delimiter: char,
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    match encoding.to_lowercase().as_str() {
        // Latin-1 maps every byte to the code point of the same value
        "iso-8859-1" | "latin-1" | "latin1" => bytes.iter().map(|&b| char::from(b)).collect(),
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
        // UTF-8, ASCII and anything unknown: lossy UTF-8
        _ => String::from_utf8_lossy(bytes).into_owned(),
    }
}

/// Detect the delimiter by counting occurrences in the first line
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse CSV text with an explicit delimiter.
///
/// # Example
/// ```
/// use tollkit::parser::parse_str;
///
/// let table = parse_str("id_1,id_2,car\n1,2,10\n", ',').unwrap();
/// assert_eq!(table.len(), 1);
/// assert_eq!(table.numeric_column("car").unwrap(), vec![10.0]);
/// ```
pub fn parse_str(content: &str, delimiter: char) -> Result<Table, CsvError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    if content.trim().is_empty() {
        return Err(CsvError::new(1, "Empty CSV file"));
    }
    let delimiter = u8::try_from(delimiter)
        .map_err(|_| CsvError::new(0, format!("Delimiter '{}' is not a single byte", delimiter)))?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| CsvError::new(1, format!("Cannot read header: {}", e)))?
        .iter()
        .map(String::from)
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(CsvError::new(1, "No headers found"));
    }

    let mut table = Table::new(headers);
    for record in reader.records() {
        let record = record.map_err(|e| {
            let line = e.position().map(|p| source_line(content, p.byte())).unwrap_or(0);
            CsvError::new(line, format!("Cannot read row: {}", e))
        })?;

        // Blank lines are skipped by the csv reader; a row of empty cells is skipped here.
        if record.iter().all(|cell| cell.is_empty()) {
            continue;
        }

        let line = record.position().map(|p| source_line(content, p.byte())).unwrap_or(0);
        table.push_row(line, record.iter().map(String::from).collect());
    }

    Ok(table)
}

/// 1-based source line of the record read from byte offset `byte`.
///
/// The reader's offset can sit before blank lines it skipped, so line
/// breaks at the offset are stepped over before counting.
fn source_line(content: &str, byte: u64) -> usize {
    let bytes = content.as_bytes();
    let mut start = usize::try_from(byte).unwrap_or(usize::MAX).min(bytes.len());
    while start < bytes.len() && matches!(bytes[start], b'\r' | b'\n') {
        start += 1;
    }
    bytes[..start].iter().filter(|&&b| b == b'\n').count() + 1
}

/// Parse CSV bytes with auto-detection of encoding and delimiter.
pub fn parse_bytes_auto(bytes: &[u8]) -> Result<ParseResult, CsvError> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);
    let delimiter = detect_delimiter(&content);

    let table = parse_str(&content, delimiter)?;

    Ok(ParseResult {
        table,
        encoding,
        delimiter,
    })
}

/// Parse a CSV file with auto-detection of encoding and delimiter.
pub fn parse_csv_file_auto<P: AsRef<Path>>(path: P) -> Result<ParseResult, CsvError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|e| CsvError::new(0, format!("Cannot read file '{}': {}", path.display(), e)))?;

    parse_bytes_auto(&bytes)
}
