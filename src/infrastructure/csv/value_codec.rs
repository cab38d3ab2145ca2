// ============================================================
// VALUE CODEC
// ============================================================
// Encode and decode delimited value lists stored inside a single
// import cell, e.g. `"a","b,c"`. Absent cells stay absent in both
// directions.

use crate::domain::csv::CsvDialect;
use crate::domain::error::{ImportError, Result};

/// Codec for delimited value lists
///
/// Encoding wraps every value in the enclosure character and doubles
/// the escape character. The enclosure itself is never escaped, so
/// decoding treats an enclosure inside a value as literal content
/// unless it is doubled or stands directly before a delimiter or the
/// end of the cell.
#[derive(Debug, Clone)]
pub struct ValueCodec {
    dialect: CsvDialect,
}

impl Default for ValueCodec {
    fn default() -> Self {
        Self {
            dialect: CsvDialect::default(),
        }
    }
}

impl ValueCodec {
    /// Create a codec for the given dialect
    pub fn new(dialect: CsvDialect) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> CsvDialect {
        self.dialect
    }

    /// Encode a list of values into one cell
    ///
    /// Returns `None` for an absent or empty list. A `delimiter`
    /// of `None` uses the dialect delimiter.
    pub fn encode(&self, values: Option<&[String]>, delimiter: Option<char>) -> Option<String> {
        let values = values?;
        if values.is_empty() {
            return None;
        }

        let delimiter = delimiter.unwrap_or(self.dialect.delimiter);
        let enclosure = self.dialect.enclosure;
        let escape = self.dialect.escape;
        let doubled_escape = String::from_iter([escape, escape]);

        let encoded: Vec<String> = values
            .iter()
            .map(|value| {
                format!(
                    "{enclosure}{}{enclosure}",
                    value.replace(escape, &doubled_escape)
                )
            })
            .collect();

        Some(encoded.join(&delimiter.to_string()))
    }

    /// Decode one cell back into the list of values it carries
    ///
    /// Returns `Ok(None)` for an absent or empty cell and a codec
    /// error for a cell whose enclosure never closes or that ends
    /// in a dangling escape.
    pub fn decode(&self, cell: Option<&str>, delimiter: Option<char>) -> Result<Option<Vec<String>>> {
        let cell = match cell {
            Some(cell) if !cell.is_empty() => cell,
            _ => return Ok(None),
        };

        let delimiter = delimiter.unwrap_or(self.dialect.delimiter);
        self.split_cell(cell, delimiter).map(Some)
    }

    /// Join pre-serialized values with an explicit delimiter
    ///
    /// Counterpart of [`ValueCodec::explode`] for cells whose list
    /// delimiter differs from the dialect of the surrounding file.
    pub fn implode(&self, values: Option<&[String]>, delimiter: Option<char>) -> Option<String> {
        self.encode(values, delimiter)
    }

    /// Split a cell on an explicit delimiter
    ///
    /// Used for multi-value cells, e.g. `explode(cell, Some('|'))`
    /// for pipe separated option lists inside a comma separated file.
    pub fn explode(&self, cell: Option<&str>, delimiter: Option<char>) -> Result<Option<Vec<String>>> {
        self.decode(cell, delimiter)
    }

    fn split_cell(&self, cell: &str, delimiter: char) -> Result<Vec<String>> {
        let enclosure = self.dialect.enclosure;
        let escape = self.dialect.escape;

        let chars: Vec<char> = cell.chars().collect();
        let mut values = Vec::new();
        let mut current = String::new();
        let mut enclosed = false;
        let mut at_value_start = true;
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];

            if enclosed {
                if c == escape {
                    match chars.get(i + 1) {
                        Some(&next) => {
                            current.push(next);
                            i += 2;
                        }
                        None => {
                            return Err(ImportError::Codec(format!(
                                "Dangling escape character at end of cell '{}'",
                                cell
                            )));
                        }
                    }
                } else if c == enclosure {
                    match chars.get(i + 1) {
                        // A doubled enclosure is one literal enclosure.
                        Some(&next) if next == enclosure => {
                            current.push(enclosure);
                            i += 2;
                        }
                        // Only an enclosure directly before a delimiter
                        // (or the end of the cell) closes the value.
                        Some(&next) if next == delimiter => {
                            enclosed = false;
                            values.push(std::mem::take(&mut current));
                            at_value_start = true;
                            i += 2;
                        }
                        Some(_) => {
                            current.push(enclosure);
                            i += 1;
                        }
                        None => {
                            enclosed = false;
                            i += 1;
                        }
                    }
                } else {
                    current.push(c);
                    i += 1;
                }
            } else if c == delimiter {
                values.push(std::mem::take(&mut current));
                at_value_start = true;
                i += 1;
            } else if c == enclosure && at_value_start {
                enclosed = true;
                at_value_start = false;
                i += 1;
            } else if c == escape {
                match chars.get(i + 1) {
                    Some(&next) => {
                        current.push(next);
                        at_value_start = false;
                        i += 2;
                    }
                    None => {
                        return Err(ImportError::Codec(format!(
                            "Dangling escape character at end of cell '{}'",
                            cell
                        )));
                    }
                }
            } else {
                current.push(c);
                at_value_start = false;
                i += 1;
            }
        }

        if enclosed {
            return Err(ImportError::Codec(format!(
                "Unbalanced enclosure in cell '{}'",
                cell
            )));
        }

        values.push(current);
        Ok(values)
    }
}
