// ============================================================
// CSV DIALECT
// ============================================================
// Character set used when a cell of an import file carries a
// delimited list of values

use serde::{Deserialize, Serialize};

/// Dialect for serializing value lists into a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvDialect {
    /// Separator between values (default: `,`)
    pub delimiter: char,

    /// Character wrapped around every encoded value (default: `"`)
    pub enclosure: char,

    /// Character that escapes the following character (default: `\`)
    pub escape: char,
}

impl Default for CsvDialect {
    fn default() -> Self {
        Self {
            delimiter: ',',
            enclosure: '"',
            escape: '\\',
        }
    }
}

impl CsvDialect {
    /// Create a new dialect with default characters
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the delimiter, keeping enclosure and escape
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Validate dialect characters
    pub fn validate(&self) -> Result<(), String> {
        if self.delimiter == self.enclosure {
            return Err("delimiter and enclosure must differ".to_string());
        }
        if self.delimiter == self.escape {
            return Err("delimiter and escape must differ".to_string());
        }
        if self.enclosure == self.escape {
            return Err("enclosure and escape must differ".to_string());
        }
        if [self.delimiter, self.enclosure, self.escape]
            .iter()
            .any(|c| *c == '\n' || *c == '\r')
        {
            return Err("dialect characters must not be line breaks".to_string());
        }
        Ok(())
    }
}
