use std::fmt;

use thiserror::Error;

/// One parsed line of numeric fields, in column order. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    fields: Vec<f64>,
}

impl Record {
    /// Field by 1-indexed column number. Callers are expected to have been
    /// validated against [`RecordParser::new`]'s required column count.
    pub fn field(&self, column: usize) -> f64 {
        self.fields[column - 1]
    }

    pub fn fields(&self) -> &[f64] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Copy of this record with one column replaced. Lets filter stages swap
    /// a value while preserving the columns they do not touch.
    pub fn with_field(&self, column: usize, value: f64) -> Record {
        let mut fields = self.fields.clone();
        fields[column - 1] = value;
        Record { fields }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

/// Per-record failures. These are warnings at the loop level: the record is
/// dropped and the stream keeps flowing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("received invalid data {line:?}: {token:?} is not a number")]
    InvalidNumericToken { line: String, token: String },
    #[error("expected a minimum of {required} columns, received {got}")]
    InsufficientColumns { required: usize, got: usize },
}

/// Splits whitespace-delimited lines into numeric records.
pub struct RecordParser {
    required_columns: usize,
}

impl RecordParser {
    /// `required_columns` is the highest column the configuration references;
    /// shorter records cannot be plotted and are rejected.
    pub fn new(required_columns: usize) -> Self {
        Self { required_columns }
    }

    /// `Ok(None)` on a blank line: that is "nothing arrived yet", not bad data.
    pub fn parse(&self, line: &str) -> Result<Option<Record>, ParseError> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let mut fields = Vec::new();
        for token in trimmed.split_whitespace() {
            let value = token
                .parse::<f64>()
                .map_err(|_| ParseError::InvalidNumericToken {
                    line: trimmed.to_owned(),
                    token: token.to_owned(),
                })?;
            fields.push(value);
        }
        if fields.len() < self.required_columns {
            return Err(ParseError::InsufficientColumns {
                required: self.required_columns,
                got: fields.len(),
            });
        }
        Ok(Some(Record { fields }))
    }
}
