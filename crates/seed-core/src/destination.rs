//! Destination (table or collection) names.

use std::fmt;
use thiserror::Error;

/// Errors for malformed destination names.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DestinationError {
    #[error("Destination name is empty")]
    Empty,

    #[error("Destination '{0}' has more than two dot-separated parts")]
    TooManyParts(String),

    #[error("Invalid identifier '{ident}' in destination '{name}'")]
    InvalidIdentifier { name: String, ident: String },
}

/// A validated destination, optionally qualified by a schema.
///
/// Identifiers are restricted to `[A-Za-z_][A-Za-z0-9_]*` so they can be
/// quoted into SQL without escaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    schema: Option<String>,
    name: String,
}

impl Destination {
    /// Parse `table` or `schema.table`.
    pub fn parse(raw: &str) -> Result<Self, DestinationError> {
        if raw.is_empty() {
            return Err(DestinationError::Empty);
        }

        let parts: Vec<&str> = raw.split('.').collect();
        for part in &parts {
            if !is_identifier(part) {
                return Err(DestinationError::InvalidIdentifier {
                    name: raw.to_string(),
                    ident: part.to_string(),
                });
            }
        }

        match parts.as_slice() {
            [name] => Ok(Self {
                schema: None,
                name: name.to_string(),
            }),
            [schema, name] => Ok(Self {
                schema: Some(schema.to_string()),
                name: name.to_string(),
            }),
            _ => Err(DestinationError::TooManyParts(raw.to_string())),
        }
    }

    /// Unqualified table or collection name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// PostgreSQL form: `"schema"."table"`.
    pub fn quoted_postgres(&self) -> String {
        match &self.schema {
            Some(schema) => format!("\"{schema}\".\"{}\"", self.name),
            None => format!("\"{}\"", self.name),
        }
    }

    /// MySQL form: `` `schema`.`table` ``.
    pub fn quoted_mysql(&self) -> String {
        match &self.schema {
            Some(schema) => format!("`{schema}`.`{}`", self.name),
            None => format!("`{}`", self.name),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{schema}.{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

impl std::str::FromStr for Destination {
    type Err = DestinationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
