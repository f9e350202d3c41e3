use std::fmt;
use thiserror::Error;

const MAX_IDENTIFIER_LENGTH: usize = 64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("identifier is empty")]
    Empty,
    #[error("identifier {0:?} is longer than 64 characters")]
    TooLong(String),
    #[error("identifier {0:?} contains characters outside [A-Za-z0-9_$] or starts with a digit")]
    InvalidCharacters(String),
}

///A table, schema or column name that is safe to interpolate into query text unquoted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(String);

impl Identifier {
    pub fn parse(name: &str) -> Result<Identifier, IdentifierError> {
        let mut chars = name.chars();
        let first = match chars.next() {
            Some(c) => c,
            None => return Err(IdentifierError::Empty),
        };
        if name.chars().count() > MAX_IDENTIFIER_LENGTH {
            return Err(IdentifierError::TooLong(name.to_string()));
        }
        let valid_first = first.is_ascii_alphabetic() || first == '_';
        let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
        if !valid_first || !valid_rest {
            return Err(IdentifierError::InvalidCharacters(name.to_string()));
        }
        Ok(Identifier(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
