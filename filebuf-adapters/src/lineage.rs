//! Formatting of file lineage metadata with a template.
//!
//! Lineage metadata is a string map describing where a file came from, such
//! as `{"bucket": "example", "objectKey": "foo/bar.csv"}`. The template
//! `"s3://{bucket}/{objectKey}"` turns it into `"s3://example/foo/bar.csv"`.
//!
//! # Template syntax
//!
//! - `{key}` is replaced by the value of `key`, or `(null)` if there is none.
//!   Keys are made of ASCII letters, digits and `_`, and may be empty.
//! - Text between single quotes is literal, so `'{'` is a brace.
//! - `''` is a literal single quote, inside or outside quoted text.

use core::fmt;
use core::hash::BuildHasher;
use core::str::FromStr;
use std::collections::HashMap;

/// Written in place of a parameter the metadata does not have.
pub const MISSING_VALUE: &str = "(null)";

/// Why a template was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineageFormatError {
    /// A `{` without its closing `}`.
    #[error("Unmatched brace in the format.")]
    UnmatchedBrace,

    /// An opening quote without its closing quote.
    #[error("Unmatched quote in the format.")]
    UnmatchedQuote,

    /// A character not allowed in a parameter name, at this character index.
    #[error("Template parameter in the format contains an invalid char at index: {index}")]
    InvalidParameterChar {
        /// Character (not byte) index into the template.
        index: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Raw(String),
    Parameter(String),
}

/// A parsed lineage template.
///
/// # Examples
///
/// ```
/// use filebuf_adapters::lineage::FileLineageFormatter;
/// use std::collections::HashMap;
///
/// let formatter = FileLineageFormatter::from_template("s3://{bucket}/{objectKey}").unwrap();
/// let metadata = HashMap::from([
///     ("bucket".to_string(), "example-s3-bucket"),
///     ("objectKey".to_string(), "foo/barbaz.csv"),
/// ]);
/// assert_eq!(formatter.format(&metadata), "s3://example-s3-bucket/foo/barbaz.csv");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLineageFormatter {
    tokens: Vec<Token>,
}

impl FileLineageFormatter {
    /// Parse a template.
    ///
    /// # Errors
    ///
    /// Returns a [`LineageFormatError`] for an unclosed brace or quote, or a
    /// parameter name with a character other than ASCII letters, digits and
    /// `_`.
    pub fn from_template(template: &str) -> Result<Self, LineageFormatError> {
        let mut tokens = Vec::new();
        let mut current = String::new();
        let mut in_parameter = false;
        let mut in_quote = false;

        let mut chars = template.chars().enumerate().peekable();
        while let Some((index, c)) = chars.next() {
            if in_parameter {
                match c {
                    '}' => {
                        in_parameter = false;
                        tokens.push(Token::Parameter(core::mem::take(&mut current)));
                    }
                    c if is_parameter_char(c) => current.push(c),
                    _ => return Err(LineageFormatError::InvalidParameterChar { index }),
                }
                continue;
            }

            match c {
                '\'' => {
                    if matches!(chars.peek(), Some((_, '\''))) {
                        chars.next();
                        current.push('\'');
                    } else {
                        in_quote = !in_quote;
                    }
                }
                '{' if !in_quote => {
                    in_parameter = true;
                    if !current.is_empty() {
                        tokens.push(Token::Raw(core::mem::take(&mut current)));
                    }
                }
                c => current.push(c),
            }
        }

        if in_parameter {
            return Err(LineageFormatError::UnmatchedBrace);
        }
        if in_quote {
            return Err(LineageFormatError::UnmatchedQuote);
        }
        if !current.is_empty() {
            tokens.push(Token::Raw(current));
        }
        Ok(Self { tokens })
    }

    /// Fill the template from `arguments`. Parameters missing from the map
    /// become `(null)`.
    pub fn format<V, S>(&self, arguments: &HashMap<String, V, S>) -> String
    where
        V: AsRef<str>,
        S: BuildHasher,
    {
        let mut out = String::new();
        for token in &self.tokens {
            match token {
                Token::Raw(raw) => out.push_str(raw),
                Token::Parameter(key) => match arguments.get(key.as_str()) {
                    Some(value) => out.push_str(value.as_ref()),
                    None => out.push_str(MISSING_VALUE),
                },
            }
        }
        out
    }

    /// Names of the parameters in the template, in order of appearance.
    pub fn parameters(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().filter_map(|token| match token {
            Token::Parameter(key) => Some(key.as_str()),
            Token::Raw(_) => None,
        })
    }
}

impl FromStr for FileLineageFormatter {
    type Err = LineageFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_template(s)
    }
}

impl fmt::Display for FileLineageFormatter {
    /// Writes the template back out in a form that parses to the same tokens.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            match token {
                Token::Parameter(key) => write!(f, "{{{}}}", key)?,
                Token::Raw(raw) => {
                    for c in raw.chars() {
                        match c {
                            '\'' => f.write_str("''")?,
                            '{' => f.write_str("'{'")?,
                            c => write!(f, "{}", c)?,
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

// Compared against ASCII ranges directly so locale never matters.
fn is_parameter_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
