//! Side values and side names

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Boxed zero-argument producer for a side value.
pub type Producer<T> = Box<dyn Fn() -> T + Send + Sync>;

/// Value bound to a side.
///
/// A side either holds a literal value, handed back on every resolution, or a
/// producer invoked on every resolution.
pub enum Side<T> {
    /// Plain value, returned as-is (cloned).
    Literal(T),
    /// Zero-argument producer, invoked on each resolution.
    Producer(Producer<T>),
}

impl<T> Side<T> {
    /// Side holding a plain value.
    pub const fn literal(value: T) -> Self {
        Self::Literal(value)
    }

    /// Side computed by `f` on each resolution.
    pub fn producer<F>(f: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::Producer(Box::new(f))
    }

    /// True if this side is computed rather than stored.
    #[must_use]
    pub const fn is_producer(&self) -> bool {
        matches!(self, Self::Producer(_))
    }

    /// Evaluate the side: clone a literal or invoke a producer.
    pub fn resolve(&self) -> T
    where
        T: Clone,
    {
        match self {
            Self::Literal(value) => value.clone(),
            Self::Producer(f) => f(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Side<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Producer(_) => f.write_str("Producer(..)"),
        }
    }
}

/// Validated, non-blank side name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SideName(String);

impl SideName {
    /// Validate `name` as a side name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSideName`] if `name` is empty or whitespace.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::InvalidSideName(name));
        }
        Ok(Self(name))
    }

    /// Borrow the name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for SideName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SideName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

const LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Single uppercase letter `A..=Z` naming a declarative side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Letter(u8);

impl Letter {
    /// The letter as a one-character string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        let i = usize::from(self.0 - b'A');
        &LETTERS[i..=i]
    }

    /// The letter as a `char`.
    #[must_use]
    pub const fn as_char(self) -> char {
        self.0 as char
    }
}

impl TryFrom<char> for Letter {
    type Error = Error;

    fn try_from(c: char) -> Result<Self> {
        match u8::try_from(c) {
            Ok(b) if b.is_ascii_uppercase() => Ok(Self(b)),
            _ => Err(Error::InvalidSideName(c.to_string())),
        }
    }
}

impl FromStr for Letter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::try_from(c),
            _ => Err(Error::InvalidSideName(s.to_string())),
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
