//! Error types for assertions, generator construction and run configuration.

use std::fmt;

/// A single message raised by a failing assertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionError {
    message: String,
}

impl AssertionError {
    /// Create an assertion error with the given message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The message text
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for AssertionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AssertionError {}

/// Ordered collection of assertion errors raised for one input.
///
/// An empty collection is a failure that carried no message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssertionErrors {
    errors: Vec<AssertionError>,
}

impl AssertionErrors {
    /// An empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// A collection holding a single message
    pub fn single(message: impl Into<String>) -> Self {
        Self {
            errors: vec![AssertionError::new(message)],
        }
    }

    /// Append one error
    pub fn push(&mut self, error: AssertionError) {
        self.errors.push(error);
    }

    /// Append every error of `other`, keeping order
    pub fn merge(&mut self, other: AssertionErrors) {
        self.errors.extend(other.errors);
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AssertionError> {
        self.errors.iter()
    }

    /// The messages in the order they were raised
    pub fn messages(&self) -> Vec<&str> {
        self.errors.iter().map(AssertionError::message).collect()
    }

    /// Whether any message contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.errors.iter().any(|e| e.message.contains(needle))
    }
}

impl fmt::Display for AssertionErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.len() {
            0 => write!(f, "assertion failed without a message"),
            1 => write!(f, "1 error occurred:\n\t* {}", self.errors[0]),
            n => {
                write!(f, "{} errors occurred:", n)?;
                for error in &self.errors {
                    write!(f, "\n\t* {}", error)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for AssertionErrors {}

impl From<AssertionError> for AssertionErrors {
    fn from(error: AssertionError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl From<&str> for AssertionErrors {
    fn from(message: &str) -> Self {
        Self::single(message)
    }
}

impl From<String> for AssertionErrors {
    fn from(message: String) -> Self {
        Self::single(message)
    }
}

impl FromIterator<AssertionError> for AssertionErrors {
    fn from_iter<I: IntoIterator<Item = AssertionError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a AssertionErrors {
    type Item = &'a AssertionError;
    type IntoIter = std::slice::Iter<'a, AssertionError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Errors raised while building a generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    /// A weighted choice where no generator has a positive weight
    EmptyDistribution { candidates: usize },
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorError::EmptyDistribution { candidates } => write!(
                f,
                "Weighted distribution has no positive weight ({} candidates)",
                candidates
            ),
        }
    }
}

impl std::error::Error for GeneratorError {}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Trial count must be > 0
    InvalidTrials(usize),
    /// Thread count must be > 0
    InvalidThreads(usize),
    /// An environment override could not be parsed
    InvalidEnvValue { variable: String, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTrials(n) => {
                write!(f, "Invalid trial count: {} (must be > 0)", n)
            }
            ConfigError::InvalidThreads(n) => {
                write!(f, "Invalid thread count: {} (must be > 0)", n)
            }
            ConfigError::InvalidEnvValue { variable, value } => {
                write!(f, "Invalid value for {}: {:?}", variable, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
