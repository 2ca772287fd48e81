//! Algorithm specification strings of the form `Name(arg1,arg2,...)`.

use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};
use core::{fmt, str::FromStr};

use crate::error::{Error, Result};

/// A tokenized algorithm specification.
///
/// Arguments are positional and kept verbatim, so a nested specification
/// such as `SHA-3(256)` stays a single argument.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScanName {
    name: String,
    args: Vec<String>,
}

impl ScanName {
    /// Split `spec` into a name and its top-level arguments.
    pub fn parse(spec: &str) -> Result<Self> {
        let bad = || Error::invalid_argument(format!("Bad algorithm specification '{spec}'"));

        let Some(open) = spec.find('(') else {
            if spec.is_empty() || spec.contains(')') || spec.contains(',') {
                return Err(bad());
            }
            return Ok(Self {
                name: spec.to_string(),
                args: Vec::new(),
            });
        };

        let name = &spec[..open];
        let Some(inner) = spec[open..].strip_prefix('(').and_then(|s| s.strip_suffix(')')) else {
            return Err(bad());
        };
        if name.is_empty() || name.contains([')', ',']) {
            return Err(bad());
        }

        let mut args = Vec::new();
        let mut depth = 0usize;
        let mut start = 0;

        for (i, c) in inner.char_indices() {
            match c {
                '(' => depth = depth.checked_add(1).ok_or_else(bad)?,
                ')' => depth = depth.checked_sub(1).ok_or_else(bad)?,
                ',' if depth == 0 => {
                    args.push(&inner[start..i]);
                    start = i + 1;
                }
                _ => {}
            }
        }

        if depth != 0 {
            return Err(bad());
        }
        if !inner.is_empty() {
            args.push(&inner[start..]);
        }
        if args.iter().any(|arg| arg.is_empty()) {
            return Err(bad());
        }

        Ok(Self {
            name: name.to_string(),
            args: args.into_iter().map(ToString::to_string).collect(),
        })
    }

    /// The algorithm name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of top-level arguments.
    pub fn arg_count(&self) -> usize {
        self.args.len()
    }

    /// Whether `lower <= arg_count() <= upper`.
    pub fn arg_count_between(&self, lower: usize, upper: usize) -> bool {
        (lower..=upper).contains(&self.arg_count())
    }

    /// Argument `i`.
    pub fn arg(&self, i: usize) -> Result<&str> {
        self.args.get(i).map(String::as_str).ok_or_else(|| {
            Error::invalid_argument(format!(
                "Attempt to access argument {i} of {self}, which has {} arguments",
                self.arg_count()
            ))
        })
    }

    /// Argument `i`, or `default` when fewer arguments were supplied.
    pub fn arg_or<'a>(&'a self, i: usize, default: &'a str) -> &'a str {
        self.args.get(i).map_or(default, String::as_str)
    }

    /// Argument `i` as a decimal integer.
    pub fn arg_as_integer(&self, i: usize) -> Result<usize> {
        let arg = self.arg(i)?;
        let not_an_integer =
            || Error::invalid_argument(format!("Argument {i} of {self} is not an integer: '{arg}'"));

        // `str::parse` would also take a leading `+`
        if !arg.bytes().all(|b| b.is_ascii_digit()) {
            return Err(not_an_integer());
        }
        arg.parse().map_err(|_| not_an_integer())
    }

    /// Argument `i` as a decimal integer, or `default` when fewer arguments
    /// were supplied.
    pub fn arg_as_integer_or(&self, i: usize, default: usize) -> Result<usize> {
        if i < self.arg_count() {
            self.arg_as_integer(i)
        } else {
            Ok(default)
        }
    }
}

impl FromStr for ScanName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ScanName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.args.is_empty() {
            write!(f, "({})", self.args.join(","))?;
        }
        Ok(())
    }
}
