use std::fmt;
use std::str::FromStr;

use compact_str::CompactString;
use thiserror::Error;

use crate::tree::labels::LABEL_SEPARATOR;

/// Keyword that starts the text form of a rectangle.
pub const RECTANGLE_KEYWORD: &str = "RECTANGLE";

/// Raised when a rectangle (or a layout bounding box) is built from bad values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{param} parameter to Rectangle must be a pair of two numbers, got {len} values")]
    NotAPair { param: &'static str, len: usize },

    #[error("Incorrect value for rectangle {param}: ({a}, {b}) (both values must be >= 0)")]
    Negative {
        param: &'static str,
        a: f64,
        b: f64,
    },

    #[error("Incorrect value for rectangle {param}: ({a}, {b}) (both values must be finite)")]
    NotFinite {
        param: &'static str,
        a: f64,
        b: f64,
    },

    #[error("Rectangle {0} can't be missing")]
    MissingLabel(&'static str),

    #[error("Malformed rectangle line: {0:?}")]
    Malformed(String),
}

fn validate_pair(pair: (f64, f64), param: &'static str) -> Result<(), ValidationError> {
    let (a, b) = pair;
    if !a.is_finite() || !b.is_finite() {
        return Err(ValidationError::NotFinite { param, a, b });
    }
    if a < 0.0 || b < 0.0 {
        return Err(ValidationError::Negative { param, a, b });
    }
    Ok(())
}

fn pair_from_slice(values: &[f64], param: &'static str) -> Result<(f64, f64), ValidationError> {
    match *values {
        [a, b] => Ok((a, b)),
        _ => Err(ValidationError::NotAPair {
            param,
            len: values.len(),
        }),
    }
}

/// An axis-aligned rectangle in a treemap, labelled with the leaf it stands for.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    label: CompactString,
    verbose_label: String,
}

impl Rectangle {
    /// Origin and size are checked independently; all four values must be
    /// finite and non-negative.
    pub fn new(
        origin: (f64, f64),
        size: (f64, f64),
        label: &str,
        verbose_label: &str,
    ) -> Result<Self, ValidationError> {
        validate_pair(origin, "origin")?;
        validate_pair(size, "size")?;

        Ok(Rectangle {
            x: origin.0,
            y: origin.1,
            width: size.0,
            height: size.1,
            label: CompactString::new(label),
            verbose_label: verbose_label.to_string(),
        })
    }

    /// Build from loosely shaped parts: each pair must hold exactly two
    /// values and both labels must be present.
    pub fn from_parts(
        origin: &[f64],
        size: &[f64],
        label: Option<&str>,
        verbose_label: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let origin = pair_from_slice(origin, "origin")?;
        let size = pair_from_slice(size, "size")?;
        let label = label.ok_or(ValidationError::MissingLabel("label"))?;
        let verbose_label = verbose_label.ok_or(ValidationError::MissingLabel("verbose_label"))?;
        Self::new(origin, size, label, verbose_label)
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn verbose_label(&self) -> &str {
        &self.verbose_label
    }

    /// Label used in the text form: the verbose label unless it is empty.
    ///
    /// Layout always fills in the verbose label, and the data root's is "".
    /// An empty verbose label counts as unset, so a lone root rectangle
    /// prints its short label.
    pub fn display_label(&self) -> &str {
        if self.verbose_label.is_empty() {
            self.label.as_str()
        } else {
            self.verbose_label.as_str()
        }
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:.4} {:.4} {:.4} {:.4} {}",
            RECTANGLE_KEYWORD,
            self.x,
            self.y,
            self.width,
            self.height,
            self.display_label()
        )
    }
}

impl FromStr for Rectangle {
    type Err = ValidationError;

    /// Parse the text form written by `Display`. Everything after the fourth
    /// number is the verbose label; its last segment is the short label.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let malformed = || ValidationError::Malformed(line.to_string());

        let mut fields = line.trim_end_matches(['\r', '\n']).splitn(6, ' ');
        if fields.next() != Some(RECTANGLE_KEYWORD) {
            return Err(malformed());
        }

        let mut numbers = [0.0f64; 4];
        for slot in numbers.iter_mut() {
            *slot = fields
                .next()
                .and_then(|f| f.parse().ok())
                .ok_or_else(malformed)?;
        }

        let verbose_label = fields.next().unwrap_or("");
        let label = verbose_label
            .rsplit(LABEL_SEPARATOR)
            .next()
            .unwrap_or(verbose_label);

        Self::from_parts(
            &numbers[..2],
            &numbers[2..],
            Some(label),
            Some(verbose_label),
        )
    }
}
