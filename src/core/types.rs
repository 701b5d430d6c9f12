use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FigureError, FigureResult};

/// 1-based axis index; `AxisId(1)` is `x`/`y`, `AxisId(2)` is `x2`/`y2`.
///
/// Index 0 names no axis. It is rejected on deserialization and by
/// [`AxisId::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub struct AxisId(u32);

impl AxisId {
    pub const PRIMARY: Self = Self(1);

    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn try_new(raw: u32) -> FigureResult<Self> {
        Self(raw).validate()
    }

    pub fn validate(self) -> FigureResult<Self> {
        if self.0 == 0 {
            return Err(FigureError::InvalidData(
                "axis index must be >= 1".to_owned(),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn is_primary(self) -> bool {
        self.0 == 1
    }
}

impl Default for AxisId {
    fn default() -> Self {
        Self::PRIMARY
    }
}

impl From<AxisId> for u32 {
    fn from(id: AxisId) -> Self {
        id.0
    }
}

impl TryFrom<u32> for AxisId {
    type Error = FigureError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Self::try_new(raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisDimension {
    X,
    Y,
}

impl AxisDimension {
    const fn prefix(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
        }
    }
}

/// Coordinate system an annotation or shape is positioned in.
///
/// Serializes to the scene-graph string form: `paper`, `x`, `y2`,
/// `x domain`, `y3 domain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum CoordinateRef {
    Paper,
    Axis(AxisDimension, AxisId),
    Domain(AxisDimension, AxisId),
}

impl CoordinateRef {
    #[must_use]
    pub const fn x_domain() -> Self {
        Self::Domain(AxisDimension::X, AxisId::PRIMARY)
    }

    #[must_use]
    pub const fn y_domain() -> Self {
        Self::Domain(AxisDimension::Y, AxisId::PRIMARY)
    }

    /// Rejects references to axis index 0, which have no string form.
    pub fn validate(self) -> FigureResult<Self> {
        match self {
            Self::Paper => {}
            Self::Axis(_, id) | Self::Domain(_, id) => {
                id.validate()?;
            }
        }
        Ok(self)
    }
}

fn write_axis_name(f: &mut fmt::Formatter<'_>, dim: AxisDimension, id: AxisId) -> fmt::Result {
    if id.is_primary() {
        write!(f, "{}", dim.prefix())
    } else {
        write!(f, "{}{}", dim.prefix(), id.raw())
    }
}

impl fmt::Display for CoordinateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Paper => f.write_str("paper"),
            Self::Axis(dim, id) => write_axis_name(f, dim, id),
            Self::Domain(dim, id) => {
                write_axis_name(f, dim, id)?;
                f.write_str(" domain")
            }
        }
    }
}

impl FromStr for CoordinateRef {
    type Err = FigureError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input == "paper" {
            return Ok(Self::Paper);
        }
        let (axis, is_domain) = match input.strip_suffix(" domain") {
            Some(axis) => (axis, true),
            None => (input, false),
        };
        let (dim, digits) = if let Some(rest) = axis.strip_prefix('x') {
            (AxisDimension::X, rest)
        } else if let Some(rest) = axis.strip_prefix('y') {
            (AxisDimension::Y, rest)
        } else {
            return Err(FigureError::InvalidData(format!(
                "unknown coordinate reference `{input}`"
            )));
        };
        let id = if digits.is_empty() {
            AxisId::PRIMARY
        } else {
            let raw: u32 = digits.parse().map_err(|_| {
                FigureError::InvalidData(format!("unknown coordinate reference `{input}`"))
            })?;
            if raw < 2 {
                return Err(FigureError::InvalidData(format!(
                    "axis suffix must be >= 2 in `{input}`"
                )));
            }
            AxisId::new(raw)
        };
        Ok(if is_domain {
            Self::Domain(dim, id)
        } else {
            Self::Axis(dim, id)
        })
    }
}

impl From<CoordinateRef> for String {
    fn from(value: CoordinateRef) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for CoordinateRef {
    type Error = FigureError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum XAnchor {
    #[default]
    Auto,
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YAnchor {
    #[default]
    Auto,
    Top,
    Middle,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisSide {
    Left,
    Right,
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    #[serde(rename = "v")]
    Vertical,
    #[serde(rename = "h")]
    Horizontal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Font {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Font {
    #[must_use]
    pub fn sized(size: f64, color: impl Into<String>) -> Self {
        Self {
            family: None,
            size: Some(size),
            color: Some(color.into()),
        }
    }
}
