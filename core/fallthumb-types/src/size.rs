//! Size specifications.
//!
//! A [`SizeSpec`] is what callers ask for: either a named size configured on
//! the host, or an explicit pixel pair. A [`ResolvedSize`] is the concrete
//! target the size policy compares rendered images against.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The base named size every unknown name falls back to.
pub const BASE_SIZE: &str = "thumbnail";

/// Maps the host's historical aliases onto [`BASE_SIZE`].
#[must_use]
pub fn normalize_size_name(name: &str) -> &str {
    match name {
        "post-thumbnail" | "thumb" => BASE_SIZE,
        other => other,
    }
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl From<(u32, u32)> for Dimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

/// A requested image size.
///
/// Deserializes from either a string (`"thumbnail"`) or a table
/// (`{ width = 150, height = 150 }`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SizeSpec {
    Named(String),
    Explicit(Dimensions),
}

impl SizeSpec {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    #[must_use]
    pub const fn explicit(width: u32, height: u32) -> Self {
        Self::Explicit(Dimensions::new(width, height))
    }

    /// The base named size.
    #[must_use]
    pub fn base() -> Self {
        Self::Named(BASE_SIZE.to_string())
    }
}

impl Default for SizeSpec {
    fn default() -> Self {
        Self::base()
    }
}

impl fmt::Display for SizeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Explicit(dims) => write!(f, "{dims}"),
        }
    }
}

impl From<&str> for SizeSpec {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for SizeSpec {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl From<(u32, u32)> for SizeSpec {
    fn from(pair: (u32, u32)) -> Self {
        Self::Explicit(pair.into())
    }
}

/// Concrete pixel target plus crop mode. Width and height are always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ResolvedSize {
    width: u32,
    height: u32,
    crop: bool,
}

impl ResolvedSize {
    /// Returns `None` when either dimension is zero.
    #[must_use]
    pub const fn new(width: u32, height: u32, crop: bool) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self { width, height, crop })
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub const fn crop(&self) -> bool {
        self.crop
    }

    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    /// Whether an image rendered at `actual` satisfies this size.
    ///
    /// Cropped sizes require both dimensions to match exactly. Uncropped
    /// sizes keep the aspect ratio on the host, so one exact dimension is
    /// enough.
    #[must_use]
    pub const fn accepts(&self, actual: Dimensions) -> bool {
        if self.crop {
            actual.width == self.width && actual.height == self.height
        } else {
            actual.width == self.width || actual.height == self.height
        }
    }
}

impl fmt::Display for ResolvedSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)?;
        if self.crop {
            f.write_str(" (cropped)")?;
        }
        Ok(())
    }
}
