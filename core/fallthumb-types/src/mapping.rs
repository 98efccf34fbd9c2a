use crate::{Error, ImageRef, MappingId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum slug length in characters (the `slug` column is `VARCHAR(200)`).
pub const MAX_SLUG_LEN: usize = 200;

/// Reserved slug holding the site-wide default thumbnail.
pub const SITE_SLUG: &str = "~site";

/// An administrator-chosen key that maps a category, tag or the whole site
/// to an image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Validates and wraps a slug. Slugs are stored verbatim, no case folding.
    pub fn new(slug: impl Into<String>) -> Result<Self, Error> {
        let slug = slug.into();
        if slug.is_empty() {
            return Err(Error::EmptySlug);
        }
        let len = slug.chars().count();
        if len > MAX_SLUG_LEN {
            return Err(Error::SlugTooLong { len });
        }
        Ok(Self(slug))
    }

    /// The reserved site-wide slug.
    #[must_use]
    pub fn site() -> Self {
        Self(SITE_SLUG.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_site(&self) -> bool {
        self.0 == SITE_SLUG
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Slug {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One row of the slug mapping table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlugMapping {
    pub id: MappingId,
    pub slug: Slug,
    pub image: ImageRef,
}

/// A category or taxonomy term as reported by the host. Only the slug is
/// relevant to thumbnail lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Term {
    pub slug: String,
}

impl Term {
    pub fn new(slug: impl Into<String>) -> Self {
        Self { slug: slug.into() }
    }
}
