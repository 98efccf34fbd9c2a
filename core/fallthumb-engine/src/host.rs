//! Contracts the host platform fulfils.
//!
//! The resolver never touches posts, terms or image files directly. Every
//! lookup goes through one of these traits, so a host only has to adapt its
//! own content model and media pipeline.

use fallthumb_types::{ContentId, Dimensions, ImageRef, ResolvedSize, SizeSpec, Term};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Read access to the host content model.
pub trait ContentModel {
    /// The thumbnail directly assigned to the item, if any.
    fn own_thumbnail(&self, content: ContentId) -> Option<ImageRef>;

    /// Categories the item belongs to, in host order.
    fn categories_of(&self, content: ContentId) -> Vec<Term>;

    /// Terms of an arbitrary taxonomy attached to the item, in host order.
    fn terms_of(&self, content: ContentId, taxonomy: &str) -> Vec<Term>;

    /// The item currently being rendered, if the host has one.
    fn current_content_id(&self) -> Option<ContentId>;
}

/// The host image pipeline.
pub trait MediaLibrary {
    /// Dimensions the host would serve `image` at for `size`, or `None` when
    /// it cannot produce the image at that size.
    fn dimensions_at(&self, image: ImageRef, size: &SizeSpec) -> Option<Dimensions>;

    /// Renders `<img>`-equivalent markup. `attrs` are passed through untouched.
    fn render_markup(&self, image: ImageRef, size: &SizeSpec, attrs: &DisplayAttrs) -> String;
}

/// Width, height and crop flag as configured on the host for a named size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedSizeConfig {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub crop: bool,
}

impl NamedSizeConfig {
    #[must_use]
    pub const fn new(width: u32, height: u32, crop: bool) -> Self {
        Self { width, height, crop }
    }

    /// `None` for zero dimensions, which hosts use to mean "not configured".
    #[must_use]
    pub const fn to_resolved(self) -> Option<ResolvedSize> {
        ResolvedSize::new(self.width, self.height, self.crop)
    }
}

/// Named size configuration on the host.
///
/// Custom sizes are registered by themes and plugins under their exact name.
/// Media settings are the built-in sizes (`thumbnail`, `medium`, ...).
pub trait SizeRegistry {
    fn custom_size(&self, name: &str) -> Option<NamedSizeConfig>;

    fn media_setting(&self, name: &str) -> Option<NamedSizeConfig>;
}

/// A [`SizeRegistry`] backed by fixed tables, usually loaded from config.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticSizeRegistry {
    custom: BTreeMap<String, NamedSizeConfig>,
    settings: BTreeMap<String, NamedSizeConfig>,
}

impl StaticSizeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_setting(mut self, name: impl Into<String>, size: NamedSizeConfig) -> Self {
        self.settings.insert(name.into(), size);
        self
    }

    pub fn with_custom(mut self, name: impl Into<String>, size: NamedSizeConfig) -> Self {
        self.custom.insert(name.into(), size);
        self
    }

    /// Every configured name, custom sizes first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.custom.keys().chain(self.settings.keys()).map(String::as_str)
    }
}

impl SizeRegistry for StaticSizeRegistry {
    fn custom_size(&self, name: &str) -> Option<NamedSizeConfig> {
        self.custom.get(name).copied()
    }

    fn media_setting(&self, name: &str) -> Option<NamedSizeConfig> {
        self.settings.get(name).copied()
    }
}

/// Display attributes (alt text, CSS classes, ...) forwarded to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayAttrs(Vec<(String, String)>);

impl DisplayAttrs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an attribute, keeping first-insertion order.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Borrowed handles to every host collaborator the service needs.
#[derive(Clone, Copy)]
pub struct HostServices<'a> {
    pub content: &'a dyn ContentModel,
    pub media: &'a dyn MediaLibrary,
    pub sizes: &'a dyn SizeRegistry,
}

impl<'a> HostServices<'a> {
    pub fn new(
        content: &'a dyn ContentModel,
        media: &'a dyn MediaLibrary,
        sizes: &'a dyn SizeRegistry,
    ) -> Self {
        Self { content, media, sizes }
    }
}
