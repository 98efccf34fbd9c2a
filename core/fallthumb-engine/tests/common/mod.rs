//! Shared fakes for engine tests.

#![allow(dead_code)]

use fallthumb_engine::host::{
    ContentModel, DisplayAttrs, HostServices, MediaLibrary, NamedSizeConfig, StaticSizeRegistry,
};
use fallthumb_types::{ContentId, Dimensions, ImageRef, SizeSpec, Term};
use std::collections::HashMap;

/// In-memory stand-in for the host content model and media library.
#[derive(Default)]
pub struct FakeHost {
    pub own: HashMap<ContentId, ImageRef>,
    pub categories: HashMap<ContentId, Vec<Term>>,
    pub terms: HashMap<(ContentId, String), Vec<Term>>,
    pub dimensions: HashMap<ImageRef, Dimensions>,
    pub current: Option<ContentId>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn own_thumbnail(mut self, content: u64, image: i64) -> Self {
        self.own.insert(ContentId::new(content), ImageRef::new(image));
        self
    }

    pub fn category(mut self, content: u64, slug: &str) -> Self {
        self.categories
            .entry(ContentId::new(content))
            .or_default()
            .push(Term::new(slug));
        self
    }

    pub fn term(mut self, content: u64, taxonomy: &str, slug: &str) -> Self {
        self.terms
            .entry((ContentId::new(content), taxonomy.to_string()))
            .or_default()
            .push(Term::new(slug));
        self
    }

    pub fn image(mut self, image: i64, width: u32, height: u32) -> Self {
        self.dimensions.insert(ImageRef::new(image), Dimensions::new(width, height));
        self
    }

    pub fn current(mut self, content: u64) -> Self {
        self.current = Some(ContentId::new(content));
        self
    }
}

impl ContentModel for FakeHost {
    fn own_thumbnail(&self, content: ContentId) -> Option<ImageRef> {
        self.own.get(&content).copied()
    }

    fn categories_of(&self, content: ContentId) -> Vec<Term> {
        self.categories.get(&content).cloned().unwrap_or_default()
    }

    fn terms_of(&self, content: ContentId, taxonomy: &str) -> Vec<Term> {
        self.terms
            .get(&(content, taxonomy.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    fn current_content_id(&self) -> Option<ContentId> {
        self.current
    }
}

impl MediaLibrary for FakeHost {
    fn dimensions_at(&self, image: ImageRef, _size: &SizeSpec) -> Option<Dimensions> {
        self.dimensions.get(&image).copied()
    }

    fn render_markup(&self, image: ImageRef, size: &SizeSpec, attrs: &DisplayAttrs) -> String {
        let mut html = format!(r#"<img src="/media/{image}" data-size="{size}""#);
        for (name, value) in attrs.iter() {
            html.push_str(&format!(r#" {name}="{value}""#));
        }
        html.push_str("/>");
        html
    }
}

/// `thumbnail` configured as a hard-cropped 150x150.
pub fn cropped_thumbnail_sizes() -> StaticSizeRegistry {
    StaticSizeRegistry::new().with_setting("thumbnail", NamedSizeConfig::new(150, 150, true))
}

pub fn services<'a>(host: &'a FakeHost, sizes: &'a StaticSizeRegistry) -> HostServices<'a> {
    HostServices::new(host, host, sizes)
}
