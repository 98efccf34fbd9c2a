use crate::error::ResolutionError;
use crate::host::{MediaLibrary, SizeRegistry};
use fallthumb_types::{BASE_SIZE, ImageRef, ResolvedSize, SizeSpec, normalize_size_name};
use serde::Serialize;
use tracing::debug;

/// How an image relates to a required size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeStatus {
    Fits,
    /// The host renders the image, but not at the required dimensions.
    TooSmall,
    /// The host cannot produce the image at this size at all.
    Missing,
}

/// Resolves size specifications and checks images against them.
#[derive(Clone, Copy)]
pub struct SizePolicy<'a> {
    registry: &'a dyn SizeRegistry,
    media: &'a dyn MediaLibrary,
}

impl<'a> SizePolicy<'a> {
    pub fn new(registry: &'a dyn SizeRegistry, media: &'a dyn MediaLibrary) -> Self {
        Self { registry, media }
    }

    /// Turns a size specification into concrete pixel targets.
    ///
    /// Named sizes are looked up as a custom size first, then (after alias
    /// normalization) in the media settings. Unknown names fall back to
    /// `thumbnail`; an unconfigured `thumbnail` is terminal.
    pub fn resolve(&self, spec: &SizeSpec) -> Result<ResolvedSize, ResolutionError> {
        match spec {
            SizeSpec::Explicit(dims) => ResolvedSize::new(dims.width, dims.height, false).ok_or(
                ResolutionError::InvalidDimensions {
                    width: dims.width,
                    height: dims.height,
                },
            ),
            SizeSpec::Named(name) => self.resolve_named(name, name),
        }
    }

    fn resolve_named(&self, name: &str, requested: &str) -> Result<ResolvedSize, ResolutionError> {
        if let Some(size) = self.registry.custom_size(name).and_then(|c| c.to_resolved()) {
            return Ok(size);
        }

        let name = normalize_size_name(name);
        if let Some(size) = self.registry.media_setting(name).and_then(|c| c.to_resolved()) {
            return Ok(size);
        }

        if name == BASE_SIZE {
            return Err(ResolutionError::BaseSizeUnconfigured {
                requested: requested.to_string(),
            });
        }

        debug!("size {:?} not configured, falling back to {:?}", name, BASE_SIZE);
        self.resolve_named(BASE_SIZE, requested)
    }

    /// Whether the host can serve `image` at `spec` with dimensions that
    /// satisfy `size`.
    pub fn matches(&self, image: ImageRef, spec: &SizeSpec, size: &ResolvedSize) -> bool {
        self.status(image, spec, size) == SizeStatus::Fits
    }

    pub fn status(&self, image: ImageRef, spec: &SizeSpec, size: &ResolvedSize) -> SizeStatus {
        match self.media.dimensions_at(image, spec) {
            None => SizeStatus::Missing,
            Some(actual) if size.accepts(actual) => SizeStatus::Fits,
            Some(_) => SizeStatus::TooSmall,
        }
    }
}
