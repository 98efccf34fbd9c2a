//! Fallback strategies: one level of the chain each.

use crate::error::StrategyError;
use crate::host::ContentModel;
use fallthumb_store::SlugImageStore;
use fallthumb_types::{ContentId, ImageRef, ResolvedSize, SITE_SLUG, SizeSpec, Term};
use serde_json::{Map, Value};

/// Host collaborators available to strategies.
#[derive(Clone, Copy)]
pub struct StrategyContext<'a> {
    pub content: &'a dyn ContentModel,
    pub store: &'a dyn SlugImageStore,
}

impl<'a> StrategyContext<'a> {
    pub fn new(content: &'a dyn ContentModel, store: &'a dyn SlugImageStore) -> Self {
        Self { content, store }
    }

    /// Images mapped to each term's slug, in term order. Unmapped terms are
    /// skipped.
    pub fn images_for_terms(&self, terms: &[Term]) -> Result<Vec<ImageRef>, StrategyError> {
        let mut images = Vec::new();
        for term in terms {
            if let Some(image) = self.store.get(&term.slug)? {
                images.push(image);
            }
        }
        Ok(images)
    }
}

/// Arguments passed to a strategy for one resolution.
#[derive(Debug, Clone, Copy)]
pub struct StrategyArgs<'a> {
    /// The size as the caller requested it.
    pub spec: &'a SizeSpec,
    /// The same size resolved to pixels.
    pub size: ResolvedSize,
    /// Static arguments registered with the chain node.
    pub params: &'a Map<String, Value>,
}

impl<'a> StrategyArgs<'a> {
    pub fn param(&self, key: &str) -> Option<&'a Value> {
        self.params.get(key)
    }

    /// A string parameter. Present but non-string values are an error.
    pub fn str_param(&self, key: &str) -> Result<Option<&'a str>, StrategyError> {
        match self.param(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(StrategyError::InvalidArgument(format!(
                "{key} must be a string, got {other}"
            ))),
        }
    }
}

/// Produces candidate images for a content item, most preferred first.
///
/// Returning an empty list means "nothing at this level"; the chain moves on
/// to the next node. Errors are logged by the chain and treated the same way.
pub trait FallbackStrategy: Send + Sync {
    fn produce(
        &self,
        ctx: &StrategyContext<'_>,
        content: ContentId,
        args: &StrategyArgs<'_>,
    ) -> Result<Vec<ImageRef>, StrategyError>;
}

/// The item's own directly assigned thumbnail.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostStrategy;

impl FallbackStrategy for PostStrategy {
    fn produce(
        &self,
        ctx: &StrategyContext<'_>,
        content: ContentId,
        _args: &StrategyArgs<'_>,
    ) -> Result<Vec<ImageRef>, StrategyError> {
        Ok(ctx.content.own_thumbnail(content).into_iter().collect())
    }
}

/// Images mapped to the slugs of the item's categories.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryStrategy;

impl FallbackStrategy for CategoryStrategy {
    fn produce(
        &self,
        ctx: &StrategyContext<'_>,
        content: ContentId,
        _args: &StrategyArgs<'_>,
    ) -> Result<Vec<ImageRef>, StrategyError> {
        ctx.images_for_terms(&ctx.content.categories_of(content))
    }
}

/// Images mapped to the slugs of the item's terms in one taxonomy.
///
/// The taxonomy comes from the `taxonomy` parameter and defaults to
/// [`TaxonomyStrategy::DEFAULT_TAXONOMY`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TaxonomyStrategy;

impl TaxonomyStrategy {
    pub const DEFAULT_TAXONOMY: &'static str = "tag";
}

impl FallbackStrategy for TaxonomyStrategy {
    fn produce(
        &self,
        ctx: &StrategyContext<'_>,
        content: ContentId,
        args: &StrategyArgs<'_>,
    ) -> Result<Vec<ImageRef>, StrategyError> {
        let taxonomy = args
            .str_param("taxonomy")?
            .unwrap_or(Self::DEFAULT_TAXONOMY);
        ctx.images_for_terms(&ctx.content.terms_of(content, taxonomy))
    }
}

/// The site-wide default image. Ignores the content item.
///
/// Looks up the `slug` parameter, [`SITE_SLUG`] when absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct SiteStrategy;

impl FallbackStrategy for SiteStrategy {
    fn produce(
        &self,
        ctx: &StrategyContext<'_>,
        _content: ContentId,
        args: &StrategyArgs<'_>,
    ) -> Result<Vec<ImageRef>, StrategyError> {
        let slug = args.str_param("slug")?.unwrap_or(SITE_SLUG);
        Ok(ctx.store.get(slug)?.into_iter().collect())
    }
}

/// A strategy backed by a closure. Build one with [`strategy_fn`].
pub struct FnStrategy<F>(F);

/// Wraps a closure as a [`FallbackStrategy`].
///
/// ```ignore
/// builder.add("featured", strategy_fn(|_ctx, _id, _args| Ok(vec![ImageRef::new(7)])), Some("post"));
/// ```
pub fn strategy_fn<F>(f: F) -> FnStrategy<F>
where
    F: Fn(&StrategyContext<'_>, ContentId, &StrategyArgs<'_>) -> Result<Vec<ImageRef>, StrategyError>
        + Send
        + Sync,
{
    FnStrategy(f)
}

impl<F> FallbackStrategy for FnStrategy<F>
where
    F: Fn(&StrategyContext<'_>, ContentId, &StrategyArgs<'_>) -> Result<Vec<ImageRef>, StrategyError>
        + Send
        + Sync,
{
    fn produce(
        &self,
        ctx: &StrategyContext<'_>,
        content: ContentId,
        args: &StrategyArgs<'_>,
    ) -> Result<Vec<ImageRef>, StrategyError> {
        (self.0)(ctx, content, args)
    }
}
