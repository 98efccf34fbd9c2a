//! The per-request façade hosts call to get thumbnails.

use crate::builder::{BuiltinFallbacks, ChainBuilder, ChainContributor};
use crate::chain::FallbackChain;
use crate::config::ThumbnailConfig;
use crate::error::{ChainError, ThumbnailResult};
use crate::host::{DisplayAttrs, HostServices};
use crate::size::SizePolicy;
use crate::strategy::StrategyContext;
use fallthumb_store::SlugImageStore;
use fallthumb_types::{ContentId, ImageRef, SizeSpec};
use serde::{Deserialize, Serialize};
use std::cell::OnceCell;
use std::io::Write;
use tracing::{debug, debug_span};

/// Lets a host or plugin override the required thumbnail size.
pub trait RequiredSizeHook {
    fn required_size(&self, current: SizeSpec) -> SizeSpec;
}

impl<F> RequiredSizeHook for F
where
    F: Fn(SizeSpec) -> SizeSpec,
{
    fn required_size(&self, current: SizeSpec) -> SizeSpec {
        self(current)
    }
}

/// Options form of [`ThumbnailArgs`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbnailOptions {
    #[serde(default)]
    pub size: Option<SizeSpec>,
}

/// Size argument of a thumbnail request: nothing, a size, or an options set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ThumbnailArgs {
    #[default]
    Default,
    Size(SizeSpec),
    Options(ThumbnailOptions),
}

impl ThumbnailArgs {
    /// The explicitly requested size, if any.
    pub fn size(&self) -> Option<&SizeSpec> {
        match self {
            Self::Default => None,
            Self::Size(spec) => Some(spec),
            Self::Options(options) => options.size.as_ref(),
        }
    }
}

impl From<SizeSpec> for ThumbnailArgs {
    fn from(spec: SizeSpec) -> Self {
        Self::Size(spec)
    }
}

impl From<&str> for ThumbnailArgs {
    fn from(name: &str) -> Self {
        Self::Size(name.into())
    }
}

impl From<(u32, u32)> for ThumbnailArgs {
    fn from(pair: (u32, u32)) -> Self {
        Self::Size(pair.into())
    }
}

impl From<ThumbnailOptions> for ThumbnailArgs {
    fn from(options: ThumbnailOptions) -> Self {
        Self::Options(options)
    }
}

impl From<Option<SizeSpec>> for ThumbnailArgs {
    fn from(spec: Option<SizeSpec>) -> Self {
        spec.map_or(Self::Default, Self::Size)
    }
}

/// Resolves and renders fallback thumbnails for one resolution context.
///
/// Create one per request and pass it by reference. The chain is built on
/// first use and then reused unchanged for the lifetime of the service.
pub struct ThumbnailService<'a> {
    host: HostServices<'a>,
    store: &'a dyn SlugImageStore,
    config: ThumbnailConfig,
    contributors: Vec<Box<dyn ChainContributor + 'a>>,
    size_hook: Option<Box<dyn RequiredSizeHook + 'a>>,
    chain: OnceCell<FallbackChain>,
}

impl<'a> ThumbnailService<'a> {
    pub fn new(host: HostServices<'a>, store: &'a dyn SlugImageStore, config: ThumbnailConfig) -> Self {
        Self {
            host,
            store,
            config,
            contributors: Vec::new(),
            size_hook: None,
            chain: OnceCell::new(),
        }
    }

    /// Adds a contributor. Contributors run after the built-ins, in the
    /// order they were added.
    pub fn with_contributor(mut self, contributor: impl ChainContributor + 'a) -> Self {
        self.contributors.push(Box::new(contributor));
        self
    }

    pub fn with_required_size_hook(mut self, hook: impl RequiredSizeHook + 'a) -> Self {
        self.size_hook = Some(Box::new(hook));
        self
    }

    pub fn config(&self) -> &ThumbnailConfig {
        &self.config
    }

    pub fn size_policy(&self) -> SizePolicy<'a> {
        SizePolicy::new(self.host.sizes, self.host.media)
    }

    /// The size thumbnails must meet when the caller does not ask for one.
    pub fn required_size(&self) -> SizeSpec {
        let configured = self.config.required_size.clone();
        match &self.size_hook {
            Some(hook) => hook.required_size(configured),
            None => configured,
        }
    }

    /// The fallback chain, built on first access.
    pub fn chain(&self) -> Result<&FallbackChain, ChainError> {
        if let Some(chain) = self.chain.get() {
            return Ok(chain);
        }
        let chain = self.build_chain()?;
        debug!("fallback chain built: {}", chain.summary());
        Ok(self.chain.get_or_init(|| chain))
    }

    fn build_chain(&self) -> Result<FallbackChain, ChainError> {
        let mut builder = ChainBuilder::new();
        builder.apply(&BuiltinFallbacks::from_config(&self.config));
        for contributor in &self.contributors {
            builder.apply(contributor.as_ref());
        }
        builder.build()
    }

    /// The image the chain picks for `content` at `spec`, if any.
    pub fn resolve(&self, content: ContentId, spec: &SizeSpec) -> ThumbnailResult<Option<ImageRef>> {
        let chain = self.chain()?;
        let ctx = StrategyContext::new(self.host.content, self.store);
        Ok(chain.resolve(&ctx, &self.size_policy(), content, spec)?)
    }

    /// Markup for the fallback thumbnail of `content`.
    ///
    /// `content` defaults to the host's current item and the size to
    /// [`required_size`](Self::required_size). An empty string means no
    /// thumbnail is available, which is a normal outcome.
    pub fn get_thumbnail(
        &self,
        content: Option<ContentId>,
        args: impl Into<ThumbnailArgs>,
        attrs: &DisplayAttrs,
    ) -> ThumbnailResult<String> {
        let Some(content) = content.or_else(|| self.host.content.current_content_id()) else {
            debug!("no content item in context, no thumbnail");
            return Ok(String::new());
        };
        let args = args.into();
        let spec = args.size().cloned().unwrap_or_else(|| self.required_size());

        let _span = debug_span!("fallback_thumbnail", content = %content, size = %spec).entered();
        match self.resolve(content, &spec)? {
            Some(image) => Ok(self.host.media.render_markup(image, &spec, attrs)),
            None => Ok(String::new()),
        }
    }

    /// Writes [`get_thumbnail`](Self::get_thumbnail) output to `out`.
    pub fn echo_thumbnail(
        &self,
        out: &mut dyn Write,
        content: Option<ContentId>,
        args: impl Into<ThumbnailArgs>,
        attrs: &DisplayAttrs,
    ) -> ThumbnailResult<()> {
        let html = self.get_thumbnail(content, args, attrs)?;
        if !html.is_empty() {
            out.write_all(html.as_bytes())?;
        }
        Ok(())
    }
}
