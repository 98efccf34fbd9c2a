//! Resolver configuration, read from `fallthumb.toml`.
//!
//! ```toml
//! required_size = "thumbnail"
//! tag_taxonomy = "tag"
//! site_slug = "~site"
//! table_prefix = "wp_"
//!
//! [sizes.thumbnail]
//! width = 150
//! height = 150
//! crop = true
//!
//! [custom_sizes.hero]
//! width = 1200
//! height = 400
//! ```

use crate::error::ConfigError;
use crate::host::{NamedSizeConfig, StaticSizeRegistry};
use crate::strategy::TaxonomyStrategy;
use fallthumb_types::{SITE_SLUG, SizeSpec};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbnailConfig {
    /// Size a thumbnail must meet when the caller does not ask for one.
    #[serde(default)]
    pub required_size: SizeSpec,
    /// Taxonomy the built-in `tag` level reads terms from.
    #[serde(default = "default_tag_taxonomy")]
    pub tag_taxonomy: String,
    /// Slug holding the site-wide default image.
    #[serde(default = "default_site_slug")]
    pub site_slug: String,
    /// Prefix for the mapping table name.
    #[serde(default)]
    pub table_prefix: String,
    /// Media settings for built-in named sizes.
    #[serde(default)]
    pub sizes: BTreeMap<String, NamedSizeConfig>,
    /// Sizes registered by themes or plugins.
    #[serde(default)]
    pub custom_sizes: BTreeMap<String, NamedSizeConfig>,
}

fn default_tag_taxonomy() -> String {
    TaxonomyStrategy::DEFAULT_TAXONOMY.to_string()
}

fn default_site_slug() -> String {
    SITE_SLUG.to_string()
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            required_size: SizeSpec::default(),
            tag_taxonomy: default_tag_taxonomy(),
            site_slug: default_site_slug(),
            table_prefix: String::new(),
            sizes: BTreeMap::new(),
            custom_sizes: BTreeMap::new(),
        }
    }
}

impl ThumbnailConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Reads and parses a config file.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Loads config from `path` if it exists.
    /// Falls back to defaults with a warning on read or parse errors.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No config file found at {:?}, using defaults", path);
            return Self::default();
        }

        match Self::read(path) {
            Ok(config) => {
                info!("Loaded thumbnail config from {:?}", path);
                config
            }
            Err(e) => {
                warn!("Failed to load config file {:?}: {}. Using defaults.", path, e);
                Self::default()
            }
        }
    }

    /// A size registry serving the configured sizes.
    pub fn size_registry(&self) -> StaticSizeRegistry {
        let registry = self
            .sizes
            .iter()
            .fold(StaticSizeRegistry::new(), |r, (name, size)| r.with_setting(name.clone(), *size));
        self.custom_sizes
            .iter()
            .fold(registry, |r, (name, size)| r.with_custom(name.clone(), *size))
    }
}
