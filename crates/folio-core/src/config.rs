//! Site configuration management.
//!
//! One immutable [`Config`] is built at startup and handed to whatever needs
//! it. Defaults reproduce the published site, so a project without a
//! `folio.toml` behaves exactly like the stock portfolio.

use std::{collections::HashSet, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    collection::Collection,
    error::{CoreError, Result},
};

const DEFAULT_TITLE: &str = "Stephen Portfoio";
const DEFAULT_DESCRIPTION: &str = "Hi, I'm Stephen - A data scientist based in Auckland, New Zealand. I have experience in computer vision, NLP, Docker and more. Check out my projects, research and running services for more info!";
const DEFAULT_SITE_URL: &str = "https://astrofy-template.netlify.app";

/// Main configuration structure for Folio.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings read by the rendering layer.
    #[serde(default)]
    pub site: SiteConfig,

    /// Build wiring.
    #[serde(default)]
    pub build: BuildConfig,

    /// Content layout.
    #[serde(default)]
    pub content: ContentConfig,
}

/// Site-wide constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,

    /// Site description for meta tags.
    pub description: String,

    /// Derive page identifiers from entry titles instead of file names.
    pub generate_slug_from_title: bool,

    /// Enable page transitions between routes.
    pub transition_api: bool,
}

/// Build-tool wiring. Integrations are declared by name only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Base URL for the site (e.g., "https://example.com").
    pub site_url: String,

    /// Enabled integrations, in registration order.
    pub integrations: Vec<Integration>,

    /// Markdown pipeline settings.
    pub markdown: MarkdownConfig,
}

/// A build integration provided by the external framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Integration {
    /// MDX support for content files.
    Mdx,
    /// `sitemap.xml` generation.
    Sitemap,
    /// Utility-class CSS processing.
    Tailwind,
}

impl Integration {
    /// Package that provides this integration.
    pub fn package(&self) -> &'static str {
        match self {
            Self::Mdx => "@astrojs/mdx",
            Self::Sitemap => "@astrojs/sitemap",
            Self::Tailwind => "@astrojs/tailwind",
        }
    }
}

/// Markdown pipeline settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Remark plugins applied before rendering, by package name.
    pub remark_plugins: Vec<String>,
}

/// Content layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory holding one sub-directory per collection.
    pub dir: String,

    /// Enabled collection names.
    pub collections: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            generate_slug_from_title: true,
            transition_api: true,
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            site_url: DEFAULT_SITE_URL.to_string(),
            integrations: vec![Integration::Mdx, Integration::Sitemap, Integration::Tailwind],
            markdown: MarkdownConfig::default(),
        }
    }
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            remark_plugins: vec!["remark-github-blockquote-alert".to_string()],
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: "src/content".to_string(),
            collections: Collection::ALL.iter().map(|c| c.name().to_string()).collect(),
        }
    }
}

impl ContentConfig {
    /// Resolve configured collection names.
    pub fn collections(&self) -> Result<Vec<Collection>> {
        self.collections.iter().map(|name| name.parse()).collect()
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration layered with `FOLIO__SECTION__KEY` environment
    /// variables. When `required` is false a missing file falls back to the
    /// defaults.
    pub fn load_with_env(path: &Path, required: bool) -> Result<Self> {
        if required && !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(required))
            .add_source(config::Environment::with_prefix("FOLIO").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.site.title.trim().is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        if self.site.description.trim().is_empty() {
            return Err(CoreError::config("site.description cannot be empty"));
        }

        if self.build.site_url.is_empty() {
            return Err(CoreError::config("build.site_url cannot be empty"));
        }

        if !self.build.site_url.starts_with("http://")
            && !self.build.site_url.starts_with("https://")
        {
            return Err(CoreError::config(format!(
                "build.site_url must start with http:// or https://, got `{}`",
                self.build.site_url
            )));
        }

        // Ensure site_url doesn't have trailing slash
        if self.build.site_url.ends_with('/') {
            tracing::warn!("build.site_url should not have a trailing slash");
        }

        let collections = self.content.collections()?;
        if collections.is_empty() {
            return Err(CoreError::config("content.collections cannot be empty"));
        }
        let mut seen = HashSet::new();
        for collection in &collections {
            if !seen.insert(collection) {
                return Err(CoreError::config(format!(
                    "content.collections lists `{collection}` more than once"
                )));
            }
        }

        let mut integrations = HashSet::new();
        for integration in &self.build.integrations {
            if !integrations.insert(integration) {
                tracing::warn!(integration = integration.package(), "integration registered twice");
            }
        }

        Ok(())
    }

    /// Get the full URL for a path.
    pub fn url_for(&self, path: &str) -> String {
        let base = self.build.site_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}
