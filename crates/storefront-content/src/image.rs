//! # Image URL Builder
//!
//! Resolves the opaque [`ImageRef`] carried by a product into a fetchable
//! CDN URL.
//!
//! ## Reference Format
//! ```text
//!   image-Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000-jpg
//!   ───── ──────────────────────── ───────── ───
//!   kind  asset id                 w x h     ext
//!
//!   ──► https://cdn.sanity.io/images/<project>/<dataset>/
//!           Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000.jpg?w=400&fit=crop
//! ```

use storefront_core::ImageRef;
use url::Url;

use crate::config::ContentConfig;
use crate::error::{ContentError, ContentResult};

const CDN_BASE: &str = "https://cdn.sanity.io/images";

/// How the CDN fits the image into the requested box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fit {
    Clip,
    Crop,
    Fill,
    FillMax,
    Max,
    Scale,
    Min,
}

impl Fit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Fit::Clip => "clip",
            Fit::Crop => "crop",
            Fit::Fill => "fill",
            Fit::FillMax => "fillmax",
            Fit::Max => "max",
            Fit::Scale => "scale",
            Fit::Min => "min",
        }
    }
}

/// Parsed parts of an image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    pub asset_id: String,
    pub width: u32,
    pub height: u32,
    pub extension: String,
}

impl ImageAsset {
    /// Splits `image-<id>-<w>x<h>-<ext>`.
    pub fn parse(reference: &ImageRef) -> ContentResult<Self> {
        let invalid = || ContentError::InvalidImageRef(reference.to_string());

        let body = reference.as_str().strip_prefix("image-").ok_or_else(invalid)?;
        let (rest, extension) = body.rsplit_once('-').ok_or_else(invalid)?;
        let (asset_id, dimensions) = rest.rsplit_once('-').ok_or_else(invalid)?;
        let (width, height) = dimensions.split_once('x').ok_or_else(invalid)?;

        let width: u32 = width.parse().map_err(|_| invalid())?;
        let height: u32 = height.parse().map_err(|_| invalid())?;

        if asset_id.is_empty() || extension.is_empty() {
            return Err(invalid());
        }

        Ok(ImageAsset {
            asset_id: asset_id.to_string(),
            width,
            height,
            extension: extension.to_string(),
        })
    }
}

/// Builds CDN URLs for product images.
///
/// ## Example
/// ```rust
/// use storefront_content::{Fit, ImageUrlBuilder};
/// use storefront_core::ImageRef;
///
/// let url = ImageUrlBuilder::new("abc123", "production")
///     .width(400)
///     .fit(Fit::Crop)
///     .url_for(&ImageRef::new("image-a1b2-800x600-png"))
///     .unwrap();
///
/// assert_eq!(
///     url.as_str(),
///     "https://cdn.sanity.io/images/abc123/production/a1b2-800x600.png?w=400&fit=crop"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUrlBuilder {
    project_id: String,
    dataset: String,
    width: Option<u32>,
    height: Option<u32>,
    fit: Option<Fit>,
}

impl ImageUrlBuilder {
    pub fn new(project_id: impl Into<String>, dataset: impl Into<String>) -> Self {
        ImageUrlBuilder {
            project_id: project_id.into(),
            dataset: dataset.into(),
            width: None,
            height: None,
            fit: None,
        }
    }

    pub fn from_config(config: &ContentConfig) -> Self {
        Self::new(config.project_id.clone(), config.dataset.clone())
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn fit(mut self, fit: Fit) -> Self {
        self.fit = Some(fit);
        self
    }

    /// Resolves a reference into a URL.
    pub fn url_for(&self, reference: &ImageRef) -> ContentResult<Url> {
        let asset = ImageAsset::parse(reference)?;

        let mut url = Url::parse(&format!(
            "{}/{}/{}/{}-{}x{}.{}",
            CDN_BASE,
            self.project_id,
            self.dataset,
            asset.asset_id,
            asset.width,
            asset.height,
            asset.extension
        ))?;

        if self.width.is_some() || self.height.is_some() || self.fit.is_some() {
            let mut query = url.query_pairs_mut();
            if let Some(w) = self.width {
                query.append_pair("w", &w.to_string());
            }
            if let Some(h) = self.height {
                query.append_pair("h", &h.to_string());
            }
            if let Some(fit) = self.fit {
                query.append_pair("fit", fit.as_str());
            }
        }

        Ok(url)
    }
}
