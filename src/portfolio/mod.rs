// SPDX-License-Identifier: MPL-2.0
//! Portfolio content: categories and their gallery tiles.
//!
//! The category list ships inside the binary (`assets/portfolio.toml`).
//! Until real photos exist, every category offers [`TILES_PER_CATEGORY`]
//! generated placeholder tiles.

pub mod placeholder;

pub use placeholder::{escape_xml, Placeholder};

use crate::error::{ContentError, Result};
use rust_embed::RustEmbed;
use serde::Deserialize;
use std::collections::HashSet;
use std::rc::Rc;

/// Number of placeholder tiles generated per category.
pub const TILES_PER_CATEGORY: usize = 12;

const CATALOG_FILE: &str = "portfolio.toml";

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Asset;

/// Colors used to draw a category's placeholder tiles.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Palette {
    pub primary: String,
    pub accent: String,
    pub text: String,
}

/// A portfolio category shown on the home page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub slug: String,
    pub title: String,
    pub description: String,
    /// Cover image, relative to the site's asset root.
    pub cover: String,
    pub palette: Palette,
}

impl Category {
    /// The category's gallery tiles, numbered from 1.
    #[must_use]
    pub fn placeholders(&self) -> Vec<GalleryItem> {
        (1..=TILES_PER_CATEGORY)
            .map(|n| {
                let subtitle = format!("Flash tile • #{n}");
                GalleryItem {
                    id: format!("{}-{n}", self.slug),
                    title: self.title.clone(),
                    subtitle: subtitle.clone(),
                    image: ImageRef::Placeholder(Placeholder {
                        title: self.title.clone(),
                        subtitle,
                        palette: self.palette.clone(),
                    }),
                }
            })
            .collect()
    }
}

/// Where a tile's picture comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    /// A file under the site's asset root.
    Asset(String),
    /// Generated artwork.
    Placeholder(Placeholder),
}

impl ImageRef {
    /// Short description for logs and text snapshots.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            ImageRef::Asset(path) => path.clone(),
            ImageRef::Placeholder(placeholder) => {
                format!("placeholder svg ({})", placeholder.palette.primary)
            }
        }
    }
}

/// One entry of a gallery. Immutable once handed to a gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryItem {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub image: ImageRef,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "category")]
    categories: Vec<Category>,
}

/// All categories, in display order.
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Rc<[Category]>,
}

impl Catalog {
    /// Loads the catalog compiled into the binary.
    pub fn embedded() -> Result<Self> {
        let file = Asset::get(CATALOG_FILE)
            .ok_or_else(|| ContentError::Catalog(format!("{CATALOG_FILE} is not embedded")))?;
        let content = std::str::from_utf8(file.data.as_ref())
            .map_err(|err| ContentError::Catalog(err.to_string()))?;
        Self::from_toml(content)
    }

    /// Parses a catalog. Slugs must be unique and at least one category is required.
    pub fn from_toml(content: &str) -> Result<Self> {
        let file: CatalogFile =
            toml::from_str(content).map_err(|err| ContentError::Catalog(err.to_string()))?;

        if file.categories.is_empty() {
            return Err(ContentError::Catalog("no categories defined".to_string()).into());
        }
        let mut seen = HashSet::new();
        for category in &file.categories {
            if !seen.insert(category.slug.as_str()) {
                return Err(
                    ContentError::Catalog(format!("duplicate slug '{}'", category.slug)).into(),
                );
            }
        }

        Ok(Self {
            categories: file.categories.into(),
        })
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn find(&self, slug: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.slug == slug)
    }

    /// Gallery tiles for a category.
    pub fn placeholders(&self, slug: &str) -> Result<Vec<GalleryItem>> {
        self.find(slug)
            .map(Category::placeholders)
            .ok_or_else(|| ContentError::UnknownCategory(slug.to_string()).into())
    }
}
