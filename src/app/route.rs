// SPDX-License-Identifier: MPL-2.0
//! Route enumeration for page navigation.

use std::fmt;

const CATEGORY_PREFIX: &str = "/portfolio/";

/// Pages the visitor can navigate between.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    /// `/portfolio/<slug>`
    Category(String),
}

impl Route {
    /// Parses a URL path. Anything unrecognized maps to `Home`.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let path = path.trim();
        match path.strip_prefix(CATEGORY_PREFIX) {
            Some(slug) => {
                let slug = slug.trim_end_matches('/');
                if slug.is_empty() || slug.contains('/') {
                    Route::Home
                } else {
                    Route::Category(slug.to_string())
                }
            }
            None => Route::Home,
        }
    }

    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Category(slug) => format!("{CATEGORY_PREFIX}{slug}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_category_paths() {
        assert_eq!(
            Route::parse("/portfolio/blackwork"),
            Route::Category("blackwork".into())
        );
        assert_eq!(
            Route::parse("/portfolio/neo-traditional/"),
            Route::Category("neo-traditional".into())
        );
    }

    #[test]
    fn unrecognized_paths_are_home() {
        for path in ["/", "", "/about", "/portfolio/", "/portfolio/a/b"] {
            assert_eq!(Route::parse(path), Route::Home, "{path}");
        }
    }

    #[test]
    fn path_round_trips() {
        let route = Route::Category("traditional".into());
        assert_eq!(route.path(), "/portfolio/traditional");
        assert_eq!(Route::parse(&route.path()), route);
        assert_eq!(Route::Home.to_string(), "/");
    }
}
