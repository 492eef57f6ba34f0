// SPDX-License-Identifier: MPL-2.0
//! Generated "flash sheet" artwork for tiles that have no photo yet.

use super::Palette;

/// Everything needed to draw one placeholder tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub title: String,
    pub subtitle: String,
    pub palette: Palette,
}

impl Placeholder {
    /// Renders the tile as a standalone 1200x900 SVG document.
    #[must_use]
    pub fn render_svg(&self) -> String {
        let Palette {
            primary,
            accent,
            text,
        } = &self.palette;
        let title = escape_xml(&self.title);
        let subtitle = escape_xml(&self.subtitle);

        format!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="1200" height="900" viewBox="0 0 1200 900">
  <defs>
    <linearGradient id="g" x1="0" y1="0" x2="1" y2="1">
      <stop offset="0" stop-color="{primary}"/>
      <stop offset="1" stop-color="{accent}"/>
    </linearGradient>
    <filter id="grain" x="-20%" y="-20%" width="140%" height="140%">
      <feTurbulence type="fractalNoise" baseFrequency="0.9" numOctaves="2" stitchTiles="stitch"/>
      <feColorMatrix type="matrix" values="1 0 0 0 0 0 1 0 0 0 0 0 1 0 0 0 0 0 .08 0"/>
    </filter>
    <filter id="softShadow" x="-20%" y="-20%" width="140%" height="140%">
      <feDropShadow dx="0" dy="10" stdDeviation="18" flood-color="#000" flood-opacity="0.45"/>
    </filter>
  </defs>
  <rect width="1200" height="900" rx="48" fill="url(#g)"/>
  <rect width="1200" height="900" rx="48" filter="url(#grain)" opacity="0.6"/>
  <rect x="44" y="44" width="1112" height="812" rx="36" fill="none" stroke="rgba(247,243,234,0.45)" stroke-width="6"/>
  <g filter="url(#softShadow)">
    <rect x="86" y="610" width="1028" height="210" rx="28" fill="rgba(0,0,0,0.35)" stroke="rgba(247,243,234,0.20)" stroke-width="3"/>
  </g>
  <text x="120" y="690" font-family="Space Grotesque, Inter, system-ui" font-size="54" font-weight="800" fill="{text}" opacity="0.95">{title}</text>
  <text x="120" y="755" font-family="Space Grotesque, Inter, system-ui" font-size="34" font-weight="600" fill="rgba(247,243,234,0.85)">{subtitle}</text>
  <circle cx="1060" cy="165" r="62" fill="rgba(0,0,0,0.25)" stroke="rgba(247,243,234,0.28)" stroke-width="4"/>
  <text x="1060" y="180" text-anchor="middle" font-family="Space Grotesque, Inter, system-ui" font-size="34" font-weight="900" fill="rgba(247,243,234,0.9)">✶</text>
</svg>"##
        )
    }
}

/// Escapes the five XML special characters.
#[must_use]
pub fn escape_xml(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
