//! Widget content payloads embedded in the host markup.
//!
//! The theme serializes each widget's content into a `data-*` attribute
//! on its container; mounting parses it here. A missing or malformed
//! payload means the widget is simply not mounted.

use serde::Deserialize;
use web_sys::Element;

pub const GALLERY_CONFIG_ATTR: &str = "data-gallery-config";
pub const NAV_CONFIG_ATTR: &str = "data-mega-nav-config";

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GalleryImage {
    pub src: String,
    /// Responsive candidates; the magnifier reads back whichever source
    /// the browser actually selected.
    #[serde(default)]
    pub srcset: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GalleryConfig {
    pub images: Vec<GalleryImage>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NavLink {
    pub label: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NavColumn {
    #[serde(default)]
    pub heading: Option<String>,
    pub links: Vec<NavLink>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NavSection {
    pub label: String,
    /// Stable handle used for per-section class hooks.
    pub handle: String,
    #[serde(default)]
    pub columns: Vec<NavColumn>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NavConfig {
    pub sections: Vec<NavSection>,
}

fn parse_attr<T>(el: &Element, attr: &str) -> Option<T>
where
    T: for<'de> Deserialize<'de>,
{
    let raw = el.get_attribute(attr)?;
    serde_json::from_str(&raw).ok()
}

impl GalleryConfig {
    pub fn from_element(el: &Element) -> Option<Self> {
        parse_attr(el, GALLERY_CONFIG_ATTR)
    }
}

impl NavConfig {
    pub fn from_element(el: &Element) -> Option<Self> {
        parse_attr(el, NAV_CONFIG_ATTR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gallery_payload_parses() {
        let raw = r#"{
            "images": [
                {"src": "/cdn/a-480.jpg", "srcset": "/cdn/a-480.jpg 480w, /cdn/a-1200.jpg 1200w", "alt": "Front view"},
                {"src": "/cdn/b-480.jpg"}
            ]
        }"#;
        let config: GalleryConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.images.len(), 2);
        assert_eq!(config.images[0].alt.as_deref(), Some("Front view"));
        assert!(config.images[1].srcset.is_none());
    }

    #[test]
    fn nav_payload_parses() {
        let raw = r#"{
            "sections": [
                {
                    "label": "Shop",
                    "handle": "shop",
                    "columns": [
                        {"heading": "New", "links": [{"label": "Arrivals", "url": "/collections/new"}]},
                        {"links": [{"label": "Sale", "url": "/collections/sale"}]}
                    ]
                },
                {"label": "About", "handle": "about"}
            ]
        }"#;
        let config: NavConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.sections.len(), 2);
        assert_eq!(config.sections[0].columns.len(), 2);
        assert!(config.sections[1].columns.is_empty());
    }

    #[test]
    fn malformed_payload_is_rejected() {
        assert!(serde_json::from_str::<GalleryConfig>("{\"images\": 3}").is_err());
        assert!(serde_json::from_str::<NavConfig>("not json").is_err());
    }
}
