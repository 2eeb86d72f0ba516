// src/utils/html/link.rs

/// Schemes an anchor may navigate to. Compared as literal prefixes.
const SAFE_SCHEMES: &[&str] = &["https://", "http://", "mailto:"];

pub const LINK_TARGET: &str = "_blank";
pub const LINK_REL: &str = "noreferrer noopener";

/// Navigation attributes an anchor ends up with.
///
/// `target`/`rel` are `None` when the anchor has no safe destination; the
/// engine then leaves whatever the attribute filter kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorAttributes {
    pub href: Option<String>,
    pub target: Option<&'static str>,
    pub rel: Option<&'static str>,
}

/// Returns true if `href` starts with one of the safe schemes.
///
/// Trimming and lower-casing only apply to the comparison.
pub fn is_safe_href(href: &str) -> bool {
    let candidate = href.trim().to_ascii_lowercase();
    SAFE_SCHEMES
        .iter()
        .any(|scheme| candidate.starts_with(scheme))
}

/// Decides the `href`, `target` and `rel` of an anchor.
pub fn normalize_anchor(href: Option<&str>) -> AnchorAttributes {
    match href {
        Some(href) if is_safe_href(href) => AnchorAttributes {
            href: Some(href.to_string()),
            target: Some(LINK_TARGET),
            rel: Some(LINK_REL),
        },
        _ => AnchorAttributes {
            href: None,
            target: None,
            rel: None,
        },
    }
}
