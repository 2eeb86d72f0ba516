// src/utils/html/engine.rs

use std::panic;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::fallback::strip_scripts;
use crate::error::AppError;

/// Whether a tree parser can be used for this call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserCapability {
    Tree,
    Unavailable,
}

impl ParserCapability {
    /// The tree parser is available when the crate is built with `dom`.
    pub fn detect() -> Self {
        if cfg!(feature = "dom") {
            ParserCapability::Tree
        } else {
            ParserCapability::Unavailable
        }
    }
}

/// How the returned markup was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SanitizeMode {
    /// Allow-listed tree sanitization.
    Full,
    /// Script stripping only. Tags, attributes and links were not filtered.
    Degraded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sanitized {
    pub html: String,
    pub mode: SanitizeMode,
}

/// Sanitizes untrusted HTML for rendering. Never fails.
pub fn sanitize(raw_html: &str) -> String {
    sanitize_with(raw_html, ParserCapability::detect()).html
}

/// Like [`sanitize`], but reports whether the degraded path was taken.
///
/// Any error or panic on the tree path falls back to [`strip_scripts`]
/// instead of reaching the caller.
pub fn sanitize_with(raw_html: &str, capability: ParserCapability) -> Sanitized {
    if raw_html.is_empty() {
        return Sanitized {
            html: String::new(),
            mode: SanitizeMode::Full,
        };
    }

    if capability == ParserCapability::Unavailable {
        tracing::debug!("No tree parser available, stripping scripts only");
        return degraded(raw_html);
    }

    run_tree_pass(raw_html, tree::sanitize_stable)
}

/// Runs `pass` over `raw_html`, falling back to [`strip_scripts`] if it
/// returns an error or panics.
fn run_tree_pass<F>(raw_html: &str, pass: F) -> Sanitized
where
    F: FnOnce(&str) -> Result<String, AppError> + panic::UnwindSafe,
{
    match panic::catch_unwind(|| pass(raw_html)) {
        Ok(Ok(html)) => Sanitized {
            html,
            mode: SanitizeMode::Full,
        },
        Ok(Err(e)) => {
            tracing::warn!("Tree sanitization failed, falling back: {}", e);
            degraded(raw_html)
        }
        Err(_) => {
            tracing::error!("Tree sanitization panicked, falling back");
            degraded(raw_html)
        }
    }
}

fn degraded(raw_html: &str) -> Sanitized {
    Sanitized {
        html: strip_scripts(raw_html),
        mode: SanitizeMode::Degraded,
    }
}

#[cfg(feature = "dom")]
mod tree {
    use markup5ever_rcdom::Handle;

    use crate::error::AppError;
    use crate::utils::html::dom::{self, Fragment};
    use crate::utils::html::link::normalize_anchor;
    use crate::utils::html::policy::AllowedTag;

    /// Upper bound on parse/sanitize/serialize rounds per call.
    const MAX_PASSES: usize = 4;

    #[derive(Debug, Default)]
    struct WalkStats {
        unwrapped: usize,
        removed: usize,
        anchors: usize,
    }

    /// Sanitizes until re-parsing the output no longer changes it.
    ///
    /// Unwrapping can leave markup the parser restructures on the next read
    /// (a heading directly inside a heading), so a single pass is not always
    /// a fixed point.
    pub fn sanitize_stable(raw_html: &str) -> Result<String, AppError> {
        let mut html = sanitize_once(raw_html)?;
        for _ in 1..MAX_PASSES {
            let next = sanitize_once(&html)?;
            if next == html {
                break;
            }
            html = next;
        }
        Ok(html)
    }

    pub fn sanitize_once(raw_html: &str) -> Result<String, AppError> {
        let fragment = Fragment::parse(raw_html)?;
        let stats = sanitize_tree(fragment.root());
        tracing::debug!(
            "Sanitized fragment: {} unwrapped, {} removed, {} anchors",
            stats.unwrapped,
            stats.removed,
            stats.anchors
        );
        fragment.to_html()
    }

    /// Filters every child list below `root`, one parent at a time.
    ///
    /// Each parent's children are taken out, filtered into a new list and
    /// installed back in a single assignment. Children of an unwrapped
    /// element are spliced into the list being built and filtered in turn,
    /// so the work stays linear in the number of nodes. Kept elements are
    /// queued on an explicit stack since nesting depth comes from the input.
    fn sanitize_tree(root: &Handle) -> WalkStats {
        let mut stats = WalkStats::default();
        let mut parents = vec![root.clone()];

        while let Some(parent) = parents.pop() {
            let kept = filter_children(&parent, &mut parents, &mut stats);
            dom::set_children(&parent, kept);
        }

        stats
    }

    fn filter_children(
        parent: &Handle,
        parents: &mut Vec<Handle>,
        stats: &mut WalkStats,
    ) -> Vec<Handle> {
        // Reversed so siblings pop in document order.
        let mut work = dom::take_children(parent);
        work.reverse();
        let mut kept = Vec::with_capacity(work.len());

        while let Some(node) = work.pop() {
            if dom::is_text(&node) {
                kept.push(node);
                continue;
            }
            if !dom::is_element(&node) {
                stats.removed += 1;
                continue;
            }

            match dom::html_tag_name(&node).and_then(AllowedTag::from_name) {
                None => {
                    let promoted = dom::take_children(&node);
                    work.extend(promoted.into_iter().rev());
                    node.parent.set(None);
                    stats.unwrapped += 1;
                }
                Some(tag) => {
                    dom::retain_attributes(&node, tag.allowed_attributes());
                    if tag == AllowedTag::Anchor {
                        apply_link_policy(&node);
                        stats.anchors += 1;
                    }
                    parents.push(node.clone());
                    kept.push(node);
                }
            }
        }

        kept
    }

    fn apply_link_policy(anchor: &Handle) {
        let href = dom::get_attribute(anchor, "href");
        let normalized = normalize_anchor(href.as_deref());

        match normalized.href {
            Some(href) => {
                // Re-set in this order so output reads href, target, rel.
                dom::set_attribute(anchor, "href", &href);
                if let Some(target) = normalized.target {
                    dom::set_attribute(anchor, "target", target);
                }
                if let Some(rel) = normalized.rel {
                    dom::set_attribute(anchor, "rel", rel);
                }
            }
            None => dom::remove_attribute(anchor, "href"),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn single_pass_applies_policy_to_promoted_children() {
            let html = sanitize_once(
                r#"<div><span onclick="x()"><a href="javascript:x()" title="t">go</a></span></div>"#,
            )
            .unwrap();
            assert_eq!(html, "<a>go</a>");
        }

        #[test]
        fn single_pass_keeps_emptied_allowed_elements() {
            assert_eq!(
                sanitize_once("<p><span></span></p><ul><div></div></ul>").unwrap(),
                "<p></p><ul></ul>"
            );
        }

        #[test]
        fn comments_are_removed() {
            assert_eq!(
                sanitize_once("<p>a<!-- <script>x</script> -->b</p>").unwrap(),
                "<p>ab</p>"
            );
        }

        #[test]
        fn nested_heading_settles_after_reparse() {
            let input = "<h1><div><h2>x</h2></div></h1>";
            assert_eq!(sanitize_once(input).unwrap(), "<h1><h2>x</h2></h1>");
            assert_eq!(sanitize_stable(input).unwrap(), "<h1></h1><h2>x</h2>");
        }

        #[test]
        fn deep_nesting_does_not_recurse() {
            let depth = 5_000;
            let input = format!("{}deep{}", "<span>".repeat(depth), "</span>".repeat(depth));
            assert_eq!(sanitize_once(&input).unwrap(), "deep");
        }

        #[test]
        fn unwrapped_siblings_keep_document_order() {
            let input = "<div>a<span>b</span>c</div>";
            assert_eq!(sanitize_once(input).unwrap(), "abc");
            assert_eq!(sanitize_stable(input).unwrap(), "abc");
        }
    }
}

#[cfg(not(feature = "dom"))]
mod tree {
    use crate::error::AppError;

    pub fn sanitize_stable(_raw_html: &str) -> Result<String, AppError> {
        Err(AppError::InternalServerError(
            "built without the `dom` feature".to_string(),
        ))
    }
}
