// src/utils/html/policy.rs

/// Attributes an anchor may keep. Every other allowed tag keeps none.
const ANCHOR_ATTRIBUTES: &[&str] = &["href", "target", "rel"];

/// Element tags that may appear in sanitized output.
///
/// The list is fixed at compile time; callers cannot widen it per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AllowedTag {
    Paragraph,
    LineBreak,
    Bold,
    Italic,
    Underline,
    UnorderedList,
    OrderedList,
    ListItem,
    Anchor,
    Heading1,
    Heading2,
    Heading3,
    Blockquote,
    InlineCode,
    CodeBlock,
}

impl AllowedTag {
    pub const ALL: [AllowedTag; 15] = [
        AllowedTag::Paragraph,
        AllowedTag::LineBreak,
        AllowedTag::Bold,
        AllowedTag::Italic,
        AllowedTag::Underline,
        AllowedTag::UnorderedList,
        AllowedTag::OrderedList,
        AllowedTag::ListItem,
        AllowedTag::Anchor,
        AllowedTag::Heading1,
        AllowedTag::Heading2,
        AllowedTag::Heading3,
        AllowedTag::Blockquote,
        AllowedTag::InlineCode,
        AllowedTag::CodeBlock,
    ];

    /// Lower-case HTML tag name.
    pub fn name(self) -> &'static str {
        match self {
            AllowedTag::Paragraph => "p",
            AllowedTag::LineBreak => "br",
            AllowedTag::Bold => "b",
            AllowedTag::Italic => "i",
            AllowedTag::Underline => "u",
            AllowedTag::UnorderedList => "ul",
            AllowedTag::OrderedList => "ol",
            AllowedTag::ListItem => "li",
            AllowedTag::Anchor => "a",
            AllowedTag::Heading1 => "h1",
            AllowedTag::Heading2 => "h2",
            AllowedTag::Heading3 => "h3",
            AllowedTag::Blockquote => "blockquote",
            AllowedTag::InlineCode => "code",
            AllowedTag::CodeBlock => "pre",
        }
    }

    /// Case-insensitive lookup of a tag name.
    pub fn from_name(tag: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|allowed| allowed.name().eq_ignore_ascii_case(tag))
    }

    pub fn allowed_attributes(self) -> &'static [&'static str] {
        match self {
            AllowedTag::Anchor => ANCHOR_ATTRIBUTES,
            _ => &[],
        }
    }
}

pub fn is_allowed_tag(tag: &str) -> bool {
    AllowedTag::from_name(tag).is_some()
}

/// Attribute names `tag` may keep. Unknown tags get the empty set.
pub fn allowed_attributes(tag: &str) -> &'static [&'static str] {
    AllowedTag::from_name(tag)
        .map(AllowedTag::allowed_attributes)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_rich_text_tags() {
        for tag in ["p", "br", "b", "i", "u", "ul", "ol", "li", "a", "h1", "h2", "h3"] {
            assert!(is_allowed_tag(tag), "{tag} should be allowed");
        }
        assert!(is_allowed_tag("blockquote"));
        assert!(is_allowed_tag("code"));
        assert!(is_allowed_tag("pre"));
    }

    #[test]
    fn rejects_everything_else() {
        for tag in ["script", "style", "span", "div", "img", "iframe", "h4", "svg", ""] {
            assert!(!is_allowed_tag(tag), "{tag} should be rejected");
        }
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(AllowedTag::from_name("BLOCKQUOTE"), Some(AllowedTag::Blockquote));
        assert!(is_allowed_tag("H1"));
    }

    #[test]
    fn only_anchor_keeps_attributes() {
        assert_eq!(allowed_attributes("a"), &["href", "target", "rel"]);
        for tag in AllowedTag::ALL.iter().filter(|t| **t != AllowedTag::Anchor) {
            assert!(tag.allowed_attributes().is_empty());
        }
        assert!(allowed_attributes("span").is_empty());
    }

    #[test]
    fn names_round_trip() {
        for tag in AllowedTag::ALL {
            assert_eq!(AllowedTag::from_name(tag.name()), Some(tag));
        }
    }
}
