//! Markup namespaces a subtree is rendered in.

use super::node::{AttrValue, Attrs};

pub const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";
pub const MATHML_NS: &str = "http://www.w3.org/1998/Math/MathML";
const XHTML_MIME: &str = "application/xhtml+xml";

/// Void elements: never take children or a closing tag.
const VOID: &[&str] = &[
    "!doctype", "area", "base", "br", "col", "command", "embed", "hr", "img", "input", "keygen",
    "link", "meta", "param", "source", "track", "wbr",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Namespace {
    #[default]
    Html,
    Xhtml,
    Svg,
    MathMl,
}

impl Namespace {
    /// Namespace of an element's own tag and its children.
    pub fn enter(self, tag: &str, attrs: &Attrs) -> Self {
        let attr_is = |name: &str, expected: &str| {
            matches!(attrs.get(name), Some(AttrValue::Str(v)) if v == expected)
        };

        match self {
            Self::Html | Self::Xhtml => match tag {
                "svg" => Self::Svg,
                "math" => Self::MathMl,
                _ => self,
            },
            Self::Svg if tag == "foreignObject" => {
                if attr_is("requiredExtensions", XHTML_NS) {
                    Self::Xhtml
                } else if attr_is("requiredExtensions", MATHML_NS) {
                    Self::MathMl
                } else {
                    self
                }
            }
            Self::MathMl if tag == "annotation-xml" && attr_is("encoding", XHTML_MIME) => {
                Self::Xhtml
            }
            _ => self,
        }
    }

    /// XML contexts are case-sensitive.
    pub const fn is_html(self) -> bool {
        matches!(self, Self::Html)
    }

    /// Childless non-void elements collapse to `<tag/>`.
    pub const fn self_closes(self) -> bool {
        matches!(self, Self::Svg | Self::MathMl)
    }

    /// Closing text of a void element, if `tag` is void here.
    pub fn void_end(self, tag: &str) -> Option<&'static str> {
        if !VOID.contains(&tag) {
            return None;
        }
        match self {
            Self::Html => Some(">"),
            Self::Xhtml => Some("/>"),
            Self::Svg | Self::MathMl => None,
        }
    }
}
