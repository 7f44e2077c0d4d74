//! Virtual node tree.
//!
//! Trees are built by view code for a single render and consumed by it.
//!
//! # Example
//!
//! ```ignore
//! let tree = Element::new("div")
//!     .attr("className", "card")
//!     .attr("style", Style::new().set("paddingLeft", "10px"))
//!     .child(Element::new("span").child("hello"))
//!     .child(Node::trusted("<b>raw</b>"))
//!     .into_node();
//! ```

use indexmap::IndexMap;
use std::{fmt, rc::Rc};

// ============================================================================
// Values
// ============================================================================

/// A primitive rendered as escaped text.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Ordered inline style declarations (`property → value`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style(IndexMap<String, String>);

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(property.into(), value.into());
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Style {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// An attribute value.
#[derive(Clone)]
pub enum AttrValue {
    /// Dropped on output.
    Null,
    /// Event handler; dropped on output, there is no server-side event model.
    Handler(Rc<dyn Fn()>),
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Style(Style),
}

impl fmt::Debug for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Handler(_) => f.write_str("Handler(..)"),
            Self::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Self::Int(n) => f.debug_tuple("Int").field(n).finish(),
            Self::Float(n) => f.debug_tuple("Float").field(n).finish(),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Style(s) => f.debug_tuple("Style").field(s).finish(),
        }
    }
}

impl AttrValue {
    /// Wrap an event handler.
    pub fn handler(f: impl Fn() + 'static) -> Self {
        Self::Handler(Rc::new(f))
    }

    /// String form of a scalar value. `None` for dropped or structured values.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Str(s) => Some(s.clone()),
            Self::Int(n) => Some(n.to_string()),
            Self::Float(n) => Some(n.to_string()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Null | Self::Handler(_) | Self::Style(_) => None,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Style> for AttrValue {
    fn from(value: Style) -> Self {
        Self::Style(value)
    }
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Ordered attribute mapping.
pub type Attrs = IndexMap<String, AttrValue>;

// ============================================================================
// Components
// ============================================================================

/// A view component. Each render mounts a fresh handle.
pub trait Component {
    fn mount(&self) -> Box<dyn Mounted>;
}

/// A mounted component handle.
pub trait Mounted {
    fn view(&mut self) -> Node;

    /// Called once the handle's subtree has been fully written.
    fn unmount(&mut self) {}
}

/// A component without state.
pub struct ViewFn<F>(pub F);

impl<F> Component for ViewFn<F>
where
    F: Fn() -> Node + Clone + 'static,
{
    fn mount(&self) -> Box<dyn Mounted> {
        Box::new(ViewFn(self.0.clone()))
    }
}

impl<F> Mounted for ViewFn<F>
where
    F: Fn() -> Node,
{
    fn view(&mut self) -> Node {
        (self.0)()
    }
}

type Unmount<S> = Rc<dyn Fn(&mut S)>;

/// A component with a controller: `init` builds the state for each render,
/// `view` renders it and the optional `unmount` hook sees it last.
pub struct Controlled<S> {
    init: Rc<dyn Fn() -> S>,
    view: Rc<dyn Fn(&mut S) -> Node>,
    unmount: Option<Unmount<S>>,
}

impl<S: 'static> Controlled<S> {
    pub fn new(init: impl Fn() -> S + 'static, view: impl Fn(&mut S) -> Node + 'static) -> Self {
        Self {
            init: Rc::new(init),
            view: Rc::new(view),
            unmount: None,
        }
    }

    pub fn on_unmount(mut self, hook: impl Fn(&mut S) + 'static) -> Self {
        self.unmount = Some(Rc::new(hook));
        self
    }
}

struct ControlledHandle<S> {
    state: S,
    view: Rc<dyn Fn(&mut S) -> Node>,
    unmount: Option<Unmount<S>>,
}

impl<S: 'static> Component for Controlled<S> {
    fn mount(&self) -> Box<dyn Mounted> {
        Box::new(ControlledHandle {
            state: (self.init)(),
            view: Rc::clone(&self.view),
            unmount: self.unmount.clone(),
        })
    }
}

impl<S> Mounted for ControlledHandle<S> {
    fn view(&mut self) -> Node {
        (self.view)(&mut self.state)
    }

    fn unmount(&mut self) {
        if let Some(hook) = &self.unmount {
            hook(&mut self.state);
        }
    }
}

// ============================================================================
// Nodes
// ============================================================================

/// An element with ordered attributes and children.
#[derive(Debug, Clone, Default)]
pub struct Element {
    pub tag: String,
    pub attrs: Attrs,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn into_node(self) -> Node {
        Node::Element(self)
    }
}

/// One value of a render tree.
#[derive(Clone, Default)]
pub enum Node {
    Element(Element),
    Text(Primitive),
    /// Markup emitted verbatim.
    Trusted(String),
    Component(Rc<dyn Component>),
    Fragment(Vec<Node>),
    /// Render nothing, change nothing.
    Retained,
    #[default]
    Absent,
}

impl Node {
    pub fn trusted(markup: impl Into<String>) -> Self {
        Self::Trusted(markup.into())
    }

    pub fn component(component: impl Component + 'static) -> Self {
        Self::Component(Rc::new(component))
    }

    /// Short description used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Element(_) => "element",
            Self::Text(_) => "text",
            Self::Trusted(_) => "trusted markup",
            Self::Component(_) => "component",
            Self::Fragment(_) => "array",
            Self::Retained => "retained marker",
            Self::Absent => "nothing",
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(el) => el.fmt(f),
            Self::Text(p) => f.debug_tuple("Text").field(p).finish(),
            Self::Trusted(s) => f.debug_tuple("Trusted").field(s).finish(),
            Self::Component(_) => f.write_str("Component(..)"),
            Self::Fragment(nodes) => f.debug_tuple("Fragment").field(nodes).finish(),
            Self::Retained => f.write_str("Retained"),
            Self::Absent => f.write_str("Absent"),
        }
    }
}

impl From<Element> for Node {
    fn from(value: Element) -> Self {
        Self::Element(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Self::Text(Primitive::Str(value.to_owned()))
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Self::Text(Primitive::Str(value))
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Self::Text(Primitive::Int(value))
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Self::Text(Primitive::Float(value))
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Self::Text(Primitive::Bool(value))
    }
}

impl From<Vec<Node>> for Node {
    fn from(value: Vec<Node>) -> Self {
        Self::Fragment(value)
    }
}

impl<T: Into<Node>> From<Option<T>> for Node {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}
