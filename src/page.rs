//! Page registry.
//!
//! Maps output names to view components and renders them to documents. While
//! any page's stream is alive the shared [`StaticFlag`] is set, so script code
//! can skip live-interaction wiring during static capture.

use crate::{
    log,
    render::{self, Component, Node, RenderError, RenderStream},
};
use indexmap::IndexMap;
use std::{
    rc::Rc,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

/// Shared "currently rendering to static output" flag.
///
/// Counts live render streams; set while at least one is open.
#[derive(Debug, Clone, Default)]
pub struct StaticFlag(Arc<AtomicUsize>);

impl StaticFlag {
    pub fn get(&self) -> bool {
        self.0.load(Ordering::Acquire) > 0
    }

    pub(crate) fn enter(&self) {
        self.0.fetch_add(1, Ordering::AcqRel);
    }

    pub(crate) fn leave(&self) {
        let _ = self
            .0
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |live| live.checked_sub(1));
    }
}

type Wrapper = Box<dyn Fn(&str, Rc<dyn Component>) -> Node>;

/// Registered pages plus an optional layout wrapper.
#[derive(Default)]
pub struct PageRegistry {
    pages: IndexMap<String, Rc<dyn Component>>,
    wrapper: Option<Wrapper>,
    rendering: StaticFlag,
}

impl PageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a page. A later registration under the same name replaces it
    /// in place.
    pub fn add(&mut self, name: impl Into<String>, component: impl Component + 'static) {
        self.pages.insert(name.into(), Rc::new(component));
    }

    pub fn get(&self, name: &str) -> Option<Rc<dyn Component>> {
        self.pages.get(name).cloned()
    }

    /// Page names in registration order.
    pub fn list(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }

    /// Install a transform applied to `(name, component)` before rendering.
    pub fn wrapper(&mut self, wrap: impl Fn(&str, Rc<dyn Component>) -> Node + 'static) {
        self.wrapper = Some(Box::new(wrap));
    }

    /// Render a page. The static flag stays set until this stream, and every
    /// other stream still open, drains, fails or is dropped.
    pub fn render(&self, name: &str) -> Result<RenderStream, RenderError> {
        let component = self
            .get(name)
            .ok_or_else(|| RenderError::UnknownPage(name.to_owned()))?;

        log!("page"; "rendering {name}");
        self.rendering.enter();

        let tree = match &self.wrapper {
            Some(wrap) => wrap(name, component),
            None => Node::Component(component),
        };

        let flag = self.rendering.clone();
        Ok(render::render(tree).on_finish(move || flag.leave()))
    }

    pub fn rendering_to_static(&self) -> bool {
        self.rendering.get()
    }

    /// Handle for collaborators that need to observe the flag.
    pub fn static_flag(&self) -> StaticFlag {
        self.rendering.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Element, ViewFn};
    use std::{cell::Cell, io::Read};

    fn page(text: &'static str) -> ViewFn<impl Fn() -> Node + Clone + 'static> {
        ViewFn(move || Element::new("p").child(text).into_node())
    }

    #[test]
    fn test_add_and_list() {
        let mut registry = PageRegistry::new();
        registry.add("index.html", page("a"));
        registry.add("about.html", page("b"));
        registry.add("index.html", page("c"));

        assert_eq!(registry.list().collect::<Vec<_>>(), ["index.html", "about.html"]);
        assert!(registry.get("about.html").is_some());
        assert!(registry.get("missing.html").is_none());

        let html = registry.render("index.html").unwrap().into_string().unwrap();
        assert_eq!(html, "<!DOCTYPE html><p>c</p>");
    }

    #[test]
    fn test_unknown_page() {
        let registry = PageRegistry::new();
        let err = registry.render("nope.html").err().unwrap();
        assert!(matches!(err, RenderError::UnknownPage(ref name) if name == "nope.html"));
        assert!(!registry.rendering_to_static());
    }

    #[test]
    fn test_wrapper_applies_layout() {
        let mut registry = PageRegistry::new();
        registry.add("index.html", page("body"));
        registry.wrapper(|name, component| {
            Element::new("main")
                .attr("data-page", name)
                .child(Node::Component(component))
                .into_node()
        });

        let html = registry.render("index.html").unwrap().into_string().unwrap();
        assert_eq!(
            html,
            r#"<!DOCTYPE html><main data-page="index.html"><p>body</p></main>"#
        );
    }

    #[test]
    fn test_flag_set_while_streaming() {
        let mut registry = PageRegistry::new();
        let flag = registry.static_flag();
        let seen = Rc::new(Cell::new(false));

        let observed = Rc::clone(&seen);
        let handle = flag.clone();
        registry.add(
            "index.html",
            ViewFn(move || {
                observed.set(handle.get());
                Element::new("p").into_node()
            }),
        );

        assert!(!registry.rendering_to_static());
        let mut stream = registry.render("index.html").unwrap();
        assert!(flag.get());

        let mut out = String::new();
        stream.read_to_string(&mut out).unwrap();
        assert!(seen.get());
        assert!(!flag.get());
        assert!(!registry.rendering_to_static());
    }

    #[test]
    fn test_flag_cleared_after_failure() {
        let mut registry = PageRegistry::new();
        registry.add("bad.html", ViewFn(|| Node::from("not an element")));

        let stream = registry.render("bad.html").unwrap();
        assert!(registry.rendering_to_static());
        assert!(stream.into_string().is_err());
        assert!(!registry.rendering_to_static());
    }

    #[test]
    fn test_flag_cleared_when_dropped() {
        let mut registry = PageRegistry::new();
        registry.add("index.html", page("x"));

        let stream = registry.render("index.html").unwrap();
        assert!(registry.rendering_to_static());
        drop(stream);
        assert!(!registry.rendering_to_static());
    }

    #[test]
    fn test_flag_counts_overlapping_renders() {
        let mut registry = PageRegistry::new();
        registry.add("a.html", page("a"));
        registry.add("b.html", page("b"));

        let first = registry.render("a.html").unwrap();
        let second = registry.render("b.html").unwrap();

        assert_eq!(first.into_string().unwrap(), "<!DOCTYPE html><p>a</p>");
        assert!(registry.rendering_to_static());

        drop(second);
        assert!(!registry.rendering_to_static());

        let flag = registry.static_flag();
        flag.leave();
        assert!(!flag.get());
        let _third = registry.render("a.html").unwrap();
        assert!(flag.get());
    }
}
