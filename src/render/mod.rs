//! HTML rendering.
//!
//! Serializes a [`Node`] tree into an HTML document, lazily. The caller pulls
//! bytes through [`std::io::Read`] (or drains everything with
//! [`RenderStream::into_string`]); each pull advances the traversal only until
//! some output is ready.
//!
//! # Output
//!
//! ```text
//! render(div > "x")                  → <!DOCTYPE html><div>x</div>
//! render(div[contenteditable=""])    → <!DOCTYPE html><div contenteditable></div>
//! render(svg > use[href=x])          → <!DOCTYPE html><svg><use xlink:href="x"/></svg>
//! render(nothing)                    → <!DOCTYPE html>
//! ```
//!
//! Every document starts with exactly one `<!DOCTYPE html>`, whether asked
//! for with a `!doctype` element, triggered by the first output, or appended
//! as a fallback when the tree produced nothing.

mod error;
mod escape;
mod namespace;
mod node;

pub use error::RenderError;
pub use namespace::{MATHML_NS, Namespace, XHTML_NS};
pub use node::{
    AttrValue, Attrs, Component, Controlled, Element, Mounted, Node, Primitive, Style, ViewFn,
};

use std::io;

const DOCTYPE: &str = "<!DOCTYPE html>";

/// Render a tree into a lazily produced document.
pub fn render(tree: impl Into<Node>) -> RenderStream {
    RenderStream::new(tree.into())
}

// ============================================================================
// Stream
// ============================================================================

/// Pending traversal work, innermost last.
enum Frame {
    Visit(Node, Namespace),
    /// End of an element opened in the given namespace.
    Close { tag: String, ns: Namespace },
    /// Runs once the component's subtree has been written.
    Unmount(Box<dyn Mounted>),
}

/// A pull-based HTML byte stream. Not restartable.
pub struct RenderStream {
    stack: Vec<Frame>,
    out: String,
    pos: usize,
    /// `<!DOCTYPE html>` has been written.
    doctype: bool,
    /// A start tag is written up to its attributes and still lacks `>`.
    open_start: bool,
    done: bool,
    on_finish: Option<Box<dyn FnOnce()>>,
}

impl RenderStream {
    fn new(tree: Node) -> Self {
        Self {
            stack: vec![Frame::Visit(tree, Namespace::Html)],
            out: String::new(),
            pos: 0,
            doctype: false,
            open_start: false,
            done: false,
            on_finish: None,
        }
    }

    /// Run `hook` exactly once, when the stream drains, fails or is dropped.
    pub fn on_finish(mut self, hook: impl FnOnce() + 'static) -> Self {
        self.on_finish = Some(Box::new(hook));
        self
    }

    pub const fn is_finished(&self) -> bool {
        self.done
    }

    /// Drain the rest of the document.
    pub fn into_bytes(mut self) -> Result<Vec<u8>, RenderError> {
        let mut bytes = Vec::new();
        while self.fill()? {
            bytes.extend_from_slice(&self.out.as_bytes()[self.pos..]);
            self.pos = self.out.len();
        }
        Ok(bytes)
    }

    /// Drain the rest of the document as text.
    pub fn into_string(self) -> Result<String, RenderError> {
        let bytes = self.into_bytes()?;
        Ok(String::from_utf8(bytes)
            .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned()))
    }

    /// Advance until unread output exists. `false` once the stream has ended.
    fn fill(&mut self) -> Result<bool, RenderError> {
        while self.pos >= self.out.len() {
            if self.done {
                return Ok(false);
            }
            self.out.clear();
            self.pos = 0;
            if let Err(err) = self.step() {
                self.out.clear();
                self.stack.clear();
                self.finish();
                return Err(err);
            }
        }
        Ok(true)
    }

    fn step(&mut self) -> Result<(), RenderError> {
        match self.stack.pop() {
            Some(Frame::Visit(node, ns)) => self.visit(node, ns)?,
            Some(Frame::Close { tag, ns }) => self.close(&tag, ns),
            Some(Frame::Unmount(mut handle)) => handle.unmount(),
            None => {
                self.preamble();
                self.finish();
            }
        }
        Ok(())
    }

    fn finish(&mut self) {
        self.done = true;
        if let Some(hook) = self.on_finish.take() {
            hook();
        }
    }

    // ========================================================================
    // Nodes
    // ========================================================================

    fn visit(&mut self, node: Node, ns: Namespace) -> Result<(), RenderError> {
        match node {
            Node::Absent | Node::Retained => {}
            Node::Text(value) => {
                let value = value.to_string();
                self.content(&escape::text(&value));
            }
            Node::Trusted(markup) => self.content(&markup),
            Node::Fragment(children) => self.schedule(children, ns),
            Node::Component(component) => self.mount(component.as_ref(), ns)?,
            Node::Element(el) => self.element(el, ns)?,
        }
        Ok(())
    }

    fn schedule(&mut self, children: Vec<Node>, ns: Namespace) {
        self.stack
            .extend(children.into_iter().rev().map(|child| Frame::Visit(child, ns)));
    }

    fn mount(&mut self, component: &dyn Component, ns: Namespace) -> Result<(), RenderError> {
        let mut handle = component.mount();
        let view = handle.view();

        if !matches!(view, Node::Element(_) | Node::Component(_) | Node::Retained) {
            return Err(RenderError::invalid(format!(
                "component view must return an element, not {}",
                view.kind()
            )));
        }

        self.stack.push(Frame::Unmount(handle));
        self.stack.push(Frame::Visit(view, ns));
        Ok(())
    }

    fn element(&mut self, el: Element, ns: Namespace) -> Result<(), RenderError> {
        let Element {
            tag,
            attrs,
            children,
        } = el;

        let tag = if ns.is_html() { tag.to_lowercase() } else { tag };
        if tag == "!doctype" {
            self.preamble();
            return Ok(());
        }
        if !escape::is_valid_name(&tag) {
            return Err(RenderError::invalid(format!("invalid tag name `{tag}`")));
        }
        if let Some(name) = attrs.keys().find(|name| !escape::is_valid_name(name)) {
            return Err(RenderError::invalid(format!(
                "invalid attribute name `{name}` on <{tag}>"
            )));
        }

        let ns = ns.enter(&tag, &attrs);

        self.preamble();
        self.flush_start();
        self.out.push('<');
        self.out.push_str(&tag);
        self.attrs(&tag, ns, &attrs);

        if let Some(end) = ns.void_end(&tag) {
            self.out.push_str(end);
            return Ok(());
        }

        self.open_start = true;
        self.stack.push(Frame::Close { tag, ns });
        self.schedule(children, ns);
        Ok(())
    }

    fn close(&mut self, tag: &str, ns: Namespace) {
        if std::mem::take(&mut self.open_start) {
            if ns.self_closes() {
                self.out.push_str("/>");
                return;
            }
            self.out.push('>');
        }
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push('>');
    }

    fn attrs(&mut self, tag: &str, ns: Namespace, attrs: &Attrs) {
        for (key, value) in attrs {
            let text = match value {
                AttrValue::Style(style) => style_declarations(style),
                value => value.as_text(),
            };
            let Some(text) = text else { continue };

            let name = if ns == Namespace::Svg && tag == "use" && key == "href" {
                "xlink:href"
            } else if key == "className" {
                "class"
            } else {
                key.as_str()
            };

            self.out.push(' ');
            self.out.push_str(name);
            if !text.is_empty() {
                self.out.push_str("=\"");
                self.out.push_str(&escape::attr(&text));
                self.out.push('"');
            }
        }
    }

    // ========================================================================
    // Output
    // ========================================================================

    /// Text or trusted markup inside the current element.
    fn content(&mut self, s: &str) {
        self.preamble();
        if !s.is_empty() {
            self.flush_start();
            self.out.push_str(s);
        }
    }

    fn preamble(&mut self) {
        if !std::mem::replace(&mut self.doctype, true) {
            self.out.push_str(DOCTYPE);
        }
    }

    fn flush_start(&mut self) {
        if std::mem::take(&mut self.open_start) {
            self.out.push('>');
        }
    }
}

/// `prop-a:val;prop-b:val`, skipping empty values. `None` if nothing remains.
fn style_declarations(style: &Style) -> Option<String> {
    let declarations: Vec<String> = style
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(property, value)| format!("{}:{value}", escape::camel_to_dash(property)))
        .collect();

    (!declarations.is_empty()).then(|| declarations.join(";"))
}

impl io::Read for RenderStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() || !self.fill().map_err(io::Error::other)? {
            return Ok(0);
        }

        let available = &self.out.as_bytes()[self.pos..];
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.pos += n;
        Ok(n)
    }
}

impl Drop for RenderStream {
    fn drop(&mut self) {
        if let Some(hook) = self.on_finish.take() {
            hook();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, io::Read, rc::Rc};

    fn generate(tree: impl Into<Node>) -> String {
        render(tree).into_string().unwrap()
    }

    fn el(tag: &str) -> Element {
        Element::new(tag)
    }

    // ========================================================================
    // Basic
    // ========================================================================

    #[test]
    fn test_renders_nothing() {
        assert_eq!(generate(Node::Absent), "<!DOCTYPE html>");
        assert_eq!(generate(Node::Retained), "<!DOCTYPE html>");
        assert_eq!(generate(Vec::<Node>::new()), "<!DOCTYPE html>");
    }

    #[test]
    fn test_renders_tag() {
        assert_eq!(
            generate(el("span").child("content")),
            "<!DOCTYPE html><span>content</span>"
        );
        assert_eq!(generate(el("div").child("x")), "<!DOCTYPE html><div>x</div>");
    }

    #[test]
    fn test_renders_class_name() {
        assert_eq!(
            generate(el("div").attr("className", "foo").child("content")),
            r#"<!DOCTYPE html><div class="foo">content</div>"#
        );
    }

    #[test]
    fn test_renders_void_elements() {
        assert_eq!(generate(el("br")), "<!DOCTYPE html><br>");
        assert_eq!(generate(el("HR")), "<!DOCTYPE html><hr>");
        assert_eq!(
            generate(el("img").attr("src", "a.png").child("ignored")),
            r#"<!DOCTYPE html><img src="a.png">"#
        );
    }

    #[test]
    fn test_renders_doctype_once() {
        assert_eq!(generate(el("!doctype")), "<!DOCTYPE html>");
        assert_eq!(generate(el("!DOCTYPE").child("html")), "<!DOCTYPE html>");
        assert_eq!(
            generate(vec![
                el("!doctype").into_node(),
                el("!doctype").into_node(),
                el("p").into_node(),
            ]),
            "<!DOCTYPE html><p></p>"
        );
        assert_eq!(
            generate(vec![el("p").into_node(), el("!doctype").into_node()]),
            "<!DOCTYPE html><p></p>"
        );
    }

    #[test]
    fn test_text_at_top_level_follows_doctype() {
        assert_eq!(generate("hi"), "<!DOCTYPE html>hi");
        assert_eq!(generate(""), "<!DOCTYPE html>");
    }

    #[test]
    fn test_renders_attributes_in_order() {
        assert_eq!(
            generate(el("span").attr("data-foo", "bar").attr("selected", "selected")),
            r#"<!DOCTYPE html><span data-foo="bar" selected="selected"></span>"#
        );
    }

    #[test]
    fn test_renders_arrays_and_children() {
        assert_eq!(
            generate(vec![
                el("span").child("foo").into_node(),
                el("div").child("bar").into_node(),
            ]),
            "<!DOCTYPE html><span>foo</span><div>bar</div>"
        );
        assert_eq!(
            generate(el("span").child(el("div"))),
            "<!DOCTYPE html><span><div></div></span>"
        );
    }

    #[test]
    fn test_renders_primitives_as_text() {
        assert_eq!(
            generate(el("div").child(1i64).child(el("span")).child("2")),
            "<!DOCTYPE html><div>1<span></span>2</div>"
        );
        assert_eq!(generate(el("div").child(0i64)), "<!DOCTYPE html><div>0</div>");
        assert_eq!(
            generate(el("div").child(false)),
            "<!DOCTYPE html><div>false</div>"
        );
    }

    #[test]
    fn test_empty_children_keep_element_empty() {
        assert_eq!(
            generate(el("div").child("").child(Node::Absent).child(Node::trusted(""))),
            "<!DOCTYPE html><div></div>"
        );
    }

    // ========================================================================
    // Attributes
    // ========================================================================

    #[test]
    fn test_drops_handlers_and_nulls() {
        assert_eq!(
            generate(el("span").attr("onmousemove", AttrValue::handler(|| {}))),
            "<!DOCTYPE html><span></span>"
        );
        assert_eq!(
            generate(el("div").attr("style", AttrValue::Null)),
            "<!DOCTYPE html><div></div>"
        );
    }

    #[test]
    fn test_renders_booleans_literally() {
        assert_eq!(
            generate(el("div").attr("a", true)),
            r#"<!DOCTYPE html><div a="true"></div>"#
        );
        assert_eq!(
            generate(el("div").attr("a", false)),
            r#"<!DOCTYPE html><div a="false"></div>"#
        );
    }

    #[test]
    fn test_renders_bare_attribute() {
        assert_eq!(
            generate(el("div").attr("contenteditable", "")),
            "<!DOCTYPE html><div contenteditable></div>"
        );
    }

    #[test]
    fn test_renders_style() {
        assert_eq!(
            generate(el("div").attr("style", "height: 20px; width: 10px")),
            r#"<!DOCTYPE html><div style="height: 20px; width: 10px"></div>"#
        );
        assert_eq!(
            generate(el("span").attr("style", Style::new().set("paddingLeft", "10px").set("color", "red"))),
            r#"<!DOCTYPE html><span style="padding-left:10px;color:red"></span>"#
        );
        assert_eq!(
            generate(el("div").attr("style", Style::new().set("color", ""))),
            "<!DOCTYPE html><div></div>"
        );
        assert_eq!(
            generate(el("div").attr("style", Style::new().set("height", "20px").set("color", ""))),
            r#"<!DOCTYPE html><div style="height:20px"></div>"#
        );
        assert_eq!(
            generate(el("div").attr(
                "style",
                Style::from_iter([("height", "20px"), ("color", ""), ("width", "10px")])
            )),
            r#"<!DOCTYPE html><div style="height:20px;width:10px"></div>"#
        );
    }

    #[test]
    fn test_escapes_style_values() {
        assert_eq!(
            generate(el("div").attr("style", Style::new().set("fontFamily", r#""A" & B"#))),
            r#"<!DOCTYPE html><div style="font-family:&#34;A&#34; &amp; B"></div>"#
        );
    }

    #[test]
    fn test_escaping() {
        assert_eq!(
            generate(el("div").child(Node::trusted("<foo></foo>"))),
            "<!DOCTYPE html><div><foo></foo></div>"
        );
        assert_eq!(
            generate(el("div").child("<foo></foo>")),
            "<!DOCTYPE html><div>&lt;foo&gt;&lt;/foo&gt;</div>"
        );
        assert_eq!(
            generate(el("div").attr("style", r#""></div><div a=""#)),
            r#"<!DOCTYPE html><div style="&#34;&gt;&lt;/div&gt;&lt;div a=&#34;"></div>"#
        );
        assert_eq!(
            generate(el("pre").child(r#"var = {"foo":1}"#)),
            r#"<!DOCTYPE html><pre>var = {"foo":1}</pre>"#
        );
    }

    // ========================================================================
    // Namespaces
    // ========================================================================

    #[test]
    fn test_use_href_in_svg() {
        assert_eq!(
            generate(el("svg").child(el("use").attr("href", "fooga.com"))),
            r#"<!DOCTYPE html><svg><use xlink:href="fooga.com"/></svg>"#
        );
        assert_eq!(
            generate(el("div").child(el("use").attr("href", "fooga.com"))),
            r#"<!DOCTYPE html><div><use href="fooga.com"></use></div>"#
        );
    }

    #[test]
    fn test_svg_is_case_sensitive_and_self_closing() {
        assert_eq!(
            generate(el("SVG").child(el("linearGradient")).child(el("br"))),
            "<!DOCTYPE html><svg><linearGradient/><br/></svg>"
        );
        assert_eq!(generate(el("svg")), "<!DOCTYPE html><svg/>");
        assert_eq!(generate(el("math").child(el("mi"))), "<!DOCTYPE html><math><mi/></math>");
    }

    #[test]
    fn test_foreign_object_switches_to_xhtml() {
        let tree = el("svg").child(
            el("foreignObject")
                .attr("requiredExtensions", XHTML_NS)
                .child(el("DIV").child(el("br")))
                .child(el("p")),
        );
        assert_eq!(
            generate(tree),
            format!(
                r#"<!DOCTYPE html><svg><foreignObject requiredExtensions="{XHTML_NS}"><DIV><br/></DIV><p></p></foreignObject></svg>"#
            )
        );
    }

    #[test]
    fn test_doctype_case_sensitive_outside_html() {
        assert_eq!(generate(el("!DocType")), "<!DOCTYPE html>");

        let tree = el("svg").child(
            el("foreignObject")
                .attr("requiredExtensions", XHTML_NS)
                .child(el("!DOCTYPE"))
                .child(el("!doctype")),
        );
        assert_eq!(
            generate(tree),
            format!(
                r#"<!DOCTYPE html><svg><foreignObject requiredExtensions="{XHTML_NS}"><!DOCTYPE></!DOCTYPE></foreignObject></svg>"#
            )
        );
    }

    #[test]
    fn test_namespace_restored_for_siblings() {
        let tree = el("div")
            .child(el("svg").child(el("g")))
            .child(el("Span"))
            .child(el("use").attr("href", "x"));
        assert_eq!(
            generate(tree),
            r#"<!DOCTYPE html><div><svg><g/></svg><span></span><use href="x"></use></div>"#
        );
    }

    #[test]
    fn test_annotation_xml_switches_to_xhtml() {
        let tree = el("math").child(
            el("annotation-xml")
                .attr("encoding", "application/xhtml+xml")
                .child(el("hr")),
        );
        assert_eq!(
            generate(tree),
            r#"<!DOCTYPE html><math><annotation-xml encoding="application/xhtml+xml"><hr/></annotation-xml></math>"#
        );
    }

    // ========================================================================
    // Components
    // ========================================================================

    #[test]
    fn test_renders_component_view() {
        let component = ViewFn(|| el("div").child("hello").child("bar").into_node());
        assert_eq!(
            generate(el("div").child(Node::component(component))),
            "<!DOCTYPE html><div><div>hellobar</div></div>"
        );
    }

    #[test]
    fn test_controller_state_reaches_view() {
        let component = Controlled::new(|| "bar".to_owned(), |foo: &mut String| {
            el("span").child(foo.clone()).into_node()
        });
        assert_eq!(
            generate(el("div").child(Node::component(component))),
            "<!DOCTYPE html><div><span>bar</span></div>"
        );
    }

    #[test]
    fn test_unmount_after_subtree() {
        let log = Rc::new(RefCell::new(Vec::new()));

        let inner_log = Rc::clone(&log);
        let inner = Controlled::new(
            move || Rc::clone(&inner_log),
            |log: &mut Rc<RefCell<Vec<String>>>| {
                log.borrow_mut().push("inner view".into());
                el("i").child("x").into_node()
            },
        )
        .on_unmount(|log| log.borrow_mut().push("inner unmount".into()));

        let outer_log = Rc::clone(&log);
        let inner = Rc::new(inner);
        let outer = Controlled::new(
            move || Rc::clone(&outer_log),
            move |log: &mut Rc<RefCell<Vec<String>>>| {
                log.borrow_mut().push("outer view".into());
                el("b").child(Node::Component(inner.clone())).into_node()
            },
        )
        .on_unmount(|log| log.borrow_mut().push("outer unmount".into()));

        let mut stream = render(el("span").child(Node::component(outer)));
        let mut out = Vec::new();
        let mut buf = [0u8; 1];
        loop {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            out.push(buf[0]);
            if out.ends_with(b"</i>") {
                assert!(!log.borrow().contains(&"inner unmount".to_string()));
            }
        }

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "<!DOCTYPE html><span><b><i>x</i></b></span>"
        );
        assert_eq!(
            *log.borrow(),
            ["outer view", "inner view", "inner unmount", "outer unmount"]
        );
    }

    #[test]
    fn test_invalid_view_fails_stream() {
        let finished = Rc::new(RefCell::new(0));
        let seen = Rc::clone(&finished);
        let component = ViewFn(|| Node::from("text"));

        let mut stream = render(el("div").child(Node::component(component)))
            .on_finish(move || *seen.borrow_mut() += 1);

        let mut out = Vec::new();
        let err = stream.read_to_end(&mut out).unwrap_err();
        assert!(err.to_string().contains("component view must return an element"));
        assert_eq!(*finished.borrow(), 1);

        let mut buf = [0u8; 8];
        assert_eq!(stream.read(&mut buf).unwrap(), 0);
        drop(stream);
        assert_eq!(*finished.borrow(), 1);
    }

    #[test]
    fn test_invalid_names() {
        assert!(matches!(
            render(el("")).into_string(),
            Err(RenderError::InvalidNode(_))
        ));
        assert!(matches!(
            render(el("a b")).into_string(),
            Err(RenderError::InvalidNode(_))
        ));
        assert!(matches!(
            render(el("div").attr("on=x", "1")).into_string(),
            Err(RenderError::InvalidNode(_))
        ));
    }

    #[test]
    fn test_retained_view_renders_nothing() {
        let component = ViewFn(|| Node::Retained);
        assert_eq!(
            generate(el("p").child(Node::component(component))),
            "<!DOCTYPE html><p></p>"
        );
    }

    // ========================================================================
    // Stream
    // ========================================================================

    fn page() -> Node {
        let button = |kind: &str, text: &str, route: &str| {
            el("button")
                .attr("onclick", format!("m.route(\"{route}\")"))
                .attr("className", format!("route-button btn btn-{kind} navbar-btn"))
                .child(el("span").attr("className", "button-text").child(text.to_owned()))
        };

        vec![
            el("!doctype").into_node(),
            el("head")
                .child(el("link").attr("rel", "stylesheet").attr("href", "style.css"))
                .child(el("script").attr("src", "bundle.js"))
                .into_node(),
            el("body")
                .child(
                    el("nav")
                        .child(button("success", "Add", "/edit"))
                        .child(button("info", "Help ✓", "/help")),
                )
                .child(el("img").attr("src", "/images/placeholder.svg"))
                .into_node(),
        ]
        .into()
    }

    #[test]
    fn test_renders_page() {
        let expected = [
            "<!DOCTYPE html>",
            "<head>",
            r#"<link rel="stylesheet" href="style.css">"#,
            r#"<script src="bundle.js"></script>"#,
            "</head>",
            "<body>",
            "<nav>",
            r#"<button onclick="m.route(&#34;/edit&#34;)" class="route-button btn btn-success navbar-btn">"#,
            r#"<span class="button-text">Add</span>"#,
            "</button>",
            r#"<button onclick="m.route(&#34;/help&#34;)" class="route-button btn btn-info navbar-btn">"#,
            r#"<span class="button-text">Help ✓</span>"#,
            "</button>",
            "</nav>",
            r#"<img src="/images/placeholder.svg">"#,
            "</body>",
        ]
        .concat();

        assert_eq!(generate(page()), expected);
    }

    #[test]
    fn test_deterministic_and_chunk_independent() {
        let whole = render(page()).into_bytes().unwrap();
        assert_eq!(whole, render(page()).into_bytes().unwrap());

        for size in [1, 3, 7, 64] {
            let mut stream = render(page());
            let mut out = Vec::new();
            let mut buf = vec![0u8; size];
            loop {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                assert!(n <= size);
                out.extend_from_slice(&buf[..n]);
            }
            assert_eq!(out, whole);
            assert!(stream.is_finished());
        }
    }

    #[test]
    fn test_finish_hook_runs_once() {
        let count = Rc::new(RefCell::new(0));

        let seen = Rc::clone(&count);
        let stream = render(el("p")).on_finish(move || *seen.borrow_mut() += 1);
        assert_eq!(*count.borrow(), 0);
        stream.into_string().unwrap();
        assert_eq!(*count.borrow(), 1);

        let seen = Rc::clone(&count);
        drop(render(el("p")).on_finish(move || *seen.borrow_mut() += 1));
        assert_eq!(*count.borrow(), 2);
    }
}
