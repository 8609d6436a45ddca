// src/render/dom.rs
// =============================================================================
// An owned DOM snapshot of one rendered page.
//
// `scraper` hands out `ElementRef<'a>` values that borrow the parsed document.
// The crawler wants element handles it can keep in collections and compare,
// so a handle here is the shared document (Rc) plus the node's id in the
// underlying ego-tree.
//
// Visibility is decided statically, from markup alone:
// - tags that never render (script, style, head, ...) are invisible
// - the `hidden` attribute hides an element
// - inline `display: none` / `visibility: hidden` hides an element
// An element is visible only when it and every ancestor pass these checks.
// =============================================================================

use ego_tree::iter::Edge;
use ego_tree::{NodeId, NodeRef};
use scraper::node::{Element, Node};
use scraper::{ElementRef, Html, Selector};
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use super::{PageElement, RenderError};

// Tags whose content is never painted
const NON_RENDERED_TAGS: &[&str] = &[
    "head", "script", "style", "noscript", "template", "title", "meta", "link",
];

// Tags that start a new line of text when a browser lays them out
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt",
    "figcaption", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header",
    "hr", "li", "main", "nav", "ol", "p", "pre", "section", "table", "td", "th",
    "tr", "ul",
];

/// A parsed page, shared by every element handle taken from it.
#[derive(Clone)]
pub struct DomSnapshot {
    html: Rc<Html>,
}

impl DomSnapshot {
    pub fn parse(source: &str) -> Self {
        Self {
            html: Rc::new(Html::parse_document(source)),
        }
    }

    /// Text of the first `<title>` element, or an empty string.
    pub fn title(&self) -> Result<String, RenderError> {
        let selector = parse_selector("title")?;
        Ok(self
            .html
            .select(&selector)
            .next()
            .map(|title| title.text().collect::<String>())
            .unwrap_or_default())
    }

    pub fn query(&self, selector: &str) -> Result<Vec<DomElement>, RenderError> {
        let selector = parse_selector(selector)?;
        Ok(self
            .html
            .select(&selector)
            .map(|element| DomElement::new(&self.html, element.id()))
            .collect())
    }

    /// A page is ready once it has a body to read content from.
    pub fn has_body(&self) -> bool {
        self.query("body").map(|found| !found.is_empty()).unwrap_or(false)
    }
}

/// A handle to one element inside a `DomSnapshot`.
#[derive(Clone)]
pub struct DomElement {
    doc: Rc<Html>,
    id: NodeId,
}

impl DomElement {
    fn new(doc: &Rc<Html>, id: NodeId) -> Self {
        Self {
            doc: Rc::clone(doc),
            id,
        }
    }

    fn node(&self) -> Result<NodeRef<'_, Node>, RenderError> {
        self.doc.tree.get(self.id).ok_or(RenderError::StaleElement)
    }

    fn element(&self) -> Result<ElementRef<'_>, RenderError> {
        self.node()
            .ok()
            .and_then(ElementRef::wrap)
            .ok_or(RenderError::StaleElement)
    }
}

impl PartialEq for DomElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.doc, &other.doc) && self.id == other.id
    }
}

impl Eq for DomElement {}

impl Hash for DomElement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Debug for DomElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = self.tag_name().unwrap_or_default();
        f.debug_struct("DomElement")
            .field("id", &self.id)
            .field("tag", &tag)
            .finish()
    }
}

impl PageElement for DomElement {
    fn text(&self) -> Result<String, RenderError> {
        let mut out = String::new();
        collect_visible_text(self.node()?, &mut out);
        Ok(out)
    }

    fn tag_name(&self) -> Result<String, RenderError> {
        Ok(self.element()?.value().name().to_string())
    }

    fn is_visible(&self) -> Result<bool, RenderError> {
        let node = self.node()?;
        Ok(std::iter::once(node)
            .chain(node.ancestors())
            .filter_map(|n| n.value().as_element())
            .all(renders))
    }

    fn attribute(&self, name: &str) -> Result<Option<String>, RenderError> {
        Ok(self.element()?.value().attr(name).map(str::to_string))
    }

    fn parent(&self) -> Result<Option<Self>, RenderError> {
        Ok(self
            .node()?
            .parent()
            .and_then(ElementRef::wrap)
            .map(|parent| DomElement::new(&self.doc, parent.id())))
    }

    fn query(&self, selector: &str) -> Result<Vec<Self>, RenderError> {
        let selector = parse_selector(selector)?;
        // ElementRef::select only walks descendants, never the element itself
        Ok(self
            .element()?
            .select(&selector)
            .map(|found| DomElement::new(&self.doc, found.id()))
            .collect())
    }
}

fn parse_selector(selector: &str) -> Result<Selector, RenderError> {
    Selector::parse(selector).map_err(|_| RenderError::Selector(selector.to_string()))
}

fn renders(element: &Element) -> bool {
    if NON_RENDERED_TAGS.contains(&element.name()) || element.attr("hidden").is_some() {
        return false;
    }

    match element.attr("style") {
        Some(style) => !style_hides(style),
        None => true,
    }
}

fn style_hides(style: &str) -> bool {
    let compact: String = style
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    compact.contains("display:none") || compact.contains("visibility:hidden")
}

// Appends the text a reader would see, padding block elements with spaces
// so "<p>a</p><p>b</p>" reads "a b" rather than "ab".
//
// Walks Open/Close edges instead of recursing, so nesting depth is bounded by
// the heap rather than the stack.
fn collect_visible_text(root: NodeRef<'_, Node>, out: &mut String) {
    // Non-rendered element whose subtree is being skipped
    let mut hidden: Option<NodeId> = None;

    for edge in root.traverse() {
        match edge {
            Edge::Open(node) => {
                if hidden.is_some() || node.id() == root.id() {
                    continue;
                }
                match node.value() {
                    Node::Text(text) => out.push_str(text),
                    Node::Element(element) if !renders(element) => hidden = Some(node.id()),
                    Node::Element(element) if BLOCK_TAGS.contains(&element.name()) => out.push(' '),
                    _ => {}
                }
            }
            Edge::Close(node) => {
                if hidden == Some(node.id()) {
                    hidden = None;
                    continue;
                }
                if hidden.is_some() || node.id() == root.id() {
                    continue;
                }
                if let Node::Element(element) = node.value() {
                    if BLOCK_TAGS.contains(&element.name()) {
                        out.push(' ');
                    }
                }
            }
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why Rc<Html> and not &Html?
//    - An ElementRef<'a> can't outlive the Html it points into
//    - Handles stored in Vecs and HashSets would drag that lifetime everywhere
//    - Rc lets every handle share ownership of the document instead
//    - Rc (not Arc) is enough: a page is only ever read on one task
//
// 2. What is a NodeId?
//    - scraper stores the DOM in an ego_tree::Tree
//    - A NodeId is a small Copy index into that tree
//    - tree.get(id) turns it back into a NodeRef we can walk
//
// 3. Why implement PartialEq/Hash by hand?
//    - Html doesn't implement them, so #[derive] won't work
//    - Two handles are "the same element" when they share the document
//      (Rc::ptr_eq) and point at the same node
// -----------------------------------------------------------------------------
