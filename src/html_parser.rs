use html5ever::serialize::{serialize, SerializeOpts};
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::parse_document;
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};
use std::fmt;
use std::io;

/// Tag/attribute pairs that reference an embedded resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    /// `img[src]`
    Image,
    /// `link[rel=stylesheet][href]`
    Stylesheet,
    /// `link[rel=canonical][href]`
    Canonical,
    /// `script[src]`
    Script,
}

impl ResourceType {
    pub fn attribute(self) -> &'static str {
        match self {
            ResourceType::Image | ResourceType::Script => "src",
            ResourceType::Stylesheet | ResourceType::Canonical => "href",
        }
    }

    fn from_element(tag: &str, attrs: &[html5ever::Attribute]) -> Option<Self> {
        match tag {
            "img" => Some(ResourceType::Image),
            "script" => Some(ResourceType::Script),
            "link" => {
                let rel = attr_value(attrs, "rel")?;
                let has = |token: &str| {
                    rel.split_ascii_whitespace()
                        .any(|t| t.eq_ignore_ascii_case(token))
                };
                if has("stylesheet") {
                    Some(ResourceType::Stylesheet)
                } else if has("canonical") {
                    Some(ResourceType::Canonical)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

fn attr_value<'a>(attrs: &'a [html5ever::Attribute], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|attr| &*attr.name.local == name)
        .map(|attr| &*attr.value)
}

/// One resource-bearing attribute found in a parsed document.
///
/// Holds a handle to its element, so the attribute can be rewritten in place
/// after the document has been scanned.
#[derive(Clone)]
pub struct ResourceLink {
    pub original_url: String,
    pub resource_type: ResourceType,
    element: Handle,
}

impl ResourceLink {
    /// Replaces the resource attribute's value on the underlying element.
    pub fn set_url(&self, value: &str) {
        if let NodeData::Element { attrs, .. } = &self.element.data {
            let name = self.resource_type.attribute();
            if let Some(attr) = attrs
                .borrow_mut()
                .iter_mut()
                .find(|attr| &*attr.name.local == name)
            {
                attr.value = StrTendril::from_slice(value);
            }
        }
    }

    /// Current value of the resource attribute on the underlying element.
    pub fn current_url(&self) -> Option<String> {
        match &self.element.data {
            NodeData::Element { attrs, .. } => {
                attr_value(&attrs.borrow(), self.resource_type.attribute()).map(str::to_string)
            }
            _ => None,
        }
    }
}

impl fmt::Debug for ResourceLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceLink")
            .field("original_url", &self.original_url)
            .field("resource_type", &self.resource_type)
            .finish()
    }
}

/// A parsed HTML document that can be scanned, patched and serialized again.
pub struct HtmlDocument {
    dom: RcDom,
}

impl HtmlDocument {
    pub fn parse(html_content: &str) -> Self {
        let dom = parse_document(RcDom::default(), Default::default()).one(html_content);
        Self { dom }
    }

    /// Every `img[src]`, `script[src]`, stylesheet and canonical `link[href]`
    /// with a non-blank value, in document order.
    pub fn find_resources(&self) -> Vec<ResourceLink> {
        let mut resources = Vec::new();
        collect_resources(&self.dom.document, &mut resources);
        resources
    }

    pub fn serialize(&self) -> io::Result<String> {
        let mut buffer = Vec::new();
        let document: SerializableHandle = self.dom.document.clone().into();
        serialize(&mut buffer, &document, SerializeOpts::default())?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

fn collect_resources(node: &Handle, resources: &mut Vec<ResourceLink>) {
    if let NodeData::Element { name, attrs, .. } = &node.data {
        let attrs = attrs.borrow();
        if let Some(resource_type) = ResourceType::from_element(&name.local, &attrs) {
            if let Some(value) = attr_value(&attrs, resource_type.attribute()) {
                if !value.trim().is_empty() {
                    resources.push(ResourceLink {
                        original_url: value.to_string(),
                        resource_type,
                        element: node.clone(),
                    });
                }
            }
        }
    }

    for child in node.children.borrow().iter() {
        collect_resources(child, resources);
    }
}
