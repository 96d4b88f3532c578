//! In-memory surface
//!
//! Holds named containers (with the pixel size a browser would report) and
//! the SVG trees appended to them. Markup is parsed with roxmltree and can be
//! written back out with quick-xml for inspection.

use std::collections::BTreeMap;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use roxmltree::{Document as XmlDocument, ParsingOptions};

use super::{Surface, SVG_NS};
use crate::error::ViewerError;
use crate::models::Dimensions;

const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// Handle to a node of a `MemorySurface`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef(usize);

#[derive(Debug, Clone)]
enum NodeKind {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct MemoryNode {
    kind: NodeKind,
    parent: Option<NodeRef>,
    children: Vec<NodeRef>,
}

#[derive(Debug, Clone, Default)]
struct MemoryContainer {
    dimensions: Dimensions,
    style: BTreeMap<String, String>,
    children: Vec<NodeRef>,
}

/// Surface backed by an in-memory SVG tree
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    nodes: Vec<MemoryNode>,
    containers: BTreeMap<String, MemoryContainer>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of `add_container`
    pub fn with_container(mut self, id: &str, dimensions: Dimensions) -> Self {
        self.add_container(id, dimensions);
        self
    }

    pub fn add_container(&mut self, id: &str, dimensions: Dimensions) {
        self.containers.insert(
            id.to_string(),
            MemoryContainer {
                dimensions,
                ..MemoryContainer::default()
            },
        );
    }

    /// Inline style property last set on a container
    pub fn container_style(&self, id: &str, property: &str) -> Option<&str> {
        self.containers
            .get(id)?
            .style
            .get(property)
            .map(String::as_str)
    }

    /// Top-level elements appended to a container, in order
    pub fn container_children(&self, id: &str) -> Vec<NodeRef> {
        self.containers
            .get(id)
            .map(|container| container.children.clone())
            .unwrap_or_default()
    }

    /// Child elements of a node (text skipped)
    pub fn children(&self, node: NodeRef) -> Vec<NodeRef> {
        self.node(node)
            .map(|n| {
                n.children
                    .iter()
                    .copied()
                    .filter(|child| self.tag(*child).is_some())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn tag(&self, node: NodeRef) -> Option<&str> {
        match &self.node(node)?.kind {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Text(_) => None,
        }
    }

    /// All elements with this tag, in creation order
    pub fn elements_by_tag(&self, tag: &str) -> Vec<NodeRef> {
        (0..self.nodes.len())
            .map(NodeRef)
            .filter(|node| self.tag(*node) == Some(tag))
            .collect()
    }

    /// Serialize a node and its subtree back to markup
    pub fn to_markup(&self, node: NodeRef) -> Result<String, ViewerError> {
        let mut writer = Writer::new(Vec::new());
        self.write_node(node, &mut writer)
            .map_err(|e| ViewerError::Dom(e.to_string()))?;

        String::from_utf8(writer.into_inner()).map_err(|e| ViewerError::Dom(e.to_string()))
    }

    fn write_node(&self, node: NodeRef, writer: &mut Writer<Vec<u8>>) -> Result<(), quick_xml::Error> {
        let Some(memory_node) = self.node(node) else {
            return Ok(());
        };

        match &memory_node.kind {
            NodeKind::Text(text) => writer.write_event(Event::Text(BytesText::new(text))),
            NodeKind::Element { tag, attributes } => {
                let mut start = BytesStart::new(tag.as_str());
                for (name, value) in attributes {
                    start.push_attribute((name.as_str(), value.as_str()));
                }

                if memory_node.children.is_empty() {
                    return writer.write_event(Event::Empty(start));
                }

                writer.write_event(Event::Start(start))?;
                for child in &memory_node.children {
                    self.write_node(*child, writer)?;
                }
                writer.write_event(Event::End(BytesEnd::new(tag.as_str())))
            }
        }
    }

    fn node(&self, node: NodeRef) -> Option<&MemoryNode> {
        self.nodes.get(node.0)
    }

    fn push_node(&mut self, kind: NodeKind, parent: Option<NodeRef>) -> NodeRef {
        let node = NodeRef(self.nodes.len());
        self.nodes.push(MemoryNode {
            kind,
            parent,
            children: Vec::new(),
        });

        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(node);
        }
        node
    }

    fn import(&mut self, source: roxmltree::Node, parent: Option<NodeRef>) -> Option<NodeRef> {
        if source.is_text() {
            let text = source.text().unwrap_or_default();
            if text.trim().is_empty() {
                return None;
            }
            return Some(self.push_node(NodeKind::Text(text.to_string()), parent));
        }

        if !source.is_element() {
            return None;
        }

        let attributes = source
            .attributes()
            .map(|attr| {
                let name = match attr.namespace() {
                    Some(XLINK_NS) => format!("xlink:{}", attr.name()),
                    _ => attr.name().to_string(),
                };
                (name, attr.value().to_string())
            })
            .collect();

        let element = self.push_node(
            NodeKind::Element {
                tag: source.tag_name().name().to_string(),
                attributes,
            },
            parent,
        );

        for child in source.children() {
            self.import(child, Some(element));
        }
        Some(element)
    }

    /// Whether a node still hangs below one of the containers
    fn is_attached(&self, node: NodeRef) -> bool {
        let mut top = node;
        while let Some(parent) = self.node(top).and_then(|n| n.parent) {
            top = parent;
        }
        self.containers
            .values()
            .any(|container| container.children.contains(&top))
    }

    fn element_attributes_mut(&mut self, element: NodeRef) -> Result<&mut Vec<(String, String)>, ViewerError> {
        match self.nodes.get_mut(element.0).map(|n| &mut n.kind) {
            Some(NodeKind::Element { attributes, .. }) => Ok(attributes),
            _ => Err(ViewerError::Dom(format!("{:?} is not an element", element))),
        }
    }
}

impl Surface for MemorySurface {
    type Element = NodeRef;

    fn create_canvas(&mut self, container_id: &str) -> Result<NodeRef, ViewerError> {
        if !self.containers.contains_key(container_id) {
            return Err(ViewerError::ContainerNotFound(container_id.to_string()));
        }

        let canvas = self.push_node(
            NodeKind::Element {
                tag: "svg".to_string(),
                attributes: vec![
                    ("xmlns".to_string(), SVG_NS.to_string()),
                    ("version".to_string(), "1.1".to_string()),
                ],
            },
            None,
        );

        if let Some(container) = self.containers.get_mut(container_id) {
            container.children.push(canvas);
        }
        Ok(canvas)
    }

    fn create_element(&mut self, parent: &NodeRef, tag: &str) -> Result<NodeRef, ViewerError> {
        self.element_attributes_mut(*parent)?;

        Ok(self.push_node(
            NodeKind::Element {
                tag: tag.to_string(),
                attributes: Vec::new(),
            },
            Some(*parent),
        ))
    }

    fn append_markup(&mut self, parent: &NodeRef, markup: &str) -> Result<NodeRef, ViewerError> {
        self.element_attributes_mut(*parent)?;

        let mut options = ParsingOptions::default();
        options.allow_dtd = true;
        let document = XmlDocument::parse_with_options(markup, options)
            .map_err(|e| ViewerError::InvalidMarkup(e.to_string()))?;

        self.import(document.root_element(), Some(*parent))
            .ok_or_else(|| ViewerError::InvalidMarkup("document has no root element".to_string()))
    }

    fn remove(&mut self, element: &NodeRef) -> Result<(), ViewerError> {
        let parent = self
            .nodes
            .get_mut(element.0)
            .ok_or_else(|| ViewerError::Dom(format!("{:?} does not exist", element)))?
            .parent
            .take();

        match parent {
            Some(parent) => self.nodes[parent.0].children.retain(|child| child != element),
            None => {
                for container in self.containers.values_mut() {
                    container.children.retain(|child| child != element);
                }
            }
        }
        Ok(())
    }

    fn find_by_id(&self, id: &str) -> Option<NodeRef> {
        (0..self.nodes.len())
            .map(NodeRef)
            .filter(|node| self.is_attached(*node))
            .find(|node| self.attribute(node, "id").as_deref() == Some(id))
    }

    fn first_descendant(&self, element: &NodeRef, tag: &str) -> Option<NodeRef> {
        for child in &self.node(*element)?.children {
            if self.tag(*child) == Some(tag) {
                return Some(*child);
            }
            if let Some(found) = self.first_descendant(child, tag) {
                return Some(found);
            }
        }
        None
    }

    fn parent(&self, element: &NodeRef) -> Option<NodeRef> {
        self.node(*element)?.parent
    }

    fn attribute(&self, element: &NodeRef, name: &str) -> Option<String> {
        match &self.node(*element)?.kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone()),
            NodeKind::Text(_) => None,
        }
    }

    fn set_attribute(&mut self, element: &NodeRef, name: &str, value: &str) -> Result<(), ViewerError> {
        let attributes = self.element_attributes_mut(*element)?;

        match attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => attributes.push((name.to_string(), value.to_string())),
        }
        Ok(())
    }

    fn container_dimensions(&self, container_id: &str) -> Result<Dimensions, ViewerError> {
        self.containers
            .get(container_id)
            .map(|container| container.dimensions)
            .ok_or_else(|| ViewerError::ContainerNotFound(container_id.to_string()))
    }

    fn set_container_style(&mut self, container_id: &str, property: &str, value: &str) -> Result<(), ViewerError> {
        let container = self
            .containers
            .get_mut(container_id)
            .ok_or_else(|| ViewerError::ContainerNotFound(container_id.to_string()))?;

        container.style.insert(property.to_string(), value.to_string());
        Ok(())
    }
}
