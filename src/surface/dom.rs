//! Browser DOM surface
//!
//! Elements are `web_sys::Element`s of the page document. Markup goes
//! through `DOMParser` as `image/svg+xml` and is imported into the page.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, DomParser, Element, HtmlElement, SupportedType};

use super::{Surface, SVG_NS};
use crate::error::ViewerError;
use crate::models::Dimensions;

fn dom_error(err: JsValue) -> ViewerError {
    ViewerError::Dom(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

/// Surface backed by the page document
#[derive(Debug, Clone)]
pub struct DomSurface {
    document: Document,
}

impl DomSurface {
    /// Surface over the current window's document
    pub fn new() -> Result<Self, ViewerError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| ViewerError::Dom("no window document".to_string()))?;

        Ok(Self { document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Container element as an `HtmlElement`
    pub fn container(&self, container_id: &str) -> Result<HtmlElement, ViewerError> {
        self.document
            .get_element_by_id(container_id)
            .ok_or_else(|| ViewerError::ContainerNotFound(container_id.to_string()))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| ViewerError::Dom(format!("'#{}' is not an HTML element", container_id)))
    }
}

impl Surface for DomSurface {
    type Element = Element;

    fn create_canvas(&mut self, container_id: &str) -> Result<Element, ViewerError> {
        let container = self.container(container_id)?;
        let canvas = self
            .document
            .create_element_ns(Some(SVG_NS), "svg")
            .map_err(dom_error)?;

        canvas.set_attribute("version", "1.1").map_err(dom_error)?;
        container.append_child(&canvas).map_err(dom_error)?;
        Ok(canvas)
    }

    fn create_element(&mut self, parent: &Element, tag: &str) -> Result<Element, ViewerError> {
        let element = self
            .document
            .create_element_ns(Some(SVG_NS), tag)
            .map_err(dom_error)?;

        parent.append_child(&element).map_err(dom_error)?;
        Ok(element)
    }

    fn append_markup(&mut self, parent: &Element, markup: &str) -> Result<Element, ViewerError> {
        let parser = DomParser::new().map_err(dom_error)?;
        let parsed = parser
            .parse_from_string(markup, SupportedType::ImageSvgXml)
            .map_err(dom_error)?;

        let root = parsed
            .document_element()
            .ok_or_else(|| ViewerError::InvalidMarkup("document has no root element".to_string()))?;

        // Firefox returns <parsererror> as the root, Chromium nests it
        let parser_error = if root.tag_name() == "parsererror" {
            Some(root.clone())
        } else {
            root.query_selector("parsererror").ok().flatten()
        };
        if let Some(error) = parser_error {
            return Err(ViewerError::InvalidMarkup(
                error.text_content().unwrap_or_default(),
            ));
        }

        let imported = self
            .document
            .import_node_with_deep(&root, true)
            .map_err(dom_error)?;
        parent.append_child(&imported).map_err(dom_error)?;

        imported
            .dyn_into::<Element>()
            .map_err(|_| ViewerError::Dom("imported node is not an element".to_string()))
    }

    fn remove(&mut self, element: &Element) -> Result<(), ViewerError> {
        element.remove();
        Ok(())
    }

    fn find_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn first_descendant(&self, element: &Element, tag: &str) -> Option<Element> {
        element.query_selector(tag).ok().flatten()
    }

    fn parent(&self, element: &Element) -> Option<Element> {
        element.parent_element()
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn set_attribute(&mut self, element: &Element, name: &str, value: &str) -> Result<(), ViewerError> {
        element.set_attribute(name, value).map_err(dom_error)
    }

    fn container_dimensions(&self, container_id: &str) -> Result<Dimensions, ViewerError> {
        let container = self.container(container_id)?;

        Ok(Dimensions::new(
            f64::from(container.offset_width()),
            f64::from(container.offset_height()),
        ))
    }

    fn set_container_style(&mut self, container_id: &str, property: &str, value: &str) -> Result<(), ViewerError> {
        self.container(container_id)?
            .style()
            .set_property(property, value)
            .map_err(dom_error)
    }
}
