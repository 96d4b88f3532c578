//! Option objects passed by the host page
//!
//! Field names follow the camelCase keys the host already uses, so an option
//! literal written for the JS viewer deserializes unchanged.

use serde::{Deserialize, Serialize};

use super::geometry::{Dimensions, Margins};

/// Pan/zoom behavior of the drawing surface
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PanZoomOptions {
    pub panning: bool,
    pub zoom_min: f64,
    pub zoom_max: f64,
    pub zoom_factor: f64,
    pub margins: Option<Margins>,
}

impl Default for PanZoomOptions {
    fn default() -> Self {
        Self {
            panning: true,
            zoom_min: 0.5,
            zoom_max: 20.0,
            zoom_factor: 0.2,
            margins: None,
        }
    }
}

/// Look of the navigation arrows
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArrowStyle {
    /// SVG markup of the arrow drawn on top
    pub arrow_icon: String,
    /// SVG markup of the arrow drawn beneath, whose first path gets the fill
    pub arrow_hover_icon: String,
    pub background_color: String,
    pub background_hover_color: String,
    #[serde(default)]
    pub x_offset: f64,
    #[serde(default)]
    pub y_offset: f64,
}

/// Look and placement of the maximize/minimize icons
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaximizeStyle {
    pub maximize_icon: String,
    pub minimize_icon: String,
    #[serde(default = "default_icon_size")]
    pub icon_width: f64,
    #[serde(default = "default_icon_size")]
    pub icon_height: f64,
    #[serde(default)]
    pub right_offset: f64,
    #[serde(default)]
    pub bottom_offset: f64,
}

fn default_icon_size() -> f64 {
    24.0
}

impl MaximizeStyle {
    pub fn icon_size(&self) -> Dimensions {
        Dimensions::new(self.icon_width, self.icon_height)
    }

    /// Inline style pinning the icon canvas to the container's bottom-right
    pub fn overlay_style(&self) -> String {
        format!(
            "position: absolute; bottom: {}px; right: {}px; cursor: pointer;",
            self.bottom_offset, self.right_offset
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pan_zoom_options_from_host_literal() {
        let json = r#"{
            "panning": true,
            "zoomMin": 0.5,
            "zoomMax": 20,
            "zoomFactor": 0.2,
            "margins": { "top": 100, "left": 100, "right": 100, "bottom": 100 }
        }"#;

        let options: PanZoomOptions = serde_json::from_str(json).unwrap();
        assert!(options.panning);
        assert_eq!(options.zoom_max, 20.0);
        assert_eq!(options.margins, Some(Margins::uniform(100.0)));
    }

    #[test]
    fn test_maximize_style_defaults_and_overlay() {
        let json = r#"{
            "maximizeIcon": "<svg/>",
            "minimizeIcon": "<svg/>",
            "rightOffset": 5,
            "bottomOffset": 7
        }"#;

        let style: MaximizeStyle = serde_json::from_str(json).unwrap();
        assert_eq!(style.icon_size(), Dimensions::new(24.0, 24.0));
        assert_eq!(
            style.overlay_style(),
            "position: absolute; bottom: 7px; right: 5px; cursor: pointer;"
        );
    }
}
