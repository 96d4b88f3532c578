//! Navigation arrow placement
//!
//! Feeders leading to another diagram get an arrow drawn next to them. The
//! arrow is anchored on the feeder's `translate(...)` and pushed away from it
//! by the style offsets, above the feeder for `TOP` and below otherwise.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{Direction, Point};

static TRANSLATE: Lazy<Regex> = Lazy::new(|| {
    let number = r"[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?";
    Regex::new(&format!(r"translate\(\s*({number})(?:\s*,\s*|\s+)?({number})?\s*\)"))
        .expect("translate pattern is valid")
});

/// Extract the translation of an SVG `transform` attribute
///
/// `translate(x)` means `translate(x, 0)`.
pub fn parse_translate(transform: &str) -> Option<Point> {
    let captures = TRANSLATE.captures(transform)?;

    let x = captures.get(1)?.as_str().parse().ok()?;
    let y = match captures.get(2) {
        Some(y) => y.as_str().parse().ok()?,
        None => 0.0,
    };

    Some(Point::new(x, y))
}

/// Position a navigation arrow is placed relative to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowAnchor {
    pub x: f64,
    pub y: f64,
}

impl ArrowAnchor {
    pub fn at(point: Point) -> Self {
        Self {
            x: point.x,
            y: point.y,
        }
    }

    /// Anchor on an element's `transform` attribute
    pub fn from_transform(transform: &str) -> Option<Self> {
        parse_translate(transform).map(Self::at)
    }

    /// Top-left corner of the arrow group
    pub fn arrow_origin(&self, direction: Direction, x_offset: f64, y_offset: f64) -> Point {
        match direction {
            Direction::Top => Point::new(self.x - x_offset, self.y - y_offset),
            Direction::Bottom | Direction::Undefined => {
                Point::new(self.x + x_offset, self.y + y_offset)
            }
        }
    }

    /// `transform` attribute of the arrow group
    ///
    /// Bottom arrows are turned around so they point down, away from the
    /// diagram.
    pub fn arrow_transform(&self, direction: Direction, x_offset: f64, y_offset: f64) -> String {
        let origin = self.arrow_origin(direction, x_offset, y_offset);

        match direction {
            Direction::Bottom => format!("translate({}, {}) rotate(180)", origin.x, origin.y),
            Direction::Top | Direction::Undefined => {
                format!("translate({}, {})", origin.x, origin.y)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_translate_forms() {
        assert_eq!(parse_translate("translate(120,45)"), Some(Point::new(120.0, 45.0)));
        assert_eq!(parse_translate("translate(120 45)"), Some(Point::new(120.0, 45.0)));
        assert_eq!(parse_translate("translate( -12.5 , 3e2 )"), Some(Point::new(-12.5, 300.0)));
        assert_eq!(parse_translate("translate(7)"), Some(Point::new(7.0, 0.0)));
        assert_eq!(
            parse_translate("rotate(90) translate(10, 20) scale(2)"),
            Some(Point::new(10.0, 20.0))
        );
    }

    #[test]
    fn test_parse_translate_rejects_other_transforms() {
        assert_eq!(parse_translate("rotate(90)"), None);
        assert_eq!(parse_translate("matrix(1,0,0,1,10,20)"), None);
        assert_eq!(parse_translate(""), None);
    }

    #[test]
    fn test_top_arrow_goes_up_and_left() {
        let anchor = ArrowAnchor::at(Point::new(100.0, 200.0));
        assert_eq!(anchor.arrow_transform(Direction::Top, 22.0, 65.0), "translate(78, 135)");
    }

    #[test]
    fn test_bottom_arrow_goes_down_right_and_is_rotated() {
        let anchor = ArrowAnchor::at(Point::new(100.0, 200.0));
        assert_eq!(
            anchor.arrow_transform(Direction::Bottom, 22.0, 65.0),
            "translate(122, 265) rotate(180)"
        );
    }

    #[test]
    fn test_undefined_direction_goes_down_without_rotation() {
        let anchor = ArrowAnchor::at(Point::new(100.0, 200.0));
        assert_eq!(anchor.arrow_transform(Direction::Undefined, 22.0, 65.0), "translate(122, 265)");
    }
}
