//! Geometry needed to keep the selected row visible.
//!
//! The controller never touches the rendered list except through [`LayoutProbe`],
//! and only to read bounding boxes and request a scroll.

use std::fmt;
use std::sync::{Mutex, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(top: f64, height: f64) -> Self {
        Self {
            top,
            bottom: top + height,
        }
    }
}

/// Elements the controller queries by id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    ResultsContainer,
    Result(usize),
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementId::ResultsContainer => write!(f, "results-container"),
            ElementId::Result(index) => write!(f, "result-{index}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// Which edge of the row lines up with the container after scrolling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAlign {
    Start,
    End,
}

impl From<ScrollDirection> for ScrollAlign {
    fn from(direction: ScrollDirection) -> Self {
        match direction {
            ScrollDirection::Up => ScrollAlign::Start,
            ScrollDirection::Down => ScrollAlign::End,
        }
    }
}

pub trait LayoutProbe: Send + Sync {
    fn bounding_rect(&self, id: ElementId) -> Option<Rect>;

    fn scroll_into_view(&self, id: ElementId, align: ScrollAlign);

    /// Called whenever the result list is replaced
    fn scroll_to_top(&self);
}

/// Only the edge in the direction of travel matters
pub fn is_fully_visible(container: Rect, row: Rect, direction: ScrollDirection) -> bool {
    match direction {
        ScrollDirection::Down => row.bottom <= container.bottom,
        ScrollDirection::Up => row.top >= container.top,
    }
}

/// Scrolls `result-<index>` into view if it is clipped. Returns whether a scroll was requested.
pub fn reveal(probe: &dyn LayoutProbe, index: usize, direction: ScrollDirection) -> bool {
    let row_id = ElementId::Result(index);
    let (Some(container), Some(row)) = (
        probe.bounding_rect(ElementId::ResultsContainer),
        probe.bounding_rect(row_id),
    ) else {
        tracing::debug!("No layout for {row_id}, skipping scroll");
        return false;
    };

    if is_fully_visible(container, row, direction) {
        return false;
    }

    tracing::debug!("Scrolling {row_id} into view ({direction:?})");
    probe.scroll_into_view(row_id, direction.into());
    true
}

/// Virtual list geometry: uniform rows inside a fixed-height viewport
pub struct RowLayout {
    row_height: f64,
    viewport_height: f64,
    offset: Mutex<f64>,
}

impl RowLayout {
    pub fn new(row_height: f64, viewport_height: f64) -> Self {
        Self {
            row_height,
            viewport_height,
            offset: Mutex::new(0.0),
        }
    }

    pub fn scroll_offset(&self) -> f64 {
        *self.offset.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LayoutProbe for RowLayout {
    fn bounding_rect(&self, id: ElementId) -> Option<Rect> {
        match id {
            ElementId::ResultsContainer => Some(Rect::new(0.0, self.viewport_height)),
            ElementId::Result(index) => {
                let top = index as f64 * self.row_height - self.scroll_offset();
                Some(Rect::new(top, self.row_height))
            }
        }
    }

    fn scroll_into_view(&self, id: ElementId, align: ScrollAlign) {
        let ElementId::Result(index) = id else {
            return;
        };

        let row_top = index as f64 * self.row_height;
        let offset = match align {
            ScrollAlign::Start => row_top,
            ScrollAlign::End => row_top + self.row_height - self.viewport_height,
        };

        *self.offset.lock().unwrap_or_else(PoisonError::into_inner) = offset.max(0.0);
    }

    fn scroll_to_top(&self) {
        *self.offset.lock().unwrap_or_else(PoisonError::into_inner) = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_ids_render_like_the_view() {
        assert_eq!(ElementId::ResultsContainer.to_string(), "results-container");
        assert_eq!(ElementId::Result(7).to_string(), "result-7");
    }

    #[test]
    fn visibility_checks_leading_edge_only() {
        let container = Rect::new(0.0, 100.0);
        let overhanging_bottom = Rect::new(80.0, 40.0);
        let overhanging_top = Rect::new(-10.0, 40.0);

        assert!(!is_fully_visible(container, overhanging_bottom, ScrollDirection::Down));
        assert!(is_fully_visible(container, overhanging_bottom, ScrollDirection::Up));
        assert!(!is_fully_visible(container, overhanging_top, ScrollDirection::Up));
        assert!(is_fully_visible(container, overhanging_top, ScrollDirection::Down));
    }

    #[test]
    fn reveal_aligns_edges() {
        let layout = RowLayout::new(40.0, 100.0);

        assert!(!reveal(&layout, 1, ScrollDirection::Down));
        assert_eq!(layout.scroll_offset(), 0.0);

        // Row 2 spans 80..120, bottom aligns with the viewport
        assert!(reveal(&layout, 2, ScrollDirection::Down));
        assert_eq!(layout.scroll_offset(), 20.0);
        assert_eq!(layout.bounding_rect(ElementId::Result(2)).unwrap().bottom, 100.0);

        assert!(!reveal(&layout, 1, ScrollDirection::Up));

        assert!(reveal(&layout, 0, ScrollDirection::Up));
        assert_eq!(layout.scroll_offset(), 0.0);
    }

    struct Headless;

    impl LayoutProbe for Headless {
        fn bounding_rect(&self, _id: ElementId) -> Option<Rect> {
            None
        }

        fn scroll_into_view(&self, _id: ElementId, _align: ScrollAlign) {
            panic!("nothing to scroll");
        }

        fn scroll_to_top(&self) {}
    }

    #[test]
    fn missing_layout_skips_scroll() {
        assert!(!reveal(&Headless, 3, ScrollDirection::Down));
    }
}
