//! Signed screen rectangles.
//!
//! Animated rows may be translated partly off-screen (a reveal starts past
//! the right edge, a drag can pull left of column zero), so their bounds
//! carry a signed origin. The same [`Bounds`] value is used to replay the
//! row and to register its hit region.

use ratatui::layout::{Rect, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl Bounds {
    pub fn new(x: i32, y: i32, size: Size) -> Self {
        Self {
            x,
            y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> i32 {
        self.x + i32::from(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y + i32::from(self.height)
    }

    pub fn translated(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Check if a screen cell lies within these bounds.
    #[inline]
    pub fn contains(&self, x: u16, y: u16) -> bool {
        let (x, y) = (i32::from(x), i32::from(y));
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// The on-screen part of these bounds inside `clip`, if any.
    pub fn visible_in(&self, clip: Rect) -> Option<Rect> {
        let left = self.x.max(i32::from(clip.x));
        let top = self.y.max(i32::from(clip.y));
        let right = self.right().min(i32::from(clip.right()));
        let bottom = self.bottom().min(i32::from(clip.bottom()));
        if left >= right || top >= bottom {
            return None;
        }
        Some(Rect::new(
            left as u16,
            top as u16,
            (right - left) as u16,
            (bottom - top) as u16,
        ))
    }
}

impl From<Rect> for Bounds {
    fn from(rect: Rect) -> Self {
        Self {
            x: i32::from(rect.x),
            y: i32::from(rect.y),
            width: rect.width,
            height: rect.height,
        }
    }
}
