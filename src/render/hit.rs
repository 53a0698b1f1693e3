//! Hit regions for pointer interaction.
//!
//! Regions are registered while a frame renders and the registry is cleared
//! at the start of the next render. Pointer events arriving between two
//! frames are tested against the regions of the frame the user is looking
//! at.

use ratatui::layout::Rect;

use crate::models::MessageId;
use crate::navigation::ViewId;

use super::Bounds;

/// What a hit region belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HitTarget {
    /// A message row in the list.
    Row(MessageId),
    /// A nav drawer entry.
    NavEntry(ViewId),
    /// The app bar back affordance.
    Back,
    /// An app bar action of the active view, by index.
    BarAction(u16),
    /// A control inside the active view, by view-defined index.
    Control(u16),
    /// A developer overlay card. Occludes whatever is drawn beneath it.
    Overlay,
}

#[derive(Debug, Clone)]
pub struct HitRegion {
    pub bounds: Bounds,
    /// Area the content was clipped to when drawn, if any.
    pub clip: Option<Rect>,
    pub target: HitTarget,
}

impl HitRegion {
    #[inline]
    pub fn contains(&self, x: u16, y: u16) -> bool {
        let in_clip = self.clip.map_or(true, |clip| {
            x >= clip.x && x < clip.right() && y >= clip.y && y < clip.bottom()
        });
        in_clip && self.bounds.contains(x, y)
    }
}

/// Registry of the current frame's hit regions.
///
/// Regions registered later take priority over earlier ones where they
/// overlap (z-order: later = on top).
#[derive(Debug, Default)]
pub struct HitRegistry {
    regions: Vec<HitRegion>,
    hovered: Option<usize>,
}

impl HitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all regions and hover state. Called at the start of each render.
    pub fn clear(&mut self) {
        self.regions.clear();
        self.hovered = None;
    }

    pub fn register(&mut self, bounds: Bounds, target: HitTarget) {
        self.regions.push(HitRegion {
            bounds,
            clip: None,
            target,
        });
    }

    /// Register content drawn at `bounds` but clipped to `clip`, so only
    /// cells that were actually drawn respond to the pointer.
    pub fn register_clipped(&mut self, bounds: Bounds, clip: Rect, target: HitTarget) {
        self.regions.push(HitRegion {
            bounds,
            clip: Some(clip),
            target,
        });
    }

    pub fn register_rect(&mut self, rect: Rect, target: HitTarget) {
        self.register(Bounds::from(rect), target);
    }

    /// Topmost target containing the point.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<&HitTarget> {
        self.regions
            .iter()
            .rev()
            .find(|region| region.contains(x, y))
            .map(|region| &region.target)
    }

    /// Every target containing the point, topmost first.
    pub fn hits_at(&self, x: u16, y: u16) -> Vec<&HitTarget> {
        self.regions
            .iter()
            .rev()
            .filter(|region| region.contains(x, y))
            .map(|region| &region.target)
            .collect()
    }

    /// Bounds most recently registered for a target.
    pub fn bounds_of(&self, target: &HitTarget) -> Option<Bounds> {
        self.regions
            .iter()
            .rev()
            .find(|region| &region.target == target)
            .map(|region| region.bounds)
    }

    /// Update the hover state from a pointer position.
    ///
    /// Returns true if the hovered region changed (requiring a redraw).
    pub fn update_hover(&mut self, x: u16, y: u16) -> bool {
        let hovered = self
            .regions
            .iter()
            .enumerate()
            .rev()
            .find(|(_, region)| region.contains(x, y))
            .map(|(i, _)| i);
        let changed = hovered != self.hovered;
        self.hovered = hovered;
        changed
    }

    pub fn hovered(&self) -> Option<&HitTarget> {
        self.hovered
            .and_then(|i| self.regions.get(i))
            .map(|region| &region.target)
    }

    pub fn is_hovered(&self, target: &HitTarget) -> bool {
        self.hovered() == Some(target)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Size;

    fn row(id: &str) -> HitTarget {
        HitTarget::Row(MessageId::from(id))
    }

    #[test]
    fn test_registry_clear() {
        let mut registry = HitRegistry::new();
        registry.register_rect(Rect::new(0, 0, 10, 10), HitTarget::Back);
        registry.register_rect(Rect::new(10, 0, 10, 10), HitTarget::Control(1));
        assert_eq!(registry.len(), 2);

        registry.update_hover(5, 5);
        assert!(registry.hovered().is_some());

        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.hovered().is_none());
    }

    #[test]
    fn test_hit_test_basic() {
        let mut registry = HitRegistry::new();
        registry.register_rect(Rect::new(0, 0, 10, 1), row("a"));
        registry.register_rect(Rect::new(0, 1, 10, 1), row("b"));

        assert_eq!(registry.hit_test(3, 0), Some(&row("a")));
        assert_eq!(registry.hit_test(3, 1), Some(&row("b")));
        assert_eq!(registry.hit_test(3, 2), None);
        assert_eq!(registry.hit_test(10, 0), None);
    }

    #[test]
    fn test_hit_test_overlapping_prefers_latest() {
        let mut registry = HitRegistry::new();
        registry.register_rect(Rect::new(0, 0, 20, 20), HitTarget::Control(0));
        registry.register_rect(Rect::new(5, 5, 10, 10), HitTarget::Control(1));

        assert_eq!(registry.hit_test(10, 10), Some(&HitTarget::Control(1)));
        assert_eq!(registry.hit_test(2, 2), Some(&HitTarget::Control(0)));
        assert_eq!(
            registry.hits_at(10, 10),
            vec![&HitTarget::Control(1), &HitTarget::Control(0)]
        );
    }

    #[test]
    fn test_translated_row_region() {
        let mut registry = HitRegistry::new();
        registry.register(Bounds::new(-3, 2, Size::new(10, 1)), row("a"));

        assert_eq!(registry.hit_test(0, 2), Some(&row("a")));
        assert_eq!(registry.hit_test(6, 2), Some(&row("a")));
        assert_eq!(registry.hit_test(7, 2), None);
        assert_eq!(
            registry.bounds_of(&row("a")),
            Some(Bounds::new(-3, 2, Size::new(10, 1)))
        );
    }

    #[test]
    fn test_clipped_region_ignores_undrawn_cells() {
        let mut registry = HitRegistry::new();
        registry.register_clipped(
            Bounds::new(5, 0, Size::new(10, 1)),
            Rect::new(0, 0, 8, 1),
            row("a"),
        );

        assert_eq!(registry.hit_test(5, 0), Some(&row("a")));
        assert_eq!(registry.hit_test(7, 0), Some(&row("a")));
        assert_eq!(registry.hit_test(8, 0), None);
        assert_eq!(
            registry.bounds_of(&row("a")),
            Some(Bounds::new(5, 0, Size::new(10, 1)))
        );
    }

    #[test]
    fn test_update_hover_returns_changed() {
        let mut registry = HitRegistry::new();
        registry.register_rect(Rect::new(0, 0, 10, 10), HitTarget::Back);
        registry.register_rect(Rect::new(20, 0, 10, 10), HitTarget::Control(2));

        assert!(registry.update_hover(5, 5));
        assert!(!registry.update_hover(8, 8));
        assert!(registry.is_hovered(&HitTarget::Back));
        assert!(registry.update_hover(25, 5));
        assert!(registry.is_hovered(&HitTarget::Control(2)));
        assert!(registry.update_hover(100, 100));
        assert!(registry.hovered().is_none());
    }
}
