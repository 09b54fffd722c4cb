//! Axis-aligned rectangles and grid orientations.

use std::fmt;

/// An axis-aligned rectangle in pixel coordinates.
///
/// `(x, y)` is the top-left corner. Every sprite occupies one block-sized
/// rectangle that doubles as its collision footprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Left edge, in pixels.
    pub x: i32,
    /// Top edge, in pixels.
    pub y: i32,
    /// Width, in pixels.
    pub w: u32,
    /// Height, in pixels.
    pub h: u32,
}

impl Rect {
    /// Create a rectangle from its top-left corner and extents.
    pub fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge (exclusive), in pixels.
    pub fn right(&self) -> i32 {
        self.x + self.w as i32
    }

    /// Bottom edge (exclusive), in pixels.
    pub fn bottom(&self) -> i32 {
        self.y + self.h as i32
    }

    /// A copy of this rectangle shifted by `(dx, dy)`.
    pub fn translated(&self, dx: i32, dy: i32) -> Rect {
        Rect {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Whether the interiors of `self` and `other` intersect.
    ///
    /// Edge-to-edge contact does not count; zero-area rectangles never
    /// overlap anything.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Whether `other` lies entirely inside `self` (edges may touch).
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {}x{}", self.x, self.y, self.w, self.h)
    }
}

/// A unit direction on the grid, or no direction at all.
///
/// Movement is always axis-aligned; the four cardinal constants cover
/// everything the description language can express.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Orientation {
    /// Horizontal component (-1, 0, or 1).
    pub dx: i32,
    /// Vertical component (-1, 0, or 1); positive is down.
    pub dy: i32,
}

impl Orientation {
    /// No direction; sprites with this orientation never move passively.
    pub const NONE: Orientation = Orientation { dx: 0, dy: 0 };
    /// Up (negative y).
    pub const UP: Orientation = Orientation { dx: 0, dy: -1 };
    /// Down (positive y).
    pub const DOWN: Orientation = Orientation { dx: 0, dy: 1 };
    /// Left (negative x).
    pub const LEFT: Orientation = Orientation { dx: -1, dy: 0 };
    /// Right (positive x).
    pub const RIGHT: Orientation = Orientation { dx: 1, dy: 0 };

    /// The four cardinal directions, in a fixed order used for random draws.
    pub const CARDINAL: [Orientation; 4] = [
        Orientation::UP,
        Orientation::DOWN,
        Orientation::LEFT,
        Orientation::RIGHT,
    ];

    /// Look up a direction constant by its description-language name.
    pub fn from_name(name: &str) -> Option<Orientation> {
        match name {
            "UP" => Some(Orientation::UP),
            "DOWN" => Some(Orientation::DOWN),
            "LEFT" => Some(Orientation::LEFT),
            "RIGHT" => Some(Orientation::RIGHT),
            _ => None,
        }
    }

    /// Whether both components are zero.
    pub fn is_none(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    /// The opposite direction.
    pub fn reversed(self) -> Orientation {
        Orientation {
            dx: -self.dx,
            dy: -self.dy,
        }
    }

    /// Collapse an arbitrary pixel delta to a unit direction.
    pub fn unit(dx: i32, dy: i32) -> Orientation {
        Orientation {
            dx: dx.signum(),
            dy: dy.signum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_requires_interior_intersection() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        let c = Rect::new(10, 0, 10, 10);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        // Touching edges do not overlap.
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn zero_area_never_overlaps() {
        let a = Rect::new(0, 0, 0, 0);
        let b = Rect::new(0, 0, 10, 10);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn contains_allows_shared_edges() {
        let bounds = Rect::new(0, 0, 30, 20);
        assert!(bounds.contains(&Rect::new(0, 0, 10, 10)));
        assert!(bounds.contains(&Rect::new(20, 10, 10, 10)));
        assert!(!bounds.contains(&Rect::new(25, 10, 10, 10)));
        assert!(!bounds.contains(&Rect::new(-1, 0, 10, 10)));
    }

    #[test]
    fn translated_moves_origin_only() {
        let r = Rect::new(3, 4, 10, 10).translated(-3, 6);
        assert_eq!(r, Rect::new(0, 10, 10, 10));
    }

    #[test]
    fn orientation_reversal_round_trips() {
        for o in Orientation::CARDINAL {
            assert_eq!(o.reversed().reversed(), o);
            assert!(!o.is_none());
        }
        assert!(Orientation::NONE.is_none());
    }

    #[test]
    fn orientation_names_resolve() {
        assert_eq!(Orientation::from_name("UP"), Some(Orientation::UP));
        assert_eq!(Orientation::from_name("down"), None);
    }

    #[test]
    fn unit_collapses_deltas() {
        assert_eq!(Orientation::unit(7, 0), Orientation::RIGHT);
        assert_eq!(Orientation::unit(0, -3), Orientation::UP);
        assert_eq!(Orientation::unit(0, 0), Orientation::NONE);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn arb_rect() -> impl Strategy<Value = Rect> {
            (-100i32..100, -100i32..100, 1u32..40, 1u32..40)
                .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
        }

        proptest! {
            #[test]
            fn overlap_is_symmetric(a in arb_rect(), b in arb_rect()) {
                prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
            }

            #[test]
            fn rect_overlaps_itself(a in arb_rect()) {
                prop_assert!(a.overlaps(&a));
                prop_assert!(a.contains(&a));
            }

            #[test]
            fn containment_implies_overlap(a in arb_rect(), b in arb_rect()) {
                if a.contains(&b) {
                    prop_assert!(a.overlaps(&b));
                }
            }

            #[test]
            fn translation_preserves_size(a in arb_rect(), dx in -50i32..50, dy in -50i32..50) {
                let t = a.translated(dx, dy);
                prop_assert_eq!(t.w, a.w);
                prop_assert_eq!(t.h, a.h);
                prop_assert_eq!(t.translated(-dx, -dy), a);
            }
        }
    }
}
