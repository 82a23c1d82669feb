//! Axis-aligned rectangle and interval predicates.
//!
//! A [`Rect`] is a closed rectangle over two axes. Footprints use it in the
//! (x, y) plane and front faces in the (y, z) plane, so for a front face the
//! first axis is y and the second is z.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl Rect {
    pub fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Rectangle with its lower corner at `(x, y)` and the given extents.
    pub fn from_origin(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            x0: x,
            y0: y,
            x1: x + w,
            y1: y + h,
        }
    }

    pub fn w(&self) -> u32 {
        self.x1 - self.x0
    }

    pub fn h(&self) -> u32 {
        self.y1 - self.y0
    }

    pub fn area(&self) -> u64 {
        self.w() as u64 * self.h() as u64
    }

    /// True if `other` lies entirely inside `self` (shared edges allowed).
    pub fn contains(&self, other: &Rect) -> bool {
        self.x0 <= other.x0 && other.x1 <= self.x1 && self.y0 <= other.y0 && other.y1 <= self.y1
    }

    /// The positive-area intersection, if there is one.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x0 = self.x0.max(other.x0);
        let y0 = self.y0.max(other.y0);
        let x1 = self.x1.min(other.x1);
        let y1 = self.y1.min(other.y1);
        (x0 < x1 && y0 < y1).then_some(Rect { x0, y0, x1, y1 })
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]x[{}, {}]", self.x0, self.x1, self.y0, self.y1)
    }
}

/// True iff `a` and `b` intersect with strictly positive area.
///
/// Identical rectangles, containment and partial overlap all count; sharing
/// only an edge or a corner does not.
pub fn rectangles_overlap(a: &Rect, b: &Rect) -> bool {
    a.x0.max(b.x0) < a.x1.min(b.x1) && a.y0.max(b.y0) < a.y1.min(b.y1)
}

/// True iff `b_z0` lies in the half-open span `[a_z0, a_z0 + a_height)`.
pub fn vertical_interval_overlap(a_z0: u32, a_height: u32, b_z0: u32) -> bool {
    b_z0 >= a_z0 && b_z0 - a_z0 < a_height
}

/// Front-face blocking test used while unloading.
///
/// True if the two faces overlap with positive area, or if `b` starts along
/// y inside the half-open y-span of `a`.
pub fn front_faces_adjacent_or_overlap(a: &Rect, b: &Rect) -> bool {
    rectangles_overlap(a, b) || (a.x0 <= b.x0 && b.x0 < a.x1)
}

/// True iff the union of `parts` covers every point of `target`.
///
/// The parts are clipped to `target` and the target is cut into a grid along
/// every clipped edge; each grid cell then lies either fully inside or fully
/// outside each part, so it is enough to find one part containing each cell.
pub fn union_covers(target: &Rect, parts: &[Rect]) -> bool {
    if target.area() == 0 {
        return true;
    }

    let clipped: Vec<Rect> = parts
        .iter()
        .filter_map(|p| p.intersection(target))
        .collect();
    if clipped.is_empty() {
        return false;
    }

    let mut xs = vec![target.x0, target.x1];
    let mut ys = vec![target.y0, target.y1];
    for r in &clipped {
        xs.extend([r.x0, r.x1]);
        ys.extend([r.y0, r.y1]);
    }
    xs.sort_unstable();
    xs.dedup();
    ys.sort_unstable();
    ys.dedup();

    for xw in xs.windows(2) {
        for yw in ys.windows(2) {
            let cell = Rect::new(xw[0], yw[0], xw[1], yw[1]);
            if !clipped.iter().any(|r| r.contains(&cell)) {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap_partial() {
        let a = Rect::from_origin(0, 0, 10, 10);
        let b = Rect::from_origin(5, 5, 10, 10);
        assert!(rectangles_overlap(&a, &b));
    }

    #[test]
    fn test_overlap_identical_and_contained() {
        let a = Rect::from_origin(0, 0, 10, 10);
        assert!(rectangles_overlap(&a, &a));
        let inner = Rect::from_origin(2, 2, 3, 3);
        assert!(rectangles_overlap(&a, &inner));
        assert!(rectangles_overlap(&inner, &a));
    }

    #[test]
    fn test_shared_edge_and_corner_do_not_overlap() {
        let a = Rect::from_origin(0, 0, 10, 10);
        assert!(!rectangles_overlap(&a, &Rect::from_origin(10, 0, 10, 10)));
        assert!(!rectangles_overlap(&a, &Rect::from_origin(0, 10, 10, 10)));
        assert!(!rectangles_overlap(&a, &Rect::from_origin(10, 10, 5, 5)));
    }

    #[test]
    fn test_vertical_interval() {
        assert!(vertical_interval_overlap(0, 10, 0));
        assert!(vertical_interval_overlap(0, 10, 9));
        assert!(!vertical_interval_overlap(0, 10, 10));
        assert!(!vertical_interval_overlap(10, 10, 0));
    }

    #[test]
    fn test_front_face_adjacency() {
        // Stacked face directly above: zero-area touch, but y starts inside.
        let low = Rect::from_origin(0, 0, 50, 10);
        let high = Rect::from_origin(0, 10, 30, 10);
        assert!(!rectangles_overlap(&low, &high));
        assert!(front_faces_adjacent_or_overlap(&high, &low));

        // Neighbour starting exactly at the end of the span is not adjacent.
        let a = Rect::from_origin(0, 0, 30, 10);
        let b = Rect::from_origin(30, 0, 15, 10);
        assert!(!front_faces_adjacent_or_overlap(&a, &b));
    }

    #[test]
    fn test_union_covers_tiled() {
        let target = Rect::from_origin(0, 0, 10, 20);
        let parts = [Rect::from_origin(0, 0, 10, 10), Rect::from_origin(0, 10, 10, 10)];
        assert!(union_covers(&target, &parts));
    }

    #[test]
    fn test_union_covers_gap() {
        let target = Rect::from_origin(0, 0, 10, 30);
        let parts = [Rect::from_origin(0, 0, 10, 10), Rect::from_origin(0, 20, 10, 10)];
        assert!(!union_covers(&target, &parts));
    }

    #[test]
    fn test_union_covers_overhang() {
        let target = Rect::from_origin(1, 0, 10, 10);
        let parts = [Rect::from_origin(0, 0, 10, 10)];
        assert!(!union_covers(&target, &parts));
    }

    #[test]
    fn test_union_covers_larger_support() {
        let target = Rect::from_origin(10, 0, 10, 30);
        let parts = [Rect::from_origin(0, 0, 20, 50)];
        assert!(union_covers(&target, &parts));
    }

    #[test]
    fn test_union_covers_nothing() {
        assert!(!union_covers(&Rect::from_origin(0, 0, 1, 1), &[]));
    }

    fn rect() -> impl Strategy<Value = Rect> {
        (0u32..50, 0u32..50, 1u32..30, 1u32..30).prop_map(|(x, y, w, h)| Rect::from_origin(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(a in rect(), b in rect()) {
            prop_assert_eq!(rectangles_overlap(&a, &b), rectangles_overlap(&b, &a));
        }

        #[test]
        fn prop_overlap_matches_intersection(a in rect(), b in rect()) {
            prop_assert_eq!(rectangles_overlap(&a, &b), a.intersection(&b).is_some());
        }

        #[test]
        fn prop_edge_neighbours_never_overlap(a in rect(), h in 1u32..30) {
            let right = Rect::from_origin(a.x1, a.y0, 5, h);
            let above = Rect::from_origin(a.x0, a.y1, a.w(), h);
            prop_assert!(!rectangles_overlap(&a, &right));
            prop_assert!(!rectangles_overlap(&a, &above));
        }

        #[test]
        fn prop_split_halves_cover(a in rect(), cut in 0u32..30) {
            let cut = a.x0 + cut % a.w();
            let left = Rect::new(a.x0, a.y0, cut, a.y1);
            let right = Rect::new(cut, a.y0, a.x1, a.y1);
            prop_assert!(union_covers(&a, &[left, right]));
            prop_assert!(!union_covers(&a, &[right]) || cut == a.x0);
        }
    }
}
