#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Both dimensions are clamped to at least 1 so scaling never divides by zero.
    pub fn clamped(width: i32, height: i32) -> Self {
        Self {
            width: width.max(1) as u32,
            height: height.max(1) as u32,
        }
    }

    pub fn full_rect(self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }
}

/// Pixel rectangle; `x`/`y` may be negative, the extent never is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(self) -> i32 {
        self.x.saturating_add(self.w as i32)
    }

    pub fn bottom(self) -> i32 {
        self.y.saturating_add(self.h as i32)
    }

    pub fn is_empty(self) -> bool {
        self.w == 0 || self.h == 0
    }

    pub fn contains_rect(self, other: Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if left >= right || top >= bottom {
            return None;
        }
        Some(Rect::new(
            left,
            top,
            (right - left) as u32,
            (bottom - top) as u32,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_viewport_never_collapses_to_zero() {
        assert_eq!(
            Viewport::clamped(0, -5),
            Viewport {
                width: 1,
                height: 1
            }
        );
        assert_eq!(
            Viewport::clamped(240, 160),
            Viewport {
                width: 240,
                height: 160
            }
        );
    }

    #[test]
    fn intersect_handles_overlap_and_disjoint_rects() {
        let a = Rect::new(0, 0, 10, 10);
        assert_eq!(a.intersect(Rect::new(5, -5, 10, 10)), Some(Rect::new(5, 0, 5, 5)));
        assert_eq!(a.intersect(Rect::new(10, 0, 4, 4)), None);
    }

    #[test]
    fn contains_rect_is_inclusive_of_edges() {
        let sheet = Rect::new(0, 0, 1241, 636);
        assert!(sheet.contains_rect(Rect::new(1001, 476, 240, 160)));
        assert!(!sheet.contains_rect(Rect::new(1002, 476, 240, 160)));
    }
}
