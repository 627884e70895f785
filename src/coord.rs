/// 2D cell coordinate. Both axes start at zero.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord2 {
    pub x: u32,
    pub y: u32,
}

impl Coord2 {
    pub const ZERO: Coord2 = Coord2 { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Row-major index of this coordinate, or `None` outside `width x height`.
    #[inline]
    pub const fn to_index(self, width: u32, height: u32) -> Option<usize> {
        if self.x >= width || self.y >= height {
            return None;
        }
        Some(self.y as usize * width as usize + self.x as usize)
    }

    #[inline]
    pub const fn from_index(index: usize, width: u32) -> Self {
        if width == 0 {
            return Coord2::ZERO;
        }
        Self {
            x: (index % width as usize) as u32,
            y: (index / width as usize) as u32,
        }
    }
}
