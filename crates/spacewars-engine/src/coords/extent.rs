/// Integer pixel size of a window or texture.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Extent {
    pub width: u32,
    pub height: u32,
}

impl Extent {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Integer division of both axes, as used for sprite downscaling.
    #[inline]
    pub const fn div(self, divisor: u32) -> Self {
        Self::new(self.width / divisor, self.height / divisor)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn div_truncates() {
        assert_eq!(Extent::new(400, 200).div(4), Extent::new(100, 50));
        assert_eq!(Extent::new(401, 203).div(4), Extent::new(100, 50));
    }
}
