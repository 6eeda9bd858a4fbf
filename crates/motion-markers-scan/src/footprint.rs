/// Per-frame record of pixels already attributed to a detection.
#[derive(Clone, Debug)]
pub struct FootprintMask {
    width: usize,
    height: usize,
    claimed: Vec<bool>,
}

impl FootprintMask {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            claimed: vec![false; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Out-of-frame cells are never claimed.
    #[inline]
    pub fn is_claimed(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.claimed[y * self.width + x]
    }

    /// Claim the inclusive rectangle `[x0, x1] x [y0, y1]`, clipped to the frame.
    pub fn claim(&mut self, x0: usize, y0: usize, x1: usize, y1: usize) {
        if self.width == 0 || self.height == 0 || x0 > x1 || y0 > y1 {
            return;
        }
        let x1 = x1.min(self.width - 1);
        let y1 = y1.min(self.height - 1);
        for y in y0..=y1 {
            let row = y * self.width;
            for x in x0..=x1 {
                self.claimed[row + x] = true;
            }
        }
    }

    pub fn claimed_count(&self) -> usize {
        self.claimed.iter().filter(|&&c| c).count()
    }
}
