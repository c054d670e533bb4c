use std::fmt;

/// Distance between rooms with no path between them.
pub const INFINITE: usize = usize::MAX;

/// Row-major square matrix of costs, indexed by (src, dst).
#[derive(Clone, PartialEq, Eq)]
pub struct SquareArray {
    cols: usize,
    data: Vec<usize>,
}

impl SquareArray {
    pub fn new(cols: usize, initial_value: usize) -> Self {
        Self { cols, data: vec![initial_value; cols * cols] }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, src: usize, dst: usize) -> usize {
        self.data[src * self.cols + dst]
    }

    pub fn set(&mut self, src: usize, dst: usize, v: usize) {
        self.data[src * self.cols + dst] = v;
    }

    pub fn row(&self, src: usize) -> &[usize] {
        let start = src * self.cols;
        &self.data[start..(start + self.cols)]
    }
}

impl fmt::Debug for SquareArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for src in 0..self.cols {
            for &d in self.row(src) {
                if d == INFINITE {
                    write!(f, "  -")?;
                } else {
                    write!(f, "{d:3}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Floyd-Warshall over direct tunnel costs. Rooms that can't reach each other stay INFINITE.
pub fn shortest_paths(weights: &SquareArray) -> SquareArray {
    let mut dist = weights.clone();
    let n = dist.cols();
    for i in 0..n {
        dist.set(i, i, 0);
    }

    for mid in 0..n {  // "mid" is short for "middleman"
        for src in 0..n {
            let to_mid = dist.get(src, mid);
            if to_mid == INFINITE {
                continue;
            }
            for dst in 0..n {
                // Saturate so a missing leg never wraps around to a short path.
                let via_mid = to_mid.saturating_add(dist.get(mid, dst));
                if via_mid < dist.get(src, dst) {
                    dist.set(src, dst, via_mid);
                }
            }
        }
    }
    dist
}
