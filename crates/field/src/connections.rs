//! Per-tick bookkeeping of which particle pairs already have a drawn line.
//!
//! The matrix exists so a pair is never stroked twice in one frame and so
//! the per-particle connection cap can be enforced. It carries no state
//! across ticks: the field clears it at the top of every update.

/// A symmetric count×count boolean matrix.
///
/// Indexing with an out-of-range particle index panics, as with any slice.
#[derive(Debug, Clone)]
pub struct ConnectionMatrix {
    count: usize,
    cells: Vec<bool>,
}

impl ConnectionMatrix {
    /// Creates an all-false matrix for `count` particles.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            cells: vec![false; count * count],
        }
    }

    /// Number of particles this matrix covers.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Resets every pair to unconnected.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Marks the pair `(i, j)` connected. Writes both triangles, so the
    /// matrix stays symmetric by construction.
    pub fn record(&mut self, i: usize, j: usize) {
        self.cells[i * self.count + j] = true;
        self.cells[j * self.count + i] = true;
    }

    /// True if either orientation of the pair has been recorded.
    pub fn is_connected(&self, i: usize, j: usize) -> bool {
        self.cells[i * self.count + j] || self.cells[j * self.count + i]
    }

    /// Number of distinct partners recorded for particle `i`.
    pub fn degree(&self, i: usize) -> usize {
        let row = &self.cells[i * self.count..(i + 1) * self.count];
        row.iter().filter(|&&c| c).count()
    }

    /// True when `cells[i][j] == cells[j][i]` for every pair.
    pub fn is_symmetric(&self) -> bool {
        (0..self.count).all(|i| {
            (0..self.count).all(|j| self.cells[i * self.count + j] == self.cells[j * self.count + i])
        })
    }
}
