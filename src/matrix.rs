//! Dense square matrix.

/// A dense n×n matrix of `f64` stored in row-major order.
///
/// Used for cost, visibility, trail and probability data as well as the
/// per-ant pheromone deposit.
///
/// # Examples
///
/// ```
/// use u_antcolony::Matrix;
///
/// let mut m = Matrix::new(3);
/// m.set(0, 2, 4.5);
/// assert_eq!(m.get(0, 2), 4.5);
/// assert_eq!(m.row(0), &[0.0, 0.0, 4.5]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix {
    data: Vec<f64>,
    size: usize,
}

impl Matrix {
    /// Creates a zero matrix of the given size.
    pub fn new(size: usize) -> Self {
        Self::filled(size, 0.0)
    }

    /// Creates a matrix with every entry set to `value`.
    pub fn filled(size: usize, value: f64) -> Self {
        Self {
            data: vec![value; size * size],
            size,
        }
    }

    /// Creates a matrix from row-major data.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Number of rows (and columns).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns entry `(from, to)`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets entry `(from, to)`.
    pub fn set(&mut self, from: usize, to: usize, value: f64) {
        self.data[from * self.size + to] = value;
    }

    /// Returns row `from` as a slice.
    pub fn row(&self, from: usize) -> &[f64] {
        &self.data[from * self.size..(from + 1) * self.size]
    }

    pub(crate) fn row_mut(&mut self, from: usize) -> &mut [f64] {
        &mut self.data[from * self.size..(from + 1) * self.size]
    }

    /// Iterates over all entries in row-major order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().copied()
    }

    /// Multiplies every entry by `factor`.
    pub fn scale(&mut self, factor: f64) {
        for v in &mut self.data {
            *v *= factor;
        }
    }

    /// Adds `factor * other` elementwise.
    ///
    /// # Panics
    ///
    /// Panics if the sizes differ.
    pub fn add_scaled(&mut self, other: &Matrix, factor: f64) {
        assert_eq!(self.size, other.size, "matrix size mismatch");
        for (a, b) in self.data.iter_mut().zip(&other.data) {
            *a += factor * b;
        }
    }

    /// Sum of all entries.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Number of entries different from zero.
    pub fn count_nonzero(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0.0).count()
    }

    /// Smallest and largest entry, or `None` for an empty matrix.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        if self.data.is_empty() {
            return None;
        }
        Some(self.data.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(lo, hi), &v| (lo.min(v), hi.max(v)),
        ))
    }
}
