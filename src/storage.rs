//! Embedding matrix representations.

use ndarray::{Array2, ArrayView2, Axis, CowArray, Ix1};

/// Embedding matrix storage.
///
/// Abstracts over concrete representations of the *n x d* embedding
/// matrix.
pub trait Storage {
    /// Get the embedding dimensionality.
    fn dims(&self) -> usize;

    /// Get the embedding at `idx`.
    fn embedding(&self, idx: usize) -> CowArray<f32, Ix1>;

    /// Get the shape of the storage as *(words, dimensions)*.
    fn shape(&self) -> (usize, usize);
}

/// In-memory embedding matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct NdArray {
    inner: Array2<f32>,
}

impl NdArray {
    /// Construct storage from a matrix with one row per word.
    pub fn new(inner: Array2<f32>) -> Self {
        NdArray { inner }
    }

    /// Get a view of the embedding matrix.
    pub fn view(&self) -> ArrayView2<f32> {
        self.inner.view()
    }

    /// Decompose the storage into the backing matrix.
    pub fn into_inner(self) -> Array2<f32> {
        self.inner
    }
}

impl Storage for NdArray {
    fn dims(&self) -> usize {
        self.inner.ncols()
    }

    fn embedding(&self, idx: usize) -> CowArray<f32, Ix1> {
        CowArray::from(self.inner.index_axis(Axis(0), idx))
    }

    fn shape(&self) -> (usize, usize) {
        self.inner.dim()
    }
}
