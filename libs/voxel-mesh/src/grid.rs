//! # Dense Sample Grid
//!
//! Row-major 3D array used for occupancy tags and scalar fields.

use serde::{Deserialize, Serialize};

use crate::error::MeshError;

/// A dense 3D array addressed by `[x, y, z]`.
///
/// Samples are stored with `z` varying fastest, then `y`, then `x`:
/// `offset = (x * ny + y) * nz + z`.
///
/// # Example
///
/// ```rust
/// use voxel_mesh::Grid3;
///
/// let mut grid = Grid3::filled([2, 3, 4], 0i32).unwrap();
/// grid.set([1, 2, 3], 7);
/// assert_eq!(grid.get([1, 2, 3]), Some(7));
/// assert_eq!(grid.get([2, 0, 0]), None);
/// assert_eq!(grid.len(), 24);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridParts<T>")]
pub struct Grid3<T> {
    dims: [usize; 3],
    data: Vec<T>,
}

/// Unchecked serialized form of [`Grid3`].
#[derive(Deserialize)]
struct GridParts<T> {
    dims: [usize; 3],
    data: Vec<T>,
}

impl<T> TryFrom<GridParts<T>> for Grid3<T> {
    type Error = MeshError;

    fn try_from(parts: GridParts<T>) -> Result<Self, MeshError> {
        let expected = sample_count::<T>(parts.dims)?;
        if parts.data.len() != expected {
            return Err(MeshError::invalid_volume(
                parts.dims,
                format!("expected {} samples, got {}", expected, parts.data.len()),
            ));
        }
        Ok(Self {
            dims: parts.dims,
            data: parts.data,
        })
    }
}

/// Number of samples in a grid of `dims`, if a buffer of that many `T`
/// can be allocated.
fn sample_count<T>(dims: [usize; 3]) -> Result<usize, MeshError> {
    dims.iter()
        .try_fold(1usize, |acc, &n| acc.checked_mul(n))
        .filter(|&count| {
            count
                .checked_mul(std::mem::size_of::<T>())
                .is_some_and(|bytes| bytes <= isize::MAX as usize)
        })
        .ok_or_else(|| MeshError::invalid_volume(dims, "sample count overflows"))
}

impl<T: Copy> Grid3<T> {
    /// Creates a grid with every sample set to `value`.
    ///
    /// Fails when the sample count does not fit in memory addressing.
    pub fn filled(dims: [usize; 3], value: T) -> Result<Self, MeshError> {
        Ok(Self {
            dims,
            data: vec![value; sample_count::<T>(dims)?],
        })
    }

    /// Wraps an existing sample buffer.
    pub fn from_vec(dims: [usize; 3], data: Vec<T>) -> Result<Self, MeshError> {
        Self::try_from(GridParts { dims, data })
    }

    /// Returns the sample count along each axis.
    #[inline]
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// Returns the total number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the grid holds no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns true if `index` lies inside the grid.
    #[inline]
    pub fn contains(&self, index: [usize; 3]) -> bool {
        index[0] < self.dims[0] && index[1] < self.dims[1] && index[2] < self.dims[2]
    }

    #[inline]
    fn offset(&self, index: [usize; 3]) -> usize {
        (index[0] * self.dims[1] + index[1]) * self.dims[2] + index[2]
    }

    /// Returns the sample at `index`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, index: [usize; 3]) -> Option<T> {
        if self.contains(index) {
            Some(self.data[self.offset(index)])
        } else {
            None
        }
    }

    /// Writes the sample at `index`. Returns false (and writes nothing)
    /// outside the grid.
    #[inline]
    pub fn set(&mut self, index: [usize; 3], value: T) -> bool {
        if !self.contains(index) {
            return false;
        }
        let offset = self.offset(index);
        self.data[offset] = value;
        true
    }

    /// Returns the flat sample buffer.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Builds a new grid of the same shape by mapping every sample.
    pub fn map<U: Copy>(&self, f: impl Fn(T) -> U) -> Grid3<U> {
        Grid3 {
            dims: self.dims,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Iterates `([x, y, z], value)` pairs in storage order.
    pub fn indexed_iter(&self) -> impl Iterator<Item = ([usize; 3], T)> + '_ {
        let [_, ny, nz] = self.dims;
        self.data.iter().enumerate().map(move |(offset, &value)| {
            let z = offset % nz;
            let y = (offset / nz) % ny;
            let x = offset / (nz * ny);
            ([x, y, z], value)
        })
    }
}
