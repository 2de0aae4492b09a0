//! Flat (brute-force) squared-L2 index.

use memory_core::Neighbor;
use tracing::debug;

use crate::error::IndexError;

/// Exact k-NN index. Position `i` in the build input is chunk index `i`.
#[derive(Debug, Clone)]
pub struct FlatL2Index {
    dimension: usize,
    /// Row-major `len * dimension` buffer.
    data: Vec<f32>,
    len: usize,
}

impl FlatL2Index {
    /// Builds the index from one vector per chunk, in chunk order.
    ///
    /// All vectors must be non-empty and share one dimension. O(n·d).
    pub fn build(vectors: Vec<Vec<f32>>) -> Result<Self, IndexError> {
        let dimension = vectors.first().map(|v| v.len()).unwrap_or(0);
        let mut data = Vec::with_capacity(vectors.len() * dimension);

        for (position, vector) in vectors.iter().enumerate() {
            if vector.is_empty() {
                return Err(IndexError::EmptyVector(position));
            }
            if vector.len() != dimension {
                return Err(IndexError::DimensionMismatch {
                    expected: dimension,
                    actual: vector.len(),
                    position,
                });
            }
            data.extend_from_slice(vector);
        }

        debug!(len = vectors.len(), dimension, "FlatL2Index built");
        Ok(Self {
            dimension,
            data,
            len: vectors.len(),
        })
    }

    /// Number of stored vectors (== number of chunks).
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Dimension shared by every stored vector; 0 for an empty index.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns the `k` nearest chunks to `query`, closest first.
    ///
    /// Ties are broken by chunk index ascending. `k` larger than the index is clamped;
    /// `k == 0` is rejected.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>, IndexError> {
        if k == 0 {
            return Err(IndexError::InvalidK(k));
        }
        if self.is_empty() {
            return Ok(Vec::new());
        }
        if query.len() != self.dimension {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
                position: 0,
            });
        }

        let mut neighbors: Vec<Neighbor> = self
            .data
            .chunks_exact(self.dimension)
            .enumerate()
            .map(|(chunk_index, row)| Neighbor {
                chunk_index,
                distance: squared_l2(row, query),
            })
            .collect();

        neighbors.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then(a.chunk_index.cmp(&b.chunk_index))
        });
        neighbors.truncate(k.min(self.len));
        Ok(neighbors)
    }
}

/// Squared Euclidean distance. Slices are expected to have equal length.
pub fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}
