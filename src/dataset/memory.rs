use crate::backend::{Backend, Tensor1D, Tensor2D};
use crate::dataset::Dataset;
use crate::error::{KrrError, KrrResult};
use std::ops::Range;

/// Row-oriented samples held in host memory.
///
/// Construction validates `x.len() == y.len()`, equal row widths and finite
/// values, so every batch handed to a solver is well-formed.
#[derive(Debug, Clone, PartialEq)]
pub struct InMemoryDataset {
    x: Vec<Vec<f64>>,
    y: Vec<f64>,
}

impl InMemoryDataset {
    pub fn new(x: Vec<Vec<f64>>, y: Vec<f64>) -> KrrResult<Self> {
        if x.len() != y.len() {
            return Err(KrrError::shape(
                format!("{} targets", x.len()),
                format!("{} targets", y.len()),
            ));
        }
        if x.is_empty() {
            return Err(KrrError::EmptyData("dataset has no samples".into()));
        }
        let n_features = x[0].len();
        if n_features == 0 {
            return Err(KrrError::EmptyData("samples have no features".into()));
        }
        if let Some(row) = x.iter().find(|row| row.len() != n_features) {
            return Err(KrrError::shape(
                format!("{} features per sample", n_features),
                format!("{} features", row.len()),
            ));
        }
        let finite = x.iter().flatten().chain(y.iter()).all(|v| v.is_finite());
        if !finite {
            return Err(KrrError::NonFinite("dataset samples".into()));
        }
        Ok(Self { x, y })
    }

    /// One-dimensional samples: `x[i]` becomes the single feature of row `i`.
    pub fn from_columns(x: Vec<f64>, y: Vec<f64>) -> KrrResult<Self> {
        Self::new(x.into_iter().map(|v| vec![v]).collect(), y)
    }

    pub fn n_samples(&self) -> usize {
        self.x.len()
    }

    pub fn n_features(&self) -> usize {
        self.x[0].len()
    }

    pub fn targets(&self) -> &[f64] {
        &self.y
    }

    /// The whole dataset as one `(X, y)` pair.
    pub fn to_tensors<B: Backend>(&self) -> KrrResult<(Tensor2D<B>, Tensor1D<B>)> {
        self.get_batch(0..self.n_samples())
    }
}

impl Dataset for InMemoryDataset {
    type Item = (Vec<f64>, f64);

    fn len(&self) -> Option<usize> {
        Some(self.x.len())
    }

    fn get_batch<B: Backend>(&self, range: Range<usize>) -> KrrResult<(Tensor2D<B>, Tensor1D<B>)> {
        if range.start > range.end || range.end > self.x.len() {
            return Err(KrrError::shape(
                format!("range within 0..{}", self.x.len()),
                format!("{:?}", range),
            ));
        }
        let batch_x = &self.x[range.clone()];
        let batch_y = &self.y[range];

        let data = batch_x.iter().flat_map(|row| row.iter()).copied().collect();
        let x_tensor = Tensor2D::<B>::new(data, batch_x.len(), self.n_features())?;
        let y_tensor = Tensor1D::<B>::new(batch_y.to_vec());

        Ok((x_tensor, y_tensor))
    }
}

#[cfg(test)]
#[cfg(feature = "cpu")]
mod tests {
    use super::*;
    use crate::backend::CpuBackend;

    #[test]
    fn test_in_memory_validation() {
        assert!(matches!(
            InMemoryDataset::new(vec![vec![1.0]], vec![1.0, 2.0]),
            Err(KrrError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            InMemoryDataset::new(vec![], vec![]),
            Err(KrrError::EmptyData(_))
        ));
        assert!(matches!(
            InMemoryDataset::new(vec![vec![1.0, 2.0], vec![3.0]], vec![1.0, 2.0]),
            Err(KrrError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            InMemoryDataset::from_columns(vec![1.0, f64::NAN], vec![1.0, 2.0]),
            Err(KrrError::NonFinite(_))
        ));
    }

    #[test]
    fn test_batches_cover_dataset() {
        let ds = InMemoryDataset::from_columns(
            (0..7).map(|i| i as f64).collect(),
            (0..7).map(|i| 10.0 * i as f64).collect(),
        )
        .unwrap();

        let batches: Vec<_> = ds
            .batches::<CpuBackend>(3)
            .collect::<KrrResult<Vec<_>>>()
            .unwrap();
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].0.shape(), (3, 1));
        assert_eq!(batches[2].0.to_vec(), vec![6.0]);
        assert_eq!(batches[2].1.to_vec(), vec![60.0]);
    }

    #[test]
    fn test_zero_batch_size() {
        let ds = InMemoryDataset::from_columns(vec![1.0, 2.0], vec![1.0, 2.0]).unwrap();
        let mut it = ds.batches::<CpuBackend>(0);
        assert!(matches!(it.next(), Some(Err(KrrError::InvalidParameter(_)))));
        assert!(it.next().is_none());
    }

    #[test]
    fn test_get_batch_out_of_range() {
        let ds = InMemoryDataset::from_columns(vec![1.0, 2.0], vec![1.0, 2.0]).unwrap();
        assert!(ds.get_batch::<CpuBackend>(1..3).is_err());
        let (x, y) = ds.to_tensors::<CpuBackend>().unwrap();
        assert_eq!(x.shape(), (2, 1));
        assert_eq!(y.len(), 2);
    }
}
