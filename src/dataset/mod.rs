use crate::backend::{Backend, Tensor1D, Tensor2D};
use crate::error::{KrrError, KrrResult};
use std::ops::Range;

pub mod memory;
pub mod sinc;
pub use self::memory::InMemoryDataset;
pub use self::sinc::{safe_sinc, sinc_dataset};

/// Source of `(X, y)` samples that can be materialized as backend tensors.
pub trait Dataset {
    /// Host representation of a single sample.
    type Item: ?Sized;

    /// Total number of samples, if known.
    fn len(&self) -> Option<usize>;

    /// Whether the dataset is known to be empty.
    fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Iterates over consecutive batches of at most `batch_size` samples.
    fn batches<B: Backend>(&self, batch_size: usize) -> DatasetBatchIter<'_, B, Self>
    where
        Self: Sized,
    {
        DatasetBatchIter {
            dataset: self,
            batch_size,
            current: 0,
            _backend: std::marker::PhantomData,
        }
    }

    /// Materializes the samples in `range` as `(X, y)` tensors.
    fn get_batch<B: Backend>(&self, range: Range<usize>) -> KrrResult<(Tensor2D<B>, Tensor1D<B>)>;
}

/// Iterator over dataset batches, created by [`Dataset::batches`].
///
/// A zero batch size yields a single [`KrrError::InvalidParameter`].
pub struct DatasetBatchIter<'a, B: Backend, D: ?Sized> {
    dataset: &'a D,
    batch_size: usize,
    current: usize,
    _backend: std::marker::PhantomData<B>,
}

impl<'a, B: Backend, D: Dataset> Iterator for DatasetBatchIter<'a, B, D> {
    type Item = KrrResult<(Tensor2D<B>, Tensor1D<B>)>;

    fn next(&mut self) -> Option<Self::Item> {
        let total = self.dataset.len()?;
        if self.current >= total {
            return None;
        }
        if self.batch_size == 0 {
            self.current = total;
            return Some(Err(KrrError::InvalidParameter(
                "batch size must be at least 1".to_string(),
            )));
        }

        let end = (self.current + self.batch_size).min(total);
        let range = self.current..end;
        self.current = end;

        Some(self.dataset.get_batch::<B>(range))
    }
}
