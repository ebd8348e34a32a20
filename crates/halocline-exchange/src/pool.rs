//! Fixed-size staging buffers for the buffer-mediated faces.

use halocline_core::{ExchangeError, Face};
use halocline_geometry::PlateLayout;
use indexmap::IndexMap;

/// One face's staging buffer.
///
/// Owned exclusively by its face: no two faces ever touch the same
/// buffer, which is why the pool needs no interior locking. Allocated
/// once at [`BufferPool::init`] and reused every step; the decomposition
/// is static, so there is no resizing path.
#[derive(Clone, Debug)]
pub struct TransferBuffer {
    face: Face,
    data: Vec<f64>,
}

impl TransferBuffer {
    /// The owning face.
    pub fn face(&self) -> Face {
        self.face
    }

    /// Buffer length in elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer is empty (only for zero-width halos).
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Read-only view of the staged values.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Mutable view of the staged values.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }
}

/// Lazily allocated pool of the four staging buffers (Bot/Top/Left/Right).
///
/// The slab faces (Front/Back) transfer contiguously and need no staging,
/// so they never appear here.
#[derive(Clone, Debug, Default)]
pub struct BufferPool {
    buffers: IndexMap<Face, TransferBuffer>,
    live: bool,
}

impl BufferPool {
    /// Create an empty, uninitialized pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate every staging buffer from the layout's fixed sizes.
    ///
    /// Idempotent: a buffer that already exists is kept as-is, so calling
    /// twice neither reallocates nor leaks and buffer identities are
    /// stable across repeated calls.
    pub fn init(&mut self, layout: &PlateLayout) {
        for face in Face::BUFFERED {
            self.buffers.entry(face).or_insert_with(|| TransferBuffer {
                face,
                data: vec![0.0; layout.staging_len(face)],
            });
        }
        self.live = true;
    }

    /// Release all buffers. The pool is no longer usable; any subsequent
    /// buffer access fails with [`ExchangeError::NotInitialized`].
    pub fn teardown(&mut self) {
        self.buffers = IndexMap::new();
        self.live = false;
    }

    /// Whether `init()` has been called and `teardown()` has not.
    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Borrow a face's buffer.
    pub fn buffer(&self, face: Face) -> Result<&TransferBuffer, ExchangeError> {
        if !self.live {
            return Err(ExchangeError::NotInitialized);
        }
        self.buffers.get(&face).ok_or(ExchangeError::NotInitialized)
    }

    /// Mutably borrow a face's buffer.
    pub fn buffer_mut(&mut self, face: Face) -> Result<&mut TransferBuffer, ExchangeError> {
        if !self.live {
            return Err(ExchangeError::NotInitialized);
        }
        self.buffers
            .get_mut(&face)
            .ok_or(ExchangeError::NotInitialized)
    }

    /// Total staging memory in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.buffers
            .values()
            .map(|b| b.len() * std::mem::size_of::<f64>())
            .sum()
    }
}
