//! Growable typed vertex buffers.
//!
//! Buffers grow with a 2x strategy when a full upload exceeds capacity and
//! never shrink. Partial writes are bounds-checked against the uploaded
//! length and never reallocate.

use std::marker::PhantomData;
use std::ops::Range;

use wgpu::util::DeviceExt;

/// Minimum allocation, in bytes.
const MIN_CAPACITY: usize = 64;

/// Capacity to allocate for `needed` bytes when `current` is too small.
fn grown_capacity(current: usize, needed: usize) -> usize {
    (needed * 2).max(current + 1024).max(MIN_CAPACITY)
}

/// New capacity for a full upload of `needed` bytes, or `None` if the
/// current allocation already holds it.
fn reallocation(current: usize, needed: usize) -> Option<usize> {
    (needed > current).then(|| grown_capacity(current, needed))
}

/// Byte range of `len` items starting at item `offset`, if it lies within
/// the first `count` items.
pub(crate) fn checked_byte_range<T>(
    offset: usize,
    len: usize,
    count: usize,
) -> Option<Range<u64>> {
    let end = offset.checked_add(len)?;
    if end > count {
        return None;
    }
    let size = size_of::<T>();
    let start = offset.checked_mul(size)?;
    let end = end.checked_mul(size)?;
    Some(start as u64..end as u64)
}

/// A GPU buffer of `T` items that grows on demand.
pub struct TypedBuffer<T> {
    buffer: wgpu::Buffer,
    capacity: usize,
    count: usize,
    usage: wgpu::BufferUsages,
    label: String,
    _marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> TypedBuffer<T> {
    /// Buffer initialized from existing data.
    pub fn new_with_data(
        device: &wgpu::Device,
        label: &str,
        data: &[T],
        usage: wgpu::BufferUsages,
    ) -> Self {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let buffer = if bytes.is_empty() {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: MIN_CAPACITY as u64,
                usage: usage | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        } else {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytes,
                usage: usage | wgpu::BufferUsages::COPY_DST,
            })
        };

        Self {
            buffer,
            capacity: bytes.len().max(MIN_CAPACITY),
            count: data.len(),
            usage,
            label: label.to_owned(),
            _marker: PhantomData,
        }
    }

    /// Replace the whole contents, growing if necessary.
    ///
    /// Returns `true` if the buffer was reallocated.
    pub fn write(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> bool {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let needed = bytes.len();

        let reallocated = if let Some(capacity) =
            reallocation(self.capacity, needed)
        {
            self.buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(&self.label),
                size: capacity as u64,
                usage: self.usage | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            log::debug!(
                "{}: grew {} -> {} bytes",
                self.label,
                self.capacity,
                capacity
            );
            self.capacity = capacity;
            true
        } else {
            false
        };

        if needed > 0 {
            queue.write_buffer(&self.buffer, 0, bytes);
        }
        self.count = data.len();
        reallocated
    }

    /// Overwrite `data.len()` items starting at item `offset`.
    ///
    /// Returns `false` and writes nothing if the range extends past the
    /// uploaded items.
    pub fn write_at(
        &self,
        queue: &wgpu::Queue,
        offset: usize,
        data: &[T],
    ) -> bool {
        let Some(range) =
            checked_byte_range::<T>(offset, data.len(), self.count)
        else {
            return false;
        };
        if !data.is_empty() {
            queue.write_buffer(
                &self.buffer,
                range.start,
                bytemuck::cast_slice(data),
            );
        }
        true
    }

    /// The underlying GPU buffer.
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Number of uploaded items.
    pub fn count(&self) -> usize {
        self.count
    }
}
