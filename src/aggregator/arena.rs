//! Bump-allocated, timestamp-tagged arena (spec §4.A).
//!
//! Window aggregation reliably retires entire windows together, so
//! reclamation is chunk-granular: each [`ArenaChunk`] carries a watermark
//! (the largest window key seen while it was the active chunk), and
//! [`Arena::free_before`] retires whole chunks rather than individual
//! places.

use std::alloc::{alloc, dealloc, Layout as AllocLayout};
use std::ptr::NonNull;

const INITIAL_CHUNK_BYTES: usize = 4 * 1024;
const MAX_CHUNK_BYTES: usize = 4 * 1024 * 1024;

/// One bump-allocated memory region.
struct ArenaChunk {
    ptr: NonNull<u8>,
    layout: AllocLayout,
    used: usize,
    /// Maximum window key observed when this chunk was the current
    /// allocation target.
    watermark: i64,
}

// SAFETY: the chunk owns its allocation exclusively; no interior aliasing
// happens across threads because an `Arena` is always owned by a single
// `Variants`/executor at a time.
unsafe impl Send for ArenaChunk {}

// SAFETY: `&ArenaChunk` exposes no interior mutability; every field mutation
// goes through `&mut self`, so sharing a reference across threads can't race.
// Needed so `Variants` (and the `Arena` it owns) can sit inside a `Partition`
// (`Box<dyn Any + Send + Sync>`).
unsafe impl Sync for ArenaChunk {}

impl ArenaChunk {
    fn new(size: usize, watermark: i64) -> Self {
        let layout = AllocLayout::from_size_align(size.max(1), 16).expect("chunk layout");
        // SAFETY: size is non-zero and the layout is valid.
        let ptr = unsafe { alloc(layout) };
        let ptr = NonNull::new(ptr).expect("arena chunk allocation failed");
        Self {
            ptr,
            layout,
            used: 0,
            watermark,
        }
    }

    fn remaining(&self) -> usize {
        self.layout.size() - self.used
    }

    fn try_alloc(&mut self, size: usize, align: usize) -> Option<NonNull<u8>> {
        let base = self.ptr.as_ptr() as usize;
        let cur = base + self.used;
        let aligned = cur.next_multiple_of(align);
        let pad = aligned - cur;
        if pad + size > self.remaining() {
            return None;
        }
        self.used += pad + size;
        // SAFETY: `aligned` is within [base, base + layout.size()) by the
        // check above, and non-null since base is non-null and offset is
        // positive.
        Some(unsafe { NonNull::new_unchecked(aligned as *mut u8) })
    }

    fn reset(&mut self) {
        self.used = 0;
    }
}

impl Drop for ArenaChunk {
    fn drop(&mut self) {
        // SAFETY: ptr/layout are exactly what was passed to `alloc`.
        unsafe { dealloc(self.ptr.as_ptr(), self.layout) };
    }
}

/// Stats returned by [`Arena::free_before`], reported through
/// [`crate::metrics::MetricsCollector`] by callers (§4.J "Log stats").
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FreeStats {
    pub chunks_freed: usize,
    pub bytes_freed: usize,
}

/// A chain of bump-allocated chunks, with timestamp-tagged chunk
/// reclamation and chunk reuse via a free list.
pub struct Arena {
    chunks: Vec<ArenaChunk>,
    free_list: Vec<ArenaChunk>,
    current_timestamp: i64,
    next_chunk_size: usize,
    /// Running count of bytes served from the free list instead of a fresh
    /// `alloc` call (free-list hit accounting).
    pub bytes_reused: u64,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl Arena {
    pub fn new() -> Self {
        Self {
            chunks: Vec::new(),
            free_list: Vec::new(),
            current_timestamp: i64::MIN,
            next_chunk_size: INITIAL_CHUNK_BYTES,
            bytes_reused: 0,
        }
    }

    /// Record the high-water window key for chunks allocated from now on
    /// (spec §4.E step 2). Does not retroactively touch the current chunk's
    /// watermark — that only happens in [`Self::aligned_alloc`], and only if
    /// an allocation actually lands in it, so a chunk that receives no more
    /// writes after this call stays eligible for reclaim at its true (lower)
    /// watermark instead of being dragged forward by a timestamp bump that
    /// never wrote anything into it.
    pub fn set_current_timestamp(&mut self, t: i64) {
        self.current_timestamp = self.current_timestamp.max(t);
    }

    /// Allocate `size` bytes aligned to `align`. Reuses the current chunk if
    /// it has room; otherwise draws a chunk from the free list if one is big
    /// enough, else allocates a new (geometrically larger) chunk.
    pub fn aligned_alloc(&mut self, size: usize, align: usize) -> NonNull<u8> {
        let current_timestamp = self.current_timestamp;
        if let Some(last) = self.chunks.last_mut() {
            if let Some(p) = last.try_alloc(size, align) {
                last.watermark = last.watermark.max(current_timestamp);
                return p;
            }
        }

        // Try the free list for a chunk that already fits.
        if let Some(idx) = self
            .free_list
            .iter()
            .position(|c| c.layout.size() >= size + align)
        {
            let mut chunk = self.free_list.remove(idx);
            chunk.reset();
            chunk.watermark = self.current_timestamp;
            let ptr = chunk
                .try_alloc(size, align)
                .expect("free-list chunk sized to fit");
            self.bytes_reused += size as u64;
            self.chunks.push(chunk);
            return ptr;
        }

        let chunk_size = self.next_chunk_size.max(size + align);
        self.next_chunk_size = (self.next_chunk_size * 2).min(MAX_CHUNK_BYTES);
        let mut chunk = ArenaChunk::new(chunk_size, self.current_timestamp);
        let ptr = chunk.try_alloc(size, align).expect("fresh chunk sized to fit");
        self.chunks.push(chunk);
        ptr
    }

    /// Release every chunk whose watermark is `<= t`, returning it to the
    /// free list. Callers must have already destroyed every place stored in
    /// those chunks (spec §4.J: destroy places, then free the arena).
    pub fn free_before(&mut self, t: i64) -> FreeStats {
        let mut stats = FreeStats::default();
        let mut keep = Vec::with_capacity(self.chunks.len());
        for chunk in self.chunks.drain(..) {
            if chunk.watermark <= t {
                stats.chunks_freed += 1;
                stats.bytes_freed += chunk.layout.size();
                self.free_list.push(chunk);
            } else {
                keep.push(chunk);
            }
        }
        self.chunks = keep;
        stats
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn bytes_allocated(&self) -> usize {
        self.chunks.iter().map(|c| c.used).sum()
    }

    /// Merge another arena's live chunks into this one (spec §4.G step 3:
    /// "splice their arena lists onto the head variants").
    pub fn splice_from(&mut self, mut other: Arena) {
        self.chunks.append(&mut other.chunks);
        self.free_list.append(&mut other.free_list);
        self.bytes_reused += other.bytes_reused;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocates_and_reports_bytes() {
        let mut arena = Arena::new();
        let p1 = arena.aligned_alloc(16, 8);
        let p2 = arena.aligned_alloc(16, 8);
        assert_ne!(p1.as_ptr(), p2.as_ptr());
        assert!(arena.bytes_allocated() >= 32);
    }

    #[test]
    fn free_before_reclaims_old_chunks_only() {
        let mut arena = Arena::new();
        arena.set_current_timestamp(10);
        arena.aligned_alloc(8, 8);
        arena.set_current_timestamp(20);
        // Forces a new chunk by requesting more than remains.
        arena.aligned_alloc(MAX_CHUNK_BYTES, 8);

        let stats = arena.free_before(10);
        assert_eq!(stats.chunks_freed, 1);
        assert_eq!(arena.chunk_count(), 1);
    }

    #[test]
    fn reused_chunk_counts_toward_bytes_reused() {
        let mut arena = Arena::new();
        arena.set_current_timestamp(1);
        arena.aligned_alloc(8, 8);
        arena.free_before(100);
        assert_eq!(arena.chunk_count(), 0);
        arena.aligned_alloc(8, 8);
        assert!(arena.bytes_reused > 0);
    }
}
