use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use regio_logging::{debug, warn};

use crate::error::{RegionError, Result};
use crate::geometry::Rect;

/// Sentinel index terminating a slot chain.
pub(crate) const NONE: u32 = u32::MAX;

static NEXT_POOL_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy)]
struct Slot {
    rect: Rect,
    next: u32,
}

impl Default for Slot {
    fn default() -> Self {
        Slot { rect: Rect::default(), next: NONE }
    }
}

/// A slot arena supplying rectangle storage to [`Region`](crate::Region)s.
///
/// Storage is a contiguous slot array with a free-index stack, so regions
/// hold validated indices instead of raw pointers. A liveness bitmap catches
/// releases of slots that are already free, which with a raw free list would
/// silently corrupt it.
///
/// One pool is typically created per window-manager instance and shared by
/// every region in that subsystem. A pool is `Send` but not `Sync`; see
/// [`SharedRectPool`] for cross-thread sharing.
#[derive(Debug)]
pub struct RectPool {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: Vec<u64>,
    fixed: bool,
    id: u64,
}

impl RectPool {
    /// Creates a growable pool pre-sized for `capacity_hint` rectangles.
    ///
    /// The hint bounds the initial allocation only; acquiring past it grows
    /// the arena. Fails with [`RegionError::OutOfMemory`] when the backing
    /// block cannot be allocated.
    pub fn with_capacity(capacity_hint: usize) -> Result<Self> {
        Self::build(capacity_hint, false)
    }

    /// Creates a fixed-capacity pool that never grows.
    ///
    /// Acquiring from an exhausted fixed pool fails with
    /// [`RegionError::PoolExhausted`]. Intended for memory-constrained
    /// targets where the rectangle budget is decided up front.
    pub fn fixed(capacity: usize) -> Result<Self> {
        Self::build(capacity, true)
    }

    fn build(capacity: usize, fixed: bool) -> Result<Self> {
        let mut slots = Vec::new();
        slots.try_reserve_exact(capacity).map_err(|_| RegionError::OutOfMemory)?;
        slots.resize(capacity, Slot::default());

        let mut free = Vec::new();
        free.try_reserve_exact(capacity).map_err(|_| RegionError::OutOfMemory)?;
        // Reversed so the lowest index is handed out first.
        free.extend((0..capacity as u32).rev());

        let mut live = Vec::new();
        let words = capacity.div_ceil(64);
        live.try_reserve_exact(words).map_err(|_| RegionError::OutOfMemory)?;
        live.resize(words, 0);

        Ok(RectPool {
            slots,
            free,
            live,
            fixed,
            id: NEXT_POOL_ID.fetch_add(1, Ordering::Relaxed),
        })
    }

    /// Total slot count, free and live.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots currently held by regions.
    pub fn live_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Whether this pool refuses to grow.
    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    pub(crate) fn acquire(&mut self, rect: Rect) -> Result<u32> {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                if self.fixed {
                    return Err(RegionError::PoolExhausted { capacity: self.slots.len() });
                }
                self.grow()?;
                match self.free.pop() {
                    Some(index) => index,
                    None => return Err(RegionError::OutOfMemory),
                }
            }
        };
        self.set_live(index, true);
        self.slots[index as usize] = Slot { rect, next: NONE };
        Ok(index)
    }

    pub(crate) fn release(&mut self, index: u32) {
        if !self.is_live(index) {
            warn!(index, "ignoring release of a slot that is not live");
            return;
        }
        self.set_live(index, false);
        self.free.push(index);
    }

    pub(crate) fn rect(&self, index: u32) -> Rect {
        self.slots[index as usize].rect
    }

    pub(crate) fn rect_mut(&mut self, index: u32) -> &mut Rect {
        &mut self.slots[index as usize].rect
    }

    pub(crate) fn next(&self, index: u32) -> u32 {
        self.slots[index as usize].next
    }

    pub(crate) fn set_next(&mut self, index: u32, next: u32) {
        self.slots[index as usize].next = next;
    }

    fn grow(&mut self) -> Result<()> {
        let old = self.slots.len();
        let new = (old * 2).max(8);
        let added = new - old;

        self.slots.try_reserve_exact(added).map_err(|_| RegionError::OutOfMemory)?;
        self.free.try_reserve_exact(added).map_err(|_| RegionError::OutOfMemory)?;
        let words = new.div_ceil(64) - self.live.len();
        self.live.try_reserve_exact(words).map_err(|_| RegionError::OutOfMemory)?;

        self.slots.resize(new, Slot::default());
        self.free.extend((old as u32..new as u32).rev());
        self.live.resize(new.div_ceil(64), 0);

        debug!(old_capacity = old, new_capacity = new, "grew rectangle pool");
        Ok(())
    }

    fn is_live(&self, index: u32) -> bool {
        self.live[index as usize / 64] & (1 << (index % 64)) != 0
    }

    fn set_live(&mut self, index: u32, live: bool) {
        let word = index as usize / 64;
        let bit = 1u64 << (index % 64);
        if live {
            self.live[word] |= bit;
        } else {
            self.live[word] &= !bit;
        }
    }
}

/// A [`RectPool`] behind a mutex, for the threaded build where several UI
/// threads share one arena.
///
/// All serialization happens at this boundary: lock, run the region
/// operations, drop the guard. Single-threaded callers use [`RectPool`]
/// directly and pay nothing.
#[derive(Debug, Clone)]
pub struct SharedRectPool {
    inner: Arc<Mutex<RectPool>>,
}

impl SharedRectPool {
    pub fn new(pool: RectPool) -> Self {
        SharedRectPool { inner: Arc::new(Mutex::new(pool)) }
    }

    /// Locks the pool for a batch of region operations.
    ///
    /// A poisoned lock is recovered rather than propagated: the pool's
    /// invariants are index-based and survive a panicking thread.
    pub fn lock(&self) -> MutexGuard<'_, RectPool> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
