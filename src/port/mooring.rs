//! RAII mooring guard.

use super::berth::Berth;
use super::pool::BerthPool;
use crate::error::Result;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

/// RAII guard for a held berth.
///
/// When dropped, the berth is returned to its pool.
/// If the release fails, a warning is logged but no panic occurs.
pub struct Mooring<'a, R>
where
    R: Eq + Hash + Clone + Debug,
{
    pool: &'a BerthPool<R>,
    requester: R,
    berth: Arc<Berth>,

    /// Whether the berth has been released manually.
    released: bool,
}

impl<'a, R> Mooring<'a, R>
where
    R: Eq + Hash + Clone + Debug,
{
    pub(super) fn new(pool: &'a BerthPool<R>, requester: R, berth: Arc<Berth>) -> Self {
        Self {
            pool,
            requester,
            berth,
            released: false,
        }
    }

    pub fn berth(&self) -> &Berth {
        &self.berth
    }

    pub fn requester(&self) -> &R {
        &self.requester
    }

    /// Manually release the berth.
    ///
    /// Use this to handle a failed release explicitly instead of relying
    /// on the warning emitted by `Drop`.
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        self.pool.try_release(&self.requester)
    }
}

impl<R> Drop for Mooring<'_, R>
where
    R: Eq + Hash + Clone + Debug,
{
    fn drop(&mut self) {
        if !self.released
            && let Err(e) = self.pool.try_release(&self.requester)
        {
            tracing::warn!(
                requester = ?self.requester,
                berth = self.berth.id().0,
                error = %e,
                "failed to release berth"
            );
        }
    }
}

impl<R> Debug for Mooring<'_, R>
where
    R: Eq + Hash + Clone + Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mooring")
            .field("requester", &self.requester)
            .field("berth", &self.berth.id())
            .field("released", &self.released)
            .finish()
    }
}
