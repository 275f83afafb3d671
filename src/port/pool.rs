//! Berth allocation pool.

use super::berth::{Berth, BerthId, DEFAULT_LOCK_TIMEOUT};
use super::mooring::Mooring;
use crate::error::{PortError, Result};
use crate::warehouse::Warehouse;
use parking_lot::{Condvar, Mutex};
use std::collections::{HashMap, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default bounded wait for a free berth.
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Bookkeeping guarded as one unit.
///
/// Every berth is either in `available` or a value in `held`, never both.
struct PoolState<R> {
    available: VecDeque<Arc<Berth>>,
    held: HashMap<R, Arc<Berth>>,
}

/// A fixed set of berths handed out to requesters one at a time.
///
/// Availability and the requester -> berth mapping live behind a single
/// mutex, so taking a berth off the queue and recording its holder happen in
/// one critical section. Waiters block on a condition variable with a
/// deadline; they never wait unbounded.
pub struct BerthPool<R> {
    berths: Vec<Arc<Berth>>,
    state: Mutex<PoolState<R>>,
    vacated: Condvar,
    acquire_timeout: Duration,
}

impl<R> BerthPool<R>
where
    R: Eq + Hash + Clone + Debug,
{
    /// Create a pool of `berth_count` berths bound to `warehouse`, with the
    /// default timeouts.
    pub fn new(berth_count: usize, warehouse: Arc<Warehouse>) -> Result<Self> {
        Self::with_timeouts(
            berth_count,
            warehouse,
            DEFAULT_ACQUIRE_TIMEOUT,
            DEFAULT_LOCK_TIMEOUT,
        )
    }

    /// Create a pool with explicit timeouts.
    ///
    /// * `acquire_timeout` - bounded wait for a free berth
    /// * `lock_timeout` - bounded wait for each warehouse guard during a transfer
    pub fn with_timeouts(
        berth_count: usize,
        warehouse: Arc<Warehouse>,
        acquire_timeout: Duration,
        lock_timeout: Duration,
    ) -> Result<Self> {
        if berth_count == 0 {
            return Err(PortError::Config(
                "a port needs at least one berth".to_string(),
            ));
        }

        let last_id = u32::try_from(berth_count).map_err(|_| {
            PortError::Config(format!(
                "berth_count {} exceeds the largest berth id {}",
                berth_count,
                u32::MAX
            ))
        })?;

        let berths: Vec<Arc<Berth>> = (1..=last_id)
            .map(|id| Arc::new(Berth::new(BerthId(id), Arc::clone(&warehouse), lock_timeout)))
            .collect();

        let state = PoolState {
            available: berths.iter().cloned().collect(),
            held: HashMap::with_capacity(berth_count),
        };

        tracing::debug!(berth_count, "berth pool created");

        Ok(Self {
            berths,
            state: Mutex::new(state),
            vacated: Condvar::new(),
            acquire_timeout,
        })
    }

    /// Take a berth for `requester`. Returns `true` on success.
    pub fn acquire(&self, requester: &R) -> bool {
        match self.try_acquire(requester) {
            Ok(_) => true,
            Err(err) => {
                tracing::debug!(requester = ?requester, error = %err, "berth refused");
                false
            }
        }
    }

    /// Take a berth for `requester`, waiting at most the acquire timeout.
    ///
    /// # Returns
    ///
    /// * `Ok(berth)` - The berth now held by `requester`
    /// * `Err(PortError::AlreadyHeld)` - `requester` already holds a berth
    /// * `Err(PortError::Timeout)` - No berth became free in time
    ///
    /// A timeout too large to express as an `Instant` waits without a deadline.
    pub fn try_acquire(&self, requester: &R) -> Result<Arc<Berth>> {
        let deadline = Instant::now().checked_add(self.acquire_timeout);
        let mut state = self.state.lock();
        let mut woken = false;

        loop {
            if state.held.contains_key(requester) {
                // Pass the wakeup on to a waiter that can use the free berth.
                if woken && !state.available.is_empty() {
                    self.vacated.notify_one();
                }
                return Err(PortError::AlreadyHeld(format!("{:?}", requester)));
            }

            if let Some(berth) = state.available.pop_front() {
                state.held.insert(requester.clone(), Arc::clone(&berth));
                tracing::info!(
                    requester = ?requester,
                    berth = berth.id().0,
                    available = state.available.len(),
                    "berth acquired"
                );
                if state.available.is_empty() {
                    tracing::debug!("no free berths left");
                }
                return Ok(berth);
            }

            match deadline {
                Some(deadline) => {
                    if self.vacated.wait_until(&mut state, deadline).timed_out()
                        && state.available.is_empty()
                    {
                        return Err(PortError::Timeout(format!(
                            "a free berth for {:?} after {:?}",
                            requester, self.acquire_timeout
                        )));
                    }
                }
                None => self.vacated.wait(&mut state),
            }
            woken = true;
        }
    }

    /// Return the berth held by `requester`. Returns `true` on success.
    pub fn release(&self, requester: &R) -> bool {
        match self.try_release(requester) {
            Ok(()) => true,
            Err(err @ PortError::ConsistencyViolation(_)) => {
                tracing::error!(requester = ?requester, error = %err, "berth release broke the pool");
                false
            }
            Err(err) => {
                tracing::warn!(requester = ?requester, error = %err, "berth release refused");
                false
            }
        }
    }

    /// Return the berth held by `requester` to the pool.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The berth is available again
    /// * `Err(PortError::NotHeld)` - `requester` holds no berth
    /// * `Err(PortError::ConsistencyViolation)` - The berth was already available
    pub fn try_release(&self, requester: &R) -> Result<()> {
        let mut state = self.state.lock();

        let berth = state
            .held
            .remove(requester)
            .ok_or_else(|| PortError::NotHeld(format!("{:?}", requester)))?;

        if state.available.len() >= self.berths.len()
            || state.available.iter().any(|b| b.id() == berth.id())
        {
            return Err(PortError::ConsistencyViolation(format!(
                "{} returned by {:?} is already available",
                berth.id(),
                requester
            )));
        }

        tracing::info!(requester = ?requester, berth = berth.id().0, "berth released");
        state.available.push_back(berth);
        drop(state);

        self.vacated.notify_one();
        Ok(())
    }

    /// The berth currently held by `requester`.
    pub fn lookup(&self, requester: &R) -> Result<Arc<Berth>> {
        self.state
            .lock()
            .held
            .get(requester)
            .cloned()
            .ok_or_else(|| PortError::NotHeld(format!("{:?}", requester)))
    }

    /// Take a berth and wrap it in a guard that releases it when dropped.
    pub fn moor(&self, requester: R) -> Result<Mooring<'_, R>> {
        let berth = self.try_acquire(&requester)?;
        Ok(Mooring::new(self, requester, berth))
    }

    /// Whether `requester` currently holds a berth.
    pub fn is_holding(&self, requester: &R) -> bool {
        self.state.lock().held.contains_key(requester)
    }

    /// Snapshot of the number of free berths.
    pub fn available(&self) -> usize {
        self.state.lock().available.len()
    }

    /// Snapshot of current holders, ordered by berth id.
    pub fn holders(&self) -> Vec<(R, BerthId)> {
        let mut holders: Vec<(R, BerthId)> = self
            .state
            .lock()
            .held
            .iter()
            .map(|(requester, berth)| (requester.clone(), berth.id()))
            .collect();
        holders.sort_by_key(|(_, id)| *id);
        holders
    }

    pub fn berth_count(&self) -> usize {
        self.berths.len()
    }

    pub fn berths(&self) -> &[Arc<Berth>] {
        &self.berths
    }

    pub fn acquire_timeout(&self) -> Duration {
        self.acquire_timeout
    }
}

impl<R> std::fmt::Debug for BerthPool<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BerthPool")
            .field("berth_count", &self.berths.len())
            .field("acquire_timeout", &self.acquire_timeout)
            .finish_non_exhaustive()
    }
}
