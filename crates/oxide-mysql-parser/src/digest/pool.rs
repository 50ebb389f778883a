//! A pool of reusable digesters.

use std::ops::{Deref, DerefMut};

use parking_lot::Mutex;
use tracing::trace;

use super::Digester;
use crate::mode::SqlMode;

/// Idle digesters kept by a default pool.
pub(crate) const DEFAULT_MAX_IDLE: usize = 16;

/// A thread-safe pool of [`Digester`]s.
///
/// Checking out a digester reuses an idle one when available; dropping
/// the guard returns it unless the pool already holds `max_idle`.
#[derive(Debug)]
pub struct DigesterPool {
    idle: Mutex<Vec<Digester>>,
    max_idle: usize,
    mode: SqlMode,
}

impl Default for DigesterPool {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_IDLE)
    }
}

impl DigesterPool {
    /// Creates an empty pool keeping at most `max_idle` idle digesters.
    #[must_use]
    pub const fn new(max_idle: usize) -> Self {
        Self::with_mode(max_idle, SqlMode::NONE)
    }

    /// Creates an empty pool whose digesters scan with `mode`.
    #[must_use]
    pub const fn with_mode(max_idle: usize, mode: SqlMode) -> Self {
        Self {
            idle: Mutex::new(Vec::new()),
            max_idle,
            mode,
        }
    }

    /// Checks out a digester.
    pub fn get(&self) -> PooledDigester<'_> {
        let digester = self.idle.lock().pop().unwrap_or_else(|| {
            trace!(max_idle = self.max_idle, "allocating digester");
            Digester::new(self.mode)
        });
        PooledDigester {
            pool: self,
            digester,
        }
    }

    /// Returns the number of idle digesters.
    #[must_use]
    pub fn idle(&self) -> usize {
        self.idle.lock().len()
    }

    /// Normalizes `sql` with a pooled digester.
    #[must_use]
    pub fn digest_text(&self, sql: &str) -> String {
        self.get().digest_text(sql)
    }

    /// Hashes `sql` with a pooled digester.
    #[must_use]
    pub fn digest_hash(&self, sql: &str) -> String {
        self.get().digest_hash(sql)
    }

    fn put(&self, digester: Digester) {
        let mut idle = self.idle.lock();
        if idle.len() < self.max_idle {
            idle.push(digester);
            trace!(idle = idle.len(), "returned digester to pool");
        }
    }
}

/// A digester checked out of a [`DigesterPool`].
#[derive(Debug)]
pub struct PooledDigester<'a> {
    pool: &'a DigesterPool,
    digester: Digester,
}

impl Deref for PooledDigester<'_> {
    type Target = Digester;

    fn deref(&self) -> &Digester {
        &self.digester
    }
}

impl DerefMut for PooledDigester<'_> {
    fn deref_mut(&mut self) -> &mut Digester {
        &mut self.digester
    }
}

impl Drop for PooledDigester<'_> {
    fn drop(&mut self) {
        let mut digester = std::mem::take(&mut self.digester);
        digester.set_mode(self.pool.mode);
        self.pool.put(digester);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_returns_digester() {
        let pool = DigesterPool::new(2);
        assert_eq!(pool.idle(), 0);
        {
            let mut d = pool.get();
            assert_eq!(d.digest_text("select 1"), "select ?");
        }
        assert_eq!(pool.idle(), 1);
        assert_eq!(pool.digest_text("select 'a'"), "select ?");
        assert_eq!(pool.idle(), 1);
    }

    #[test]
    fn test_idle_limit() {
        let pool = DigesterPool::new(1);
        let a = pool.get();
        let b = pool.get();
        drop(a);
        drop(b);
        assert_eq!(pool.idle(), 1);
    }

    #[test]
    fn test_default_pool_keeps_sixteen() {
        let pool = DigesterPool::default();
        let guards: Vec<_> = (0..20).map(|_| pool.get()).collect();
        drop(guards);
        assert_eq!(pool.idle(), DEFAULT_MAX_IDLE);
        assert_eq!(pool.digest_hash("select 1"), super::super::digest_hash("select 2"));
    }

    #[test]
    fn test_mode_is_restored_on_return() {
        let pool = DigesterPool::with_mode(1, SqlMode::ANSI_QUOTES);
        {
            let mut d = pool.get();
            d.set_mode(SqlMode::NONE);
        }
        assert_eq!(pool.digest_text("select \"a\""), "select a");
    }

    #[test]
    fn test_pool_is_shared_across_threads() {
        let pool = DigesterPool::new(4);
        std::thread::scope(|s| {
            for i in 0..4 {
                let pool = &pool;
                s.spawn(move || {
                    let sql = format!("select {i} from t");
                    assert_eq!(pool.digest_text(&sql), "select ? from t");
                });
            }
        });
        assert!(pool.idle() <= 4);
    }
}
