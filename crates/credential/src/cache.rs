//! Ephemeral, process-scoped credential cache

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use tempfile::TempDir;
use tracing::debug;

use crate::error::CredentialError;

/// Environment variable the surrounding identity libraries read to locate
/// the credential cache.
pub const CACHE_ENV: &str = "KRB5CCNAME";

static LIVE: AtomicBool = AtomicBool::new(false);

/// A process-private credential cache published through [`CACHE_ENV`].
///
/// Holds the short-lived administrative credential for the lifetime of the
/// run, never touching the operator's default on-disk holder. Creating the
/// cache publishes its location to the environment; dropping it restores
/// the previous value (or removes the variable) and deletes the backing
/// directory. Hard kill signals bypass drop and leave cleanup to the
/// temporary-directory reaper.
///
/// At most one cache may be live per process.
#[derive(Debug)]
pub struct EphemeralCache {
    _dir: TempDir,
    path: PathBuf,
    prior: Option<OsString>,
}

impl EphemeralCache {
    /// Allocate the cache and publish its location.
    pub fn acquire() -> Result<Self, CredentialError> {
        if LIVE
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(CredentialError::CacheBusy);
        }
        let dir = match TempDir::new() {
            Ok(dir) => dir,
            Err(err) => {
                LIVE.store(false, Ordering::SeqCst);
                return Err(CredentialError::CacheUnavailable(err));
            }
        };
        let path = dir.path().join("krb5cc");
        let prior = env::var_os(CACHE_ENV);
        // SAFETY: the process is single-threaded for its whole lifetime
        // (every step of the flow blocks the one control thread), so no
        // other thread can be reading the environment concurrently.
        unsafe { env::set_var(CACHE_ENV, Self::location_for(&path)) };
        debug!(cache = %path.display(), "published ephemeral credential cache");
        Ok(Self {
            _dir: dir,
            path,
            prior,
        })
    }

    /// Filesystem path of the cache inside the private directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The `FILE:`-style location string published to the environment.
    pub fn location(&self) -> String {
        Self::location_for(&self.path)
    }

    fn location_for(path: &Path) -> String {
        format!("FILE:{}", path.display())
    }
}

impl Drop for EphemeralCache {
    fn drop(&mut self) {
        // SAFETY: same single-threaded invariant as in `acquire`.
        unsafe {
            match self.prior.take() {
                Some(prev) => env::set_var(CACHE_ENV, prev),
                None => env::remove_var(CACHE_ENV),
            }
        }
        LIVE.store(false, Ordering::SeqCst);
        debug!("released ephemeral credential cache");
    }
}

/// Serializes tests that touch [`CACHE_ENV`] or the per-process liveness
/// flag. Shared with the bootstrap tests.
#[cfg(test)]
pub(crate) static TEST_ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;

    fn lock() -> std::sync::MutexGuard<'static, ()> {
        TEST_ENV_LOCK
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    #[test]
    fn publishes_location_and_restores_prior_value() {
        let _guard = lock();
        // SAFETY: serialized by TEST_ENV_LOCK.
        unsafe { env::set_var(CACHE_ENV, "FILE:/tmp/operator-cache") };

        let cache = EphemeralCache::acquire().unwrap();
        assert_eq!(env::var(CACHE_ENV).unwrap(), cache.location());
        assert!(cache.location().starts_with("FILE:"));

        drop(cache);
        assert_eq!(env::var(CACHE_ENV).unwrap(), "FILE:/tmp/operator-cache");

        // SAFETY: serialized by TEST_ENV_LOCK.
        unsafe { env::remove_var(CACHE_ENV) };
    }

    #[test]
    fn removes_variable_when_none_was_set() {
        let _guard = lock();
        // SAFETY: serialized by TEST_ENV_LOCK.
        unsafe { env::remove_var(CACHE_ENV) };

        let cache = EphemeralCache::acquire().unwrap();
        assert!(env::var_os(CACHE_ENV).is_some());

        drop(cache);
        assert!(env::var_os(CACHE_ENV).is_none());
    }

    #[test]
    fn at_most_one_cache_per_process() {
        let _guard = lock();

        let first = EphemeralCache::acquire().unwrap();
        assert!(matches!(
            EphemeralCache::acquire(),
            Err(CredentialError::CacheBusy)
        ));

        // Releasing the first cache makes a new bootstrap possible.
        drop(first);
        let second = EphemeralCache::acquire().unwrap();
        drop(second);
    }
}
