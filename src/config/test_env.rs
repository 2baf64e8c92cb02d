use std::sync::{LazyLock, Mutex, MutexGuard};

static ENV_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Every variable `apply_env_overrides` reads.
pub(super) const OVERRIDE_KEYS: [&str; 9] = [
    "TELEGRAM_BOT_TOKEN",
    "TELEGRAM_ALLOWED_USERS",
    "OPENROUTER_API_KEY",
    "OPENROUTER_MODEL",
    "OPENROUTER_BASE_URL",
    "OPENROUTER_TIMEOUT",
    "OBSIDIAN_API_BASE_URL",
    "MEMORIA_PATH",
    "SECRETARY_LOG_LEVEL",
];

/// Holds the process-wide env lock, starts from a clean slate for every
/// override key and restores the previous values on drop.
pub(super) struct EnvScope {
    saved: Vec<(&'static str, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvScope {
    pub(super) fn clean() -> Self {
        let lock = ENV_LOCK
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let saved = OVERRIDE_KEYS
            .iter()
            .map(|key| (*key, std::env::var(key).ok()))
            .collect();
        for key in OVERRIDE_KEYS {
            // SAFETY: test-only; ENV_LOCK serializes every env mutation.
            unsafe {
                std::env::remove_var(key);
            }
        }
        Self { saved, _lock: lock }
    }

    pub(super) fn set(&self, key: &'static str, value: &str) {
        // SAFETY: test-only; the scope holds ENV_LOCK.
        unsafe {
            std::env::set_var(key, value);
        }
    }
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        for (key, previous) in &self.saved {
            // SAFETY: test-only restoration while ENV_LOCK is still held.
            unsafe {
                match previous {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}
