//! Environment variable source.
//!
//! Configuration keys are dotted (`spark.shuffle.io.mode`), environment
//! variable names usually are not. With a prefix, a key is mapped to a
//! variable name by upper-casing it and replacing `.` and `-` with `_`:
//!
//! | prefix | key | variable |
//! |---|---|---|
//! | none | `spark.shuffle.io.mode` | `spark.shuffle.io.mode` |
//! | `APP_` | `spark.shuffle.io.mode` | `APP_SPARK_SHUFFLE_IO_MODE` |
//! | `APP_` | `spark.io.retry-wait` | `APP_SPARK_IO_RETRY_WAIT` |

use std::env;

use super::ValueSource;

/// Reads values from the process environment.
///
/// # Examples
///
/// ```
/// use propconf::source::EnvSource;
///
/// let source = EnvSource::with_prefix("APP_");
/// assert_eq!(source.variable_name("spark.shuffle.io.mode"), "APP_SPARK_SHUFFLE_IO_MODE");
///
/// let plain = EnvSource::new();
/// assert_eq!(plain.variable_name("HOME"), "HOME");
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    prefix: Option<String>,
}

impl EnvSource {
    /// Maps each key to the variable of the same name.
    #[must_use]
    pub fn new() -> Self {
        Self { prefix: None }
    }

    /// Maps keys to `PREFIX` + upper-cased key with `.`/`-` turned into `_`.
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    /// The prefix, if any.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// The environment variable consulted for `key`.
    #[must_use]
    pub fn variable_name(&self, key: &str) -> String {
        match &self.prefix {
            None => key.to_string(),
            Some(prefix) => {
                let mut name = String::with_capacity(prefix.len() + key.len());
                name.push_str(prefix);
                name.extend(key.chars().map(|c| match c {
                    '.' | '-' => '_',
                    other => other.to_ascii_uppercase(),
                }));
                name
            }
        }
    }
}

impl ValueSource for EnvSource {
    fn lookup(&self, key: &str) -> Option<String> {
        let name = self.variable_name(key);
        // Names the platform cannot represent would make env::var_os panic.
        if name.is_empty() || name.contains(['=', '\0']) {
            return None;
        }
        match env::var(&name) {
            Ok(value) => Some(value),
            Err(env::VarError::NotPresent) => None,
            Err(env::VarError::NotUnicode(_)) => {
                log::debug!("ignoring non-UTF-8 value in environment variable {name}");
                None
            }
        }
    }

    fn name(&self) -> &str {
        "env"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    /// Sets a variable for the lifetime of the guard.
    struct EnvGuard {
        key: String,
        old_value: Option<String>,
    }

    impl EnvGuard {
        fn new(key: &str, value: &str) -> Self {
            let old_value = env::var(key).ok();
            env::set_var(key, value);
            Self {
                key: key.to_string(),
                old_value,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.old_value {
                Some(v) => env::set_var(&self.key, v),
                None => env::remove_var(&self.key),
            }
        }
    }

    #[test]
    fn test_variable_name_without_prefix() {
        assert_eq!(EnvSource::new().variable_name("a.b-c"), "a.b-c");
        assert_eq!(EnvSource::new().prefix(), None);
    }

    #[test]
    fn test_variable_name_with_prefix() {
        let source = EnvSource::with_prefix("PC_");
        assert_eq!(source.variable_name("spark.io.retry-wait"), "PC_SPARK_IO_RETRY_WAIT");
        assert_eq!(source.prefix(), Some("PC_"));
    }

    #[test]
    #[serial]
    fn test_lookup_prefixed_variable() {
        let _guard = EnvGuard::new("PROPCONF_TEST_SPARK_SHUFFLE_IO_MODE", "EPOLL");
        let source = EnvSource::with_prefix("PROPCONF_TEST_");
        assert_eq!(source.lookup("spark.shuffle.io.mode").as_deref(), Some("EPOLL"));
        assert_eq!(source.lookup("spark.shuffle.io.backLog"), None);
    }

    #[test]
    #[serial]
    fn test_lookup_plain_variable() {
        let _guard = EnvGuard::new("PROPCONF_TEST_PLAIN", "");
        let source = EnvSource::new();
        assert_eq!(source.lookup("PROPCONF_TEST_PLAIN").as_deref(), Some(""));
    }

    #[test]
    fn test_unrepresentable_names_are_absent() {
        let source = EnvSource::new();
        assert_eq!(source.lookup(""), None);
        assert_eq!(source.lookup("a=b"), None);
        assert_eq!(source.lookup("nul\0byte"), None);
        assert_eq!(source.name(), "env");
    }
}
