//! File-backed source: a YAML or `.properties` file read once.
//!
//! The file is parsed when the source is built; lookups only consult the
//! in-memory result, so they never touch the filesystem. Nested YAML
//! mappings are flattened into dotted keys:
//!
//! ```yaml
//! spark:
//!   shuffle:
//!     io:
//!       mode: EPOLL
//!       maxRetries: 5
//! ```
//!
//! yields `spark.shuffle.io.mode = EPOLL` and
//! `spark.shuffle.io.maxRetries = 5`.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;

use super::ValueSource;
use crate::error::{Error, Result};

/// Syntax of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// YAML, nested mappings flattened with `.`.
    Yaml,
    /// `key=value` / `key: value` lines, `#` and `!` comments.
    Properties,
}

impl FileFormat {
    /// Picks a format from the file extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use propconf::source::FileFormat;
    /// use std::path::Path;
    ///
    /// assert_eq!(FileFormat::from_path(Path::new("app.yml")), Some(FileFormat::Yaml));
    /// assert_eq!(FileFormat::from_path(Path::new("app.properties")), Some(FileFormat::Properties));
    /// assert_eq!(FileFormat::from_path(Path::new("app.json")), None);
    /// ```
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "properties" | "conf" => Some(Self::Properties),
            _ => None,
        }
    }
}

/// An immutable snapshot of one configuration file.
#[derive(Debug, Clone)]
pub struct FileSource {
    name: String,
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileSource {
    /// Reads and parses `path`, choosing the format from its extension.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::Parse`] if its extension is unknown or its contents are
    /// invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = FileFormat::from_path(path).ok_or_else(|| Error::Parse {
            path: path.to_path_buf(),
            line: 0,
            message: "unsupported file extension (expected .yaml, .yml, .properties or .conf)"
                .to_string(),
        })?;
        Self::load_as(path, format)
    }

    /// Reads and parses `path` in an explicit format.
    ///
    /// # Errors
    ///
    /// Same as [`FileSource::load`], minus the extension check.
    pub fn load_as(path: impl AsRef<Path>, format: FileFormat) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let source = Self::parse(path, format, &text)?;
        log::debug!(
            "loaded {} key(s) from {}",
            source.entries.len(),
            path.display()
        );
        Ok(source)
    }

    /// Parses already-read text; `path` is used for naming and errors only.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the text is invalid for `format`.
    ///
    /// # Examples
    ///
    /// ```
    /// use propconf::source::{FileFormat, FileSource, ValueSource};
    ///
    /// let text = "spark:\n  network:\n    timeout: 300s\n";
    /// let source = FileSource::parse("inline.yaml", FileFormat::Yaml, text).unwrap();
    /// assert_eq!(source.lookup("spark.network.timeout").as_deref(), Some("300s"));
    /// ```
    pub fn parse(path: impl AsRef<Path>, format: FileFormat, text: &str) -> Result<Self> {
        let path = path.as_ref();
        let entries = match format {
            FileFormat::Yaml => parse_yaml(path, text)?,
            FileFormat::Properties => parse_properties(path, text)?,
        };
        Ok(Self {
            name: format!("file:{}", path.display()),
            path: path.to_path_buf(),
            entries,
        })
    }

    /// The file this snapshot was read from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of keys in the file.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the file defined no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys defined by the file, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl ValueSource for FileSource {
    fn lookup(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn parse_error(path: &Path, line: usize, message: impl Into<String>) -> Error {
    Error::Parse {
        path: path.to_path_buf(),
        line,
        message: message.into(),
    }
}

fn parse_yaml(path: &Path, text: &str) -> Result<HashMap<String, String>> {
    let document: Value = serde_yaml::from_str(text).map_err(|e| {
        let line = e.location().map_or(0, |loc| loc.line());
        parse_error(path, line, e.to_string())
    })?;

    let mut entries = HashMap::new();
    match document {
        Value::Null => {}
        Value::Mapping(_) => flatten(path, "", &document, &mut entries)?,
        _ => return Err(parse_error(path, 0, "top level must be a mapping")),
    }
    Ok(entries)
}

fn flatten(
    path: &Path,
    prefix: &str,
    value: &Value,
    out: &mut HashMap<String, String>,
) -> Result<()> {
    match value {
        Value::Null => {}
        Value::Mapping(mapping) => {
            for (k, v) in mapping {
                let segment = scalar_to_string(k).ok_or_else(|| {
                    parse_error(path, 0, format!("non-scalar key under '{prefix}'"))
                })?;
                let key = if prefix.is_empty() {
                    segment
                } else {
                    format!("{prefix}.{segment}")
                };
                flatten(path, &key, v, out)?;
            }
        }
        Value::Sequence(items) => {
            let parts = items
                .iter()
                .map(|item| {
                    scalar_to_string(item).ok_or_else(|| {
                        parse_error(path, 0, format!("'{prefix}' is a list of non-scalars"))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            out.insert(prefix.to_string(), parts.join(","));
        }
        Value::Tagged(tagged) => flatten(path, prefix, &tagged.value, out)?,
        scalar => {
            if let Some(text) = scalar_to_string(scalar) {
                out.insert(prefix.to_string(), text);
            }
        }
    }
    Ok(())
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

fn parse_properties(path: &Path, text: &str) -> Result<HashMap<String, String>> {
    let mut entries = HashMap::new();
    for (index, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        let (key, value) = split_property(line);
        if key.is_empty() {
            return Err(parse_error(path, index + 1, "empty key"));
        }
        entries.insert(key, value.to_string());
    }
    Ok(entries)
}

/// Splits a trimmed properties line into key and value.
///
/// The key ends at the first unescaped `=`, `:` or whitespace. After
/// whitespace, one optional `=`/`:` and the whitespace around it are
/// skipped, so `k = v`, `k:v` and `k   v` all yield `("k", "v")`. A
/// backslash makes the next character part of the key.
fn split_property(line: &str) -> (String, &str) {
    let mut key = String::new();
    let mut escaped = false;
    for (pos, c) in line.char_indices() {
        if escaped {
            key.push(c);
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => return (key, line[pos + 1..].trim_start()),
            c if c.is_whitespace() => {
                let rest = line[pos..].trim_start();
                let rest = rest.strip_prefix(['=', ':']).unwrap_or(rest);
                return (key, rest.trim_start());
            }
            c => key.push(c),
        }
    }
    (key, "")
}
