//! Navigation history strategies.
//!
//! # Responsibilities
//! - Keep the stack of visited app locations and the current position
//! - Translate between app locations ("/game") and browser URLs
//!   ("/base/game" or "/base/#/game")
//!
//! # Design Decisions
//! - Both strategies share one entry stack; they differ only in URL shape
//! - The base path is normalized, never rejected
//! - Pushing after going back discards the forward entries

use std::fmt;

/// Stack of app locations with a cursor.
#[derive(Debug, Clone)]
pub struct Entries {
    stack: Vec<String>,
    position: usize,
}

impl Entries {
    fn new(initial: &str) -> Self {
        Self {
            stack: vec![initial.to_string()],
            position: 0,
        }
    }

    fn offset(&self, delta: isize) -> Option<usize> {
        let target = self.position.checked_add_signed(delta)?;
        (target < self.stack.len()).then_some(target)
    }
}

/// A navigation history the router drives.
pub trait History: Send + Sync + fmt::Debug {
    /// Normalized base path ("/" when mounted at the root).
    fn base(&self) -> &str;

    /// Browser URL for an app location.
    fn create_href(&self, location: &str) -> String;

    /// App location for a browser URL, or `None` if the URL lies outside
    /// this history's base. `sensitive` controls how the base is compared.
    fn location_from_url(&self, url: &str, sensitive: bool) -> Option<String>;

    /// Path below the base ("" for the base itself), or `None` when `path`
    /// is outside it. Only whole segments match: "/basement" is not under
    /// "/base".
    fn strip_base<'a>(&self, path: &'a str, sensitive: bool) -> Option<&'a str> {
        let base = self.base();
        let prefix = if base == "/" { "" } else { base };
        let head = path.get(..prefix.len())?;
        let same = if sensitive {
            head == prefix
        } else {
            head.eq_ignore_ascii_case(prefix)
        };
        if !same {
            return None;
        }
        let rest = &path[prefix.len()..];
        (rest.is_empty() || rest.starts_with('/')).then_some(rest)
    }

    fn entries(&self) -> &Entries;

    fn entries_mut(&mut self) -> &mut Entries;

    /// Current app location.
    fn location(&self) -> &str {
        let entries = self.entries();
        &entries.stack[entries.position]
    }

    /// Number of entries in the stack.
    fn len(&self) -> usize {
        self.entries().stack.len()
    }

    /// Location `delta` entries away from the current one.
    fn peek(&self, delta: isize) -> Option<&str> {
        let entries = self.entries();
        entries.offset(delta).map(|i| entries.stack[i].as_str())
    }

    fn push(&mut self, location: &str) {
        let entries = self.entries_mut();
        entries.stack.truncate(entries.position + 1);
        entries.stack.push(location.to_string());
        entries.position += 1;
    }

    fn replace(&mut self, location: &str) {
        let entries = self.entries_mut();
        entries.stack[entries.position] = location.to_string();
    }

    /// Move the cursor. Returns false and stays put when out of range.
    fn go(&mut self, delta: isize) -> bool {
        let entries = self.entries_mut();
        match entries.offset(delta) {
            Some(target) => {
                entries.position = target;
                true
            }
            None => false,
        }
    }
}

/// Normalize a base path: leading slash, no trailing slash, "" for root.
fn normalize_base(base: &str) -> String {
    let base = base.trim();
    let trimmed = base.trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// Split "path?query#frag" into ("path", "?query#frag").
fn split_path(url: &str) -> (&str, &str) {
    match url.find(['?', '#']) {
        Some(i) => url.split_at(i),
        None => (url, ""),
    }
}

/// History reflected in the real address bar path.
#[derive(Debug, Clone)]
pub struct WebHistory {
    base: String,
    entries: Entries,
}

impl WebHistory {
    /// Create a history rooted at `base`, starting at the app root.
    pub fn new(base: &str) -> Self {
        Self {
            base: normalize_base(base),
            entries: Entries::new("/"),
        }
    }
}

impl History for WebHistory {
    fn base(&self) -> &str {
        if self.base.is_empty() {
            "/"
        } else {
            &self.base
        }
    }

    fn create_href(&self, location: &str) -> String {
        format!("{}{}", self.base, location)
    }

    fn location_from_url(&self, url: &str, sensitive: bool) -> Option<String> {
        let (path, rest) = split_path(url);
        let remainder = self.strip_base(path, sensitive)?;
        if remainder.is_empty() {
            Some(format!("/{}", rest))
        } else {
            Some(format!("{}{}", remainder, rest))
        }
    }

    fn entries(&self) -> &Entries {
        &self.entries
    }

    fn entries_mut(&mut self) -> &mut Entries {
        &mut self.entries
    }
}

/// History kept in the URL fragment; the server only ever sees the base.
#[derive(Debug, Clone)]
pub struct HashHistory {
    base: String,
    entries: Entries,
}

impl HashHistory {
    pub fn new(base: &str) -> Self {
        Self {
            base: normalize_base(base),
            entries: Entries::new("/"),
        }
    }
}

impl History for HashHistory {
    fn base(&self) -> &str {
        if self.base.is_empty() {
            "/"
        } else {
            &self.base
        }
    }

    fn create_href(&self, location: &str) -> String {
        format!("{}/#{}", self.base, location)
    }

    fn location_from_url(&self, url: &str, sensitive: bool) -> Option<String> {
        let (path, fragment) = match url.split_once('#') {
            Some((path, fragment)) => (path, Some(fragment)),
            None => (url, None),
        };
        let (path, _query) = split_path(path);
        let remainder = self.strip_base(path, sensitive)?;
        if !(remainder.is_empty() || remainder == "/") {
            return None;
        }
        match fragment {
            Some(f) if f.starts_with('/') => Some(f.to_string()),
            Some(f) if !f.is_empty() => Some(format!("/{}", f)),
            _ => Some("/".to_string()),
        }
    }

    fn entries(&self) -> &Entries {
        &self.entries
    }

    fn entries_mut(&mut self) -> &mut Entries {
        &mut self.entries
    }
}
