//! View switching between the landing page and the admin page.
//!
//! The current view is derived from the URL: `?admin=true` selects the
//! admin page, anything else the landing page. [`ViewSwitcher`] keeps that
//! view in step with a [`Navigator`], pushing a new URL on every transition
//! and re-deriving the view when history moves underneath it.
//!
//! The admin flag is not a credential. Anyone who knows the URL reaches the
//! admin page.

/// Query parameter that selects the admin page.
pub const ADMIN_PARAM: &str = "admin";
/// Value of [`ADMIN_PARAM`] that selects the admin page.
pub const ADMIN_VALUE: &str = "true";

/// The two pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Landing,
    Admin,
}

impl View {
    /// Derive the view from a query string, with or without the leading `?`.
    ///
    /// Only the first `admin` parameter counts; later repeats are ignored.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let first_flag = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
            .find(|(name, _)| decode(name) == ADMIN_PARAM);
        match first_flag {
            Some((_, value)) if decode(value) == ADMIN_VALUE => Self::Admin,
            _ => Self::Landing,
        }
    }

    /// Derive the view from a URL (`/path?query#fragment`).
    #[must_use]
    pub fn from_url(url: &str) -> Self {
        let (_, query) = split_url(url);
        Self::from_query(query)
    }

    /// URL for this view at `path`.
    #[must_use]
    pub fn href(self, path: &str) -> String {
        let path = if path.is_empty() { "/" } else { path };
        match self {
            Self::Landing => path.to_owned(),
            Self::Admin => format!("{path}?{ADMIN_PARAM}={ADMIN_VALUE}"),
        }
    }
}

fn decode(raw: &str) -> String {
    let plus_as_space = raw.replace('+', " ");
    urlencoding::decode(&plus_as_space)
        .map_or_else(|_| plus_as_space.clone(), std::borrow::Cow::into_owned)
}

/// Split a URL into its path and query, dropping any fragment.
fn split_url(url: &str) -> (&str, &str) {
    let url = url.split_once('#').map_or(url, |(before, _)| before);
    url.split_once('?').unwrap_or((url, ""))
}

/// The history the switcher reads from and pushes into.
pub trait Navigator {
    /// Current URL.
    fn location(&self) -> String;

    /// Push a new entry without reloading.
    fn push_state(&mut self, url: &str);
}

/// An in-memory session history with back and forward stacks.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<String>,
    index: usize,
}

impl MemoryHistory {
    /// A history holding a single entry.
    #[must_use]
    pub fn new(initial_url: &str) -> Self {
        Self {
            entries: vec![initial_url.to_owned()],
            index: 0,
        }
    }

    /// Step back one entry. Returns the new location, or `None` at the start.
    pub fn back(&mut self) -> Option<&str> {
        self.index = self.index.checked_sub(1)?;
        self.entries.get(self.index).map(String::as_str)
    }

    /// Step forward one entry. Returns the new location, or `None` at the end.
    pub fn forward(&mut self) -> Option<&str> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        self.entries.get(self.index).map(String::as_str)
    }

    /// Number of entries, including any forward entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Navigator for MemoryHistory {
    fn location(&self) -> String {
        self.entries.get(self.index).cloned().unwrap_or_default()
    }

    fn push_state(&mut self, url: &str) {
        self.entries.truncate(self.index + 1);
        self.entries.push(url.to_owned());
        self.index = self.entries.len() - 1;
    }
}

/// Two-state view machine synchronised with a [`Navigator`].
#[derive(Debug)]
pub struct ViewSwitcher<N> {
    navigator: N,
    current: View,
}

impl<N: Navigator> ViewSwitcher<N> {
    /// Derive the initial view from the navigator's current location.
    pub fn new(navigator: N) -> Self {
        let current = View::from_url(&navigator.location());
        Self { navigator, current }
    }

    #[must_use]
    pub fn current(&self) -> View {
        self.current
    }

    /// Landing → Admin.
    pub fn show_admin(&mut self) -> View {
        self.transition(View::Admin)
    }

    /// Admin → Landing. Strips the admin flag from the URL.
    pub fn back(&mut self) -> View {
        self.transition(View::Landing)
    }

    /// Re-derive the view after history moved (back/forward navigation).
    pub fn sync(&mut self) -> View {
        self.current = View::from_url(&self.navigator.location());
        self.current
    }

    #[must_use]
    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Mutable access for history navigation; call [`sync`](Self::sync)
    /// afterwards.
    pub fn navigator_mut(&mut self) -> &mut N {
        &mut self.navigator
    }

    fn transition(&mut self, to: View) -> View {
        if self.current == to {
            return to;
        }
        let location = self.navigator.location();
        let (path, _) = split_url(&location);
        let url = to.href(path);
        tracing::debug!(from = ?self.current, to = ?to, url = %url, "switching view");
        self.navigator.push_state(&url);
        self.current = to;
        to
    }
}
