//! Canonical filter state and the fixed vocabularies it is built from.
//!
//! `FilterState` is the single source of truth for what the dashboard shows.
//! Multi-valued fields (`status`, `priority`) keep the wire encoding: an
//! ordered, comma-joined list of tags. The whole struct doubles as the cache
//! key for fetched pages, so it derives `Hash` and `Eq` over every field.

use std::fmt;

/// Page sizes offered by the page-size selector
pub const PAGE_SIZES: [u32; 3] = [10, 20, 50];

/// Default page size
pub const DEFAULT_LIMIT: u32 = 10;

/// Default sort token (newest first)
pub const DEFAULT_SORT: &str = "-created_at";

/// A member of one of the fixed tag vocabularies (status, priority).
///
/// Lets the editor share toggle/projection logic between the two
/// multi-select controls.
pub trait FilterTag: Copy + Eq + Sized + 'static {
    /// Every value, in display order
    const ALL: &'static [Self];

    /// Wire token (e.g. `"active"`)
    fn as_str(&self) -> &'static str;

    /// Human label for checklists and chips
    fn label(&self) -> &'static str;

    /// Parse a wire token; unknown tokens yield `None`
    fn from_token(token: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == token)
    }
}

/// Distribution lifecycle status as a filter value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusTag {
    Provisioning,
    Active,
    Suspended,
    Disabled,
}

impl FilterTag for StatusTag {
    const ALL: &'static [Self] = &[
        StatusTag::Provisioning,
        StatusTag::Active,
        StatusTag::Suspended,
        StatusTag::Disabled,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            StatusTag::Provisioning => "provisioning",
            StatusTag::Active => "active",
            StatusTag::Suspended => "suspended",
            StatusTag::Disabled => "disabled",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            StatusTag::Provisioning => "Provisioning",
            StatusTag::Active => "Active",
            StatusTag::Suspended => "Suspended",
            StatusTag::Disabled => "Inactive",
        }
    }
}

/// Priority filter value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriorityTag {
    High,
    Medium,
    Low,
}

impl PriorityTag {
    /// Arrow glyph shown next to the label
    #[must_use]
    pub fn icon(&self) -> &'static str {
        match self {
            PriorityTag::High => "↑",
            PriorityTag::Medium => "→",
            PriorityTag::Low => "↓",
        }
    }
}

impl FilterTag for PriorityTag {
    const ALL: &'static [Self] = &[PriorityTag::High, PriorityTag::Medium, PriorityTag::Low];

    fn as_str(&self) -> &'static str {
        match self {
            PriorityTag::High => "high",
            PriorityTag::Medium => "medium",
            PriorityTag::Low => "low",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            PriorityTag::High => "High",
            PriorityTag::Medium => "Medium",
            PriorityTag::Low => "Low",
        }
    }
}

/// Sort options understood by the listing endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    CreatedDesc,
    CreatedAsc,
    UpdatedDesc,
    UpdatedAsc,
    NameAsc,
    NameDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::CreatedDesc,
        SortKey::CreatedAsc,
        SortKey::UpdatedDesc,
        SortKey::UpdatedAsc,
        SortKey::NameAsc,
        SortKey::NameDesc,
    ];

    /// Literal token sent as the `sort` parameter
    #[must_use]
    pub fn token(&self) -> &'static str {
        match self {
            SortKey::CreatedDesc => "-created_at",
            SortKey::CreatedAsc => "created_at",
            SortKey::UpdatedDesc => "-updated_at",
            SortKey::UpdatedAsc => "updated_at",
            SortKey::NameAsc => "name",
            SortKey::NameDesc => "-name",
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::CreatedDesc => "Created At (Newest)",
            SortKey::CreatedAsc => "Created At (Oldest)",
            SortKey::UpdatedDesc => "Updated At (Newest)",
            SortKey::UpdatedAsc => "Updated At (Oldest)",
            SortKey::NameAsc => "Name (A-Z)",
            SortKey::NameDesc => "Name (Z-A)",
        }
    }

    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.token() == token)
    }

    /// Whether the token carries the descending sign
    #[must_use]
    pub fn is_descending(&self) -> bool {
        self.token().starts_with('-')
    }
}

/// The canonical set of active filter, sort and pagination parameters.
///
/// Replaced wholesale on every edit; see [`crate::editor`] for the
/// operations that derive a next state from the current one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterState {
    /// Comma-joined status tags, empty = no filter
    pub status: String,
    /// Name substring, empty = no filter
    pub cname: String,
    /// ISO-8601 lower bound, empty = unbounded
    pub date_from: String,
    /// ISO-8601 upper bound, empty = unbounded
    pub date_to: String,
    /// Comma-joined priority tags, empty = no filter
    pub priority: String,
    /// 1-indexed page
    pub page: u32,
    /// Page size
    pub limit: u32,
    /// Sort token, optional leading `-` for descending
    pub sort: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            status: String::new(),
            cname: String::new(),
            date_from: String::new(),
            date_to: String::new(),
            priority: String::new(),
            page: 1,
            limit: DEFAULT_LIMIT,
            sort: DEFAULT_SORT.to_string(),
        }
    }
}

impl FilterState {
    /// Initial state with configured page size and sort
    #[must_use]
    pub fn with_defaults(limit: u32, sort: &str) -> Self {
        Self {
            limit,
            sort: sort.to_string(),
            ..Self::default()
        }
    }

    /// Both date bounds present
    #[must_use]
    pub fn has_date_range(&self) -> bool {
        !self.date_from.is_empty() && !self.date_to.is_empty()
    }

    /// Currently selected sort option, if the token is a known one
    #[must_use]
    pub fn sort_key(&self) -> Option<SortKey> {
        SortKey::from_token(&self.sort)
    }
}

/// Split a comma-joined tag string into its members, preserving order.
///
/// The empty string is the empty selection.
#[must_use]
pub fn split_tags(encoded: &str) -> Vec<&str> {
    if encoded.is_empty() {
        Vec::new()
    } else {
        encoded.split(',').collect()
    }
}

/// Join tags back into the comma-separated wire form
#[must_use]
pub fn join_tags<S: AsRef<str>>(tags: &[S]) -> String {
    tags.iter()
        .map(|t| t.as_ref())
        .collect::<Vec<_>>()
        .join(",")
}

impl fmt::Display for FilterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "page={} limit={} sort={} status=[{}] priority=[{}] cname={:?} dates={}..{}",
            self.page,
            self.limit,
            self.sort,
            self.status,
            self.priority,
            self.cname,
            self.date_from,
            self.date_to
        )
    }
}
