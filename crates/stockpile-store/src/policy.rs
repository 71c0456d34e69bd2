//! Ownership policy: who may see or mutate an item
//!
//! An item belongs to a concrete caller or carries the wildcard sentinel
//! marking it shared. The same rule drives single-record checks and
//! listing filters; filters are pushed into the store layer so pagination
//! and counts stay consistent with what a caller is allowed to see.

/// Sentinel owner value marking an item as shared/public.
pub const WILDCARD_OWNER: &str = "*";

/// Default page size for listings.
pub const DEFAULT_PAGE_LIMIT: u64 = 10;

/// Decide whether `caller` may read or mutate an item with this owner.
///
/// Wildcard-owned items are open to everyone, including anonymous
/// callers; concretely-owned items only to the matching caller. Reads
/// and writes follow the same table.
pub fn permits(owner: &str, caller: Option<&str>) -> bool {
    owner == WILDCARD_OWNER || caller == Some(owner)
}

/// Listing filter equivalent of [`permits`], applied at the query layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Visibility {
    /// Wildcard-owned records only (the anonymous default).
    Shared,
    /// Wildcard-owned records plus those owned by the given caller.
    SharedOr(String),
    /// Records owned by the given caller only ("mine only").
    OwnedBy(String),
}

impl Visibility {
    /// Build the filter for a caller.
    ///
    /// This is the single filter constructor every endpoint goes through;
    /// handlers never assemble store queries themselves.
    pub fn for_caller(caller: Option<&str>, mine_only: bool) -> Self {
        match caller {
            Some(id) if mine_only => Visibility::OwnedBy(id.to_string()),
            Some(id) => Visibility::SharedOr(id.to_string()),
            None => Visibility::Shared,
        }
    }

    /// Whether a record with this owner matches the filter.
    pub fn matches(&self, owner: &str) -> bool {
        match self {
            Visibility::Shared => owner == WILDCARD_OWNER,
            Visibility::SharedOr(id) => owner == WILDCARD_OWNER || owner == id,
            Visibility::OwnedBy(id) => owner == id,
        }
    }
}

/// Pagination window: `skip = page * limit`, `take = limit`.
#[derive(Clone, Copy, Debug)]
pub struct Page {
    pub page: u64,
    pub limit: u64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl Page {
    pub fn new(page: u64, limit: u64) -> Self {
        Self { page, limit }
    }

    pub fn offset(&self) -> u64 {
        self.page * self.limit
    }
}
