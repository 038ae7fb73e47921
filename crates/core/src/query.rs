// Container query types
//
// StatusFilter and Pagination are parsed leniently from query-string values:
// unknown statuses mean "no filter", unusable page numbers fall back to defaults.

use crate::container::Container;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Filter on the hold status of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// No filtering.
    #[default]
    Any,
    /// At least one active hold.
    Active,
    /// Non-empty hold list with no active hold.
    Inactive,
}

impl StatusFilter {
    /// Map a `status` query value. Only the literals "true" and "false" filter.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("true") => StatusFilter::Active,
            Some("false") => StatusFilter::Inactive,
            _ => StatusFilter::Any,
        }
    }

    pub fn matches(&self, container: &Container) -> bool {
        match self {
            StatusFilter::Any => true,
            StatusFilter::Active => container.has_active_hold(),
            StatusFilter::Inactive => {
                !container.hold_types.is_empty() && !container.has_active_hold()
            }
        }
    }
}

/// 1-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub page_size: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    /// Pagination is requested only when both values are present and non-empty.
    pub fn from_params(page: Option<&str>, page_size: Option<&str>) -> Option<Self> {
        match (page, page_size) {
            (Some(page), Some(page_size)) if !page.is_empty() && !page_size.is_empty() => {
                Some(Self {
                    page: parse_positive(page).unwrap_or(DEFAULT_PAGE),
                    page_size: parse_positive(page_size).unwrap_or(DEFAULT_PAGE_SIZE),
                })
            }
            _ => None,
        }
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> u64 {
        self.page_size
    }

    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.page_size.max(1))
    }

    /// Take this page out of an already filtered, ordered list.
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        let offset = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(self.limit()).unwrap_or(usize::MAX);
        items.into_iter().skip(offset).take(limit).collect()
    }
}

fn parse_positive(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok().filter(|n| *n >= 1)
}

/// One page of results plus the totals needed to navigate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, pagination: Pagination) -> Self {
        Self {
            items,
            total,
            page: pagination.page,
            total_pages: pagination.total_pages(total),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::HoldTypeEntry;
    use chrono::Utc;
    use uuid::Uuid;

    fn container_with(statuses: &[bool]) -> Container {
        let now = Utc::now();
        let mut container = Container::new("CONT", now);
        for (i, status) in statuses.iter().enumerate() {
            let mut entry = HoldTypeEntry::active(format!("T{i}"), Uuid::now_v7(), now);
            entry.status = *status;
            container.hold_types.push(entry);
        }
        container
    }

    #[test]
    fn test_status_from_param() {
        assert_eq!(StatusFilter::from_param(Some("true")), StatusFilter::Active);
        assert_eq!(StatusFilter::from_param(Some("false")), StatusFilter::Inactive);
        assert_eq!(StatusFilter::from_param(Some("TRUE")), StatusFilter::Any);
        assert_eq!(StatusFilter::from_param(Some("")), StatusFilter::Any);
        assert_eq!(StatusFilter::from_param(None), StatusFilter::Any);
    }

    #[test]
    fn test_status_matches() {
        let empty = container_with(&[]);
        let active = container_with(&[false, true]);
        let inactive = container_with(&[false, false]);

        assert!(StatusFilter::Any.matches(&empty));
        assert!(StatusFilter::Active.matches(&active));
        assert!(!StatusFilter::Active.matches(&inactive));
        assert!(!StatusFilter::Active.matches(&empty));
        assert!(StatusFilter::Inactive.matches(&inactive));
        assert!(!StatusFilter::Inactive.matches(&active));
        // An empty hold list is never "inactive".
        assert!(!StatusFilter::Inactive.matches(&empty));
    }

    #[test]
    fn test_pagination_requires_both_params() {
        assert_eq!(Pagination::from_params(Some("2"), None), None);
        assert_eq!(Pagination::from_params(None, Some("5")), None);
        assert_eq!(Pagination::from_params(Some(""), Some("5")), None);
        assert_eq!(
            Pagination::from_params(Some("2"), Some("5")),
            Some(Pagination {
                page: 2,
                page_size: 5
            })
        );
    }

    #[test]
    fn test_pagination_defaults_on_invalid_values() {
        assert_eq!(
            Pagination::from_params(Some("abc"), Some("xyz")),
            Some(Pagination::default())
        );
        assert_eq!(
            Pagination::from_params(Some("0"), Some("-3")),
            Some(Pagination::default())
        );
    }

    #[test]
    fn test_pagination_window() {
        let p = Pagination {
            page: 3,
            page_size: 4,
        };
        assert_eq!(p.offset(), 8);
        assert_eq!(p.slice((0..10).collect()), vec![8, 9]);
        assert_eq!(p.total_pages(10), 3);
        assert_eq!(p.total_pages(0), 0);
        assert_eq!(p.total_pages(12), 3);
    }

    #[test]
    fn test_hand_built_zero_values_do_not_panic() {
        let p = Pagination {
            page: 0,
            page_size: 0,
        };
        assert_eq!(p.offset(), 0);
        assert_eq!(p.total_pages(5), 5);
        assert!(p.slice(vec![1, 2, 3]).is_empty());
    }

    #[test]
    fn test_huge_page_saturates_offset() {
        let p = Pagination {
            page: u64::MAX,
            page_size: 10,
        };
        assert_eq!(p.offset(), u64::MAX);
        assert!(p.slice((0..10).collect::<Vec<_>>()).is_empty());
    }

    #[test]
    fn test_page_map() {
        let page = Page::new(vec![1, 2], 7, Pagination { page: 1, page_size: 2 });
        let page = page.map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.total_pages, 4);
    }
}
