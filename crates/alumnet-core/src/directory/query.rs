use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{AlumniSummary, PagedResponse};

/// Default page size for directory listings.
pub const DEFAULT_PER_PAGE: u32 = 10;

/// One directory filter dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FilterKey {
    Department,
    GraduationYear,
    MinCgpa,
    Company,
    Position,
    FullNameSearch,
    MentorshipAvailable,
    Location,
}

impl FilterKey {
    pub const ALL: [FilterKey; 8] = [
        FilterKey::Department,
        FilterKey::GraduationYear,
        FilterKey::MinCgpa,
        FilterKey::Company,
        FilterKey::Position,
        FilterKey::FullNameSearch,
        FilterKey::MentorshipAvailable,
        FilterKey::Location,
    ];

    /// Query parameter name understood by the filter endpoint.
    pub fn as_param(&self) -> &'static str {
        match self {
            FilterKey::Department => "department",
            FilterKey::GraduationYear => "end_year",
            FilterKey::MinCgpa => "cgpa",
            FilterKey::Company => "company_name",
            FilterKey::Position => "position",
            FilterKey::FullNameSearch => "full_name",
            FilterKey::MentorshipAvailable => "availability_for_mentorship",
            FilterKey::Location => "current_location",
        }
    }
}

/// The collected filter set. Values are kept as entered; only non-empty
/// values participate in the outbound request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryFilters {
    values: BTreeMap<FilterKey, String>,
}

impl DirectoryFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: FilterKey, value: impl Into<String>) -> &mut Self {
        self.values.insert(key, value.into());
        self
    }

    pub fn get(&self, key: FilterKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    /// Empty every key at once.
    pub fn reset(&mut self) {
        self.values.clear();
    }

    /// Filters that actually constrain the query. Whitespace-only input
    /// counts as empty.
    pub fn active(&self) -> impl Iterator<Item = (FilterKey, &str)> {
        self.values
            .iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(key, value)| (*key, value.as_str()))
    }

    /// True when no filter constrains the query. An empty set selects
    /// the plain listing operation, never a filter request with zero
    /// constraints.
    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }

    /// Wire query pairs for the filter endpoint.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        self.active()
            .map(|(key, value)| (key.as_param(), value.trim().to_string()))
            .collect()
    }
}

/// The atomic unit of "what to search for and which page". Rebuilt on
/// every submission, never streamed field by field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryQuery {
    pub filters: DirectoryFilters,
    pub page: u32,
    pub per_page: u32,
}

impl Default for DirectoryQuery {
    fn default() -> Self {
        Self {
            filters: DirectoryFilters::new(),
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// One stable page of directory results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryPage {
    pub items: Vec<AlumniSummary>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
}

impl DirectoryPage {
    /// Normalize a server response into a page that honors the
    /// pagination invariants: `total_pages` is recomputed from the
    /// totals, and an empty result set pins the page to 1.
    pub fn from_response(response: PagedResponse<AlumniSummary>) -> Self {
        let per_page = response.per_page.max(1);
        let total_pages = response.total.div_ceil(per_page as u64) as u32;
        let page = if response.total == 0 {
            1
        } else {
            response.page.max(1)
        };

        Self {
            items: response.data,
            total: response.total,
            page,
            per_page,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summaries(count: usize) -> Vec<AlumniSummary> {
        (0..count)
            .map(|i| AlumniSummary {
                id: i as i64,
                full_name: format!("Alumnus {}", i),
                email: format!("a{}@example.edu", i),
                graduation_year: None,
                department: None,
                current_company: None,
                current_position: None,
                location: None,
                mentorship_available: false,
                verification_status: None,
                profile_image: None,
            })
            .collect()
    }

    #[test]
    fn wire_parameter_names() {
        assert_eq!(FilterKey::GraduationYear.as_param(), "end_year");
        assert_eq!(FilterKey::MinCgpa.as_param(), "cgpa");
        assert_eq!(FilterKey::Company.as_param(), "company_name");
        assert_eq!(FilterKey::FullNameSearch.as_param(), "full_name");
        assert_eq!(FilterKey::Location.as_param(), "current_location");
    }

    #[test]
    fn blank_values_do_not_constrain() {
        let mut filters = DirectoryFilters::new();
        filters
            .set(FilterKey::Department, "Computer Science")
            .set(FilterKey::Company, "")
            .set(FilterKey::Position, "   ");

        assert!(!filters.is_empty());
        let pairs = filters.to_query_pairs();
        assert_eq!(pairs, vec![("department", "Computer Science".to_string())]);
    }

    #[test]
    fn reset_empties_every_key() {
        let mut filters = DirectoryFilters::new();
        for key in FilterKey::ALL {
            filters.set(key, "x");
        }
        assert_eq!(filters.to_query_pairs().len(), 8);

        filters.reset();
        assert!(filters.is_empty());
        assert!(filters.to_query_pairs().is_empty());
    }

    #[test]
    fn total_pages_is_the_ceiling_of_the_quotient() {
        let page = DirectoryPage::from_response(PagedResponse {
            data: summaries(10),
            total: 23,
            page: 1,
            per_page: 10,
            total_pages: 0,
        });
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.total, 23);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn empty_result_clamps_to_page_one() {
        let page = DirectoryPage::from_response(PagedResponse {
            data: Vec::new(),
            total: 0,
            page: 4,
            per_page: 10,
            total_pages: 0,
        });
        assert!(page.items.is_empty());
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn exact_multiple_has_no_partial_page() {
        let page = DirectoryPage::from_response(PagedResponse {
            data: summaries(10),
            total: 30,
            page: 3,
            per_page: 10,
            total_pages: 0,
        });
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 3);
    }
}
