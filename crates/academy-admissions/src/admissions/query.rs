use serde::Serialize;

use super::domain::{Application, ApplicationStatus};

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Sentinel meaning "every status" for the `status` query parameter.
pub const ALL_STATUSES: &str = "ALL";
/// Sentinel meaning "every generation" for the `generation` query parameter.
pub const ALL_GENERATIONS: &str = "all";

/// Raw query string of the list endpoint. Values stay as text so malformed numbers fall
/// back to defaults instead of rejecting the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub status: Option<String>,
    pub generation: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListQuery {
    /// Build from decoded `key=value` pairs. A repeated key keeps its first value and
    /// unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "status" => &mut query.status,
                "generation" => &mut query.generation,
                "page" => &mut query.page,
                "limit" => &mut query.limit,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }

    /// Filter described by the query, or `None` when the status names no known value and
    /// therefore matches nothing.
    pub fn filter(&self) -> Option<ApplicationFilter> {
        let status = match self.status.as_deref() {
            None | Some("") | Some(ALL_STATUSES) => None,
            Some(raw) => Some(ApplicationStatus::from_label(raw)?),
        };

        let generation = match self.generation.as_deref() {
            None | Some("") | Some(ALL_GENERATIONS) => None,
            Some(raw) => parse_leading_int(raw),
        };

        Some(ApplicationFilter { status, generation })
    }

    pub fn page_request(&self) -> PageRequest {
        let page = self
            .page
            .as_deref()
            .and_then(parse_leading_int)
            .unwrap_or(1)
            .max(1) as u64;
        let limit = self
            .limit
            .as_deref()
            .and_then(parse_leading_int)
            .unwrap_or(DEFAULT_PAGE_SIZE as i64)
            .clamp(1, MAX_PAGE_SIZE as i64) as u64;
        PageRequest { page, limit }
    }
}

/// Equality filters applied before pagination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplicationFilter {
    pub status: Option<ApplicationStatus>,
    pub generation: Option<i64>,
}

impl ApplicationFilter {
    pub fn matches(&self, application: &Application) -> bool {
        self.status
            .map_or(true, |status| application.status == status)
            && self
                .generation
                .map_or(true, |generation| i64::from(application.generation) == generation)
    }
}

/// 1-based page of `limit` records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl PageRequest {
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Slice `matching` into the requested page.
    pub fn paginate(&self, matching: Vec<Application>) -> ApplicationPage {
        let total = matching.len() as u64;
        let skip = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let applications = matching
            .into_iter()
            .skip(skip)
            .take(self.limit as usize)
            .collect();

        ApplicationPage {
            applications,
            pagination: Pagination {
                page: self.page,
                limit: self.limit,
                total,
                total_pages: total.div_ceil(self.limit),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationPage {
    pub applications: Vec<Application>,
    pub pagination: Pagination,
}

/// Lenient integer parse: optional leading whitespace and sign followed by at least one
/// digit; anything after the digits is ignored. Overflow saturates.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit);
    let mut value: i64 = 0;
    let mut seen = false;
    for digit in digits {
        seen = true;
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(digit - b'0'));
    }

    if !seen {
        return None;
    }
    Some(if negative { -value } else { value })
}
