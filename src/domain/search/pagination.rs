use crate::domain::search::SearchError;

/// Requested page; both values are non-negative and written canonically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub per_page: u64,
}

impl Pagination {
    /// Both values are required and must be written in canonical decimal form
    /// (`"3"`, not `"03"`, `"+3"` or `"3 "`). Any digit string is a valid
    /// page; values past `u64::MAX` saturate.
    pub fn parse(page: Option<&str>, per_page: Option<&str>) -> Result<Self, SearchError> {
        Ok(Self {
            page: parse_strict("page", page)?,
            per_page: parse_strict("perPage", per_page)?,
        })
    }

    /// Saturates at `i64::MAX`, the largest LIMIT Postgres accepts.
    pub fn limit(&self) -> i64 {
        i64::try_from(self.per_page).unwrap_or(i64::MAX)
    }

    /// `page * per_page`, saturating at `i64::MAX`. A saturated offset lies
    /// past every row, so the page comes back empty.
    pub fn offset(&self) -> i64 {
        self.per_page
            .checked_mul(self.page)
            .and_then(|offset| i64::try_from(offset).ok())
            .unwrap_or(i64::MAX)
    }
}

fn parse_strict(param: &'static str, raw: Option<&str>) -> Result<u64, SearchError> {
    let invalid = || SearchError::InvalidPagination {
        param,
        value: raw.map(str::to_string),
    };
    let raw = raw.ok_or_else(invalid)?;
    let canonical = !raw.is_empty()
        && raw.bytes().all(|b| b.is_ascii_digit())
        && (raw == "0" || !raw.starts_with('0'));
    if !canonical {
        return Err(invalid());
    }
    Ok(raw.parse::<u64>().unwrap_or(u64::MAX))
}
