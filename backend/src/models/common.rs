use serde::Deserialize;

/// Pagination query params shared across list endpoints.
/// `limit` defaults to 50, capped at 200. `offset` defaults to 0.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(50).clamp(1, 200)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

/// Optional date-range filter for list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct DateRangeParams {
    pub start_date: Option<time::Date>,
    pub end_date: Option<time::Date>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl DateRangeParams {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(50).clamp(1, 200)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    pub fn contains(&self, date: time::Date) -> bool {
        self.start_date.map_or(true, |start| date >= start)
            && self.end_date.map_or(true, |end| date <= end)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    #[test]
    fn limits_are_clamped() {
        let p = PaginationParams {
            limit: Some(10_000),
            offset: Some(-3),
        };
        assert_eq!(p.limit(), 200);
        assert_eq!(p.offset(), 0);
        assert_eq!(PaginationParams::default().limit(), 50);
    }

    #[test]
    fn open_ended_ranges_contain_everything_on_their_open_side() {
        let range = DateRangeParams {
            start_date: Some(date!(2024 - 06 - 01)),
            ..Default::default()
        };
        assert!(!range.contains(date!(2024 - 05 - 31)));
        assert!(range.contains(date!(2024 - 06 - 01)));
        assert!(range.contains(date!(2030 - 01 - 01)));
    }
}
