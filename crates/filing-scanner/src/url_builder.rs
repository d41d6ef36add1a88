use chrono::{Days, NaiveDate};

/// Date format of the `startdt`/`enddt` query parameters.
pub const SEARCH_DATE_FORMAT: &str = "%Y-%m-%d";

/// Append the lookback window and form filter to a configured search URL.
///
/// The configured URL already carries its own query (`...?q=...`), so the
/// parameters are appended with `&` verbatim rather than re-encoded.
pub fn build_search_url(base: &str, fetch_days: u32, today: NaiveDate, forms: &str) -> String {
    let start = today
        .checked_sub_days(Days::new(u64::from(fetch_days)))
        .unwrap_or(NaiveDate::MIN);

    format!(
        "{base}&startdt={}&enddt={}&forms={forms}",
        start.format(SEARCH_DATE_FORMAT),
        today.format(SEARCH_DATE_FORMAT),
    )
}
