//! Filter edits.
//!
//! Every operation here takes the current `FilterState` and returns the
//! complete next one. Nothing is patched in place; the caller swaps the new
//! value in with `App::set_filters`, which is what schedules the fetch.
//!
//! All edits except paging reset `page` to 1.

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use thiserror::Error;

use crate::models::{
    FilterState, FilterTag, PAGE_SIZES, PriorityTag, SortKey, StatusTag, join_tags, split_tags,
};

/// Shortcut ranges offered by the date control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DatePreset {
    #[default]
    All,
    Last8Hours,
    Last24Hours,
    Last7Days,
    Last30Days,
    ThisMonth,
    Custom,
}

impl DatePreset {
    pub const ALL: [DatePreset; 7] = [
        DatePreset::All,
        DatePreset::Last8Hours,
        DatePreset::Last24Hours,
        DatePreset::Last7Days,
        DatePreset::Last30Days,
        DatePreset::ThisMonth,
        DatePreset::Custom,
    ];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            DatePreset::All => "All time",
            DatePreset::Last8Hours => "Last 8 hours",
            DatePreset::Last24Hours => "Last 24 hours",
            DatePreset::Last7Days => "Last 7 days",
            DatePreset::Last30Days => "Last 30 days",
            DatePreset::ThisMonth => "This month",
            DatePreset::Custom => "Custom range",
        }
    }
}

/// Errors from committing a custom date range
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("Pick both a start and an end date")]
    MissingDate,

    #[error("Invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid time '{0}' (expected HH:MM)")]
    InvalidTime(String),

    #[error("Start of range is after its end")]
    Reversed,

    #[error("Time does not exist in the local time zone")]
    Unrepresentable,
}

/// A manually chosen range: calendar days plus time-of-day for each end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl Default for CustomRange {
    fn default() -> Self {
        Self {
            from: None,
            to: None,
            start: NaiveTime::MIN,
            end: NaiveTime::MIN,
        }
    }
}

/// One removable badge in the filter bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chip {
    Status(String),
    Priority(String),
    DateRange { from: String, to: String },
}

impl Chip {
    /// Badge text; date chips use the local time zone
    #[must_use]
    pub fn label(&self) -> String {
        self.label_in(&Local)
    }

    #[must_use]
    pub fn label_in<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        match self {
            Chip::Status(token) => {
                let name = StatusTag::from_token(token).map_or(token.as_str(), |t| t.label());
                format!("Status: {name}")
            }
            Chip::Priority(token) => {
                let name = PriorityTag::from_token(token).map_or(token.as_str(), |t| t.label());
                format!("Priority: {name}")
            }
            Chip::DateRange { from, to } => format!(
                "{} - {}",
                short_date(from, tz, "%b %-d"),
                short_date(to, tz, "%b %-d")
            ),
        }
    }
}

/// Serialize an instant the way the filter state stores it:
/// UTC, millisecond precision, `Z` suffix.
#[must_use]
pub fn to_iso<Tz: TimeZone>(instant: &DateTime<Tz>) -> String {
    instant
        .with_timezone(&Utc)
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
}

fn short_date<Tz: TimeZone>(iso: &str, tz: &Tz, fmt: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match DateTime::parse_from_rfc3339(iso) {
        Ok(dt) => dt.with_timezone(tz).format(fmt).to_string(),
        Err(_) => iso.to_string(),
    }
}

fn with_page_reset(mut next: FilterState) -> FilterState {
    next.page = 1;
    next
}

/// Add or remove `token` in a comma-joined list.
///
/// Adding appends without deduplication. Removing drops every occurrence
/// and keeps the remaining order.
fn toggle_token(encoded: &str, token: &str, checked: bool) -> String {
    let mut tags = split_tags(encoded);
    if checked {
        tags.push(token);
    } else {
        tags.retain(|t| *t != token);
    }
    join_tags(&tags)
}

fn selected<T: FilterTag>(encoded: &str) -> Vec<T> {
    split_tags(encoded)
        .into_iter()
        .filter_map(T::from_token)
        .collect()
}

#[must_use]
pub fn toggle_status(filters: &FilterState, tag: StatusTag, checked: bool) -> FilterState {
    with_page_reset(FilterState {
        status: toggle_token(&filters.status, tag.as_str(), checked),
        ..filters.clone()
    })
}

#[must_use]
pub fn toggle_priority(filters: &FilterState, tag: PriorityTag, checked: bool) -> FilterState {
    with_page_reset(FilterState {
        priority: toggle_token(&filters.priority, tag.as_str(), checked),
        ..filters.clone()
    })
}

/// Checked statuses, read from the canonical string
#[must_use]
pub fn selected_statuses(filters: &FilterState) -> Vec<StatusTag> {
    selected(&filters.status)
}

/// Checked priorities, read from the canonical string
#[must_use]
pub fn selected_priorities(filters: &FilterState) -> Vec<PriorityTag> {
    selected(&filters.priority)
}

/// Write the range a preset stands for, relative to `now`.
///
/// `Custom` leaves the bounds alone; the range is committed separately
/// through [`apply_custom_range`].
#[must_use]
pub fn apply_date_preset<Tz: TimeZone>(
    filters: &FilterState,
    preset: DatePreset,
    now: &DateTime<Tz>,
) -> FilterState {
    let span = |from: DateTime<Tz>, to: &DateTime<Tz>| {
        with_page_reset(FilterState {
            date_from: to_iso(&from),
            date_to: to_iso(to),
            ..filters.clone()
        })
    };

    match preset {
        DatePreset::All => with_page_reset(FilterState {
            date_from: String::new(),
            date_to: String::new(),
            ..filters.clone()
        }),
        DatePreset::Last8Hours => span(now.clone() - Duration::hours(8), now),
        DatePreset::Last24Hours => span(now.clone() - Duration::hours(24), now),
        DatePreset::Last7Days => span(now.clone() - Duration::days(7), now),
        DatePreset::Last30Days => span(now.clone() - Duration::days(30), now),
        DatePreset::ThisMonth => match month_bounds(now) {
            Some((start, end)) => span(start, &end),
            // Last representable month: keep the range, still reset paging
            None => with_page_reset(filters.clone()),
        },
        DatePreset::Custom => filters.clone(),
    }
}

/// First and last instant of the calendar month containing `now`
fn month_bounds<Tz: TimeZone>(now: &DateTime<Tz>) -> Option<(DateTime<Tz>, DateTime<Tz>)> {
    let tz = now.timezone();
    let today = now.date_naive();
    let first = NaiveDate::from_ymd_opt(today.year(), today.month(), 1)?;
    let next_month = if today.month() == 12 {
        NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)?
    };
    let last = next_month.pred_opt()?;

    let start = tz
        .from_local_datetime(&first.and_time(NaiveTime::MIN))
        .earliest()?;
    let end = tz
        .from_local_datetime(&last.and_time(NaiveTime::from_hms_milli_opt(23, 59, 59, 999)?))
        .latest()?;
    Some((start, end))
}

/// Commit a manually chosen range, combining each day with its time-of-day
/// in `tz`.
pub fn apply_custom_range<Tz: TimeZone>(
    filters: &FilterState,
    range: &CustomRange,
    tz: &Tz,
) -> Result<FilterState, RangeError> {
    let (Some(from), Some(to)) = (range.from, range.to) else {
        return Err(RangeError::MissingDate);
    };

    let start = tz
        .from_local_datetime(&from.and_time(range.start))
        .earliest()
        .ok_or(RangeError::Unrepresentable)?;
    let end = tz
        .from_local_datetime(&to.and_time(range.end))
        .latest()
        .ok_or(RangeError::Unrepresentable)?;
    if start > end {
        return Err(RangeError::Reversed);
    }

    Ok(with_page_reset(FilterState {
        date_from: to_iso(&start),
        date_to: to_iso(&end),
        ..filters.clone()
    }))
}

/// Name search; every keystroke is a committed edit
#[must_use]
pub fn set_search(filters: &FilterState, text: &str) -> FilterState {
    with_page_reset(FilterState {
        cname: text.to_string(),
        ..filters.clone()
    })
}

#[must_use]
pub fn set_sort(filters: &FilterState, key: SortKey) -> FilterState {
    with_page_reset(FilterState {
        sort: key.token().to_string(),
        ..filters.clone()
    })
}

/// Jump to `page` (clamped to at least 1); nothing else changes
#[must_use]
pub fn set_page(filters: &FilterState, page: u32) -> FilterState {
    FilterState {
        page: page.max(1),
        ..filters.clone()
    }
}

#[must_use]
pub fn set_limit(filters: &FilterState, limit: u32) -> FilterState {
    with_page_reset(FilterState {
        limit,
        ..filters.clone()
    })
}

/// Next entry of the page-size selector after the current limit
#[must_use]
pub fn next_page_size(current: u32) -> u32 {
    PAGE_SIZES
        .iter()
        .position(|&size| size == current)
        .map_or(PAGE_SIZES[0], |i| PAGE_SIZES[(i + 1) % PAGE_SIZES.len()])
}

/// Clear every filter; sort and page size survive
#[must_use]
pub fn reset(filters: &FilterState) -> FilterState {
    FilterState {
        status: String::new(),
        cname: String::new(),
        date_from: String::new(),
        date_to: String::new(),
        priority: String::new(),
        page: 1,
        limit: filters.limit,
        sort: filters.sort.clone(),
    }
}

#[must_use]
pub fn has_active_filters(filters: &FilterState) -> bool {
    !filters.status.is_empty()
        || !filters.priority.is_empty()
        || !filters.date_from.is_empty()
        || !filters.cname.is_empty()
}

/// Chips for the current filters: statuses, then priorities, then the
/// date range
#[must_use]
pub fn active_chips(filters: &FilterState) -> Vec<Chip> {
    let mut chips: Vec<Chip> = split_tags(&filters.status)
        .into_iter()
        .map(|t| Chip::Status(t.to_string()))
        .collect();
    chips.extend(
        split_tags(&filters.priority)
            .into_iter()
            .map(|t| Chip::Priority(t.to_string())),
    );
    if !filters.date_from.is_empty() {
        chips.push(Chip::DateRange {
            from: filters.date_from.clone(),
            to: filters.date_to.clone(),
        });
    }
    chips
}

/// Drop the value a chip represents, exactly as deselecting it would
#[must_use]
pub fn remove_chip(filters: &FilterState, chip: &Chip) -> FilterState {
    match chip {
        Chip::Status(token) => with_page_reset(FilterState {
            status: toggle_token(&filters.status, token, false),
            ..filters.clone()
        }),
        Chip::Priority(token) => with_page_reset(FilterState {
            priority: toggle_token(&filters.priority, token, false),
            ..filters.clone()
        }),
        Chip::DateRange { .. } => with_page_reset(FilterState {
            date_from: String::new(),
            date_to: String::new(),
            ..filters.clone()
        }),
    }
}

/// Trigger text of the date control
#[must_use]
pub fn date_label(filters: &FilterState) -> String {
    date_label_in(filters, &Local)
}

#[must_use]
pub fn date_label_in<Tz: TimeZone>(filters: &FilterState, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    if filters.has_date_range() {
        format!(
            "{} - {}",
            short_date(&filters.date_from, tz, "%b %-d, %Y"),
            short_date(&filters.date_to, tz, "%b %-d, %Y")
        )
    } else {
        "Created At".to_string()
    }
}

/// Input field of the custom range form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangeField {
    #[default]
    From,
    To,
    Start,
    End,
}

impl RangeField {
    pub const ALL: [RangeField; 4] = [
        RangeField::From,
        RangeField::To,
        RangeField::Start,
        RangeField::End,
    ];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            RangeField::From => "From",
            RangeField::To => "To",
            RangeField::Start => "Start time",
            RangeField::End => "End time",
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        match self {
            RangeField::From => RangeField::To,
            RangeField::To => RangeField::Start,
            RangeField::Start => RangeField::End,
            RangeField::End => RangeField::From,
        }
    }
}

/// UI state of the date control: selected preset and the custom range draft.
///
/// The draft only reaches the filters on [`DateControl::apply_custom`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateControl {
    pub preset: DatePreset,
    pub from_input: String,
    pub to_input: String,
    pub start_input: String,
    pub end_input: String,
    pub field: RangeField,
}

impl Default for DateControl {
    fn default() -> Self {
        Self {
            preset: DatePreset::All,
            from_input: String::new(),
            to_input: String::new(),
            start_input: "00:00".to_string(),
            end_input: "00:00".to_string(),
            field: RangeField::From,
        }
    }
}

impl DateControl {
    /// Choose a preset. Returns the new filters for every preset except
    /// `Custom`, which only opens the draft.
    pub fn select_preset<Tz: TimeZone>(
        &mut self,
        filters: &FilterState,
        preset: DatePreset,
        now: &DateTime<Tz>,
    ) -> Option<FilterState> {
        self.preset = preset;
        if preset == DatePreset::Custom {
            self.field = RangeField::From;
            None
        } else {
            Some(apply_date_preset(filters, preset, now))
        }
    }

    #[must_use]
    pub fn input(&self, field: RangeField) -> &str {
        match field {
            RangeField::From => &self.from_input,
            RangeField::To => &self.to_input,
            RangeField::Start => &self.start_input,
            RangeField::End => &self.end_input,
        }
    }

    fn input_mut(&mut self, field: RangeField) -> &mut String {
        match field {
            RangeField::From => &mut self.from_input,
            RangeField::To => &mut self.to_input,
            RangeField::Start => &mut self.start_input,
            RangeField::End => &mut self.end_input,
        }
    }

    pub fn push_char(&mut self, c: char) {
        if c.is_ascii_digit() || c == '-' || c == ':' {
            self.input_mut(self.field).push(c);
        }
    }

    pub fn pop_char(&mut self) {
        self.input_mut(self.field).pop();
    }

    pub fn next_field(&mut self) {
        self.field = self.field.next();
    }

    /// Parse the draft inputs
    pub fn draft(&self) -> Result<CustomRange, RangeError> {
        let date = |raw: &str| -> Result<Option<NaiveDate>, RangeError> {
            let raw = raw.trim();
            if raw.is_empty() {
                return Ok(None);
            }
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| RangeError::InvalidDate(raw.to_string()))
        };
        let time = |raw: &str| -> Result<NaiveTime, RangeError> {
            let raw = raw.trim();
            if raw.is_empty() {
                return Ok(NaiveTime::MIN);
            }
            NaiveTime::parse_from_str(raw, "%H:%M")
                .map_err(|_| RangeError::InvalidTime(raw.to_string()))
        };

        Ok(CustomRange {
            from: date(&self.from_input)?,
            to: date(&self.to_input)?,
            start: time(&self.start_input)?,
            end: time(&self.end_input)?,
        })
    }

    /// Commit the draft in `tz`
    pub fn apply_custom<Tz: TimeZone>(
        &self,
        filters: &FilterState,
        tz: &Tz,
    ) -> Result<FilterState, RangeError> {
        apply_custom_range(filters, &self.draft()?, tz)
    }

    /// Drop the draft without touching the filters
    pub fn cancel_custom(&mut self) {
        let preset = self.preset;
        *self = Self::default();
        self.preset = if preset == DatePreset::Custom {
            DatePreset::All
        } else {
            preset
        };
    }

    /// Fall back to `All` once the filters no longer carry a range
    pub fn sync(&mut self, filters: &FilterState) {
        if filters.date_from.is_empty() && self.preset != DatePreset::Custom {
            self.preset = DatePreset::All;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn now_utc() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
    }

    fn on_page(page: u32) -> FilterState {
        FilterState {
            page,
            ..FilterState::default()
        }
    }

    #[test]
    fn test_filter_edits_reset_page() {
        let start = on_page(4);

        assert_eq!(toggle_status(&start, StatusTag::Active, true).page, 1);
        assert_eq!(toggle_priority(&start, PriorityTag::High, true).page, 1);
        assert_eq!(set_search(&start, "img").page, 1);
        assert_eq!(set_sort(&start, SortKey::NameAsc).page, 1);
        assert_eq!(set_limit(&start, 20).page, 1);
        assert_eq!(
            apply_date_preset(&start, DatePreset::Last7Days, &now_utc()).page,
            1
        );
    }

    #[test]
    fn test_set_page_touches_only_page() {
        let start = FilterState {
            status: "active".to_string(),
            cname: "cdn".to_string(),
            ..on_page(2)
        };
        let next = set_page(&start, 5);
        assert_eq!(next, FilterState { page: 5, ..start.clone() });
        assert_eq!(set_page(&start, 0).page, 1);
    }

    #[test]
    fn test_toggle_appends_and_removes_in_order() {
        let filters = FilterState::default();
        let filters = toggle_status(&filters, StatusTag::Active, true);
        let filters = toggle_status(&filters, StatusTag::Suspended, true);
        let filters = toggle_status(&filters, StatusTag::Provisioning, true);
        assert_eq!(filters.status, "active,suspended,provisioning");

        let filters = toggle_status(&filters, StatusTag::Suspended, false);
        assert_eq!(filters.status, "active,provisioning");

        assert_eq!(
            selected_statuses(&filters),
            vec![StatusTag::Active, StatusTag::Provisioning]
        );
    }

    #[test]
    fn test_toggle_off_removes_every_occurrence() {
        let filters = FilterState {
            priority: "high,low,high".to_string(),
            ..FilterState::default()
        };
        let next = toggle_priority(&filters, PriorityTag::High, false);
        assert_eq!(next.priority, "low");

        let next = toggle_priority(&next, PriorityTag::Low, false);
        assert_eq!(next.priority, "");
        assert!(selected_priorities(&next).is_empty());
    }

    #[test]
    fn test_toggle_on_does_not_dedupe() {
        let filters = FilterState {
            status: "active".to_string(),
            ..FilterState::default()
        };
        let next = toggle_status(&filters, StatusTag::Active, true);
        assert_eq!(next.status, "active,active");
    }

    #[test]
    fn test_preset_24h() {
        let next = apply_date_preset(&FilterState::default(), DatePreset::Last24Hours, &now_utc());
        assert_eq!(next.date_from, "2026-10-15T12:00:00.000Z");
        assert_eq!(next.date_to, "2026-10-16T12:00:00.000Z");
    }

    #[test]
    fn test_preset_hours_and_days() {
        let now = now_utc();
        let base = FilterState::default();
        assert_eq!(
            apply_date_preset(&base, DatePreset::Last8Hours, &now).date_from,
            "2026-10-16T04:00:00.000Z"
        );
        assert_eq!(
            apply_date_preset(&base, DatePreset::Last7Days, &now).date_from,
            "2026-10-09T12:00:00.000Z"
        );
        assert_eq!(
            apply_date_preset(&base, DatePreset::Last30Days, &now).date_from,
            "2026-09-16T12:00:00.000Z"
        );
    }

    #[test]
    fn test_preset_month_local_bounds() {
        let next = apply_date_preset(&FilterState::default(), DatePreset::ThisMonth, &now_utc());
        assert_eq!(next.date_from, "2026-10-01T00:00:00.000Z");
        assert_eq!(next.date_to, "2026-10-31T23:59:59.999Z");

        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2026, 12, 5, 9, 0, 0).unwrap();
        let next = apply_date_preset(&FilterState::default(), DatePreset::ThisMonth, &now);
        assert_eq!(next.date_from, "2026-11-30T22:00:00.000Z");
        assert_eq!(next.date_to, "2026-12-31T21:59:59.999Z");
    }

    #[test]
    fn test_preset_month_at_calendar_limit_resets_page() {
        let filters = FilterState {
            page: 4,
            date_from: "2026-10-01T00:00:00.000Z".to_string(),
            date_to: "2026-10-31T23:59:59.999Z".to_string(),
            ..FilterState::default()
        };
        let now = Utc.from_utc_datetime(&NaiveDate::MAX.and_time(NaiveTime::MIN));

        let next = apply_date_preset(&filters, DatePreset::ThisMonth, &now);
        assert_eq!(next.page, 1);
        assert_eq!(next.date_from, filters.date_from);
        assert_eq!(next.date_to, filters.date_to);
    }

    #[test]
    fn test_preset_all_clears_and_custom_keeps() {
        let ranged = apply_date_preset(&on_page(3), DatePreset::Last24Hours, &now_utc());
        let custom = apply_date_preset(&ranged, DatePreset::Custom, &now_utc());
        assert_eq!(custom, ranged);

        let cleared = apply_date_preset(&ranged, DatePreset::All, &now_utc());
        assert!(cleared.date_from.is_empty());
        assert!(cleared.date_to.is_empty());
    }

    #[test]
    fn test_custom_range() {
        let range = CustomRange {
            from: NaiveDate::from_ymd_opt(2026, 3, 1),
            to: NaiveDate::from_ymd_opt(2026, 3, 10),
            start: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            end: NaiveTime::MIN,
        };
        let next = apply_custom_range(&on_page(2), &range, &Utc).unwrap();
        assert_eq!(next.date_from, "2026-03-01T09:30:00.000Z");
        assert_eq!(next.date_to, "2026-03-10T00:00:00.000Z");
        assert_eq!(next.page, 1);

        let missing = CustomRange {
            to: None,
            ..range
        };
        assert_eq!(
            apply_custom_range(&on_page(2), &missing, &Utc),
            Err(RangeError::MissingDate)
        );

        let reversed = CustomRange {
            from: range.to,
            to: range.from,
            ..range
        };
        assert_eq!(
            apply_custom_range(&on_page(2), &reversed, &Utc),
            Err(RangeError::Reversed)
        );
    }

    #[test]
    fn test_reset_keeps_sort_and_limit() {
        let filters = FilterState {
            status: "active".to_string(),
            cname: "x".to_string(),
            date_from: "2026-10-01T00:00:00.000Z".to_string(),
            date_to: "2026-10-31T23:59:59.999Z".to_string(),
            priority: "low".to_string(),
            page: 3,
            limit: 50,
            sort: "name".to_string(),
        };
        assert!(has_active_filters(&filters));

        let next = reset(&filters);
        assert_eq!(
            next,
            FilterState {
                limit: 50,
                sort: "name".to_string(),
                ..FilterState::default()
            }
        );
        assert!(!has_active_filters(&next));
    }

    #[test]
    fn test_has_active_filters_ignores_paging() {
        let filters = FilterState {
            page: 7,
            limit: 50,
            sort: "name".to_string(),
            ..FilterState::default()
        };
        assert!(!has_active_filters(&filters));
        assert!(has_active_filters(&set_search(&filters, "a")));
    }

    #[test]
    fn test_chips_projection_and_removal() {
        let filters = FilterState {
            status: "active,suspended".to_string(),
            priority: "high".to_string(),
            date_from: "2026-10-01T00:00:00.000Z".to_string(),
            date_to: "2026-10-31T23:59:59.999Z".to_string(),
            page: 2,
            ..FilterState::default()
        };
        let chips = active_chips(&filters);
        assert_eq!(chips.len(), 4);
        assert_eq!(chips[0], Chip::Status("active".to_string()));
        assert_eq!(chips[2], Chip::Priority("high".to_string()));
        assert_eq!(chips[0].label_in(&Utc), "Status: Active");
        assert_eq!(chips[3].label_in(&Utc), "Oct 1 - Oct 31");

        let next = remove_chip(&filters, &chips[0]);
        assert_eq!(next.status, "suspended");
        assert_eq!(next.page, 1);

        let next = remove_chip(&filters, &chips[3]);
        assert!(next.date_from.is_empty() && next.date_to.is_empty());
        assert_eq!(active_chips(&next).len(), 3);
    }

    #[test]
    fn test_date_label() {
        let mut filters = FilterState::default();
        assert_eq!(date_label_in(&filters, &Utc), "Created At");

        filters.date_from = "2026-10-01T00:00:00.000Z".to_string();
        filters.date_to = "2026-10-31T23:59:59.999Z".to_string();
        assert_eq!(date_label_in(&filters, &Utc), "Oct 1, 2026 - Oct 31, 2026");
    }

    #[test]
    fn test_next_page_size_cycles() {
        assert_eq!(next_page_size(10), 20);
        assert_eq!(next_page_size(20), 50);
        assert_eq!(next_page_size(50), 10);
        assert_eq!(next_page_size(15), 10);
    }

    #[test]
    fn test_date_control_flow() {
        let mut control = DateControl::default();
        let filters = on_page(3);

        assert!(
            control
                .select_preset(&filters, DatePreset::Custom, &now_utc())
                .is_none()
        );
        for c in "2026-10-01".chars() {
            control.push_char(c);
        }
        control.next_field();
        for c in "2026-10-05".chars() {
            control.push_char(c);
        }
        assert_eq!(control.input(RangeField::Start), "00:00");

        let next = control.apply_custom(&filters, &Utc).unwrap();
        assert_eq!(next.date_from, "2026-10-01T00:00:00.000Z");
        assert_eq!(next.date_to, "2026-10-05T00:00:00.000Z");

        control.cancel_custom();
        assert_eq!(control.preset, DatePreset::All);
        assert!(control.from_input.is_empty());
    }

    #[test]
    fn test_date_control_rejects_bad_input() {
        let mut control = DateControl {
            from_input: "2026-13-01".to_string(),
            to_input: "2026-10-05".to_string(),
            ..DateControl::default()
        };
        assert_eq!(
            control.draft(),
            Err(RangeError::InvalidDate("2026-13-01".to_string()))
        );

        control.from_input = String::new();
        assert_eq!(
            control.apply_custom(&FilterState::default(), &Utc),
            Err(RangeError::MissingDate)
        );
    }

    #[test]
    fn test_date_control_sync() {
        let mut control = DateControl::default();
        let filters = FilterState::default();
        let ranged = control
            .select_preset(&filters, DatePreset::Last7Days, &now_utc())
            .unwrap();
        control.sync(&ranged);
        assert_eq!(control.preset, DatePreset::Last7Days);

        control.sync(&reset(&ranged));
        assert_eq!(control.preset, DatePreset::All);
    }
}
