//! CLI rendering of a listing page

use owo_colors::OwoColorize;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, Width, object::Rows},
};

use crate::formatting::{date_and_time, layout, truncate_string};
use crate::models::{Distribution, DistributionStatus, FilterState, PageResponse};
use crate::pagination::Pager;

/// Status text with its color
pub fn format_status(status: &DistributionStatus) -> String {
    let label = status.label();
    match status {
        DistributionStatus::Active => label.green().to_string(),
        DistributionStatus::Provisioning => label.blue().to_string(),
        DistributionStatus::Suspended => label.yellow().to_string(),
        DistributionStatus::Disabled | DistributionStatus::Unknown(_) => {
            label.bright_black().to_string()
        }
    }
}

#[derive(Tabled)]
struct DistributionRow {
    #[tabled(rename = "Label")]
    name: String,

    #[tabled(rename = "Domain")]
    domain: String,

    #[tabled(rename = "Status")]
    status: String,

    #[tabled(rename = "Date Modified")]
    date: String,

    #[tabled(rename = "Time")]
    time: String,
}

impl From<&Distribution> for DistributionRow {
    fn from(d: &Distribution) -> Self {
        let (date, time) = date_and_time(&d.updated_at);
        Self {
            name: truncate_string(&d.name, layout::NAME_WIDTH),
            domain: truncate_string(&d.domain, layout::DOMAIN_WIDTH),
            status: format_status(&d.status),
            date,
            time,
        }
    }
}

/// Table of one page followed by the pager footer
pub fn format_page(page: &PageResponse, filters: &FilterState) -> String {
    let pager = Pager::new(filters, page.pagination());
    let footer = format!(
        "{} row(s) selected.  {}",
        pager.row_summary(),
        pager.page_label()
    );

    if page.data.is_empty() {
        return format!("{}\n{}", "No distributions found.".yellow(), footer.dimmed());
    }

    let rows: Vec<DistributionRow> = page.data.iter().map(DistributionRow::from).collect();
    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Width::wrap(200).keep_words(true))
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    format!("{table}\n{}", footer.dimmed())
}

/// Message printed when the listing could not be loaded
pub fn format_load_error() -> String {
    "Failed to load distributions. Please try again."
        .red()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Pagination, ResponseMeta};

    fn dist(name: &str, status: DistributionStatus) -> Distribution {
        Distribution {
            id: format!("id-{name}"),
            name: name.to_string(),
            domain: format!("{name}.example.com"),
            status,
            created_at: String::new(),
            updated_at: "garbage".to_string(),
            cache_strategy: String::new(),
            domain_type: String::new(),
        }
    }

    #[test]
    fn test_format_page_includes_rows_and_footer() {
        let page = PageResponse {
            data: vec![
                dist("assets", DistributionStatus::Active),
                dist("old", DistributionStatus::Unknown("archived".into())),
            ],
            meta: Some(ResponseMeta {
                pagination: Some(Pagination {
                    total: 12,
                    total_pages: 2,
                }),
            }),
        };
        let out = format_page(&page, &FilterState::default());
        assert!(out.contains("assets.example.com"));
        assert!(out.contains("Inactive"));
        assert!(out.contains("1-10 of 12 row(s) selected."));
        assert!(out.contains("Page 1 of 2"));
    }

    #[test]
    fn test_format_empty_page() {
        let out = format_page(&PageResponse::default(), &FilterState::default());
        assert!(out.contains("No distributions found."));
        assert!(out.contains("0 of 0 row(s) selected."));
    }
}
