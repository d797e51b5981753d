//! Dashboard View
//!
//! - **layout**: the declarative page description built from the store
//! - **render**: HTML rendering of the layout and the landing page
//! - **assets**: stylesheet and client script

mod assets;
pub mod layout;
pub mod render;

pub use layout::{
    CategoryControl, CategoryOption, ChartContent, ChartPanel, Controls, DateRangeControl,
    Header, Layout, MetricCard, CATEGORY_ID, DATE_RANGE_ID, FILTERED_CHART_ID, TREND_CHART_ID,
};
pub use render::{escape, render_landing, render_page, PageUrls};
