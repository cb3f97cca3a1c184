mod insights;
mod phrasing;
mod story;
mod summary;

pub use insights::get_chart_insights;
pub use phrasing::{bar_closing, line_closing, pie_closing};
pub use story::{build_story, Story, StorySection};
pub use summary::{describe_chart, describe_comparison, NO_DATA};
