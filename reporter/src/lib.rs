mod document;
mod format;
mod html;
mod output;
mod text;

pub use html::render_html;
pub use output::{report_stem, write_reports, ReportFormat, BATCH_SUMMARIES_FILE};
pub use text::render_text;
