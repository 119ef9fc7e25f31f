use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

const TEMPLATE: &str = "{msg:>14} [{bar:40.cyan/blue}] {pos}/{len} ({eta})";

/// Progress bar for one table, or a hidden bar when progress is disabled.
pub fn table_progress(table: &str, total: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(total);
    match ProgressStyle::default_bar().template(TEMPLATE) {
        Ok(style) => bar.set_style(style.progress_chars("#>-")),
        Err(err) => warn!(error = %err, "invalid progress template"),
    }
    bar.set_message(table.to_string());
    bar
}
