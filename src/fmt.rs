const BAR_WIDTH: usize = 20;

/// Whole-number percentage label: 66.67 -> "67%".
pub fn percent_label(percent: f64) -> String {
    format!("{}%", percent.round() as u32)
}

/// Fixed-width text progress bar for a 0..=100 percentage.
pub fn progress_bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}
