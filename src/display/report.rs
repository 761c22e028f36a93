//! Report formatting utilities for terminal output
//!
//! Provides formatting helpers shared by the stats and settlement reports.

use crate::models::ReportingWindow;

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

/// Numbered list of reporting windows, as accepted by `--window`
pub fn format_window_list(windows: &[ReportingWindow]) -> String {
    if windows.is_empty() {
        return "No expenses recorded yet.\n".to_string();
    }

    let mut output = String::new();
    for (i, window) in windows.iter().enumerate() {
        output.push_str(&format!(
            "{:>2}. {:<12} {} to {}\n",
            i + 1,
            window.label,
            window.start,
            window.end
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.05), "0.05%");
        assert_eq!(format_percentage(5.5), "5.5%");
        assert_eq!(format_percentage(50.0), "50%");
    }

    #[test]
    fn test_format_bar() {
        let bar = format_bar(50.0, 100.0, 10);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);
        assert_eq!(bar.chars().count(), 10);
        assert_eq!(format_bar(0.0, 100.0, 4), "    ");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 5), "He...");
        assert_eq!(truncate("Hi", 5), "Hi");
        assert_eq!(truncate("Café au lait", 6), "Caf...");
    }

    #[test]
    fn test_window_list() {
        let windows = vec![
            ReportingWindow::month(2024, 3).unwrap(),
            ReportingWindow::year(2024).unwrap(),
        ];
        let text = format_window_list(&windows);
        assert!(text.starts_with(" 1. March        2024-03-01 to 2024-03-31\n"));
        assert!(text.contains(" 2. 2024         2024-01-01 to 2024-12-31"));
        assert_eq!(format_window_list(&[]), "No expenses recorded yet.\n");
    }
}
