//! CLI progress and diagnostic display

use std::path::Path;
use std::time::Duration;

use console::{Emoji, style};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};

/// Magnifying glass - for scanning operations
pub static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
/// Sparkles - for completion
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");
/// Warning sign - for fatal diagnostics
pub static WARNING: Emoji<'_, '_> = Emoji("⚠️  ", "");

/// Spinner style for indeterminate progress
///
/// # Panics
/// Panics if the hardcoded template is invalid (should never happen).
#[must_use]
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} [{elapsed_precise}] {msg}").expect("valid template")
}

/// Create a ticking spinner
#[must_use]
pub fn simple_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(spinner_style());
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Print completion message: `✨ Done in 2s`
pub fn print_done(elapsed: Duration) {
    eprintln!("{} Done in {}", SPARKLE, HumanDuration(elapsed));
}

/// Print lines inside a `=` rule, sized to the first line
pub fn print_boxed(lines: &[String]) {
    let width = lines.first().map_or(0, |l| l.chars().count());
    let rule = "=".repeat(width);
    eprintln!();
    eprintln!("{}", style(&rule).red());
    for line in lines {
        eprintln!("{line}");
    }
    eprintln!("{}", style(&rule).red());
    eprintln!();
}

/// Explain a missing serializer executable
pub fn print_serializer_missing(executable: &Path, config_file: Option<&Path>) {
    let mut lines = vec![
        format!("{WARNING}Could not find serializer executable at: {}", executable.display()),
        String::new(),
        "Make sure that serializer_path in the [filesystem] section of".to_string(),
    ];
    match config_file {
        Some(path) => lines.push(format!("{} is up to date!", path.display())),
        None => lines.push("your wldata config is up to date!".to_string()),
    }
    print_boxed(&lines);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_template_is_valid() {
        let pb = ProgressBar::hidden();
        pb.set_style(spinner_style());
        pb.finish_and_clear();
    }
}
