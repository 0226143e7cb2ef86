//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use truthguard_core::render::{progress_bar, ResultView, Tone};
use truthguard_core::AnalysisResult;

const BAR_WIDTH: usize = 30;

fn toned(text: &str, tone: Tone) -> ColoredString {
    match tone {
        Tone::Success => text.green(),
        Tone::Danger => text.red(),
    }
}

/// Print an analysis result.
pub fn print_result(result: &AnalysisResult) {
    let view = ResultView::from(result);

    println!();
    println!(
        "  {} {}",
        toned(view.icon, view.tone).bold(),
        toned(view.headline, view.tone).bold()
    );
    println!("  {}", view.confidence_label().dimmed());
    println!(
        "  {}",
        toned(&progress_bar(view.confidence, BAR_WIDTH), view.tone)
    );

    if let Some(explanation) = view.explanation {
        println!();
        println!("  {}", "Analysis Details".bold());
        println!("  {}", explanation);
    }

    if let Some(keywords) = view.keywords {
        println!();
        println!("  {}", "KEY INDICATORS DETECTED".dimmed());
        let chips: Vec<String> = keywords
            .iter()
            .map(|k| format!("[{}]", k).cyan().to_string())
            .collect();
        println!("  {}", chips.join(" "));
    }
    println!();
}

/// Print a non-fatal notification.
pub fn print_notification(title: &str, message: &str) {
    eprintln!("{} {}: {}", "✗".red().bold(), title.red().bold(), message);
}
