use std::time::Duration;

use dialoguer::console::style;
use indicatif::{ProgressBar, ProgressStyle};

const STATUS_WIDTH: usize = 12;

pub enum OutputColor {
    Green,
    Cyan,
    Yellow,
    Red,
}

/// Right-aligns a status word in a fixed-width column, cargo style.
pub fn get_formatted_left_output(text: &str, color: &OutputColor) -> String {
    let padded = format!("{text:>width$}", width = STATUS_WIDTH);

    let styled = match color {
        OutputColor::Green => style(padded).green(),
        OutputColor::Cyan => style(padded).cyan(),
        OutputColor::Yellow => style(padded).yellow(),
        OutputColor::Red => style(padded).red(),
    };

    styled.bold().to_string()
}

pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template(&format!(
                "{} {{spinner}}{{msg}}",
                get_formatted_left_output("Running", &OutputColor::Cyan)
            ))
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
