mod anomalies_text;
mod classify_text;
mod error_text;
mod format;
mod json;
mod mode;
mod quality_text;
mod report_text;

use std::io;

use ledgerlens_engine::{EngineError, SuccessEnvelope};

pub use mode::{OutputMode, mode_for_command};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    println!("{body}");
    Ok(())
}

pub fn print_failure(error: &EngineError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    println!("{body}");
    Ok(())
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command.as_str() {
        "classify" => classify_text::render_classify(&success.data),
        "anomalies" => anomalies_text::render_anomalies(&success.data),
        "quality" => quality_text::render_quality(&success.data),
        "report" => report_text::render_report(&success.data),
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}
