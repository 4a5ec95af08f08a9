use ariadne::{Color, Label, Report, ReportKind, Source};
use precept::PreceptError;

/// Format a PreceptError with fancy terminal output using Ariadne
pub fn format_error(error: &PreceptError) -> String {
    match error {
        PreceptError::Consult(details) => {
            let mut output = Vec::new();
            let source_id = "program";

            let enhanced_message = format!(
                "Consult error: {} (at line {}, column {})",
                details.message, details.span.line, details.span.col
            );

            let mut report = Report::build(ReportKind::Error, source_id, details.span.start)
                .with_message(enhanced_message)
                .with_label(
                    Label::new((source_id, details.span.start..details.span.end))
                        .with_message("")
                        .with_color(Color::Red),
                );

            if let Some(suggestion) = &details.suggestion {
                report = report.with_help(suggestion);
            }

            match report.finish().write(
                (source_id, Source::from(details.source_text.as_ref())),
                &mut output,
            ) {
                Ok(_) => String::from_utf8_lossy(&output).to_string(),
                Err(_) => {
                    // Fallback to simple format
                    format!("{}", error)
                }
            }
        }
        PreceptError::Module(msg) => format!("Module error: {}", msg),
        PreceptError::Query(msg) => format!("Query error: {}", msg),
        PreceptError::Engine(msg) => format!("Engine error: {}", msg),
        PreceptError::ResourceLimitExceeded {
            limit_name,
            limit_value,
            actual_value,
            suggestion,
        } => {
            format!(
                "Resource limit exceeded: {}\n  Limit: {}\n  Actual: {}\n  Suggestion: {}",
                limit_name, limit_value, actual_value, suggestion
            )
        }
    }
}
