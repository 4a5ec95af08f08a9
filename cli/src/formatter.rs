use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Row, Table};
use precept::{QueryOutcome, ValidationResult};

pub struct Formatter {}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self {}
    }

    pub fn format_result(&self, result: &ValidationResult) -> String {
        let mut output = String::new();
        output.push_str(&self.format_table(result));

        let passed = result.passed.iter().filter(|p| **p).count();
        output.push_str(&format!(
            "\n{} of {} checks passed\n",
            passed,
            result.passed.len()
        ));
        output
    }

    fn format_table(&self, result: &ValidationResult) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec!["#", "Requirement", "Result"]));

        for (i, description) in result.description.iter().enumerate() {
            let verdict = match result.outcomes[i] {
                QueryOutcome::Skipped => "pass (not applicable)",
                QueryOutcome::Proved => "pass",
                QueryOutcome::Unproven => "fail",
                QueryOutcome::LimitExceeded => "fail (inference limit)",
                QueryOutcome::Errored => "fail (error)",
            };
            table.add_row(Row::from(vec![
                Cell::new(i + 1).set_alignment(CellAlignment::Right),
                Cell::new(description),
                Cell::new(verdict),
            ]));
        }

        format!("{}\n", table)
    }
}
