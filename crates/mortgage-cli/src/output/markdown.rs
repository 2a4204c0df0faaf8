use std::io;
use std::path::Path;

use mortgage_core::scenario::ScenarioResult;

/// Render every scenario as a `##` section with a centered pipe table.
pub fn render_markdown(report: &[(String, ScenarioResult)]) -> String {
    let mut out = String::new();
    for (name, result) in report {
        out.push_str(&format!("## {name}\n"));
        out.push_str("| 项目 | 数值 |\n");
        out.push_str("|:---:|:---:|\n");
        for (label, value) in result.rows() {
            out.push_str(&format!("| {label} | {value} |\n"));
        }
        out.push('\n');
    }
    out
}

/// Write the markdown report, staged then renamed into place.
pub fn write_markdown(path: &Path, report: &[(String, ScenarioResult)]) -> io::Result<()> {
    super::write_atomic(path, &render_markdown(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mortgage_core::{config, scenario};

    const CONFIG: &str = "\
house_price = 300
down_payment_ratio = 30
fund_loan_amount = 20
fund_loan_rate = 3.1
commercial_loan_rate = 4.9
deed_tax_rate = 1
loan_years = 30
agent_fee_ratio = 1
hard_deco = 60000
whole_house_custom = 30000
doors_and_windows = 20000
soft_furnishings = 15000
appliance = 20000
miscellaneous = 5000
";

    /// Pull (label, value) pairs back out of a rendered pipe table.
    fn parse_pipe_rows(section: &str) -> Vec<(String, String)> {
        section
            .lines()
            .filter(|l| l.starts_with('|') && !l.contains(":---:") && !l.contains("| 项目 |"))
            .map(|l| {
                let cells: Vec<&str> = l.trim_matches('|').split('|').collect();
                assert_eq!(cells.len(), 2, "malformed row: {l}");
                (cells[0].trim().to_string(), cells[1].trim().to_string())
            })
            .collect()
    }

    #[test]
    fn test_markdown_round_trips_labels_and_values() {
        let params = config::parse_config(CONFIG).unwrap();
        let report = scenario::build_report(&params).unwrap();
        let rendered = render_markdown(&report);

        let sections: Vec<&str> = rendered
            .split("## ")
            .filter(|s| !s.is_empty())
            .collect();
        assert_eq!(sections.len(), report.len());

        for (section, (name, result)) in sections.iter().zip(&report) {
            assert!(section.starts_with(name.as_str()));
            assert_eq!(parse_pipe_rows(section), result.rows());
        }
    }

    #[test]
    fn test_sections_are_headed_and_centered() {
        let params = config::parse_config(CONFIG).unwrap();
        let report = scenario::build_report(&params).unwrap();
        let rendered = render_markdown(&report);

        assert!(rendered.starts_with("## 组合贷款方案-等额本息\n"));
        assert_eq!(rendered.matches("|:---:|:---:|").count(), report.len());
    }
}
