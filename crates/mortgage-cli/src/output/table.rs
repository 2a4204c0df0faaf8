use mortgage_core::scenario::ScenarioResult;
use tabled::{builder::Builder, Table};

/// Print one scenario as a bordered console table.
pub fn print_scenario(name: &str, result: &ScenarioResult) {
    println!("\n{name}");

    let mut builder = Builder::default();
    builder.push_record(["项目", "数值"]);
    for (label, value) in result.rows() {
        builder.push_record([label, value]);
    }

    let table = Table::from(builder);
    println!("{table}");
}
