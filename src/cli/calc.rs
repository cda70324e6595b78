use super::ui;
use crate::core::expr::{self, Evaluation};
use anyhow::Result;
use comfy_table::Cell;

/// Evaluates an expression and prints the result with the trace of
/// operations that produced it.
pub fn run(expression: &str) -> Result<()> {
    let evaluation = expr::evaluate(expression)?;
    display_evaluation(expression, &evaluation);
    Ok(())
}

fn display_evaluation(expression: &str, evaluation: &Evaluation) {
    println!(
        "\nExpression: {}\n",
        ui::style_text(expression, ui::StyleType::Title)
    );

    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Step"), ui::header_cell("Operation")]);
    for (step, operation) in evaluation.operations.iter().enumerate() {
        table.add_row(vec![
            Cell::new((step + 1).to_string()),
            Cell::new(operation),
        ]);
    }
    println!("{table}");

    let counts = expr::count_operators(&evaluation.operators);
    if !counts.is_empty() {
        let mut usage = ui::new_styled_table();
        usage.set_header(vec![
            ui::header_cell("Operator"),
            ui::header_cell("Name"),
            ui::header_cell("Count"),
        ]);
        for (operator, count) in counts {
            usage.add_row(vec![
                Cell::new(operator.to_string()),
                Cell::new(operator.name()),
                Cell::new(count.to_string()),
            ]);
        }
        println!("\n{usage}");
    }

    println!(
        "\n{} {}",
        ui::style_text("Result:", ui::StyleType::TotalLabel),
        ui::style_text(&evaluation.result.to_string(), ui::StyleType::TotalValue)
    );
}
