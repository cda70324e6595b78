use super::ui;
use crate::core::allocation::{self, AllocationOutcome, DepositPlan};
use crate::core::config::AppConfig;
use anyhow::Result;
use comfy_table::Cell;

/// Runs the allocation engine over the configured deposit plans and fund
/// deposits, then renders per-portfolio totals and per-plan status.
pub fn run(config: &AppConfig) -> Result<()> {
    let funds = config.total_funds();
    let outcome = allocation::allocate(&config.deposit_plans, funds)?;
    display_portfolio_table(&outcome, funds);
    display_plan_table(&config.deposit_plans, &outcome.plans);
    Ok(())
}

fn display_portfolio_table(outcome: &AllocationOutcome, funds_deposited: f64) {
    let allocated_total = funds_deposited - outcome.remaining_funds;

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Portfolio"),
        ui::header_cell("Allocated"),
        ui::header_cell("Share"),
    ]);

    for entry in &outcome.portfolios {
        let share = if allocated_total > 0.0 {
            entry.amount / allocated_total * 100.0
        } else {
            0.0
        };
        table.add_row(vec![
            Cell::new(&entry.portfolio),
            ui::amount_cell(entry.amount),
            ui::format_percentage_cell(share),
        ]);
    }

    println!(
        "\n{}\n",
        ui::style_text("Fund Allocation", ui::StyleType::Title)
    );
    println!("{table}");
    println!(
        "\n{} {:.2}",
        ui::style_text("Funds deposited:", ui::StyleType::TotalLabel),
        funds_deposited
    );
    println!(
        "{} {}",
        ui::style_text("Remaining funds:", ui::StyleType::TotalLabel),
        ui::style_text(
            &format!("{:.2}", outcome.remaining_funds),
            ui::StyleType::TotalValue
        )
    );
}

/// Funding state derived for display: the engine itself only tracks the
/// `completed` flag.
fn plan_status(before: &DepositPlan, after: &DepositPlan) -> &'static str {
    if after.completed {
        "Completed"
    } else if after.requested_total() < before.requested_total() {
        "Partially funded"
    } else {
        "Pending"
    }
}

fn display_plan_table(before: &[DepositPlan], after: &[DepositPlan]) {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Plan"),
        ui::header_cell("Frequency"),
        ui::header_cell("Priority"),
        ui::header_cell("Created"),
        ui::header_cell("Outstanding"),
        ui::header_cell("Status"),
    ]);

    for (plan_before, plan_after) in before.iter().zip(after.iter()) {
        table.add_row(vec![
            Cell::new(&plan_after.id),
            Cell::new(plan_after.frequency.display_name()),
            Cell::new(plan_after.priority.to_string()),
            Cell::new(plan_after.created_at.format("%Y-%m-%d").to_string()),
            ui::amount_cell(plan_after.requested_total()),
            Cell::new(plan_status(plan_before, plan_after)),
        ]);
    }

    println!(
        "\n{}\n",
        ui::style_text("Deposit Plans", ui::StyleType::Title)
    );
    println!("{table}");
    ui::print_separator();
}
