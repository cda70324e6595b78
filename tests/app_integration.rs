use std::fs;
use tracing::info;

use fundplan::core::allocation;
use fundplan::core::config::AppConfig;

const SAMPLE_CONFIG: &str = r#"
deposit_plans:
  - id: "initial-investment"
    frequency: one-time
    priority: 1
    created_at: "2026-01-05T09:00:00Z"
    allocations:
      - portfolio: "High risk"
        amount: 10000.0
      - portfolio: "Retirement"
        amount: 500.0
  - id: "salary-savings"
    frequency: monthly
    priority: 1
    created_at: "2026-01-10T09:00:00Z"
    allocations:
      - portfolio: "High risk"
        amount: 0.0
      - portfolio: "Retirement"
        amount: 100.0

fund_deposits:
  - amount: 10500.0
  - amount: 100.0
"#;

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    fs::write(config_file.path(), content).expect("Failed to write config file");
    config_file
}

#[test_log::test]
fn test_full_allocate_flow() {
    let config_file = write_config(SAMPLE_CONFIG);

    let result = fundplan::run_command(
        fundplan::AppCommand::Allocate,
        Some(config_file.path().to_str().unwrap()),
    );
    assert!(
        result.is_ok(),
        "Allocate command failed with: {:?}",
        result.err()
    );
}

#[test_log::test]
fn test_allocation_numbers_from_config() {
    let config_file = write_config(SAMPLE_CONFIG);
    let config = AppConfig::load_from_path(config_file.path()).expect("Failed to load config");

    assert_eq!(config.total_funds(), 10600.0);

    let outcome =
        allocation::allocate(&config.deposit_plans, config.total_funds()).expect("allocate failed");
    info!(?outcome, "Allocation outcome");

    let amounts: Vec<(&str, f64)> = outcome
        .portfolios
        .iter()
        .map(|p| (p.portfolio.as_str(), p.amount))
        .collect();
    assert_eq!(amounts, vec![("High risk", 10000.0), ("Retirement", 600.0)]);
    assert_eq!(outcome.remaining_funds, 0.0);
    assert!(outcome.plans.iter().all(|p| p.completed));
}

#[test_log::test]
fn test_allocation_with_excess_funds() {
    let config_with_extra = SAMPLE_CONFIG.replace("amount: 10500.0", "amount: 11500.0");
    let config_file = write_config(&config_with_extra);
    let config = AppConfig::load_from_path(config_file.path()).expect("Failed to load config");

    let outcome =
        allocation::allocate(&config.deposit_plans, config.total_funds()).expect("allocate failed");

    assert_eq!(outcome.remaining_funds, 1000.0);
    assert!(outcome.plans.iter().all(|p| p.completed));
}

#[test_log::test]
fn test_calc_command_end_to_end() {
    let result = fundplan::run_command(
        fundplan::AppCommand::Calc {
            expression: "10 - ( 2 + 3 * ( 7 - 5 ) )".to_string(),
        },
        None,
    );
    assert!(result.is_ok(), "Calc command failed: {:?}", result.err());
}

#[test_log::test]
fn test_calc_command_surfaces_invalid_expression() {
    for expression in ["1+3", "11", "1 + )"] {
        let result = fundplan::run_command(
            fundplan::AppCommand::Calc {
                expression: expression.to_string(),
            },
            None,
        );
        assert!(result.is_err(), "Expected `{expression}` to be rejected");
        assert!(
            result.unwrap_err().to_string().contains("invalid expression"),
            "Unexpected error message for `{expression}`"
        );
    }
}

#[test_log::test]
fn test_allocate_with_missing_config_fails() {
    let result = fundplan::run_command(
        fundplan::AppCommand::Allocate,
        Some("/nonexistent/fundplan-config.yaml"),
    );
    assert!(result.is_err());
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("Failed to read config file")
    );
}

#[test_log::test]
fn test_setup_then_allocate_round_trip() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.yaml");

    fundplan::cli::setup::setup_at_path(&config_path).expect("setup failed");

    let result = fundplan::run_command(
        fundplan::AppCommand::Allocate,
        Some(config_path.to_str().unwrap()),
    );
    assert!(
        result.is_ok(),
        "Allocate on generated config failed: {:?}",
        result.err()
    );
}
