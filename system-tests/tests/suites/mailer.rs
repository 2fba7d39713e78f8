// system-tests/tests/suites/mailer.rs
// ============================================================================
// Module: Mailer Scenarios
// Description: Mailer example provisioning and region reconfiguration.
// Purpose: Verify mailer naming, schedule, region, and idempotent packaging.
// Dependencies: system-tests helpers, custodian-outputs, custodian-terraform
// ============================================================================

//! Scenarios for the mailer example.

use custodian_outputs::output_map;
use custodian_outputs::output_string;
use helpers::harness::ModuleScenario;
use helpers::harness::Prepared;
use helpers::harness::ScenarioResult;
use helpers::harness::assert_idempotent_reapply;

use crate::helpers;

const MAILER_NAME: &str = "cloud-custodian-dev-mailer";

#[test]
fn mailer_example() -> ScenarioResult {
    let Prepared::Ready(mut scenario) = ModuleScenario::prepare("mailer_example", "examples/mailer")?
    else {
        return Ok(());
    };
    let terraform = scenario.terraform().clone();
    let options = scenario.options();
    scenario.destroy_when_done(&options);

    terraform.init_and_apply(&options)?;
    let outputs = scenario.snapshot_outputs(&options)?;

    assert_eq!(output_string(&outputs, "lambda_function_name")?, MAILER_NAME);
    let function = output_map(&outputs, "lambda_function")?;
    let region = output_string(&outputs, "region")?;
    assert_eq!(
        function.get("region"),
        Some(&region),
        "mailer region should match the lambda_function region"
    );
    assert_eq!(output_string(&outputs, "event_rule_name")?, MAILER_NAME);
    assert_eq!(output_string(&outputs, "event_rule_schedule_expression")?, "rate(10 minutes)");

    let role = output_string(&outputs, "lambda_function_role")?;
    assert!(role.contains("arn:aws:iam::"), "role should be a full ARN: {role}");
    assert!(role.contains("role/cloud-custodian-dev-mailer"), "unexpected role name: {role}");

    assert_idempotent_reapply(&terraform, &options, &outputs)?;
    scenario.pass()
}

#[test]
fn mailer_example_region_change() -> ScenarioResult {
    let Prepared::Ready(mut scenario) =
        ModuleScenario::prepare("mailer_example_region_change", "examples/mailer")?
    else {
        return Ok(());
    };
    let terraform = scenario.terraform().clone();
    let options = scenario.options();
    let relocated = scenario.options().var("region", "us-east-1");
    scenario.destroy_when_done(&relocated);

    terraform.init_and_apply(&options)?;
    terraform.apply(&relocated)?;

    let function = terraform.output_map(&relocated, "lambda_function")?;
    assert_eq!(
        function.get("region").map(String::as_str),
        Some("us-east-1"),
        "mailer region should now be us-east-1"
    );
    scenario.note("re-applied with region=us-east-1");
    scenario.pass()
}
