// system-tests/tests/helpers/expectations.rs
// ============================================================================
// Module: Scenario Expectations
// Description: Expected literals and error fragments for module scenarios.
// Purpose: Keep brittle, tool-version-dependent text in one place.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Negative scenarios assert on fragments of Terraform and validator error
//! text. These strings change with Terraform and Cloud Custodian releases, so
//! they live here rather than inline in the suites.

// ============================================================================
// SECTION: Error Fragments
// ============================================================================

/// Raised by Terraform when an `external` data source exits non-zero.
pub const EXTERNAL_PROGRAM_FAILED: &str = "External Program Execution Failed";

/// Mailer validator summary line.
pub const MAILER_VALIDATION_FAILED: &str = "Mailer configuration validation failed";

/// Policy validator summary line.
pub const POLICY_VALIDATION_FAILED: &str = "Policy validation failed";

/// Prefix of the allowed-modes listing.
pub const POLICY_MODE_MUST_BE_ONE_OF: &str = "Policy mode must be one of";

/// Cloud Custodian schema validation line.
pub const POLICY_VALIDATION_ERROR: &str = "Policy validation error";

/// Mode label no policy accepts.
pub const INVALID_POLICY_MODE: &str = "invalid-mode";

// ============================================================================
// SECTION: Event Patterns
// ============================================================================

/// Event pattern produced for the cloudtrail example policy.
pub const CLOUDTRAIL_EVENT_PATTERN: &str = r#"{
  "detail": {
    "eventName": ["AuthorizeSecurityGroupIngress", "RevokeSecurityGroupIngress"],
    "eventSource": ["ec2.amazonaws.com"]
  },
  "detail-type": ["AWS API Call via CloudTrail"]
}"#;

/// Event pattern produced for the ec2-instance-state example policy.
pub const EC2_INSTANCE_STATE_EVENT_PATTERN: &str = r#"{
  "detail": {"state": ["terminated"]},
  "detail-type": ["EC2 Instance State-change Notification"],
  "source": ["aws.ec2"]
}"#;

// ============================================================================
// SECTION: Assertions
// ============================================================================

/// Returns the fragments missing from `message`.
pub fn missing_fragments<'a>(message: &str, fragments: &[&'a str]) -> Vec<&'a str> {
    fragments.iter().copied().filter(|fragment| !message.contains(fragment)).collect()
}
