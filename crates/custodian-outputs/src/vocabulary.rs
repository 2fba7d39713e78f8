// crates/custodian-outputs/src/vocabulary.rs
// ============================================================================
// Module: Deployment Vocabulary
// Description: Closed value sets reported by the Lambda modules.
// Purpose: Parse mode and frequency outputs into typed variants.
// Dependencies: serde, crate::error
// ============================================================================

//! ## Overview
//! The Lambda modules echo back a policy execution mode (`mode_type`) and, for
//! config rules, an optional execution frequency. Both come from closed sets;
//! parsing them here turns a typo in a fixture into a precise error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::OutputError;

// ============================================================================
// SECTION: Policy Modes
// ============================================================================

/// Lambda execution mode of a Cloud Custodian policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyMode {
    /// Fixed-rate periodic invocation.
    Periodic,
    /// EventBridge Scheduler invocation.
    Schedule,
    /// AWS Config change-triggered rule.
    ConfigRule,
    /// AWS Config periodic polling rule.
    ConfigPollRule,
    /// CloudTrail API call events.
    Cloudtrail,
    /// Personal Health Dashboard events.
    Phd,
    /// EC2 instance state-change events.
    Ec2InstanceState,
    /// Auto Scaling group instance state-change events.
    AsgInstanceState,
    /// GuardDuty findings.
    GuardDuty,
}

impl PolicyMode {
    /// Every accepted mode, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::Periodic,
        Self::Schedule,
        Self::ConfigRule,
        Self::ConfigPollRule,
        Self::Cloudtrail,
        Self::Phd,
        Self::Ec2InstanceState,
        Self::AsgInstanceState,
        Self::GuardDuty,
    ];

    /// Returns the wire label used in policies and outputs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Periodic => "periodic",
            Self::Schedule => "schedule",
            Self::ConfigRule => "config-rule",
            Self::ConfigPollRule => "config-poll-rule",
            Self::Cloudtrail => "cloudtrail",
            Self::Phd => "phd",
            Self::Ec2InstanceState => "ec2-instance-state",
            Self::AsgInstanceState => "asg-instance-state",
            Self::GuardDuty => "guard-duty",
        }
    }

    /// Parses a wire label.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::UnknownPolicyMode`] for unrecognized labels.
    pub fn parse(raw: &str) -> Result<Self, OutputError> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == raw)
            .ok_or_else(|| OutputError::UnknownPolicyMode(raw.to_string()))
    }
}

impl FromStr for PolicyMode {
    type Err = OutputError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}

impl fmt::Display for PolicyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Config Rule Frequencies
// ============================================================================

/// AWS Config `maximum_execution_frequency` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ConfigRuleFrequency {
    /// Every hour.
    #[serde(rename = "One_Hour")]
    OneHour,
    /// Every three hours.
    #[serde(rename = "Three_Hours")]
    ThreeHours,
    /// Every six hours.
    #[serde(rename = "Six_Hours")]
    SixHours,
    /// Every twelve hours.
    #[serde(rename = "Twelve_Hours")]
    TwelveHours,
    /// Every twenty-four hours.
    #[serde(rename = "TwentyFour_Hours")]
    TwentyFourHours,
}

impl ConfigRuleFrequency {
    /// Every accepted frequency, shortest first.
    pub const ALL: [Self; 5] =
        [Self::OneHour, Self::ThreeHours, Self::SixHours, Self::TwelveHours, Self::TwentyFourHours];

    /// Returns the AWS Config label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneHour => "One_Hour",
            Self::ThreeHours => "Three_Hours",
            Self::SixHours => "Six_Hours",
            Self::TwelveHours => "Twelve_Hours",
            Self::TwentyFourHours => "TwentyFour_Hours",
        }
    }

    /// Parses an AWS Config label.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::UnknownFrequency`] for unrecognized labels.
    pub fn parse(raw: &str) -> Result<Self, OutputError> {
        Self::ALL
            .into_iter()
            .find(|frequency| frequency.as_str() == raw)
            .ok_or_else(|| OutputError::UnknownFrequency(raw.to_string()))
    }
}

impl fmt::Display for ConfigRuleFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
