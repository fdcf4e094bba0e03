//! Platform health scoring.

use serde::Serialize;

/// Neutral starting point before bonuses and penalties.
pub const BASE_SCORE: f64 = 50.0;

/// Bonus weight for the share of clinics on a paid plan.
pub const PAYING_SHARE_WEIGHT: f64 = 30.0;

/// Bonus weight for the historical trial conversion rate.
pub const CONVERSION_WEIGHT: f64 = 20.0;

/// Penalty weight for the share of subscriptions past due.
pub const PAST_DUE_WEIGHT: f64 = 30.0;

/// Penalty weight for the share of subscriptions cancelled.
pub const CANCELLED_WEIGHT: f64 = 20.0;

/// Flat penalty per trial that has expired but not yet been processed.
pub const STALE_TRIAL_PENALTY: f64 = 2.0;

/// Raw counts the health score is computed from.
#[derive(Debug, Clone, Copy, Default)]
pub struct HealthInputs {
    pub total_subscriptions: u64,
    pub active_paid: u64,
    pub past_due: u64,
    pub cancelled: u64,
    pub trials_started: u64,
    pub trials_converted: u64,
    /// Trialing subscriptions whose trial end has already passed.
    pub stale_trials: u64,
}

/// The 0-100 heuristic health score with the factors behind it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub score: u8,
    pub label: &'static str,
    pub factors: Vec<HealthFactor>,
}

/// One bonus or penalty that went into the score.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthFactor {
    pub name: &'static str,
    /// Signed contribution to the score.
    pub points: f64,
}

/// Computes the heuristic health score.
///
/// Starts from a neutral base, adds bonuses for paying share and trial
/// conversion, subtracts penalties for past-due share, cancellations,
/// and unprocessed expired trials, then clamps to 0-100.
///
/// # Edge Cases
/// - No subscriptions at all: returns the base score with no factors.
/// - No trials started: the conversion bonus is skipped rather than
///   counted as zero conversion.
pub fn compute_health(inputs: &HealthInputs) -> HealthReport {
    if inputs.total_subscriptions == 0 {
        return HealthReport {
            score: BASE_SCORE as u8,
            label: label_for(BASE_SCORE as u8),
            factors: Vec::new(),
        };
    }

    let total = inputs.total_subscriptions as f64;
    let mut factors = Vec::new();

    let paying_share = inputs.active_paid as f64 / total;
    factors.push(HealthFactor {
        name: "paying share",
        points: paying_share * PAYING_SHARE_WEIGHT,
    });

    if inputs.trials_started > 0 {
        let conversion = inputs.trials_converted as f64 / inputs.trials_started as f64;
        factors.push(HealthFactor {
            name: "trial conversion",
            points: conversion * CONVERSION_WEIGHT,
        });
    }

    let past_due_share = inputs.past_due as f64 / total;
    if past_due_share > 0.0 {
        factors.push(HealthFactor {
            name: "past due share",
            points: -(past_due_share * PAST_DUE_WEIGHT),
        });
    }

    let cancelled_share = inputs.cancelled as f64 / total;
    if cancelled_share > 0.0 {
        factors.push(HealthFactor {
            name: "cancelled share",
            points: -(cancelled_share * CANCELLED_WEIGHT),
        });
    }

    if inputs.stale_trials > 0 {
        factors.push(HealthFactor {
            name: "unprocessed expired trials",
            points: -(inputs.stale_trials as f64 * STALE_TRIAL_PENALTY),
        });
    }

    let raw: f64 = BASE_SCORE + factors.iter().map(|f| f.points).sum::<f64>();
    let score = raw.clamp(0.0, 100.0).round() as u8;

    HealthReport {
        score,
        label: label_for(score),
        factors,
    }
}

fn label_for(score: u8) -> &'static str {
    match score {
        80..=100 => "Healthy",
        60..=79 => "Stable",
        40..=59 => "At risk",
        _ => "Critical",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_platform_scores_base() {
        let report = compute_health(&HealthInputs::default());
        assert_eq!(report.score, BASE_SCORE as u8);
        assert!(report.factors.is_empty());
    }

    #[test]
    fn all_paying_all_converted_scores_high() {
        let inputs = HealthInputs {
            total_subscriptions: 10,
            active_paid: 10,
            past_due: 0,
            cancelled: 0,
            trials_started: 5,
            trials_converted: 5,
            stale_trials: 0,
        };
        let report = compute_health(&inputs);
        assert_eq!(report.score, 100);
        assert_eq!(report.label, "Healthy");
    }

    #[test]
    fn past_due_drags_score_down() {
        let healthy = HealthInputs {
            total_subscriptions: 10,
            active_paid: 5,
            ..Default::default()
        };
        let struggling = HealthInputs {
            past_due: 5,
            ..healthy
        };
        assert!(compute_health(&struggling).score < compute_health(&healthy).score);
    }

    #[test]
    fn stale_trials_are_penalized_per_trial() {
        let base = HealthInputs {
            total_subscriptions: 10,
            active_paid: 5,
            ..Default::default()
        };
        let one_stale = HealthInputs {
            stale_trials: 1,
            ..base
        };
        let three_stale = HealthInputs {
            stale_trials: 3,
            ..base
        };
        let s0 = compute_health(&base).score;
        let s1 = compute_health(&one_stale).score;
        let s3 = compute_health(&three_stale).score;
        assert!(s1 < s0);
        assert!(s3 < s1);
    }

    #[test]
    fn score_never_leaves_range() {
        let worst = HealthInputs {
            total_subscriptions: 10,
            active_paid: 0,
            past_due: 10,
            cancelled: 10,
            trials_started: 10,
            trials_converted: 0,
            stale_trials: 100,
        };
        let report = compute_health(&worst);
        assert_eq!(report.score, 0);
        assert_eq!(report.label, "Critical");
    }

    #[test]
    fn no_trials_skips_conversion_factor() {
        let inputs = HealthInputs {
            total_subscriptions: 4,
            active_paid: 2,
            ..Default::default()
        };
        let report = compute_health(&inputs);
        assert!(report
            .factors
            .iter()
            .all(|f| f.name != "trial conversion"));
    }
}
