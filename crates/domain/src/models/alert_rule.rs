//! Per-user alert rule configuration.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::Document;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlertRule {
    pub rule_id: String,
    pub user_id: String,
    /// `None` applies the rule to every pet.
    pub pet_id: Option<String>,
    pub alert_type: String,
    pub is_enabled: bool,
    pub name: String,
    pub description: String,
    /// low, medium, high or adaptive
    pub sensitivity: String,
    pub custom_thresholds: AlertCustomThresholds,
    pub learning_enabled: bool,
    pub adaptive_sensitivity: bool,
    pub pattern_recognition: bool,
    pub contextual_rules: AlertContextualRules,
    pub suppression: AlertRuleSuppression,
    pub schedule: AlertRuleSchedule,
    pub analytics: AlertRuleAnalytics,
    pub ai_learning: AlertRuleAiLearning,
    pub customization: AlertRuleCustomization,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub last_triggered: Option<DateTime<Utc>>,
    pub version: i32,
}

impl Default for AlertRule {
    fn default() -> Self {
        Self {
            rule_id: String::new(),
            user_id: String::new(),
            pet_id: None,
            alert_type: String::new(),
            is_enabled: true,
            name: String::new(),
            description: String::new(),
            sensitivity: "medium".to_string(),
            custom_thresholds: AlertCustomThresholds::default(),
            learning_enabled: true,
            adaptive_sensitivity: true,
            pattern_recognition: true,
            contextual_rules: AlertContextualRules::default(),
            suppression: AlertRuleSuppression::default(),
            schedule: AlertRuleSchedule::default(),
            analytics: AlertRuleAnalytics::default(),
            ai_learning: AlertRuleAiLearning::default(),
            customization: AlertRuleCustomization::default(),
            created_at: None,
            updated_at: None,
            last_triggered: None,
            version: 1,
        }
    }
}

impl AlertRule {
    pub fn applies_to(&self, pet_id: &str) -> bool {
        self.is_enabled && self.pet_id.as_deref().map_or(true, |id| id == pet_id)
    }
}

impl Document for AlertRule {
    const COLLECTION: &'static str = "alert_rules";

    fn document_id(&self) -> &str {
        &self.rule_id
    }

    fn set_document_id(&mut self, id: String) {
        self.rule_id = id;
    }

    fn stamp(&mut self, now: DateTime<Utc>, created: bool) {
        if created && self.created_at.is_none() {
            self.created_at = Some(now);
        }
        self.updated_at = Some(now);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlertCustomThresholds {
    /// Seconds.
    pub time_threshold: Option<i32>,
    /// Meters.
    pub distance_threshold: Option<f64>,
    /// km/h
    pub speed_threshold: Option<f64>,
    /// Percent.
    pub battery_threshold: Option<i32>,
    pub confidence_threshold: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlertContextualRules {
    pub weather_aware: bool,
    pub time_of_day_aware: bool,
    pub family_presence_aware: bool,
    pub routine_aware: bool,
    pub seasonal_adjustments: bool,
}

impl Default for AlertContextualRules {
    fn default() -> Self {
        Self {
            weather_aware: true,
            time_of_day_aware: true,
            family_presence_aware: true,
            routine_aware: true,
            seasonal_adjustments: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlertRuleSuppression {
    pub enabled: bool,
    /// Minutes.
    pub similar_window: i32,
    pub max_per_hour: i32,
    pub quiet_hours: bool,
    pub family_coordination: bool,
    pub contextual_suppression: bool,
    pub location_based_suppression: LocationBasedSuppression,
}

impl Default for AlertRuleSuppression {
    fn default() -> Self {
        Self {
            enabled: true,
            similar_window: 300,
            max_per_hour: 3,
            quiet_hours: true,
            family_coordination: true,
            contextual_suppression: true,
            location_based_suppression: LocationBasedSuppression::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocationBasedSuppression {
    pub enabled: bool,
    pub suppress_in_zones: Vec<String>,
    pub enhance_in_zones: Vec<String>,
}

impl Default for LocationBasedSuppression {
    fn default() -> Self {
        Self {
            enabled: true,
            suppress_in_zones: Vec::new(),
            enhance_in_zones: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlertRuleSchedule {
    pub enabled: bool,
    pub active_hours: Vec<ActiveHours>,
    pub vacation_mode: VacationMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActiveHours {
    pub start: String,
    pub end: String,
    pub days: Vec<String>,
    pub timezone: String,
}

impl Default for ActiveHours {
    fn default() -> Self {
        Self {
            start: String::new(),
            end: String::new(),
            days: Vec::new(),
            timezone: "America/New_York".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VacationMode {
    pub enabled: bool,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub alternate_rules: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlertRuleAnalytics {
    pub total_triggers: i32,
    pub false_positives: i32,
    pub true_positives: i32,
    pub helpful_alerts: i32,
    pub last_optimized: Option<DateTime<Utc>>,
    pub accuracy: i32,
    pub trends: AlertRuleTrends,
    pub hourly_distribution: HashMap<String, i32>,
    pub weekly_distribution: HashMap<String, i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlertRuleTrends {
    pub triggers_this_week: i32,
    /// improving, stable or declining
    pub accuracy_trend: String,
    pub user_satisfaction: f64,
    pub average_response_time: i64,
}

impl Default for AlertRuleTrends {
    fn default() -> Self {
        Self {
            triggers_this_week: 0,
            accuracy_trend: "stable".to_string(),
            user_satisfaction: 0.0,
            average_response_time: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlertRuleAiLearning {
    pub learning_rate: f64,
    pub confidence_score: f64,
    pub last_learning_update: Option<DateTime<Utc>>,
    pub learning_history: Vec<LearningUpdate>,
    pub patterns: AlertRulePatterns,
}

impl Default for AlertRuleAiLearning {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            confidence_score: 0.0,
            last_learning_update: None,
            learning_history: Vec::new(),
            patterns: AlertRulePatterns::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LearningUpdate {
    pub date: Option<DateTime<Utc>>,
    pub change: String,
    pub reason: String,
    pub impact: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlertRulePatterns {
    pub normal_exit_times: Vec<String>,
    pub routine_locations: Vec<String>,
    pub family_patterns: String,
    pub seasonal_adjustments: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlertRuleCustomization {
    /// immediate, batched or summary
    pub notification_style: String,
    pub escalation_enabled: bool,
    /// Seconds.
    pub escalation_delay: i64,
    pub personalized_messages: bool,
    pub sound_enabled: bool,
    pub vibration_enabled: bool,
}

impl Default for AlertRuleCustomization {
    fn default() -> Self {
        Self {
            notification_style: "immediate".to_string(),
            escalation_enabled: false,
            escalation_delay: 1800,
            personalized_messages: true,
            sound_enabled: true,
            vibration_enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_defaults() {
        let rule = AlertRule::default();
        assert_eq!(rule.version, 1);
        assert_eq!(rule.suppression.max_per_hour, 3);
        assert_eq!(rule.customization.escalation_delay, 1800);
        assert_eq!(rule.ai_learning.learning_rate, 0.1);
        assert_eq!(rule.analytics.trends.accuracy_trend, "stable");
    }

    #[test]
    fn test_applies_to() {
        let mut rule = AlertRule::default();
        assert!(rule.applies_to("p1"));

        rule.pet_id = Some("p2".into());
        assert!(!rule.applies_to("p1"));
        assert!(rule.applies_to("p2"));

        rule.is_enabled = false;
        assert!(!rule.applies_to("p2"));
    }
}
