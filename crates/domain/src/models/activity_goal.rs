//! Activity goals set per pet.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::Document;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActivityGoal {
    pub goal_id: String,
    pub pet_id: String,
    pub user_id: String,
    /// daily_steps, weekly_exercise, weight_management or behavioral
    pub goal_type: String,
    pub title: String,
    pub description: String,
    /// fitness, health, training or social
    pub category: String,
    pub target: GoalTarget,
    pub current_progress: GoalCurrentProgress,
    pub is_active: bool,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub paused_at: Option<DateTime<Utc>>,
    /// easy, moderate, challenging or expert
    pub difficulty: String,
    /// 1-5
    pub priority: i32,
    /// private, family or public
    pub visibility: String,
    pub ai_recommended: bool,
    pub adaptive_target: bool,
    pub personalized_factors: PersonalizedFactors,
    pub history: Vec<GoalHistoryEntry>,
    pub streaks: GoalStreaks,
    pub achievements: GoalAchievements,
    pub analytics: GoalAnalytics,
    pub motivation: GoalMotivation,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub last_achieved: Option<DateTime<Utc>>,
    pub next_milestone: NextMilestone,
}

impl Default for ActivityGoal {
    fn default() -> Self {
        Self {
            goal_id: String::new(),
            pet_id: String::new(),
            user_id: String::new(),
            goal_type: String::new(),
            title: String::new(),
            description: String::new(),
            category: "fitness".to_string(),
            target: GoalTarget::default(),
            current_progress: GoalCurrentProgress::default(),
            is_active: true,
            start_date: None,
            end_date: None,
            paused_at: None,
            difficulty: "moderate".to_string(),
            priority: 3,
            visibility: "private".to_string(),
            ai_recommended: false,
            adaptive_target: true,
            personalized_factors: PersonalizedFactors::default(),
            history: Vec::new(),
            streaks: GoalStreaks::default(),
            achievements: GoalAchievements::default(),
            analytics: GoalAnalytics::default(),
            motivation: GoalMotivation::default(),
            created_at: None,
            updated_at: None,
            last_achieved: None,
            next_milestone: NextMilestone::default(),
        }
    }
}

impl ActivityGoal {
    /// Progress toward the target in percent, capped at 100.
    pub fn completion_percentage(&self) -> f64 {
        if self.target.value <= 0 {
            return 0.0;
        }
        let pct = f64::from(self.current_progress.value) / f64::from(self.target.value) * 100.0;
        pct.min(100.0)
    }
}

impl Document for ActivityGoal {
    const COLLECTION: &'static str = "activity_goals";

    fn document_id(&self) -> &str {
        &self.goal_id
    }

    fn set_document_id(&mut self, id: String) {
        self.goal_id = id;
    }

    fn stamp(&mut self, now: DateTime<Utc>, created: bool) {
        if created {
            self.created_at.get_or_insert(now);
            self.start_date.get_or_insert(now);
        }
        self.updated_at = Some(now);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GoalTarget {
    pub value: i32,
    /// steps, minutes, calories, km or count
    pub unit: String,
    /// daily, weekly, monthly or custom
    pub period: String,
    pub custom_period_days: Option<i32>,
}

impl Default for GoalTarget {
    fn default() -> Self {
        Self {
            value: 0,
            unit: String::new(),
            period: "daily".to_string(),
            custom_period_days: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GoalCurrentProgress {
    pub value: i32,
    pub percentage: f64,
    pub last_updated: Option<DateTime<Utc>>,
    /// improving, stable or declining
    pub trend: String,
    pub projected_completion: Option<DateTime<Utc>>,
}

impl Default for GoalCurrentProgress {
    fn default() -> Self {
        Self {
            value: 0,
            percentage: 0.0,
            last_updated: None,
            trend: "stable".to_string(),
            projected_completion: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalizedFactors {
    pub breed: String,
    /// Years.
    pub age: i32,
    /// Kilograms.
    pub weight: f64,
    pub activity_level: String,
    pub health_conditions: Vec<String>,
}

impl Default for PersonalizedFactors {
    fn default() -> Self {
        Self {
            breed: String::new(),
            age: 0,
            weight: 0.0,
            activity_level: "medium".to_string(),
            health_conditions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GoalHistoryEntry {
    /// `YYYY-MM-DD`
    pub date: String,
    pub achieved: bool,
    pub value: i32,
    pub percentage: f64,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GoalStreaks {
    pub current: i32,
    pub longest: i32,
    pub this_month: i32,
    pub total: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GoalAchievements {
    pub total_achievements: i32,
    pub milestones: Vec<GoalMilestone>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GoalMilestone {
    #[serde(rename = "type")]
    pub milestone_type: String,
    pub achieved_at: Option<DateTime<Utc>>,
    pub value: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GoalAnalytics {
    pub average_completion: f64,
    pub best_day: String,
    pub worst_day: String,
    pub seasonal_trends: SeasonalTrends,
    pub correlations: GoalCorrelations,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonalTrends {
    pub spring: f64,
    pub summer: f64,
    pub fall: f64,
    pub winter: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GoalCorrelations {
    pub weather: f64,
    pub family_presence: f64,
    pub daylight: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GoalMotivation {
    pub reward_system: bool,
    pub rewards: Vec<GoalReward>,
    pub motivational_messages: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GoalReward {
    #[serde(rename = "type")]
    pub reward_type: String,
    pub trigger: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NextMilestone {
    #[serde(rename = "type")]
    pub milestone_type: String,
    pub required_value: i32,
    pub current_progress: i32,
}
