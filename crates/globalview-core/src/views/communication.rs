use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FollowUpStatus {
    #[default]
    Open,
    Overdue,
    Completed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FollowUpSource {
    Call,
    #[default]
    Manual,
    Alert,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUp {
    pub id: String,
    pub leader_id: String,
    pub leader_name: String,
    pub title: String,
    pub due_date: Option<String>,
    pub status: FollowUpStatus,
    pub source: FollowUpSource,
    pub owner_name: Option<String>,
    pub notes: Option<String>,
}

/// Weekly contact status of a leader.
///
/// Any status may be set from any other; the board imposes no ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeeklyStatus {
    #[default]
    NotContacted,
    Contacted,
    NeedFollowup,
    Completed,
}

impl WeeklyStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            WeeklyStatus::NotContacted => "NOT_CONTACTED",
            WeeklyStatus::Contacted => "CONTACTED",
            WeeklyStatus::NeedFollowup => "NEED_FOLLOWUP",
            WeeklyStatus::Completed => "COMPLETED",
        }
    }
}

impl std::fmt::Display for WeeklyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeeklyStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "NOT_CONTACTED" => Ok(WeeklyStatus::NotContacted),
            "CONTACTED" => Ok(WeeklyStatus::Contacted),
            "NEED_FOLLOWUP" => Ok(WeeklyStatus::NeedFollowup),
            "COMPLETED" => Ok(WeeklyStatus::Completed),
            other => Err(format!("unknown weekly status: {other}")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyBoardLeader {
    pub leader_id: String,
    pub name: String,
    pub role: String,
    pub market: String,
    pub status: WeeklyStatus,
    pub notes: Option<String>,
    pub follow_up: Option<FollowUp>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyBoard {
    pub week_start: String,
    pub leaders: Vec<WeeklyBoardLeader>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySummary {
    pub week_start: String,
    pub total_leaders: u32,
    pub not_contacted: u32,
    pub contacted: u32,
    pub need_followup: u32,
    pub completed: u32,
    pub completion_percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelCount {
    pub channel: String,
    pub count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationHealth {
    pub window_days: u32,
    pub total_leaders: u32,
    pub contacted_leaders: u32,
    pub contact_rate: f64,
    pub by_channel: Vec<ChannelCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationMetrics {
    pub last_7_days: CommunicationHealth,
    pub last_14_days: CommunicationHealth,
    pub last_30_days: CommunicationHealth,
    pub overdue_follow_ups: u32,
}
