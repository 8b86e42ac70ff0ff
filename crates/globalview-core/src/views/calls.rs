use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyCallListItem {
    pub id: String,
    pub title: String,
    /// Raw ISO-8601 timestamp as sent by the backend; empty when missing.
    pub scheduled_at: String,
    pub channel: String,
    pub required_roles: Vec<String>,
    pub attendance_percent: f64,
    pub total_invited: u32,
    pub total_present: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallAttendee {
    pub user_id: String,
    pub name: String,
    pub role: String,
    /// Lowercased backend attendance status (`present`, `absent`, ...).
    pub status: String,
    pub present: bool,
    /// Participation score in `0..=3`.
    pub participation_score: u8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionItemStatus {
    #[default]
    Pending,
    Completed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    pub id: String,
    pub description: String,
    pub owner_name: String,
    pub due_date: Option<String>,
    pub status: ActionItemStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyCallDetail {
    pub id: String,
    pub title: String,
    pub scheduled_at: String,
    pub channel: String,
    pub required_roles: Vec<String>,
    pub attendance_percent: f64,
    pub attendees: Vec<CallAttendee>,
    pub action_items: Vec<ActionItem>,
}

impl WeeklyCallDetail {
    /// Number of attendees whose status is anything other than present.
    #[must_use]
    pub fn no_show_count(&self) -> u32 {
        let absent = self.attendees.iter().filter(|a| !a.present).count();
        u32::try_from(absent).unwrap_or(u32::MAX)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyCallsMetrics {
    pub latest_call: Option<WeeklyCallListItem>,
    pub previous_call: Option<WeeklyCallListItem>,
    /// Attendance rate of the latest call.
    pub attendance_percent: f64,
    /// Latest attendance minus previous attendance, in percentage points.
    pub attendance_change: f64,
    pub no_show_count: u32,
}
