use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub weekly_goal: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Log {
    pub id: String,
    pub skill_id: String,
    /// `YYYY-MM-DD`, see [`crate::dates::format_date`].
    pub date: String,
    pub count: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSkill {
    pub name: String,
    pub weekly_goal: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewLog {
    pub skill_id: String,
    pub date: String,
    pub count: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateLogRequest {
    pub count: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct LogQuery {
    pub skill_id: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayProgress {
    pub date: String,
    pub day_label: &'static str,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillProgress {
    pub skill_id: String,
    pub name: String,
    pub weekly_goal: u32,
    pub completed_count: u32,
    pub progress_percentage: f64,
    pub is_complete: bool,
    pub daily_breakdown: Vec<DayProgress>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyReport {
    pub week_label: String,
    pub week_start: String,
    pub week_end: String,
    pub skills: Vec<SkillProgress>,
    pub total_goal: u32,
    pub total_completed: u32,
    pub overall_progress: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStatus {
    Complete,
    OnTrack,
    Behind,
}

impl ProgressStatus {
    pub fn label(self) -> &'static str {
        match self {
            ProgressStatus::Complete => "complete",
            ProgressStatus::OnTrack => "on-track",
            ProgressStatus::Behind => "behind",
        }
    }
}

impl Serialize for ProgressStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Serialize)]
pub struct SkillStatus {
    pub skill_id: String,
    pub status: ProgressStatus,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    #[serde(flatten)]
    pub report: WeeklyReport,
    pub statuses: Vec<SkillStatus>,
}
