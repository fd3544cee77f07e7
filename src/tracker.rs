//! Validated mutations of skills and logs.
//!
//! Every operation re-reads the collection it changes, computes the new
//! collection, and saves it whole.

use crate::dates::{format_date, parse_date};
use crate::errors::AppError;
use crate::models::{Log, NewLog, NewSkill, Skill};
use crate::store::ExecutionStore;
use chrono::{NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

pub const MIN_WEEKLY_GOAL: i64 = 1;
pub const MAX_WEEKLY_GOAL: i64 = 50;

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn create_skill(store: &mut dyn ExecutionStore, input: NewSkill) -> Result<Skill, AppError> {
    let (name, weekly_goal) = validate_skill(input)?;
    let mut skills = store.skills();

    let now = Utc::now();
    let created_at = skills
        .iter()
        .map(|skill| skill.created_at)
        .max()
        .map_or(now, |latest| latest.max(now));

    let skill = Skill {
        id: new_id(),
        name,
        weekly_goal,
        created_at,
    };
    skills.push(skill.clone());
    store.save_skills(skills);

    info!(skill_id = %skill.id, "created skill");
    Ok(skill)
}

pub fn update_skill(
    store: &mut dyn ExecutionStore,
    id: &str,
    input: NewSkill,
) -> Result<Skill, AppError> {
    let (name, weekly_goal) = validate_skill(input)?;
    let mut skills = store.skills();

    let skill = skills
        .iter_mut()
        .find(|skill| skill.id == id)
        .ok_or_else(|| AppError::not_found("skill not found"))?;
    skill.name = name;
    skill.weekly_goal = weekly_goal;
    let updated = skill.clone();

    store.save_skills(skills);
    Ok(updated)
}

pub fn delete_skill(store: &mut dyn ExecutionStore, id: &str) -> Result<(), AppError> {
    let mut skills = store.skills();
    let before = skills.len();
    skills.retain(|skill| skill.id != id);
    if skills.len() == before {
        return Err(AppError::not_found("skill not found"));
    }
    store.save_skills(skills);

    let mut logs = store.logs();
    let before = logs.len();
    logs.retain(|log| log.skill_id != id);
    let removed = before - logs.len();
    store.save_logs(logs);

    info!(skill_id = %id, removed_logs = removed, "deleted skill");
    Ok(())
}

pub fn quick_log(
    store: &mut dyn ExecutionStore,
    skill_id: &str,
    date: NaiveDate,
) -> Result<Log, AppError> {
    ensure_skill_exists(store, skill_id)?;
    let date = format_date(date);
    let mut logs = store.logs();

    let log = match store.find_log_for_date(skill_id, &date) {
        Some(mut existing) => {
            existing.count = existing.count.saturating_add(1);
            for log in logs.iter_mut().filter(|log| log.id == existing.id) {
                log.count = existing.count;
            }
            existing
        }
        None => {
            let log = Log {
                id: new_id(),
                skill_id: skill_id.to_string(),
                date,
                count: 1,
            };
            logs.push(log.clone());
            log
        }
    };

    store.save_logs(logs);
    Ok(log)
}

/// Rejects a second log for the same skill and day.
pub fn add_log(store: &mut dyn ExecutionStore, input: NewLog) -> Result<Log, AppError> {
    if input.skill_id.trim().is_empty() {
        return Err(AppError::bad_request("select a skill"));
    }
    ensure_skill_exists(store, &input.skill_id)?;
    let date = parse_date(&input.date)
        .map(format_date)
        .ok_or_else(|| AppError::bad_request("date must be YYYY-MM-DD"))?;
    let count = validate_count(input.count)?;

    if store.log_exists_for_date(&input.skill_id, &date) {
        return Err(AppError::conflict(
            "a log already exists for this skill on this date",
        ));
    }

    let mut logs = store.logs();
    let log = Log {
        id: new_id(),
        skill_id: input.skill_id,
        date,
        count,
    };
    logs.push(log.clone());
    store.save_logs(logs);
    Ok(log)
}

pub fn update_log(store: &mut dyn ExecutionStore, id: &str, count: i64) -> Result<Log, AppError> {
    let count = validate_count(count)?;
    let mut logs = store.logs();

    let log = logs
        .iter_mut()
        .find(|log| log.id == id)
        .ok_or_else(|| AppError::not_found("log not found"))?;
    log.count = count;
    let updated = log.clone();

    store.save_logs(logs);
    Ok(updated)
}

pub fn delete_log(store: &mut dyn ExecutionStore, id: &str) -> Result<(), AppError> {
    let mut logs = store.logs();
    let before = logs.len();
    logs.retain(|log| log.id != id);
    if logs.len() == before {
        return Err(AppError::not_found("log not found"));
    }
    store.save_logs(logs);
    Ok(())
}

fn ensure_skill_exists(store: &dyn ExecutionStore, skill_id: &str) -> Result<(), AppError> {
    if store.skills().iter().any(|skill| skill.id == skill_id) {
        Ok(())
    } else {
        Err(AppError::not_found("skill not found"))
    }
}

fn validate_skill(input: NewSkill) -> Result<(String, u32), AppError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::bad_request("skill name is required"));
    }
    if !(MIN_WEEKLY_GOAL..=MAX_WEEKLY_GOAL).contains(&input.weekly_goal) {
        return Err(AppError::bad_request(format!(
            "weekly goal must be between {MIN_WEEKLY_GOAL} and {MAX_WEEKLY_GOAL}"
        )));
    }
    Ok((name.to_string(), input.weekly_goal as u32))
}

fn validate_count(count: i64) -> Result<u32, AppError> {
    u32::try_from(count)
        .ok()
        .filter(|count| *count >= 1)
        .ok_or_else(|| AppError::bad_request("count must be a positive whole number"))
}
