use crate::models::{Log, Skill};
use crate::storage::{get_item, set_item, KeyValueStore};
use tracing::error;

pub const SKILLS_KEY: &str = "skills";
pub const LOGS_KEY: &str = "logs";

pub trait ExecutionStore: Send {
    fn skills(&self) -> Vec<Skill>;
    fn save_skills(&mut self, skills: Vec<Skill>);
    fn logs(&self) -> Vec<Log>;
    fn save_logs(&mut self, logs: Vec<Log>);

    fn find_log_for_date(&self, skill_id: &str, date: &str) -> Option<Log> {
        self.logs()
            .into_iter()
            .find(|log| log.skill_id == skill_id && log.date == date)
    }

    fn log_exists_for_date(&self, skill_id: &str, date: &str) -> bool {
        self.find_log_for_date(skill_id, date).is_some()
    }

    fn logs_for_skill(&self, skill_id: &str) -> Vec<Log> {
        self.logs()
            .into_iter()
            .filter(|log| log.skill_id == skill_id)
            .collect()
    }

    fn logs_in_date_range(&self, start: &str, end: &str) -> Vec<Log> {
        self.logs()
            .into_iter()
            .filter(|log| log.date.as_str() >= start && log.date.as_str() <= end)
            .collect()
    }
}

/// Collections are read once at open; the in-memory copy stays authoritative
/// even if a later write fails.
pub struct LocalStore<B> {
    backend: B,
    skills: Vec<Skill>,
    logs: Vec<Log>,
}

impl<B: KeyValueStore> LocalStore<B> {
    pub fn open(backend: B) -> Self {
        let skills = get_item(&backend, SKILLS_KEY, Vec::new());
        let logs = get_item(&backend, LOGS_KEY, Vec::new());
        Self {
            backend,
            skills,
            logs,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: KeyValueStore> ExecutionStore for LocalStore<B> {
    fn skills(&self) -> Vec<Skill> {
        self.skills.clone()
    }

    fn save_skills(&mut self, skills: Vec<Skill>) {
        self.skills = skills;
        if let Err(err) = set_item(&mut self.backend, SKILLS_KEY, &self.skills) {
            error!("failed to persist skills: {err}");
        }
    }

    fn logs(&self) -> Vec<Log> {
        self.logs.clone()
    }

    fn save_logs(&mut self, logs: Vec<Log>) {
        self.logs = logs;
        if let Err(err) = set_item(&mut self.backend, LOGS_KEY, &self.logs) {
            error!("failed to persist logs: {err}");
        }
    }
}
