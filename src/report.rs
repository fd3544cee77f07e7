use crate::dates::{self, day_label, format_date, parse_date, week_dates, week_label, week_range};
use crate::models::{
    DayProgress, Log, ProgressStatus, Skill, SkillProgress, SkillStatus, WeeklyReport,
};
use crate::store::ExecutionStore;
use chrono::{Datelike, NaiveDate};

/// `logs_for_week` must already be limited to the week.
pub fn compute_skill_progress(
    skill: &Skill,
    logs_for_week: &[Log],
    week_dates: &[String],
) -> SkillProgress {
    let skill_logs: Vec<&Log> = logs_for_week
        .iter()
        .filter(|log| log.skill_id == skill.id)
        .collect();

    let completed_count = skill_logs
        .iter()
        .fold(0u32, |sum, log| sum.saturating_add(log.count));

    let daily_breakdown = week_dates
        .iter()
        .map(|date| DayProgress {
            date: date.clone(),
            day_label: parse_date(date).map(day_label).unwrap_or(""),
            count: skill_logs
                .iter()
                .find(|log| &log.date == date)
                .map(|log| log.count)
                .unwrap_or(0),
        })
        .collect();

    SkillProgress {
        skill_id: skill.id.clone(),
        name: skill.name.clone(),
        weekly_goal: skill.weekly_goal,
        completed_count,
        progress_percentage: capped_percentage(completed_count, skill.weekly_goal),
        is_complete: completed_count >= skill.weekly_goal,
        daily_breakdown,
    }
}

pub fn generate_weekly_report(store: &dyn ExecutionStore) -> WeeklyReport {
    generate_weekly_report_at(store, dates::today())
}

pub fn generate_weekly_report_at(store: &dyn ExecutionStore, today: NaiveDate) -> WeeklyReport {
    let (start, end) = week_range(today);
    let end = end.date();

    let skills = store.skills();
    let week_logs = store.logs_in_date_range(&format_date(start), &format_date(end));
    let days = week_dates(start);

    let progress: Vec<SkillProgress> = skills
        .iter()
        .map(|skill| compute_skill_progress(skill, &week_logs, &days))
        .collect();

    let total_goal = skills
        .iter()
        .fold(0u32, |sum, skill| sum.saturating_add(skill.weekly_goal));
    let total_completed = progress
        .iter()
        .fold(0u32, |sum, entry| sum.saturating_add(entry.completed_count));

    WeeklyReport {
        week_label: week_label(start, end),
        week_start: format_date(start),
        week_end: format_date(end),
        skills: progress,
        total_goal,
        total_completed,
        overall_progress: capped_percentage(total_completed, total_goal),
    }
}

/// Linear pacing: by day `n` of the week (Monday = 1, Sunday = 7) a skill is
/// expected to have `n / 7` of its goal done.
pub fn progress_status(progress: &SkillProgress, today: NaiveDate) -> ProgressStatus {
    if progress.is_complete {
        return ProgressStatus::Complete;
    }

    let days = u64::from(days_elapsed_in_week(today));
    let completed = u64::from(progress.completed_count);
    if completed * 7 >= days * u64::from(progress.weekly_goal) {
        ProgressStatus::OnTrack
    } else {
        ProgressStatus::Behind
    }
}

pub fn expected_progress(today: NaiveDate, weekly_goal: u32) -> f64 {
    f64::from(days_elapsed_in_week(today)) / 7.0 * f64::from(weekly_goal)
}

pub fn statuses(report: &WeeklyReport, today: NaiveDate) -> Vec<SkillStatus> {
    report
        .skills
        .iter()
        .map(|progress| SkillStatus {
            skill_id: progress.skill_id.clone(),
            status: progress_status(progress, today),
        })
        .collect()
}

fn days_elapsed_in_week(today: NaiveDate) -> u32 {
    today.weekday().number_from_monday()
}

fn capped_percentage(completed: u32, goal: u32) -> f64 {
    if goal == 0 {
        return 0.0;
    }
    (f64::from(completed) * 100.0 / f64::from(goal)).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::store::LocalStore;
    use chrono::{TimeZone, Utc};

    fn wednesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 7).unwrap()
    }

    fn skill(id: &str, weekly_goal: u32) -> Skill {
        Skill {
            id: id.to_string(),
            name: format!("Skill {id}"),
            weekly_goal,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap(),
        }
    }

    fn log(skill_id: &str, date: &str, count: u32) -> Log {
        Log {
            id: format!("{skill_id}-{date}"),
            skill_id: skill_id.to_string(),
            date: date.to_string(),
            count,
        }
    }

    fn this_week() -> [String; 7] {
        week_dates(dates::week_start(wednesday()))
    }

    fn progress_with(goal: u32, logs: &[Log]) -> SkillProgress {
        compute_skill_progress(&skill("s1", goal), logs, &this_week())
    }

    #[test]
    fn partial_progress() {
        let logs = [log("s1", "2026-01-05", 1), log("s1", "2026-01-07", 2)];
        let progress = progress_with(5, &logs);
        assert_eq!(progress.completed_count, 3);
        assert_eq!(progress.progress_percentage, 60.0);
        assert!(!progress.is_complete);
    }

    #[test]
    fn over_achievement_caps_percentage_only() {
        let logs = [log("s1", "2026-01-05", 5), log("s1", "2026-01-06", 3)];
        let progress = progress_with(5, &logs);
        assert_eq!(progress.completed_count, 8);
        assert_eq!(progress.progress_percentage, 100.0);
        assert!(progress.is_complete);
    }

    #[test]
    fn zero_goal_does_not_divide() {
        let progress = progress_with(0, &[log("s1", "2026-01-05", 4)]);
        assert_eq!(progress.progress_percentage, 0.0);
        assert!(progress.is_complete);
    }

    #[test]
    fn breakdown_has_a_slot_per_day() {
        let logs = [
            log("s1", "2026-01-06", 2),
            log("s2", "2026-01-06", 9),
            log("s1", "2026-01-11", 1),
        ];
        let progress = progress_with(3, &logs);

        let counts: Vec<u32> = progress.daily_breakdown.iter().map(|day| day.count).collect();
        assert_eq!(counts, vec![0, 2, 0, 0, 0, 0, 1]);
        assert_eq!(progress.daily_breakdown[0].day_label, "Mon");
        assert_eq!(progress.daily_breakdown[6].day_label, "Sun");
        assert_eq!(progress.daily_breakdown[6].date, "2026-01-11");
    }

    #[test]
    fn duplicate_day_logs_are_summed_not_merged() {
        let logs = [log("s1", "2026-01-05", 1), log("s1", "2026-01-05", 1)];
        assert_eq!(progress_with(4, &logs).completed_count, 2);
    }

    #[test]
    fn empty_store_gives_empty_report() {
        let store = LocalStore::open(MemoryStore::new());
        let report = generate_weekly_report_at(&store, wednesday());
        assert!(report.skills.is_empty());
        assert_eq!(report.total_goal, 0);
        assert_eq!(report.overall_progress, 0.0);
        assert_eq!(report.week_start, "2026-01-05");
        assert_eq!(report.week_end, "2026-01-11");
        assert_eq!(report.week_label, "Jan 5 - Jan 11, 2026");
    }

    #[test]
    fn current_report_covers_this_week() {
        let store = LocalStore::open(MemoryStore::new());
        let report = generate_weekly_report(&store);
        let (start, _) = dates::current_week_range();
        assert_eq!(report.week_start, format_date(start));
    }

    #[test]
    fn report_totals_across_skills() {
        let mut store = LocalStore::open(MemoryStore::new());
        store.save_skills(vec![skill("b", 4), skill("a", 6)]);
        store.save_logs(vec![
            log("b", "2026-01-05", 4),
            log("a", "2026-01-06", 2),
            log("a", "2026-01-07", 1),
            // previous and next week stay out
            log("a", "2026-01-04", 5),
            log("b", "2026-01-12", 5),
            // no skill to attribute this to
            log("gone", "2026-01-07", 3),
        ]);

        let report = generate_weekly_report_at(&store, wednesday());
        let order: Vec<&str> = report.skills.iter().map(|p| p.skill_id.as_str()).collect();
        assert_eq!(order, vec!["b", "a"]);
        assert_eq!(report.total_goal, 10);
        assert_eq!(report.total_completed, 7);
        assert_eq!(report.overall_progress, 70.0);
    }

    #[test]
    fn overall_progress_caps_while_totals_do_not() {
        let mut store = LocalStore::open(MemoryStore::new());
        store.save_skills(vec![skill("a", 2), skill("b", 3)]);
        store.save_logs(vec![
            log("a", "2026-01-05", 6),
            log("b", "2026-01-06", 1),
        ]);

        let report = generate_weekly_report_at(&store, wednesday());
        assert_eq!(report.total_goal, 5);
        assert_eq!(report.total_completed, 7);
        assert_eq!(report.overall_progress, 100.0);
        assert_eq!(report.skills[1].progress_percentage, 100.0 / 3.0);
    }

    #[test]
    fn zero_goal_skills_give_zero_overall() {
        let mut store = LocalStore::open(MemoryStore::new());
        store.save_skills(vec![skill("a", 0)]);
        store.save_logs(vec![log("a", "2026-01-05", 4)]);

        let report = generate_weekly_report_at(&store, wednesday());
        assert_eq!(report.total_goal, 0);
        assert_eq!(report.total_completed, 4);
        assert_eq!(report.overall_progress, 0.0);
    }

    #[test]
    fn sunday_belongs_to_the_preceding_monday() {
        let mut store = LocalStore::open(MemoryStore::new());
        store.save_skills(vec![skill("s1", 2)]);
        store.save_logs(vec![log("s1", "2026-01-05", 1)]);

        let sunday = NaiveDate::from_ymd_opt(2026, 1, 11).unwrap();
        let report = generate_weekly_report_at(&store, sunday);
        assert_eq!(report.week_start, "2026-01-05");
        assert_eq!(report.total_completed, 1);
    }

    #[test]
    fn pacing_on_wednesday() {
        let today = wednesday();
        let on_pace = progress_with(7, &[log("s1", "2026-01-05", 3)]);
        assert_eq!(progress_status(&on_pace, today), ProgressStatus::OnTrack);

        let lagging = progress_with(7, &[log("s1", "2026-01-05", 2)]);
        assert_eq!(progress_status(&lagging, today), ProgressStatus::Behind);

        assert!((expected_progress(today, 7) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn sunday_expects_the_full_goal() {
        let sunday = NaiveDate::from_ymd_opt(2026, 1, 11).unwrap();
        let progress = progress_with(5, &[log("s1", "2026-01-05", 4)]);
        assert_eq!(progress_status(&progress, sunday), ProgressStatus::Behind);

        let done = progress_with(5, &[log("s1", "2026-01-05", 5)]);
        assert_eq!(progress_status(&done, sunday), ProgressStatus::Complete);
    }
}
