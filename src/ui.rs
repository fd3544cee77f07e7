use crate::models::{ProgressStatus, SkillProgress, WeeklyReport};
use crate::report::{expected_progress, progress_status};
use chrono::NaiveDate;
use std::fmt::Write;

pub fn render_index(report: &WeeklyReport, today: NaiveDate) -> String {
    let mut cards = String::new();
    if report.skills.is_empty() {
        cards.push_str(r#"<p class="hint">No skills yet. Add one below to start tracking.</p>"#);
    }
    for progress in &report.skills {
        render_card(&mut cards, progress, progress_status(progress, today), today);
    }

    let mut options = String::new();
    for progress in &report.skills {
        let _ = write!(
            options,
            r#"<option value="{}">{}</option>"#,
            escape_html(&progress.skill_id),
            escape_html(&progress.name)
        );
    }

    fill_template(
        INDEX_HTML,
        &[
            ("WEEK", escape_html(&report.week_label)),
            ("TODAY", today.to_string()),
            ("COMPLETED", report.total_completed.to_string()),
            ("GOAL", report.total_goal.to_string()),
            ("OVERALL", format!("{:.0}", report.overall_progress)),
            ("SKILLS", cards),
            ("OPTIONS", options),
        ],
    )
}

/// Substitutes `{{KEY}}` placeholders in one pass, so inserted values are
/// never scanned again.
fn fill_template(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            out.push_str(&rest[open..]);
            return out;
        };
        let key = &after[..close];
        match values.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[open..open + close + 4]),
        }
        rest = &after[close + 2..];
    }
    out.push_str(rest);
    out
}

fn render_card(
    out: &mut String,
    progress: &SkillProgress,
    status: ProgressStatus,
    today: NaiveDate,
) {
    let mut days = String::new();
    for day in &progress.daily_breakdown {
        let _ = write!(
            days,
            r#"<li class="day{}" title="{}"><span>{}</span><strong>{}</strong></li>"#,
            if day.count > 0 { " done" } else { "" },
            day.date,
            day.day_label,
            day.count
        );
    }

    let _ = write!(
        out,
        r#"<article class="skill">
  <div class="skill-head">
    <h3>{name}</h3>
    <span class="badge {status}">{status}</span>
  </div>
  <div class="bar"><div style="width: {pct:.0}%"></div></div>
  <p class="hint">{done} / {goal} this week ({pct:.0}%), {expected:.1} expected by today</p>
  <ul class="days">{days}</ul>
  <form method="post" action="/skills/{id}/quick-log">
    <button class="btn-add" type="submit">Log +1 today</button>
  </form>
</article>"#,
        name = escape_html(&progress.name),
        status = status.label(),
        pct = progress.progress_percentage,
        done = progress.completed_count,
        goal = progress.weekly_goal,
        expected = expected_progress(today, progress.weekly_goal),
        days = days,
        id = escape_html(&progress.skill_id),
    );
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Skill Tracker</title>
  <style>
    :root {
      --bg-1: #f8f3e6;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --ok: #2d7a4b;
      --warn: #c63b2b;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
    }

    h1 {
      font-family: "Georgia", serif;
      margin: 0;
    }

    .subtitle,
    .hint {
      margin: 0;
      color: #6f6a65;
    }

    .panel,
    .skills {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
      gap: 16px;
    }

    .stat,
    .skill,
    form.entry {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 10px;
    }

    .stat .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .stat .value {
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .skill-head {
      display: flex;
      justify-content: space-between;
      align-items: center;
    }

    .skill h3 {
      margin: 0;
    }

    .badge {
      border-radius: 999px;
      padding: 4px 10px;
      font-size: 0.8rem;
      color: white;
      background: var(--accent-2);
    }

    .badge.complete {
      background: var(--ok);
    }

    .badge.behind {
      background: var(--warn);
    }

    .bar {
      height: 10px;
      border-radius: 999px;
      background: rgba(47, 72, 88, 0.1);
      overflow: hidden;
    }

    .bar div {
      height: 100%;
      background: var(--accent);
    }

    .days {
      list-style: none;
      margin: 0;
      padding: 0;
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 4px;
      text-align: center;
      font-size: 0.8rem;
    }

    .day span {
      display: block;
      color: #8b857d;
    }

    .day.done strong {
      color: var(--accent);
    }

    button,
    input,
    select {
      font: inherit;
      border-radius: 12px;
      padding: 10px 12px;
      border: 1px solid rgba(47, 72, 88, 0.2);
    }

    button {
      border: none;
      font-weight: 600;
      cursor: pointer;
    }

    .btn-add {
      background: var(--accent);
      color: white;
      width: 100%;
    }

    .status[data-type="error"] {
      color: var(--warn);
    }

    .status[data-type="ok"] {
      color: var(--ok);
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Skill Tracker</h1>
      <p class="subtitle">Week of {{WEEK}}</p>
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label">Today</span>
        <span class="value">{{TODAY}}</span>
      </div>
      <div class="stat">
        <span class="label">Done this week</span>
        <span class="value">{{COMPLETED}} / {{GOAL}}</span>
      </div>
      <div class="stat">
        <span class="label">Overall</span>
        <span class="value">{{OVERALL}}%</span>
      </div>
    </section>

    <section class="skills">
{{SKILLS}}
    </section>

    <section class="panel">
      <form class="entry" id="skill-form">
        <strong>New skill</strong>
        <input name="name" placeholder="Name" required />
        <input name="weekly_goal" type="number" min="1" max="50" value="3" required />
        <button class="btn-add" type="submit">Add skill</button>
      </form>
      <form class="entry" id="log-form">
        <strong>Log a day</strong>
        <select name="skill_id" required>{{OPTIONS}}</select>
        <input name="date" type="date" value="{{TODAY}}" required />
        <input name="count" type="number" min="1" value="1" required />
        <button class="btn-add" type="submit">Save log</button>
      </form>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const statusEl = document.getElementById('status');

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const post = async (url, body) => {
      const res = await fetch(url, {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(body)
      });
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      window.location.reload();
    };

    document.getElementById('skill-form').addEventListener('submit', (event) => {
      event.preventDefault();
      const form = new FormData(event.target);
      post('/api/skills', {
        name: form.get('name'),
        weekly_goal: Number(form.get('weekly_goal'))
      }).catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('log-form').addEventListener('submit', (event) => {
      event.preventDefault();
      const form = new FormData(event.target);
      post('/api/logs', {
        skill_id: form.get('skill_id') || '',
        date: form.get('date'),
        count: Number(form.get('count'))
      }).catch((err) => setStatus(err.message, 'error'));
    });
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DayProgress;

    fn report(skills: Vec<SkillProgress>) -> WeeklyReport {
        WeeklyReport {
            week_label: "Jan 5 - Jan 11, 2026".to_string(),
            week_start: "2026-01-05".to_string(),
            week_end: "2026-01-11".to_string(),
            total_goal: skills.iter().map(|s| s.weekly_goal).sum(),
            total_completed: skills.iter().map(|s| s.completed_count).sum(),
            overall_progress: 0.0,
            skills,
        }
    }

    #[test]
    fn empty_report_shows_hint() {
        let html = render_index(&report(Vec::new()), NaiveDate::from_ymd_opt(2026, 1, 7).unwrap());
        assert!(html.contains("No skills yet"));
        assert!(html.contains("Week of Jan 5 - Jan 11, 2026"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn skill_names_are_escaped() {
        let progress = SkillProgress {
            skill_id: "s1".to_string(),
            name: "<b>Piano</b>".to_string(),
            weekly_goal: 7,
            completed_count: 1,
            progress_percentage: 100.0 / 7.0,
            is_complete: false,
            daily_breakdown: vec![DayProgress {
                date: "2026-01-05".to_string(),
                day_label: "Mon",
                count: 1,
            }],
        };
        let html = render_index(&report(vec![progress]), NaiveDate::from_ymd_opt(2026, 1, 7).unwrap());
        assert!(html.contains("&lt;b&gt;Piano&lt;/b&gt;"));
        assert!(html.contains(r#"<span class="badge behind">behind</span>"#));
        assert!(html.contains("/skills/s1/quick-log"));
        assert!(html.contains("3.0 expected by today"));
    }

    #[test]
    fn placeholder_like_names_render_literally() {
        let progress = SkillProgress {
            skill_id: "s1".to_string(),
            name: "{{OPTIONS}}".to_string(),
            weekly_goal: 2,
            completed_count: 0,
            progress_percentage: 0.0,
            is_complete: false,
            daily_breakdown: Vec::new(),
        };
        let html = render_index(&report(vec![progress]), NaiveDate::from_ymd_opt(2026, 1, 7).unwrap());
        assert!(html.contains("<h3>{{OPTIONS}}</h3>"));
        assert!(html.contains(r#"<option value="s1">{{OPTIONS}}</option>"#));
        assert!(!html.contains("<h3><option"));
    }

    #[test]
    fn unknown_placeholders_are_left_alone() {
        let html = fill_template("a {{X}} b {{Y}} c {{", &[("X", "1".to_string())]);
        assert_eq!(html, "a 1 b {{Y}} c {{");
    }
}
