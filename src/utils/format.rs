use crate::codeforces::problems::ContestProblems;
use crate::codeforces::rating_changes::RatingChangeReport;
use crate::codeforces::types::{Contest, Problem, RatingChange, User};
use chrono::{Local, TimeZone};
use std::collections::HashMap;

/// `93784` -> `1d2h3m4s`; zero and negative spans read `0s`.
pub fn humanize_interval(seconds: i64) -> String {
    if seconds <= 0 {
        return "0s".to_string();
    }
    let (days, hours, minutes, secs) = (seconds / 86_400, seconds / 3600 % 24, seconds / 60 % 60, seconds % 60);
    let mut text = String::new();
    for (value, unit) in [(days, 'd'), (hours, 'h'), (minutes, 'm'), (secs, 's')] {
        if value > 0 {
            text.push_str(&format!("{}{}", value, unit));
        }
    }
    text
}

pub fn format_timestamp(timestamp: i64) -> String {
    match Local.timestamp_opt(timestamp, 0).single() {
        Some(time) => time.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => timestamp.to_string(),
    }
}

pub fn signed(delta: i32) -> String {
    if delta < 0 {
        delta.to_string()
    } else {
        format!("+{}", delta)
    }
}

pub fn contest_block(contest: &Contest, now: i64) -> String {
    format!(
        "## {}\nContest ID: {}\nStart time: {}\nCountdown: {}\nDuration: {}\nURL: {}",
        contest.name,
        contest.id,
        format_timestamp(contest.start_time),
        humanize_interval(contest.countdown(now)),
        humanize_interval(contest.duration_seconds),
        contest.url
    )
}

pub fn contest_list(contests: &[Contest], now: i64) -> String {
    contests.iter().map(|contest| contest_block(contest, now)).collect::<Vec<String>>().join("\n\n")
}

/// Standings lines, with the latest rating change appended where the user has one.
pub fn standings_lines(users: &[User], changes: &[RatingChange]) -> String {
    let deltas: HashMap<String, i32> = changes.iter().map(|c| (c.handle.to_lowercase(), c.delta())).collect();
    users
        .iter()
        .map(|user| match deltas.get(&user.handle.to_lowercase()) {
            Some(delta) => format!("- {} - {}({}) - {}", user.handle, user.rating, signed(*delta), user.rank),
            None => format!("- {} - {} - {}", user.handle, user.rating, user.rank),
        })
        .collect::<Vec<String>>()
        .join("\n")
}

pub fn rating_change_line(change: &RatingChange) -> String {
    format!(
        "- {}({}): {} -> {} ({})",
        change.handle,
        change.rank,
        change.old_rating,
        change.new_rating,
        signed(change.delta())
    )
}

pub fn rating_change_report(report: &RatingChangeReport) -> Option<String> {
    let name = report.contest_name()?;
    let lines: Vec<String> = report.changes.iter().map(rating_change_line).collect();
    Some(format!("## {}\n{}", name, lines.join("\n")))
}

pub fn problem_line(problem: &Problem) -> String {
    match problem.difficulty {
        Some(difficulty) => format!("- {}, {} - {}", problem.index, problem.name, difficulty),
        None => format!("- {}, {}", problem.index, problem.name),
    }
}

pub fn problem_set(set: &ContestProblems) -> String {
    let mut text = format!("## {}\nURL: {}", set.contest.name, set.contest.url);
    for problem in &set.problems {
        text.push('\n');
        text.push_str(&problem_line(problem));
    }
    text
}

pub fn updated_footer(last_success_time: Option<i64>) -> String {
    match last_success_time {
        Some(time) => format!("(data updated at {}, for reference only)", format_timestamp(time)),
        None => "(data has not been updated yet)".to_string(),
    }
}
