// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::layout::{page, PageContext};
use super::results::results_table;
use super::{attr, text};
use crate::application::dto::results::ResultRow;
use crate::domain::models::participant::{Participant, ParticipantStanding, PointsRecord};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn upload_form(action: &str) -> String {
    format!(
        r#"<form method="post" action="{}" enctype="multipart/form-data">
<p>Upload a CSV file with the columns <code>Name</code>, <code>profile</code> and optionally <code>mail</code>.
<a href="/download_example">Download an example</a>.</p>
<input type="file" name="csv_file" accept=".csv">
<button type="submit">Upload</button>
</form>"#,
        attr(action)
    )
}

pub fn index_anonymous(ctx: PageContext<'_>) -> String {
    let content = r#"<p>Track the points of your participants week over week.</p>
<p><a href="/login">Log in</a> or <a href="/register">create an account</a> to save participants and weekly history.</p>
<p>Just want a one-off look? Use the <a href="/check">quick checker</a>, nothing is stored.</p>"#;
    page(ctx, "Points Tracker", content)
}

pub fn index_user(ctx: PageContext<'_>, participants: &[Participant]) -> String {
    let list = if participants.is_empty() {
        "<p>No participants yet. Upload a CSV file to get started.</p>".to_string()
    } else {
        let rows: String = participants
            .iter()
            .map(|p| {
                format!(
                    r#"<tr><td><a href="/participant/{}">{}</a></td><td>{}</td><td>{}</td></tr>
"#,
                    p.id,
                    text(&p.name),
                    p.current_points,
                    p.last_updated.format(DATE_FORMAT)
                )
            })
            .collect();
        format!(
            r#"<h2>Your participants</h2>
<table><thead><tr><th>Name</th><th>Current points</th><th>Last updated</th></tr></thead>
<tbody>
{}</tbody></table>
<p><a href="/participants">Weekly standings</a> | <a href="/refresh">Refresh points</a></p>"#,
            rows
        )
    };
    page(ctx, "Points Tracker", &format!("{}\n{}", upload_form("/upload"), list))
}

pub fn check_form(ctx: PageContext<'_>) -> String {
    let content = format!(
        "<p>Fetch the current points for every profile in a CSV file. Nothing is saved.</p>\n{}",
        upload_form("/check")
    );
    page(ctx, "Quick check", &content)
}

pub fn results_page(ctx: PageContext<'_>, title: &str, rows: &[ResultRow], show_weekly: bool) -> String {
    page(ctx, title, &results_table(rows, show_weekly))
}

fn credentials_form(action: &str, button: &str) -> String {
    format!(
        r#"<form method="post" action="{}">
<p><label>Username <input type="text" name="username" required></label></p>
<p><label>Password <input type="password" name="password" required></label></p>
<button type="submit">{}</button>
</form>"#,
        attr(action),
        text(button)
    )
}

pub fn register_form(ctx: PageContext<'_>) -> String {
    let content = format!(
        "{}\n<p>Already registered? <a href=\"/login\">Log in</a></p>",
        credentials_form("/register", "Register")
    );
    page(ctx, "Register", &content)
}

pub fn login_form(ctx: PageContext<'_>) -> String {
    let content = format!(
        "{}\n<p>No account yet? <a href=\"/register\">Register</a></p>",
        credentials_form("/login", "Log in")
    );
    page(ctx, "Log in", &content)
}

pub fn participants_page(ctx: PageContext<'_>, standings: &[ParticipantStanding]) -> String {
    if standings.is_empty() {
        return page(
            ctx,
            "Participants",
            r#"<p>No participants yet. <a href="/">Upload a CSV file</a> first.</p>"#,
        );
    }

    let rows: String = standings
        .iter()
        .map(|s| {
            let p = &s.participant;
            format!(
                r#"<tr><td data-copy data-value="{}"><a href="/participant/{}">{}</a></td><td data-copy>{}</td><td data-copy>{}</td><td data-copy>{}</td><td>{}</td><td><button type="button" onclick="copyText('{}', this)">Copy</button></td></tr>
"#,
                attr(&p.name),
                p.id,
                text(&p.name),
                p.current_points,
                s.previous_points,
                s.weekly_change,
                p.last_updated.format(DATE_FORMAT),
                s.weekly_change
            )
        })
        .collect();

    let content = format!(
        r#"<div class="toolbar">
<a href="/refresh">Refresh points</a>
<button type="button" onclick="copyColumn('participants', 0, this)">Copy names</button>
<button type="button" onclick="copyColumn('participants', 3, this)">Copy weekly points</button>
<button type="button" onclick="copyTable('participants', this)">Copy table</button>
</div>
<table id="participants">
<thead><tr><th data-copy>Name</th><th data-copy>Current points</th><th data-copy>Previous points</th><th data-copy>Weekly change</th><th>Last updated</th><th></th></tr></thead>
<tbody>
{}</tbody>
</table>"#,
        rows
    );
    page(ctx, "Participants", &content)
}

pub fn history_page(ctx: PageContext<'_>, participant: &Participant, history: &[PointsRecord]) -> String {
    let profile = if participant.has_profile_link() {
        format!(
            r#"<a href="{}" target="_blank" rel="noopener">{}</a>"#,
            attr(&participant.profile_url),
            text(&participant.profile_url)
        )
    } else {
        "no profile link".to_string()
    };
    let email = participant
        .email
        .as_deref()
        .map(|e| text(e).into_owned())
        .unwrap_or_else(|| "-".to_string());

    let rows: String = if history.is_empty() {
        "<tr><td colspan=\"2\">No history recorded yet.</td></tr>\n".to_string()
    } else {
        history
            .iter()
            .map(|r| {
                format!(
                    "<tr><td>{}</td><td>{}</td></tr>\n",
                    r.recorded_at.format(DATE_FORMAT),
                    r.points
                )
            })
            .collect()
    };

    let content = format!(
        r#"<p>Profile: {}</p>
<p>Email: {}</p>
<p>Current points: {}</p>
<table id="history">
<thead><tr><th>Recorded at</th><th>Points</th></tr></thead>
<tbody>
{}</tbody>
</table>
<p><a href="/participants">Back to participants</a></p>"#,
        profile, email, participant.current_points, rows
    );
    page(ctx, &participant.name, &content)
}

pub fn error_page(ctx: PageContext<'_>, title: &str, message: &str) -> String {
    let content = format!(
        r#"<p>{}</p>
<p><a href="/">Back to the home page</a></p>"#,
        text(message)
    );
    page(ctx, title, &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn participant(name: &str, url: &str) -> Participant {
        Participant {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: name.to_string(),
            email: None,
            profile_url: url.to_string(),
            current_points: 12,
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn test_history_page_lists_records() {
        let p = participant("Ada", "https://profiles.test/ada");
        let history = vec![PointsRecord {
            id: Uuid::new_v4(),
            participant_id: p.id,
            points: 12,
            recorded_at: Utc::now(),
        }];
        let html = history_page(PageContext::new(None, &[]), &p, &history);
        assert!(html.contains("<td>12</td>"));
        assert!(html.contains(r#"href="https://profiles.test/ada""#));
    }

    #[test]
    fn test_history_page_for_placeholder_profile() {
        let p = participant("Ada", "missing-profile:Ada");
        let html = history_page(PageContext::new(None, &[]), &p, &[]);
        assert!(html.contains("no profile link"));
        assert!(html.contains("No history recorded yet."));
    }

    #[test]
    fn test_participants_page_columns() {
        let standing = ParticipantStanding {
            participant: participant("Grace", "https://profiles.test/grace"),
            previous_points: 5,
            weekly_change: 7,
        };
        let html = participants_page(PageContext::new(None, &[]), &[standing]);
        assert!(html.contains("Weekly change"));
        assert!(html.contains("copyText('7', this)"));
    }
}
