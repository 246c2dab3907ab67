// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::{attr, text};
use crate::application::dto::results::ResultRow;
use crate::domain::models::points::PointsOutcome;

pub const RESULTS_TABLE_ID: &str = "results";

/// 积分结果表
///
/// `show_weekly` 为 false 时不显示周积分列（无状态检查）
pub fn results_table(rows: &[ResultRow], show_weekly: bool) -> String {
    let points_column = 2;
    let weekly_header = if show_weekly {
        r#"<th data-copy>Weekly points</th>"#
    } else {
        ""
    };

    let body: String = rows.iter().map(|row| result_row(row, show_weekly)).collect();

    format!(
        r#"<div class="toolbar">
<button type="button" onclick="copyColumn('{id}', 0, this)">Copy names</button>
<button type="button" onclick="copyColumn('{id}', {points_column}, this)">Copy points</button>
<button type="button" onclick="copyTable('{id}', this)">Copy table</button>
</div>
<table id="{id}">
<thead><tr><th data-copy>Name</th><th data-copy>Profile</th><th data-copy>Points</th>{weekly_header}<th></th></tr></thead>
<tbody>
{body}</tbody>
</table>
<p>{count} participants</p>"#,
        id = RESULTS_TABLE_ID,
        points_column = points_column,
        weekly_header = weekly_header,
        body = body,
        count = rows.len(),
    )
}

fn result_row(row: &ResultRow, show_weekly: bool) -> String {
    let points = row.points.to_string();
    let points_class = match row.points {
        PointsOutcome::Points { .. } => "points",
        PointsOutcome::Unavailable { .. } => "points unavailable",
    };
    let profile = match &row.profile_url {
        Some(url) => format!(
            r#"<td data-copy data-value="{}"><a href="{}" target="_blank" rel="noopener">{}</a></td>"#,
            attr(url),
            attr(url),
            text(url)
        ),
        None => r#"<td data-copy data-value="">-</td>"#.to_string(),
    };
    let name = match row.participant_id {
        Some(id) => format!(r#"<a href="/participant/{}">{}</a>"#, id, text(&row.name)),
        None => text(&row.name).into_owned(),
    };
    let weekly = match (&row.weekly, show_weekly) {
        (Some(weekly), true) => format!(r#"<td data-copy>{}</td>"#, text(&weekly.to_string())),
        (None, true) => r#"<td data-copy></td>"#.to_string(),
        (_, false) => String::new(),
    };

    format!(
        r#"<tr><td data-copy data-value="{name_attr}">{name}</td>{profile}<td data-copy class="{points_class}">{points}</td>{weekly}<td><button type="button" onclick="copyText('{points}', this)">Copy</button></td></tr>
"#,
        name_attr = attr(&row.name),
        name = name,
        profile = profile,
        points_class = points_class,
        points = points,
        weekly = weekly,
    )
}
