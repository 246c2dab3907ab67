// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::text;
use crate::domain::models::user::User;
use crate::presentation::middleware::session::Flash;

/// 渲染页面外壳所需的上下文
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub user: Option<&'a User>,
    pub flashes: &'a [Flash],
}

impl<'a> PageContext<'a> {
    pub fn new(user: Option<&'a User>, flashes: &'a [Flash]) -> Self {
        Self { user, flashes }
    }
}

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #222; }
nav { background: #1a73e8; padding: .6rem 1rem; }
nav a { color: #fff; margin-right: 1rem; text-decoration: none; }
nav .user { color: #dbe7fd; float: right; }
main { max-width: 960px; margin: 1.5rem auto; padding: 0 1rem; }
.flash { padding: .6rem .9rem; margin-bottom: .6rem; border-radius: 4px; }
.flash-success { background: #e6f4ea; }
.flash-error { background: #fce8e6; }
.flash-info { background: #e8f0fe; }
.flash-warning { background: #fef7e0; }
table { border-collapse: collapse; width: 100%; margin-top: 1rem; }
th, td { border-bottom: 1px solid #ddd; padding: .4rem .6rem; text-align: left; }
.unavailable { color: #b3261e; }
.toolbar button { margin-right: .5rem; }
"#;

/// 复制到剪贴板的辅助脚本
///
/// 单元格的 `data-value` 优先于显示文本
const CLIPBOARD_JS: &str = r##"
function copyText(text, button) {
  navigator.clipboard.writeText(text).then(function () {
    if (!button) { return; }
    var label = button.textContent;
    button.textContent = 'Copied!';
    setTimeout(function () { button.textContent = label; }, 1500);
  });
}
function cellValue(cell) {
  return cell.dataset.value !== undefined ? cell.dataset.value : cell.innerText.trim();
}
function copyColumn(tableId, column, button) {
  var rows = document.querySelectorAll('#' + tableId + ' tbody tr');
  var values = Array.prototype.map.call(rows, function (row) { return cellValue(row.cells[column]); });
  copyText(values.join('\n'), button);
}
function copyTable(tableId, button) {
  var rows = document.querySelectorAll('#' + tableId + ' tr');
  var lines = Array.prototype.map.call(rows, function (row) {
    var cells = row.querySelectorAll('[data-copy]');
    return Array.prototype.map.call(cells, cellValue).join('\t');
  });
  copyText(lines.join('\n'), button);
}
"##;

/// 完整页面
pub fn page(ctx: PageContext<'_>, title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} - Points Tracker</title>
<style>{style}</style>
</head>
<body>
{nav}
<main>
{flashes}
<h1>{title}</h1>
{content}
</main>
<script>{script}</script>
</body>
</html>"#,
        title = text(title),
        style = STYLE,
        nav = nav(ctx.user),
        flashes = flashes(ctx.flashes),
        content = content,
        script = CLIPBOARD_JS,
    )
}

fn nav(user: Option<&User>) -> String {
    match user {
        Some(user) => format!(
            r#"<nav><a href="/">Home</a><a href="/participants">Participants</a><a href="/refresh">Refresh points</a><a href="/check">Quick check</a><a href="/logout">Log out</a><span class="user">{}</span></nav>"#,
            text(&user.username)
        ),
        None => r#"<nav><a href="/">Home</a><a href="/check">Quick check</a><a href="/login">Log in</a><a href="/register">Register</a></nav>"#
            .to_string(),
    }
}

fn flashes(flashes: &[Flash]) -> String {
    flashes
        .iter()
        .map(|f| {
            format!(
                r#"<div class="flash flash-{}">{}</div>"#,
                f.category.as_str(),
                text(&f.message)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
