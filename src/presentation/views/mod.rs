// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// HTML 视图模块
///
/// 页面由 `format!` 拼接，所有用户输入都经过 `html-escape` 转义
pub mod layout;
pub mod pages;
pub mod results;

pub use layout::PageContext;

use std::borrow::Cow;

/// 转义元素内容
pub(crate) fn text(value: &str) -> Cow<'_, str> {
    html_escape::encode_text(value)
}

/// 转义双引号属性值
pub(crate) fn attr(value: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(value)
}
