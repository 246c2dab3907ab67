// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Serialize;

/// 上传 CSV 中的一行参与者记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileRow {
    /// 在表格软件中看到的行号（表头为第 1 行）
    pub row_number: u64,
    pub name: String,
    pub profile_url: Option<String>,
    pub email: Option<String>,
}

/// 没有个人主页的参与者使用的占位键
///
/// 数据库以 (user, profile_url) 唯一标识参与者，缺失主页时按姓名生成键
pub fn missing_profile_key(name: &str) -> String {
    format!("missing-profile:{}", name.trim().replace(' ', "_"))
}

impl ProfileRow {
    /// 数据库中用来识别该参与者的主页键
    pub fn profile_key(&self) -> String {
        match &self.profile_url {
            Some(url) => url.clone(),
            None => missing_profile_key(&self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_key_uses_url_when_present() {
        let row = ProfileRow {
            row_number: 2,
            name: "Ada Lovelace".to_string(),
            profile_url: Some("https://example.com/u/ada".to_string()),
            email: None,
        };
        assert_eq!(row.profile_key(), "https://example.com/u/ada");
    }

    #[test]
    fn test_profile_key_falls_back_to_name() {
        let row = ProfileRow {
            row_number: 3,
            name: "Grace Brewster Hopper".to_string(),
            profile_url: None,
            email: None,
        };
        assert_eq!(row.profile_key(), "missing-profile:Grace_Brewster_Hopper");
    }
}
