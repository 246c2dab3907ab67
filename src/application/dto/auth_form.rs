// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Deserialize;
use validator::{Validate, ValidationErrors};

/// 注册和登录表单
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CredentialsForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Username is required."))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,
}

impl CredentialsForm {
    /// 去掉用户名两端的空白，密码保持原样
    pub fn normalized(mut self) -> Self {
        self.username = self.username.trim().to_string();
        self
    }

    /// 按表单字段顺序返回第一条校验错误
    pub fn check(&self) -> Result<(), String> {
        self.validate().map_err(|errors| first_message(&errors))
    }
}

fn first_message(errors: &ValidationErrors) -> String {
    let fields = errors.field_errors();
    for field in ["username", "password"] {
        let message = fields
            .get(field)
            .and_then(|errs| errs.first())
            .and_then(|e| e.message.as_ref());
        if let Some(message) = message {
            return message.to_string();
        }
    }
    errors.to_string()
}
