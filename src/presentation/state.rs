// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::application::use_cases::auth::AuthUseCase;
use crate::application::use_cases::check::CheckPointsUseCase;
use crate::application::use_cases::participants::ParticipantsQuery;
use crate::application::use_cases::refresh::RefreshPointsUseCase;
use crate::application::use_cases::upload::UploadParticipantsUseCase;
use crate::application::use_cases::PointsStore;
use crate::config::settings::Settings;
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::services::profile_scraper::ProfileScraper;
use crate::domain::services::refresh_policy::RefreshPolicy;
use crate::engines::reqwest_engine::ReqwestEngine;
use crate::engines::traits::EngineError;
use crate::infrastructure::database::backup::DatabaseBackup;
use crate::infrastructure::repositories::{
    ParticipantRepositoryImpl, PointsHistoryRepositoryImpl, RefreshLogRepositoryImpl,
    UserRepositoryImpl,
};
use crate::presentation::middleware::session::SessionKeys;
use crate::utils::password::PasswordHasher;
use crate::workers::points_dispatcher::PointsDispatcher;

/// 处理器共享的应用状态
///
/// 通过 `Extension` 注入到路由中
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub db: Arc<DatabaseConnection>,
    pub users: Arc<dyn UserRepository>,
    pub sessions: SessionKeys,
    pub auth: Arc<AuthUseCase>,
    pub check: Arc<CheckPointsUseCase>,
    pub upload: Arc<UploadParticipantsUseCase>,
    pub refresh: Arc<RefreshPointsUseCase>,
    pub participants: Arc<ParticipantsQuery>,
}

impl AppState {
    /// 根据配置组装仓库、抓取引擎和用例
    pub fn new(settings: Arc<Settings>, db: Arc<DatabaseConnection>) -> Result<Self, EngineError> {
        let engine = Arc::new(ReqwestEngine::new(&settings.scraper)?);
        let scraper = Arc::new(ProfileScraper::new(engine, &settings.scraper));
        let dispatcher = Arc::new(PointsDispatcher::new(
            scraper,
            settings.scraper.max_concurrency,
        ));
        let backup = Arc::new(DatabaseBackup::new(&settings.backup, &settings.database.url));

        let users: Arc<dyn UserRepository> = Arc::new(UserRepositoryImpl::new(db.clone()));
        let store = PointsStore::new(
            Arc::new(ParticipantRepositoryImpl::new(db.clone())),
            Arc::new(PointsHistoryRepositoryImpl::new(db.clone())),
            Arc::new(RefreshLogRepositoryImpl::new(db.clone())),
        );
        let hasher = PasswordHasher::new(settings.auth.password_iterations);

        Ok(Self {
            sessions: SessionKeys::new(&settings.session),
            auth: Arc::new(AuthUseCase::new(users.clone(), hasher)),
            check: Arc::new(CheckPointsUseCase::new(dispatcher.clone())),
            upload: Arc::new(UploadParticipantsUseCase::new(
                store.clone(),
                dispatcher.clone(),
                backup.clone(),
            )),
            refresh: Arc::new(RefreshPointsUseCase::new(
                store.clone(),
                dispatcher,
                backup,
                RefreshPolicy::new(settings.refresh.interval_days),
            )),
            participants: Arc::new(ParticipantsQuery::new(store)),
            users,
            settings,
            db,
        })
    }
}
