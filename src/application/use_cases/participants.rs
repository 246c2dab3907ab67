// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashMap;
use uuid::Uuid;

use crate::application::use_cases::error::UseCaseError;
use crate::application::use_cases::PointsStore;
use crate::domain::models::participant::{Participant, ParticipantStanding, PointsRecord};

/// 参与者列表和积分历史查询
pub struct ParticipantsQuery {
    store: PointsStore,
}

impl ParticipantsQuery {
    pub fn new(store: PointsStore) -> Self {
        Self { store }
    }

    pub async fn list(&self, user_id: Uuid) -> Result<Vec<Participant>, UseCaseError> {
        Ok(self.store.participants.list_for_user(user_id).await?)
    }

    /// 用户的全部参与者及周变化，按周变化从高到低排序
    pub async fn standings(&self, user_id: Uuid) -> Result<Vec<ParticipantStanding>, UseCaseError> {
        let participants = self.store.participants.list_for_user(user_id).await?;
        let ids: Vec<Uuid> = participants.iter().map(|p| p.id).collect();

        let mut by_participant: HashMap<Uuid, Vec<PointsRecord>> = HashMap::new();
        for record in self.store.history.list_for_participants(&ids).await? {
            by_participant
                .entry(record.participant_id)
                .or_default()
                .push(record);
        }

        let mut standings: Vec<ParticipantStanding> = participants
            .into_iter()
            .map(|p| {
                let history = by_participant.remove(&p.id).unwrap_or_default();
                ParticipantStanding::from_history(p, &history)
            })
            .collect();
        standings.sort_by(|a, b| b.weekly_change.cmp(&a.weekly_change));
        Ok(standings)
    }

    /// 单个参与者的积分历史，最新的在前
    ///
    /// 不属于该用户的参与者视为不存在
    pub async fn history(
        &self,
        user_id: Uuid,
        participant_id: Uuid,
    ) -> Result<(Participant, Vec<PointsRecord>), UseCaseError> {
        let participant = self
            .store
            .participants
            .find_for_user(user_id, participant_id)
            .await?
            .ok_or(UseCaseError::NotFound)?;
        let history = self.store.history.list_for_participant(participant.id).await?;
        Ok((participant, history))
    }
}
