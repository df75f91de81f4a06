//! SeaORM implementation of AvailabilityRuleRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::db_err;
use crate::domain::availability::{AvailabilityRule, AvailabilityRuleRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::availability_rule;

pub struct SeaOrmAvailabilityRuleRepository {
    db: DatabaseConnection,
}

impl SeaOrmAvailabilityRuleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: availability_rule::Model) -> AvailabilityRule {
    AvailabilityRule {
        id: m.id,
        staff_id: m.staff_id,
        day_of_week: m.day_of_week,
        start_min: m.start_min,
        end_min: m.end_min,
        created_at: m.created_at,
    }
}

// ── AvailabilityRuleRepository impl ─────────────────────────────

#[async_trait]
impl AvailabilityRuleRepository for SeaOrmAvailabilityRuleRepository {
    async fn insert(&self, rule: AvailabilityRule) -> DomainResult<AvailabilityRule> {
        debug!("Saving availability rule: {}", rule.id);
        let model = availability_rule::ActiveModel {
            id: Set(rule.id),
            staff_id: Set(rule.staff_id),
            day_of_week: Set(rule.day_of_week),
            start_min: Set(rule.start_min),
            end_min: Set(rule.end_min),
            created_at: Set(rule.created_at),
        };
        let model = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(model))
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<AvailabilityRule>> {
        let model = availability_rule::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_exact(
        &self,
        staff_id: Uuid,
        day_of_week: i32,
        start_min: i32,
        end_min: i32,
    ) -> DomainResult<Option<AvailabilityRule>> {
        let model = availability_rule::Entity::find()
            .filter(availability_rule::Column::StaffId.eq(staff_id))
            .filter(availability_rule::Column::DayOfWeek.eq(day_of_week))
            .filter(availability_rule::Column::StartMin.eq(start_min))
            .filter(availability_rule::Column::EndMin.eq(end_min))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_for_staff(&self, staff_id: Uuid) -> DomainResult<Vec<AvailabilityRule>> {
        let models = availability_rule::Entity::find()
            .filter(availability_rule::Column::StaffId.eq(staff_id))
            .order_by_asc(availability_rule::Column::DayOfWeek)
            .order_by_asc(availability_rule::Column::StartMin)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_for_day(
        &self,
        staff_id: Uuid,
        day_of_week: i32,
    ) -> DomainResult<Vec<AvailabilityRule>> {
        let models = availability_rule::Entity::find()
            .filter(availability_rule::Column::StaffId.eq(staff_id))
            .filter(availability_rule::Column::DayOfWeek.eq(day_of_week))
            .order_by_asc(availability_rule::Column::StartMin)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let model = availability_rule::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        let Some(model) = model else {
            return Err(DomainError::not_found("Availability rule", id));
        };
        model.delete(&self.db).await.map_err(db_err)?;
        Ok(())
    }
}
