//! SeaORM implementation of AppointmentRepository
//!
//! Booking writes run their overlap check and the insert/update inside one
//! database transaction. The application layer performs the same check
//! first for precise error reporting; the transactional re-check is the
//! storage guard that closes the race between two concurrent bookings.

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use super::db_err;
use crate::domain::appointment::{Appointment, AppointmentRepository, AppointmentStatus};
use crate::domain::{DomainError, DomainResult, Page};
use crate::infrastructure::database::entities::appointment;

pub struct SeaOrmAppointmentRepository {
    db: DatabaseConnection,
}

impl SeaOrmAppointmentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// First BOOKED row overlapping `[start_at, end_at)` for the staff
    /// member, read inside the booking transaction.
    async fn find_overlap_in_txn(
        txn: &DatabaseTransaction,
        staff_id: Uuid,
        start_at: NaiveDateTime,
        end_at: NaiveDateTime,
        exclude: Option<Uuid>,
    ) -> DomainResult<Option<appointment::Model>> {
        let mut select = appointment::Entity::find()
            .filter(appointment::Column::StaffId.eq(staff_id))
            .filter(appointment::Column::Status.eq(AppointmentStatus::Booked.as_str()))
            .filter(appointment::Column::StartAt.lt(end_at))
            .filter(appointment::Column::EndAt.gt(start_at));
        if let Some(exclude) = exclude {
            select = select.filter(appointment::Column::Id.ne(exclude));
        }
        select
            .order_by_asc(appointment::Column::StartAt)
            .order_by_asc(appointment::Column::Id)
            .one(txn)
            .await
            .map_err(db_err)
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: appointment::Model) -> Appointment {
    Appointment {
        id: m.id,
        customer_id: m.customer_id,
        staff_id: m.staff_id,
        service_id: m.service_id,
        status: AppointmentStatus::from_str(&m.status),
        start_at: m.start_at,
        end_at: m.end_at,
        notes: m.notes,
        cancelled_at: m.cancelled_at,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn domain_to_active(a: Appointment) -> appointment::ActiveModel {
    appointment::ActiveModel {
        id: Set(a.id),
        customer_id: Set(a.customer_id),
        staff_id: Set(a.staff_id),
        service_id: Set(a.service_id),
        status: Set(a.status.as_str().to_string()),
        start_at: Set(a.start_at),
        end_at: Set(a.end_at),
        notes: Set(a.notes),
        cancelled_at: Set(a.cancelled_at),
        created_at: Set(a.created_at),
        updated_at: Set(a.updated_at),
    }
}

fn conflict_from(m: appointment::Model) -> DomainError {
    DomainError::Conflict {
        appointment_id: m.id,
        start_at: m.start_at,
        end_at: m.end_at,
    }
}

// ── AppointmentRepository impl ──────────────────────────────────

#[async_trait]
impl AppointmentRepository for SeaOrmAppointmentRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Appointment>> {
        let model = appointment::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_booked_on_day(
        &self,
        staff_id: Uuid,
        day: NaiveDate,
    ) -> DomainResult<Vec<Appointment>> {
        let day_start = NaiveDateTime::new(day, NaiveTime::MIN);
        let day_end = day_start + Duration::days(1);

        let models = appointment::Entity::find()
            .filter(appointment::Column::StaffId.eq(staff_id))
            .filter(appointment::Column::Status.eq(AppointmentStatus::Booked.as_str()))
            .filter(appointment::Column::StartAt.gte(day_start))
            .filter(appointment::Column::StartAt.lt(day_end))
            .order_by_asc(appointment::Column::StartAt)
            .order_by_asc(appointment::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn list_booked_in_range(
        &self,
        staff_id: Uuid,
        from: NaiveDateTime,
        to: NaiveDateTime,
        limit: u64,
        offset: u64,
    ) -> DomainResult<Page<Appointment>> {
        let select = appointment::Entity::find()
            .filter(appointment::Column::StaffId.eq(staff_id))
            .filter(appointment::Column::Status.eq(AppointmentStatus::Booked.as_str()))
            .filter(appointment::Column::StartAt.gte(from))
            .filter(appointment::Column::EndAt.lte(to));

        let total = select.clone().count(&self.db).await.map_err(db_err)?;
        let models = select
            .order_by_asc(appointment::Column::StartAt)
            .limit(limit)
            .offset(offset)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(Page::new(
            models.into_iter().map(model_to_domain).collect(),
            total,
        ))
    }

    async fn insert_booked(&self, a: Appointment) -> DomainResult<Appointment> {
        debug!("Booking appointment: {}", a.id);

        let txn = self.db.begin().await.map_err(db_err)?;

        if let Some(clash) =
            Self::find_overlap_in_txn(&txn, a.staff_id, a.start_at, a.end_at, None).await?
        {
            txn.rollback().await.map_err(db_err)?;
            return Err(conflict_from(clash));
        }

        let model = domain_to_active(a).insert(&txn).await.map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;
        Ok(model_to_domain(model))
    }

    async fn update_schedule(&self, a: Appointment) -> DomainResult<Appointment> {
        debug!("Rescheduling appointment: {}", a.id);

        let txn = self.db.begin().await.map_err(db_err)?;

        let existing = appointment::Entity::find_by_id(a.id)
            .one(&txn)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            txn.rollback().await.map_err(db_err)?;
            return Err(DomainError::not_found("Appointment", a.id));
        }

        if let Some(clash) =
            Self::find_overlap_in_txn(&txn, a.staff_id, a.start_at, a.end_at, Some(a.id)).await?
        {
            txn.rollback().await.map_err(db_err)?;
            return Err(conflict_from(clash));
        }

        let model = domain_to_active(a).update(&txn).await.map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;
        Ok(model_to_domain(model))
    }

    async fn update(&self, a: Appointment) -> DomainResult<Appointment> {
        debug!("Updating appointment: {}", a.id);

        let existing = appointment::Entity::find_by_id(a.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::not_found("Appointment", a.id));
        }

        let model = domain_to_active(a).update(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(model))
    }
}
