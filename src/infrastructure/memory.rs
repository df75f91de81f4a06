//! In-memory repositories for development and testing

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::{
    Appointment, AppointmentRepository, AvailabilityRule, AvailabilityRuleRepository, Customer,
    CustomerQuery, CustomerRepository, DomainError, DomainResult, Page, RepositoryProvider,
    Service, ServiceQuery, ServiceRepository, StaffMember, StaffQuery, StaffRepository,
};

/// In-memory implementation of every repository trait.
///
/// Booking writes serialize on one mutex so the check-then-insert sequence
/// matches the transactional guard of the SeaORM implementation.
#[derive(Default)]
pub struct InMemoryRepositories {
    staff: DashMap<Uuid, StaffMember>,
    services: DashMap<Uuid, Service>,
    customers: DashMap<Uuid, Customer>,
    rules: DashMap<Uuid, AvailabilityRule>,
    appointments: DashMap<Uuid, Appointment>,
    booking_guard: Mutex<()>,
}

impl InMemoryRepositories {
    pub fn new() -> Self {
        Self::default()
    }

    fn booked_overlapping(
        &self,
        staff_id: Uuid,
        start: NaiveDateTime,
        end: NaiveDateTime,
        exclude: Option<Uuid>,
    ) -> Option<Appointment> {
        let mut clashes: Vec<Appointment> = self
            .appointments
            .iter()
            .map(|e| e.value().clone())
            .filter(|a| {
                a.staff_id == staff_id
                    && a.is_booked()
                    && exclude != Some(a.id)
                    && a.overlaps(start, end)
            })
            .collect();
        clashes.sort_by_key(|a| (a.start_at, a.id));
        clashes.into_iter().next()
    }
}

impl RepositoryProvider for InMemoryRepositories {
    fn staff(&self) -> &dyn StaffRepository {
        self
    }

    fn services(&self) -> &dyn ServiceRepository {
        self
    }

    fn customers(&self) -> &dyn CustomerRepository {
        self
    }

    fn availability_rules(&self) -> &dyn AvailabilityRuleRepository {
        self
    }

    fn appointments(&self) -> &dyn AppointmentRepository {
        self
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn paginate<T>(mut items: Vec<T>, limit: u64, offset: u64) -> Page<T> {
    let total = items.len() as u64;
    let items = if offset as usize >= items.len() {
        Vec::new()
    } else {
        items.split_off(offset as usize)
            .into_iter()
            .take(limit as usize)
            .collect()
    };
    Page::new(items, total)
}

// ── StaffRepository ────────────────────────────────────────────

#[async_trait]
impl StaffRepository for InMemoryRepositories {
    async fn insert(&self, staff: StaffMember) -> DomainResult<StaffMember> {
        self.staff.insert(staff.id, staff.clone());
        Ok(staff)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<StaffMember>> {
        Ok(self.staff.get(&id).map(|s| s.clone()))
    }

    async fn update(&self, staff: StaffMember) -> DomainResult<StaffMember> {
        if !self.staff.contains_key(&staff.id) {
            return Err(DomainError::not_found("Staff member", staff.id));
        }
        self.staff.insert(staff.id, staff.clone());
        Ok(staff)
    }

    async fn list(&self, query: StaffQuery) -> DomainResult<Page<StaffMember>> {
        let mut items: Vec<StaffMember> = self
            .staff
            .iter()
            .map(|e| e.value().clone())
            .filter(|s| {
                query
                    .q
                    .as_deref()
                    .map(|q| contains_ci(&s.full_name, q))
                    .unwrap_or(true)
                    && query.is_active.map(|a| s.is_active == a).unwrap_or(true)
            })
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(paginate(items, query.limit, query.offset))
    }
}

// ── ServiceRepository ──────────────────────────────────────────

#[async_trait]
impl ServiceRepository for InMemoryRepositories {
    async fn insert(&self, service: Service) -> DomainResult<Service> {
        self.services.insert(service.id, service.clone());
        Ok(service)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Service>> {
        Ok(self.services.get(&id).map(|s| s.clone()))
    }

    async fn update(&self, service: Service) -> DomainResult<Service> {
        if !self.services.contains_key(&service.id) {
            return Err(DomainError::not_found("Service", service.id));
        }
        self.services.insert(service.id, service.clone());
        Ok(service)
    }

    async fn list(&self, query: ServiceQuery) -> DomainResult<Page<Service>> {
        let mut items: Vec<Service> = self
            .services
            .iter()
            .map(|e| e.value().clone())
            .filter(|s| {
                query
                    .q
                    .as_deref()
                    .map(|q| contains_ci(&s.name, q))
                    .unwrap_or(true)
                    && query.is_active.map(|a| s.is_active == a).unwrap_or(true)
            })
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(paginate(items, query.limit, query.offset))
    }
}

// ── CustomerRepository ─────────────────────────────────────────

#[async_trait]
impl CustomerRepository for InMemoryRepositories {
    async fn insert(&self, customer: Customer) -> DomainResult<Customer> {
        self.customers.insert(customer.id, customer.clone());
        Ok(customer)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Customer>> {
        Ok(self.customers.get(&id).map(|c| c.clone()))
    }

    async fn list(&self, query: CustomerQuery) -> DomainResult<Page<Customer>> {
        let mut items: Vec<Customer> = self
            .customers
            .iter()
            .map(|e| e.value().clone())
            .filter(|c| {
                query
                    .q
                    .as_deref()
                    .map(|q| {
                        contains_ci(&c.full_name, q)
                            || c.phone.as_deref().map(|p| p.contains(q)).unwrap_or(false)
                            || c.email
                                .as_deref()
                                .map(|e| contains_ci(e, q))
                                .unwrap_or(false)
                    })
                    .unwrap_or(true)
            })
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(paginate(items, query.limit, query.offset))
    }
}

// ── AvailabilityRuleRepository ─────────────────────────────────

#[async_trait]
impl AvailabilityRuleRepository for InMemoryRepositories {
    async fn insert(&self, rule: AvailabilityRule) -> DomainResult<AvailabilityRule> {
        self.rules.insert(rule.id, rule.clone());
        Ok(rule)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<AvailabilityRule>> {
        Ok(self.rules.get(&id).map(|r| r.clone()))
    }

    async fn find_exact(
        &self,
        staff_id: Uuid,
        day_of_week: i32,
        start_min: i32,
        end_min: i32,
    ) -> DomainResult<Option<AvailabilityRule>> {
        Ok(self
            .rules
            .iter()
            .map(|e| e.value().clone())
            .find(|r| {
                r.staff_id == staff_id
                    && r.day_of_week == day_of_week
                    && r.start_min == start_min
                    && r.end_min == end_min
            }))
    }

    async fn find_for_staff(&self, staff_id: Uuid) -> DomainResult<Vec<AvailabilityRule>> {
        let mut rules: Vec<AvailabilityRule> = self
            .rules
            .iter()
            .map(|e| e.value().clone())
            .filter(|r| r.staff_id == staff_id)
            .collect();
        rules.sort_by_key(|r| (r.day_of_week, r.start_min, r.id));
        Ok(rules)
    }

    async fn find_for_day(
        &self,
        staff_id: Uuid,
        day_of_week: i32,
    ) -> DomainResult<Vec<AvailabilityRule>> {
        let mut rules: Vec<AvailabilityRule> = self
            .rules
            .iter()
            .map(|e| e.value().clone())
            .filter(|r| r.staff_id == staff_id && r.day_of_week == day_of_week)
            .collect();
        rules.sort_by_key(|r| (r.start_min, r.id));
        Ok(rules)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        self.rules
            .remove(&id)
            .ok_or_else(|| DomainError::not_found("Availability rule", id))?;
        Ok(())
    }
}

// ── AppointmentRepository ──────────────────────────────────────

#[async_trait]
impl AppointmentRepository for InMemoryRepositories {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Appointment>> {
        Ok(self.appointments.get(&id).map(|a| a.clone()))
    }

    async fn find_booked_on_day(
        &self,
        staff_id: Uuid,
        day: NaiveDate,
    ) -> DomainResult<Vec<Appointment>> {
        let mut booked: Vec<Appointment> = self
            .appointments
            .iter()
            .map(|e| e.value().clone())
            .filter(|a| a.staff_id == staff_id && a.is_booked() && a.start_at.date() == day)
            .collect();
        booked.sort_by_key(|a| (a.start_at, a.id));
        Ok(booked)
    }

    async fn list_booked_in_range(
        &self,
        staff_id: Uuid,
        from: NaiveDateTime,
        to: NaiveDateTime,
        limit: u64,
        offset: u64,
    ) -> DomainResult<Page<Appointment>> {
        let mut booked: Vec<Appointment> = self
            .appointments
            .iter()
            .map(|e| e.value().clone())
            .filter(|a| {
                a.staff_id == staff_id && a.is_booked() && a.start_at >= from && a.end_at <= to
            })
            .collect();
        booked.sort_by_key(|a| (a.start_at, a.id));
        Ok(paginate(booked, limit, offset))
    }

    async fn insert_booked(&self, appointment: Appointment) -> DomainResult<Appointment> {
        let _guard = self
            .booking_guard
            .lock()
            .map_err(|e| DomainError::Storage(e.to_string()))?;

        if let Some(clash) = self.booked_overlapping(
            appointment.staff_id,
            appointment.start_at,
            appointment.end_at,
            None,
        ) {
            return Err(DomainError::Conflict {
                appointment_id: clash.id,
                start_at: clash.start_at,
                end_at: clash.end_at,
            });
        }

        self.appointments.insert(appointment.id, appointment.clone());
        Ok(appointment)
    }

    async fn update_schedule(&self, appointment: Appointment) -> DomainResult<Appointment> {
        let _guard = self
            .booking_guard
            .lock()
            .map_err(|e| DomainError::Storage(e.to_string()))?;

        if !self.appointments.contains_key(&appointment.id) {
            return Err(DomainError::not_found("Appointment", appointment.id));
        }

        if let Some(clash) = self.booked_overlapping(
            appointment.staff_id,
            appointment.start_at,
            appointment.end_at,
            Some(appointment.id),
        ) {
            return Err(DomainError::Conflict {
                appointment_id: clash.id,
                start_at: clash.start_at,
                end_at: clash.end_at,
            });
        }

        self.appointments.insert(appointment.id, appointment.clone());
        Ok(appointment)
    }

    async fn update(&self, appointment: Appointment) -> DomainResult<Appointment> {
        if !self.appointments.contains_key(&appointment.id) {
            return Err(DomainError::not_found("Appointment", appointment.id));
        }
        self.appointments.insert(appointment.id, appointment.clone());
        Ok(appointment)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 2)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn booked(staff_id: Uuid, start: NaiveDateTime, end: NaiveDateTime) -> Appointment {
        Appointment::new(Uuid::new_v4(), staff_id, Uuid::new_v4(), start, end, None)
    }

    #[tokio::test]
    async fn guard_rejects_overlapping_insert() {
        let repos = InMemoryRepositories::new();
        let staff_id = Uuid::new_v4();
        let first = repos
            .insert_booked(booked(staff_id, at(9, 0), at(9, 30)))
            .await
            .unwrap();

        // Bypasses the application checks entirely; the guard alone decides
        let err = repos
            .insert_booked(booked(staff_id, at(9, 15), at(9, 45)))
            .await
            .unwrap_err();
        match err {
            DomainError::Conflict { appointment_id, .. } => {
                assert_eq!(appointment_id, first.id)
            }
            other => panic!("expected Conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn guard_allows_touching_intervals() {
        let repos = InMemoryRepositories::new();
        let staff_id = Uuid::new_v4();
        repos
            .insert_booked(booked(staff_id, at(9, 0), at(9, 30)))
            .await
            .unwrap();
        repos
            .insert_booked(booked(staff_id, at(9, 30), at(10, 0)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn update_schedule_ignores_own_row() {
        let repos = InMemoryRepositories::new();
        let staff_id = Uuid::new_v4();
        let mut appointment = repos
            .insert_booked(booked(staff_id, at(9, 0), at(9, 30)))
            .await
            .unwrap();

        appointment.move_to(at(9, 15), at(9, 45), None);
        repos.update_schedule(appointment).await.unwrap();
    }
}
