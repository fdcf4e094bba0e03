//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! One adapter per port. Repositories map rows onto aggregates through
//! `sqlx::FromRow` structs and `TryFrom`; the reports reader runs raw
//! aggregation queries instead.

mod appointment_repository;
mod client_repository;
mod clinic_access;
mod clinic_repository;
mod invoice_repository;
mod member_repository;
mod notification_repository;
mod plan_repository;
mod reports_reader;
mod service_type_repository;
mod subscription_repository;

pub use appointment_repository::PostgresAppointmentRepository;
pub use client_repository::PostgresClientRepository;
pub use clinic_access::PostgresClinicAccess;
pub use clinic_repository::PostgresClinicRepository;
pub use invoice_repository::PostgresInvoiceRepository;
pub use member_repository::PostgresMemberRepository;
pub use notification_repository::PostgresNotificationRepository;
pub use plan_repository::PostgresPlanRepository;
pub use reports_reader::PostgresReportsReader;
pub use service_type_repository::PostgresServiceTypeRepository;
pub use subscription_repository::PostgresSubscriptionRepository;
