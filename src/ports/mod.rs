//! Ports: trait contracts between the application core and adapters.
//!
//! One port per file. Repositories persist aggregates, readers serve
//! query-only views, providers wrap external services, and the access
//! ports guard authentication and clinic membership.

mod appointment_repository;
mod assistant_provider;
mod client_repository;
mod clinic_access;
mod clinic_repository;
mod email_sender;
mod invoice_repository;
mod member_repository;
mod notification_repository;
mod payment_provider;
mod plan_repository;
mod reports_reader;
mod service_type_repository;
mod session_validator;
mod subscription_repository;

pub use appointment_repository::AppointmentRepository;
pub use assistant_provider::AssistantProvider;
pub use client_repository::ClientRepository;
pub use clinic_access::ClinicAccess;
pub use clinic_repository::ClinicRepository;
pub use email_sender::{EmailSender, OutboundEmail};
pub use invoice_repository::InvoiceRepository;
pub use member_repository::MemberRepository;
pub use notification_repository::NotificationRepository;
pub use payment_provider::{
    CreatePaymentIntent, PaymentIntent, PaymentIntentStatus, PaymentProvider,
};
pub use plan_repository::PlanRepository;
pub use reports_reader::{ClinicUsageRow, ReportsReader, RevenueStats, SubscriptionStats};
pub use service_type_repository::ServiceTypeRepository;
pub use session_validator::SessionValidator;
pub use subscription_repository::SubscriptionRepository;
