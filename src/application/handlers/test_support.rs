//! Shared in-memory port mocks for handler tests.
//!
//! Every mock keeps its state behind a `Mutex` so tests can inspect
//! what handlers saved, and offers `failing()` constructors that turn
//! each call into a simulated infrastructure error.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::assistant::ChatMessage;
use crate::domain::billing::{Plan, PlanTier, Subscription};
use crate::domain::client::{Client, ClientStatus};
use crate::domain::clinic::{Clinic, ClinicMember, MemberRole};
use crate::domain::foundation::{
    AppointmentId, ClientId, ClinicId, DomainError, ErrorCode, InvoiceId, NotificationId, PlanId,
    ServiceTypeId, SubscriptionId, Timestamp, UserId,
};
use crate::domain::invoicing::{Invoice, PublicToken};
use crate::domain::notification::Notification;
use crate::domain::scheduling::{Appointment, ServiceType};
use crate::ports::{
    AppointmentRepository, AssistantProvider, ClientRepository, ClinicAccess, ClinicRepository,
    ClinicUsageRow, CreatePaymentIntent, EmailSender, InvoiceRepository, MemberRepository,
    NotificationRepository, OutboundEmail, PaymentIntent, PaymentIntentStatus, PaymentProvider,
    PlanRepository, ReportsReader, RevenueStats, ServiceTypeRepository, SubscriptionRepository,
    SubscriptionStats,
};

fn db_error() -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, "Simulated database failure")
}

// ════════════════════════════════════════════════════════════════════════════
// Clinic
// ════════════════════════════════════════════════════════════════════════════

pub(crate) struct MockClinicRepository {
    clinics: Mutex<Vec<Clinic>>,
    fail: bool,
}

impl MockClinicRepository {
    pub(crate) fn new() -> Self {
        Self {
            clinics: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            clinics: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub(crate) fn with_clinic(clinic: Clinic) -> Self {
        Self {
            clinics: Mutex::new(vec![clinic]),
            fail: false,
        }
    }

    pub(crate) fn saved(&self) -> Vec<Clinic> {
        self.clinics.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClinicRepository for MockClinicRepository {
    async fn save(&self, clinic: &Clinic) -> Result<(), DomainError> {
        if self.fail {
            return Err(db_error());
        }
        self.clinics.lock().unwrap().push(clinic.clone());
        Ok(())
    }

    async fn update(&self, clinic: &Clinic) -> Result<(), DomainError> {
        if self.fail {
            return Err(db_error());
        }
        let mut clinics = self.clinics.lock().unwrap();
        match clinics.iter_mut().find(|c| c.id == clinic.id) {
            Some(slot) => {
                *slot = clinic.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::ClinicNotFound,
                format!("Clinic not found: {}", clinic.id),
            )),
        }
    }

    async fn find_by_id(&self, id: &ClinicId) -> Result<Option<Clinic>, DomainError> {
        if self.fail {
            return Err(db_error());
        }
        Ok(self
            .clinics
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == *id)
            .cloned())
    }

    async fn exists(&self, id: &ClinicId) -> Result<bool, DomainError> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}

pub(crate) struct MockMemberRepository {
    members: Mutex<Vec<ClinicMember>>,
    fail: bool,
}

impl MockMemberRepository {
    pub(crate) fn new() -> Self {
        Self {
            members: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            members: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub(crate) fn with_member(member: ClinicMember) -> Self {
        Self {
            members: Mutex::new(vec![member]),
            fail: false,
        }
    }

    pub(crate) fn saved(&self) -> Vec<ClinicMember> {
        self.members.lock().unwrap().clone()
    }
}

#[async_trait]
impl MemberRepository for MockMemberRepository {
    async fn save(&self, member: &ClinicMember) -> Result<(), DomainError> {
        if self.fail {
            return Err(db_error());
        }
        let mut members = self.members.lock().unwrap();
        if members
            .iter()
            .any(|m| m.clinic_id == member.clinic_id && m.user_id == member.user_id)
        {
            return Err(DomainError::new(
                ErrorCode::AlreadyExists,
                "Member already exists",
            ));
        }
        members.push(member.clone());
        Ok(())
    }

    async fn find(
        &self,
        clinic_id: &ClinicId,
        user_id: &UserId,
    ) -> Result<Option<ClinicMember>, DomainError> {
        if self.fail {
            return Err(db_error());
        }
        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.clinic_id == *clinic_id && m.user_id == *user_id)
            .cloned())
    }

    async fn list_for_clinic(
        &self,
        clinic_id: &ClinicId,
    ) -> Result<Vec<ClinicMember>, DomainError> {
        if self.fail {
            return Err(db_error());
        }
        let mut members: Vec<_> = self
            .members
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.clinic_id == *clinic_id)
            .cloned()
            .collect();
        members.sort_by(|a, b| b.role.rank().cmp(&a.role.rank()));
        Ok(members)
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<ClinicMember>, DomainError> {
        if self.fail {
            return Err(db_error());
        }
        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.user_id == *user_id)
            .cloned()
            .collect())
    }

}

// ════════════════════════════════════════════════════════════════════════════
// Clients
// ════════════════════════════════════════════════════════════════════════════

pub(crate) struct MockClientRepository {
    clients: Mutex<Vec<Client>>,
    fail: bool,
}

impl MockClientRepository {
    pub(crate) fn new() -> Self {
        Self {
            clients: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            clients: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub(crate) fn with_clients(clients: Vec<Client>) -> Self {
        Self {
            clients: Mutex::new(clients),
            fail: false,
        }
    }

    pub(crate) fn saved(&self) -> Vec<Client> {
        self.clients.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClientRepository for MockClientRepository {
    async fn save(&self, client: &Client) -> Result<(), DomainError> {
        if self.fail {
            return Err(db_error());
        }
        let mut clients = self.clients.lock().unwrap();
        if clients
            .iter()
            .any(|c| c.clinic_id == client.clinic_id && c.email == client.email)
        {
            return Err(DomainError::new(
                ErrorCode::DuplicateEmail,
                format!("A client with email '{}' already exists", client.email),
            ));
        }
        clients.push(client.clone());
        Ok(())
    }

    async fn update(&self, client: &Client) -> Result<(), DomainError> {
        if self.fail {
            return Err(db_error());
        }
        let mut clients = self.clients.lock().unwrap();
        match clients.iter_mut().find(|c| c.id == client.id) {
            Some(slot) => {
                *slot = client.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::ClientNotFound,
                format!("Client not found: {}", client.id),
            )),
        }
    }

    async fn find_by_id(&self, id: &ClientId) -> Result<Option<Client>, DomainError> {
        if self.fail {
            return Err(db_error());
        }
        Ok(self
            .clients
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == *id)
            .cloned())
    }

    async fn find_by_email(
        &self,
        clinic_id: &ClinicId,
        email: &str,
    ) -> Result<Option<Client>, DomainError> {
        if self.fail {
            return Err(db_error());
        }
        Ok(self
            .clients
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.clinic_id == *clinic_id && c.email == email)
            .cloned())
    }

    async fn list_by_clinic(
        &self,
        clinic_id: &ClinicId,
        status: Option<ClientStatus>,
    ) -> Result<Vec<Client>, DomainError> {
        if self.fail {
            return Err(db_error());
        }
        Ok(self
            .clients
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.clinic_id == *clinic_id)
            .filter(|c| status.map_or(true, |s| c.status == s))
            .cloned()
            .collect())
    }

    async fn count_non_inactive(&self, clinic_id: &ClinicId) -> Result<u32, DomainError> {
        if self.fail {
            return Err(db_error());
        }
        Ok(self
            .clients
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.clinic_id == *clinic_id && c.counts_toward_limit())
            .count() as u32)
    }

    async fn list_recent(
        &self,
        clinic_id: &ClinicId,
        limit: u32,
    ) -> Result<Vec<Client>, DomainError> {
        if self.fail {
            return Err(db_error());
        }
        let clients = self.clients.lock().unwrap();
        Ok(clients
            .iter()
            .filter(|c| c.clinic_id == *clinic_id)
            .rev()
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Scheduling
// ════════════════════════════════════════════════════════════════════════════

pub(crate) struct MockServiceTypeRepository {
    service_types: Mutex<Vec<ServiceType>>,
    fail: bool,
}

impl MockServiceTypeRepository {
    pub(crate) fn new() -> Self {
        Self {
            service_types: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            service_types: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub(crate) fn with_service_type(service_type: ServiceType) -> Self {
        Self {
            service_types: Mutex::new(vec![service_type]),
            fail: false,
        }
    }

    pub(crate) fn saved(&self) -> Vec<ServiceType> {
        self.service_types.lock().unwrap().clone()
    }
}

#[async_trait]
impl ServiceTypeRepository for MockServiceTypeRepository {
    async fn save(&self, service_type: &ServiceType) -> Result<(), DomainError> {
        if self.fail {
            return Err(db_error());
        }
        self.service_types.lock().unwrap().push(service_type.clone());
        Ok(())
    }

    async fn update(&self, service_type: &ServiceType) -> Result<(), DomainError> {
        if self.fail {
            return Err(db_error());
        }
        let mut service_types = self.service_types.lock().unwrap();
        match service_types.iter_mut().find(|s| s.id == service_type.id) {
            Some(slot) => {
                *slot = service_type.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::ServiceTypeNotFound,
                format!("Service type not found: {}", service_type.id),
            )),
        }
    }

    async fn find_by_id(&self, id: &ServiceTypeId) -> Result<Option<ServiceType>, DomainError> {
        if self.fail {
            return Err(db_error());
        }
        Ok(self
            .service_types
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == *id)
            .cloned())
    }

    async fn list_by_clinic(
        &self,
        clinic_id: &ClinicId,
        active_only: bool,
    ) -> Result<Vec<ServiceType>, DomainError> {
        if self.fail {
            return Err(db_error());
        }
        Ok(self
            .service_types
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.clinic_id == *clinic_id)
            .filter(|s| !active_only || s.active)
            .cloned()
            .collect())
    }
}

pub(crate) struct MockAppointmentRepository {
    appointments: Mutex<Vec<Appointment>>,
    fail: bool,
}

impl MockAppointmentRepository {
    pub(crate) fn new() -> Self {
        Self {
            appointments: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            appointments: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub(crate) fn with_appointment(appointment: Appointment) -> Self {
        Self {
            appointments: Mutex::new(vec![appointment]),
            fail: false,
        }
    }

    pub(crate) fn saved(&self) -> Vec<Appointment> {
        self.appointments.lock().unwrap().clone()
    }
}

#[async_trait]
impl AppointmentRepository for MockAppointmentRepository {
    async fn save(&self, appointment: &Appointment) -> Result<(), DomainError> {
        if self.fail {
            return Err(db_error());
        }
        self.appointments.lock().unwrap().push(appointment.clone());
        Ok(())
    }

    async fn update(&self, appointment: &Appointment) -> Result<(), DomainError> {
        if self.fail {
            return Err(db_error());
        }
        let mut appointments = self.appointments.lock().unwrap();
        match appointments.iter_mut().find(|a| a.id == appointment.id) {
            Some(slot) => {
                *slot = appointment.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::AppointmentNotFound,
                format!("Appointment not found: {}", appointment.id),
            )),
        }
    }

    async fn find_by_id(&self, id: &AppointmentId) -> Result<Option<Appointment>, DomainError> {
        if self.fail {
            return Err(db_error());
        }
        Ok(self
            .appointments
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == *id)
            .cloned())
    }

    async fn list_by_clinic(
        &self,
        clinic_id: &ClinicId,
        from: Timestamp,
        until: Timestamp,
    ) -> Result<Vec<Appointment>, DomainError> {
        if self.fail {
            return Err(db_error());
        }
        let mut appointments: Vec<_> = self
            .appointments
            .lock()
            .unwrap()
            .iter()
            .filter(|a| {
                a.clinic_id == *clinic_id
                    && !a.starts_at.is_before(&from)
                    && a.starts_at.is_before(&until)
            })
            .cloned()
            .collect();
        appointments.sort_by_key(|a| a.starts_at.as_unix_secs());
        Ok(appointments)
    }

    async fn list_by_client(&self, client_id: &ClientId) -> Result<Vec<Appointment>, DomainError> {
        if self.fail {
            return Err(db_error());
        }
        Ok(self
            .appointments
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.client_id == *client_id)
            .cloned()
            .collect())
    }

    async fn list_upcoming(
        &self,
        clinic_id: &ClinicId,
        after: Timestamp,
        limit: u32,
    ) -> Result<Vec<Appointment>, DomainError> {
        if self.fail {
            return Err(db_error());
        }
        let mut appointments: Vec<_> = self
            .appointments
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.clinic_id == *clinic_id && a.starts_at.is_after(&after))
            .cloned()
            .collect();
        appointments.sort_by_key(|a| a.starts_at.as_unix_secs());
        appointments.truncate(limit as usize);
        Ok(appointments)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Billing
// ════════════════════════════════════════════════════════════════════════════

pub(crate) struct MockPlanRepository {
    plans: Mutex<Vec<Plan>>,
}

impl MockPlanRepository {
    /// Catalog with all three tiers present.
    pub(crate) fn seeded() -> Self {
        Self {
            plans: Mutex::new(Plan::catalog()),
        }
    }

    pub(crate) fn empty() -> Self {
        Self {
            plans: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn plan_for(&self, tier: PlanTier) -> Plan {
        self.plans
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.tier == tier)
            .cloned()
            .expect("tier seeded")
    }
}

#[async_trait]
impl PlanRepository for MockPlanRepository {
    async fn upsert(&self, plan: &Plan) -> Result<(), DomainError> {
        let mut plans = self.plans.lock().unwrap();
        match plans.iter_mut().find(|p| p.tier == plan.tier) {
            Some(slot) => *slot = plan.clone(),
            None => plans.push(plan.clone()),
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &PlanId) -> Result<Option<Plan>, DomainError> {
        Ok(self
            .plans
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == *id)
            .cloned())
    }

    async fn find_by_tier(&self, tier: PlanTier) -> Result<Plan, DomainError> {
        self.plans
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.tier == tier)
            .cloned()
            .ok_or_else(|| {
                DomainError::new(ErrorCode::PlanNotFound, format!("Plan not found: {}", tier))
            })
    }

    async fn list(&self) -> Result<Vec<Plan>, DomainError> {
        let mut plans = self.plans.lock().unwrap().clone();
        plans.sort_by(|a, b| a.monthly_price.total_cmp(&b.monthly_price));
        Ok(plans)
    }
}

pub(crate) struct MockSubscriptionRepository {
    subscriptions: Mutex<Vec<Subscription>>,
    fail: bool,
    fail_update_for: Mutex<Vec<SubscriptionId>>,
}

impl MockSubscriptionRepository {
    pub(crate) fn new() -> Self {
        Self {
            subscriptions: Mutex::new(Vec::new()),
            fail: false,
            fail_update_for: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            subscriptions: Mutex::new(Vec::new()),
            fail: true,
            fail_update_for: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_subscription(subscription: Subscription) -> Self {
        Self {
            subscriptions: Mutex::new(vec![subscription]),
            fail: false,
            fail_update_for: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_subscriptions(subscriptions: Vec<Subscription>) -> Self {
        Self {
            subscriptions: Mutex::new(subscriptions),
            fail: false,
            fail_update_for: Mutex::new(Vec::new()),
        }
    }

    /// Makes `update` fail only for the given subscription.
    pub(crate) fn fail_update_for(&self, id: SubscriptionId) {
        self.fail_update_for.lock().unwrap().push(id);
    }

    pub(crate) fn saved(&self) -> Vec<Subscription> {
        self.subscriptions.lock().unwrap().clone()
    }

    pub(crate) fn find(&self, id: SubscriptionId) -> Option<Subscription> {
        self.subscriptions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned()
    }
}

#[async_trait]
impl SubscriptionRepository for MockSubscriptionRepository {
    async fn save(&self, subscription: &Subscription) -> Result<(), DomainError> {
        if self.fail {
            return Err(db_error());
        }
        let mut subscriptions = self.subscriptions.lock().unwrap();
        if subscriptions
            .iter()
            .any(|s| s.clinic_id == subscription.clinic_id)
        {
            return Err(DomainError::new(
                ErrorCode::AlreadyExists,
                "Clinic already has a subscription",
            ));
        }
        subscriptions.push(subscription.clone());
        Ok(())
    }

    async fn update(&self, subscription: &Subscription) -> Result<(), DomainError> {
        if self.fail {
            return Err(db_error());
        }
        if self
            .fail_update_for
            .lock()
            .unwrap()
            .contains(&subscription.id)
        {
            return Err(db_error());
        }
        let mut subscriptions = self.subscriptions.lock().unwrap();
        match subscriptions.iter_mut().find(|s| s.id == subscription.id) {
            Some(slot) => {
                *slot = subscription.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::SubscriptionNotFound,
                "Subscription not found",
            )),
        }
    }

    async fn find_by_id(&self, id: &SubscriptionId) -> Result<Option<Subscription>, DomainError> {
        if self.fail {
            return Err(db_error());
        }
        Ok(self
            .subscriptions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == *id)
            .cloned())
    }

    async fn find_by_clinic(
        &self,
        clinic_id: &ClinicId,
    ) -> Result<Option<Subscription>, DomainError> {
        if self.fail {
            return Err(db_error());
        }
        Ok(self
            .subscriptions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.clinic_id == *clinic_id)
            .cloned())
    }

    async fn find_by_provider_id(
        &self,
        provider_subscription_id: &str,
    ) -> Result<Option<Subscription>, DomainError> {
        if self.fail {
            return Err(db_error());
        }
        Ok(self
            .subscriptions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.stripe_subscription_id.as_deref() == Some(provider_subscription_id))
            .cloned())
    }

    async fn ensure_default(
        &self,
        clinic_id: &ClinicId,
        free_plan_id: &PlanId,
    ) -> Result<Subscription, DomainError> {
        if self.fail {
            return Err(db_error());
        }
        let mut subscriptions = self.subscriptions.lock().unwrap();
        if let Some(existing) = subscriptions.iter().find(|s| s.clinic_id == *clinic_id) {
            return Ok(existing.clone());
        }
        let subscription = Subscription::create_free(*clinic_id, *free_plan_id);
        subscriptions.push(subscription.clone());
        Ok(subscription)
    }

    async fn find_expired_trials(
        &self,
        now: Timestamp,
    ) -> Result<Vec<Subscription>, DomainError> {
        if self.fail {
            return Err(db_error());
        }
        Ok(self
            .subscriptions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.is_trial_expired(now))
            .cloned()
            .collect())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Invoicing
// ════════════════════════════════════════════════════════════════════════════

pub(crate) struct MockInvoiceRepository {
    invoices: Mutex<Vec<Invoice>>,
    fail: bool,
}

impl MockInvoiceRepository {
    pub(crate) fn new() -> Self {
        Self {
            invoices: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            invoices: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub(crate) fn with_invoice(invoice: Invoice) -> Self {
        Self {
            invoices: Mutex::new(vec![invoice]),
            fail: false,
        }
    }

    pub(crate) fn saved(&self) -> Vec<Invoice> {
        self.invoices.lock().unwrap().clone()
    }

    pub(crate) fn find(&self, id: InvoiceId) -> Option<Invoice> {
        self.invoices
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.id == id)
            .cloned()
    }
}

#[async_trait]
impl InvoiceRepository for MockInvoiceRepository {
    async fn save(&self, invoice: &Invoice) -> Result<(), DomainError> {
        if self.fail {
            return Err(db_error());
        }
        self.invoices.lock().unwrap().push(invoice.clone());
        Ok(())
    }

    async fn update(&self, invoice: &Invoice) -> Result<(), DomainError> {
        if self.fail {
            return Err(db_error());
        }
        let mut invoices = self.invoices.lock().unwrap();
        match invoices.iter_mut().find(|i| i.id == invoice.id) {
            Some(slot) => {
                *slot = invoice.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::InvoiceNotFound,
                format!("Invoice not found: {}", invoice.id),
            )),
        }
    }

    async fn find_by_id(&self, id: &InvoiceId) -> Result<Option<Invoice>, DomainError> {
        if self.fail {
            return Err(db_error());
        }
        Ok(self
            .invoices
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.id == *id)
            .cloned())
    }

    async fn find_by_public_token(
        &self,
        token: &PublicToken,
    ) -> Result<Option<Invoice>, DomainError> {
        if self.fail {
            return Err(db_error());
        }
        Ok(self
            .invoices
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.public_token == *token)
            .cloned())
    }

    async fn find_by_payment_intent(
        &self,
        payment_intent_id: &str,
    ) -> Result<Option<Invoice>, DomainError> {
        if self.fail {
            return Err(db_error());
        }
        Ok(self
            .invoices
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.payment_intent_id.as_deref() == Some(payment_intent_id))
            .cloned())
    }

    async fn list_by_clinic(&self, clinic_id: &ClinicId) -> Result<Vec<Invoice>, DomainError> {
        if self.fail {
            return Err(db_error());
        }
        Ok(self
            .invoices
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.clinic_id == *clinic_id)
            .cloned()
            .collect())
    }

    async fn list_by_client(&self, client_id: &ClientId) -> Result<Vec<Invoice>, DomainError> {
        if self.fail {
            return Err(db_error());
        }
        Ok(self
            .invoices
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.client_id == *client_id)
            .cloned()
            .collect())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Notifications
// ════════════════════════════════════════════════════════════════════════════

pub(crate) struct MockNotificationRepository {
    notifications: Mutex<Vec<Notification>>,
    fail: bool,
}

impl MockNotificationRepository {
    pub(crate) fn new() -> Self {
        Self {
            notifications: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub(crate) fn with_notifications(notifications: Vec<Notification>) -> Self {
        Self {
            notifications: Mutex::new(notifications),
            fail: false,
        }
    }

    pub(crate) fn saved(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationRepository for MockNotificationRepository {
    async fn save(&self, notification: &Notification) -> Result<(), DomainError> {
        if self.fail {
            return Err(db_error());
        }
        self.notifications.lock().unwrap().push(notification.clone());
        Ok(())
    }

    async fn update(&self, notification: &Notification) -> Result<(), DomainError> {
        if self.fail {
            return Err(db_error());
        }
        let mut notifications = self.notifications.lock().unwrap();
        match notifications.iter_mut().find(|n| n.id == notification.id) {
            Some(slot) => {
                *slot = notification.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::NotificationNotFound,
                "Notification not found",
            )),
        }
    }

    async fn find_by_id(
        &self,
        id: &NotificationId,
    ) -> Result<Option<Notification>, DomainError> {
        if self.fail {
            return Err(db_error());
        }
        Ok(self
            .notifications
            .lock()
            .unwrap()
            .iter()
            .find(|n| n.id == *id)
            .cloned())
    }

    async fn list_for_user(
        &self,
        clinic_id: &ClinicId,
        user_id: &UserId,
        unread_only: bool,
    ) -> Result<Vec<Notification>, DomainError> {
        if self.fail {
            return Err(db_error());
        }
        Ok(self
            .notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.clinic_id == *clinic_id && n.user_id == *user_id)
            .filter(|n| !unread_only || !n.read)
            .cloned()
            .collect())
    }

    async fn mark_all_read(
        &self,
        clinic_id: &ClinicId,
        user_id: &UserId,
    ) -> Result<u64, DomainError> {
        if self.fail {
            return Err(db_error());
        }
        let mut count = 0;
        for notification in self.notifications.lock().unwrap().iter_mut() {
            if notification.clinic_id == *clinic_id
                && notification.user_id == *user_id
                && !notification.read
            {
                notification.mark_read();
                count += 1;
            }
        }
        Ok(count)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// External providers
// ════════════════════════════════════════════════════════════════════════════

pub(crate) struct MockPaymentProvider {
    requests: Mutex<Vec<CreatePaymentIntent>>,
    fail: bool,
}

impl MockPaymentProvider {
    pub(crate) fn new() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub(crate) fn requests(&self) -> Vec<CreatePaymentIntent> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_payment_intent(
        &self,
        request: CreatePaymentIntent,
    ) -> Result<PaymentIntent, DomainError> {
        if self.fail {
            return Err(DomainError::new(
                ErrorCode::PaymentProviderError,
                "Simulated gateway failure",
            ));
        }
        let mut requests = self.requests.lock().unwrap();
        requests.push(request);
        Ok(PaymentIntent {
            id: format!("pi_test_{}", requests.len()),
            client_secret: Some("pi_secret_test".to_string()),
            status: PaymentIntentStatus::RequiresPayment,
        })
    }

    async fn get_payment_intent(&self, id: &str) -> Result<Option<PaymentIntent>, DomainError> {
        if self.fail {
            return Err(DomainError::new(
                ErrorCode::PaymentProviderError,
                "Simulated gateway failure",
            ));
        }
        Ok(Some(PaymentIntent {
            id: id.to_string(),
            client_secret: None,
            status: PaymentIntentStatus::Succeeded,
        }))
    }
}

pub(crate) struct MockEmailSender {
    sent: Mutex<Vec<OutboundEmail>>,
    fail: bool,
}

impl MockEmailSender {
    pub(crate) fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub(crate) fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailSender for MockEmailSender {
    async fn send(&self, email: OutboundEmail) -> Result<(), DomainError> {
        if self.fail {
            return Err(DomainError::new(
                ErrorCode::EmailDeliveryError,
                "Simulated delivery failure",
            ));
        }
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

pub(crate) struct MockAssistantProvider {
    reply: String,
    fail: bool,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl MockAssistantProvider {
    pub(crate) fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            reply: String::new(),
            fail: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AssistantProvider for MockAssistantProvider {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, DomainError> {
        if self.fail {
            return Err(DomainError::new(
                ErrorCode::AssistantProviderError,
                "Simulated provider failure",
            ));
        }
        self.calls.lock().unwrap().push(messages.to_vec());
        Ok(self.reply.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Access and reports
// ════════════════════════════════════════════════════════════════════════════

pub(crate) struct MockClinicAccess {
    member_role: Option<MemberRole>,
}

impl MockClinicAccess {
    /// Grants membership with the given role to any caller.
    pub(crate) fn allowing(role: MemberRole) -> Self {
        Self {
            member_role: Some(role),
        }
    }

    /// Denies everyone.
    pub(crate) fn denying() -> Self {
        Self { member_role: None }
    }
}

#[async_trait]
impl ClinicAccess for MockClinicAccess {
    async fn require_member(
        &self,
        clinic_id: &ClinicId,
        user_id: &UserId,
    ) -> Result<ClinicMember, DomainError> {
        match self.member_role {
            Some(role) => Ok(ClinicMember::new(
                *clinic_id,
                user_id.clone(),
                role,
                "member@example.com",
                Some("Test Member".to_string()),
            )),
            None => Err(DomainError::new(
                ErrorCode::Forbidden,
                "Not a member of this clinic",
            )),
        }
    }

    async fn require_role(
        &self,
        clinic_id: &ClinicId,
        user_id: &UserId,
        role: MemberRole,
    ) -> Result<ClinicMember, DomainError> {
        let member = self.require_member(clinic_id, user_id).await?;
        if !member.role.at_least(role) {
            return Err(DomainError::new(
                ErrorCode::Forbidden,
                format!("Requires {} role or above", role),
            ));
        }
        Ok(member)
    }
}

pub(crate) struct MockReportsReader {
    pub(crate) stats: SubscriptionStats,
    pub(crate) usage: Vec<ClinicUsageRow>,
    pub(crate) revenue: RevenueStats,
}

impl MockReportsReader {
    pub(crate) fn empty() -> Self {
        Self {
            stats: SubscriptionStats::default(),
            usage: Vec::new(),
            revenue: RevenueStats::default(),
        }
    }
}

#[async_trait]
impl ReportsReader for MockReportsReader {
    async fn subscription_stats(
        &self,
        _now: Timestamp,
    ) -> Result<SubscriptionStats, DomainError> {
        Ok(self.stats.clone())
    }

    async fn client_usage(&self) -> Result<Vec<ClinicUsageRow>, DomainError> {
        Ok(self.usage.clone())
    }

    async fn revenue_stats(&self) -> Result<RevenueStats, DomainError> {
        Ok(self.revenue.clone())
    }
}
