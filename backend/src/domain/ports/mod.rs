//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`) are what inbound adapters call.
//! Driven ports (repositories, the settlement store, identity, reference
//! generation, metrics) are what domain services call out through.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod checkout_command;
mod checkout_metrics;
mod identity_provider;
mod offer_admin_command;
mod offer_query;
mod offer_repository;
mod profile_command;
mod reservation_query;
mod reservation_repository;
mod scan_reference_generator;
mod settlement_store;
mod user_admin_command;
mod user_repository;

pub use account_command::AccountCommand;
#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use checkout_command::{
    CheckoutCommand, CheckoutRequest, CheckoutResponse, SettledReservation,
};
#[cfg(test)]
pub use checkout_command::MockCheckoutCommand;
pub use checkout_metrics::{
    CheckoutMetrics, CheckoutMetricsError, CheckoutOutcome, NoOpCheckoutMetrics,
};
#[cfg(test)]
pub use checkout_metrics::MockCheckoutMetrics;
pub use identity_provider::{
    IdentityAccount, IdentityProvider, IdentityProviderError, IdentitySession,
};
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use offer_admin_command::OfferAdminCommand;
#[cfg(test)]
pub use offer_admin_command::MockOfferAdminCommand;
pub use offer_query::OfferQuery;
#[cfg(test)]
pub use offer_query::MockOfferQuery;
pub use offer_repository::{OfferRepository, OfferRepositoryError};
#[cfg(test)]
pub use offer_repository::MockOfferRepository;
pub use profile_command::ProfileCommand;
#[cfg(test)]
pub use profile_command::MockProfileCommand;
pub use reservation_query::ReservationQuery;
#[cfg(test)]
pub use reservation_query::MockReservationQuery;
pub use reservation_repository::{ReservationRepository, ReservationRepositoryError};
#[cfg(test)]
pub use reservation_repository::MockReservationRepository;
pub use scan_reference_generator::ScanReferenceGenerator;
#[cfg(test)]
pub use scan_reference_generator::MockScanReferenceGenerator;
pub use settlement_store::{
    SettlementPlan, SettlementReceipt, SettlementStore, SettlementStoreError,
};
#[cfg(test)]
pub use settlement_store::MockSettlementStore;
pub use user_admin_command::UserAdminCommand;
#[cfg(test)]
pub use user_admin_command::MockUserAdminCommand;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use user_repository::MockUserRepository;
