//! Shared builders for domain unit tests.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::domain::ports::{SettlementPlan, SettlementReceipt};
use crate::domain::{
    AccessToken, AuthenticatedWriteSession, ETicket, Email, Money, Offer, OfferId, PersonName,
    Principal, Reservation, Transaction, TransactionStatus, User, UserId,
};

pub(crate) fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(crate) fn offer_priced(name: &str, price: Decimal) -> Offer {
    Offer {
        id: OfferId::random(),
        name: name.to_owned(),
        description: format!("{name} description"),
        price: Money::new(price).expect("valid price"),
        category: "pass".to_owned(),
        image_url: None,
        max_attendees: 500,
        features: vec!["Entry".to_owned()],
        created_at: fixed_time(),
        updated_at: None,
    }
}

pub(crate) fn principal(is_admin: bool) -> Principal {
    Principal {
        id: UserId::random(),
        email: Email::new("ada@example.com").expect("valid email"),
        is_admin,
    }
}

pub(crate) fn user_for(principal: &Principal) -> User {
    User {
        id: principal.id,
        email: principal.email.clone(),
        first_name: PersonName::new("first_name", "Ada").expect("valid name"),
        last_name: PersonName::new("last_name", "Lovelace").expect("valid name"),
        is_admin: principal.is_admin,
        created_at: fixed_time(),
    }
}

pub(crate) fn session_for(principal: Principal) -> AuthenticatedWriteSession {
    AuthenticatedWriteSession::new(
        principal,
        AccessToken::new("test-token").expect("valid token"),
    )
}

/// Receipt a well-behaved store would return for `plan`.
pub(crate) fn receipt_for(plan: &SettlementPlan) -> SettlementReceipt {
    let created_at = fixed_time();
    SettlementReceipt {
        transaction: Transaction {
            id: plan.transaction.id,
            user_id: plan.transaction.user_id,
            amount: plan.transaction.amount,
            status: TransactionStatus::Completed,
            transaction_key: plan.transaction.transaction_key,
            payment_method: plan.transaction.payment_method,
            created_at,
        },
        reservations: plan
            .reservations
            .iter()
            .map(|reservation| Reservation {
                id: reservation.id,
                user_id: reservation.user_id,
                offer_id: reservation.offer_id,
                quantity: reservation.quantity,
                transaction_id: reservation.transaction_id,
                created_at,
            })
            .collect(),
        etickets: plan
            .etickets
            .iter()
            .map(|ticket| ETicket {
                id: ticket.id,
                reservation_id: ticket.reservation_id,
                scan_reference: ticket.scan_reference.clone(),
                is_used: false,
                used_at: None,
                created_at,
            })
            .collect(),
    }
}
