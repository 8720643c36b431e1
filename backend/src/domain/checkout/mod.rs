//! Checkout: cart validation, pricing, ticket issuing, and settlement.

mod cart;
mod issuer;
mod pricing;
mod settlement;

pub use cart::{Cart, CartLine, CartLineDraft, CartValidationError, MAX_TICKETS_PER_CHECKOUT};
pub use issuer::TicketIssuer;
pub use pricing::{CartPricer, PricedCart, PricedLine, PricingError};
pub use settlement::CheckoutService;
