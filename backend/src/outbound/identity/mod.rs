//! Identity adapters.
//!
//! `GoTrueIdentityProvider` talks to a GoTrue-compatible auth service over
//! HTTP; `FixtureIdentityProvider` keeps accounts in memory for fixture mode
//! and tests.

mod dto;
mod fixture;
mod gotrue;

pub use fixture::FixtureIdentityProvider;
pub use gotrue::GoTrueIdentityProvider;
