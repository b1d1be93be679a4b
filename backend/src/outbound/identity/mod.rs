//! Identity-provider outbound adapters.

mod token_info;

pub use token_info::TokenInfoIdentityVerifier;
