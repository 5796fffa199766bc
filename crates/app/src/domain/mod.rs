//! Verse Domain Concerns

pub mod checkout;
