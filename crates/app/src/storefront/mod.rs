//! Storefront
//!
//! Client-side checkout state: the shared cart, the checkout form and the
//! submission controller that talks to the checkout endpoint.

pub mod cart;
pub mod client;
pub mod controller;
pub mod form;

pub use cart::CartStore;
pub use client::{CheckoutApi, CheckoutApiError, HttpCheckoutApi, SubmissionResponse};
pub use controller::{CheckoutController, Navigation, SubmissionState, SubmitError};
pub use form::{CheckoutForm, Field};
