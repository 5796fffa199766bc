//! Checkout form.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use verse::{ProductLine, masks};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{domain::checkout::data::Billing, payments::CardData};

const DEFAULT_COUNTRY: &str = "US";

/// Editable checkout form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FullName,
    Email,
    Phone,
    Address,
    City,
    State,
    Zip,
    Country,
    CardNumber,
    CardExpiry,
    CardCvv,
    CardHolderName,
}

/// Shopper input for one checkout.
///
/// Card fields hold their masked display form; [`CheckoutForm::card_data`]
/// strips the masks again.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct CheckoutForm {
    full_name: String,
    email: String,
    phone: String,
    address: String,
    city: String,
    state: String,
    zip: String,
    country: String,
    card_number: String,
    card_expiry: String,
    card_cvv: String,
    card_holder_name: String,

    #[zeroize(skip)]
    product_line: ProductLine,
}

impl Default for CheckoutForm {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zip: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
            card_number: String::new(),
            card_expiry: String::new(),
            card_cvv: String::new(),
            card_holder_name: String::new(),
            product_line: ProductLine::default(),
        }
    }
}

impl CheckoutForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a field value, applying the input mask for card fields.
    pub fn set(&mut self, field: Field, value: &str) {
        let value = match field {
            Field::CardNumber => masks::card_number(value),
            Field::CardExpiry => masks::card_expiry(value),
            Field::CardCvv => masks::card_cvv(value),
            _ => value.to_string(),
        };

        *self.slot(field) = value;
    }

    /// Current display value of a field.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FullName => &self.full_name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Address => &self.address,
            Field::City => &self.city,
            Field::State => &self.state,
            Field::Zip => &self.zip,
            Field::Country => &self.country,
            Field::CardNumber => &self.card_number,
            Field::CardExpiry => &self.card_expiry,
            Field::CardCvv => &self.card_cvv,
            Field::CardHolderName => &self.card_holder_name,
        }
    }

    pub fn product_line(&self) -> ProductLine {
        self.product_line
    }

    pub fn select_line(&mut self, line: ProductLine) {
        self.product_line = line;
    }

    pub fn billing(&self) -> Billing {
        Billing {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            zip: self.zip.clone(),
            country: self.country.clone(),
        }
    }

    /// Name on the card, falling back to the billing name when left blank.
    pub fn card_holder_name(&self) -> &str {
        if self.card_holder_name.trim().is_empty() {
            &self.full_name
        } else {
            &self.card_holder_name
        }
    }

    /// Card data for the processor, unmasked.
    pub fn card_data(&self) -> CardData {
        CardData {
            card_number: masks::card_number_digits(&self.card_number),
            card_expiry: masks::expiry_digits(&self.card_expiry),
            card_cvv: self.card_cvv.clone(),
            card_holder_name: self.card_holder_name().to_string(),
            card_holder_address: non_empty(&self.address),
            card_holder_postal_code: non_empty(&self.zip),
        }
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::FullName => &mut self.full_name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Address => &mut self.address,
            Field::City => &mut self.city,
            Field::State => &mut self.state,
            Field::Zip => &mut self.zip,
            Field::Country => &mut self.country,
            Field::CardNumber => &mut self.card_number,
            Field::CardExpiry => &mut self.card_expiry,
            Field::CardCvv => &mut self.card_cvv,
            Field::CardHolderName => &mut self.card_holder_name,
        }
    }
}

impl Debug for CheckoutForm {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CheckoutForm")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("country", &self.country)
            .field("product_line", &self.product_line)
            .finish_non_exhaustive()
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();

    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
