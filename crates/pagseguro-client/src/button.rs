//! # Checkout Button
//!
//! Renders the gateway's redirect checkout form (a "payment button"): a
//! `<form>` of hidden fields carrying the merchant credentials, the merchant
//! reference, the optional buyer record, and the cart line items, submitted
//! to `https://{host}/v2/checkout/payment.html`.
//!
//! All interpolated values are HTML-attribute-escaped by the askama template.
//! The legacy bindings concatenated values raw; that was an injection defect,
//! not behavior worth keeping.

use crate::config::Config;
use askama::Template;
use pagseguro_core::{Cart, Customer, Error, Item, Result};
use tracing::debug;

/// One hidden form field
struct FormField {
    name: String,
    value: String,
}

impl FormField {
    fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Template)]
#[template(path = "checkout_button.html")]
struct ButtonTemplate<'a> {
    action: String,
    receiver_email: &'a str,
    reference: &'a str,
    fields: &'a [FormField],
    button_image: &'a str,
}

/// Assembles one checkout form from credentials, reference, buyer and cart.
///
/// All inputs are taken up front; [`CheckoutButton::render`] validates and
/// produces the final markup, so there is no setter-ordering to get wrong.
#[derive(Debug, Clone)]
pub struct CheckoutButton {
    config: Config,
    reference: String,
    customer: Option<Customer>,
    cart: Cart,
}

impl CheckoutButton {
    /// Start a checkout button for the given account and merchant reference
    pub fn new(config: &Config, reference: impl Into<String>) -> Self {
        Self {
            config: config.clone(),
            reference: reference.into(),
            customer: None,
            cart: Cart::new(),
        }
    }

    /// Builder: attach the buyer record
    pub fn with_customer(mut self, customer: Customer) -> Self {
        self.customer = Some(customer);
        self
    }

    /// Builder: add a single line item
    pub fn with_item(mut self, item: Item) -> Self {
        self.cart.add(item);
        self
    }

    /// Builder: replace the cart wholesale
    pub fn with_cart(mut self, cart: Cart) -> Self {
        self.cart = cart;
        self
    }

    /// Render the checkout form markup.
    ///
    /// Fails with [`Error::Validation`] when the reference is blank or the
    /// cart has no items; a button with zero items is invalid.
    pub fn render(&self) -> Result<String> {
        if self.reference.trim().is_empty() {
            return Err(Error::Validation(
                "checkout reference must not be blank".to_string(),
            ));
        }
        if self.cart.is_empty() {
            return Err(Error::Validation(
                "checkout cart must contain at least one item".to_string(),
            ));
        }

        let mut fields = Vec::new();
        if let Some(customer) = &self.customer {
            fields.extend(customer_fields(customer));
        }
        fields.extend(item_fields(&self.cart));

        debug!(
            reference = %self.reference,
            items = self.cart.len(),
            "rendering checkout button"
        );

        let template = ButtonTemplate {
            action: self.config.checkout_url(),
            receiver_email: &self.config.email,
            reference: &self.reference,
            fields: &fields,
            button_image: &self.config.button_image_url,
        };
        template.render().map_err(|e| Error::Render(e.to_string()))
    }
}

/// One hidden field per non-empty buyer attribute, in the gateway's
/// documented order. `shippingType` is numeric and always present.
fn customer_fields(customer: &Customer) -> Vec<FormField> {
    let shipping_type = customer.shipping_type.code().to_string();
    let pairs: [(&str, &str); 13] = [
        ("senderName", &customer.name),
        ("senderAreaCode", &customer.area_code),
        ("senderPhone", &customer.phone),
        ("senderEmail", &customer.email),
        ("shippingType", &shipping_type),
        ("shippingAddressPostalCode", &customer.postal_code),
        ("shippingAddressStreet", &customer.street),
        ("shippingAddressNumber", &customer.number),
        ("shippingAddressComplement", &customer.complement),
        ("shippingAddressDistrict", &customer.district),
        ("shippingAddressCity", &customer.city),
        ("shippingAddressState", &customer.state),
        ("shippingAddressCountry", &customer.country),
    ];

    pairs
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(name, value)| FormField::new(*name, *value))
        .collect()
}

/// Five hidden fields per line item, 1-indexed in cart order
fn item_fields(cart: &Cart) -> Vec<FormField> {
    let mut fields = Vec::with_capacity(cart.len() * 5);
    for (index, item) in cart.items().iter().enumerate() {
        let n = index + 1;
        fields.push(FormField::new(format!("itemId{n}"), item.id.clone()));
        fields.push(FormField::new(
            format!("itemDescription{n}"),
            item.description.clone(),
        ));
        fields.push(FormField::new(
            format!("itemAmount{n}"),
            item.amount.formatted(),
        ));
        fields.push(FormField::new(
            format!("itemQuantity{n}"),
            item.quantity.to_string(),
        ));
        fields.push(FormField::new(
            format!("itemWeight{n}"),
            item.weight_kg.to_string(),
        ));
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;
    use pagseguro_core::Amount;
    use serde_json::json;

    fn sandbox_config() -> Config {
        Config::new("m@x.com", "T1", Environment::Sandbox).unwrap()
    }

    #[test]
    fn test_render_sandbox_checkout_form() {
        let cart = Cart::from_raw(&json!([{
            "id": 1,
            "descricao": "Widget",
            "valor": "10.00",
            "quantidade": "2",
            "peso": "0.5",
        }]))
        .unwrap();

        let html = CheckoutButton::new(&sandbox_config(), "107")
            .with_cart(cart)
            .render()
            .unwrap();

        assert!(html.contains(
            "action=\"https://sandbox.pagseguro.uol.com.br/v2/checkout/payment.html\""
        ));
        assert!(html.contains("name=\"receiverEmail\" value=\"m@x.com\""));
        assert!(html.contains("name=\"currency\" value=\"BRL\""));
        assert!(html.contains("name=\"encoding\" value=\"UTF-8\""));
        assert!(html.contains("name=\"reference\" value=\"107\""));
        assert!(html.contains("name=\"itemId1\" value=\"1\""));
        assert!(html.contains("name=\"itemDescription1\" value=\"Widget\""));
        assert!(html.contains("name=\"itemAmount1\" value=\"10.00\""));
        assert!(html.contains("name=\"itemQuantity1\" value=\"2\""));
        assert!(html.contains("name=\"itemWeight1\" value=\"0.5\""));
        assert!(html.starts_with("<form target=\"pagseguro\" method=\"post\""));
        assert!(html.trim_end().ends_with("</form>"));
    }

    #[test]
    fn test_blank_reference_is_rejected() {
        let button = CheckoutButton::new(&sandbox_config(), "   ")
            .with_item(Item::new("1", "Widget", Amount::from_reais(10.0), 1));

        let err = button.render().unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_empty_cart_is_rejected() {
        let err = CheckoutButton::new(&sandbox_config(), "107")
            .render()
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_empty_customer_fields_are_omitted() {
        // All-empty buyer record: only the numeric shippingType survives.
        let customer = Customer {
            country: String::new(),
            ..Customer::default()
        };

        let html = CheckoutButton::new(&sandbox_config(), "107")
            .with_customer(customer)
            .with_item(Item::new("1", "Widget", Amount::from_reais(10.0), 1))
            .render()
            .unwrap();

        assert!(html.contains("name=\"shippingType\" value=\"3\""));
        assert!(!html.contains("senderName"));
        assert!(!html.contains("senderEmail"));
        assert!(!html.contains("shippingAddressCountry"));
    }

    #[test]
    fn test_customer_fields_render_in_order() {
        let customer = Customer::from_raw(&json!({
            "name": "Maria Silva",
            "tel1": "4899998-888",
            "cep": "88000-000",
            "city": "Florianópolis",
        }))
        .unwrap();

        let html = CheckoutButton::new(&sandbox_config(), "107")
            .with_customer(customer)
            .with_item(Item::new("1", "Widget", Amount::from_reais(10.0), 1))
            .render()
            .unwrap();

        assert!(html.contains("name=\"senderName\" value=\"Maria Silva\""));
        assert!(html.contains("name=\"senderAreaCode\" value=\"48\""));
        assert!(html.contains("name=\"senderPhone\" value=\"99998888\""));
        assert!(html.contains("name=\"shippingAddressPostalCode\" value=\"88000-000\""));
        assert!(html.contains("name=\"shippingAddressCountry\" value=\"BRA\""));

        let name_pos = html.find("senderName").unwrap();
        let country_pos = html.find("shippingAddressCountry").unwrap();
        let item_pos = html.find("itemId1").unwrap();
        assert!(name_pos < country_pos);
        assert!(country_pos < item_pos);
    }

    #[test]
    fn test_multi_item_cart_is_one_indexed() {
        let html = CheckoutButton::new(&sandbox_config(), "107")
            .with_item(Item::new("a", "First", Amount::from_reais(1.0), 1))
            .with_item(Item::new("b", "Second", Amount::from_reais(2.0), 3))
            .render()
            .unwrap();

        assert!(html.contains("name=\"itemId1\" value=\"a\""));
        assert!(html.contains("name=\"itemId2\" value=\"b\""));
        assert!(html.contains("name=\"itemQuantity2\" value=\"3\""));
        assert!(!html.contains("itemId0"));
    }

    #[test]
    fn test_values_are_attribute_escaped() {
        let html = CheckoutButton::new(&sandbox_config(), "107")
            .with_item(Item::new(
                "1",
                "\"><script>alert(1)</script>",
                Amount::from_reais(10.0),
                1,
            ))
            .render()
            .unwrap();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_production_form_action() {
        let config = Config::new("m@x.com", "T1", Environment::Production).unwrap();
        let html = CheckoutButton::new(&config, "107")
            .with_item(Item::new("1", "Widget", Amount::from_reais(10.0), 1))
            .render()
            .unwrap();

        assert!(html
            .contains("action=\"https://pagseguro.uol.com.br/v2/checkout/payment.html\""));
        assert!(html.contains(crate::config::DEFAULT_BUTTON_IMAGE));
    }
}
