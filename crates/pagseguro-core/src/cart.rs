//! # Cart Types
//!
//! Line items for the checkout form. A cart is an ordered sequence of items,
//! 1-indexed when rendered into the gateway's `item*{n}` fields.
//!
//! Raw-input building is deliberately permissive: missing item fields fall
//! back to defaults instead of failing, matching how the gateway itself
//! tolerates sparse item data.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Monetary amount in centavos (the gateway only deals in BRL)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Amount {
    /// Amount in centavos (R$ 10,00 == 1000)
    pub centavos: i64,
}

impl Amount {
    /// Create an amount from centavos
    pub fn from_centavos(centavos: i64) -> Self {
        Self { centavos }
    }

    /// Create an amount from a decimal value in reais
    pub fn from_reais(reais: f64) -> Self {
        Self {
            centavos: (reais * 100.0).round() as i64,
        }
    }

    /// Gateway wire format: two decimal places, dot separator ("10.00")
    pub fn formatted(&self) -> String {
        let sign = if self.centavos < 0 { "-" } else { "" };
        let abs = self.centavos.abs();
        format!("{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.formatted())
    }
}

/// A line item in the checkout cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Merchant's item identifier
    pub id: String,

    /// Item description shown on the gateway checkout page
    pub description: String,

    /// Unit amount
    pub amount: Amount,

    /// Quantity (the gateway requires at least 1)
    pub quantity: u32,

    /// Shipping weight in kilograms
    pub weight_kg: f64,
}

impl Item {
    /// Create a new item with weight zero
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        amount: Amount,
        quantity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            amount,
            quantity,
            weight_kg: 0.0,
        }
    }

    /// Builder: set shipping weight in kilograms
    pub fn with_weight(mut self, weight_kg: f64) -> Self {
        self.weight_kg = weight_kg;
        self
    }

    /// Build an item from a loose JSON object.
    ///
    /// Accepts both canonical field names and the legacy Portuguese keys
    /// (`descricao`, `valor`, `quantidade`, `peso`). No per-field validation:
    /// absent fields take defaults.
    fn from_raw(map: &Map<String, Value>) -> Self {
        Self {
            id: raw_string(map, &["id"]),
            description: raw_string(map, &["description", "descricao"]),
            amount: raw_amount(map, &["amount", "valor"]),
            // Quantity is at least 1; negative or fractional input clamps
            // rather than rendering an invalid itemQuantity of 0.
            quantity: raw_number(map, &["quantity", "quantidade"]).map_or(1, |q| (q as u32).max(1)),
            weight_kg: raw_number(map, &["weight", "weight_kg", "peso"]).unwrap_or(0.0),
        }
    }
}

/// Ordered sequence of line items for one checkout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<Item>,
}

impl Cart {
    /// Create an empty cart
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Create a cart from an iterator of items
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    /// Build a cart from loose JSON input.
    ///
    /// A single JSON object is wrapped into a one-item cart; an array of
    /// objects becomes a multi-item cart. Anything else fails with
    /// [`Error::Validation`].
    pub fn from_raw(raw: &Value) -> Result<Self> {
        match raw {
            Value::Object(map) => Ok(Self {
                items: vec![Item::from_raw(map)],
            }),
            Value::Array(entries) => {
                let mut items = Vec::with_capacity(entries.len());
                for entry in entries {
                    let map = entry.as_object().ok_or_else(|| {
                        Error::Validation("cart entries must be JSON objects".to_string())
                    })?;
                    items.push(Item::from_raw(map));
                }
                Ok(Self { items })
            }
            _ => Err(Error::Validation(
                "cart data must be a JSON object or an array of objects".to_string(),
            )),
        }
    }

    /// Add an item to the end of the cart
    pub fn add(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Builder: add an item
    pub fn with_item(mut self, item: Item) -> Self {
        self.add(item);
        self
    }

    /// Items in cart order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Check if the cart has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of line items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Cart total across all line items
    pub fn total(&self) -> Amount {
        Amount::from_centavos(
            self.items
                .iter()
                .map(|i| i.amount.centavos * i.quantity as i64)
                .sum(),
        )
    }
}

fn raw_string(map: &Map<String, Value>, keys: &[&str]) -> String {
    for key in keys {
        match map.get(*key) {
            Some(Value::String(s)) => return s.clone(),
            Some(Value::Number(n)) => return n.to_string(),
            _ => {}
        }
    }
    String::new()
}

fn raw_number(map: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    for key in keys {
        match map.get(*key) {
            Some(Value::Number(n)) => return n.as_f64(),
            Some(Value::String(s)) => {
                if let Ok(parsed) = s.trim().parse::<f64>() {
                    return Some(parsed);
                }
            }
            _ => {}
        }
    }
    None
}

fn raw_amount(map: &Map<String, Value>, keys: &[&str]) -> Amount {
    raw_number(map, keys).map_or(Amount::default(), Amount::from_reais)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_amount_formatting() {
        assert_eq!(Amount::from_reais(10.0).formatted(), "10.00");
        assert_eq!(Amount::from_reais(0.5).formatted(), "0.50");
        assert_eq!(Amount::from_centavos(199).formatted(), "1.99");
        assert_eq!(Amount::from_centavos(5).formatted(), "0.05");
    }

    #[test]
    fn test_negative_amount_keeps_its_sign() {
        // Sub-real negatives must not lose the sign to integer division.
        assert_eq!(Amount::from_centavos(-50).formatted(), "-0.50");
        assert_eq!(Amount::from_centavos(-150).formatted(), "-1.50");
        assert_eq!(Amount::from_reais(-0.05).formatted(), "-0.05");
    }

    #[test]
    fn test_quantity_clamps_to_at_least_one() {
        let cart = Cart::from_raw(&json!([
            { "id": "a", "quantity": 0 },
            { "id": "b", "quantity": -3 },
            { "id": "c", "quantity": 2.7 },
        ]))
        .unwrap();

        assert_eq!(cart.items()[0].quantity, 1);
        assert_eq!(cart.items()[1].quantity, 1);
        assert_eq!(cart.items()[2].quantity, 2);
    }

    #[test]
    fn test_single_object_wraps_into_one_item_cart() {
        let single = json!({
            "id": 1,
            "descricao": "Widget",
            "valor": "10.00",
            "quantidade": "2",
            "peso": "0.5",
        });
        let wrapped = json!([{
            "id": 1,
            "descricao": "Widget",
            "valor": "10.00",
            "quantidade": "2",
            "peso": "0.5",
        }]);

        let from_single = Cart::from_raw(&single).unwrap();
        let from_list = Cart::from_raw(&wrapped).unwrap();

        assert_eq!(from_single, from_list);
        assert_eq!(from_single.len(), 1);

        let item = &from_single.items()[0];
        assert_eq!(item.id, "1");
        assert_eq!(item.description, "Widget");
        assert_eq!(item.amount.formatted(), "10.00");
        assert_eq!(item.quantity, 2);
        assert_eq!(item.weight_kg, 0.5);
    }

    #[test]
    fn test_multi_item_cart_preserves_order() {
        let cart = Cart::from_raw(&json!([
            { "id": "a", "description": "First", "amount": 1.0, "quantity": 1 },
            { "id": "b", "description": "Second", "amount": 2.0, "quantity": 1 },
        ]))
        .unwrap();

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.items()[0].id, "a");
        assert_eq!(cart.items()[1].id, "b");
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let cart = Cart::from_raw(&json!({ "id": "x" })).unwrap();
        let item = &cart.items()[0];
        assert_eq!(item.description, "");
        assert_eq!(item.amount, Amount::default());
        assert_eq!(item.quantity, 1);
        assert_eq!(item.weight_kg, 0.0);
    }

    #[test]
    fn test_rejects_non_list_like_input() {
        let err = Cart::from_raw(&json!("not a cart")).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let err = Cart::from_raw(&json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_cart_from_items_with_weights() {
        let cart = Cart::from_items([
            Item::new("1", "Widget", Amount::from_reais(10.0), 2).with_weight(0.5),
            Item::new("2", "Gadget", Amount::from_reais(5.0), 1),
        ]);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.items()[0].weight_kg, 0.5);
        assert_eq!(cart.items()[1].weight_kg, 0.0);
        assert_eq!(cart.total().formatted(), "25.00");
    }

    #[test]
    fn test_cart_total() {
        let cart = Cart::new()
            .with_item(Item::new("1", "Widget", Amount::from_reais(10.0), 2))
            .with_item(Item::new("2", "Gadget", Amount::from_reais(5.5), 1));

        assert_eq!(cart.total().formatted(), "25.50");
    }
}
