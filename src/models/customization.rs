use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The kind of a customization, stored as a lowercase string on the wire.
///
/// The backend accepts arbitrary strings here; the well-known kinds get
/// their own variants and anything else is carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomizationKind {
    Topping,
    Side,
    Size,
    Crust,
    Other(String),
}

impl CustomizationKind {
    pub fn as_str(&self) -> &str {
        match self {
            CustomizationKind::Topping => "topping",
            CustomizationKind::Side => "side",
            CustomizationKind::Size => "size",
            CustomizationKind::Crust => "crust",
            CustomizationKind::Other(s) => s,
        }
    }
}

impl fmt::Display for CustomizationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CustomizationKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "topping" => CustomizationKind::Topping,
            "side" => CustomizationKind::Side,
            "size" => CustomizationKind::Size,
            "crust" => CustomizationKind::Crust,
            other => CustomizationKind::Other(other.to_string()),
        })
    }
}

impl Serialize for CustomizationKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CustomizationKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        // FromStr is infallible: unknown kinds become Other.
        Ok(s.parse().unwrap_or(CustomizationKind::Other(s)))
    }
}

/// A purchasable customization (extra topping, side, size upgrade, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customization {
    pub name: String,
    pub price: f64,
    #[serde(rename = "type")]
    pub kind: CustomizationKind,
}

impl Customization {
    pub fn new(name: impl Into<String>, price: f64, kind: CustomizationKind) -> Self {
        Self {
            name: name.into(),
            price,
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display() {
        assert_eq!(format!("{}", CustomizationKind::Topping), "topping");
        assert_eq!(format!("{}", CustomizationKind::Side), "side");
        assert_eq!(format!("{}", CustomizationKind::Size), "size");
        assert_eq!(format!("{}", CustomizationKind::Crust), "crust");
        assert_eq!(
            format!("{}", CustomizationKind::Other("sauce".to_string())),
            "sauce"
        );
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!(
            "topping".parse::<CustomizationKind>().unwrap(),
            CustomizationKind::Topping
        );
        assert_eq!(
            "CRUST".parse::<CustomizationKind>().unwrap(),
            CustomizationKind::Crust
        );
        assert_eq!(
            "sauce".parse::<CustomizationKind>().unwrap(),
            CustomizationKind::Other("sauce".to_string())
        );
    }

    #[test]
    fn test_customization_wire_shape() {
        let cus = Customization::new("Extra Cheese", 1.5, CustomizationKind::Topping);
        let json = serde_json::to_value(&cus).unwrap();
        assert_eq!(json["name"], "Extra Cheese");
        assert_eq!(json["price"], 1.5);
        assert_eq!(json["type"], "topping");

        let parsed: Customization = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, cus);
    }
}
