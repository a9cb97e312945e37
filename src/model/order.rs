//! A perishable food order.
//!
//! Orders are immutable values with no identity of their own; the Shelf Set assigns an
//! [`OrderId`] when it accepts one.
use serde::Serialize;
use std::fmt::Display;
use std::str::FromStr;

/// Temperature class of an order, and of the primary shelf that stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Temperature {
    Hot,
    Cold,
    Frozen,
}

impl Temperature {
    /// Every primary tier, in shelf order.
    pub const ALL: [Temperature; 3] = [Temperature::Hot, Temperature::Cold, Temperature::Frozen];

    /// Position of this class in [`Temperature::ALL`].
    pub fn index(self) -> usize {
        match self {
            Temperature::Hot => 0,
            Temperature::Cold => 1,
            Temperature::Frozen => 2,
        }
    }
}

impl Display for Temperature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Temperature::Hot => "hot",
            Temperature::Cold => "cold",
            Temperature::Frozen => "frozen",
        };
        f.write_str(label)
    }
}

/// Returned when a label is not one of `hot`, `cold` or `frozen`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown temperature: {0}")]
pub struct UnknownTemperature(pub String);

impl FromStr for Temperature {
    type Err = UnknownTemperature;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hot" => Ok(Temperature::Hot),
            "cold" => Ok(Temperature::Cold),
            "frozen" => Ok(Temperature::Frozen),
            _ => Err(UnknownTemperature(s.to_string())),
        }
    }
}

/// Identity assigned to an order when the Shelf Set accepts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct OrderId(pub u64);

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub name: String,
    pub temperature: Temperature,
    /// Seconds.
    pub shelf_life: u32,
    pub decay_rate: f64,
}

impl Order {
    /// Creates a new Order.
    ///
    /// # Arguments
    /// * `name` - Display name of the dish
    /// * `temperature` - Which primary shelf the order belongs on
    /// * `shelf_life` - Seconds of freshness at zero decay
    /// * `decay_rate` - Extra value lost per second of age, as a fraction of `shelf_life`
    pub fn new(
        name: impl Into<String>,
        temperature: Temperature,
        shelf_life: u32,
        decay_rate: f64,
    ) -> Self {
        Self {
            name: name.into(),
            temperature,
            shelf_life,
            decay_rate,
        }
    }
}
