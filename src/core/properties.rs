//! Game properties: the string-keyed option map a game definition declares.
//!
//! Properties carry the game-variant toggles ("WW2V3", "AI Bonus Attack")
//! that `RuleConfig::from_properties` turns into a typed configuration,
//! plus the game's identity token under [`GAME_UUID`].
//!
//! ## PropertyValue Types
//!
//! - `Int`: Numbers (dice sides, bonus offsets)
//! - `Bool`: Toggles (era rules)
//! - `Text`: Strings (identity token, notes)

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Key under which the game's identity token is stored.
pub const GAME_UUID: &str = "GAME_UUID";

/// Value for a game property.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyValue {
    /// Integer value (dice sides, bonuses).
    Int(i64),
    /// Boolean toggle.
    Bool(bool),
    /// Text value.
    Text(String),
}

impl PropertyValue {
    /// Get as integer if this is an Int value.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            PropertyValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as bool if this is a Bool value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as string reference if this is a Text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        PropertyValue::Int(v)
    }
}

impl From<i32> for PropertyValue {
    fn from(v: i32) -> Self {
        PropertyValue::Int(i64::from(v))
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        PropertyValue::Bool(v)
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        PropertyValue::Text(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        PropertyValue::Text(v.to_string())
    }
}

/// String-keyed game property map.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameProperties {
    values: FxHashMap<String, PropertyValue>,
}

impl GameProperties {
    /// Create an empty property map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Set a property (builder pattern).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Get a property value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.values.get(key)
    }

    /// Get an integer property with a default value.
    #[must_use]
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.get(key).and_then(PropertyValue::as_int).unwrap_or(default)
    }

    /// Get a boolean property with a default value.
    #[must_use]
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(PropertyValue::as_bool).unwrap_or(default)
    }

    /// Get a text property.
    #[must_use]
    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(PropertyValue::as_text)
    }

    /// The game's identity token, if one has been assigned.
    #[must_use]
    pub fn game_uuid(&self) -> Option<&str> {
        self.get_text(GAME_UUID)
    }

    /// Number of properties set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no property is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_value_accessors() {
        let val = PropertyValue::Int(5);
        assert_eq!(val.as_int(), Some(5));
        assert_eq!(val.as_bool(), None);

        let toggle = PropertyValue::Bool(true);
        assert_eq!(toggle.as_bool(), Some(true));
        assert_eq!(toggle.as_text(), None);
    }

    #[test]
    fn test_property_value_from() {
        let int: PropertyValue = 42i32.into();
        assert_eq!(int.as_int(), Some(42));

        let text: PropertyValue = "abc".into();
        assert_eq!(text.as_text(), Some("abc"));
    }

    #[test]
    fn test_properties_defaults() {
        let props = GameProperties::new()
            .with("WW2V3", true)
            .with("AI Bonus Attack", 1i32);

        assert!(props.get_bool("WW2V3", false));
        assert!(!props.get_bool("WW2V2", false));
        assert_eq!(props.get_int("AI Bonus Attack", 0), 1);
        // wrong type falls back to the default
        assert_eq!(props.get_int("WW2V3", 7), 7);
        assert_eq!(props.len(), 2);
    }

    #[test]
    fn test_game_uuid() {
        let mut props = GameProperties::new();
        assert_eq!(props.game_uuid(), None);

        props.set(GAME_UUID, "abc-123");
        assert_eq!(props.game_uuid(), Some("abc-123"));
    }
}
