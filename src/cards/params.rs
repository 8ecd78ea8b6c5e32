//! Opaque ability parameters.
//!
//! Abilities carry a small key/value map whose meaning depends on the
//! ability kind (`class` + `thresholds` for a set bonus, `fallback_strength`
//! for an overpowering unit, ...). The entity model stores them verbatim;
//! the battle and scoring engines interpret them.
//!
//! ## ParamValue Types
//!
//! - `Int`: whole numbers (strengths, VP amounts)
//! - `Float`: fractional values
//! - `Bool`: flags
//! - `Text`: identifiers such as a category key
//! - `Thresholds`: count → value tables (set bonuses)
//!
//! ## Wire format
//!
//! Human-readable formats carry plain values (`"mining"`, `15`,
//! `{"2": 1, "3": 3}`), the shape prize records are exchanged in. Compact
//! formats such as the bincode snapshot cannot describe themselves, so they
//! keep an explicit variant tag.

use rustc_hash::FxHashMap;
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Key for an ability parameter.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParamKey(pub String);

impl ParamKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

impl From<&str> for ParamKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ParamKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Value of an ability parameter.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    /// Threshold table, ordered by threshold.
    Thresholds(BTreeMap<u32, i64>),
}

impl ParamValue {
    /// Integer view. Floats are not truncated.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_thresholds(&self) -> Option<&BTreeMap<u32, i64>> {
        match self {
            ParamValue::Thresholds(t) => Some(t),
            _ => None,
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Int(i64::from(v))
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<BTreeMap<u32, i64>> for ParamValue {
    fn from(v: BTreeMap<u32, i64>) -> Self {
        ParamValue::Thresholds(v)
    }
}

#[derive(Serialize)]
enum TaggedRef<'a> {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(&'a str),
    Thresholds(&'a BTreeMap<u32, i64>),
}

#[derive(Deserialize)]
enum Tagged {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Thresholds(BTreeMap<u32, i64>),
}

impl From<Tagged> for ParamValue {
    fn from(tagged: Tagged) -> Self {
        match tagged {
            Tagged::Int(v) => ParamValue::Int(v),
            Tagged::Float(v) => ParamValue::Float(v),
            Tagged::Bool(v) => ParamValue::Bool(v),
            Tagged::Text(v) => ParamValue::Text(v),
            Tagged::Thresholds(v) => ParamValue::Thresholds(v),
        }
    }
}

impl Serialize for ParamValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if !serializer.is_human_readable() {
            let tagged = match self {
                ParamValue::Int(v) => TaggedRef::Int(*v),
                ParamValue::Float(v) => TaggedRef::Float(*v),
                ParamValue::Bool(v) => TaggedRef::Bool(*v),
                ParamValue::Text(v) => TaggedRef::Text(v),
                ParamValue::Thresholds(v) => TaggedRef::Thresholds(v),
            };
            return tagged.serialize(serializer);
        }

        match self {
            ParamValue::Int(v) => serializer.serialize_i64(*v),
            ParamValue::Float(v) => serializer.serialize_f64(*v),
            ParamValue::Bool(v) => serializer.serialize_bool(*v),
            ParamValue::Text(v) => serializer.serialize_str(v),
            // Count keys are written as strings, as JSON object keys must be
            ParamValue::Thresholds(table) => {
                serializer.collect_map(table.iter().map(|(count, bonus)| (count.to_string(), bonus)))
            }
        }
    }
}

impl<'de> Deserialize<'de> for ParamValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            deserializer.deserialize_any(PlainValueVisitor)
        } else {
            Tagged::deserialize(deserializer).map(ParamValue::from)
        }
    }
}

struct PlainValueVisitor;

impl<'de> Visitor<'de> for PlainValueVisitor {
    type Value = ParamValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number, boolean, string or threshold table")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<ParamValue, E> {
        Ok(ParamValue::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<ParamValue, E> {
        Ok(ParamValue::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<ParamValue, E> {
        i64::try_from(v)
            .map(ParamValue::Int)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<ParamValue, E> {
        Ok(ParamValue::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<ParamValue, E> {
        Ok(ParamValue::Text(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<ParamValue, E> {
        Ok(ParamValue::Text(v))
    }

    fn visit_map<A>(self, mut access: A) -> Result<ParamValue, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut table = BTreeMap::new();
        while let Some((key, bonus)) = access.next_entry::<String, i64>()? {
            let count = key.parse::<u32>().map_err(|_| {
                <A::Error as de::Error>::invalid_value(de::Unexpected::Str(&key), &"a threshold count")
            })?;
            table.insert(count, bonus);
        }
        Ok(ParamValue::Thresholds(table))
    }

    /// A plain list is a threshold table keyed by position.
    fn visit_seq<A>(self, mut seq: A) -> Result<ParamValue, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut table = BTreeMap::new();
        while let Some(bonus) = seq.next_element::<i64>()? {
            let count = u32::try_from(table.len())
                .map_err(|_| <A::Error as de::Error>::custom("threshold table too long"))?;
            table.insert(count, bonus);
        }
        Ok(ParamValue::Thresholds(table))
    }
}

/// Collection of parameters attached to one ability.
pub type Params = FxHashMap<ParamKey, ParamValue>;
