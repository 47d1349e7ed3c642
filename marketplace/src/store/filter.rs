//! Structural filters for document queries.
//!
//! Filters use a small document-store mini-language:
//!
//! ```text
//! { "category": "finance" }                                  equality
//! { "title": { "$regex": "weather", "$options": "i" } }      regex search
//! ```
//!
//! Every condition in a filter must hold for a document to match. A [`Filter`] can be built
//! programmatically, parsed from that JSON shape, or rendered back to it. Backends either compile
//! it for in-process matching ([`Filter::compile`]) or translate it into their own query language.

use regex::{Regex, RegexBuilder};
use serde_json::{Map, Value};

use super::Document;
use super::errors::{Result, StoreError};

const REGEX_OPERATOR: &str = "$regex";
const OPTIONS_OPERATOR: &str = "$options";

/// A single condition on one field.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Field equals the value. A missing field compares equal to `null`, and numbers compare by
    /// value (`0` equals `0.0`), matching JSONB equality in PostgreSQL.
    Eq(Value),
    /// Field is a string and contains a match for `pattern`.
    Regex { pattern: String, case_insensitive: bool },
}

/// A conjunction of field conditions, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, Condition)>,
}

impl Filter {
    /// A filter that matches every document.
    pub fn all() -> Self {
        Self::default()
    }

    /// Add an equality condition.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((field.into(), Condition::Eq(value.into())));
        self
    }

    /// Add a regex condition.
    pub fn regex(mut self, field: impl Into<String>, pattern: impl Into<String>, case_insensitive: bool) -> Self {
        self.conditions.push((
            field.into(),
            Condition::Regex {
                pattern: pattern.into(),
                case_insensitive,
            },
        ));
        self
    }

    /// Add a case-insensitive literal substring condition. Regex metacharacters in `text` are
    /// escaped, so `"c++"` matches the characters `c++` rather than failing to compile.
    pub fn contains_ignore_case(self, field: impl Into<String>, text: &str) -> Self {
        self.regex(field, regex::escape(text), true)
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn conditions(&self) -> &[(String, Condition)] {
        &self.conditions
    }

    /// Render the filter in its JSON mini-language form.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        for (field, condition) in &self.conditions {
            let rendered = match condition {
                Condition::Eq(value) => value.clone(),
                Condition::Regex {
                    pattern,
                    case_insensitive,
                } => {
                    let mut op = Map::new();
                    op.insert(REGEX_OPERATOR.to_string(), Value::String(pattern.clone()));
                    op.insert(
                        OPTIONS_OPERATOR.to_string(),
                        Value::String(if *case_insensitive { "i" } else { "" }.to_string()),
                    );
                    Value::Object(op)
                }
            };
            map.insert(field.clone(), rendered);
        }
        Value::Object(map)
    }

    /// Parse a filter from its JSON mini-language form.
    ///
    /// Objects whose keys start with `$` are operator objects; only `$regex` (with optional
    /// `$options`) is supported. Any other object value is compared for equality.
    pub fn from_json(value: &Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(StoreError::InvalidFilter {
                message: "filter must be a JSON object".to_string(),
            });
        };

        let mut filter = Filter::all();
        for (field, clause) in map {
            let condition = match clause {
                Value::Object(ops) if ops.keys().any(|k| k.starts_with('$')) => parse_operator(field, ops)?,
                other => Condition::Eq(other.clone()),
            };
            filter.conditions.push((field.clone(), condition));
        }
        Ok(filter)
    }

    /// Compile regexes once so the filter can be evaluated against many documents.
    pub fn compile(&self) -> Result<CompiledFilter> {
        let conditions = self
            .conditions
            .iter()
            .map(|(field, condition)| {
                let compiled = match condition {
                    Condition::Eq(value) => Matcher::Eq(value.clone()),
                    Condition::Regex {
                        pattern,
                        case_insensitive,
                    } => {
                        let regex = RegexBuilder::new(pattern)
                            .case_insensitive(*case_insensitive)
                            .build()
                            .map_err(|e| StoreError::InvalidFilter {
                                message: format!("invalid regex for field {field}: {e}"),
                            })?;
                        Matcher::Regex(regex)
                    }
                };
                Ok((field.clone(), compiled))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(CompiledFilter { conditions })
    }
}

fn parse_operator(field: &str, ops: &Map<String, Value>) -> Result<Condition> {
    if let Some(unknown) = ops.keys().find(|k| k.as_str() != REGEX_OPERATOR && k.as_str() != OPTIONS_OPERATOR) {
        return Err(StoreError::UnknownOperator {
            field: field.to_string(),
            operator: unknown.clone(),
        });
    }

    let pattern = match ops.get(REGEX_OPERATOR) {
        Some(Value::String(pattern)) => pattern.clone(),
        Some(_) => {
            return Err(StoreError::InvalidFilter {
                message: format!("$regex on field {field} must be a string"),
            });
        }
        None => {
            return Err(StoreError::InvalidFilter {
                message: format!("$options on field {field} requires $regex"),
            });
        }
    };

    let case_insensitive = match ops.get(OPTIONS_OPERATOR) {
        None => false,
        Some(Value::String(options)) if options.is_empty() => false,
        Some(Value::String(options)) if options == "i" => true,
        Some(other) => {
            return Err(StoreError::InvalidFilter {
                message: format!("unsupported $options {other} on field {field}"),
            });
        }
    };

    Ok(Condition::Regex {
        pattern,
        case_insensitive,
    })
}

#[derive(Debug, Clone)]
enum Matcher {
    Eq(Value),
    Regex(Regex),
}

/// A filter with its regexes compiled, ready for in-process evaluation.
#[derive(Debug, Clone)]
pub struct CompiledFilter {
    conditions: Vec<(String, Matcher)>,
}

impl CompiledFilter {
    pub fn matches(&self, document: &Document) -> bool {
        self.conditions.iter().all(|(field, matcher)| match matcher {
            Matcher::Eq(expected) => json_eq(document.get(field).unwrap_or(&Value::Null), expected),
            Matcher::Regex(regex) => match document.get(field) {
                Some(Value::String(s)) => regex.is_match(s),
                _ => false,
            },
        })
    }
}

/// Structural equality with numbers compared by value.
fn json_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => match (l.as_i64(), r.as_i64()) {
            (Some(l), Some(r)) => l == r,
            _ => match (l.as_u64(), r.as_u64()) {
                (Some(l), Some(r)) => l == r,
                _ => l.as_f64() == r.as_f64(),
            },
        },
        (Value::Array(l), Value::Array(r)) => l.len() == r.len() && l.iter().zip(r).all(|(l, r)| json_eq(l, r)),
        (Value::Object(l), Value::Object(r)) => {
            l.len() == r.len() && l.iter().all(|(key, l)| r.get(key).is_some_and(|r| json_eq(l, r)))
        }
        _ => left == right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("test document must be an object"),
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let compiled = Filter::all().compile().unwrap();
        assert!(compiled.matches(&doc(json!({}))));
        assert!(compiled.matches(&doc(json!({"title": "anything"}))));
    }

    #[test]
    fn test_equality_is_exact_and_case_sensitive() {
        let compiled = Filter::all().eq("category", "finance").compile().unwrap();
        assert!(compiled.matches(&doc(json!({"category": "finance"}))));
        assert!(!compiled.matches(&doc(json!({"category": "Finance"}))));
        assert!(!compiled.matches(&doc(json!({"category": "finance-tools"}))));
        assert!(!compiled.matches(&doc(json!({"title": "no category"}))));
    }

    #[test]
    fn test_equality_on_null_matches_missing_field() {
        let compiled = Filter::all().eq("docs_url", Value::Null).compile().unwrap();
        assert!(compiled.matches(&doc(json!({"docs_url": null}))));
        assert!(compiled.matches(&doc(json!({}))));
        assert!(!compiled.matches(&doc(json!({"docs_url": "https://docs.example.com"}))));
    }

    #[test]
    fn test_equality_on_numbers_ignores_representation() {
        let compiled = Filter::all().eq("price_cents", 0).compile().unwrap();
        assert!(compiled.matches(&doc(json!({"price_cents": 0}))));
        assert!(compiled.matches(&doc(json!({"price_cents": 0.0}))));
        assert!(!compiled.matches(&doc(json!({"price_cents": 0.5}))));
        assert!(!compiled.matches(&doc(json!({"price_cents": "0"}))));

        let compiled = Filter::all().eq("features", json!([1, {"n": 2}])).compile().unwrap();
        assert!(compiled.matches(&doc(json!({"features": [1.0, {"n": 2.0}]}))));
        assert!(!compiled.matches(&doc(json!({"features": [1.0, {"n": 3}]}))));
    }

    #[test]
    fn test_equality_on_booleans() {
        let compiled = Filter::all().eq("active", true).compile().unwrap();
        assert!(compiled.matches(&doc(json!({"active": true}))));
        assert!(!compiled.matches(&doc(json!({"active": false}))));
        assert!(!compiled.matches(&doc(json!({"active": "true"}))));
    }

    #[test]
    fn test_contains_ignore_case_is_substring() {
        let compiled = Filter::all().contains_ignore_case("title", "API").compile().unwrap();
        assert!(compiled.matches(&doc(json!({"title": "Weather API"}))));
        assert!(compiled.matches(&doc(json!({"title": "api-gateway"}))));
        assert!(compiled.matches(&doc(json!({"title": "RapidApIs"}))));
        assert!(!compiled.matches(&doc(json!({"title": "Maps SDK"}))));
    }

    #[test]
    fn test_contains_ignore_case_escapes_metacharacters() {
        let compiled = Filter::all().contains_ignore_case("title", "c++ (beta)").compile().unwrap();
        assert!(compiled.matches(&doc(json!({"title": "SDK for C++ (Beta)"}))));
        assert!(!compiled.matches(&doc(json!({"title": "SDK for c (beta)"}))));
    }

    #[test]
    fn test_regex_ignores_non_string_fields() {
        let compiled = Filter::all().regex("rating", "4", false).compile().unwrap();
        assert!(!compiled.matches(&doc(json!({"rating": 4}))));
        assert!(!compiled.matches(&doc(json!({}))));
    }

    #[test]
    fn test_conditions_are_combined_with_and() {
        let compiled = Filter::all()
            .contains_ignore_case("title", "pay")
            .eq("category", "finance")
            .compile()
            .unwrap();
        assert!(compiled.matches(&doc(json!({"title": "PayFlow", "category": "finance"}))));
        assert!(!compiled.matches(&doc(json!({"title": "PayFlow", "category": "retail"}))));
        assert!(!compiled.matches(&doc(json!({"title": "Ledger", "category": "finance"}))));
    }

    #[test]
    fn test_to_json_renders_mini_language() {
        let filter = Filter::all().regex("title", "weather", true).eq("category", "finance");
        assert_eq!(
            filter.to_json(),
            json!({
                "title": {"$regex": "weather", "$options": "i"},
                "category": "finance"
            })
        );
    }

    #[test]
    fn test_from_json_parses_equality_and_regex() {
        let filter = Filter::from_json(&json!({
            "title": {"$regex": "weather", "$options": "i"},
            "category": "finance",
            "features": ["sla"]
        }))
        .unwrap();

        assert_eq!(filter.conditions().len(), 3);
        assert!(filter.conditions().contains(&(
            "title".to_string(),
            Condition::Regex {
                pattern: "weather".to_string(),
                case_insensitive: true
            }
        )));
        assert!(
            filter
                .conditions()
                .contains(&("category".to_string(), Condition::Eq(json!("finance"))))
        );
    }

    #[test]
    fn test_from_json_without_options_is_case_sensitive() {
        let filter = Filter::from_json(&json!({"title": {"$regex": "^Weather"}})).unwrap();
        let compiled = filter.compile().unwrap();
        assert!(compiled.matches(&doc(json!({"title": "Weather API"}))));
        assert!(!compiled.matches(&doc(json!({"title": "weather api"}))));
    }

    #[test]
    fn test_from_json_plain_object_is_equality() {
        let filter = Filter::from_json(&json!({"meta": {"tier": "gold"}})).unwrap();
        assert_eq!(filter.conditions()[0].1, Condition::Eq(json!({"tier": "gold"})));
    }

    #[test]
    fn test_from_json_rejects_unknown_operator() {
        let err = Filter::from_json(&json!({"rating": {"$gt": 3}})).unwrap_err();
        assert!(matches!(err, StoreError::UnknownOperator { ref operator, .. } if operator == "$gt"));
    }

    #[test]
    fn test_from_json_rejects_bad_shapes() {
        assert!(matches!(
            Filter::from_json(&json!(["title"])).unwrap_err(),
            StoreError::InvalidFilter { .. }
        ));
        assert!(matches!(
            Filter::from_json(&json!({"title": {"$regex": 5}})).unwrap_err(),
            StoreError::InvalidFilter { .. }
        ));
        assert!(matches!(
            Filter::from_json(&json!({"title": {"$options": "i"}})).unwrap_err(),
            StoreError::InvalidFilter { .. }
        ));
        assert!(matches!(
            Filter::from_json(&json!({"title": {"$regex": "a", "$options": "mx"}})).unwrap_err(),
            StoreError::InvalidFilter { .. }
        ));
    }

    #[test]
    fn test_compile_rejects_invalid_regex() {
        let err = Filter::all().regex("title", "(unclosed", false).compile().unwrap_err();
        assert!(matches!(err, StoreError::InvalidFilter { .. }));
    }
}
