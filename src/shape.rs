//! Type Shape Detection
//!
//! Classifies a sub-schema into the shape the renderer prints. This is pure
//! pattern detection over the raw JSON; display decisions live in `spec`.
//!
//! Precedence is fixed and mirrors the order of the variants: a schema with
//! both `const` and `type` is a `Const`, one with `$ref` and `anyOf` is a
//! `Ref`, and so on.

use serde_json::Value;

/// Keywords that constrain a schema in ways the renderer does not display.
/// A mapping carrying one of these but nothing recognised is `Unknown`.
const UNSUPPORTED_KEYWORDS: &[&str] = &[
    "not", "if", "then", "else", "prefixItems", "dependentSchemas", "patternProperties",
];

/// Detected shape of a type expression
#[derive(Debug, Clone, PartialEq)]
pub enum TypeShape<'a> {
    /// `{"const": ...}`
    Const(&'a Value),

    /// `{"enum": [...]}`
    Enum(&'a [Value]),

    /// `{"$ref": "#/$defs/..."}`
    Ref(&'a str),

    /// `{"anyOf": [...]}` or `{"oneOf": [...]}`
    Union(&'a [Value]),

    /// `{"allOf": [...]}`
    Intersection(&'a [Value]),

    /// `{"type": ["string", "null"]}`
    Scalars(Vec<&'a str>),

    /// `{"type": "array"}` with optional `items`, or bare `{"items": ...}`
    Array { items: Option<&'a Value> },

    /// `{"type": "string"}` and other single type names
    Scalar(&'a str),

    /// Mapping without any type keyword
    Untyped,

    /// Not classifiable (boolean schema, malformed keyword, unsupported keyword)
    Unknown { reason: String },
}

impl TypeShape<'_> {
    pub fn is_unknown(&self) -> bool {
        matches!(self, TypeShape::Unknown { .. })
    }
}

fn unknown<'a>(reason: impl Into<String>) -> TypeShape<'a> {
    TypeShape::Unknown { reason: reason.into() }
}

/// Detect the shape of a single sub-schema
pub fn detect_type_shape(schema: &Value) -> TypeShape<'_> {
    let obj = match schema {
        Value::Object(obj) => obj,
        Value::Bool(b) => return unknown(format!("boolean schema `{}`", b)),
        other => return unknown(format!("expected an object schema, found `{}`", other)),
    };

    if let Some(value) = obj.get("const") {
        return TypeShape::Const(value);
    }

    if let Some(values) = obj.get("enum") {
        return match values.as_array() {
            Some(values) => TypeShape::Enum(values),
            None => unknown("`enum` is not an array"),
        };
    }

    if let Some(target) = obj.get("$ref") {
        return match target.as_str() {
            Some(target) => TypeShape::Ref(target),
            None => unknown("`$ref` is not a string"),
        };
    }

    for union_key in ["anyOf", "oneOf"] {
        if let Some(options) = obj.get(union_key) {
            return match options.as_array() {
                Some(options) => TypeShape::Union(options),
                None => unknown(format!("`{}` is not an array", union_key)),
            };
        }
    }

    if let Some(parts) = obj.get("allOf") {
        return match parts.as_array() {
            Some(parts) => TypeShape::Intersection(parts),
            None => unknown("`allOf` is not an array"),
        };
    }

    match obj.get("type") {
        Some(Value::Array(names)) => {
            let names: Option<Vec<&str>> = names.iter().map(Value::as_str).collect();
            return match names {
                Some(names) => TypeShape::Scalars(names),
                None => unknown("`type` list contains a non-string"),
            };
        }
        Some(Value::String(name)) if name == "array" => {
            return TypeShape::Array { items: obj.get("items") };
        }
        Some(Value::String(name)) if !name.is_empty() => {
            return TypeShape::Scalar(name);
        }
        Some(Value::String(_)) | Some(Value::Null) | None => {}
        Some(other) => return unknown(format!("`type` has unexpected value `{}`", other)),
    }

    if let Some(items) = obj.get("items") {
        return TypeShape::Array { items: Some(items) };
    }

    if let Some(keyword) = UNSUPPORTED_KEYWORDS.iter().find(|k| obj.contains_key(**k)) {
        return unknown(format!("unsupported keyword `{}`", keyword));
    }

    TypeShape::Untyped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_const_wins_over_type() {
        let schema = json!({"type": "string", "const": "2024.7.1"});
        assert_eq!(detect_type_shape(&schema), TypeShape::Const(&json!("2024.7.1")));
    }

    #[test]
    fn test_enum_detection() {
        let schema = json!({"type": "string", "enum": ["point", "curve"]});
        match detect_type_shape(&schema) {
            TypeShape::Enum(values) => assert_eq!(values, &[json!("point"), json!("curve")]),
            other => panic!("Expected Enum, got {:?}", other),
        }
    }

    #[test]
    fn test_ref_wins_over_union() {
        let schema = json!({"$ref": "#/$defs/types/unit", "anyOf": [{"type": "string"}]});
        assert_eq!(detect_type_shape(&schema), TypeShape::Ref("#/$defs/types/unit"));
    }

    #[test]
    fn test_one_of_is_union() {
        let schema = json!({"oneOf": [{"type": "string"}, {"type": "null"}]});
        assert!(matches!(detect_type_shape(&schema), TypeShape::Union(opts) if opts.len() == 2));
    }

    #[test]
    fn test_all_of_is_intersection() {
        let schema = json!({"allOf": [{"$ref": "#/$defs/types/unit"}, {"type": "object"}]});
        assert!(matches!(detect_type_shape(&schema), TypeShape::Intersection(parts) if parts.len() == 2));
    }

    #[test]
    fn test_type_list() {
        let schema = json!({"type": ["string", "null"]});
        assert_eq!(detect_type_shape(&schema), TypeShape::Scalars(vec!["string", "null"]));
    }

    #[test]
    fn test_arrays() {
        let typed = json!({"type": "array", "items": {"type": "number"}});
        assert_eq!(
            detect_type_shape(&typed),
            TypeShape::Array { items: Some(&json!({"type": "number"})) }
        );

        let bare = json!({"type": "array"});
        assert_eq!(detect_type_shape(&bare), TypeShape::Array { items: None });

        let untyped_items = json!({"items": {"type": "string"}});
        assert!(matches!(detect_type_shape(&untyped_items), TypeShape::Array { items: Some(_) }));
    }

    #[test]
    fn test_untyped_fallback() {
        assert_eq!(detect_type_shape(&json!({"description": "free"})), TypeShape::Untyped);
        assert_eq!(detect_type_shape(&json!({})), TypeShape::Untyped);
    }

    #[test]
    fn test_unknown_shapes() {
        assert!(detect_type_shape(&json!(true)).is_unknown());
        assert!(detect_type_shape(&json!("string")).is_unknown());
        assert!(detect_type_shape(&json!({"enum": "a"})).is_unknown());
        assert!(detect_type_shape(&json!({"type": [1, 2]})).is_unknown());
        assert!(detect_type_shape(&json!({"not": {"type": "null"}})).is_unknown());
    }
}
