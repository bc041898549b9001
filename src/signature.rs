//! Human-readable names and signatures for types, members, and parameters.
//!
//! Everything here is a pure function of the metadata model: no filesystem,
//! no backend, no lookup state. Formatting is total over any model value the
//! member filter lets through.

use crate::model::{MemberDef, Param, PropertyDef, TypeDef, TypeKind, TypeRef, Visibility};
use regex::Regex;
use std::sync::LazyLock;

// Compiler arity markers: `2 on generic types, ``1 on generic methods.
static RE_ARITY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`+\d+").unwrap());

/// How parameters render inside a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamStyle {
    /// `modifier Type name = default` — member document headings.
    Full,
    /// `modifier Type` — disambiguating overloads by type only.
    Compact,
}

fn strip_arity(name: &str) -> String {
    RE_ARITY.replace_all(name, "").into_owned()
}

/// Human name of a referenced type.
///
/// ``Dictionary`2`` with args `TKey`, `TValue` → `Dictionary<TKey|TValue>`.
/// Generic arguments render recursively; a trailing `&` by-reference marker
/// survives at the end of the rendered name.
pub fn type_display_name(r: &TypeRef) -> String {
    let (bare, by_ref) = match r.name.strip_suffix('&') {
        Some(stripped) => (stripped, true),
        None => (r.name.as_str(), false),
    };
    let mut out = strip_arity(bare);
    if !r.args.is_empty() {
        let args: Vec<String> = r.args.iter().map(type_display_name).collect();
        out.push('<');
        out.push_str(&args.join("|"));
        out.push('>');
    }
    if by_ref {
        out.push('&');
    }
    out
}

/// Human name of a type declaration, with its generic parameter names as
/// the bracketed list: ``Cache`2`` → `Cache<TKey|TValue>`.
pub fn type_def_display_name(t: &TypeDef) -> String {
    type_display_name(&t.type_ref())
}

/// Declaration syntax line for a type document.
///
/// `public static class Widget`, `public abstract class Repository<T> :
/// IDisposable`. The base type is omitted when it is the universal root
/// (`Object`) or the kind is a value type; interfaces always follow.
pub fn type_syntax(t: &TypeDef) -> String {
    let mut parts: Vec<String> = vec![t.visibility.keyword().to_string()];
    if t.kind == TypeKind::Class {
        if t.is_static {
            parts.push("static".to_string());
        } else {
            if t.is_abstract {
                parts.push("abstract".to_string());
            }
            if t.is_sealed {
                parts.push("sealed".to_string());
            }
        }
    }
    parts.push(t.kind.keyword().to_string());
    parts.push(type_def_display_name(t));

    let mut inherits: Vec<String> = Vec::new();
    if !t.kind.is_value_type() {
        if let Some(ref base) = t.base {
            if base.name != "Object" && base.name != "System.Object" {
                inherits.push(type_display_name(base));
            }
        }
    }
    inherits.extend(t.interfaces.iter().map(type_display_name));

    let mut line = parts.join(" ");
    if !inherits.is_empty() {
        line.push_str(" : ");
        line.push_str(&inherits.join(", "));
    }
    line
}

/// Display name of a member. Generic methods carry their parameter list:
/// `Foo<T|U>`, arity marker stripped.
pub fn member_display_name(member: &MemberDef) -> String {
    match member {
        MemberDef::Method(m) if !m.generic_params.is_empty() => {
            format!("{}<{}>", strip_arity(&m.name), m.generic_params.join("|"))
        }
        _ => strip_arity(member.name()),
    }
}

/// Signature of a member: `Name(param1, param2)` for constructors and
/// methods, the display name alone for everything else.
pub fn member_signature(member: &MemberDef, style: ParamStyle) -> String {
    let params = match member {
        MemberDef::Constructor(c) => &c.params,
        MemberDef::Method(m) => &m.params,
        _ => return member_display_name(member),
    };
    let rendered: Vec<String> = params.iter().map(|p| param_signature(p, style)).collect();
    format!("{}({})", member_display_name(member), rendered.join(", "))
}

/// One parameter. By-reference parameters get an `out`/`in`/`ref` prefix
/// with the `&` marker dropped from the type name; `params` is added for
/// variable-length lists; Full style appends the name and ` = default`
/// (null renders as the token `null`, strings double-quoted).
pub fn param_signature(param: &Param, style: ParamStyle) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(kind) = param.by_ref {
        parts.push(kind.keyword().to_string());
    }
    if param.is_params {
        parts.push("params".to_string());
    }
    let mut type_name = type_display_name(&param.param_type);
    if param.by_ref.is_some() && type_name.ends_with('&') {
        type_name.pop();
    }
    parts.push(type_name);
    if style == ParamStyle::Compact {
        return parts.join(" ");
    }
    parts.push(param.name.clone());
    let mut out = parts.join(" ");
    if let Some(ref default) = param.default {
        out.push_str(&format!(" = {default}"));
    }
    out
}

/// Property declaration: `int Count { get; protected set; }`. Accessors
/// outside the documented surface are omitted entirely; `protected` is
/// emitted only for a protected accessor, never for a public one.
pub fn property_syntax(p: &PropertyDef) -> String {
    let mut accessors: Vec<&str> = Vec::new();
    match p.getter {
        Some(Visibility::Public) => accessors.push("get;"),
        Some(Visibility::Protected) => accessors.push("protected get;"),
        _ => {}
    }
    match p.setter {
        Some(Visibility::Public) => accessors.push("set;"),
        Some(Visibility::Protected) => accessors.push("protected set;"),
        _ => {}
    }
    let name = type_display_name(&p.property_type);
    if accessors.is_empty() {
        format!("{} {} {{ }}", name, p.name)
    } else {
        format!("{} {} {{ {} }}", name, p.name, accessors.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DefaultValue, RefKind};

    fn param(name: &str, type_name: &str) -> Param {
        Param {
            name: name.to_string(),
            param_type: TypeRef::named(type_name),
            by_ref: None,
            is_params: false,
            default: None,
        }
    }

    fn method_json(json: &str) -> MemberDef {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn display_name_strips_arity() {
        let r = TypeRef {
            name: "Dictionary`2".to_string(),
            args: vec![TypeRef::named("TKey"), TypeRef::named("TValue")],
        };
        assert_eq!(type_display_name(&r), "Dictionary<TKey|TValue>");
    }

    #[test]
    fn display_name_nested_generics() {
        let r = TypeRef {
            name: "Cache`2".to_string(),
            args: vec![
                TypeRef {
                    name: "List`1".to_string(),
                    args: vec![TypeRef::named("int")],
                },
                TypeRef::named("string"),
            ],
        };
        assert_eq!(type_display_name(&r), "Cache<List<int>|string>");
    }

    #[test]
    fn display_name_keeps_by_ref_marker() {
        assert_eq!(type_display_name(&TypeRef::named("Int32&")), "Int32&");
    }

    #[test]
    fn type_syntax_static_class() {
        let t: TypeDef = serde_json::from_str(
            r#"{ "namespace": "Sample", "name": "Widget", "kind": "class",
                 "visibility": "public", "is_static": true }"#,
        )
        .unwrap();
        assert_eq!(type_syntax(&t), "public static class Widget");
    }

    #[test]
    fn type_syntax_inheritance_list() {
        let t: TypeDef = serde_json::from_str(
            r#"{ "namespace": "Sample", "name": "Repo`1", "kind": "class",
                 "visibility": "public", "is_abstract": true,
                 "generic_params": ["T"],
                 "base": { "name": "RepositoryBase" },
                 "interfaces": [ { "name": "IDisposable" } ] }"#,
        )
        .unwrap();
        assert_eq!(
            type_syntax(&t),
            "public abstract class Repo<T> : RepositoryBase, IDisposable"
        );
    }

    #[test]
    fn type_syntax_omits_object_base() {
        let t: TypeDef = serde_json::from_str(
            r#"{ "name": "Widget", "kind": "class", "visibility": "public",
                 "base": { "name": "System.Object" } }"#,
        )
        .unwrap();
        assert_eq!(type_syntax(&t), "public class Widget");
    }

    #[test]
    fn type_syntax_struct_hides_base_keeps_interfaces() {
        let t: TypeDef = serde_json::from_str(
            r#"{ "name": "Point", "kind": "struct", "visibility": "public",
                 "base": { "name": "ValueType" },
                 "interfaces": [ { "name": "IEquatable`1", "args": [ { "name": "Point" } ] } ] }"#,
        )
        .unwrap();
        assert_eq!(type_syntax(&t), "public struct Point : IEquatable<Point>");
    }

    #[test]
    fn generic_method_display_name() {
        let m = method_json(
            r#"{ "kind": "method", "name": "Foo", "visibility": "public",
                 "generic_params": ["T", "U"] }"#,
        );
        assert_eq!(member_display_name(&m), "Foo<T|U>");
    }

    #[test]
    fn method_signature_full_and_compact() {
        let m = method_json(
            r#"{ "kind": "method", "name": "Create", "visibility": "public",
                 "params": [ { "name": "count", "type": { "name": "int" } } ] }"#,
        );
        assert_eq!(member_signature(&m, ParamStyle::Full), "Create(int count)");
        assert_eq!(member_signature(&m, ParamStyle::Compact), "Create(int)");
    }

    #[test]
    fn property_signature_is_bare_name() {
        let m = method_json(
            r#"{ "kind": "property", "name": "Count", "type": { "name": "int" },
                 "getter": "public" }"#,
        );
        assert_eq!(member_signature(&m, ParamStyle::Full), "Count");
    }

    #[test]
    fn param_by_ref_strips_marker() {
        let mut p = param("value", "Int32&");
        p.by_ref = Some(RefKind::Out);
        assert_eq!(param_signature(&p, ParamStyle::Full), "out Int32 value");
        assert_eq!(param_signature(&p, ParamStyle::Compact), "out Int32");
    }

    #[test]
    fn param_params_prefix_keeps_ref_prefix() {
        let mut p = param("rest", "string[]");
        p.is_params = true;
        assert_eq!(param_signature(&p, ParamStyle::Full), "params string[] rest");
        p.by_ref = Some(RefKind::Ref);
        assert_eq!(
            param_signature(&p, ParamStyle::Full),
            "ref params string[] rest"
        );
    }

    #[test]
    fn param_defaults() {
        let mut p = param("tag", "string");
        p.default = Some(DefaultValue::Null);
        assert_eq!(param_signature(&p, ParamStyle::Full), "string tag = null");
        p.default = Some(DefaultValue::Str("x".to_string()));
        assert_eq!(param_signature(&p, ParamStyle::Full), "string tag = \"x\"");
        let mut n = param("count", "int");
        n.default = Some(DefaultValue::Int(5));
        assert_eq!(param_signature(&n, ParamStyle::Full), "int count = 5");
    }

    #[test]
    fn param_default_hidden_in_compact() {
        let mut p = param("count", "int");
        p.default = Some(DefaultValue::Int(5));
        assert_eq!(param_signature(&p, ParamStyle::Compact), "int");
    }

    #[test]
    fn property_syntax_accessor_visibility() {
        let both: PropertyDef = serde_json::from_str(
            r#"{ "name": "Name", "type": { "name": "string" },
                 "getter": "public", "setter": "public" }"#,
        )
        .unwrap();
        assert_eq!(property_syntax(&both), "string Name { get; set; }");

        let protected_set: PropertyDef = serde_json::from_str(
            r#"{ "name": "Count", "type": { "name": "int" },
                 "getter": "public", "setter": "protected" }"#,
        )
        .unwrap();
        assert_eq!(property_syntax(&protected_set), "int Count { get; protected set; }");

        let hidden_set: PropertyDef = serde_json::from_str(
            r#"{ "name": "Count", "type": { "name": "int" },
                 "getter": "public", "setter": "private" }"#,
        )
        .unwrap();
        assert_eq!(property_syntax(&hidden_set), "int Count { get; }");
    }
}
