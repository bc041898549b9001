//! Data model for the assembly metadata export, format-agnostic.
//!
//! One JSON document per assembly, produced by an external exporter.
//! Everything the generator renders comes through these types; nothing in
//! this module touches the filesystem.

use anyhow::{bail, Result};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Export format version this build understands.
pub const FORMAT_VERSION: u32 = 1;

/// Top-level metadata export: format version plus one assembly.
#[derive(Debug, Clone, Deserialize)]
pub struct MetadataFile {
    /// Must match [`FORMAT_VERSION`]; checked before generation starts.
    #[serde(default)]
    pub format: u32,
    pub assembly: Assembly,
}

impl MetadataFile {
    /// Check the invariants generation depends on. A failure here is fatal
    /// for the whole run; there is no per-type recovery.
    pub fn validate(&self) -> Result<()> {
        if self.format != FORMAT_VERSION {
            bail!(
                "unsupported metadata format version {} (expected {})",
                self.format,
                FORMAT_VERSION
            );
        }
        if self.assembly.name.trim().is_empty() {
            bail!("metadata export has an empty assembly name");
        }
        Ok(())
    }
}

/// A compiled assembly: its name and its types in declaration order.
#[derive(Debug, Clone, Deserialize)]
pub struct Assembly {
    pub name: String,
    #[serde(default)]
    pub types: Vec<TypeDef>,
}

/// Access level of a type or member as the exporter recorded it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Protected,
    Internal,
    Private,
}

impl Visibility {
    /// Whether this level appears in generated documentation.
    pub fn is_documented(self) -> bool {
        matches!(self, Visibility::Public | Visibility::Protected)
    }

    /// Source keyword for syntax lines.
    pub fn keyword(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Internal => "internal",
            Visibility::Private => "private",
        }
    }
}

/// Kind of a documented type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
}

impl TypeKind {
    /// Source keyword for syntax lines.
    pub fn keyword(self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Struct => "struct",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
            TypeKind::Delegate => "delegate",
        }
    }

    /// Enums and delegates get no per-member documents.
    pub fn splits_members(self) -> bool {
        !matches!(self, TypeKind::Enum | TypeKind::Delegate)
    }

    /// Value types never show a base type in syntax lines.
    pub fn is_value_type(self) -> bool {
        matches!(self, TypeKind::Struct | TypeKind::Enum)
    }
}

/// A type as referenced from a signature: the raw metadata name plus
/// generic arguments. `name` may carry a compiler arity marker
/// (`` List`1 ``) and/or a trailing `&` by-reference marker.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TypeRef {
    pub name: String,
    #[serde(default)]
    pub args: Vec<TypeRef>,
}

impl TypeRef {
    pub fn named(name: &str) -> Self {
        TypeRef {
            name: name.to_string(),
            args: Vec::new(),
        }
    }
}

/// One documented type declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct TypeDef {
    #[serde(default)]
    pub namespace: String,
    /// Raw metadata name, possibly with an arity marker (`` Cache`2 ``).
    pub name: String,
    pub kind: TypeKind,
    pub visibility: Visibility,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_sealed: bool,
    /// Generic parameter names, declaration order.
    #[serde(default)]
    pub generic_params: Vec<String>,
    #[serde(default)]
    pub base: Option<TypeRef>,
    #[serde(default)]
    pub interfaces: Vec<TypeRef>,
    /// Custom attribute types attached to the declaration.
    #[serde(default)]
    pub attributes: Vec<TypeRef>,
    /// Top-level documentation-comment elements (summary, remarks, ...).
    #[serde(default)]
    pub doc: Vec<DocNode>,
    #[serde(default)]
    pub members: Vec<MemberDef>,
}

impl TypeDef {
    /// Reference form of this definition, with the generic parameters as
    /// arguments, for display-name rendering.
    pub fn type_ref(&self) -> TypeRef {
        TypeRef {
            name: self.name.clone(),
            args: self
                .generic_params
                .iter()
                .map(|p| TypeRef::named(p))
                .collect(),
        }
    }
}

/// One member of a type. The export tags each entry with its kind:
/// `{"kind": "method", ...}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MemberDef {
    Constructor(CtorDef),
    Field(FieldDef),
    Property(PropertyDef),
    Method(MethodDef),
    Event(EventDef),
}

impl MemberDef {
    pub fn name(&self) -> &str {
        match self {
            MemberDef::Constructor(c) => &c.name,
            MemberDef::Field(f) => &f.name,
            MemberDef::Property(p) => &p.name,
            MemberDef::Method(m) => &m.name,
            MemberDef::Event(e) => &e.name,
        }
    }

    pub fn is_static(&self) -> bool {
        match self {
            MemberDef::Constructor(c) => c.is_static,
            MemberDef::Field(f) => f.is_static,
            MemberDef::Property(p) => p.is_static,
            MemberDef::Method(m) => m.is_static,
            MemberDef::Event(e) => e.is_static,
        }
    }

    pub fn doc(&self) -> &[DocNode] {
        match self {
            MemberDef::Constructor(c) => &c.doc,
            MemberDef::Field(f) => &f.doc,
            MemberDef::Property(p) => &p.doc,
            MemberDef::Method(m) => &m.doc,
            MemberDef::Event(e) => &e.doc,
        }
    }

    pub fn attributes(&self) -> &[TypeRef] {
        match self {
            MemberDef::Constructor(c) => &c.attributes,
            MemberDef::Field(f) => &f.attributes,
            MemberDef::Property(p) => &p.attributes,
            MemberDef::Method(m) => &m.attributes,
            MemberDef::Event(e) => &e.attributes,
        }
    }

    /// Cross-reference key prefix for this member kind. Constructors share
    /// the method prefix, as in documentation-comment keys.
    pub fn cref_prefix(&self) -> char {
        match self {
            MemberDef::Constructor(_) | MemberDef::Method(_) => 'M',
            MemberDef::Property(_) => 'P',
            MemberDef::Field(_) => 'F',
            MemberDef::Event(_) => 'E',
        }
    }
}

/// Constructor. Collected unfiltered apart from the static type
/// initializer, which is never documented.
#[derive(Debug, Clone, Deserialize)]
pub struct CtorDef {
    /// Display name chosen by the exporter (conventionally the simple
    /// type name).
    pub name: String,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default)]
    pub attributes: Vec<TypeRef>,
    #[serde(default)]
    pub doc: Vec<DocNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub visibility: Visibility,
    #[serde(rename = "type")]
    pub field_type: TypeRef,
    #[serde(default)]
    pub is_static: bool,
    /// Immutable after construction (readonly or const).
    #[serde(default)]
    pub is_readonly: bool,
    /// Compiler-reserved name (for example an enum's backing field).
    #[serde(default)]
    pub special_name: bool,
    #[serde(default)]
    pub attributes: Vec<TypeRef>,
    #[serde(default)]
    pub doc: Vec<DocNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PropertyDef {
    pub name: String,
    #[serde(rename = "type")]
    pub property_type: TypeRef,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub special_name: bool,
    /// Getter access level; absent when the property has no getter.
    #[serde(default)]
    pub getter: Option<Visibility>,
    /// Setter access level; absent when the property has no setter.
    #[serde(default)]
    pub setter: Option<Visibility>,
    #[serde(default)]
    pub attributes: Vec<TypeRef>,
    #[serde(default)]
    pub doc: Vec<DocNode>,
}

impl PropertyDef {
    /// Readable through a documented (public or protected) getter.
    pub fn is_readable(&self) -> bool {
        self.getter.is_some_and(Visibility::is_documented)
    }

    /// Writable through a documented setter.
    pub fn is_writable(&self) -> bool {
        self.setter.is_some_and(Visibility::is_documented)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MethodDef {
    pub name: String,
    pub visibility: Visibility,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_abstract: bool,
    /// Overridable: virtual and not sealed.
    #[serde(default)]
    pub is_virtual: bool,
    /// Compiler-reserved name (accessors, operators).
    #[serde(default)]
    pub special_name: bool,
    /// Generic parameter names, declaration order.
    #[serde(default)]
    pub generic_params: Vec<String>,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default)]
    pub attributes: Vec<TypeRef>,
    #[serde(default)]
    pub doc: Vec<DocNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventDef {
    pub name: String,
    pub visibility: Visibility,
    #[serde(rename = "type")]
    pub handler_type: TypeRef,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub special_name: bool,
    #[serde(default)]
    pub attributes: Vec<TypeRef>,
    #[serde(default)]
    pub doc: Vec<DocNode>,
}

/// One formal parameter.
#[derive(Debug, Clone, Deserialize)]
pub struct Param {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: TypeRef,
    /// By-reference direction, when passed by reference.
    #[serde(default)]
    pub by_ref: Option<RefKind>,
    /// Variable-length argument list.
    #[serde(default)]
    pub is_params: bool,
    /// Default value. Present (possibly null) only for optional
    /// parameters; see [`some_if_present`].
    #[serde(default, deserialize_with = "some_if_present")]
    pub default: Option<DefaultValue>,
}

/// By-reference direction of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefKind {
    Out,
    In,
    Ref,
}

impl RefKind {
    pub fn keyword(self) -> &'static str {
        match self {
            RefKind::Out => "out",
            RefKind::In => "in",
            RefKind::Ref => "ref",
        }
    }
}

/// Default value of an optional parameter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl fmt::Display for DefaultValue {
    /// Textual form used after `=` in signatures: the literal token `null`,
    /// strings double-quoted, everything else verbatim.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Null => f.write_str("null"),
            DefaultValue::Bool(b) => write!(f, "{b}"),
            DefaultValue::Int(i) => write!(f, "{i}"),
            DefaultValue::Float(x) => write!(f, "{x}"),
            DefaultValue::Str(s) => write!(f, "\"{s}\""),
        }
    }
}

/// Deserialize a present field as `Some` even when its value is JSON null.
/// Plain `Option` would fold `"default": null` into "no default", losing
/// the distinction between a required parameter and a null default.
fn some_if_present<'de, T, D>(de: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(de).map(Some)
}

/// One node of a documentation-comment tree: plain text or a tagged
/// element with optional attributes and children.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DocNode {
    Text(String),
    Element(DocElement),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DocElement {
    pub tag: String,
    /// `name` attribute (paramref).
    #[serde(default)]
    pub name: Option<String>,
    /// `cref` attribute (see).
    #[serde(default)]
    pub cref: Option<String>,
    #[serde(default)]
    pub children: Vec<DocNode>,
}

impl DocNode {
    /// Reconstructed source of the node, used when a tag has no special
    /// rendering and degrades to literal text.
    pub fn source_text(&self) -> String {
        match self {
            DocNode::Text(t) => t.clone(),
            DocNode::Element(el) => el.source_text(),
        }
    }
}

impl DocElement {
    pub fn source_text(&self) -> String {
        let mut out = String::from("<");
        out.push_str(&self.tag);
        if let Some(ref name) = self.name {
            out.push_str(&format!(" name=\"{name}\""));
        }
        if let Some(ref cref) = self.cref {
            out.push_str(&format!(" cref=\"{cref}\""));
        }
        if self.children.is_empty() {
            out.push_str(" />");
            return out;
        }
        out.push('>');
        for child in &self.children {
            out.push_str(&child.source_text());
        }
        out.push_str(&format!("</{}>", self.tag));
        out
    }
}

/// First top-level element with the given tag, if any.
pub fn find_section<'a>(nodes: &'a [DocNode], tag: &str) -> Option<&'a DocElement> {
    nodes.iter().find_map(|n| match n {
        DocNode::Element(el) if el.tag == tag => Some(el),
        _ => None,
    })
}
