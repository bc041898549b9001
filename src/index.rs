//! Assembly-wide documentation index: visible types in declaration order
//! plus cref lookup tables for cross-reference resolution.

use crate::model::{Assembly, MemberDef, TypeDef};
use crate::select::TypeSelection;
use std::collections::HashMap;

/// Lookup state built once per assembly. Cref keys follow the
/// documentation-comment convention: `T:Ns.Type` for types,
/// `M:`/`P:`/`F:`/`E:Ns.Type.Member` for members, raw metadata names
/// (arity markers included).
pub struct DocIndex<'a> {
    assembly: &'a Assembly,
    visible: Vec<&'a TypeDef>,
    types_by_cref: HashMap<String, &'a TypeDef>,
    members_by_cref: HashMap<String, &'a MemberDef>,
}

impl<'a> DocIndex<'a> {
    pub fn new(assembly: &'a Assembly) -> Self {
        let visible: Vec<&TypeDef> = assembly
            .types
            .iter()
            .filter(|t| t.visibility.is_documented())
            .collect();

        let mut types_by_cref: HashMap<String, &TypeDef> = HashMap::new();
        let mut members_by_cref: HashMap<String, &MemberDef> = HashMap::new();
        for &type_def in &visible {
            // First declaration wins; overloads share one member key.
            types_by_cref.entry(type_cref(type_def)).or_insert(type_def);
            for member in TypeSelection::select(type_def).members() {
                members_by_cref
                    .entry(member_cref(type_def, member))
                    .or_insert(member);
            }
        }

        DocIndex {
            assembly,
            visible,
            types_by_cref,
            members_by_cref,
        }
    }

    pub fn assembly_name(&self) -> &str {
        &self.assembly.name
    }

    /// Types to document, in the export's declaration order.
    pub fn visible_types(&self) -> &[&'a TypeDef] {
        &self.visible
    }

    /// Resolve a cref to a known type. A bare key (no `X:` prefix) retries
    /// with the type prefix.
    pub fn get_type(&self, cref: &str) -> Option<&'a TypeDef> {
        if let Some(&t) = self.types_by_cref.get(cref) {
            return Some(t);
        }
        if !has_kind_prefix(cref) {
            return self.types_by_cref.get(&format!("T:{cref}")).copied();
        }
        None
    }

    /// Resolve a cref to a known member. A bare key retries with each
    /// member-kind prefix.
    pub fn get_member(&self, cref: &str) -> Option<&'a MemberDef> {
        if let Some(&m) = self.members_by_cref.get(cref) {
            return Some(m);
        }
        if !has_kind_prefix(cref) {
            for prefix in ['M', 'P', 'F', 'E'] {
                if let Some(&m) = self.members_by_cref.get(&format!("{prefix}:{cref}")) {
                    return Some(m);
                }
            }
        }
        None
    }
}

fn has_kind_prefix(cref: &str) -> bool {
    cref.as_bytes().get(1) == Some(&b':')
}

fn qualified(type_def: &TypeDef) -> String {
    if type_def.namespace.is_empty() {
        type_def.name.clone()
    } else {
        format!("{}.{}", type_def.namespace, type_def.name)
    }
}

fn type_cref(type_def: &TypeDef) -> String {
    format!("T:{}", qualified(type_def))
}

fn member_cref(type_def: &TypeDef, member: &MemberDef) -> String {
    format!(
        "{}:{}.{}",
        member.cref_prefix(),
        qualified(type_def),
        member.name()
    )
}
