//! Member selection: the categorized, filtered member sets of one type.
//!
//! A [`TypeSelection`] is an immutable value computed per type. Selecting a
//! second type builds a fresh value; nothing is shared between selections.

use crate::model::{MemberDef, TypeDef};

/// Methods inherited from the universal base that are never documented.
const NOISE_METHODS: [&str; 4] = ["Equals", "ToString", "GetHashCode", "Finalize"];

/// The documented members of one type, split by kind and scope.
///
/// Invariants: within each kind, instance and static lists partition the
/// documented members; every listed member passes the visibility filter.
#[derive(Debug)]
pub struct TypeSelection<'a> {
    pub type_def: &'a TypeDef,
    pub constructors: Vec<&'a MemberDef>,
    pub instance_fields: Vec<&'a MemberDef>,
    pub static_fields: Vec<&'a MemberDef>,
    pub instance_properties: Vec<&'a MemberDef>,
    pub static_properties: Vec<&'a MemberDef>,
    pub instance_methods: Vec<&'a MemberDef>,
    pub static_methods: Vec<&'a MemberDef>,
    pub instance_events: Vec<&'a MemberDef>,
    pub static_events: Vec<&'a MemberDef>,
}

impl<'a> TypeSelection<'a> {
    /// Compute the documented member sets of `type_def`.
    pub fn select(type_def: &'a TypeDef) -> Self {
        let mut selection = TypeSelection {
            type_def,
            constructors: Vec::new(),
            instance_fields: Vec::new(),
            static_fields: Vec::new(),
            instance_properties: Vec::new(),
            static_properties: Vec::new(),
            instance_methods: Vec::new(),
            static_methods: Vec::new(),
            instance_events: Vec::new(),
            static_events: Vec::new(),
        };
        for member in &type_def.members {
            if !is_documented(member) {
                continue;
            }
            let bucket = match (member, member.is_static()) {
                (MemberDef::Constructor(_), _) => &mut selection.constructors,
                (MemberDef::Field(_), false) => &mut selection.instance_fields,
                (MemberDef::Field(_), true) => &mut selection.static_fields,
                (MemberDef::Property(_), false) => &mut selection.instance_properties,
                (MemberDef::Property(_), true) => &mut selection.static_properties,
                (MemberDef::Method(_), false) => &mut selection.instance_methods,
                (MemberDef::Method(_), true) => &mut selection.static_methods,
                (MemberDef::Event(_), false) => &mut selection.instance_events,
                (MemberDef::Event(_), true) => &mut selection.static_events,
            };
            bucket.push(member);
        }
        selection
    }

    /// All documented fields, instance before static.
    pub fn fields(&self) -> Vec<&'a MemberDef> {
        concat(&self.instance_fields, &self.static_fields)
    }

    pub fn properties(&self) -> Vec<&'a MemberDef> {
        concat(&self.instance_properties, &self.static_properties)
    }

    pub fn methods(&self) -> Vec<&'a MemberDef> {
        concat(&self.instance_methods, &self.static_methods)
    }

    pub fn events(&self) -> Vec<&'a MemberDef> {
        concat(&self.instance_events, &self.static_events)
    }

    /// The flat union of every documented member, in the fixed order
    /// constructors, fields, properties, methods, events.
    pub fn members(&self) -> Vec<&'a MemberDef> {
        let mut all = self.constructors.clone();
        all.extend(self.fields());
        all.extend(self.properties());
        all.extend(self.methods());
        all.extend(self.events());
        all
    }
}

fn concat<'a>(instance: &[&'a MemberDef], statics: &[&'a MemberDef]) -> Vec<&'a MemberDef> {
    let mut all = instance.to_vec();
    all.extend_from_slice(statics);
    all
}

/// The uniform member filter: no compiler special names, protected or
/// public only, methods minus the universal-base noise, properties only
/// when their getter is visible. Constructors are kept unfiltered apart
/// from the static type initializer.
fn is_documented(member: &MemberDef) -> bool {
    match member {
        MemberDef::Constructor(c) => !c.is_static,
        MemberDef::Field(f) => !f.special_name && f.visibility.is_documented(),
        MemberDef::Property(p) => !p.special_name && p.is_readable(),
        MemberDef::Method(m) => {
            !m.special_name
                && m.visibility.is_documented()
                && !NOISE_METHODS.contains(&m.name.as_str())
        }
        MemberDef::Event(e) => !e.special_name && e.visibility.is_documented(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_type() -> TypeDef {
        serde_json::from_str(
            r#"{
                "namespace": "Sample",
                "name": "Widget",
                "kind": "class",
                "visibility": "public",
                "members": [
                    { "kind": "constructor", "name": "Widget", "visibility": "public" },
                    { "kind": "constructor", "name": "Widget", "visibility": "private",
                      "params": [ { "name": "seed", "type": { "name": "int" } } ] },
                    { "kind": "constructor", "name": "Widget", "visibility": "public",
                      "is_static": true },
                    { "kind": "field", "name": "Limit", "visibility": "public",
                      "type": { "name": "int" }, "is_static": true },
                    { "kind": "field", "name": "state", "visibility": "private",
                      "type": { "name": "int" } },
                    { "kind": "field", "name": "value__", "visibility": "public",
                      "type": { "name": "int" }, "special_name": true },
                    { "kind": "property", "name": "Count", "type": { "name": "int" },
                      "getter": "public" },
                    { "kind": "property", "name": "Secret", "type": { "name": "int" },
                      "getter": "private", "setter": "public" },
                    { "kind": "method", "name": "Run", "visibility": "public" },
                    { "kind": "method", "name": "Helper", "visibility": "internal" },
                    { "kind": "method", "name": "ToString", "visibility": "public" },
                    { "kind": "method", "name": "get_Count", "visibility": "public",
                      "special_name": true },
                    { "kind": "method", "name": "Create", "visibility": "public",
                      "is_static": true },
                    { "kind": "event", "name": "Changed", "visibility": "protected",
                      "type": { "name": "EventHandler" } }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn constructors_keep_private_drop_static() {
        let t = sample_type();
        let s = TypeSelection::select(&t);
        assert_eq!(s.constructors.len(), 2);
    }

    #[test]
    fn fields_filtered_by_visibility_and_special_name() {
        let t = sample_type();
        let s = TypeSelection::select(&t);
        assert!(s.instance_fields.is_empty());
        assert_eq!(s.static_fields.len(), 1);
        assert_eq!(s.static_fields[0].name(), "Limit");
    }

    #[test]
    fn property_requires_visible_getter() {
        let t = sample_type();
        let s = TypeSelection::select(&t);
        assert_eq!(s.instance_properties.len(), 1);
        assert_eq!(s.instance_properties[0].name(), "Count");
    }

    #[test]
    fn methods_drop_noise_and_accessors() {
        let t = sample_type();
        let s = TypeSelection::select(&t);
        let names: Vec<&str> = s.methods().iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["Run", "Create"]);
    }

    #[test]
    fn protected_event_is_documented() {
        let t = sample_type();
        let s = TypeSelection::select(&t);
        assert_eq!(s.instance_events.len(), 1);
    }

    #[test]
    fn members_union_order_and_partition() {
        let t = sample_type();
        let s = TypeSelection::select(&t);
        let all = s.members();
        // ctors, fields, properties, methods, events
        let names: Vec<&str> = all.iter().map(|m| m.name()).collect();
        assert_eq!(
            names,
            vec!["Widget", "Widget", "Limit", "Count", "Run", "Create", "Changed"]
        );
        let split = s.constructors.len()
            + s.instance_fields.len()
            + s.static_fields.len()
            + s.instance_properties.len()
            + s.static_properties.len()
            + s.instance_methods.len()
            + s.static_methods.len()
            + s.instance_events.len()
            + s.static_events.len();
        assert_eq!(split, all.len());
    }

    #[test]
    fn selections_are_independent() {
        let a = sample_type();
        let b = sample_type();
        let sa = TypeSelection::select(&a);
        let count = sa.members().len();
        let _sb = TypeSelection::select(&b);
        assert_eq!(sa.members().len(), count);
    }
}
