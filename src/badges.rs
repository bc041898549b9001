//! Badge derivation: short modifier and attribute labels for types and
//! members, rendered as backend tokens.

use crate::model::{MemberDef, TypeDef, Visibility};
use crate::render::Backend;
use crate::signature;

/// One badge per custom attribute attached to the type declaration.
pub fn type_badges(type_def: &TypeDef) -> Vec<String> {
    type_def
        .attributes
        .iter()
        .map(signature::type_display_name)
        .collect()
}

/// Ordered badge labels for a member: scope, then modality, then
/// visibility, then attached attributes.
pub fn member_badges(member: &MemberDef) -> Vec<String> {
    let mut badges: Vec<String> = Vec::new();
    match member {
        MemberDef::Constructor(_) => {}
        MemberDef::Field(f) => {
            if f.is_static {
                badges.push("Static".to_string());
            }
            if f.is_readonly {
                badges.push("Read Only".to_string());
            }
        }
        MemberDef::Property(p) => {
            if p.is_static {
                badges.push("Static".to_string());
            }
            // Readable and writable together earn neither badge.
            if p.is_readable() && !p.is_writable() {
                badges.push("Read Only".to_string());
            } else if p.is_writable() && !p.is_readable() {
                badges.push("Write Only".to_string());
            }
        }
        MemberDef::Method(m) => {
            if m.is_static {
                badges.push("Static".to_string());
            }
            if m.is_abstract {
                badges.push("Abstract".to_string());
            } else if m.is_virtual {
                badges.push("Virtual".to_string());
            }
            if m.visibility == Visibility::Protected {
                badges.push("Protected".to_string());
            }
        }
        MemberDef::Event(e) => {
            if e.is_static {
                badges.push("Static".to_string());
            }
        }
    }
    badges.extend(member.attributes().iter().map(signature::type_display_name));
    badges
}

/// Render badges as one inline token list, or an empty string.
pub fn render_badges(backend: &dyn Backend, badges: &[String]) -> String {
    if badges.is_empty() {
        return String::new();
    }
    badges
        .iter()
        .map(|b| backend.badge(b))
        .collect::<Vec<String>>()
        .join(" ")
}
