//! Deterministic output paths for generated documents.
//!
//! `<root>/<Assembly>/<Namespace>.<TypeName>.<ext>` per type,
//! `<root>/<Assembly>/<Namespace>.<TypeName>.<MemberName>.<ext>` per
//! member document. Equal logical identity always yields a byte-identical
//! path; overload groups rely on this to collapse onto one file.

use crate::model::{MemberDef, TypeDef};
use crate::signature;
use anyhow::{bail, Result};
use std::path::PathBuf;

pub struct PathResolver {
    root: PathBuf,
    extension: String,
}

impl PathResolver {
    /// The extension comes from the backend and must be non-empty ASCII
    /// alphanumeric; anything else is a configuration error.
    pub fn new(root: impl Into<PathBuf>, extension: &str) -> Result<Self> {
        if extension.is_empty() || !extension.chars().all(|c| c.is_ascii_alphanumeric()) {
            bail!("invalid output extension {:?}", extension);
        }
        Ok(PathResolver {
            root: root.into(),
            extension: extension.to_string(),
        })
    }

    /// Directory all of one assembly's documents land in. The sanitized
    /// name must be a plain child of the root: `.` and `..` would make
    /// every later write (and the pre-generation wipe) land outside it.
    pub fn assembly_root(&self, assembly: &str) -> Result<PathBuf> {
        let dir = sanitize(assembly);
        if dir.is_empty() || dir == "." || dir == ".." {
            bail!("invalid assembly directory name {:?}", assembly);
        }
        Ok(self.root.join(dir))
    }

    pub fn type_path(&self, assembly: &str, type_def: &TypeDef) -> Result<PathBuf> {
        let stem = stem(type_def, None)?;
        Ok(self
            .assembly_root(assembly)?
            .join(format!("{}.{}", sanitize(&stem), self.extension)))
    }

    pub fn member_path(
        &self,
        assembly: &str,
        type_def: &TypeDef,
        member: &MemberDef,
    ) -> Result<PathBuf> {
        let stem = stem(type_def, Some(member))?;
        Ok(self
            .assembly_root(assembly)?
            .join(format!("{}.{}", sanitize(&stem), self.extension)))
    }
}

fn stem(type_def: &TypeDef, member: Option<&MemberDef>) -> Result<String> {
    let type_name = signature::type_def_display_name(type_def);
    if type_name.is_empty() {
        bail!("type in namespace {:?} has an empty name", type_def.namespace);
    }
    let mut stem = if type_def.namespace.is_empty() {
        type_name
    } else {
        format!("{}.{}", type_def.namespace, type_name)
    };
    if let Some(member) = member {
        let member_name = signature::member_display_name(member);
        if member_name.is_empty() {
            bail!("member of type {:?} has an empty name", type_def.name);
        }
        stem.push('.');
        stem.push_str(&member_name);
    }
    Ok(stem)
}

/// Neutralize characters that are illegal in file names on at least one
/// supported platform. Generic display names hit this: `Cache<TKey|TValue>`
/// becomes `Cache-TKey-TValue-`.
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect()
}
