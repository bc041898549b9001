//! Document generation: one type document per visible type, one member
//! document per overload group, written under the assembly's output root.
//!
//! Generation is a single sequential pass. The assembly root is wiped and
//! recreated at the start of every run, so a rerun always starts clean;
//! the first fatal error aborts the whole run.

use crate::badges;
use crate::comment::CommentRenderer;
use crate::index::DocIndex;
use crate::model::{MemberDef, TypeDef};
use crate::paths::PathResolver;
use crate::render::Backend;
use crate::select::TypeSelection;
use crate::signature::{self, ParamStyle};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Counts reported after a run.
#[derive(Debug, Default, Clone, Copy)]
pub struct Summary {
    pub types: usize,
    pub member_docs: usize,
}

pub struct Generator<'a> {
    index: &'a DocIndex<'a>,
    backend: &'a dyn Backend,
    paths: &'a PathResolver,
    comments: CommentRenderer<'a>,
}

impl<'a> Generator<'a> {
    pub fn new(index: &'a DocIndex<'a>, backend: &'a dyn Backend, paths: &'a PathResolver) -> Self {
        Generator {
            index,
            backend,
            paths,
            comments: CommentRenderer::new(index, backend),
        }
    }

    pub fn run(&self) -> Result<Summary> {
        let root = self.paths.assembly_root(self.index.assembly_name())?;
        if root.exists() {
            fs::remove_dir_all(&root)
                .with_context(|| format!("failed to remove {}", root.display()))?;
        }
        fs::create_dir_all(&root)
            .with_context(|| format!("failed to create {}", root.display()))?;

        let mut summary = Summary::default();
        for type_def in self.index.visible_types() {
            let selection = TypeSelection::select(type_def);
            let document = self.type_document(&selection)?;
            let path = self.paths.type_path(self.index.assembly_name(), type_def)?;
            write_document(&path, &document)?;
            summary.types += 1;

            // Enums and delegates keep their members on the type page.
            if !type_def.kind.splits_members() {
                continue;
            }
            for group in overload_groups(&selection) {
                let document = self.member_document(type_def, &group);
                let path =
                    self.paths
                        .member_path(self.index.assembly_name(), type_def, group[0])?;
                write_document(&path, &document)?;
                summary.member_docs += 1;
            }
        }
        Ok(summary)
    }

    fn type_document(&self, selection: &TypeSelection<'_>) -> Result<String> {
        let type_def = selection.type_def;
        let mut sections: Vec<String> = Vec::new();

        sections.push(
            self.backend
                .header(1, &signature::type_def_display_name(type_def)),
        );
        if !type_def.namespace.is_empty() {
            sections.push(self.backend.block(&format!(
                "{} {}",
                self.backend.bold("Namespace:", ""),
                self.backend.escape(&type_def.namespace)
            )));
        }
        sections.push(self.backend.block(&format!(
            "{} {}",
            self.backend.bold("Assembly:", ""),
            self.backend.italics(self.index.assembly_name(), "")
        )));

        sections.push(self.backend.code(&signature::type_syntax(type_def), "csharp"));
        let badge_line = badges::render_badges(self.backend, &badges::type_badges(type_def));
        if !badge_line.is_empty() {
            sections.push(badge_line);
        }

        if let Some(summary) = self.comments.render_section(&type_def.doc, "summary") {
            sections.push(self.backend.block(&summary));
        }
        if let Some(remarks) = self.comments.render_section(&type_def.doc, "remarks") {
            sections.push(self.backend.header(2, "Remarks"));
            sections.push(self.backend.block(&remarks));
        }
        if let Some(example) = self.comments.render_section(&type_def.doc, "example") {
            sections.push(self.backend.header(2, "Example"));
            sections.push(self.backend.block(&example));
        }

        let linked = type_def.kind.splits_members();
        self.member_table(&mut sections, "Constructors", type_def, &selection.constructors, linked)?;
        self.member_table(&mut sections, "Fields", type_def, &selection.fields(), linked)?;
        self.member_table(&mut sections, "Properties", type_def, &selection.properties(), linked)?;
        self.member_table(&mut sections, "Methods", type_def, &selection.methods(), linked)?;
        self.member_table(&mut sections, "Events", type_def, &selection.events(), linked)?;

        Ok(finish(sections))
    }

    /// One listing table per non-empty category. The left cell carries the
    /// compact signature, linked to the member document when one exists.
    fn member_table(
        &self,
        sections: &mut Vec<String>,
        title: &str,
        type_def: &TypeDef,
        members: &[&MemberDef],
        linked: bool,
    ) -> Result<()> {
        if members.is_empty() {
            return Ok(());
        }
        let mut rows: Vec<(String, String)> = Vec::new();
        for member in members {
            let label = self
                .backend
                .inline_code(&signature::member_signature(member, ParamStyle::Compact), "");
            let left = if linked {
                let target = self.member_file_name(type_def, member)?;
                self.backend.link(&label, &target)
            } else {
                label
            };
            let summary = self
                .comments
                .render_section(member.doc(), "summary")
                .unwrap_or_default();
            rows.push((left, summary));
        }
        sections.push(self.backend.table(title, "Description", &rows));
        Ok(())
    }

    fn member_document(&self, type_def: &TypeDef, group: &[&MemberDef]) -> String {
        let mut sections: Vec<String> = Vec::new();
        sections.push(self.backend.header(
            1,
            &format!(
                "{}.{}",
                signature::type_def_display_name(type_def),
                signature::member_display_name(group[0])
            ),
        ));

        for (position, member) in group.iter().enumerate() {
            if position > 0 {
                sections.push(self.backend.divider());
            }
            sections.push(
                self.backend
                    .header(2, &signature::member_signature(member, ParamStyle::Full)),
            );
            if let Some(declaration) = declaration(member) {
                sections.push(self.backend.code(&declaration, "csharp"));
            }
            let badge_line = badges::render_badges(self.backend, &badges::member_badges(member));
            if !badge_line.is_empty() {
                sections.push(badge_line);
            }
            if let Some(summary) = self.comments.render_section(member.doc(), "summary") {
                sections.push(self.backend.block(&summary));
            }
            if let Some(remarks) = self.comments.render_section(member.doc(), "remarks") {
                sections.push(self.backend.header(3, "Remarks"));
                sections.push(self.backend.block(&remarks));
            }
            if let Some(example) = self.comments.render_section(member.doc(), "example") {
                sections.push(self.backend.header(3, "Example"));
                sections.push(self.backend.block(&example));
            }
        }
        finish(sections)
    }

    /// File name of the member document a table row links to. Overloads
    /// share a display name and therefore a file, so the link is stable
    /// across the whole group.
    fn member_file_name(&self, type_def: &TypeDef, member: &MemberDef) -> Result<String> {
        let path = self
            .paths
            .member_path(self.index.assembly_name(), type_def, member)?;
        Ok(path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default())
    }
}

/// Declaration line shown in member documents for non-callable members.
fn declaration(member: &MemberDef) -> Option<String> {
    match member {
        MemberDef::Property(p) => Some(signature::property_syntax(p)),
        MemberDef::Field(f) => Some(format!(
            "{} {}",
            signature::type_display_name(&f.field_type),
            f.name
        )),
        MemberDef::Event(e) => Some(format!(
            "{} {}",
            signature::type_display_name(&e.handler_type),
            e.name
        )),
        MemberDef::Constructor(_) | MemberDef::Method(_) => None,
    }
}

/// Group the member union by display name, first-encounter order.
fn overload_groups<'a>(selection: &TypeSelection<'a>) -> Vec<Vec<&'a MemberDef>> {
    let mut groups: HashMap<String, Vec<&'a MemberDef>> = HashMap::new();
    let mut order: Vec<String> = Vec::new();
    for member in selection.members() {
        let name = signature::member_display_name(member);
        match groups.get_mut(&name) {
            Some(group) => group.push(member),
            None => {
                order.push(name.clone());
                groups.insert(name, vec![member]);
            }
        }
    }
    order
        .into_iter()
        .filter_map(|name| groups.remove(&name))
        .collect()
}

fn finish(sections: Vec<String>) -> String {
    let mut document = sections.join("\n\n");
    document.push('\n');
    document
}

fn write_document(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}
