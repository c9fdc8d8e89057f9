//! File-based section notes.
//!
//! Notes live under `<root>/<grade>/module<N>/section<section>.txt`, where
//! the module number is the part of the section identifier before the first
//! dot ("4.3" lives in `module4`). Each file's first line has the form
//! `"...: <title>"`.

use std::path::PathBuf;

use anyhow::{Context, Result};

/// Looks up tutoring notes on disk.
#[derive(Debug, Clone)]
pub struct NotesStore {
    root: PathBuf,
}

impl NotesStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Retrieve the notes for one section of a grade.
    ///
    /// Missing notes produce a fixed not-found text rather than an error;
    /// the tutor agent surfaces it to the student as-is.
    pub fn retrieve(&self, grade: &str, section: &str) -> String {
        let module = section.split('.').next().unwrap_or(section);
        let path = self
            .root
            .join(grade)
            .join(format!("module{module}"))
            .join(format!("section{section}.txt"));

        match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("notes lookup failed for {}: {e}", path.display());
                format!("Notes for section {section} not found.")
            }
        }
    }

    /// List every section identifier and title for a grade, sorted by
    /// section identifier, one `id: title` pair per line.
    pub fn sections(&self, grade: &str) -> Result<String> {
        let grade_dir = self.root.join(grade);
        let mut sections: Vec<(String, String)> = Vec::new();

        for module_entry in std::fs::read_dir(&grade_dir)
            .with_context(|| format!("failed to read notes directory: {}", grade_dir.display()))?
        {
            let module_path = module_entry?.path();
            if !module_path.is_dir() {
                continue;
            }
            for section_entry in std::fs::read_dir(&module_path)? {
                let section_path = section_entry?.path();
                let Some(file_name) = section_path.file_name().and_then(|n| n.to_str()) else {
                    continue;
                };
                let Some(section_id) = file_name
                    .strip_prefix("section")
                    .and_then(|rest| rest.strip_suffix(".txt"))
                else {
                    continue;
                };
                match section_title(&section_path) {
                    Some(title) => sections.push((section_id.to_string(), title)),
                    None => {
                        tracing::warn!("no title line in {}", section_path.display());
                    }
                }
            }
        }

        sections.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(sections
            .iter()
            .map(|(id, title)| format!("{id}: {title}"))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

/// Extract the title from a section file's `"...: <title>"` first line.
fn section_title(path: &std::path::Path) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    let first_line = content.lines().next()?.trim();
    first_line
        .split_once(": ")
        .map(|(_, title)| title.to_string())
}
