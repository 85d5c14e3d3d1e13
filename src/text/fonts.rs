use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::QuotegenxResult;
use crate::text::measure::FontSpec;

/// Extra font directory consulted by [`crate::TextEngine::load_env_fonts`].
pub const FONT_DIR_ENV: &str = "QUOTEGENX_FONT_DIR";

const FONT_EXTENSIONS: [&str; 3] = ["ttf", "otf", "ttc"];

/// One entry of a CSS `font-family` list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FamilyName {
    Named(String),
    /// `serif`, `sans-serif`, `monospace`, ...: satisfied by any registered family.
    Generic(String),
}

const GENERIC_FAMILIES: [&str; 8] = [
    "serif",
    "sans-serif",
    "monospace",
    "cursive",
    "fantasy",
    "system-ui",
    "ui-serif",
    "ui-sans-serif",
];

/// Split a CSS `font-family` value into its entries, dropping quotes and empty items.
pub fn parse_family_list(css: &str) -> Vec<FamilyName> {
    css.split(',')
        .map(|part| part.trim().trim_matches(|c| c == '\'' || c == '"').trim())
        .filter(|name| !name.is_empty())
        .map(|name| {
            let lower = name.to_ascii_lowercase();
            if GENERIC_FAMILIES.contains(&lower.as_str()) {
                FamilyName::Generic(lower)
            } else {
                FamilyName::Named(name.to_string())
            }
        })
        .collect()
}

/// A single registered face and the bytes of the file it came from.
#[derive(Clone, Debug)]
pub struct FaceEntry {
    pub family: String,
    pub weight: u16,
    pub italic: bool,
    /// Face index inside a collection file (0 for plain TTF/OTF).
    pub index: u32,
    pub data: Arc<Vec<u8>>,
}

/// Face picked for a [`FontSpec`].
#[derive(Clone, Debug)]
pub struct ResolvedFace {
    /// Position of the face in the [`FontBook`].
    pub slot: usize,
    pub face: FaceEntry,
    /// No entry of the requested family list matched; the first registered family was used.
    pub fallback: bool,
}

/// Registry of loaded faces, queried by CSS family list, weight, and style.
#[derive(Clone, Debug, Default)]
pub struct FontBook {
    faces: Vec<FaceEntry>,
}

impl FontBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_face(&mut self, face: FaceEntry) -> usize {
        self.faces.push(face);
        self.faces.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn face(&self, slot: usize) -> Option<&FaceEntry> {
        self.faces.get(slot)
    }

    /// Distinct family names in registration order.
    pub fn families(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for f in &self.faces {
            if !out.contains(&f.family.as_str()) {
                out.push(&f.family);
            }
        }
        out
    }

    /// Walk the family list and return the closest face of the first family that is registered.
    pub fn resolve(&self, font: &FontSpec) -> Option<ResolvedFace> {
        let first_family = self.faces.first()?.family.clone();

        for entry in parse_family_list(&font.family) {
            let family = match &entry {
                FamilyName::Named(name) => {
                    match self
                        .faces
                        .iter()
                        .find(|f| f.family.eq_ignore_ascii_case(name))
                    {
                        Some(f) => f.family.clone(),
                        None => continue,
                    }
                }
                FamilyName::Generic(_) => first_family.clone(),
            };
            if let Some(slot) = self.closest_in_family(&family, font) {
                return Some(self.resolved(slot, false));
            }
        }

        let slot = self.closest_in_family(&first_family, font)?;
        Some(self.resolved(slot, true))
    }

    fn resolved(&self, slot: usize, fallback: bool) -> ResolvedFace {
        ResolvedFace {
            slot,
            face: self.faces[slot].clone(),
            fallback,
        }
    }

    fn closest_in_family(&self, family: &str, font: &FontSpec) -> Option<usize> {
        self.faces
            .iter()
            .enumerate()
            .filter(|(_, f)| f.family == family)
            .min_by_key(|(_, f)| face_distance(f, font))
            .map(|(slot, _)| slot)
    }
}

/// Style mismatch dominates; among equal styles, nearest weight wins and heavier breaks ties.
fn face_distance(face: &FaceEntry, font: &FontSpec) -> (bool, u16, bool) {
    (
        face.italic != font.italic,
        face.weight.abs_diff(font.weight),
        face.weight < font.weight,
    )
}

/// Font files directly inside `dir`, sorted by path.
pub fn font_files_in(dir: &Path) -> QuotegenxResult<Vec<PathBuf>> {
    let rd = std::fs::read_dir(dir)
        .with_context(|| format!("read font directory {}", dir.display()))?;

    let mut out = Vec::new();
    for entry in rd {
        let path = entry
            .with_context(|| format!("list font directory {}", dir.display()))?
            .path();
        let is_font = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| FONT_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()));
        if is_font && path.is_file() {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/text/fonts.rs"]
mod tests;
