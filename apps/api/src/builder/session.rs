//! Builder session: the single in-memory state tree behind one form.
//!
//! Field edits and toggles are synchronous. Image analysis is the only suspending
//! operation and follows a fixed lifecycle:
//!
//! ```text
//! idle ──begin──▶ analyzing ──ok──▶ complete
//!                     └─────err───▶ idle (no suggestions)
//! ```
//!
//! Each `begin_analysis` hands out a ticket; a completion carrying an older ticket is
//! ignored, so a slow first upload cannot overwrite the result of a later one.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::builder::assembler::assemble;
use crate::builder::fields::{is_preset_tech, FormVariant, PromptFields, TextField};
use crate::builder::normalize::{buffer_contains, same_line};
use crate::builder::suggestions::{
    AnalysisStatus, Category, SelectionState, SuggestionSet, Target,
};
use crate::builder::toggle::{toggle_entry, toggle_line};
use crate::builder::upload::{first_image, UploadedFile};
use crate::gateway::{GatewayError, ImageAnalyzer, ImagePayload};

/// Identifies one started analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisTicket(u64);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuilderSession {
    pub variant: FormVariant,
    pub fields: PromptFields,
    pub suggestions: Option<SuggestionSet>,
    pub selection: SelectionState,
    pub status: AnalysisStatus,
    analysis_seq: u64,
}

impl BuilderSession {
    pub fn new(variant: FormVariant) -> Self {
        Self {
            variant,
            ..Default::default()
        }
    }

    /// The assembled prompt. Depends on `variant` and `fields` only.
    pub fn render(&self) -> String {
        assemble(self.variant, &self.fields)
    }

    // ── Manual edits ────────────────────────────────────────────────────────

    /// Replaces a text buffer, unchecking suggestions whose line is gone.
    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) {
        *self.fields.text_mut(field) = value.into();
        for &category in self.variant.categories() {
            if matches!(category.target(self.variant), Some(Target::Text { field: f, .. }) if f == field)
            {
                self.resync(category);
            }
        }
    }

    pub fn toggle_tech(&mut self, tag: &str) {
        self.fields.toggle_tech(tag);
        self.resync(Category::TechStack);
    }

    /// Brings a session received from a client back in line with its own fields: drops
    /// indices outside the suggestion lists, then unchecks every suggestion whose line
    /// or tag was edited away.
    pub fn resync_all(&mut self) {
        self.selection.retain_valid(self.suggestions.as_ref());
        for &category in self.variant.categories() {
            self.resync(category);
        }
    }

    /// Re-establishes "checked implies present" for one category after a manual edit.
    fn resync(&mut self, category: Category) {
        let Some(suggestions) = &self.suggestions else {
            return;
        };
        let Some(target) = category.target(self.variant) else {
            return;
        };
        let mut selected = self.selection.get(category);
        selected.retain(|&i| {
            suggestions
                .suggestion(category, i)
                .is_some_and(|text| target_contains(&self.fields, target, text))
        });
        self.selection.set(category, selected);
    }

    // ── Suggestions ─────────────────────────────────────────────────────────

    /// Checks or unchecks suggestion `index` of `category` and updates its target.
    ///
    /// Returns `false` (and changes nothing) when there are no suggestions, the index is
    /// out of range, or the category does not belong to this variant.
    pub fn toggle_suggestion(&mut self, category: Category, index: usize) -> bool {
        let Some(suggestions) = &self.suggestions else {
            return false;
        };
        let Some(text) = suggestions.suggestion(category, index) else {
            return false;
        };
        let Some(target) = category.target(self.variant) else {
            return false;
        };
        let text = text.to_string();
        let selected = self.selection.get(category);

        // Another checked suggestion with the same text still needs the line.
        let shared = selected.contains(&index)
            && selected.iter().any(|&j| {
                j != index
                    && suggestions
                        .suggestion(category, j)
                        .is_some_and(|other| same_line(other, &text))
            });
        if shared {
            let mut selected = selected;
            selected.remove(&index);
            self.selection.set(category, selected);
            return true;
        }

        let new_selected = match target {
            Target::Text { field, style } => {
                let toggled = toggle_line(&selected, self.fields.text(field), index, &text, style);
                *self.fields.text_mut(field) = toggled.value;
                toggled.selected
            }
            Target::TechTags => {
                let list = if is_preset_tech(&text) {
                    &mut self.fields.selected_tech
                } else {
                    &mut self.fields.custom_constraints
                };
                let toggled = toggle_entry(&selected, list.as_slice(), index, &text);
                *list = toggled.value;
                toggled.selected
            }
        };
        self.selection.set(category, new_selected);
        true
    }

    // ── Analysis lifecycle ──────────────────────────────────────────────────

    /// Marks an analysis as started and clears the previous result.
    pub fn begin_analysis(&mut self) -> AnalysisTicket {
        self.analysis_seq += 1;
        self.status = AnalysisStatus::Analyzing;
        self.suggestions = None;
        self.selection.clear();
        AnalysisTicket(self.analysis_seq)
    }

    /// Applies the outcome of the analysis identified by `ticket`.
    ///
    /// Success stores the suggestions with an empty selection. Failure is logged and
    /// returns the session to idle with no suggestions. Returns `false` when the ticket
    /// is stale and the outcome was dropped.
    pub fn finish_analysis(
        &mut self,
        ticket: AnalysisTicket,
        outcome: Result<SuggestionSet, GatewayError>,
    ) -> bool {
        if ticket.0 != self.analysis_seq {
            warn!(
                "Dropping stale analysis result (ticket {}, current {})",
                ticket.0, self.analysis_seq
            );
            return false;
        }

        self.selection.clear();
        match outcome {
            Ok(suggestions) => {
                self.status = AnalysisStatus::Complete;
                self.suggestions = Some(suggestions);
            }
            Err(e) => {
                warn!("Image analysis failed: {e}");
                self.status = AnalysisStatus::Idle;
                self.suggestions = None;
            }
        }
        true
    }

    /// Runs one analysis to completion against `analyzer`. Never returns an error:
    /// failures leave the session idle.
    pub async fn analyze(&mut self, image: &ImagePayload, analyzer: &dyn ImageAnalyzer) {
        let ticket = self.begin_analysis();
        let outcome = analyzer.analyze(image, self.variant).await;
        self.finish_analysis(ticket, outcome);
    }

    /// Records a multi-file selection and analyzes its first image, if any.
    ///
    /// Files outside the extension allow-list are skipped. Every accepted file is kept
    /// as metadata only.
    pub async fn upload_files(&mut self, files: Vec<UploadedFile>, analyzer: &dyn ImageAnalyzer) {
        let (accepted, rejected): (Vec<_>, Vec<_>) =
            files.into_iter().partition(UploadedFile::is_allowed);
        for file in &rejected {
            warn!("Skipping upload with unsupported extension: {}", file.name);
        }

        self.fields
            .add_files(accepted.iter().map(UploadedFile::metadata));

        let Some(payload) = first_image(&accepted).and_then(UploadedFile::to_image_payload) else {
            return;
        };
        info!("Analyzing {} uploaded file(s)", accepted.len());
        self.analyze(&payload, analyzer).await;
    }
}

fn target_contains(fields: &PromptFields, target: Target, text: &str) -> bool {
    match target {
        Target::Text { field, .. } => buffer_contains(fields.text(field), text),
        Target::TechTags => fields.has_tag(text),
    }
}
