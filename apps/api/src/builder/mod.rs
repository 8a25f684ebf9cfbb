//! Prompt Builder Engine.
//!
//! Field storage, the suggestion toggle reducer and the assembler that renders the
//! final prompt. Both form variants run on this one engine; they differ only in the
//! data returned by `FormVariant::categories` and `Category::target`.

pub mod assembler;
pub mod enhance;
pub mod export;
pub mod fields;
pub mod handlers;
pub mod normalize;
pub mod session;
pub mod suggestions;
pub mod toggle;
pub mod upload;

pub use assembler::{assemble, PLACEHOLDER};
pub use fields::{FileMetadata, FormVariant, PromptFields, TextField, PRESET_TECH};
pub use session::{AnalysisTicket, BuilderSession};
pub use suggestions::{AnalysisStatus, Category, SelectionState, SuggestionSet, Target};
pub use upload::UploadedFile;
