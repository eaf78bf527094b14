#![forbid(unsafe_code)]
//! Runtime translation-table loader and resolver for INI-style language packs.
//!
//! A [`Language`] holds the merged translations of one language tag. It is
//! filled from `<base>/language/<tag>/<tag>[.<extension>].ini` files, with
//! the default language loaded underneath as a baseline and a per-language
//! override file on top of everything.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use langtable::{Language, LanguageOptions, TranslateOptions};
//!
//! let options = LanguageOptions::new().with_base_path("/srv/site");
//! let mut language = Language::new(Some("de-DE"), options);
//!
//! // Extension files are merged on demand.
//! language.load("com_contact", "/srv/site/administrator");
//!
//! let title = language.translate("COM_CONTACT_FIELD_NAME_LABEL");
//! let script = language.translate_with("COM_CONTACT_CONFIRM", TranslateOptions::js_safe());
//! # let _ = (title, script);
//! ```
//!
//! # Debugging
//!
//! With `debug` enabled, hits are wrapped in `**…**`, misses in `??…??`,
//! and every lookup is recorded with its caller (see [`Language::orphans`]
//! and [`Language::used`]). Each parsed file is also checked line by line;
//! offending lines are listed by [`Language::error_files`].

pub mod callbacks;
pub mod debug;
pub mod error;
pub mod escape;
pub mod factory;
pub mod formats;
pub mod language;
pub mod loader;
pub mod metadata;
pub mod options;
pub mod store;
pub mod traits;
pub mod transliterate;

// Re-export most used types for easy consumption
pub use crate::{
    callbacks::{LocaliseHooks, LocaliseRegistry, LocaliseSource},
    debug::{CallerContext, FileErrors, OrphanEntry, validate_file},
    error::Error,
    factory::LanguageFactory,
    language::{Language, LanguageBuilder},
    loader::LoadedFiles,
    metadata::LanguageMetadata,
    options::{LanguageOptions, LoadOptions, TranslateOptions},
    store::TranslationStore,
};
