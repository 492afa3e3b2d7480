#![forbid(unsafe_code)]

//! Application services on top of the core engine: the stateful
//! `StudyService` orchestrator, dataset loading, mistake-driven scheduler
//! boosts, distractor option building, and the HTTP translation client.

pub mod boosts;
pub mod dataset;
pub mod error;
pub mod study_service;
pub mod translate;
pub mod vocab_options;

pub use booster_core::Clock;

pub use boosts::build_scheduler_boosts;
pub use dataset::{Dataset, quiz_image_path};
pub use error::{DatasetError, ImportError, TranslateError};
pub use study_service::StudyService;
pub use translate::{TranslationConfig, TranslationService};
pub use vocab_options::build_vocab_options;
