//! # folio-core
//!
//! Core data model and transforms for the folio portfolio pipeline: the
//! uniform row model, the tolerant field parsers, and the three document
//! assemblers (mapping, details, experience).
//!
//! ## Example
//!
//! ```rust
//! use folio_core::{build_mapping, RowSet};
//!
//! let rows = RowSet::from_grid(vec![
//!     vec!["index".into(), "tableName".into()],
//!     vec!["w1".into(), "Project One".into()],
//! ]);
//!
//! let mapping = build_mapping(&rows);
//! assert_eq!(mapping.get("w1"), Some("Project One"));
//! ```

pub mod detail;
pub mod document;
pub mod error;
pub mod experience;
pub mod field;
pub mod mapping;
pub mod row;

pub use detail::{assemble_details, DetailRecord, DetailSet};
pub use error::{Error, Result};
pub use experience::{assemble_experience, ExperienceData, ExperienceEntry};
pub use field::{DateKey, ObjectEntry};
pub use mapping::{build_mapping, CodeMap};
pub use row::{Row, RowSet};
