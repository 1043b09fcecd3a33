//! Prelude module - common imports for folio users
//!
//! ```rust
//! use folio::prelude::*;
//! ```

pub use crate::{
    // Assemblers
    assemble_details,
    assemble_experience,
    build_mapping,

    // Document output
    document,

    // Source readers
    CsvReader,
    XlsxReader,

    // Pipeline
    load_rows,
    LoadedSource,
    PipelineError,

    // Core types
    CodeMap,
    DateKey,
    DetailRecord,
    DetailSet,
    ExperienceData,
    ExperienceEntry,
    ObjectEntry,
    Row,
    RowSet,
};
