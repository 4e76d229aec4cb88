//! Case (dossier) lifecycle model.
//!
//! Pure mapping from a dossier status code to its display attributes and to
//! its position in the workflow. Nothing here performs I/O or mutates case
//! records; status changes belong to the case-management API.
//!
//! - [`status`] -- the closed status enumeration and its wire codes
//! - [`lifecycle`] -- label / color / order / progress tables and the timeline
//! - [`dates`] -- elapsed-time and deadline helpers used next to the status

pub mod dates;
pub mod lifecycle;
pub mod status;

pub use lifecycle::{
    color_for, describe, label_for, order_of, progress_for, timeline_for, ColorClass,
    LifecycleTable, StatusDisplay, StatusEntry, TimelineStep,
};
pub use status::DossierStatus;
