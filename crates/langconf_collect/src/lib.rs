//! `langconf_collect`:
//! Gathers `language-configuration.json` files from an extension tree into a
//! mirrored `resources` tree.
//!
//! Modules:
//! - `collect` : traversal and copy orchestration
//! - `spec`    : constants/events/errors
//! - `report`  : run-time report model
//! - `util`    : shared helper functions

pub mod collect;
pub mod report;
pub mod spec;
mod util;

pub use collect::collect_language_configurations;
pub use report::{ReportCollect, ReportCollectBuilder};
pub use spec::{
    C_NAME_DIR_RESOURCES, C_NAME_LANGUAGE_CONFIGURATION, CollectError, SinkCopyEvent,
    SpecCopyEvent,
};
pub use util::resolve_resources_root;
