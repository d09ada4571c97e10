pub mod ignore;
pub mod walker;

pub use ignore::{normalize_path, IgnoreSet, MatchMode, BUNDLED_TYPES_DIR};
pub use walker::{collect_bundle, read_text, Bundle};
