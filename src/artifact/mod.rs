//! Attribution artifacts on disk
//!
//! Layout under the artifact root:
//!
//! ```text
//! <root>/ALL/<index>th_smpl_<true><pred>_<width>_nn.jpg   every artifact
//! <root>/CP/...                                          correct predictions
//! <root>/WP/...                                          wrong predictions
//! <root>/manifest.jsonl                                  one line per artifact
//! ```

mod filer;
mod index;
mod manifest;
mod naming;
mod render;

pub use filer::{clear_artifacts, ArtifactFiler, FiledArtifact};
pub use index::{ArtifactEntry, ArtifactIndex, Selection, WidthRange};
pub use manifest::{read_manifest, Manifest, ManifestEntry, MANIFEST_FILE};
pub use naming::{ArtifactName, Bucket};
pub use render::{bwr, encode_jpeg, render, render_curve, RenderConfig};
