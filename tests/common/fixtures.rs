//! Static help bundles used across harnesses.

use std::path::{Path, PathBuf};

/// A small bundle in the on-disk JSON format, including `null` children on
/// leaves the way the docs generator writes them.
pub const SAMPLE_BUNDLE_JSON: &str = r#"{
  "header": "Zowe CLI Help",
  "footer": "Generated for tests",
  "aliases": { "ls": ["list"], "sub": ["submit"] },
  "tree": [
    { "id": "zowe.html", "text": "zowe", "children": [
      { "id": "zos-jobs.html", "text": "zos-jobs", "children": [
        { "id": "zos-jobs_list.html", "text": "list", "children": [
          { "id": "zos-jobs_list_jobs.html", "text": "jobs", "children": null }
        ] },
        { "id": "zos-jobs_submit.html", "text": "submit", "children": null }
      ] },
      { "id": "config.html", "text": "config", "children": [] }
    ] }
  ]
}"#;

/// Write [`SAMPLE_BUNDLE_JSON`] into `dir` and return the file path.
pub fn write_sample_bundle(dir: &Path) -> PathBuf {
    let path = dir.join("bundle.json");
    std::fs::write(&path, SAMPLE_BUNDLE_JSON).expect("write sample bundle");
    path
}
