// src/calls.rs

use std::fs;
use std::path::{Path, PathBuf};

/// Fixed parts of the generated kraken command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallTemplate {
    pub executable: String,
    pub threads: usize,
    /// Pass `--gzip-compressed` to kraken
    pub gzip_compressed: bool,
    /// Extension (without the dot) of the read files to pick up
    pub input_suffix: String,
}

impl Default for CallTemplate {
    fn default() -> Self {
        Self {
            executable: "kraken".to_string(),
            threads: 4,
            gzip_compressed: true,
            input_suffix: "gz".to_string(),
        }
    }
}

/// One kraken invocation: the read file and where its `.err`/`.kraken` go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KrakenCall {
    pub input: PathBuf,
    /// Output directory joined with the input's stem, without extension
    pub output_prefix: PathBuf,
}

impl KrakenCall {
    pub fn to_command_line(&self, template: &CallTemplate, db: &str) -> String {
        let gzip = if template.gzip_compressed { " --gzip-compressed" } else { "" };
        let prefix = self.output_prefix.display();
        format!(
            "{} --threads {}{} -db {} {} 2> {}.err > {}.kraken\n",
            template.executable,
            template.threads,
            gzip,
            db,
            self.input.display(),
            prefix,
            prefix
        )
    }
}

/// Everything before the first '.' of a file name; the whole name if it has none.
pub fn file_stem(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}

/// Entries of `dir` matching the shell pattern `*.<suffix>`.
///
/// Not recursive and not sorted. Names starting with '.' never match. A
/// directory that cannot be listed gives no entries.
pub fn find_input_files<P: AsRef<Path>>(dir: P, suffix: &str) -> Vec<PathBuf> {
    let dir = dir.as_ref();
    let listing_dir = if dir.as_os_str().is_empty() { Path::new(".") } else { dir };
    let pattern_end = format!(".{suffix}");

    let entries = match fs::read_dir(listing_dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("Cannot list directory '{}': {e}", dir.display());
            return Vec::new();
        }
    };

    entries
        .filter_map(|entry| {
            let file_name = entry.ok()?.file_name();
            let name = file_name.to_string_lossy();
            if !name.starts_with('.') && name.ends_with(&pattern_end) {
                Some(dir.join(&file_name))
            } else {
                None
            }
        })
        .collect()
}

/// One call per matching file of `input_dir`, writing into `output_dir`.
pub fn plan_calls<P: AsRef<Path>, Q: AsRef<Path>>(
    input_dir: P,
    output_dir: Q,
    template: &CallTemplate,
) -> Vec<KrakenCall> {
    find_input_files(input_dir, &template.input_suffix)
        .into_iter()
        .map(|input| {
            let name = input
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let output_prefix = output_dir.as_ref().join(file_stem(&name));
            KrakenCall {
                input,
                output_prefix,
            }
        })
        .collect()
}
