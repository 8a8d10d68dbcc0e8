use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use rand::Rng;

use crate::shared::constants::{OUTPUT_SUFFIX_ALPHABET, OUTPUT_SUFFIX_LEN};

/// `len` characters drawn uniformly from lowercase ASCII letters and digits.
pub fn random_suffix<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| OUTPUT_SUFFIX_ALPHABET[rng.gen_range(0..OUTPUT_SUFFIX_ALPHABET.len())] as char)
        .collect()
}

/// Sibling of `input_dir` named `<base>_<suffix>`.
///
/// `input_dir` should already be absolute so the parent is meaningful.
/// Name collisions with existing directories are not checked.
pub fn output_dir_for<R: Rng + ?Sized>(input_dir: &Path, rng: &mut R) -> PathBuf {
    let parent = input_dir.parent().unwrap_or(input_dir);
    let mut name: OsString = input_dir.file_name().unwrap_or_default().to_os_string();
    name.push("_");
    name.push(random_suffix(rng, OUTPUT_SUFFIX_LEN));
    parent.join(name)
}

/// Picks the output directory for `input_dir` and creates it (reusing it if
/// it already exists).
pub fn create_output_dir<R: Rng + ?Sized>(
    input_dir: &Path,
    rng: &mut R,
) -> Result<PathBuf, std::io::Error> {
    let dir = output_dir_for(input_dir, rng);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}
