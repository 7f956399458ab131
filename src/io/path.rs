//! Output path derivation

use std::path::{Path, PathBuf};

/// Output path for a converted file: `<dir>/<stem>_out.wav`
///
/// The output always carries a `.wav` extension since that is what the
/// writer produces, whatever the input container was.
///
/// ```
/// use std::path::Path;
/// use stratum_resample::io::path::derive_output_path;
///
/// assert_eq!(
///     derive_output_path(Path::new("/music/take1.wav")),
///     Path::new("/music/take1_out.wav")
/// );
/// ```
pub fn derive_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{}_out.wav", stem))
}
