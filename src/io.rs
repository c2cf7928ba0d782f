//! File boundary: reads the input, runs the compressor and writes the
//! stream out.
//!
//! All failures come back as [`Error`] values; printing is left to the
//! binary. When no output path is given the stream lands next to the input
//! as `<input>.<id>`.

use std::path::{Path, PathBuf};

use crate::compress::{compress, MAX_INPUT_SIZE};
use crate::error::{Error, Warning};
use crate::format::{Format, FormatOptions};

/// Outcome of one file compression, for the caller to report.
#[derive(Debug)]
pub struct CompressReport {
    pub output_path: PathBuf,
    pub input_size: usize,
    pub output_size: usize,
    pub warnings: Vec<Warning>,
}

/// Compresses `input_path` into `output_path` (or the default
/// `<input>.<id>` when none is given).
pub fn compress_file(
    input_path: &Path,
    output_path: Option<&Path>,
    options: FormatOptions,
) -> Result<CompressReport, Error> {
    let input = std::fs::read(input_path)
        .map_err(|e| Error::Input(format!("cannot read {}: {e}", input_path.display())))?;

    if input.is_empty() {
        return Err(Error::Input(format!("{} is empty", input_path.display())));
    }
    if input.len() > MAX_INPUT_SIZE {
        return Err(Error::Input(format!(
            "{} is {} bytes; the maximum is {MAX_INPUT_SIZE}",
            input_path.display(),
            input.len()
        )));
    }

    let (format, mut warnings) = Format::new(options);
    let output = compress(&input, &format)?;
    warnings.extend(output.warnings);

    let output_path = match output_path {
        Some(path) => path.to_path_buf(),
        None => default_output_path(input_path, &format),
    };

    std::fs::write(&output_path, &output.bytes)
        .map_err(|e| Error::Output(format!("cannot write {}: {e}", output_path.display())))?;

    Ok(CompressReport {
        output_path,
        input_size: input.len(),
        output_size: output.bytes.len(),
        warnings,
    })
}

/// `<input>.<id>` — the format identifier becomes the suffix.
fn default_output_path(input_path: &Path, format: &Format) -> PathBuf {
    let mut name = input_path.as_os_str().to_owned();
    name.push(".");
    name.push(format.id().name());
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compress::decompress;
    use crate::format::FormatId;
    use tempfile::TempDir;

    #[test]
    fn compresses_to_the_default_suffix() {
        let dir = TempDir::new().unwrap();
        let input_path = dir.path().join("payload.bin");
        std::fs::write(&input_path, b"suffix test suffix test suffix").unwrap();

        let report = compress_file(&input_path, None, FormatOptions::new(FormatId::Ef8)).unwrap();
        assert_eq!(report.output_path, dir.path().join("payload.bin.ef8"));
        assert!(report.output_path.exists());
        assert_eq!(report.input_size, 30);

        let packed = std::fs::read(&report.output_path).unwrap();
        let (format, _) = Format::new(FormatOptions::new(FormatId::Ef8));
        assert_eq!(
            decompress(&packed, &format, report.input_size).unwrap(),
            b"suffix test suffix test suffix"
        );
    }

    #[test]
    fn explicit_output_path_wins() {
        let dir = TempDir::new().unwrap();
        let input_path = dir.path().join("in.bin");
        let output_path = dir.path().join("out.pak");
        std::fs::write(&input_path, b"explicit output").unwrap();

        let report = compress_file(
            &input_path,
            Some(&output_path),
            FormatOptions::new(FormatId::Lzm),
        )
        .unwrap();
        assert_eq!(report.output_path, output_path);
        assert!(output_path.exists());
    }

    #[test]
    fn missing_input_reports_an_input_error() {
        let dir = TempDir::new().unwrap();
        let result = compress_file(
            &dir.path().join("absent.bin"),
            None,
            FormatOptions::new(FormatId::Lzm),
        );
        assert!(matches!(result, Err(Error::Input(_))));
    }

    #[test]
    fn empty_input_reports_an_input_error() {
        let dir = TempDir::new().unwrap();
        let input_path = dir.path().join("empty.bin");
        std::fs::write(&input_path, b"").unwrap();

        let result = compress_file(&input_path, None, FormatOptions::new(FormatId::Lzm));
        assert!(matches!(result, Err(Error::Input(_))));
    }

    #[test]
    fn option_warnings_travel_with_the_report() {
        let dir = TempDir::new().unwrap();
        let input_path = dir.path().join("in.bin");
        std::fs::write(&input_path, b"warn me warn me warn me").unwrap();

        let mut options = FormatOptions::new(FormatId::Bx2);
        options.extend_offset = true;
        let report = compress_file(&input_path, None, options).unwrap();
        assert!(report
            .warnings
            .iter()
            .any(|w| matches!(w, Warning::OptionIgnored { option: "-o", .. })));
    }
}
