use crate::cli::FilterArgs;
use focusboard_core::Outcome;
use focusboard_report::ExportFormat;
use focusboard_store::atomic_write;
use std::path::{Path, PathBuf};

pub fn run(filter: &FilterArgs, format: ExportFormat, output: Option<&Path>) -> anyhow::Result<()> {
    let (paths, config) = super::load_config()?;
    let pipeline = super::pipeline(&paths, &config);

    let Outcome::Ready(attachment) = pipeline.export(&filter.to_request(), format)? else {
        println!("{}", super::NO_DATA_MESSAGE);
        return Ok(());
    };

    let target = output_path(output, &paths.exports_dir(), &attachment.filename);
    atomic_write(&target, &attachment.bytes)?;

    println!(
        "✓ Wrote {} ({} bytes, {})",
        target.display(),
        attachment.bytes.len(),
        attachment.content_type
    );
    Ok(())
}

fn output_path(output: Option<&Path>, exports_dir: &Path, filename: &str) -> PathBuf {
    match output {
        Some(path) => path.to_path_buf(),
        None => exports_dir.join(filename),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_defaults_to_exports_dir() {
        let exports = Path::new("/home/me/.focusboard/exports");
        assert_eq!(
            output_path(None, exports, "focus_sessions.csv"),
            exports.join("focus_sessions.csv")
        );
        assert_eq!(
            output_path(Some(Path::new("out.csv")), exports, "focus_sessions.csv"),
            PathBuf::from("out.csv")
        );
    }
}
