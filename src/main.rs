use clap::Parser;
use dcm2png::cli::Args;
use dcm2png::logger::{self, error, info, warn};
use dcm2png::{convert_batch, BatchOptions, CancellationToken, ConversionReport, ConvertError, DicomDecoder, PngWriter};
use std::path::Path;
use std::process::ExitCode;

/// Conventional status for a run stopped by SIGINT
const INTERRUPTED_EXIT_CODE: u8 = 130;

fn main() -> ExitCode {
    let args = Args::parse();
    logger::init(args.verbose);

    let options = args.batch_options();
    install_interrupt_handler(&options.cancellation);

    match run(&args, &options) {
        Ok(report) => {
            println!("{}", summary(&report, &args.output_root));
            ExitCode::from(exit_status(&report))
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Ctrl-C lets the file in progress finish, then stops the batch
fn install_interrupt_handler(cancellation: &CancellationToken) {
    let token = cancellation.clone();
    let installed = ctrlc::set_handler(move || {
        if !token.is_cancelled() {
            warn!("Interrupted, finishing the current file");
        }
        token.cancel();
    });

    if let Err(e) = installed {
        warn!("Failed to install Ctrl-C handler: {e}");
    }
}

fn run(args: &Args, options: &BatchOptions) -> Result<ConversionReport, ConvertError> {
    let report = convert_batch(&args.input_root, &args.output_root, &DicomDecoder, &PngWriter, options)?;

    info!("{report}");
    Ok(report)
}

fn summary(report: &ConversionReport, output_root: &Path) -> String {
    let mut lines = vec![format!("Converted {} files to: {}", report.converted, output_root.display())];

    if report.skipped() > 0 {
        lines.push(format!("Skipped {} files", report.skipped()));
    }
    if report.cancelled {
        lines.push("Cancelled before all files were converted".to_string());
    }

    lines.join("\n")
}

fn exit_status(report: &ConversionReport) -> u8 {
    if report.cancelled { INTERRUPTED_EXIT_CODE } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(input_root: PathBuf, output_root: PathBuf) -> Args {
        Args::try_parse_from([
            PathBuf::from("dcm2png").into_os_string(),
            input_root.into_os_string(),
            output_root.into_os_string(),
        ])
        .unwrap()
    }

    #[test]
    fn test_run_on_empty_input() {
        let input = tempfile::tempdir().unwrap();
        let scratch = tempfile::tempdir().unwrap();
        let output = scratch.path().join("previews");
        let args = args(input.path().to_path_buf(), output.clone());

        let report = run(&args, &args.batch_options()).unwrap();
        assert_eq!(report.converted, 0);
        assert!(output.is_dir());
        assert_eq!(exit_status(&report), 0);
        assert_eq!(summary(&report, &output), format!("Converted 0 files to: {}", output.display()));
    }

    #[test]
    fn test_run_fails_on_missing_input() {
        let scratch = tempfile::tempdir().unwrap();
        let args = args(scratch.path().join("nope"), scratch.path().join("out"));
        let result = run(&args, &args.batch_options());
        assert_matches::assert_matches!(result, Err(ConvertError::InputRootMissing(_)));
    }

    #[test]
    fn test_interrupted_run_is_reported_and_fails() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        std::fs::write(input.path().join("pending.dcm"), b"").unwrap();
        let args = args(input.path().to_path_buf(), output.path().to_path_buf());

        let options = args.batch_options();
        options.cancellation.cancel();
        let report = run(&args, &options).unwrap();

        assert!(report.cancelled);
        assert_eq!(report.converted + report.skipped(), 0);
        assert_eq!(exit_status(&report), INTERRUPTED_EXIT_CODE);
        assert!(summary(&report, output.path()).ends_with("Cancelled before all files were converted"));
    }

    #[test]
    fn test_summary_lists_skipped_files() {
        let report = ConversionReport {
            converted: 3,
            failures: vec![dcm2png::FileFailure::new(
                PathBuf::from("bad.dcm"),
                dcm2png::Stage::Decode,
                &anyhow::anyhow!("corrupt"),
            )],
            cancelled: false,
        };

        assert_eq!(summary(&report, Path::new("out")), "Converted 3 files to: out\nSkipped 1 files");
        assert_eq!(exit_status(&report), 0);
    }
}
