use crate::analyzer::Analyzer;
use crate::cli::Cli;
use crate::commands::{apply_fix_results, run_check, run_fix, CheckOptions, FixOptions};
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Installs the stderr log subscriber once per process.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects `debug` and the
/// default is `warn`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A second call (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Runs semiquote with the given arguments.
///
/// # Errors
///
/// Returns an error if argument parsing fails, or if the command execution fails.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    run_with_args_to(args, &mut std::io::stdout())
}

/// Run semiquote with the given arguments, writing output to the specified writer.
///
/// This is the testable version of `run_with_args` that allows output capture.
///
/// # Errors
///
/// Returns an error if an explicit `--config` file cannot be loaded, a path
/// does not exist, or writing the output fails.
pub fn run_with_args_to<W: std::io::Write>(args: Vec<String>, writer: &mut W) -> Result<i32> {
    let mut program_args = vec!["semiquote".to_owned()];
    program_args.extend(args);
    let cli_var = match Cli::try_parse_from(program_args) {
        Ok(c) => c,
        Err(e) => match e.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                write!(writer, "{e}")?;
                writer.flush()?;
                return Ok(0);
            }
            _ => {
                eprint!("{e}");
                return Ok(1);
            }
        },
    };

    init_tracing(cli_var.output.verbose);

    let mut config = if let Some(path) = &cli_var.config {
        Config::from_file(path)
            .with_context(|| format!("failed to load configuration {}", path.display()))?
    } else {
        let start = cli_var
            .paths
            .first()
            .map_or(Path::new("."), std::path::PathBuf::as_path);
        Config::load_from_path(start)
    };
    cli_var.apply_overrides(&mut config.semiquote);
    let style = config.style_config();
    let exclude_folders = config.semiquote.exclude_folders.clone().unwrap_or_default();

    if cli_var.output.verbose && !cli_var.output.json {
        eprintln!("[VERBOSE] semiquote v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("[VERBOSE] Using {} threads", rayon::current_num_threads());
        if let Some(path) = &config.config_file_path {
            eprintln!("[VERBOSE] Config: {}", path.display());
        }
        eprintln!("[VERBOSE] Rules: {style:?}");
        crate::output::print_exclusion_list(&mut std::io::stderr(), &exclude_folders)?;
        eprintln!();
    }

    let show_progress = !cli_var.output.json && !cli_var.output.quiet;
    let progress = show_progress.then(|| Arc::new(crate::output::create_spinner()));

    let mut analyzer = Analyzer::new(style)
        .with_excludes(exclude_folders)
        .with_verbose(cli_var.output.verbose);
    if let Some(pb) = &progress {
        analyzer = analyzer.with_progress(Arc::clone(pb));
    }

    let start_time = std::time::Instant::now();
    let mut result = match analyzer.analyze_paths(&cli_var.paths) {
        Ok(result) => result,
        Err(e) => {
            if let Some(pb) = &progress {
                pb.finish_and_clear();
            }
            eprintln!("Error: {e}");
            return Ok(1);
        }
    };

    if cli_var.output.verbose && !cli_var.output.json {
        eprintln!(
            "[VERBOSE] Checked {} files in {:.2}s",
            result.analysis_summary.total_files,
            start_time.elapsed().as_secs_f64()
        );
    }

    if cli_var.fix {
        let options = FixOptions {
            dry_run: cli_var.dry_run,
            verbose: cli_var.output.verbose,
        };
        let fixes = if cli_var.output.json {
            run_fix(&result, &style, &options, std::io::sink())?
        } else {
            run_fix(&result, &style, &options, &mut *writer)?
        };
        apply_fix_results(&mut result, fixes, cli_var.dry_run);
    }

    let check_options = CheckOptions {
        json: cli_var.output.json,
        quiet: cli_var.output.quiet,
    };
    run_check(&result, &check_options, writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn run(args: &[&str]) -> (i32, String) {
        let mut out = Vec::new();
        let code = run_with_args_to(args.iter().map(|a| (*a).to_owned()).collect(), &mut out)
            .unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_help_exits_zero() {
        let (code, text) = run(&["--help"]);
        assert_eq!(code, 0);
        assert!(text.contains("--allow-template-literals"));
        assert!(text.contains(".semiquote.toml"));
    }

    #[test]
    fn test_bad_flag_exits_one() {
        let (code, _) = run(&["--quotes", "curly"]);
        assert_eq!(code, 1);
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(".semiquote.toml"),
            "[semiquote.quotes]\nstyle = \"single\"\n[semiquote.semi]\nmode = \"never\"\n",
        )
        .unwrap();
        let file = dir.path().join("a.js");
        fs::write(&file, "var a = \"b\"\n").unwrap();
        let path = dir.path().to_string_lossy().to_string();

        let (code, _) = run(&[&path, "--quiet"]);
        assert_eq!(code, 1);

        let (code, _) = run(&[&path, "--quiet", "--quotes", "double"]);
        assert_eq!(code, 0);
    }

    #[test]
    fn test_explicit_config_must_load() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        let result = run_with_args_to(
            vec![
                "--config".to_owned(),
                missing.to_string_lossy().to_string(),
                dir.path().to_string_lossy().to_string(),
            ],
            &mut Vec::new(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_fix_then_clean() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.js");
        fs::write(&file, "var a = 'b'\n").unwrap();
        let path = dir.path().to_string_lossy().to_string();

        let (code, text) = run(&[&path, "--fix"]);
        assert_eq!(code, 0);
        assert!(text.contains("Fixed:"));
        assert_eq!(fs::read_to_string(&file).unwrap(), "var a = \"b\";\n");
    }

    #[test]
    fn test_missing_path_exits_one() {
        let (code, _) = run(&["definitely/not/here.js"]);
        assert_eq!(code, 1);
    }
}
