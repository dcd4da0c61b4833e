use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "rhardlink",
    version,
    about = "Hard-link matching files into a destination, once per on-disk object",
    long_about = "`rhardlink` creates hard links in DST for the files directly under SRC whose names match PATTERN.

A file whose on-disk object already has a link in DST (under any name) is skipped, so running the
tool again links only what is new. If a different file already uses a name in DST, the new link
gets a numeric suffix instead (report.pdf -> report_1.pdf); existing files are never overwritten.

Hard links cannot cross filesystems: DST must be on the same filesystem as SRC.

EXAMPLES:
    # Link all PDFs from ~/Downloads into the current directory
    rhardlink ~/Downloads

    # Link images into a gallery directory, creating it if needed
    rhardlink /data/camera /data/gallery '*.{jpg,png}'"
)]
struct Args {
    /// Preview mode - show what would be linked without creating anything
    #[arg(long)]
    dry_run: bool,

    /// Verbose level: -v INFO / -vv DEBUG / -vvv TRACE (default: WARN)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode, don't report warnings or errors
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,

    // ARGUMENTS
    /// Directory to scan for files to link
    #[arg()]
    src: std::path::PathBuf,

    /// Directory to create the links in, created if missing
    #[arg(default_value = ".")]
    dst: std::path::PathBuf,

    /// Glob matched against file names in both SRC and DST
    #[arg(default_value = "*.pdf")]
    pattern: String,
}

fn parse_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(error) => {
            // --help and --version are reported through the error path as well
            let code = i32::from(error.use_stderr());
            if let Err(print_error) = error.print() {
                eprintln!("{print_error}");
            }
            std::process::exit(code);
        }
    }
}

fn main() -> Result<()> {
    let args = parse_args();
    let output = common::OutputConfig {
        quiet: args.quiet,
        verbose: args.verbose,
    };
    let res = common::run(output, || -> Result<common::Summary> {
        let settings = common::Settings {
            pattern: common::filter::NamePattern::parse(&args.pattern)?,
            dry_run: args.dry_run,
        };
        tracing::info!(
            "linking '{}' from {:?} into {:?}",
            &settings.pattern,
            &args.src,
            &args.dst
        );
        Ok(common::replicate(&args.src, &args.dst, &settings)?)
    });
    match res {
        Some(summary) => print!("{}", summary.report(&args.dst)),
        None => std::process::exit(1),
    }
    Ok(())
}
