use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about,
    help_template(
        "{before-help}{name} {version}\n{author-with-newline}{about-with-newline}\n{usage-heading} {usage}\n\n{all-args}{after-help}"
    )
)]
pub struct Args {
    /// Path to TOML sweep configuration file. Defaults to the full sweep.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory to which output files should be saved.
    #[arg(short, long, default_value = "build")]
    pub output_dir: PathBuf,

    /// Also emit one testbench per distinct DAC resolution.
    #[arg(short, long)]
    pub testbenches: bool,
}
