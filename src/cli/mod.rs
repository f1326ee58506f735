use std::fs::{create_dir_all, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use crate::cli::args::Args;
use crate::config::{parse_sweep_config, SweepSpace};
use crate::schematic::tb::generate_tb;
use crate::sweep::{expand, CdacDesign};

pub mod args;

pub const BANNER: &str = r"
  ____ ____    _    ____ ____ _____ _   _
 / ___|  _ \  / \  / ___/ ___| ____| \ | |
| |   | | | |/ _ \| |  | |  _|  _| |  \| |
| |___| |_| / ___ \ |__| |_| | |___| |\  |
 \____|____/_/   \_\____\____|_____|_| \_|
";

pub fn run() -> Result<()> {
    let args = Args::parse();

    println!("{}", BANNER);
    println!("Starting CDAC generation...\n");

    let space = match &args.config {
        Some(path) => {
            println!("Configuration file: {:?}", path);
            parse_sweep_config(path).with_context(|| format!("failed to read {:?}", path))?
        }
        None => SweepSpace::default(),
    };

    create_dir_all(&args.output_dir)?;
    println!("Output directory: {:?}\n", &args.output_dir);
    println!("Sweep axes:");
    println!("\tResolutions: {:?}", space.n_dac);
    println!("\tRedundant caps: {:?}", space.n_extra);
    println!("\tRedundancy strategies: {}", space.redun_strats.len());
    println!("\tSplit strategies: {}\n", space.split_strats.len());

    info!("expanding {} candidate combinations", space.len());
    let designs = expand(&space)?;
    let skipped = space.len() - designs.len();

    write_designs(&args.output_dir, &designs)?;

    if args.testbenches {
        write_testbenches(&args.output_dir, &designs)?;
    }

    println!(
        "\n{} {} designs written, {} infeasible combinations skipped",
        "Done:".green().bold(),
        designs.len(),
        skipped
    );

    Ok(())
}

fn out_design(output_dir: &Path, name: &str) -> PathBuf {
    output_dir.join(format!("designs/{}.json", name))
}

fn out_tb(output_dir: &Path, n_dac: u32) -> PathBuf {
    output_dir.join(format!("tb/cdac_tb_{}b.json", n_dac))
}

fn write_designs(output_dir: &Path, designs: &[CdacDesign]) -> Result<()> {
    create_dir_all(output_dir.join("designs"))?;

    let bar = ProgressBar::new(designs.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("{msg:32} [{bar:40}] {pos}/{len}")
            .expect("invalid progress bar template")
            .progress_chars("=> "),
    );
    bar.set_message("Writing design files");

    for design in designs {
        let path = out_design(output_dir, &design.params.name());
        let f = File::create(&path).with_context(|| format!("failed to create {:?}", path))?;
        serde_json::to_writer_pretty(f, design)?;
        bar.inc(1);
    }
    bar.finish();

    info!("wrote {} design files", designs.len());
    Ok(())
}

/// One testbench per distinct resolution appearing in the design list.
fn write_testbenches(output_dir: &Path, designs: &[CdacDesign]) -> Result<()> {
    create_dir_all(output_dir.join("tb"))?;

    let mut resolutions: Vec<u32> = designs.iter().map(|d| d.params.n_dac).collect();
    resolutions.sort_unstable();
    resolutions.dedup();

    for n_dac in resolutions {
        let tb = generate_tb(n_dac)?;
        let path = out_tb(output_dir, n_dac);
        let f = File::create(&path).with_context(|| format!("failed to create {:?}", path))?;
        serde_json::to_writer_pretty(f, &tb)?;
        println!("Testbench for {} bits: {:?}", n_dac, path);
    }

    Ok(())
}
