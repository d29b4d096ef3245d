use clap::{Parser, Subcommand};
use heatfloor_common::db::parser::{report, room};
use heatfloor_common::util::config::Config;
use heatfloor_common::util::{check, generator, logger, visualization};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out mats and wires for the configured room.
    Plan,
    /// Verify a previously written layout report against the room.
    Check,
    /// Write a random room file.
    Generate {
        #[arg(long, default_value_t = 600)]
        width: i64,
        #[arg(long, default_value_t = 450)]
        height: i64,
        #[arg(long, default_value_t = 2)]
        holes: usize,
        #[arg(long, default_value = "inputs/random_room.txt")]
        output: String,
    },
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let args = Args::parse();

    let config = if args.config.exists() {
        log::info!("Loading configuration from {:?}", args.config);
        let config_str = std::fs::read_to_string(&args.config)
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;
        toml::from_str(&config_str)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?
    } else {
        log::warn!(
            "Configuration file {:?} not found. Using internal defaults.",
            args.config
        );
        Config::default()
    };

    let command = args.command.unwrap_or(Commands::Plan);

    match command {
        Commands::Generate {
            width,
            height,
            holes,
            output,
        } => {
            prepare_output_dir(&output)?;
            log::info!(
                "Generating random room ({} x {}, {} holes)...",
                width,
                height,
                holes
            );
            generator::generate_random_room_file(&output, width, height, holes)?;
            log::info!("Generated: {}", output);
        }
        Commands::Plan => {
            validate_input_paths(&config)?;
            prepare_output_dir(&config.input.output_report)?;
            prepare_output_dir(&config.input.output_image)?;

            if let Err(e) = run_plan(&config) {
                log::error!("{:#}", e);
                std::process::exit(1);
            }
        }
        Commands::Check => {
            validate_input_paths(&config)?;
            if !Path::new(&config.input.output_report).exists() {
                return Err(anyhow::anyhow!(
                    "Layout report missing: '{}'. Did you run 'plan'?",
                    config.input.output_report
                ));
            }

            if let Err(e) = run_check(&config) {
                log::error!("{:#}", e);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn validate_input_paths(config: &Config) -> anyhow::Result<()> {
    if !Path::new(&config.input.room_file).exists() {
        return Err(anyhow::anyhow!(
            "Input room file missing: {}",
            config.input.room_file
        ));
    }
    Ok(())
}

fn prepare_output_dir(path_str: &str) -> anyhow::Result<()> {
    if let Some(parent) = Path::new(path_str).parent() {
        if !parent.exists() && !parent.as_os_str().is_empty() {
            log::info!("Creating output directory: {:?}", parent);
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn run_plan(config: &Config) -> anyhow::Result<()> {
    log::info!("Parsing room: {}", config.input.room_file);
    let spec = room::parse(&config.input.room_file)
        .map_err(|e| anyhow::anyhow!("Invalid room file '{}': {:#}", config.input.room_file, e))?;
    let region = spec.region()?;
    log::info!(
        "Room: {} shell vertices, {} holes, coverable area {:.0}",
        region.shell().len(),
        region.holes().len(),
        region.area()
    );

    let plan = heatfloor_router::plan(&region, spec.entry, config)?;

    check::run(&region, plan.layout.iter())
        .map_err(|e| anyhow::anyhow!("Verification Failed: {}", e))?;

    log::info!("Writing layout report to {}", config.input.output_report);
    report::write(&plan.layout, &plan.stats, &config.input.output_report)?;

    log::info!("Generating layout visualization...");
    visualization::draw_layout(
        &region,
        plan.layout.iter(),
        &config.input.output_image,
        1000,
        1000,
    )?;

    Ok(())
}

fn run_check(config: &Config) -> anyhow::Result<()> {
    let spec = room::parse(&config.input.room_file)?;
    let region = spec.region()?;

    log::info!("Parsing layout report: {}", config.input.output_report);
    let layout = report::parse(&config.input.output_report)?;
    let stats = layout.stats(region.area());
    log::info!(
        "Report: {} shapes over {} pass(es), fill ratio {:.1}%",
        stats.shapes,
        layout.passes,
        stats.fill_ratio * 100.0
    );

    check::run(&region, layout.iter()).map_err(|e| anyhow::anyhow!("Verification Failed: {}", e))
}
