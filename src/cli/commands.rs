use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use clap::CommandFactory;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SimulationConfig;
use crate::model::{BreakupModel, CloudSummary, DebrisCloud};
use crate::output::terminal;
use crate::satellite::{Satellite, SatelliteFile, SatelliteRecord};

use super::args::{Cli, CompletionsArgs, CountArgs, RunArgs, RunOutputFormat};

/// Load both input files, applying the configured default satellite type
/// to records without an explicit one.
fn load_inputs(
    config_path: &Path,
    satellites_path: &Path,
) -> Result<(SimulationConfig, Vec<SatelliteRecord>)> {
    let config = SimulationConfig::load_from_file(config_path)?;
    let satellites = SatelliteFile::load_from_file(satellites_path)?
        .satellite
        .into_iter()
        .map(|s| s.with_default_kind(config.sat_type))
        .collect();
    Ok((config, satellites))
}

pub fn run(args: RunArgs) -> Result<()> {
    let (config, satellites) = load_inputs(&args.config, &args.satellites)?;
    let sat_refs: Vec<&dyn Satellite> = satellites.iter().map(|s| s as &dyn Satellite).collect();

    let model = BreakupModel::from_config(&config);
    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());

    let cloud: DebrisCloud = if args.parallel {
        model.run_parallel(&sat_refs, seed)?
    } else {
        let mut rng = StdRng::seed_from_u64(seed);
        model.run(&sat_refs, &mut rng)?
    };

    let event = model.event(&sat_refs)?;
    let summary = CloudSummary::new(&cloud, &event, sat_refs[0].velocity());

    match args.output {
        RunOutputFormat::Pretty => terminal::print_breakup(model.kind(), &summary),
        RunOutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }

    if let Some(path) = args.export {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create export file: {}", path.display()))?;
        serde_json::to_writer(BufWriter::new(file), cloud.records())
            .with_context(|| format!("Failed to write export file: {}", path.display()))?;
        eprintln!("Exported {} fragments to {}", cloud.len(), path.display());
    }

    Ok(())
}

pub fn count(args: CountArgs) -> Result<()> {
    let (config, satellites) = load_inputs(&args.config, &args.satellites)?;
    let sat_refs: Vec<&dyn Satellite> = satellites.iter().map(|s| s as &dyn Satellite).collect();

    let model = BreakupModel::from_config(&config);
    let event = model.event(&sat_refs)?;

    println!("Event:          {}", event.kind());
    println!("Fragments:      {}", event.fragment_count());
    println!("Input mass:     {:.3} kg", event.input_mass());
    println!("Max length:     {:.3} m", event.max_characteristic_length());
    if let Some(catastrophic) = event.catastrophic() {
        let label = if catastrophic {
            "catastrophic"
        } else {
            "non-catastrophic"
        };
        println!("Regime:         {}", label);
    }

    Ok(())
}

pub fn completions(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(args.shell, &mut cmd, "breakup", &mut io::stdout());
    Ok(())
}

pub fn man() -> Result<()> {
    let man = clap_mangen::Man::new(Cli::command());
    man.render(&mut io::stdout())
        .context("Failed to render man page")?;
    Ok(())
}
