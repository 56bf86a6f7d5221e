use std::{env, fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use tarmac::parameters::parse_string;
use tarmac::runner::SweepRunner;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "config/params.toml")]
    config: PathBuf,

    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Default log level to "info"
    if env::var("RUST_LOG").is_err() {
        unsafe { env::set_var("RUST_LOG", "info") }
    }

    pretty_env_logger::init();
    tarmac();

    let args = Args::parse();

    let config = fs::read_to_string(&args.config)
        .with_context(|| format!("Could not read parameter file {}", args.config.display()))?;
    let params = parse_string(config)?;

    let runner = SweepRunner::from_params(params.get_map("bfl")?)?;
    let output = runner.run()?;

    if output.solution.velocity_m_s.is_nan() {
        info!("The aborted and continued distance curves do not cross in the swept range");
    } else {
        info!(
            "Balanced field length: {:.1} m at a decision speed of {:.2} m/s",
            output.solution.distance_m, output.solution.velocity_m_s
        );
    }

    if let Some(path) = &args.output {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Could not write sweep output to {}", path.display()))?;
        for sample in &output.samples {
            writer.serialize(sample)?;
        }
        writer.flush()?;

        info!("Sweep samples written to {}", path.display());
    }

    Ok(())
}

fn tarmac() {
    println!("                            __|__");
    println!("                   *---*---(_)---*---*");
    println!("- ------===;;;'====--------TARMAC----===;;;===----- -  -");
    println!("                   =  =  =  =  =  =  =");
}
