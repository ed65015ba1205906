use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use toolflow::min_flow::{Capacity, Cost};
use toolflow::{solve_instance, Encoder, ProblemInstance};

#[derive(Parser, Debug)]
#[command(name = "toolflow")]
#[command(about = "Tool switching with uniform slots as minimum cost flow", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve instance files and write one csv row per encoder and instance
    Solve {
        /// Encoders to run (pf, lc, lsg). All of them if omitted.
        #[arg(short, long)]
        encoder: Vec<Encoder>,

        /// Penalty K of the forced arcs. 0 picks one automatically.
        #[arg(short, long, default_value_t = 0)]
        penalty: Cost,

        /// Number of runs to average the time over
        #[arg(short, long, default_value_t = 1)]
        runs: u32,

        /// Csv output path ("-" for stdout)
        #[arg(short, long, default_value = "-")]
        output: String,

        /// Instance files, or directories of *.txt instance files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
    /// Write random feasible instances
    Generate {
        #[arg(long)]
        tools: usize,
        #[arg(long)]
        jobs: usize,
        #[arg(long)]
        capacity: Capacity,
        #[arg(long, default_value_t = 1)]
        count: usize,
        #[arg(long, default_value_t = 1)]
        min_cost: Cost,
        #[arg(long, default_value_t = 10)]
        max_cost: Cost,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Output directory
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    match args.command {
        Command::Solve {
            encoder,
            penalty,
            runs,
            output,
            inputs,
        } => {
            let encoders = if encoder.is_empty() {
                vec![
                    Encoder::PairwiseFuture,
                    Encoder::ChainCarryOver,
                    Encoder::IntervalGap,
                ]
            } else {
                encoder
            };
            let files = collect_files(&inputs)?;
            let writer: Box<dyn Write> = if output == "-" {
                Box::new(std::io::stdout())
            } else {
                Box::new(
                    fs::File::create(&output)
                        .with_context(|| format!("failed to create {}", output))?,
                )
            };
            solve_all(&files, &encoders, penalty, runs.max(1), BufWriter::new(writer))
        }
        Command::Generate {
            tools,
            jobs,
            capacity,
            count,
            min_cost,
            max_cost,
            seed,
            out,
        } => generate(tools, jobs, capacity, count, min_cost..=max_cost, seed, &out),
    }
}

///
/// Expand directories into their `*.txt` files, sorted by name.
///
fn collect_files(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut entries = fs::read_dir(input)
                .with_context(|| format!("failed to read directory {}", input.display()))?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| p.is_file() && p.extension().map_or(false, |ext| ext == "txt"))
                .collect::<Vec<_>>();
            entries.sort();
            files.extend(entries);
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}

fn solve_all<W: Write>(
    files: &[PathBuf],
    encoders: &[Encoder],
    penalty: Cost,
    runs: u32,
    mut writer: W,
) -> Result<()> {
    writeln!(writer, "encoder,test,N,M,C,total_cost,millis")?;
    for file in files {
        let instance = match ProblemInstance::load_from_file(file) {
            Ok(instance) => instance,
            Err(e) => {
                log::error!("{}: {}", file.display(), e);
                continue;
            }
        };
        let name = file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        for &encoder in encoders {
            let start = Instant::now();
            let mut result = None;
            for _ in 0..runs {
                result = Some(solve_instance(&instance, encoder, penalty));
            }
            let millis = start.elapsed().as_secs_f64() * 1000.0 / runs as f64;
            match result {
                Some(Ok(plan)) => {
                    log::info!("{} [{}] cost={} in {:.3}ms", name, encoder, plan.cost, millis);
                    writeln!(
                        writer,
                        "{},{},{},{},{},{},{:.3}",
                        encoder,
                        name,
                        instance.job_count,
                        instance.tool_count,
                        instance.capacity,
                        plan.cost,
                        millis
                    )?;
                }
                Some(Err(e)) => log::error!("{} [{}]: {}", file.display(), encoder, e),
                None => {}
            }
        }
    }
    writer.flush()?;
    Ok(())
}

fn generate(
    tools: usize,
    jobs: usize,
    capacity: Capacity,
    count: usize,
    costs: std::ops::RangeInclusive<Cost>,
    seed: u64,
    out: &Path,
) -> Result<()> {
    if costs.is_empty() || *costs.start() < 0 {
        bail!(
            "invalid cost range {}..={}",
            costs.start(),
            costs.end()
        );
    }
    fs::create_dir_all(out).with_context(|| format!("failed to create {}", out.display()))?;
    let mut rng = StdRng::seed_from_u64(seed);
    for i in 0..count {
        let instance = ProblemInstance::random(&mut rng, tools, jobs, capacity, costs.clone());
        let path = out.join(format!("M{}_N{}_C{}_{:03}.txt", tools, jobs, capacity, i));
        fs::write(&path, instance.to_string())
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("wrote {}", path.display());
    }
    Ok(())
}
