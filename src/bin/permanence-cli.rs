#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use permanence::{
    io,
    report::{ReportRenderer, TextReport},
    scheduler::{parse_start_date, validate_roster, RotationOptions, Scheduler, DEFAULT_WEEKS},
};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de génération de tableaux de permanence
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Générer un tableau de permanence
    Generate(GenerateArgs),

    /// Vérifier un fichier de personnel
    Check {
        #[arg(long)]
        people: String,
    },
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// CSV du personnel (`name,is_new`)
    #[arg(long)]
    people: String,
    /// Date de départ (YYYY-MM-DD)
    #[arg(long)]
    start: String,
    #[arg(long, default_value_t = DEFAULT_WEEKS)]
    weeks: u32,
    /// Graine du tirage (tirée au hasard si absente)
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = 30)]
    min_interval_days: u32,
    #[arg(long, default_value_t = 26)]
    newcomer_wait_weeks: u32,
    #[arg(long)]
    out_csv: Option<String>,
    #[arg(long)]
    out_json: Option<String>,
    /// Export CSV des intervalles par personne
    #[arg(long)]
    out_intervals: Option<String>,
}

// Code 2 = entrée à corriger
const EXIT_INVALID_INPUT: i32 = 2;

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let code = match cli.cmd {
        Commands::Generate(args) => generate(args)?,
        Commands::Check { people } => {
            let roster = io::import_people_csv(&people)?;
            match validate_roster(&roster) {
                Ok(()) => {
                    println!(
                        "OK: {} people ({} newcomers)",
                        roster.len(),
                        roster.newcomers().count()
                    );
                    0
                }
                Err(err) => {
                    eprintln!("invalid roster: {err}");
                    EXIT_INVALID_INPUT
                }
            }
        }
    };

    std::process::exit(code);
}

fn generate(args: GenerateArgs) -> Result<i32> {
    let roster = io::import_people_csv(&args.people)?;
    let start = match parse_start_date(&args.start) {
        Ok(start) => start,
        Err(err) => {
            eprintln!("invalid input: {err}");
            return Ok(EXIT_INVALID_INPUT);
        }
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    let scheduler = Scheduler::new(RotationOptions {
        min_interval_days: args.min_interval_days,
        newcomer_wait_weeks: args.newcomer_wait_weeks,
    });

    let mut rng = StdRng::seed_from_u64(seed);
    let generation = match scheduler.generate(&roster, start, args.weeks, &mut rng) {
        Ok(generation) => generation,
        Err(err) if !err.is_fatal() => {
            eprintln!("invalid input: {err}");
            return Ok(EXIT_INVALID_INPUT);
        }
        Err(err) => return Err(err).with_context(|| format!("generation failed (seed {seed})")),
    };

    if let Some(path) = args.out_csv {
        io::export_schedule_csv(path, &generation.schedule)?;
    }
    if let Some(path) = args.out_json {
        io::export_generation_json(path, &generation)?;
    }
    if let Some(path) = args.out_intervals {
        io::export_intervals_csv(path, &generation.intervals)?;
    }
    print!("{}", TextReport.render(&generation));
    println!("seed: {seed}");
    Ok(0)
}
