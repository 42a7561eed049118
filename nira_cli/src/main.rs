use clap::{Parser, Subcommand};
use nira_core::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "nira")]
#[command(about = "Validate body attribute and measurement records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Use this config file instead of the default one
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a person record and show age and BMI
    Human {
        /// JSON document, or '-' for stdin
        file: PathBuf,
    },

    /// Validate body-shape circumferences and show them in centimeters
    BodyShape {
        /// JSON document, or '-' for stdin
        file: PathBuf,
    },

    /// Validate a weight measurement and show it in kilograms
    Weight {
        /// JSON document, or '-' for stdin
        file: PathBuf,
    },

    /// Validate a length measurement and show it in centimeters
    Length {
        /// JSON document, or '-' for stdin
        file: PathBuf,
    },

    /// Convert a value to kilograms or centimeters
    Convert {
        value: f64,

        /// Source unit (kg, lb, g, cm, m, in, ft)
        unit: String,
    },
}

/// Settings resolved from config file and command-line flags
struct Output {
    format: OutputFormat,
    precision: usize,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    nira_core::logging::init_with_level(&config.logging.level);

    let output = Output {
        format: if cli.json {
            OutputFormat::Json
        } else {
            config.output.format
        },
        precision: config.output.precision,
    };

    match cli.command {
        Commands::Human { file } => cmd_human(&file, &output),
        Commands::BodyShape { file } => cmd_body_shape(&file, &output),
        Commands::Weight { file } => cmd_measurement::<WeightUnit>(&file, &output),
        Commands::Length { file } => cmd_measurement::<LengthUnit>(&file, &output),
        Commands::Convert { value, unit } => cmd_convert(value, &unit, &output),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    tracing::debug!("Read {} bytes from {:?}", contents.len(), path);
    Ok(serde_json::from_str(&contents)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[derive(Serialize)]
struct HumanReport<'a> {
    #[serde(flatten)]
    human: &'a Human,
    age: u32,
    bmi: f64,
    bmi_category: BmiCategory,
}

fn cmd_human(file: &Path, output: &Output) -> Result<()> {
    let human: Human = read_json(file)?;

    if output.format == OutputFormat::Json {
        return print_json(&HumanReport {
            human: &human,
            age: human.age(),
            bmi: human.bmi(),
            bmi_category: human.bmi_category(),
        });
    }

    println!("  Name:    {}", human.name());
    println!("  Gender:  {}", human.gender());
    println!(
        "  Born:    {} (age {})",
        human.date_of_birth().format("%d-%m-%Y"),
        human.age()
    );
    println!("  Weight:  {} kg", human.weight());
    println!("  Height:  {} cm", human.height());
    println!("  BMI:     {:.2} ({})", human.bmi(), human.bmi_category());
    Ok(())
}

fn cmd_body_shape(file: &Path, output: &Output) -> Result<()> {
    let body: BodyShapeMeasurements = read_json(file)?;

    if output.format == OutputFormat::Json {
        return print_json(&body);
    }

    if body.is_empty() {
        println!("No circumferences recorded.");
        return Ok(());
    }

    for (part, measurement) in body.iter() {
        println!(
            "  {:<22} {:.*} {}",
            format!("{}:", part.label()),
            output.precision,
            measurement.value(),
            measurement.unit()
        );
    }
    Ok(())
}

fn cmd_measurement<U: MeasureUnit>(file: &Path, output: &Output) -> Result<()> {
    let measurement: Measurement<U> = read_json(file)?;
    let normalized = measurement.normalized();

    if output.format == OutputFormat::Json {
        return print_json(&normalized);
    }

    println!(
        "  {}: {} {} = {:.*} {}",
        U::LABEL,
        measurement.value(),
        measurement.unit(),
        output.precision,
        normalized.value(),
        normalized.unit()
    );
    println!(
        "  Taken:  {} {}",
        measurement.measurement_date(),
        measurement.measurement_time()
    );
    Ok(())
}

#[derive(Serialize)]
struct Conversion<'a> {
    value: f64,
    unit: &'a str,
}

fn cmd_convert(value: f64, unit: &str, output: &Output) -> Result<()> {
    let unit: AnyUnit = unit.parse()?;
    let converted = unit.to_canonical(value);
    tracing::debug!("Converted {} {:?} to {}", value, unit, converted);

    if output.format == OutputFormat::Json {
        return print_json(&Conversion {
            value: converted,
            unit: unit.canonical_symbol(),
        });
    }

    println!("{:.*} {}", output.precision, converted, unit.canonical_symbol());
    Ok(())
}
