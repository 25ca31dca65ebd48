use clap::{Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use hs_app::{AppResult, ReportOptions, Settings, record_service, settings};
use hs_load::{LoadModel, LoadResult, Payback, compare_tariffs};
use hs_retrofit::{ImprovementCandidate, evaluate_improvements_with, improvement_catalog};
use hs_uncertainty::MonteCarlo;

#[derive(Parser)]
#[command(name = "hs-cli")]
#[command(about = "HeatScope CLI - building heat load, energy and retrofit estimates", long_about = None)]
struct Cli {
    /// Settings YAML with model constants, tariffs and Monte Carlo options
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that every number in a building record can be read
    Validate {
        /// Path to the building record (YAML or JSON)
        record_path: PathBuf,
    },
    /// Compute the design load and annual energy of a building
    Load {
        /// Path to the building record (YAML or JSON)
        record_path: PathBuf,
    },
    /// Export the hourly load over a synthetic year as CSV
    Hourly {
        /// Path to the building record (YAML or JSON)
        record_path: PathBuf,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run a Monte Carlo sensitivity analysis of the design load
    MonteCarlo {
        /// Path to the building record (YAML or JSON)
        record_path: PathBuf,
        /// Number of samples (overrides the settings file)
        #[arg(short = 'n', long)]
        samples: Option<usize>,
        /// Random seed for a repeatable run (overrides the settings file)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Rank retrofit measures by payback
    Improve {
        /// Path to the building record (YAML or JSON)
        record_path: PathBuf,
    },
    /// Write the full report as JSON
    Report {
        /// Path to the building record (YAML or JSON)
        record_path: PathBuf,
        /// Output JSON file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Skip the Monte Carlo section
        #[arg(long)]
        no_monte_carlo: bool,
    },
    /// List a built-in catalog
    Catalog {
        #[arg(value_enum)]
        kind: CatalogKind,
        /// Only show entries matching this text
        #[arg(short, long, default_value = "")]
        filter: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum CatalogKind {
    Materials,
    Constructions,
    Windows,
    Cities,
    Improvements,
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = settings::load_settings_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Validate { record_path } => cmd_validate(&record_path, &settings),
        Commands::Load { record_path } => cmd_load(&record_path, &settings),
        Commands::Hourly {
            record_path,
            output,
        } => cmd_hourly(&record_path, &settings, output.as_deref()),
        Commands::MonteCarlo {
            record_path,
            samples,
            seed,
        } => cmd_monte_carlo(&record_path, settings, samples, seed),
        Commands::Improve { record_path } => cmd_improve(&record_path, &settings),
        Commands::Report {
            record_path,
            output,
            no_monte_carlo,
        } => cmd_report(&record_path, &settings, output.as_deref(), !no_monte_carlo),
        Commands::Catalog { kind, filter } => {
            cmd_catalog(kind, &filter);
            Ok(())
        }
    }
}

fn compute(record_path: &Path, settings: &Settings) -> AppResult<(LoadModel, LoadResult)> {
    let record = record_service::load_building(record_path)?;
    for field in record_service::unparsed_fields(&record) {
        eprintln!("warning: could not read '{}', using the default", field);
    }
    let model = LoadModel::new(settings.model.clone());
    let result = model.compute(&record);
    Ok((model, result))
}

fn cmd_validate(record_path: &Path, settings: &Settings) -> AppResult<()> {
    println!("Validating building record: {}", record_path.display());
    let record = record_service::load_building(record_path)?;
    record_service::validate_record(&LoadModel::new(settings.model.clone()), &record)?;
    println!("✓ Record is valid");
    Ok(())
}

fn cmd_load(record_path: &Path, settings: &Settings) -> AppResult<()> {
    let (model, result) = compute(record_path, settings)?;

    println!("Building: {}", record_path.display());
    println!(
        "  Geometry: {} floor(s), {:.1} m², {:.0} m³",
        result.geometry.floors, result.geometry.area_m2, result.geometry.volume_m3
    );
    println!(
        "  Walls: {} (U = {:.3} W/m²K)",
        result.envelope.label, result.envelope.u_value
    );
    println!("    {}", result.envelope.description);
    println!(
        "  Windows: {} (U = {:.2} W/m²K, {:.1} m²)",
        result.window.name, result.window.u_w, result.geometry.window_area_m2
    );
    println!(
        "  Climate: {}, design {:.1} °C, HDD {:.0}",
        result.climate.city.name, result.t_design_c, result.climate.hdd
    );

    println!("\nDesign load:");
    println!(
        "  Q = {:.2} kW  (range {:.2} - {:.2} kW)",
        result.q_design_w / 1000.0,
        result.q_min_w / 1000.0,
        result.q_max_w / 1000.0
    );
    for (name, watts) in result.breakdown.components() {
        println!("    {:<15} {:>10.0} W", name, watts);
    }
    println!("  Annual energy: {:.0} kWh", result.e_year_kwh);

    let condensation = &result.condensation;
    println!(
        "\nCondensation: {:?} (surface {:.1} °C, dew point {:.1} °C)",
        condensation.level, condensation.surface_temp_c, condensation.dew_point_c
    );

    println!("\nRunning costs:");
    for estimate in compare_tariffs(result.e_year_kwh, &model.config().tariffs) {
        let marker = if estimate.system == result.inputs.heating_system {
            "*"
        } else {
            " "
        };
        println!(
            " {} {:<10} {:>10.0} /yr  ({:.0} /month)",
            marker,
            estimate.system.label(),
            estimate.annual_cost,
            estimate.monthly_cost
        );
    }
    Ok(())
}

fn cmd_hourly(record_path: &Path, settings: &Settings, output: Option<&Path>) -> AppResult<()> {
    let (_model, result) = compute(record_path, settings)?;

    if let Some(path) = output {
        let rows = hs_app::write_hourly_csv(&result, BufWriter::new(File::create(path)?))?;
        println!("✓ Exported {} hours to {}", rows, path.display());
    } else {
        hs_app::write_hourly_csv(&result, io::stdout().lock())?;
    }
    Ok(())
}

fn cmd_monte_carlo(
    record_path: &Path,
    mut settings: Settings,
    samples: Option<usize>,
    seed: Option<u64>,
) -> AppResult<()> {
    let record = record_service::load_building(record_path)?;
    if let Some(samples) = samples {
        settings.monte_carlo.samples = samples;
    }
    if seed.is_some() {
        settings.monte_carlo.seed = seed;
    }

    let model = LoadModel::new(settings.model.clone());
    let mc = &settings.monte_carlo;
    let summary =
        MonteCarlo::new(&model, mc.profile.clone()).run(&record, mc.samples, &mut mc.rng());

    println!("Monte Carlo ({} samples):", summary.samples.len());
    println!(
        "  Design load  p10 {:.2} kW | p50 {:.2} kW | p90 {:.2} kW",
        summary.p10.q_design_w / 1000.0,
        summary.p50.q_design_w / 1000.0,
        summary.p90.q_design_w / 1000.0
    );
    println!(
        "  Mean {:.2} kW, std {:.2} kW",
        summary.mean_q_w / 1000.0,
        summary.std_q_w / 1000.0
    );
    println!(
        "  Annual energy p10 {:.0} | p50 {:.0} | p90 {:.0} kWh",
        summary.energy_p10_kwh, summary.energy_p50_kwh, summary.energy_p90_kwh
    );
    Ok(())
}

fn cmd_improve(record_path: &Path, settings: &Settings) -> AppResult<()> {
    let record = record_service::load_building(record_path)?;
    let model = LoadModel::new(settings.model.clone());
    let ranked = evaluate_improvements_with(&model, &record);

    if ranked.is_empty() {
        println!("No retrofit measure saves energy for this building");
        return Ok(());
    }

    println!("Retrofit measures by payback:");
    for (i, candidate) in ranked.iter().enumerate() {
        print_candidate(i + 1, candidate);
    }
    Ok(())
}

fn print_candidate(rank: usize, candidate: &ImprovementCandidate) {
    println!("  {}. {}", rank, candidate.name);
    println!(
        "     cost {:.0}, saves {:.0} kWh/yr ({:.0} /yr), -{:.2} kW",
        candidate.cost,
        candidate.saving_kwh,
        candidate.saving_per_year,
        candidate.delta_q_w / 1000.0
    );
    println!(
        "     payback {} (by power: {})",
        format_payback(candidate.payback),
        format_payback(candidate.power_payback)
    );
}

fn format_payback(payback: Payback) -> String {
    match payback {
        Payback::Years(years) => format!("{:.1} yr", years),
        Payback::Unbounded => "never".to_string(),
    }
}

fn cmd_report(
    record_path: &Path,
    settings: &Settings,
    output: Option<&Path>,
    with_monte_carlo: bool,
) -> AppResult<()> {
    let record = record_service::load_building(record_path)?;
    let report = hs_app::build_report(
        &record,
        settings,
        ReportOptions {
            monte_carlo: with_monte_carlo,
            improvements: true,
        },
    );

    if let Some(path) = output {
        hs_app::write_json(&report, BufWriter::new(File::create(path)?))?;
        println!("✓ Report written to {}", path.display());
    } else {
        hs_app::write_json(&report, io::stdout().lock())?;
    }
    Ok(())
}

fn cmd_catalog(kind: CatalogKind, filter: &str) {
    match kind {
        CatalogKind::Materials => {
            for m in hs_envelope::filter_materials(filter) {
                println!("  {:<24} {:<32} λ = {:.3} W/mK", m.key, m.display_name, m.lambda_w_mk);
            }
        }
        CatalogKind::Constructions => {
            for c in hs_envelope::constructions_catalog()
                .iter()
                .filter(|c| c.matches_query(filter))
            {
                let layers: Vec<String> = c
                    .layers
                    .iter()
                    .map(|l| format!("{} {:.0} mm", l.material_key, l.thickness_m * 1000.0))
                    .collect();
                println!("  {:<18} {:<36} {}", c.key, c.name, layers.join(" + "));
            }
        }
        CatalogKind::Windows => {
            for w in hs_envelope::window_catalog()
                .iter()
                .filter(|w| filter.is_empty() || w.key.contains(filter) || w.name.contains(filter))
            {
                println!(
                    "  {:<10} {:<36} U = {:.2}, g = {:.2}",
                    w.key, w.name, w.u_w, w.g_value
                );
            }
        }
        CatalogKind::Cities => {
            for c in hs_climate::climate_catalog()
                .iter()
                .filter(|c| c.matches_query(filter))
            {
                println!(
                    "  {:<12} {:<18} design {:>6.1} °C, HDD {:>5.0}",
                    c.key, c.name, c.t_design_c, c.hdd
                );
            }
        }
        CatalogKind::Improvements => {
            for action in improvement_catalog() {
                println!("  {:<16} {}", action.key, action.name);
            }
        }
    }
}
