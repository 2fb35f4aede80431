use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use worldpop::dashboard::{EMPTY_REGION_MESSAGE, bar_color, filter_by_label};
use worldpop::data::{self, CONTINENTS, KPIS, POPULATION_HISTORY, TOP_COUNTRIES};
use worldpop::storage::{ExportFormat, Table};
use worldpop::viz::util::map_locale;
use worldpop::{DashboardConfig, DashboardState, Metric, RegionFilter};
use worldpop::{stats, storage, viz};

#[derive(Parser, Debug)]
#[command(
    name = "worldpop",
    version,
    about = "Render, inspect & export the WorldPop population dashboard"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the dashboard to an SVG or PNG file.
    Render(RenderArgs),
    /// Print the country ranking, optionally filtered by region.
    Countries(CountriesArgs),
    /// Print the evolution tooltip for one year.
    Tooltip(TooltipArgs),
    /// Export a built-in table as CSV or JSON.
    Export(ExportArgs),
    /// Validate the built-in tables and report headline figures that drift from them.
    Check,
    /// Summary statistics of the observed and projected series.
    Stats(StatsArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Output path (.svg or .png).
    #[arg(long)]
    out: PathBuf,
    /// Metric for the evolution chart: pop or rate.
    #[arg(long)]
    metric: Option<Metric>,
    /// Region filter label (Todos, Asia, Latam, Europa, África, Norteamérica).
    #[arg(long)]
    region: Option<String>,
    /// Canvas width in pixels (default 1280).
    #[arg(long)]
    width: Option<u32>,
    /// Canvas height in pixels (default 1150).
    #[arg(long)]
    height: Option<u32>,
    /// Number locale, e.g. en, de, fr.
    #[arg(long)]
    locale: Option<String>,
    /// Draw the evolution tooltip for this year (e.g. 2023).
    #[arg(long)]
    hover: Option<String>,
    /// JSON config file; explicit flags win over its values.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct CountriesArgs {
    /// Region label; a label no country carries prints the empty-state message.
    #[arg(long, default_value = "Todos")]
    region: String,
}

#[derive(Args, Debug)]
struct TooltipArgs {
    /// Year label, e.g. 1950 or 2030.
    #[arg(long)]
    year: String,
    #[arg(long, default_value = "pop")]
    metric: Metric,
    #[arg(long, default_value = "en")]
    locale: String,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum TableArg {
    History,
    Continents,
    Countries,
}

impl From<TableArg> for Table {
    fn from(t: TableArg) -> Self {
        match t {
            TableArg::History => Table::History,
            TableArg::Continents => Table::Continents,
            TableArg::Countries => Table::Countries,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Output path (format inferred by --format or extension).
    #[arg(long)]
    out: PathBuf,
    #[arg(long, value_enum, default_value = "countries")]
    table: TableArg,
    /// Region filter for the countries table.
    #[arg(long, default_value = "Todos")]
    region: RegionFilter,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
}

#[derive(Args, Debug)]
struct StatsArgs {
    #[arg(long, default_value = "pop")]
    metric: Metric,
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Format up to 4 decimals, then trim trailing zeros and trailing dot.
            let s = format!("{:.4}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Countries(args) => cmd_countries(args),
        Command::Tooltip(args) => cmd_tooltip(args),
        Command::Export(args) => cmd_export(args),
        Command::Check => cmd_check(),
        Command::Stats(args) => cmd_stats(args),
    }
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let mut cfg = match args.config.as_ref() {
        Some(path) => DashboardConfig::from_json_file(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(m) = args.metric {
        cfg.metric = m;
    }
    if let Some(r) = args.region {
        cfg.region = r;
    }
    if let Some(w) = args.width {
        cfg.width = w;
    }
    if let Some(h) = args.height {
        cfg.height = h;
    }
    if let Some(l) = args.locale {
        cfg.locale = l;
    }

    let state = cfg.state()?;
    let mut opts = cfg.render_options();
    opts.hover_year = args.hover;
    viz::render_dashboard(&state.view(), &args.out, &opts)
        .with_context(|| format!("rendering {}", args.out.display()))?;
    eprintln!("Wrote dashboard to {}", args.out.display());
    Ok(())
}

fn cmd_countries(args: CountriesArgs) -> Result<()> {
    // Known labels are normalized ("africa" → "África"); anything else is matched verbatim.
    let label = match args.region.parse::<RegionFilter>() {
        Ok(filter) => filter.label().to_string(),
        Err(_) => args.region.trim().to_string(),
    };
    let rows = filter_by_label(&TOP_COUNTRIES, &label);
    if rows.is_empty() {
        println!("{EMPTY_REGION_MESSAGE}");
        return Ok(());
    }
    for (i, c) in rows.iter().enumerate() {
        println!(
            "{:>2}. {:<12} {:>5} M  {:<13} {}",
            i + 1,
            c.name,
            c.population,
            c.region.label(),
            bar_color(i).hex()
        );
    }
    Ok(())
}

fn cmd_tooltip(args: TooltipArgs) -> Result<()> {
    let mut state = DashboardState::new();
    state.select_metric(args.metric);
    let view = state.view();
    let index = view
        .evolution
        .index_of(&args.year)
        .ok_or_else(|| anyhow::anyhow!("no sample for year '{}'", args.year))?;
    let locale = map_locale(&args.locale);
    if let Some(tip) = view.evolution.tooltip(Some(index), locale) {
        println!("{}", tip.label);
        for line in tip.lines {
            println!("{}", line.text);
        }
    }
    Ok(())
}

fn cmd_export(args: ExportArgs) -> Result<()> {
    let format = match args.format {
        Some(OutFormat::Csv) => ExportFormat::Csv,
        Some(OutFormat::Json) => ExportFormat::Json,
        None => ExportFormat::from_path(&args.out)?,
    };
    let n = storage::export_table(args.table.into(), args.region, format, &args.out)?;
    eprintln!("Saved {} rows to {}", n, args.out.display());
    Ok(())
}

fn cmd_check() -> Result<()> {
    data::validate().context("dataset validation failed")?;
    println!(
        "Tables OK: {} samples, {} continents, {} countries",
        POPULATION_HISTORY.len(),
        CONTINENTS.len(),
        TOP_COUNTRIES.len()
    );
    let drifts = stats::kpi_drift(&KPIS, &CONTINENTS, &POPULATION_HISTORY);
    stats::log_drift(&drifts);
    for d in &drifts {
        let status = if d.differs() { "differs" } else { "ok" };
        println!(
            "{:<20} shown={:<8} derived={} ({})  {}",
            d.title,
            d.shown,
            fmt_opt(Some(d.derived)),
            d.source,
            status
        );
    }
    Ok(())
}

fn cmd_stats(args: StatsArgs) -> Result<()> {
    for s in stats::series_summary(&POPULATION_HISTORY, args.metric) {
        println!(
            "{:?} • {}  count={} years={}..{}  min={} max={} mean={} median={}",
            s.segment,
            s.metric.key(),
            s.count,
            s.first_year.unwrap_or("NA"),
            s.last_year.unwrap_or("NA"),
            fmt_opt(s.min),
            fmt_opt(s.max),
            fmt_opt(s.mean),
            fmt_opt(s.median)
        );
    }
    Ok(())
}
