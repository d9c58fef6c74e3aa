use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tradeviz::{layout, stats, storage, viz};

#[derive(Parser, Debug)]
#[command(
    name = "tradeviz",
    version,
    about = "Lay out and render small static charts, and fit regression lines"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a chart request (JSON) to SVG.
    Render(RenderArgs),
    /// Fit an OLS line to an `x,y` CSV table.
    Regress(RegressArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Chart request file (config + kind + data).
    request: PathBuf,
    /// Output SVG path.
    #[arg(short, long)]
    out: PathBuf,
    /// Also write the laid-out geometry as JSON.
    #[arg(long)]
    geometry: Option<PathBuf>,
    /// Override the configured width.
    #[arg(long)]
    width: Option<u32>,
    /// Override the configured height.
    #[arg(long)]
    height: Option<u32>,
    /// Override the configured title.
    #[arg(long)]
    title: Option<String>,
}

#[derive(Args, Debug)]
struct RegressArgs {
    /// CSV file with an `x,y` header.
    points: PathBuf,
    /// Also print r, t and df.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Up to 4 decimals, trailing zeros and dot trimmed.
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
        Command::Regress(args) => cmd_regress(args),
    }
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let mut request = storage::load_request(&args.request)?;
    if let Some(w) = args.width {
        request.config.width = w;
    }
    if let Some(h) = args.height {
        request.config.height = h;
    }
    if let Some(t) = args.title {
        request.config.title = Some(t);
    }

    let geometry = layout::build(&request)?;

    if let Some(path) = args.geometry.as_ref() {
        storage::save_geometry_json(&geometry, path)?;
        eprintln!("Saved {} marks to {}", geometry.marks.len(), path.display());
    }

    viz::render_svg(&geometry, &args.out)?;
    eprintln!(
        "Wrote {} chart to {}",
        request.data.kind_name(),
        args.out.display()
    );
    Ok(())
}

fn cmd_regress(args: RegressArgs) -> Result<()> {
    let points = storage::load_points_csv(&args.points)?;
    let fit = stats::linear_regression(&points)?;
    println!(
        "slope={} intercept={}",
        fmt_opt(Some(fit.slope)),
        fmt_opt(Some(fit.intercept))
    );
    if args.stats {
        let c = stats::correlation(&points)?;
        println!("r={} t={} df={}", fmt_opt(Some(c.r)), fmt_opt(c.t), c.df);
    }
    Ok(())
}
