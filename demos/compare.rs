use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::eyre;

use spectroscopy_rs::ccs;
use spectroscopy_rs::config::GameConfig;
use spectroscopy_rs::spectroscopy::Report;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// File with process equations.
    #[arg(value_name = "FILE")]
    path: PathBuf,

    /// Left-hand process.
    #[arg(value_name = "P")]
    left: String,

    /// Right-hand process.
    #[arg(value_name = "Q")]
    right: String,

    /// Print the report as JSON.
    #[clap(long)]
    json: bool,

    /// Position table size (in bits, so the actual size is `2^size` buckets).
    #[clap(long, value_name = "INT", default_value = "12")]
    table_bits: usize,

    /// Refuse to partition candidate sets larger than this.
    #[clap(long, value_name = "INT")]
    partition_limit: Option<usize>,

    /// Log game construction and solving steps.
    #[clap(long)]
    debug: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    let level = if args.debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };
    simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let text = std::fs::read_to_string(&args.path)?;
    let lts = ccs::parse(&text)?;
    log::info!("Parsed {} states, {} transitions", lts.num_states(), lts.num_transitions());

    let p = lts.process(&args.left).ok_or_else(|| eyre!("no process named {}", args.left))?;
    let q = lts.process(&args.right).ok_or_else(|| eyre!("no process named {}", args.right))?;

    let mut config = GameConfig::default().with_table_bits(args.table_bits);
    if let Some(limit) = args.partition_limit {
        config = config.with_partition_limit(limit);
    }

    let report = Report::new(&lts, p, q, &config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{} vs {}", report.left, report.right);
        println!("  distinguishing budgets:  {}", report.forward);
        let preorders: Vec<&str> = report.preorders.finest().iter().map(|n| n.name()).collect();
        let equivalences: Vec<&str> = report.equivalences.finest().iter().map(|n| n.name()).collect();
        println!("  preorders:    {}", preorders.join(", "));
        println!("  equivalences: {}", equivalences.join(", "));
        println!("{} vs {}", report.right, report.left);
        println!("  distinguishing budgets:  {}", report.backward);
    }

    println!("Total time: {:.3} s", time_total.elapsed().as_secs_f64());
    Ok(())
}
