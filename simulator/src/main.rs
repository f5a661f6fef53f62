use anyhow::Context;
use catalog::Catalog;
use clap::Parser;
use dashboard::bridge::{dashboard_bind_address, DashboardBridge, MarketWorkspace};
use dashboard::model::DashboardModel;
use log::info;
use offsetcore::random::SeededRandom;
use offsetcore::session::{MarketBoard, MatchingSession};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod catalog;
mod dashboard;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Carbon-offset matching driver")]
struct Args {
    /// Run one refresh + matching pass and append a summary report
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Contract the cheapest match and issue its certificate
    #[arg(long, default_value_t = false)]
    settle: bool,
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Power-plant catalog JSON (`{"powerPlants": [...]}`)
    #[arg(long)]
    plants: Option<PathBuf>,
    /// Company catalog JSON (`{"companies": [...]}`)
    #[arg(long)]
    companies: Option<PathBuf>,
    #[arg(long)]
    company: Option<String>,
    #[arg(long, default_value_t = 100.0)]
    target_offset: f64,
    #[arg(long, default_value_t = 50_000.0)]
    max_price: f64,
    /// Fixed RNG seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
    /// Use the calendar-day generator instead of the real-time one
    #[arg(long, default_value_t = false)]
    daily: bool,
    /// Keep the dashboard bridge alive for incoming match requests
    #[arg(long, default_value_t = false)]
    serve: bool,
    #[arg(long, default_value_t = 9000)]
    port: u16,
}

fn append_line(path: &Path, line: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating report dir {}", parent.display()))?;
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    writeln!(file, "{}", line).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut workflow_config = if let Some(path) = args.workflow {
        WorkflowConfig::load(path)?
    } else {
        let mut config =
            WorkflowConfig::from_args(args.company, args.target_offset, args.max_price, args.daily);
        config.plants_path = args.plants;
        config.companies_path = args.companies;
        config
    };
    if args.seed.is_some() {
        workflow_config.seed = args.seed;
    }

    let catalog = Catalog::load(
        workflow_config.plants_path.as_deref(),
        workflow_config.companies_path.as_deref(),
    )?;
    let mut board = MarketBoard::new();
    board.load(catalog.plants, catalog.companies);

    let seed = workflow_config.seed.unwrap_or_else(rand::random);
    info!("prediction seed {}", seed);
    let mut rng = SeededRandom::seeded(seed);
    let mut session = MatchingSession::new();

    let runner = Arc::new(Runner::new(workflow_config.clone()));
    let runtime = TokioBuilder::new_current_thread()
        .enable_all()
        .build()
        .context("creating runtime for settlement and signal handling")?;
    let report_dir = workflow_config.report_dir.clone();

    let mut published = None;
    if args.offline || args.settle {
        let result = runner.execute(&mut board, &mut session, &mut rng)?;
        println!(
            "Offline run -> company {}, plants {}, clean hours {}, matches {}",
            result.company_name,
            result.predictions.len(),
            result.clean_hours,
            result.matches.len()
        );
        for m in &result.matches {
            println!(
                "  {:<28} {:>8.0}/t  offset {:>7.1} t  intensity {:.3}  slots {}",
                m.plant_name,
                m.price_per_ton,
                m.offset_amount,
                m.carbon_intensity,
                m.time_slots.join(",")
            );
        }

        let report = format!(
            "seed={} company={} mode={:?} clean_hours={} matches={} best={:?}",
            seed,
            result.company_name,
            workflow_config.mode,
            result.clean_hours,
            result.matches.len(),
            result.matches.first().map(|m| (&m.plant_id, m.price_per_ton))
        );
        append_line(&report_dir.join("offline_matches.log"), &report)?;

        if args.settle {
            let settled = runtime.block_on(runner.settle(&mut session, &mut rng))?;
            let certificate = &settled.settlement.certificate;
            println!(
                "Settled {} -> certificate {} ({}), verification: {}",
                settled.settlement.receipt.contract_id,
                certificate.certificate_number,
                certificate.blockchain_hash,
                settled.verification.message
            );
            println!("PDF: {}", settled.pdf_url);
            let line = serde_json::to_string(certificate).context("serializing certificate")?;
            append_line(&report_dir.join("certificates.jsonl"), &line)?;
        }

        published = Some(DashboardModel::from_result(
            &result,
            session.criteria(),
            session.certificates(),
        ));
    }

    let snapshot = runner.metrics().snapshot();
    info!(
        "runs={} matches={} contracts ok={} failed={}",
        snapshot.matching_runs,
        snapshot.matches_emitted,
        snapshot.contracts_executed,
        snapshot.contracts_failed
    );

    if args.serve {
        let bridge = DashboardBridge::new(
            runner.clone(),
            MarketWorkspace {
                board,
                session,
                rng,
            },
        );
        match published.as_ref() {
            Some(model) => bridge.publish(model)?,
            None => {
                bridge.request_match(&workflow_config.criteria)?;
            }
        }
        bridge.spawn(dashboard_bind_address(args.port));
        bridge.publish_status(&format!(
            "HTTP bridge on port {} (Ctrl+C to stop)...",
            args.port
        ));
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}
