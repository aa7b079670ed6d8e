//! qsogeo CLI: enrich ADIF logs with positions and distances.

use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use qsogeo::{
    config::AppConfig,
    core::distance::DistanceMethod,
    engine::enricher::Enricher,
    persist::{
        ReportSink, json::JsonReportSink, markdown::MarkdownReportSink, markers::MarkerReportSink,
        sqlite::SqliteReportSink,
    },
    process::{find_logs, process_file},
    summit::sota::SotaApiLookup,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MethodArg {
    /// Spherical haversine
    Haversine,
    /// Ellipsoidal arc including summit heights
    Ellipsoidal,
}

impl From<MethodArg> for DistanceMethod {
    fn from(value: MethodArg) -> Self {
        match value {
            MethodArg::Haversine => DistanceMethod::Haversine,
            MethodArg::Ellipsoidal => DistanceMethod::Ellipsoidal,
        }
    }
}

#[derive(Parser)]
#[command(name = "qsogeo")]
#[command(about = "Add contact positions and distances to ADIF logs", long_about = None)]
struct Args {
    /// ADIF file, or directory searched recursively for .adi files
    path: PathBuf,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also write a Markdown table next to each log
    #[arg(long)]
    markdown: bool,

    /// Also write GeoJSON contact markers next to each log
    #[arg(long)]
    markers: bool,

    /// Do not write the JSON report
    #[arg(long)]
    no_json: bool,

    /// Append sessions to this SQLite database
    #[arg(long)]
    sqlite: Option<PathBuf>,

    /// Distance method for summit-to-summit contacts
    #[arg(long, value_enum)]
    s2s_method: Option<MethodArg>,

    /// Summit API base URL
    #[arg(long)]
    api_url: Option<String>,

    /// Summit API timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

impl Args {
    fn into_config(self) -> Result<(PathBuf, AppConfig), String> {
        let mut cfg = match &self.config {
            Some(path) => AppConfig::from_json_file(path)
                .map_err(|e| format!("{}: {e}", path.display()))?,
            None => AppConfig::default(),
        };

        if self.markdown {
            cfg.output.markdown = true;
        }
        if self.markers {
            cfg.output.markers = true;
        }
        if self.no_json {
            cfg.output.json = false;
        }
        if let Some(db) = self.sqlite {
            cfg.output.sqlite_path = Some(db);
        }
        if let Some(method) = self.s2s_method {
            cfg.enrich.s2s_method = Some(method.into());
        }
        if let Some(url) = self.api_url {
            cfg.summit_api.base_url = url;
        }
        if let Some(secs) = self.timeout {
            cfg.summit_api.timeout_secs = secs;
        }

        Ok((self.path, cfg))
    }
}

fn build_sinks(cfg: &AppConfig) -> Result<Vec<Box<dyn ReportSink>>, String> {
    let mut sinks: Vec<Box<dyn ReportSink>> = Vec::new();
    if cfg.output.json {
        sinks.push(Box::new(JsonReportSink::new()));
    }
    if cfg.output.markdown {
        sinks.push(Box::new(MarkdownReportSink::new()));
    }
    if cfg.output.markers {
        sinks.push(Box::new(MarkerReportSink::new()));
    }
    if let Some(db) = &cfg.output.sqlite_path {
        let sink = SqliteReportSink::open(db).map_err(|e| format!("{}: {e}", db.display()))?;
        sinks.push(Box::new(sink));
    }
    Ok(sinks)
}

fn run() -> Result<usize, String> {
    let (path, cfg) = Args::parse().into_config()?;
    if !path.exists() {
        return Err(format!("{} not found", path.display()));
    }

    let lookup = SotaApiLookup::new(&cfg.summit_api).map_err(|e| e.to_string())?;
    let enricher = Enricher::new(lookup, cfg.enrich.clone());
    let mut sinks = build_sinks(&cfg)?;

    let logs = find_logs(&path);
    if logs.is_empty() {
        info!(path = %path.display(), "no .adi files found");
    }

    let mut failed = 0usize;
    for log in &logs {
        if let Err(err) = process_file(log, &enricher, &mut sinks) {
            error!(path = %log.display(), error = %err, "log failed");
            failed += 1;
        }
    }
    info!(processed = logs.len() - failed, failed, "done");

    for sink in sinks.iter_mut() {
        if let Err(err) = sink.flush() {
            error!(sink = sink.name(), error = %err, "flush failed");
            failed += 1;
        }
    }

    Ok(failed)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(0) => {}
        Ok(_) => process::exit(1),
        Err(msg) => {
            error!("{msg}");
            process::exit(1);
        }
    }
}
