use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use squatscan::http::ServerResponse;
use squatscan::scan::{analyze_domain, ScanOptions, ScanResult};
use std::fs;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Domain squatting scanner
#[derive(Parser, Debug)]
#[command(name = "squatscan")]
#[command(about = "Generate lookalike permutations of a domain and probe the live ones")]
struct Cli {
    /// Target domain to scan (e.g. example.com)
    domain: String,

    /// Maximum concurrent probes (default: twice the CPU count)
    #[arg(short = 'c', long = "concurrency")]
    concurrency: Option<usize>,

    /// Per-candidate timeout in milliseconds
    #[arg(short = 't', long = "timeout", default_value = "15000")]
    timeout: u64,

    /// Run WHOIS/RDAP lookups on live candidates
    #[arg(short = 'w', long = "whois")]
    whois: bool,

    /// Score candidate page content against the target page
    #[arg(long = "content")]
    content: bool,

    /// Keep only candidates with MX records
    #[arg(long = "mx-only")]
    mx_only: bool,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value = "table")]
    format: Format,

    /// Write output to a file instead of stdout
    #[arg(short = 'o', long = "output")]
    output: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Table,
    Json,
    Csv,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let defaults = ScanOptions::default();
    let options = ScanOptions {
        max_concurrency: cli.concurrency.unwrap_or(defaults.max_concurrency),
        timeout_per_candidate: Duration::from_millis(cli.timeout),
        ordered: true,
        whois: cli.whois,
        content_hash: cli.content,
        mx_only: cli.mx_only,
    };

    let results = analyze_domain(&cli.domain, options).await?;

    let rendered = match cli.format {
        Format::Table => render_table(&results),
        Format::Json => serde_json::to_string_pretty(&results)?,
        Format::Csv => render_csv(&results)?,
    };

    match cli.output {
        Some(path) => {
            fs::write(&path, rendered)?;
            eprintln!("{} results written to {path}", results.len());
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

fn render_table(results: &[ScanResult]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Kind", "Domain", "IPs", "MX", "NS", "Wildcard", "HTTP", "Content", "Lev",
    ]);

    for result in results {
        table.add_row(vec![
            format!("{:?}", result.kind),
            result.fqdn.clone(),
            result.ip_addresses.join(" "),
            result.mx_records.len().to_string(),
            result.nameservers.len().to_string(),
            if result.wildcard { "yes" } else { "no" }.to_string(),
            http_summary(&result.server_response),
            content_summary(result),
            result.fuzzy.levenshtein.to_string(),
        ]);
    }

    format!("{table}\n{} candidates live", results.len())
}

fn render_csv(results: &[ScanResult]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);

    writer.write_record([
        "kind",
        "fqdn",
        "tld",
        "resolvable",
        "ip_addresses",
        "public_ips",
        "internal_ips",
        "mx_records",
        "nameservers",
        "wildcard",
        "http_status",
        "registrar",
        "content_score",
        "levenshtein",
        "jaro",
    ])?;

    for result in results {
        writer.write_record([
            format!("{:?}", result.kind),
            result.fqdn.clone(),
            result.tld.clone(),
            result.resolvable.to_string(),
            result.ip_addresses.join(";"),
            result.public_ips.join(";"),
            result.internal_ips.join(";"),
            result
                .mx_records
                .iter()
                .map(|mx| mx.server.clone())
                .collect::<Vec<_>>()
                .join(";"),
            result.nameservers.join(";"),
            result.wildcard.to_string(),
            http_summary(&result.server_response),
            result
                .whois
                .as_ref()
                .and_then(|whois| whois.registrar.clone())
                .unwrap_or_default(),
            content_summary(result),
            result.fuzzy.levenshtein.to_string(),
            format!("{:.3}", result.fuzzy.jaro_winkler),
        ])?;
    }

    let raw = writer
        .into_inner()
        .map_err(|err| anyhow!("flushing csv output failed: {err}"))?;

    Ok(String::from_utf8(raw)?)
}

fn http_summary(response: &ServerResponse) -> String {
    match response {
        ServerResponse::Ok {
            status_code,
            server,
            ..
        } => format!("{status_code} ({server})"),
        ServerResponse::Skipped { .. } => "skipped".to_string(),
        ServerResponse::Error { .. } => "error".to_string(),
    }
}

fn content_summary(result: &ScanResult) -> String {
    result
        .content_hash
        .as_ref()
        .map(|content| content.score.to_string())
        .unwrap_or_else(|| "-".to_string())
}
