//! Bitbasel CLI - marketplace catalog and wallet session from the terminal
//!
//! Catalog commands read the mock catalog:
//!   bitbasel inscriptions --search ethereum --sort price
//!   bitbasel collections --featured
//!   bitbasel galleries | stats | prices
//!
//! Wallet commands talk to a scripted wallet environment (JSON file, see
//! `ScriptedEnvironment`) and keep the session descriptor in
//! `{BITBASEL_ROOT}/{app}/data/local_storage.json`:
//!   bitbasel providers --env wallets.json
//!   bitbasel connect unisat --env wallets.json
//!   bitbasel status | disconnect | sign <message>
//!
//! Output format:
//!   --json     Output raw JSON (default for non-tty)
//!   --pretty   Pretty-print JSON (default for tty)

use anyhow::{anyhow, bail, Context, Result};
use bitbasel::catalog::{FilterUpdate, SortKey};
use bitbasel::logging::init_logging;
use bitbasel::wallet::{ScriptedEnvironment, WalletEnvironment};
use bitbasel::{CatalogConfig, MarketConfig, Marketplace, RestoreOutcome};
use serde_json::{json, Value};
use std::env;
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::debug;

fn main() {
    init_logging();

    let args: Vec<String> = env::args().collect();
    let opts = ParsedArgs::parse(&args[1..]);

    if opts.help {
        print_usage();
        return;
    }

    if opts.version {
        println!("bitbasel {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let Some(command) = opts.command.clone() else {
        print_usage();
        return;
    };

    let result = tokio::runtime::Runtime::new()
        .context("Failed to start runtime")
        .and_then(|rt| rt.block_on(run(&command, &opts)));

    let pretty = !opts.json && (opts.pretty || std::io::stdout().is_terminal());
    match result {
        Ok(output) => println!("{}", render(&output, pretty)),
        Err(e) => {
            eprintln!("{}", render(&json!({"error": format!("{:#}", e)}), pretty));
            std::process::exit(1);
        }
    }
}

fn render(value: &Value, pretty: bool) -> String {
    let rendered = if pretty { serde_json::to_string_pretty(value) } else { serde_json::to_string(value) };
    rendered.unwrap_or_else(|_| value.to_string())
}

async fn run(command: &str, opts: &ParsedArgs) -> Result<Value> {
    match command {
        "inscriptions" | "ls" => cmd_inscriptions(opts).await,
        "collections" => cmd_collections(opts).await,
        "galleries" => cmd_galleries(opts).await,
        "stats" => cmd_stats(opts).await,
        "prices" => cmd_prices(opts).await,
        "providers" => cmd_providers(opts),
        "connect" => cmd_connect(opts).await,
        "status" => cmd_status(opts).await,
        "disconnect" => cmd_disconnect(opts).await,
        "sign" => cmd_sign(opts).await,
        other => bail!("Unknown command: {}", other),
    }
}

#[derive(Default)]
struct ParsedArgs {
    command: Option<String>,
    rest: Vec<String>,
    app: Option<String>,
    env_file: Option<String>,
    // Catalog options
    search: Option<String>,
    sort: Option<String>,
    collection: Option<String>,
    media: Option<String>,
    min: Option<f64>,
    max: Option<f64>,
    listed: bool,
    featured: bool,
    // Output options
    json: bool,
    pretty: bool,
    help: bool,
    version: bool,
}

impl ParsedArgs {
    fn parse(args: &[String]) -> Self {
        let mut opts = ParsedArgs::default();
        let mut positional = Vec::new();
        let mut i = 0;

        while i < args.len() {
            let arg = &args[i];
            let value = args.get(i + 1).cloned();
            let mut takes_value = true;
            match arg.as_str() {
                "--help" | "-h" => { opts.help = true; takes_value = false; }
                "--version" | "-V" => { opts.version = true; takes_value = false; }
                "--json" => { opts.json = true; takes_value = false; }
                "--pretty" => { opts.pretty = true; takes_value = false; }
                "--listed" => { opts.listed = true; takes_value = false; }
                "--featured" => { opts.featured = true; takes_value = false; }
                "--app" | "-a" => opts.app = value,
                "--env" | "-e" => opts.env_file = value,
                "--search" | "-s" => opts.search = value,
                "--sort" => opts.sort = value,
                "--collection" | "-c" => opts.collection = value,
                "--media" | "-m" => opts.media = value,
                "--min" => opts.min = value.and_then(|v| v.parse().ok()),
                "--max" => opts.max = value.and_then(|v| v.parse().ok()),
                _ if !arg.starts_with('-') => {
                    positional.push(arg.clone());
                    takes_value = false;
                }
                _ => takes_value = false, // Ignore unknown flags
            }
            i += if takes_value { 2 } else { 1 };
        }

        // First positional is command, the rest are its arguments
        if !positional.is_empty() {
            opts.command = Some(positional.remove(0));
        }
        opts.rest = positional;

        // Environment variables (lower priority than CLI args)
        if opts.env_file.is_none() {
            opts.env_file = env::var("BITBASEL_ENV").ok().filter(|s| !s.is_empty());
        }

        opts
    }

    fn config(&self) -> MarketConfig {
        let mut config = MarketConfig::from_env().with_catalog(CatalogConfig::instant()).without_restore();
        if let Some(app) = &self.app {
            config.app = app.clone();
        }
        config
    }

    fn environment(&self) -> Result<Arc<dyn WalletEnvironment>> {
        let env = match &self.env_file {
            Some(path) => {
                let raw = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
                ScriptedEnvironment::from_json(&raw).with_context(|| format!("Invalid wallet environment {}", path))?
            }
            None => ScriptedEnvironment::new(),
        };
        Ok(Arc::new(env))
    }

    fn market(&self) -> Result<Marketplace> {
        Ok(Marketplace::from_config(self.config(), self.environment()?))
    }

    fn filter_update(&self) -> FilterUpdate {
        let mut update = FilterUpdate::default();
        if self.min.is_some() || self.max.is_some() {
            let (lo, hi) = bitbasel::catalog::DEFAULT_PRICE_RANGE;
            update = update.price_range(self.min.unwrap_or(lo), self.max.unwrap_or(hi));
        }
        if let Some(c) = &self.collection {
            update = update.collection(Some(c.clone()));
        }
        if let Some(m) = &self.media {
            update = update.media_type(Some(m.clone()));
        }
        update
    }
}

fn print_usage() {
    println!(
        r#"bitbasel - Ordinals marketplace CLI

USAGE:
    bitbasel <command> [args] [options]

CATALOG COMMANDS:
    inscriptions            Filtered, sorted inscriptions
    collections             All collections
    galleries               Curated galleries
    stats                   Marketplace statistics
    prices                  BTC / ckBTC price snapshot

WALLET COMMANDS:
    providers               Supported wallets and whether they are installed
    connect <provider>      Connect and remember the session (24h)
    status                  Reconnect from the stored session and report it
    disconnect              Forget the stored session
    sign <message>          Sign with the connected wallet (Unisat only)

CATALOG OPTIONS:
    --search, -s <text>     Match title, inscription id or collection
    --sort <key>            newest|oldest|price|rarity (default: newest)
    --collection, -c <name> Exact collection name
    --media, -m <type>      Exact media type (e.g. image/webp)
    --min <n> / --max <n>   Inclusive raw price range
    --listed                Only listed inscriptions
    --featured              Only verified collections

WALLET OPTIONS:
    --env, -e <file>        Scripted wallet environment JSON (env: BITBASEL_ENV)
    --app, -a <name>        Storage namespace (env: BITBASEL_APP)

OUTPUT OPTIONS:
    --json                  Raw JSON output
    --pretty                Pretty-print JSON
    --version, -V           Print version

ENVIRONMENT:
    BITBASEL_ROOT           Storage root (default: platform data dir)
    BITBASEL_PROVIDERS      Enabled providers, comma separated
    BITBASEL_LIVENESS_SECS  Liveness check interval
    BITBASEL_LOG_FORMAT     compact|pretty|json logs on stderr
    BITBASEL_LOG_JSON=1     Same as BITBASEL_LOG_FORMAT=json

EXAMPLES:
    bitbasel inscriptions --search ethereum --sort rarity
    bitbasel inscriptions --collection "Ethereum Nature" --json | jq '.[].id'
    bitbasel connect unisat --env wallets.json
"#
    );
}

async fn cmd_inscriptions(opts: &ParsedArgs) -> Result<Value> {
    let market = opts.market()?;
    let catalog = market.catalog();
    catalog.fetch_inscriptions().await?;

    if let Some(search) = &opts.search {
        catalog.set_search(search.clone());
    }
    if let Some(sort) = &opts.sort {
        catalog.set_sort(sort.parse::<SortKey>().map_err(|e| anyhow!(e))?);
    }
    catalog.set_filter(opts.filter_update());

    let mut items = catalog.filtered_sorted_inscriptions();
    if opts.listed {
        items.retain(|i| i.listed);
    }
    debug!("{} inscriptions after filtering", items.len());
    Ok(serde_json::to_value(items)?)
}

async fn cmd_collections(opts: &ParsedArgs) -> Result<Value> {
    let market = opts.market()?;
    market.catalog().fetch_collections().await?;
    let collections = if opts.featured {
        market.catalog().featured_collections()
    } else {
        market.catalog().collections()
    };
    Ok(serde_json::to_value(collections)?)
}

async fn cmd_galleries(opts: &ParsedArgs) -> Result<Value> {
    let market = opts.market()?;
    market.catalog().fetch_galleries().await?;
    Ok(serde_json::to_value(market.catalog().galleries())?)
}

async fn cmd_stats(opts: &ParsedArgs) -> Result<Value> {
    let market = opts.market()?;
    let catalog = market.catalog();
    catalog.fetch_stats().await?;
    catalog.fetch_inscriptions().await?;
    Ok(json!({
        "stats": catalog.stats(),
        "listed": catalog.listed_inscriptions().len(),
        "totalValue": catalog.total_value(),
    }))
}

async fn cmd_prices(opts: &ParsedArgs) -> Result<Value> {
    let market = opts.market()?;
    market.catalog().fetch_price_snapshot().await?;
    Ok(serde_json::to_value(market.catalog().price_snapshot())?)
}

fn cmd_providers(opts: &ParsedArgs) -> Result<Value> {
    let market = opts.market()?;
    Ok(serde_json::to_value(market.wallet().provider_options())?)
}

async fn cmd_connect(opts: &ParsedArgs) -> Result<Value> {
    let name = opts.rest.first().ok_or_else(|| anyhow!("Usage: bitbasel connect <provider>"))?;
    let market = opts.market()?;
    let wallet = market.wallet();
    let session = wallet.connect_by_name(name, true).await?;
    wallet.refresh_balance().await;
    let session = wallet.session().unwrap_or(session);
    market.shutdown();
    Ok(json!({
        "session": session,
        "shortAddress": session.short_address(),
        "balanceBtc": session.balance_btc(),
    }))
}

async fn cmd_status(opts: &ParsedArgs) -> Result<Value> {
    let market = opts.market()?;
    let wallet = market.wallet();
    let outcome = wallet.restore_from_storage().await;
    market.shutdown();
    Ok(json!({
        "restore": outcome,
        "connected": wallet.is_connected(),
        "session": wallet.session(),
        "shortAddress": wallet.short_address(),
        "balanceBtc": wallet.balance_btc(),
        "error": wallet.error(),
    }))
}

async fn cmd_disconnect(opts: &ParsedArgs) -> Result<Value> {
    let market = opts.market()?;
    let wallet = market.wallet();
    let outcome = wallet.restore_from_storage().await;
    wallet.disconnect().await;
    market.shutdown();
    Ok(json!({"disconnected": true, "hadSession": outcome == RestoreOutcome::Restored}))
}

async fn cmd_sign(opts: &ParsedArgs) -> Result<Value> {
    if opts.rest.is_empty() {
        bail!("Usage: bitbasel sign <message>");
    }
    let message = opts.rest.join(" ");
    let market = opts.market()?;
    let wallet = market.wallet();
    if wallet.restore_from_storage().await != RestoreOutcome::Restored {
        bail!("No wallet connected. Run 'bitbasel connect <provider>' first.");
    }
    let signature = wallet.sign_message(&message).await;
    market.shutdown();
    Ok(json!({"message": message, "signature": signature?}))
}
