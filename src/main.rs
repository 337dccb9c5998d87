use storedash::adapters::StaticSessionProvider;
use storedash::config::AppConfig;
use storedash::dashboard::Dashboard;
use storedash::error::{DashError, DashResult, ErrorContext, ResultExt};

use color_eyre::Result;
use std::sync::Arc;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_usage() {
    println!("storedash {}", VERSION);
    println!();
    println!("Usage: storedash <path>");
    println!();
    println!("Resolves a storefront path for the session given by STOREDASH_USER_ID and");
    println!("STOREDASH_ROLE, prints the result as JSON and, when authorized, loads the");
    println!("page's data from STOREDASH_API_URL.");
    println!();
    println!("Environment:");
    println!("  STOREDASH_API_URL        Backend base URL (default http://localhost:3000)");
    println!("  STOREDASH_API_TOKEN      Bearer token for backend requests");
    println!("  STOREDASH_LOCALE         en | es | pt");
    println!("  STOREDASH_TIMEOUT_SECS   Request timeout in seconds");
    println!("  STOREDASH_USER_ID        Signed-in user (unset: no session)");
    println!("  STOREDASH_ROLE           ADMIN | USER | CUSTOMER");
    println!("  STOREDASH_LOG            tracing filter (default storedash=info)");
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|arg| arg == "--version") {
        println!("storedash {}", VERSION);
        return Ok(());
    }

    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        print_usage();
        return Ok(());
    }

    let path = match args.first() {
        Some(path) => path.clone(),
        None => {
            print_usage();
            std::process::exit(2);
        }
    };

    color_eyre::install()?;

    if let Err(e) = storedash::logging::init() {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let dashboard = match setup() {
        Ok(dashboard) => dashboard,
        Err(err) => {
            report(&err);
            std::process::exit(1);
        }
    };

    let runtime = tokio::runtime::Runtime::new()?;
    let today = chrono::Utc::now().date_naive();

    match runtime.block_on(dashboard.visit(&path, today)) {
        Ok(visit) => {
            println!("{}", serde_json::to_string_pretty(&visit)?);
            Ok(())
        }
        Err(err) => {
            report(&err);
            std::process::exit(1);
        }
    }
}

fn setup() -> DashResult<Dashboard> {
    let config = AppConfig::from_env()
        .context(ErrorContext::new("load_config").with_component("config"))?;
    let provider = StaticSessionProvider::from_env()
        .context(ErrorContext::new("load_session").with_component("adapters"))?;
    Dashboard::from_config(&config, Arc::new(provider))
}

fn report(err: &DashError) {
    tracing::error!(code = err.error_code(), category = %err.category(), "{}", err);
    eprintln!("error[{}]: {}", err.error_code(), err.user_message());
    eprintln!("hint: {}", err.recovery_hint());
}
