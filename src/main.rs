use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use registrations_client::config::Config;
use registrations_client::{demo, display, FormsClient, Session};

/// Sports organisation example client for the Dynamic Forms API.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Create a new registration form
    #[arg(long)]
    create: bool,

    /// Submit test registrations
    #[arg(long)]
    submit: bool,

    /// Retrieve all registrations
    #[arg(long)]
    retrieve: bool,

    /// Export registrations to CSV
    #[arg(long)]
    export: bool,

    /// Show the form's schema
    #[arg(long)]
    show: bool,

    /// Form ID to use
    #[arg(long)]
    form_id: Option<u64>,

    /// Per-form API key to use
    #[arg(long)]
    api_key: Option<String>,

    /// CSV file to write (default: registrations_<timestamp>.csv)
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// API base URL, overrides FORMS_API_BASE
    #[arg(long)]
    base_url: Option<String>,
}

impl Args {
    fn any_action(&self) -> bool {
        self.create || self.submit || self.retrieve || self.export || self.show
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let mut config = Config::from_env()?;
    if let Some(base_url) = &args.base_url {
        config.api_base = base_url.trim_end_matches('/').to_string();
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    tracing::debug!(api_base = %config.api_base, "using forms API");

    let client = FormsClient::new(&config)?;
    let mut session = Session::new(client, config.credentials.clone(), config.form_id);
    if args.form_id.is_some() {
        session.form_id = args.form_id;
    }
    if args.api_key.is_some() {
        session.credentials.form_key = args.api_key.clone();
    }

    if args.any_action() {
        run_actions(&args, &mut session).await;
    } else {
        run_demo(&mut session, args.output.as_deref()).await;
    }

    Ok(())
}

async fn run_actions(args: &Args, session: &mut Session) {
    if args.create {
        println!("Creating competition registration form...");
        session.create_form(&demo::competition_form()).await;
        println!();
    }

    if args.show {
        println!("Fetching form...");
        if let Err(e) = session.show_form().await {
            tracing::error!("fetching form failed: {e}");
            println!("✗ {e}");
        }
        println!();
    }

    if args.submit {
        println!("Submitting test registrations...");
        session
            .submit_registrations(&demo::sample_registrations())
            .await;
        println!();
    }

    if args.retrieve {
        println!("Retrieving registrations...");
        let registrations = session.get_registrations().await;
        display::print_registrations(&registrations);
        println!();
    }

    if args.export {
        println!("Exporting registrations to CSV...");
        let registrations = session.get_registrations().await;
        session.export(&registrations, args.output.as_deref());
    }
}

async fn run_demo(session: &mut Session, output: Option<&std::path::Path>) {
    println!("Sports Organization Form Integration Example");
    println!("{}", "=".repeat(50));
    println!();

    println!("Step 1: Creating competition registration form...");
    session.create_form(&demo::competition_form()).await;
    println!();

    println!("Step 2: Submitting sample registrations...");
    session
        .submit_registrations(&[demo::demo_registration()])
        .await;
    println!();

    println!("Step 3: Retrieving all registrations...");
    let registrations = session.get_registrations().await;
    println!();

    if !registrations.is_empty() {
        println!("Step 4: Exporting to CSV...");
        session.export(&registrations, output);
    }
}
