use std::net::SocketAddr;
use std::process;

use clap::{Args, Parser, Subcommand};
use comfy_table::{modifiers, presets, ContentArrangement, Table};
use terminal_size::{terminal_size, Width};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use lcm::api::{self, ApiCallError};
use lcm::config::{self, DEFAULT_HOST, DEFAULT_PORT};
use lcm::models::{ApiError, AppState};
use lcm::routes::build_router;
use lcm::services::{
    extend_objects, load_create_context, parse_create_link, seed_form, submit, table_content, CreateTab,
    ObjectRow, ObjectTableContent, SubmitOutcome,
};
use lcm::wizard::{
    CharacterClassPolicy, CreateForm, DraftUpdate, ErrorMap, VlanSelection, CREATE_ERROR_FIELDS,
};

fn build_state_from_env(env_file: Option<&str>) -> AppState {
    config::load_env_file(env_file);
    AppState::new(
        config::get_api_base_url(),
        config::get_api_token(),
        config::get_feature_flags(),
    )
}

async fn start_server(state: AppState, host: &str, port: u16) {
    let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!(%e, "Invalid host/port format");
            eprintln!("{}: {}", yansi::Paint::red("Invalid host/port format"), e);
            process::exit(1);
        }
    };
    let app = build_router(state);
    tracing::info!(%addr, "Starting lcm server");
    println!(
        "{} {}",
        yansi::Paint::new("Create service running on").green(),
        yansi::Paint::new(format!("http://{}/linodes/create", addr)).cyan()
    );
    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(%e, "Server encountered an error while running");
                eprintln!("{}: {}", yansi::Paint::new("Server error").red(), e);
                process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!(%e, "Failed to bind to address; is the port already in use?");
            eprintln!(
                "{}: {}\n{}",
                yansi::Paint::new(format!("Failed to bind to {}", addr)).red(),
                e,
                yansi::Paint::new("Stop the process using this port, or pass a different --port value.").yellow()
            );
            process::exit(1);
        }
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }
    table
}

fn terminal_width() -> u16 {
    terminal_size().map(|(Width(w), _)| w).unwrap_or(80)
}

/// Field errors in one table, general errors under "(general)".
fn print_errors(errors: &[ApiError]) {
    let map = ErrorMap::from_errors(CREATE_ERROR_FIELDS, errors);
    let mut table = new_table();
    table.set_header(vec!["Field", "Reason"]);
    for (field, reason) in &map.fields {
        table.add_row(vec![field.as_str(), reason.as_str()]);
    }
    if let Some(general) = &map.none {
        table.add_row(vec!["(general)", general.as_str()]);
    }
    eprintln!("\n{table}\n");
}

fn exit_with_api_error(context: &str, err: ApiCallError) -> ! {
    tracing::error!(error = %err, "{}", context);
    eprintln!("{}", yansi::Paint::new(context).red());
    print_errors(&err.into_api_errors());
    process::exit(1);
}

#[derive(Parser)]
#[command(
    name = "lcm",
    author,
    version,
    about = "Linode create-flow command-line tool",
    long_about = r#"lcm: create Linodes and browse Object Storage from the terminal.

The same create form is available as a small JSON service with `serve`.
Provide API credentials with `--env-file` or the API_TOKEN environment variable.

Examples:
  1) Preview the request for a Debian instance:
      lcm create --region us-east --plan g6-nanode-1 --root-pass 'S3cure!pass' --dry-run
  2) Clone an existing instance:
      lcm create --tab "Clone Linode" --linode-id 123 --plan g6-standard-2
  3) Start from a Cloud Manager create link:
      lcm create --link '/linodes/create?type=Backups&linodeID=42&backupID=7' --dry-run
  4) List a bucket:
      lcm objects us-east-1 my-bucket --prefix backups/
"#,
    after_help = "Use `lcm <subcommand> --help` to get subcommand specific options."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
    /// Disable request/response logging
    #[arg(long, global = true)]
    silent: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the JSON create service
    Serve {
        /// Host to bind to
        #[arg(long, default_value_t = String::from(DEFAULT_HOST))]
        host: String,
        /// Port to bind to
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Path to .env file
        #[arg(long)]
        env_file: Option<String>,
    },
    /// Validate configuration (env vars / API credentials)
    #[command(
        about = "Validate configuration and ensure API connectivity.",
        long_about = "Check that an API token is configured, then verify it by fetching the region list."
    )]
    CheckConfig { env_file: Option<String> },
    /// Create (or clone) a Linode
    #[command(
        about = "Create a Linode",
        long_about = "Fill the create form from flags and submit it. The label is derived from the image, region and source unless --label is given. Use --dry-run to print the request body instead of sending it."
    )]
    Create(CreateArgs),
    /// List the objects of a bucket
    #[command(about = "List bucket objects", long_about = "List objects and folders directly under a prefix of an Object Storage bucket.")]
    Objects {
        cluster: String,
        bucket: String,
        #[arg(long, default_value = "")]
        prefix: String,
        #[arg(long)]
        env_file: Option<String>,
    },
}

#[derive(Args)]
struct CreateArgs {
    /// Wizard tab: OS, One-Click, StackScripts, Images, Backups or "Clone Linode"
    #[arg(long, default_value = "OS")]
    tab: String,
    /// Create-page link or query string (type, imageID, regionID, typeID,
    /// linodeID, backupID); its `type` overrides --tab
    #[arg(long)]
    link: Option<String>,
    #[arg(long)]
    region: Option<String>,
    /// Plan id, e.g. g6-nanode-1
    #[arg(long)]
    plan: Option<String>,
    #[arg(long)]
    image: Option<String>,
    #[arg(long)]
    label: Option<String>,
    #[arg(long)]
    root_pass: Option<String>,
    /// Profile username whose SSH keys are authorized (repeatable)
    #[arg(long = "authorized-user")]
    authorized_users: Vec<String>,
    #[arg(long)]
    linode_id: Option<u64>,
    #[arg(long)]
    backup_id: Option<u64>,
    /// StackScript or Marketplace app id
    #[arg(long)]
    stackscript_id: Option<u64>,
    /// UDF value as name=value (repeatable)
    #[arg(long = "udf")]
    udfs: Vec<String>,
    #[arg(long)]
    backups: bool,
    #[arg(long)]
    private_ip: bool,
    #[arg(long)]
    no_disk_encryption: bool,
    #[arg(long)]
    vlan_label: Option<String>,
    #[arg(long)]
    vlan_ipam: Option<String>,
    #[arg(long)]
    vpc_id: Option<u64>,
    #[arg(long)]
    subnet_id: Option<u64>,
    /// Fixed VPC IPv4 instead of auto-assignment
    #[arg(long)]
    vpc_ipv4: Option<String>,
    /// Extra IPv4 range routed to the VPC interface (repeatable)
    #[arg(long = "vpc-range")]
    vpc_ranges: Vec<String>,
    /// Give the VPC interface a public IPv4 (1:1 NAT)
    #[arg(long)]
    public_ipv4: bool,
    #[arg(long)]
    firewall_id: Option<u64>,
    /// Create without a firewall when firewall notices are enabled
    #[arg(long)]
    acknowledge_no_firewall: bool,
    #[arg(long)]
    placement_group_id: Option<u64>,
    #[arg(long = "tag")]
    tags: Vec<String>,
    /// File whose contents are sent as cloud-init user data
    #[arg(long)]
    user_data_file: Option<String>,
    /// Sign the EU model contract along with the create
    #[arg(long)]
    sign_agreement: bool,
    /// Print the request body without sending it
    #[arg(long)]
    dry_run: bool,
    #[arg(long)]
    env_file: Option<String>,
}

/// Turn flags into the sequence of form interactions a user would perform.
async fn collect_updates(state: &AppState, args: &CreateArgs) -> Vec<DraftUpdate> {
    let mut updates = Vec::new();

    if let Some(image) = &args.image {
        updates.push(DraftUpdate::SetImage(Some(image.clone())));
    }
    if let Some(id) = args.linode_id {
        updates.push(DraftUpdate::SetLinode(id));
    }
    if let Some(id) = args.backup_id {
        updates.push(DraftUpdate::SetBackup(id));
    }
    if let Some(region) = &args.region {
        updates.push(DraftUpdate::SetRegion(region.clone()));
    }
    if let Some(plan) = &args.plan {
        updates.push(DraftUpdate::SetType(plan.clone()));
    }
    if let Some(id) = args.stackscript_id {
        match api::get_stackscript(&state.client, &state.api_base_url, &state.api_token, id).await {
            Ok(script) => updates.push(DraftUpdate::SetStackScript(script)),
            Err(e) => exit_with_api_error("Failed to load StackScript", e),
        }
        if let Some(image) = &args.image {
            updates.push(DraftUpdate::SetImage(Some(image.clone())));
        }
    }
    if !args.udfs.is_empty() {
        let udfs = args
            .udfs
            .iter()
            .filter_map(|pair| pair.split_once('='))
            .map(|(k, v)| (k.trim().to_string(), v.to_string()))
            .collect();
        updates.push(DraftUpdate::SetUdfs(udfs));
    }
    if let Some(id) = args.placement_group_id {
        match api::get_placement_group(&state.client, &state.api_base_url, &state.api_token, id).await {
            Ok(group) => updates.push(DraftUpdate::SetPlacementGroup(Some(group))),
            Err(e) => exit_with_api_error("Failed to load placement group", e),
        }
    }
    if let Some(label) = &args.label {
        updates.push(DraftUpdate::SetLabel(label.clone()));
    }
    if let Some(pass) = &args.root_pass {
        updates.push(DraftUpdate::SetPassword(pass.clone()));
    }
    if !args.authorized_users.is_empty() {
        updates.push(DraftUpdate::SetAuthorizedUsers(args.authorized_users.clone()));
    }
    if args.backups {
        updates.push(DraftUpdate::ToggleBackups);
    }
    if args.private_ip {
        updates.push(DraftUpdate::TogglePrivateIp);
    }
    if args.no_disk_encryption {
        updates.push(DraftUpdate::ToggleDiskEncryption);
    }
    if let Some(label) = &args.vlan_label {
        updates.push(DraftUpdate::SetVlan(VlanSelection {
            label: label.clone(),
            ipam_address: args.vlan_ipam.clone().unwrap_or_default(),
        }));
    }
    if let Some(vpc_id) = args.vpc_id {
        updates.push(DraftUpdate::SetVpc(Some(vpc_id)));
        updates.push(DraftUpdate::SetSubnet(args.subnet_id));
        if let Some(ip) = &args.vpc_ipv4 {
            updates.push(DraftUpdate::ToggleAutoassignIpv4);
            updates.push(DraftUpdate::SetVpcIpv4(ip.clone()));
        }
        if !args.vpc_ranges.is_empty() {
            updates.push(DraftUpdate::SetVpcIpv4Ranges(args.vpc_ranges.clone()));
        }
        if args.public_ipv4 {
            updates.push(DraftUpdate::ToggleAssignPublicIpv4);
        }
    }
    if args.firewall_id.is_some() {
        updates.push(DraftUpdate::SetFirewall(args.firewall_id));
    }
    if args.acknowledge_no_firewall {
        updates.push(DraftUpdate::ToggleFirewallAuthorization);
    }
    if !args.tags.is_empty() {
        updates.push(DraftUpdate::SetTags(args.tags.clone()));
    }
    if let Some(path) = &args.user_data_file {
        match tokio::fs::read_to_string(path).await {
            Ok(data) => updates.push(DraftUpdate::SetUserData(data)),
            Err(e) => {
                eprintln!("{} {}: {}", yansi::Paint::red("Failed to read user data at"), path, e);
                process::exit(1);
            }
        }
    }
    if args.sign_agreement {
        updates.push(DraftUpdate::ToggleAgreement);
    }
    updates
}

async fn run_create(state: AppState, args: CreateArgs) {
    let Some(tab) = CreateTab::parse(&args.tab) else {
        eprintln!("{} '{}'", yansi::Paint::red("Unknown tab"), args.tab);
        process::exit(1);
    };

    let context = match load_create_context(&state.client, &state.api_base_url, &state.api_token, state.flags).await {
        Ok(ctx) => ctx,
        Err(e) => exit_with_api_error("Failed to load regions, images, plans or instances", e),
    };

    let mut query = args.link.as_deref().map(parse_create_link).unwrap_or_default();
    query.tab = query.tab.or(Some(tab));
    let mut form: CreateForm = seed_form(&query, context);
    for update in collect_updates(&state, &args).await {
        form.apply(update);
    }

    if args.dry_run {
        match form.check_validation() {
            Ok(payload) => {
                let json = serde_json::to_string_pretty(&payload).unwrap_or_default();
                println!("{}", json);
            }
            Err(errors) => {
                eprintln!("{}", yansi::Paint::new("The request would be rejected").red());
                print_errors(&errors);
                process::exit(1);
            }
        }
        return;
    }

    match submit(&state.backend(), &mut form, &CharacterClassPolicy::default()).await {
        Ok(SubmitOutcome::Created { linode, redirect, notice }) => {
            println!("{}", yansi::Paint::new(notice).green());
            let mut table = new_table();
            table.set_header(vec!["ID", "Label", "Region", "Status", "Detail"]);
            table.add_row(vec![
                linode.id.to_string(),
                linode.label.clone(),
                linode.region.clone(),
                linode.status.clone(),
                redirect,
            ]);
            println!("\n{table}\n");
        }
        Ok(SubmitOutcome::Rejected { errors }) => {
            eprintln!("{}", yansi::Paint::new("Create request rejected").red());
            print_errors(&errors);
            process::exit(1);
        }
        Ok(SubmitOutcome::AwaitingFirewallAcknowledgement) => {
            eprintln!(
                "{}",
                yansi::Paint::new("No firewall selected. Pass --firewall-id, or --acknowledge-no-firewall to continue without one.").yellow()
            );
            process::exit(2);
        }
        Err(e) => {
            eprintln!("{}: {}", yansi::Paint::red("Create failed"), e);
            process::exit(1);
        }
    }
}

async fn run_objects(state: AppState, cluster: &str, bucket: &str, prefix: &str) {
    let listing = api::load_objects(&state.client, &state.api_base_url, &state.api_token, cluster, bucket, prefix).await;
    let width = terminal_width();
    let content = match listing {
        Ok(objects) => table_content(&extend_objects(objects, prefix), false, None, prefix, width),
        Err(e) => {
            tracing::warn!(error = %e, "Object listing failed");
            let errors = e.into_api_errors();
            table_content(&[], false, Some(errors.as_slice()), prefix, width)
        }
    };

    match content {
        ObjectTableContent::Loading => println!("Loading..."),
        ObjectTableContent::Error { message } => {
            eprintln!("{}", yansi::Paint::new(message).red());
            process::exit(1);
        }
        ObjectTableContent::Empty { message } => println!("{}", yansi::Paint::new(message).dim()),
        ObjectTableContent::Rows { rows, .. } => {
            let mut table = new_table();
            table.set_header(vec!["Name", "Size", "Last Modified"]);
            for row in rows {
                match row {
                    ObjectRow::Folder { display_name, .. } => {
                        table.add_row(vec![format!("{}/", display_name), String::new(), String::new()]);
                    }
                    ObjectRow::Object { display_name, size, last_modified, .. } => {
                        table.add_row(vec![display_name, size, last_modified]);
                    }
                }
            }
            println!("\n{table}\n");
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    if cli.silent {
        api::client::set_silent(true);
    }

    // Without a subcommand, serve with defaults.
    let Some(command) = cli.command else {
        let state = build_state_from_env(None);
        start_server(state, DEFAULT_HOST, DEFAULT_PORT).await;
        return;
    };

    match command {
        Commands::Serve { host, port, env_file } => {
            let state = build_state_from_env(env_file.as_deref());
            start_server(state, &host, port).await;
        }
        Commands::CheckConfig { env_file } => {
            let state = build_state_from_env(env_file.as_deref());
            if state.api_token.trim().is_empty() {
                eprintln!("{}", yansi::Paint::new("API_TOKEN is not configured").red());
                process::exit(1);
            }
            match api::load_regions(&state.client, &state.api_base_url, &state.api_token).await {
                Ok(regions) => {
                    println!(
                        "{} ({} regions from {})",
                        yansi::Paint::new("Configuration looks valid").green(),
                        regions.len(),
                        state.api_base_url
                    );
                    let flags = state.flags;
                    println!(
                        "disk encryption: {}, secure VM notices: {}",
                        flags.disk_encryption, flags.secure_vm_notices
                    );
                }
                Err(e) => exit_with_api_error("Configuration appears invalid", e),
            }
        }
        Commands::Create(args) => {
            let state = build_state_from_env(args.env_file.as_deref());
            run_create(state, args).await;
        }
        Commands::Objects { cluster, bucket, prefix, env_file } => {
            let state = build_state_from_env(env_file.as_deref());
            run_objects(state, &cluster, &bucket, &prefix).await;
        }
    }
}
