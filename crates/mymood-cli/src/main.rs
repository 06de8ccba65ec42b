//! MyMood CLI - train models and order styled photos from the terminal

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use mymood_core::api::{DEFAULT_GENDER, style_display_name, style_preview_image};
use mymood_core::config::Config;
use mymood_core::workflows::{self, TrainModelRequest, extract_items};
use mymood_core::{MyMoodClient, OrderRequest};
use serde_json::Value;
use tracing::debug;

#[derive(Parser)]
#[command(name = "mymood")]
#[command(author, version, about = "Train models and order styled photos on MyMoodAI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API base URL (overrides MYMOOD_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// API key (overrides MYMOOD_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Clone, Copy, Default, PartialEq, Eq, Debug, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List the public style catalog
    Styles,

    /// List all orders
    Orders,

    /// List all models
    Models,

    /// List the orders placed on a model
    ModelOrders {
        /// Model (order) ID
        model_id: u64,
    },

    /// Show the status of an order
    Status {
        /// Order ID
        order_id: u64,
    },

    /// Start training or processing of an order
    Run {
        /// Order ID
        order_id: u64,
    },

    /// Create a generation order on top of a trained model
    CreateOrder {
        /// Style IDs, comma separated
        #[arg(short, long, value_delimiter = ',', required = true)]
        styles: Vec<u64>,
        /// Gender code
        #[arg(short, long, default_value_t = DEFAULT_GENDER)]
        gender: u32,
        /// Model (order) ID to generate from
        #[arg(short, long)]
        parent: u64,
    },

    /// Create a new model (training order)
    CreateModel {
        /// Style IDs, comma separated
        #[arg(short, long, value_delimiter = ',', required = true)]
        styles: Vec<u64>,
        /// Gender code
        #[arg(short, long, default_value_t = DEFAULT_GENDER)]
        gender: u32,
    },

    /// Upload a training image (selfie) to an order
    Upload {
        /// Order ID
        order_id: u64,
        /// Path to the image
        image: PathBuf,
        /// Gender code
        #[arg(short, long, default_value_t = DEFAULT_GENDER)]
        gender: u32,
    },

    /// List the training images of an order
    Images {
        /// Order ID
        order_id: u64,
    },

    /// Select the main training image of an order
    Select {
        /// Order ID
        order_id: u64,
        /// Training image ID
        image_id: u64,
    },

    /// List the avatars generated on a model
    Avatars {
        /// Model (order) ID
        model_id: u64,
        /// Page to fetch
        #[arg(short, long, default_value_t = 1, conflicts_with = "all")]
        page: u32,
        /// Fetch every page
        #[arg(short, long)]
        all: bool,
    },

    /// Create a model from a selfie and start training it
    Train {
        /// Path to the selfie
        image: PathBuf,
        /// Style IDs, comma separated
        #[arg(short, long, value_delimiter = ',', required = true)]
        styles: Vec<u64>,
        /// Gender code
        #[arg(short, long, default_value_t = DEFAULT_GENDER)]
        gender: u32,
    },

    /// Show the resolved configuration
    Config,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr so stdout stays parseable
    let directive = if cli.quiet { "mymood=warn" } else { "mymood=info" };
    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(
        directive
            .parse()
            .unwrap_or_else(|_| tracing::level_filters::LevelFilter::INFO.into()),
    );
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if let Some(hint) = e
                .downcast_ref::<mymood_core::Error>()
                .and_then(|core| core.suggestion())
            {
                eprintln!("Hint: {}", hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(&cli);

    if let Commands::Config = cli.command {
        cmd_config(&config, cli.format)?;
        config.validate()?;
        return Ok(());
    }

    config.validate()?;
    let client = MyMoodClient::from_config(&config)?;
    debug!(?client, "Client ready");
    let format = cli.format;

    match cli.command {
        Commands::Styles => cmd_styles(&client, format).await,
        Commands::Orders => print_output(&client.list_orders().await?, format),
        Commands::Models => print_output(&client.list_models().await?, format),
        Commands::ModelOrders { model_id } => {
            print_output(&client.list_model_orders(model_id).await?, format)
        }
        Commands::Status { order_id } => {
            print_output(&client.get_order_status(order_id).await?, format)
        }
        Commands::Run { order_id } => print_output(&client.run_order(order_id).await?, format),
        Commands::CreateOrder {
            styles,
            gender,
            parent,
        } => {
            let order = OrderRequest::generation(styles, gender, parent);
            print_output(&client.create_order(&order).await?, format)
        }
        Commands::CreateModel { styles, gender } => {
            let order = OrderRequest::model(styles, gender);
            print_output(&client.create_model(&order).await?, format)
        }
        Commands::Upload {
            order_id,
            image,
            gender,
        } => print_output(
            &client
                .upload_training_image(order_id, &image, Some(gender))
                .await?,
            format,
        ),
        Commands::Images { order_id } => {
            print_output(&client.list_training_images(order_id).await?, format)
        }
        Commands::Select { order_id, image_id } => print_output(
            &client.select_training_image(order_id, image_id).await?,
            format,
        ),
        Commands::Avatars {
            model_id,
            page,
            all,
        } => cmd_avatars(&client, model_id, page, all, format).await,
        Commands::Train {
            image,
            styles,
            gender,
        } => cmd_train(&client, image, styles, gender, format, cli.quiet).await,
        Commands::Config => unreachable!("handled before the client is built"),
    }
}

/// Environment first, then command line overrides
///
/// Nothing is validated here, so a flag can replace a broken variable.
fn resolve_config(cli: &Cli) -> Config {
    let mut config = Config::read_env();
    if let Some(url) = &cli.base_url {
        config = config.with_base_url(url.clone());
    }
    if let Some(key) = &cli.api_key {
        config = config.with_api_key(key.clone());
    }
    config
}

fn print_value(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_output(value: &Value, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_value(value),
        OutputFormat::Text => {
            for line in text_lines(value) {
                println!("{}", line);
            }
            Ok(())
        }
    }
}

/// Plain text rendering of an API response
///
/// Objects print one `key: value` line per field, arrays one compact line per
/// item. Nested values stay compact JSON.
fn text_lines(value: &Value) -> Vec<String> {
    match value {
        Value::Object(map) if map.is_empty() => vec!["(empty)".to_string()],
        Value::Object(map) => map
            .iter()
            .map(|(key, v)| format!("{}: {}", key, scalar_text(v)))
            .collect(),
        Value::Array(items) if items.is_empty() => vec!["(none)".to_string()],
        Value::Array(items) => items.iter().map(scalar_text).collect(),
        other => vec![scalar_text(other)],
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn cmd_config(config: &Config, format: OutputFormat) -> anyhow::Result<()> {
    let api_key = config
        .redacted_api_key()
        .unwrap_or_else(|| "(not set)".to_string());

    match format {
        OutputFormat::Json => print_value(&serde_json::json!({
            "base_url": config.base_url,
            "api_key": api_key,
        })),
        OutputFormat::Text => {
            println!("base_url = {}", config.base_url);
            println!("api_key  = {}", api_key);
            Ok(())
        }
    }
}

async fn cmd_styles(client: &MyMoodClient, format: OutputFormat) -> anyhow::Result<()> {
    let response = client.list_styles().await?;
    if format == OutputFormat::Json {
        return print_value(&response);
    }

    let styles = extract_items(&response, "styles");
    if styles.is_empty() {
        println!("No styles found.");
        return Ok(());
    }

    for style in &styles {
        let id = style
            .get("id")
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".to_string());
        let mut line = format!("{:>6}  {}", id, style_display_name(style));
        if let Some(category) = style.get("category").and_then(Value::as_str) {
            if !category.is_empty() {
                line.push_str(&format!(" [{}]", category));
            }
        }
        if let Some(image) = style_preview_image(style) {
            line.push_str(&format!("  {}", image));
        }
        println!("{}", line);
    }
    Ok(())
}

async fn cmd_avatars(
    client: &MyMoodClient,
    model_id: u64,
    page: u32,
    all: bool,
    format: OutputFormat,
) -> anyhow::Result<()> {
    if !all {
        return print_output(&client.list_model_avatars(model_id, page).await?, format);
    }

    let avatars = workflows::collect_model_avatars(client, model_id).await?;
    match format {
        OutputFormat::Json => print_value(&Value::Array(avatars)),
        OutputFormat::Text => {
            if avatars.is_empty() {
                println!("No avatars available for model {}.", model_id);
            }
            for avatar in &avatars {
                let link = ["filename", "filename_small"]
                    .iter()
                    .find_map(|key| avatar.get(*key).and_then(Value::as_str));
                match link {
                    Some(url) => println!("{}", url),
                    None => println!("{}", avatar),
                }
            }
            Ok(())
        }
    }
}

async fn cmd_train(
    client: &MyMoodClient,
    image: PathBuf,
    styles: Vec<u64>,
    gender: u32,
    format: OutputFormat,
    quiet: bool,
) -> anyhow::Result<()> {
    let request = TrainModelRequest::new(image, styles).with_gender(gender);
    let started = workflows::train_model(client, &request).await?;

    match format {
        OutputFormat::Json => print_value(&serde_json::json!({
            "model_id": started.model_id,
            "upload": started.upload,
            "run": started.run,
        })),
        OutputFormat::Text => {
            if quiet {
                println!("{}", started.model_id);
            } else {
                println!(
                    "Model training started successfully for model ID: {}",
                    started.model_id
                );
            }
            Ok(())
        }
    }
}
