use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use crapi_client::effects::{Dispatcher, Operation, Outcome};
use crapi_client::state::{Offset, Transition, Upload};

#[derive(Parser, Debug)]
#[command(name = "crapi-client")]
#[command(version)]
#[command(about = "Command-line client for the crAPI services", long_about = None)]
pub struct Args {
    /// Config file (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and persist the session
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },

    /// Forget the persisted session
    Logout,

    /// Register a new account
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        number: String,
        #[arg(long)]
        password: String,
    },

    /// Unlock a locked account with the code sent by mail
    Unlock {
        #[arg(short, long)]
        email: String,
        #[arg(long)]
        code: String,
    },

    /// Show the current session and check it against the backend
    Status,

    /// List vehicles of the logged-in user
    Vehicles,

    /// List available mechanics
    Mechanics,

    /// List shop products
    Products {
        /// Page offset as returned by a previous listing
        #[arg(long, value_parser = parse_offset)]
        offset: Option<Offset>,
    },

    /// Buy one unit of a product
    Buy { product_id: u64 },

    /// List past orders
    Orders {
        #[arg(long, value_parser = parse_offset)]
        offset: Option<Offset>,
    },

    /// Show one order
    Order { order_id: u64 },

    /// Return an order
    ReturnOrder { order_id: u64 },

    /// Apply a coupon code to the shop balance
    Coupon { code: String },

    /// List recent community posts
    Posts {
        #[arg(long, value_parser = parse_offset)]
        offset: Option<Offset>,
    },

    /// Show one post with its comments
    Post { post_id: String },

    /// Comment on a post
    Comment { post_id: String, text: String },

    /// Upload a new profile picture
    UploadPicture { path: PathBuf },
}

/// Offsets are numeric on most endpoints, opaque tokens on some.
fn parse_offset(raw: &str) -> Result<Offset, String> {
    if raw.is_empty() {
        return Err("offset must not be empty".to_string());
    }
    Ok(raw
        .parse::<u64>()
        .map(Offset::Number)
        .unwrap_or_else(|_| Offset::Token(raw.to_string())))
}

pub async fn run(dispatcher: &Dispatcher, command: Commands) -> Result<()> {
    let operation = match command {
        Commands::Logout => {
            dispatcher.store().dispatch(Transition::LogOut);
            println!("Logged out");
            return Ok(());
        }
        Commands::Status => return status(dispatcher).await,
        Commands::Login { email, password } => Operation::log_in(email, password),
        Commands::Signup {
            name,
            email,
            number,
            password,
        } => Operation::sign_up(name, email, number, password),
        Commands::Unlock { email, code } => Operation::unlock(email, code),
        Commands::Vehicles => Operation::get_vehicles(),
        Commands::Mechanics => Operation::get_mechanics(),
        Commands::Products { offset } => Operation::get_products(offset),
        Commands::Buy { product_id } => Operation::buy_product(product_id),
        Commands::Orders { offset } => Operation::get_orders(offset),
        Commands::Order { order_id } => Operation::get_order_by_id(order_id),
        Commands::ReturnOrder { order_id } => Operation::return_order(order_id),
        Commands::Coupon { code } => Operation::apply_coupon(code),
        Commands::Posts { offset } => Operation::get_posts(offset),
        Commands::Post { post_id } => Operation::get_post_by_id(post_id),
        Commands::Comment { post_id, text } => Operation::add_comment(post_id, text),
        Commands::UploadPicture { path } => {
            let file = Upload::from_path(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Operation::upload_profile_pic(file)
        }
    };

    let outcome = dispatcher.request(operation).await?;
    report(outcome)
}

async fn status(dispatcher: &Dispatcher) -> Result<()> {
    let session = dispatcher.store().state().session;
    let Some(token) = session.token().cloned() else {
        println!("Not logged in");
        return Ok(());
    };

    println!(
        "Logged in as {} ({})",
        session.name.as_deref().unwrap_or("-"),
        session.email.as_deref().unwrap_or("-")
    );
    println!("Available credit: {}", session.available_credit);

    match dispatcher
        .request(Operation::validate_access_token(token))
        .await?
    {
        Outcome::Success(_) => println!("Session is valid"),
        other => report(other)?,
    }
    Ok(())
}

fn report(outcome: Outcome) -> Result<()> {
    match outcome {
        Outcome::Success(value) => {
            match value.as_str() {
                Some(message) => println!("{}", message),
                None if value.is_null() => println!("OK"),
                None => println!("{}", serde_json::to_string_pretty(&value)?),
            }
            Ok(())
        }
        Outcome::Redirect(target) => {
            println!("Redirected: {}", target);
            Ok(())
        }
        Outcome::Failure(message) => bail!(message),
    }
}
