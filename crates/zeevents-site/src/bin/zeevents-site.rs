#!/usr/bin/env cargo
//! Ze Events Site Binary
//!
//! Text-mode client for the site: navigate routes, fill forms, submit
//! them against the demo or remote backend.
//!
//! # Usage
//! ```bash
//! zeevents-site [--config site.json] [--remote-url URL --api-key KEY] [--verbose]
//! ```

use std::io::{self, BufRead, Write};
use std::path::Path;

use clap::Parser;
use uuid::Uuid;

use zeevents_core::AppConfig;
use zeevents_site::{AuthMode, Route, SiteApp, VERSION};

/// Ze Events - Wedding Planning Site
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a JSON config file
    #[arg(short, long)]
    config: Option<String>,

    /// Remote backend base URL (switches off the demo backend)
    #[arg(long)]
    remote_url: Option<String>,

    /// Remote backend API key
    #[arg(long)]
    api_key: Option<String>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::new(),
    };
    if let (Some(url), Some(key)) = (&args.remote_url, &args.api_key) {
        config = config.with_remote(url.clone(), key.clone());
    }

    // Initialize logging
    if config.tracing {
        if args.verbose {
            tracing_subscriber::fmt()
                .with_max_level(tracing::Level::DEBUG)
                .with_target(true)
                .init();
        } else {
            tracing_subscriber::fmt()
                .with_max_level(tracing::Level::INFO)
                .with_target(false)
                .init();
        }
    }

    print_banner();

    let mut app = SiteApp::new(config);
    print!("{}", app.render().await);

    let stdin = io::stdin();
    loop {
        print!("zeevents> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let parts: Vec<&str> = line.trim().splitn(3, ' ').collect();

        match parts.as_slice() {
            [""] => {}
            ["quit"] | ["exit"] => break,
            ["help"] => print_help(),
            ["routes"] => {
                for route in Route::all() {
                    println!("  {}", route);
                }
            }
            ["open", path] => {
                app.navigate(path);
                print!("{}", app.render().await);
            }
            ["mode", mode] => {
                let mode = match *mode {
                    "signin" => Some(AuthMode::SignIn),
                    "signup" => Some(AuthMode::SignUp),
                    "admin" => Some(AuthMode::AdminLogin),
                    _ => None,
                };
                match mode {
                    Some(mode) => {
                        app.switch_auth_mode(mode);
                        print!("{}", app.render().await);
                    }
                    None => println!("modes: signin, signup, admin"),
                }
            }
            ["set", field, value] => match app.set_field(field, value) {
                Ok(()) => print!("{}", app.render().await),
                Err(e) => println!("error: {}", e),
            },
            ["set", field] => match app.set_field(field, "") {
                Ok(()) => print!("{}", app.render().await),
                Err(e) => println!("error: {}", e),
            },
            ["submit"] => {
                app.submit().await;
                print!("{}", app.render().await);
            }
            ["reset"] => {
                app.reset();
                print!("{}", app.render().await);
            }
            ["show"] => print!("{}", app.render().await),
            ["new-page"] => {
                app.open_page_editor();
                print!("{}", app.render().await);
            }
            ["edit-page", id] => match id.parse::<Uuid>() {
                Ok(id) => match app.edit_page(id).await {
                    Ok(()) => print!("{}", app.render().await),
                    Err(e) => println!("error: {}", e),
                },
                Err(_) => println!("error: not a page id"),
            },
            ["delete-page", id] => match id.parse::<Uuid>() {
                Ok(id) => {
                    app.delete_page(id).await;
                    print!("{}", app.render().await);
                }
                Err(_) => println!("error: not a page id"),
            },
            ["upload", path] => {
                let file = Path::new(path);
                let name = file
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("upload.bin")
                    .to_string();
                match std::fs::read(file) {
                    Ok(bytes) => {
                        app.upload_media(&name, bytes).await;
                        print!("{}", app.render().await);
                    }
                    Err(e) => println!("error: {}", e),
                }
            }
            ["delete-media", path] => {
                app.delete_media(path).await;
                print!("{}", app.render().await);
            }
            _ => println!("unknown command, try 'help'"),
        }
    }

    Ok(())
}

fn print_banner() {
    println!();
    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║                                                               ║");
    println!("║              💍  ZE EVENTS — WEDDING PLANNING  💍             ║");
    println!("║                                                               ║");
    println!("║        Crafting unforgettable weddings, v{:<8}            ║", VERSION);
    println!("║                                                               ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Type 'routes' to list pages, 'open <path>' to visit one,");
    println!("'help' for everything else.");
    println!();
}

fn print_help() {
    println!("  routes                 list addressable pages");
    println!("  open <path>            navigate to a page");
    println!("  mode <signin|signup|admin>   switch the auth form");
    println!("  set <field> <value>    set a form field");
    println!("  submit                 submit the active form");
    println!("  reset                  reset the active form");
    println!("  show                   re-render the active page");
    println!("  new-page               open the page editor (pages view)");
    println!("  edit-page <id>         edit an existing page");
    println!("  delete-page <id>       delete a page");
    println!("  upload <file>          upload a media file (media view)");
    println!("  delete-media <path>    remove a media object");
    println!("  quit                   exit");
}
