use std::{process::ExitCode, sync::Arc};

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use console_core::{ConsoleController, HttpConnectionService, Notification};
use shared::domain::{DEFAULT_HOST, DEFAULT_PORT};
use tracing_subscriber::EnvFilter;

mod config;

use config::{load_settings, Settings};

#[derive(Parser, Debug)]
#[command(about = "Manage saved Redis connections on a console backend")]
struct Cli {
    /// Backend base URL; overrides console.toml and the environment.
    #[arg(long)]
    server_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List saved connections.
    List,
    /// Show one saved connection.
    Show { id: String },
    /// Check that the backend can reach a Redis server.
    Test(FormArgs),
    /// Create a connection, or update one with --id.
    Save {
        #[arg(long)]
        id: Option<String>,
        #[command(flatten)]
        form: FormArgs,
    },
    /// Open admin tabs for connections and print the workspace.
    Open {
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

#[derive(Args, Debug)]
struct FormArgs {
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,
    #[arg(long, default_value = DEFAULT_PORT)]
    port: String,
    #[arg(long, default_value = "")]
    pwd: String,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = load_settings()?;
    if let Some(server_url) = cli.server_url {
        settings.server_url = server_url;
    }
    tracing::debug!(server_url = %settings.server_url, "console settings loaded");

    let service = Arc::new(HttpConnectionService::new(settings.server_url.clone()));
    let mut controller = ConsoleController::spawn(service)?;

    let idle = match cli.command {
        Command::List => {
            controller.start();
            let idle = controller.wait_idle(settings.event_timeout());
            for conn in &controller.state().conns {
                println!("{}\t{}", conn.id, conn.name);
            }
            idle
        }
        Command::Show { id } => {
            controller.select_conn(id);
            controller.edit_conn();
            let idle = controller.wait_idle(settings.event_timeout());
            let edit = &controller.state().edit_connection;
            if edit.visible {
                let setting = &edit.setting;
                println!("id:   {}", setting.id);
                println!("name: {}", setting.name);
                println!("host: {}", setting.host);
                println!("port: {}", setting.port);
                println!("pwd:  {}", if setting.pwd.is_empty() { "" } else { "********" });
            }
            idle
        }
        Command::Test(form) => {
            fill_form(&mut controller, None, form);
            controller.conn_test();
            controller.wait_idle(settings.event_timeout())
        }
        Command::Save { id, form } => {
            fill_form(&mut controller, id, form);
            controller.save_conn_setting();
            controller.wait_idle(settings.event_timeout())
        }
        Command::Open { ids } => open_tabs(&mut controller, &settings, &ids),
    };

    let failed = report(controller.take_notifications());
    if !idle {
        eprintln!("timed out waiting for {}", settings.server_url);
        return Ok(ExitCode::FAILURE);
    }
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn fill_form(controller: &mut ConsoleController, id: Option<String>, form: FormArgs) {
    controller.new_connection();
    let setting = controller.setting_mut();
    setting.id = id.unwrap_or_default();
    setting.name = form.name;
    setting.host = form.host;
    setting.port = form.port;
    setting.pwd = form.pwd;
}

fn open_tabs(controller: &mut ConsoleController, settings: &Settings, ids: &[String]) -> bool {
    controller.start();
    let idle = controller.wait_idle(settings.event_timeout());

    for id in ids {
        let label = controller
            .state()
            .conns
            .iter()
            .find(|conn| &conn.id == id)
            .map(|conn| conn.name.clone())
            .unwrap_or_else(|| id.clone());
        controller.open_tab(id, &label, &settings.admin_url(id));
    }

    let state = controller.state();
    for tab in &state.tabs {
        let marker = if state.active_tab.as_deref() == Some(tab.id.as_str()) {
            "*"
        } else {
            " "
        };
        println!("{marker} {}\t{}\t{}", tab.id, tab.label, tab.content);
    }
    idle
}

/// Prints queued notifications; returns whether any reported a failure.
fn report(notifications: Vec<Notification>) -> bool {
    let mut failed = false;
    for notification in notifications {
        if notification.kind.is_failure() {
            failed = true;
            eprintln!("[{}] {}", notification.kind, notification.message);
        } else {
            println!("[{}] {}", notification.kind, notification.message);
        }
    }
    failed
}
