//! Command dispatch

use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands, ContentCommands, MenuCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::{editor_rows, navigation, MenuNode, TreeNodeConvert};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::http;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Serve { host, port }) => cmd_serve(cli, host.as_deref(), *port),
        Some(Commands::Menu { command }) => cmd_menu(cli, command),
        Some(Commands::Content { command }) => cmd_content(cli, command),
        Some(Commands::Config { command }) => cmd_config(cli, command),
        Some(Commands::Info) => cmd_info(cli),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => {
            let mut cmd = Cli::command();
            cmd.print_help()
                .map_err(|e| CliError::Infra(InfraError::io("print help", e)))?;
            Ok(())
        }
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    Ok(Settings::load(cli.config.as_deref())?)
}

#[instrument(skip(cli))]
fn cmd_serve(cli: &Cli, host: Option<&str>, port: Option<u16>) -> CliResult<()> {
    let mut settings = load_settings(cli)?;
    if let Some(host) = host {
        settings.server.host = host.to_string();
    }
    if let Some(port) = port {
        settings.server.port = port;
    }
    debug!("settings: {:?}", settings);

    let container = ServiceContainer::new(settings)?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| InfraError::Server {
            message: format!("start runtime: {e}"),
        })?;
    runtime.block_on(http::serve(&container))?;
    Ok(())
}

fn cmd_menu(cli: &Cli, command: &MenuCommands) -> CliResult<()> {
    let container = ServiceContainer::new(load_settings(cli)?)?;
    let service = container.menu.lock();
    let menu = service.menu();

    match command {
        MenuCommands::Tree => output::info(&menu.to_tree_string()),
        MenuCommands::Nav => {
            for item in navigation(menu) {
                output::header(&item.name);
                for link in &item.submenu {
                    output::detail(&format!(
                        "{} -> {}",
                        link.name,
                        link.link.as_deref().unwrap_or("-")
                    ));
                }
            }
        }
        MenuCommands::Rows => {
            for row in editor_rows(menu) {
                let handle = if row.draggable { "≡" } else { " " };
                output::info(&format!(
                    "{} {:indent$}{}  [{}]",
                    handle,
                    "",
                    row.name,
                    row.id,
                    indent = row.indent()
                ));
            }
        }
        MenuCommands::Export { output: target } => {
            let json = export_json(&service.snapshot())?;
            match target {
                Some(path) => {
                    container
                        .fs
                        .write_atomic(path, &json)
                        .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
                    output::success(&format!("menu written to {}", path.display()));
                }
                None => output::info(&json),
            }
        }
    }
    Ok(())
}

fn export_json(entries: &[MenuNode]) -> CliResult<String> {
    serde_json::to_string_pretty(entries).map_err(|e| {
        ApplicationError::OperationFailed {
            context: "serialize menu".into(),
            source: Box::new(e),
        }
        .into()
    })
}

fn cmd_content(cli: &Cli, command: &ContentCommands) -> CliResult<()> {
    let container = ServiceContainer::new(load_settings(cli)?)?;
    match command {
        ContentCommands::Show => output::info(&container.content.get()?),
    }
    Ok(())
}

fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::action("global", &path.display()),
                None => output::action("global", &"<no config directory>"),
            }
            if let Some(path) = &cli.config {
                output::action("explicit", &path.display());
            }
        }
    }
    Ok(())
}

fn cmd_info(cli: &Cli) -> CliResult<()> {
    let settings = load_settings(cli)?;
    let container = ServiceContainer::new(settings)?;
    let service = container.menu.lock();

    output::header("page-designer");
    output::detail(&format!("version: {}", env!("CARGO_PKG_VERSION")));
    output::detail(&format!(
        "listen: {}:{}",
        container.settings.server.host, container.settings.server.port
    ));
    output::detail(&format!(
        "storage: {:?} ({})",
        container.settings.storage.backend,
        container.settings.storage.data_dir.display()
    ));
    output::detail(&format!(
        "menu: {} entries, {} levels",
        service.menu().len(),
        service.menu().depth()
    ));
    Ok(())
}
