#[cfg(not(target_arch = "wasm32"))]
mod table_display;

#[cfg(not(target_arch = "wasm32"))]
use crossterm::style::Stylize;
#[cfg(not(target_arch = "wasm32"))]
use sql_editor::{
    api::ApiClient,
    config::Config,
    ui::{
        run_to_completion, toggle_panel, ColorScheme, MemoryEditors, MemoryPanel, Node, Outcome,
        PanelDom, PanelSession, Part,
    },
    utils::logging::init_tracing,
};
#[cfg(not(target_arch = "wasm32"))]
use std::io::Read;
#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

/// Key of the single in-memory panel the runner drives
#[cfg(not(target_arch = "wasm32"))]
const CLI_PANEL: &str = "cli";

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default, PartialEq)]
struct CliOptions {
    help: bool,
    generate_config: bool,
    html: bool,
    verbose: bool,
    config_path: Option<PathBuf>,
    endpoint: Option<String>,
    file: Option<PathBuf>,
    query: Option<String>,
}

#[cfg(not(target_arch = "wasm32"))]
impl CliOptions {
    fn parse(args: &[String]) -> anyhow::Result<Self> {
        let mut options = CliOptions::default();
        let mut iter = args.iter().skip(1);

        while let Some(arg) = iter.next() {
            let mut value = |flag: &str| {
                iter.next()
                    .cloned()
                    .ok_or_else(|| anyhow::anyhow!("{} needs a value", flag))
            };

            match arg.as_str() {
                "--help" | "-h" => options.help = true,
                "--generate-config" => options.generate_config = true,
                "--html" => options.html = true,
                "--verbose" | "-v" => options.verbose = true,
                "--config" => options.config_path = Some(PathBuf::from(value("--config")?)),
                "--endpoint" => options.endpoint = Some(value("--endpoint")?),
                "--file" | "-f" => options.file = Some(PathBuf::from(value("--file")?)),
                other if other.starts_with("--") => anyhow::bail!("unknown option {}", other),
                other => {
                    if options.query.is_some() {
                        anyhow::bail!("only one query argument is accepted");
                    }
                    options.query = Some(other.to_string());
                }
            }
        }

        Ok(options)
    }

    /// Query from the argument, the file, or stdin, in that order
    fn read_query(&self) -> anyhow::Result<String> {
        if let Some(query) = &self.query {
            return Ok(query.clone());
        }
        if let Some(path) = &self.file {
            return Ok(std::fs::read_to_string(path)?);
        }
        let mut query = String::new();
        std::io::stdin().read_to_string(&mut query)?;
        Ok(query)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn print_help() {
    println!("{}", "SQL Editor - run panel queries against the query API".blue().bold());
    println!();
    println!("{}", "Usage:".yellow());
    println!("  sql-editor [OPTIONS] [QUERY]");
    println!("  echo 'select 1' | sql-editor");
    println!();
    println!("{}", "Options:".yellow());
    println!("  {}  - Query endpoint (overrides config)", "--endpoint URL".green());
    println!("  {}     - Read the query from a file", "--file PATH".green());
    println!("  {}   - Use this config file", "--config PATH".green());
    println!("  {}            - Print the result area as HTML", "--html".green());
    println!("  {}   - Write the default config file", "--generate-config".green());
    println!("  {}         - Debug logging", "--verbose".green());
    println!("  {}            - Show this help", "--help".green());
    println!();
}

#[cfg(not(target_arch = "wasm32"))]
fn generate_config() -> anyhow::Result<()> {
    let path = Config::get_config_path()?;
    if path.exists() {
        println!("Config file already exists at {}", path.display());
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, Config::create_default_with_comments())?;
    println!("Config file created at {}", path.display());
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let options = CliOptions::parse(&args)?;

    if options.help {
        print_help();
        return Ok(());
    }
    if options.generate_config {
        return generate_config();
    }

    let mut config = match &options.config_path {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|e| {
            eprintln!("Warning: could not load config ({}), using defaults", e);
            Config::default()
        }),
    };
    init_tracing(if options.verbose { "debug" } else { config.logging.filter.as_str() });

    if let Some(endpoint) = &options.endpoint {
        config.api.endpoint = endpoint.clone();
    }

    let sql = options.read_query()?;
    if sql.trim().is_empty() {
        anyhow::bail!("no query given");
    }

    let client = ApiClient::from_config(&config.api);
    let mut session = PanelSession::new(CLI_PANEL);
    let mut panel = MemoryPanel::with_code(CLI_PANEL, &sql);
    let mut editors = MemoryEditors::new();

    toggle_panel(
        &mut session,
        &mut panel,
        &mut editors,
        &config.editor,
        ColorScheme::Light,
    )?;
    run_to_completion(&mut session, &mut panel, &mut editors, &client).await?;

    if options.html {
        println!("<table>{}</table>", panel.inner_html(Part::ResultTable)?);
    }

    match session.view().outcome {
        Outcome::Rows => {
            if !options.html {
                table_display::display_results(
                    &panel.table_rows()?,
                    &panel.text(Part::RowCount)?,
                    &panel.text(Part::CompileTime)?,
                    &panel.text(Part::ExecutionTime)?,
                );
            }
            Ok(())
        }
        Outcome::Failed => {
            let block = panel.children(Part::ResultTable)?;
            let line = |tag: &str| {
                block
                    .iter()
                    .find(|node| node.tag() == Some(tag))
                    .map(Node::text_content)
                    .unwrap_or_default()
            };
            table_display::display_error(&line("b"), &line("span"));
            std::process::exit(1);
        }
        Outcome::Empty => anyhow::bail!("query did not complete"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
