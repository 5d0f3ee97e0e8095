use crate::config::{load_config, Config};
use crate::form::render_form_page;
use crate::input::validate_required;
use crate::server::serve;
use crate::signature::{render_signature, SignatureData};
use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sigr", version, about = "Email signature generator")]
pub struct Args {
    /// Config file (JSON5)
    #[arg(short = 'c', long = "configFile", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the form, preview and download endpoints
    Serve {
        /// Address to bind (overrides config)
        #[arg(long = "host")]
        host: Option<String>,

        /// Port to bind (overrides config and $PORT)
        #[arg(short = 'p', long = "port")]
        port: Option<u16>,
    },
    /// Render a signature from command-line fields
    Generate(GenerateArgs),
    /// Render the form page
    Form {
        /// Output file. Defaults to stdout if omitted.
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },
}

#[derive(ClapArgs, Debug)]
pub struct GenerateArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub email: String,

    #[arg(long = "logo-url")]
    pub logo_url: String,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub website: Option<String>,

    #[arg(long = "linkedin-url")]
    pub linkedin_url: Option<String>,

    /// Hex accent color (#rgb or #rrggbb)
    #[arg(long = "accent-color")]
    pub accent_color: Option<String>,

    /// Output file. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

impl GenerateArgs {
    fn to_signature_data(&self) -> SignatureData {
        let non_empty = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());
        SignatureData {
            name: self.name.clone(),
            title: self.title.clone(),
            email: self.email.clone(),
            logo_url: self.logo_url.clone(),
            phone: non_empty(&self.phone),
            website: non_empty(&self.website),
            linkedin_url: non_empty(&self.linkedin_url),
            accent_color: non_empty(&self.accent_color),
        }
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let mut config = load_config(args.config.as_deref())?;
    config.apply_env();

    match args.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(&config)
        }
        Command::Generate(generate) => run_generate(&generate, &config),
        Command::Form { output } => {
            let page = render_form_page(&config.defaults, &config.theme);
            write_output(&page, output.as_deref())
        }
    }
}

fn run_generate(args: &GenerateArgs, config: &Config) -> Result<()> {
    let data = args.to_signature_data();
    validate_required(&data)?;
    let html = render_signature(&data, &config.theme);
    info!(bytes = html.len(), "generated signature");
    write_output(&html, args.output.as_deref())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn write_output(html: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, html)?;
        }
        None => {
            print!("{}", html);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_generate_subcommand() {
        let args = Args::parse_from([
            "sigr",
            "generate",
            "--name",
            "Jane Doe",
            "--title",
            "Engineer",
            "--email",
            "jane@x.com",
            "--logo-url",
            "http://x.com/l.png",
            "--phone",
            "",
            "--accent-color",
            "#ABC",
        ]);
        let Command::Generate(generate) = args.command else {
            panic!("expected generate");
        };
        let data = generate.to_signature_data();
        assert_eq!(data.name, "Jane Doe");
        assert_eq!(data.phone, None);
        assert_eq!(data.accent_color.as_deref(), Some("#ABC"));
        assert!(generate.output.is_none());
    }

    #[test]
    fn generate_rejects_empty_required_field() {
        let args = Args::parse_from([
            "sigr", "generate", "--name", "", "--title", "t", "--email", "e", "--logo-url", "l",
        ]);
        let Command::Generate(generate) = args.command else {
            panic!("expected generate");
        };
        let err = run_generate(&generate, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn serve_accepts_overrides() {
        let args = Args::parse_from(["sigr", "-c", "sig.json5", "serve", "-p", "8081"]);
        assert_eq!(args.config.as_deref(), Some(Path::new("sig.json5")));
        assert!(matches!(args.command, Command::Serve { host: None, port: Some(8081) }));
    }

    #[test]
    fn writes_output_file() {
        let path = std::env::temp_dir().join(format!("sigr-cli-test-{}.html", std::process::id()));
        write_output("<p>hi</p>", Some(&path)).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<p>hi</p>");
        let _ = std::fs::remove_file(&path);
    }
}
