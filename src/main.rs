use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use md2pdf::ConvertOptions;

#[derive(Parser)]
#[command(name = "md2pdf")]
#[command(version)]
#[command(about = "Convert Markdown files to GitHub-styled PDF")]
struct Cli {
    /// Input Markdown file
    input: PathBuf,

    /// Output file (defaults to input name with .pdf extension)
    output: Option<PathBuf>,

    /// Add the institutional header and footer from the theme
    #[arg(long)]
    iee: bool,

    /// Theme section to use [default: Standard, or IEE with --iee]
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// Theme configuration file [default: themes.ini, bundled themes if absent]
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Chrome/Chromium executable
    #[arg(long, value_name = "PATH", env = "CHROME")]
    chrome: Option<PathBuf>,

    /// Run Chrome without its sandbox (required when running as root)
    #[arg(long)]
    no_sandbox: bool,

    /// Write the styled HTML instead of a PDF
    #[arg(long)]
    html: bool,

    /// Show debug output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn options(&self) -> ConvertOptions {
        let mut options = ConvertOptions::new()
            .with_branding(self.iee)
            .with_sandbox(!self.no_sandbox)
            .with_html_only(self.html);
        if let Some(output) = &self.output {
            options = options.with_output(output);
        }
        if let Some(theme) = &self.theme {
            options = options.with_theme(theme);
        }
        if let Some(config) = &self.config {
            options = options.with_config(config);
        }
        if let Some(chrome) = &self.chrome {
            options = options.with_chrome(chrome);
        }
        options
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .init();

    match run(&cli) {
        Ok(output) => {
            println!("Created {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<PathBuf> {
    md2pdf::convert(&cli.input, &cli.options())
        .with_context(|| format!("Failed to convert {}", cli.input.display()))
}
