//! tagdown - HTML to Markdown converter

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use serde::Deserialize;

use tagdown::util::decode_document;
use tagdown::{Config, Error, Syntax, Warning, convert};

#[derive(Parser)]
#[command(name = "tagdown")]
#[command(version, about = "Convert HTML to Markdown", long_about = None)]
#[command(after_help = "EXAMPLES:
    tagdown page.html                  Print page.html as Markdown
    tagdown -w 72 -o page.md page.html Wrap at 72 columns into page.md
    curl -s URL | tagdown -l endnote   Convert stdin, links as endnotes")]
struct Cli {
    /// Input file (HTML or XHTML); `-` or nothing reads stdin
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output file; defaults to stdout
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Paragraph width in columns
    #[arg(short, long, value_name = "WIDTH")]
    width: Option<usize>,

    /// Where link targets go: inline, paragraph or endnote
    #[arg(short = 'l', long = "link-placement", value_name = "PLACEMENT")]
    link_placement: Option<String>,

    /// Resolve relative links against this URL
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Render links to `#fragment` targets as plain text
    #[arg(long)]
    skip_local_fragments: bool,

    /// Read the input as well-formed XHTML
    #[arg(long)]
    xhtml: bool,

    /// Treat HTML parse errors as fatal
    #[arg(long)]
    strict: bool,

    /// JSON file with default options; flags override it
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Suppress warnings
    #[arg(short, long)]
    quiet: bool,
}

/// Options as stored in a `--config` file. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    column_width: Option<usize>,
    link_placement: Option<String>,
    base_url: Option<String>,
    skip_local_fragments: Option<bool>,
    syntax: Option<Syntax>,
    strict: Option<bool>,
}

impl ConfigFile {
    fn load(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    fn apply(self, config: &mut Config, warnings: &mut Vec<Warning>) {
        if let Some(width) = self.column_width {
            config.column_width = width;
        }
        if let Some(placement) = self.link_placement {
            config.set_link_placement(&placement, warnings);
        }
        if self.base_url.is_some() {
            config.base_url = self.base_url;
        }
        if let Some(skip) = self.skip_local_fragments {
            config.skip_local_fragments = skip;
        }
        if let Some(syntax) = self.syntax {
            config.syntax = syntax;
        }
        if let Some(strict) = self.strict {
            config.strict = strict;
        }
    }
}

impl Cli {
    /// Build the conversion options: defaults, then the config file, then
    /// flags.
    fn config(&self, warnings: &mut Vec<Warning>) -> Result<Config, Error> {
        let mut config = Config::default();
        if let Some(path) = &self.config {
            ConfigFile::load(path)?.apply(&mut config, warnings);
        }

        if let Some(width) = self.width {
            config.column_width = width;
        }
        if let Some(placement) = &self.link_placement {
            config.set_link_placement(placement, warnings);
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = Some(base_url.clone());
        }
        if self.skip_local_fragments {
            config.skip_local_fragments = true;
        }
        if self.xhtml {
            config.syntax = Syntax::Xhtml;
        }
        if self.strict {
            config.strict = true;
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(warnings) => {
            if !cli.quiet {
                for warning in &warnings {
                    eprintln!("warning: {warning}");
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<Vec<Warning>, Error> {
    let mut warnings = Vec::new();
    let config = cli.config(&mut warnings)?;

    let bytes = read_input(cli.input.as_deref())?;
    let input = decode_document(&bytes);
    let conversion = convert(&input, &config)?;
    warnings.extend(conversion.warnings);

    write_output(cli.output.as_deref(), &conversion.markdown)?;
    Ok(warnings)
}

fn read_input(path: Option<&Path>) -> io::Result<Vec<u8>> {
    match path {
        Some(path) if path != Path::new("-") => fs::read(path),
        _ => {
            let mut bytes = Vec::new();
            io::stdin().read_to_end(&mut bytes)?;
            Ok(bytes)
        }
    }
}

fn write_output(path: Option<&Path>, markdown: &str) -> io::Result<()> {
    match path {
        Some(path) => fs::write(path, markdown),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(markdown.as_bytes())?;
            stdout.flush()
        }
    }
}
