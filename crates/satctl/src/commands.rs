//! Command execution - lookups, interactive prompt, examples, config

use crate::cli::{Cli, Commands};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use satfinder_common::render::{render_text, RenderOptions};
use satfinder_common::sources::HttpSources;
use satfinder_common::{Lang, Reconciler, ResultRecord, SatConfig};
use std::io::{BufRead, Write};
use std::time::Duration;

/// Sample queries covering both languages, a name with a number, and a constellation member
pub const SAMPLE_QUERIES: [&str; 4] = ["허블 우주 망원경", "NOAA 19", "Sentinel-2A", "스타링크-30000"];

/// How a lookup is performed and printed
#[derive(Debug, Clone, Copy)]
pub struct LookupOptions {
    pub json: bool,
    pub exact_first: bool,
    pub spinner: bool,
    pub render: RenderOptions,
}

impl LookupOptions {
    pub fn from_config(config: &SatConfig, cli: &Cli) -> Self {
        let stdout_is_term = console::Term::stdout().is_term();
        let stderr_is_term = console::Term::stderr().is_term();

        Self {
            json: cli.json,
            exact_first: config.lookup.exact_first,
            spinner: stderr_is_term && !cli.json,
            render: RenderOptions {
                color: config.output.color && stdout_is_term,
                full_extract: cli.full,
            },
        }
    }
}

/// Load the config file and apply command-line overrides
pub fn load_config(cli: &Cli) -> Result<SatConfig> {
    let mut config = SatConfig::load(cli.config.as_deref())?;
    apply_overrides(&mut config, cli)?;
    Ok(config)
}

pub fn apply_overrides(config: &mut SatConfig, cli: &Cli) -> Result<()> {
    if let Some(tag) = &cli.local_lang {
        config.languages.local = Lang::new(tag.as_str())?;
    }
    if let Some(tag) = &cli.intl_lang {
        config.languages.international = Lang::new(tag.as_str())?;
    }
    if cli.no_exact {
        config.lookup.exact_first = false;
    }
    if cli.no_color {
        config.output.color = false;
    }
    Ok(())
}

/// Dispatch the parsed command line
pub fn run(cli: &Cli, config: &SatConfig) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Some(Commands::Examples) => print_examples(&mut out),
        Some(Commands::Config) => {
            write!(out, "{}", config.to_toml()?)?;
            Ok(())
        }
        None => {
            let sources = HttpSources::from_config(config)?;
            let opts = LookupOptions::from_config(config, cli);

            match cli.query_text() {
                Some(query) => {
                    let text = lookup(&sources, config, &query, &opts)?;
                    write!(out, "{}", text)?;
                    Ok(())
                }
                None => {
                    let stdin = std::io::stdin();
                    let mut err = std::io::stderr();
                    interactive(stdin.lock(), &mut out, &mut err, |query| {
                        lookup(&sources, config, query, &opts)
                    })
                }
            }
        }
    }
}

pub fn print_examples<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "Sample queries:")?;
    for query in SAMPLE_QUERIES {
        writeln!(out, "  satctl \"{}\"", query)?;
    }
    writeln!(out)?;
    writeln!(out, "A NORAD catalog number (e.g. 20580) also works.")?;
    Ok(())
}

const BRAILLE_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const ASCII_FRAMES: &[&str] = &["-", "\\", "|", "/"];

/// Stage spinner on stderr; ASCII frames without color
fn create_stage_spinner(color: bool) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();

    let (frames, template) = if color {
        (BRAILLE_FRAMES, "{spinner:.cyan} {msg}")
    } else {
        (ASCII_FRAMES, "{spinner} {msg}")
    };

    let style = ProgressStyle::default_spinner().tick_strings(frames);
    spinner.set_style(style.clone().template(template).unwrap_or(style));
    spinner.set_message("satfinder (searching)...");

    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Resolve one query against the HTTP sources and format the result
pub fn lookup(
    sources: &HttpSources,
    config: &SatConfig,
    query: &str,
    opts: &LookupOptions,
) -> Result<String> {
    let spinner = opts
        .spinner
        .then(|| create_stage_spinner(opts.render.color));

    let mut reconciler = Reconciler::from_sources(sources, config.languages.clone());
    if let Some(bar) = &spinner {
        let bar = bar.clone();
        reconciler = reconciler.with_progress(move |stage| bar.set_message(stage.label()));
    }

    let result = reconciler.resolve(query, opts.exact_first);

    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }

    format_record(&result?, opts)
}

/// Fact sheet as text or pretty JSON
pub fn format_record(record: &ResultRecord, opts: &LookupOptions) -> Result<String> {
    if opts.json {
        let mut json = serde_json::to_string_pretty(record).context("Failed to serialize result")?;
        json.push('\n');
        Ok(json)
    } else {
        Ok(render_text(record, &opts.render))
    }
}

/// Prompt loop: one query per line until EOF, "quit" or "exit".
///
/// Failures go to `err` and the loop continues.
pub fn interactive<R, W, E, F>(input: R, out: &mut W, err: &mut E, mut handle: F) -> Result<()>
where
    R: BufRead,
    W: Write,
    E: Write,
    F: FnMut(&str) -> Result<String>,
{
    writeln!(
        out,
        "Enter a satellite name or NORAD catalog number ('quit' to exit)."
    )?;
    write!(out, "satellite> ")?;
    out.flush()?;

    for line in input.lines() {
        let line = line.context("Failed to read from stdin")?;
        let query = line.trim();

        if matches!(query, "quit" | "exit") {
            break;
        }

        if !query.is_empty() {
            match handle(query) {
                Ok(text) => writeln!(out, "{}", text)?,
                Err(e) => writeln!(err, "error: {}", e)?,
            }
        }

        write!(out, "satellite> ")?;
        out.flush()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use satfinder_common::{CatalogRecord, LanguagePair, SatError, SourceRef, SummaryRecord};

    fn record() -> ResultRecord {
        ResultRecord {
            query: "NOAA 19".to_string(),
            summary: SummaryRecord {
                title: Some("NOAA-19".to_string()),
                description: Some("Weather satellite".to_string()),
                extract: None,
            },
            summary_source: SourceRef {
                lang: Lang::new("en").unwrap(),
                title: "NOAA-19".to_string(),
            },
            entity_id: None,
            launch_date: None,
            cospar_id: None,
            norad_id: None,
            catalog: Some(CatalogRecord {
                name: "NOAA 19".to_string(),
                line1: "1 33591U".to_string(),
                line2: "2 33591".to_string(),
            }),
            catalog_match: Some("NOAA 19".to_string()),
        }
    }

    fn plain(json: bool) -> LookupOptions {
        LookupOptions {
            json,
            exact_first: true,
            spinner: false,
            render: RenderOptions::default(),
        }
    }

    #[test]
    fn test_apply_overrides() {
        let cli = Cli::parse_from([
            "satctl",
            "--local-lang",
            "ja",
            "--intl-lang",
            "de",
            "--no-exact",
            "--no-color",
            "x",
        ]);
        let mut config = SatConfig::default();
        apply_overrides(&mut config, &cli).unwrap();

        assert_eq!(config.languages.local.as_str(), "ja");
        assert_eq!(config.languages.international.as_str(), "de");
        assert!(!config.lookup.exact_first);
        assert!(!config.output.color);
    }

    #[test]
    fn test_apply_overrides_rejects_bad_language() {
        let cli = Cli::parse_from(["satctl", "--local-lang", "ko/../", "x"]);
        let mut config = SatConfig::default();
        let err = apply_overrides(&mut config, &cli).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SatError>(),
            Some(SatError::InvalidLanguage(_))
        ));
        assert_eq!(config.languages, LanguagePair::default());
    }

    #[test]
    fn test_format_record_json() {
        let text = format_record(&record(), &plain(true)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["summary"]["title"], "NOAA-19");
        assert_eq!(value["catalog"]["line1"], "1 33591U");
        assert_eq!(value["summary_source"]["lang"], "en");
        assert!(value["launch_date"].is_null());
    }

    #[test]
    fn test_format_record_text() {
        let text = format_record(&record(), &plain(false)).unwrap();
        assert!(text.contains("NOAA-19"));
        assert!(text.contains("1 33591U"));
    }

    #[test]
    fn test_print_examples() {
        let mut out = Vec::new();
        print_examples(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        for query in SAMPLE_QUERIES {
            assert!(text.contains(query));
        }
    }

    #[test]
    fn test_interactive_loop() {
        let input = b"Hubble\n\n  missing  \nquit\nNOAA 19\n" as &[u8];
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut seen = Vec::new();

        interactive(input, &mut out, &mut err, |query| {
            seen.push(query.to_string());
            if query == "missing" {
                Err(SatError::NotFound {
                    query: query.to_string(),
                }
                .into())
            } else {
                Ok(format!("sheet for {}\n", query))
            }
        })
        .unwrap();

        assert_eq!(seen, vec!["Hubble".to_string(), "missing".to_string()]);
        let text = String::from_utf8(out).unwrap();
        let errors = String::from_utf8(err).unwrap();
        assert!(text.contains("sheet for Hubble"));
        assert!(!text.contains("error:"), "Failures stay off stdout");
        assert!(errors.contains("error: No encyclopedia article found for 'missing'"));
        assert!(!text.contains("NOAA 19"), "Input after quit is ignored");
    }
}
