//! Renders exported article body JSON files to sanitized HTML.
//!
//! Usage: `matchpress-cli [--lang ar|fr] [article.json ...]`
//!
//! With no file arguments, every `.json` file in the configured articles
//! directory is rendered. Per the output contract, decode failures and empty
//! documents become fixed localized notices in the output stream; the raw
//! error is never shown to readers (it goes to the log instead).

use anyhow::{Context, Result};
use matchpress_config::{Config, Locale};
use matchpress_engine::{RenderOutcome, render_article};
use std::{env, path::PathBuf, process};

/// Fixed, non-technical notices shown in place of an article body.
fn unavailable_notice(locale: Locale) -> &'static str {
    match locale {
        Locale::Ar => "المحتوى غير متوفر حالياً.",
        Locale::Fr => "Contenu indisponible pour le moment.",
    }
}

fn empty_notice(locale: Locale) -> &'static str {
    match locale {
        Locale::Ar => "لا يوجد محتوى للعرض.",
        Locale::Fr => "Aucun contenu à afficher.",
    }
}

fn notice_markup(message: &str) -> String {
    format!(r#"<p class="content-notice">{message}</p>"#)
}

fn render_file(path: &PathBuf, locale: Locale) -> Result<String> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let html = match render_article(&raw) {
        RenderOutcome::Rendered(html) => html,
        RenderOutcome::Empty => notice_markup(empty_notice(locale)),
        RenderOutcome::Unavailable(err) => {
            log::warn!("{}: {err}", path.display());
            notice_markup(unavailable_notice(locale))
        }
    };
    Ok(html)
}

fn json_files_in(dir: &PathBuf) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read articles directory {}", dir.display()))?
    {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut locale_override = None;
    let mut files = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--lang" => {
                let Some(value) = args.get(i + 1) else {
                    eprintln!("Usage: {} [--lang ar|fr] [article.json ...]", args[0]);
                    process::exit(1);
                };
                match value.parse::<Locale>() {
                    Ok(locale) => locale_override = Some(locale),
                    Err(e) => {
                        eprintln!("Error: {e}");
                        process::exit(1);
                    }
                }
                i += 2;
            }
            "--help" | "-h" => {
                eprintln!("Usage: {} [--lang ar|fr] [article.json ...]", args[0]);
                return Ok(());
            }
            _ => {
                files.push(PathBuf::from(&args[i]));
                i += 1;
            }
        }
    }

    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Error: Failed to load config file: {e}");
        process::exit(1);
    });

    let locale = locale_override
        .or_else(|| config.as_ref().map(|c| c.locale))
        .unwrap_or_default();

    if files.is_empty() {
        let Some(config) = config else {
            eprintln!("Error: No article files given and no config file found");
            eprintln!("Usage: {} [--lang ar|fr] [article.json ...]", args[0]);
            eprintln!(
                "Or create a config file at {}",
                Config::config_path().display()
            );
            process::exit(1);
        };
        files = json_files_in(&config.articles_path)?;
    }

    for path in &files {
        println!("{}", render_file(path, locale)?);
    }

    Ok(())
}
