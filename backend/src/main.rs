//! Refsheet CLI - validate the REF catalog and build cheatsheets
//!
//! # Commands
//!
//! ```bash
//! refsheet validate                         # Check data/refs.json
//! refsheet validate --json                  # Machine-readable report
//! refsheet cheatsheet SAT_01 NPS            # CSV to stdout
//! refsheet cheatsheet SAT_01 --lang fr      # Translated wording where available
//! refsheet cheatsheet SAT_01 -o out.csv     # Write to file
//! refsheet list --group User                # List REFs
//! refsheet show SAT_01                      # One REF with its translations
//! refsheet import catalog.csv -o refs.json  # Sheet export to refs.json
//! ```
//!
//! Data files default to `data/refs.json` and `data/translations.json`; see
//! `refsheet::config` for the environment variables.

use clap::{Parser, Subcommand};
use refsheet::{
    generate_cheatsheet, import_sheet_file, load_translations, Catalog, CheatsheetRequest,
    DataPaths, Group, Scalability, Vocabulary,
};
use serde_json::json;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "refsheet")]
#[command(about = "Validate the survey REF catalog and build form-generator cheatsheets", long_about = None)]
struct Cli {
    /// Catalog file (default: $REFSHEET_CATALOG or data/refs.json)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Translations file (default: $REFSHEET_TRANSLATIONS or data/translations.json)
    #[arg(long, global = true)]
    translations: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the catalog: required fields, unique refs, allowed values
    Validate {
        /// Print the report as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// Build the cheatsheet CSV for the given refs
    #[command(alias = "generate")]
    Cheatsheet {
        /// Ref ids, in output order
        #[arg(required = true)]
        refs: Vec<String>,

        /// Language code for translated wording
        #[arg(short, long)]
        lang: Option<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List refs (id, question, translated languages), optionally filtered
    List {
        /// Only this group (Plan, User, Ancillary)
        #[arg(short, long)]
        group: Option<String>,

        /// Only this scalability (Standard, Custom)
        #[arg(short, long)]
        scalability: Option<String>,
    },

    /// Show one ref and its translations as JSON
    Show {
        /// Ref id
        id: String,
    },

    /// Convert a catalog sheet export (CSV) into refs.json
    Import {
        /// Input CSV file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();
    refsheet::logs::init("info");

    let cli = Cli::parse();
    let paths = DataPaths::from_env().with_overrides(cli.catalog, cli.translations);

    let result = match cli.command {
        Commands::Validate { json } => cmd_validate(&paths, json),

        Commands::Cheatsheet { refs, lang, output } => {
            cmd_cheatsheet(&paths, refs, lang, output.as_deref())
        }

        Commands::List { group, scalability } => {
            cmd_list(&paths, group.as_deref(), scalability.as_deref())
        }

        Commands::Show { id } => cmd_show(&paths, &id),

        Commands::Import { input, output } => cmd_import(&input, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_validate(paths: &DataPaths, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::load(&paths.catalog)?;
    let report = catalog.report();

    if json {
        let mut content = serde_json::to_string_pretty(&report)?;
        content.push('\n');
        write_output(&content, None)?;
    } else {
        for violation in &report.violations {
            eprintln!("   ❌ {}", violation);
        }
    }

    if !report.valid {
        return Err(format!("{} problem(s) in {} REFs", report.violations.len(), report.checked).into());
    }

    if !json {
        println!("Validated {} REFs.", report.checked);
    }
    Ok(())
}

fn cmd_cheatsheet(
    paths: &DataPaths,
    refs: Vec<String>,
    lang: Option<String>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let refs: Vec<String> = refs
        .iter()
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .collect();
    if refs.is_empty() {
        return Err("Usage: refsheet cheatsheet <ref> [ref ...] [--lang xx] [--output path.csv]".into());
    }

    let catalog = Catalog::load(&paths.catalog)?;
    let translations = load_translations(&paths.translations);

    let mut request = CheatsheetRequest::new(refs);
    if let Some(lang) = lang {
        request = request.with_language(lang);
    }

    let csv = generate_cheatsheet(&request, &catalog, &translations)?;
    write_output(&csv, output)?;
    Ok(())
}

fn cmd_list(
    paths: &DataPaths,
    group: Option<&str>,
    scalability: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let group = group.map(|g| parse_filter::<Group>(g, "group")).transpose()?;
    let scalability = scalability
        .map(|s| parse_filter::<Scalability>(s, "scalability"))
        .transpose()?;

    let catalog = Catalog::load(&paths.catalog)?;
    let translations = load_translations(&paths.translations);
    let records = catalog.filter(group, scalability);

    eprintln!("📋 {} REF(s):\n", records.len());
    let mut out = std::io::stdout().lock();
    for record in records {
        let languages = record
            .id()
            .map(|id| translations.languages_for(id).join(","))
            .unwrap_or_default();
        writeln!(
            out,
            "{}\t{}\t{}",
            record.id().unwrap_or("(missing ref)"),
            record.question.as_deref().unwrap_or(""),
            languages
        )?;
    }
    Ok(())
}

fn parse_filter<T: Vocabulary>(value: &str, field: &str) -> Result<T, String> {
    T::parse(value).ok_or_else(|| {
        let allowed: Vec<&str> = T::ALL.iter().map(|v| v.as_str()).collect();
        format!("Invalid {} '{}' (expected one of: {})", field, value, allowed.join(", "))
    })
}

fn cmd_show(paths: &DataPaths, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::load(&paths.catalog)?;
    let record = catalog
        .get(id)
        .ok_or_else(|| format!("Unknown REF: {}", id))?;
    let translations = load_translations(&paths.translations);

    let view = json!({
        "record": record,
        "translations": translations.entries_for(id),
    });
    let mut content = serde_json::to_string_pretty(&view)?;
    content.push('\n');
    write_output(&content, None)?;
    Ok(())
}

fn cmd_import(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let import = import_sheet_file(input)?;
    eprintln!("   Columns: {}", import.headers.join(", "));

    let catalog = Catalog::from_records(import.records);

    eprintln!("\n✔️  Validation:");
    match catalog.validate() {
        Ok(count) => eprintln!("   ✅ All {} REFs valid!", count),
        Err(violations) => {
            eprintln!("   ⚠️  {} problem(s):", violations.len());
            for violation in violations.iter().take(10) {
                eprintln!("     - {}", violation);
            }
            if violations.len() > 10 {
                eprintln!("     ... +{}", violations.len() - 10);
            }
        }
    }

    let mut content = catalog.to_json_pretty()?;
    content.push('\n');
    write_output(&content, output)?;
    Ok(())
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            let mut out = std::io::stdout().lock();
            out.write_all(content.as_bytes())?;
            out.flush()?;
        }
    }
    Ok(())
}
