// src/cli.rs
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};

use crate::{
    config::options::{AppOptions, MaxSalary, RunMode},
    core::net::HttpClient,
    progress::Progress,
    scrape,
};

#[derive(Parser, Debug)]
#[command(name = "empleos_scrape", version, about = "Scrape empleos.net job postings to JSON + CSV")]
struct Cli {
    /// Directory for the JSON and CSV files
    #[arg(long, global = true, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl every listing page up to the ceiling; fresh snapshot
    Full(RunArgs),
    /// Refresh the first page and merge new jobs into the full set
    Update(RunArgs),
    /// Bounded snapshot (historically a single page; see --max-pages)
    TwoPages(RunArgs),
    /// First listing page only
    FirstPage(RunArgs),
    /// Print the job ids of the first listing pages without fetching details
    Probe {
        #[arg(long, default_value_t = 2)]
        pages: u32,
    },
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Override the mode's page ceiling
    #[arg(long)]
    max_pages: Option<u32>,
    /// Fill max salary from the second number of a salary range
    #[arg(long)]
    salary_range: bool,
}

/// Prints progress lines to stdout.
struct ConsoleProgress {
    total: usize,
    done: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
        if total > 0 {
            println!("{total} new jobs on this page");
        }
    }

    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn item_done(&mut self, id: &str, title: &str) {
        self.done += 1;
        println!("  [{}/{}] {id} ✓ {title}", self.done, self.total);
    }

    fn item_failed(&mut self, id: &str) {
        self.done += 1;
        println!("  [{}/{}] {id} ✗ skipped", self.done, self.total);
    }
}

/// Mode defaults plus command-line overrides. Pacing always keeps its defaults.
fn app_options(mode: RunMode, args: &RunArgs, out_dir: Option<PathBuf>) -> AppOptions {
    let mut app = AppOptions::for_mode(mode);
    if let Some(n) = args.max_pages {
        app.scrape.max_pages = n;
    }
    if args.salary_range {
        app.scrape.extract.max_salary = MaxSalary::SecondNumber;
    }
    if let Some(dir) = out_dir {
        app.export.out_dir = dir;
    }
    app
}

pub fn run() -> Result<()> {
    crate::log::init();
    let cli = Cli::parse();
    let client = HttpClient::new().wrap_err("building HTTP client")?;

    let (mode, args) = match cli.command {
        Command::Full(a)      => (RunMode::Full, a),
        Command::Update(a)    => (RunMode::Update, a),
        Command::TwoPages(a)  => (RunMode::TwoPages, a),
        Command::FirstPage(a) => (RunMode::FirstPage, a),
        Command::Probe { pages } => {
            let app = AppOptions::default();
            for p in scrape::probe(&client, &app.scrape.extract.base_url, pages, &app.scrape.pacing) {
                println!("Page {}: {} ids ({} new), more pages: {}", p.page, p.ids.len(), p.new, p.has_more);
                println!("  {}", p.ids.join(", "));
                for url in &p.sample_urls {
                    println!("  {url}");
                }
            }
            return Ok(());
        }
    };

    let app = app_options(mode, &args, cli.out_dir);

    println!("Starting {} (up to {} pages)", mode.label(), app.scrape.max_pages);
    let today = chrono::Local::now().date_naive();
    let mut progress = ConsoleProgress { total: 0, done: 0 };
    let outcome = scrape::execute(&client, &app, today, Some(&mut progress))
        .wrap_err("saving results")?;

    let s = &outcome.summary;
    println!(
        "Done: {} jobs scraped over {} pages ({}), {} skipped",
        s.records.len(),
        s.pages_visited,
        s.stop,
        s.failed.len()
    );
    if mode.merges() {
        println!("Added {} new jobs; {} in the full set", outcome.added, outcome.total);
    }
    for path in &outcome.written {
        println!("Wrote {}", path.display());
    }
    Ok(())
}
