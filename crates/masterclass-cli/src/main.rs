//! Masterclass CLI: terminal client for the masterclass landing service.
//!
//! Talks to the server exclusively through the content API and drives the
//! same landing, admin and view-switching logic the web pages use.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod client;

use std::io::Write as _;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

use masterclass_core::admin::{AdminView, NoticeKind};
use masterclass_core::countdown::{self, format_time};
use masterclass_core::document::ContentDocument;
use masterclass_core::landing::{DocumentOrigin, LandingView};
use masterclass_core::source::ContentSource;
use masterclass_core::view::{MemoryHistory, Navigator, View, ViewSwitcher};

use crate::client::ContentClient;

// ── ANSI color helpers ───────────────────────────────────────────────

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const MAGENTA: &str = "\x1b[35m";
const CYAN: &str = "\x1b[36m";
const WHITE: &str = "\x1b[37m";

// ── CLI structure ────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "masterclass",
    version,
    about = "Masterclass CLI: view the landing page, run the countdown and edit content",
    long_about = None,
    after_help = format!(
        "{DIM}Environment variables:{RESET}\n  \
         MASTERCLASS_ADDR        Server address (default: http://127.0.0.1:8300)\n  \
         MASTERCLASS_TOKEN       Bearer credential for the content API\n  \
         MASTERCLASS_API_PREFIX  Content API path prefix\n\n\
         {DIM}Examples:{RESET}\n  \
         masterclass show --watch\n  \
         masterclass get > content.json\n  \
         masterclass set content.json\n  \
         masterclass edit --title 'NEW TITLE' --countdown-minutes 5"
    ),
)]
struct Cli {
    /// Masterclass server address.
    #[arg(long, env = "MASTERCLASS_ADDR", default_value = "http://127.0.0.1:8300")]
    addr: String,

    /// Bearer credential for the content API.
    #[arg(long, env = "MASTERCLASS_TOKEN")]
    token: Option<String>,

    /// Path prefix the content API is mounted under.
    #[arg(long, env = "MASTERCLASS_API_PREFIX", default_value = "/make-server-9d7867d5")]
    prefix: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the landing page content.
    Show {
        /// Start the countdown and keep the clock ticking until it reaches zero.
        #[arg(long, default_value = "false")]
        watch: bool,
    },
    /// Print the stored content document as JSON.
    Get,
    /// Replace the content document with the JSON in a file.
    Set {
        /// Path to a JSON content document.
        file: String,
    },
    /// Load the admin form, change the given fields and save it.
    Edit(EditArgs),
    /// Open the join link in the default browser.
    Join,
    /// Interactively switch between the landing and admin views.
    Browse {
        /// Starting URL; `?admin=true` opens the admin view.
        #[arg(long, default_value = "/")]
        url: String,
    },
}

#[derive(Args)]
struct EditArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    subtitle: Option<String>,
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    time: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    point1: Option<String>,
    #[arg(long)]
    point2: Option<String>,
    #[arg(long)]
    point3: Option<String>,
    #[arg(long)]
    button_text: Option<String>,
    #[arg(long)]
    telegram_link: Option<String>,
    #[arg(long)]
    gift_title: Option<String>,
    #[arg(long)]
    gift_description: Option<String>,
    /// Countdown length in minutes; invalid or zero values become 2.
    #[arg(long)]
    countdown_minutes: Option<String>,
}

impl EditArgs {
    /// Changed fields keyed by their wire name.
    fn changes(self) -> Vec<(&'static str, String)> {
        [
            ("title", self.title),
            ("subtitle", self.subtitle),
            ("date", self.date),
            ("time", self.time),
            ("description", self.description),
            ("point1", self.point1),
            ("point2", self.point2),
            ("point3", self.point3),
            ("buttonText", self.button_text),
            ("telegramLink", self.telegram_link),
            ("giftTitle", self.gift_title),
            ("giftDescription", self.gift_description),
            ("countdownMinutes", self.countdown_minutes),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
    }
}

// ── Pretty output helpers ────────────────────────────────────────────

fn header(icon: &str, title: &str) {
    println!("{BOLD}{CYAN}{icon} {title}{RESET}");
    println!("{DIM}─────────────────────────────────────────{RESET}");
}

fn kv_line(key: &str, value: &str) {
    println!("  {DIM}{key:<20}{RESET} {WHITE}{value}{RESET}");
}

fn success(msg: &str) {
    println!("{GREEN}{BOLD}✓{RESET} {msg}");
}

fn warning(msg: &str) {
    println!("{YELLOW}{BOLD}⚠{RESET} {YELLOW}{msg}{RESET}");
}

fn print_landing(view: &LandingView) {
    let doc = view.document();
    println!();
    header("★", &doc.title);
    println!("  {MAGENTA}{}{RESET}", doc.subtitle);
    println!();
    kv_line("Kun", &doc.date);
    kv_line("Soat", &doc.time);
    println!();
    println!("  {}", doc.description);
    println!();
    println!("  {BOLD}MASTERKLASSDA SIZ:{RESET}");
    for (number, point) in view.numbered_points() {
        println!("  {CYAN}{number}{RESET}  {point}");
    }
    println!();
    match view.join_link() {
        Some(link) => kv_line(&doc.button_text, link),
        None => kv_line(&doc.button_text, "-"),
    }
    println!();
    println!("  {BOLD}{}{RESET}", doc.gift_title);
    println!("  {}", doc.gift_description);
    println!();
    kv_line("Qolgan vaqt", &view.countdown_display());
    println!();
}

fn print_admin(view: &AdminView) {
    let form = &view.form;
    println!();
    header("⚙", "Admin Panel - Masterclass Ma'lumotlari");
    if let Some(notice) = view.notice(Instant::now()) {
        match notice.kind {
            NoticeKind::Success => success(notice.text),
            NoticeKind::Error => warning(notice.text),
        }
    }
    kv_line("title", &form.title);
    kv_line("subtitle", &form.subtitle);
    kv_line("date", &form.date);
    kv_line("time", &form.time);
    kv_line("description", &form.description);
    kv_line("point1", &form.point1);
    kv_line("point2", &form.point2);
    kv_line("point3", &form.point3);
    kv_line("buttonText", &form.button_text);
    kv_line("telegramLink", &form.telegram_link);
    kv_line("giftTitle", &form.gift_title);
    kv_line("giftDescription", &form.gift_description);
    kv_line("countdownMinutes", &form.countdown_minutes.to_string());
    println!();
}

fn print_json(document: &ContentDocument) -> Result<()> {
    let json = serde_json::to_string_pretty(document).context("failed to format JSON")?;
    println!("{json}");
    Ok(())
}

// ── Command dispatch ─────────────────────────────────────────────────

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let result = match ContentClient::new(&cli.addr, &cli.prefix, cli.token) {
        Ok(client) => run(&client, cli.command).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!();
            eprintln!("  {RED}{BOLD}✗ Error:{RESET} {e:#}");
            eprintln!();
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &ContentClient, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Show { watch } => cmd_show(client, watch).await,
        Commands::Get => cmd_get(client).await,
        Commands::Set { file } => cmd_set(client, &file).await,
        Commands::Edit(args) => cmd_edit(client, args).await,
        Commands::Join => cmd_join(client).await,
        Commands::Browse { url } => cmd_browse(client, &url).await,
    }
}

// ── Landing commands ─────────────────────────────────────────────────

async fn cmd_show(client: &ContentClient, watch: bool) -> Result<()> {
    let mut view = LandingView::load(client).await;
    if view.origin() == DocumentOrigin::Fallback {
        warning(&format!(
            "could not reach {}, showing built-in content",
            client.url()
        ));
    }
    print_landing(&view);

    if watch {
        run_countdown(&mut view).await?;
    }
    Ok(())
}

/// Activate the countdown and redraw the clock on one line until it stops.
async fn run_countdown(view: &mut LandingView) -> Result<()> {
    if !view.activate() {
        warning("countdown has no time on it");
        return Ok(());
    }

    let (tx, mut rx) = watch::channel(view.countdown().remaining());
    let driver = tokio::spawn(countdown::drive(view.countdown().clone(), tx));

    let mut stdout = std::io::stdout();
    loop {
        let remaining = *rx.borrow_and_update();
        write!(stdout, "\r  {DIM}Qolgan vaqt{RESET}  {BOLD}{}{RESET}", format_time(remaining))
            .and_then(|()| stdout.flush())
            .context("failed to write to stdout")?;
        if rx.changed().await.is_err() {
            break;
        }
    }
    println!();

    let finished = driver.await.context("countdown task failed")?;
    if finished.is_finished() {
        success("countdown finished");
    }
    Ok(())
}

async fn cmd_join(client: &ContentClient) -> Result<()> {
    let view = LandingView::load(client).await;
    let Some(link) = view.join_link() else {
        bail!("no join link is configured");
    };
    println!("  {DIM}Opening{RESET} {CYAN}{link}{RESET}");
    open_browser(link)
}

fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }
    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", url])
            .spawn()
            .context("failed to open browser")?;
    }
    Ok(())
}

// ── Content commands ─────────────────────────────────────────────────

async fn cmd_get(client: &ContentClient) -> Result<()> {
    let document = client
        .fetch_document()
        .await
        .context("failed to fetch content")?;
    print_json(&document)
}

async fn cmd_set(client: &ContentClient, file: &str) -> Result<()> {
    let raw = std::fs::read_to_string(file).with_context(|| format!("failed to read {file}"))?;
    let document: ContentDocument =
        serde_json::from_str(&raw).with_context(|| format!("{file} is not a content document"))?;
    client
        .save_document(&document)
        .await
        .context("failed to save content")?;
    success(&format!("content replaced from {file}"));
    Ok(())
}

async fn cmd_edit(client: &ContentClient, args: EditArgs) -> Result<()> {
    let changes = args.changes();
    if changes.is_empty() {
        bail!("nothing to change; pass at least one field flag (see --help)");
    }

    let mut view = AdminView::load(client).await;
    if let Some(notice) = view.notice(Instant::now()) {
        // Saving a blank form would wipe the stored content.
        bail!("{}", notice.text);
    }

    for (name, value) in &changes {
        view.form.set_field(name, value);
    }

    let saved = view.submit(client).await;
    print_admin(&view);
    if !saved {
        bail!("failed to save content to {}", client.url());
    }
    Ok(())
}

// ── View switching ───────────────────────────────────────────────────

const BROWSE_HELP: &str = "commands: admin, back, prev, next, save, set <field> <value>, quit";

async fn cmd_browse(client: &ContentClient, url: &str) -> Result<()> {
    let mut switcher = ViewSwitcher::new(MemoryHistory::new(url));
    let mut admin = None;
    render_view(client, &switcher, &mut admin).await;
    println!("  {DIM}{BROWSE_HELP}{RESET}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{CYAN}{}{RESET} > ", switcher.navigator().location());
        std::io::stdout().flush().context("failed to write to stdout")?;

        let Some(line) = lines.next_line().await.context("failed to read stdin")? else {
            break;
        };
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));

        let before = switcher.current();
        match command {
            "" => continue,
            "quit" | "exit" => break,
            "admin" => {
                switcher.show_admin();
            }
            "back" => {
                switcher.back();
            }
            "prev" => {
                if switcher.navigator_mut().back().is_none() {
                    warning("no earlier history entry");
                }
                switcher.sync();
            }
            "next" => {
                if switcher.navigator_mut().forward().is_none() {
                    warning("no later history entry");
                }
                switcher.sync();
            }
            "save" | "set" => {
                let Some(view) = admin.as_mut().filter(|_| switcher.current() == View::Admin)
                else {
                    warning("open the admin view first");
                    continue;
                };
                if command == "set" {
                    let (field, value) = rest.split_once(' ').unwrap_or((rest, ""));
                    if !view.form.set_field(field, value) {
                        warning(&format!("unknown field '{field}'"));
                    }
                } else {
                    view.submit(client).await;
                }
                print_admin(view);
                continue;
            }
            _ => {
                warning(BROWSE_HELP);
                continue;
            }
        }

        if switcher.current() != before {
            render_view(client, &switcher, &mut admin).await;
        }
    }
    Ok(())
}

/// Render whichever view is current, fetching its own copy of the document.
async fn render_view(
    client: &ContentClient,
    switcher: &ViewSwitcher<MemoryHistory>,
    admin: &mut Option<AdminView>,
) {
    match switcher.current() {
        View::Landing => {
            *admin = None;
            let view = LandingView::load(client).await;
            print_landing(&view);
        }
        View::Admin => {
            let view = AdminView::load(client).await;
            print_admin(&view);
            *admin = Some(view);
        }
    }
}
