use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tokio::sync::mpsc;

use retake_proxy::client::{
    render, submit_news, Carousel, HttpApi, LoadState, NewsLoader, Pacing, Progress, ProjectsLoader,
    RetakeApi, Slug, ToastSlot, NEWS_ERROR_ROW,
};
use retake_proxy::config::{load_config, ApiLayout, ClientConfig};

#[derive(Parser)]
#[command(name = "retake-cli")]
#[command(about = "Terminal front end for the Retake proxy", long_about = None)]
struct Cli {
    /// Proxy configuration file; its `[client]` section supplies the defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the proxy routes or serverless functions.
    #[arg(short, long)]
    url: Option<String>,

    #[arg(short, long, value_enum)]
    layout: Option<Layout>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Layout {
    Proxy,
    Functions,
}

impl From<Layout> for ApiLayout {
    fn from(layout: Layout) -> Self {
        match layout {
            Layout::Proxy => ApiLayout::Proxy,
            Layout::Functions => ApiLayout::Functions,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show captured and liberated projects
    Projects,
    /// Show recent news
    News {
        #[arg(short, long)]
        days: Option<u32>,
    },
    /// Fetch the score of one repository
    Score { slug: String },
    /// Submit a repository for a news item
    Submit { slug: String },
    /// Page through the example carousel
    Examples {
        #[arg(short, long, default_value = "data/examples.json")]
        file: PathBuf,
        /// Zero-based page number
        #[arg(short, long, default_value_t = 0)]
        page: usize,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?.client,
        None => ClientConfig::default(),
    };
    if let Some(url) = cli.url {
        config.base_url = url;
    }
    if let Some(layout) = cli.layout {
        config.layout = layout.into();
    }

    let api = HttpApi::new(&config)?;
    let mut toasts = ToastSlot::default();

    match cli.command {
        Commands::Projects => {
            let mut loader = ProjectsLoader::new();
            loader.load(&api, &mut toasts).await;
            print_toast(&toasts);
            if let Some(board) = loader.board() {
                println!("{}", render::captured_table(&board.captured));
                println!("{}", render::liberated_table(&board.liberated));
            }
        }
        Commands::News { days } => {
            show_news(&api, days.unwrap_or(config.news_days), &mut toasts).await;
        }
        Commands::Score { slug } => {
            let slug = parse_slug(&slug)?;
            let score = api.score(&slug).await.map_err(|e| e.user_message())?;
            println!("{}", serde_json::to_string_pretty(&score)?);
        }
        Commands::Submit { slug } => {
            let slug = parse_slug(&slug)?;

            let (tx, mut rx) = mpsc::unbounded_channel::<Progress>();
            let printer = tokio::spawn(async move {
                while let Some(progress) = rx.recv().await {
                    println!("{}", progress.text());
                }
            });

            let result = submit_news(&api, &slug, Pacing::from_config(&config), &tx).await;
            drop(tx);
            let _ = printer.await;

            result.map_err(|e| e.user_message())?;
            show_news(&api, config.news_days, &mut toasts).await;
        }
        Commands::Examples { file, page } => {
            let mut carousel = Carousel::load(&file, &mut fastrand::Rng::new())?;
            for _ in 0..page {
                if !carousel.next() {
                    break;
                }
            }
            println!("{}", render::example_cards(carousel.page()));
            println!(
                "{} example(s){}{}",
                carousel.len(),
                if carousel.can_go_back() { ", more before" } else { "" },
                if carousel.can_go_forward() { ", more after" } else { "" },
            );
        }
    }

    Ok(())
}

/// Invalid input ends the process with a failure status.
fn parse_slug(raw: &str) -> Result<Slug, String> {
    raw.parse::<Slug>().map_err(|e| e.to_string())
}

async fn show_news<A: RetakeApi>(api: &A, days: u32, toasts: &mut ToastSlot) {
    let mut loader = NewsLoader::new();
    loader.load(api, days, toasts).await;
    print_toast(toasts);
    match loader.state() {
        LoadState::Displayed(board) => println!("{}", render::news_table(&board.items)),
        _ => println!("{}", render::news_table(&[]).with_error(NEWS_ERROR_ROW)),
    }
}

fn print_toast(toasts: &ToastSlot) {
    if let Some(toast) = toasts.visible() {
        eprintln!("{toast}");
    }
}
