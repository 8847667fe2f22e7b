use std::sync::Arc;

use reader_core::{ArticleDetailView, PlatformStatus, ScreenViewModel};
use reader_engine::{
    AccessGate, HeadlineLoader, NewsApiSource, PlatformAuthenticator, PlatformProber,
};
use reader_logging::{reader_info, reader_warn};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::config::{BiometricMode, ReaderConfig};
use crate::console::{ConsoleAnswer, ConsolePlatform};
use crate::render::{render, render_detail};

/// A line typed on the headline screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Authenticate,
    DismissError,
    Refresh,
    Retry,
    Open(usize),
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line {
            "a" => Command::Authenticate,
            "d" => Command::DismissError,
            "r" => Command::Refresh,
            "t" => Command::Retry,
            "q" => Command::Quit,
            _ => match line.strip_prefix('o').map(str::trim).map(str::parse::<usize>) {
                Some(Ok(number)) if number > 0 => Command::Open(number),
                _ => Command::Unknown(line.to_string()),
            },
        }
    }
}

/// The headline screen: gate and loader live exactly as long as this value.
pub struct Screen {
    title: String,
    source: String,
    platform: Arc<ConsolePlatform>,
    gate: Arc<AccessGate>,
    loader: HeadlineLoader,
}

impl Screen {
    pub fn open(config: &ReaderConfig) -> anyhow::Result<Self> {
        let status = match config.biometric {
            BiometricMode::Disabled => PlatformStatus::NoHardware,
            BiometricMode::Console => PlatformStatus::Success,
        };
        let platform = Arc::new(ConsolePlatform::new(status));
        let prober = PlatformProber::new(platform.clone());
        let authenticator = Arc::new(PlatformAuthenticator::new(
            platform.clone(),
            config.prompt_info(),
        ));
        let gate = Arc::new(AccessGate::new(&prober, authenticator));

        let source = Arc::new(NewsApiSource::new(config.news_settings())?);
        let loader = HeadlineLoader::new(source, config.loader_settings());

        Ok(Self {
            title: config.title.clone(),
            source: config.news.source.clone(),
            platform,
            gate,
            loader,
        })
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let mut gate_rx = self.gate.subscribe();
        let mut loader_rx = self.loader.subscribe();

        self.loader.load(self.source.clone(), false);
        if !self.gate.state().is_passable() {
            self.spawn_authenticate();
        }
        self.redraw();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        break;
                    };
                    if self.platform.has_pending() {
                        self.platform.answer(ConsoleAnswer::parse(&line));
                        continue;
                    }
                    if !self.handle(Command::parse(&line)) {
                        break;
                    }
                }
                changed = gate_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    self.redraw();
                }
                changed = loader_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    self.redraw();
                }
            }
        }

        reader_info!("Headline screen closed");
        Ok(())
    }

    /// Returns false when the screen should close.
    fn handle(&self, command: Command) -> bool {
        let passable = self.gate.state().is_passable();
        match command {
            Command::Quit => return false,
            Command::Authenticate => self.spawn_authenticate(),
            Command::DismissError => self.gate.clear_error(),
            Command::Refresh | Command::Retry | Command::Open(_) if !passable => {
                println!("Locked. Authenticate first.");
            }
            Command::Refresh => {
                self.loader.load(self.source.clone(), true);
            }
            Command::Retry => {
                self.loader.retry();
            }
            Command::Open(number) => self.open_article(number),
            Command::Unknown(text) if text.is_empty() => {}
            Command::Unknown(text) => {
                reader_warn!("Unknown command {:?}", text);
                println!("Unknown command {text:?}");
            }
        }
        true
    }

    fn open_article(&self, number: usize) {
        let state = self.loader.state();
        match state.data().and_then(|articles| articles.get(number - 1)) {
            Some(article) => println!("\n{}", render_detail(&ArticleDetailView::from(article))),
            None => println!("No headline #{number}"),
        }
    }

    fn spawn_authenticate(&self) {
        let gate = Arc::clone(&self.gate);
        tokio::spawn(async move { gate.authenticate().await });
    }

    fn redraw(&self) {
        let view = ScreenViewModel::compose(&self.gate.state(), &self.loader.state());
        println!("\n{}", render(&self.title, &view));
    }
}
