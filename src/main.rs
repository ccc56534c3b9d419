use clap::{
    Parser,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};

use ytplaylist::{
    cli,
    config::{self, Config, ConfigArgs},
    error, warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  long_about = "Authorizes against YouTube on the first run (opening a browser and \
                waiting for one OAuth callback), and on later runs finds or creates \
                the configured playlist and prints its id.",
  styles=styles(),
)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load .env file. Err: {}", e);
    }

    let cli = Cli::parse();

    let config = match Config::try_from(cli.config) {
        Ok(config) => config,
        Err(e) => error!("{}", e),
    };

    if let Err(e) = cli::run(&config).await {
        error!("{}", e);
    }
}
