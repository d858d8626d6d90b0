// SPDX-License-Identifier: MPL-2.0
use iced_gallery::app::{self, Flags};

const HELP: &str = "\
Coping with Art gallery viewer

USAGE:
  iced_gallery [OPTIONS]

OPTIONS:
  --lang <id>          Interface language (e.g. en-US, fr)
  --source <url|dir>   Asset host: a web base URL or a local directory
  --config-dir <dir>   Directory holding settings.toml
  -h, --help           Print this help

ENVIRONMENT:
  ICED_GALLERY_CONFIG_DIR   Same as --config-dir
  RUST_LOG                  Log filter (default: info,iced_gallery=debug)
";

fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,iced_gallery=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .init();
}

fn parse_args() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(None);
    }

    let flags = Flags {
        lang: args.opt_value_from_str("--lang")?,
        source: args.opt_value_from_str("--source")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
    };

    let rest = args.finish();
    if !rest.is_empty() {
        tracing::warn!(?rest, "ignoring unexpected arguments");
    }

    Ok(Some(flags))
}

fn main() -> iced::Result {
    init_logging();

    let flags = match parse_args() {
        Ok(Some(flags)) => flags,
        Ok(None) => return Ok(()),
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting");
    app::run(flags)
}
