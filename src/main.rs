// SPDX-License-Identifier: MPL-2.0
use zoomify::app::{self, Flags};

const HELP: &str = "\
Zoomify - pan, zoom and enhance images

USAGE:
  zoomify [OPTIONS] [IMAGE]

OPTIONS:
  --lang <ID>          Interface language (e.g. en-US, fr)
  --config-dir <DIR>   Directory holding settings.toml
  --i18n-dir <DIR>     Directory with extra Fluent .ftl files
  -h, --help           Print this help

ENVIRONMENT:
  ZOOMIFY_CONFIG_DIR          Config directory (overridden by --config-dir)
  ZOOMIFY_SUPABASE_URL        Backend project URL
  ZOOMIFY_SUPABASE_ANON_KEY   Backend anonymous key
  RUST_LOG                    Log filter (default: info)
";

fn parse_flags() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let flags = Flags {
        lang: args.opt_value_from_str("--lang")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
        i18n_dir: args.opt_value_from_str("--i18n-dir")?,
        file_path: args
            .finish()
            .into_iter()
            .next()
            .and_then(|s| s.into_string().ok()),
    };
    Ok(Some(flags))
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    match parse_flags() {
        Ok(Some(flags)) => app::run(flags),
        Ok(None) => {
            print!("{HELP}");
            Ok(())
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            std::process::exit(2);
        }
    }
}
