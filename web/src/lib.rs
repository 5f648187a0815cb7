use clap::Parser;
use wasm_bindgen::prelude::*;

mod audio;
mod banner;
mod game;
mod strings;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(flatten)]
    game: game::GameProps,
}

/// Arguments come from the location hash, e.g. `#-vv&--seed=42`.
fn parse_args(location_hash: &str) -> Result<Args, clap::Error> {
    Args::try_parse_from(location_hash.split(['#', '&']))
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let args = parse_args(&location_hash).expect("Could not parse args");
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    log::debug!("args: {:?}", args.game);

    let root = document()
        .get_element_by_id("game")
        .expect("Could not find id=\"game\" element");

    log::debug!("App started");
    yew::Renderer::<game::GameView>::with_root_and_props(root, args.game).render();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_hash_uses_defaults() {
        let args = parse_args("").unwrap();
        assert_eq!(args.game.seed, None);
        assert_eq!(args.game.delay_ms, None);
        assert_eq!(args.verbose.log_level(), Some(log::Level::Error));
    }

    #[test]
    fn hash_arguments_are_split_on_ampersands() {
        let args = parse_args("#-vv&--seed=42&--delay-ms=250").unwrap();
        assert_eq!(args.game.seed, Some(42));
        assert_eq!(args.game.delay_ms, Some(250));
        assert_eq!(args.verbose.log_level(), Some(log::Level::Info));
    }

    #[test]
    fn malformed_seed_is_an_error() {
        assert!(parse_args("#--seed=kitten").is_err());
    }

    #[test]
    fn delay_beyond_u32_is_rejected() {
        assert!(parse_args("#--delay-ms=4294967295").is_ok());
        assert!(parse_args("#--delay-ms=4294967296").is_err());
    }
}
