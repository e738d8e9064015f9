//! `wcurve` command-line viewer.

use std::path::Path;

use wcurve::{fetch::CurveSource, options::Options, Viewer};

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(input) = args.next() else {
        log::error!(
            "Usage: wcurve <URL | file.json | file.fasta> [options.toml]"
        );
        std::process::exit(1);
    };

    let options = match args.next() {
        Some(path) => match Options::load(Path::new(&path)) {
            Ok(options) => options,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => Options::default(),
    };

    let source = CurveSource::parse(&input);
    log::info!("opening {}", source.location());

    let result = Viewer::builder()
        .with_source(source)
        .with_options(options)
        .build()
        .run();
    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}
