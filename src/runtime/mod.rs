use std::env;
use std::io::{self, Write};

use crate::app::{Loader, display_item};
use crate::location::Location;

mod args;
mod logging;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = args::parse(env::args().skip(1)).map_err(|e| format!("{e}\n\n{}", args::USAGE))?;
    if args.help {
        println!("{}", args::USAGE);
        return Ok(());
    }

    logging::init(args.verbose);

    let mut settings = settings::load_settings();
    args.apply(&mut settings.loader);

    if args.dump_config {
        print!("{}", toml::to_string_pretty(&settings)?);
        return Ok(());
    }
    if args.locations.is_empty() {
        return Err(args::USAGE.into());
    }

    let locations: Vec<Location> = args.locations.iter().map(|l| Location::parse(l)).collect();

    let mut loader = Loader::from_settings(&settings);
    let after = loader.model().last_id();
    loader.insert_media(locations, after);
    // Nothing else to drive while downloads block.
    loader.wait_until_idle(&mut || {});

    for notice in loader.take_notices() {
        eprintln!("playloader: {notice}");
    }

    let output = &settings.output;
    let play = loader.take_play_request();
    let mut stdout = io::stdout().lock();
    for (id, item) in loader.model().iter() {
        let line = display_item(item, &output.display_fields, &output.display_separator);
        if Some(id) == play {
            writeln!(stdout, "> {line}")?;
        } else {
            writeln!(stdout, "{line}")?;
        }
    }

    Ok(())
}
