use crate::config::LoaderSettings;

pub const USAGE: &str = "\
usage: playloader [-v] [--play-first] [--no-recurse] [--follow-symlinks] [--dump-config] LOCATION...

LOCATION is a file, directory, .m3u/.pls playlist or URL.

  -v, --verbose        debug logging
      --play-first     mark the first loaded item for playback
      --no-recurse     do not descend into subdirectories
      --follow-symlinks
                       descend into symlinked directories
      --dump-config    print the effective settings as TOML and exit
  -h, --help           show this help";

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub verbose: bool,
    pub play_first: bool,
    pub no_recurse: bool,
    pub follow_symlinks: bool,
    pub dump_config: bool,
    pub help: bool,
    pub locations: Vec<String>,
}

impl CliArgs {
    /// Flags only ever switch behavior on top of the loaded settings.
    pub fn apply(&self, loader: &mut LoaderSettings) {
        if self.play_first {
            loader.play_first_item = true;
        }
        if self.no_recurse {
            loader.recurse = false;
        }
        if self.follow_symlinks {
            loader.follow_symlinks = true;
        }
    }
}

pub fn parse(args: impl IntoIterator<Item = String>) -> Result<CliArgs, String> {
    let mut out = CliArgs::default();
    let mut only_locations = false;

    for arg in args {
        if only_locations || !arg.starts_with('-') || arg == "-" {
            out.locations.push(arg);
            continue;
        }
        match arg.as_str() {
            "--" => only_locations = true,
            "-v" | "--verbose" => out.verbose = true,
            "--play-first" => out.play_first = true,
            "--no-recurse" => out.no_recurse = true,
            "--follow-symlinks" => out.follow_symlinks = true,
            "--dump-config" => out.dump_config = true,
            "-h" | "--help" => out.help = true,
            other => return Err(format!("unknown option '{other}'")),
        }
    }

    Ok(out)
}
