/// Install `env_logger`. `RUST_LOG` wins unless `verbose` forces debug output.
pub fn init(verbose: bool) {
    if verbose {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_module("playloader", log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }
}
