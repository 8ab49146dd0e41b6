use std::io::Write;

/// Initialize the global logger.
///
/// `RUST_LOG` is honoured unless `-v` flags or `--quiet` override it.
pub fn init_logger(verbosity: u8, quiet: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));

    if quiet {
        builder.filter_level(log::LevelFilter::Error);
    } else if verbosity > 0 {
        let level = match verbosity {
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };
        builder.filter_level(level);
    }

    builder.format(|buf, record| {
        let ts = chrono::Local::now().format("%H:%M:%S");
        writeln!(buf, "[{:<5} {}] {}", record.level(), ts, record.args())
    });

    // A second init (e.g. from tests) is harmless
    let _ = builder.try_init();
}
