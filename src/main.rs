use std::fs::File;
use std::io::{self, Read};
use std::thread;
use std::time::Duration;

use clap::Parser;

use rm_pointer::clock::SystemClock;
use rm_pointer::config::{Cli, Config};
use rm_pointer::cursor::{CursorState, TrackCursor};
use rm_pointer::input::{run_pen, PenDecoder};
use rm_pointer::platform::CursorPlatform;
use rm_pointer::pointer::{Point, Synthesizer};
use rm_pointer::sink::{DumpSink, EventSink, UinputSink};

const REOPEN_DELAY: Duration = Duration::from_secs(2);

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::load(&cli);
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let profile = config.profile();
    let (width, height) = profile.output_dimensions(config.orientation);

    log::info!(
        "rm-pointer starting (device={}, input={}, orientation={}, positioning={}, double-click={}ms)",
        profile.name,
        config.input,
        config.orientation,
        config.positioning,
        config.double_click_ms
    );

    let sink: Box<dyn EventSink> = if config.dump {
        Box::new(DumpSink::stdout())
    } else {
        Box::new(UinputSink::open(width, height)?)
    };

    let cursor = CursorState::shared(Point::new(width as f64 / 2.0, height as f64 / 2.0));
    let platform = CursorPlatform::new(config.double_click_interval(), cursor.clone());
    let mut synth = Synthesizer::new(
        TrackCursor::new(sink, cursor),
        platform,
        SystemClock::new(),
        config.positioning,
    );
    let mut decoder = PenDecoder::new(profile, config.orientation, config.positioning, config.buttons);

    if !config.dump {
        // Give udev/libinput time to attach before sending events.
        thread::sleep(Duration::from_secs(1));
    }
    log::info!("Pointer forwarding started");

    if config.reads_stdin() {
        let mut stdin = io::stdin().lock();
        run_pen(&mut stdin, &mut decoder, &mut synth)?;
    } else {
        loop {
            match open_input(&config.input) {
                Ok(mut input) => match run_pen(&mut input, &mut decoder, &mut synth) {
                    Ok(()) => break,
                    Err(e) => log::error!("[pen] {}", e),
                },
                Err(e) => log::error!("[pen] cannot open {}: {}", config.input, e),
            }
            log::warn!("[pen] input lost, reopening in {}s…", REOPEN_DELAY.as_secs());
            thread::sleep(REOPEN_DELAY);
        }
    }

    synth.close()?;
    Ok(())
}

fn open_input(path: &str) -> io::Result<impl Read> {
    let file = File::open(path)?;
    log::info!("Reading pen input from {}", path);
    Ok(io::BufReader::new(file))
}
