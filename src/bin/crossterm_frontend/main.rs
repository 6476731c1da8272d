use std::time::Duration;

use structopt::StructOpt;

use chip8_vm::cli::RunOpt;

mod crossterm_io;
mod key_manager;
use crossterm_io::{CrosstermInput, CrosstermOutput};

/// Run a program in the terminal. Esc quits.
#[derive(StructOpt, Debug)]
#[structopt(name = "crossterm_frontend")]
struct Opt {
    /// Terminal columns per pixel
    #[structopt(short, long, default_value = "2")]
    scale: usize,

    /// Frames per second, the timers count down once per frame
    #[structopt(long, default_value = "60")]
    fps: u32,

    /// How long a key counts as held after it was pressed, in milliseconds
    #[structopt(long, default_value = "150")]
    key_timeout: u64,

    #[structopt(flatten)]
    run: RunOpt,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr, redirect them to keep the screen intact
    pretty_env_logger::init();

    // Get configuration and load the program
    let opt = Opt::from_args();
    let mut emulator = opt.run.emulator()?;
    let driver = opt.run.driver().with_frame_rate(opt.fps);

    let mut input = CrosstermInput::new(Duration::from_millis(opt.key_timeout));
    let mut output = CrosstermOutput::new(opt.scale)?;

    // Start execution, the terminal is restored when `output` is dropped
    let result = driver.run(&mut emulator, &mut input, &mut output);
    drop(output);

    if let Err(err) = &result {
        log::error!("Stopped at {:#06X}: {}", emulator.program_counter(), err);
    }
    result?;
    Ok(())
}
