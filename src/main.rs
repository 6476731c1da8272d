use structopt::StructOpt;

use chip8_vm::cli::RunOpt;
use chip8_vm::emulator::{input::DummyInput, output::DummyOutput};

/// Run a program without a screen or keyboard, then print the screen.
#[derive(StructOpt, Debug)]
#[structopt(name = "chip8-vm")]
struct Opt {
    /// How many frames to run before printing the screen
    #[structopt(short, long, default_value = "600")]
    frames: usize,

    #[structopt(flatten)]
    run: RunOpt,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Get configuration and load the program
    let opt = Opt::from_args();
    let mut emulator = opt.run.emulator()?;
    let driver = opt.run.driver();

    let mut output = DummyOutput::new();
    let result = driver.run_frames(&mut emulator, &mut DummyInput, &mut output, opt.frames);

    print!("{}", emulator.framebuffer());
    log::info!(
        "Stopped at {:#06X} after {} frames",
        emulator.program_counter(),
        output.draws()
    );

    result?;
    Ok(())
}
