/*!

A CHIP-8 virtual machine as specified at https://en.wikipedia.org/wiki/CHIP-8.

# Crossterm Frontend

If you want to try the emulator on some programs, there is a ready-to-use implementation
you can run by using `cargo run --release --bin crossterm_frontend -- <program>`.
The keypad is mapped onto the left side of a QWERTY keyboard (`1234`, `qwer`, `asdf`, `zxcv`),
and `Esc` quits.

There is also a headless runner, `cargo run --release -- --frames 600 <program>`,
which prints the screen once it is done.

# Library

The main way of running a program is to load it as bytes and call `cycle`,
which executes exactly one instruction.

```rust
use chip8_vm::emulator::Emulator;

let mut emulator = Emulator::with_seed(7);

// Load a program at address 0x200.
let clear_display = [0x00, 0xE0];
emulator.load(&clear_display)?;
emulator.cycle()?; // Will now clear the display
assert_eq!(emulator.program_counter(), 0x202);
# Ok::<(), chip8_vm::emulator::Error>(())
```

Alternatively, you can experiment by executing instructions manually.

```rust
use chip8_vm::emulator::Emulator;
use chip8_vm::emulator::instruction::{Instruction, Reg, Const, Addr};

let mut emulator = Emulator::with_seed(7);

// Execute instructions manually
emulator.execute_single(Instruction::ClearScreen)?;

// Or many sequentially
emulator.execute_many(&[
    Instruction::Goto(Addr(0x250)),
    Instruction::SetRegToConst(Reg(0xA), Const(35)),
    Instruction::SetRegToReg(Reg(0xB), Reg(0xA))
])?;
assert_eq!(emulator.registers().v[0xB], 35);
# Ok::<(), chip8_vm::emulator::Error>(())
```

Timers are not touched by `cycle`; call `tick_timers` 60 times per second,
however many cycles you run in between.

## Custom input and output

To run a program interactively, implement `EmulatorInput` and `EmulatorOutput`,
which represent somewhere to get keyboard input from and a screen respectively,
and hand them to a `Driver`, which runs frames of cycles at 60 Hz.

```rust
use chip8_vm::emulator::{Driver, Emulator};
use chip8_vm::emulator::input::DummyInput;
use chip8_vm::emulator::output::DummyOutput;

let mut emulator = Emulator::with_seed(7);
emulator.load(&[0x12, 0x00])?; // Jump to itself forever
let mut output = DummyOutput::new();
Driver::new(10).run_frames(&mut emulator, &mut DummyInput, &mut output, 5)?;
assert_eq!(output.draws(), 5);
# Ok::<(), chip8_vm::emulator::Error>(())
```
*/

pub mod cli;
pub mod emulator;
