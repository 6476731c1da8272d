use thiserror::Error;

/// Everything that can go wrong while loading or running a program.
///
/// Unknown opcodes are deliberately absent: they execute as no-ops.
#[derive(Error, Debug)]
pub enum Error {
    #[error("could not read program: {0}")]
    Load(#[from] std::io::Error),
    #[error("program is {len} bytes, but only {max} bytes fit in memory")]
    ProgramTooLarge { len: usize, max: usize },
    #[error("memory address {address:#06X} is out of bounds")]
    OutOfBounds { address: usize },
    #[error("stack overflow, the call stack is already full")]
    StackOverflow,
    #[error("stack underflow, return with an empty call stack")]
    StackUnderflow,
}

impl Error {
    /// Stack faults leave the machine in a well-defined state,
    /// so a driver may keep running after reporting them.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::StackOverflow | Error::StackUnderflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn only_stack_faults_are_recoverable() {
        assert!(Error::StackOverflow.is_recoverable());
        assert!(Error::StackUnderflow.is_recoverable());
        assert!(!Error::OutOfBounds { address: 0x1000 }.is_recoverable());
        assert!(!Error::ProgramTooLarge { len: 4000, max: 3584 }.is_recoverable());
    }

    #[test]
    fn out_of_bounds_message_names_the_address() {
        let message = Error::OutOfBounds { address: 0xFFF }.to_string();
        assert_eq!("memory address 0x0FFF is out of bounds", message);
    }
}
